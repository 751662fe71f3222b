use log::{debug, warn};

use crate::record::{EntryKey, Record};
use crate::store::Store;

/// How a new record relates to what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoMatch,
    /// Same name and amount, different range text.
    KeyMatch { index: usize },
    /// Byte-identical line already present.
    ExactMatch { index: usize },
}

/// The user's answer when a key match is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Overwrite,
    Drop,
    Duplicate,
}

impl Resolution {
    /// `o` overwrites, `n` writes a duplicate, anything else drops.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "o" => Resolution::Overwrite,
            "n" => Resolution::Duplicate,
            _ => Resolution::Drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AlreadyExists,
    Saved,
    Overwritten { removed: usize },
    Dropped,
    Duplicated,
}

/// What has to happen on disk to make the file match a reconciled store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreWrite {
    None,
    Append,
    Rewrite,
}

impl Outcome {
    pub fn store_write(&self) -> StoreWrite {
        match self {
            Outcome::AlreadyExists | Outcome::Dropped => StoreWrite::None,
            Outcome::Saved | Outcome::Duplicated => StoreWrite::Append,
            Outcome::Overwritten { .. } => StoreWrite::Rewrite,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub store: Store,
    pub outcome: Outcome,
}

/// Compare `entry` against the store. Only the first key-equal line counts.
pub fn classify(store: &Store, entry: &Record) -> Classification {
    let line = entry.to_string();
    let key = entry.key();

    for (index, existing) in store.lines.iter().enumerate() {
        let existing_key = match existing.parse::<Record>() {
            Ok(record) => record.key(),
            Err(_) => {
                warn!("Stored line {index} is not a budget record, keeping as is: {existing}");
                EntryKey::extract(existing)
            }
        };
        if existing_key == key {
            debug!("Line {index} shares key {key:?}");
            return if *existing == line {
                Classification::ExactMatch { index }
            } else {
                Classification::KeyMatch { index }
            };
        }
    }
    Classification::NoMatch
}

/// Merge `entry` into `store`.
///
/// `decide` is asked only on a key match, with the first matching stored line.
/// Overwrite removes every line sharing the entry's key, not just that one.
pub fn reconcile<F>(mut store: Store, entry: &Record, decide: F) -> Reconciled
where
    F: FnOnce(&str) -> Resolution,
{
    let line = entry.to_string();

    let outcome = match classify(&store, entry) {
        Classification::ExactMatch { index } => {
            debug!("Identical to stored line {index}");
            Outcome::AlreadyExists
        }
        Classification::NoMatch => {
            store.lines.push(line);
            Outcome::Saved
        }
        Classification::KeyMatch { index } => match decide(&store.lines[index]) {
            Resolution::Overwrite => {
                let key = entry.key();
                let before = store.lines.len();
                store.lines.retain(|l| EntryKey::of_line(l) != key);
                let removed = before - store.lines.len();
                store.lines.push(line);
                Outcome::Overwritten { removed }
            }
            Resolution::Duplicate => {
                store.lines.push(line);
                Outcome::Duplicated
            }
            Resolution::Drop => Outcome::Dropped,
        },
    };

    debug!("Reconciled as {outcome:?}");
    Reconciled { store, outcome }
}
