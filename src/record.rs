use std::fmt;
use std::str::FromStr;

use crate::error::R50Error;
use crate::range::BudgetRange;

const RULE_OPEN: &str = ": Amount ≥ $";
const RULE_JOIN: &str = " and ≤ $";

/// One stored line: `Rent ($1200.00): Amount ≥ $1140.00 and ≤ $1260.00`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: Option<String>,
    pub amount: f64,
    pub low: f64,
    pub high: f64,
}

impl Record {
    pub fn from_range(name: Option<&str>, range: &BudgetRange) -> Self {
        Self {
            name: name.map(str::to_string),
            amount: range.amount,
            low: range.low,
            high: range.high,
        }
    }

    /// The Firefly rule text without the label, as copied into the rule editor.
    pub fn rule(&self) -> String {
        format!("Amount ≥ ${:.2} and ≤ ${:.2}", self.low, self.high)
    }

    /// Identity of this record. The amount is rounded to the two decimals
    /// it is written with, so it compares equal to the stored text.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            name: self.name.as_deref().map(|n| n.trim().to_string()),
            amount: format!("{:.2}", self.amount).parse().ok(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} (${:.2}): {}", self.amount, self.rule()),
            None => write!(f, "${:.2}: {}", self.amount, self.rule()),
        }
    }
}

impl FromStr for Record {
    type Err = R50Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let bad = || R50Error::Decode(line.to_string());
        let line = line.trim();
        let (prefix, bounds) = line.split_once(RULE_OPEN).ok_or_else(bad)?;
        let (low, high) = bounds.split_once(RULE_JOIN).ok_or_else(bad)?;
        let low: f64 = low.parse().map_err(|_| bad())?;
        let high: f64 = high.parse().map_err(|_| bad())?;

        let (name, amount) = match prefix.strip_suffix(')') {
            Some(labelled) => {
                let (name, amount) = labelled.rsplit_once(" ($").ok_or_else(bad)?;
                (Some(name.to_string()), amount)
            }
            None => (None, prefix.strip_prefix('$').ok_or_else(bad)?),
        };
        let amount: f64 = amount.parse().map_err(|_| bad())?;

        Ok(Self {
            name,
            amount,
            low,
            high,
        })
    }
}

/// Logical identity of a stored line: label plus base amount.
///
/// Lines that cannot be read carry no amount. Keys built from a [`Record`]
/// always carry one, so unreadable lines never compare equal to a new entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryKey {
    pub name: Option<String>,
    pub amount: Option<f64>,
}

impl EntryKey {
    /// Key of a stored line: decoded as a [`Record`] when possible, otherwise
    /// through [`EntryKey::extract`].
    pub fn of_line(line: &str) -> Self {
        match line.parse::<Record>() {
            Ok(record) => record.key(),
            Err(_) => Self::extract(line),
        }
    }

    /// Lenient key extraction that never fails.
    ///
    /// Only the text before the first colon is inspected. `Name ($12.00)`
    /// yields the trimmed name and the amount inside the parentheses (absent
    /// if it does not parse). A bare `$12.00` yields no name and the amount.
    /// Anything else yields an empty key.
    pub fn extract(line: &str) -> Self {
        let Some((prefix, _)) = line.split_once(':') else {
            return Self::default();
        };

        if prefix.contains('(') && prefix.contains(')') {
            if let Some((name, rest)) = prefix.split_once('(') {
                let inner = rest.split(')').next().unwrap_or_default();
                return Self {
                    name: Some(name.trim().to_string()),
                    amount: parse_amount(inner),
                };
            }
        }

        Self {
            name: None,
            amount: prefix.trim().strip_prefix('$').and_then(|a| a.trim().parse().ok()),
        }
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    text.strip_prefix('$').unwrap_or(text).trim().parse().ok()
}
