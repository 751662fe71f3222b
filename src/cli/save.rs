use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::reconciler::{self, Outcome, Resolution, StoreWrite};
use crate::record::Record;
use crate::store::{append_line, Store, StoreLock};

/// Save `record`, asking on stdin if it collides with a stored entry.
/// Failures are reported and swallowed.
pub fn run(path: &Path, record: &Record) {
    let stdin = io::stdin();
    let result = save(path, record, |existing| {
        prompt(&mut stdin.lock(), &mut io::stdout(), existing)
    });

    match result {
        Ok(outcome) => report(path, outcome),
        Err(e) => println!("{} {e}", "Failed to save:".red()),
    }
}

/// Load, reconcile and write back under the store lock.
pub fn save<F>(path: &Path, record: &Record, decide: F) -> Result<Outcome>
where
    F: FnOnce(&str) -> Resolution,
{
    let _lock = StoreLock::acquire(path)?;
    let store = Store::load(path)?;
    let reconciled = reconciler::reconcile(store, record, decide);

    match reconciled.outcome.store_write() {
        StoreWrite::None => {}
        StoreWrite::Append => append_line(path, &record.to_string())?,
        StoreWrite::Rewrite => reconciled.store.write_atomic(path)?,
    }
    Ok(reconciled.outcome)
}

/// Ask what to do about a key collision. Read failures count as drop.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, existing: &str) -> Resolution {
    let _ = writeln!(
        output,
        "{}\n  {existing}\n{}\n[o] Overwrite\n[d] Drop the new one\n[n] Write as new line (duplicate)",
        "An entry with the same name and amount already exists:".cyan(),
        "What would you like to do?".cyan(),
    );
    let _ = write!(output, "Choice (o/d/n): ");
    let _ = output.flush();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => Resolution::parse(&answer),
        Err(_) => Resolution::Drop,
    }
}

fn report(path: &Path, outcome: Outcome) {
    let shown = path.display();
    match outcome {
        Outcome::AlreadyExists => {
            println!("{}", "Exact entry already exists. No action taken.".cyan())
        }
        Outcome::Saved => println!("{} {shown}", "Saved to file:".cyan()),
        Outcome::Overwritten { removed } => println!(
            "{} {shown} ({removed} replaced)",
            "Entry overwritten in file:".cyan()
        ),
        Outcome::Duplicated => println!("{} {shown}", "Duplicate entry saved to file:".cyan()),
        Outcome::Dropped => println!("{}", "Skipped saving.".cyan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::BudgetRange;

    fn rent(percent: f64) -> Record {
        Record::from_range(Some("Rent"), &BudgetRange::new(1200.0, percent))
    }

    fn answer(text: &str) -> Resolution {
        let mut out = Vec::new();
        prompt(&mut text.as_bytes(), &mut out, "Rent ($1200.00): ...")
    }

    #[test]
    fn test_prompt_answers() {
        assert_eq!(answer("o\n"), Resolution::Overwrite);
        assert_eq!(answer("N\n"), Resolution::Duplicate);
        assert_eq!(answer("d\n"), Resolution::Drop);
        assert_eq!(answer("x\n"), Resolution::Drop);
        assert_eq!(answer(""), Resolution::Drop);
    }

    #[test]
    fn test_prompt_shows_choices() {
        let mut out = Vec::new();
        prompt(&mut "d\n".as_bytes(), &mut out, "Rent ($1200.00): old");
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Rent ($1200.00): old"));
        assert!(shown.contains("[o] Overwrite"));
        assert!(shown.contains("[d] Drop the new one"));
        assert!(shown.contains("[n] Write as new line (duplicate)"));
        assert!(shown.ends_with("Choice (o/d/n): "));
    }

    #[test]
    fn test_save_twice_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let first = save(&path, &rent(5.0), |_| unreachable!()).unwrap();
        assert_eq!(first, Outcome::Saved);
        let before = std::fs::read_to_string(&path).unwrap();
        let second = save(&path, &rent(5.0), |_| unreachable!()).unwrap();
        assert_eq!(second, Outcome::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_overwrite_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(
            &path,
            "Rent ($1200.00): Amount ≥ $1140.00 and ≤ $1260.00\n\
             junk text with no structure\n\
             Rent ($1200.00): Amount ≥ $600.00 and ≤ $1800.00\n",
        )
        .unwrap();
        let outcome = save(&path, &rent(10.0), |_| Resolution::Overwrite).unwrap();
        assert_eq!(outcome, Outcome::Overwritten { removed: 2 });
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "junk text with no structure\nRent ($1200.00): Amount ≥ $1080.00 and ≤ $1320.00\n"
        );
    }

    #[test]
    fn test_duplicate_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        save(&path, &rent(5.0), |_| unreachable!()).unwrap();
        let outcome = save(&path, &rent(10.0), |_| Resolution::Duplicate).unwrap();
        assert_eq!(outcome, Outcome::Duplicated);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_save_into_unwritable_location_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        // Parent "directory" is a regular file.
        let path = blocker.join("notes.txt");
        assert!(save(&path, &rent(5.0), |_| Resolution::Drop).is_err());
    }
}
