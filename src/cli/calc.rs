use colored::Colorize;

use crate::cli::{save, Cli};
use crate::clipboard::{self, CopyStatus};
use crate::error::{R50Error, Result};
use crate::fmt::{money, percent};
use crate::range::BudgetRange;
use crate::record::Record;
use crate::settings::Settings;

pub fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    let amount = cli.amount.ok_or(R50Error::MissingAmount)?;
    let range = BudgetRange::new(amount, cli.percent.unwrap_or(settings.default_percent));
    let record = Record::from_range(cli.label(), &range);

    print_range(&range, record.name.as_deref());

    if cli.copy {
        copy(settings, &record);
    }

    if cli.save {
        let path = settings.resolve_store_path(cli.file.as_deref());
        save::run(&path, &record);
    }
    Ok(())
}

fn print_range(range: &BudgetRange, name: Option<&str>) {
    let pct = percent(range.percent);
    println!(
        "{} {}|{}|{}",
        "Original:".cyan(),
        money(range.amount),
        format!("-{pct}: {}", money(range.low)).red(),
        format!("+{pct}: {}", money(range.high)).green(),
    );
    println!(
        "\n{} Amount {} and {}",
        "Firefly rule:".cyan(),
        format!("≥ {}", money(range.low)).red(),
        format!("≤ {}", money(range.high)).green(),
    );
    if let Some(name) = name {
        println!("\n{} {name}", "Labelled as:".cyan());
    }
}

fn copy(settings: &Settings, record: &Record) {
    match clipboard::copy(&settings.clipboard_command, &record.to_string()) {
        Ok(CopyStatus::Copied) => println!("{}", "Copied to clipboard.".cyan()),
        Ok(CopyStatus::Unavailable(program)) => println!(
            "{}",
            format!("Clipboard tool ({program}) not found. Skipping copy.").red()
        ),
        Err(e) => println!("{}", e.to_string().red()),
    }
}
