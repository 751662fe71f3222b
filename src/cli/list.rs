use std::io::ErrorKind;
use std::path::Path;

use colored::Colorize;

use crate::error::Result;

pub fn run(path: &Path) -> Result<()> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("{} {}", "No saved file found at:".red(), path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let entries = content.trim();
    if entries.is_empty() {
        println!("{}", "No entries saved yet.".cyan());
    } else {
        println!("{}\n{entries}", "Saved budget entries:".cyan());
    }
    Ok(())
}
