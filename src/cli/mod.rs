pub mod calc;
pub mod config;
pub mod list;
pub mod save;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "r50", about = "Generate Firefly-friendly budget ranges.")]
pub struct Cli {
    /// The base amount to calculate from
    #[arg(allow_negative_numbers = true)]
    pub amount: Option<f64>,
    /// Percent range either side of the amount (default 50, or the configured default)
    #[arg(allow_negative_numbers = true)]
    pub percent: Option<f64>,
    /// Optional name/label to include
    #[arg(short, long)]
    pub name: Option<String>,
    /// Save the Firefly rule to the notes file
    #[arg(short, long)]
    pub save: bool,
    /// Copy the Firefly rule to the clipboard
    #[arg(short, long)]
    pub copy: bool,
    /// List all saved entries and exit
    #[arg(short, long)]
    pub list: bool,
    /// Notes file to use instead of the configured one
    #[arg(long)]
    pub file: Option<String>,
    /// Write settings.json with the current settings and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl Cli {
    /// The label, if one was given and is not blank.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}
