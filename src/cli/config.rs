use crate::error::Result;
use crate::settings::{save_settings, settings_path, Settings};

pub fn run(settings: &Settings) -> Result<()> {
    save_settings(settings)?;
    println!("Settings written to {}", settings_path().display());
    Ok(())
}
