use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, rates_db_path};

pub fn run() -> Result<()> {
    let settings = load_settings();
    println!("{}", "tabfx".bold());
    println!("Data directory:    {}", settings.data_dir);
    println!("Target currency:   {}", settings.target_currency);
    println!("Header detection:  {:?}", settings.header_mode);

    if rates_db_path().exists() {
        super::rates::status()?;
    } else {
        println!("{}", "No rate database; run `tabfx init` first.".yellow());
    }
    Ok(())
}
