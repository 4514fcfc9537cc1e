use colored::Colorize;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{save_settings, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = Settings::default();
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }
    std::fs::create_dir_all(&settings.data_dir)?;

    let db_path = std::path::Path::new(&settings.data_dir).join("rates.db");
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;
    save_settings(&settings)?;

    println!("{} {}", "Initialized".green().bold(), settings.data_dir);
    println!("Load a rate archive next: tabfx rates load <file.csv>");
    Ok(())
}
