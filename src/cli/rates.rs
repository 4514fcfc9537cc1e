use std::path::PathBuf;

use colored::Colorize;
use comfy_table::Table as DisplayTable;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::rates::load_archive;
use crate::settings::rates_db_path;

pub fn load(file: &str) -> Result<()> {
    let path = PathBuf::from(file);
    let mut conn = get_connection(&rates_db_path())?;
    init_db(&conn)?;

    let result = load_archive(&mut conn, &path)?;
    if result.duplicate_file {
        println!("This archive has already been loaded (duplicate checksum).");
        return Ok(());
    }
    println!(
        "{} {} rates across {} dates",
        "Loaded".green().bold(),
        result.rows_loaded,
        result.dates_loaded
    );
    Ok(())
}

pub fn status() -> Result<()> {
    let conn = get_connection(&rates_db_path())?;
    init_db(&conn)?;

    let dates: i64 = conn.query_row("SELECT count(DISTINCT date) FROM rates", [], |r| r.get(0))?;
    let codes: i64 = conn.query_row("SELECT count(DISTINCT code) FROM rates", [], |r| r.get(0))?;
    let range: (Option<String>, Option<String>) =
        conn.query_row("SELECT min(date), max(date) FROM rates", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })?;
    let loads: i64 = conn.query_row("SELECT count(*) FROM loads", [], |r| r.get(0))?;

    let mut table = DisplayTable::new();
    table.set_header(vec!["Dates", "Currencies", "From", "To", "Archives loaded"]);
    table.add_row(vec![
        dates.to_string(),
        codes.to_string(),
        range.0.unwrap_or_else(|| "-".to_string()),
        range.1.unwrap_or_else(|| "-".to_string()),
        loads.to_string(),
    ]);
    println!("{table}");
    Ok(())
}
