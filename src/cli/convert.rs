use std::path::PathBuf;

use colored::Colorize;

use crate::convert::{ConversionOrchestrator, ConversionRequest};
use crate::currencies;
use crate::db::{get_connection, init_db};
use crate::error::{Result, TabfxError};
use crate::export::write_table;
use crate::guess::suggest_roles;
use crate::rates::RateStore;
use crate::reader::read_rows;
use crate::settings::{load_settings, rates_db_path};
use crate::table::Table;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: &str,
    target: Option<&str>,
    date_col: Option<&str>,
    amount_col: Option<&str>,
    currency_col: Option<&str>,
    combined: bool,
    output: Option<&str>,
    include_hidden: bool,
) -> Result<()> {
    let settings = load_settings();
    let target = target
        .map(|t| t.to_uppercase())
        .unwrap_or_else(|| settings.target_currency.clone());
    if !currencies::is_currency_code(&target) {
        return Err(TabfxError::UnknownCurrency(target));
    }

    let input = PathBuf::from(file);
    let rows = read_rows(&input)?;
    let mut table = Table::from_rows(rows, &settings.header_mode())
        .ok_or_else(|| TabfxError::Other(format!("{file} contains no rows")))?;

    // Explicit column flags win; suggestions fill the gaps.
    let roles = suggest_roles(&table);
    let date_column = date_col
        .map(str::to_string)
        .or(roles.date_column)
        .ok_or_else(|| TabfxError::UnknownColumn("no date column found".to_string()))?;
    let amount_column = amount_col
        .map(str::to_string)
        .or(roles.amount_column)
        .ok_or_else(|| TabfxError::UnknownColumn("no amount column found".to_string()))?;
    let currency_column = currency_col.map(str::to_string).or(roles.currency_column);
    if currency_column.is_none() && !combined {
        return Err(TabfxError::UnknownColumn(
            "no currency column found; pass --currency-col or --combined".to_string(),
        ));
    }

    let conn = get_connection(&rates_db_path())?;
    init_db(&conn)?;
    let store = RateStore::load(&conn)?;
    if store.is_empty() {
        return Err(TabfxError::EmptyRateStore);
    }

    let request = ConversionRequest {
        date_column,
        amount_column,
        currency_column,
        amounts_currencies_combined: combined,
        target_currency: target.clone(),
    };
    let mut orchestrator = ConversionOrchestrator::new(&store);
    orchestrator.hide_other_columns = settings.hide_other_columns;
    let outcome = orchestrator.run(&mut table, &request);

    if !outcome.synthesized_usd && outcome.synthesized_target.is_none() {
        println!(
            "{} no conversion columns were added; check the column titles",
            "Warning:".yellow().bold()
        );
        return Ok(());
    }

    let output = output.map(PathBuf::from).unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table");
        input.with_file_name(format!("{stem}-converted.csv"))
    });
    write_table(&output, &table, include_hidden)?;

    println!(
        "{} {} rows converted to {} -> {}",
        "Done:".green().bold(),
        table.data_row_indices().len(),
        target,
        output.display()
    );
    Ok(())
}
