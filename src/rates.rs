use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::Duration;
use log::{debug, warn};
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::dates;
use crate::error::{Result, TabfxError};

/// Cell marker the published archive uses for days without a quote.
pub const MISSING_SENTINEL: &str = "NaN";

/// Original date plus four prior calendar days; absorbs weekends and
/// holidays without an unbounded backward scan.
const MAX_LOOKUP_ATTEMPTS: usize = 5;

/// Outcome of a rate lookup. Kept distinguishable inside the crate; the
/// conversion layer collapses `NotFound` to a written "0" at the table
/// boundary, so readers of the output cannot tell a zero rate from a
/// missing one, and that external behavior is preserved deliberately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLookup {
    Found(f64),
    NotFound,
}

/// Read-only snapshot of the rate table, date-indexed in memory. One
/// `load` per conversion replaces per-cell SQLite queries while keeping
/// identical fallback semantics. Rates are quoted as units of currency
/// per 1 USD.
pub struct RateStore {
    by_date: BTreeMap<String, HashMap<String, String>>,
}

impl RateStore {
    pub fn load(conn: &Connection) -> Result<RateStore> {
        let mut stmt = conn.prepare("SELECT date, code, value FROM rates")?;
        let mut by_date: BTreeMap<String, HashMap<String, String>> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for row in rows {
            let (date, code, value) = row?;
            by_date.entry(date).or_default().insert(code, value);
        }
        Ok(RateStore { by_date })
    }

    #[cfg(test)]
    pub fn from_rows(rows: &[(&str, &str, &str)]) -> RateStore {
        let mut by_date: BTreeMap<String, HashMap<String, String>> = BTreeMap::new();
        for (date, code, value) in rows {
            by_date
                .entry(date.to_string())
                .or_default()
                .insert(code.to_string(), value.to_string());
        }
        RateStore { by_date }
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn date_count(&self) -> usize {
        self.by_date.len()
    }

    pub fn date_range(&self) -> Option<(&str, &str)> {
        let first = self.by_date.keys().next()?;
        let last = self.by_date.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }

    /// Look up the rate for `code` on `raw_date`, walking back one calendar
    /// day per attempt when the cell is missing or sentinel-valued.
    pub fn lookup(&self, code: &str, raw_date: &str) -> RateLookup {
        let code = code.trim().to_uppercase();
        let Some(mut date) = dates::parse_flexible(raw_date) else {
            debug!("rate lookup: unparsable date {raw_date:?}");
            return RateLookup::NotFound;
        };
        for attempt in 0..MAX_LOOKUP_ATTEMPTS {
            let canonical = dates::to_canonical(date);
            if let Some(cell) = self
                .by_date
                .get(&canonical)
                .and_then(|row| row.get(&code))
            {
                let cell = cell.trim();
                if cell != MISSING_SENTINEL && !cell.is_empty() {
                    if let Ok(rate) = cell.parse::<f64>() {
                        if attempt > 0 {
                            debug!("rate for {code} on {raw_date}: used {canonical} ({attempt} days back)");
                        }
                        return RateLookup::Found(rate);
                    }
                }
            }
            date = date - Duration::days(1);
        }
        debug!("no rate for {code} within {MAX_LOOKUP_ATTEMPTS} days of {raw_date}");
        RateLookup::NotFound
    }
}

// ---------------------------------------------------------------------------
// Archive loading
// ---------------------------------------------------------------------------

pub struct LoadResult {
    pub rows_loaded: usize,
    pub dates_loaded: usize,
    pub duplicate_file: bool,
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// Load the published wide-format archive CSV into the rates table: the
/// date column is labeled "Currency", every other header cell is an ISO
/// code, missing quotes are "NaN". Re-loading an identical file is a no-op
/// recognized by checksum.
pub fn load_archive(conn: &mut Connection, file_path: &Path) -> Result<LoadResult> {
    let checksum = compute_checksum(file_path)?;
    {
        let mut stmt = conn.prepare("SELECT 1 FROM loads WHERE checksum = ?1")?;
        if stmt.exists([&checksum])? {
            return Ok(LoadResult {
                rows_loaded: 0,
                dates_loaded: 0,
                duplicate_file: true,
            });
        }
    }

    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut codes: Vec<String> = Vec::new();
    let mut rows_loaded = 0usize;
    let mut dates_loaded = 0usize;
    let mut min_date: Option<String> = None;
    let mut max_date: Option<String> = None;

    let tx = conn.transaction()?;
    for result in rdr.records() {
        let record = result?;
        if codes.is_empty() {
            if record.iter().next().map(str::trim) != Some("Currency") {
                return Err(TabfxError::Other(format!(
                    "{} does not look like a rate archive (no Currency header)",
                    file_path.display()
                )));
            }
            codes = record.iter().skip(1).map(|c| c.trim().to_string()).collect();
            continue;
        }
        let Some(date) = record.get(0).map(str::trim).filter(|d| !d.is_empty()) else {
            continue;
        };
        let Some(date) = dates::parse_flexible(date).map(dates::to_canonical) else {
            warn!("rate archive: skipping row with unparsable date {date:?}");
            continue;
        };
        for (i, code) in codes.iter().enumerate() {
            let value = record.get(i + 1).unwrap_or(MISSING_SENTINEL);
            tx.execute(
                "INSERT OR REPLACE INTO rates (date, code, value) VALUES (?1, ?2, ?3)",
                rusqlite::params![date, code, value.trim()],
            )?;
            rows_loaded += 1;
        }
        if min_date.as_deref().map_or(true, |d| date.as_str() < d) {
            min_date = Some(date.clone());
        }
        if max_date.as_deref().map_or(true, |d| date.as_str() > d) {
            max_date = Some(date.clone());
        }
        dates_loaded += 1;
    }

    tx.execute(
        "INSERT INTO loads (filename, checksum, row_count, date_range_start, date_range_end) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            checksum,
            rows_loaded as i64,
            min_date,
            max_date,
        ],
    )?;
    tx.commit()?;

    Ok(LoadResult {
        rows_loaded,
        dates_loaded,
        duplicate_file: false,
    })
}
