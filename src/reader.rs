use std::path::Path;

use crate::error::{Result, TabfxError};

/// Read any supported tabular file into raw string rows. Delimiter
/// handling, quoting, and sheet extraction all end here; the rest of the
/// pipeline only ever sees `Vec<Vec<String>>`.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "txt" => read_delimited(path, None),
        "tsv" => read_delimited(path, Some(b'\t')),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xls" => read_xlsx(path),
        _ => Err(TabfxError::UnsupportedFile(path.display().to_string())),
    }
}

/// Pick the separator that occurs most often in the first line. Covers
/// TXT exports that are really tab- or semicolon-separated.
fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");
    let candidates = [b'\t', b';', b','];
    let mut best = b',';
    let mut best_count = 0;
    for delim in candidates {
        let count = first_line.bytes().filter(|b| *b == delim).count();
        if count > best_count {
            best = delim;
            best_count = count;
        }
    }
    best
}

fn read_delimited(path: &Path, delimiter: Option<u8>) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(rows)
}

#[cfg(feature = "xlsx")]
fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}

#[cfg(feature = "xlsx")]
fn read_xlsx(path: &Path) -> Result<Vec<Vec<String>>> {
    use calamine::{Data, Reader};

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| TabfxError::Other(format!("Failed to open XLSX: {e}")))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| TabfxError::Other(format!("Failed to read sheet {sheet:?}: {e}")))?;

    let mut rows = Vec::new();
    for row in range.rows() {
        let cells = row
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                Data::String(s) => s.clone(),
                Data::Float(f) => {
                    if f.fract() == 0.0 {
                        format!("{}", *f as i64)
                    } else {
                        f.to_string()
                    }
                }
                Data::Int(i) => i.to_string(),
                Data::Bool(b) => b.to_string(),
                Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
                Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
                Data::Error(_) => String::new(),
            })
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "Date,Amount\n2020-01-01,\"1,234.56\"\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["2020-01-01", "1,234.56"]);
    }

    #[test]
    fn test_read_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.tsv");
        std::fs::write(&path, "Date\tAmount\n2020-01-01\t10.00\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0], vec!["Date", "Amount"]);
        assert_eq!(rows[1], vec!["2020-01-01", "10.00"]);
    }

    #[test]
    fn test_read_txt_sniffs_semicolons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "Date;Amount\n2020-01-01;10.00\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[1], vec!["2020-01-01", "10.00"]);
    }

    #[test]
    fn test_read_ragged_rows_keeps_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "banner\nDate,Amount,Currency\n2020-01-01,10.00,USD\n").unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_read_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.pdf");
        std::fs::write(&path, "x").unwrap();
        assert!(read_rows(&path).is_err());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), "2025-01-10");
    }
}
