use log::warn;

use crate::currencies;
use crate::header::{self, HeaderMode};

/// Cell placeholder for rows too short to carry a value at a column index,
/// and for pre-header rows. Exporters pass it through verbatim.
pub const OUT_OF_RANGE: &str = "outside of table data range";
/// Cell placeholder for rows whose amount or date failed to convert.
pub const UNABLE_TO_CONVERT: &str = "unable to convert value";

pub const FROM_CURRENCY_TITLE: &str = "From Currency";
pub const USD_COLUMN_TITLE: &str = "To USD";

/// Stable logical identity of a column. Source columns keep their original
/// index; derived columns carry their synthetic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Source(usize),
    CurrencyCode,
    Usd,
    Target(u32),
}

impl ColumnKind {
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, ColumnKind::Source(_))
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub kind: ColumnKind,
    pub title: String,
    /// Presentation attribute only; hidden columns stay in the table.
    pub hidden: bool,
}

impl Column {
    pub fn source(index: usize, title: &str) -> Self {
        Column {
            kind: ColumnKind::Source(index),
            title: title.trim().to_string(),
            hidden: false,
        }
    }
}

/// Row-major string table. Rows before `header_index` are retained
/// pre-header noise (statement banners etc.); the row at `header_index`
/// holds the column titles; rows after it are data.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub header_index: usize,
}

impl Table {
    /// Build a table from raw parsed rows, detecting the header per `mode`.
    /// Returns `None` only for empty input.
    pub fn from_rows(rows: Vec<Vec<String>>, mode: &HeaderMode) -> Option<Table> {
        let header_row = header::detect_header_row(&rows, mode)?;
        let header_index = header::locate_header_row_index(&rows, &header_row, 2);
        let columns = header_row
            .iter()
            .enumerate()
            .map(|(i, title)| Column::source(i, title))
            .collect();
        Some(Table {
            columns,
            rows,
            header_index,
        })
    }

    pub fn column_index(&self, title: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.title == title.trim())
    }

    pub fn column_by_kind(&self, kind: ColumnKind) -> Option<usize> {
        self.columns.iter().position(|c| c.kind == kind)
    }

    /// Cell text, or `""` when the row is shorter than the column index.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn data_row_indices(&self) -> std::ops::Range<usize> {
        (self.header_index + 1)..self.rows.len()
    }

    pub fn visible_column_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    fn pad_row(row: &mut Vec<String>, width: usize) {
        while row.len() < width {
            row.push(OUT_OF_RANGE.to_string());
        }
    }

    /// Insert a column at `position`, one cell per row. `cells` must hold
    /// one entry per row; short rows are padded first so every row gains a
    /// cell at `position`.
    pub fn insert_column(&mut self, position: usize, column: Column, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            Self::pad_row(row, position);
            row.insert(position, cell);
        }
        self.columns.insert(position, column);
    }

    /// Append a column at the rightmost position.
    pub fn append_column(&mut self, column: Column, cells: Vec<String>) {
        let position = self.columns.len();
        self.insert_column(position, column, cells);
    }

    /// Split an embedded currency code out of the amount column into a new
    /// "From Currency" column inserted immediately after it. Amount cells
    /// lose the extracted token. Returns the new column's title, or `None`
    /// when the amount column cannot be found.
    pub fn split_currency_column(&mut self, amount_title: &str) -> Option<String> {
        let Some(amount_index) = self.column_index(amount_title) else {
            warn!("split_currency_column: no column titled {amount_title:?}");
            return None;
        };
        let header_index = self.header_index;
        let mut cells = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i < header_index {
                cells.push(String::new());
            } else if i == header_index {
                cells.push(FROM_CURRENCY_TITLE.to_string());
            } else {
                match row
                    .get(amount_index)
                    .and_then(|cell| currencies::extract_code(cell))
                {
                    Some((code, rest)) => {
                        row[amount_index] = rest;
                        cells.push(code);
                    }
                    None => cells.push(String::new()),
                }
            }
        }
        let column = Column {
            kind: ColumnKind::CurrencyCode,
            title: FROM_CURRENCY_TITLE.to_string(),
            hidden: false,
        };
        self.insert_column(amount_index + 1, column, cells);
        Some(FROM_CURRENCY_TITLE.to_string())
    }

    fn is_protected(&self, column: &Column, protected_titles: &[String]) -> bool {
        column.kind.is_synthetic() || protected_titles.iter().any(|t| *t == column.title)
    }

    /// Hide non-protected columns whose every data-row cell is blank.
    pub fn hide_empty_columns(&mut self, protected_titles: &[String]) {
        for index in 0..self.columns.len() {
            if self.is_protected(&self.columns[index], protected_titles) {
                continue;
            }
            let all_blank = self
                .data_row_indices()
                .all(|r| self.cell(r, index).trim().is_empty());
            if all_blank {
                self.columns[index].hidden = true;
            }
        }
    }

    /// Hide every non-protected column.
    pub fn hide_irrelevant_columns(&mut self, protected_titles: &[String]) {
        for index in 0..self.columns.len() {
            if !self.is_protected(&self.columns[index], protected_titles) {
                self.columns[index].hidden = true;
            }
        }
    }
}
