use log::{debug, warn};

use crate::rates::{RateLookup, RateStore};
use crate::table::{
    Column, ColumnKind, Table, FROM_CURRENCY_TITLE, OUT_OF_RANGE, UNABLE_TO_CONVERT,
    USD_COLUMN_TITLE,
};

/// Strip currency symbols, thousands separators, and other noise from an
/// amount cell, keeping digits, period, and minus.
pub fn clean_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Per-cell conversion result. Carried as a tagged value through the
/// synthesis loop and rendered to the wire sentinels only when written
/// into the table, so the failure causes stay distinguishable internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellOutcome {
    Converted(f64),
    ParseFailure,
    RateNotFound,
}

impl CellOutcome {
    fn render(self) -> String {
        match self {
            CellOutcome::Converted(value) => value.to_string(),
            CellOutcome::ParseFailure => UNABLE_TO_CONVERT.to_string(),
            // Externally indistinguishable from a genuine zero quote.
            CellOutcome::RateNotFound => "0".to_string(),
        }
    }
}

/// USD-pivoted conversion over a rate store quoting every currency as
/// units per 1 USD. Both legs are plain multiplications against the
/// pivot table; there is no inverse step.
pub struct CurrencyConverter<'a> {
    store: &'a RateStore,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(store: &'a RateStore) -> Self {
        CurrencyConverter { store }
    }

    fn convert(&self, code: &str, amount: &str, on_date: &str) -> CellOutcome {
        let Ok(amount) = clean_amount(amount).parse::<f64>() else {
            return CellOutcome::ParseFailure;
        };
        match self.store.lookup(code, on_date) {
            RateLookup::Found(rate) => CellOutcome::Converted(amount * rate),
            RateLookup::NotFound => CellOutcome::RateNotFound,
        }
    }

    pub fn usd_outcome(&self, code: &str, amount: &str, on_date: &str) -> CellOutcome {
        self.convert(code, amount, on_date)
    }

    pub fn target_outcome(&self, usd_amount: &str, code: &str, on_date: &str) -> CellOutcome {
        self.convert(code, usd_amount, on_date)
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// One user conversion action. Not persisted; consumed once.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub date_column: String,
    pub amount_column: String,
    pub currency_column: Option<String>,
    /// Amount cells carry their own currency code ("12.34 EUR").
    pub amounts_currencies_combined: bool,
    pub target_currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Idle,
    SplittingCurrencyColumn,
    SynthesizingUsd,
    SynthesizingTarget,
    ApplyingFormatting,
}

/// What a run actually did. Skipped stages leave their flag false; a
/// structural failure aborts the remaining synthesis stages but never
/// rolls back columns already added.
#[derive(Debug, Default, PartialEq)]
pub struct ConversionOutcome {
    pub split_currency: bool,
    pub synthesized_usd: bool,
    pub synthesized_target: Option<String>,
}

/// Sequences currency-code splitting, USD-column synthesis,
/// target-column synthesis, and post-processing over a single table.
/// Single-writer: one in-flight run per table, rows processed in strict
/// ascending order.
pub struct ConversionOrchestrator<'a> {
    converter: CurrencyConverter<'a>,
    /// Disambiguates repeated target columns added within one session.
    target_counter: u32,
    /// Post-processing policy: hide everything but the conversion columns,
    /// or only columns with no data at all.
    pub hide_other_columns: bool,
}

impl<'a> ConversionOrchestrator<'a> {
    pub fn new(store: &'a RateStore) -> Self {
        ConversionOrchestrator {
            converter: CurrencyConverter::new(store),
            target_counter: 0,
            hide_other_columns: false,
        }
    }

    fn enter(&self, stage: Stage) {
        debug!("conversion stage: {stage:?}");
    }

    fn column_visible(table: &Table, kind: ColumnKind) -> bool {
        table
            .column_by_kind(kind)
            .map(|i| !table.columns[i].hidden)
            .unwrap_or(false)
    }

    pub fn run(&mut self, table: &mut Table, request: &ConversionRequest) -> ConversionOutcome {
        let mut outcome = ConversionOutcome::default();

        // Resolve where currency codes come from; splitting may create the
        // column first.
        let mut currency_title = request.currency_column.clone();

        if request.amounts_currencies_combined {
            self.enter(Stage::SplittingCurrencyColumn);
            if Self::column_visible(table, ColumnKind::CurrencyCode) {
                currency_title = Some(FROM_CURRENCY_TITLE.to_string());
            } else {
                match table.split_currency_column(&request.amount_column) {
                    Some(title) => {
                        outcome.split_currency = true;
                        currency_title = Some(title);
                    }
                    None => {
                        self.enter(Stage::Idle);
                        return outcome;
                    }
                }
            }
        }

        self.enter(Stage::SynthesizingUsd);
        if !Self::column_visible(table, ColumnKind::Usd) {
            if !self.synthesize_usd(table, request, currency_title.as_deref()) {
                self.enter(Stage::Idle);
                return outcome;
            }
            outcome.synthesized_usd = true;
        }

        let target = request.target_currency.trim().to_uppercase();
        if target != "USD" {
            self.enter(Stage::SynthesizingTarget);
            let title = format!("To {target}");
            let already_visible = table
                .column_index(&title)
                .map(|i| !table.columns[i].hidden)
                .unwrap_or(false);
            if !already_visible {
                if let Some(added) = self.synthesize_target(table, request, &target) {
                    outcome.synthesized_target = Some(added);
                }
            }
        }

        self.enter(Stage::ApplyingFormatting);
        self.apply_formatting(table, request, currency_title.as_deref());

        self.enter(Stage::Idle);
        outcome
    }

    fn synthesize_usd(
        &self,
        table: &mut Table,
        request: &ConversionRequest,
        currency_title: Option<&str>,
    ) -> bool {
        let Some(date_index) = table.column_index(&request.date_column) else {
            warn!("usd synthesis: no column titled {:?}", request.date_column);
            return false;
        };
        let Some(amount_index) = table.column_index(&request.amount_column) else {
            warn!("usd synthesis: no column titled {:?}", request.amount_column);
            return false;
        };
        let Some(currency_index) = currency_title.and_then(|t| table.column_index(t)) else {
            warn!("usd synthesis: no currency column");
            return false;
        };

        let mut cells = Vec::with_capacity(table.rows.len());
        for i in 0..table.rows.len() {
            if i < table.header_index {
                cells.push(OUT_OF_RANGE.to_string());
            } else if i == table.header_index {
                cells.push(USD_COLUMN_TITLE.to_string());
            } else {
                let date = table.cell(i, date_index);
                let amount = table.cell(i, amount_index);
                let code = table.cell(i, currency_index);
                cells.push(self.converter.usd_outcome(code, amount, date).render());
            }
        }
        table.append_column(
            Column {
                kind: ColumnKind::Usd,
                title: USD_COLUMN_TITLE.to_string(),
                hidden: false,
            },
            cells,
        );
        true
    }

    fn synthesize_target(
        &mut self,
        table: &mut Table,
        request: &ConversionRequest,
        target: &str,
    ) -> Option<String> {
        let Some(date_index) = table.column_index(&request.date_column) else {
            warn!("target synthesis: no column titled {:?}", request.date_column);
            return None;
        };
        let Some(usd_index) = table.column_by_kind(ColumnKind::Usd) else {
            warn!("target synthesis: no USD column to source from");
            return None;
        };

        self.target_counter += 1;
        let base_title = format!("To {target}");
        let title = if table.column_index(&base_title).is_none() {
            base_title
        } else {
            format!("{base_title} ({})", self.target_counter)
        };

        let mut cells = Vec::with_capacity(table.rows.len());
        for i in 0..table.rows.len() {
            if i < table.header_index {
                cells.push(OUT_OF_RANGE.to_string());
            } else if i == table.header_index {
                cells.push(title.clone());
            } else {
                let date = table.cell(i, date_index);
                let usd_amount = table.cell(i, usd_index);
                cells.push(
                    self.converter
                        .target_outcome(usd_amount, target, date)
                        .render(),
                );
            }
        }
        table.append_column(
            Column {
                kind: ColumnKind::Target(self.target_counter),
                title: title.clone(),
                hidden: false,
            },
            cells,
        );
        Some(title)
    }

    /// Round synthesized values to two decimals and apply column hiding.
    fn apply_formatting(
        &self,
        table: &mut Table,
        request: &ConversionRequest,
        currency_title: Option<&str>,
    ) {
        let synthetic: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.kind, ColumnKind::Usd | ColumnKind::Target(_)))
            .map(|(i, _)| i)
            .collect();
        for row in table.data_row_indices() {
            for &col in &synthetic {
                if let Ok(value) = table.cell(row, col).parse::<f64>() {
                    table.rows[row][col] = format!("{value:.2}");
                }
            }
        }

        let mut protected = vec![
            request.date_column.clone(),
            request.amount_column.clone(),
        ];
        if let Some(title) = currency_title {
            protected.push(title.to_string());
        }
        if self.hide_other_columns {
            table.hide_irrelevant_columns(&protected);
        } else {
            table.hide_empty_columns(&protected);
        }
    }
}
