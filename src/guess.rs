use regex::Regex;

use crate::convert::clean_amount;
use crate::currencies;
use crate::dates;
use crate::table::Table;

/// Advisory column-role guesses. Consumed as conversion defaults, never
/// authoritative; any role may come back empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSuggestion {
    pub date_column: Option<String>,
    pub amount_column: Option<String>,
    pub currency_column: Option<String>,
}

/// Strict two-decimal amount heuristic: clean the cell the same way the
/// converter does, then require the `-?\d+\.\d{2}` shape. Deliberately
/// narrower than general numeric detection so integer id columns do not
/// win the amount role.
pub fn is_amount_like(cell: &str) -> bool {
    let cleaned = clean_amount(cell);
    Regex::new(r"^-?\d+\.\d{2}$")
        .map(|re| re.is_match(&cleaned))
        .unwrap_or(false)
}

pub fn is_date_like(cell: &str) -> bool {
    dates::parse_flexible(cell).is_some()
}

pub fn is_currency_like(cell: &str) -> bool {
    currencies::is_currency_code(cell)
}

/// First visible column containing a qualifying cell, scanning data rows
/// top-to-bottom and columns left-to-right within each row. The earliest
/// row with any qualifying cell decides the winning column.
fn first_matching_column(table: &Table, predicate: impl Fn(&str) -> bool) -> Option<String> {
    let visible = table.visible_column_indices();
    for row in table.data_row_indices() {
        for &col in &visible {
            if predicate(table.cell(row, col)) {
                return Some(table.columns[col].title.clone());
            }
        }
    }
    None
}

/// Guess which columns hold dates, amounts, and currency codes. Each
/// role's search runs independently; a miss on one role never blocks the
/// others.
pub fn suggest_roles(table: &Table) -> RoleSuggestion {
    RoleSuggestion {
        date_column: first_matching_column(table, is_date_like),
        amount_column: first_matching_column(table, is_amount_like),
        currency_column: first_matching_column(table, is_currency_like),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderMode;

    fn to_rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_amount_predicate() {
        assert!(is_amount_like("$1,234.56"));
        assert!(is_amount_like("10.00"));
        assert!(is_amount_like("-42.50"));
        assert!(!is_amount_like("1234"));
        assert!(!is_amount_like("12.3"));
        assert!(!is_amount_like("12.345"));
        assert!(!is_amount_like("1.234.56"));
        assert!(!is_amount_like(""));
    }

    #[test]
    fn test_currency_predicate() {
        assert!(is_currency_like("usd"));
        assert!(is_currency_like("USD"));
        assert!(!is_currency_like("US"));
        assert!(!is_currency_like("DOLLAR"));
    }

    #[test]
    fn test_date_predicate() {
        assert!(is_date_like("2020-01-01"));
        assert!(is_date_like("01/15/2020"));
        assert!(is_date_like("March 5, 2020"));
        assert!(!is_date_like("tomorrow"));
    }

    #[test]
    fn test_suggest_roles_finds_all_three() {
        let rows = to_rows(&[
            &["Date", "Payee", "Amount", "Currency"],
            &["2020-01-01", "ACME", "10.00", "USD"],
        ]);
        let table = Table::from_rows(rows, &HeaderMode::FirstRow).unwrap();
        let roles = suggest_roles(&table);
        assert_eq!(roles.date_column.as_deref(), Some("Date"));
        assert_eq!(roles.amount_column.as_deref(), Some("Amount"));
        assert_eq!(roles.currency_column.as_deref(), Some("Currency"));
    }

    #[test]
    fn test_suggest_roles_misses_are_independent() {
        let rows = to_rows(&[
            &["Date", "Payee"],
            &["2020-01-01", "ACME"],
        ]);
        let table = Table::from_rows(rows, &HeaderMode::FirstRow).unwrap();
        let roles = suggest_roles(&table);
        assert_eq!(roles.date_column.as_deref(), Some("Date"));
        assert_eq!(roles.amount_column, None);
        assert_eq!(roles.currency_column, None);
    }

    #[test]
    fn test_suggest_roles_skips_header_and_hidden_columns() {
        let rows = to_rows(&[
            &["2020-12-31", "Amount"], // header-looking cells must not match
            &["2020-01-01", "10.00"],
        ]);
        let mut table = Table::from_rows(rows, &HeaderMode::FirstRow).unwrap();
        table.columns[0].hidden = true;
        let roles = suggest_roles(&table);
        assert_eq!(roles.date_column, None);
        assert_eq!(roles.amount_column.as_deref(), Some("Amount"));
    }

    #[test]
    fn test_suggest_roles_earliest_row_wins() {
        // Row 1 has no date; row 2's first date-bearing column wins even
        // though an earlier column in row 3 would also qualify.
        let rows = to_rows(&[
            &["A", "B"],
            &["x", "2020-01-01"],
            &["2020-02-02", "y"],
        ]);
        let table = Table::from_rows(rows, &HeaderMode::FirstRow).unwrap();
        let roles = suggest_roles(&table);
        assert_eq!(roles.date_column.as_deref(), Some("B"));
    }
}
