use std::collections::HashSet;

/// How to pick the header row out of raw parsed rows.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderMode {
    /// Most frequent entry count wins; first row with that count is the header.
    NumberOfEntries { count_empty_cells: bool },
    /// First row achieving the maximum entry count.
    LargestNumberOfEntries,
    /// Row 0 verbatim.
    FirstRow,
    /// A caller-supplied row, used when the user designates one manually.
    Custom(Vec<String>),
}

impl Default for HeaderMode {
    fn default() -> Self {
        HeaderMode::NumberOfEntries {
            count_empty_cells: false,
        }
    }
}

fn entry_count(row: &[String], count_empty_cells: bool) -> usize {
    if count_empty_cells {
        row.len()
    } else {
        row.iter().filter(|c| !c.trim().is_empty()).count()
    }
}

/// Detect the header row. Returns `None` only for empty input.
pub fn detect_header_row(rows: &[Vec<String>], mode: &HeaderMode) -> Option<Vec<String>> {
    if let HeaderMode::Custom(row) = mode {
        return Some(row.clone());
    }
    if rows.is_empty() {
        return None;
    }
    match mode {
        HeaderMode::FirstRow => Some(rows[0].clone()),
        HeaderMode::LargestNumberOfEntries => {
            let mut best: Option<(&Vec<String>, usize)> = None;
            for row in rows {
                let count = entry_count(row, true);
                // Strictly greater: an equal later count never replaces the first.
                if best.map_or(true, |(_, c)| count > c) {
                    best = Some((row, count));
                }
            }
            best.map(|(row, _)| row.clone())
        }
        HeaderMode::NumberOfEntries { count_empty_cells } => {
            // Frequency histogram keyed by entry count, insertion-ordered so
            // ties break on the first-encountered count value.
            let mut histogram: Vec<(usize, usize)> = Vec::new();
            for row in rows {
                let count = entry_count(row, *count_empty_cells);
                match histogram.iter_mut().find(|(c, _)| *c == count) {
                    Some((_, freq)) => *freq += 1,
                    None => histogram.push((count, 1)),
                }
            }
            let mut best: Option<(usize, usize)> = None;
            for (count, freq) in histogram {
                // Strictly greater keeps the first-encountered count on ties.
                if best.map_or(true, |(_, f)| freq > f) {
                    best = Some((count, freq));
                }
            }
            let (mode_count, _) = best?;
            rows.iter()
                .find(|row| entry_count(row, *count_empty_cells) == mode_count)
                .cloned()
        }
        HeaderMode::Custom(_) => unreachable!(),
    }
}

/// Locate where the header row's cells occur inside the table: the first
/// row whose non-empty cells intersect the header's by at least
/// `minimum_matching_cells` values. Defaults to row 0 when nothing matches,
/// which also covers custom header rows not present in the data.
pub fn locate_header_row_index(
    rows: &[Vec<String>],
    header_row: &[String],
    minimum_matching_cells: usize,
) -> usize {
    let header_cells: HashSet<&str> = header_row
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    for (index, row) in rows.iter().enumerate() {
        let matching = row
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<HashSet<&str>>()
            .intersection(&header_cells)
            .count();
        if matching >= minimum_matching_cells {
            return index;
        }
    }
    0
}
