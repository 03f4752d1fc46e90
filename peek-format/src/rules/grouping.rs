// Column grouping for long arrays
//
// Lays short entries out as an aligned grid, several per line. The constants below
// are tuned for visual output and must not change: golden output depends on them.

use super::markup::display_width;
use super::strings::{pad_end, pad_start};

/// One space plus one comma between two entries
const SEPARATOR_SPACE: usize = 2;

/// Assumed height/width ratio of a terminal character cell
const APPROX_CHAR_HEIGHTS: f64 = 2.5;

/// Upper bound on columns per row
const MAX_COLUMNS: usize = 15;

/// Entries at or below this width always qualify for grouping
const SHORT_ENTRY_WIDTH: usize = 6;

/// Inputs that decide whether and how to group
#[derive(Debug, Clone, Copy)]
pub struct GroupLayout {
    /// Indentation level the entries are printed at
    pub level: usize,
    pub line_break_length: usize,
    /// Every source element is a number or bigint; pads to the left
    pub numeric: bool,
    /// The last entry is the "... N more items" marker
    pub has_overflow: bool,
}

/// Group `entries` into aligned rows.
///
/// Returns `None` when grouping is rejected (a few very long entries, or fewer
/// than two columns would fit); the caller then falls back to the plain layout.
pub fn group_entries(entries: &[String], layout: GroupLayout) -> Option<Vec<String>> {
    let mut entries_len = entries.len();
    if layout.has_overflow {
        entries_len = entries_len.saturating_sub(1);
    }
    if entries_len == 0 {
        return None;
    }

    let data_len: Vec<usize> = entries[..entries_len]
        .iter()
        .map(|entry| display_width(entry))
        .collect();
    let total_length: usize = data_len.iter().map(|len| len + SEPARATOR_SPACE).sum();
    let max_length = data_len.iter().copied().max().unwrap_or(0);
    let actual_max = max_length + SEPARATOR_SPACE;

    // At least three entries must fit side by side, and a single entry may not
    // dwarf the rest (longer than 1/5 of everything else combined).
    let fits_three = actual_max * 3 + layout.level < layout.line_break_length;
    let balanced =
        total_length as f64 / actual_max as f64 > 5.0 || max_length <= SHORT_ENTRY_WIDTH;
    if !(fits_three && balanced) {
        log::debug!(
            "grouping rejected: {} entries, widest {}, total {}",
            entries_len,
            max_length,
            total_length
        );
        return None;
    }

    let average_bias =
        (actual_max as f64 - total_length as f64 / entries.len() as f64).max(0.0).sqrt();
    let biased_max = (actual_max as f64 - 3.0 - average_bias).max(1.0);
    // Aim for a square of `entries_len` cells, each `actual_max` wide and
    // APPROX_CHAR_HEIGHTS tall, expressed in columns.
    let square_columns =
        ((APPROX_CHAR_HEIGHTS * biased_max * entries_len as f64).sqrt() / biased_max).round();
    let width_columns = layout.line_break_length.saturating_sub(layout.level) / actual_max;
    let columns = (square_columns as usize).min(width_columns).min(MAX_COLUMNS);
    if columns <= 1 {
        return None;
    }

    let max_line_length: Vec<usize> = (0..columns)
        .map(|column| {
            let widest = data_len
                .iter()
                .skip(column)
                .step_by(columns)
                .copied()
                .max()
                .unwrap_or(0);
            widest + SEPARATOR_SPACE
        })
        .collect();

    let mut rows = Vec::with_capacity(entries_len / columns + 2);
    for row_start in (0..entries_len).step_by(columns) {
        // The last row may hold fewer entries than there are columns
        let row_end = (row_start + columns).min(entries_len);
        let mut row = String::new();
        for j in row_start..row_end {
            let column = j - row_start;
            // Markup characters take no width on screen
            let markup = entries[j].chars().count() - data_len[j];
            let width = max_line_length[column] + markup;
            if j + 1 < row_end {
                let cell = format!("{}, ", entries[j]);
                row.push_str(&if layout.numeric {
                    pad_start(&cell, width)
                } else {
                    pad_end(&cell, width)
                });
            } else if layout.numeric {
                row.push_str(&pad_start(&entries[j], width - SEPARATOR_SPACE));
            } else {
                row.push_str(&entries[j]);
            }
        }
        rows.push(row);
    }

    if layout.has_overflow {
        if let Some(marker) = entries.last() {
            rows.push(marker.clone());
        }
    }
    Some(rows)
}
