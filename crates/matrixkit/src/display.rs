//! Console rendering for [`Matrix`].
//!
//! The output is meant for people; its exact layout is not stable.

use crate::math::Matrix;

/// Controls how [`render`] lays out a matrix.
///
/// `max_rows` keeps the first rows and elides the rest. `max_cols` keeps that
/// many leading and trailing columns when the row is more than twice as wide.
#[derive(Clone, Debug, Default)]
pub struct DisplayOptions {
    pub precision: Option<usize>,
    pub max_rows: Option<usize>,
    pub max_cols: Option<usize>,
}

impl DisplayOptions {
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
            ..Self::default()
        }
    }
}

fn format_cell(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => value.to_string(),
    }
}

pub fn render(matrix: &Matrix, options: &DisplayOptions) -> String {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return "[]".to_string();
    }

    let rows_to_print = options.max_rows.unwrap_or(rows).min(rows);
    let cols_to_print = options.max_cols.unwrap_or(cols).min(cols);

    let mut out = String::from("[");
    for r in 0..rows_to_print {
        if r > 0 {
            out.push_str(",\n ");
        }
        let row = matrix.row_slice(r);
        let cells: Vec<String> = if cols_to_print * 2 < cols {
            row[..cols_to_print]
                .iter()
                .map(|&v| format_cell(v, options.precision))
                .chain(std::iter::once("...".to_string()))
                .chain(
                    row[cols - cols_to_print..]
                        .iter()
                        .map(|&v| format_cell(v, options.precision)),
                )
                .collect()
        } else {
            row.iter()
                .map(|&v| format_cell(v, options.precision))
                .collect()
        };
        out.push('[');
        out.push_str(&cells.join(", "));
        out.push(']');
    }
    if rows_to_print < rows {
        if rows_to_print > 0 {
            out.push_str(",\n ");
        }
        out.push_str("...");
    }
    out.push(']');
    out
}
