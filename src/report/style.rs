//! Per-cell color decisions.
//!
//! `resolve_styles` is a pure function of the value matrix, the render
//! policy and the execution context. It returns a style matrix with the
//! same shape as the value matrix; the table writer applies it afterwards.

use super::types::{CellStyle, Color, ColorPolicy, Header, ReportMatrix, RenderPolicy, StyleMatrix, palette};
use crate::context::ExecutionContext;
use crate::types::{OutcomeGroup, OutcomeKind};

/// Status of a body row, derived from its failure and skip counts.
fn row_status(matrix: &ReportMatrix, row: usize) -> OutcomeGroup {
    let sum = |kinds: &[OutcomeKind]| -> u64 { kinds.iter().filter_map(|k| matrix.count_in_row(row, *k)).sum() };

    let failures = sum(&[OutcomeKind::Failed, OutcomeKind::Error]);
    let skips = sum(&[OutcomeKind::Skipped, OutcomeKind::XFailed, OutcomeKind::XPassed]);

    if failures > 0 {
        OutcomeGroup::Failure
    } else if skips > 0 {
        OutcomeGroup::Skip
    } else {
        OutcomeGroup::Success
    }
}

/// Background for a body row: zebra stripes, TOTAL row always last and fixed.
fn row_background(row: usize, total_row: Option<usize>) -> Color {
    if Some(row) == total_row {
        palette::TOTAL_ROW
    } else if row % 2 == 0 {
        palette::EVEN_ROW
    } else {
        palette::ODD_ROW
    }
}

fn header_style(matrix: &ReportMatrix, col: usize, policy: &RenderPolicy) -> CellStyle {
    if matrix.rows.iter().all(|row| row.get(col).is_some_and(|cell| cell.is_zero())) {
        return CellStyle { fg: Some(palette::GRAYOUT), bg: None };
    }

    match matrix.headers[col] {
        Header::Outcome(kind) => CellStyle { fg: Some(policy.group_color(kind.group())), bg: None },
        _ => CellStyle::default(),
    }
}

/// Compute the style of every header cell, body cell and row separator.
///
/// `color_policy` is passed separately from `policy` because the terminal
/// and the file destination may render the same policy differently.
pub fn resolve_styles(
    matrix: &ReportMatrix,
    policy: &RenderPolicy,
    color_policy: ColorPolicy,
    ctx: &ExecutionContext,
) -> StyleMatrix {
    let mut styles = StyleMatrix::plain(matrix);
    if color_policy == ColorPolicy::Never {
        return styles;
    }

    let total_row = matrix.total_row();
    let zebra = color_policy == ColorPolicy::Auto;

    if !ctx.is_travis() {
        for col in 0..matrix.headers.len() {
            styles.headers[col] = header_style(matrix, col, policy);
        }

        for (r, row) in matrix.rows.iter().enumerate() {
            let status = row_status(matrix, r);
            for (c, cell) in row.iter().enumerate() {
                let group = match matrix.headers[c] {
                    Header::Outcome(kind) => kind.group(),
                    _ => status,
                };
                let fg = if cell.is_zero() { palette::GRAYOUT } else { policy.group_color(group) };
                let bg = if Some(r) == total_row {
                    Some(palette::TOTAL_ROW)
                } else {
                    zebra.then(|| row_background(r, total_row))
                };
                styles.cells[r][c] = CellStyle { fg: Some(fg), bg };
            }
        }
    }

    if zebra && !ctx.is_ci {
        for r in 0..matrix.rows.len() {
            styles.separators[r] = CellStyle { fg: None, bg: Some(row_background(r, total_row)) };
        }
    }

    styles
}

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;
