//! Report assembly: value matrix and markdown output.
//!
//! This is the two-pass pipeline that produces one report string:
//! the plain value matrix is built first, the style matrix is computed
//! from it, and both go to the table writer together.

use super::stats::{Grouping, aggregate};
use super::style::resolve_styles;
use super::types::{Cell, ColorPolicy, Header, ReportMatrix, RenderPolicy, StyleMatrix};
use super::zeros::render_texts;
use crate::console_format::{self, Decoration};
use crate::context::ExecutionContext;
use crate::types::{OutcomeKind, Session};
use log::debug;
use std::io;

/// Label of the first cell of the synthetic last row
pub const TOTAL_LABEL: &str = "TOTAL";

/// Build the value matrix: one row per grouping key, then the TOTAL row.
///
/// The TOTAL row carries session-wide counts, and its SUBTOTAL is the sum
/// of every session total, excluded kinds included. With excluded kinds the
/// row subtotals therefore need not add up to the TOTAL subtotal.
pub fn build_matrix(session: &Session, kinds: &[OutcomeKind], verbosity: i64) -> ReportMatrix {
    let grouping = Grouping::from_verbosity(verbosity).unwrap_or(Grouping::File);

    let mut headers = vec![Header::FilePath];
    if grouping == Grouping::Function {
        headers.push(Header::Function);
    }
    headers.extend(kinds.iter().map(|k| Header::Outcome(*k)));
    headers.push(Header::Subtotal);

    let mut rows: Vec<Vec<Cell>> = aggregate(session.records(), kinds, verbosity)
        .into_iter()
        .map(|(key, counts)| {
            let mut row: Vec<Cell> = key.components().into_iter().map(|part| Cell::Text(part.to_string())).collect();
            row.extend(kinds.iter().map(|k| Cell::Count(counts.get(*k))));
            row.push(Cell::Count(counts.subtotal()));
            row
        })
        .collect();

    let mut total = vec![Cell::Text(TOTAL_LABEL.to_string())];
    if grouping == Grouping::Function {
        total.push(Cell::Text(String::new()));
    }
    total.extend(kinds.iter().map(|k| Cell::Count(session.total(*k))));
    total.push(Cell::Count(session.grand_total()));
    rows.push(total);

    ReportMatrix { headers, rows }
}

/// Pick the decoration for one destination.
fn decoration_for(policy: &RenderPolicy, color_policy: ColorPolicy, apply_ansi: bool) -> Decoration {
    if color_policy == ColorPolicy::Never {
        Decoration::None
    } else if apply_ansi {
        Decoration::Ansi
    } else if policy.flavor.supports_color_spans() {
        Decoration::ColorSpans
    } else {
        Decoration::None
    }
}

/// Render the markdown report for one destination.
///
/// `color_policy` overrides `policy.color_policy` so that the terminal and
/// the file can be rendered from the same policy. Returns an empty string
/// when no outcome kind would get a column.
pub fn make_md_report(
    session: &Session,
    policy: &RenderPolicy,
    ctx: &ExecutionContext,
    color_policy: ColorPolicy,
    apply_ansi: bool,
) -> io::Result<String> {
    let kinds = session.included_kinds(&policy.excluded);
    if kinds.is_empty() {
        debug!("No outcome kinds to report (all zero or excluded)");
        return Ok(String::new());
    }

    let matrix = build_matrix(session, &kinds, policy.verbosity);
    let styles = match color_policy {
        ColorPolicy::Never => StyleMatrix::plain(&matrix),
        _ => resolve_styles(&matrix, policy, color_policy, ctx),
    };
    let texts = render_texts(&matrix, policy.zeros);
    let decoration = decoration_for(policy, color_policy, apply_ansi);

    debug!(
        "Rendering {} rows x {} columns ({:?}, {:?})",
        matrix.rows.len(),
        matrix.headers.len(),
        color_policy,
        decoration
    );

    console_format::dumps(&texts, &styles, policy.margin, policy.flavor, decoration)
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
