//! Zero-value rendering.
//!
//! Counts stay numbers in the value matrix; only the text handed to the
//! table writer changes. Running the transform twice gives the same text.

use super::types::{Cell, ReportMatrix, ZerosRender};
use crate::console_format::TableData;
use crate::context::ExecutionContext;

/// Zeros mode actually used: CI logs always get numbers.
pub fn effective_zeros(configured: ZerosRender, ctx: &ExecutionContext) -> ZerosRender {
    if ctx.is_ci { ZerosRender::Number } else { configured }
}

/// Text of a cell after the zero transform.
pub fn render_value(cell: &Cell, zeros: ZerosRender) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Count(0) if zeros == ZerosRender::Empty => String::new(),
        Cell::Count(n) => n.to_string(),
    }
}

/// Apply the zero transform to the whole matrix.
pub fn render_texts(matrix: &ReportMatrix, zeros: ZerosRender) -> TableData {
    TableData {
        headers: matrix.headers.iter().map(|h| h.to_string()).collect(),
        numeric: matrix.headers.iter().map(|h| h.is_count()).collect(),
        rows: matrix.rows.iter().map(|row| row.iter().map(|cell| render_value(cell, zeros)).collect()).collect(),
    }
}
