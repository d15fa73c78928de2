//! Report generation module - Data transformations and business logic.
//!
//! This module handles:
//! - Aggregating outcome records into per-file / per-function count rows
//! - Assembling the value matrix with the TOTAL row and SUBTOTAL column
//! - Resolving a parallel style matrix (colors, zebra rows, grayout)
//! - Rendering zeros and serializing to markdown
//! - Writing the report to the terminal and/or a file
//!
//! Markdown layout is handled by the console_format module.
//!
//! # Module Organization
//!
//! - `types` - Render policy, colors, value and style matrices
//! - `stats` - Outcome aggregation
//! - `table` - Report assembly and rendering
//! - `style` - Color/style resolution
//! - `zeros` - Zero-value rendering
//! - `export` - Terminal and file destinations

mod export;
mod stats;
mod style;
mod table;
mod types;
mod zeros;

// Re-export types
pub use types::{CellStyle, Color, ColorPolicy, MarkdownFlavor, RenderPolicy, StyleMatrix, ZerosRender};

// Re-export rendering and export functions
pub use export::emit_reports;
pub use zeros::effective_zeros;
