//! Report type definitions for the rendering model.
//!
//! This module defines the render policy, the plain value matrix the
//! assembler builds, and the parallel style matrix the style resolver
//! computes for it.

use crate::types::{OutcomeGroup, OutcomeKind};
use std::fmt;

/// How (and whether) the report is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorPolicy {
    /// Foreground colors plus zebra-striped row backgrounds
    Auto,
    /// Foreground colors only
    Text,
    /// No decoration at all
    Never,
}

/// How zero counts are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ZerosRender {
    /// Zero is written as `0`
    Number,
    /// Zero is written as an empty cell
    Empty,
}

/// Markdown dialect of the emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarkdownFlavor {
    #[value(name = "common_mark", alias = "commonmark")]
    CommonMark,
    /// GitHub flavored markdown; the only flavor that can carry color spans
    #[value(name = "github", alias = "gfm")]
    Github,
    #[value(name = "kramdown")]
    Kramdown,
    #[value(name = "jekyll")]
    Jekyll,
}

impl MarkdownFlavor {
    /// Whether colored cells can be written as inline math color spans
    pub fn supports_color_spans(&self) -> bool {
        matches!(self, MarkdownFlavor::Github)
    }

    /// Kramdown-based renderers need a blank line to close a table
    pub fn needs_trailing_blank_line(&self) -> bool {
        matches!(self, MarkdownFlavor::Kramdown | MarkdownFlavor::Jekyll)
    }
}

/// Named terminal colors: (name, term color, hex code used for color spans)
const NAMED_COLORS: [(&str, term::color::Color, &str); 16] = [
    ("black", term::color::BLACK, "#000000"),
    ("red", term::color::RED, "#cd0000"),
    ("green", term::color::GREEN, "#00cd00"),
    ("yellow", term::color::YELLOW, "#cdcd00"),
    ("blue", term::color::BLUE, "#0000ee"),
    ("magenta", term::color::MAGENTA, "#cd00cd"),
    ("cyan", term::color::CYAN, "#00cdcd"),
    ("white", term::color::WHITE, "#e5e5e5"),
    ("light_black", term::color::BRIGHT_BLACK, "#7f7f7f"),
    ("light_red", term::color::BRIGHT_RED, "#ff0000"),
    ("light_green", term::color::BRIGHT_GREEN, "#00ff00"),
    ("light_yellow", term::color::BRIGHT_YELLOW, "#ffff00"),
    ("light_blue", term::color::BRIGHT_BLUE, "#5c5cff"),
    ("light_magenta", term::color::BRIGHT_MAGENTA, "#ff00ff"),
    ("light_cyan", term::color::BRIGHT_CYAN, "#00ffff"),
    ("light_white", term::color::BRIGHT_WHITE, "#ffffff"),
];

/// A color: one of the 16 terminal colors or a 24-bit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Named(term::color::Color),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color name ("light_green") or a "#rrggbb" code.
    pub fn parse(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("invalid color code '{}': expected #rrggbb", s));
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
            return Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let name = s.to_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, c, _)| Color::Named(*c))
            .ok_or_else(|| format!("unknown color '{}'", s))
    }

    /// "#rrggbb" form, used inside markdown color spans
    pub fn hex(&self) -> String {
        match self {
            Color::Named(c) => NAMED_COLORS
                .iter()
                .find(|(_, code, _)| code == c)
                .map(|(_, _, hex)| hex.to_string())
                .unwrap_or_else(|| "#ffffff".to_string()),
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }

    /// SGR parameters selecting this color as foreground
    pub fn ansi_fg(&self) -> String {
        match self {
            Color::Named(c) if *c < 8 => format!("{}", 30 + c),
            Color::Named(c) => format!("{}", 90 + (c - 8)),
            Color::Rgb(r, g, b) => format!("38;2;{};{};{}", r, g, b),
        }
    }

    /// SGR parameters selecting this color as background
    pub fn ansi_bg(&self) -> String {
        match self {
            Color::Named(c) if *c < 8 => format!("{}", 40 + c),
            Color::Named(c) => format!("{}", 100 + (c - 8)),
            Color::Rgb(r, g, b) => format!("48;2;{};{};{}", r, g, b),
        }
    }
}

/// Fixed colors that are not user configurable.
pub mod palette {
    use super::Color;

    /// Muted foreground for zero cells and all-zero headers
    pub const GRAYOUT: Color = Color::Named(term::color::BRIGHT_BLACK);
    pub const EVEN_ROW: Color = Color::Rgb(0x20, 0x20, 0x20);
    pub const ODD_ROW: Color = Color::Named(term::color::BLACK);
    pub const TOTAL_ROW: Color = Color::Rgb(0x00, 0x00, 0x00);
}

/// Immutable settings for one report build.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPolicy {
    /// 0 groups rows by file, >= 1 by file and test function
    pub verbosity: i64,
    pub excluded: Vec<OutcomeKind>,
    pub color_policy: ColorPolicy,
    /// Spaces on each side of every cell
    pub margin: usize,
    pub zeros: ZerosRender,
    pub flavor: MarkdownFlavor,
    pub success_color: Color,
    pub error_color: Color,
    pub skip_color: Color,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        RenderPolicy {
            verbosity: 0,
            excluded: Vec::new(),
            color_policy: ColorPolicy::Auto,
            margin: 1,
            zeros: ZerosRender::Number,
            flavor: MarkdownFlavor::CommonMark,
            success_color: Color::Named(term::color::BRIGHT_GREEN),
            error_color: Color::Named(term::color::BRIGHT_RED),
            skip_color: Color::Named(term::color::BRIGHT_YELLOW),
        }
    }
}

impl RenderPolicy {
    /// Foreground color for an outcome group
    pub fn group_color(&self, group: OutcomeGroup) -> Color {
        match group {
            OutcomeGroup::Success => self.success_color,
            OutcomeGroup::Failure => self.error_color,
            OutcomeGroup::Skip => self.skip_color,
        }
    }
}

/// A report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    FilePath,
    Function,
    Outcome(OutcomeKind),
    Subtotal,
}

impl Header {
    /// Columns holding counts (right-aligned, subject to the zero transform)
    pub fn is_count(&self) -> bool {
        matches!(self, Header::Outcome(_) | Header::Subtotal)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::FilePath => f.write_str("filepath"),
            Header::Function => f.write_str("function"),
            Header::Outcome(kind) => f.write_str(kind.name()),
            Header::Subtotal => f.write_str("SUBTOTAL"),
        }
    }
}

/// A raw cell value, before zero rendering and decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(u64),
}

impl Cell {
    pub fn count(&self) -> Option<u64> {
        match self {
            Cell::Count(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.count() == Some(0)
    }
}

/// Plain value matrix: headers plus body rows, TOTAL row last.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMatrix {
    pub headers: Vec<Header>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportMatrix {
    /// Count in a row for an outcome column, if that column is shown
    pub fn count_in_row(&self, row: usize, kind: OutcomeKind) -> Option<u64> {
        let col = self.headers.iter().position(|h| *h == Header::Outcome(kind))?;
        self.rows.get(row)?.get(col)?.count()
    }

    /// Index of the synthetic TOTAL row
    pub fn total_row(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }
}

/// Foreground/background decision for one cell or separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl CellStyle {
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }
}

/// Style decisions parallel to a ReportMatrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMatrix {
    pub headers: Vec<CellStyle>,
    pub cells: Vec<Vec<CellStyle>>,
    /// Style of the `|` separators, one per body row
    pub separators: Vec<CellStyle>,
}

impl StyleMatrix {
    /// A matrix with no decoration at all
    pub fn plain(matrix: &ReportMatrix) -> Self {
        StyleMatrix {
            headers: vec![CellStyle::default(); matrix.headers.len()],
            cells: matrix.rows.iter().map(|row| vec![CellStyle::default(); row.len()]).collect(),
            separators: vec![CellStyle::default(); matrix.rows.len()],
        }
    }
}
