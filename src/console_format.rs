/// Console formatting module - Pure rendering concerns
///
/// This module turns a table of cell texts plus a style matrix into a
/// markdown table:
/// - Column widths and alignment
/// - Margins and markdown flavors
/// - ANSI escapes or markdown color spans
///
/// It knows nothing about outcomes; the report module decides what the
/// cells contain and how they are styled.
///
/// ## Output Flexibility
///
/// `TableWriter` writes to any `std::io::Write` destination; `dumps`
/// renders into a `String`.
use crate::report::{CellStyle, MarkdownFlavor, StyleMatrix};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// How styles are turned into output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Styles are ignored
    None,
    /// SGR escape sequences around cells and separators
    Ansi,
    /// `$\textcolor{#rrggbb}{\text{..}}$` around colored count cells
    ColorSpans,
}

/// Horizontal alignment of a column's body cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Cell texts ready for layout. `numeric[c]` marks count columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub numeric: Vec<bool>,
    pub rows: Vec<Vec<String>>,
}

/// Writer for markdown tables - configurable margin, flavor and decoration
pub struct TableWriter<W: Write> {
    writer: W,
    margin: usize,
    flavor: MarkdownFlavor,
    decoration: Decoration,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, margin: usize, flavor: MarkdownFlavor, decoration: Decoration) -> Self {
        Self { writer, margin, flavor, decoration }
    }

    /// Wrap text in an SGR sequence when ANSI decoration is on
    fn paint(&self, text: &str, style: &CellStyle) -> String {
        if self.decoration != Decoration::Ansi || style.is_plain() {
            return text.to_string();
        }
        let codes: Vec<String> = style.fg.map(|c| c.ansi_fg()).into_iter().chain(style.bg.map(|c| c.ansi_bg())).collect();
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text)
    }

    /// Final text of a body cell: escaped, possibly wrapped in a color span
    fn cell_text(&self, text: &str, numeric: bool, style: &CellStyle) -> String {
        if numeric {
            if self.decoration == Decoration::ColorSpans
                && !text.is_empty()
                && let Some(fg) = style.fg
            {
                return format!("$\\textcolor{{{}}}{{\\text{{{}}}}}$", fg.hex(), text);
            }
            text.to_string()
        } else {
            escape_pipes(text)
        }
    }

    /// Write a complete table
    pub fn write_table(&mut self, table: &TableData, styles: &StyleMatrix) -> io::Result<()> {
        let ncols = table.headers.len();
        let plain = CellStyle::default();

        let headers: Vec<String> = table.headers.iter().map(|h| escape_pipes(h)).collect();
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, text)| {
                        let style = styles.cells.get(r).and_then(|s| s.get(c)).unwrap_or(&plain);
                        self.cell_text(text, table.numeric[c], style)
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..ncols)
            .map(|c| rows.iter().map(|row| display_width(&row[c])).chain([display_width(&headers[c])]).max().unwrap_or(0))
            .collect();

        // Count columns are right-aligned unless every cell rendered empty
        let aligns: Vec<Align> = (0..ncols)
            .map(|c| {
                if table.numeric[c] && table.rows.iter().any(|row| !row[c].is_empty()) {
                    Align::Right
                } else {
                    Align::Left
                }
            })
            .collect();

        let margin = " ".repeat(self.margin);

        // Header row
        let segments: Vec<String> = (0..ncols)
            .map(|c| {
                let style = styles.headers.get(c).unwrap_or(&plain);
                let segment = format!("{}{}{}", margin, pad_center(&headers[c], widths[c]), margin);
                self.paint(&segment, style)
            })
            .collect();
        writeln!(self.writer, "|{}|", segments.join("|"))?;

        // Alignment row
        let rules: Vec<String> = (0..ncols)
            .map(|c| {
                let len = widths[c] + 2 * self.margin;
                match aligns[c] {
                    Align::Right => format!("{}:", "-".repeat(len.saturating_sub(1))),
                    Align::Left => "-".repeat(len),
                }
            })
            .collect();
        writeln!(self.writer, "|{}|", rules.join("|"))?;

        // Body rows
        for (r, row) in rows.iter().enumerate() {
            let separator = self.paint("|", styles.separators.get(r).unwrap_or(&plain));
            let segments: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, text)| {
                    let style = styles.cells.get(r).and_then(|s| s.get(c)).unwrap_or(&plain);
                    let padded = match aligns[c] {
                        Align::Left => pad_right(text, widths[c]),
                        Align::Right => pad_left(text, widths[c]),
                    };
                    self.paint(&format!("{}{}{}", margin, padded, margin), style)
                })
                .collect();
            writeln!(self.writer, "{}{}{}", separator, segments.join(separator.as_str()), separator)?;
        }

        if self.flavor.needs_trailing_blank_line() {
            writeln!(self.writer)?;
        }

        Ok(())
    }
}

/// Render a table into a string
pub fn dumps(
    table: &TableData,
    styles: &StyleMatrix,
    margin: usize,
    flavor: MarkdownFlavor,
    decoration: Decoration,
) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut writer = TableWriter::new(&mut buffer, margin, flavor, decoration);
    writer.write_table(table, styles)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Escape the markdown column delimiter
fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Pad on the right to the given display width
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(display_width(s))))
}

/// Pad on the left to the given display width
pub fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(display_width(s))), s)
}

/// Center within the given display width; odd padding goes to the right
pub fn pad_center(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(padding - left))
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
