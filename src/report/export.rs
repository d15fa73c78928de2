//! Report export to the terminal and to a file.
//!
//! The two destinations resolve their color policy independently:
//! - terminal: the configured policy, ANSI escapes for `Auto`/`Text`
//! - file: `Auto` degrades to `Never` unless the flavor is GitHub,
//!   ANSI escapes only for `Text`
//!
//! When both destinations end up with the same policy and escape setting,
//! the terminal report is reused for the file.

use super::table::make_md_report;
use super::types::{ColorPolicy, MarkdownFlavor};
use crate::config::ReportConfig;
use crate::context::ExecutionContext;
use crate::types::Session;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub terminal: bool,
    pub file: Option<PathBuf>,
}

impl Destinations {
    /// Terminal when teeing or when there is no output path; file when the path is non-empty
    pub fn resolve(output: Option<&Path>, tee: bool) -> Self {
        let file = output.filter(|p| !p.as_os_str().is_empty()).map(Path::to_path_buf);
        Destinations { terminal: tee || file.is_none(), file }
    }
}

/// What `emit_reports` actually did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub terminal_written: bool,
    pub file_written: Option<PathBuf>,
    /// The file got the terminal report without a second render
    pub reused: bool,
}

/// Color policy for the file destination
pub fn file_color_policy(policy: ColorPolicy, flavor: MarkdownFlavor) -> ColorPolicy {
    if policy == ColorPolicy::Auto && flavor != MarkdownFlavor::Github { ColorPolicy::Never } else { policy }
}

pub fn apply_ansi_to_term(policy: ColorPolicy) -> bool {
    matches!(policy, ColorPolicy::Auto | ColorPolicy::Text)
}

pub fn apply_ansi_to_file(policy: ColorPolicy) -> bool {
    policy == ColorPolicy::Text
}

/// Render and write the report to every configured destination.
///
/// The terminal report goes to `term`. The file is truncated and written
/// once, and only when its report is non-empty. Write failures propagate.
pub fn emit_reports<W: Write>(
    session: &Session,
    config: &ReportConfig,
    ctx: &ExecutionContext,
    term: &mut W,
) -> io::Result<EmitSummary> {
    let policy = &config.policy;
    let destinations = Destinations::resolve(config.output.as_deref(), config.tee);
    debug!("Report destinations: {:?}", destinations);

    let term_policy = policy.color_policy;
    let term_ansi = apply_ansi_to_term(term_policy);
    let mut summary = EmitSummary::default();

    let mut term_report = String::new();
    if destinations.terminal {
        term_report = make_md_report(session, policy, ctx, term_policy, term_ansi)?;
        if !term_report.is_empty() {
            term.write_all(term_report.as_bytes())?;
            term.flush()?;
            summary.terminal_written = true;
        }
    }

    let Some(path) = destinations.file else {
        return Ok(summary);
    };

    let file_policy = file_color_policy(term_policy, policy.flavor);
    let file_ansi = apply_ansi_to_file(term_policy);

    let file_report = if !term_report.is_empty() && file_policy == term_policy && file_ansi == term_ansi {
        debug!("Reusing terminal report for {}", path.display());
        summary.reused = true;
        term_report
    } else {
        debug!("Rendering file report with {:?} (ansi: {})", file_policy, file_ansi);
        make_md_report(session, policy, ctx, file_policy, file_ansi)?
    };

    if file_report.is_empty() {
        debug!("Empty report, not writing {}", path.display());
        return Ok(summary);
    }

    let mut file = File::create(&path)?;
    file.write_all(file_report.as_bytes())?;
    summary.file_written = Some(path);

    Ok(summary)
}
