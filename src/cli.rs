use crate::options::ReportOption;
use crate::report::{ColorPolicy, MarkdownFlavor, ZerosRender};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "md-report.toml";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "md-report")]
#[command(about = "Summarize test outcomes as a markdown table")]
#[command(version)]
pub struct CliArgs {
    /// Session dump to read (JSON array or JSON Lines); stdin when omitted
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// TOML config file with md_report_* keys (default: ./md-report.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long = "md-report")]
    pub md_report: bool,

    /// Negative levels count as unset
    #[arg(long, value_name = "VERBOSITY_LEVEL", allow_negative_numbers = true)]
    pub md_report_verbose: Option<i64>,

    #[arg(long, value_name = "FILEPATH")]
    pub md_report_output: Option<PathBuf>,

    #[arg(long)]
    pub md_report_tee: bool,

    #[arg(long, value_enum)]
    pub md_report_color: Option<ColorPolicy>,

    #[arg(long, value_name = "MARGIN")]
    pub md_report_margin: Option<usize>,

    #[arg(long, value_enum)]
    pub md_report_zeros: Option<ZerosRender>,

    #[arg(long, value_name = "COLOR")]
    pub md_report_success_color: Option<String>,

    #[arg(long, value_name = "COLOR")]
    pub md_report_skip_color: Option<String>,

    #[arg(long, value_name = "COLOR")]
    pub md_report_error_color: Option<String>,

    #[arg(long, value_enum)]
    pub md_report_flavor: Option<MarkdownFlavor>,

    /// Accepts several values and comma-separated lists: passed,skipped
    #[arg(long, value_name = "OUTCOME", num_args = 1.., value_delimiter = ',')]
    pub md_report_exclude_outcomes: Vec<String>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let matches = Self::command_with_option_help().get_matches();
        CliArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// The clap command with report option help taken from the option table
    pub fn command_with_option_help() -> clap::Command {
        CliArgs::command().mut_args(|arg| {
            let option = arg.get_long().and_then(ReportOption::from_long);
            match option {
                Some(option) => arg.help(option.help_msg()),
                None => arg,
            }
        })
    }

    /// Flags only count when given; absence falls through to env and config
    pub fn md_report_flag(&self) -> Option<bool> {
        self.md_report.then_some(true)
    }

    pub fn tee_flag(&self) -> Option<bool> {
        self.md_report_tee.then_some(true)
    }

    /// Verbosity from the CLI, with negative levels treated as unset
    pub fn verbosity(&self) -> Option<i64> {
        self.md_report_verbose.filter(|level| *level >= 0)
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref input) = self.input
            && !input.exists()
        {
            return Err(format!("Input file not found: {}", input.display()));
        }
        Ok(())
    }

    /// Config file to load and whether it was requested explicitly
    pub fn config_path(&self) -> (PathBuf, bool) {
        match self.config {
            Some(ref path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }
}
