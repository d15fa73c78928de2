/// Report option identities
///
/// Every report option has one canonical kebab-case name and three derived
/// spellings, one per configuration source:
/// - CLI flag: `--md-report-margin`
/// - environment variable: `MD_REPORT_MARGIN`
/// - config file key: `md_report_margin`
///
/// The derived spellings are computed once into a static table.
use lazy_static::lazy_static;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportOption {
    MdReport,
    Verbose,
    Output,
    Tee,
    Color,
    Margin,
    Zeros,
    SuccessColor,
    SkipColor,
    ErrorColor,
    Flavor,
    ExcludeOutcomes,
}

/// Derived spellings of one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionNames {
    pub cmdoption: String,
    pub envvar: String,
    pub inioption: String,
    pub help: String,
}

impl OptionNames {
    fn derive(option: ReportOption) -> Self {
        let name = option.name();
        let envvar = name.replace('-', "_").to_uppercase();
        OptionNames {
            cmdoption: format!("--{}", name),
            help: format!("{} (env: {})", option.description(), envvar),
            inioption: name.replace('-', "_"),
            envvar,
        }
    }
}

lazy_static! {
    static ref OPTION_NAMES: Vec<OptionNames> = ReportOption::ALL.into_iter().map(OptionNames::derive).collect();
}

impl ReportOption {
    /// Table order; matches the enum discriminants
    pub const ALL: [ReportOption; 12] = [
        ReportOption::MdReport,
        ReportOption::Verbose,
        ReportOption::Output,
        ReportOption::Tee,
        ReportOption::Color,
        ReportOption::Margin,
        ReportOption::Zeros,
        ReportOption::SuccessColor,
        ReportOption::SkipColor,
        ReportOption::ErrorColor,
        ReportOption::Flavor,
        ReportOption::ExcludeOutcomes,
    ];

    /// Canonical kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            ReportOption::MdReport => "md-report",
            ReportOption::Verbose => "md-report-verbose",
            ReportOption::Output => "md-report-output",
            ReportOption::Tee => "md-report-tee",
            ReportOption::Color => "md-report-color",
            ReportOption::Margin => "md-report-margin",
            ReportOption::Zeros => "md-report-zeros",
            ReportOption::SuccessColor => "md-report-success-color",
            ReportOption::SkipColor => "md-report-skip-color",
            ReportOption::ErrorColor => "md-report-error-color",
            ReportOption::Flavor => "md-report-flavor",
            ReportOption::ExcludeOutcomes => "md-report-exclude-outcomes",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ReportOption::MdReport => "create a markdown report of test outcomes",
            ReportOption::Verbose => "verbosity level of the report: 0 groups by file, 1 or more by test function",
            ReportOption::Output => "path to a file the report is written to; the terminal gets no report unless teeing",
            ReportOption::Tee => "write the report to the terminal as well as to the output file",
            ReportOption::Color => "how to color the report: auto, text or never; auto leaves files uncolored unless the flavor is github",
            ReportOption::Margin => "number of padding spaces on each side of a cell",
            ReportOption::Zeros => "how to render zero counts: number or empty; always number on CI",
            ReportOption::SuccessColor => "text color of passed results (color name or #rrggbb)",
            ReportOption::SkipColor => "text color of skipped, xfailed and xpassed results (color name or #rrggbb)",
            ReportOption::ErrorColor => "text color of failed and error results (color name or #rrggbb)",
            ReportOption::Flavor => "markdown flavor of the report: common_mark, github, kramdown or jekyll",
            ReportOption::ExcludeOutcomes => "outcomes to leave out of the report, e.g. passed,skipped",
        }
    }

    fn names(&self) -> &'static OptionNames {
        &OPTION_NAMES[*self as usize]
    }

    pub fn cmdoption_str(&self) -> &'static str {
        &self.names().cmdoption
    }

    pub fn envvar_str(&self) -> &'static str {
        &self.names().envvar
    }

    pub fn inioption_str(&self) -> &'static str {
        &self.names().inioption
    }

    pub fn help_msg(&self) -> &'static str {
        &self.names().help
    }

    /// Look up an option by its long flag name (without the leading dashes)
    pub fn from_long(long: &str) -> Option<ReportOption> {
        ReportOption::ALL.into_iter().find(|option| option.cmdoption_str().trim_start_matches("--") == long)
    }
}
