/// Configuration resolution module
///
/// This module handles:
/// - Capturing the process environment once as an `EnvSnapshot`
/// - Loading the optional TOML config file
/// - Resolving every report option through CLI → env → config file → default
/// - Building the immutable `ReportConfig` the report is rendered from
///
/// Integer and boolean values are coerced leniently ("2", "yes", 1). A value
/// that cannot be coerced counts as unset and falls through to the next
/// source. Enumerated values (color policy, zeros, flavor, colors) that do
/// not parse are configuration errors.
use crate::cli::CliArgs;
use crate::context::ExecutionContext;
use crate::options::ReportOption;
use crate::report::{Color, ColorPolicy, MarkdownFlavor, RenderPolicy, ZerosRender, effective_zeros};
use crate::types::OutcomeKind;
use clap::ValueEnum;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Immutable copy of the environment variables taken at startup
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment (non-unicode variables are dropped)
    pub fn capture() -> Self {
        let vars = std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))).collect();
        EnvSnapshot { vars }
    }

    #[cfg(test)]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        EnvSnapshot { vars: pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Everything needed to emit the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub enabled: bool,
    pub output: Option<PathBuf>,
    pub tee: bool,
    pub policy: RenderPolicy,
}

/// A value as read from the environment or the config file, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl RawValue {
    fn from_toml(value: &toml::Value) -> RawValue {
        match value {
            toml::Value::String(s) => RawValue::Str(s.clone()),
            toml::Value::Integer(i) => RawValue::Int(*i),
            toml::Value::Boolean(b) => RawValue::Bool(*b),
            toml::Value::Array(items) => RawValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        toml::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            other => RawValue::Str(other.to_string()),
        }
    }

    /// String form; lists have none
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Str(s) => Some(s.clone()),
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::List(_) => None,
        }
    }
}

/// Lenient integer coercion: integers, numeric strings, floats truncated
pub fn to_int(value: &RawValue) -> Option<i64> {
    match value {
        RawValue::Int(i) => Some(*i),
        RawValue::Bool(b) => Some(i64::from(*b)),
        RawValue::Str(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        RawValue::List(_) => None,
    }
}

/// Lenient boolean coercion: true/false, yes/no, on/off, 1/0
pub fn to_bool(value: &RawValue) -> Option<bool> {
    match value {
        RawValue::Bool(b) => Some(*b),
        RawValue::Int(i) => Some(*i != 0),
        RawValue::Str(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        RawValue::List(_) => None,
    }
}

/// Option lookup across the environment and the config file
pub struct Resolver<'a> {
    env: &'a EnvSnapshot,
    file: Option<&'a toml::Table>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a EnvSnapshot, file: Option<&'a toml::Table>) -> Self {
        Resolver { env, file }
    }

    /// Environment value; empty strings count as unset
    fn env_value(&self, option: ReportOption) -> Option<RawValue> {
        self.env.get(option.envvar_str()).filter(|v| !v.is_empty()).map(|v| RawValue::Str(v.to_string()))
    }

    /// Config file value; empty strings and empty lists count as unset
    fn file_value(&self, option: ReportOption) -> Option<RawValue> {
        let value = RawValue::from_toml(self.file?.get(option.inioption_str())?);
        match value {
            RawValue::Str(ref s) if s.is_empty() => None,
            RawValue::List(ref items) if items.is_empty() => None,
            _ => Some(value),
        }
    }

    /// First source that yields a convertible value: CLI, env, config file
    pub fn resolve<T>(&self, option: ReportOption, cli: Option<T>, convert: impl Fn(&RawValue) -> Option<T>) -> Option<T> {
        cli.or_else(|| self.env_value(option).and_then(|v| convert(&v)))
            .or_else(|| self.file_value(option).and_then(|v| convert(&v)))
    }

    /// Like `resolve`, but values that do not parse are errors rather than unset
    pub fn resolve_parsed<T>(
        &self,
        option: ReportOption,
        cli: Option<T>,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<Option<T>, String> {
        if cli.is_some() {
            return Ok(cli);
        }
        if let Some(text) = self.env_value(option).and_then(|v| v.as_text()) {
            return parse(&text).map(Some).map_err(|e| format!("{}: {}", option.envvar_str(), e));
        }
        if let Some(text) = self.file_value(option).and_then(|v| v.as_text()) {
            return parse(&text).map(Some).map_err(|e| format!("{}: {}", option.inioption_str(), e));
        }
        Ok(None)
    }

    /// Raw list value: CLI list, comma-separated env string, or config list/string
    fn resolve_list(&self, option: ReportOption, cli: &[String]) -> Vec<String> {
        let split = |s: &str| s.split(',').map(str::to_string).collect::<Vec<_>>();
        if !cli.is_empty() {
            return cli.iter().flat_map(|s| split(s.as_str())).collect();
        }
        if let Some(RawValue::Str(s)) = self.env_value(option) {
            return split(s.as_str());
        }
        match self.file_value(option) {
            Some(RawValue::List(items)) => items,
            Some(other) => other.as_text().map(|s| split(s.as_str())).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

/// Parse an enumerated value the way clap does, ignoring case
fn parse_value_enum<T: ValueEnum>(s: &str) -> Result<T, String> {
    T::from_str(s.trim(), true).map_err(|_| {
        let allowed: Vec<String> =
            T::value_variants().iter().filter_map(|v| v.to_possible_value()).map(|p| p.get_name().to_string()).collect();
        format!("invalid value '{}' (expected one of: {})", s.trim(), allowed.join(", "))
    })
}

/// Normalize excluded outcome names; unknown names are dropped with a warning
pub fn parse_excluded(names: &[String]) -> Vec<OutcomeKind> {
    let mut excluded = Vec::new();
    for name in names.iter().map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()) {
        match name.parse::<OutcomeKind>() {
            Ok(kind) if !excluded.contains(&kind) => excluded.push(kind),
            Ok(_) => {}
            Err(e) => warn!("Ignoring excluded outcome: {}", e),
        }
    }
    excluded
}

/// Load the TOML config file.
///
/// A missing default file is not an error; a missing file given with
/// `--config` is.
pub fn load_config_file(path: &Path, explicit: bool) -> Result<Option<toml::Table>, String> {
    if !path.exists() {
        if explicit {
            return Err(format!("Config file not found: {}", path.display()));
        }
        debug!("No config file at {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    debug!("Loaded config file {} ({} keys)", path.display(), table.len());
    Ok(Some(table))
}

/// Build the complete report configuration.
///
/// Every option is resolved independently through the source chain. CI
/// environments always render zeros as numbers.
pub fn build_report_config(
    args: &CliArgs,
    env: &EnvSnapshot,
    file: Option<&toml::Table>,
) -> Result<ReportConfig, String> {
    let resolver = Resolver::new(env, file);
    let ctx = ExecutionContext::detect(env);
    let defaults = RenderPolicy::default();

    let enabled = resolver.resolve(ReportOption::MdReport, args.md_report_flag(), to_bool).unwrap_or(false);
    let verbosity = resolver.resolve(ReportOption::Verbose, args.verbosity(), to_int).unwrap_or(defaults.verbosity);
    let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
    let output = resolver
        .resolve(ReportOption::Output, args.md_report_output.clone().filter(non_empty), |v| {
            v.as_text().map(PathBuf::from).filter(non_empty)
        });
    let tee = resolver.resolve(ReportOption::Tee, args.tee_flag(), to_bool).unwrap_or(false);
    let margin = resolver
        .resolve(ReportOption::Margin, args.md_report_margin, |v| to_int(v).and_then(|i| usize::try_from(i).ok()))
        .unwrap_or(defaults.margin);

    let color_policy = resolver
        .resolve_parsed(ReportOption::Color, args.md_report_color, parse_value_enum::<ColorPolicy>)?
        .unwrap_or(defaults.color_policy);
    let zeros = resolver
        .resolve_parsed(ReportOption::Zeros, args.md_report_zeros, parse_value_enum::<ZerosRender>)?
        .unwrap_or(defaults.zeros);
    let flavor = resolver
        .resolve_parsed(ReportOption::Flavor, args.md_report_flavor, parse_value_enum::<MarkdownFlavor>)?
        .unwrap_or(defaults.flavor);

    let cli_color = |value: &Option<String>| value.as_deref().map(Color::parse).transpose();
    let success_color = resolver
        .resolve_parsed(ReportOption::SuccessColor, cli_color(&args.md_report_success_color)?, Color::parse)?
        .unwrap_or(defaults.success_color);
    let skip_color = resolver
        .resolve_parsed(ReportOption::SkipColor, cli_color(&args.md_report_skip_color)?, Color::parse)?
        .unwrap_or(defaults.skip_color);
    let error_color = resolver
        .resolve_parsed(ReportOption::ErrorColor, cli_color(&args.md_report_error_color)?, Color::parse)?
        .unwrap_or(defaults.error_color);

    let excluded = parse_excluded(&resolver.resolve_list(ReportOption::ExcludeOutcomes, &args.md_report_exclude_outcomes));

    let policy = RenderPolicy {
        verbosity,
        excluded,
        color_policy,
        margin,
        zeros: effective_zeros(zeros, &ctx),
        flavor,
        success_color,
        error_color,
        skip_color,
    };

    debug!("Report enabled: {}, output: {:?}, tee: {}", enabled, output, tee);
    debug!("Render policy: {:?}", policy);

    Ok(ReportConfig { enabled, output, tee, policy })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
