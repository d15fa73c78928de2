/// Core data structures for test outcomes
///
/// This module defines the records a finished test session hands over to
/// md-report, and the session store that answers the queries the report
/// pipeline needs (records in arrival order, session-wide totals).
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Outcome of a single test, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Passed,
    Failed,
    Error,
    Skipped,
    #[serde(rename = "xfailed")]
    XFailed,
    #[serde(rename = "xpassed")]
    XPassed,
}

impl OutcomeKind {
    /// All kinds, in the column order used by the report
    pub const ALL: [OutcomeKind; 6] = [
        OutcomeKind::Passed,
        OutcomeKind::Failed,
        OutcomeKind::Error,
        OutcomeKind::Skipped,
        OutcomeKind::XFailed,
        OutcomeKind::XPassed,
    ];

    /// Lowercase name, also used as the column header
    pub fn name(&self) -> &'static str {
        match self {
            OutcomeKind::Passed => "passed",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Error => "error",
            OutcomeKind::Skipped => "skipped",
            OutcomeKind::XFailed => "xfailed",
            OutcomeKind::XPassed => "xpassed",
        }
    }

    /// Semantic group used for coloring
    pub fn group(&self) -> OutcomeGroup {
        match self {
            OutcomeKind::Passed => OutcomeGroup::Success,
            OutcomeKind::Failed | OutcomeKind::Error => OutcomeGroup::Failure,
            OutcomeKind::Skipped | OutcomeKind::XFailed | OutcomeKind::XPassed => OutcomeGroup::Skip,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutcomeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        OutcomeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown outcome '{}'", s.trim()))
    }
}

/// Coarse grouping of outcomes: what a row or column "means"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeGroup {
    Success,
    Failure,
    Skip,
}

/// Where a test lives: file path, line, and the runner's domain info
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub domain: String,
}

/// One observed test result
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutcomeRecord {
    pub outcome: OutcomeKind,
    /// Missing for records the runner could not place in a file
    #[serde(default)]
    pub location: Option<Location>,
    /// Display name, e.g. "test_add[1-2]"
    #[serde(default)]
    pub head_line: String,
}

impl OutcomeRecord {
    /// Test function name with any parametrization suffix ("[...]") removed
    pub fn test_function(&self) -> &str {
        self.head_line.split('[').next().unwrap_or_default()
    }
}

/// Per-kind totals for a whole session
pub type OutcomeTotals = BTreeMap<OutcomeKind, u64>;

/// All records of one finished test session
#[derive(Debug, Clone, Default)]
pub struct Session {
    records: Vec<OutcomeRecord>,
    totals: OutcomeTotals,
}

impl Session {
    /// Build a session, counting totals over every record (with or without location)
    pub fn from_records(records: Vec<OutcomeRecord>) -> Self {
        let mut totals: OutcomeTotals = OutcomeKind::ALL.into_iter().map(|k| (k, 0)).collect();
        for record in &records {
            *totals.entry(record.outcome).or_insert(0) += 1;
        }
        Session { records, totals }
    }

    /// Records in arrival order
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Session-wide count for one kind
    pub fn total(&self, kind: OutcomeKind) -> u64 {
        self.totals.get(&kind).copied().unwrap_or(0)
    }

    /// Session-wide counts for all kinds
    pub fn totals(&self) -> &OutcomeTotals {
        &self.totals
    }

    /// Sum of all session totals, excluded kinds included
    pub fn grand_total(&self) -> u64 {
        self.totals().values().sum()
    }

    /// Kinds that get a column: canonical order, not excluded, seen at least once
    pub fn included_kinds(&self, excluded: &[OutcomeKind]) -> Vec<OutcomeKind> {
        OutcomeKind::ALL
            .into_iter()
            .filter(|kind| !excluded.contains(kind))
            .filter(|kind| self.total(*kind) > 0)
            .collect()
    }
}
