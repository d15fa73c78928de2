//! Outcome aggregation.
//!
//! Groups the raw outcome records of a session into per-file (or
//! per-function) count rows. Rows keep the order in which their key was
//! first seen; totals for the TOTAL row come from the session, never from
//! these rows.

use crate::types::{OutcomeKind, OutcomeRecord};
use log::debug;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Component, Path};

/// Row granularity, derived from the verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One row per file (verbosity 0)
    File,
    /// One row per test function (verbosity >= 1)
    Function,
}

impl Grouping {
    /// Map a verbosity level to a grouping; negative levels have none.
    pub fn from_verbosity(verbosity: i64) -> Option<Grouping> {
        match verbosity {
            0 => Some(Grouping::File),
            v if v >= 1 => Some(Grouping::Function),
            _ => None,
        }
    }
}

/// Row identity: file path, plus the test function at verbosity >= 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupingKey {
    pub path: String,
    pub function: Option<String>,
}

impl GroupingKey {
    /// Key components in column order
    pub fn components(&self) -> Vec<&str> {
        let mut parts = vec![self.path.as_str()];
        if let Some(ref function) = self.function {
            parts.push(function.as_str());
        }
        parts
    }
}

/// Counts for one row, restricted to the included kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountRow {
    counts: BTreeMap<OutcomeKind, u64>,
}

impl CountRow {
    /// A row with an explicit zero for every included kind
    pub fn zeroed(kinds: &[OutcomeKind]) -> Self {
        CountRow { counts: kinds.iter().map(|k| (*k, 0)).collect() }
    }

    pub fn increment(&mut self, kind: OutcomeKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: OutcomeKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn subtotal(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Normalize a file path: forward slashes, `.` dropped, `..` folded where possible.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let is_absolute = unified.starts_with('/');
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(&unified).components() {
        match component {
            Component::CurDir | Component::RootDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else if !is_absolute {
                    parts.push("..".to_string());
                }
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    match (is_absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Aggregate records into rows keyed by file (and function), in first-seen order.
///
/// Records whose kind is not in `included` are ignored, as are records
/// without a location. Unsupported verbosity levels yield no rows.
pub fn aggregate(
    records: &[OutcomeRecord],
    included: &[OutcomeKind],
    verbosity: i64,
) -> Vec<(GroupingKey, CountRow)> {
    let Some(grouping) = Grouping::from_verbosity(verbosity) else {
        debug!("Verbosity {} has no grouping; nothing to aggregate", verbosity);
        return Vec::new();
    };

    let mut rows: Vec<(GroupingKey, CountRow)> = Vec::new();
    let mut index: HashMap<GroupingKey, usize> = HashMap::new();
    let mut unlocated = 0usize;

    for record in records {
        if !included.contains(&record.outcome) {
            continue;
        }

        let Some(ref location) = record.location else {
            unlocated += 1;
            continue;
        };

        let key = GroupingKey {
            path: normalize_path(&location.path),
            function: match grouping {
                Grouping::File => None,
                Grouping::Function => Some(record.test_function().to_string()),
            },
        };

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            rows.push((key, CountRow::zeroed(included)));
            rows.len() - 1
        });
        rows[slot].1.increment(record.outcome);
    }

    if unlocated > 0 {
        debug!("Skipped {} records without location", unlocated);
    }
    debug!("Aggregated {} rows ({:?} grouping)", rows.len(), grouping);

    rows
}
