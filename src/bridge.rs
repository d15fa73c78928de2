/// Bridge module - decodes a runner's session dump into OutcomeRecords
///
/// Two layouts are accepted, one record per JSON object:
/// - a single JSON array of records
/// - JSON Lines (one record per line, blank lines ignored)
///
/// A line or array element that cannot be decoded is skipped with a warning; the session
/// totals only ever reflect records that decoded.
use crate::types::{OutcomeRecord, Session};
use log::{debug, warn};
use std::io::{self, Read};

/// Read a whole session from any reader
pub fn read_session<R: Read>(mut reader: R) -> io::Result<Session> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(Session::from_records(parse_records(&input)))
}

impl Session {
    /// Load a session dump from a file or stdin
    pub fn load<R: Read>(reader: R) -> io::Result<Session> {
        read_session(reader)
    }
}

/// Decode records from a JSON array or JSON Lines document
pub fn parse_records(input: &str) -> Vec<OutcomeRecord> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
            Ok(values) => {
                let records = decode_array(values);
                debug!("Decoded {} records from JSON array", records.len());
                return records;
            }
            Err(e) => {
                warn!("Input looks like a JSON array but failed to decode ({}); trying JSON Lines", e);
            }
        }
    }

    let mut records = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<OutcomeRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping undecodable record on line {}: {}", lineno + 1, e),
        }
    }

    debug!("Decoded {} records from JSON Lines", records.len());
    records
}

/// Convert array elements one by one so a bad element only drops itself
fn decode_array(values: Vec<serde_json::Value>) -> Vec<OutcomeRecord> {
    let mut records = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<OutcomeRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping undecodable record {} in array: {}", i, e),
        }
    }
    records
}

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;
