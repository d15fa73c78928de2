/// Tests for bridge module
#[cfg(test)]
mod tests {
    use crate::bridge::{parse_records, read_session};
    use crate::types::*;

    /// A JSON array dump decodes every record in order
    #[test]
    fn test_parse_json_array() {
        let input = r#"[
            {"outcome": "passed", "location": {"path": "t.py", "line": 1, "domain": "test_a"}, "head_line": "test_a"},
            {"outcome": "xfailed", "location": {"path": "t.py", "line": 9, "domain": "test_b"}, "head_line": "test_b[1]"}
        ]"#;
        let records = parse_records(input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome, OutcomeKind::Passed);
        assert_eq!(records[1].outcome, OutcomeKind::XFailed);
        assert_eq!(records[1].test_function(), "test_b");
    }

    /// One bad element in an array drops only that element
    #[test]
    fn test_parse_json_array_skips_bad_elements() {
        let input = r#"[
            {"outcome": "passed", "location": {"path": "t.py"}, "head_line": "test_a"},
            {"outcome": "warnings", "location": {"path": "t.py"}, "head_line": "test_b"},
            {"location": {"path": "t.py"}, "head_line": "test_c"},
            {"outcome": "failed", "location": {"path": "t.py"}, "head_line": "test_d"}
        ]"#;
        let records = parse_records(input);

        assert_eq!(records.len(), 2, "unknown and missing outcomes should be dropped");
        assert_eq!(records[0].outcome, OutcomeKind::Passed);
        assert_eq!(records[0].head_line, "test_a");
        assert_eq!(records[1].outcome, OutcomeKind::Failed);
        assert_eq!(records[1].head_line, "test_d");

        let session = read_session(input.as_bytes()).expect("reading from a byte slice cannot fail");
        assert_eq!(session.grand_total(), 2);
    }

    /// JSON Lines input skips blank lines and undecodable lines
    #[test]
    fn test_parse_json_lines_skips_garbage() {
        let input = concat!(
            "{\"outcome\": \"failed\", \"location\": {\"path\": \"a.py\"}, \"head_line\": \"test_x\"}\n",
            "\n",
            "not json at all\n",
            "{\"outcome\": \"unknown-kind\", \"head_line\": \"test_y\"}\n",
            "{\"outcome\": \"error\", \"head_line\": \"test_z\"}\n",
        );
        let records = parse_records(input);

        assert_eq!(records.len(), 2, "garbage and unknown outcomes should be dropped");
        assert_eq!(records[0].outcome, OutcomeKind::Failed);
        assert_eq!(records[0].location.as_ref().map(|l| l.path.as_str()), Some("a.py"));
        assert_eq!(records[0].location.as_ref().and_then(|l| l.line), None);
        assert!(records[1].location.is_none(), "location is optional");
    }

    /// Records without location still count toward the session totals
    #[test]
    fn test_read_session_counts_unlocated_records() {
        let input = concat!(
            "{\"outcome\": \"error\", \"head_line\": \"collect\"}\n",
            "{\"outcome\": \"passed\", \"location\": {\"path\": \"t.py\"}, \"head_line\": \"test_a\"}\n",
        );
        let session = read_session(input.as_bytes()).expect("reading from a byte slice cannot fail");

        assert_eq!(session.records().len(), 2);
        assert_eq!(session.total(OutcomeKind::Error), 1);
        assert_eq!(session.total(OutcomeKind::Passed), 1);
        assert_eq!(session.grand_total(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("[]").is_empty());
    }
}
