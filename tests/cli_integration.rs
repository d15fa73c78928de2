/// Integration tests for the md-report binary
///
/// These run the built binary against session dumps in test-fixtures/,
/// with a scrubbed environment and a temporary working directory so that
/// neither CI variables nor a stray md-report.toml leak in.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

// Helper to get the test fixtures directory
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures").join(name)
}

// Helper to build a command with a clean environment
fn md_report(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_md-report"));
    cmd.current_dir(cwd);
    for (key, _) in std::env::vars_os() {
        let name = key.to_string_lossy();
        if name.starts_with("MD_REPORT") || name == "CI" || name == "TRAVIS" {
            cmd.env_remove(&key);
        }
    }
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().unwrap_or_else(|e| panic!("Failed to run md-report: {}", e))
}

// Helper to assert the command succeeded
fn assert_success(output: &Output, context: &str) {
    assert!(
        output.status.success(),
        "{} failed with status: {:?}\nstderr: {}",
        context,
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_fixtures_exist() {
    assert!(fixture("mixed.jsonl").exists());
    assert!(fixture("passing.json").exists());
}

#[test]
fn test_disabled_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path()).arg("--input").arg(fixture("mixed.jsonl")));

    assert_success(&output, "md-report without --md-report");
    assert!(output.stdout.is_empty(), "no report unless enabled");
}

#[test]
fn test_file_grouping_report() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path())
        .args(["--md-report", "--md-report-color", "never", "--input"])
        .arg(fixture("mixed.jsonl")));

    assert_success(&output, "file grouping report");
    let expected = concat!(
        "|      filepath      | passed | failed | error | skipped | xfailed | SUBTOTAL |\n",
        "|--------------------|-------:|-------:|------:|--------:|--------:|---------:|\n",
        "| tests/test_math.py |      2 |      1 |     0 |       0 |       0 |        3 |\n",
        "| tests/test_io.py   |      0 |      0 |     0 |       1 |       1 |        2 |\n",
        "| TOTAL              |      2 |      1 |     1 |       1 |       1 |        6 |\n",
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_function_grouping_from_env() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path())
        .env("MD_REPORT", "true")
        .env("MD_REPORT_VERBOSE", "1")
        .env("MD_REPORT_COLOR", "never")
        .env("MD_REPORT_MARGIN", "0")
        .env("MD_REPORT_ZEROS", "empty")
        .arg("--input")
        .arg(fixture("mixed.jsonl")));

    assert_success(&output, "function grouping report");
    let expected = concat!(
        "|     filepath     | function |passed|failed|error|skipped|xfailed|SUBTOTAL|\n",
        "|------------------|----------|-----:|-----:|----:|------:|------:|-------:|\n",
        "|tests/test_math.py|test_add  |     2|      |     |       |       |       2|\n",
        "|tests/test_math.py|test_div  |      |     1|     |       |       |       1|\n",
        "|tests/test_io.py  |test_read |      |      |     |      1|       |       1|\n",
        "|tests/test_io.py  |test_write|      |      |     |       |      1|       1|\n",
        "|TOTAL             |          |     2|     1|    1|      1|      1|       6|\n",
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_session_from_stdin() {
    let dir = TempDir::new().expect("tempdir");
    let mut child = md_report(dir.path())
        .args(["--md-report", "--md-report-color", "never"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn md-report");

    let input = fs::read(fixture("passing.json")).expect("read fixture");
    child.stdin.take().expect("stdin is piped").write_all(&input).expect("write stdin");
    let output = child.wait_with_output().expect("wait for md-report");

    assert_success(&output, "report from stdin");
    let expected = concat!(
        "| filepath | passed | SUBTOTAL |\n",
        "|----------|-------:|---------:|\n",
        "| t.py     |      2 |        2 |\n",
        "| TOTAL    |      2 |        2 |\n",
    );
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_output_file_without_tee() {
    let dir = TempDir::new().expect("tempdir");
    let report = dir.path().join("report.md");
    let output = run(md_report(dir.path())
        .arg("--md-report")
        .arg("--md-report-output")
        .arg(&report)
        .arg("--input")
        .arg(fixture("passing.json")));

    assert_success(&output, "file output");
    assert!(output.stdout.is_empty(), "terminal gets nothing without tee");
    let written = fs::read_to_string(&report).expect("report file");
    assert!(!written.contains('\x1b'), "auto policy leaves common_mark files plain");
    assert!(written.contains("| TOTAL    |      2 |        2 |"));
}

#[test]
fn test_tee_with_config_file() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("md-report.toml"),
        "md_report = true\nmd_report_tee = true\nmd_report_output = \"out.md\"\nmd_report_color = \"text\"\nmd_report_exclude_outcomes = [\"skipped\", \"xfailed\"]\n",
    )
    .expect("write config");

    let output = run(md_report(dir.path()).arg("--input").arg(fixture("mixed.jsonl")));

    assert_success(&output, "tee from config file");
    let term = stdout(&output);
    let written = fs::read_to_string(dir.path().join("out.md")).expect("report file");
    assert_eq!(term, written, "text policy writes the same colored report to both");
    assert!(term.contains("\x1b["));
    assert!(!term.contains("skipped"));
    assert!(!term.contains("xfailed"));
}

#[test]
fn test_github_flavor_file_keeps_color_spans() {
    let dir = TempDir::new().expect("tempdir");
    let report = dir.path().join("report.md");
    let output = run(md_report(dir.path())
        .args(["--md-report", "--md-report-flavor", "github", "--md-report-output"])
        .arg(&report)
        .arg("--input")
        .arg(fixture("passing.json")));

    assert_success(&output, "github flavor file");
    let written = fs::read_to_string(&report).expect("report file");
    assert!(written.contains("$\\textcolor{#00ff00}{\\text{2}}$"), "got:\n{}", written);
}

#[test]
fn test_ci_forces_numeric_zeros() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path())
        .env("CI", "true")
        .args(["--md-report", "--md-report-color", "never", "--md-report-zeros", "empty", "--input"])
        .arg(fixture("mixed.jsonl")));

    assert_success(&output, "report on CI");
    assert!(stdout(&output).contains("| tests/test_io.py   |      0 |      0 |     0 |"));
}

#[test]
fn test_all_outcomes_excluded_prints_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let report = dir.path().join("report.md");
    let output = run(md_report(dir.path())
        .args(["--md-report", "--md-report-tee", "--md-report-output"])
        .arg(&report)
        .args(["--md-report-exclude-outcomes", "passed"])
        .arg("--input")
        .arg(fixture("passing.json")));

    assert_success(&output, "empty report");
    assert!(output.stdout.is_empty());
    assert!(!report.exists(), "empty reports are not written");
}

#[test]
fn test_invalid_env_value_fails() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path())
        .env("MD_REPORT_FLAVOR", "rst")
        .arg("--md-report")
        .arg("--input")
        .arg(fixture("passing.json")));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MD_REPORT_FLAVOR"));
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().expect("tempdir");
    let output = run(md_report(dir.path())
        .arg("--md-report")
        .arg("--md-report-output")
        .arg(dir.path().join("no-such-dir").join("report.md"))
        .arg("--input")
        .arg(fixture("passing.json")));

    assert!(!output.status.success(), "write failures are fatal");
}
