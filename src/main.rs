mod bridge;
mod cli;
mod config;
mod console_format;
mod context;
mod options;
mod report;
mod types;
mod ui;


use std::fs::File;
use std::io::{self, BufReader};
use types::Session;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Everything below reads the environment through this snapshot
    let env = config::EnvSnapshot::capture();
    let ctx = context::ExecutionContext::detect(&env);
    log::debug!("Execution context: {:?}", ctx);

    let (config_path, explicit) = args.config_path();
    let file_config = match config::load_config_file(&config_path, explicit) {
        Ok(table) => table,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let report_config = match config::build_report_config(&args, &env, file_config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    if !report_config.enabled {
        log::debug!("Markdown report disabled (pass --md-report or set MD_REPORT=true)");
        return;
    }

    let session = match load_session(&args) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&format!("Failed to read session: {}", e));
            std::process::exit(1);
        }
    };

    if session.records().is_empty() {
        ui::print_warning("no outcome records in input");
    }

    let stdout = io::stdout();
    let mut term = stdout.lock();
    match report::emit_reports(&session, &report_config, &ctx, &mut term) {
        Ok(summary) => {
            if let Some(path) = summary.file_written {
                log::debug!("Report written to {}", path.display());
            }
        }
        Err(e) => {
            ui::print_error(&format!("Failed to write report: {}", e));
            std::process::exit(1);
        }
    }
}

/// Read the session from `--input` or stdin
fn load_session(args: &cli::CliArgs) -> io::Result<Session> {
    match args.input {
        Some(ref path) => Session::load(BufReader::new(File::open(path)?)),
        None => Session::load(io::stdin().lock()),
    }
}
