use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use bmcstat_core::ReportConfig;
use cli::args::Cli;
use cli::commands::{dispatch, exit_codes};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr) // stdout carries the report
        .init();
}

fn main() {
    let cli = Cli::parse();
    let cfg = ReportConfig::from_env();
    init_logging(&cfg.log_level);
    for name in &cfg.unknown_solvers {
        tracing::warn!(event = "unknown_solver", solver = %name, "ignoring entry in BMCSTAT_SOLVERS");
    }

    let code = match dispatch(cli, cfg) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}
