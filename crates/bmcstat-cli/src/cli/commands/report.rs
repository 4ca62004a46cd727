use std::io::Write;

use anyhow::Context;
use bmcstat_core::{run_report, ReportConfig};

use super::exit_codes;

pub fn cmd_report(cfg: &ReportConfig) -> anyhow::Result<i32> {
    tracing::debug!(
        event = "report_started",
        data_dir = %cfg.data_dir.display(),
        result_dir = %cfg.result_dir.display(),
        timeout_secs = cfg.timeout_secs,
        details = cfg.details
    );

    let report = run_report(cfg)
        .with_context(|| format!("failed to build report from {}", cfg.data_dir.display()))?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.text.as_bytes())
        .context("failed to write report to stdout")?;
    if !cfg.details {
        writeln!(
            stdout,
            "\nTo show more details, please run {} with --details option.",
            env!("CARGO_BIN_NAME")
        )?;
    }
    stdout.flush()?;

    for w in &report.warnings {
        eprintln!("warning: {w}");
    }
    Ok(exit_codes::OK)
}
