use bmcstat_core::ReportConfig;

use super::args::Cli;

pub mod report;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
}

pub fn dispatch(cli: Cli, cfg: ReportConfig) -> anyhow::Result<i32> {
    let cfg = cfg.with_details(cli.details);
    report::cmd_report(&cfg)
}
