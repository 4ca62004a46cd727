use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bmcstat",
    version,
    about = "Compare BMC and AI4BMC benchmark results per solver",
    long_about = "Reads SEABMC_<solver>.csv and AI4BMC_<solver>.csv from the data directory, \
prints performance and precision statistics and writes a scatter plot and summary.json \
to the results directory.\n\n\
Environment: BMCSTAT_DATA_DIR, BMCSTAT_RESULT_DIR, BMCSTAT_TIMEOUT, BMCSTAT_LOG."
)]
pub struct Cli {
    /// Print full tables and the column legend, and write explanation.md
    #[arg(long)]
    pub details: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_flag() {
        assert!(!Cli::parse_from(["bmcstat"]).details);
        assert!(Cli::parse_from(["bmcstat", "--details"]).details);
        assert!(Cli::try_parse_from(["bmcstat", "--verbose"]).is_err());
    }
}
