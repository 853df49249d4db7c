use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_PATH: &str = "data/Impact_of_Remote_Work_on_Mental_Health.csv";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "remote-pulse",
    about = "Explore the Remote Work & Mental Health survey",
    version,
    long_about = None
)]
pub struct Config {
    /// Survey file to load at startup (.csv, .tsv, .json or .parquet)
    #[arg(short, long, env = "REMOTE_WORK_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Region selected when the dashboard opens
    #[arg(short, long)]
    pub region: Option<String>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
