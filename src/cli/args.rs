use clap::Parser;
use std::path::PathBuf;

/// Aggregate Monefy backup snapshots into listings or balance summaries
#[derive(Parser, Debug)]
#[command(name = "monefy-aggregator")]
#[command(
    about = "Aggregate Monefy CSV backups into transaction listings or category summaries",
    long_about = None
)]
pub struct CliArgs {
    /// Directory containing `monefy-<timestamp>.csv` snapshot files
    #[arg(value_name = "SNAPSHOT_DIR", help = "Directory with Monefy backup snapshots")]
    pub snapshot_dir: PathBuf,

    /// Requested output kind for the result file
    ///
    /// Passed through to the engine as-is; anything outside csv/json is
    /// rejected there as a user-input error.
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Output format: 'csv' or 'json'"
    )]
    pub format: String,

    /// Reduce the listing to a category/income/expense/balance summary
    #[arg(long = "summarize", help = "Write a summarized balance instead of the raw listing")]
    pub summarize: bool,

    /// Directory result files are written into
    #[arg(
        long = "out-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to write result files into"
    )]
    pub out_dir: PathBuf,

    /// Print the latest snapshot name and exit
    #[arg(long = "latest", help = "Only print the name of the latest snapshot")]
    pub latest: bool,

    /// Mirror every snapshot into the output directory and exit
    #[arg(long = "save", help = "Copy all snapshots into the output directory")]
    pub save: bool,
}
