use colored::Colorize;

pub mod dispatch;
pub mod error;
pub mod harvest;
pub mod merge;
pub mod sink;

pub use dispatch::{DEFAULT_WORKERS, Dispatcher, SettleCallback};
pub use error::{HarvestError, SinkError};
pub use harvest::{
    HarvestOptions, HarvestProgressCallback, HarvestReport, describe_outcome, execute_harvest,
    generate_summary,
};
pub use merge::{MergeMode, MergedResult, merge};
pub use sink::Sink;

const BANNER: &str = r#"
            _      _  __ _
 _   _ _ __| |___ (_)/ _| |_
| | | | '__| / __|| | |_| __|
| |_| | |  | \__ \| |  _| |_
 \__,_|_|  |_|___/|_|_|  \__|
"#;

/// Print the banner to stderr so it never mixes with URL output.
pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan().bold());
    eprintln!(
        "  {} v{}\n",
        "passive URL harvester".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
}
