use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use urlsift_core::{
    DEFAULT_WORKERS, HarvestOptions, HarvestProgressCallback, Sink, execute_harvest,
    generate_summary,
};
use urlsift_sources::{Credentials, Endpoints};

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

/// Collect the run configuration from parsed arguments
pub fn harvest_options_from_matches(matches: &ArgMatches) -> HarvestOptions {
    let domain = matches
        .get_one::<String>("DOMAIN")
        .cloned()
        .unwrap_or_default();

    let mut options = HarvestOptions::new(domain);
    options.unique = matches.get_flag("unique");
    options.include_subdomains = !matches.get_flag("no-subs");
    options.threads = matches
        .get_one::<u64>("threads")
        .map(|t| *t as usize)
        .unwrap_or(DEFAULT_WORKERS);
    options.timeout = matches
        .get_one::<u64>("timeout")
        .map(|secs| Duration::from_secs(*secs));
    options.credentials = Credentials {
        urlscan: matches.get_one::<String>("api-key-urlscan").cloned(),
        shodan: matches.get_one::<String>("api-key-shodan").cloned(),
    };
    options.show_progress_bars = !matches.get_flag("quiet");
    options
}

/// Run the harvest and write its result. Source failures are reported but never
/// fail the run; only setup and output errors do.
pub async fn run_harvest(
    options: HarvestOptions,
    sink: Sink,
    endpoints: &Endpoints,
    quiet: bool,
) -> anyhow::Result<usize> {
    let progress_callback: Option<HarvestProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|line: String| eprintln!("{}", line)))
    };

    let report = execute_harvest(options, endpoints, progress_callback)
        .await
        .context("Harvest could not start")?;

    if !quiet {
        eprintln!("\n{}", generate_summary(&report));
    }

    let written = sink.write(&report.merged)?;

    if !quiet && let Some(line) = saved_message(&sink) {
        eprintln!("{}", line);
    }

    Ok(written)
}

/// The confirmation printed once results reach a file. Stdout gets none.
pub fn saved_message(sink: &Sink) -> Option<String> {
    match sink {
        Sink::File(path) => Some(format!(
            "{} Results saved to {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        )),
        Sink::Stdout => None,
    }
}

/// Handle a parsed command line. Returns the process exit code.
pub async fn handle_harvest(matches: &ArgMatches, endpoints: &Endpoints) -> i32 {
    let quiet = matches.get_flag("quiet");
    let options = harvest_options_from_matches(matches);
    let sink = Sink::from_output(matches.get_one::<String>("output").map(String::as_str));

    match run_harvest(options, sink, endpoints, quiet).await {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            1
        }
    }
}
