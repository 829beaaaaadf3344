use crate::dispatch::{DEFAULT_WORKERS, Dispatcher, SettleCallback};
use crate::error::HarvestError;
use crate::merge::{MergeMode, MergedResult, merge};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use urlsift_sources::{
    Credentials, Endpoints, FetchOutcome, Query, active_sources, build_client, source_specs,
};

/// Options for configuring a harvest run
pub struct HarvestOptions {
    pub domain: String,
    pub include_subdomains: bool,
    pub unique: bool,
    pub threads: usize,
    pub credentials: Credentials,
    pub timeout: Option<Duration>,
    pub show_progress_bars: bool,
}

impl HarvestOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            include_subdomains: true,
            unique: false,
            threads: DEFAULT_WORKERS,
            credentials: Credentials::default(),
            timeout: None,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting per-source progress lines
pub type HarvestProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything a run produced: one outcome per dispatched source plus the merge.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub domain: String,
    pub outcomes: Vec<FetchOutcome>,
    pub merged: MergedResult,
}

impl HarvestReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// URLs collected before merging.
    pub fn collected(&self) -> usize {
        self.outcomes.iter().map(|o| o.urls().len()).sum()
    }
}

/// One line describing how a source settled.
pub fn describe_outcome(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Success { source, urls } => {
            format!("{} {}: {} URLs", "✓".green().bold(), source, urls.len())
        }
        FetchOutcome::Failure { source, reason } => {
            format!("{} {} failed: {}", "✗".red().bold(), source, reason)
        }
    }
}

/// Execute a harvest with the given options.
/// Source failures are absorbed; only setup problems are returned as errors.
pub async fn execute_harvest(
    options: HarvestOptions,
    endpoints: &Endpoints,
    progress_callback: Option<HarvestProgressCallback>,
) -> Result<HarvestReport, HarvestError> {
    let HarvestOptions {
        domain,
        include_subdomains,
        unique,
        threads,
        credentials,
        timeout,
        show_progress_bars,
    } = options;

    let query = Query::new(domain, include_subdomains);
    if query.domain.is_empty() {
        return Err(HarvestError::EmptyDomain);
    }

    let client = build_client(timeout)?;

    let specs = source_specs(&credentials);
    for spec in specs.iter().filter(|spec| !spec.is_active()) {
        debug!("Skipping {} (no API key supplied)", spec.name());
    }
    let sources = active_sources(&specs, endpoints);

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Querying {} sources...", sources.len()));
        Some(pb)
    } else {
        None
    };

    let pb_clone = progress_bar.clone();
    let settle_callback: SettleCallback =
        Arc::new(move |settled: usize, total: usize, outcome: &FetchOutcome| {
            let line = describe_outcome(outcome);
            match (&pb_clone, &progress_callback) {
                (Some(pb), Some(callback)) => {
                    pb.suspend(|| callback(line));
                    pb.set_message(format!("{}/{} sources settled", settled, total));
                }
                (Some(pb), None) => {
                    pb.set_message(format!("{}/{} sources settled", settled, total))
                }
                (None, Some(callback)) => callback(line),
                (None, None) => {}
            }
        });

    let dispatcher = Dispatcher::new(client)
        .with_workers(threads)
        .with_settle_callback(settle_callback);
    let outcomes = dispatcher.dispatch(&sources, &query).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let merged = merge(&outcomes, unique);
    Ok(HarvestReport {
        domain: query.domain,
        outcomes,
        merged,
    })
}

/// Generate the end-of-run summary shown on stderr
pub fn generate_summary(report: &HarvestReport) -> String {
    let mut summary = String::new();
    summary.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    summary.push_str("# Summary:\n");
    summary.push_str(&format!("  Domain: {}\n", report.domain));
    summary.push_str(&format!("  Sources queried: {}\n", report.outcomes.len()));
    summary.push_str(&format!("  Succeeded: {}\n", report.succeeded()));
    summary.push_str(&format!("  Failed: {}\n", report.failed()));
    summary.push_str(&format!("  URLs collected: {}\n", report.collected()));

    let mode = match report.merged.mode() {
        MergeMode::Unique => "unique",
        MergeMode::Concatenate => "concatenated",
    };
    summary.push_str(&format!("  URLs in output: {} ({})\n", report.merged.len(), mode));

    summary.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for outcome in &report.outcomes {
        summary.push_str(&format!("  {}\n", describe_outcome(outcome)));
    }

    summary
}
