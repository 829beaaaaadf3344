use clap::{ArgAction, arg};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

/// Trim the domain argument and refuse one that is blank.
pub fn parse_domain(value: &str) -> Result<String, String> {
    let domain = value.trim();
    if domain.is_empty() {
        return Err("a domain is required".to_string());
    }
    Ok(domain.to_string())
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("urlsift")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("urlsift")
        .about(
            "Fetch archived and indexed URLs for a domain from AlienVault OTX, the Wayback \
            Machine, Common Crawl, urlscan.io and Shodan.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(<DOMAIN>)
                .help("The domain to fetch URLs for")
                .value_parser(parse_domain),
        )
        .arg(
            arg!(--"unique")
                .required(false)
                .help("Deduplicate and sort the URLs (default: keep source order and duplicates)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("Maximum number of sources queried at once")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("5"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save results to file (default: print to stdout)"),
        )
        .arg(
            arg!(--"no-subs")
                .required(false)
                .help("Leave subdomains out of the Wayback Machine and Common Crawl queries")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--"api-key-urlscan" <KEY>)
                .required(false)
                .help("API key for urlscan.io (the source is skipped without one)"),
        )
        .arg(
            arg!(--"api-key-shodan" <KEY>)
                .required(false)
                .help("API key for Shodan (the source is skipped without one)"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds (default: wait indefinitely)")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Suppress banner, progress and summary output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}
