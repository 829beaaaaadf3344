use urlsift::{command_argument_builder, handle_harvest, init_tracing};
use urlsift_core::print_banner;
use urlsift_sources::Endpoints;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    init_tracing(matches.get_count("verbose"));

    // Show banner unless --quiet flag is set
    if !matches.get_flag("quiet") {
        print_banner();
    }

    let code = handle_harvest(&matches, &Endpoints::default()).await;
    std::process::exit(code);
}
