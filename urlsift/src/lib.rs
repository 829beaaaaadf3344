pub mod commands;
pub mod handlers;

pub use commands::{CLAP_STYLING, command_argument_builder};
pub use handlers::{handle_harvest, harvest_options_from_matches, init_tracing, run_harvest};
