pub mod alienvault;
pub mod catalog;
pub mod commoncrawl;
pub mod error;
pub mod http;
pub mod outcome;
pub mod shodan;
pub mod source;
pub mod urlscan;
pub mod wayback;

pub use catalog::{
    Activation, Credentials, Endpoints, SourceKind, SourceSpec, active_sources, source_specs,
};
pub use error::SourceError;
pub use http::build_client;
pub use outcome::FetchOutcome;
pub use source::{Query, Source};
