use std::io;
use std::path::PathBuf;
use thiserror::Error;
use urlsift_sources::SourceError;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Error saving results to {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing results to stdout: {0}")]
    Stdout(#[source] io::Error),
}

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("No domain given")]
    EmptyDomain,

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] SourceError),
}
