use crate::error::SinkError;
use crate::merge::MergedResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the merged URLs end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    /// `None` means stdout. A leading `~` in the path is expanded.
    pub fn from_output(output: Option<&str>) -> Self {
        match output {
            Some(path) => Sink::File(PathBuf::from(shellexpand::tilde(path).as_ref())),
            None => Sink::Stdout,
        }
    }

    /// Write one URL per line. Returns the number of lines written.
    pub fn write(&self, result: &MergedResult) -> Result<usize, SinkError> {
        match self {
            Sink::Stdout => {
                let stdout = io::stdout();
                match write_lines(stdout.lock(), result.urls()) {
                    Ok(()) => Ok(result.len()),
                    // Output piped into `head` and friends
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(result.len()),
                    Err(e) => Err(SinkError::Stdout(e)),
                }
            }
            Sink::File(path) => {
                write_file(path, result.urls()).map_err(|source| SinkError::File {
                    path: path.clone(),
                    source,
                })?;
                Ok(result.len())
            }
        }
    }
}

fn write_file(path: &Path, urls: &[String]) -> io::Result<()> {
    let file = File::create(path)?;
    write_lines(file, urls)
}

pub fn write_lines<W: Write>(writer: W, urls: &[String]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()
}
