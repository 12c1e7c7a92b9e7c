use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a merge run.
///
/// Lines that do not parse are never errors; they are dropped by the parser.
/// Everything here aborts the run.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("cannot open '{name}': {source}")]
    Open { name: String, source: io::Error },

    #[error("cannot read '{name}': {source}")]
    Read { name: String, source: io::Error },

    #[error("cannot write '{name}': {source}")]
    Write { name: String, source: io::Error },

    #[error("'{}' is not a regular file, FIFO or character device", path.display())]
    InvalidFileType { path: PathBuf },

    #[error("interrupted")]
    Interrupted,
}

impl MergeError {
    pub fn open(name: impl Into<String>, source: io::Error) -> Self {
        Self::Open { name: name.into(), source }
    }

    pub fn read(name: impl Into<String>, source: io::Error) -> Self {
        Self::Read { name: name.into(), source }
    }

    pub fn write(name: impl Into<String>, source: io::Error) -> Self {
        Self::Write { name: name.into(), source }
    }

    /// Interruptions end the run without a diagnostic.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
