use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use svcmerge_common::MergeError;
use tracing::debug;

use super::{STDIO_NAME, filetype};

/// An input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    Stdin,
    Path(PathBuf),
}

impl From<&str> for InputSpec {
    fn from(s: &str) -> Self {
        match s {
            STDIO_NAME => InputSpec::Stdin,
            path => InputSpec::Path(PathBuf::from(path)),
        }
    }
}

impl FromStr for InputSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSpec::Stdin => write!(f, "standard input"),
            InputSpec::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl InputSpec {
    /// Opens the input for reading.
    pub fn open(&self) -> Result<Source, MergeError> {
        let name: String = self.to_string();

        let reader: Box<dyn BufRead + Send> = match self {
            InputSpec::Stdin => Box::new(BufReader::new(io::stdin())),
            InputSpec::Path(path) => {
                filetype::check(path, &name)?;
                let file: File = File::open(path).map_err(|e| MergeError::open(&name, e))?;
                Box::new(BufReader::new(file))
            }
        };

        debug!("Opened {name}");
        Ok(Source::new(name, reader))
    }
}

/// A named stream of `services(5)` lines.
pub struct Source {
    name: String,
    reader: Box<dyn BufRead + Send>,
}

impl Source {
    pub fn new(name: impl Into<String>, reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// In-memory source, mostly useful for tests and piping prepared text.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let bytes: Vec<u8> = text.into().into_bytes();
        Self::new(name, Box::new(io::Cursor::new(bytes)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the next line without its terminator.
    ///
    /// Invalid UTF-8 is replaced rather than treated as a read failure.
    /// Returns `Ok(None)` at end of stream.
    pub fn next_line(&mut self, buf: &mut Vec<u8>) -> Result<Option<String>, MergeError> {
        buf.clear();
        let read: usize = self
            .reader
            .read_until(b'\n', buf)
            .map_err(|e| MergeError::read(&self.name, e))?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(buf).trim_end_matches(['\n', '\r']).to_string()))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish_non_exhaustive()
    }
}
