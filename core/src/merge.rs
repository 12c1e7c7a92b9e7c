//! # Merge Engine
//!
//! Folds any number of `services(5)` sources into one record per
//! `(port, protocol)` key.
//!
//! Sources are folded strictly in the order given and lines in file order.
//! When a key recurs, the newer line takes over the primary name while the
//! older name and aliases are kept as aliases, so nothing that was ever
//! listed for a key is lost:
//!
//! ```text
//! a:  foo  80/tcp
//! b:  bar  80/tcp  alias1        =>  baz  80/tcp  alias1 bar foo
//! c:  baz  80/tcp
//! ```

use std::collections::HashMap;

use svcmerge_common::interrupt::Interrupt;
use svcmerge_common::{MergeError, ServiceKey, ServiceRecord};
use tracing::{debug, trace};

use crate::io::Source;
use crate::parser::{self, Rejection};

/// The merged result of a run, keyed by `(port, protocol)`.
#[derive(Debug, Default, Clone)]
pub struct MergedServices {
    records: HashMap<ServiceKey, ServiceRecord>,
    sources: Vec<String>,
}

impl MergedServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `record` in, superseding whatever was stored for its key.
    pub fn insert(&mut self, mut record: ServiceRecord) {
        if let Some(older) = self.records.remove(&record.key) {
            trace!("{} supersedes {} on {}", record.name, older.name, record.key);
            record.supersede(older);
        }
        self.records.insert(record.key.clone(), record);
    }

    pub fn get(&self, key: &ServiceKey) -> Option<&ServiceRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in output order: by port, then by protocol rank.
    pub fn sorted(&self) -> Vec<&ServiceRecord> {
        let mut records: Vec<&ServiceRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.key.sort_key().cmp(&b.key.sort_key()));
        records
    }

    /// Names of the folded sources, in the order they were folded.
    ///
    /// The same name may appear more than once.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

/// Line counts for one folded source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub records: usize,
    /// Blank, short and comment lines.
    pub skipped: usize,
    pub malformed: usize,
    pub out_of_range: usize,
}

impl SourceStats {
    pub fn lines(&self) -> usize {
        self.records + self.skipped + self.malformed + self.out_of_range
    }

    /// Lines that were meant as entries but could not be used.
    pub fn dropped(&self) -> usize {
        self.malformed + self.out_of_range
    }
}

/// Incremental merge over sources that arrive one at a time.
#[derive(Debug, Default)]
pub struct Merger {
    services: MergedServices,
    interrupt: Interrupt,
}

impl Merger {
    pub fn new(interrupt: Interrupt) -> Self {
        Self {
            services: MergedServices::new(),
            interrupt,
        }
    }

    /// Reads `source` to the end and folds every record it holds.
    pub fn fold_source(&mut self, mut source: Source) -> Result<SourceStats, MergeError> {
        let mut stats = SourceStats::default();
        let mut buf: Vec<u8> = Vec::new();
        let mut line_no: usize = 0;

        self.services.sources.push(source.name().to_string());

        while let Some(line) = source.next_line(&mut buf)? {
            self.interrupt.check()?;
            line_no += 1;

            match parser::classify(&line) {
                Ok(record) => {
                    stats.records += 1;
                    self.services.insert(record);
                }
                Err(Rejection::PortOutOfRange(port)) => {
                    stats.out_of_range += 1;
                    trace!("{}:{line_no}: dropped, port {port} out of range", source.name());
                }
                Err(reason @ Rejection::Malformed) => {
                    stats.malformed += 1;
                    trace!("{}:{line_no}: dropped, {reason}", source.name());
                }
                Err(Rejection::TooShort | Rejection::Comment) => stats.skipped += 1,
            }
        }

        debug!(
            "{}: {} records, {} malformed, {} ports out of range, {} skipped",
            source.name(),
            stats.records,
            stats.malformed,
            stats.out_of_range,
            stats.skipped
        );

        Ok(stats)
    }

    pub fn finish(self) -> MergedServices {
        self.services
    }
}

/// Folds all `sources` in order.
pub fn merge<I>(sources: I, interrupt: &Interrupt) -> Result<MergedServices, MergeError>
where
    I: IntoIterator<Item = Source>,
{
    let mut merger = Merger::new(interrupt.clone());
    for source in sources {
        merger.fold_source(source)?;
    }
    Ok(merger.finish())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
