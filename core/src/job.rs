//! One complete run: open every input, merge, render, write.

use chrono::{DateTime, Local, TimeZone};
use svcmerge_common::config::Config;
use svcmerge_common::MergeError;
use svcmerge_common::interrupt::Interrupt;
use tracing::{debug, warn};

use crate::io::{InputSpec, OutputSpec, Source};
use crate::merge::{Merger, SourceStats};
use crate::render;

#[derive(Debug, Clone)]
pub struct MergeJob {
    pub inputs: Vec<InputSpec>,
    pub output: OutputSpec,
}

/// What a finished run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub destination: String,
    pub sources: usize,
    pub lines_read: usize,
    pub records: usize,
    pub dropped: usize,
}

impl MergeSummary {
    fn add(&mut self, stats: SourceStats) {
        self.sources += 1;
        self.lines_read += stats.lines();
        self.dropped += stats.dropped();
    }
}

impl MergeJob {
    pub fn new(inputs: Vec<InputSpec>, output: OutputSpec) -> Self {
        Self { inputs, output }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let mut inputs: Vec<InputSpec> = cfg
            .inputs
            .iter()
            .map(|name| InputSpec::from(name.as_str()))
            .collect();
        if inputs.is_empty() {
            inputs.push(InputSpec::Stdin);
        }

        let output = OutputSpec::from(cfg.output.as_str());
        Self::new(inputs, output)
    }

    pub fn run(&self, interrupt: &Interrupt) -> Result<MergeSummary, MergeError> {
        self.run_at(&Local::now(), interrupt)
    }

    /// Same as [`MergeJob::run`] with a fixed header timestamp.
    pub fn run_at<Tz>(
        &self,
        generated_at: &DateTime<Tz>,
        interrupt: &Interrupt,
    ) -> Result<MergeSummary, MergeError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.output.validate()?;

        // Open everything first so a bad name fails before stdin is consumed.
        let sources: Vec<Source> = self
            .inputs
            .iter()
            .map(InputSpec::open)
            .collect::<Result<_, _>>()?;

        let mut summary = MergeSummary {
            destination: self.output.to_string(),
            ..MergeSummary::default()
        };
        let mut merger = Merger::new(interrupt.clone());
        for source in sources {
            summary.add(merger.fold_source(source)?);
        }
        let services = merger.finish();
        summary.records = services.len();

        let destination: &str = &summary.destination;
        let lines: Vec<String> =
            render::render(&services, destination, services.sources(), generated_at);
        debug!("Rendered {} lines for {destination}", lines.len());

        self.output.write_lines(&lines, interrupt)?;
        if summary.dropped > 0 {
            warn!("Dropped {} unusable lines", summary.dropped);
        }
        debug!(
            "Wrote {} services from {} sources to {destination}",
            summary.records, summary.sources
        );

        Ok(summary)
    }
}
