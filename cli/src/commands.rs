pub mod merge;

use clap::{ArgAction, Parser};
use svcmerge_common::config::Config;

#[derive(Parser)]
#[command(name = "svcmerge", version)]
#[command(about = "Merge services(5) files into one sorted, deduplicated file.")]
#[command(
    long_about = "Merge services(5) files into one sorted, deduplicated file.\n\n\
    Inputs are read in the order given. When several lines share a port and \
    protocol, the last one names the service and the names it replaces are kept \
    as aliases."
)]
pub struct CommandLine {
    /// Files to merge, later ones take precedence (`-` reads standard input)
    #[arg(value_name = "FILE", default_value = "-")]
    pub inputs: Vec<String>,

    /// Where to write the merged file (`-` writes standard output)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Show less output, repeat to only show errors
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Show more output, repeat to list every dropped line
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Print copyright information and exit
    #[arg(long)]
    pub copyright: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> Config {
        Config {
            inputs: self.inputs,
            output: self.output,
            quiet: self.quiet,
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }
}
