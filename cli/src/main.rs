mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, merge};
use svcmerge_common::MergeError;
use svcmerge_common::config::Config;
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if commands.copyright {
        print::copyright();
        return ExitCode::SUCCESS;
    }

    let cfg: Config = commands.into_config();
    logging::init_logging(&cfg);

    match merge::merge(&cfg).await {
        Ok(summary) => {
            print::summary(&summary, &cfg);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let interrupted = err
                .downcast_ref::<MergeError>()
                .is_some_and(MergeError::is_silent);
            if !interrupted {
                error!("{err:#}");
            }
            // The merge worker may still be parked on a blocking read.
            std::process::exit(1);
        }
    }
}
