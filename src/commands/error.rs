use clap::{Args, Subcommand};
use serde::Serialize;

use helperkit::error::codes;
use helperkit::error::help::{self, ErrorHelp, ErrorHelpSummary};
use helperkit::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    command: ErrorCommand,
}

#[derive(Subcommand)]
enum ErrorCommand {
    /// List every error code with a one-line summary
    List,
    /// Show the details schema and hints for one code
    Explain {
        /// Dotted code, e.g. arithmetic.division_by_zero
        code: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorOutput {
    List { codes: Vec<ErrorHelpSummary> },
    Explain(ErrorHelp),
}

pub fn run(args: ErrorArgs) -> CmdResult<ErrorOutput> {
    match args.command {
        ErrorCommand::List => Ok((ErrorOutput::List { codes: help::list() }, 0)),
        ErrorCommand::Explain { code } => {
            let parsed =
                codes::parse_code(&code).ok_or_else(|| Error::validation_unknown_error_code(&code))?;
            Ok((ErrorOutput::Explain(help::explain(parsed)), 0))
        }
    }
}
