//! kustgen - scaffold Kustomize bases and overlays
//!
//! Generates base manifests for an application and derives overlays for
//! environments, image versions and multi-app groupings.

use clap::Parser;
use kustgen::Error;
use kustgen::cli::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging(args.debug);

    match cli::execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(Error::MissingNamespace { command }) = e.downcast_ref::<Error>() {
                if let Some(usage) = cli::usage_for(command) {
                    eprintln!("{}", usage);
                }
            }
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
