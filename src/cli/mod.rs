//! CLI command handling module
//!
//! Argument parsing, settings construction and dispatch to the command
//! implementations.

mod completion;
mod config;
mod logging;
mod version;

pub use completion::{CompletionArgs, write_completion};
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::*;
pub use version::display_version;

use crate::commands::add::{self, AddArgs};
use crate::commands::base::{self, BaseArgs};
use crate::commands::group::{self, GroupArgs};
use crate::commands::image::{self, ImageArgs};
use crate::commands::overlay::{self, OverlayArgs};
use crate::commands::verify;
use crate::config::ConfigLoader;
use crate::settings::Settings;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Scaffold Kustomize bases and overlays for Kubernetes applications
#[derive(Parser, Debug)]
#[command(name = "kustgen", version)]
#[command(about = "Scaffold Kustomize bases and overlays for Kubernetes applications", long_about = None)]
pub struct Cli {
    /// Config file [default: $HOME/.kustgen.yaml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform directory holding the base and overlays [default: platform]
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,

    /// Group overlays in a context directory e.g. usa
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate base kustomization files for an application
    #[command(alias = "init")]
    Base(BaseArgs),
    /// Add an overlay that references the base
    Add(AddArgs),
    /// Create an overlay with config, secrets, replicas and resource patches
    Overlay(OverlayArgs),
    /// Group kustomization folders into one kustomization
    Group(GroupArgs),
    /// Modify an existing overlay
    #[command(alias = "change")]
    Modify {
        #[command(subcommand)]
        subcommand: ModifySubcommand,
    },
    /// Build every kustomization in the platform directory with kustomize
    Verify,
    /// Generate a shell completion script
    Completion(CompletionArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
}

/// Modifications of an existing overlay
#[derive(Subcommand, Debug)]
pub enum ModifySubcommand {
    /// Create an overlay of an existing overlay with a new image
    #[command(alias = "set")]
    Image(ImageArgs),
}

/// Run the parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config,
        directory,
        context,
        command,
        ..
    } = cli;

    let command = match command {
        Command::Config { subcommand } => {
            return handle_config_command(subcommand, config.as_deref());
        }
        Command::Completion(args) => {
            write_completion(args.shell, &mut std::io::stdout());
            return Ok(());
        }
        Command::Version => {
            display_version();
            return Ok(());
        }
        command => command,
    };

    let settings = load_settings(config.as_deref(), directory, context)?;

    match command {
        Command::Base(args) => {
            base::run(&args, &settings)?;
        }
        Command::Add(args) => {
            add::run(&args, &settings)?;
        }
        Command::Overlay(args) => {
            overlay::run(&args, &settings)?;
        }
        Command::Group(args) => {
            group::run(&args)?;
        }
        Command::Modify {
            subcommand: ModifySubcommand::Image(args),
        } => {
            let output = image::run(&args, &settings)?;
            println!("{}", output.display());
        }
        Command::Verify => {
            verify::run(&settings)?;
        }
        Command::Config { .. } | Command::Completion(_) | Command::Version => {}
    }

    Ok(())
}

/// Build the per-invocation settings from the global flags and config file
pub fn load_settings(
    config: Option<&Path>,
    directory: Option<PathBuf>,
    context: Option<String>,
) -> Result<Settings> {
    let loaded = ConfigLoader::load(config)?;
    if let Some(source) = &loaded.source {
        tracing::info!("Using config file: {}", source.display());
    }

    let directory = directory.unwrap_or_else(|| PathBuf::from(&loaded.config.directory));
    let mut settings = Settings::new(directory).with_config(loaded.config);
    if let Some(context) = context {
        settings = settings.with_context(context);
    }
    Ok(settings)
}

/// Usage line of the (possibly nested) subcommand called `name`
pub fn usage_for(name: &str) -> Option<String> {
    let mut cmd = Cli::command();
    cmd.build();
    find_subcommand(&cmd, name).map(|sub| sub.clone().render_usage().to_string())
}

fn find_subcommand<'a>(cmd: &'a clap::Command, name: &str) -> Option<&'a clap::Command> {
    cmd.get_subcommands().find_map(|sub| {
        if sub.get_name() == name {
            Some(sub)
        } else {
            find_subcommand(sub, name)
        }
    })
}
