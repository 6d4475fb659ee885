//! Shell completion scripts

use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};
use std::io::Write;

use super::Cli;

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CompletionArgs {
    /// Type of shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
