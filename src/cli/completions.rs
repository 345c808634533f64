//! Shell completion generation.

use crate::cli::{Cli, CompletionsArgs};
use clap::CommandFactory;

/// Write completions for the requested shell to stdout.
pub fn handle_completions(args: CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
}
