use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

use crate::cli::Cli;

pub fn write(shell: Shell, out: &mut dyn Write) {
    // the shorthand form would otherwise offer every word as a subcommand
    let mut cmd = Cli::command().allow_external_subcommands(false);
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
