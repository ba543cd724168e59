mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::cashflow_cmd::cashflow_command;
use crate::commands::report_cmd::report_command;
use crate::commands::simulate_cmd::simulate_command;
use crate::commands::validate_cmd::validate_command;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::Cashflow { .. } => cashflow_command(cmd),
        cmd @ Commands::Report { .. } => report_command(cmd),
        cmd @ Commands::Validate { .. } => validate_command(cmd),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut CliArgs::command(),
                "debtcast",
                &mut std::io::stdout(),
            );
        }
    }
}
