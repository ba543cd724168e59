use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the collection flow and print the recovery summary
    Simulate {
        /// Model YAML file
        #[arg(short, long)]
        input: String,
        /// Optional output YAML file for the summary
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate the 12-month cash flow
    Cashflow {
        /// Model YAML file
        #[arg(short, long)]
        input: String,
        /// Optional output YAML file for the monthly rows
        #[arg(short, long)]
        output: Option<String>,
        /// Optional output PNG chart of net and cumulative cash flow
        #[arg(short, long)]
        chart: Option<String>,
    },
    /// Generate the full financial report: P&L, metrics and statement
    Report {
        /// Model YAML file
        #[arg(short, long)]
        input: String,
        /// Optional output YAML file for the report
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check a model file for structural problems
    Validate {
        /// Model YAML file
        #[arg(short, long)]
        input: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
