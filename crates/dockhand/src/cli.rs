// SPDX-License-Identifier: Apache-2.0
//! `cli` defines the argument surface of the `dockhand` binary.
//!
//! Boundary: this module parses user input and nothing else. Command
//! execution lives in `main`, analysis semantics in `dockhand-core`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub(crate) fn run() -> i32 {
    let cli = Cli::parse();
    crate::run_command(cli)
}

#[derive(Parser, Debug)]
#[command(name = "dockhand", version, disable_help_subcommand = true)]
#[command(about = "Dockerfile optimization advisor")]
pub struct Cli {
    /// Suppress report output on stdout and stderr.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
    /// Trace every check verdict to stderr.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a Dockerfile and report optimization suggestions.
    Analyze {
        /// Path to the Dockerfile, or `-` to read it from stdin.
        #[arg(default_value = "Dockerfile")]
        dockerfile: PathBuf,
        /// Build-context root that COPY sources resolve against.
        #[arg(long)]
        context: Option<PathBuf>,
        /// Exit nonzero when any suggestion triggers.
        #[arg(long, default_value_t = false)]
        strict: bool,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Summarize layer sizes from image history JSON.
    Layers {
        /// Path to a JSON array of layer records, or `-` for stdin.
        history: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Inspect the check catalog.
    Check {
        #[command(subcommand)]
        command: CheckCommand,
    },
    /// Print the JSON description of a report payload.
    Schema {
        #[arg(long, value_enum, default_value_t = ReportArg::Analysis)]
        report: ReportArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// List every check with its id, name, kind, and title.
    List {
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show one check in full, including its suggestion message.
    Explain {
        check_id: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Jsonl,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportArg {
    Analysis,
    Size,
}
