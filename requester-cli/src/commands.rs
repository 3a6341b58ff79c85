use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and validate a configuration file.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the endpoints a user can pick.
    Endpoints {
        path: PathBuf,
        /// Include hidden endpoints.
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show which endpoints run, and in which order, to satisfy one endpoint.
    Plan {
        path: PathBuf,
        endpoint: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run an endpoint and its producers, prompting for inputs on stdin.
    Run {
        path: PathBuf,
        /// Endpoint to run; without it an interactive selection loop starts.
        endpoint: Option<String>,
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set_inputs: Vec<String>,
        #[command(flatten)]
        files: FileArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
