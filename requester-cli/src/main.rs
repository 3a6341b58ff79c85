use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "requester", version, about = "Run chained API requests from a config file")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Logs are opt-in through `RUST_LOG`; user-facing messages go through the event sink.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Endpoints { path, all, output } => {
            cmd::endpoints::endpoints_cmd(&path, all, output).await
        }
        Command::Plan {
            path,
            endpoint,
            output,
        } => cmd::plan::plan_cmd(&path, &endpoint, output).await,
        Command::Run {
            path,
            endpoint,
            set_inputs,
            files,
            output,
        } => cmd::run::run_cmd(&path, endpoint.as_deref(), &set_inputs, files, output).await,
    }
}
