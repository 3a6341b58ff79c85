use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FileArgs {
    /// Where delivered file outputs are copied.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Parent of the per-session scratch directory.
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}
