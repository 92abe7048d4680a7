use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "samurai", about = concat!("samurai v", env!("CARGO_PKG_VERSION"), " - modal task list editor"), version)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// JSON file holding the tasks
    #[arg(short = 'd', long = "data-file")]
    pub data_file: Option<PathBuf>,

    /// Write logs here (filter with SAMURAI_LOG)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Filter tokens: +tag, -tag, project:NAME, priority:H, status:S, or text
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub filters: Vec<String>,
}
