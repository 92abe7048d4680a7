use crate::cli::commands::Cli;
use crate::io::config_io::{self, read_config};
use crate::io::log::init_file_logging;
use crate::model::Config;
use crate::store::JsonFileStore;

/// Merge command-line overrides into the file configuration
pub fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match cli.config.clone().or_else(config_io::default_config_path) {
        Some(path) => read_config(&path)?,
        None => Config::default(),
    };
    if cli.data_file.is_some() {
        config.data_file = cli.data_file.clone();
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    if !cli.filters.is_empty() {
        config.filters = cli.filters.clone();
    }
    Ok(config)
}

/// Load configuration, open the task file, and run the TUI until quit
pub fn launch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&cli)?;
    init_file_logging(config.log_file.as_deref())?;

    let data_file = config
        .data_file
        .clone()
        .unwrap_or_else(config_io::default_data_file);
    tracing::info!(data_file = %data_file.display(), filters = ?config.filters, "starting");
    let store = JsonFileStore::open(data_file)?;
    crate::tui::run(Box::new(store), &config)
}
