use std::error::Error;
use std::fs::File;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::config::LogConfig;

/// Installs a terminal logger, plus a file logger when configured.
pub fn init(cfg: &LogConfig) -> Result<(), Box<dyn Error>> {
    let level: LevelFilter = cfg
        .level
        .parse()
        .map_err(|_| format!("unknown log level `{}`", cfg.level))?;
    let config = simplelog::Config::default();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &cfg.file {
        loggers.push(WriteLogger::new(level, config, File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
