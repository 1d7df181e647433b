//! Logger setup.
//!
//! The terminal runs in the alternate screen while playing, so anything
//! written to stderr is lost or garbles the display. Set `log_file` in the
//! config to keep logs.

use crate::config::ArcadeConfig;
use crate::error::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

pub fn init(config: &ArcadeConfig) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(&config.log_filter));
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A second init (tests, embedding) keeps the first logger
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}
