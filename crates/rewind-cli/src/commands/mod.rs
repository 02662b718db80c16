pub mod config;
pub mod edit;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use rewind_core::config::EditorConfig;

/// Editor settings from `path`, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(p) => EditorConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(EditorConfig::default()),
    }
}
