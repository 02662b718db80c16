use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rewind_core::config::EditorConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Save the template here rather than printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Emit the built-in editor settings as a TOML template for `--config`.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let template = toml::to_string_pretty(&EditorConfig::default())
        .context("Failed to serialise editor settings")?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &template)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Editor settings template written to {}", path.display());
        }
        None => print!("{template}"),
    }

    Ok(())
}
