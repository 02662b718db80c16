use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rewind_core::config::EditorConfig;
use rewind_core::editor::Editor;

use crate::session::Session;
use crate::summary;

#[derive(Args)]
pub struct EditArgs {
    /// Image to open when the session starts
    pub file: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

pub fn run(args: &EditArgs, config: EditorConfig) -> Result<()> {
    let (input, interactive): (Box<dyn io::BufRead>, bool) = match args.script {
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            (Box::new(BufReader::new(file)), false)
        }
        None => (Box::new(BufReader::new(io::stdin())), console::user_attended()),
    };

    let mut session = Session::new(Editor::new(config), input, interactive);
    if let Some(ref path) = args.file {
        session
            .open(path.clone())
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }
    if interactive {
        println!(
            "  {}",
            summary::Styles::new()
                .label
                .apply_to("Type commands (open, rotate, crop, undo, redo, save, status, quit)")
        );
    }

    session.run()
}
