use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rewind_core::config::EditorConfig;
use rewind_core::geometry::Size;
use rewind_core::view::AreaBounds;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs, config: &EditorConfig) -> Result<()> {
    let format = image::ImageFormat::from_path(&args.file).ok();
    let (width, height) = image::image_dimensions(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let size = Size::new(width, height);

    println!("File:        {}", args.file.display());
    match format {
        Some(f) => println!("Format:      {:?}", f),
        None => println!("Format:      unknown"),
    }
    println!("Dimensions:  {}x{}", width, height);

    let rgba_mb = size.area() * 4.0 / (1024.0 * 1024.0);
    println!("RGBA size:   {:.1} MB", rgba_mb);

    let bounds = AreaBounds::from_config(&config.bounds);
    println!("Max zoom:    {:.2}x", bounds.max_scale(size));

    Ok(())
}
