use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lucida_core::io::load_image;

use crate::summary::print_image_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file (PNG, TIFF, ...)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)?;
    print_image_info(&args.file, &image);
    Ok(())
}
