//! Sample dump command.

use crate::DumpArgs;
use anyhow::{Context, Result};
use std::fs;

pub fn run(args: DumpArgs, _verbose: u8) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let text = image.dump();
    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write: {}", path.display()))?,
        None => print!("{}", text),
    }
    Ok(())
}
