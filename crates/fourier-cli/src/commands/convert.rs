//! Color space and format conversion command.
//!
//! The output format follows the output file extension.

use crate::{ConvertArgs, Target};
use anyhow::Result;
use tracing::{info, trace};

pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let mut image = super::load_image(&args.input)?;
    let from = image.color_space();

    match args.to {
        Some(Target::Rgb) => image.to_rgb(),
        Some(Target::Ycbcr) => image.to_ycbcr(),
        Some(Target::Gray) => image.to_gray(),
        None => {}
    }
    info!(from = %from, to = %image.color_space(), "Converted color space");

    if verbose > 0 {
        println!(
            "Converting {} ({}) -> {} ({})",
            args.input.display(),
            from,
            args.output.display(),
            image.color_space()
        );
    }

    super::save_image(&args.output, &image, args.quality)
}
