//! Edge detection command.
//!
//! Output is a GRAY image with strong edges at 255 and weak edges at 127.5
//! (stored as 128 in 8-bit files).

use crate::EdgesArgs;
use anyhow::{Context, Result};
use fourier_ops::edge::{canny_edge_detect, EdgeParams};
use tracing::{debug, trace};

pub fn run(args: EdgesArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "edges::run");

    let params = EdgeParams::default()
        .with_blur_sigma(args.sigma)
        .with_blur_radius(args.radius)
        .with_upper_threshold(args.upper)
        .with_lower_threshold(args.lower);
    params.validate().context("Invalid edge parameters")?;

    let mut image = super::load_image(&args.input)?;
    if verbose > 0 {
        println!("Detecting edges in {} ({})", args.input.display(), image);
    }

    canny_edge_detect(&mut image, &params).context("Edge detection failed")?;

    let strong = image.planes().flat_map(|(_, p)| p.iter()).filter(|&&v| v == 255.0).count();
    debug!(strong, "Edge pixels");
    if verbose > 0 {
        println!("  Strong edge pixels: {}", strong);
    }

    super::save_image(&args.output, &image, args.quality)
}
