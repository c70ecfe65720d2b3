//! Blur command
//!
//! Applies separable gaussian, full-kernel gaussian or box blur.

use crate::{BlurArgs, BlurKind};
use anyhow::{Context, Result};
use fourier_ops::filter::{box_blur, gaussian_blur, gaussian_blur_naive};
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), kind = ?args.kind, sigma = args.sigma, radius = args.radius, "blur::run");

    let mut image = super::load_image(&args.input)?;
    info!(kind = ?args.kind, sigma = args.sigma, radius = args.radius, %image, "Applying blur");

    if verbose > 0 {
        println!(
            "Applying {:?} blur (sigma={}, radius={}) to {}",
            args.kind,
            args.sigma,
            args.radius,
            args.input.display()
        );
    }

    match args.kind {
        BlurKind::Gaussian => gaussian_blur(&mut image, args.sigma, args.radius)
            .context("Gaussian blur failed")?,
        BlurKind::Naive => gaussian_blur_naive(&mut image, args.sigma, args.radius)
            .context("Gaussian blur failed")?,
        BlurKind::Box => box_blur(&mut image, args.radius).context("Box blur failed")?,
    }

    super::save_image(&args.output, &image, args.quality)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourier_core::{ColorSpace, Image};
    use tempfile::tempdir;

    fn args(dir: &std::path::Path, kind: BlurKind, radius: usize) -> BlurArgs {
        BlurArgs {
            input: dir.join("in.png"),
            output: dir.join("out.png"),
            kind,
            sigma: 1.4,
            radius,
            quality: 90,
        }
    }

    #[test]
    fn test_huge_radius_leaves_image() {
        let dir = tempdir().unwrap();
        let image = Image::filled(4, 4, ColorSpace::Gray, 77.0);
        fourier_io::write(dir.path().join("in.png"), &image).unwrap();

        for kind in [BlurKind::Gaussian, BlurKind::Naive, BlurKind::Box] {
            run(args(dir.path(), kind, 1_000_000_000), 0).unwrap();
            assert_eq!(fourier_io::read(dir.path().join("out.png")).unwrap(), image);
        }
    }

    #[test]
    fn test_overflowing_radius_is_an_error() {
        let dir = tempdir().unwrap();
        fourier_io::write(dir.path().join("in.png"), &Image::new(4, 4, ColorSpace::Gray)).unwrap();

        let err = run(args(dir.path(), BlurKind::Box, usize::MAX), 0).unwrap_err();
        assert!(format!("{:#}", err).contains("too large"));
        assert!(!dir.path().join("out.png").exists());
    }
}
