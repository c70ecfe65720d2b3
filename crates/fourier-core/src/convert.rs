//! Color space conversion.
//!
//! Conversions mutate an [`Image`] in place and are idempotent: converting
//! to the current color space is a no-op. Three targets exist:
//!
//! - [`Image::to_rgb`]
//! - [`Image::to_ycbcr`]
//! - [`Image::to_gray`]
//!
//! # Fast Paths
//!
//! Some transitions only add or remove planes:
//!
//! | From | To | Action |
//! |---|---|---|
//! | RGBX, RGBA | RGB | drop the alpha plane |
//! | GRAY | YCbCr | append zero-filled Cb, Cr |
//! | YCbCr | GRAY | drop Cb, Cr |
//!
//! Everything else goes through the fixed linear coefficients below.
//! CMYK sources pass through RGB on the way to YCbCr or GRAY.
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//!
//! let mut img = Image::new(1, 1, ColorSpace::Rgb);
//! img.set_sample(ChannelKind::Red, 0, 0, 255.0).unwrap();
//! img.to_ycbcr();
//!
//! let y = img.sample(ChannelKind::Intensity, 0, 0).unwrap();
//! assert!((y - 81.5).abs() < 1.0);
//! ```

use crate::{ColorSpace, Image};
use tracing::trace;

// RGB -> YCbCr
const Y_R: f32 = 65.738 / 256.0;
const Y_G: f32 = 129.057 / 256.0;
const Y_B: f32 = 25.064 / 256.0;
const CB_R: f32 = -37.945 / 256.0;
const CB_G: f32 = -74.494 / 256.0;
const CB_B: f32 = 112.439 / 256.0;
const CR_R: f32 = 112.439 / 256.0;
const CR_G: f32 = -94.154 / 256.0;
const CR_B: f32 = -18.285 / 256.0;

// YCbCr -> RGB
const R_Y: f32 = 298.082 / 256.0;
const R_CR: f32 = 408.583 / 256.0;
const R_OFFSET: f32 = -222.921;
const G_CB: f32 = -100.291 / 256.0;
const G_CR: f32 = -208.120 / 256.0;
const G_OFFSET: f32 = 135.576;
const B_CB: f32 = 516.412 / 256.0;
const B_OFFSET: f32 = -276.836;

/// Converts one RGB sample to (Y, Cb, Cr).
#[inline]
pub fn rgb_to_ycbcr(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        Y_R * r + Y_G * g + Y_B * b + 16.0,
        CB_R * r + CB_G * g + CB_B * b + 128.0,
        CR_R * r + CR_G * g + CR_B * b + 128.0,
    )
}

/// Converts one (Y, Cb, Cr) sample to RGB.
#[inline]
pub fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> (f32, f32, f32) {
    let luma = R_Y * y;
    (
        luma + R_CR * cr + R_OFFSET,
        luma + G_CB * cb + G_CR * cr + G_OFFSET,
        luma + B_CB * cb + B_OFFSET,
    )
}

/// Converts one CMYK sample to RGB.
#[inline]
pub fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> (f32, f32, f32) {
    let key = 1.0 - k;
    (
        (1.0 - c) * key / 256.0,
        (1.0 - m) * key / 256.0,
        (1.0 - y) * key / 256.0,
    )
}

/// Expands a luma sample to RGB using only the luma and constant terms.
#[inline]
pub fn gray_to_rgb(y: f32) -> (f32, f32, f32) {
    let luma = R_Y * y;
    (luma + R_OFFSET, luma + G_OFFSET, luma + B_OFFSET)
}

/// Maps three planes through `f` in place.
fn map3<F>(planes: &mut [Vec<f32>], f: F)
where
    F: Fn(f32, f32, f32) -> (f32, f32, f32),
{
    let [a, b, c] = planes else {
        unreachable!("map3 requires exactly three planes, got {}", planes.len());
    };
    for ((a, b), c) in a.iter_mut().zip(b.iter_mut()).zip(c.iter_mut()) {
        (*a, *b, *c) = f(*a, *b, *c);
    }
}

impl Image {
    /// Converts the image to RGB in place.
    ///
    /// RGBX and RGBA lose their alpha plane; CMYK, YCbCr and GRAY are
    /// transformed with the fixed coefficients.
    pub fn to_rgb(&mut self) {
        let from = self.color_space();
        if from == ColorSpace::Rgb {
            return;
        }
        trace!(%from, width = self.width(), height = self.height(), "to_rgb");

        let mut planes = self.take_planes();
        match from {
            ColorSpace::Rgbx | ColorSpace::Rgba => planes.truncate(3),
            ColorSpace::Cmyk => {
                let k = planes.pop().unwrap_or_default();
                for (i, key) in k.into_iter().enumerate() {
                    let (r, g, b) = cmyk_to_rgb(planes[0][i], planes[1][i], planes[2][i], key);
                    planes[0][i] = r;
                    planes[1][i] = g;
                    planes[2][i] = b;
                }
            }
            ColorSpace::YCbCr => map3(&mut planes, ycbcr_to_rgb),
            ColorSpace::Gray => {
                let y = planes.pop().unwrap_or_default();
                let n = y.len();
                let mut rgb = vec![vec![0.0; n]; 3];
                for (i, v) in y.into_iter().enumerate() {
                    let (r, g, b) = gray_to_rgb(v);
                    rgb[0][i] = r;
                    rgb[1][i] = g;
                    rgb[2][i] = b;
                }
                planes = rgb;
            }
            ColorSpace::Rgb => unreachable!("RGB source handled above"),
        }
        self.replace_planes(ColorSpace::Rgb, planes);
    }

    /// Converts the image to YCbCr in place.
    ///
    /// GRAY gains zero-filled chroma planes. Other sources are brought to
    /// RGB first, then transformed.
    pub fn to_ycbcr(&mut self) {
        let from = self.color_space();
        match from {
            ColorSpace::YCbCr => return,
            ColorSpace::Gray => {
                trace!(%from, "to_ycbcr: appending chroma planes");
                let n = self.pixel_count();
                let mut planes = self.take_planes();
                planes.push(vec![0.0; n]);
                planes.push(vec![0.0; n]);
                self.replace_planes(ColorSpace::YCbCr, planes);
                return;
            }
            ColorSpace::Rgbx | ColorSpace::Rgba | ColorSpace::Cmyk => self.to_rgb(),
            ColorSpace::Rgb => {}
        }
        trace!(%from, width = self.width(), height = self.height(), "to_ycbcr");

        debug_assert_eq!(self.color_space(), ColorSpace::Rgb);
        let mut planes = self.take_planes();
        map3(&mut planes, rgb_to_ycbcr);
        self.replace_planes(ColorSpace::YCbCr, planes);
    }

    /// Converts the image to GRAY in place.
    ///
    /// Non-YCbCr sources go through [`Image::to_ycbcr`]; the chroma planes
    /// are then dropped.
    pub fn to_gray(&mut self) {
        match self.color_space() {
            ColorSpace::Gray => return,
            ColorSpace::YCbCr => {}
            _ => self.to_ycbcr(),
        }
        trace!("to_gray: dropping chroma planes");

        let mut planes = self.take_planes();
        planes.truncate(1);
        self.replace_planes(ColorSpace::Gray, planes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChannelKind;
    use approx::assert_abs_diff_eq;

    fn gradient_rgb(w: u32, h: u32) -> Image {
        let mut img = Image::new(w, h, ColorSpace::Rgb);
        for y in 0..h {
            for x in 0..w {
                let r = (x * 255 / w.max(1)) as f32;
                let g = (y * 255 / h.max(1)) as f32;
                let b = ((x + y) * 37 % 256) as f32;
                img.set_sample(ChannelKind::Red, x, y, r).unwrap();
                img.set_sample(ChannelKind::Green, x, y, g).unwrap();
                img.set_sample(ChannelKind::Blue, x, y, b).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_pure_red_to_ycbcr() {
        let mut img = Image::new(1, 1, ColorSpace::Rgb);
        img.set_sample(ChannelKind::Red, 0, 0, 255.0).unwrap();
        img.to_ycbcr();

        assert_eq!(img.color_space(), ColorSpace::YCbCr);
        assert_abs_diff_eq!(img.sample(ChannelKind::Intensity, 0, 0).unwrap(), 81.5, epsilon = 1.0);
        assert_abs_diff_eq!(img.sample(ChannelKind::ChromaBlue, 0, 0).unwrap(), 90.2, epsilon = 1.0);
        assert_abs_diff_eq!(img.sample(ChannelKind::ChromaRed, 0, 0).unwrap(), 240.0, epsilon = 1.0);
    }

    #[test]
    fn test_rgb_ycbcr_roundtrip() {
        let original = gradient_rgb(17, 11);
        let mut img = original.clone();
        img.to_rgb();
        img.to_ycbcr();
        img.to_rgb();

        for kind in ColorSpace::Rgb.channels() {
            let a = original.plane(*kind).unwrap();
            let b = img.plane(*kind).unwrap();
            for (x, y) in a.iter().zip(b) {
                assert_abs_diff_eq!(*x, *y, epsilon = 1.0 / 256.0);
            }
        }
    }

    #[test]
    fn test_conversions_are_idempotent() {
        let mut img = gradient_rgb(4, 4);
        img.to_ycbcr();
        let once = img.clone();
        img.to_ycbcr();
        assert_eq!(img, once);

        img.to_gray();
        let once = img.clone();
        img.to_gray();
        assert_eq!(img, once);
    }

    #[test]
    fn test_alpha_fast_path() {
        for cs in [ColorSpace::Rgba, ColorSpace::Rgbx] {
            let mut img = Image::filled(3, 2, cs, 42.0);
            img.to_rgb();
            assert_eq!(img.color_space(), ColorSpace::Rgb);
            assert_eq!(img.channels(), ColorSpace::Rgb.channels());
            assert!(img.plane(ChannelKind::Red).unwrap().iter().all(|&v| v == 42.0));
        }
    }

    #[test]
    fn test_gray_ycbcr_fast_paths() {
        let mut img = Image::filled(3, 3, ColorSpace::Gray, 100.0);
        img.to_ycbcr();
        assert_eq!(img.color_space(), ColorSpace::YCbCr);
        assert!(img.plane(ChannelKind::Intensity).unwrap().iter().all(|&v| v == 100.0));
        assert!(img.plane(ChannelKind::ChromaBlue).unwrap().iter().all(|&v| v == 0.0));
        assert!(img.plane(ChannelKind::ChromaRed).unwrap().iter().all(|&v| v == 0.0));

        img.to_gray();
        assert_eq!(img.color_space(), ColorSpace::Gray);
        assert!(img.plane(ChannelKind::Intensity).unwrap().iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_gray_to_rgb_uses_channel_constants() {
        let mut img = Image::filled(1, 1, ColorSpace::Gray, 128.0);
        img.to_rgb();
        let luma = 298.082 / 256.0 * 128.0;
        assert_abs_diff_eq!(img.sample(ChannelKind::Red, 0, 0).unwrap(), luma - 222.921, epsilon = 1e-3);
        assert_abs_diff_eq!(img.sample(ChannelKind::Green, 0, 0).unwrap(), luma + 135.576, epsilon = 1e-3);
        assert_abs_diff_eq!(img.sample(ChannelKind::Blue, 0, 0).unwrap(), luma - 276.836, epsilon = 1e-3);
    }

    #[test]
    fn test_cmyk_to_rgb() {
        let mut img = Image::new(1, 1, ColorSpace::Cmyk);
        img.set_sample(ChannelKind::Cyan, 0, 0, 0.5).unwrap();
        img.set_sample(ChannelKind::Black, 0, 0, 0.0).unwrap();
        img.to_rgb();
        assert_eq!(img.color_space(), ColorSpace::Rgb);
        assert_abs_diff_eq!(img.sample(ChannelKind::Red, 0, 0).unwrap(), 0.5 / 256.0, epsilon = 1e-6);
        assert_abs_diff_eq!(img.sample(ChannelKind::Green, 0, 0).unwrap(), 1.0 / 256.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cmyk_to_gray_passes_through_rgb() {
        let mut img = Image::new(2, 2, ColorSpace::Cmyk);
        img.to_gray();
        assert_eq!(img.color_space(), ColorSpace::Gray);
        assert_eq!(img.channels(), &[ChannelKind::Intensity]);
    }

    fn inks(w: u32, h: u32) -> Image {
        let mut img = Image::new(w, h, ColorSpace::Cmyk);
        for (c, (_, plane)) in img.channels_mut().enumerate() {
            for (i, v) in plane.iter_mut().enumerate() {
                *v = ((i * 3 + c * 5) % 11) as f32 / 10.0;
            }
        }
        img
    }

    #[test]
    fn test_cmyk_to_ycbcr_values() {
        let src = inks(4, 3);
        let mut img = src.clone();
        img.to_ycbcr();
        assert_eq!(img.color_space(), ColorSpace::YCbCr);

        for i in 0..src.pixel_count() {
            let [c, m, y, k] = [ChannelKind::Cyan, ChannelKind::Magenta, ChannelKind::Yellow, ChannelKind::Black]
                .map(|kind| src.plane(kind).unwrap()[i]);
            let (r, g, b) = cmyk_to_rgb(c, m, y, k);
            let (ey, ecb, ecr) = rgb_to_ycbcr(r, g, b);
            assert_abs_diff_eq!(img.plane(ChannelKind::Intensity).unwrap()[i], ey, epsilon = 1e-4);
            assert_abs_diff_eq!(img.plane(ChannelKind::ChromaBlue).unwrap()[i], ecb, epsilon = 1e-4);
            assert_abs_diff_eq!(img.plane(ChannelKind::ChromaRed).unwrap()[i], ecr, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_cmyk_to_gray_values() {
        let mut img = Image::new(1, 1, ColorSpace::Cmyk);
        img.set_sample(ChannelKind::Cyan, 0, 0, 0.2).unwrap();
        img.set_sample(ChannelKind::Magenta, 0, 0, 0.4).unwrap();
        img.set_sample(ChannelKind::Yellow, 0, 0, 0.6).unwrap();
        img.set_sample(ChannelKind::Black, 0, 0, 0.1).unwrap();
        img.to_gray();

        let key: f32 = 1.0 - 0.1;
        let expected = 65.738 / 256.0 * (0.8 * key / 256.0)
            + 129.057 / 256.0 * (0.6 * key / 256.0)
            + 25.064 / 256.0 * (0.4 * key / 256.0)
            + 16.0;
        assert_abs_diff_eq!(img.sample(ChannelKind::Intensity, 0, 0).unwrap(), expected, epsilon = 1e-4);

        let mut many = inks(3, 3);
        let src = many.clone();
        many.to_gray();
        for i in 0..src.pixel_count() {
            let [c, m, y, k] = [ChannelKind::Cyan, ChannelKind::Magenta, ChannelKind::Yellow, ChannelKind::Black]
                .map(|kind| src.plane(kind).unwrap()[i]);
            let (r, g, b) = cmyk_to_rgb(c, m, y, k);
            assert_abs_diff_eq!(many.plane(ChannelKind::Intensity).unwrap()[i], rgb_to_ycbcr(r, g, b).0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_alpha_ignored_by_ycbcr() {
        for cs in [ColorSpace::Rgba, ColorSpace::Rgbx] {
            let mut img = Image::new(2, 1, cs);
            for (kind, values) in [
                (ChannelKind::Red, [200.0, 10.0]),
                (ChannelKind::Green, [100.0, 20.0]),
                (ChannelKind::Blue, [50.0, 30.0]),
            ] {
                img.plane_mut(kind).unwrap().copy_from_slice(&values);
            }
            let alpha = if cs == ColorSpace::Rgba { ChannelKind::Alpha } else { ChannelKind::AlphaIgnored };
            img.plane_mut(alpha).unwrap().copy_from_slice(&[255.0, 0.0]);

            img.to_ycbcr();
            assert_eq!(img.color_space(), ColorSpace::YCbCr);
            assert_eq!(img.channels(), ColorSpace::YCbCr.channels());

            for (i, (r, g, b)) in [(200.0, 100.0, 50.0), (10.0, 20.0, 30.0)].into_iter().enumerate() {
                let (y, cb, cr) = rgb_to_ycbcr(r, g, b);
                assert_abs_diff_eq!(img.plane(ChannelKind::Intensity).unwrap()[i], y, epsilon = 1e-4);
                assert_abs_diff_eq!(img.plane(ChannelKind::ChromaBlue).unwrap()[i], cb, epsilon = 1e-4);
                assert_abs_diff_eq!(img.plane(ChannelKind::ChromaRed).unwrap()[i], cr, epsilon = 1e-4);
            }
        }
    }
}
