// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns the density matrix into an image.
//!
//! Each channel is normalised on its own against its own maximum, so
//! brightness is relative: two renders taken at different sample
//! counts, or two channels with very different thresholds, are not
//! comparable.  A channel that has no hits at all renders black.
//!
//! The raster is the transpose of the density matrix: the real axis
//! runs down the image and the imaginary axis across it, which stands
//! the Buddha upright.  A density matrix that is `width` by `height`
//! therefore renders as an image `height` pixels wide and `width`
//! pixels tall; build the matrix with `PlaneMapper::for_image` to get
//! an image of a given size.

use num::clamp;

use density::DensityMatrix;
use palette::Channel;

/// Bytes per pixel: red, green, blue, alpha.
pub const DEPTH: usize = 4;

/// An RGBA image, row-major, fully opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// A black, opaque image.
    pub fn black(width: usize, height: usize) -> Raster {
        let mut pixels = vec![0 as u8; width * height * DEPTH];
        for pixel in pixels.chunks_mut(DEPTH) {
            pixel[DEPTH - 1] = 255;
        }
        Raster {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// The image with the alpha channel dropped.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks(DEPTH)
            .flat_map(|p| p[..3].iter().cloned())
            .collect()
    }

    /// The RGBA value at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let o = (y * self.width + x) * DEPTH;
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }
}

/// Maps a counter onto 0..=255 given its channel's scale factor.
#[inline]
fn shade(value: u64, scale: f64) -> u8 {
    clamp((value as f64 * scale).floor(), 0.0, 255.0) as u8
}

/// The factor that takes a channel's maximum to full brightness, or
/// zero if the channel is empty.
pub fn scale(max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        255.0 / (max as f64)
    }
}

/// Snapshot the density matrix into an image.  Nothing is cached;
/// every call rescans and renormalises all three channels.
pub fn render(density: &DensityMatrix) -> Raster {
    let (width, height) = (density.plane().width(), density.plane().height());
    let mut raster = Raster::black(height, width);

    for channel in Channel::ALL.iter() {
        let counts = density.snapshot(*channel);
        let factor = scale(counts.iter().cloned().max().unwrap_or(0));
        if factor == 0.0 {
            continue;
        }
        let band = channel.index();
        // Raster row r, column c comes from matrix column r, row c.
        for (i, (r, c)) in iproduct!(0..width, 0..height).enumerate() {
            raster.pixels[i * DEPTH + band] = shade(counts[c * width + r], factor);
        }
    }
    raster
}
