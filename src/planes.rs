// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners of the
//! viewport.
use num::Complex;

use error::BuddhaError;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// The x, y of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps points of the viewport onto pixels of the density matrix.
/// Fixed for the life of a run.
#[derive(Clone, Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // Width and height of the viewport.
    extent: (f64, f64),
}

impl PlaneMapper {
    /// Takes the size of the integral plane and the two corners of
    /// the complex plane.  The corners must be finite and strictly
    /// ordered, and the image must have at least one pixel.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, BuddhaError> {
        if width == 0 || height == 0 {
            return Err(BuddhaError::EmptyImage(width, height));
        }

        if !(leftlower.is_finite() && rightupper.is_finite()) {
            return Err(BuddhaError::Viewport(
                "The corners of the viewport must be finite.",
            ));
        }

        if !(leftlower.re < rightupper.re) {
            return Err(BuddhaError::Viewport(
                "The left lower corner is not to the left of the right upper corner.",
            ));
        }

        if !(leftlower.im < rightupper.im) {
            return Err(BuddhaError::Viewport(
                "The left lower corner is not lower than the right upper corner.",
            ));
        }

        // Corners a long way apart can overflow the subtraction.
        let extent = (rightupper.re - leftlower.re, rightupper.im - leftlower.im);
        if !(extent.0.is_finite() && extent.1.is_finite()) {
            return Err(BuddhaError::Viewport(
                "The viewport is too large to be represented.",
            ));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            extent,
        })
    }

    /// The mapper behind an image `width` pixels wide and `height`
    /// pixels tall.  Rendering stands the plane on its side, so the
    /// real axis is spread over the image's rows and the imaginary
    /// axis over its columns: the integral plane is `height` by
    /// `width`.
    pub fn for_image(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, BuddhaError> {
        PlaneMapper::new(height, width, leftlower, rightupper).map_err(|e| match e {
            BuddhaError::EmptyImage(h, w) => BuddhaError::EmptyImage(w, h),
            e => e,
        })
    }

    /// The conventional [-2, 2] x [-2, 2] viewport.
    pub fn square(width: usize, height: usize) -> Result<PlaneMapper, BuddhaError> {
        PlaneMapper::new(
            width,
            height,
            Complex::new(-2.0, -2.0),
            Complex::new(2.0, 2.0),
        )
    }

    /// Width of the integral plane.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a complex number, find the pixel it falls in.  Points
    /// outside the viewport, including those exactly on its right or
    /// upper edge, have no pixel.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let ComplexPlane(leftlower, _) = self.complex_plane;
        let left = ((point.re - leftlower.re) / self.extent.0 * (self.width() as f64)).floor();
        let top = ((point.im - leftlower.im) / self.extent.1 * (self.height() as f64)).floor();
        if !(left >= 0.0
            && left < (self.width() as f64)
            && top >= 0.0
            && top < (self.height() as f64))
        {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }

    /// The linear offset of a pixel in a row-major buffer.
    #[inline]
    pub fn offset(&self, pixel: Pixel) -> usize {
        pixel.1 * self.width() + pixel.0
    }

    /// Maps a point straight to its offset in the density buffer, if
    /// it lands on the integral plane at all.
    #[inline]
    pub fn point_to_offset(&self, point: &Complex<f64>) -> Option<usize> {
        self.point_to_pixel(point).map(|p| self.offset(p))
    }
}
