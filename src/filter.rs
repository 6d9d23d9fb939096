// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A closed-form pre-check for points known to be inside the
//! Mandelbrot set.
//!
//! Points inside the set never escape, so tracing them all the way to
//! the iteration limit is wasted work: they never contribute to the
//! Buddhabrot.  Most of the area of the set lives in the main
//! cardioid and the big period-2 bulb to its left, both of which have
//! exact closed forms.  The three smaller bulbs (period-4 on the real
//! axis, and the two period-3 bulbs above and below the cardioid) are
//! approximated with discs that sit inside them.
//!
//! All tests are strict, so a point sitting exactly on the edge of a
//! region is *not* excluded and will be traced.

use num::Complex;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

#[inline]
fn in_disc(point: Complex<f64>, center: Complex<f64>, radius_sqr: f64) -> bool {
    (point - center).norm_sqr() < radius_sqr
}

/// True if the point is inside the main cardioid.
#[inline]
pub fn in_cardioid(point: Complex<f64>) -> bool {
    let y = point.im * point.im;
    let x = point.re - D4;
    let q = x * x + y;
    q * (q + x) < D4 * y
}

/// True if the point is inside the period-2 bulb centred on -1.
#[inline]
pub fn in_period2_bulb(point: Complex<f64>) -> bool {
    in_disc(point, Complex::new(-1.0, 0.0), D16)
}

/// True if the point is inside the small bulb to the left of the
/// period-2 bulb.
#[inline]
pub fn in_period4_bulb(point: Complex<f64>) -> bool {
    in_disc(point, Complex::new(-1.309, 0.0), 0.00345)
}

/// True if the point is inside either of the bulbs sitting on top of
/// and below the main cardioid.
#[inline]
pub fn in_period3_bulbs(point: Complex<f64>) -> bool {
    in_disc(point, Complex::new(-0.125, 0.744), 0.0088)
        || in_disc(point, Complex::new(-0.125, -0.744), 0.0088)
}

/// Returns true if the point is guaranteed to be inside the Mandelbrot
/// set and need not be traced.  A false result says nothing: the
/// point may still turn out to be inside the set.
pub fn is_excluded(point: Complex<f64>) -> bool {
    in_cardioid(point)
        || in_period2_bulb(point)
        || in_period4_bulb(point)
        || in_period3_bulbs(point)
}
