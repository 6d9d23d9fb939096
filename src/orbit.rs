// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The orbit tracer.  Iterates `z = z * z + c` from zero, keeping
//! every intermediate value of `z`, until either the orbit leaves the
//! radius-2 disc or the iteration limit is hit.

use num::Complex;

/// Squared escape radius.
pub const ESCAPE: f64 = 4.0;

/// The recorded trajectory of a single point.  The buffer is reused
/// from one sample to the next so that a worker allocates only once.
#[derive(Clone, Debug, Default)]
pub struct Orbit {
    positions: Vec<Complex<f64>>,
    escape_length: usize,
    limit: usize,
}

impl Orbit {
    /// An empty orbit with room for `limit` positions.
    pub fn with_capacity(limit: usize) -> Orbit {
        Orbit {
            positions: Vec::with_capacity(limit),
            escape_length: 0,
            limit: 0,
        }
    }

    /// Trace `c` into this orbit, replacing whatever was here before.
    /// Returns the escape length.
    pub fn retrace(&mut self, c: Complex<f64>, limit: usize) -> usize {
        self.positions.clear();
        self.limit = limit;
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        let mut n = 0;
        while n < limit {
            z = z * z + c;
            self.positions.push(z);
            if z.norm_sqr() > ESCAPE {
                break;
            }
            n += 1;
        }
        self.escape_length = n;
        n
    }

    /// The number of steps taken before the orbit escaped, or the
    /// iteration limit if it never did.
    pub fn escape_length(&self) -> usize {
        self.escape_length
    }

    /// The iteration limit this orbit was traced with.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// An orbit is only useful to the Buddhabrot if it escaped.
    pub fn escaped(&self) -> bool {
        self.escape_length < self.limit
    }

    /// Every recorded value of `z`, including the one that escaped.
    pub fn positions(&self) -> &[Complex<f64>] {
        &self.positions
    }

    /// The positions visited while the orbit was still inside the
    /// escape radius.  These are the ones that get plotted.
    pub fn trajectory(&self) -> &[Complex<f64>] {
        &self.positions[..self.escape_length]
    }
}

/// Trace a single point with a fresh buffer.
pub fn trace(c: Complex<f64>, limit: usize) -> Orbit {
    let mut orbit = Orbit::with_capacity(limit);
    orbit.retrace(c, limit);
    orbit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_escape_has_zero_length() {
        let orbit = trace(Complex::new(2.0, 2.0), 100);
        assert_eq!(orbit.escape_length(), 0);
        assert!(orbit.escaped());
        assert_eq!(orbit.positions().len(), 1);
        assert!(orbit.positions()[0].norm_sqr() > ESCAPE);
        assert!(orbit.trajectory().is_empty());
    }

    #[test]
    fn escaping_orbit_ends_outside_the_radius() {
        // 0 -> 1 -> 2 -> 5
        let orbit = trace(Complex::new(1.0, 0.0), 100);
        assert_eq!(orbit.escape_length(), 2);
        assert_eq!(
            orbit.positions(),
            &[
                Complex::new(1.0, 0.0),
                Complex::new(2.0, 0.0),
                Complex::new(5.0, 0.0)
            ]
        );
        assert_eq!(
            orbit.trajectory(),
            &[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)]
        );
    }

    #[test]
    fn captive_orbit_fills_the_limit() {
        let orbit = trace(Complex::new(-1.0, 0.0), 64);
        assert_eq!(orbit.escape_length(), 64);
        assert!(!orbit.escaped());
        assert_eq!(orbit.positions().len(), 64);
        assert!(orbit.positions().iter().all(|z| z.norm_sqr() <= ESCAPE));
    }

    #[test]
    fn escape_length_stays_within_bounds() {
        let limit = 50;
        let mut orbit = Orbit::with_capacity(limit);
        for i in 0..40 {
            for j in 0..40 {
                let c = Complex::new(-2.0 + (i as f64) * 0.1, -2.0 + (j as f64) * 0.1);
                let n = orbit.retrace(c, limit);
                assert!(n <= limit);
                let last = orbit.positions()[orbit.positions().len() - 1];
                if n < limit {
                    assert!(last.norm_sqr() > ESCAPE);
                    assert_eq!(orbit.positions().len(), n + 1);
                } else {
                    assert!(orbit.positions().iter().all(|z| z.norm_sqr() <= ESCAPE));
                }
            }
        }
    }

    #[test]
    fn zero_limit_never_escapes() {
        let orbit = trace(Complex::new(3.0, 0.0), 0);
        assert_eq!(orbit.escape_length(), 0);
        assert!(!orbit.escaped());
        assert!(orbit.positions().is_empty());
    }

    #[test]
    fn retrace_replaces_previous_orbit() {
        let mut orbit = trace(Complex::new(-1.0, 0.0), 32);
        orbit.retrace(Complex::new(2.0, 2.0), 32);
        assert_eq!(orbit.positions().len(), 1);
        assert!(orbit.escaped());
    }
}
