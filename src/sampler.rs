// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Monte-Carlo sampler.  Rather than walking every pixel of the
//! viewport, as the naive renderer did, each worker draws points
//! uniformly at random from the viewport, throws away the ones that
//! are provably inside the set, traces the rest, and plots every
//! orbit that escapes.  Run long enough, the density matrix converges
//! on the Buddhabrot.
//!
//! The `Sampler` is the state every worker shares: the density
//! matrix, the palette, the running counters and the stop flag.
//! Workers only ever hold a reference to it.

use num::Complex;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use density::DensityMatrix;
use filter::is_excluded;
use orbit::Orbit;
use palette::Palette;
use planes::{ComplexPlane, PlaneMapper};
use progress::Progress;

/// What became of a single draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sample {
    /// Inside a known region of the set; not traced.
    Excluded,
    /// Traced, but did not escape within the iteration limit.
    Captive,
    /// Escaped after the given number of steps, and was plotted.
    Escaped(usize),
}

/// Shared state for a pool of sampling workers.
#[derive(Debug)]
pub struct Sampler {
    density: DensityMatrix,
    palette: Palette,
    limit: Option<u64>,
    samples: AtomicU64,
    escaped: AtomicU64,
    halted: AtomicBool,
}

impl Sampler {
    /// A sampler over the given plane with a fresh density matrix.
    pub fn new(plane: PlaneMapper, palette: Palette) -> Sampler {
        Sampler {
            density: DensityMatrix::new(plane),
            palette,
            limit: None,
            samples: AtomicU64::new(0),
            escaped: AtomicU64::new(0),
            halted: AtomicBool::new(false),
        }
    }

    /// Halt on our own once this many samples have been traced.
    pub fn with_limit(mut self, limit: u64) -> Sampler {
        self.limit = Some(limit);
        self
    }

    /// The shared density matrix.
    pub fn density(&self) -> &DensityMatrix {
        &self.density
    }

    /// The palette orbits are plotted with.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The number of points traced so far, escaping or not.
    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }

    /// The number of orbits plotted so far.
    pub fn escaped(&self) -> u64 {
        self.escaped.load(Ordering::Relaxed)
    }

    /// Ask every worker to stop after its current orbit.
    pub fn halt(&self) {
        self.halted.store(true, Ordering::SeqCst);
    }

    /// Whether the workers have been asked to stop.
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// The counters and channel maxima at this moment.
    pub fn progress(&self) -> Progress {
        Progress::of(self)
    }

    /// Process one point: filter it, trace it into the caller's
    /// buffer, and plot it if it escaped.
    pub fn sample(&self, c: Complex<f64>, orbit: &mut Orbit) -> Sample {
        if is_excluded(c) {
            return Sample::Excluded;
        }
        orbit.retrace(c, self.palette.max_iterations());
        let outcome = if orbit.escaped() {
            self.density.accumulate(orbit, &self.palette);
            self.escaped.fetch_add(1, Ordering::Relaxed);
            Sample::Escaped(orbit.escape_length())
        } else {
            Sample::Captive
        };
        let traced = self.samples.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(limit) = self.limit {
            if traced >= limit {
                self.halt();
            }
        }
        outcome
    }

    /// The worker loop.  Draws points uniformly from the viewport
    /// until halted.
    pub fn work<R: Rng + ?Sized>(&self, rng: &mut R) {
        let ComplexPlane(leftlower, rightupper) = self.density.plane().complex_plane;
        let re = Uniform::new(leftlower.re, rightupper.re);
        let im = Uniform::new(leftlower.im, rightupper.im);
        let mut orbit = Orbit::with_capacity(self.palette.max_iterations());
        while !self.is_halted() {
            let c = Complex::new(re.sample(rng), im.sample(rng));
            self.sample(c, &mut orbit);
        }
    }
}
