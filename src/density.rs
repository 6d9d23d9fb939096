// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The density matrix: three per-pixel visit counters, one for each
//! color channel, shared by every sampling worker.
//!
//! Each cell is an atomic counter, and the only write operation is an
//! increment, so workers never need a lock and never need a
//! consistent view of more than one cell.  Readers see each cell at
//! whatever generation it happened to be at when it was loaded; that
//! can only change the normalisation of a single render, never the
//! counts themselves, which only go up.

use std::sync::atomic::{AtomicU64, Ordering};

use orbit::Orbit;
use palette::{Channel, Palette};
use planes::{Pixel, PlaneMapper};

/// Three channels of per-pixel counters over one integral plane.
#[derive(Debug)]
pub struct DensityMatrix {
    plane: PlaneMapper,
    channels: [Vec<AtomicU64>; 3],
}

fn counters(len: usize) -> Vec<AtomicU64> {
    (0..len).map(|_| AtomicU64::new(0)).collect()
}

impl DensityMatrix {
    /// An all-zero matrix the size of the mapper's integral plane.
    pub fn new(plane: PlaneMapper) -> DensityMatrix {
        let len = plane.len();
        DensityMatrix {
            plane,
            channels: [counters(len), counters(len), counters(len)],
        }
    }

    /// The mapping between the viewport and the matrix.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Plot the trajectory of an escaping orbit; orbits that never
    /// escaped are ignored.  Every position that falls on
    /// the integral plane increments each channel whose threshold is
    /// above the orbit's escape length.  Positions off the plane are
    /// skipped.
    pub fn accumulate(&self, orbit: &Orbit, palette: &Palette) {
        if !orbit.escaped() {
            return;
        }
        let admits = palette.admits(orbit.escape_length());
        if !(admits[0] || admits[1] || admits[2]) {
            return;
        }
        for z in orbit.trajectory() {
            if let Some(offset) = self.plane.point_to_offset(z) {
                for (channel, admitted) in self.channels.iter().zip(admits.iter()) {
                    if *admitted {
                        channel[offset].fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }
    }

    /// The current count for one pixel in one channel.
    pub fn count(&self, channel: Channel, pixel: Pixel) -> u64 {
        self.channels[channel.index()][self.plane.offset(pixel)].load(Ordering::Relaxed)
    }

    /// The largest count currently in a channel.  A full scan.
    pub fn max(&self, channel: Channel) -> u64 {
        self.channels[channel.index()]
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .max()
            .unwrap_or(0)
    }

    /// A copy of one channel's counters, row-major.
    pub fn snapshot(&self, channel: Channel) -> Vec<u64> {
        self.channels[channel.index()]
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }
}
