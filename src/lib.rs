#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Nebulabrot sampler
//!
//! The Buddhabrot (and the Nebulabrot) are variants of the Mandelbrot
//! set that explore "what's in the black heart" of the Mandelbrot.
//! The Mandelbrot takes a point on the complex plane and repeatedly
//! multiplies it by itself, measuring how quickly that number goes to
//! infinity.
//!
//! Each iteration creates a new complex number that itself may be
//! used as a coordinate on the complex plane.  By mapping that
//! coordinate to the nearest integral pixel and incrementing that
//! pixel by one, we can plot the "orbit" of every point that
//! eventually escapes.  Do that for enough random points and the
//! accumulated density is the Buddhabrot.
//!
//! The Nebulabrot keeps three of those densities at once, one per
//! color channel, each admitting only orbits that escaped faster than
//! that channel's threshold.
//!
//! The pieces, leaves first:
//!
//! * [`filter`](filter/index.html) skips points known to be inside
//!   the set,
//! * [`orbit`](orbit/index.html) traces a point until it escapes,
//! * [`density`](density/index.html) plots orbits into a shared,
//!   lock-free, three-channel histogram,
//! * [`sampler`](sampler/index.html) and [`pool`](pool/index.html)
//!   run many random-sampling workers against that histogram,
//! * [`render`](render/index.html) and [`export`](export/index.html)
//!   turn it into an image.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate rand;
extern crate tempfile;

pub mod density;
pub mod error;
pub mod export;
pub mod filter;
pub mod orbit;
pub mod palette;
pub mod planes;
pub mod pool;
pub mod progress;
pub mod render;
pub mod sampler;

pub use density::DensityMatrix;
pub use error::BuddhaError;
pub use export::write_image;
pub use filter::is_excluded;
pub use orbit::{trace, Orbit};
pub use palette::{Channel, Palette};
pub use planes::PlaneMapper;
pub use pool::{PoolConfig, Stopped};
pub use progress::Progress;
pub use render::{render, Raster};
pub use sampler::Sampler;
