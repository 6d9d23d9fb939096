// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The errors the sampler can report.  Everything here is fatal and
//! happens before sampling starts, with the exception of a worker
//! panic, which can only be reported after the pool has wound down.

/// Errors raised while configuring or running the sampler.
#[derive(Debug, Fail, PartialEq)]
pub enum BuddhaError {
    /// The palette had neither one nor three components.
    #[fail(
        display = "Color palette must have either 1 or 3 components, got: {}",
        _0
    )]
    PaletteComponents(usize),

    /// A palette component was not a non-negative integer.
    #[fail(display = "Invalid {} color component: {:?}", _0, _1)]
    PaletteValue(&'static str, String),

    /// The corners of the complex plane are not left-lower and
    /// right-upper.
    #[fail(display = "{}", _0)]
    Viewport(&'static str),

    /// The integral plane has no pixels in it.
    #[fail(display = "Image must be at least one pixel wide and high, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// One of the sampling threads died.
    #[fail(display = "A sampling worker panicked")]
    WorkerPanicked,
}
