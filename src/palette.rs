// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Nebulabrot palette.  Each color channel has its own threshold
//! on escape time: an orbit is plotted into a channel only if it
//! escaped in fewer steps than that channel's threshold.  Short
//! orbits land in every channel, long orbits only in the channels with
//! generous thresholds, and that stratification is where the color
//! comes from.

use std::fmt;
use std::str::FromStr;

use error::BuddhaError;

/// One of the three color channels of the density matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

impl Channel {
    /// All three channels, in pixel order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel inside an RGB(A) pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// Escape-time thresholds for the red, green and blue channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    thresholds: [usize; 3],
}

impl Palette {
    /// A palette with a distinct threshold per channel.
    pub fn new(red: usize, green: usize, blue: usize) -> Palette {
        Palette {
            thresholds: [red, green, blue],
        }
    }

    /// A palette where every channel shares one threshold, which
    /// renders as greyscale.
    pub fn grey(threshold: usize) -> Palette {
        Palette::new(threshold, threshold, threshold)
    }

    /// The threshold for one channel.
    pub fn threshold(&self, channel: Channel) -> usize {
        self.thresholds[channel.index()]
    }

    /// Orbits are traced up to the largest threshold; anything longer
    /// could not be plotted in any channel.
    pub fn max_iterations(&self) -> usize {
        self.thresholds.iter().cloned().max().unwrap_or(0)
    }

    /// Which channels an orbit of the given escape length counts
    /// towards, in channel order.
    #[inline]
    pub fn admits(&self, escape_length: usize) -> [bool; 3] {
        [
            escape_length < self.thresholds[0],
            escape_length < self.thresholds[1],
            escape_length < self.thresholds[2],
        ]
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::new(50, 200, 500)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.thresholds[0], self.thresholds[1], self.thresholds[2]
        )
    }
}

fn parse_component(s: &str, channel: &'static str) -> Result<usize, BuddhaError> {
    usize::from_str(s.trim()).map_err(|_| BuddhaError::PaletteValue(channel, s.to_string()))
}

impl FromStr for Palette {
    type Err = BuddhaError;

    /// Either a single threshold, "40", or three comma-separated
    /// thresholds in red, green, blue order, "50,200,500".
    fn from_str(s: &str) -> Result<Palette, BuddhaError> {
        let components: Vec<&str> = s.split(',').collect();
        match components.len() {
            1 => Ok(Palette::grey(parse_component(components[0], "grey")?)),
            3 => Ok(Palette::new(
                parse_component(components[0], Channel::Red.name())?,
                parse_component(components[1], Channel::Green.name())?,
                parse_component(components[2], Channel::Blue.name())?,
            )),
            n => Err(BuddhaError::PaletteComponents(n)),
        }
    }
}
