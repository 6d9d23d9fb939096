// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Human-readable progress reports.

use itertools::Itertools;
use std::fmt;

use palette::Channel;
use sampler::Sampler;

/// Formats a count with thousands separators: 1234567 -> "1,234,567".
pub fn comma(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut groups: Vec<&str> = vec![];
    if lead > 0 {
        groups.push(&digits[..lead]);
    }
    groups.extend(
        digits.as_bytes()[lead..]
            .chunks(3)
            .map(|c| ::std::str::from_utf8(c).unwrap_or("")),
    );
    groups.iter().join(",")
}

/// A point-in-time view of a running sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    /// Points traced, escaping or not.
    pub samples: u64,
    /// Orbits plotted.
    pub escaped: u64,
    /// The largest counter in each channel.
    pub hits: [u64; 3],
}

impl Progress {
    /// Read the counters of a sampler.  The maxima are a full scan of
    /// the density matrix.
    pub fn of(sampler: &Sampler) -> Progress {
        let density = sampler.density();
        Progress {
            samples: sampler.samples(),
            escaped: sampler.escaped(),
            hits: [
                density.max(Channel::Red),
                density.max(Channel::Green),
                density.max(Channel::Blue),
            ],
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} samples, {} escaped, hits R={} G={} B={}",
            comma(self.samples),
            comma(self.escaped),
            comma(self.hits[0]),
            comma(self.hits[1]),
            comma(self.hits[2])
        )
    }
}
