// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UvwError {
    #[error("The hour-angle step must be positive, but got {0} rad")]
    NonPositiveStep(f64),

    #[error("The hour-angle {name} must be finite, but got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("The hour-angle track would have {num_samples} samples, but at most {max} are allowed; use a shorter synthesis or a longer integration time")]
    TooManySamples { num_samples: f64, max: usize },

    #[error("The hour-angle range ends ({end} rad) before it starts ({start} rad)")]
    BackwardsRange { start: f64, end: f64 },

    #[error("The hour-angle track has no samples")]
    EmptyTrack,

    #[error("At least 2 antennas are needed to form a baseline, but got {0}")]
    TooFewAntennas(usize),
}
