// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `uvgen` should do as many
calculations as possible in double precision before converting to a lower
precision, if it is ever required.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The number of seconds in a solar day.
pub const SOLAR_DAY_SECONDS: f64 = 86400.0;

/// The number of seconds in a sidereal day.
pub const SIDEREAL_DAY_SECONDS: f64 = 86164.0905;

/// The rate at which the hour angle of a fixed direction on the sky increases
/// [radians per second].
pub const SIDEREAL_RATE_RAD_PER_SEC: f64 = TAU / SIDEREAL_DAY_SECONDS;

/// The MJD of the Dublin Julian Day epoch (1899 December 31, 12h UT).
pub const DJD_EPOCH_MJD: f64 = 15019.5;

/// If the LST at the first transit guess differs from the right ascension by
/// more than this fraction, the transit correction is applied the other way.
pub const TRANSIT_RESIDUAL_TOLERANCE: f64 = 0.05;

/// The most hour-angle samples a track may have. Ten million samples is a
/// year of 3-second integrations.
pub const MAX_HOUR_ANGLE_SAMPLES: usize = 10_000_000;

/// The default synthesis time [hours].
pub const DEFAULT_SYNTHESIS_HOURS: f64 = 4.0;

/// The default integration time [seconds].
pub const DEFAULT_DTIME_SECONDS: f64 = 10.0;

/// The default file that (u,v,w) samples are written to.
pub const DEFAULT_OUTPUT_FILENAME: &str = "uvgen.txt";
