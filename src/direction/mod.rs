// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pointing directions, e.g. "J2000,0h0m0s,-30d0m0s" or "J2000,0deg,-30deg".

mod error;

pub use error::DirectionError;

use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::FRAC_PI_2,
    geometry::wrap_angle,
    measures::{parse_dms_angle, parse_hms_angle},
    unit_parsing::{parse_angle, AngleFormat},
};

/// The reference frames of absolute directions that are supported. There is
/// no support for proper motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DirectionFrame {
    #[strum(serialize = "J2000")]
    J2000,

    #[strum(serialize = "ICRS")]
    Icrs,
}

/// A direction on the sky. All angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingDirection {
    pub frame: DirectionFrame,

    /// Right ascension [radians]. Always within [0, 2π).
    pub ra: f64,

    /// Declination [radians]
    pub dec: f64,
}

impl PointingDirection {
    pub fn new(frame: DirectionFrame, ra: f64, dec: f64) -> Result<Self, DirectionError> {
        if !ra.is_finite() {
            return Err(DirectionError::RaInvalid(ra.to_degrees()));
        }
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&dec) {
            return Err(DirectionError::DecInvalid(dec.to_degrees()));
        }
        Ok(Self {
            frame,
            ra: wrap_angle(ra),
            dec,
        })
    }

    pub fn from_degrees(frame: DirectionFrame, ra: f64, dec: f64) -> Result<Self, DirectionError> {
        Self::new(frame, ra.to_radians(), dec.to_radians())
    }
}

impl std::fmt::Display for PointingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>8.4}° {:>8.4}° ({})",
            self.ra.to_degrees(),
            self.dec.to_degrees(),
            self.frame
        )
    }
}

impl FromStr for PointingDirection {
    type Err = DirectionError;

    /// Parse "<frame>,<RA>,<Dec>". Each angle may be a number with a unit
    /// ("deg", "rad", "h"), a bare number in degrees, or sexagesimal ("0h0m0s"
    /// for RA, "-30d0m0s" for Dec).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        let (frame, ra, dec) = match parts.as_slice() {
            [frame, ra, dec] => (*frame, *ra, *dec),
            _ => return Err(DirectionError::BadFormat(s.to_string())),
        };
        let frame = DirectionFrame::from_str(frame)
            .map_err(|_| DirectionError::UnsupportedFrame(frame.to_string()))?;

        let ra = match parse_angle(ra) {
            Ok(q) => q.to_radians(AngleFormat::Deg),
            Err(_) => parse_hms_angle(ra)?,
        };
        let dec = match parse_angle(dec) {
            Ok(q) => q.to_radians(AngleFormat::Deg),
            Err(_) => parse_dms_angle(dec)?,
        };
        Self::new(frame, ra, dec)
    }
}
