// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.
//!
//! Anything that a user gives us as a string (e.g. "10s", "-30deg") is turned
//! into a [`Quantity`] here, once. Everything downstream works with plain
//! SI-ish values (seconds, radians).

mod error;

pub use error::UnitParseError;

use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::constants::PI;

/// A magnitude with the unit it was specified in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
pub enum TimeFormat {
    /// Seconds
    S,

    /// Milliseconds
    Ms,

    /// Minutes
    Min,

    /// Hours
    H,

    NoUnit,
}

impl Quantity<TimeFormat> {
    /// Get this time in seconds. If there was no unit attached, the value is
    /// assumed to be in `default` units.
    pub fn to_seconds(self, default: TimeFormat) -> f64 {
        let unit = match self.unit {
            TimeFormat::NoUnit => default,
            u => u,
        };
        match unit {
            TimeFormat::S | TimeFormat::NoUnit => self.value,
            TimeFormat::Ms => self.value / 1e3,
            TimeFormat::Min => self.value * 60.0,
            TimeFormat::H => self.value * 3600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
pub enum AngleFormat {
    /// Degrees
    Deg,

    /// Radians
    Rad,

    /// Hours (15 degrees per hour)
    H,

    NoUnit,
}

impl Quantity<AngleFormat> {
    /// Get this angle in radians. If there was no unit attached, the value is
    /// assumed to be in `default` units.
    pub fn to_radians(self, default: AngleFormat) -> f64 {
        let unit = match self.unit {
            AngleFormat::NoUnit => default,
            u => u,
        };
        match unit {
            AngleFormat::Deg => self.value.to_radians(),
            AngleFormat::Rad | AngleFormat::NoUnit => self.value,
            AngleFormat::H => self.value * PI / 12.0,
        }
    }
}

/// Parse a string that may have a unit of time attached to it.
pub fn parse_time(s: &str) -> Result<Quantity<TimeFormat>, UnitParseError> {
    parse_with_unit(s, TimeFormat::NoUnit, "time")
}

/// Parse a string that may have a unit of angle attached to it.
pub fn parse_angle(s: &str) -> Result<Quantity<AngleFormat>, UnitParseError> {
    parse_with_unit(s, AngleFormat::NoUnit, "angle")
}

fn parse_with_unit<U>(
    s: &str,
    no_unit: U,
    unit_type: &'static str,
) -> Result<Quantity<U>, UnitParseError>
where
    U: IntoEnumIterator + Into<&'static str> + FromStr + PartialEq + Copy,
{
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(value) = maybe_number {
        return Ok(Quantity {
            value,
            unit: no_unit,
        });
    };

    // That didn't work; let's search over our supported formats.
    let suffix = s
        .trim()
        .trim_start_matches(|c| char::is_numeric(c) || c == '.' || c == '-' || c == '+')
        .trim();
    for unit in U::iter().filter(|&u| u != no_unit) {
        let unit_str: &'static str = unit.into();
        if suffix.to_uppercase() == unit_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let value: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotUnitButCantParse {
                        input: s.to_string(),
                        unit: unit_str,
                    })
                }
            };
            return Ok(Quantity { value, unit });
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type,
    })
}
