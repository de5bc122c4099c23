// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all uvgen-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::uvw::UvgenArgsError;
use crate::{
    direction::DirectionError,
    geometry::GeometryError,
    io::{AntennaReadError, UvwWriteError},
    measures::MeasuresError,
    params::UvgenRunError,
    plot::PlotError,
    uvw::UvwError,
};

const ANTENNA_TABLE_HINT: &str = "Antenna tables are whitespace-delimited text, one antenna per line: x y z [dish_diameter station mount], or x y [dish_diameter station mount] with --noup. Lines starting with '#' are ignored.";

const DIRECTION_HINT: &str =
    "Directions look like \"J2000,0deg,-30deg\", \"J2000,0h0m0s,-30d0m0s\" or \"ICRS,1.5rad,-0.5rad\".";

/// The *only* publicly visible error from uvgen. Messages are grouped by what
/// the user needs to look at to fix them.
#[derive(Error, Debug)]
pub enum UvgenError {
    /// An error related to the array's position or the observatory.
    #[error("{0}\n\nSpecify the array position with --lon and --lat (degrees), or a known telescope with --tel. Run `uvgen observatories` to list the known telescopes.")]
    ArrayPosition(String),

    /// An error related to the antenna table.
    #[error("{0}\n\n{ANTENNA_TABLE_HINT}")]
    AntennaTable(String),

    /// An error related to the pointing direction.
    #[error("{0}\n\n{DIRECTION_HINT}")]
    Direction(String),

    /// An error related to the hour-angle track or baselines.
    #[error("{0}")]
    Uvw(String),

    /// An error related to plotting.
    #[error("{0}")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON. Use --save-toml to see what one looks like.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<UvgenArgsError> for UvgenError {
    fn from(e: UvgenArgsError) -> Self {
        let s = e.to_string();
        match e {
            UvgenArgsError::NoAntennas | UvgenArgsError::AntennasDoesntExist(_) => {
                Self::AntennaTable(s)
            }
            UvgenArgsError::NoDirection => Self::Direction(s),
            UvgenArgsError::BadStartTime { .. }
            | UvgenArgsError::NonPositiveSynthesis(_)
            | UvgenArgsError::NonPositiveDtime(_)
            | UvgenArgsError::Dtime(_)
            | UvgenArgsError::NoSystemTime(_) => Self::Generic(s),
        }
    }
}

impl From<UvgenRunError> for UvgenError {
    fn from(e: UvgenRunError) -> Self {
        match e {
            UvgenRunError::Uvw(e) => Self::from(e),
            UvgenRunError::UvwWrite(e) => Self::from(e),
            UvgenRunError::Plot(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<GeometryError> for UvgenError {
    fn from(e: GeometryError) -> Self {
        Self::ArrayPosition(e.to_string())
    }
}

impl From<MeasuresError> for UvgenError {
    fn from(e: MeasuresError) -> Self {
        let s = e.to_string();
        match e {
            MeasuresError::UnknownObservatory(_) => Self::ArrayPosition(s),
            MeasuresError::Sexagesimal { .. } => Self::Direction(s),
        }
    }
}

impl From<DirectionError> for UvgenError {
    fn from(e: DirectionError) -> Self {
        Self::Direction(e.to_string())
    }
}

impl From<AntennaReadError> for UvgenError {
    fn from(e: AntennaReadError) -> Self {
        let s = e.to_string();
        match e {
            AntennaReadError::IO(_) => Self::Generic(s),
            _ => Self::AntennaTable(s),
        }
    }
}

impl From<UvwError> for UvgenError {
    fn from(e: UvwError) -> Self {
        let s = e.to_string();
        match e {
            UvwError::TooFewAntennas(_) => Self::AntennaTable(s),
            UvwError::NonPositiveStep(_)
            | UvwError::NonFinite { .. }
            | UvwError::TooManySamples { .. }
            | UvwError::BackwardsRange { .. }
            | UvwError::EmptyTrack => Self::Uvw(s),
        }
    }
}

impl From<UvwWriteError> for UvgenError {
    fn from(e: UvwWriteError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<PlotError> for UvgenError {
    fn from(e: PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<std::io::Error> for UvgenError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
