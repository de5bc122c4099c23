// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading an antenna table.
#[derive(Error, Debug)]
pub enum AntennaReadError {
    #[error("Antenna table line {line_num}: Expected at least {expected} columns, but got {got}")]
    TooFewColumns {
        line_num: u32,
        expected: usize,
        got: usize,
    },

    #[error("Antenna table line {line_num}: Could not parse '{string}' as a number")]
    ParseFloat { line_num: u32, string: String },

    #[error("Antenna table line {line_num}: Got {got} metadata columns; if any are given, all of dish diameter, station and mount must be")]
    IncompleteMetadata { line_num: u32, got: usize },

    #[error("Antenna table line {line_num}: Got {got} columns, but expected {num_position_columns} position columns followed by at most 3 metadata columns (is --noup correct?)")]
    TooManyColumns {
        line_num: u32,
        num_position_columns: usize,
        got: usize,
    },

    #[error("Antenna table line {line_num}: Some antennas have metadata columns and some don't")]
    InconsistentMetadata { line_num: u32 },

    #[error("Antenna table line {line_num}: Latitude {lat}° is out of range (-90° <= lat <= 90°)")]
    LatitudeInvalid { line_num: u32, lat: f64 },

    #[error("The antenna table doesn't contain any antennas")]
    Empty,

    #[error("Unknown antenna coordinate system '{0}'. Supported systems are: itrf, enu, wgs84")]
    UnknownCoordSys(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}
