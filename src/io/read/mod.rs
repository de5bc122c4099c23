// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of ASCII antenna tables.
//!
//! Antenna tables are whitespace-delimited text. Lines starting with `#` and
//! blank lines are ignored. Every other line is an antenna:
//!
//! ```text
//! x y z [dish_diameter station mount]
//! ```
//!
//! where the position columns are interpreted according to an
//! [`AntennaCoordSys`]. A "no up" table has no third position column:
//!
//! ```text
//! x y [dish_diameter station mount]
//! ```
//!
//! and its third position coordinate is 0.

mod error;

pub use error::AntennaReadError;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, trace};
use marlu::{LatLngHeight, XyzGeocentric};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    coord::{CoordinateTransformer, Enu},
    measures::GeodeticService,
};

/// The number of metadata columns that may follow the position columns.
const NUM_METADATA_COLUMNS: usize = 3;

lazy_static::lazy_static! {
    pub static ref ANTENNA_COORD_SYS_COMMA_SEPARATED: String = AntennaCoordSys::iter().join(", ");
}

/// The coordinate system of the positions in an antenna table.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AntennaCoordSys {
    /// Earth-centred X, Y, Z [metres].
    #[strum(serialize = "itrf")]
    Itrf,

    /// East, North, Up offsets from the array reference position [metres].
    #[strum(serialize = "enu")]
    Enu,

    /// Longitude [degrees], latitude [degrees] and height [metres].
    #[strum(serialize = "wgs84")]
    Wgs84,
}

impl AntennaCoordSys {
    pub fn parse(s: &str) -> Result<Self, AntennaReadError> {
        Self::from_str(s).map_err(|_| AntennaReadError::UnknownCoordSys(s.to_string()))
    }
}

/// Optional per-antenna information.
#[derive(Debug, Clone, PartialEq)]
pub struct AntennaMetadata {
    /// [metres]
    pub dish_diameter_m: f64,
    pub station: String,
    pub mount: String,
}

/// Antenna positions as they appear in a table.
#[derive(Debug, Clone)]
pub enum AntennaPositions {
    Itrf(Vec<XyzGeocentric>),
    Enu(Vec<Enu>),
    Wgs84(Vec<LatLngHeight>),
}

#[derive(Debug, Clone)]
pub struct AntennaTable {
    pub positions: AntennaPositions,

    /// Present only if every antenna has metadata columns.
    pub metadata: Option<Vec<AntennaMetadata>>,

    /// Whether the table was read without its third position column.
    pub no_up: bool,
}

impl AntennaTable {
    pub fn len(&self) -> usize {
        match &self.positions {
            AntennaPositions::Itrf(v) => v.len(),
            AntennaPositions::Enu(v) => v.len(),
            AntennaPositions::Wgs84(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn coord_sys(&self) -> AntennaCoordSys {
        match self.positions {
            AntennaPositions::Itrf(_) => AntennaCoordSys::Itrf,
            AntennaPositions::Enu(_) => AntennaCoordSys::Enu,
            AntennaPositions::Wgs84(_) => AntennaCoordSys::Wgs84,
        }
    }

    /// Normalise the antenna positions to ITRF. ENU offsets are relative to
    /// `reference`.
    pub fn into_itrf<G: GeodeticService>(
        self,
        transformer: &CoordinateTransformer<G>,
        reference: LatLngHeight,
    ) -> Vec<XyzGeocentric> {
        match self.positions {
            AntennaPositions::Itrf(xyzs) => xyzs,
            AntennaPositions::Enu(offsets) => {
                let (xyz0, xyzs) = transformer.enu_to_itrf(reference, &offsets, self.no_up);
                debug!("ITRF array reference: ({}, {}, {}) m", xyz0.x, xyz0.y, xyz0.z);
                xyzs
            }
            AntennaPositions::Wgs84(positions) => transformer.wgs84_to_itrf(&positions),
        }
    }
}

/// Read an antenna table from a file.
pub fn read_antenna_table<P: AsRef<Path>>(
    file: P,
    coord_sys: AntennaCoordSys,
    no_up: bool,
) -> Result<AntennaTable, AntennaReadError> {
    let file = file.as_ref();
    debug!("Reading {coord_sys} antenna table {}", file.display());
    let mut buf = BufReader::new(File::open(file)?);
    parse_antenna_table(&mut buf, coord_sys, no_up)
}

/// Parse a buffer containing an antenna table. Any bad line fails the whole
/// read.
pub fn parse_antenna_table<T: BufRead>(
    buf: &mut T,
    coord_sys: AntennaCoordSys,
    no_up: bool,
) -> Result<AntennaTable, AntennaReadError> {
    let num_position_columns = if no_up { 2 } else { 3 };
    let mut line = String::new();
    let mut line_num: u32 = 0;
    let mut positions: Vec<[f64; 3]> = vec![];
    let mut metadata: Vec<AntennaMetadata> = vec![];

    let parse_float = |string: &str, line_num: u32| -> Result<f64, AntennaReadError> {
        string.parse().map_err(|_| AntennaReadError::ParseFloat {
            line_num,
            string: string.to_string(),
        })
    };

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            line.clear();
            continue;
        }

        let columns: Vec<&str> = trimmed.split_whitespace().collect();
        if columns.len() < num_position_columns {
            return Err(AntennaReadError::TooFewColumns {
                line_num,
                expected: num_position_columns,
                got: columns.len(),
            });
        }
        // Without an up column, metadata starts at the third column.
        let (position_columns, rest) = columns.split_at(num_position_columns);

        let mut position = [0.0; 3];
        for (p, s) in position.iter_mut().zip(position_columns) {
            *p = parse_float(s, line_num)?;
        }
        if coord_sys == AntennaCoordSys::Wgs84 && !(-90.0..=90.0).contains(&position[1]) {
            return Err(AntennaReadError::LatitudeInvalid {
                line_num,
                lat: position[1],
            });
        }

        match rest {
            [] => {
                if !metadata.is_empty() {
                    return Err(AntennaReadError::InconsistentMetadata { line_num });
                }
            }
            [dd, station, mount] => {
                if metadata.len() != positions.len() {
                    return Err(AntennaReadError::InconsistentMetadata { line_num });
                }
                metadata.push(AntennaMetadata {
                    dish_diameter_m: parse_float(dd, line_num)?,
                    station: station.to_string(),
                    mount: mount.to_string(),
                });
            }
            [_] | [_, _] => {
                return Err(AntennaReadError::IncompleteMetadata {
                    line_num,
                    got: rest.len(),
                })
            }
            _ => {
                return Err(AntennaReadError::TooManyColumns {
                    line_num,
                    num_position_columns,
                    got: columns.len(),
                })
            }
        }

        trace!("Antenna {}: {position:?}", positions.len());
        positions.push(position);
        line.clear();
    }

    if positions.is_empty() {
        return Err(AntennaReadError::Empty);
    }
    debug!(
        "Read {} antennas ({} metadata)",
        positions.len(),
        if metadata.is_empty() { "without" } else { "with" }
    );

    let positions = match coord_sys {
        AntennaCoordSys::Itrf => AntennaPositions::Itrf(
            positions
                .into_iter()
                .map(|[x, y, z]| XyzGeocentric { x, y, z })
                .collect(),
        ),
        AntennaCoordSys::Enu => AntennaPositions::Enu(
            positions
                .into_iter()
                .map(|[e, n, u]| Enu { e, n, u })
                .collect(),
        ),
        AntennaCoordSys::Wgs84 => AntennaPositions::Wgs84(
            positions
                .into_iter()
                .map(|[lon, lat, height]| LatLngHeight {
                    longitude_rad: lon.to_radians(),
                    latitude_rad: lat.to_radians(),
                    height_metres: height,
                })
                .collect(),
        ),
    };

    Ok(AntennaTable {
        positions,
        metadata: if metadata.is_empty() {
            None
        } else {
            Some(metadata)
        },
        no_up,
    })
}
