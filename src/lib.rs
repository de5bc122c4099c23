// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Generate the (u,v,w) coverage of a radio interferometer from its antenna
positions.

Antenna positions (ENU, ITRF or WGS84) are normalised to ITRF, the transit and
rise/set window of the pointing centre are found, and every baseline is
projected onto (u,v,w) over an hour-angle track centred on transit.
 */

mod cli;
pub mod constants;
pub mod coord;
pub mod direction;
pub mod geometry;
pub mod io;
pub mod measures;
pub mod params;
pub mod plot;
pub mod unit_parsing;
pub mod uvw;

// Re-exports.
pub use cli::{Uvgen, UvgenError};
pub use coord::{CoordinateTransformer, Enu};
pub use direction::{DirectionFrame, PointingDirection};
pub use geometry::{HorizonStatus, ObservationGeometry, VisibilityWindow};
pub use measures::{GeodeticService, Measures, SiderealClock};
pub use uvw::{compute_uvw, HourAngleTrack, UvwCoverage};
