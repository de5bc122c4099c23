// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff: reading antenna tables and writing (u,v,w) samples.

pub mod read;
pub mod write;

pub use read::{
    parse_antenna_table, read_antenna_table, AntennaCoordSys, AntennaMetadata, AntennaPositions,
    AntennaReadError, AntennaTable, ANTENNA_COORD_SYS_COMMA_SEPARATED,
};
pub use write::{can_write_to_file, write_uvw_text, UvwWriteError};
