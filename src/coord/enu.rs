// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Handle East, North and Up offsets of antennas (a.k.a. stations) from a
reference position.
*/

use marlu::XyzGeocentric;
use ndarray::prelude::*;

use super::{array_to_xyzs, xyzs_to_array};
use crate::measures::GeocentricReference;

/// East, North and Up offsets from a reference position. All units are in
/// metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Enu {
    /// East [metres]
    pub e: f64,
    /// North [metres]
    pub n: f64,
    /// Up [metres]
    pub u: f64,
}

/// The 3x3 rotation from local offsets to ITRF. Each row is a unit vector, i.e.
/// the rows are (dE, dN, dU) expressed in ITRF, at the geocentric longitude and
/// latitude of `reference`.
pub fn enu_rotation(reference: &GeocentricReference) -> Array2<f64> {
    let (s_lon, c_lon) = reference.longitude_rad.sin_cos();
    let (s_lat, c_lat) = reference.latitude_rad.sin_cos();
    array![
        [-s_lon, c_lon, 0.0],
        [-c_lon * s_lat, -s_lon * s_lat, c_lat],
        [c_lat * c_lon, c_lat * s_lon, s_lat],
    ]
}

/// Convert local offsets from `reference` to ITRF positions. The offsets are
/// row vectors multiplied by [`enu_rotation`], then shifted by the reference
/// vector. If `no_up` is true, the Up components are treated as 0.
pub fn enu_to_itrf(
    reference: &GeocentricReference,
    offsets: &[Enu],
    no_up: bool,
) -> Vec<XyzGeocentric> {
    let mut enus = Array2::zeros((offsets.len(), 3));
    enus.outer_iter_mut()
        .zip(offsets)
        .for_each(|(mut row, enu)| {
            row.assign(&array![enu.e, enu.n, if no_up { 0.0 } else { enu.u }])
        });

    let xyz0 = xyzs_to_array(&[reference.xyz]);
    let xyzs = enus.dot(&enu_rotation(reference)) + &xyz0;
    array_to_xyzs(xyzs.view())
}

/// Convert ITRF positions to local offsets from `reference`. This uses the
/// transpose of [`enu_rotation`], which is its inverse.
pub fn itrf_to_enu(reference: &GeocentricReference, xyzs: &[XyzGeocentric]) -> Vec<Enu> {
    let xyz0 = xyzs_to_array(&[reference.xyz]);
    let diffs = xyzs_to_array(xyzs) - &xyz0;
    let enus = diffs.dot(&enu_rotation(reference).t());
    enus.outer_iter()
        .map(|row| Enu {
            e: row[0],
            n: row[1],
            u: row[2],
        })
        .collect()
}
