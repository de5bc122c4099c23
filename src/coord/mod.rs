// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Coordinate types and transforms between the local tangent plane (East, North,
Up) and the Earth-centred ITRF frame.
 */

mod enu;

pub use enu::*;

use marlu::{LatLngHeight, XyzGeocentric};
use ndarray::prelude::*;

use crate::measures::{GeocentricReference, GeodeticService};

/// Converts antenna positions into the ITRF frame. The geodetic service is
/// supplied by the caller; nothing here is global.
pub struct CoordinateTransformer<'a, G: GeodeticService> {
    geodetic: &'a G,
}

impl<'a, G: GeodeticService> CoordinateTransformer<'a, G> {
    pub fn new(geodetic: &'a G) -> Self {
        Self { geodetic }
    }

    /// Get the ITRF reference of a geodetic position.
    pub fn reference(&self, position: LatLngHeight) -> GeocentricReference {
        self.geodetic.geocentric_reference(position)
    }

    /// Convert (East, North, Up) offsets from `reference` to ITRF positions.
    /// If `no_up` is true, the Up component of every offset is ignored,
    /// flattening the array onto the tangent plane.
    ///
    /// Returns the ITRF reference position and the ITRF positions.
    pub fn enu_to_itrf(
        &self,
        reference: LatLngHeight,
        offsets: &[Enu],
        no_up: bool,
    ) -> (XyzGeocentric, Vec<XyzGeocentric>) {
        let reference = self.reference(reference);
        (reference.xyz, enu_to_itrf(&reference, offsets, no_up))
    }

    /// Convert geodetic positions (e.g. from a WGS84 antenna table) to ITRF.
    pub fn wgs84_to_itrf(&self, positions: &[LatLngHeight]) -> Vec<XyzGeocentric> {
        positions
            .iter()
            .map(|&p| self.geodetic.geocentric_reference(p).xyz)
            .collect()
    }
}

/// Put ITRF positions into an `(N, 3)` array.
pub fn xyzs_to_array(xyzs: &[XyzGeocentric]) -> Array2<f64> {
    let mut array = Array2::zeros((xyzs.len(), 3));
    array
        .outer_iter_mut()
        .zip(xyzs)
        .for_each(|(mut row, xyz)| row.assign(&array![xyz.x, xyz.y, xyz.z]));
    array
}

/// The inverse of [`xyzs_to_array`].
pub fn array_to_xyzs(array: ArrayView2<f64>) -> Vec<XyzGeocentric> {
    array
        .outer_iter()
        .map(|row| XyzGeocentric {
            x: row[0],
            y: row[1],
            z: row[2],
        })
        .collect()
}
