// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Astronomical "measures": where observatories are, the geocentric position of a
point on the Earth, sidereal time and sexagesimal angles.

The transforms in this crate never reach for these services themselves; a
[`GeodeticService`] and/or [`SiderealClock`] is handed to them. [`Measures`]
implements both with `marlu` (ERFA/PAL underneath).
 */

mod error;

pub use error::MeasuresError;

use hifitime::{Duration, Epoch};
use log::trace;
use marlu::{
    precession::get_lmst,
    sexagesimal::{sexagesimal_dms_string_to_degrees, sexagesimal_hms_string_to_degrees},
    LatLngHeight, XyzGeocentric,
};

/// Well-known arrays: (names, longitude [degrees], latitude [degrees], height
/// [metres]). The MWA is handled by [`LatLngHeight::mwa`].
const OBSERVATORIES: &[(&[&str], f64, f64, f64)] = &[
    (&["meerkat"], 21.443889, -30.711056, 1035.0),
    (&["kat-7", "kat7"], 21.410833, -30.721389, 1038.0),
    (&["askap"], 116.631695, -26.696979, 361.0),
    (&["vla", "evla"], -107.618283, 34.078749, 2124.0),
    (&["alma"], -67.754929, -23.029278, 5058.7),
    (&["atca"], 149.550138, -30.312884, 236.87),
    (&["gmrt"], 74.049692, 19.096517, 656.0),
    (&["wsrt", "westerbork"], 6.604167, 52.914722, 16.0),
    (&["lofar"], 6.869883, 52.915122, 15.0),
];

/// The names of all observatories that [`Measures`] knows about.
pub fn known_observatories() -> Vec<&'static str> {
    let mut names = vec!["mwa"];
    names.extend(OBSERVATORIES.iter().map(|(names, ..)| names[0]));
    names
}

/// A position on the Earth expressed in the Earth-centred (ITRF) frame, along
/// with its spherical (geocentric) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeocentricReference {
    /// The ITRF vector to the reference position.
    pub xyz: XyzGeocentric,

    /// Distance from the geocentre [metres]
    pub radius_m: f64,

    /// Geocentric longitude [radians]
    pub longitude_rad: f64,

    /// Geocentric latitude [radians]
    pub latitude_rad: f64,
}

impl GeocentricReference {
    /// Derive the geocentric spherical coordinates of an ITRF vector.
    pub fn from_xyz(xyz: XyzGeocentric) -> Self {
        let radius_m = (xyz.x * xyz.x + xyz.y * xyz.y + xyz.z * xyz.z).sqrt();
        let latitude_rad = if radius_m > 0.0 {
            (xyz.z / radius_m).asin()
        } else {
            0.0
        };
        Self {
            xyz,
            radius_m,
            longitude_rad: xyz.y.atan2(xyz.x),
            latitude_rad,
        }
    }
}

/// Something that knows where things are on the Earth.
pub trait GeodeticService {
    /// Get the geodetic position of a named observatory.
    fn observatory(&self, name: &str) -> Result<LatLngHeight, MeasuresError>;

    /// Get the ITRF reference vector of a geodetic position.
    fn geocentric_reference(&self, position: LatLngHeight) -> GeocentricReference;
}

/// Something that knows the local sidereal time.
pub trait SiderealClock {
    /// The local mean sidereal time [radians] at `longitude_rad` at the UTC
    /// `epoch`.
    fn lmst(&self, longitude_rad: f64, epoch: Epoch) -> f64;
}

/// The default measures, using the WGS84 ellipsoid and `marlu`'s LMST.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measures {
    /// UT1 - UTC. If this isn't known, the LMST is wrong by up to 0.9
    /// seconds.
    pub dut1: Duration,
}

impl Measures {
    pub fn new(dut1: Duration) -> Self {
        Self { dut1 }
    }
}

impl GeodeticService for Measures {
    fn observatory(&self, name: &str) -> Result<LatLngHeight, MeasuresError> {
        let lower = name.trim().to_lowercase();
        if lower == "mwa" {
            return Ok(LatLngHeight::mwa());
        }
        OBSERVATORIES
            .iter()
            .find(|(names, ..)| names.contains(&lower.as_str()))
            .map(|&(_, lon, lat, height)| LatLngHeight {
                longitude_rad: lon.to_radians(),
                latitude_rad: lat.to_radians(),
                height_metres: height,
            })
            .ok_or_else(|| MeasuresError::UnknownObservatory(name.to_string()))
    }

    fn geocentric_reference(&self, position: LatLngHeight) -> GeocentricReference {
        let xyz = XyzGeocentric::get_geocentric_vector(position);
        trace!("Geocentric vector of {position:?}: {xyz:?}");
        GeocentricReference::from_xyz(xyz)
    }
}

impl SiderealClock for Measures {
    fn lmst(&self, longitude_rad: f64, epoch: Epoch) -> f64 {
        get_lmst(longitude_rad, epoch, self.dut1)
    }
}

/// Parse a sexagesimal hour angle or right ascension (e.g. "0h0m0s",
/// "12:30:00") into radians.
pub fn parse_hms_angle(s: &str) -> Result<f64, MeasuresError> {
    let deg = sexagesimal_hms_string_to_degrees(s.trim()).map_err(|e| {
        MeasuresError::Sexagesimal {
            input: s.to_string(),
            err: e.to_string(),
        }
    })?;
    Ok(deg.to_radians())
}

/// Parse a sexagesimal declination (e.g. "-30d0m0s", "-30:00:00") into
/// radians.
pub fn parse_dms_angle(s: &str) -> Result<f64, MeasuresError> {
    let deg = sexagesimal_dms_string_to_degrees(s.trim()).map_err(|e| {
        MeasuresError::Sexagesimal {
            input: s.to_string(),
            err: e.to_string(),
        }
    })?;
    Ok(deg.to_radians())
}
