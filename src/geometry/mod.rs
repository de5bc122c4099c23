// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! When is a pointing direction visible? Rise/set hour angles, the altitude at
//! transit and the time of transit for an observer.

mod error;

pub use error::GeometryError;

use hifitime::{Duration, Epoch};
use log::{debug, info, trace, warn};
use marlu::LatLngHeight;

use crate::{
    constants::{
        DJD_EPOCH_MJD, PI, SIDEREAL_DAY_SECONDS, SOLAR_DAY_SECONDS, TAU,
        TRANSIT_RESIDUAL_TOLERANCE,
    },
    direction::PointingDirection,
    measures::{GeodeticService, SiderealClock},
};

/// Whether a direction crosses the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonStatus {
    RisesAndSets,

    /// Circumpolar; never sets.
    AlwaysAbove,

    /// Never rises.
    AlwaysBelow,
}

/// The moment a direction transits, and the hour-angle offset that the
/// hour-angle track is built around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    pub epoch: Epoch,

    /// [radians]
    pub hour_angle: f64,
}

/// Everything about the visibility of a direction from an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWindow {
    pub transit: Transit,

    /// Half of the hour-angle range in which the direction is above the
    /// horizon [radians]. This is 0 when `status` isn't
    /// [`HorizonStatus::RisesAndSets`]; callers must check `status` before
    /// treating this as a finite window.
    pub half_window: f64,

    /// [radians]
    pub altitude_at_transit: f64,

    pub status: HorizonStatus,
}

impl VisibilityWindow {
    /// The duration that the direction is above the horizon [hours], i.e.
    /// `2·H0`.
    pub fn visible_hours(&self) -> f64 {
        2.0 * self.half_window.to_degrees() / 15.0
    }
}

/// Computes visibility windows. The sidereal clock is supplied by the caller.
pub struct ObservationGeometry<'a, C: SiderealClock> {
    clock: &'a C,
}

impl<'a, C: SiderealClock> ObservationGeometry<'a, C> {
    pub fn new(clock: &'a C) -> Self {
        Self { clock }
    }

    /// Get the transit, rise/set half-window and altitude at transit of
    /// `direction`, searching for the transit around `reference`.
    pub fn visibility_window(
        &self,
        observer: LatLngHeight,
        direction: &PointingDirection,
        reference: Epoch,
    ) -> VisibilityWindow {
        let lat = observer.latitude_rad;
        let (half_window, status) = sunrise_equation(lat, direction.dec);
        match status {
            HorizonStatus::AlwaysBelow => {
                warn!("Pointing centre is always below the horizon!")
            }
            HorizonStatus::AlwaysAbove => info!("Pointing centre is always above the horizon"),
            HorizonStatus::RisesAndSets => (),
        }
        let altitude_at_transit = altitude_at_transit(lat, direction.dec);

        let transit = find_transit(self.clock, observer.longitude_rad, direction.ra, reference);
        let transit = southern_hemisphere_correction(lat, transit);
        debug!(
            "Transit at {} (hour-angle offset {:.6} rad), altitude {:.3}°",
            transit.epoch,
            transit.hour_angle,
            altitude_at_transit.to_degrees()
        );

        VisibilityWindow {
            transit,
            half_window,
            altitude_at_transit,
            status,
        }
    }
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // Tiny negative angles round up to exactly 2π.
    if wrapped == TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a longitude into (-π, π].
pub fn wrap_longitude(longitude: f64) -> f64 {
    let wrapped = wrap_angle(longitude);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// The hour angle at which a direction with declination `dec` rises or sets
/// for an observer at latitude `lat` (all in radians). If the direction never
/// crosses the horizon, the half-window is 0 and the status says why.
pub fn sunrise_equation(lat: f64, dec: f64) -> (f64, HorizonStatus) {
    let arg = -lat.tan() * dec.tan();
    if !(-1.0..=1.0).contains(&arg) {
        let status = if lat * dec < 0.0 {
            HorizonStatus::AlwaysBelow
        } else {
            HorizonStatus::AlwaysAbove
        };
        return (0.0, status);
    }
    (arg.acos(), HorizonStatus::RisesAndSets)
}

/// The altitude of a direction at transit, `sign(lat)·sin(lat + dec)`. The
/// sign of a latitude of exactly 0 is 0.
pub fn altitude_at_transit(lat: f64, dec: f64) -> f64 {
    sign(lat) * (lat.cos() * dec.sin() + lat.sin() * dec.cos())
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn shift_days(epoch: Epoch, days: f64) -> Epoch {
    epoch + Duration::from_seconds(days * SOLAR_DAY_SECONDS)
}

/// The hour-angle offset associated with an epoch: its Dublin Julian Day
/// divided by 2π, wrapped into [0, 2π).
pub fn epoch_hour_angle(epoch: Epoch) -> f64 {
    let djd = epoch.to_mjd_utc_days() - DJD_EPOCH_MJD;
    wrap_angle((djd / TAU) % TAU)
}

/// Find when the LST equals `ra`, starting from `reference`. The first guess
/// moves by the LST-RA difference (as a fraction of a day); if the LST there
/// is more than 5% away from `ra`, the correction is applied in the other
/// direction instead. There is no iteration beyond that.
pub fn find_transit<C: SiderealClock + ?Sized>(
    clock: &C,
    longitude_rad: f64,
    ra: f64,
    reference: Epoch,
) -> Transit {
    let lst = wrap_angle(clock.lmst(longitude_rad, reference));
    let ra = wrap_angle(ra);
    let diff = (lst - ra) / TAU;

    let guess = shift_days(reference, -diff);
    let guess_lst = wrap_angle(clock.lmst(longitude_rad, guess));
    trace!("LST at first transit guess {guess}: {guess_lst} rad (RA {ra} rad)");

    let epoch = if ra.abs() < f64::EPSILON {
        shift_days(reference, -lst / TAU)
    } else if ((guess_lst - ra) / ra).abs() > TRANSIT_RESIDUAL_TOLERANCE {
        shift_days(reference, diff)
    } else {
        guess
    };

    Transit {
        epoch,
        hour_angle: epoch_hour_angle(epoch),
    }
}

/// For observers in the southern hemisphere, move the transit hour angle back
/// by π and the transit epoch back by half a sidereal day. Northern (and
/// equatorial) observers are unaffected.
// TODO: Validate this against an independent transit calculation for
// southern arrays; it may only be patching the track centre.
pub fn southern_hemisphere_correction(latitude_rad: f64, transit: Transit) -> Transit {
    if latitude_rad < 0.0 {
        Transit {
            epoch: transit.epoch - Duration::from_seconds(SIDEREAL_DAY_SECONDS / 2.0),
            hour_angle: transit.hour_angle - PI,
        }
    } else {
        transit
    }
}

/// Work out the observer's position. A telescope name takes precedence over an
/// explicit longitude and latitude [degrees]; without either, this fails
/// before anything is computed.
pub fn resolve_observer<G: GeodeticService + ?Sized>(
    geodetic: &G,
    telescope: Option<&str>,
    longitude_deg: Option<f64>,
    latitude_deg: Option<f64>,
    height_m: Option<f64>,
) -> Result<LatLngHeight, GeometryError> {
    if let Some(name) = telescope {
        return Ok(geodetic.observatory(name)?);
    }
    match (longitude_deg, latitude_deg) {
        (Some(lon), Some(lat)) => {
            if !lon.is_finite() {
                return Err(GeometryError::LongitudeInvalid(lon));
            }
            if !(-90.0..=90.0).contains(&lat) {
                return Err(GeometryError::LatitudeInvalid(lat));
            }
            Ok(LatLngHeight {
                longitude_rad: wrap_longitude(lon.to_radians()),
                latitude_rad: lat.to_radians(),
                height_metres: height_m.unwrap_or_default(),
            })
        }
        _ => Err(GeometryError::NoObserverPosition),
    }
}
