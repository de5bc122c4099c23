// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Baselines and their (u,v,w) coordinates over an hour-angle track.
//!
//! Everything here works on whole arrays: every baseline is projected with a
//! single matrix product per time sample, and time samples are computed in
//! parallel (they're independent of each other).

mod error;

pub use error::UvwError;

use hifitime::Epoch;
use itertools::Itertools;
use log::{debug, trace};
use marlu::{XyzGeocentric, UVW};
use ndarray::{prelude::*, Zip};
use rayon::prelude::*;
use vec1::Vec1;

use crate::{
    constants::{MAX_HOUR_ANGLE_SAMPLES, SIDEREAL_RATE_RAD_PER_SEC},
    coord::xyzs_to_array,
    direction::PointingDirection,
    geometry::{HorizonStatus, VisibilityWindow},
};

/// Monotonically increasing hour angles [radians].
#[derive(Debug, Clone, PartialEq)]
pub struct HourAngleTrack {
    hour_angles: Vec1<f64>,
}

impl HourAngleTrack {
    /// Uniformly sample hour angles from `start` to `end` (inclusive of both,
    /// [radians]) with `⌈(end - start) / step⌉` samples, then add `offset` to
    /// all of them. There is always at least one sample.
    pub fn new(start: f64, end: f64, step: f64, offset: f64) -> Result<Self, UvwError> {
        if step.is_nan() || step <= 0.0 {
            return Err(UvwError::NonPositiveStep(step));
        }
        for (name, value) in [("start", start), ("end", end), ("step", step), ("offset", offset)] {
            if !value.is_finite() {
                return Err(UvwError::NonFinite { name, value });
            }
        }
        if end < start {
            return Err(UvwError::BackwardsRange { start, end });
        }

        let num_samples = ((end - start) / step).ceil();
        if num_samples > MAX_HOUR_ANGLE_SAMPLES as f64 {
            return Err(UvwError::TooManySamples {
                num_samples,
                max: MAX_HOUR_ANGLE_SAMPLES,
            });
        }
        let num_samples = (num_samples as usize).max(1);
        let hour_angles = if num_samples == 1 {
            vec1::vec1![start + offset]
        } else {
            let hour_angles = Array1::linspace(start, end, num_samples)
                .into_iter()
                .map(|h| h + offset)
                .collect();
            Vec1::try_from_vec(hour_angles).map_err(|_| UvwError::EmptyTrack)?
        };
        trace!("{num_samples} hour angles from {start} to {end} rad (offset {offset} rad)");
        Ok(Self { hour_angles })
    }

    /// Like [`HourAngleTrack::new`], but the step is an integration time
    /// [seconds], converted to an angle with the sidereal rate.
    pub fn from_integration_time(
        start: f64,
        end: f64,
        integration_time_s: f64,
        offset: f64,
    ) -> Result<Self, UvwError> {
        Self::new(start, end, integration_time_s * SIDEREAL_RATE_RAD_PER_SEC, offset)
    }

    pub fn hour_angles(&self) -> &[f64] {
        self.hour_angles.as_slice()
    }

    pub fn len(&self) -> usize {
        self.hour_angles.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Get all antenna pairs `(i, j)` with `i < j`, in lexicographic order. There
/// are `N(N-1)/2` of them.
pub fn baseline_pairs(num_antennas: usize) -> Vec<(usize, usize)> {
    (0..num_antennas).tuple_combinations().collect()
}

/// For each antenna pair (see [`baseline_pairs`]), calculate `X[i] - X[j]`.
/// `xyzs` has a row per antenna; the result has a row per baseline.
pub fn xyzs_to_baselines(xyzs: ArrayView2<f64>) -> Array2<f64> {
    let (i, j): (Vec<usize>, Vec<usize>) = baseline_pairs(xyzs.nrows()).into_iter().unzip();
    xyzs.select(Axis(0), &i) - xyzs.select(Axis(0), &j)
}

/// The rotation from ITRF baselines to (u,v,w) at hour angle `ha`, given the
/// sine and cosine of the declination. Rows are the u, v and w directions.
///
/// This is Equation 4.1 of: Interferometry and Synthesis in Radio Astronomy,
/// Third Edition, Section 4: Geometrical Relationships, Polarimetry, and the
/// Measurement Equation.
pub fn uvw_rotation(ha: f64, s_dec: f64, c_dec: f64) -> Array2<f64> {
    let (s_ha, c_ha) = ha.sin_cos();
    array![
        [s_ha, c_ha, 0.0],
        [-s_dec * c_ha, s_dec * s_ha, c_dec],
        [c_dec * c_ha, -c_dec * s_ha, s_dec],
    ]
}

/// Project every baseline onto (u,v,w) for every hour angle. The result has
/// dimensions `(num_hour_angles, num_baselines, 3)`.
pub fn baselines_to_uvws(
    baselines: ArrayView2<f64>,
    hour_angles: ArrayView1<f64>,
    dec: f64,
) -> Array3<f64> {
    let (s_dec, c_dec) = dec.sin_cos();
    let mut uvws = Array3::zeros((hour_angles.len(), baselines.nrows(), 3));
    Zip::from(uvws.outer_iter_mut())
        .and(hour_angles)
        .par_for_each(|mut uvws, &ha| {
            uvws.assign(&baselines.dot(&uvw_rotation(ha, s_dec, c_dec).t()));
        });
    uvws
}

/// Flatten `(time, baseline, 3)` (u,v,w) values into time-major,
/// baseline-minor [`UVW`]s.
pub fn flatten_uvws(uvws: ArrayView3<f64>) -> Vec<UVW> {
    uvws.rows()
        .into_iter()
        .map(|uvw| UVW {
            u: uvw[0],
            v: uvw[1],
            w: uvw[2],
        })
        .collect()
}

/// Read-only diagnostics of a (u,v,w) coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvwSummary {
    /// The longest projected baseline, `max(sqrt(u² + v²))` [metres]
    pub max_uv_baseline_m: f64,

    pub transit: Epoch,

    /// [radians]
    pub altitude_at_transit: f64,

    /// `2·H0` [hours]
    pub visible_hours: f64,

    pub status: HorizonStatus,
}

impl UvwSummary {
    /// Descriptive lines to sit above a table of (u,v,w) samples.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("uvw points generated using uvgen {}", env!("CARGO_PKG_VERSION")),
            format!(
                "The pointing centre is at transit at {}, at which point its altitude is {:.3} degrees.",
                self.transit,
                self.altitude_at_transit.to_degrees()
            ),
            format!(
                "It will be above the horizon for {:.3} hours.",
                self.visible_hours
            ),
        ];
        match self.status {
            HorizonStatus::RisesAndSets => (),
            HorizonStatus::AlwaysAbove => {
                lines.push("The pointing centre never sets.".to_string())
            }
            HorizonStatus::AlwaysBelow => {
                lines.push("The pointing centre never rises!".to_string())
            }
        }
        lines.push(format!(
            "The maximum baseline for this array is {:.3} km. The u,v,w points are in metres.",
            self.max_uv_baseline_m / 1e3
        ));
        lines
    }
}

/// (u,v,w) samples for every baseline and every hour angle.
#[derive(Debug, Clone)]
pub struct UvwCoverage {
    /// Time-major, baseline-minor, i.e. index `k` is time sample
    /// `k / num_baselines` and baseline `k % num_baselines`.
    pub uvws: Vec<UVW>,

    pub track: HourAngleTrack,

    pub num_baselines: usize,

    pub summary: UvwSummary,
}

impl UvwCoverage {
    pub fn num_times(&self) -> usize {
        self.track.len()
    }

    /// Get the (u,v,w) of a baseline at a time sample.
    pub fn get(&self, i_time: usize, i_baseline: usize) -> Option<UVW> {
        if i_baseline >= self.num_baselines {
            return None;
        }
        self.uvws.get(i_time * self.num_baselines + i_baseline).copied()
    }

    /// The point-reflected samples `(-u, -v, -w)`. These are only useful to
    /// visualise the full coverage and are never part of [`UvwCoverage::uvws`].
    pub fn conjugates(&self) -> impl Iterator<Item = UVW> + '_ {
        self.uvws.iter().map(|&uvw| uvw * -1.0)
    }
}

/// Compute the (u,v,w) coverage of `antennas` (ITRF) looking at `direction`.
/// The hour-angle range `(start, end)` [radians] is relative to the transit
/// hour angle in `window`, and is sampled every `step` [radians].
pub fn compute_uvw(
    antennas: &[XyzGeocentric],
    direction: &PointingDirection,
    window: &VisibilityWindow,
    hour_angle_range: (f64, f64),
    step: f64,
) -> Result<UvwCoverage, UvwError> {
    if antennas.len() < 2 {
        return Err(UvwError::TooFewAntennas(antennas.len()));
    }
    let track = HourAngleTrack::new(
        hour_angle_range.0,
        hour_angle_range.1,
        step,
        window.transit.hour_angle,
    )?;

    let baselines = xyzs_to_baselines(xyzs_to_array(antennas).view());
    let num_baselines = baselines.nrows();
    debug!(
        "Computing (u,v,w) for {} antennas ({num_baselines} baselines) over {} hour angles",
        antennas.len(),
        track.len()
    );
    let hour_angles = ArrayView1::from(track.hour_angles());
    let uvws = flatten_uvws(baselines_to_uvws(baselines.view(), hour_angles, direction.dec).view());

    let max_uv_baseline_m = uvws
        .par_iter()
        .map(|uvw| (uvw.u * uvw.u + uvw.v * uvw.v).sqrt())
        .reduce(|| 0.0, f64::max);
    let summary = UvwSummary {
        max_uv_baseline_m,
        transit: window.transit.epoch,
        altitude_at_transit: window.altitude_at_transit,
        visible_hours: window.visible_hours(),
        status: window.status,
    };

    Ok(UvwCoverage {
        uvws,
        track,
        num_baselines,
        summary,
    })
}
