// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;
use hifitime::Epoch;
use marlu::{LatLngHeight, XyzGeocentric};

use uvgen::{
    compute_uvw, coord::enu_to_itrf, CoordinateTransformer, DirectionFrame, Enu, HorizonStatus,
    Measures, PointingDirection, VisibilityWindow,
};

/// A square grid of antennas in a 4 km patch, in ITRF.
fn antenna_grid(num_per_side: usize) -> Vec<XyzGeocentric> {
    let measures = Measures::default();
    let reference = CoordinateTransformer::new(&measures).reference(LatLngHeight::mwa());
    let spacing = 4000.0 / num_per_side as f64;
    let offsets: Vec<Enu> = (0..num_per_side * num_per_side)
        .map(|i| Enu {
            e: (i % num_per_side) as f64 * spacing,
            n: (i / num_per_side) as f64 * spacing,
            u: 0.0,
        })
        .collect();
    enu_to_itrf(&reference, &offsets, false)
}

fn window() -> VisibilityWindow {
    VisibilityWindow {
        transit: uvgen::geometry::Transit {
            epoch: Epoch::from_gregorian_utc_at_midnight(2022, 6, 1),
            hour_angle: 0.3,
        },
        half_window: 1.2,
        altitude_at_transit: 1.0,
        status: HorizonStatus::RisesAndSets,
    }
}

fn uvw(c: &mut Criterion) {
    let direction = PointingDirection::from_degrees(DirectionFrame::J2000, 0.0, -27.0).unwrap();
    let window = window();

    // 256 antennas, 32640 baselines.
    let antennas = antenna_grid(16);
    // 4 hours every 10 seconds.
    let half = std::f64::consts::PI / 6.0;
    let step = 10.0 * uvgen::constants::SIDEREAL_RATE_RAD_PER_SEC;
    c.bench_function("compute_uvw 256 antennas, 4 hours", |b| {
        b.iter(|| compute_uvw(&antennas, &direction, &window, (-half, half), step).unwrap())
    });

    // Lots of baselines, few time samples.
    let antennas = antenna_grid(32);
    c.bench_function("compute_uvw 1024 antennas, 10 samples", |b| {
        b.iter(|| compute_uvw(&antennas, &direction, &window, (0.0, 0.1), 0.01).unwrap())
    });
}

criterion_group!(benches, uvw);
criterion_main!(benches);
