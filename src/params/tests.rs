// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{BufReader, Cursor};

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::TempDir;

use super::*;
use crate::{
    direction::DirectionFrame,
    geometry::HorizonStatus,
    io::{parse_antenna_table, AntennaCoordSys},
    measures::GeodeticService,
};

fn antennas() -> AntennaTable {
    let contents = indoc! {"
        # E N U
        0.0    0.0    0.0
        100.0  0.0    0.0
        0.0    250.0  1.5
    "};
    parse_antenna_table(
        &mut BufReader::new(Cursor::new(contents)),
        AntennaCoordSys::Enu,
        false,
    )
    .unwrap()
}

fn params(dir: &TempDir, dec_deg: f64) -> UvgenParams {
    let measures = Measures::default();
    UvgenParams {
        antennas: antennas(),
        observer: measures.observatory("meerkat").unwrap(),
        direction: PointingDirection::from_degrees(DirectionFrame::J2000, 0.0, dec_deg).unwrap(),
        reference_epoch: Epoch::from_gregorian_utc_at_midnight(2022, 6, 1),
        synthesis_hours: 1.0,
        integration_time_s: 60.0,
        measures,
        outfile: dir.path().join("uvgen.txt"),
        savefig: None,
    }
}

#[test]
fn test_hour_angle_range() {
    let dir = TempDir::new().unwrap();
    let mut params = params(&dir, -30.0);
    params.synthesis_hours = 4.0;
    let (start, end) = params.hour_angle_range();
    assert_abs_diff_eq!(start, -PI / 6.0);
    assert_abs_diff_eq!(end, PI / 6.0);
}

#[test]
fn test_run_writes_every_sample() {
    let dir = TempDir::new().unwrap();
    let params = params(&dir, -30.0);
    let coverage = params.run().unwrap();

    let expected_num_times = ((PI / 12.0) / (60.0 * SIDEREAL_RATE_RAD_PER_SEC)).ceil() as usize;
    assert_eq!(coverage.num_times(), expected_num_times);
    assert_eq!(coverage.num_baselines, 3);
    assert_eq!(coverage.summary.status, HorizonStatus::RisesAndSets);

    let contents = std::fs::read_to_string(&params.outfile).unwrap();
    let (header, rows): (Vec<&str>, Vec<&str>) = contents.lines().partition(|l| l.starts_with('#'));
    assert_eq!(header.len(), 4);
    assert!(header[0].starts_with("# uvw points generated using uvgen"));
    assert_eq!(rows.len(), 3 * expected_num_times);

    // The first row is the first baseline at the first time sample.
    let first: Vec<f64> = rows[0]
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    assert_abs_diff_eq!(first[0], coverage.uvws[0].u);
    assert_abs_diff_eq!(first[1], coverage.uvws[0].v);
    assert_abs_diff_eq!(first[2], coverage.uvws[0].w);

    // Baselines never change length, however they're projected.
    let length = |i: usize| {
        let uvw = coverage.uvws[i];
        (uvw.u * uvw.u + uvw.v * uvw.v + uvw.w * uvw.w).sqrt()
    };
    assert_abs_diff_eq!(length(0), 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(length(3), 100.0, epsilon = 1e-6);
}

#[test]
fn test_run_direction_never_rises() {
    let dir = TempDir::new().unwrap();
    let coverage = params(&dir, 80.0).run().unwrap();
    assert_eq!(coverage.summary.status, HorizonStatus::AlwaysBelow);
    assert_abs_diff_eq!(coverage.summary.visible_hours, 0.0);

    let contents = std::fs::read_to_string(dir.path().join("uvgen.txt")).unwrap();
    assert!(contents.contains("# The pointing centre never rises!"));
}

#[test]
#[cfg(not(feature = "plotting"))]
fn test_savefig_needs_plotting_feature() {
    let dir = TempDir::new().unwrap();
    let mut params = params(&dir, -30.0);
    params.savefig = Some(dir.path().join("uv.png"));
    let result = params.run();
    assert!(matches!(
        result,
        Err(UvgenRunError::Plot(crate::plot::PlotError::NoPlottingFeature))
    ));
}
