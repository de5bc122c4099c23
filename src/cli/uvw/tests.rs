// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::{Builder, NamedTempFile, TempDir};

use super::*;
use crate::{direction::DirectionFrame, io::AntennaPositions};

fn antenna_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"0.0 0.0 0.0\n100.0 0.0 0.0\n0.0 100.0 0.0\n")
        .unwrap();
    file.flush().unwrap();
    file
}

fn good_args(antennas: &NamedTempFile, dir: &TempDir) -> UvwArgs {
    UvwArgs {
        args_file: None,
        uvw_args: UvwCliArgs {
            antennas: Some(antennas.path().to_path_buf()),
            tel: Some("meerkat".to_string()),
            direction: Some("J2000,0deg,-30deg".to_string()),
            start_time: Some("2022/06/01 12:00:00".to_string()),
            outfile: Some(dir.path().join("uvgen.txt")),
            ..Default::default()
        },
    }
}

#[test]
fn test_parse_start_time() {
    let epoch = parse_start_time("2022/06/01 12:30:15").unwrap();
    assert_eq!(epoch, Epoch::from_gregorian_utc(2022, 6, 1, 12, 30, 15, 0));

    let epoch = parse_start_time(" 2022/06/01 ").unwrap();
    assert_eq!(epoch, Epoch::from_gregorian_utc_at_midnight(2022, 6, 1));

    assert!(matches!(
        parse_start_time("yesterday"),
        Err(UvgenArgsError::BadStartTime { .. })
    ));
    assert!(matches!(
        parse_start_time("2022-06-01 12:30:15"),
        Err(UvgenArgsError::BadStartTime { .. })
    ));
}

#[test]
fn test_start_of_today_is_midnight() {
    let epoch = start_of_today().unwrap();
    let (_, _, _, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    assert_eq!((hour, minute, second, nanos), (0, 0, 0, 0));
}

#[test]
fn test_cli_args_override_file_args() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        indoc! {r#"
            [uvw]
            antennas = "/from/file.txt"
            tel = "vla"
            synthesis = 8.0
            noup = true
        "#}
        .as_bytes(),
    )
    .unwrap();
    file.flush().unwrap();

    let args = UvwArgs {
        args_file: Some(file.path().to_path_buf()),
        uvw_args: UvwCliArgs {
            tel: Some("meerkat".to_string()),
            dtime: Some("2s".to_string()),
            ..Default::default()
        },
    }
    .merge()
    .unwrap();

    assert!(args.args_file.is_none());
    let args = args.uvw_args;
    assert_eq!(args.antennas, Some(PathBuf::from("/from/file.txt")));
    assert_eq!(args.tel.as_deref(), Some("meerkat"));
    assert_eq!(args.synthesis, Some(8.0));
    assert_eq!(args.dtime.as_deref(), Some("2s"));
    assert!(args.noup);
    assert!(args.direction.is_none());
}

#[test]
fn test_json_arg_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(br#"{"uvw": {"direction": "J2000,10deg,-45deg", "lon": -67.75, "lat": -23.02}}"#)
        .unwrap();
    file.flush().unwrap();

    let args = UvwArgs {
        args_file: Some(file.path().to_path_buf()),
        ..Default::default()
    }
    .merge()
    .unwrap()
    .uvw_args;
    assert_eq!(args.direction.as_deref(), Some("J2000,10deg,-45deg"));
    assert_eq!(args.lon, Some(-67.75));
    assert_eq!(args.lat, Some(-23.02));
}

#[test]
fn test_bad_arg_files() {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"uvw: {}\n").unwrap();
    let result = UvwArgs {
        args_file: Some(file.path().to_path_buf()),
        ..Default::default()
    }
    .merge();
    assert!(matches!(result, Err(UvgenError::ArgFile(_))));

    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[uvw]\nsynthesis = \"four\"\n").unwrap();
    let result = UvwArgs {
        args_file: Some(file.path().to_path_buf()),
        ..Default::default()
    }
    .merge();
    assert!(matches!(result, Err(UvgenError::ArgFile(_))));
}

#[test]
fn test_args_survive_toml() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();
    let args = good_args(&antennas, &dir);
    let toml_str = toml::to_string(&args).unwrap();
    let round_tripped: UvwArgs = toml::from_str(&toml_str).unwrap();
    assert_eq!(round_tripped.uvw_args.tel, args.uvw_args.tel);
    assert_eq!(round_tripped.uvw_args.antennas, args.uvw_args.antennas);
    assert_eq!(round_tripped.uvw_args.direction, args.uvw_args.direction);
}

#[test]
fn test_parse_good_args() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();
    let mut args = good_args(&antennas, &dir);
    args.uvw_args.dtime = Some("1min".to_string());
    args.uvw_args.dut1 = Some(-0.25);
    let params = args.parse().unwrap();

    assert_eq!(params.antennas.len(), 3);
    assert!(matches!(params.antennas.positions, AntennaPositions::Enu(_)));
    assert_abs_diff_eq!(params.observer.latitude_rad, (-30.711056_f64).to_radians());
    assert_eq!(params.direction.frame, DirectionFrame::J2000);
    assert_abs_diff_eq!(params.direction.dec, (-30.0_f64).to_radians());
    assert_eq!(
        params.reference_epoch,
        Epoch::from_gregorian_utc(2022, 6, 1, 12, 0, 0, 0)
    );
    assert_abs_diff_eq!(params.synthesis_hours, DEFAULT_SYNTHESIS_HOURS);
    assert_abs_diff_eq!(params.integration_time_s, 60.0);
    assert_abs_diff_eq!(params.measures.dut1.to_seconds(), -0.25);
    assert!(params.savefig.is_none());
}

#[test]
fn test_parse_default_dtime_and_explicit_position() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();
    let mut args = good_args(&antennas, &dir);
    args.uvw_args.tel = None;
    args.uvw_args.lon = Some(21.44);
    args.uvw_args.lat = Some(-30.71);
    args.uvw_args.height = Some(1000.0);
    args.uvw_args.coord_sys = Some("ITRF".to_string());
    let params = args.parse().unwrap();
    assert_abs_diff_eq!(params.integration_time_s, DEFAULT_DTIME_SECONDS);
    assert_abs_diff_eq!(params.observer.longitude_rad, 21.44_f64.to_radians());
    assert_abs_diff_eq!(params.observer.height_metres, 1000.0);
    assert!(matches!(params.antennas.positions, AntennaPositions::Itrf(_)));
}

#[test]
fn test_parse_configuration_errors() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.tel = None;
    assert!(matches!(args.parse(), Err(UvgenError::ArrayPosition(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.tel = Some("arecibo".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::ArrayPosition(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.direction = None;
    assert!(matches!(args.parse(), Err(UvgenError::Direction(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.direction = Some("AZEL,0deg,90deg".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::Direction(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.antennas = None;
    assert!(matches!(args.parse(), Err(UvgenError::AntennaTable(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.antennas = Some(dir.path().join("missing.txt"));
    assert!(matches!(args.parse(), Err(UvgenError::AntennaTable(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.coord_sys = Some("galactic".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::AntennaTable(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.synthesis = Some(0.0);
    assert!(matches!(args.parse(), Err(UvgenError::Generic(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.synthesis = Some(f64::INFINITY);
    assert!(matches!(args.parse(), Err(UvgenError::Generic(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.dtime = Some("-10s".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::Generic(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.dtime = Some("ten seconds".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::Generic(_))));

    let mut args = good_args(&antennas, &dir);
    args.uvw_args.start_time = Some("June".to_string());
    assert!(matches!(args.parse(), Err(UvgenError::Generic(_))));
}

#[test]
fn test_huge_synthesis_fails_without_allocating() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();
    let mut args = good_args(&antennas, &dir);
    args.uvw_args.synthesis = Some(1e300);
    let result = args.run(false);
    assert!(matches!(result, Err(UvgenError::Uvw(_))), "{result:?}");
    assert!(!dir.path().join("uvgen.txt").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let antennas = antenna_file();
    let dir = TempDir::new().unwrap();
    good_args(&antennas, &dir).run(true).unwrap();
    assert!(!dir.path().join("uvgen.txt").exists());

    good_args(&antennas, &dir).run(false).unwrap();
    assert!(dir.path().join("uvgen.txt").exists());
}
