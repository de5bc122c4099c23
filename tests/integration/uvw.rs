// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::*;

#[test]
fn test_uvw_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("uvw.txt");
    #[rustfmt::skip]
    let cmd = get_cmd()
        .args([
            "uvw",
            "-a", ANTENNAS,
            "-T", "meerkat",
            "-d", "J2000,0deg,-30deg",
            "--synthesis", "1",
            "--dtime", "60",
            "--start-time", "2022/06/01 00:00:00",
            "-o", &format!("{}", outfile.display()),
        ])
        .ok();
    let ok = cmd.is_ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(ok, "{stdout}\n{stderr}");
    assert!(stdout.contains("Coverage"), "{stdout}");

    let (header, rows) = read_uvw_rows(&outfile);
    assert!(header.iter().any(|l| l.contains("transit")), "{header:?}");
    let num_baselines = NUM_ANTENNAS * (NUM_ANTENNAS - 1) / 2;
    // 1 hour at 60 s of sidereal rotation.
    let num_times = rows.len() / num_baselines;
    assert_eq!(rows.len() % num_baselines, 0);
    assert!((59..=61).contains(&num_times), "{num_times}");
    for row in &rows {
        assert!(row.iter().all(|x| x.is_finite()));
        // The longest baseline of the test array is well under 1 km.
        assert!((row[0] * row[0] + row[1] * row[1] + row[2] * row[2]).sqrt() < 1000.0);
    }
}

#[test]
fn test_uvw_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("uvw.txt");
    #[rustfmt::skip]
    let cmd = get_cmd()
        .args([
            "uvw",
            "-a", ANTENNAS,
            "--lon", "21.443889",
            "--lat", "-30.711056",
            "-d", "J2000,180deg,-45deg",
            "--start-time", "2022/06/01",
            "-o", &format!("{}", outfile.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!outfile.exists());
}

#[test]
fn test_uvw_without_direction_fails() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("uvw.txt");
    #[rustfmt::skip]
    let cmd = get_cmd()
        .args([
            "uvw",
            "-a", ANTENNAS,
            "-T", "meerkat",
            "-o", &format!("{}", outfile.display()),
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = from_utf8(&cmd.get_output().stderr).unwrap();
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(!outfile.exists());
}

#[test]
fn test_uvw_without_array_position_fails() {
    #[rustfmt::skip]
    let cmd = get_cmd()
        .args([
            "uvw",
            "-a", ANTENNAS,
            "-d", "J2000,0deg,-30deg",
            "--dry-run",
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = from_utf8(&cmd.get_output().stderr).unwrap();
    assert!(stderr.starts_with("Error:"), "{stderr}");
}

#[test]
fn test_uvw_missing_antenna_file_fails() {
    #[rustfmt::skip]
    get_cmd()
        .args([
            "uvw",
            "-a", "test_files/does_not_exist.txt",
            "-T", "meerkat",
            "-d", "J2000,0deg,-30deg",
            "--dry-run",
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_uvw_argument_file() {
    let dir = tempfile::tempdir().unwrap();
    let outfile = dir.path().join("uvw.txt");
    let (args_file, mut f) = make_file_in_dir("args.toml", dir.path());
    write!(
        f,
        r#"[uvw]
antennas = "{ANTENNAS}"
tel = "meerkat"
direction = "J2000,0deg,-30deg"
synthesis = 0.5
dtime = "2min"
start_time = "2022/06/01 00:00:00"
outfile = "{}"
"#,
        outfile.display()
    )
    .unwrap();
    drop(f);

    let cmd = get_cmd()
        .args(["uvw", &format!("{}", args_file.display())])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let (_, rows) = read_uvw_rows(&outfile);
    let num_baselines = NUM_ANTENNAS * (NUM_ANTENNAS - 1) / 2;
    assert_eq!(rows.len() % num_baselines, 0);
    // Half an hour every 2 minutes.
    let num_times = rows.len() / num_baselines;
    assert!((14..=16).contains(&num_times), "{num_times}");
}

#[test]
fn test_uvw_save_toml() {
    let dir = tempfile::tempdir().unwrap();
    let toml = dir.path().join("saved.toml");
    #[rustfmt::skip]
    let cmd = get_cmd()
        .args([
            "uvw",
            "-a", ANTENNAS,
            "-T", "meerkat",
            "-d", "J2000,0deg,-30deg",
            "--dry-run",
            "--save-toml", &format!("{}", toml.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&toml).unwrap();
    assert!(contents.contains("[uvw]"));
    assert!(contents.contains("meerkat"));
}
