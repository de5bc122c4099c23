// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the `uvgen` executable.

mod observatories;
mod uvw;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

const ANTENNAS: &str = "test_files/meerkat_core_enu.txt";
const NUM_ANTENNAS: usize = 8;

fn get_cmd() -> Command {
    Command::cargo_bin("uvgen").unwrap()
}

fn get_cmd_output(result: Result<std::process::Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Get the non-comment lines of a written (u,v,w) file, split into columns.
fn read_uvw_rows(path: &Path) -> (Vec<String>, Vec<[f64; 3]>) {
    let contents = std::fs::read(path).unwrap();
    let contents = from_utf8(&contents).unwrap();
    let (header, rows): (Vec<&str>, Vec<&str>) =
        contents.lines().partition(|l| l.starts_with('#'));
    let rows = rows
        .into_iter()
        .map(|l| {
            let cols: Vec<f64> = l.split_whitespace().map(|c| c.parse().unwrap()).collect();
            assert_eq!(cols.len(), 3, "bad row: {l}");
            [cols[0], cols[1], cols[2]]
        })
        .collect();
    (header.into_iter().map(|s| s.to_string()).collect(), rows)
}

#[test]
fn test_help() {
    let cmd = get_cmd().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("uvw"));
    assert!(stdout.contains("observatories"));

    let cmd = get_cmd().args(["uvw", "--help"]).ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("--synthesis"));
    assert!(stdout.contains("--coord-sys"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let cmd = get_cmd().ok();
    assert!(cmd.is_err());
}
