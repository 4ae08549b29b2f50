// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use image::{GenericImageView, Pixel, Rgb, RgbImage};
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn stripes(path: &Path, width: u32, height: u32) {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let v = ((x * 37 + y * 11) % 256) as u8;
        Rgb::from_channels(v, 255 - v, v / 2, 0)
    });
    image.save(path).unwrap();
}

#[test]
fn carve_shrinks_the_image() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    stripes(&input, 12, 9);

    Command::cargo_bin("seamaze")
        .unwrap()
        .arg("carve")
        .arg(&input)
        .arg(&output)
        .args(&["--width", "8", "--height", "7"])
        .assert()
        .success();

    let carved = image::open(&output).unwrap();
    assert_eq!(carved.dimensions(), (8, 7));
}

#[test]
fn carve_refuses_to_grow() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    stripes(&input, 5, 5);

    Command::cargo_bin("seamaze")
        .unwrap()
        .arg("carve")
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .args(&["--width", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CannotUpscale"));
}

#[test]
fn energy_map_keeps_the_size() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    stripes(&input, 10, 6);

    for seams in &[None, Some("vertical"), Some("horizontal")] {
        let output = dir.path().join("energy.png");
        let mut cmd = Command::cargo_bin("seamaze").unwrap();
        cmd.arg("energy").arg(&input).arg(&output);
        if let Some(axis) = seams {
            cmd.args(&["--seams", *axis]);
        }
        cmd.assert().success();
        assert_eq!(image::open(&output).unwrap().dimensions(), (10, 6));
    }
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("seamaze")
        .unwrap()
        .arg("carve")
        .arg(dir.path().join("nothing.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure();
}

#[test]
fn maze_prints_a_solution() {
    Command::cargo_bin("seamaze")
        .unwrap()
        .args(&["maze", "--width", "6", "--height", "4", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" S "))
        .stdout(predicate::str::contains(" G "))
        .stdout(predicate::str::contains("cells visited:"));
}

#[test]
fn maze_output_is_reproducible() {
    let run = || {
        Command::cargo_bin("seamaze")
            .unwrap()
            .args(&["maze", "--width", "9", "--height", "5", "--seed", "42", "--search", "dfs"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn bad_search_is_rejected() {
    Command::cargo_bin("seamaze")
        .unwrap()
        .args(&["maze", "--search", "astar"])
        .assert()
        .failure();
}
