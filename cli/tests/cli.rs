// Copyright 2026 Viktor Reusch
//
// This file is part of track2geojson.
//
// track2geojson is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// track2geojson is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License
// for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with track2geojson. If not, see <https://www.gnu.org/licenses/>.

use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
    <Placemark><name>Start</name><Point><coordinates>10,20</coordinates></Point></Placemark>
    <Placemark><name>Course</name><LineString><coordinates>0,0 0,1</coordinates></LineString></Placemark>
</Document></kml>"#;

#[test]
fn converts_kml_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("spots.KML");
    let output = dir.path().join("spots.json");
    fs::write(&input, KML).unwrap();

    let assert = Command::cargo_bin("track2geojson")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Success! 2 features found."));
    let geojson = fs::read_to_string(output).unwrap();
    assert!(geojson.contains("\"route_base\""));
}

#[test]
fn unsupported_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    let output = dir.path().join("notes.json");
    fs::write(&input, "hello").unwrap();

    let assert = Command::cargo_bin("track2geojson")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Unsupported format: .txt"));
    assert!(!output.exists());
}

#[test]
fn parse_error_is_not_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.gpx");
    let output = dir.path().join("broken.json");
    fs::write(&input, "<gpx><trk>").unwrap();

    let assert = Command::cargo_bin("track2geojson")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Error processing"));
    assert!(!output.exists());
}

#[test]
fn missing_arguments_fail() {
    Command::cargo_bin("track2geojson")
        .unwrap()
        .arg("only-input.kml")
        .assert()
        .failure();
}

#[test]
fn course_distances_reports_each_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("course_a.json"),
        r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0, 0], [0, 1]]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[5, 5, 10], [5, 6, 20]]}}
        ]}"#,
    )
    .unwrap();
    fs::write(dir.path().join("course_b.json"), "{ not json").unwrap();
    fs::write(
        dir.path().join("course_c.json"),
        r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("other.json"), "{}").unwrap();

    let assert = Command::cargo_bin("course-distances")
        .unwrap()
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");
    assert_eq!(lines[0], "--- Course Distances ---");
    assert_eq!(lines[1], "course_a.json: 222.39 km");
    assert!(lines[2].starts_with("Error processing "));
    assert!(lines[2].contains("course_b.json"));
    assert_eq!(lines[3], "course_c.json: 0.00 km");
}
