use std::fs;
use std::process::Command;

use egsa87::location::{DmsEntry, Egsa87Entry};
use egsa87::projection::{TransverseMercator, TransverseMercatorParams};
use egsa87::{egsa87_to_wgs84, wgs84_to_egsa87, Direction, Dms, Transformer, WellLocation};
use proptest::prelude::*;

/// (name, latitude, longitude, easting, northing)
const KNOWN_POINTS: &[(&str, f64, f64, f64, f64)] = &[
    ("Athens", 37.9838, 23.7275, 475920.2652, 4203764.6992),
    ("Thessaloniki", 40.6401, 22.9444, 410590.3142, 4499055.4033),
    ("Heraklion", 35.3387, 25.1442, 603831.1353, 3910916.1182),
    ("Corfu", 39.6243, 19.9217, 149769.7605, 4393725.5692),
    ("Rhodes", 36.4341, 28.2176, 877981.3351, 4040083.1540),
    ("Alexandroupoli", 40.8457, 25.8739, 657820.5260, 4523032.3098),
];

#[test]
fn known_points_forward() {
    for &(name, lat, lon, easting, northing) in KNOWN_POINTS {
        let (x, y) = wgs84_to_egsa87(lat, lon);
        assert!((x - easting).abs() < 0.05, "{}: x {} != {}", name, x, easting);
        assert!((y - northing).abs() < 0.05, "{}: y {} != {}", name, y, northing);
    }
}

/// GRS80 meridian quadrant, Moritz, "Geodetic Reference System 1980",
/// Journal of Geodesy 74 (2000) 128-133
const GRS80_MERIDIAN_QUADRANT: f64 = 10_001_965.7293;

#[test]
fn grid_constants_match_published_grs80() {
    let projection = TransverseMercator::new(TransverseMercatorParams::EGSA87);

    // The grid origin on the central meridian
    let (easting, northing) = projection.forward_radians(0.0, 24f64.to_radians());
    assert!((easting - 500_000.0).abs() < 1e-6);
    assert!(northing.abs() < 1e-6);

    // The pole on the central meridian lies k0 * Q north of the equator
    let (easting, northing) = projection.forward_radians(90f64.to_radians(), 24f64.to_radians());
    assert!((easting - 500_000.0).abs() < 1e-6);
    assert!(
        (northing - 0.9996 * GRS80_MERIDIAN_QUADRANT).abs() < 1e-3,
        "northing {}",
        northing
    );
}

#[test]
fn known_points_round_trip() {
    for &(name, lat, lon, _, _) in KNOWN_POINTS {
        let (x, y) = wgs84_to_egsa87(lat, lon);
        let (lon2, lat2) = egsa87_to_wgs84(x, y);
        assert!((lat2 - lat).abs() < 1e-7, "{}: latitude {} != {}", name, lat2, lat);
        assert!((lon2 - lon).abs() < 1e-7, "{}: longitude {} != {}", name, lon2, lon);
    }
}

#[test]
fn easting_comes_first() {
    let (x, y) = wgs84_to_egsa87(37.9838, 23.7275);
    // Greek eastings stay well below a million, northings are in the millions
    assert!(x < 1_000_000.0 && y > 3_000_000.0);

    let (lon, lat) = egsa87_to_wgs84(x, y);
    assert!(lon < lat, "inverse must answer (longitude, latitude)");
}

#[test]
fn origin_input_is_finite() {
    let (x, y) = wgs84_to_egsa87(0.0, 0.0);
    assert!(x.is_finite() && y.is_finite());
    assert!((x + 2_252_987.14).abs() < 1.0, "x = {}", x);
    assert!((y + 270.02).abs() < 1.0, "y = {}", y);

    let (lon, lat) = egsa87_to_wgs84(0.0, 0.0);
    assert!(lon.is_finite() && lat.is_finite());
}

#[test]
fn nan_propagates() {
    let (x, y) = wgs84_to_egsa87(f64::NAN, 23.0);
    assert!(x.is_nan() || y.is_nan());
}

#[test]
fn easting_increases_with_longitude() {
    let eastings: Vec<f64> = (20..=28).map(|lon| wgs84_to_egsa87(38.0, lon as f64).0).collect();
    assert!(eastings.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", eastings);
    assert!((eastings[4] - 499_850.44).abs() < 0.05);
}

#[test]
fn dms_round_trip_through_grid() {
    let location = WellLocation::new()
        .with_latitude(DmsEntry::from(Dms::new(37, 59, 1.7).unwrap()))
        .with_longitude(DmsEntry::from(Dms::new(23, 43, 39.0).unwrap()))
        .convert_to_egsa87()
        .unwrap();
    assert_eq!(location.egsa87(), Egsa87Entry::new(Some(475920.0), Some(4203765.0)));

    let back = WellLocation::new().with_egsa87(location.egsa87()).convert_to_wgs84().unwrap();
    assert_eq!(back.latitude(), location.latitude());
    assert_eq!(back.longitude(), location.longitude());
}

#[test]
fn thessaloniki_grid_to_dms() {
    let location = WellLocation::new()
        .with_egsa87(Egsa87Entry::new(Some(410590.0), Some(4499055.0)))
        .convert_to_wgs84()
        .unwrap();
    assert_eq!(location.latitude(), DmsEntry::from(Dms::new(40, 38, 24.3).unwrap()));
    assert_eq!(location.longitude(), DmsEntry::from(Dms::new(22, 56, 39.8).unwrap()));
}

#[test]
fn transformer_many_matches_single() {
    let transformer = Transformer::for_direction(Direction::ToEgsa87);
    let coords: Vec<_> = KNOWN_POINTS
        .iter()
        .map(|&(_, lat, lon, _, _)| egsa87::Coordinate::from_lonlat(lon, lat))
        .collect();

    let batch = transformer.transform_many(&coords);
    for (coord, projected) in coords.iter().zip(&batch) {
        assert_eq!(*projected, transformer.transform(*coord));
    }
}

#[test]
fn cli_batch_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("points.csv");
    let output = dir.path().join("converted.csv");
    fs::write(&input, "name,latitude,longitude\nAthens,37.9838,23.7275\nBroken,,\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_egsa87"))
        .arg("batch")
        .arg(&input)
        .arg("--round")
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name,latitude,longitude,x,y");
    assert_eq!(lines[1], "Athens,37.9838,23.7275,475920,4203765");
    assert_eq!(lines[2], "Broken,,,INVALID,INVALID");
}

#[test]
fn cli_to_egsa87_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_egsa87"))
        .args(["to-egsa87", "37°59'1.7\"", "23°43'39\"", "--round", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["x"], 475920.0);
    assert_eq!(json["y"], 4203765.0);
}

proptest! {
    #[test]
    fn round_trip_within_greece(lat in 34.5f64..41.8, lon in 19.3f64..29.7) {
        let (x, y) = wgs84_to_egsa87(lat, lon);
        let (lon2, lat2) = egsa87_to_wgs84(x, y);
        prop_assert!((lat2 - lat).abs() < 1e-7);
        prop_assert!((lon2 - lon).abs() < 1e-7);
    }

    #[test]
    fn grid_round_trip_within_a_metre(x in 100_000f64..900_000.0, y in 3_850_000f64..4_650_000.0) {
        let (lon, lat) = egsa87_to_wgs84(x, y);
        let (x2, y2) = wgs84_to_egsa87(lat, lon);
        prop_assert!((x2 - x).abs() < 1.0, "x {} -> {}", x, x2);
        prop_assert!((y2 - y).abs() < 1.0, "y {} -> {}", y, y2);
    }

    #[test]
    fn rounded_grid_stays_within_a_tenth_of_a_second(lat in 34.5f64..41.8, lon in 19.3f64..29.7) {
        let (x, y) = wgs84_to_egsa87(lat, lon);
        let (lon2, lat2) = egsa87_to_wgs84(x.round(), y.round());
        prop_assert!((lat2 - lat).abs() * 3600.0 < 0.1);
        prop_assert!((lon2 - lon).abs() * 3600.0 < 0.1);
    }
}
