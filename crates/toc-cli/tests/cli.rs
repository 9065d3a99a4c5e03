//! Integration tests for the `toc-transformer` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = "SITE.NAME;SITE.LONGITUDE;SITE.LATITUDE;ZONE.FS_POWER_DBM;\
                      ANTENNA_SYSTEM.DIRECTION_DEG;ANTENNA_SYSTEM.NAME;CELL.G_BCCH;\
                      CELL.LAC;CELL.NE_ID;SITE_MANAGER.BS_TYPE\n\
                      SiteA;13.404.954;52.520.008;43;0;ANT-1;10;4660;NE-1;mBS\n\
                      SiteA;13.404.954;52.520.008;43;45;ANT-2;11;4660;NE-2;mBS\n";

fn cli() -> Command {
    Command::cargo_bin("toc-transformer").unwrap()
}

#[test]
fn test_convert_writes_artifacts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sites.csv");
    fs::write(&input, EXPORT).unwrap();

    cli()
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successful."))
        .stderr(predicate::str::contains("[3/3] Writing ATD"));

    assert!(dir.path().join("sites.txt").exists());
    assert!(dir.path().join("sites.txt.csv").exists());
    let atd = fs::read_to_string(dir.path().join("sites.ATD")).unwrap();
    assert!(atd.contains("File=sites.txt"));
}

#[test]
fn test_convert_with_lf_and_custom_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sites.csv");
    fs::write(&input, EXPORT).unwrap();

    cli()
        .args(["convert", "--lf", "--descriptor-extension", "atd"])
        .arg(&input)
        .assert()
        .success();

    let atd = fs::read_to_string(dir.path().join("sites.atd")).unwrap();
    assert!(!atd.contains('\r'));
}

#[test]
fn test_convert_missing_file_reports_reading_error() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("convert")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading the CSV file."));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_convert_bad_column_reports_column_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sites.csv");
    fs::write(&input, EXPORT.replace("4660;NE-1", "none;NE-1")).unwrap();

    cli()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: columns not recognized."));
}

#[test]
fn test_convert_without_matches_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sites.csv");
    fs::write(&input, EXPORT.replace(";mBS\n", ";other\n")).unwrap();

    cli()
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing written"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_schema_lists_columns() {
    cli()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Output columns (20 total)"))
        .stdout(predicate::str::contains("ANTENNA_SYSTEM"))
        .stdout(predicate::str::contains("utDynChar"));
}

#[test]
fn test_rejects_multi_character_delimiter() {
    cli()
        .args(["convert", "--delimiter", ";;", "sites.csv"])
        .assert()
        .failure();
}

#[test]
fn test_convert_with_table_delimiter() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sites.csv");
    fs::write(&input, EXPORT).unwrap();

    cli()
        .args(["convert", "--table-delimiter", "|", "--decimal-marker", "."])
        .arg(&input)
        .assert()
        .success();

    let primary = fs::read_to_string(dir.path().join("sites.txt")).unwrap();
    assert!(primary.starts_with("Name|PosLongitude|PosLatitude|"));
    assert!(primary.contains("SiteA|13.404954|52.520008|"));
    let secondary = fs::read_to_string(dir.path().join("sites.txt.csv")).unwrap();
    assert!(secondary.starts_with("Name;PosLongitude;"));
}
