use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn prints_records_keyed_by_identifier() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("items.csv");
    write_file(&input, "---,Name,Price\n8,\"aa\",12\n10,bb,x\n");

    let expected = "{\"10\":{\"name\":\"bb\",\"price\":0},\"8\":{\"name\":\"aa\",\"price\":12}}\n";

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "name:string", "--field", "price:uint32"])
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn composite_fields_render_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.csv");
    write_file(
        &input,
        "---,O,P\n1,\"(a:false,\"\"b\"\":true,\"\"c\"\":aaa)\",\"(111,-222,11)\"\n",
    );

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["-f", "O:map<string,bool>", "-f", "P:list<uint32>"])
        .args(["--id", "1", "--indent", "0"])
        .assert()
        .success()
        .stdout("{\"O\":{\"a\":false,\"b\":true},\"P\":[111,11]}\n");
}

#[test]
fn custom_delimiter() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.csv");
    write_file(&input, "id|a\n1|x,y\n");

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "a:string", "--delimiter", "|", "--indent", "0"])
        .assert()
        .success()
        .stdout("{\"1\":{\"a\":\"x,y\"}}\n");
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.csv");
    let output = dir.path().join("out.json");
    write_file(&input, "id,a\n1,true\n2,no\n");

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "a:bool", "--indent", "0", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Loaded 2 records"));

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "{\"1\":{\"a\":true},\"2\":{\"a\":false}}\n");
}

#[test]
fn unrecognized_extension_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.t");
    write_file(&input, "id,a\n1,2\n");

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "a:int"])
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("unrecognized file type")));
}

#[test]
fn ragged_rows_fail() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.csv");
    write_file(&input, "id,a,b\n1,2,3\n2,3\n");

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "a:int"])
        .assert()
        .failure()
        .stderr(contains("invalid data source"));
}

#[test]
fn missing_identifier_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("data.csv");
    write_file(&input, "id,a\n1,2\n");

    cargo_bin_cmd!("reftable")
        .arg(&input)
        .args(["--field", "a:int", "--id", "9"])
        .assert()
        .failure()
        .stderr(contains("no record with identifier \"9\""));
}

#[test]
fn malformed_field_argument_is_rejected() {
    cargo_bin_cmd!("reftable")
        .args(["data.csv", "--field", "nocolon"])
        .assert()
        .failure()
        .stderr(contains("Expected name:type"));
}

#[test]
fn reads_stdin() {
    cargo_bin_cmd!("reftable")
        .args(["-", "--field", "a:int8", "--indent", "0"])
        .write_stdin("id,A\n5,-3\n")
        .assert()
        .success()
        .stdout("{\"5\":{\"a\":-3}}\n");
}
