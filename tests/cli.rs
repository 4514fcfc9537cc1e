use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn tabfx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tabfx").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn write_fixtures(dir: &Path) {
    std::fs::write(
        dir.join("rates.csv"),
        "Currency,EUR,GBP\n2020-01-01,0.9,0.8\n2020-01-02,NaN,0.81\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("input.csv"),
        "Bank statement export\nDate,Payee,Amount,Currency\n2020-01-01,ACME,100.00,EUR\n2020-01-02,WIDGETS,50.00,GBP\n",
    )
    .unwrap();
}

#[test]
fn test_end_to_end_convert() {
    let home = tempfile::tempdir().unwrap();
    write_fixtures(home.path());
    let data_dir = home.path().join("data");

    tabfx(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    tabfx(home.path())
        .args(["rates", "load", home.path().join("rates.csv").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded"));

    let output = home.path().join("out.csv");
    tabfx(home.path())
        .args([
            "convert",
            home.path().join("input.csv").to_str().unwrap(),
            "--target",
            "EUR",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done:"));

    let content = std::fs::read_to_string(&output).unwrap();
    let header_line = content.lines().nth(1).unwrap();
    assert!(header_line.contains("To USD"));
    assert!(header_line.contains("To EUR"));
    // 100 EUR * 0.9 = 90 USD; 90 USD * 0.9 = 81 EUR.
    let first_data = content.lines().nth(2).unwrap();
    assert!(first_data.contains("90.00"));
    assert!(first_data.contains("81.00"));
}

#[test]
fn test_duplicate_rate_archive_is_skipped() {
    let home = tempfile::tempdir().unwrap();
    write_fixtures(home.path());
    let data_dir = home.path().join("data");

    tabfx(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    let archive = home.path().join("rates.csv");
    tabfx(home.path())
        .args(["rates", "load", archive.to_str().unwrap()])
        .assert()
        .success();
    tabfx(home.path())
        .args(["rates", "load", archive.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("already been loaded"));
}

#[test]
fn test_convert_without_rates_fails() {
    let home = tempfile::tempdir().unwrap();
    write_fixtures(home.path());
    let data_dir = home.path().join("data");

    tabfx(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    tabfx(home.path())
        .args([
            "convert",
            home.path().join("input.csv").to_str().unwrap(),
            "--target",
            "EUR",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rate data loaded"));
}
