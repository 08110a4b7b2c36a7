use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn pdk() -> Command {
    let mut cmd = Command::cargo_bin("pdk").expect("pdk binary builds");
    cmd.env_remove("PDK_CONFIG").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn fare_interactive_plane_business_discount() {
    pdk()
        .arg("fare")
        .write_stdin("1\n1000\n2\nbusiness\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip cost: $1,350.00"));
}

#[test]
fn fare_interactive_reprompts_on_bad_passenger_count() {
    pdk()
        .arg("fare")
        .write_stdin("3\n500\ntwo\n1\neconomy\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input: passengers"))
        .stdout(predicate::str::contains("Trip cost: $50.00"));
}

#[test]
fn fare_off_menu_choice_is_not_fatal() {
    pdk()
        .arg("fare")
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid transport choice."))
        .stdout(predicate::str::contains("Trip cost").not());
}

#[test]
fn fare_eof_fails_with_message() {
    pdk()
        .arg("fare")
        .write_stdin("2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn quote_flags_match_interactive() {
    pdk()
        .args([
            "quote",
            "--mode",
            "plane",
            "--distance",
            "1000",
            "--passengers",
            "2",
            "--class",
            "business",
            "--discount",
        ])
        .assert()
        .success()
        .stdout("Trip cost: $1,350.00\n");
}

#[test]
fn fare_too_large_to_price_prints_error_line() {
    pdk()
        .arg("fare")
        .write_stdin("1\n10000000000000000000000000000\n4000000000\nbusiness\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: trip cost for 'plane' is too large to calculate",
        ))
        .stdout(predicate::str::contains("Trip cost:").not());
}

#[test]
fn quote_unknown_mode_fails() {
    pdk()
        .args(["quote", "--mode", "boat", "--distance", "1", "--passengers", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pricing strategy registered for 'boat'"));
}

#[test]
fn config_layer_changes_currency_and_affirmative_word() {
    let mut cfg = tempfile::NamedTempFile::new().unwrap();
    cfg.write_all(b"currency:\n  symbol: \"EUR \"\nfare:\n  affirmative: ja\n")
        .unwrap();
    let path = cfg.path().to_string_lossy().to_string();

    pdk()
        .args(["--config", path.as_str(), "fare"])
        .write_stdin("3\n500\n1\neconomy\nJA\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discount? (ja / no)"))
        .stdout(predicate::str::contains("Trip cost: EUR 40.00"));
}

#[test]
fn config_from_env_var_is_used_without_flag() {
    let mut cfg = tempfile::NamedTempFile::new().unwrap();
    cfg.write_all(b"currency:\n  decimals: 0\n").unwrap();

    let mut cmd = pdk();
    cmd.env("PDK_CONFIG", cfg.path())
        .args([
            "quote",
            "--mode",
            "train",
            "--distance",
            "100",
            "--passengers",
            "3",
            "--class",
            "business",
            "--discount",
        ])
        .assert()
        .success()
        .stdout("Trip cost: $66\n");
}
