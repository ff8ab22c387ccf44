use assert_cmd::Command;
use predicates::prelude::*;

fn demo(name: &str) -> String {
    format!("{}/../../demos/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn verify_accepts_valid_place() {
    Command::cargo_bin("ioi")
        .unwrap()
        .args(["verify", &demo("place-valid.yaml")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ACCEPTED: 1 command(s)"));
}

#[test]
fn verify_rejects_zero_quantity_as_json() {
    Command::cargo_bin("ioi")
        .unwrap()
        .args(["verify", &demo("place-zero-quantity.json"), "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"reason\": \"quantity must be positive\""))
        .stdout(predicate::str::contains("\"category\": \"business_rule\""));
}

#[test]
fn verify_reports_missing_file() {
    Command::cargo_bin("ioi")
        .unwrap()
        .args(["verify", &demo("does-not-exist.yaml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading snapshot"));
}

#[test]
fn propose_prints_verifiable_yaml() {
    let output = Command::cargo_bin("ioi")
        .unwrap()
        .args([
            "propose", "--buyer", "Alice", "--seller", "Bob", "--quantity", "100", "--ticker",
            "XYZ", "--price", "10.25",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let yaml = String::from_utf8(output.stdout).unwrap();
    let tx = ioi_core::TransactionSnapshot::from_yaml(&yaml).unwrap();
    assert!(ioi_core::verify_transaction(&tx).is_ok());
}

#[test]
fn propose_refuses_self_dealing() {
    Command::cargo_bin("ioi")
        .unwrap()
        .args([
            "propose", "--buyer", "Alice", "--seller", "Alice", "--quantity", "1", "--ticker",
            "XYZ", "--price", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("proposal rejected locally"));
}

#[test]
fn propose_refuses_negative_quantity() {
    Command::cargo_bin("ioi")
        .unwrap()
        .args([
            "propose", "--buyer", "Alice", "--seller", "Bob", "--quantity", "-5", "--ticker",
            "XYZ", "--price", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity must be positive"));
}

#[test]
fn propose_reports_out_of_range_tolerance() {
    for tolerance in ["900000000000000", "9223372036854775807"] {
        Command::cargo_bin("ioi")
            .unwrap()
            .args([
                "propose", "--buyer", "Alice", "--seller", "Bob", "--quantity", "1", "--ticker",
                "XYZ", "--price", "1", "--tolerance-secs", tolerance,
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("out of range"))
            .stderr(predicate::str::contains("panicked").not());
    }
}

#[test]
fn contract_ref_is_hex_sha256() {
    Command::cargo_bin("ioi")
        .unwrap()
        .arg("contract-ref")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());
}
