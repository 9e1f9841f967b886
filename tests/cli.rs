use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn forge() -> Command {
    let mut cmd = Command::cargo_bin("domain-forge").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_flags() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--whois-delay-ms"));
}

#[test]
fn test_dry_run_prints_combinations() {
    forge()
        .args(["--dry-run", "--no-ai", "--words", "zen", "--endings", "ly,hub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zenly"))
        .stdout(predicate::str::contains("zenhub"));
}

#[test]
fn test_dry_run_json_is_candidate_list() {
    let output = forge()
        .args(["--dry-run", "--no-ai", "--json", "--words", "zen", "--endings", "ly"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let candidates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(candidates[0]["base_name"], "zenly");
    assert_eq!(candidates[0]["source"], "combined");
}

#[test]
fn test_no_words_and_no_ai_fails() {
    forge()
        .args(["--dry-run", "--no-ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("❌"));
}

#[test]
fn test_config_file_words() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[words]\ncustom = [\"flow\"]\nendings = [\"ify\"]").unwrap();

    forge()
        .args(["--dry-run", "--no-ai", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("flowify"));
}

#[test]
fn test_unknown_category_rejected() {
    forge()
        .args(["--dry-run", "--no-ai", "--words", "zen", "--categories", "astrology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("astrology"));
}
