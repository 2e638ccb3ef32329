#![cfg(unix)]

use assert_cmd::prelude::*;
use hashcat_controller::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::tempdir;

/// Stand-in for hashcat. A regular run copies the `hash:plain` lines of
/// `crackable.txt` into `hashcat.potfile`; `--show`/`--left` answer from it.
fn fake_hashcat(dir: &Path) -> PathBuf {
    let bin = dir.join("hashcat");
    let script = format!(
        r#"#!/bin/sh
D="{d}"
for a in "$@"; do
  case "$a" in
    --version) echo "v6.2.6"; exit 0;;
    --benchmark) printf '# version: v6.2.6\n# option\n1:100:2560:1024:3.21:1000000\n'; exit 0;;
    --show) cat "$D/hashcat.potfile" 2>/dev/null; exit 0;;
    --left) cat "$D/left.txt" 2>/dev/null; exit 0;;
    SLOW*) sleep 1;;
  esac
done
echo "$@" >> "$D/runs.log"
cat "$D/crackable.txt" > "$D/hashcat.potfile" 2>/dev/null
exit 0
"#,
        d = dir.display()
    );
    fs::write(&bin, script).unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let hashes = dir.join("example.0");
    let words = dir.join("wordlist.txt");
    fs::write(
        &hashes,
        "5f4dcc3b5aa765d61d8327deb882cf99\n098f6bcd4621d373cade4e832627b4f6\n",
    )
    .unwrap();
    fs::write(&words, "password\nletmein\n").unwrap();
    (hashes, words)
}

#[test]
fn controller_runs_two_jobs_and_reports() {
    let tmp = tempdir().unwrap();
    let bin = fake_hashcat(tmp.path());
    let (hashes, words) = write_inputs(tmp.path());
    fs::write(
        tmp.path().join("crackable.txt"),
        "5f4dcc3b5aa765d61d8327deb882cf99:password\n",
    )
    .unwrap();

    let mut hc = HashcatController::new(&bin).unwrap();
    hc.set_target_list(&hashes).unwrap();
    hc.set_hash_algorithm(HashAlgorithm::Md5).unwrap();

    // no attack mode yet
    assert!(hc.show().is_err());
    hc.set_attack_strategy(AttackStrategy::Straight, AttackPayload::wordlist(&words))
        .unwrap();
    assert!(hc.show().unwrap().is_empty());

    hc.run().unwrap();
    hc.wait(None).unwrap();
    hc.set_attack_strategy(AttackStrategy::BruteForce, AttackPayload::mask("Spring?d?d"))
        .unwrap();
    hc.run().unwrap();
    hc.wait(Some(Duration::from_secs(10))).unwrap();

    let runs = fs::read_to_string(tmp.path().join("runs.log")).unwrap();
    let runs: Vec<&str> = runs.lines().collect();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].starts_with("--attack-mode=0 --hash-type=0 "));
    assert!(runs[1].starts_with("--attack-mode=3 --hash-type=0 "));
    assert!(runs[1].ends_with("Spring?d?d"));

    let cracked = hc.show().unwrap();
    assert_eq!(cracked, vec!["5f4dcc3b5aa765d61d8327deb882cf99:password"]);
    let records = hc.show_records().unwrap();
    assert_eq!(records[0].plain, "password");
    assert!(hc.left().unwrap().is_empty());
}

#[test]
fn wait_timeout_does_not_kill_the_job() {
    let tmp = tempdir().unwrap();
    let bin = fake_hashcat(tmp.path());
    let (hashes, _words) = write_inputs(tmp.path());

    let mut hc = HashcatController::new(&bin).unwrap();
    hc.set_target_list(&hashes).unwrap();
    hc.set_hash_algorithm(1400_i64).unwrap();
    hc.set_attack_strategy(3_i64, AttackPayload::mask("SLOW?d")).unwrap();
    hc.run().unwrap();

    let err = hc.wait(Some(Duration::from_millis(50))).unwrap_err();
    assert!(matches!(err, HashcatError::WaitTimeout { .. }));
    assert!(matches!(hc.run(), Err(HashcatError::AlreadyRunning(_))));

    let out = hc.wait(None).unwrap();
    assert_eq!(out.code(), Some(0));
    let runs = fs::read_to_string(tmp.path().join("runs.log")).unwrap();
    assert!(runs.contains("--hash-type=1400"));
}

#[test]
fn cli_runs_job_and_writes_outputs() {
    let tmp = tempdir().unwrap();
    let bin = fake_hashcat(tmp.path());
    let (hashes, words) = write_inputs(tmp.path());
    fs::write(
        tmp.path().join("crackable.txt"),
        "5f4dcc3b5aa765d61d8327deb882cf99:password\n",
    )
    .unwrap();
    fs::write(tmp.path().join("left.txt"), "098f6bcd4621d373cade4e832627b4f6\n").unwrap();
    let outdir = tmp.path().join("out");
    let logs = tmp.path().join("logs");

    let mut cmd = Command::cargo_bin("hcctl").unwrap();
    cmd.arg("--binary")
        .arg(&bin)
        .arg("-m")
        .arg("md5")
        .arg("-a")
        .arg("straight")
        .arg("-t")
        .arg(&hashes)
        .arg("-w")
        .arg(&words)
        .arg("--arg")
        .arg("--potfile-path=x.pot")
        .arg("--color")
        .arg("never")
        .arg("--logs-dir")
        .arg(&logs)
        .arg("-o")
        .arg(&outdir);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cracked: 1/2 (50.00%)"))
        .stdout(predicate::str::contains("098f6bcd4621d373cade4e832627b4f6"));

    let runs = fs::read_to_string(tmp.path().join("runs.log")).unwrap();
    assert!(runs.contains("--attack-mode=0 --hash-type=0 --potfile-path=x.pot"));
    let files: Vec<_> = fs::read_dir(&outdir).unwrap().collect();
    assert_eq!(files.len(), 2);
    let log = fs::read_to_string(logs.join("controller.log")).unwrap();
    assert!(log.contains("hashcat started, pid = "));
}

#[test]
fn cli_benchmark_prints_speed() {
    let tmp = tempdir().unwrap();
    let bin = fake_hashcat(tmp.path());
    let mut cmd = Command::cargo_bin("hcctl").unwrap();
    cmd.arg("--binary").arg(&bin).arg("-m").arg("100").arg("--benchmark");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1000000 H/s"));
}

#[test]
fn cli_rejects_unknown_hash_type() {
    let tmp = tempdir().unwrap();
    let bin = fake_hashcat(tmp.path());
    let (hashes, _words) = write_inputs(tmp.path());
    let mut cmd = Command::cargo_bin("hcctl").unwrap();
    cmd.arg("--binary")
        .arg(&bin)
        .arg("-m")
        .arg("123")
        .arg("-a")
        .arg("3")
        .arg("--mask")
        .arg("?d")
        .arg("-t")
        .arg(&hashes);
    cmd.assert().failure().code(4);
    assert!(!tmp.path().join("runs.log").exists());
}

#[test]
fn cli_missing_binary_fails() {
    let tmp = tempdir().unwrap();
    let (hashes, _words) = write_inputs(tmp.path());
    let mut cmd = Command::cargo_bin("hcctl").unwrap();
    cmd.arg("--binary")
        .arg(tmp.path().join("no-hashcat"))
        .arg("-m")
        .arg("0")
        .arg("-a")
        .arg("3")
        .arg("--mask")
        .arg("?d")
        .arg("-t")
        .arg(&hashes);
    cmd.assert().failure().code(3);
}

#[test]
fn cli_requires_a_target_list() {
    let mut cmd = Command::cargo_bin("hcctl").unwrap();
    cmd.arg("-m").arg("0").arg("-a").arg("0");
    cmd.assert().failure().code(2);
}
