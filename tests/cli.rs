use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn corpus_stats() -> Command {
    Command::cargo_bin("corpus-stats").expect("Failed to find corpus-stats binary")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn parse_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("valid json report")
}

#[test]
fn single_file_reports_counts_and_preview() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("rows.csv");
    write_file(&file, "h1,h2\n1,2\n3,4\n");

    corpus_stats()
        .arg(&file)
        .arg("--preview")
        .arg("2")
        .assert()
        .success()
        .stdout("Files: 1\nLines: 3\nBytes: 14\n\nPreview (2 lines):\n1: h1,h2\n2: 1,2\n");
}

#[test]
fn legacy_positional_preview_count() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("rows.csv");
    write_file(&file, "a\nb\nc\n");

    corpus_stats()
        .arg(&file)
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview (1 lines):\n1: a\n"));
}

#[test]
fn short_preview_flag() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("rows.csv");
    write_file(&file, "a\nb\nc\n");

    corpus_stats()
        .arg(&file)
        .arg("-p")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview (2 lines):\n1: a\n2: b\n"));
}

#[test]
fn stdin_is_scanned_when_path_is_dash() {
    corpus_stats()
        .arg("-")
        .arg("--ext")
        .arg(".csv")
        .arg("--preview=5")
        .write_stdin("first\nsecond\n")
        .assert()
        .success()
        .stdout("Files: 1\nLines: 2\nBytes: 13\n\nPreview (2 lines):\n1: first\n2: second\n");
}

#[test]
fn flat_walk_skips_subdirectories() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.csv"), "1\n2\n");
    write_file(&temp.path().join("sub/b.csv"), "1\n2\n3\n");

    corpus_stats()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Files: 1\nLines: 2\n"));

    corpus_stats()
        .arg(temp.path())
        .arg("-r")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Files: 2\nLines: 5\n"));
}

#[test]
fn extension_filter_is_exact() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.jsonl"), "{}\n");

    corpus_stats()
        .arg(temp.path())
        .arg("--ext")
        .arg(".jsonl")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Files: 1\n"));

    corpus_stats()
        .arg(temp.path())
        .arg("--ext=.json")
        .assert()
        .success()
        .stdout("Files: 0\nLines: 0\nBytes: 0\n");
}

#[test]
fn excluded_root_file_is_empty_success() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    write_file(&file, "hello\n");

    corpus_stats()
        .arg(&file)
        .arg("--ext")
        .arg(".csv")
        .assert()
        .success()
        .stdout("Files: 0\nLines: 0\nBytes: 0\n");
}

#[test]
fn json_format_emits_totals() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.csv"), "x\ny\n");

    let assert = corpus_stats()
        .arg(temp.path())
        .arg("--format")
        .arg("json")
        .arg("--preview")
        .arg("1")
        .assert()
        .success();

    let report = parse_json(&assert.get_output().stdout);
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["total_lines"], 2);
    assert_eq!(report["total_bytes"], 4);
    assert_eq!(report["error_count"], 0);
    assert_eq!(report["preview_lines"], serde_json::json!(["x"]));
}

#[test]
fn missing_path_argument_exits_1() {
    corpus_stats().assert().code(1);
}

#[test]
fn empty_path_argument_exits_1() {
    corpus_stats().arg("").assert().code(1);
}

#[test]
fn nonexistent_path_exits_20() {
    let temp = tempdir().unwrap();

    corpus_stats()
        .arg(temp.path().join("missing"))
        .assert()
        .code(20)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn bad_preview_exits_2() {
    corpus_stats()
        .arg(".")
        .arg("--preview")
        .arg("many")
        .assert()
        .code(2);
}

#[test]
fn malformed_extension_exits_3() {
    corpus_stats()
        .arg(".")
        .arg("--ext")
        .arg("jsonl")
        .assert()
        .code(3);
}

#[test]
fn unknown_flag_exits_4() {
    corpus_stats().arg(".").arg("--frobnicate").assert().code(4);
}

#[test]
fn extra_positional_exits_5() {
    corpus_stats().arg(".").arg("3").arg("more").assert().code(5);
}

#[test]
fn verbose_diagnostics_are_plain_text_when_piped() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.csv"), "x\n");

    corpus_stats()
        .env_remove("CORPUS_STATS_LOG")
        .arg(temp.path())
        .arg("-v")
        .assert()
        .success()
        .stdout("Files: 1\nLines: 1\nBytes: 2\n")
        .stderr(predicate::str::contains("scan complete"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn help_exits_0() {
    corpus_stats()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--recursive"));
}

#[cfg(unix)]
#[test]
fn device_root_exits_21() {
    if !Path::new("/dev/null").exists() {
        return;
    }
    corpus_stats().arg("/dev/null").assert().code(21);
}

#[cfg(unix)]
#[test]
fn unreadable_file_respects_continue_policy() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    write_file(&temp.path().join("1.csv"), "a\n");
    write_file(&temp.path().join("2.csv"), "b\n");
    write_file(&temp.path().join("3.csv"), "c\n");
    let locked = temp.path().join("2.csv");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop a privileged user; nothing to observe then.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    corpus_stats()
        .arg(temp.path())
        .assert()
        .code(10)
        .stderr(predicate::str::contains("2.csv"));

    corpus_stats()
        .arg(temp.path())
        .arg("--continue")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Files: 2\nLines: 2\nBytes: 4\n"))
        .stdout(predicate::str::contains("\nErrors: 1\n  - Failed to open"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn unreadable_root_file_exits_6() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    let file = temp.path().join("locked.csv");
    write_file(&file, "a\n");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::File::open(&file).is_ok() {
        return;
    }

    corpus_stats().arg(&file).arg("-c").assert().code(6);

    fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_exits_22_even_with_continue() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    write_file(&temp.path().join("c.csv"), "c\n");
    let locked = temp.path().join("locked");
    write_file(&locked.join("inner.csv"), "i\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let output = corpus_stats()
        .arg(temp.path())
        .arg("-r")
        .arg("-c")
        .output()
        .expect("failed to execute");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(output.status.code(), Some(22));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory iteration error"), "{stderr}");
    assert_eq!(stderr.matches(&*locked.to_string_lossy()).count(), 1, "{stderr}");
}
