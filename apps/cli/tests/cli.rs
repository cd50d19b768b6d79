//! End-to-end tests for the `lenstr` binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn lenstr() -> Command {
    let mut cmd = Command::cargo_bin("lenstr").unwrap();
    for var in [
        "LENSTR_CONFIG",
        "LENSTR_HEAP__KIND",
        "LENSTR_HEAP__SIZE",
        "LENSTR_LOG__LEVEL",
        "LENSTR_LOG__FORMAT",
        "LENSTR_LOG__WRITER__TYPE",
        "LENSTR_LOG",
        "LENSTR_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn default_operands() {
    lenstr()
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains("out of memory").not());
}

#[test]
fn custom_operands() {
    lenstr().args(["foo", "bar"]).assert().success().stdout("foobar\n");
}

#[test]
fn empty_operands() {
    lenstr().args(["", ""]).assert().success().stdout("\n");
}

#[cfg(unix)]
#[test]
fn operands_are_opaque_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    lenstr()
        .arg(OsStr::from_bytes(b"\xff\x00"))
        .arg("ok")
        .assert()
        .success()
        .stdout(&b"\xff\x00ok\n"[..]);
}

// ============================================================================
// Heaps
// ============================================================================

#[test]
fn bump_heap_with_room() {
    lenstr()
        .args(["--heap", "bump", "--heap-size", "64"])
        .assert()
        .success()
        .stdout("Hello world!!!\n");
}

#[test]
fn bump_heap_exact_fit() {
    lenstr()
        .args(["--heap", "bump", "--heap-size", "14"])
        .assert()
        .success()
        .stdout("Hello world!!!\n");
}

#[test]
fn exhausted_bump_heap_terminates() {
    lenstr()
        .args(["--heap", "bump", "--heap-size", "4"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("out of memory"));
}

#[test]
fn stats_report_balanced_accounting() {
    lenstr()
        .arg("--stats")
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains(
            "1 allocations (14 bytes), 1 releases (14 bytes), 0 live bytes",
        ));
}

// ============================================================================
// Configuration layers
// ============================================================================

#[test]
fn environment_selects_heap() {
    lenstr()
        .env("LENSTR_HEAP__KIND", "bump")
        .env("LENSTR_HEAP__SIZE", "4")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of memory"));
}

#[test]
fn config_file_selects_heap() {
    let file = config_file("[heap]\nkind = \"bump\"\nsize = 4\n");

    lenstr()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of memory"));
}

#[test]
fn environment_overrides_config_file() {
    let file = config_file("[heap]\nkind = \"bump\"\nsize = 4\n");

    lenstr()
        .arg("--config")
        .arg(file.path())
        .env("LENSTR_HEAP__SIZE", "1024")
        .assert()
        .success()
        .stdout("Hello world!!!\n");
}

#[test]
fn flags_override_environment() {
    lenstr()
        .env("LENSTR_HEAP__KIND", "bump")
        .env("LENSTR_HEAP__SIZE", "4")
        .args(["--heap", "system"])
        .assert()
        .success()
        .stdout("Hello world!!!\n");
}

#[test]
fn missing_config_file() {
    lenstr()
        .args(["--config", "/nonexistent/lenstr.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_heap_kind_in_file() {
    let file = config_file("[heap]\nkind = \"slab\"\n");

    lenstr()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid configuration"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn invalid_log_filter() {
    lenstr()
        .args(["--log-level", "lenstr=loud"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid filter"));
}

#[test]
fn json_logs_stay_off_stdout() {
    lenstr()
        .args(["--log-level", "info", "--log-format", "json"])
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains("\"concatenating\""));
}

#[test]
fn exhaustion_is_logged_before_exit() {
    lenstr()
        .args(["--heap", "bump", "--heap-size", "4", "--log-level", "error"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("MEM:ARENA:EXHAUSTED"))
        .stderr(predicate::str::contains("out of memory"));
}

#[test]
fn nested_log_keys_from_environment() {
    lenstr()
        .env("LENSTR_LOG__LEVEL", "info")
        .env("LENSTR_LOG__FORMAT", "json")
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains("\"concatenating\""));
}

#[test]
fn log_table_in_config_file() {
    let file = config_file("[log]\nlevel = \"info\"\nformat = \"json\"\n");

    lenstr()
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains("\"concatenating\""));
}

#[test]
fn bare_lenstr_log_sets_level() {
    lenstr()
        .env("LENSTR_LOG", "debug")
        .assert()
        .success()
        .stdout("Hello world!!!\n")
        .stderr(predicate::str::contains("configuration loaded"));
}

#[test]
fn rust_log_sets_level() {
    lenstr()
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stderr(predicate::str::contains("concatenating"));
}

#[test]
fn bare_lenstr_log_honours_format_variable() {
    lenstr()
        .env("LENSTR_LOG", "info")
        .env("LENSTR_LOG_FORMAT", "json")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"concatenating\""));
}

#[test]
fn nested_level_overrides_bare_variable() {
    lenstr()
        .env("LENSTR_LOG", "debug")
        .env("LENSTR_LOG__LEVEL", "error")
        .assert()
        .success()
        .stderr(predicate::str::contains("concatenating").not());
}

#[test]
fn flag_overrides_bare_variable() {
    lenstr()
        .env("LENSTR_LOG", "debug")
        .args(["--log-level", "error"])
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded").not());
}

#[test]
fn stdout_log_writer_is_rejected() {
    let file = config_file("[log.writer]\ntype = \"stdout\"\n");

    lenstr()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("log writer must be stderr"));
}

#[test]
fn stdout_log_writer_from_environment_is_rejected() {
    lenstr()
        .env("LENSTR_LOG__WRITER__TYPE", "stdout")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("log writer must be stderr"));
}
