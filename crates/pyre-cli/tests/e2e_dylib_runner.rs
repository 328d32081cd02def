//! End-to-end runs against a real cdylib compiled with rustc at test time.
//! Covers symbol resolution, argument forwarding, payload status
//! forwarding, and artifact burn-down on every branch.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURE_SOURCE: &str = r#"
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

fn collect(argc: c_int, argv: *const *const c_char) -> Vec<String> {
    let mut args = Vec::new();
    for i in 0..argc as isize {
        let raw = unsafe { CStr::from_ptr(*argv.offset(i)) };
        args.push(raw.to_string_lossy().into_owned());
    }
    args
}

/// Writes every forwarded argument after the first to the file named by the
/// first, newline separated.
#[no_mangle]
pub extern "C" fn demo_tool_main(argc: c_int, argv: *const *const c_char) -> c_int {
    let args = collect(argc, argv);
    let Some(out) = args.first() else { return 64 };
    if fs_write(out, &args[1..]).is_err() {
        return 65;
    }
    0
}

fn fs_write(out: &str, lines: &[String]) -> std::io::Result<()> {
    std::fs::write(out, lines.join("\n"))
}

#[no_mangle]
pub extern "C" fn demo_fail_main(argc: c_int, argv: *const *const c_char) -> c_int {
    let _ = (argc, argv);
    42
}
"#;

fn compile_fixture(dir: &Path) -> PathBuf {
    let source = dir.join("fixture.rs");
    fs::write(&source, FIXTURE_SOURCE).unwrap();
    let artifact = dir.join(format!("payload{}", std::env::consts::DLL_SUFFIX));
    let status = std::process::Command::new("rustc")
        .args(["--crate-type", "cdylib", "--edition", "2021", "-o"])
        .arg(&artifact)
        .arg(&source)
        .status()
        .expect("rustc must be available to build the fixture dylib");
    assert!(status.success(), "fixture dylib failed to compile");
    artifact
}

fn pyre() -> Command {
    Command::cargo_bin("pyre").unwrap()
}

#[test]
fn runs_entry_point_forwards_args_and_burns_artifact() {
    let dir = TempDir::new().unwrap();
    let artifact = compile_fixture(dir.path());
    let out = dir.path().join("observed-args.txt");

    pyre()
        .arg("")
        .arg(&artifact)
        .arg("demo.tool")
        .arg(&out)
        .args(["alpha", "beta", "gamma", "--delta", "-e"])
        .assert()
        .success();

    let observed = fs::read_to_string(&out).unwrap();
    assert_eq!(observed, "alpha\nbeta\ngamma\n--delta\n-e");
    assert!(!artifact.exists(), "artifact must be deleted after a successful run");
}

#[test]
fn nonzero_payload_status_is_forwarded_and_artifact_still_burns() {
    let dir = TempDir::new().unwrap();
    let artifact = compile_fixture(dir.path());

    pyre()
        .arg("")
        .arg(&artifact)
        .arg("demo.fail")
        .assert()
        .code(42);

    assert!(!artifact.exists(), "artifact must be deleted after a failed run");
}

#[test]
fn missing_entry_point_aborts_before_invocation() {
    let dir = TempDir::new().unwrap();
    let artifact = compile_fixture(dir.path());

    pyre()
        .arg("")
        .arg(&artifact)
        .arg("no.such.entry")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no.such.entry"))
        .stderr(predicate::str::contains("no_such_entry_main"));

    // Explicit cleanup was skipped; on unix the exit-time safety net still
    // removed the artifact.
    #[cfg(unix)]
    assert!(!artifact.exists());
}

#[test]
fn debug_flag_traces_each_phase() {
    let dir = TempDir::new().unwrap();
    let artifact = compile_fixture(dir.path());
    let out = dir.path().join("observed-args.txt");

    pyre()
        .arg("wrapper -debug now")
        .arg(&artifact)
        .arg("demo.tool")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("removal scheduled for process exit"))
        .stderr(predicate::str::contains("entry point resolved"))
        .stderr(predicate::str::contains("invoking entry point"))
        .stderr(predicate::str::contains("deleting artifact"));
}
