#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

struct Run {
    success: bool,
    stdout: String,
}

fn run_solver(args: &[&str]) -> Run {
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_sapling-solver"));

    let mut child = Command::new(solver)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to run solver");

    match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs());
        }
        Ok(Some(_)) => {}
        Err(e) => panic!("error solving instance {e}"),
    }

    let output = child.wait_with_output().expect("failed to collect output");
    Run {
        success: output.status.success(),
        stdout: String::from_utf8(output.stdout).expect("output is utf-8"),
    }
}

#[test]
fn eight_queens() {
    let run = run_solver(&["queens", "8"]);

    assert!(run.success);
    assert!(run.stdout.contains("92 solutions"));
    assert!(run.stdout.contains("=========="));
}

#[test]
fn binary_enumeration_with_discrepancy_budget() {
    let run = run_solver(&["binary", "4", "--discrepancy", "2", "--print-solutions"]);

    assert!(run.success);
    assert!(run.stdout.contains("11 solutions"));
    assert!(run.stdout.contains("solution 1: 0 0 0 0"));
}

#[test]
fn solution_limit_stops_the_search() {
    let run = run_solver(&[
        "queens",
        "8",
        "--strategy",
        "max-marginal",
        "--cell-strategy",
        "copy",
        "--solution-limit",
        "3",
    ]);

    assert!(run.success);
    assert!(run.stdout.contains("3 solutions"));
    assert!(run.stdout.contains("=====UNKNOWN====="));
}

#[test]
fn statistics_are_logged_on_request() {
    let run = run_solver(&["binary", "3", "--log-statistics"]);

    assert!(run.success);
    assert!(run.stdout.contains("%% stat: numSolutions=8"));
    assert!(run.stdout.contains("%% stat-end"));
}

#[test]
fn empty_problem_is_rejected() {
    let run = run_solver(&["queens", "0"]);

    assert!(!run.success);
}

#[test]
fn sizes_beyond_the_domain_capacity_are_rejected() {
    let run = run_solver(&["queens", "20000000"]);

    assert!(!run.success);
}
