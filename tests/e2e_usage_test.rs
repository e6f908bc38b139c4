//! E2E tests for the panel and `--json` output against a fake `gh`.
#![cfg(unix)]

mod common;

use common::Sandbox;
use common::logger::TestLogger;
use copilot_usage::test_utils::{fake_gh_script, make_test_billing_json};
use copilot_usage::{assert_json_valid, assert_no_ansi_codes};
use predicates::prelude::*;
use serde_json::json;

fn sandbox_with_gh() -> Sandbox {
    let sandbox = Sandbox::new();
    sandbox.install("gh", &fake_gh_script("octocat", &make_test_billing_json()));
    sandbox
}

#[test]
fn panel_shows_totals_for_default_plan() {
    let log = TestLogger::new("panel_shows_totals_for_default_plan");
    log.phase("setup");
    let sandbox = sandbox_with_gh();

    log.phase("execute");
    let assert = sandbox
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GitHub Copilot Pro+ - Premium Requests",
        ))
        .stdout(predicate::str::contains("• octocat"))
        .stdout(predicate::str::contains("Overall:  150/1500 (10.0%)"))
        .stdout(predicate::str::contains("Claude Sonnet 4"))
        .stdout(predicate::str::contains("Resets:"));

    log.phase("verify");
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_no_ansi_codes!(&stdout);

    log.finish_ok();
}

#[test]
fn plan_flag_changes_limit() {
    sandbox_with_gh()
        .command()
        .args(["-p", "pro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Copilot Pro - Premium Requests"))
        .stdout(predicate::str::contains("Overall:  150/300 (50.0%)"));
}

#[test]
fn env_plan_is_used_when_flag_absent() {
    sandbox_with_gh()
        .command()
        .env("GH_COPILOT_PLAN", "free")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall:  150/50 (300.0%)"));
}

#[test]
fn unknown_env_plan_is_ignored() {
    sandbox_with_gh()
        .command()
        .env("GH_COPILOT_PLAN", "diamond")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall:  150/1500 (10.0%)"));
}

#[test]
fn config_file_supplies_plan_and_limit() {
    let sandbox = sandbox_with_gh();
    sandbox.write_config("[general]\nplan = \"business\"\nlimit = 600\n");

    sandbox
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Copilot Business"))
        .stdout(predicate::str::contains("Overall:  150/600 (25.0%)"));
}

#[test]
fn json_report_shape() {
    let log = TestLogger::new("json_report_shape");
    let output = sandbox_with_gh()
        .command()
        .args(["--json", "--plan", "pro", "--limit", "200"])
        .output()
        .expect("run binary");

    log.phase("verify");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    assert_json_valid!(&stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(report["username"], "octocat");
    assert_eq!(report["plan"], "pro");
    assert_eq!(report["limit"], 200);
    assert_eq!(report["used"], 150.0);
    assert_eq!(report["percentage"], "75.0");
    assert!(report["month"].as_str().is_some_and(|m| m.contains(' ')));
    assert_eq!(
        report["models"],
        json!({ "Claude Sonnet 4": 105.0, "GPT-5": 40.0, "Gemini 2.5 Pro": 5.0 })
    );

    let keys: Vec<&str> = report
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        ["username", "plan", "limit", "used", "percentage", "month", "models"]
    );
    assert!(stdout.starts_with("{\n  \"username\""), "two-space indent");

    log.finish_ok();
}

#[test]
fn malformed_billing_response_exits_one() {
    let sandbox = Sandbox::new();
    sandbox.install("gh", &fake_gh_script("octocat", "<html>rate limited</html>"));

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to parse response"));
}
