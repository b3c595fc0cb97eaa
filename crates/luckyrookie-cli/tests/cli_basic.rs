//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_luckyrookie"))
        .args(args)
        .env("LUCKYROOKIE_DATA_DIR", dir.path())
        .env_remove("LUCKYROOKIE_QUOTE_API_KEY")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

#[test]
fn test_zodiac() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["zodiac", "12", "7"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Sagittarius");
}

#[test]
fn test_zodiac_rejects_bad_month() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["zodiac", "13", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn test_color_json() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["color", "sunday", "--json"]);
    assert_eq!(code, 0);
    let chart: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(chart["work"][0]["name"], "Red");
    assert_eq!(chart["unlucky"][1]["hex"], "#0000FF");
}

#[test]
fn test_lucky_number_from_argument() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["lucky", "number", "2002-12-07"]);
    assert_eq!(code, 0);
    let n: u8 = stdout.trim().parse().unwrap();
    assert!((1..=9).contains(&n));
}

#[test]
fn test_lucky_bad_birth_date() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["lucky", "number", "07/12/2002"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("YYYY-MM-DD"));
}

#[test]
fn test_lucky_reveal_uses_profile_birth_date() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["config", "set", "profile.birth_date", "1990-05-17"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(&dir, &["lucky", "reveal", "--json"]);
    assert_eq!(code, 0);
    let reveal: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(reveal["birth"], "1990-05-17");
    assert_eq!(reveal["slots"].as_array().unwrap().len(), 3);
    assert!(reveal["next"].is_string());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (_, stdout, _) = run_cli(&dir, &["config", "get", "profile.city"]);
    assert_eq!(stdout.trim(), "Seoul");

    run_cli(&dir, &["config", "set", "profile.city", "Busan"]);
    let (_, stdout, _) = run_cli(&dir, &["config", "get", "profile.city"]);
    assert_eq!(stdout.trim(), "Busan");

    let (code, _, _) = run_cli(&dir, &["config", "get", "profile.nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_breathe_patterns() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["breathe", "patterns"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("4-7-8 Relaxing"));
    assert!(stdout.contains("Box Breathing"));
}

#[test]
fn test_breathe_run_records_cycles() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["breathe", "run", "1,0,1,0", "--cycles", "1", "--quiet"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1 cycle(s)"), "stdout: {stdout}");

    let (_, stdout, _) = run_cli(&dir, &["breathe", "today"]);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["cycles"], 1);
    assert_eq!(record["pattern"], "Custom 1,0,1,0");
}

#[test]
fn test_diary_save_awards_one_clover_per_date() {
    let dir = TempDir::new().unwrap();
    let args = ["diary", "save", "--date", "2024-08-01", "--song", "Lucky", "--note", "sunny"];

    let (code, stdout, _) = run_cli(&dir, &args);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "+1 Clover earned! Total: 1");

    let (_, stdout, _) = run_cli(&dir, &args);
    assert_eq!(stdout.trim(), "Diary saved successfully!");

    let (_, stdout, _) = run_cli(&dir, &["clovers"]);
    let ledger: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ledger["clovers"], 1);
    assert_eq!(ledger["rewardedDates"][0], "2024-08-01");
}

#[test]
fn test_diary_show_prefers_draft_once() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["diary", "save", "--date", "2024-08-02", "--song", "Saved"]);
    run_cli(&dir, &["diary", "draft", "--date", "2024-08-02", "--song", "Drafted"]);

    let (_, stdout, _) = run_cli(&dir, &["diary", "show", "--date", "2024-08-02", "--json"]);
    let opened: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(opened["source"], "draft");
    assert_eq!(opened["entry"]["song"], "Drafted");

    let (_, stdout, _) = run_cli(&dir, &["diary", "show", "--date", "2024-08-02", "--json"]);
    let opened: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(opened["source"], "saved");
    assert_eq!(opened["entry"]["song"], "Saved");
}

#[test]
fn test_auth_rejects_unknown_credential() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["auth", "set", "github_token", "x"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown credential"));
}
