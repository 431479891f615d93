// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

// 辅助函数，避免重复
fn main_command() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("PORT");
    cmd
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let mut cmd = main_command();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"))
        .stdout(predicate::str::contains("--extract-timeout"));
}

#[test]
fn test_version_flag() {
    let mut cmd = main_command();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_port_is_rejected() {
    let mut cmd = main_command();
    cmd.args(["--port", "not-a-port"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}

// --- 测试配置文件 ---

#[test]
fn test_missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let mut cmd = main_command();
    cmd.arg("--config").arg(&missing).args(["--log-level", "off"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("配置文件"))
        .stderr(predicate::str::contains("不存在"));
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let mut file = File::create(&config_path).unwrap();
    writeln!(file, "{{ \"cache\": {{ \"capacity\": \"lots\" }} }}").unwrap();

    let mut cmd = main_command();
    cmd.arg("--config").arg(&config_path).args(["--log-level", "off"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("解析配置文件"));
}
