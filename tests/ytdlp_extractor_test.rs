// tests/ytdlp_extractor_test.rs

#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio_util::sync::CancellationToken;
use vid_relay::{
    error::AppError,
    extractor::{MediaExtractor, YtDlpExtractor},
    models::ExtractionOutcome,
    resolver::ExtractionRunner,
};

const PAGE_URL: &str = "https://www.facebook.com/watch/?v=777";

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn extractor_for(path: &Path) -> YtDlpExtractor {
    YtDlpExtractor::new(path.to_string_lossy().into_owned())
}

/// 读取脚本写下的进程号
fn read_pid(pid_file: &Path) -> u32 {
    let content = fs::read_to_string(pid_file)
        .unwrap_or_else(|e| panic!("pid 文件 {:?} 不存在: {}", pid_file, e));
    content.trim().parse().unwrap()
}

/// 进程已退出 (不存在或只剩僵尸状态) 视为已终止
#[cfg(target_os = "linux")]
fn process_exited(pid: u32) -> bool {
    match fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Err(_) => true,
        Ok(stat) => {
            let state = stat
                .rsplit_once(')')
                .and_then(|(_, rest)| rest.trim_start().chars().next());
            matches!(state, Some('Z') | Some('X'))
        }
    }
}

#[cfg(target_os = "linux")]
async fn assert_process_killed(pid_file: &Path) {
    let pid = read_pid(pid_file);
    for _ in 0..100 {
        if process_exited(pid) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("yt-dlp 子进程 {} 在放弃解析后仍在运行", pid);
}

#[cfg(not(target_os = "linux"))]
async fn assert_process_killed(pid_file: &Path) {
    read_pid(pid_file);
}

/// 所有脚本先写好再执行，避免并发 fork 时遇到 ETXTBSY
#[tokio::test(flavor = "multi_thread")]
async fn test_ytdlp_subprocess_behaviour() {
    let dir = tempfile::tempdir().unwrap();

    let ok = write_script(
        dir.path(),
        "ok.sh",
        r#"cat <<'EOF'
{
  "title": "Sunset timelapse",
  "thumbnail": "https://cdn.example.com/t.jpg",
  "formats": [
    { "format_id": "sd", "ext": "mp4", "url": "https://cdn.example.com/sd.mp4", "height": 360, "vcodec": "avc1", "acodec": "mp4a" },
    { "format_id": "hd", "ext": "mp4", "url": "https://cdn.example.com/hd.mp4", "height": 720, "vcodec": "avc1", "acodec": "mp4a" }
  ]
}
EOF"#,
    );
    let failing = write_script(
        dir.path(),
        "fail.sh",
        "echo '[facebook] 777: Downloading webpage' >&2\necho 'ERROR: boom' >&2\nexit 1",
    );
    let slow = write_script(dir.path(), "slow.sh", "echo $$ > \"$0.pid\"\nexec sleep 30");
    let slow_pid_file = dir.path().join("slow.sh.pid");
    let missing = dir.path().join("does-not-exist");

    // 成功：解析 JSON 并选出最高画质
    let info = extractor_for(&ok)
        .extract(PAGE_URL, CancellationToken::new())
        .await
        .expect("extract should succeed");
    assert_eq!(info.title.as_deref(), Some("Sunset timelapse"));
    assert_eq!(info.formats.len(), 2);

    let runner = ExtractionRunner::new(Arc::new(extractor_for(&ok)), Duration::from_secs(5));
    match runner.run(PAGE_URL).await {
        ExtractionOutcome::Success(result) => {
            assert_eq!(result.direct_url, "https://cdn.example.com/hd.mp4");
            assert_eq!(result.quality, "720p • MP4");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    // 非零退出：取最后一条 ERROR 作为原因
    let err = extractor_for(&failing)
        .extract(PAGE_URL, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExtractionFailed(ref d) if d == "ERROR: boom"));

    // 可执行文件不存在
    let err = extractor_for(&missing)
        .extract(PAGE_URL, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExtractionFailed(_)));

    // 取消令牌触发后立即返回
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });
    let start = Instant::now();
    let err = extractor_for(&slow).extract(PAGE_URL, cancel).await.unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_process_killed(&slow_pid_file).await;
    fs::remove_file(&slow_pid_file).unwrap();

    // 超过时限：返回 Timeout，而不是等待子进程结束
    let runner = ExtractionRunner::new(Arc::new(extractor_for(&slow)), Duration::from_millis(300));
    let start = Instant::now();
    let outcome = runner.run(PAGE_URL).await;
    assert_eq!(outcome, ExtractionOutcome::Timeout);
    assert!(start.elapsed() < Duration::from_secs(5));
    // 超时后子进程被终止，不会遗留
    assert_process_killed(&slow_pid_file).await;
}
