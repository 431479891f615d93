// src/extractor/ytdlp.rs

use super::MediaExtractor;
use crate::{
    config::AppConfig,
    error::*,
    models::{MediaInfo, api::YtDlpInfo},
    utils,
};
use async_trait::async_trait;
use log::{debug, warn};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// 调用 `yt-dlp` 可执行文件获取视频元数据，不下载文件本身
pub struct YtDlpExtractor {
    program: String,
    extra_args: Vec<String>,
    user_agent: String,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
            user_agent: crate::constants::USER_AGENT.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            program: config.ytdlp_path.clone(),
            extra_args: config.ytdlp_extra_args.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn build_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "--dump-single-json",
            "--skip-download",
            "--no-playlist",
            "--no-warnings",
            "--quiet",
            "--no-check-certificates",
            "--geo-bypass",
            "--user-agent",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(self.user_agent.clone());
        args.extend(self.extra_args.iter().cloned());
        // `--` 之后的参数不会被当作选项解析
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    fn parse_output(stdout: &[u8]) -> AppResult<MediaInfo> {
        let info: YtDlpInfo = serde_json::from_slice(stdout)
            .map_err(|e| AppError::ExtractionFailed(format!("yt-dlp 输出不是有效的 JSON: {}", e)))?;
        Ok(MediaInfo::from(info))
    }

    /// 取 stderr 中最后一条 ERROR 信息作为失败原因
    fn error_detail(stderr: &[u8]) -> String {
        let stderr = String::from_utf8_lossy(stderr);
        stderr
            .lines()
            .rev()
            .find(|line| line.contains("ERROR"))
            .or_else(|| stderr.lines().rev().find(|line| !line.trim().is_empty()))
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| "yt-dlp 未返回任何错误信息".to_string())
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(&self, url: &str, cancel: CancellationToken) -> AppResult<MediaInfo> {
        let args = self.build_args(url);
        debug!("执行 {} {}", self.program, args.join(" "));

        // 子进程在句柄被丢弃时会被终止，任务被中止时不会遗留进程
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::ExtractionFailed(format!("无法启动 {}: {}", self.program, e))
            })?;

        let output = tokio::select! {
            output = child.wait_with_output() => output?,
            _ = cancel.cancelled() => {
                warn!("解析已取消，终止 yt-dlp 进程: {}", utils::truncate_text(url, 80));
                return Err(AppError::Cancelled);
            }
        };

        if !output.status.success() {
            let detail = Self::error_detail(&output.stderr);
            debug!("yt-dlp 退出状态 {}: {}", output.status, detail);
            return Err(AppError::ExtractionFailed(detail));
        }

        Self::parse_output(&output.stdout)
    }
}
