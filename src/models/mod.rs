// src/models/mod.rs

pub mod api;

use self::api::{YtDlpFormat, YtDlpInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一个可供选择的媒体格式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaFormat {
    pub format_id: String,
    pub ext: String,
    pub url: Option<String>,
    pub height: Option<u32>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
}

impl MediaFormat {
    pub fn is_mp4(&self) -> bool {
        self.ext.eq_ignore_ascii_case("mp4")
    }

    /// 同时包含音轨和视频轨 (yt-dlp 用 "none" 表示缺失)
    pub fn has_audio_and_video(&self) -> bool {
        let present = |codec: &Option<String>| codec.as_deref().is_some_and(|c| c != "none");
        present(&self.acodec) && present(&self.vcodec)
    }
}

impl From<YtDlpFormat> for MediaFormat {
    fn from(f: YtDlpFormat) -> Self {
        Self {
            format_id: f.format_id,
            ext: f.ext,
            url: f.url,
            height: f.height,
            vcodec: f.vcodec,
            acodec: f.acodec,
        }
    }
}

/// 解析器返回的原始元数据
#[derive(Debug, Clone, Default)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    pub formats: Vec<MediaFormat>,
}

impl From<YtDlpInfo> for MediaInfo {
    fn from(info: YtDlpInfo) -> Self {
        // 播放列表取第一项
        let info = match info.entries {
            Some(entries) if !entries.is_empty() => {
                entries.into_iter().next().unwrap_or_default()
            }
            _ => info,
        };
        Self {
            title: info.title,
            thumbnail: info.thumbnail,
            url: info.url,
            formats: info.formats.into_iter().map(MediaFormat::from).collect(),
        }
    }
}

/// 一次成功解析的结果，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub direct_url: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NoMedia,
    Extractor(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoMedia => write!(f, "no media found"),
            FailureReason::Extractor(detail) => write!(f, "{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Success(ExtractionResult),
    Timeout,
    Failure(FailureReason),
}

// --- HTTP 请求与响应体 ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UrlRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfoResponse {
    pub title: String,
    pub thumbnail: Option<String>,
    pub download_url: String,
    pub quality: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub detail: String,
}
