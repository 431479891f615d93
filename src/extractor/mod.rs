// src/extractor/mod.rs

pub mod format;
pub mod ytdlp;

use crate::{error::*, models::MediaInfo};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use ytdlp::YtDlpExtractor;

/// 将视频页面链接解析为媒体元数据的外部能力。
/// 实现方应在 `cancel` 被触发后尽快停止工作并释放资源。
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// 解析器名称 (用于日志)
    fn name(&self) -> &'static str;

    async fn extract(&self, url: &str, cancel: CancellationToken) -> AppResult<MediaInfo>;
}
