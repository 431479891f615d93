// tests/common/mod.rs

#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio_util::sync::CancellationToken;
use vid_relay::{
    config::AppConfig,
    error::{AppError, AppResult},
    extractor::MediaExtractor,
    models::{MediaFormat, MediaInfo},
    resolver::RequestCoordinator,
    stats::{MemoryStats, StatsRecorder},
};

/// 构造一个包含单个 720p MP4 的解析结果
pub fn sample_info(title: &str, direct_url: &str) -> MediaInfo {
    MediaInfo {
        title: Some(title.to_string()),
        thumbnail: Some("https://cdn.example.com/thumb.jpg".to_string()),
        url: None,
        formats: vec![MediaFormat {
            format_id: "hd".to_string(),
            ext: "mp4".to_string(),
            url: Some(direct_url.to_string()),
            height: Some(720),
            vcodec: Some("avc1".to_string()),
            acodec: Some("mp4a".to_string()),
        }],
    }
}

/// 按预设行为响应的解析器，并记录被调用的次数
pub struct StubExtractor {
    behavior: Behavior,
    calls: AtomicUsize,
    torn_down: Arc<AtomicBool>,
}

pub enum Behavior {
    Succeed { info: MediaInfo, delay: Duration },
    Fail(String),
    NeverReturn,
}

impl StubExtractor {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            torn_down: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn succeeding(info: MediaInfo) -> Arc<Self> {
        Self::new(Behavior::Succeed {
            info,
            delay: Duration::ZERO,
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Self::new(Behavior::Fail(detail.to_string()))
    }

    pub fn hanging() -> Arc<Self> {
        Self::new(Behavior::NeverReturn)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 挂起的解析任务是否已被销毁
    pub fn was_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaExtractor for StubExtractor {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn extract(&self, _url: &str, _cancel: CancellationToken) -> AppResult<MediaInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Succeed { info, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(info.clone())
            }
            Behavior::Fail(detail) => Err(AppError::ExtractionFailed(detail.clone())),
            Behavior::NeverReturn => {
                // 故意忽略取消令牌，只有中止任务才能结束它
                let _flag = DropFlag(self.torn_down.clone());
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn test_config(extract_timeout: Duration) -> AppConfig {
    AppConfig {
        extract_timeout,
        ..AppConfig::default()
    }
}

pub fn coordinator_with(
    extractor: Arc<StubExtractor>,
    extract_timeout: Duration,
) -> (RequestCoordinator, Arc<MemoryStats>) {
    let stats = Arc::new(MemoryStats::new(10));
    let coordinator = vid_relay::build_coordinator(
        &test_config(extract_timeout),
        extractor,
        stats.clone() as Arc<dyn StatsRecorder>,
    )
    .expect("failed to build coordinator");
    (coordinator, stats)
}
