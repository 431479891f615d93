// src/resolver/coordinator.rs

use super::{cache::ResolutionCache, runner::ExtractionRunner};
use crate::{
    client::RobustClient,
    error::*,
    models::{ExtractionOutcome, ExtractionResult, FailureReason, FetchResponse, MediaInfoResponse},
    stats::{ServeKind, StatsRecorder},
    utils,
};
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use log::{debug, info, warn};
use std::{io, net::IpAddr, sync::Arc};
use url::Url;

/// 正在向客户端转发的媒体内容
pub struct MediaStream {
    pub filename: String,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, io::Result<Bytes>>,
}

/// 单个请求的编排：查缓存，未命中则限时解析，失败则返回错误
#[derive(Clone)]
pub struct RequestCoordinator {
    cache: Arc<ResolutionCache>,
    runner: ExtractionRunner,
    stats: Arc<dyn StatsRecorder>,
    http_client: RobustClient,
}

impl RequestCoordinator {
    pub fn new(
        cache: Arc<ResolutionCache>,
        runner: ExtractionRunner,
        stats: Arc<dyn StatsRecorder>,
        http_client: RobustClient,
    ) -> Self {
        Self {
            cache,
            runner,
            stats,
            http_client,
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn stats(&self) -> &dyn StatsRecorder {
        self.stats.as_ref()
    }

    pub async fn resolve(&self, url: &str) -> AppResult<Arc<ExtractionResult>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidInput);
        }

        if let Some(hit) = self.cache.get(url) {
            debug!("解析缓存命中: {}", utils::truncate_text(url, 80));
            self.stats.record_cache_hit();
            return Ok(hit);
        }
        debug!("解析缓存未命中: {}", utils::truncate_text(url, 80));

        match self.runner.run(url).await {
            ExtractionOutcome::Success(result) => {
                let result = Arc::new(result);
                self.cache.put(url, result.clone());
                Ok(result)
            }
            ExtractionOutcome::Timeout => Err(AppError::Timeout),
            ExtractionOutcome::Failure(FailureReason::NoMedia) => Err(AppError::NoMediaFound),
            ExtractionOutcome::Failure(FailureReason::Extractor(detail)) => {
                Err(AppError::ExtractionFailed(detail))
            }
        }
    }

    /// 只返回直链和文件名，不传输文件内容
    pub async fn fetch_metadata(
        &self,
        url: &str,
        caller: Option<IpAddr>,
    ) -> AppResult<FetchResponse> {
        self.stats.record_request(caller);
        let result = self.resolve(url).await?;
        self.stats.record_download(caller, url.trim(), ServeKind::Link);

        Ok(FetchResponse {
            success: true,
            url: result.direct_url.clone(),
            filename: utils::build_download_filename(&result.title),
        })
    }

    pub async fn media_info(
        &self,
        url: &str,
        caller: Option<IpAddr>,
    ) -> AppResult<MediaInfoResponse> {
        self.stats.record_request(caller);
        let result = self.resolve(url).await?;
        self.stats.record_download(caller, url.trim(), ServeKind::Link);

        Ok(MediaInfoResponse {
            title: result.title.clone(),
            thumbnail: result.thumbnail.clone(),
            download_url: result.direct_url.clone(),
            quality: result.quality.clone(),
        })
    }

    /// 解析后打开到直链的流式请求，内容按块转发，不在内存中整体缓冲
    pub async fn download_bytes(
        &self,
        url: &str,
        caller: Option<IpAddr>,
    ) -> AppResult<MediaStream> {
        self.stats.record_request(caller);
        let result = self.resolve(url).await?;

        let direct = Url::parse(&result.direct_url).map_err(|e| {
            AppError::UpstreamFetchFailed(format!("直链无效 '{}': {}", result.direct_url, e))
        })?;
        let response = self.http_client.get(direct).await.inspect_err(|e| {
            warn!("获取视频文件失败: {} ({})", e, utils::truncate_text(url, 80));
        })?;

        let content_length = response.content_length();
        let filename = utils::build_download_filename(&result.title);
        info!(
            "开始转发视频 '{}' (大小: {:?})",
            filename, content_length
        );
        self.stats.record_download(caller, url.trim(), ServeKind::Relay);

        let body = response
            .bytes_stream()
            .map_err(io::Error::other)
            .boxed();

        Ok(MediaStream {
            filename,
            content_length,
            body,
        })
    }

    /// 手动使某个链接的缓存失效
    pub fn invalidate(&self, url: &str) -> bool {
        self.cache.invalidate(url.trim())
    }
}
