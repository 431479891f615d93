// src/resolver/runner.rs

use crate::{
    error::AppError,
    extractor::{MediaExtractor, format},
    models::{ExtractionOutcome, FailureReason},
    utils,
};
use log::{debug, info, warn};
use std::{sync::Arc, time::Duration};
use tokio_util::{sync::CancellationToken, task::AbortOnDropHandle};

/// 在独立任务中调用解析器，并强制一个硬性的等待时限
#[derive(Clone)]
pub struct ExtractionRunner {
    extractor: Arc<dyn MediaExtractor>,
    deadline: Duration,
}

impl ExtractionRunner {
    pub fn new(extractor: Arc<dyn MediaExtractor>, deadline: Duration) -> Self {
        Self {
            extractor,
            deadline,
        }
    }

    /// 每次调用都创建自己的任务和取消令牌，不与其他请求共享。
    /// 超时后取消令牌并中止任务，解析器的结果 (如果有) 被丢弃。
    pub async fn run(&self, url: &str) -> ExtractionOutcome {
        let cancel = CancellationToken::new();
        let extractor = self.extractor.clone();
        let task_url = url.to_string();
        let task_cancel = cancel.clone();

        debug!(
            "启动解析任务 [{}]，时限 {:?}: {}",
            extractor.name(),
            self.deadline,
            utils::truncate_text(url, 80)
        );
        // 调用方在等待期间被丢弃 (例如客户端断开) 时，令牌被取消且任务被中止
        let mut handle = AbortOnDropHandle::new(tokio::spawn(async move {
            extractor.extract(&task_url, task_cancel).await
        }));
        let _cancel_on_drop = cancel.clone().drop_guard();

        match tokio::time::timeout(self.deadline, &mut handle).await {
            Ok(Ok(Ok(media))) => match format::select_media(media) {
                Some(result) => {
                    info!(
                        "解析成功 ({}): {}",
                        result.quality,
                        utils::truncate_text(url, 80)
                    );
                    ExtractionOutcome::Success(result)
                }
                None => {
                    warn!("解析完成但没有可用直链: {}", utils::truncate_text(url, 80));
                    ExtractionOutcome::Failure(FailureReason::NoMedia)
                }
            },
            Ok(Ok(Err(e))) => {
                warn!("解析失败: {} ({})", e, utils::truncate_text(url, 80));
                let detail = match e {
                    AppError::ExtractionFailed(detail) => detail,
                    other => other.to_string(),
                };
                ExtractionOutcome::Failure(FailureReason::Extractor(detail))
            }
            Ok(Err(join_err)) => {
                log::error!("解析任务异常退出: {}", join_err);
                ExtractionOutcome::Failure(FailureReason::Extractor(format!(
                    "解析任务异常退出: {}",
                    join_err
                )))
            }
            Err(_) => {
                warn!(
                    "解析超过 {:?} 未完成，取消任务: {}",
                    self.deadline,
                    utils::truncate_text(url, 80)
                );
                cancel.cancel();
                handle.abort();
                ExtractionOutcome::Timeout
            }
        }
    }
}
