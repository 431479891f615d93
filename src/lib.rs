// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod server;
pub mod stats;
pub mod symbols;
pub mod utils;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    error::AppResult,
    extractor::{MediaExtractor, YtDlpExtractor},
    resolver::{ExtractionRunner, RequestCoordinator, ResolutionCache},
    server::AppState,
    stats::{MemoryStats, StatsRecorder},
};
use colored::*;
use log::{debug, info};
use std::sync::Arc;
use tokio::net::TcpListener;

/// 按配置组装请求协调器，解析器由调用方注入
pub fn build_coordinator(
    config: &AppConfig,
    extractor: Arc<dyn MediaExtractor>,
    stats: Arc<dyn StatsRecorder>,
) -> AppResult<RequestCoordinator> {
    let cache = Arc::new(ResolutionCache::new(config.cache_capacity, config.cache_ttl));
    let runner = ExtractionRunner::new(extractor, config.extract_timeout);
    let http_client = RobustClient::new(config)?;
    Ok(RequestCoordinator::new(cache, runner, stats, http_client))
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    let config = AppConfig::new(&args)?;
    debug!("加载的应用配置: {:?}", config);

    let extractor: Arc<dyn MediaExtractor> = Arc::new(YtDlpExtractor::from_config(&config));
    let stats: Arc<dyn StatsRecorder> = Arc::new(MemoryStats::new(config.stats_log_limit));
    let coordinator = build_coordinator(&config, extractor, stats)?;

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "解析时限 {:?}，缓存容量 {}，缓存有效期 {:?}，yt-dlp: {}",
        config.extract_timeout, config.cache_capacity, config.cache_ttl, config.ytdlp_path
    );
    println!(
        "{} 正在监听 {}",
        *symbols::INFO,
        format!("http://{}", listener.local_addr()?).cyan()
    );

    server::serve(listener, AppState { coordinator }).await
}
