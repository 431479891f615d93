// src/config.rs

pub mod file;

use self::file::load_external_config;
use crate::{cli::Cli, constants, error::AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractorFileConfig {
    pub ytdlp_path: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheFileConfig {
    pub capacity: Option<usize>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatsFileConfig {
    pub log_limit: Option<usize>,
}

/// 配置文件 (JSON) 的结构，所有字段均可省略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub extractor: ExtractorFileConfig,
    #[serde(default)]
    pub cache: CacheFileConfig,
    #[serde(default)]
    pub stats: StatsFileConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_retries: u32,
    pub ytdlp_path: String,
    pub ytdlp_extra_args: Vec<String>,
    pub extract_timeout: Duration,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub stats_log_limit: usize,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_external_config(args.config.as_deref())?;
        Ok(Self::merge(args, external_config))
    }

    /// 命令行参数优先于配置文件，配置文件优先于内置默认值
    pub fn merge(args: &Cli, external: ExternalConfig) -> Self {
        let ExternalConfig {
            network,
            extractor,
            cache,
            stats,
        } = external;

        Self {
            host: args.host.clone(),
            port: args.port,
            user_agent: network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            read_timeout: Duration::from_secs(
                network
                    .read_timeout_secs
                    .unwrap_or(constants::DEFAULT_READ_TIMEOUT_SECS),
            ),
            max_retries: network.max_retries.unwrap_or(constants::DEFAULT_MAX_RETRIES),
            ytdlp_path: args
                .ytdlp_path
                .clone()
                .or(extractor.ytdlp_path)
                .unwrap_or_else(|| constants::DEFAULT_YTDLP_PATH.into()),
            ytdlp_extra_args: extractor.extra_args,
            extract_timeout: args
                .extract_timeout
                .or(extractor.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(constants::DEFAULT_EXTRACT_TIMEOUT),
            cache_capacity: args
                .cache_capacity
                .or(cache.capacity)
                .unwrap_or(constants::DEFAULT_CACHE_CAPACITY)
                .max(1),
            cache_ttl: args
                .cache_ttl
                .or(cache.ttl_secs)
                .map(Duration::from_secs)
                .unwrap_or(constants::DEFAULT_CACHE_TTL),
            stats_log_limit: stats.log_limit.unwrap_or(constants::DEFAULT_STATS_LOG_LIMIT),
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(15),
            max_retries: 0,
            ytdlp_path: constants::DEFAULT_YTDLP_PATH.to_string(),
            ytdlp_extra_args: Vec::new(),
            extract_timeout: Duration::from_secs(2),
            cache_capacity: 16,
            cache_ttl: Duration::from_secs(60),
            stats_log_limit: 10,
        }
    }
}
