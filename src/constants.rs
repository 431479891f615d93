// src/constants.rs

use std::time::Duration;

pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 10000;
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

// 直链通常数小时后失效
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);
pub const DEFAULT_CACHE_CAPACITY: usize = 512;
pub const DEFAULT_STATS_LOG_LIMIT: usize = 200;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

pub const FILENAME_TITLE_MAX_CHARS: usize = 40;
pub const FILENAME_FALLBACK_BASE: &str = "video";
pub const FILENAME_SUFFIX: &str = "_vidrelay";
pub const FILENAME_EXTENSION: &str = "mp4";
pub const MEDIA_CONTENT_TYPE: &str = "video/mp4";
pub const DEFAULT_TITLE: &str = "Facebook Video";
