// src/stats.rs

use chrono::Utc;
use dashmap::DashSet;
use log::info;
use serde::Serialize;
use std::{
    collections::VecDeque,
    net::IpAddr,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// 一次成功交付的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLogEntry {
    pub caller: Option<String>,
    pub url: String,
    pub kind: ServeKind,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeKind {
    /// 只返回了直链
    Link,
    /// 代为传输了文件内容
    Relay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub downloads: u64,
    pub cache_hits: u64,
    pub videos_served: u64,
    pub unique_callers: usize,
    pub download_logs: Vec<DownloadLogEntry>,
}

/// 请求统计的接收方。协调器只通过该接口上报，不关心存储方式。
pub trait StatsRecorder: Send + Sync {
    fn record_request(&self, caller: Option<IpAddr>);
    fn record_cache_hit(&self);
    fn record_download(&self, caller: Option<IpAddr>, url: &str, kind: ServeKind);
    fn snapshot(&self) -> StatsSnapshot;
}

/// 进程内统计，重启后清零。下载日志只保留最近的若干条。
#[derive(Debug)]
pub struct MemoryStats {
    requests: AtomicU64,
    downloads: AtomicU64,
    cache_hits: AtomicU64,
    videos_served: AtomicU64,
    callers: DashSet<IpAddr>,
    logs: Mutex<VecDeque<DownloadLogEntry>>,
    log_limit: usize,
}

impl MemoryStats {
    pub fn new(log_limit: usize) -> Self {
        Self {
            requests: AtomicU64::new(0),
            downloads: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            videos_served: AtomicU64::new(0),
            callers: DashSet::new(),
            logs: Mutex::new(VecDeque::with_capacity(log_limit)),
            log_limit,
        }
    }
}

impl StatsRecorder for MemoryStats {
    fn record_request(&self, caller: Option<IpAddr>) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if let Some(ip) = caller {
            self.callers.insert(ip);
        }
    }

    fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_download(&self, caller: Option<IpAddr>, url: &str, kind: ServeKind) {
        // 返回直链与代为传输都算作一次下载
        self.downloads.fetch_add(1, Ordering::Relaxed);
        self.videos_served.fetch_add(1, Ordering::Relaxed);
        info!(
            "交付视频 ({:?}) 给 {}: {}",
            kind,
            caller.map_or_else(|| "unknown".to_string(), |ip| ip.to_string()),
            url
        );

        if self.log_limit == 0 {
            return;
        }
        let mut logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        while logs.len() >= self.log_limit {
            logs.pop_front();
        }
        logs.push_back(DownloadLogEntry {
            caller: caller.map(|ip| ip.to_string()),
            url: url.to_string(),
            kind,
            timestamp: Utc::now().timestamp(),
        });
    }

    fn snapshot(&self) -> StatsSnapshot {
        let logs = self.logs.lock().unwrap_or_else(PoisonError::into_inner);
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            videos_served: self.videos_served.load(Ordering::Relaxed),
            unique_callers: self.callers.len(),
            download_logs: logs.iter().cloned().collect(),
        }
    }
}
