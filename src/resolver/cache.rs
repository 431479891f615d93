// src/resolver/cache.rs

use crate::models::ExtractionResult;
use dashmap::DashMap;
use log::debug;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

#[derive(Debug, Clone)]
struct CacheEntry {
    result: Arc<ExtractionResult>,
    inserted_at: Instant,
}

/// 源链接 -> 最近一次成功解析结果。
/// 只缓存成功结果；条目超过有效期或总数超过容量时被淘汰。
#[derive(Debug)]
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry>,
    capacity: usize,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn get(&self, url: &str) -> Option<Arc<ExtractionResult>> {
        if let Some(entry) = self.entries.get(url) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.result.clone());
            }
            // 先释放读锁再删除
            drop(entry);
            // 只删除仍然过期的条目，避免误删并发写入的新结果
            self.entries
                .remove_if(url, |_, e| e.inserted_at.elapsed() >= self.ttl);
            debug!("缓存条目已过期: {}", url);
        }
        None
    }

    pub fn put(&self, url: &str, result: Arc<ExtractionResult>) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
        self.evict_overflow();
    }

    /// 删除指定链接的缓存，返回是否存在该条目
    pub fn invalidate(&self, url: &str) -> bool {
        self.entries.remove(url).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    fn evict_overflow(&self) {
        while self.entries.len() > self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|e| e.value().inserted_at)
                .map(|e| e.key().clone());
            match oldest {
                Some(key) => {
                    debug!("缓存已满，淘汰最早的条目: {}", key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}
