//! 置换表
//!
//! 以局面键缓存根节点的搜索结果，同一局面再次查询时直接返回

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tictactoe_core::PositionKey;
use tracing::trace;

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    /// 搜索分值（根节点走子方视角）
    pub score: f64,
    /// 最佳动作
    pub best_action: Option<usize>,
}

/// 置换表
///
/// 不做淘汰，条目在进程内一直有效，只能通过 [`clear`](Self::clear) 清空。
/// 由单个引擎独占，不提供并发写入语义。
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<PositionKey, CacheEntry>,
    /// 命中次数
    hits: AtomicU64,
    /// 查询次数
    probes: AtomicU64,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询条目
    pub fn get(&self, key: &PositionKey) -> Option<CacheEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);

        let entry = self.entries.get(key).copied();
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// 存储条目
    pub fn put(&mut self, key: PositionKey, score: f64, best_action: Option<usize>) {
        trace!(score, ?best_action, entries = self.entries.len(), "cache store");
        self.entries.insert(key, CacheEntry { score, best_action });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.probes.store(0, Ordering::Relaxed);
    }

    /// 获取命中率
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// 获取统计信息
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            probes: self.probes.load(Ordering::Relaxed),
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub probes: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}
