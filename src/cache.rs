// Memoization of itinerary summaries across re-renders.
// Keys are a hash of the plan snapshot, the cache-reported option counts and
// the processor configuration, so a hit always equals a fresh computation.

use crate::engine::SummaryProcessor;
use crate::options::OptionCounts;
use crate::plan::RawPlan;
use crate::summary::ItinerarySummary;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// Counters kept by the cache
#[derive(Debug, Default)]
pub struct CacheStats {
    pub items_count: AtomicUsize,
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
    pub eviction_count: AtomicUsize,
    pub expired_count: AtomicUsize,
    pub average_lookup_time_ns: AtomicU64,
    pub total_lookups: AtomicUsize,
}

// Point-in-time copy of the counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatsReport {
    pub items_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub eviction_count: usize,
    pub expired_count: usize,
    pub average_lookup_time_ns: u64,
    pub total_lookups: usize,
}

// Cache configuration options
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub default_ttl_seconds: u64,
    pub eviction_policy: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            default_ttl_seconds: 300,
            eviction_policy: EvictionPolicy::LeastRecentlyUsed,
        }
    }
}

// Which entry gives way when the cache is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    LeastRecentlyUsed,
    LeastFrequentlyUsed,
    TimeToLive,
}

// Cache key for a plan snapshot, or `None` when the plan cannot be serialized.
pub fn summary_key(
    processor: &SummaryProcessor,
    plan: &RawPlan,
    cache_counts: Option<&OptionCounts>,
) -> Option<u64> {
    let encoded = serde_json::to_string(&(plan, cache_counts, processor.config())).ok()?;
    let mut hasher = DefaultHasher::new();
    encoded.hash(&mut hasher);
    Some(hasher.finish())
}

struct CacheEntry {
    summary: ItinerarySummary,
    created_at: Instant,
    ttl: Duration,
    access_count: usize,
    last_accessed: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

pub struct SummaryCache {
    entries: DashMap<u64, CacheEntry>,
    config: RwLock<CacheConfig>,
    stats: CacheStats,
}

impl SummaryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config: RwLock::new(config),
            stats: CacheStats::default(),
        }
    }

    // Cached summary for `plan`, computing and storing it on a miss.
    pub fn summarize(
        &self,
        processor: &SummaryProcessor,
        plan: &RawPlan,
        cache_counts: Option<&OptionCounts>,
    ) -> ItinerarySummary {
        let Some(key) = summary_key(processor, plan, cache_counts) else {
            warn!("plan could not be keyed, summarizing without cache");
            return processor.summarize(plan, cache_counts);
        };

        if let Some(summary) = self.get(key) {
            return summary;
        }

        let summary = processor.summarize(plan, cache_counts);
        self.store(key, summary.clone(), None);
        summary
    }

    pub fn get(&self, key: u64) -> Option<ItinerarySummary> {
        let now = Instant::now();
        self.stats.total_lookups.fetch_add(1, Ordering::SeqCst);

        let found = match self.entries.get_mut(&key) {
            Some(mut entry) if !entry.is_expired() => {
                entry.access_count += 1;
                entry.last_accessed = Instant::now();
                Some(entry.summary.clone())
            }
            Some(_) => None,
            None => {
                self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
                self.store_lookup_time(now);
                return None;
            }
        };

        match found {
            Some(summary) => {
                self.stats.hit_count.fetch_add(1, Ordering::SeqCst);
                self.store_lookup_time(now);
                Some(summary)
            }
            None => {
                // Entry guard is released above, so removal cannot deadlock.
                self.remove_entry(key, true);
                self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
                self.store_lookup_time(now);
                None
            }
        }
    }

    // Store a summary; `ttl` of `None` uses the configured default.
    pub fn store(&self, key: u64, summary: ItinerarySummary, ttl: Option<Duration>) {
        let (max_entries, default_ttl_seconds) = {
            let config = self.config.read();
            (config.max_entries, config.default_ttl_seconds)
        };
        if max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= max_entries {
                if !self.remove_oldest_entry() {
                    break;
                }
            }
        }

        let now = Instant::now();
        let entry = CacheEntry {
            summary,
            created_at: now,
            ttl: ttl.unwrap_or_else(|| Duration::from_secs(default_ttl_seconds)),
            access_count: 0,
            last_accessed: now,
        };
        if self.entries.insert(key, entry).is_none() {
            self.stats.items_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            items_count: self.stats.items_count.load(Ordering::SeqCst),
            hit_count: self.stats.hit_count.load(Ordering::SeqCst),
            miss_count: self.stats.miss_count.load(Ordering::SeqCst),
            eviction_count: self.stats.eviction_count.load(Ordering::SeqCst),
            expired_count: self.stats.expired_count.load(Ordering::SeqCst),
            average_lookup_time_ns: self.stats.average_lookup_time_ns.load(Ordering::SeqCst),
            total_lookups: self.stats.total_lookups.load(Ordering::SeqCst),
        }
    }

    pub fn set_eviction_policy(&self, policy: EvictionPolicy) {
        self.config.write().eviction_policy = policy;
    }

    // Drop every entry, returning how many were removed.
    pub fn invalidate_all(&self) -> usize {
        let keys: Vec<u64> = self.entries.iter().map(|entry| *entry.key()).collect();
        let count = keys.len();
        for key in keys {
            self.remove_entry(key, false);
        }
        count
    }

    // Change capacity, evicting by policy when shrinking.
    pub fn resize(&self, max_entries: usize) {
        self.config.write().max_entries = max_entries;
        while self.entries.len() > max_entries {
            if !self.remove_oldest_entry() {
                break;
            }
        }
    }

    fn remove_oldest_entry(&self) -> bool {
        let policy = self.config.read().eviction_policy;

        let victim = match policy {
            EvictionPolicy::LeastRecentlyUsed => self
                .entries
                .iter()
                .min_by_key(|entry| entry.last_accessed)
                .map(|entry| *entry.key()),
            EvictionPolicy::LeastFrequentlyUsed => self
                .entries
                .iter()
                .min_by_key(|entry| (entry.access_count, entry.last_accessed))
                .map(|entry| *entry.key()),
            EvictionPolicy::TimeToLive => self
                .entries
                .iter()
                .min_by_key(|entry| entry.created_at + entry.ttl)
                .map(|entry| *entry.key()),
        };

        match victim {
            Some(key) => {
                debug!(key, ?policy, "evicting cached summary");
                self.remove_entry(key, false)
            }
            None => false,
        }
    }

    fn remove_entry(&self, key: u64, expired: bool) -> bool {
        if self.entries.remove(&key).is_none() {
            return false;
        }
        self.stats.items_count.fetch_sub(1, Ordering::SeqCst);
        if expired {
            self.stats.expired_count.fetch_add(1, Ordering::SeqCst);
        } else {
            self.stats.eviction_count.fetch_add(1, Ordering::SeqCst);
        }
        true
    }

    fn store_lookup_time(&self, started: Instant) {
        let duration_ns = started.elapsed().as_nanos() as u64;
        let total_lookups = self.stats.total_lookups.load(Ordering::SeqCst) as u64;
        let current_avg = self.stats.average_lookup_time_ns.load(Ordering::SeqCst);

        let new_avg = if total_lookups <= 1 {
            duration_ns
        } else {
            (current_avg * (total_lookups - 1) + duration_ns) / total_lookups
        };

        self.stats
            .average_lookup_time_ns
            .store(new_avg, Ordering::SeqCst);
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
