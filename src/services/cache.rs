//! # 转录缓存服务
//!
//! 提供基于内存的转换结果缓存，避免对未变化快照的无谓重转换：
//! 每个到达的快照触发一次比对，比对命中时直接返回上次的转换结果，
//! 下游因此获得引用稳定的输出，不触发重渲染。
//!
//! ## 失效策略
//! - 快照等价比对：基于具名谓词 `MessageRecord::same_render_state`
//!   （`id` / `content` / `is_thinking` 未变即等价；
//!   任何 `is_streaming == true` 的记录始终视为已变化，强制活跃转录持续重求值）
//! - 容量淘汰：超过容量上限时淘汰最久未访问的转录（LRU）
//!
//! ## 线程安全
//! 使用 `std::sync::RwLock` 保证多线程安全访问；
//! 单个转录的转换语义仍是同步单线程的。

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use crate::models::display::TransformedTranscript;
use crate::models::record::MessageRecord;
use crate::services::transformer;

/// 转录缓存的最大容量
///
/// 最多缓存这么多个转录的转换结果。缓存满时，最久未访问的转录将被淘汰。
const TRANSCRIPT_CACHE_MAX_ENTRIES: usize = 20;

/// 整表快照等价判定
///
/// 两个快照等价，当且仅当长度相同且逐位置记录渲染状态等价
/// （见 `MessageRecord::same_render_state`）。
/// 含活跃流记录的快照永不等价，保证活跃转录每个快照都重新转换。
///
/// # 参数
/// - `prev` - 上次转换时的快照
/// - `next` - 新到达的快照
pub fn snapshot_unchanged(prev: &[MessageRecord], next: &[MessageRecord]) -> bool {
    prev.len() == next.len()
        && prev
            .iter()
            .zip(next.iter())
            .all(|(a, b)| a.same_render_state(b))
}

/// 转录缓存
///
/// 以转录标识为 key，缓存该转录最近一次的快照和转换结果。
pub struct TranscriptCache {
    /// 缓存条目映射：转录标识 → 缓存条目
    transcripts: RwLock<HashMap<String, TranscriptCacheEntry>>,
}

/// 单个转录的缓存条目
struct TranscriptCacheEntry {
    /// 上次转换时的完整快照（用于等价比对）
    snapshot: Vec<MessageRecord>,
    /// 上次的转换结果
    transformed: TransformedTranscript,
    /// 最后访问时间（用于 LRU 淘汰）
    last_accessed: Instant,
}

impl TranscriptCache {
    /// 创建新的空缓存实例
    pub fn new() -> Self {
        Self {
            transcripts: RwLock::new(HashMap::new()),
        }
    }

    /// 获取或重新转换指定转录
    ///
    /// 快照与缓存等价时直接返回缓存的转换结果（引用稳定，无谓重渲染被消除）；
    /// 否则执行一次完整转换并更新缓存。
    ///
    /// # 参数
    /// - `transcript_id` - 转录的稳定标识
    /// - `records` - 新到达的完整快照
    ///
    /// # 返回值
    /// 该快照对应的转换结果
    pub fn get_or_transform(
        &self,
        transcript_id: &str,
        records: &[MessageRecord],
    ) -> TransformedTranscript {
        // 比对命中路径：写锁下更新访问时间
        if let Ok(mut cache) = self.transcripts.write() {
            if let Some(entry) = cache.get_mut(transcript_id) {
                if snapshot_unchanged(&entry.snapshot, records) {
                    entry.last_accessed = Instant::now();
                    return entry.transformed.clone();
                }
            }
        }

        // 比对未命中：完整重转换
        let transformed = transformer::transform_transcript(records);

        if let Ok(mut cache) = self.transcripts.write() {
            // 缓存已满且不是更新现有条目时，淘汰最久未访问的转录
            if cache.len() >= TRANSCRIPT_CACHE_MAX_ENTRIES && !cache.contains_key(transcript_id) {
                if let Some(oldest_key) = cache
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_accessed)
                    .map(|(key, _)| key.clone())
                {
                    cache.remove(&oldest_key);
                }
            }

            cache.insert(
                transcript_id.to_string(),
                TranscriptCacheEntry {
                    snapshot: records.to_vec(),
                    transformed: transformed.clone(),
                    last_accessed: Instant::now(),
                },
            );
        }

        transformed
    }

    /// 使指定转录的缓存失效
    ///
    /// # 参数
    /// - `transcript_id` - 转录的稳定标识
    pub fn invalidate(&self, transcript_id: &str) {
        if let Ok(mut cache) = self.transcripts.write() {
            cache.remove(transcript_id);
        }
    }
}

impl Default for TranscriptCache {
    fn default() -> Self {
        Self::new()
    }
}
