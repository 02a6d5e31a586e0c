//! # 转录过滤器
//!
//! 整表变换：输入完整有序的记录列表，输出应交给渲染的列表。
//!
//! ## 不变量
//! - **保序**：输出（除末条外）是输入的子序列，绝不重排。
//! - **末条恒在**：输入的最后一条记录无论命中何种丢弃规则，
//!   都原样出现在输出中。
//! - **幂等**：对无活跃流的同一列表重复过滤得到相同输出。
//!
//! ## 丢弃规则（仅作用于末条之外的记录）
//! 1. contentType == "command_prepare_stat"
//! 2. 特定流式子类型的终帧：type == "STREAM" 且已停止流式输出，
//!    且 stream_out_type ∈ {code_generate, agentic_filter, token_stat}
//!    （这些流稳定后由其他已可见变体接替其视觉角色；流式输出中绝不丢弃）
//! 3. path ∈ {completion, window_length_change, token_usage, apply_pre_changes}
//!    （/agent/edit/ 下的纯信号路由）
//! 4. path 为 apply_changes / apply_pre_changes 且二级解码成功
//!    且 have_commit 恰为 false；解码失败时保留（fail-open 而非 fail-closed）

use crate::models::record::{MessageRecord, TYPE_STREAM};
use crate::services::classifier::{
    CT_COMMAND_PREPARE_STAT, PATH_APPLY_CHANGES, PATH_APPLY_PRE_CHANGES, PATH_EDIT_COMPLETION,
    PATH_TOKEN_USAGE, PATH_WINDOW_LENGTH_CHANGE, SOT_AGENTIC_FILTER, SOT_CODE_GENERATE,
    SOT_TOKEN_STAT,
};
use crate::services::decoder;

/// 终帧可被抑制的流式子类型集合
///
/// 该集合按原始行为精确保留（不做泛化）：lint、compile 等其他流的终帧不受抑制。
const TRANSIENT_STREAM_TYPES: &[&str] = &[SOT_CODE_GENERATE, SOT_AGENTIC_FILTER, SOT_TOKEN_STAT];

/// 整条丢弃的 /agent/edit/ 信号路由集合
const DROPPED_AGENT_PATHS: &[&str] = &[
    PATH_EDIT_COMPLETION,
    PATH_WINDOW_LENGTH_CHANGE,
    PATH_TOKEN_USAGE,
    PATH_APPLY_PRE_CHANGES,
];

/// 转录过滤主函数
///
/// # 参数
/// - `records` - 完整有序的记录列表快照
///
/// # 返回值
/// 应交给渲染的记录列表：存活记录保持原始相对顺序，末条恒在
pub fn filter_transcript(records: &[MessageRecord]) -> Vec<MessageRecord> {
    // 空列表直接返回；非空列表拆出末条（末条不参与丢弃规则）
    let Some((last, head)) = records.split_last() else {
        return vec![];
    };

    let mut kept: Vec<MessageRecord> = head
        .iter()
        .filter(|rec| !should_drop(rec))
        .cloned()
        .collect();

    // 末条无条件保留，原样追加
    kept.push(last.clone());
    kept
}

/// 单条记录的丢弃判定（不含末条豁免，由 `filter_transcript` 统一处理）
///
/// # 返回值
/// 命中任一丢弃规则时返回 true
pub fn should_drop(record: &MessageRecord) -> bool {
    // 规则 1：命令准备统计
    if record.content_type() == Some(CT_COMMAND_PREPARE_STAT) {
        return true;
    }

    // 规则 2：特定流式子类型的终帧（仍在流式输出中绝不丢弃）
    if record.record_type() == Some(TYPE_STREAM) && !record.is_streaming {
        if let Some(sot) = record.stream_out_type() {
            if TRANSIENT_STREAM_TYPES.contains(&sot) {
                return true;
            }
        }
    }

    if let Some(path) = record.path() {
        // 规则 3：纯信号路由整条丢弃
        if DROPPED_AGENT_PATHS.contains(&path) {
            return true;
        }

        // 规则 4：无提交的变更记录；解码失败时保留（fail-open）
        if path == PATH_APPLY_CHANGES || path == PATH_APPLY_PRE_CHANGES {
            let decoded = decoder::decode_apply_changes(&record.content);
            if decoded.ok && decoded.value.have_commit == Some(false) {
                return true;
            }
        }
    }

    false
}
