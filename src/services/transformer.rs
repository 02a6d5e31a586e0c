//! # 转录转换器
//!
//! 核心管线入口：将完整有序的记录快照转换为渲染分发可直接消费的
//! `TransformedTranscript`。
//!
//! ## 转换流程
//! 1. **整表过滤**：`filter::filter_transcript` 投影出应渲染的子序列（末条恒在）
//! 2. **并行 map**：使用 rayon 对每条存活记录独立执行
//!    分类 + 二级负载解码 + 生命周期推导（记录之间无任何共享状态）
//! 3. 按索引收集，保持过滤后的记录顺序
//!
//! ## 设计原则
//! - 零注入：不修改原始 `MessageRecord`
//! - 完全分离：`DisplayRecord` 是独立 struct，不持有对原始数据的引用
//! - 无跨快照状态：每个到达的快照触发一次完整、廉价的重转换

use rayon::prelude::*;

use crate::models::display::{DisplayRecord, TransformedTranscript};
use crate::models::payload::DecodedPayload;
use crate::models::record::MessageRecord;
use crate::models::variant::VariantTag;
use crate::services::classifier;
use crate::services::decoder;
use crate::services::filter;
use crate::services::lifecycle;

/// 转换入口：过滤 + 逐条分类/解码/生命周期推导
///
/// # 参数
/// - `records` - 完整有序的记录列表快照
///
/// # 返回值
/// 渲染分发可直接消费的转换结果，顺序与过滤后的记录一致
pub fn transform_transcript(records: &[MessageRecord]) -> TransformedTranscript {
    // 阶段 1：整表过滤（保序，末条恒在）
    let visible = filter::filter_transcript(records);

    // 阶段 2：并行 map，逐条独立处理；索引收集保持顺序
    let display_records: Vec<DisplayRecord> =
        visible.par_iter().map(build_display_record).collect();

    TransformedTranscript { display_records }
}

/// 构建单条显示记录
///
/// 分类一次得到变体标记，之后按标记决定二级负载的预期形态并容错解码；
/// 生命周期状态与默认展示倾向均由当前快照纯函数推导。
fn build_display_record(record: &MessageRecord) -> DisplayRecord {
    let tag = classifier::classify(record);
    let (payload, decode_ok) = decode_payload(record, &tag);
    let phase = lifecycle::derive_phase(record);
    let disposition = lifecycle::default_disposition(record, &tag);

    DisplayRecord {
        id: record.id.clone(),
        tag,
        payload,
        decode_ok,
        phase,
        disposition,
        event_id: record.event_id.clone(),
        response_required: record.response_required,
        options: decoder::normalize_options(record.options.as_ref()),
    }
}

/// 按变体标记解码二级负载
///
/// 负载形态由标记决定（两阶段解析的第二阶段）；
/// 无二级负载的变体携带原始文本，视为解码成功。
fn decode_payload(record: &MessageRecord, tag: &VariantTag) -> (DecodedPayload, bool) {
    match tag {
        VariantTag::AgentToolCall(_) | VariantTag::AgentMcpToolCall => {
            let d = decoder::decode_tool_call(&record.content);
            (DecodedPayload::ToolCall(d.value), d.ok)
        }
        VariantTag::AgentApplyChanges | VariantTag::AgentApplyPreChanges => {
            let d = decoder::decode_apply_changes(&record.content);
            (DecodedPayload::ApplyChanges(d.value), d.ok)
        }
        VariantTag::FilterCommandExecute
        | VariantTag::FilterCommandPrepare
        | VariantTag::CommandSuggestion => {
            let d = decoder::decode_command(&record.content);
            (DecodedPayload::Command(d.value), d.ok)
        }
        _ => (DecodedPayload::Text(record.content.clone()), true),
    }
}
