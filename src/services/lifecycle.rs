//! # 流式生命周期服务
//!
//! 从单个记录快照纯函数推导流式生命周期状态与默认展示倾向。
//!
//! ## 幂等要求
//! 生命周期按快照推导，不做历史 diff：对同一快照重复推导必然得到相同结果。
//! "思考记录在 isThinking 与 isStreaming 同时清除的瞬间自动折叠"
//! 这一规则因此表达为：只要快照显示两个标志均为 false，即默认折叠。

use crate::models::display::{Disposition, StreamPhase};
use crate::models::record::{MessageRecord, TYPE_ERROR, TYPE_STREAM};
use crate::models::variant::VariantTag;

/// 短输出阈值：渲染行数低于该值的记录默认保持展开
pub const SHORT_OUTPUT_MAX_LINES: usize = 5;

/// 推导流式生命周期状态
///
/// 仅依赖当前快照的标志位：
/// - `is_streaming == true` → Streaming
/// - `is_streaming == false && is_thinking == true` → Completing（流已结束，思考标志未清）
/// - 两者均 false → Settled
///
/// 连接中断导致终态快照永不到达时，记录停留在 Streaming/Completing，
/// 系统依然正确（无跨快照等待）。
pub fn derive_phase(record: &MessageRecord) -> StreamPhase {
    if record.is_streaming {
        StreamPhase::Streaming
    } else if record.is_thinking {
        StreamPhase::Completing
    } else {
        StreamPhase::Settled
    }
}

/// 记录内容的渲染行数
///
/// # 参数
/// - `content` - 记录的原始文本负载
pub fn rendered_line_count(content: &str) -> usize {
    content.lines().count()
}

/// 推导默认展示倾向（展开/折叠）
///
/// 规则按序求值（当前快照的纯函数，可重复推导出相同结果）：
/// 1. 错误记录（type == "ERROR"）默认折叠
/// 2. 未稳定的记录（仍在流式输出或思考中）保持展开
/// 3. 已稳定的思考类记录折叠（两个标志同时清除的瞬间自动折叠）
/// 4. 短输出（行数低于阈值）保持展开
/// 5. 已结束的长流式记录折叠
/// 6. 其余默认展开
///
/// # 参数
/// - `record` - 记录快照
/// - `tag` - 该记录的分类变体标记
pub fn default_disposition(record: &MessageRecord, tag: &VariantTag) -> Disposition {
    // 错误记录始终默认折叠
    if record.record_type() == Some(TYPE_ERROR) {
        return Disposition::Collapsed;
    }

    // 仍在流式输出或思考中的记录保持展开
    if derive_phase(record) != StreamPhase::Settled {
        return Disposition::Expanded;
    }

    // ---- 以下均为已稳定记录 ----

    // 思考类记录在稳定的瞬间自动折叠
    if matches!(tag, VariantTag::Thinking | VariantTag::AgentThinking) {
        return Disposition::Collapsed;
    }

    // 短输出保持展开
    if rendered_line_count(&record.content) < SHORT_OUTPUT_MAX_LINES {
        return Disposition::Expanded;
    }

    // 已结束的长流式记录折叠
    if record.record_type() == Some(TYPE_STREAM) {
        return Disposition::Collapsed;
    }

    Disposition::Expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier;

    fn record(id: &str) -> MessageRecord {
        MessageRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// 分类后推导展示倾向（与 transformer 的调用方式一致）
    fn disposition_of(rec: &MessageRecord) -> Disposition {
        default_disposition(rec, &classifier::classify(rec))
    }

    #[test]
    fn test_phase_streaming() {
        let mut rec = record("m1");
        rec.is_streaming = true;
        rec.is_thinking = true;
        assert_eq!(derive_phase(&rec), StreamPhase::Streaming);
    }

    #[test]
    fn test_phase_completing() {
        let mut rec = record("m1");
        rec.is_thinking = true;
        assert_eq!(derive_phase(&rec), StreamPhase::Completing);
    }

    #[test]
    fn test_phase_settled() {
        assert_eq!(derive_phase(&record("m1")), StreamPhase::Settled);
    }

    #[test]
    fn test_error_defaults_collapsed() {
        let mut rec = record("m1");
        rec.record_type = Some("ERROR".to_string());
        rec.content = "一行".to_string();
        // 错误记录即便是短输出也折叠
        assert_eq!(disposition_of(&rec), Disposition::Collapsed);
    }

    #[test]
    fn test_streaming_stays_expanded() {
        let mut rec = record("m1");
        rec.is_streaming = true;
        rec.content = "很长\n的\n输出\n超过\n阈值\n行数".to_string();
        assert_eq!(disposition_of(&rec), Disposition::Expanded);
    }

    #[test]
    fn test_thinking_collapses_on_settle() {
        // 思考中展开
        let mut live = record("m1");
        live.is_thinking = true;
        live.is_streaming = true;
        assert_eq!(disposition_of(&live), Disposition::Expanded);

        // 两个标志同时清除后（type 仍为 STREAM，分类为 Thinking）自动折叠
        let mut settled = record("m1");
        settled.record_type = Some("STREAM".to_string());
        settled.content = "短".to_string();
        assert_eq!(disposition_of(&settled), Disposition::Collapsed);
    }

    #[test]
    fn test_short_output_expanded() {
        let mut rec = record("m1");
        rec.content_type = Some("summary".to_string());
        rec.content = "一行\n两行".to_string();
        assert_eq!(disposition_of(&rec), Disposition::Expanded);
    }

    #[test]
    fn test_long_settled_non_stream_expanded() {
        // 非流式的长内容（如 markdown 完成结果）默认展开
        let mut rec = record("m1");
        rec.content = "1\n2\n3\n4\n5\n6\n7".to_string();
        assert_eq!(disposition_of(&rec), Disposition::Expanded);
    }

    #[test]
    fn test_idempotent_rederivation() {
        // 同一快照重复推导结果一致
        let mut rec = record("m1");
        rec.record_type = Some("STREAM".to_string());
        rec.content = "1\n2\n3\n4\n5\n6".to_string();
        let first = disposition_of(&rec);
        let second = disposition_of(&rec);
        assert_eq!(first, second);
        assert_eq!(first, Disposition::Collapsed);
    }
}
