//! # 快照解析服务
//!
//! 提供序列化转录快照的容错解析。
//! 传输层每次推送完整的记录列表（而非增量 diff），
//! 本服务将其序列化形态还原为 `Vec<MessageRecord>`。
//!
//! ## 容错策略
//! - 支持两种序列化形态：JSON 数组（单个快照消息）与 JSONL（逐行一条记录）
//! - 不合规的单条记录静默跳过，已成功解析的记录正常返回，
//!   与内容解码服务"单条降级，整体不失败"的策略一致

use serde_json::Value;

use crate::models::record::MessageRecord;

/// 解析序列化的转录快照
///
/// 首字符为 `[` 时按 JSON 数组解析，逐条容错转换；
/// 否则按 JSONL 逐行解析，失败行静默跳过。
///
/// # 参数
/// - `raw` - 序列化的快照文本
///
/// # 返回值
/// 按原始顺序排列的记录列表；空输入返回空列表
///
/// # 错误
/// JSON 数组形态整体格式错误（无法定位任何记录边界）时返回错误
pub fn parse_snapshot(raw: &str) -> Result<Vec<MessageRecord>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(vec![]);
    }

    if trimmed.starts_with('[') {
        // JSON 数组形态：外层结构必须合法，单条记录容错转换
        let values: Vec<Value> = serde_json::from_str(trimmed)
            .map_err(|e| format!("解析转录快照失败: {}", e))?;
        Ok(values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    } else {
        // JSONL 形态：逐行解析，失败行静默跳过
        Ok(trimmed
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }
}
