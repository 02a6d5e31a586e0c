//! # 显示层数据模型
//!
//! 定义了交给渲染分发协作方的独立数据结构，与原始 `MessageRecord` 完全解耦。
//!
//! ## 设计原则
//! - **零注入**：绝不向原始记录添加任何字段，原始快照只用于比对与重求值。
//! - **单一分发键**：渲染分发仅以 `tag`（`VariantTag`）做查表分发，
//!   下游不再检视 `is_user` / `is_thinking` 等原始标志位。
//!
//! ## 数据流
//! ```text
//! 快照 Vec<MessageRecord>
//!      → filter::filter_transcript（保序过滤，末条始终保留）
//!      → transformer::transform_transcript（并行：分类 + 负载解码 + 生命周期）
//!      → TransformedTranscript { Vec<DisplayRecord> }
//!      → 渲染分发（核心外部，按 tag 查表）
//! ```

use serde::Serialize;

use crate::models::payload::DecodedPayload;
use crate::models::variant::VariantTag;

/// 流式生命周期状态
///
/// 由当前快照纯函数推导（不依赖历史）：
/// - `Streaming`：`is_streaming == true`
/// - `Completing`：流已结束但思考标志尚未清除（`is_streaming == false && is_thinking == true`）
/// - `Settled`：两个标志均为 false
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    /// 仍在流式输出中
    Streaming,
    /// 流已结束，等待思考标志清除
    Completing,
    /// 已稳定（两个标志均为 false）
    Settled,
}

/// 默认 UI 展示倾向
///
/// 记录块的默认展开/折叠状态；可从任意单个快照重复推导出相同结果（幂等）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// 默认展开
    Expanded,
    /// 默认折叠
    Collapsed,
}

/// 单条显示记录（独立 struct，与原始 MessageRecord 无引用关系）
///
/// 由 `transformer::transform_transcript` 生成，每条存活记录对应一个
/// `(变体标记, 已解码负载, 生命周期状态, 默认展示倾向)` 组合。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    /// 原始记录的稳定标识符，用作渲染身份
    pub id: String,

    /// 分类变体标记：渲染分发的唯一键
    pub tag: VariantTag,

    /// 已解码的二级负载（无二级负载的变体携带原始文本）
    pub payload: DecodedPayload,

    /// 二级负载解码是否成功；失败时负载为逐字段默认值，
    /// 未解析字段由渲染层以"未解析"哨兵展示
    pub decode_ok: bool,

    /// 流式生命周期状态
    pub phase: StreamPhase,

    /// 默认展示倾向（展开/折叠）
    pub disposition: Disposition,

    /// 用户响应回调的事件标识（仅需要用户选择的记录存在）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// 该记录是否等待用户响应
    pub response_required: bool,

    /// 规范化后的用户选项列表（缺失 → 空列表，字符串 → 嵌套解码）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// 交给渲染分发协作方的完整转换结果
///
/// 顺序与过滤后的记录顺序一致（原始相对顺序，末条恒在）。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedTranscript {
    /// 存活记录的显示记录列表
    pub display_records: Vec<DisplayRecord>,
}
