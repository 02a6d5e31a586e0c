//! # 转录记录数据模型
//!
//! 定义了转录的最小输入单元 `MessageRecord`，对应后端传输层推送的单条事件记录
//! （工具调用、工具结果、流式思考、编译/索引进度、完成结果、用户回合等）。
//!
//! ## 设计决策
//! - 除 `id` 外的所有字段均标注 `#[serde(default)]`，
//!   部分字段缺失或不合规的记录仍可完整反序列化，不会丢失记录本身。
//! - `metadata` 使用 `serde_json::Map` 处理开放键值映射，
//!   避免因后端版本升级添加新字段而导致反序列化失败；
//!   分类只读取其中的保留键 `path` 和 `stream_out_type`。
//! - 记录是不可变值对象："变更"表现为同 `id` 的新快照，
//!   记录永不删除，过滤只是渲染时的投影。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 粗粒度类型标记：流式输出记录
pub const TYPE_STREAM: &str = "STREAM";
/// 粗粒度类型标记：传输层上报的错误记录
pub const TYPE_ERROR: &str = "ERROR";
/// 粗粒度类型标记：完成结果记录
pub const TYPE_COMPLETION: &str = "COMPLETION";
/// 粗粒度类型标记：需要用户选择的询问记录
pub const TYPE_ASK_USER: &str = "ASK_USER";

/// metadata 保留键：斜杠分隔的逻辑路由（如 `/agent/edit/tool/call`）
pub const META_PATH: &str = "path";
/// metadata 保留键：流式输出子类型（如 `code_generate`、`lint`）
pub const META_STREAM_OUT_TYPE: &str = "stream_out_type";

/// 单条转录记录
///
/// 对应后端每次推送的完整列表快照中的一个条目。
/// 这是整个核心最基础的数据结构，分类、生命周期推导和过滤均以它为输入。
///
/// ## 字段说明
/// - `id`：转录内唯一的稳定标识符。流式记录在连续更新中"逻辑上是同一条"，
///   当且仅当 `id` 不变。同一转录内 `id` 绝不会被复用于语义不同的内容。
/// - `record_type`：作者指定的粗粒度标记（可缺失），序列化字段名为 `type`。
/// - `content`：原始文本负载，可能本身是序列化的二级 JSON
///   （其结构取决于 `metadata.path` / `content_type`）。
/// - `metadata.path` 只允许按整值精确匹配或按 `/agent/` 前缀匹配，
///   绝不在记录其他位置做子串搜索。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// 转录内唯一的稳定标识符，用于渲染身份和流式生命周期的连续性
    pub id: String,

    /// 粗粒度类型标记："STREAM" | "ERROR" | "COMPLETION" | "ASK_USER" 等，可缺失
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    /// 原始文本负载（可能是序列化的二级 JSON）
    #[serde(default)]
    pub content: String,

    /// 细粒度类型标记："summary" | "token_stat" | "markdown" 等，可缺失
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// 是否为用户回合
    #[serde(default)]
    pub is_user: bool,

    /// 是否为思考内容
    #[serde(default)]
    pub is_thinking: bool,

    /// 是否仍在流式输出中
    #[serde(default)]
    pub is_streaming: bool,

    /// 开放元数据映射；保留键 `path` 和 `stream_out_type` 驱动分类
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,

    /// 用户选项列表（仅需要用户选择的记录存在）；
    /// 原始形态可能是数组，也可能是内嵌 JSON 的字符串，
    /// 规范化由 `decoder::normalize_options` 完成
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// 用户响应回调的事件标识（仅需要用户选择的记录存在）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    /// 该记录是否等待用户响应
    #[serde(default)]
    pub response_required: bool,
}

impl MessageRecord {
    /// 获取粗粒度类型标记
    pub fn record_type(&self) -> Option<&str> {
        self.record_type.as_deref()
    }

    /// 获取细粒度类型标记
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// 获取 `metadata.path` 逻辑路由
    ///
    /// # 返回值
    /// `path` 键存在且为字符串时返回 `Some(path)`，否则返回 `None`
    pub fn path(&self) -> Option<&str> {
        self.metadata.get(META_PATH).and_then(|v| v.as_str())
    }

    /// 获取 `metadata.stream_out_type` 流式输出子类型
    pub fn stream_out_type(&self) -> Option<&str> {
        self.metadata.get(META_STREAM_OUT_TYPE).and_then(|v| v.as_str())
    }

    /// 渲染状态等价判定（具名相等谓词）
    ///
    /// 判断两个记录快照在渲染层面是否"未变化"，用于避免下游的无谓重渲染：
    /// - 任一方 `is_streaming == true` 时始终视为已变化（强制活跃流持续重求值）
    /// - 否则当 `id`、`content`、`is_thinking` 三者均未变时视为未变化
    ///
    /// # 参数
    /// - `other` - 同一位置的另一个记录快照
    ///
    /// # 返回值
    /// 渲染状态未变化时返回 true
    pub fn same_render_state(&self, other: &MessageRecord) -> bool {
        // 活跃流始终视为已变化
        if self.is_streaming || other.is_streaming {
            return false;
        }
        self.id == other.id
            && self.content == other.content
            && self.is_thinking == other.is_thinking
    }
}
