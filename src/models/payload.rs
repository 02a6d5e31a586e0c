//! # 二级负载数据模型
//!
//! 定义了记录 `content` 字段内嵌的二级 JSON 负载的类型化结构。
//!
//! ## 两阶段解析
//! 外层记录由传输层保证结构（schema 保证，总能反序列化为 `MessageRecord`），
//! 内层负载不可信：仅在外层分类确定了预期形态后才解码，
//! 解码使用逐字段默认值容错（见 `services::decoder`），绝不因格式错误丢失记录。
//!
//! 字段名即 wire 契约：与后端二级 JSON 的字段名逐一对应（snake_case，不做重命名）。

use serde::{Deserialize, Serialize};

/// 工具调用负载（`/agent/edit/tool/call` 路由）
///
/// wire 形态：`{ tool_name, server_name?, path?, diff?, recursive? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    /// 工具名称，如 "ReadFileTool"、"SearchFilesTool"
    #[serde(default)]
    pub tool_name: Option<String>,

    /// MCP 服务器名称；与 `tool_name` 同时解码成功时触发 MCP 覆盖分类
    #[serde(default)]
    pub server_name: Option<String>,

    /// 工具操作的目标文件路径
    #[serde(default)]
    pub path: Option<String>,

    /// 工具产生的差异文本
    #[serde(default)]
    pub diff: Option<String>,

    /// 是否递归（目录类工具），缺失时默认 false
    #[serde(default)]
    pub recursive: bool,
}

/// 命令类负载（命令建议 / 命令准备 / 命令执行统计）
///
/// wire 形态：`{ command, requires_approval? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// 建议或执行的命令文本
    #[serde(default)]
    pub command: Option<String>,

    /// 执行前是否需要用户批准，缺失时默认 false
    #[serde(default)]
    pub requires_approval: bool,
}

/// 应用变更负载（`/agent/edit/apply_changes` / `apply_pre_changes` 路由）
///
/// wire 形态：`{ commit_hash?, diff_file_num?, have_commit? }`
///
/// `have_commit` 使用 `Option<bool>`：过滤规则要求区分
/// "字段明确为 false"（丢弃）与"字段缺失"（保留）两种情况。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyChangesPayload {
    /// 变更对应的提交哈希
    #[serde(default)]
    pub commit_hash: Option<String>,

    /// 变更涉及的文件数量
    #[serde(default)]
    pub diff_file_num: Option<u64>,

    /// 是否已形成提交；恰为 false 时该记录被转录过滤器丢弃（末条除外）
    #[serde(default)]
    pub have_commit: Option<bool>,
}

/// 显示层携带的已解码负载
///
/// 随 `DisplayRecord` 一起交给渲染分发；具体形态由变体标记决定，
/// 无二级负载的变体携带原始文本（`Text`）。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedPayload {
    /// 工具调用负载（AgentToolCall / AgentMcpToolCall）
    ToolCall(ToolCallPayload),
    /// 命令类负载（FilterCommandExecute / FilterCommandPrepare / CommandSuggestion）
    Command(CommandPayload),
    /// 应用变更负载（AgentApplyChanges / AgentApplyPreChanges）
    ApplyChanges(ApplyChangesPayload),
    /// 原始文本负载（其余所有变体）
    Text(String),
}
