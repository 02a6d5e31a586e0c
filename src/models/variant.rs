//! # 分类变体标记
//!
//! 定义了分类器的输出 `VariantTag`：一个封闭的标记枚举，
//! 将记录上分散的布尔/字符串标志收敛为单一的已解析标记。
//!
//! 下游渲染分发仅以该标记为键做查表分发，绝不重新检视原始标志位。

use serde::Serialize;

/// 已知的字面工具名
///
/// `tool/call` 路由记录的二级负载中 `tool_name` 字段的取值集合。
/// 未知名称落入 `Other`，保留原始字符串供渲染层展示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// 读取文件（wire 名 "ReadFileTool"）
    ReadFile,
    /// 搜索文件内容（wire 名 "SearchFilesTool"）
    SearchFiles,
    /// 列出目录文件（wire 名 "ListFilesTool"）
    ListFiles,
    /// 编辑文件（wire 名 "EditFileTool"）
    EditFile,
    /// 执行命令（wire 名 "RunCommandTool"）
    RunCommand,
    /// 未知工具名，保留原始字符串
    Other(String),
}

impl ToolName {
    /// 将二级负载中的 wire 工具名映射为枚举值
    ///
    /// # 参数
    /// - `name` - 二级负载 `tool_name` 字段的原始值
    pub fn from_wire(name: &str) -> ToolName {
        match name {
            "ReadFileTool" => ToolName::ReadFile,
            "SearchFilesTool" => ToolName::SearchFiles,
            "ListFilesTool" => ToolName::ListFiles,
            "EditFileTool" => ToolName::EditFile,
            "RunCommandTool" => ToolName::RunCommand,
            other => ToolName::Other(other.to_string()),
        }
    }
}

/// 分类结果枚举（封闭变体标记）
///
/// 每条记录经 `classifier::classify` 恰好得到一个变体标记。
/// 分类器是全函数：任何记录都有且只有一个匹配变体（最后一条规则无条件兜底）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tool", rename_all = "snake_case")]
pub enum VariantTag {
    /// 用户回合（规则 1：isUser）
    UserTurn,

    // ---- /agent/ 路由子分类（规则 2）----
    /// 代理编辑思考流（/agent/edit/thinking）
    AgentThinking,
    /// 代理工具调用（/agent/edit/tool/call），携带解析出的工具名
    AgentToolCall(ToolName),
    /// MCP 工具调用：tool_name 与 server_name 均解码成功时覆盖字面工具名匹配
    AgentMcpToolCall,
    /// 代理工具结果（/agent/edit/tool/result）
    AgentToolResult,
    /// 应用变更（/agent/edit/apply_changes）
    AgentApplyChanges,
    /// 预应用变更（/agent/edit/apply_pre_changes）
    AgentApplyPreChanges,
    /// 计划模式响应（/agent/edit/plan/mode/respond）
    AgentPlanRespond,
    /// 代理编辑完成（/agent/edit/completion）
    AgentCompletion,
    /// 其他 /agent/ 路由的默认变体
    AgentGeneric,

    // ---- agentic_filter 子分类（规则 3）----
    /// 命令执行统计（contentType == "command_execute_stat"）
    FilterCommandExecute,
    /// 命令准备（contentType == "command_prepare"）
    FilterCommandPrepare,
    /// 过滤器文本（contentType == "text"）
    FilterText,
    /// 其他 agentic_filter 记录的通用建议变体
    FilterSuggestion,

    /// 完成结果（规则 4：type == "COMPLETION"）
    Completion,

    // ---- 流式输出子类型（规则 5）----
    /// 文件编号列表
    FileNumberList,
    /// 索引构建进度
    IndexBuild,
    /// 代码生成流
    CodeGenerate,
    /// Lint 进度
    Lint,
    /// 编译进度
    Compile,
    /// 代码排序
    CodeRank,
    /// 未合并代码块
    UnmergedBlocks,

    // ---- 细粒度内容类型（规则 6）----
    /// 会话摘要
    Summary,
    /// Token 统计
    TokenStat,
    /// 命令执行统计
    CommandExecuteStat,
    /// 上下文使用量
    ContextUsed,

    /// 思考流（规则 7：isThinking || isStreaming || type == "STREAM"）
    Thinking,
    /// 命令建议（规则 8：stream_out_type == "command_suggestion"）
    CommandSuggestion,
    /// Markdown 内容（规则 9）与无条件兜底（规则 10）
    Markdown,
}
