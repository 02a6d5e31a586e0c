//! # 记录分类器
//!
//! 将单条 `MessageRecord` 分类为唯一的 `VariantTag`，
//! 与前端渲染分发约定的分类逻辑完全等价，但利用 Rust 原生性能。
//!
//! ## 分类优先级（严格顺序，先匹配者胜，后续规则不再求值）
//! 1. isUser → UserTurn
//! 2. metadata.path 以 `/agent/` 开头 → 按整值路由到 Agentic-Edit 变体
//!    （tool/call 内先做字面工具名匹配，之后才求值 MCP 覆盖）
//! 3. stream_out_type == "agentic_filter" → 按 contentType 子路由
//! 4. type == "COMPLETION" → Completion
//! 5. stream_out_type 精确匹配固定进度集合 → 对应变体
//! 6. contentType 精确匹配统计集合 → 对应变体
//! 7. isThinking || isStreaming || type == "STREAM" → Thinking
//! 8. stream_out_type == "command_suggestion" → CommandSuggestion
//! 9. contentType == "markdown" 且无 stream_out_type → Markdown
//! 10. 兜底 → Markdown
//!
//! 该优先顺序本身是契约的一部分：同一条记录可能同时命中多条规则
//! （如既在 /agent/ 路由又在流式输出中），必须稳定地由靠前规则裁决。
//!
//! ## 性能策略
//! - 零 regex：path 仅做整值匹配 + `str::starts_with` 前缀检查
//! - 早退出：布尔标志 → path 路由 → 字符串精确匹配 → 二级解码（仅 tool/call 需要）

use crate::models::record::{MessageRecord, TYPE_COMPLETION, TYPE_STREAM};
use crate::models::variant::{ToolName, VariantTag};
use crate::services::decoder;

/// /agent/ 路由前缀；path 命中该前缀即进入 Agentic-Edit 子路由
pub const AGENT_PREFIX: &str = "/agent/";

/// 代理编辑思考流路由
pub const PATH_EDIT_THINKING: &str = "/agent/edit/thinking";
/// 工具调用路由
pub const PATH_TOOL_CALL: &str = "/agent/edit/tool/call";
/// 工具结果路由
pub const PATH_TOOL_RESULT: &str = "/agent/edit/tool/result";
/// 应用变更路由
pub const PATH_APPLY_CHANGES: &str = "/agent/edit/apply_changes";
/// 预应用变更路由
pub const PATH_APPLY_PRE_CHANGES: &str = "/agent/edit/apply_pre_changes";
/// 计划模式响应路由
pub const PATH_PLAN_RESPOND: &str = "/agent/edit/plan/mode/respond";
/// 代理编辑完成路由
pub const PATH_EDIT_COMPLETION: &str = "/agent/edit/completion";
/// 窗口长度变化路由（仅被转录过滤器引用）
pub const PATH_WINDOW_LENGTH_CHANGE: &str = "/agent/edit/window_length_change";
/// Token 用量路由（仅被转录过滤器引用）
pub const PATH_TOKEN_USAGE: &str = "/agent/edit/token_usage";

/// 流式输出子类型：agentic 过滤器
pub const SOT_AGENTIC_FILTER: &str = "agentic_filter";
/// 流式输出子类型：命令建议
pub const SOT_COMMAND_SUGGESTION: &str = "command_suggestion";
/// 流式输出子类型：代码生成
pub const SOT_CODE_GENERATE: &str = "code_generate";
/// 流式输出子类型：Token 统计
pub const SOT_TOKEN_STAT: &str = "token_stat";

/// 细粒度内容类型：命令准备统计（仅被转录过滤器引用）
pub const CT_COMMAND_PREPARE_STAT: &str = "command_prepare_stat";

/// 记录分类主函数
///
/// 全函数且确定性：任何记录恰好得到一个 `VariantTag`（规则 10 无条件兜底）。
/// 规则按模块文档所述的严格优先顺序求值。
///
/// # 参数
/// - `record` - 待分类的转录记录
///
/// # 返回值
/// 分类变体标记
pub fn classify(record: &MessageRecord) -> VariantTag {
    // P1：用户回合（最高优先级，即便同时在流式输出中也由本规则裁决）
    if record.is_user {
        return VariantTag::UserTurn;
    }

    // P2：/agent/ 逻辑路由（仅整值匹配 + 前缀检查，绝不做子串搜索）
    if let Some(path) = record.path() {
        if path.starts_with(AGENT_PREFIX) {
            return classify_agent_route(path, record);
        }
    }

    // P3：agentic_filter 子路由
    if record.stream_out_type() == Some(SOT_AGENTIC_FILTER) {
        return classify_filter_route(record);
    }

    // P4：完成结果
    if record.record_type() == Some(TYPE_COMPLETION) {
        return VariantTag::Completion;
    }

    // P5：流式输出子类型精确匹配（固定进度集合）
    if let Some(sot) = record.stream_out_type() {
        match sot {
            "file_number_list" => return VariantTag::FileNumberList,
            "index_build" => return VariantTag::IndexBuild,
            SOT_CODE_GENERATE => return VariantTag::CodeGenerate,
            "lint" => return VariantTag::Lint,
            "compile" => return VariantTag::Compile,
            "code_rank" => return VariantTag::CodeRank,
            "unmerged_blocks" => return VariantTag::UnmergedBlocks,
            _ => {}
        }
    }

    // P6：细粒度内容类型精确匹配（统计集合）
    if let Some(ct) = record.content_type() {
        match ct {
            "summary" => return VariantTag::Summary,
            "token_stat" => return VariantTag::TokenStat,
            "command_execute_stat" => return VariantTag::CommandExecuteStat,
            "context_used" => return VariantTag::ContextUsed,
            _ => {}
        }
    }

    // P7：思考流
    if record.is_thinking || record.is_streaming || record.record_type() == Some(TYPE_STREAM) {
        return VariantTag::Thinking;
    }

    // P8：命令建议
    if record.stream_out_type() == Some(SOT_COMMAND_SUGGESTION) {
        return VariantTag::CommandSuggestion;
    }

    // P9（contentType == "markdown" 且无 stream_out_type）与 P10（无条件兜底）
    // 殊途同归：均落入 Markdown 变体
    VariantTag::Markdown
}

/// /agent/ 路由子分类
///
/// 按 path 整值匹配到对应的 Agentic-Edit 变体；未知的 /agent/ 路由落入默认变体。
fn classify_agent_route(path: &str, record: &MessageRecord) -> VariantTag {
    match path {
        PATH_EDIT_THINKING => VariantTag::AgentThinking,
        PATH_TOOL_CALL => classify_tool_call(record),
        PATH_TOOL_RESULT => VariantTag::AgentToolResult,
        PATH_APPLY_CHANGES => VariantTag::AgentApplyChanges,
        PATH_APPLY_PRE_CHANGES => VariantTag::AgentApplyPreChanges,
        PATH_PLAN_RESPOND => VariantTag::AgentPlanRespond,
        PATH_EDIT_COMPLETION => VariantTag::AgentCompletion,
        _ => VariantTag::AgentGeneric,
    }
}

/// 工具调用子分类（tool/call 路由）
///
/// 对 `content` 做二级解码取出 `tool_name` 并做字面工具名匹配；
/// 解码失败时记录仍然分类（不崩溃），工具名以"未解析"哨兵兜底。
///
/// MCP 覆盖规则：`tool_name` 与 `server_name` 均解码成功时，
/// 即便字面工具名已经命中，也整体重分类为 MCP 工具调用。
/// 该覆盖在所有字面工具名检查之后求值，绝不提前。
fn classify_tool_call(record: &MessageRecord) -> VariantTag {
    let decoded = decoder::decode_tool_call(&record.content);
    let payload = decoded.value;

    // 字面工具名匹配（未解析字段以哨兵兜底，而非省略）
    let tool = match payload.tool_name.as_deref() {
        Some(name) => ToolName::from_wire(name),
        None => ToolName::Other(decoder::UNPARSED.to_string()),
    };

    // MCP 覆盖：在字面匹配之后求值
    if payload.tool_name.is_some() && payload.server_name.is_some() {
        return VariantTag::AgentMcpToolCall;
    }

    VariantTag::AgentToolCall(tool)
}

/// agentic_filter 子分类
///
/// 按 contentType 子路由；未命中的记录落入通用建议变体。
fn classify_filter_route(record: &MessageRecord) -> VariantTag {
    match record.content_type() {
        Some("command_execute_stat") => VariantTag::FilterCommandExecute,
        Some("command_prepare") => VariantTag::FilterCommandPrepare,
        Some("text") => VariantTag::FilterText,
        _ => VariantTag::FilterSuggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    /// 构造一条最小记录
    fn record(id: &str) -> MessageRecord {
        MessageRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// 设置 metadata.path
    fn with_path(mut rec: MessageRecord, path: &str) -> MessageRecord {
        rec.metadata
            .insert("path".to_string(), Value::String(path.to_string()));
        rec
    }

    /// 设置 metadata.stream_out_type
    fn with_sot(mut rec: MessageRecord, sot: &str) -> MessageRecord {
        rec.metadata
            .insert("stream_out_type".to_string(), Value::String(sot.to_string()));
        rec
    }

    #[test]
    fn test_user_turn_wins() {
        let mut rec = with_path(record("m1"), PATH_TOOL_CALL);
        rec.is_user = true;
        rec.is_streaming = true;
        // 规则 1 优先于所有后续规则
        assert_eq!(classify(&rec), VariantTag::UserTurn);
    }

    #[test]
    fn test_agent_route_beats_thinking() {
        // 同时命中规则 2 和规则 7 的记录始终由规则 2 裁决
        let mut rec = with_path(record("m1"), PATH_EDIT_THINKING);
        rec.is_streaming = true;
        assert_eq!(classify(&rec), VariantTag::AgentThinking);
    }

    #[test]
    fn test_agent_route_exact_paths() {
        assert_eq!(
            classify(&with_path(record("m1"), PATH_TOOL_RESULT)),
            VariantTag::AgentToolResult
        );
        assert_eq!(
            classify(&with_path(record("m2"), PATH_APPLY_CHANGES)),
            VariantTag::AgentApplyChanges
        );
        assert_eq!(
            classify(&with_path(record("m3"), PATH_APPLY_PRE_CHANGES)),
            VariantTag::AgentApplyPreChanges
        );
        assert_eq!(
            classify(&with_path(record("m4"), PATH_PLAN_RESPOND)),
            VariantTag::AgentPlanRespond
        );
        assert_eq!(
            classify(&with_path(record("m5"), PATH_EDIT_COMPLETION)),
            VariantTag::AgentCompletion
        );
        // 未知 /agent/ 路由落入默认变体
        assert_eq!(
            classify(&with_path(record("m6"), "/agent/edit/unknown")),
            VariantTag::AgentGeneric
        );
    }

    #[test]
    fn test_tool_call_literal_name() {
        let mut rec = with_path(record("m1"), PATH_TOOL_CALL);
        rec.content = r#"{"tool_name":"ReadFileTool","path":"a.rs"}"#.to_string();
        assert_eq!(
            classify(&rec),
            VariantTag::AgentToolCall(ToolName::ReadFile)
        );
    }

    #[test]
    fn test_mcp_override_beats_literal_name() {
        // tool_name 即便命中字面工具名，server_name 同时存在时仍重分类为 MCP
        let mut rec = with_path(record("m1"), PATH_TOOL_CALL);
        rec.content = r#"{"tool_name":"SearchFilesTool","server_name":"x"}"#.to_string();
        assert_eq!(classify(&rec), VariantTag::AgentMcpToolCall);
    }

    #[test]
    fn test_tool_call_decode_failure_uses_sentinel() {
        // 二级解码失败：记录仍然分类，工具名以哨兵兜底
        let mut rec = with_path(record("m1"), PATH_TOOL_CALL);
        rec.content = "not json".to_string();
        assert_eq!(
            classify(&rec),
            VariantTag::AgentToolCall(ToolName::Other(decoder::UNPARSED.to_string()))
        );
    }

    #[test]
    fn test_agentic_filter_subroutes() {
        let base = with_sot(record("m1"), SOT_AGENTIC_FILTER);

        let mut exec = base.clone();
        exec.content_type = Some("command_execute_stat".to_string());
        assert_eq!(classify(&exec), VariantTag::FilterCommandExecute);

        let mut prepare = base.clone();
        prepare.content_type = Some("command_prepare".to_string());
        assert_eq!(classify(&prepare), VariantTag::FilterCommandPrepare);

        let mut text = base.clone();
        text.content_type = Some("text".to_string());
        assert_eq!(classify(&text), VariantTag::FilterText);

        // 未命中的 contentType 落入通用建议
        assert_eq!(classify(&base), VariantTag::FilterSuggestion);
    }

    #[test]
    fn test_completion_type() {
        let mut rec = record("m1");
        rec.record_type = Some("COMPLETION".to_string());
        assert_eq!(classify(&rec), VariantTag::Completion);
    }

    #[test]
    fn test_progress_stream_types() {
        let cases = [
            ("file_number_list", VariantTag::FileNumberList),
            ("index_build", VariantTag::IndexBuild),
            ("code_generate", VariantTag::CodeGenerate),
            ("lint", VariantTag::Lint),
            ("compile", VariantTag::Compile),
            ("code_rank", VariantTag::CodeRank),
            ("unmerged_blocks", VariantTag::UnmergedBlocks),
        ];
        for (sot, expected) in cases {
            assert_eq!(classify(&with_sot(record("m1"), sot)), expected);
        }
    }

    #[test]
    fn test_stat_content_types() {
        let cases = [
            ("summary", VariantTag::Summary),
            ("token_stat", VariantTag::TokenStat),
            ("command_execute_stat", VariantTag::CommandExecuteStat),
            ("context_used", VariantTag::ContextUsed),
        ];
        for (ct, expected) in cases {
            let mut rec = record("m1");
            rec.content_type = Some(ct.to_string());
            assert_eq!(classify(&rec), expected);
        }
    }

    #[test]
    fn test_thinking_flags() {
        let mut thinking = record("m1");
        thinking.is_thinking = true;
        assert_eq!(classify(&thinking), VariantTag::Thinking);

        let mut streaming = record("m2");
        streaming.is_streaming = true;
        assert_eq!(classify(&streaming), VariantTag::Thinking);

        let mut stream_type = record("m3");
        stream_type.record_type = Some("STREAM".to_string());
        assert_eq!(classify(&stream_type), VariantTag::Thinking);
    }

    #[test]
    fn test_command_suggestion() {
        // 规则 8 在规则 7 之后：无思考/流式标志的 command_suggestion 记录
        let rec = with_sot(record("m1"), SOT_COMMAND_SUGGESTION);
        assert_eq!(classify(&rec), VariantTag::CommandSuggestion);
    }

    #[test]
    fn test_markdown_and_fallback() {
        let mut md = record("m1");
        md.content_type = Some("markdown".to_string());
        assert_eq!(classify(&md), VariantTag::Markdown);

        // 全函数性：空白记录也恰好得到一个变体
        assert_eq!(classify(&record("m2")), VariantTag::Markdown);
    }

    #[test]
    fn test_non_agent_path_does_not_route() {
        // 非 /agent/ 前缀的 path 不进入路由，落入兜底
        let rec = with_path(record("m1"), "/other/route");
        assert_eq!(classify(&rec), VariantTag::Markdown);
    }
}
