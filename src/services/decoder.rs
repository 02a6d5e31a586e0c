//! # 内容解码服务
//!
//! 对记录 `content` 字段内嵌的二级 JSON 负载做容错解码。
//!
//! ## 容错策略
//! - 解码失败绝不向上抛出：返回类型化的空对象默认值 + 有效性标志，
//!   该记录降级为"不透明文本"处理，其他记录不受影响。
//! - 失败不缓存：每次分类/过滤重跑时独立重试解码。
//! - 逐字段默认值：缺失的 `recursive` 默认 false、缺失的 `options` 默认空列表、
//!   字符串形态的 `options` 先尝试嵌套解码再回退为空。
//! - 失败仅记录 debug 级诊断日志（`log` 门面），绝不作为用户可见错误浮出。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::payload::{ApplyChangesPayload, CommandPayload, ToolCallPayload};

/// 未解析字段的显式哨兵
///
/// 二级解码失败时，未能解析的字段由渲染层以此哨兵展示，而非直接省略。
pub const UNPARSED: &str = "未解析";

/// 容错解码结果：尽力而为的结构 + 有效性标志
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// 解码出的结构；失败时为逐字段默认值
    pub value: T,
    /// 解码是否成功
    pub ok: bool,
}

/// 通用容错解码：尝试将 `content` 解析为目标类型
///
/// # 参数
/// - `content` - 记录的原始文本负载
///
/// # 返回值
/// 成功时 `Decoded { value, ok: true }`；
/// 失败（格式错误或内容为空）时 `Decoded { value: T::default(), ok: false }`
fn decode_inner<T: DeserializeOwned + Default>(content: &str) -> Decoded<T> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Decoded {
            value: T::default(),
            ok: false,
        };
    }
    match serde_json::from_str::<T>(trimmed) {
        Ok(value) => Decoded { value, ok: true },
        Err(e) => {
            // 仅诊断日志，不浮出为用户可见错误
            log::debug!("二级负载解码失败，降级为默认值: {}", e);
            Decoded {
                value: T::default(),
                ok: false,
            }
        }
    }
}

/// 解码工具调用负载（`/agent/edit/tool/call` 路由）
pub fn decode_tool_call(content: &str) -> Decoded<ToolCallPayload> {
    decode_inner(content)
}

/// 解码命令类负载（命令建议 / 命令准备 / 命令执行统计）
pub fn decode_command(content: &str) -> Decoded<CommandPayload> {
    decode_inner(content)
}

/// 解码应用变更负载（`/agent/edit/apply_changes` / `apply_pre_changes` 路由）
pub fn decode_apply_changes(content: &str) -> Decoded<ApplyChangesPayload> {
    decode_inner(content)
}

/// 规范化记录的用户选项列表
///
/// 处理 `options` 字段的三种原始形态：
/// - 缺失（None）→ 空列表
/// - 数组 → 收集其中的字符串元素
/// - 字符串 → 先尝试嵌套解码为字符串数组，失败再回退为空列表
///
/// # 参数
/// - `raw` - 记录的原始 `options` 字段
///
/// # 返回值
/// 规范化后的选项字符串列表
pub fn normalize_options(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect(),
        // 字符串形态：内嵌 JSON，先尝试嵌套解码
        Some(Value::String(s)) => {
            let nested: Decoded<Vec<String>> = decode_inner(s);
            nested.value
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tool_call_success() {
        let d = decode_tool_call(r#"{"tool_name":"ReadFileTool","path":"src/main.rs"}"#);
        assert!(d.ok);
        assert_eq!(d.value.tool_name.as_deref(), Some("ReadFileTool"));
        assert_eq!(d.value.path.as_deref(), Some("src/main.rs"));
        // 缺失的 recursive 默认 false
        assert!(!d.value.recursive);
    }

    #[test]
    fn test_decode_malformed_falls_back_to_default() {
        let d = decode_tool_call("这不是 JSON {{{");
        assert!(!d.ok);
        assert_eq!(d.value, Default::default());
    }

    #[test]
    fn test_decode_empty_content() {
        let d = decode_apply_changes("");
        assert!(!d.ok);
        assert_eq!(d.value.have_commit, None);
    }

    #[test]
    fn test_decode_retried_every_pass() {
        // 失败不缓存：同一输入重复解码结果一致且相互独立
        let first = decode_command("broken");
        let second = decode_command("broken");
        assert_eq!(first, second);
        assert!(!first.ok);
    }

    #[test]
    fn test_normalize_options_missing() {
        assert!(normalize_options(None).is_empty());
    }

    #[test]
    fn test_normalize_options_array() {
        let raw = serde_json::json!(["是", "否"]);
        assert_eq!(normalize_options(Some(&raw)), vec!["是", "否"]);
    }

    #[test]
    fn test_normalize_options_nested_string() {
        // 字符串形态先尝试嵌套解码
        let raw = Value::String(r#"["accept","reject"]"#.to_string());
        assert_eq!(normalize_options(Some(&raw)), vec!["accept", "reject"]);
    }

    #[test]
    fn test_normalize_options_garbage_string() {
        // 嵌套解码失败回退为空列表
        let raw = Value::String("not json".to_string());
        assert!(normalize_options(Some(&raw)).is_empty());
    }
}
