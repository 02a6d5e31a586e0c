//! # 用户响应分发服务
//!
//! 实现与传输层约定的用户响应回调契约：
//! 当用户在需要选择的记录（`responseRequired` 记录）上选定一个选项时，
//! 核心校验该响应的合法性后调用外部协作方提供的异步回调
//! `on_user_response(answer, event_id) -> Future<Result<(), String>>`。
//!
//! 回调的具体实现（网络发送等）是核心外部的传输层职责。

use std::future::Future;
use std::pin::Pin;

use crate::models::record::MessageRecord;
use crate::services::decoder;

/// 用户响应回调返回的异步结果
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'static>>;

/// 用户响应回调契约
///
/// 由传输层协作方实现；核心只负责校验与转发，不关心回调内部如何投递。
pub trait UserResponseHandler: Send + Sync {
    /// 投递一次用户响应
    ///
    /// # 参数
    /// - `answer` - 用户选定的选项文本
    /// - `event_id` - 记录携带的事件标识（可缺失）
    fn on_user_response(&self, answer: String, event_id: Option<String>) -> ResponseFuture;
}

/// 提交用户响应
///
/// 校验后转发给回调：
/// 1. 记录必须标记为等待用户响应（`response_required`）
/// 2. 记录携带选项列表时，响应必须是其中之一
///    （选项列表经 `decoder::normalize_options` 规范化；
///    空列表视为自由文本响应，不做成员校验）
///
/// # 参数
/// - `handler` - 传输层提供的回调实现
/// - `record` - 用户响应的目标记录
/// - `answer` - 用户选定的选项文本
///
/// # 错误
/// 校验失败或回调本身失败时返回错误
pub async fn submit_response(
    handler: &dyn UserResponseHandler,
    record: &MessageRecord,
    answer: &str,
) -> Result<(), String> {
    if !record.response_required {
        return Err(format!("记录 {} 不等待用户响应", record.id));
    }

    let options = decoder::normalize_options(record.options.as_ref());
    if !options.is_empty() && !options.iter().any(|opt| opt == answer) {
        return Err(format!(
            "响应 \"{}\" 不在记录 {} 的选项列表中",
            answer, record.id
        ));
    }

    handler
        .on_user_response(answer.to_string(), record.event_id.clone())
        .await
}
