//! # Agent Transcript Core - 转录分类核心
//!
//! AI 编程助手会话转录的分类、流式生命周期与过滤核心。
//!
//! 后端持续推送有序的异构事件记录（工具调用、工具结果、流式思考、
//! 编译/Lint/索引进度、完成结果、用户回合等），本核心负责：
//! - 将每条记录分类为恰好一个语义变体（`VariantTag`，封闭枚举）
//! - 容忍部分或完全不合规的负载，绝不因此丢失记录
//! - 按快照推导每条记录的流式生命周期与默认展开/折叠倾向
//! - 对整个转录裁决哪些记录是应抑制的瞬态噪声
//!   （最新一条记录无论类别永不抑制）
//!
//! ## 数据流（单向）
//! ```text
//! 快照 Vec<MessageRecord>（传输层，核心外部）
//!      → services::filter（保序过滤，末条恒在）
//!      → services::transformer（并行：分类 + 负载解码 + 生命周期）
//!      → TransformedTranscript（按 VariantTag 查表的渲染分发，核心外部）
//! ```
//!
//! ## 模块结构
//! - `models/` - 数据模型（记录、变体标记、二级负载、显示层结构）
//! - `services/` - 核心业务逻辑（解析、解码、分类、生命周期、过滤、转换、缓存、响应分发）
//!
//! ## 契约要点
//! - 分类器是全函数：任何记录恰好得到一个变体（兜底规则无条件）
//! - 每个公开函数对其输入域全定义，核心绝不向公开边界之外抛出失败；
//!   二级解码失败仅降级为默认值并记录 debug 日志
//! - 对无活跃流的同一快照重复求值是无操作（`TranscriptCache` + 具名等价谓词）

pub mod models;
pub mod services;

pub use models::display::{DisplayRecord, Disposition, StreamPhase, TransformedTranscript};
pub use models::payload::{ApplyChangesPayload, CommandPayload, DecodedPayload, ToolCallPayload};
pub use models::record::MessageRecord;
pub use models::variant::{ToolName, VariantTag};
pub use services::cache::{snapshot_unchanged, TranscriptCache};
pub use services::classifier::classify;
pub use services::filter::filter_transcript;
pub use services::parser::parse_snapshot;
pub use services::respond::{submit_response, ResponseFuture, UserResponseHandler};
pub use services::transformer::transform_transcript;
