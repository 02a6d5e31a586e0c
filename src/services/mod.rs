//! # 业务逻辑服务模块
//!
//! 包含核心管线各阶段的实现，与外部协作方（传输层、渲染分发）完全解耦：
//! - `parser` - 序列化转录快照的容错解析
//! - `decoder` - 二级 JSON 负载的容错解码（逐字段默认值 + 有效性标志）
//! - `classifier` - 记录分类器：优先级规则级联，输出唯一变体标记
//! - `lifecycle` - 流式生命周期状态与默认展示倾向的按快照推导
//! - `filter` - 转录过滤器：保序抑制瞬态噪声，末条恒在
//! - `transformer` - 管线入口：过滤 + 并行分类/解码/生命周期推导
//! - `cache` - 转录缓存：快照等价比对 + LRU 淘汰，消除无谓重渲染
//! - `respond` - 用户响应分发：校验 + 异步回调转发

pub mod cache;
pub mod classifier;
pub mod decoder;
pub mod filter;
pub mod lifecycle;
pub mod parser;
pub mod respond;
pub mod transformer;
