//! # 数据模型模块
//!
//! 定义了核心各阶段的数据结构。
//! 所有对外结构体均派生 `Serialize`，供 IPC 风格的下游消费方序列化使用。
//! - `record` - 转录记录（不可变输入单元）及渲染状态等价谓词
//! - `variant` - 分类变体标记（封闭枚举，渲染分发的唯一键）
//! - `payload` - 二级 JSON 负载的类型化结构（wire 契约）
//! - `display` - 显示层数据结构（生命周期状态、展示倾向、转换结果）

pub mod display;
pub mod payload;
pub mod record;
pub mod variant;
