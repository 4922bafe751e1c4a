//! Loopgen Code Generation
//!
//! 表达式降低与 C++ 代码片段生成
//!
//! # 架构
//!
//! 模块化设计，每个阶段一个文件：
//! - `error.rs` - 错误类型定义
//! - `temp.rs` - 临时变量计数器（每次生成会话独立）
//! - `node.rs` - 降低产物 StageNode 与依赖收集
//! - `lower.rs` - 表达式树到 StageNode 的降低引擎
//! - `stage.rs` - Stage 记录
//! - `aggregate.rs` - 按顺序聚合一个函数的所有 stage
//! - `materialize.rs` - 被引用变量/函数的物化
//! - `ident.rs` - 标识符清理
//! - `template.rs` - 占位符替换
//! - `geometry.rs` - 出生位置采样代码

pub mod aggregate;
pub mod error;
pub mod geometry;
pub mod ident;
pub mod lower;
pub mod materialize;
pub mod node;
pub mod stage;
pub mod temp;
pub mod template;

// 重新导出核心类型
pub use aggregate::{generate_init, generate_post_exp, generate_post_step};
pub use aggregate::{GeneratedFunction, GeneratedInit};
pub use error::{CodegenError, CodegenResult};
pub use geometry::{random_position_code, Arena, ArenaShape, Spawn, SpawnShape};
pub use ident::clean_identifier;
pub use lower::{LowerOptions, Lowerer};
pub use node::StageNode;
pub use stage::Stage;
pub use temp::TempVarAllocator;
