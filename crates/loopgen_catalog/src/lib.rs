//! Loopgen Catalog
//!
//! 目标函数词汇表：已知变量、可调用函数（按重载签名索引）、
//! 内部类型到 C++ 类型关键字的映射。
//! 从 JSON 描述一次性加载，加载时立即校验，之后只读。

pub mod catalog;
pub mod entry;
pub mod error;

pub use catalog::Catalog;
pub use entry::{overload_key, FunctionEntry, TypeEntry, VariableEntry};
pub use error::CatalogError;

/// 内部类型标签 (Real, Pos, String, ...)
pub type TypeName = String;
