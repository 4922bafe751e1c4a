//! Catalog Load Errors
//!
//! 目录文件损坏属于致命错误：在任何生成开始前就中止。

use thiserror::Error;

/// 目录加载/校验错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// JSON 反序列化失败
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// 同一个重载签名出现了两份冲突定义
    #[error("duplicate function signature '{key}'")]
    DuplicateSignature { key: String },

    /// 重复的变量名
    #[error("duplicate variable '{name}'")]
    DuplicateVariable { name: String },

    /// 重复的类型名
    #[error("duplicate type '{name}'")]
    DuplicateType { name: String },

    /// 条目引用了类型表里不存在的类型
    #[error("entry '{entry}' references unknown type '{type_name}'")]
    UnknownType { entry: String, type_name: String },
}
