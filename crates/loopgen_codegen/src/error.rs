//! Code Generation Error Types
//!
//! 生成过程中的错误。所有 stage 内部的错误都会被 [`CodegenError::Stage`]
//! 包一层，最终呈现给用户时能指出是哪个 stage 出了问题。

use loopgen_syntax::ast::Span;
use loopgen_syntax::SyntaxError;
use thiserror::Error;

/// 代码生成错误
#[derive(Debug, Error)]
pub enum CodegenError {
    /// 带 stage 名称的上下文包装
    #[error("in stage '{name}': {source}")]
    Stage {
        name: String,
        #[source]
        source: Box<CodegenError>,
    },

    /// stage 表达式解析失败
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// 引用了目录里不存在的变量（严格模式）
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String, span: Span },

    /// 重载解析失败：没有任何签名匹配这组参数类型
    #[error("no overload of '{call}' matches argument types ({arg_types})")]
    UnknownSignature {
        call: String,
        arg_types: String,
        span: Span,
    },

    /// 二元运算两侧类型不一致
    #[error("operator '{op}' applied to mismatched types '{left}' and '{right}'")]
    TypeMismatch {
        op: &'static str,
        left: String,
        right: String,
        span: Span,
    },

    /// 值类型在类型表里没有 C++ 映射
    #[error("type '{type_name}' has no C++ mapping in the catalog")]
    UnknownType { type_name: String },

    /// 模板引用了未设置的占位符
    #[error("template references unset placeholder '{name}'")]
    MissingPlaceholder { name: String },

    /// 模板里的 '$' 后面跟了非法内容
    #[error("invalid placeholder syntax at byte {position}")]
    BadPlaceholder { position: usize },
}

impl CodegenError {
    /// 给错误补上出错 stage 的名称
    pub fn in_stage(name: &str, error: CodegenError) -> CodegenError {
        CodegenError::Stage {
            name: name.to_string(),
            source: Box::new(error),
        }
    }

    /// 出错的 stage 名称（如果有）
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::Stage { name, .. } => Some(name),
            _ => None,
        }
    }

    /// 表达式文本中的出错位置（如果有）
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Stage { source, .. } => source.span(),
            Self::Syntax(error) => Some(error.span().clone()),
            Self::UnknownVariable { span, .. } => Some(span.clone()),
            Self::UnknownSignature { span, .. } => Some(span.clone()),
            Self::TypeMismatch { span, .. } => Some(span.clone()),
            Self::UnknownType { .. } => None,
            Self::MissingPlaceholder { .. } => None,
            Self::BadPlaceholder { .. } => None,
        }
    }
}

/// 代码生成结果类型
pub type CodegenResult<T> = Result<T, CodegenError>;
