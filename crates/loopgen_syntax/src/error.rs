//! Stage Expression Syntax Errors
//!
//! 一条 stage 表达式解析失败会中止整次生成，
//! 错误必须携带位置信息以便在表达式文本上标注。

use crate::ast::Span;
use thiserror::Error;

/// stage 表达式语法错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// 词法错误：表达式里出现语法之外的字符
    #[error("unrecognized token in expression")]
    Lex { span: Span },

    /// 语法错误
    #[error("{message}")]
    Parse { message: String, span: Span },
}

impl SyntaxError {
    /// 获取错误发生的位置
    pub fn span(&self) -> &Span {
        match self {
            Self::Lex { span } => span,
            Self::Parse { span, .. } => span,
        }
    }
}
