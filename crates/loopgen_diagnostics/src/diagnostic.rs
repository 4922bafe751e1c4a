//! Diagnostic - 诊断信息
//!
//! 表示一次生成过程中的诊断（错误、警告等）。
//! 与通用编译器不同，这里的位置是「某个 stage 的表达式文本里的范围」，
//! 所以诊断可以同时携带 stage 名称和表达式内的 span。

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 诊断信息
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 主要消息
    pub message: String,
    /// 出错的 stage 名称（可选）
    pub stage: Option<String>,
    /// 表达式文本中的位置（可选）
    pub span: Option<Span>,
    /// 补充注释
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// 创建新的诊断
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            stage: None,
            span: None,
            notes: Vec::new(),
        }
    }

    /// 创建错误诊断
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    /// 创建警告诊断
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    /// 创建注释诊断
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, message)
    }

    /// 标记出错的 stage
    pub fn in_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// 设置表达式内的位置
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
