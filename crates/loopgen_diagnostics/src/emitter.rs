//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出。
//! 如果手上有出错 stage 的表达式文本，可以用 [`Emitter::emit_with_expression`]
//! 让 ariadne 在表达式上直接标注出错位置。

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;
use ariadne::{Color, Label, Report, ReportKind, Source};
use colored::*;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 输出单个诊断
    pub fn emit(&self, diagnostic: &Diagnostic) {
        if self.use_colors {
            self.emit_colored(diagnostic);
        } else {
            self.emit_plain(diagnostic);
        }
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            println!(); // 诊断之间空行
        }
    }

    /// 在 stage 表达式文本上标注诊断位置
    ///
    /// 没有 span 的诊断退回到普通输出。
    pub fn emit_with_expression(&self, diagnostic: &Diagnostic, expression: &str) {
        let Some(span) = diagnostic.span.clone() else {
            self.emit(diagnostic);
            return;
        };

        let name = diagnostic.stage.as_deref().unwrap_or("expression");
        // 防御跨出文本末尾的 span (例如「意外的输入结束」)
        let end = span.end.min(expression.len()).max(span.start);
        let span = span.start.min(expression.len())..end;

        let kind = match diagnostic.level {
            DiagnosticLevel::Error => ReportKind::Error,
            DiagnosticLevel::Warning => ReportKind::Warning,
            DiagnosticLevel::Note => ReportKind::Advice,
        };

        let mut builder = Report::build(kind, name, span.start)
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((name, span))
                    .with_message(&diagnostic.message)
                    .with_color(Color::Red),
            );
        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }

        let _ = builder.finish().eprint((name, Source::from(expression)));
    }

    /// 输出带颜色的诊断
    fn emit_colored(&self, diagnostic: &Diagnostic) {
        println!(
            "{}: {}",
            diagnostic.level.colored_name(),
            diagnostic.message.bold()
        );

        if let Some(stage) = &diagnostic.stage {
            println!("  {} stage '{}'", "-->".blue().bold(), stage);
        }

        for note in &diagnostic.notes {
            println!(
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }
    }

    /// 输出纯文本诊断
    fn emit_plain(&self, diagnostic: &Diagnostic) {
        println!("{}: {}", diagnostic.level, diagnostic.message);

        if let Some(stage) = &diagnostic.stage {
            println!("  --> stage '{}'", stage);
        }

        for note in &diagnostic.notes {
            println!("  = note: {}", note);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        let emitter = Emitter::new();
        assert!(emitter.use_colors);

        let emitter_no_color = Emitter::without_colors();
        assert!(!emitter_no_color.use_colors);
    }

    #[test]
    fn test_emit_basic() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("test error");

        // 这个测试只是确保不会 panic
        emitter.emit(&diag);
    }

    #[test]
    fn test_emit_with_details() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("no matching overload")
            .in_stage("stage1")
            .with_note("check the function catalog");

        emitter.emit(&diag);
    }

    #[test]
    fn test_emit_with_expression_clamps_span() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("unexpected end of input").span(10..12);

        // span 超出文本末尾也不应 panic
        emitter.emit_with_expression(&diag, "1 + ");
    }
}
