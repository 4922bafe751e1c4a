//! Loopgen Diagnostics
//!
//! 统一的诊断系统，为目标函数生成器提供清晰的错误报告。
//! 生成失败的信息必须告诉用户是哪个 stage、哪一段表达式出了问题。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体（可携带 stage 名称与表达式位置）
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning/Note）
//! - [`DiagnosticSink`] - 诊断收集器
//! - [`Emitter`] - 诊断输出器（可用 ariadne 在表达式文本上标注位置）
//! - [`Span`] - 表达式文本中的字节范围
//!
//! # 示例
//!
//! ```rust
//! use loopgen_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
//!
//! let mut sink = DiagnosticSink::new();
//!
//! sink.add(
//!     Diagnostic::error("no matching overload for 'dist(Real, Real)'")
//!         .in_stage("stage1")
//!         .span(4..20)
//!         .with_note("known overloads: dist(Pos, Pos)"),
//! );
//!
//! if sink.has_errors() {
//!     let emitter = Emitter::without_colors();
//!     emitter.emit_all(sink.diagnostics());
//! }
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;
pub mod span;

// 重新导出核心类型
pub use diagnostic::Diagnostic;
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
pub use span::{Span, SpanExt};
