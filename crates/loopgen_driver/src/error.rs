//! Generation Errors
//!
//! 生成管线入口处的错误类型，集成统一诊断系统。
//! 任何一步失败整个会话就失败，不写出半成品文件。

use loopgen_catalog::CatalogError;
use loopgen_codegen::CodegenError;
use loopgen_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
use thiserror::Error;

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerateError {
    /// 目录文件无效
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// 任务文件无效
    #[error("Mission error: {0}")]
    Mission(#[from] serde_json::Error),

    /// 某个 stage 的降低或模板替换失败
    #[error("Code generation error: {0}")]
    Codegen(#[from] CodegenError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// 转换为诊断列表并收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink) {
        match self {
            GenerateError::Catalog(err) => {
                sink.add(Diagnostic::error(format!("Catalog error: {}", err)));
            }
            GenerateError::Mission(err) => {
                sink.add(Diagnostic::error(format!("Mission error: {}", err)));
            }
            GenerateError::Codegen(err) => {
                let mut diag = Diagnostic::error(err.to_string());
                if let Some(stage) = err.stage() {
                    diag = diag.in_stage(stage);
                }
                if let Some(span) = err.span() {
                    diag = diag.span(span);
                }
                sink.add(diag);
            }
            GenerateError::Io(err) => {
                sink.add(Diagnostic::error(format!("IO error: {}", err)));
            }
        }
    }

    /// 使用统一诊断系统输出错误
    ///
    /// 有出错 stage 的表达式文本时走 ariadne 的标注报告，
    /// 否则退回普通的彩色单行输出。
    pub fn emit(&self, expression: Option<&str>) {
        let mut sink = DiagnosticSink::new();
        self.collect_to_sink(&mut sink);

        let emitter = Emitter::new();
        if let Some(text) = expression {
            for diag in sink.diagnostics() {
                emitter.emit_with_expression(diag, text);
            }
        } else {
            emitter.emit_all(sink.diagnostics());
        }
    }

    /// 出错 stage 的名称，用来找回它的表达式文本
    pub fn stage(&self) -> Option<&str> {
        match self {
            GenerateError::Codegen(err) => err.stage(),
            _ => None,
        }
    }
}

/// 生成结果类型
pub type GenerateResult<T> = Result<T, GenerateError>;
