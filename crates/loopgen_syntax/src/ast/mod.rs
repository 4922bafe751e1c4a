pub mod expr;

// 重新导出核心类型，方便外部直接使用 loopgen_syntax::ast::Expr 等
pub use expr::{BinaryOp, Expr, ExprKind, Span, UnaryOp};
