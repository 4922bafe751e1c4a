//! Parser Module
//!
//! stage 表达式的解析入口。词法分析保留每个 token 的字节范围，
//! 这样 chumsky 的错误 span 可以直接落回表达式文本。

pub mod expr;

pub use expr::{expr_parser, ParserError};

use crate::ast::Expr;
use crate::error::SyntaxError;
use crate::lexer::Token;
use chumsky::prelude::*;
use chumsky::Stream;
use logos::Logos;

/// 主入口：解析单个 stage 表达式
pub fn parse_stage(text: &str) -> Result<Expr, SyntaxError> {
    // 词法分析
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(text).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(SyntaxError::Lex { span }),
        }
    }

    // 语法分析，要求消费整条表达式
    let end_of_input = text.len()..text.len() + 1;
    let stream = Stream::from_iter(end_of_input, tokens.into_iter());

    expr_parser()
        .then_ignore(end())
        .parse(stream)
        .map_err(|errors| match errors.into_iter().next() {
            // 一条 stage 表达式只向用户报告第一处错误
            Some(error) => {
                let span = error.span();
                SyntaxError::Parse {
                    message: error.to_string(),
                    span,
                }
            }
            None => SyntaxError::Parse {
                message: "invalid expression".to_string(),
                span: 0..text.len(),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ExprKind, UnaryOp};

    fn parse(text: &str) -> Expr {
        parse_stage(text).unwrap_or_else(|e| panic!("parse failed for '{}': {:?}", text, e))
    }

    #[test]
    fn test_parse_number() {
        let expr = parse("2.5");
        assert_eq!(expr.kind, ExprKind::Number("2.5".to_string()));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse("robotDistance");
        assert_eq!(expr.kind, ExprKind::Variable("robotDistance".to_string()));
    }

    #[test]
    fn test_parse_call_with_args() {
        let expr = parse("dist(p1, p2)");
        match expr.kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "dist");
                assert_eq!(args.len(), 2);
                assert_eq!(args[0].kind, ExprKind::Variable("p1".to_string()));
                assert_eq!(args[1].kind, ExprKind::Variable("p2".to_string()));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_no_args() {
        let expr = parse("robotCount()");
        match expr.kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "robotCount");
                assert!(args.is_empty());
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // a + b * c 应当解析为 a + (b * c)
        let expr = parse("a + b * c");
        match expr.kind {
            ExprKind::Binary(lhs, BinaryOp::Add, rhs) => {
                assert_eq!(lhs.kind, ExprKind::Variable("a".to_string()));
                assert!(matches!(rhs.kind, ExprKind::Binary(_, BinaryOp::Mul, _)));
            }
            other => panic!("expected add at top, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        // a - b - c 应当解析为 (a - b) - c
        let expr = parse("a - b - c");
        match expr.kind {
            ExprKind::Binary(lhs, BinaryOp::Sub, rhs) => {
                assert!(matches!(lhs.kind, ExprKind::Binary(_, BinaryOp::Sub, _)));
                assert_eq!(rhs.kind, ExprKind::Variable("c".to_string()));
            }
            other => panic!("expected sub at top, got {:?}", other),
        }
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = parse("(a + b) * c");
        assert!(matches!(expr.kind, ExprKind::Binary(_, BinaryOp::Mul, _)));
    }

    #[test]
    fn test_unary_negation() {
        let expr = parse("-dist(p1, p2)");
        match expr.kind {
            ExprKind::Unary(UnaryOp::Neg, inner) => {
                assert!(matches!(inner.kind, ExprKind::Call { .. }));
            }
            other => panic!("expected negation, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_calls() {
        let expr = parse("f(g(x), h(y))");
        match expr.kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 2);
                assert!(matches!(&args[0].kind, ExprKind::Call { name, .. } if name == "g"));
                assert!(matches!(&args[1].kind, ExprKind::Call { name, .. } if name == "h"));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_string_literal() {
        let expr = parse(r#"log("objective")"#);
        match expr.kind {
            ExprKind::Call { args, .. } => {
                assert_eq!(args[0].kind, ExprKind::Str(r#""objective""#.to_string()));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_error_has_span() {
        let err = parse_stage("a ^ b").unwrap_err();
        match err {
            SyntaxError::Lex { span } => assert_eq!(span, 2..3),
            other => panic!("expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_on_trailing_input() {
        let err = parse_stage("a + b )").unwrap_err();
        assert!(matches!(err, SyntaxError::Parse { .. }));
    }

    #[test]
    fn test_parse_error_on_incomplete_expression() {
        let err = parse_stage("a +").unwrap_err();
        assert!(matches!(err, SyntaxError::Parse { .. }));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(parse_stage("").is_err());
    }
}
