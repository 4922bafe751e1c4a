//! Expression Parser
//!
//! 表达式解析：字面量、变量引用、四则运算、函数调用

use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

pub type ParserError = Simple<Token>;

/// 解析 stage 表达式 (公共接口)
///
/// 优先级从低到高：加减 → 乘除 → 一元取负 → 原子
pub fn expr_parser() -> impl Parser<Token, Expr, Error = ParserError> + Clone {
    recursive(|expr| {
        // 字面量 (Literal Parser)
        let val = select! {
            Token::Number(text) => ExprKind::Number(text),
            Token::Str(text) => ExprKind::Str(text),
        }
        .map_with_span(|kind, span| Expr { kind, span });

        let ident = select! { Token::Ident(name) => name };

        // 函数调用: dist(p1, p2)
        let call = ident
            .then(
                expr.clone()
                    .separated_by(just(Token::Comma))
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .map_with_span(|(name, args), span| Expr {
                kind: ExprKind::Call { name, args },
                span,
            });

        // 变量引用
        let var = ident.map_with_span(|name, span| Expr {
            kind: ExprKind::Variable(name),
            span,
        });

        let paren = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        // call 必须排在 var 之前，否则 `f(x)` 里的 f 会被当成变量
        let atom = val.or(call).or(var).or(paren);

        // 一元取负 (-)
        let unary = just(Token::Minus)
            .to(UnaryOp::Neg)
            .repeated()
            .then(atom.clone())
            .foldr(|op, rhs| {
                let span = rhs.span.clone();
                Expr {
                    kind: ExprKind::Unary(op, Box::new(rhs)),
                    span,
                }
            });

        // 乘除
        let product = unary
            .clone()
            .then(
                just(Token::Star)
                    .to(BinaryOp::Mul)
                    .or(just(Token::Slash).to(BinaryOp::Div))
                    .then(unary)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| {
                let span = lhs.span.start..rhs.span.end;
                Expr {
                    kind: ExprKind::Binary(Box::new(lhs), op, Box::new(rhs)),
                    span,
                }
            });

        // 加减
        product
            .clone()
            .then(
                just(Token::Plus)
                    .to(BinaryOp::Add)
                    .or(just(Token::Minus).to(BinaryOp::Sub))
                    .then(product)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| {
                let span = lhs.span.start..rhs.span.end;
                Expr {
                    kind: ExprKind::Binary(Box::new(lhs), op, Box::new(rhs)),
                    span,
                }
            })
    })
}
