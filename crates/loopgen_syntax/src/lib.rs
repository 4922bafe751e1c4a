//! Loopgen Syntax
//!
//! stage 表达式的词法与语法分析。
//! 语法很小：数字/字符串字面量、变量引用、四则运算、函数调用，
//! 没有控制流，也没有用户自定义函数。

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::SyntaxError;
pub use parser::parse_stage;
