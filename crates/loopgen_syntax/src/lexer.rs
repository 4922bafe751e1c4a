use logos::Logos;
use std::fmt;

/// stage 表达式的词法单元
///
/// 语法只覆盖算术表达式和函数调用，没有关键字。
/// 数字和字符串都保留原始文本：生成 C++ 代码时按原样输出，
/// 不经过任何数值往返转换。
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)] // 关键：加上 Eq 和 Hash
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // --- 符号 (Symbols) ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    // --- 数据 (Data) ---
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // 整数或小数，保留原始文本 (也顺便满足 Hash 实现)
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    // 双引号字符串，连同引号一起保留
    #[regex(r#""[^"]*""#, |lex| lex.slice().to_string())]
    Str(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Number(text) => write!(f, "{}", text),
            Token::Str(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    #[test]
    fn test_lexer_basic() {
        let code = "sum(a, b) + 2";
        let mut lexer = Token::lexer(code);

        assert_eq!(lexer.next(), Some(Ok(Token::Ident("sum".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::LParen)));
        assert_eq!(lexer.next(), Some(Ok(Token::Ident("a".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Comma)));
        assert_eq!(lexer.next(), Some(Ok(Token::Ident("b".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::RParen)));
        assert_eq!(lexer.next(), Some(Ok(Token::Plus)));
        assert_eq!(lexer.next(), Some(Ok(Token::Number("2".to_string()))));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_lexer_number_keeps_raw_text() {
        let mut lexer = Token::lexer("0.50");
        // 保留 "0.50" 而不是折叠成 0.5
        assert_eq!(lexer.next(), Some(Ok(Token::Number("0.50".to_string()))));
    }

    #[test]
    fn test_lexer_string_keeps_quotes() {
        let mut lexer = Token::lexer(r#""epuck""#);
        assert_eq!(lexer.next(), Some(Ok(Token::Str(r#""epuck""#.to_string()))));
    }

    #[test]
    fn test_lexer_rejects_unknown_char() {
        let mut lexer = Token::lexer("a ^ b");
        assert_eq!(lexer.next(), Some(Ok(Token::Ident("a".to_string()))));
        assert_eq!(lexer.next(), Some(Err(())));
    }
}
