// 简单的 Span 定义 (表达式文本中的字节范围: 0..5)
pub type Span = std::ops::Range<usize>;

/// stage 表达式的语法树节点
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // 数字字面量，保留原始文本: 2, 0.75
    Number(String),

    // 字符串字面量，连同引号: "epuck"
    Str(String),

    // 目录变量引用: robotDistance, lightPos
    Variable(String),

    // 二元操作: a + b, a / b
    Binary(Box<Expr>, BinaryOp, Box<Expr>),

    // 一元取负: -a
    Unary(UnaryOp, Box<Expr>),

    // 函数调用: dist(p1, p2)
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div, // +, -, *, /
}

impl BinaryOp {
    /// 生成代码时使用的运算符文本
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -x
}
