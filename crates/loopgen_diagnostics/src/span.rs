//! Span - 表达式文本中的位置信息
//!
//! stage 表达式都是单行短文本，span 统一用字节偏移表示

/// 表达式文本中的字节范围
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    /// 创建一个新的 Span
    fn new(start: usize, end: usize) -> Self;

    /// 获取长度
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool;
}

impl SpanExt for Span {
    fn new(start: usize, end: usize) -> Self {
        start..end
    }

    fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
