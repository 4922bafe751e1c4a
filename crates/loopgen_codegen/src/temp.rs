//! Temporary Variable Allocator
//!
//! 每个函数调用的结果都落到一个编号唯一的临时变量里。
//! 分配器归一次生成会话独占：每次生成开始时新建一个实例，
//! 绝不做成进程级的静态计数器，否则并发生成会互相污染编号。

/// 临时变量分配器
#[derive(Debug, Default)]
pub struct TempVarAllocator {
    next_index: u32,
}

impl TempVarAllocator {
    /// 创建新的分配器，编号从 1 开始
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配下一个临时变量名，单调递增，永不复用
    pub fn next(&mut self) -> String {
        self.next_index += 1;
        format!("tempVar_{}", self.next_index)
    }

    /// 已分配的数量
    pub fn count(&self) -> u32 {
        self.next_index
    }
}
