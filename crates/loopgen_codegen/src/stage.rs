//! Stage - 目标函数的一个命名组成部分
//!
//! 每个 stage 是一条可选的表达式，按顺序贡献到生成的函数体里。
//! `increment = false` 的 stage 照常计算，但不计入累计值，
//! 供后面的 stage 按名字引用中间结果。

use serde::Deserialize;

/// 一个 stage：名称 + 表达式文本 + 是否计入累计
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stage {
    pub name: String,
    /// 表达式文本，可以为空（stage 变量保持 0）
    #[serde(default)]
    pub code: String,
    /// 是否把这个 stage 的值累加进 total
    #[serde(default = "default_increment")]
    pub increment: bool,
}

fn default_increment() -> bool {
    true
}

impl Stage {
    pub fn new(name: impl Into<String>, code: impl Into<String>, increment: bool) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            increment,
        }
    }
}
