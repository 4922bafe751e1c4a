//! Catalog Entries
//!
//! 目录条目的值类型。加载后不可变，查询端只拿引用。

use serde::Deserialize;

/// 已知变量：语义类型 + 引用时需要注入的初始化代码
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableEntry {
    pub name: String,
    /// 语义类型标签 (Real, Pos, ...)
    #[serde(rename = "type")]
    pub value_type: String,
    /// 变量被引用时要生成的初始化代码
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// 可调用函数的一个重载
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionEntry {
    /// 调用名，多个重载共享同一个调用名
    pub call: String,
    /// 参数类型序列，重载解析按精确序列匹配
    pub arguments: Vec<String>,
    #[serde(rename = "return")]
    pub return_type: String,
    /// 头文件里的前向声明文本
    #[serde(default)]
    pub declaration: String,
    /// 源文件里的定义文本，可引用 ${objective_name}
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub description: String,
    /// 依赖的其他函数调用名
    #[serde(default)]
    pub requires: Vec<String>,
}

impl FunctionEntry {
    /// 这个重载的复合键
    pub fn overload_key(&self) -> String {
        overload_key(&self.call, &self.arguments)
    }
}

/// 类型映射：内部类型标签 → C++ 类型关键字
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub code: String,
}

/// 重载复合键: 调用名 + "_" + 各参数类型
///
/// 重载解析按这个键做精确匹配：参数个数和类型序列都必须一致，
/// 没有任何隐式转换。
pub fn overload_key<S: AsRef<str>>(call: &str, arguments: &[S]) -> String {
    let mut key = call.to_string();
    for argument in arguments {
        key.push('_');
        key.push_str(argument.as_ref());
    }
    key
}
