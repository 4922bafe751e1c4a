//! Identifier Sanitizer
//!
//! 用户在界面里输入的名称（objective 名、stage 名）是任意文本，
//! 生成代码前要整理成合法的 C++ 标识符。

/// 把任意显示名称整理成合法的 C++ 标识符
///
/// 非字母数字的字符被丢弃，并把紧跟其后的字母转成大写
/// ("New objective" → "NewObjective")；开头是数字时垫一个下划线；
/// 什么都不剩时返回 "_"。
pub fn clean_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if out.is_empty() && c.is_ascii_digit() {
                out.push('_');
            }
            if capitalize_next {
                out.push(c.to_ascii_uppercase());
                capitalize_next = false;
            } else {
                out.push(c);
            }
        } else {
            // 分隔符：丢弃，下一个字符提升为大写
            capitalize_next = !out.is_empty();
        }
    }

    if out.is_empty() {
        out.push('_');
    }
    out
}
