//! Template Substitution
//!
//! 生成的代码片段通过命名占位符塞进输出模板。
//! 语法沿用模板文件既有的约定：`${name}`、`$name`、`$$` 转义。
//!
//! 两种替换模式：
//! - [`substitute`]：缺占位符就报错，用于函数定义里的 ${objective_name}；
//! - [`substitute_lenient`]：缺的占位符替换成空文本，用于最终文件模板
//!   （模板里可能有本次生成用不到的槽位，比如 reset_function）。

use crate::error::{CodegenError, CodegenResult};
use std::collections::BTreeMap;

/// 严格替换：未设置的占位符是错误
pub fn substitute(template: &str, values: &BTreeMap<String, String>) -> CodegenResult<String> {
    render(template, values, true)
}

/// 宽松替换：未设置的占位符替换成空文本
pub fn substitute_lenient(template: &str, values: &BTreeMap<String, String>) -> String {
    // 宽松模式下 render 不会返回错误
    render(template, values, false).unwrap_or_default()
}

fn render(
    template: &str,
    values: &BTreeMap<String, String>,
    strict: bool,
) -> CodegenResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            // "$$" 转义成一个 '$'
            Some((_, '$')) => {
                chars.next();
                out.push('$');
            }
            // "${name}"
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed || !is_identifier(&name) {
                    if strict {
                        return Err(CodegenError::BadPlaceholder { position });
                    }
                    // 宽松模式下原样保留整段文本，包括右花括号
                    out.push_str("${");
                    out.push_str(&name);
                    if closed {
                        out.push('}');
                    }
                    continue;
                }
                push_value(&mut out, &name, values, strict)?;
            }
            // "$name"
            Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some((_, c)) = chars.peek().copied() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                push_value(&mut out, &name, values, strict)?;
            }
            // 孤立的 '$'
            _ => {
                if strict {
                    return Err(CodegenError::BadPlaceholder { position });
                }
                out.push('$');
            }
        }
    }

    Ok(out)
}

fn push_value(
    out: &mut String,
    name: &str,
    values: &BTreeMap<String, String>,
    strict: bool,
) -> CodegenResult<()> {
    match values.get(name) {
        Some(value) => out.push_str(value),
        None if strict => {
            return Err(CodegenError::MissingPlaceholder {
                name: name.to_string(),
            })
        }
        None => {} // 宽松模式：空文本
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
