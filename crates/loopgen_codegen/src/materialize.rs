//! Function / Variable Materializer
//!
//! 把聚合阶段收集到的变量/函数引用集合变成实际的代码块：
//! 变量的初始化代码、函数的前向声明和定义。

use crate::error::CodegenResult;
use crate::template;
use loopgen_catalog::Catalog;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// 被引用变量的初始化代码
///
/// 按目录声明顺序拼接，与引用顺序无关。变量初始化之间不做依赖排序，
/// 目录作者要保证条目顺序本身是可用的。
pub fn variable_initialisation(variables: &BTreeSet<String>, catalog: &Catalog) -> String {
    let mut initialisation = String::new();
    for entry in catalog.variables() {
        if variables.contains(&entry.name) {
            initialisation += &entry.code;
        }
    }
    initialisation
}

/// 被引用函数的前向声明块和定义块
///
/// 请求的调用名先对条目的 requires 做传递闭包，然后按目录顺序输出
/// 所有匹配调用名的重载（同名的每个重载都要，不只一个）。
/// 定义块最后过一遍模板替换，把 ${objective_name} 填成本次会话的名称。
pub fn function_code(
    functions: &BTreeSet<String>,
    catalog: &Catalog,
    objective_name: &str,
) -> CodegenResult<(String, String)> {
    let mut declarations = String::from("    /********* Generated Functions **********/\n\n");
    let mut definitions = String::from("/********* Generated Functions **********/\n\n");

    // requires 闭包：被引用函数依赖的辅助函数也要物化
    let mut requested = functions.clone();
    let mut worklist: Vec<String> = functions.iter().cloned().collect();
    while let Some(call) = worklist.pop() {
        for entry in catalog.functions().filter(|f| f.call == call) {
            for dependency in &entry.requires {
                if requested.insert(dependency.clone()) {
                    worklist.push(dependency.clone());
                }
            }
        }
    }

    for entry in catalog.functions() {
        if !requested.contains(&entry.call) {
            continue;
        }
        if !entry.declaration.is_empty() {
            declarations += "    ";
            declarations += &entry.declaration;
        }
        if !entry.definition.is_empty() {
            definitions += "\n";
            definitions += &entry.definition;
        }
    }

    let mut values = BTreeMap::new();
    values.insert("objective_name".to_string(), objective_name.to_string());
    let definitions = template::substitute(&definitions, &values)?;

    Ok((declarations, definitions))
}
