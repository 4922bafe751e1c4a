//! Catalog
//!
//! 整张词汇表。变量和函数都保留声明顺序存储（materializer 按目录
//! 顺序输出），旁边挂一个 name → index 的哈希索引做查询。

use crate::entry::{overload_key, FunctionEntry, TypeEntry, VariableEntry};
use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;

/// JSON 文件的原始形状
#[derive(Debug, Deserialize)]
struct CatalogData {
    #[serde(default)]
    variables: Vec<VariableEntry>,
    #[serde(default)]
    functions: Vec<FunctionEntry>,
    #[serde(default)]
    types: Vec<TypeEntry>,
}

/// 已加载并校验过的目录，只读
#[derive(Debug, Clone)]
pub struct Catalog {
    variables: Vec<VariableEntry>,
    variable_index: HashMap<String, usize>,
    functions: Vec<FunctionEntry>,
    function_index: HashMap<String, usize>,
    /// 同一个调用名下所有重载的文档合并到一起
    call_descriptions: HashMap<String, String>,
    types: HashMap<String, String>,
}

impl Catalog {
    /// 从 JSON 文本加载目录，加载时立即做完整性校验
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(source)?;
        Self::from_data(data)
    }

    fn from_data(data: CatalogData) -> Result<Self, CatalogError> {
        let mut types = HashMap::new();
        for entry in &data.types {
            if types
                .insert(entry.name.clone(), entry.code.clone())
                .is_some()
            {
                return Err(CatalogError::DuplicateType {
                    name: entry.name.clone(),
                });
            }
        }

        let mut variable_index = HashMap::new();
        for (index, variable) in data.variables.iter().enumerate() {
            if variable_index
                .insert(variable.name.clone(), index)
                .is_some()
            {
                return Err(CatalogError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
            check_type(&types, &variable.name, &variable.value_type)?;
        }

        let mut function_index = HashMap::new();
        let mut call_descriptions: HashMap<String, String> = HashMap::new();
        for (index, function) in data.functions.iter().enumerate() {
            let key = function.overload_key();
            if function_index.insert(key.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSignature { key });
            }
            check_type(&types, &function.call, &function.return_type)?;
            for argument in &function.arguments {
                check_type(&types, &function.call, argument)?;
            }

            // 同名重载的文档合并成一段
            if !function.description.is_empty() {
                let merged = call_descriptions.entry(function.call.clone()).or_default();
                if !merged.is_empty() {
                    merged.push('\n');
                }
                merged.push_str(&function.description);
            }
        }

        Ok(Self {
            variables: data.variables,
            variable_index,
            functions: data.functions,
            function_index,
            call_descriptions,
            types,
        })
    }

    /// 按名字查变量；查不到返回 None，由调用方决定严格或宽松
    pub fn variable(&self, name: &str) -> Option<&VariableEntry> {
        self.variable_index
            .get(name)
            .map(|&index| &self.variables[index])
    }

    /// 重载解析：调用名 + 参数类型序列的精确匹配
    pub fn resolve<S: AsRef<str>>(&self, call: &str, arg_types: &[S]) -> Option<&FunctionEntry> {
        self.function_index
            .get(&overload_key(call, arg_types))
            .map(|&index| &self.functions[index])
    }

    /// 内部类型标签对应的 C++ 类型关键字
    pub fn target_type(&self, type_name: &str) -> Option<&str> {
        self.types.get(type_name).map(String::as_str)
    }

    /// 某个调用名的合并文档
    pub fn call_description(&self, call: &str) -> Option<&str> {
        self.call_descriptions.get(call).map(String::as_str)
    }

    /// 变量，按目录声明顺序
    pub fn variables(&self) -> impl Iterator<Item = &VariableEntry> {
        self.variables.iter()
    }

    /// 函数重载，按目录声明顺序
    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.functions.iter()
    }
}

fn check_type(
    types: &HashMap<String, String>,
    entry: &str,
    type_name: &str,
) -> Result<(), CatalogError> {
    if types.contains_key(type_name) {
        Ok(())
    } else {
        Err(CatalogError::UnknownType {
            entry: entry.to_string(),
            type_name: type_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "types": [
            {"name": "Real", "code": "Real"},
            {"name": "Pos", "code": "CVector2"},
            {"name": "String", "code": "std::string"}
        ],
        "variables": [
            {"name": "lightPos", "type": "Pos", "code": "  CVector2 lightPos(0, 0);\n"},
            {"name": "robotCount", "type": "Real"}
        ],
        "functions": [
            {
                "call": "dist",
                "arguments": ["Pos", "Pos"],
                "return": "Real",
                "declaration": "Real dist(CVector2 a, CVector2 b);\n",
                "definition": "Real ${objective_name}LoopFunction::dist(...) {}\n",
                "description": "distance between two positions"
            },
            {
                "call": "dist",
                "arguments": ["Pos", "Real"],
                "return": "Real",
                "description": "distance from a position to a scalar offset"
            }
        ]
    }"#;

    #[test]
    fn test_load_and_lookup() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        let var = catalog.variable("lightPos").unwrap();
        assert_eq!(var.value_type, "Pos");

        assert!(catalog.variable("unknown").is_none());
        assert_eq!(catalog.target_type("Pos"), Some("CVector2"));
        assert_eq!(catalog.target_type("List"), None);
    }

    #[test]
    fn test_resolve_exact_signature() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        let entry = catalog.resolve("dist", &["Pos", "Pos"]).unwrap();
        assert_eq!(entry.return_type, "Real");
        assert_eq!(entry.arguments, vec!["Pos", "Pos"]);

        // 精确匹配：参数顺序不同就是另一个重载
        let other = catalog.resolve("dist", &["Pos", "Real"]).unwrap();
        assert_ne!(entry.overload_key(), other.overload_key());

        // 没有这个签名
        assert!(catalog.resolve("dist", &["Real", "Real"]).is_none());
        assert!(catalog.resolve("angle", &["Pos"]).is_none());
    }

    #[test]
    fn test_descriptions_are_merged_per_call() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let merged = catalog.call_description("dist").unwrap();
        assert!(merged.contains("distance between two positions"));
        assert!(merged.contains("scalar offset"));
    }

    #[test]
    fn test_duplicate_signature_rejected() {
        let source = r#"{
            "types": [{"name": "Real", "code": "Real"}],
            "functions": [
                {"call": "f", "arguments": ["Real"], "return": "Real"},
                {"call": "f", "arguments": ["Real"], "return": "Real"}
            ]
        }"#;
        let err = Catalog::from_json(source).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSignature { key } if key == "f_Real"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let source = r#"{
            "types": [{"name": "Real", "code": "Real"}],
            "variables": [{"name": "p", "type": "Pos"}]
        }"#;
        let err = Catalog::from_json(source).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownType { type_name, .. } if type_name == "Pos"));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(matches!(
            Catalog::from_json("{ not json").unwrap_err(),
            CatalogError::Json(_)
        ));
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let names: Vec<_> = catalog.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["lightPos", "robotCount"]);
    }
}
