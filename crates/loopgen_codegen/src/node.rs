//! StageNode - 带属性的表达式树节点
//!
//! 降低 (lowering) 的产物：每个节点都带着已解析的值类型、
//! 到目前为止发出的语句代码，以及代表该节点最终值的指令文本。
//!
//! 不变式：`code` 是所有后代节点发出的语句按从左到右求值顺序的拼接，
//! 再加上本节点自己的语句（如果有）；`instruction` 引用的临时变量
//! 一定已经在 `code` 里声明过。

use loopgen_catalog::TypeName;
use std::collections::BTreeSet;

/// 节点对应的语法规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Number,
    Str,
    Var,
    Func,
    Add,
    Sub,
    Mul,
    Div,
    Neg,
}

/// 节点引用的目录条目，用于依赖收集
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Variable(String),
    Function(String),
}

/// 带属性的表达式树节点，构建完成后不可变
#[derive(Debug, Clone)]
pub struct StageNode {
    pub rule: Rule,
    /// 已解析的值类型 (Real, Pos, String, ...)
    pub value_type: TypeName,
    /// 代表本节点最终值的表达式文本：字面量、变量名、
    /// 运算表达式或临时变量名
    pub instruction: String,
    /// 到目前为止发出的语句（可能为空）
    pub code: String,
    pub children: Vec<StageNode>,
    /// 引用的目录条目（var/func 节点）
    pub reference: Option<Reference>,
}

impl StageNode {
    /// 叶子节点：没有子节点，也不发出语句
    pub fn leaf(rule: Rule, value_type: impl Into<TypeName>, instruction: impl Into<String>) -> Self {
        Self {
            rule,
            value_type: value_type.into(),
            instruction: instruction.into(),
            code: String::new(),
            children: Vec::new(),
            reference: None,
        }
    }

    /// 传递闭包：本节点及后代引用的所有目录变量名
    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut BTreeSet<String>) {
        if let Some(Reference::Variable(name)) = &self.reference {
            names.insert(name.clone());
        }
        for child in &self.children {
            child.collect_variables(names);
        }
    }

    /// 传递闭包：本节点及后代引用的所有函数调用名
    pub fn functions(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_functions(&mut names);
        names
    }

    fn collect_functions(&self, names: &mut BTreeSet<String>) {
        if let Some(Reference::Function(name)) = &self.reference {
            names.insert(name.clone());
        }
        for child in &self.children {
            child.collect_functions(names);
        }
    }

    /// 把表达式的值赋给一个命名的 stage 变量
    ///
    /// 追加 `<target> = <instruction>;` 语句，并把指令替换成目标名，
    /// 后续 stage 就能按名字复用这个值。
    pub fn assign_to(&mut self, target: &str) {
        self.code += &format!("  {} = {};\n", target, self.instruction);
        self.instruction = target.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_to_rewrites_instruction() {
        let mut node = StageNode::leaf(Rule::Number, "Real", "2");
        node.assign_to("stage0");

        assert_eq!(node.code, "  stage0 = 2;\n");
        assert_eq!(node.instruction, "stage0");
    }

    #[test]
    fn test_reference_collection_is_transitive() {
        let mut var_a = StageNode::leaf(Rule::Var, "Real", "a");
        var_a.reference = Some(Reference::Variable("a".to_string()));
        let mut var_b = StageNode::leaf(Rule::Var, "Real", "b");
        var_b.reference = Some(Reference::Variable("b".to_string()));

        let mut call = StageNode::leaf(Rule::Func, "Real", "tempVar_1");
        call.reference = Some(Reference::Function("sum".to_string()));
        call.children = vec![var_a, var_b];

        let root = StageNode {
            rule: Rule::Add,
            value_type: "Real".to_string(),
            instruction: "(tempVar_1 + 2)".to_string(),
            code: String::new(),
            children: vec![call, StageNode::leaf(Rule::Number, "Real", "2")],
            reference: None,
        };

        assert_eq!(
            root.variables().into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            root.functions().into_iter().collect::<Vec<_>>(),
            vec!["sum".to_string()]
        );
    }
}
