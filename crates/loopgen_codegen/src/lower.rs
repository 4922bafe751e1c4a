//! Lowering Engine
//!
//! 自底向上遍历表达式树，为每个节点解析值类型、发出语句代码、
//! 生成最终值指令。函数调用在这里做重载解析并分配临时变量。
//!
//! 分发用 `ExprKind` 的穷尽 match 完成，缺了哪条规则编译器会直接报错。

use crate::error::{CodegenError, CodegenResult};
use crate::node::{Reference, Rule, StageNode};
use crate::temp::TempVarAllocator;
use loopgen_catalog::Catalog;
use loopgen_syntax::ast::{BinaryOp, Expr, ExprKind, UnaryOp};

/// 降低选项
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerOptions {
    /// 宽松变量模式：未知变量退化成 Pos 类型占位，而不是报错。
    /// 旧版生成器的默认行为，只为兼容保留；新代码应当用严格模式，
    /// 让拼写错误尽早暴露。
    pub lenient_variables: bool,
}

/// 表达式降低器，借用会话的临时变量分配器
pub struct Lowerer<'a> {
    catalog: &'a Catalog,
    temps: &'a mut TempVarAllocator,
    options: LowerOptions,
}

impl<'a> Lowerer<'a> {
    pub fn new(catalog: &'a Catalog, temps: &'a mut TempVarAllocator, options: LowerOptions) -> Self {
        Self {
            catalog,
            temps,
            options,
        }
    }

    /// 降低一棵表达式树（主分发方法）
    pub fn lower(&mut self, expr: &Expr) -> CodegenResult<StageNode> {
        match &expr.kind {
            ExprKind::Number(text) => Ok(StageNode::leaf(Rule::Number, "Real", text.clone())),
            ExprKind::Str(text) => Ok(StageNode::leaf(Rule::Str, "String", text.clone())),
            ExprKind::Variable(name) => self.lower_variable(name, expr),
            ExprKind::Unary(UnaryOp::Neg, inner) => self.lower_negation(inner),
            ExprKind::Binary(left, op, right) => self.lower_binary(left, *op, right, expr),
            ExprKind::Call { name, args } => self.lower_call(name, args, expr),
        }
    }

    /// 变量引用：目录查询，未知变量按模式处理
    fn lower_variable(&mut self, name: &str, expr: &Expr) -> CodegenResult<StageNode> {
        let value_type = match self.catalog.variable(name) {
            Some(entry) => entry.value_type.clone(),
            None if self.options.lenient_variables => "Pos".to_string(),
            None => {
                return Err(CodegenError::UnknownVariable {
                    name: name.to_string(),
                    span: expr.span.clone(),
                })
            }
        };

        let mut node = StageNode::leaf(Rule::Var, value_type, name);
        node.reference = Some(Reference::Variable(name.to_string()));
        Ok(node)
    }

    /// 取负是纯语法包装：不需要临时变量，类型和代码原样传递
    fn lower_negation(&mut self, inner: &Expr) -> CodegenResult<StageNode> {
        let inner = self.lower(inner)?;
        Ok(StageNode {
            rule: Rule::Neg,
            value_type: inner.value_type.clone(),
            instruction: format!("-({})", inner.instruction),
            code: inner.code.clone(),
            children: vec![inner],
            reference: None,
        })
    }

    /// 二元运算：两侧类型必须一致，结果类型取左操作数
    fn lower_binary(
        &mut self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        expr: &Expr,
    ) -> CodegenResult<StageNode> {
        let left = self.lower(left)?;
        let right = self.lower(right)?;

        if left.value_type != right.value_type {
            return Err(CodegenError::TypeMismatch {
                op: op.symbol(),
                left: left.value_type.clone(),
                right: right.value_type.clone(),
                span: expr.span.clone(),
            });
        }

        let rule = match op {
            BinaryOp::Add => Rule::Add,
            BinaryOp::Sub => Rule::Sub,
            BinaryOp::Mul => Rule::Mul,
            BinaryOp::Div => Rule::Div,
        };

        Ok(StageNode {
            rule,
            value_type: left.value_type.clone(),
            instruction: format!("({} {} {})", left.instruction, op.symbol(), right.instruction),
            code: format!("{}{}", left.code, right.code),
            children: vec![left, right],
            reference: None,
        })
    }

    /// 函数调用：参数先按从左到右降低，重载按参数类型序列精确解析，
    /// 调用结果落到一个新分配的临时变量里
    fn lower_call(&mut self, name: &str, args: &[Expr], expr: &Expr) -> CodegenResult<StageNode> {
        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(self.lower(arg)?);
        }

        let arg_types: Vec<&str> = arguments.iter().map(|a| a.value_type.as_str()).collect();
        let entry = self.catalog.resolve(name, &arg_types).ok_or_else(|| {
            CodegenError::UnknownSignature {
                call: name.to_string(),
                arg_types: arg_types.join(", "),
                span: expr.span.clone(),
            }
        })?;

        let target_type = self
            .catalog
            .target_type(&entry.return_type)
            .ok_or_else(|| CodegenError::UnknownType {
                type_name: entry.return_type.clone(),
            })?;

        let temp_var = self.temps.next();

        // 先刷出所有参数的副作用，再发出声明加调用语句
        let mut code = String::new();
        for argument in &arguments {
            code += &argument.code;
        }
        let instructions: Vec<&str> = arguments.iter().map(|a| a.instruction.as_str()).collect();
        code += &format!(
            "  {} {} = {}({});\n",
            target_type,
            temp_var,
            name,
            instructions.join(", ")
        );

        Ok(StageNode {
            rule: Rule::Func,
            value_type: entry.return_type.clone(),
            instruction: temp_var,
            code,
            children: arguments,
            reference: Some(Reference::Function(entry.call.clone())),
        })
    }
}
