//! Stage Aggregator
//!
//! 按顺序处理一个函数的所有 stage：逐条解析、降低、赋值到 stage 变量，
//! 拼接代码并维护累计值，同时合并各 stage 的变量/函数引用集合。
//!
//! 语句顺序不变式：发出顺序严格等于 stage 声明顺序，stage 内部等于
//! 表达式从左到右的求值顺序。后面的代码会按名字引用前面的临时变量
//! 和 stage 变量，乱序输出会产生引用未声明标识符的代码。

use crate::error::{CodegenError, CodegenResult};
use crate::ident::clean_identifier;
use crate::lower::{LowerOptions, Lowerer};
use crate::materialize;
use crate::node::StageNode;
use crate::stage::Stage;
use crate::temp::TempVarAllocator;
use loopgen_catalog::Catalog;
use std::collections::BTreeSet;

/// 一个生成好的函数体及其依赖集合
#[derive(Debug, Clone, Default)]
pub struct GeneratedFunction {
    pub code: String,
    /// 所有 stage 引用的函数调用名
    pub functions: BTreeSet<String>,
    /// 所有 stage 引用的目录变量名
    pub variables: BTreeSet<String>,
}

/// init 函数的生成结果：函数体之外还有成员变量声明块
#[derive(Debug, Clone, Default)]
pub struct GeneratedInit {
    pub code: String,
    /// 头文件里的私有成员声明，每个 stage 一条
    pub declarations: String,
    pub functions: BTreeSet<String>,
    pub variables: BTreeSet<String>,
}

/// 解析并降低一条 stage，错误带上 stage 名称
fn lower_stage(
    stage: &Stage,
    catalog: &Catalog,
    temps: &mut TempVarAllocator,
    options: LowerOptions,
) -> CodegenResult<StageNode> {
    let mut run = || -> CodegenResult<StageNode> {
        let expr = loopgen_syntax::parse_stage(&stage.code)?;
        Lowerer::new(catalog, temps, options).lower(&expr)
    };
    run().map_err(|error| CodegenError::in_stage(&stage.name, error))
}

/// 共用的 stage 循环：返回 (累计值声明, 函数体, 函数集, 变量集)
fn generate_stage_code(
    stages: &[Stage],
    catalog: &Catalog,
    options: LowerOptions,
) -> CodegenResult<(String, String, BTreeSet<String>, BTreeSet<String>)> {
    let initialisation = String::from("Real temp = 0;\n");
    let mut code = String::new();
    // 临时变量计数归本次调用独占，跨 stage 不重置
    let mut temps = TempVarAllocator::new();
    let mut functions = BTreeSet::new();
    let mut variables = BTreeSet::new();

    for stage in stages {
        let stage_var = clean_identifier(&stage.name);
        code += &format!("\n  Real {} = 0;\n", stage_var);

        // 没有表达式的 stage 保持 0
        if stage.code.is_empty() {
            continue;
        }

        let mut node = lower_stage(stage, catalog, &mut temps, options)?;
        node.assign_to(&stage_var);
        code += &node.code;

        functions.extend(node.functions());
        variables.extend(node.variables());

        if stage.increment {
            code += &format!("  temp += {};\n", stage_var);
        }
    }

    Ok((initialisation, code, functions, variables))
}

/// 生成每步目标函数 (PostStep) 的函数体
///
/// 末尾返回累计值。被引用变量的初始化代码排在累计值声明之后、
/// stage 代码之前。
pub fn generate_post_step(
    stages: &[Stage],
    catalog: &Catalog,
    options: LowerOptions,
) -> CodegenResult<GeneratedFunction> {
    let (initialisation, mut code, functions, variables) =
        generate_stage_code(stages, catalog, options)?;
    code += "\n  return temp;";

    let initialisation = initialisation + &materialize::variable_initialisation(&variables, catalog);
    Ok(GeneratedFunction {
        code: initialisation + &code,
        functions,
        variables,
    })
}

/// 生成实验结束目标函数 (PostExperiment) 的函数体
///
/// 没有任何 stage 计入累计时整个函数体为空：不声明用不到的累计值，
/// 也不报告任何依赖。
pub fn generate_post_exp(
    stages: &[Stage],
    catalog: &Catalog,
    options: LowerOptions,
) -> CodegenResult<GeneratedFunction> {
    if !stages.iter().any(|stage| stage.increment) {
        return Ok(GeneratedFunction::default());
    }

    let (initialisation, mut code, functions, variables) =
        generate_stage_code(stages, catalog, options)?;
    code += "\n  m_ObjectiveFunction = temp;";

    let initialisation = initialisation + &materialize::variable_initialisation(&variables, catalog);
    Ok(GeneratedFunction {
        code: initialisation + &code,
        functions,
        variables,
    })
}

/// 生成 Init 函数体和对应的成员变量声明
///
/// 每个 stage 变成一条类型化的成员声明（类型取降低结果的值类型），
/// 没有累计值，各 stage 互相独立。
pub fn generate_init(
    stages: &[Stage],
    catalog: &Catalog,
    options: LowerOptions,
) -> CodegenResult<GeneratedInit> {
    let mut code = String::new();
    let mut declarations = String::new();
    let mut temps = TempVarAllocator::new();
    let mut functions = BTreeSet::new();
    let mut variables = BTreeSet::new();

    for stage in stages {
        let var_name = clean_identifier(&stage.name);

        if stage.code.is_empty() {
            continue;
        }

        let mut node = lower_stage(stage, catalog, &mut temps, options)?;
        let member_type = catalog.target_type(&node.value_type).ok_or_else(|| {
            CodegenError::in_stage(
                &stage.name,
                CodegenError::UnknownType {
                    type_name: node.value_type.clone(),
                },
            )
        })?;
        declarations += &format!("    {} {};\n", member_type, var_name);

        node.assign_to(&var_name);
        code += &node.code;

        functions.extend(node.functions());
        variables.extend(node.variables());
    }

    let initialisation = materialize::variable_initialisation(&variables, catalog);
    Ok(GeneratedInit {
        code: initialisation + &code,
        declarations,
        functions,
        variables,
    })
}
