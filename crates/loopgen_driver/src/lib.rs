//! Loopgen Driver
//!
//! 生成管线的入口：任务描述 + 目录 + 模板进，头文件/源文件文本出。
//! 各阶段串联顺序：
//!
//! 1. 清理 objective 名称，得到三种大小写形式
//! 2. 三类函数（PostStep / PostExperiment / Init）逐个聚合生成
//! 3. 汇总依赖集合，物化被引用的函数声明/定义
//! 4. 生成随机出生位置代码
//! 5. 宽松模板替换，拼出最终的两份文件

pub mod error;

pub use error::{GenerateError, GenerateResult};

use loopgen_catalog::Catalog;
use loopgen_codegen::geometry::{random_position_code, Arena};
use loopgen_codegen::lower::LowerOptions;
use loopgen_codegen::template::substitute_lenient;
use loopgen_codegen::{
    clean_identifier, generate_init, generate_post_exp, generate_post_step, materialize, Stage,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// 一个 objective：名称和三类函数各自的 stage 列表
#[derive(Debug, Clone, Deserialize)]
pub struct Objective {
    pub name: String,
    #[serde(rename = "postStepStages", default)]
    pub post_step_stages: Vec<Stage>,
    #[serde(rename = "postExpStages", default)]
    pub post_exp_stages: Vec<Stage>,
    #[serde(rename = "initStages", default)]
    pub init_stages: Vec<Stage>,
}

impl Objective {
    /// 按名称找回 stage 的表达式文本，错误标注时用
    pub fn stage_code(&self, name: &str) -> Option<&str> {
        self.post_step_stages
            .iter()
            .chain(&self.post_exp_stages)
            .chain(&self.init_stages)
            .find(|stage| stage.name == name)
            .map(|stage| stage.code.as_str())
    }
}

/// 任务描述：objective + 场地几何
#[derive(Debug, Clone, Deserialize)]
pub struct Mission {
    pub objective: Objective,
    pub arena: Arena,
}

impl Mission {
    pub fn from_json(text: &str) -> GenerateResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// 生成选项
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// 写进文件头注释的来源标签
    pub source: Option<String>,
    /// 宽松变量模式（旧版兼容），默认严格
    pub lenient_variables: bool,
}

/// 输出模板对，默认内嵌本 crate resources/ 里的两份文档
#[derive(Debug, Clone)]
pub struct Templates {
    pub header: String,
    pub source: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            header: include_str!("../resources/TemplateLoopFunction.h").to_string(),
            source: include_str!("../resources/TemplateLoopFunction.cpp").to_string(),
        }
    }
}

/// 生成结果：头文件和源文件的完整文本
#[derive(Debug, Clone)]
pub struct LoopFunctions {
    pub header: String,
    pub source: String,
}

/// 运行完整的生成管线
pub fn generate(
    mission: &Mission,
    catalog: &Catalog,
    templates: &Templates,
    options: &GenerateOptions,
) -> GenerateResult<LoopFunctions> {
    let lower = LowerOptions {
        lenient_variables: options.lenient_variables,
    };
    let objective = &mission.objective;

    let mut content = BTreeMap::new();
    let objective_name = clean_identifier(&objective.name);
    content.insert("objective_name".to_string(), objective_name.clone());
    content.insert("OBJECTIVE_NAME".to_string(), objective_name.to_uppercase());
    content.insert(
        "objective_name_lower".to_string(),
        objective_name.to_lowercase(),
    );

    if let Some(source) = &options.source {
        content.insert(
            "source_header".to_string(),
            format!("// File Generated from {}", source),
        );
    }

    let mut functions = BTreeSet::new();
    let mut variables = BTreeSet::new();

    let post_step = generate_post_step(&objective.post_step_stages, catalog, lower)?;
    functions.extend(post_step.functions);
    variables.extend(post_step.variables);
    content.insert("compute_step_function".to_string(), post_step.code);

    let post_exp = generate_post_exp(&objective.post_exp_stages, catalog, lower)?;
    functions.extend(post_exp.functions);
    variables.extend(post_exp.variables);
    content.insert("post_experiment_function".to_string(), post_exp.code);

    let init = generate_init(&objective.init_stages, catalog, lower)?;
    functions.extend(init.functions);
    variables.extend(init.variables);
    content.insert("init_function".to_string(), init.code);
    content.insert("private_variables".to_string(), init.declarations);

    let (declarations, definitions) =
        materialize::function_code(&functions, catalog, &objective_name)?;
    content.insert("private_function_decl".to_string(), declarations);
    content.insert("private_function_def".to_string(), definitions);

    content.insert(
        "random_position_function".to_string(),
        random_position_code(&mission.arena),
    );

    // 模板里允许存在本次用不到的槽位 (比如 reset_function)，
    // 所以这里走宽松替换
    Ok(LoopFunctions {
        header: substitute_lenient(&templates.header, &content),
        source: substitute_lenient(&templates.source, &content),
    })
}

/// 运行管线并把两份文件写到 `<base>.h` / `<base>.cpp`
///
/// 生成失败时不写出任何文件。
pub fn generate_files(
    mission: &Mission,
    catalog: &Catalog,
    templates: &Templates,
    options: &GenerateOptions,
    base_path: &Path,
) -> GenerateResult<()> {
    let generated = generate(mission, catalog, templates, options)?;
    fs::write(base_path.with_extension("h"), generated.header)?;
    fs::write(base_path.with_extension("cpp"), generated.source)?;
    Ok(())
}
