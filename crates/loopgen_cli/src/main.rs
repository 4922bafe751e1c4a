use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loopgen_catalog::Catalog;
use loopgen_driver::{generate_files, GenerateError, GenerateOptions, Mission, Templates};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "loopgen")]
#[command(about = "Loop function 生成器 - 把目标函数表达式编译成 C++", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 从任务文件生成 loop function 的头文件和源文件
    Generate {
        /// 任务文件 (JSON)
        mission: PathBuf,

        /// 目录文件 (JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// 输出基础路径，写出 <output>.h 和 <output>.cpp
        #[arg(short, long, default_value = "LoopFunc")]
        output: PathBuf,

        /// 文件头注释里的来源标签 (默认用任务文件名)
        #[arg(long)]
        source: Option<String>,

        /// 宽松变量模式：未知变量退化成占位而不是报错
        #[arg(long)]
        lenient_vars: bool,
    },

    /// 只检查任务文件，不写出任何文件
    Check {
        /// 任务文件 (JSON)
        mission: PathBuf,

        /// 目录文件 (JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// 宽松变量模式
        #[arg(long)]
        lenient_vars: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            mission,
            catalog,
            output,
            source,
            lenient_vars,
        } => cmd_generate(&mission, &catalog, &output, source, lenient_vars)?,
        Commands::Check {
            mission,
            catalog,
            lenient_vars,
        } => cmd_check(&mission, &catalog, lenient_vars)?,
    }

    Ok(())
}

/// 生成命令
fn cmd_generate(
    mission_path: &Path,
    catalog_path: &Path,
    output: &Path,
    source: Option<String>,
    lenient_vars: bool,
) -> Result<()> {
    println!("📦 生成 {} ...", mission_path.display());

    let (mission, catalog) = load_inputs(mission_path, catalog_path)?;
    let options = GenerateOptions {
        source: source.or_else(|| {
            mission_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        }),
        lenient_variables: lenient_vars,
    };

    if let Err(error) = generate_files(&mission, &catalog, &Templates::default(), &options, output)
    {
        report(&error, &mission);
        std::process::exit(1);
    }

    println!(
        "✅ 成功生成 {} 和 {}",
        output.with_extension("h").display(),
        output.with_extension("cpp").display()
    );
    Ok(())
}

/// 检查命令
fn cmd_check(mission_path: &Path, catalog_path: &Path, lenient_vars: bool) -> Result<()> {
    println!("🔍 检查 {} ...", mission_path.display());

    let (mission, catalog) = load_inputs(mission_path, catalog_path)?;
    let options = GenerateOptions {
        lenient_variables: lenient_vars,
        ..Default::default()
    };

    match loopgen_driver::generate(&mission, &catalog, &Templates::default(), &options) {
        Ok(_) => {
            println!("✅ 无错误");
            Ok(())
        }
        Err(error) => {
            report(&error, &mission);
            std::process::exit(1);
        }
    }
}

/// 读入并解析任务文件和目录文件
fn load_inputs(mission_path: &Path, catalog_path: &Path) -> Result<(Mission, Catalog)> {
    let mission_text = fs::read_to_string(mission_path)
        .with_context(|| format!("无法读取任务文件 {}", mission_path.display()))?;
    let mission = Mission::from_json(&mission_text)
        .with_context(|| format!("任务文件 {} 无效", mission_path.display()))?;

    let catalog_text = fs::read_to_string(catalog_path)
        .with_context(|| format!("无法读取目录文件 {}", catalog_path.display()))?;
    let catalog = Catalog::from_json(&catalog_text)
        .with_context(|| format!("目录文件 {} 无效", catalog_path.display()))?;

    Ok((mission, catalog))
}

/// 通过诊断系统输出错误，能定位到 stage 时在表达式文本上标注
fn report(error: &GenerateError, mission: &Mission) {
    eprintln!("❌ 生成失败:");
    let expression = error
        .stage()
        .and_then(|name| mission.objective.stage_code(name));
    error.emit(expression);
}
