//! objl - OBJ 模型检查工具
//!
//! 加载一个 OBJ 文件（以及它引用的材质库），输出对象、缓冲区和材质绑定的摘要。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用默认配置（若存在则读取 objl.toml）
//! objl assets/models/cube.obj
//!
//! # 指定配置文件并覆盖部分设置
//! objl --config my.toml --strict-ears --log-level debug assets/models/cube.obj
//! ```
//!
//! # 命令行参数
//!
//! - `--config <file>`: 配置文件路径（默认 objl.toml）
//! - `--strict-ears`: 拒绝内角为 0° 或 180° 的耳朵
//! - `--no-materials`: 不加载 `mtllib` 引用的材质库
//! - `--log-level <level>`: trace / debug / info / warn / error
//! - `--progress <n>`: 每 n 行输出一次进度（0 表示关闭）

use anyhow::{bail, Context};
use objl::core::{log, Config};
use objl::geometry::loaders::{MeshLoader, ObjLoader};
use objl::geometry::ObjScene;
use std::path::PathBuf;
use tracing::{error, info};

/// 默认配置文件
const DEFAULT_CONFIG: &str = "objl.toml";

/// 需要一个值的参数
const VALUE_FLAGS: &[&str] = &["--config", "--log-level", "--progress"];

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. 加载配置（在初始化日志之前）
    let mut config = match flag_value(&args, "--config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => Config::from_file_or_default(DEFAULT_CONFIG),
    };

    // 2. 应用命令行参数
    config.apply_args(&args);
    config.validate().context("Invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "objl starting");

    let Some(model) = model_path(&args) else {
        bail!("usage: objl [--config <file>] [--strict-ears] [--no-materials] [--log-level <level>] [--progress <n>] <model.obj>");
    };

    // 4. 加载模型
    let scene = ObjLoader::new(&config)
        .load_from_file(&model)
        .with_context(|| format!("Failed to load {}", model.display()))?;

    print_summary(&model, &scene);
    Ok(())
}

/// 参数后面紧跟的值
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}

/// 第一个既不是参数也不是参数值的位置参数
fn model_path(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            return Some(PathBuf::from(arg));
        }
    }
    None
}

fn print_summary(model: &std::path::Path, scene: &ObjScene) {
    println!("{}", model.display());
    println!(
        "  vertices: {}  indices: {}  triangles: {}  materials: {}",
        scene.vertex_count(),
        scene.index_count(),
        scene.triangle_count(),
        scene.materials.len()
    );

    for mesh in &scene.meshes {
        let binding = match (&mesh.material_name, &mesh.material) {
            (Some(name), Some(_)) => name.clone(),
            (Some(name), None) => format!("{} (missing)", name),
            (None, _) => "-".to_string(),
        };
        println!(
            "  [{}] vertices: {}  triangles: {}  material: {}",
            mesh.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            binding
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_model_path_skips_flag_values() {
        let list = args(&["--config", "a.toml", "--strict-ears", "--progress", "10", "cube.obj"]);
        assert_eq!(model_path(&list), Some(PathBuf::from("cube.obj")));
    }

    #[test]
    fn test_model_path_missing() {
        assert_eq!(model_path(&args(&["--log-level", "debug"])), None);
    }

    #[test]
    fn test_flag_value() {
        let list = args(&["--config", "a.toml", "m.obj"]);
        assert_eq!(flag_value(&list, "--config"), Some("a.toml"));
        assert_eq!(flag_value(&list, "--progress"), None);
    }
}
