//! 核心功能模块
//!
//! 提供加载器的基础设施：日志系统、配置管理和错误处理。
//! 这些模块与具体的文件格式无关。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 `tracing` 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件加载加载器设置
//! - `error`：错误处理，定义统一的错误类型

pub mod config;
pub mod error;
pub mod log;

// 重新导出常用类型，方便使用
pub use config::{Config, LoaderConfig, LogLevel, TriangulationConfig};
pub use error::{MeshLoadError, ObjlError, Result};
