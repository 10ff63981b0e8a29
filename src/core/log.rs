//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 日志约定
//!
//! - `info`：加载摘要（对象数、顶点数、材质数）
//! - `warn`：被跳过的可选指令、退化的面、找不到的材质库
//! - `debug`：材质库路径解析、对象切换
//! - `trace`：三角化过程中每个耳朵的判定
//!
//! # 使用示例
//!
//! ```no_run
//! use objl::core::log;
//! use objl::core::config::LogLevel;
//!
//! log::init_logger(LogLevel::Info, false, None);
//! objl::loader_info!(objects = 3, "Model loaded");
//! ```

use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::config::LogLevel;

/// 初始化日志系统
///
/// 必须在程序开始时调用一次。`RUST_LOG` 环境变量存在时优先使用。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "objl.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_ansi(true);

    if file_output {
        let log_path = log_file_path.unwrap_or("objl.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("objl.log");

        // 创建滚动文件 appender（每天滚动）
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false) // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
    }
}

/// 没有 `RUST_LOG` 时使用的过滤器：只按配置的级别过滤
fn default_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.into()).into())
        .parse_lossy("")
}

/// 加载器日志 - Info 级别
#[macro_export]
macro_rules! loader_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "objl::loader", $($arg)*)
    };
}

/// 加载器日志 - Warn 级别
#[macro_export]
macro_rules! loader_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "objl::loader", $($arg)*)
    };
}

/// 加载器日志 - Debug 级别
#[macro_export]
macro_rules! loader_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "objl::loader", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
