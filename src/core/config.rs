//! 配置管理模块
//!
//! 提供加载器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (objl.toml)
//!
//! ```toml
//! [loader]
//! progress_every = 1000   # 每隔多少行输出一次进度，0 表示关闭
//! load_materials = true   # 是否解析 mtllib 引用的材质库
//!
//! [triangulation]
//! reject_flat_ears = false
//!
//! [logging]
//! level = "info"          # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 加载器配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 加载流程配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 三角化配置
    #[serde(default)]
    pub triangulation: TriangulationConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 加载流程配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 每处理多少行输出一次进度日志（0 = 关闭）
    #[serde(default = "default_progress_every")]
    pub progress_every: u32,

    /// 是否加载 `mtllib` 引用的材质库
    #[serde(default = "default_load_materials")]
    pub load_materials: bool,
}

/// 耳切三角化配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangulationConfig {
    /// 拒绝内角为 0° 或 180°（共线）的候选耳朵
    ///
    /// 默认关闭：此时角度检查不会拒绝任何候选，耳朵的选取完全由包含测试决定。
    #[serde(default)]
    pub reject_flat_ears: bool,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_progress_every() -> u32 { 1000 }
fn default_load_materials() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "objl.log".to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            progress_every: default_progress_every(),
            load_materials: default_load_materials(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl LogLevel {
    /// 从字符串解析日志级别（大小写不敏感）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use objl::core::Config;
    ///
    /// let config = Config::from_file("objl.toml")?;
    /// # Ok::<(), objl::core::ObjlError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--strict-ears`: 启用共线耳朵拒绝
    /// - `--no-materials`: 不加载材质库
    /// - `--log-level <level>`: 设置日志级别
    /// - `--progress <n>`: 设置进度输出间隔
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--strict-ears") {
            self.triangulation.reject_flat_ears = true;
        }

        if args.iter().any(|a| a == "--no-materials") {
            self.loader.load_materials = false;
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| LogLevel::parse(s)) {
                self.logging.level = level;
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--progress") {
            if let Some(every) = args.get(idx + 1).and_then(|s| s.parse().ok()) {
                self.loader.progress_every = every;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file_output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.loader.progress_every, 1000);
        assert!(config.loader.load_materials);
        assert!(!config.triangulation.reject_flat_ears);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str("[triangulation]\nreject_flat_ears = true\n").unwrap();
        assert!(config.triangulation.reject_flat_ears);
        assert_eq!(config.loader, LoaderConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("[loader]\nprogress_every = \"many\"").is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["objl", "--strict-ears", "--no-materials", "--log-level", "DEBUG", "--progress", "0"]);

        assert!(config.triangulation.reject_flat_ears);
        assert!(!config.loader.load_materials);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.loader.progress_every, 0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.file_output = true;
        config.logging.log_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objl.toml");

        let mut config = Config::default();
        config.loader.progress_every = 50;
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}
