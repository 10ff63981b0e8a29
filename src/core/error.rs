//! 错误处理模块
//!
//! 定义了加载器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息（文件路径、行号、索引）
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! # 错误分类
//!
//! | 类别 | 处理策略 |
//! |------|----------|
//! | 必需数值字段错误（`v`/`vn`/面索引/材质标量） | 致命，终止整个加载 |
//! | 可选字段错误（颜色三元组、`vt`） | 跳过该行，记录警告 |
//! | 三角化退化 | 仅影响当前面，记录警告 |

use std::fmt;
use std::path::PathBuf;

/// 加载器统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, ObjlError>;

/// 加载器的顶层错误类型
#[derive(Debug)]
pub enum ObjlError {
    /// 配置错误
    Config(ConfigError),

    /// 网格/材质加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格/材质加载相关的错误
#[derive(Debug, Clone, PartialEq)]
pub enum MeshLoadError {
    /// 文件不存在或无法打开
    FileNotFound(PathBuf),

    /// 文件扩展名不符合要求（`.obj` / `.mtl`），不会尝试打开文件
    WrongExtension(PathBuf),

    /// 必需的数值字段缺失或无法解析
    MalformedAttribute {
        line: usize,
        directive: String,
        reason: String,
    },

    /// 面索引解析后超出属性池范围（包括原始索引为 0）
    IndexOutOfRange { line: usize, index: i64, len: usize },

    /// 多边形无法完整三角化
    Degenerate { line: usize, corners: usize },

    /// 顶点总数超出 `u32` 索引的表示范围
    TooManyVertices { line: usize, count: usize },

    /// 加载完成后没有任何对象、顶点和索引（或没有任何材质）
    EmptyResult(PathBuf),
}

impl MeshLoadError {
    /// 为不带行号上下文的错误补充行号
    ///
    /// 底层解析函数（如 `resolve_index`）不知道当前行号，由调用方补充。
    pub fn at_line(self, line: usize) -> Self {
        match self {
            MeshLoadError::MalformedAttribute { directive, reason, .. } => {
                MeshLoadError::MalformedAttribute { line, directive, reason }
            }
            MeshLoadError::IndexOutOfRange { index, len, .. } => {
                MeshLoadError::IndexOutOfRange { line, index, len }
            }
            MeshLoadError::Degenerate { corners, .. } => MeshLoadError::Degenerate { line, corners },
            other => other,
        }
    }

    /// 构造 `MalformedAttribute`，行号稍后通过 [`MeshLoadError::at_line`] 补充
    pub fn malformed(directive: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshLoadError::MalformedAttribute {
            line: 0,
            directive: directive.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ObjlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjlError::Config(e) => write!(f, "Configuration error: {}", e),
            ObjlError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            ObjlError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            MeshLoadError::WrongExtension(path) => {
                write!(f, "Unexpected file extension: {}", path.display())
            }
            MeshLoadError::MalformedAttribute { line, directive, reason } => {
                write!(f, "Malformed '{}' on line {}: {}", directive, line, reason)
            }
            MeshLoadError::IndexOutOfRange { line, index, len } => write!(
                f,
                "Index {} out of range (pool size {}) on line {}",
                index, len, line
            ),
            MeshLoadError::Degenerate { line, corners } => write!(
                f,
                "Degenerate {}-corner polygon on line {}",
                corners, line
            ),
            MeshLoadError::TooManyVertices { line, count } => write!(
                f,
                "{} vertices on line {} exceed the u32 index range",
                count, line
            ),
            MeshLoadError::EmptyResult(path) => {
                write!(f, "No data loaded from {}", path.display())
            }
        }
    }
}

impl std::error::Error for ObjlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjlError::Io(e) => Some(e),
            ObjlError::Config(e) => Some(e),
            ObjlError::MeshLoading(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ObjlError {
    fn from(err: std::io::Error) -> Self {
        ObjlError::Io(err)
    }
}

impl From<ConfigError> for ObjlError {
    fn from(err: ConfigError) -> Self {
        ObjlError::Config(err)
    }
}

impl From<MeshLoadError> for ObjlError {
    fn from(err: MeshLoadError) -> Self {
        ObjlError::MeshLoading(err)
    }
}

impl ObjlError {
    /// 如果是网格加载错误，返回其内部错误
    pub fn as_mesh_error(&self) -> Option<&MeshLoadError> {
        match self {
            ObjlError::MeshLoading(e) => Some(e),
            _ => None,
        }
    }
}
