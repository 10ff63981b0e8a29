/// 模型加载器模块
///
/// 提供统一的加载接口和 OBJ/MTL 的具体实现。
///
/// # 子模块
///
/// - `tokenizer`: 行分词
/// - `face`: 属性池、索引解析、面顶点生成
/// - `triangulate`: 耳切三角化
/// - `obj_loader`: OBJ 逐行状态机，组装网格对象
/// - `mtl_loader`: MTL 材质库解析
///
/// # 使用示例
///
/// ```rust,no_run
/// use objl::core::Config;
/// use objl::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let scene = load_mesh(Path::new("model.obj"), &Config::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::config::Config;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::ObjScene;
use std::path::Path;

pub mod face;
pub mod mtl_loader;
pub mod obj_loader;
pub mod tokenizer;
pub mod triangulate;

// 重新导出加载器
pub use face::{resolve_index, AttributePools};
pub use mtl_loader::MtlLoader;
pub use obj_loader::ObjLoader;
pub use triangulate::{triangulate, Triangulation};

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 每次加载返回全新的 `ObjScene`，加载器本身只持有配置
/// - 返回 CPU 侧的数据，不涉及 GPU 资源
/// - 扩展名不匹配时不打开文件
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 扩展名不匹配（`WrongExtension`）
    /// - 文件不存在或无法打开（`FileNotFound`）
    /// - 必需字段格式错误或索引越界
    /// - 没有加载到任何数据（`EmptyResult`）
    fn load_from_file(&self, path: &Path) -> Result<ObjScene>;

    /// 从内存数据加载网格
    fn load_from_memory(&self, data: &[u8]) -> Result<ObjScene>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str]
    where
        Self: Sized;
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(path: &Path, config: &Config) -> Result<ObjScene> {
    if has_extension(path, obj_loader::OBJ_EXTENSION) {
        ObjLoader::new(config).load_from_file(path)
    } else {
        Err(MeshLoadError::WrongExtension(path.to_path_buf()).into())
    }
}

/// 路径是否以给定的扩展名（含点号）结尾
///
/// 只比较路径末尾的字符，大小写敏感。
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy().ends_with(extension)
}
