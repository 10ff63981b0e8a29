/// 几何体加载模块
///
/// 将 Wavefront OBJ 几何文件及其 MTL 材质库导入为可渲染的内存数据。
///
/// # 模块结构
///
/// - `vertex`: 渲染顶点定义
/// - `mesh`: 网格对象与加载结果
/// - `material`: 材质记录
/// - `loaders`: OBJ / MTL 解析器、面解析与耳切三角化
///
/// # 架构设计
///
/// ```text
/// .obj 文件 ──► ObjLoader ──► 面解析 ──► 耳切三角化
///      │                                   │
///      └─ mtllib ──► MtlLoader             ▼
///                       │              ObjScene (CPU侧数据)
///                       └──── 材质按名称绑定 ──┘
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use objl::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let scene = ObjLoader::default().load_from_file(Path::new("model.obj"))?;
///
/// println!("对象数: {}", scene.meshes.len());
/// println!("三角形数: {}", scene.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod loaders;
pub mod material;
pub mod mesh;
pub mod vertex;

// 重新导出常用类型
pub use material::Material;
pub use mesh::{MeshObject, ObjScene};
pub use vertex::Vertex;
