//! objl - Wavefront OBJ/MTL 模型加载库
//!
//! 逐行读取 OBJ 几何文件和它引用的 MTL 材质库，把多边形面耳切三角化，
//! 输出可以直接上传到 GPU 的扁平顶点/索引缓冲区以及按对象划分的网格。
//!
//! # 模块结构
//!
//! - `core`: 配置、日志、错误处理
//! - `math`: 向量运算和三角形几何判定
//! - `geometry`: 顶点、材质、网格以及 OBJ/MTL 加载器
//!
//! # 使用示例
//!
//! ```no_run
//! use objl::core::Config;
//! use objl::geometry::loaders::{MeshLoader, ObjLoader};
//! use std::path::Path;
//!
//! let loader = ObjLoader::new(&Config::default());
//! let scene = loader.load_from_file(Path::new("assets/models/cube.obj"))?;
//!
//! for mesh in &scene.meshes {
//!     println!(
//!         "{}: {} 个三角形，材质 {:?}",
//!         mesh.name,
//!         mesh.triangle_count(),
//!         mesh.material.as_ref().map(|m| m.name.as_str())
//!     );
//! }
//!
//! // 扁平缓冲区可以直接转换为字节
//! let bytes: &[u8] = bytemuck::cast_slice(&scene.vertices);
//! # let _ = bytes;
//! # Ok::<(), objl::core::ObjlError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod math;
