/// 网格数据结构模块
///
/// 定义加载结果的容器：按对象/材质分段的 `MeshObject`，
/// 以及包含全局扁平缓冲区的 `ObjScene`。

use super::material::Material;
use super::vertex::Vertex;

/// 网格对象
///
/// 对应 OBJ 文件中的一个 `o`/`g` 块，或块内一次材质切换后的分段。
/// 索引始终是相对于本对象顶点列表的局部索引（从 0 开始）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshObject {
    /// 对象名称（重名时带 `_2`、`_3` 等后缀）
    pub name: String,

    /// 局部顶点数组
    pub vertices: Vec<Vertex>,

    /// 局部三角形索引，每3个索引定义一个三角形
    pub indices: Vec<u32>,

    /// `usemtl` 记录的材质名称
    pub material_name: Option<String>,

    /// 按名称绑定的材质，没有匹配的材质时为 `None`
    pub material: Option<Material>,
}

impl MeshObject {
    /// 创建一个指定名称的空对象
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 对象至少有一个顶点和一个索引时才会被输出
    #[inline]
    pub fn has_geometry(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 所有索引都在局部顶点范围内
    pub fn validate(&self) -> Result<(), String> {
        validate_buffers(&self.vertices, &self.indices)
            .map_err(|e| format!("对象 '{}': {}", self.name, e))
    }
}

/// 一次加载的完整结果
///
/// 每次加载都会构建全新的结果，不会在多次加载之间累积。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjScene {
    /// 网格对象列表（按文件中的完成顺序）
    pub meshes: Vec<MeshObject>,

    /// 所有对象顶点的扁平化数组
    pub vertices: Vec<Vertex>,

    /// 扁平化索引，指向 `vertices`
    pub indices: Vec<u32>,

    /// 所有材质库中加载的材质
    pub materials: Vec<Material>,
}

impl ObjScene {
    /// 获取全局顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取全局索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取全局三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 没有任何对象、顶点和索引
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty() && self.vertices.is_empty() && self.indices.is_empty()
    }

    /// 按名称查找网格对象
    pub fn mesh(&self, name: &str) -> Option<&MeshObject> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// 按名称查找材质（第一个匹配）
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// 验证全局缓冲区以及每个对象的局部缓冲区
    pub fn validate(&self) -> Result<(), String> {
        validate_buffers(&self.vertices, &self.indices)?;
        for mesh in &self.meshes {
            mesh.validate()?;
        }
        Ok(())
    }
}

fn validate_buffers(vertices: &[Vertex], indices: &[u32]) -> Result<(), String> {
    if indices.len() % 3 != 0 {
        return Err(format!("索引数量必须是3的倍数，当前为: {}", indices.len()));
    }

    let vertex_count = vertices.len();
    if let Some(i) = indices.iter().position(|&index| index as usize >= vertex_count) {
        return Err(format!(
            "索引 {} 处的值 {} 超出顶点范围 (顶点数 {})",
            i, indices[i], vertex_count
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vertex> {
        vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ]
    }

    #[test]
    fn test_mesh_object_geometry() {
        let mut mesh = MeshObject::with_name("tri");
        assert!(!mesh.has_geometry());

        mesh.vertices = triangle();
        assert!(!mesh.has_geometry());

        mesh.indices = vec![0, 1, 2];
        assert!(mesh.has_geometry());
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let mesh = MeshObject {
            vertices: triangle(),
            indices: vec![0, 1, 3],
            ..MeshObject::with_name("bad")
        };
        let err = mesh.validate().unwrap_err();
        assert!(err.contains("bad"));
    }

    #[test]
    fn test_validate_index_count() {
        let scene = ObjScene {
            vertices: triangle(),
            indices: vec![0, 1],
            ..Default::default()
        };
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_scene_lookup() {
        let scene = ObjScene {
            meshes: vec![MeshObject::with_name("a"), MeshObject::with_name("b")],
            materials: vec![Material::with_name("m"), Material::with_name("m")],
            ..Default::default()
        };

        assert!(scene.mesh("b").is_some());
        assert!(scene.mesh("c").is_none());
        assert!(scene.material("m").is_some());
        assert!(!scene.is_empty());
        assert!(ObjScene::default().is_empty());
    }
}
