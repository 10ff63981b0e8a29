/// 几何体顶点定义模块
///
/// 定义加载器输出的渲染顶点：位置、法线、UV坐标。

use bytemuck::{Pod, Zeroable};

/// 渲染顶点
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐，
/// 可以直接通过 `bytemuck::cast_slice` 上传。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - **总计**: 32 bytes
///
/// 三角化按 `position` 的值比较顶点，而不是按身份比较。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 来自 `vn` 指令，或由面的前三个角点生成的未归一化平面法线。
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    ///
    /// 面未引用 `vt` 时为 (0, 0)。
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3*4 + 3*4 + 2*4 = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn test_vertex_default() {
        let vertex = Vertex::default();

        assert_eq!(vertex.position, [0.0, 0.0, 0.0]);
        assert_eq!(vertex.normal, [0.0, 0.0, 0.0]);
        assert_eq!(vertex.texcoord, [0.0, 0.0]);
    }

    #[test]
    fn test_vertex_cast_slice() {
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5])];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.5, 0.5]);
    }
}
