/// 耳切三角化
///
/// 将一个面的 N 个已解析顶点分解为 N-2 个三角形，输出为指向输入列表的索引。
///
/// # 算法
///
/// - 三角形：直接输出 `(0, 1, 2)`
/// - 环中剩 4 个角点：不做任何测试，取环首角点为耳朵，剩余三个角点组成第二个三角形
/// - 环中剩 3 个角点：输出最后一个三角形
/// - 其余情况：从环首开始扫描候选角点 `c`（前驱 `p`，后继 `n`），
///   若原始多边形中没有其他顶点位于三角形 `(p, c, n)` 上或内部，则切下该耳朵，
///   从环中移除 `c` 并重新从环首扫描
///
/// 一次完整扫描没有找到耳朵时停止，保留已经找到的三角形。
///
/// 顶点按 `position` 的值识别：输出的索引是原始列表中第一个位置相等的顶点，
/// 因此位置重复的角点会被映射到同一个索引。
///
/// 每个耳朵的包含测试遍历全部原始顶点，单个面的复杂度为 O(V³)。

use crate::core::config::TriangulationConfig;
use crate::geometry::vertex::Vertex;
use crate::math::geometry::in_triangle;
use crate::math::{angle_between, rad_to_deg, vec3};

/// 判定内角为 0° 或 180° 的容差（角度）
const FLAT_ANGLE_TOLERANCE: f32 = 1e-3;

/// 三角化结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    /// 三角形索引，每3个一组，指向输入顶点列表
    pub indices: Vec<u32>,

    /// 多边形是否被完整分解
    pub complete: bool,
}

impl Triangulation {
    /// 三角形数量
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// 对多边形顶点列表进行耳切三角化
pub fn triangulate(vertices: &[Vertex], config: &TriangulationConfig) -> Triangulation {
    let count = vertices.len();
    if count < 3 {
        return Triangulation::default();
    }
    if count == 3 {
        return Triangulation { indices: vec![0, 1, 2], complete: true };
    }

    let mut indices = Vec::with_capacity(3 * (count - 2));
    let mut ring: Vec<usize> = (0..count).collect();

    let emit = |indices: &mut Vec<u32>, a: usize, b: usize, c: usize| {
        indices.extend([a, b, c].map(|slot| first_index_of(vertices, slot)));
    };

    loop {
        match ring.len() {
            3 => {
                emit(&mut indices, ring[0], ring[1], ring[2]);
                return Triangulation { indices, complete: true };
            }
            4 => {
                // 四边形视为凸多边形
                emit(&mut indices, ring[3], ring[0], ring[1]);
                emit(&mut indices, ring[1], ring[2], ring[3]);
                return Triangulation { indices, complete: true };
            }
            _ => {}
        }

        match find_ear(vertices, &ring, config) {
            Some(i) => {
                let len = ring.len();
                let prev = ring[(i + len - 1) % len];
                let next = ring[(i + 1) % len];
                emit(&mut indices, prev, ring[i], next);
                ring.remove(i);
            }
            None => {
                tracing::trace!(remaining = ring.len(), "no ear found in full scan");
                return Triangulation { indices, complete: false };
            }
        }
    }
}

/// 在环中查找第一个可以切下的耳朵，返回其在环中的位置
fn find_ear(vertices: &[Vertex], ring: &[usize], config: &TriangulationConfig) -> Option<usize> {
    let len = ring.len();

    for i in 0..len {
        let p = vertices[ring[(i + len - 1) % len]].position;
        let c = vertices[ring[i]].position;
        let n = vertices[ring[(i + 1) % len]].position;

        let (vp, vc, vn) = (vec3(p), vec3(c), vec3(n));

        // 默认不因角度拒绝任何候选
        if config.reject_flat_ears {
            let angle = rad_to_deg(angle_between(&(vp - vc), &(vn - vc)));
            let interior = angle > FLAT_ANGLE_TOLERANCE && angle < 180.0 - FLAT_ANGLE_TOLERANCE;
            if !interior {
                tracing::trace!(corner = ring[i], angle, "ear rejected: flat corner");
                continue;
            }
        }

        let blocked = vertices.iter().any(|v| {
            v.position != p
                && v.position != c
                && v.position != n
                && in_triangle(&vec3(v.position), &vp, &vc, &vn)
        });
        if blocked {
            tracing::trace!(corner = ring[i], "ear rejected: contains another vertex");
            continue;
        }

        return Some(i);
    }

    None
}

/// 原始列表中第一个与 `vertices[slot]` 位置相等的顶点索引
///
/// 位置包含 NaN 时没有相等的顶点，回退为自身索引。
fn first_index_of(vertices: &[Vertex], slot: usize) -> u32 {
    let target = vertices[slot].position;
    vertices
        .iter()
        .position(|v| v.position == target)
        .unwrap_or(slot) as u32
}
