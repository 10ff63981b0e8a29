/// 属性池与面解析
///
/// OBJ 的 `v`/`vt`/`vn` 指令分别追加到三个独立的属性池中，
/// `f` 指令通过 1 基的正索引或负的相对索引引用它们。
/// 面只能看到在它之前定义的属性。

use super::tokenizer::{fields, split};
use crate::core::error::MeshLoadError;
use crate::geometry::vertex::Vertex;
use crate::math::{cross, to_array, vec3};

/// 只追加的属性池
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributePools {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
}

impl AttributePools {
    /// 解析 `v` 参数并追加位置
    ///
    /// 少于3个字段或非数值时返回 `MalformedAttribute`，多余字段被忽略。
    pub fn push_position(&mut self, args: &str) -> Result<(), MeshLoadError> {
        let position = parse_floats::<3>("v", args)?;
        self.positions.push(position);
        Ok(())
    }

    /// 解析 `vt` 参数并追加纹理坐标（只取前两个字段）
    pub fn push_texcoord(&mut self, args: &str) -> Result<(), MeshLoadError> {
        let texcoord = parse_floats::<2>("vt", args)?;
        self.texcoords.push(texcoord);
        Ok(())
    }

    /// 解析 `vn` 参数并追加法线
    pub fn push_normal(&mut self, args: &str) -> Result<(), MeshLoadError> {
        let normal = parse_floats::<3>("vn", args)?;
        self.normals.push(normal);
        Ok(())
    }
}

/// 解析前 `N` 个数值字段
pub(crate) fn parse_floats<const N: usize>(
    directive: &str,
    args: &str,
) -> Result<[f32; N], MeshLoadError> {
    let parts = fields(args);
    if parts.len() < N {
        return Err(MeshLoadError::malformed(
            directive,
            format!("expected {} numeric fields, found {}", N, parts.len()),
        ));
    }

    let mut out = [0.0f32; N];
    for (slot, text) in out.iter_mut().zip(&parts) {
        *slot = text.parse::<f32>().map_err(|_| {
            MeshLoadError::malformed(directive, format!("'{}' is not a number", text))
        })?;
    }
    Ok(out)
}

/// 将原始索引记号解析为池中的下标
///
/// - `r > 0`：1 基绝对索引，结果为 `r - 1`
/// - `r < 0`：相对索引，`-1` 表示最后一个元素，结果为 `len + r`
/// - `r == 0`：无效
///
/// 结果不在 `[0, len)` 内时返回 `IndexOutOfRange`。
pub fn resolve_index(len: usize, raw: &str) -> Result<usize, MeshLoadError> {
    let r: i64 = raw
        .parse()
        .map_err(|_| MeshLoadError::malformed("f", format!("'{}' is not an index", raw)))?;

    let out_of_range = MeshLoadError::IndexOutOfRange { line: 0, index: r, len };

    let resolved = match r {
        0 => return Err(out_of_range),
        r if r > 0 => (r - 1) as u64,
        r => match (len as u64).checked_sub(r.unsigned_abs()) {
            Some(slot) => slot,
            None => return Err(out_of_range),
        },
    };

    if resolved >= len as u64 {
        return Err(out_of_range);
    }
    Ok(resolved as usize)
}

/// 一个角点的属性引用（已解析为池下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// 解析单个角点记号：`p`、`p/t`、`p//n`、`p/t/n`
pub fn parse_corner(token: &str, pools: &AttributePools) -> Result<Corner, MeshLoadError> {
    let parts = split(token, '/');
    let (p, t, n) = match parts.as_slice() {
        [p] => (*p, "", ""),
        [p, t] => (*p, *t, ""),
        [p, t, n] => (*p, *t, *n),
        _ => {
            return Err(MeshLoadError::malformed(
                "f",
                format!("'{}' is not a valid face corner", token),
            ))
        }
    };

    if p.is_empty() {
        return Err(MeshLoadError::malformed(
            "f",
            format!("corner '{}' has no position index", token),
        ));
    }

    let optional = |text: &str, len: usize| -> Result<Option<usize>, MeshLoadError> {
        if text.is_empty() {
            Ok(None)
        } else {
            resolve_index(len, text).map(Some)
        }
    };

    Ok(Corner {
        position: resolve_index(pools.positions.len(), p)?,
        texcoord: optional(t, pools.texcoords.len())?,
        normal: optional(n, pools.normals.len())?,
    })
}

/// 由面的角点记号生成完整的渲染顶点
///
/// 没有 `vt` 的角点纹理坐标为 (0, 0)。只要有任一角点缺少法线，
/// 就用前三个角点计算一个平面法线 `(p0 - p1) × (p2 - p1)`（不归一化），
/// 覆盖整个面所有角点的法线。
///
/// 少于3个角点的面返回 `Degenerate`。
pub fn resolve_face(corners: &[&str], pools: &AttributePools) -> Result<Vec<Vertex>, MeshLoadError> {
    if corners.len() < 3 {
        return Err(MeshLoadError::Degenerate { line: 0, corners: corners.len() });
    }

    let mut vertices = Vec::with_capacity(corners.len());
    let mut missing_normal = false;

    for token in corners {
        let corner = parse_corner(token, pools)?;

        let position = pools.positions[corner.position];
        let texcoord = corner.texcoord.map_or([0.0, 0.0], |i| pools.texcoords[i]);
        let normal = match corner.normal {
            Some(i) => pools.normals[i],
            None => {
                missing_normal = true;
                [0.0, 0.0, 0.0]
            }
        };

        vertices.push(Vertex::new(position, normal, texcoord));
    }

    if missing_normal {
        let normal = flat_normal(&vertices);
        for vertex in &mut vertices {
            vertex.normal = normal;
        }
    }

    Ok(vertices)
}

/// 由前三个顶点计算的平面法线（未归一化）
fn flat_normal(vertices: &[Vertex]) -> [f32; 3] {
    let p0 = vec3(vertices[0].position);
    let p1 = vec3(vertices[1].position);
    let p2 = vec3(vertices[2].position);

    to_array(&cross(&(p0 - p1), &(p2 - p1)))
}
