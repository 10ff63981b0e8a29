//! 几何测试模块
//!
//! 提供耳切三角化使用的几何谓词：
//! - 同侧测试（两个点是否位于线段的同一侧）
//! - 三角形法线
//! - 点是否位于三角形上或内部
//!
//! 所有函数都假设参与计算的点共面。

use super::{constants, cross, dot, magnitude, project, Vector3};

/// 测试 `p1` 与 `p2` 是否位于线段 `ab` 的同一侧
///
/// 位于直线上的点视为同侧。
pub fn same_side(p1: &Vector3, p2: &Vector3, a: &Vector3, b: &Vector3) -> bool {
    let edge = b - a;
    let cp1 = cross(&edge, &(p1 - a));
    let cp2 = cross(&edge, &(p2 - a));

    dot(&cp1, &cp2) >= 0.0
}

/// 计算三角形的叉乘法线（未归一化）
///
/// 返回 `(t2 - t1) × (t3 - t1)`。
#[inline]
pub fn triangle_normal(t1: &Vector3, t2: &Vector3, t3: &Vector3) -> Vector3 {
    cross(&(t2 - t1), &(t3 - t1))
}

/// 测试点是否位于三角形上或内部
///
/// # 算法
///
/// 1. 点必须位于三角形围成的无限棱柱内：对三条边分别做同侧测试
/// 2. 点到三角形平面的距离必须为零（在 `PLANE_EPSILON` 容差内）
///
/// 退化三角形（三点共线，法线为零）不包含任何点。
pub fn in_triangle(point: &Vector3, tri1: &Vector3, tri2: &Vector3, tri3: &Vector3) -> bool {
    let within_prism = same_side(point, tri1, tri2, tri3)
        && same_side(point, tri2, tri1, tri3)
        && same_side(point, tri3, tri1, tri2);

    if !within_prism {
        return false;
    }

    let n = triangle_normal(tri1, tri2, tri3);
    if magnitude(&n) == 0.0 {
        return false;
    }

    // 点相对三角形平面的偏移在法线上的投影即为到平面的距离
    let offset = project(&(point - tri1), &n);
    magnitude(&offset) <= constants::PLANE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn test_same_side() {
        let a = v(0.0, 0.0, 0.0);
        let b = v(1.0, 0.0, 0.0);

        assert!(same_side(&v(0.5, 1.0, 0.0), &v(3.0, 2.0, 0.0), &a, &b));
        assert!(!same_side(&v(0.5, 1.0, 0.0), &v(0.5, -1.0, 0.0), &a, &b));
        // 直线上的点与任何点同侧
        assert!(same_side(&v(5.0, 0.0, 0.0), &v(0.5, -1.0, 0.0), &a, &b));
    }

    #[test]
    fn test_triangle_normal() {
        let n = triangle_normal(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(0.0, 1.0, 0.0));
        assert_eq!(n, v(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_in_triangle() {
        let t1 = v(0.0, 0.0, 2.0);
        let t2 = v(4.0, 0.0, 2.0);
        let t3 = v(0.0, 4.0, 2.0);

        assert!(in_triangle(&v(1.0, 1.0, 2.0), &t1, &t2, &t3));
        // 边上的点视为包含
        assert!(in_triangle(&v(2.0, 2.0, 2.0), &t1, &t2, &t3));
        assert!(in_triangle(&t1, &t1, &t2, &t3));
        assert!(!in_triangle(&v(3.0, 3.0, 2.0), &t1, &t2, &t3));
        // 棱柱内但不在平面上
        assert!(!in_triangle(&v(1.0, 1.0, 3.0), &t1, &t2, &t3));
    }

    #[test]
    fn test_degenerate_triangle_contains_nothing() {
        let t1 = v(0.0, 0.0, 0.0);
        let t2 = v(1.0, 0.0, 0.0);
        let t3 = v(2.0, 0.0, 0.0);

        assert!(!in_triangle(&v(0.5, 0.0, 0.0), &t1, &t2, &t3));
    }
}
