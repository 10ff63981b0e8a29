//! 数学库模块
//!
//! 提供三角化所需的向量运算。基于 `nalgebra`，对外使用简洁的类型名称。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2 / Vector3
//! - **常量**：RAD_TO_DEG、EPSILON 等
//! - **向量函数**：叉乘、点乘、长度、夹角、投影
//! - **几何测试**：同侧测试、三角形包含测试（见 geometry 子模块）

pub mod geometry;

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 弧度转角度的系数
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;

    /// 点到三角形平面距离的容差
    pub const PLANE_EPSILON: f32 = 1e-5;
}

/// 将顶点数组中的位置转换为向量
#[inline]
pub fn vec3(p: [f32; 3]) -> Vector3 {
    Vector3::new(p[0], p[1], p[2])
}

/// 将向量转换回数组形式（用于写回顶点）
#[inline]
pub fn to_array(v: &Vector3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

/// 叉乘
#[inline]
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// 点乘
#[inline]
pub fn dot(a: &Vector3, b: &Vector3) -> f32 {
    a.dot(b)
}

/// 向量长度
#[inline]
pub fn magnitude(v: &Vector3) -> f32 {
    v.norm()
}

/// 两个向量之间的夹角（弧度，范围 [0, π]）
///
/// 任一向量长度为零时结果为 NaN。
pub fn angle_between(a: &Vector3, b: &Vector3) -> f32 {
    let cos = dot(a, b) / (magnitude(a) * magnitude(b));
    cos.clamp(-1.0, 1.0).acos()
}

/// 将 `a` 投影到 `b` 方向上
///
/// `b` 长度为零时结果各分量为 NaN。
pub fn project(a: &Vector3, b: &Vector3) -> Vector3 {
    let bn = b / magnitude(b);
    bn * dot(a, &bn)
}

/// 弧度转角度
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * constants::RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross() {
        // X 叉乘 Y = Z
        let z = cross(&Vector3::x(), &Vector3::y());
        assert_eq!(z, Vector3::z());
    }

    #[test]
    fn test_dot_and_magnitude() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);

        // 1*4 + 2*5 + 3*6 = 32
        assert!((dot(&a, &b) - 32.0).abs() < constants::EPSILON);
        assert!((magnitude(&Vector3::new(3.0, 4.0, 0.0)) - 5.0).abs() < constants::EPSILON);
    }

    #[test]
    fn test_angle_between() {
        let right = angle_between(&Vector3::x(), &Vector3::y());
        assert!((rad_to_deg(right) - 90.0).abs() < 1e-4);

        let straight = angle_between(&Vector3::x(), &-Vector3::x());
        assert!((rad_to_deg(straight) - 180.0).abs() < 1e-4);

        assert!(angle_between(&Vector3::zeros(), &Vector3::x()).is_nan());
    }

    #[test]
    fn test_project() {
        let p = project(&Vector3::new(2.0, 3.0, 4.0), &Vector3::new(0.0, 0.0, 10.0));
        assert_eq!(p, Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_array_roundtrip() {
        let p = [1.5, -2.0, 0.25];
        assert_eq!(to_array(&vec3(p)), p);
    }
}
