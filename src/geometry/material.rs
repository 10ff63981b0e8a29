/// 材质数据结构模块
///
/// 定义从 `.mtl` 文件解析出的材质记录。纹理贴图只保存路径，
/// 图片解码由渲染端负责。

/// 材质记录
///
/// 所有颜色默认为零，标量默认为零，`illum` 默认为 0，贴图默认为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// 材质名称（`newmtl`）
    pub name: String,

    /// 环境光颜色（`Ka`）
    pub ambient: [f32; 3],

    /// 漫反射颜色（`Kd`）
    pub diffuse: [f32; 3],

    /// 镜面反射颜色（`Ks`）
    pub specular: [f32; 3],

    /// 镜面指数（`Ns`）
    pub specular_exponent: f32,

    /// 光学密度 / 折射率（`Ni`）
    pub optical_density: f32,

    /// 不透明度（`d`）
    pub dissolve: f32,

    /// 光照模型编号（`illum`）
    pub illumination: i32,

    /// 环境光贴图（`map_Ka`）
    pub map_ambient: Option<String>,

    /// 漫反射贴图（`map_Kd`）
    pub map_diffuse: Option<String>,

    /// 镜面反射贴图（`map_Ks`）
    pub map_specular: Option<String>,

    /// 高光指数贴图（`map_Ns`）
    pub map_specular_exponent: Option<String>,

    /// Alpha 贴图（`map_d`）
    pub map_dissolve: Option<String>,

    /// 凹凸贴图（`map_Bump` / `map_bump` / `bump`）
    pub map_bump: Option<String>,
}

impl Material {
    /// 创建一个指定名称、其余属性为默认值的材质
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 是否引用了任何纹理贴图
    pub fn has_texture_maps(&self) -> bool {
        [
            &self.map_ambient,
            &self.map_diffuse,
            &self.map_specular,
            &self.map_specular_exponent,
            &self.map_dissolve,
            &self.map_bump,
        ]
        .iter()
        .any(|map| map.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let material = Material::with_name("foo");

        assert_eq!(material.name, "foo");
        assert_eq!(material.ambient, [0.0; 3]);
        assert_eq!(material.diffuse, [0.0; 3]);
        assert_eq!(material.specular, [0.0; 3]);
        assert_eq!(material.illumination, 0);
        assert!(!material.has_texture_maps());
    }

    #[test]
    fn test_has_texture_maps() {
        let material = Material {
            map_bump: Some("bump.png".to_string()),
            ..Material::with_name("bumpy")
        };
        assert!(material.has_texture_maps());
    }
}
