/// MTL 材质库加载器
///
/// 按行解析 `.mtl` 文件，`newmtl` 开始一个新的材质记录。
///
/// # 错误策略
///
/// - `Ka`/`Kd`/`Ks` 必须恰好有3个数值字段，否则只跳过这一行
/// - `Ns`/`Ni`/`d`/`illum` 必须是数值，否则整个材质库加载失败
/// - 贴图指令原样保存参数文本
/// - 第一个 `newmtl` 之前的属性行被忽略
use super::has_extension;
use super::tokenizer::{fields, first_token, lossy_lines, tail};
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::material::Material;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// 材质库文件扩展名
pub const MTL_EXTENSION: &str = ".mtl";

/// 可识别的材质指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlDirective {
    NewMaterial,
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    OpticalDensity,
    Dissolve,
    Illumination,
    MapAmbient,
    MapDiffuse,
    MapSpecular,
    MapSpecularExponent,
    MapDissolve,
    MapBump,
    Unknown,
}

impl MtlDirective {
    fn parse(token: &str) -> Self {
        match token {
            "newmtl" => MtlDirective::NewMaterial,
            "Ka" => MtlDirective::Ambient,
            "Kd" => MtlDirective::Diffuse,
            "Ks" => MtlDirective::Specular,
            "Ns" => MtlDirective::SpecularExponent,
            "Ni" => MtlDirective::OpticalDensity,
            "d" => MtlDirective::Dissolve,
            "illum" => MtlDirective::Illumination,
            "map_Ka" => MtlDirective::MapAmbient,
            "map_Kd" => MtlDirective::MapDiffuse,
            "map_Ks" => MtlDirective::MapSpecular,
            "map_Ns" => MtlDirective::MapSpecularExponent,
            "map_d" => MtlDirective::MapDissolve,
            "map_Bump" | "map_bump" | "bump" => MtlDirective::MapBump,
            _ => MtlDirective::Unknown,
        }
    }
}

/// MTL 格式加载器
pub struct MtlLoader;

impl MtlLoader {
    /// 从文件加载材质库
    ///
    /// 扩展名不是 `.mtl` 时直接返回 `WrongExtension`，不会尝试打开文件。
    pub fn load_from_file(path: &Path) -> Result<Vec<Material>> {
        if !has_extension(path, MTL_EXTENSION) {
            return Err(MeshLoadError::WrongExtension(path.to_path_buf()).into());
        }

        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "无法打开材质库");
            MeshLoadError::FileNotFound(path.to_path_buf())
        })?;

        let materials = parse_materials(BufReader::new(file))?;
        if materials.is_empty() {
            return Err(MeshLoadError::EmptyResult(path.to_path_buf()).into());
        }

        crate::loader_debug!(
            path = %path.display(),
            count = materials.len(),
            "材质库加载完成"
        );
        Ok(materials)
    }

    /// 从任意 [`BufRead`] 加载材质库
    pub fn load_from_reader<R: BufRead>(reader: R) -> Result<Vec<Material>> {
        let materials = parse_materials(reader)?;
        if materials.is_empty() {
            return Err(MeshLoadError::EmptyResult(PathBuf::from("<reader>")).into());
        }
        Ok(materials)
    }
}

fn parse_materials<R: BufRead>(reader: R) -> Result<Vec<Material>> {
    let mut materials = Vec::new();
    let mut current: Option<Material> = None;

    for (line_no, line) in lossy_lines(reader).enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let directive = MtlDirective::parse(first_token(&line));

        if directive == MtlDirective::NewMaterial {
            if let Some(done) = current.take() {
                materials.push(done);
            }
            let name = tail(&line);
            let name = if name.is_empty() { "none" } else { name };
            current = Some(Material::with_name(name));
            continue;
        }

        let Some(material) = current.as_mut() else {
            if directive != MtlDirective::Unknown {
                tracing::warn!(line = line_no, "材质属性出现在 newmtl 之前，已忽略");
            }
            continue;
        };

        let args = tail(&line);
        match directive {
            MtlDirective::Ambient => set_color(&mut material.ambient, args, "Ka", line_no),
            MtlDirective::Diffuse => set_color(&mut material.diffuse, args, "Kd", line_no),
            MtlDirective::Specular => set_color(&mut material.specular, args, "Ks", line_no),
            MtlDirective::SpecularExponent => {
                material.specular_exponent = parse_scalar("Ns", args).map_err(|e| e.at_line(line_no))?;
            }
            MtlDirective::OpticalDensity => {
                material.optical_density = parse_scalar("Ni", args).map_err(|e| e.at_line(line_no))?;
            }
            MtlDirective::Dissolve => {
                material.dissolve = parse_scalar("d", args).map_err(|e| e.at_line(line_no))?;
            }
            MtlDirective::Illumination => {
                material.illumination = parse_illumination(args).map_err(|e| e.at_line(line_no))?;
            }
            MtlDirective::MapAmbient => material.map_ambient = Some(args.to_string()),
            MtlDirective::MapDiffuse => material.map_diffuse = Some(args.to_string()),
            MtlDirective::MapSpecular => material.map_specular = Some(args.to_string()),
            MtlDirective::MapSpecularExponent => {
                material.map_specular_exponent = Some(args.to_string())
            }
            MtlDirective::MapDissolve => material.map_dissolve = Some(args.to_string()),
            MtlDirective::MapBump => material.map_bump = Some(args.to_string()),
            MtlDirective::NewMaterial | MtlDirective::Unknown => {}
        }
    }

    if let Some(done) = current {
        materials.push(done);
    }

    Ok(materials)
}

/// 颜色三元组是可选数据：格式不对时保留原值并继续
fn set_color(target: &mut [f32; 3], args: &str, directive: &str, line_no: usize) {
    let parts = fields(args);
    let parsed: Option<Vec<f32>> = parts.iter().map(|p| p.parse().ok()).collect();

    match parsed {
        Some(values) if values.len() == 3 => {
            target.copy_from_slice(&values);
        }
        _ => {
            tracing::warn!(line = line_no, directive, args, "颜色需要3个数值字段，已跳过");
        }
    }
}

/// 单个必需数值字段
fn parse_scalar<T: std::str::FromStr>(directive: &str, args: &str) -> std::result::Result<T, MeshLoadError> {
    let value = fields(args)
        .first()
        .copied()
        .ok_or_else(|| MeshLoadError::malformed(directive, "missing value"))?;

    value
        .parse()
        .map_err(|_| MeshLoadError::malformed(directive, format!("'{}' is not a number", value)))
}

/// 光照模型编号：接受 `2` 或 `2.0` 这样的写法，小数部分被截断
fn parse_illumination(args: &str) -> std::result::Result<i32, MeshLoadError> {
    let value: f32 = parse_scalar("illum", args)?;
    if !value.is_finite() {
        return Err(MeshLoadError::malformed("illum", format!("'{}' is not finite", value)));
    }
    Ok(value.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(src: &str) -> Result<Vec<Material>> {
        MtlLoader::load_from_reader(Cursor::new(src))
    }

    #[test]
    fn test_newmtl_only() {
        let materials = parse("newmtl foo\n").unwrap();

        assert_eq!(materials, vec![Material::with_name("foo")]);
        assert_eq!(materials[0].illumination, 0);
    }

    #[test]
    fn test_full_material() {
        let src = "\
# a comment
newmtl brick
Ka 0.1 0.2 0.3
Kd 0.5 0.5 0.5
Ks 1 1 1
Ns 96.0784
Ni 1.45
d 0.75
illum 2
map_Ka amb.png
map_Kd textures/brick diffuse.png
map_Ks spec.png
map_Ns gloss.png
map_d alpha.png
bump -bm 0.5 normal.png
";
        let materials = parse(src).unwrap();
        let m = &materials[0];

        assert_eq!(m.name, "brick");
        assert_eq!(m.ambient, [0.1, 0.2, 0.3]);
        assert_eq!(m.diffuse, [0.5, 0.5, 0.5]);
        assert_eq!(m.specular, [1.0, 1.0, 1.0]);
        assert_eq!(m.specular_exponent, 96.0784);
        assert_eq!(m.optical_density, 1.45);
        assert_eq!(m.dissolve, 0.75);
        assert_eq!(m.illumination, 2);
        assert_eq!(m.map_ambient.as_deref(), Some("amb.png"));
        assert_eq!(m.map_diffuse.as_deref(), Some("textures/brick diffuse.png"));
        assert_eq!(m.map_specular.as_deref(), Some("spec.png"));
        assert_eq!(m.map_specular_exponent.as_deref(), Some("gloss.png"));
        assert_eq!(m.map_dissolve.as_deref(), Some("alpha.png"));
        assert_eq!(m.map_bump.as_deref(), Some("-bm 0.5 normal.png"));
    }

    #[test]
    fn test_multiple_materials_in_order() {
        let src = "newmtl a\nKd 1 0 0\nnewmtl b\nKd 0 1 0\nnewmtl\n";
        let materials = parse(src).unwrap();

        let names: Vec<&str> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "none"]);
        assert_eq!(materials[0].diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(materials[1].diffuse, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bad_color_is_skipped() {
        let src = "newmtl m\nKd 0.2 0.4 0.6\nKd 1 1\nKd 1 x 1\nKa 1 1 1 1\n";
        let m = &parse(src).unwrap()[0];

        assert_eq!(m.diffuse, [0.2, 0.4, 0.6]);
        assert_eq!(m.ambient, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bad_scalar_is_fatal() {
        for src in [
            "newmtl m\nNs shiny\n",
            "newmtl m\nillum high\n",
            "newmtl m\nillum inf\n",
            "newmtl m\nd\n",
        ] {
            let err = parse(src).unwrap_err();
            assert!(
                matches!(
                    err.as_mesh_error(),
                    Some(MeshLoadError::MalformedAttribute { line: 2, .. })
                ),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_fractional_illum_truncated() {
        let cases = [
            ("newmtl m\nillum 2.0\n", 2),
            ("newmtl m\nillum 2.5\n", 2),
            ("newmtl m\nillum -1\n", -1),
        ];
        for (src, expected) in cases {
            let materials = parse(src).unwrap();
            assert_eq!(materials[0].illumination, expected, "{}", src);
        }
    }

    #[test]
    fn test_non_utf8_comment_is_ignored() {
        let src: &[u8] = b"# export\xe9 par \xc9diteur\nnewmtl m\nNs 10\n";
        let materials = MtlLoader::load_from_reader(src).unwrap();

        assert_eq!(materials[0].name, "m");
        assert_eq!(materials[0].specular_exponent, 10.0);
    }

    #[test]
    fn test_properties_before_newmtl_ignored() {
        let materials = parse("Kd 1 1 1\nnewmtl m\n").unwrap();
        assert_eq!(materials[0].diffuse, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_library_fails() {
        let err = parse("# nothing here\n").unwrap_err();
        assert!(matches!(err.as_mesh_error(), Some(MeshLoadError::EmptyResult(_))));
    }

    #[test]
    fn test_wrong_extension_not_opened() {
        let err = MtlLoader::load_from_file(Path::new("/definitely/missing/materials.txt")).unwrap_err();
        assert!(matches!(err.as_mesh_error(), Some(MeshLoadError::WrongExtension(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = MtlLoader::load_from_file(Path::new("/definitely/missing/materials.mtl")).unwrap_err();
        assert!(matches!(err.as_mesh_error(), Some(MeshLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.mtl");
        std::fs::write(&path, "newmtl red\nKd 1 0 0\n").unwrap();

        let materials = MtlLoader::load_from_file(&path).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].diffuse, [1.0, 0.0, 0.0]);
    }
}
