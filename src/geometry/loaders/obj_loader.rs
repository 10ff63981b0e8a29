/// OBJ 文件加载器
///
/// 逐行解析 Wavefront OBJ 文件，将多边形面解析为顶点并通过耳切算法三角化，
/// 按 `o`/`g` 块和 `usemtl` 切换分段输出网格对象，同时维护全局扁平缓冲区。
///
/// # 状态机
///
/// ```text
/// NotListening ──o/g──► BuildingObject
///                          │  o/g     : 已有几何数据时输出当前对象，否则只改名
///                          │  usemtl  : 已有几何数据时输出当前对象，新对象沿用名称
///                          └─ 文件结束 : 输出非空的当前对象
/// ```
///
/// 在 `NotListening` 状态下遇到第一个 `o`/`g` 时，之前累积的面并入该对象。
use super::face::{resolve_face, AttributePools};
use super::mtl_loader::MtlLoader;
use super::tokenizer::{fields, first_token, lossy_lines, tail};
use super::triangulate::triangulate;
use super::{has_extension, MeshLoader};
use crate::core::config::{Config, LoaderConfig, TriangulationConfig};
use crate::core::error::{MeshLoadError, ObjlError, Result};
use crate::geometry::mesh::{MeshObject, ObjScene};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// 几何文件扩展名
pub const OBJ_EXTENSION: &str = ".obj";

/// 没有名称的 `o`/`g` 使用的对象名
const UNNAMED: &str = "unnamed";

/// 可识别的 OBJ 指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjDirective {
    Object,
    Position,
    TexCoord,
    Normal,
    Face,
    UseMaterial,
    MaterialLibrary,
    Unknown,
}

impl ObjDirective {
    fn parse(token: &str) -> Self {
        match token {
            "o" | "g" => ObjDirective::Object,
            "v" => ObjDirective::Position,
            "vt" => ObjDirective::TexCoord,
            "vn" => ObjDirective::Normal,
            "f" => ObjDirective::Face,
            "usemtl" => ObjDirective::UseMaterial,
            "mtllib" => ObjDirective::MaterialLibrary,
            _ => ObjDirective::Unknown,
        }
    }
}

/// OBJ 格式加载器
///
/// 加载器只持有配置，每次加载都返回全新的 [`ObjScene`]。
///
/// # 使用示例
///
/// ```rust,no_run
/// use objl::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let scene = ObjLoader::default().load_from_file(Path::new("model.obj"))?;
/// for mesh in &scene.meshes {
///     println!("{}: {} 个三角形", mesh.name, mesh.triangle_count());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    loader: LoaderConfig,
    triangulation: TriangulationConfig,
}

impl ObjLoader {
    /// 使用给定配置创建加载器
    pub fn new(config: &Config) -> Self {
        Self {
            loader: config.loader.clone(),
            triangulation: config.triangulation.clone(),
        }
    }

    /// 从任意 [`BufRead`] 加载，`mtllib` 相对于 `base_dir` 解析
    pub fn load_from_reader<R: BufRead>(&self, reader: R, base_dir: &Path) -> Result<ObjScene> {
        self.parse(reader, base_dir, Path::new("<memory>"))
    }

    fn parse<R: BufRead>(&self, reader: R, base_dir: &Path, source: &Path) -> Result<ObjScene> {
        let mut builder = SceneBuilder::new(self, base_dir);

        for (line_no, line) in lossy_lines(reader).enumerate() {
            let line = line?;
            builder.handle_line(line_no + 1, &line)?;
        }

        let scene = builder.finish();
        if scene.is_empty() {
            return Err(MeshLoadError::EmptyResult(source.to_path_buf()).into());
        }

        crate::loader_info!(
            source = %source.display(),
            objects = scene.meshes.len(),
            vertices = scene.vertex_count(),
            triangles = scene.triangle_count(),
            materials = scene.materials.len(),
            "OBJ 加载完成"
        );

        Ok(scene)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(&self, path: &Path) -> Result<ObjScene> {
        // 扩展名不对时不尝试打开文件
        if !has_extension(path, OBJ_EXTENSION) {
            return Err(MeshLoadError::WrongExtension(path.to_path_buf()).into());
        }

        let file = File::open(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "无法打开 OBJ 文件");
            MeshLoadError::FileNotFound(path.to_path_buf())
        })?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        self.parse(BufReader::new(file), base_dir, path)
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<ObjScene> {
        self.load_from_reader(Cursor::new(data), Path::new("."))
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

/// 逐行构建状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildState {
    NotListening,
    BuildingObject,
}

/// 单次加载的可变状态
struct SceneBuilder<'a> {
    loader: &'a ObjLoader,
    base_dir: PathBuf,
    pools: AttributePools,
    state: BuildState,
    pending: MeshObject,
    used_names: HashSet<String>,
    scene: ObjScene,
}

impl<'a> SceneBuilder<'a> {
    fn new(loader: &'a ObjLoader, base_dir: &Path) -> Self {
        Self {
            loader,
            base_dir: base_dir.to_path_buf(),
            pools: AttributePools::default(),
            state: BuildState::NotListening,
            pending: MeshObject::with_name(UNNAMED),
            used_names: HashSet::new(),
            scene: ObjScene::default(),
        }
    }

    fn handle_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        self.report_progress(line_no);

        let args = tail(line);
        match ObjDirective::parse(first_token(line)) {
            ObjDirective::Object => self.object_marker(args),
            ObjDirective::Position => self
                .pools
                .push_position(args)
                .map_err(|e| e.at_line(line_no))?,
            ObjDirective::TexCoord => {
                // 纹理坐标是可选数据，格式错误时跳过
                if let Err(e) = self.pools.push_texcoord(args) {
                    tracing::warn!(line = line_no, error = %e, "跳过无效的 vt");
                }
            }
            ObjDirective::Normal => self
                .pools
                .push_normal(args)
                .map_err(|e| e.at_line(line_no))?,
            ObjDirective::Face => self.face(line_no, args)?,
            ObjDirective::UseMaterial => self.use_material(args),
            ObjDirective::MaterialLibrary => self.material_library(line_no, args)?,
            ObjDirective::Unknown => {}
        }

        Ok(())
    }

    fn report_progress(&self, line_no: usize) {
        let every = self.loader.loader.progress_every as usize;
        if every == 0 || line_no % every != 0 {
            return;
        }
        tracing::debug!(
            object = %self.pending.name,
            positions = self.pools.positions.len(),
            texcoords = self.pools.texcoords.len(),
            normals = self.pools.normals.len(),
            triangles = self.scene.triangle_count(),
            material = self.pending.material_name.as_deref().unwrap_or("-"),
            "加载进度"
        );
    }

    fn object_marker(&mut self, args: &str) {
        let name = if args.is_empty() { UNNAMED } else { args };

        if self.state == BuildState::BuildingObject && self.pending.has_geometry() {
            self.finalize_pending();
        }
        self.state = BuildState::BuildingObject;
        self.pending.name = name.to_string();
    }

    fn use_material(&mut self, args: &str) {
        // 同一对象内切换材质时开始新的分段
        if self.pending.has_geometry() {
            self.finalize_pending();
        }
        self.pending.material_name = Some(args.to_string());
    }

    fn face(&mut self, line_no: usize, args: &str) -> Result<()> {
        let corners = fields(args);

        let polygon = match resolve_face(&corners, &self.pools) {
            Ok(polygon) => polygon,
            Err(MeshLoadError::Degenerate { corners, .. }) => {
                crate::loader_warn!(line = line_no, corners, "面的角点少于3个，已跳过");
                return Ok(());
            }
            Err(e) => return Err(e.at_line(line_no).into()),
        };

        let triangulation = triangulate(&polygon, &self.loader.triangulation);
        if !triangulation.complete {
            let err = MeshLoadError::Degenerate { line: line_no, corners: polygon.len() };
            crate::loader_warn!(
                error = %err,
                triangles = triangulation.triangle_count(),
                "多边形无法完整三角化，保留已生成的三角形"
            );
        }

        let global_base = index_base(self.scene.vertices.len(), polygon.len(), line_no)?;
        let local_base = index_base(self.pending.vertices.len(), polygon.len(), line_no)?;

        self.pending.vertices.extend_from_slice(&polygon);
        self.scene.vertices.extend_from_slice(&polygon);

        self.pending
            .indices
            .extend(triangulation.indices.iter().map(|i| local_base + i));
        self.scene
            .indices
            .extend(triangulation.indices.iter().map(|i| global_base + i));

        Ok(())
    }

    fn material_library(&mut self, line_no: usize, args: &str) -> Result<()> {
        if !self.loader.loader.load_materials {
            tracing::debug!(line = line_no, library = args, "材质加载已关闭，跳过 mtllib");
            return Ok(());
        }

        // 文件名可以包含空格：整行对应的文件存在时按一个库处理，否则按空白拆分为多个库
        let libraries = if self.base_dir.join(args).is_file() {
            vec![args]
        } else {
            fields(args)
        };

        for name in libraries {
            let path = self.base_dir.join(name);
            crate::loader_debug!(path = %path.display(), "查找材质库");

            match MtlLoader::load_from_file(&path) {
                Ok(materials) => self.scene.materials.extend(materials),
                Err(ObjlError::MeshLoading(e @ MeshLoadError::MalformedAttribute { .. })) => {
                    return Err(e.into());
                }
                Err(e) => {
                    crate::loader_warn!(line = line_no, error = %e, "材质库不可用，已忽略");
                }
            }
        }

        Ok(())
    }

    /// 输出当前对象，新对象沿用名称和材质
    fn finalize_pending(&mut self) {
        let next = MeshObject {
            name: self.pending.name.clone(),
            material_name: self.pending.material_name.clone(),
            ..Default::default()
        };
        let mut done = std::mem::replace(&mut self.pending, next);

        done.name = self.unique_name(&done.name);
        self.used_names.insert(done.name.clone());

        crate::loader_debug!(
            name = %done.name,
            vertices = done.vertex_count(),
            triangles = done.triangle_count(),
            "对象完成"
        );
        self.scene.meshes.push(done);
    }

    /// 与已输出对象重名时追加 `_2`、`_3` … 后缀
    fn unique_name(&self, base: &str) -> String {
        if !self.used_names.contains(base) {
            return base.to_string();
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if !self.used_names.contains(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn finish(mut self) -> ObjScene {
        if self.pending.has_geometry() {
            self.finalize_pending();
        }

        let ObjScene { meshes, materials, .. } = &mut self.scene;
        for mesh in meshes.iter_mut() {
            let Some(name) = mesh.material_name.as_deref() else {
                continue;
            };
            mesh.material = materials.iter().find(|m| m.name == name).cloned();
            if mesh.material.is_none() {
                tracing::debug!(mesh = %mesh.name, material = name, "没有找到同名材质");
            }
        }

        self.scene
    }
}

/// 追加 `added` 个顶点前的索引基址，追加后的总数必须能用 `u32` 索引
fn index_base(len: usize, added: usize, line: usize) -> std::result::Result<u32, MeshLoadError> {
    let count = len.saturating_add(added);
    u32::try_from(count)
        .map(|_| len as u32)
        .map_err(|_| MeshLoadError::TooManyVertices { line, count })
}
