/// Scene file loader and writer
///
/// Text format, one comma-separated record per line. The first line must be
/// `FORMAT_MARKER`; lines shorter than 2 characters or starting with `//`
/// are skipped. Tags and numeric fields may be padded with spaces; texture
/// paths are taken verbatim.
///
/// ```text
/// [PRISM SCENE FORMAT V2]
/// camera,posX,posY,posZ,rotX,rotY,rotZ,fov
/// sky,r,g,b
/// dirlight,dirX,dirY,dirZ,ambR,ambG,ambB,diffR,diffG,diffB,specR,specG,specB
/// pointlight,posX,posY,posZ,constant,linear,quadratic,ambR,ambG,ambB,diffR,diffG,diffB,specR,specG,specB
/// cube,posX,posY,posZ,rotX,rotY,rotZ,scaleX,scaleY,scaleZ,shininess,distort[,texture[,specular]]
/// sphere,...same fields as cube...
/// ```
///
/// A malformed record (wrong field count, bad number, zero scale, unknown
/// tag) is logged and dropped; loading continues with the next line.

use std::fmt::Write as _;
use std::path::Path;
use glam::Vec3;
use crate::error::{Error, Result};
use crate::camera::DEFAULT_FOV;
use crate::{engine_debug, engine_error};
use super::{DirLight, PointLight, Transform, Material, DEFAULT_SKY_COLOR};

/// Required first line of a scene file
pub const FORMAT_MARKER: &str = "[PRISM SCENE FORMAT V2]";

const CAMERA_FIELDS: usize = 8;
const SKY_FIELDS: usize = 4;
const DIRLIGHT_FIELDS: usize = 13;
const POINTLIGHT_FIELDS: usize = 16;
const PRIMITIVE_MIN_FIELDS: usize = 12;
const PRIMITIVE_MAX_FIELDS: usize = 14;

// ===== RECORDS =====

/// Mesh kinds a scene file can instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
}

impl PrimitiveKind {
    pub fn tag(self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "cube",
            PrimitiveKind::Sphere => "sphere",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cube" => Some(PrimitiveKind::Cube),
            "sphere" => Some(PrimitiveKind::Sphere),
            _ => None,
        }
    }
}

/// Initial camera placement (rotation in degrees: pitch, yaw, roll)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRecord {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov: f32,
}

impl Default for CameraRecord {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov: DEFAULT_FOV,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub kind: PrimitiveKind,
    pub transform: Transform,
    pub material: Material,
}

/// Everything a scene file describes, before any mesh is built
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub camera: CameraRecord,
    pub sky_color: Vec3,
    pub dir_light: DirLight,
    pub point_lights: Vec<PointLight>,
    pub nodes: Vec<NodeRecord>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            camera: CameraRecord::default(),
            sky_color: DEFAULT_SKY_COLOR,
            dir_light: DirLight::default(),
            point_lights: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

// ===== LOADER =====

pub struct SceneLoader;

impl SceneLoader {
    /// Read and parse a scene file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneDescription> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(format!("{}: {}", path.display(), e))
        })?;
        let desc = Self::parse(&text)?;
        engine_debug!(
            "prism3d::SceneLoader",
            "Loaded {}: {} nodes, {} point lights",
            path.display(), desc.nodes.len(), desc.point_lights.len()
        );
        Ok(desc)
    }

    /// Parse scene text
    ///
    /// Fails only when the format marker is missing; bad records are
    /// logged and skipped.
    pub fn parse(text: &str) -> Result<SceneDescription> {
        let mut lines = text.lines();
        let marker = lines.next().map(str::trim_end).unwrap_or("");
        if marker != FORMAT_MARKER {
            return Err(Error::SceneFormat(format!(
                "expected '{}' on the first line, found '{}'",
                FORMAT_MARKER, marker
            )));
        }

        let mut desc = SceneDescription::default();
        for (index, raw) in lines.enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().len() < 2 || line.starts_with("//") {
                continue;
            }
            if let Err(err) = Self::parse_record(line, &mut desc) {
                // Line numbers are 1-based and the marker is line 1
                engine_error!("prism3d::SceneLoader", "Line {} \"{}\" dropped: {}", index + 2, line, err);
            }
        }
        Ok(desc)
    }

    fn parse_record(line: &str, desc: &mut SceneDescription) -> Result<()> {
        // Texture paths keep their raw text; tags and numbers are trimmed
        let fields: Vec<&str> = line.split(',').collect();
        let tag = fields[0].trim();

        match tag {
            "camera" => {
                expect_fields(&fields, CAMERA_FIELDS)?;
                desc.camera = CameraRecord {
                    position: parse_vec3(&fields, 1)?,
                    rotation: parse_vec3(&fields, 4)?,
                    fov: parse_f32(&fields, 7)?,
                };
            }
            "sky" => {
                expect_fields(&fields, SKY_FIELDS)?;
                desc.sky_color = parse_vec3(&fields, 1)?;
            }
            "dirlight" => {
                expect_fields(&fields, DIRLIGHT_FIELDS)?;
                desc.dir_light = DirLight {
                    direction: parse_vec3(&fields, 1)?,
                    ambient: parse_vec3(&fields, 4)?,
                    diffuse: parse_vec3(&fields, 7)?,
                    specular: parse_vec3(&fields, 10)?,
                };
            }
            "pointlight" => {
                expect_fields(&fields, POINTLIGHT_FIELDS)?;
                desc.point_lights.push(PointLight {
                    position: parse_vec3(&fields, 1)?,
                    constant: parse_f32(&fields, 4)?,
                    linear: parse_f32(&fields, 5)?,
                    quadratic: parse_f32(&fields, 6)?,
                    ambient: parse_vec3(&fields, 7)?,
                    diffuse: parse_vec3(&fields, 10)?,
                    specular: parse_vec3(&fields, 13)?,
                });
            }
            _ => {
                let kind = PrimitiveKind::from_tag(tag).ok_or_else(|| {
                    Error::SceneFormat(format!("unknown record type '{}'", tag))
                })?;
                desc.nodes.push(parse_primitive(kind, &fields)?);
            }
        }
        Ok(())
    }

    /// Render a description in the scene file format
    ///
    /// Fails if a texture path cannot be represented (contains a comma or
    /// a line break).
    pub fn write(desc: &SceneDescription) -> Result<String> {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", FORMAT_MARKER);

        let c = &desc.camera;
        let _ = writeln!(out, "camera,{},{},{}", vec3_fields(c.position), vec3_fields(c.rotation), c.fov);
        let _ = writeln!(out, "sky,{}", vec3_fields(desc.sky_color));

        let d = &desc.dir_light;
        let _ = writeln!(
            out,
            "dirlight,{},{},{},{}",
            vec3_fields(d.direction), vec3_fields(d.ambient), vec3_fields(d.diffuse), vec3_fields(d.specular)
        );

        for p in &desc.point_lights {
            let _ = writeln!(
                out,
                "pointlight,{},{},{},{},{},{},{}",
                vec3_fields(p.position), p.constant, p.linear, p.quadratic,
                vec3_fields(p.ambient), vec3_fields(p.diffuse), vec3_fields(p.specular)
            );
        }

        for node in &desc.nodes {
            let t = &node.transform;
            let m = &node.material;
            let _ = write!(
                out,
                "{},{},{},{},{},{}",
                node.kind.tag(),
                vec3_fields(t.position), vec3_fields(t.rotation), vec3_fields(t.scale),
                m.shininess, m.distort
            );
            check_path(&m.diffuse_texture)?;
            check_path(&m.specular_texture)?;
            if !m.specular_texture.is_empty() {
                let _ = write!(out, ",{},{}", m.diffuse_texture, m.specular_texture);
            } else if !m.diffuse_texture.is_empty() {
                let _ = write!(out, ",{}", m.diffuse_texture);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Write a description to a file
    pub fn save<P: AsRef<Path>>(path: P, desc: &SceneDescription) -> Result<()> {
        let text = Self::write(desc)?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}

// ===== FIELD HELPERS =====

fn parse_primitive(kind: PrimitiveKind, fields: &[&str]) -> Result<NodeRecord> {
    if fields.len() < PRIMITIVE_MIN_FIELDS || fields.len() > PRIMITIVE_MAX_FIELDS {
        return Err(Error::SceneFormat(format!(
            "expected {} to {} fields, found {}",
            PRIMITIVE_MIN_FIELDS, PRIMITIVE_MAX_FIELDS, fields.len()
        )));
    }

    let transform = Transform::new(
        parse_vec3(fields, 1)?,
        parse_vec3(fields, 4)?,
        parse_vec3(fields, 7)?,
    );
    if !transform.has_valid_scale() {
        return Err(Error::SceneFormat(format!("zero scale component in {}", transform.scale)));
    }

    let material = Material {
        shininess: parse_f32(fields, 10)?,
        distort: parse_bool(fields, 11)?,
        diffuse_texture: fields.get(12).copied().unwrap_or("").to_string(),
        specular_texture: fields.get(13).copied().unwrap_or("").to_string(),
    };

    Ok(NodeRecord { kind, transform, material })
}

fn expect_fields(fields: &[&str], count: usize) -> Result<()> {
    if fields.len() != count {
        return Err(Error::SceneFormat(format!(
            "expected {} fields, found {}", count, fields.len()
        )));
    }
    Ok(())
}

fn parse_f32(fields: &[&str], index: usize) -> Result<f32> {
    let field = fields[index].trim();
    field.parse::<f32>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
        Error::SceneFormat(format!("field {} '{}' is not a number", index, field))
    })
}

fn parse_vec3(fields: &[&str], start: usize) -> Result<Vec3> {
    Ok(Vec3::new(
        parse_f32(fields, start)?,
        parse_f32(fields, start + 1)?,
        parse_f32(fields, start + 2)?,
    ))
}

fn parse_bool(fields: &[&str], index: usize) -> Result<bool> {
    match fields[index].trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::SceneFormat(format!(
            "field {} '{}' is not a boolean", index, other
        ))),
    }
}

fn vec3_fields(v: Vec3) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

fn check_path(path: &str) -> Result<()> {
    if path.contains([',', '\n', '\r']) {
        return Err(Error::SceneFormat(format!("texture path '{}' cannot be written", path)));
    }
    Ok(())
}

#[cfg(test)]
#[path = "scene_loader_tests.rs"]
mod tests;
