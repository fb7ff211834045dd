/// Scene — camera, lights and an ordered node list over a mesh pool.
///
/// Meshes live in a SlotMap owned by the scene; nodes refer to them by
/// `MeshKey`, so several nodes can share one mesh and removing a mesh
/// can never leave a dangling reference (the key just stops resolving).

use glam::Vec3;
use slotmap::SlotMap;
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::resource::{Mesh, MeshKey};
use crate::engine_debug;
use super::{DirLight, PointLight, SceneNode, SceneDescription, PrimitiveKind};

/// Sky color used when a scene does not set one
pub const DEFAULT_SKY_COLOR: Vec3 = Vec3::new(0.53, 0.39, 0.72);

pub struct Scene {
    pub(crate) camera: Camera,
    pub(crate) sky_color: Vec3,
    pub(crate) dir_light: DirLight,
    pub(crate) point_lights: Vec<PointLight>,
    pub(crate) meshes: SlotMap<MeshKey, Mesh>,
    pub(crate) nodes: Vec<SceneNode>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with a default camera and lights
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            sky_color: DEFAULT_SKY_COLOR,
            dir_light: DirLight::default(),
            point_lights: Vec::new(),
            meshes: SlotMap::with_key(),
            nodes: Vec::new(),
        }
    }

    /// Build a scene from loaded records
    ///
    /// One mesh per primitive kind is created and shared by every node of
    /// that kind. Spheres use `sphere_slices` (vertical, horizontal).
    pub fn from_description(desc: &SceneDescription, sphere_slices: (u32, u32)) -> Self {
        let mut scene = Scene::new();

        scene.camera.set_position(desc.camera.position);
        scene.camera.set_rotation(desc.camera.rotation.x, desc.camera.rotation.y, desc.camera.rotation.z);
        scene.camera.set_fov(desc.camera.fov);
        scene.sky_color = desc.sky_color;
        scene.dir_light = desc.dir_light;
        scene.point_lights = desc.point_lights.clone();

        let mut cube = None;
        let mut sphere = None;
        for record in &desc.nodes {
            let mesh = match record.kind {
                PrimitiveKind::Cube => *cube.get_or_insert_with(|| scene.meshes.insert(Mesh::cube())),
                PrimitiveKind::Sphere => *sphere.get_or_insert_with(|| {
                    scene.meshes.insert(Mesh::sphere(sphere_slices.0, sphere_slices.1))
                }),
            };
            scene.nodes.push(SceneNode::new(mesh, record.transform, record.material.clone()));
        }

        engine_debug!(
            "prism3d::Scene",
            "Built scene: {} nodes, {} meshes, {} point lights",
            scene.nodes.len(), scene.meshes.len(), scene.point_lights.len()
        );
        scene
    }

    // ===== CAMERA / ENVIRONMENT =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access for input handling between frames
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn sky_color(&self) -> Vec3 {
        self.sky_color
    }

    pub fn set_sky_color(&mut self, color: Vec3) {
        self.sky_color = color;
    }

    pub fn dir_light(&self) -> &DirLight {
        &self.dir_light
    }

    pub fn set_dir_light(&mut self, light: DirLight) {
        self.dir_light = light;
    }

    /// Point lights in upload order
    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn clear_point_lights(&mut self) {
        self.point_lights.clear();
    }

    // ===== MESHES =====

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    /// Remove a mesh and every node that uses it
    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Mesh> {
        let mesh = self.meshes.remove(key)?;
        self.nodes.retain(|node| node.mesh != key);
        Some(mesh)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    // ===== NODES =====

    /// Append a node; nodes are drawn in insertion order
    ///
    /// Rejects nodes whose mesh is not in this scene or whose scale has a
    /// zero component.
    pub fn add_node(&mut self, node: SceneNode) -> Result<()> {
        if !self.meshes.contains_key(node.mesh) {
            return Err(Error::InvalidResource(format!(
                "node mesh {:?} is not in this scene", node.mesh
            )));
        }
        if !node.transform.has_valid_scale() {
            return Err(Error::InvalidResource(format!(
                "node scale {} has a zero component", node.transform.scale
            )));
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Keep only the nodes matching `keep`, preserving order
    pub fn retain_nodes<F: FnMut(&SceneNode) -> bool>(&mut self, keep: F) {
        self.nodes.retain(keep);
    }

    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
