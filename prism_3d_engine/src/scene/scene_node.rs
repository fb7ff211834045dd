/// Scene node: one drawable instance of a mesh

use crate::resource::{MeshKey, TextureKey};
use super::{Material, Transform};

/// Texture handles the renderer resolved for a node
///
/// Filled on the first frame the node is visible. A handle that no longer
/// exists in the cache (after an eviction) is resolved again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedTextures {
    pub diffuse: Option<TextureKey>,
    pub specular: Option<TextureKey>,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Handle into the owning scene's mesh pool
    pub mesh: MeshKey,
    pub transform: Transform,
    pub material: Material,
    resolved: ResolvedTextures,
}

impl SceneNode {
    pub fn new(mesh: MeshKey, transform: Transform, material: Material) -> Self {
        Self {
            mesh,
            transform,
            material,
            resolved: ResolvedTextures::default(),
        }
    }

    /// Texture handles resolved by the renderer so far
    pub fn resolved_textures(&self) -> ResolvedTextures {
        self.resolved
    }

    /// Material paths alongside the handles resolved from them
    pub(crate) fn textures_mut(&mut self) -> (&Material, &mut ResolvedTextures) {
        (&self.material, &mut self.resolved)
    }

    /// Forget resolved handles (after changing texture paths)
    pub fn invalidate_textures(&mut self) {
        self.resolved = ResolvedTextures::default();
    }
}
