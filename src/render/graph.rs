//! Scene graph handed to the renderer collaborator each frame

use glam::Vec3;
use slotmap::{SlotMap, new_key_type};

use crate::render::transform::Transform;

new_key_type! {
    /// Stable key of a node in a [`SceneGraph`]
    pub struct NodeKey;
}

/// Opaque handle to a loader-provided mesh asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a loader-provided texture asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// What a node draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeMesh {
    /// Axis-aligned box of the given size
    Cuboid {
        /// Full extents on each axis
        size: Vec3,
    },
    /// Sphere of the given radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Asset loaded outside the core
    External(MeshHandle),
}

/// One renderable object in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    /// What to draw
    pub mesh: NodeMesh,
    /// World-space placement
    pub transform: Transform,
    /// Base color, linear RGB
    pub color: Vec3,
    /// Optional texture applied over the base color
    pub texture: Option<TextureHandle>,
    /// Whether this node casts shadows
    pub cast_shadow: bool,
    /// Whether this node receives shadows
    pub receive_shadow: bool,
}

impl RenderNode {
    /// A white cuboid node at the origin
    pub fn cuboid(size: Vec3) -> Self {
        Self::with_mesh(NodeMesh::Cuboid { size })
    }

    /// A white sphere node at the origin
    pub fn sphere(radius: f32) -> Self {
        Self::with_mesh(NodeMesh::Sphere { radius })
    }

    /// A node drawing an externally loaded mesh
    pub fn external(mesh: MeshHandle) -> Self {
        Self::with_mesh(NodeMesh::External(mesh))
    }

    fn with_mesh(mesh: NodeMesh) -> Self {
        Self {
            mesh,
            transform: Transform::default(),
            color: Vec3::ONE,
            texture: None,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    /// Set the base color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set the initial placement
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Scene lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Sun-style light shining from `position` toward the origin
    Directional {
        /// Light position
        position: Vec3,
        /// Light color, linear RGB
        color: Vec3,
        /// Whether this light casts shadows
        cast_shadow: bool,
    },
    /// Uniform fill light
    Ambient {
        /// Light color, linear RGB
        color: Vec3,
    },
}

/// The renderable representation of a scene.
///
/// Nodes are owned here and referenced by graphics components through
/// [`NodeKey`]s; the renderer collaborator reads the whole graph once per
/// frame and never mutates it.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, RenderNode>,
    lights: Vec<Light>,
    background: Vec3,
}

impl SceneGraph {
    /// Default sky background, matching a pale blue clear color
    pub const DEFAULT_BACKGROUND: Vec3 = Vec3::new(0.749, 0.820, 0.898);

    /// Create an empty graph with the default background
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            lights: Vec::new(),
            background: Self::DEFAULT_BACKGROUND,
        }
    }

    /// Add a node, returning its key
    pub fn add(&mut self, node: RenderNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Remove a node; returns it if the key was live
    pub fn remove(&mut self, key: NodeKey) -> Option<RenderNode> {
        self.nodes.remove(key)
    }

    /// Look up a node
    pub fn node(&self, key: NodeKey) -> Option<&RenderNode> {
        self.nodes.get(key)
    }

    /// Look up a node, mutably
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut RenderNode> {
        self.nodes.get_mut(key)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &RenderNode)> {
        self.nodes.iter()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All lights in insertion order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Background clear color
    pub fn background(&self) -> Vec3 {
        self.background
    }

    /// Set the background clear color
    pub fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_nodes() {
        let mut graph = SceneGraph::new();
        let key = graph.add(RenderNode::cuboid(Vec3::ONE));
        assert_eq!(graph.len(), 1);
        assert!(graph.node(key).is_some());

        let removed = graph.remove(key).unwrap();
        assert_eq!(removed.mesh, NodeMesh::Cuboid { size: Vec3::ONE });
        assert!(graph.is_empty());
        assert!(graph.node(key).is_none());
    }

    #[test]
    fn removed_keys_stay_dead() {
        let mut graph = SceneGraph::new();
        let key = graph.add(RenderNode::sphere(1.0));
        graph.remove(key);
        let other = graph.add(RenderNode::sphere(2.0));
        assert_ne!(key, other);
        assert!(graph.node(key).is_none());
    }

    #[test]
    fn lights_keep_insertion_order() {
        let mut graph = SceneGraph::new();
        graph.add_light(Light::Ambient { color: Vec3::splat(0.25) });
        graph.add_light(Light::Directional {
            position: Vec3::new(-10.0, 10.0, 5.0),
            color: Vec3::ONE,
            cast_shadow: true,
        });

        assert_eq!(graph.lights().len(), 2);
        assert!(matches!(graph.lights()[0], Light::Ambient { .. }));
        assert!(matches!(graph.lights()[1], Light::Directional { .. }));
    }
}
