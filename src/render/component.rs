//! Graphics component tying an entity to a render node

use crate::render::graph::{NodeKey, RenderNode, SceneGraph, TextureHandle};
use crate::render::transform::Transform;

/// The visual representation of an entity.
///
/// Holds a node description until the owning scene registers it with the
/// scene graph; after that, writes go straight to the graph node. Scale is
/// never touched by transform sync, so a node keeps whatever scale it was
/// built with.
#[derive(Debug)]
pub struct GraphicsComponent {
    node: RenderNode,
    key: Option<NodeKey>,
}

impl GraphicsComponent {
    /// Create a component from a node description
    pub fn new(node: RenderNode) -> Self {
        Self { node, key: None }
    }

    /// Insert the node into the scene graph.
    ///
    /// Called by `Scene::add`. Registering twice is a no-op; the node keeps
    /// its first key.
    pub fn register(&mut self, graph: &mut SceneGraph) {
        if self.key.is_some() {
            log::debug!("graphics component already registered");
            return;
        }
        self.key = Some(graph.add(self.node.clone()));
    }

    /// The scene-graph key, if registered
    pub fn node_key(&self) -> Option<NodeKey> {
        self.key
    }

    /// Apply a physics-reported transform. Position and rotation only;
    /// the node's scale is preserved.
    pub fn apply_transform(&mut self, graph: &mut SceneGraph, transform: &Transform) {
        if let Some(key) = self.key {
            if let Some(node) = graph.node_mut(key) {
                node.transform.position = transform.position;
                node.transform.rotation = transform.rotation;
            }
        } else {
            self.node.transform.position = transform.position;
            self.node.transform.rotation = transform.rotation;
        }
    }

    /// Apply a texture to the node
    pub fn apply_texture(&mut self, graph: &mut SceneGraph, texture: TextureHandle) {
        if let Some(key) = self.key {
            if let Some(node) = graph.node_mut(key) {
                node.texture = Some(texture);
            }
        } else {
            self.node.texture = Some(texture);
        }
    }

    /// The node description, or the live graph node once registered
    pub fn node<'a>(&'a self, graph: &'a SceneGraph) -> Option<&'a RenderNode> {
        match self.key {
            Some(key) => graph.node(key),
            None => Some(&self.node),
        }
    }

    /// Per-frame hook; graphics components have no default behavior
    pub fn update(&mut self) {}
}
