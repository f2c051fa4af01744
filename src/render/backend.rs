//! Renderer collaborator boundary

use crate::render::camera::Camera;
use crate::render::graph::SceneGraph;

/// The draw-call collaborator.
///
/// The engine facade calls `render` once per frame with the current scene's
/// graph and camera, after the scene has updated. Implementations own the
/// GPU side entirely; the core never sees meshes, materials, or surfaces.
pub trait Renderer {
    /// The output surface changed size
    fn resize(&mut self, width: u32, height: u32);

    /// Present one frame
    fn render(&mut self, graph: &SceneGraph, camera: &Camera);
}

/// Renderer that draws nothing.
///
/// Used for headless runs and tests, and as the default until a real
/// backend is installed.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
    last_node_count: usize,
}

impl NullRenderer {
    /// Create a new headless renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Node count of the most recently presented graph
    pub fn last_node_count(&self) -> usize {
        self.last_node_count
    }
}

impl Renderer for NullRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("null renderer resized to {width}x{height}");
    }

    fn render(&mut self, graph: &SceneGraph, _camera: &Camera) {
        self.frames += 1;
        self.last_node_count = graph.len();
    }
}
