//! Scene registry and lifecycle-safe switching

use std::collections::HashMap;

use crate::render::Renderer;
use crate::scene::scene::Scene;

/// Owns every scene and the notion of which one is current.
///
/// There is exactly one manager per engine; the constructor is crate-private
/// and only the engine facade creates one. The invariant held throughout:
/// if a current scene is set, it is also present in the registry, and it is
/// the only scene whose input bindings are live.
pub struct SceneManager {
    scenes: HashMap<String, Scene>,
    current: Option<String>,
}

impl SceneManager {
    pub(crate) fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            current: None,
        }
    }

    /// Register a scene. The first scene registered becomes current
    /// immediately, which prepares it.
    pub fn add_scene(&mut self, scene: Scene) {
        let id = scene.id().to_string();
        if self.scenes.insert(id.clone(), scene).is_some() {
            log::warn!("scene `{id}` replaced an existing registration");
        }
        if self.current.is_none() {
            self.change_scene(&id);
        }
    }

    /// Remove a scene by id, returning it if registered.
    ///
    /// Removing the current scene disposes it and installs a freshly
    /// constructed default scene as current, so there is always a valid
    /// scene to update.
    pub fn remove_scene(&mut self, id: &str) -> Option<Scene> {
        if self.current.as_deref() == Some(id) {
            if let Some(outgoing) = self.scenes.get_mut(id) {
                outgoing.dispose();
            }
            let removed = self.scenes.remove(id);

            let mut fallback = Scene::default();
            fallback.prepare();
            let fallback_id = fallback.id().to_string();
            if self.scenes.insert(fallback_id.clone(), fallback).is_some() {
                log::warn!("scene `{fallback_id}` replaced by the fallback scene");
            }
            self.current = Some(fallback_id);
            return removed;
        }
        self.scenes.remove(id)
    }

    /// Switch to a registered scene.
    ///
    /// The outgoing scene is disposed before the incoming scene is
    /// prepared, so at most one scene's input bindings are ever live.
    /// Switching to the scene that is already current is a no-op, and an
    /// unknown id is logged and ignored.
    pub fn change_scene(&mut self, id: &str) -> bool {
        if !self.scenes.contains_key(id) {
            log::error!("cannot change to unknown scene `{id}`");
            return false;
        }
        if self.current.as_deref() == Some(id) {
            return true;
        }

        if let Some(current_id) = self.current.take()
            && let Some(outgoing) = self.scenes.get_mut(&current_id)
        {
            outgoing.dispose();
        }
        if let Some(incoming) = self.scenes.get_mut(id) {
            incoming.prepare();
            self.current = Some(id.to_string());
        }
        true
    }

    /// Switch to a scene, registering it first if its id is unknown.
    ///
    /// If a scene with the same id is already registered, the registered
    /// scene wins and the argument is dropped.
    pub fn change_scene_to(&mut self, scene: Scene) {
        let id = scene.id().to_string();
        if self.scenes.contains_key(&id) {
            log::debug!("scene `{id}` already registered; switching to the registered one");
        } else {
            self.scenes.insert(id.clone(), scene);
        }
        self.change_scene(&id);
    }

    /// Update the current scene, then hand its graph and camera to the
    /// renderer collaborator. Does nothing until a scene is registered.
    pub fn draw(&mut self, delta_time: f32, renderer: &mut dyn Renderer) {
        let Some(id) = self.current.clone() else {
            return;
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return;
        };
        scene.update(delta_time);
        renderer.render(scene.graph(), scene.camera());
    }

    /// Window resize pass-through: update every scene's camera aspect
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        for scene in self.scenes.values_mut() {
            scene.camera_mut().set_aspect(width, height);
        }
    }

    /// The current scene
    pub fn current(&self) -> Option<&Scene> {
        self.scenes.get(self.current.as_deref()?)
    }

    /// The current scene, mutably
    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        let id = self.current.clone()?;
        self.scenes.get_mut(&id)
    }

    /// Id of the current scene
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look up a scene by id
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up a scene by id, mutably
    pub fn scene_mut(&mut self, id: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Whether a scene id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Number of registered scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scenes are registered
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("scenes", &self.scenes.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    #[test]
    fn first_scene_becomes_current_and_prepared() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        assert_eq!(manager.current_id(), Some("wall"));
        assert!(manager.current().unwrap().input().is_active());
    }

    #[test]
    fn change_scene_swaps_the_live_bindings() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));
        manager.add_scene(Scene::new("jenga"));

        assert!(manager.change_scene("jenga"));

        assert_eq!(manager.current_id(), Some("jenga"));
        assert!(manager.scene("jenga").unwrap().input().is_active());
        assert!(!manager.scene("wall").unwrap().input().is_active());
    }

    #[test]
    fn change_scene_to_current_is_idempotent() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        assert!(manager.change_scene("wall"));
        assert!(manager.change_scene("wall"));

        assert_eq!(manager.current_id(), Some("wall"));
        // Still prepared: the no-op path never disposed it
        assert!(manager.current().unwrap().input().is_active());
    }

    #[test]
    fn change_to_unknown_scene_is_rejected() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        assert!(!manager.change_scene("missing"));
        assert_eq!(manager.current_id(), Some("wall"));
    }

    #[test]
    fn removing_the_current_scene_installs_a_fresh_default() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        let removed = manager.remove_scene("wall");

        assert!(removed.is_some());
        assert!(!manager.contains("wall"));
        assert_eq!(manager.current_id(), Some(Scene::DEFAULT_ID));
        // The invariant holds: current is always also in the registry
        assert!(manager.contains(Scene::DEFAULT_ID));
        assert!(manager.current().unwrap().input().is_active());
        assert_eq!(manager.current().unwrap().entity_count(), 0);
    }

    #[test]
    fn removing_a_background_scene_leaves_current_alone() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));
        manager.add_scene(Scene::new("jenga"));

        let removed = manager.remove_scene("jenga");

        assert!(removed.is_some());
        assert_eq!(manager.current_id(), Some("wall"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn change_scene_to_registers_unknown_scenes() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        manager.change_scene_to(Scene::new("model"));

        assert!(manager.contains("model"));
        assert_eq!(manager.current_id(), Some("model"));
    }

    #[test]
    fn draw_updates_and_presents_the_current_scene() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));

        let mut renderer = NullRenderer::new();
        manager.draw(1.0 / 60.0, &mut renderer);

        assert_eq!(renderer.frames(), 1);
        assert_eq!(manager.current().unwrap().physics().steps(), 1);
    }

    #[test]
    fn draw_without_scenes_is_harmless() {
        let mut manager = SceneManager::new();
        let mut renderer = NullRenderer::new();
        manager.draw(1.0 / 60.0, &mut renderer);
        assert_eq!(renderer.frames(), 0);
    }

    #[test]
    fn resize_reaches_every_scene_camera() {
        let mut manager = SceneManager::new();
        manager.add_scene(Scene::new("wall"));
        manager.add_scene(Scene::new("jenga"));

        manager.handle_resize(400, 200);

        assert_eq!(manager.scene("wall").unwrap().camera().aspect, 2.0);
        assert_eq!(manager.scene("jenga").unwrap().camera().aspect, 2.0);
    }
}
