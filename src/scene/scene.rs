//! Scene: entity ownership, registries, and the per-frame update loop

use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::input::{InputManager, SharedPosition};
use crate::physics::PhysicsWorld;
use crate::render::{Camera, Light, SceneGraph, Transform};
use crate::scene::entity::{ComponentTag, Entity, EntityKey};

/// A self-contained simulated and renderable world.
///
/// Owns its entities, one registry per managed component tag, a physics
/// world, a scene graph, a camera, and an input manager. Exactly one scene
/// is current at a time; `prepare` and `dispose` bracket that span.
///
/// Per frame, `update` runs input → physics step → dirty-entity
/// re-registration → per-tag component updates, in that order, with the
/// physics pass feeding reported transforms straight into the paired
/// graphics components. Nothing in this loop may add or remove registry
/// entries; all such changes go through `add` / `update_entity` between
/// frames.
pub struct Scene {
    id: String,
    camera: Camera,
    graph: SceneGraph,
    world: PhysicsWorld,
    input: InputManager,
    entities: SlotMap<EntityKey, Entity>,
    /// Insertion order; first registered is first updated
    order: Vec<EntityKey>,
    registry: FxHashMap<ComponentTag, Vec<EntityKey>>,
    tag_order: Vec<ComponentTag>,
}

impl Scene {
    /// Id given to scenes created without one
    pub const DEFAULT_ID: &'static str = "default";

    /// Create an empty scene managing the standard tags in the standard
    /// order: physics, then graphics, then audio
    pub fn new(id: impl Into<String>) -> Self {
        let mut scene = Self {
            id: id.into(),
            camera: Camera::new(),
            graph: SceneGraph::new(),
            world: PhysicsWorld::new(),
            input: InputManager::new(),
            entities: SlotMap::with_key(),
            order: Vec::new(),
            registry: FxHashMap::default(),
            tag_order: Vec::new(),
        };
        for tag in ComponentTag::ALL {
            scene.add_component_type(tag);
        }
        scene
    }

    /// The scene id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register a component tag for this scene to manage.
    ///
    /// Registering a tag the scene already manages is rejected and logged;
    /// the existing registry is untouched.
    pub fn add_component_type(&mut self, tag: ComponentTag) {
        if self.tag_order.contains(&tag) {
            log::error!("component type `{tag}` already managed by scene `{}`", self.id);
            return;
        }
        self.tag_order.push(tag);
        self.registry.insert(tag, Vec::new());
    }

    /// Add an entity, taking ownership.
    ///
    /// Every component whose tag this scene manages is entered into the
    /// matching registry; graphics components are registered with the scene
    /// graph and physics components with the physics world. The entity's
    /// dirty flag is cleared.
    pub fn add(&mut self, entity: Entity) -> EntityKey {
        let key = self.entities.insert_with_key(|key| {
            let mut entity = entity;
            entity.assign_key(key);
            entity
        });
        self.order.push(key);

        let entity = &mut self.entities[key];
        for tag in ComponentTag::ALL {
            if !entity.has(tag) {
                continue;
            }
            let Some(registered) = self.registry.get_mut(&tag) else {
                continue;
            };
            if !registered.contains(&key) {
                registered.push(key);
            }
            match tag {
                ComponentTag::Physics => {
                    if let Some(physics) = entity.physics_mut() {
                        physics.register(&mut self.world);
                    }
                }
                ComponentTag::Graphics => {
                    if let Some(graphics) = entity.graphics_mut() {
                        graphics.register(&mut self.graph);
                    }
                }
                ComponentTag::Audio => {}
            }
        }
        entity.clear_dirty();
        key
    }

    /// Re-sync the registries for an entity whose component set changed
    /// after it was added.
    ///
    /// This only updates the tag registries. Components attached after the
    /// initial `add` are NOT registered with the physics world or scene
    /// graph here; callers must do that themselves, e.g. through
    /// [`Scene::register_components`].
    pub fn update_entity(&mut self, key: EntityKey) {
        let Some(entity) = self.entities.get_mut(key) else {
            log::error!("cannot update unknown entity {key:?} in scene `{}`", self.id);
            return;
        };
        for tag in ComponentTag::ALL {
            let Some(registered) = self.registry.get_mut(&tag) else {
                continue;
            };
            if entity.has(tag) {
                if !registered.contains(&key) {
                    registered.push(key);
                }
            } else {
                registered.retain(|&k| k != key);
            }
        }
        entity.clear_dirty();
    }

    /// Register an already-added entity's components with the physics world
    /// and scene graph.
    ///
    /// The explicit collaborator-registration step for components attached
    /// after the initial `add`. Already-registered components are left
    /// alone.
    pub fn register_components(&mut self, key: EntityKey) {
        let Some(entity) = self.entities.get_mut(key) else {
            log::error!("cannot register unknown entity {key:?} in scene `{}`", self.id);
            return;
        };
        if let Some(physics) = entity.physics_mut() {
            physics.register(&mut self.world);
        }
        if let Some(graphics) = entity.graphics_mut() {
            graphics.register(&mut self.graph);
        }
    }

    /// Advance the scene by one frame.
    ///
    /// Strict order: input update, physics step, dirty-entity
    /// re-registration in insertion order, then one pass per tag in
    /// `tag_order`.
    pub fn update(&mut self, delta_time: f32) {
        self.input.update(&mut self.camera);

        self.world.step(delta_time);

        let dirty: Vec<EntityKey> = self
            .order
            .iter()
            .copied()
            .filter(|&key| self.entities.get(key).is_some_and(Entity::is_dirty))
            .collect();
        for key in dirty {
            self.update_entity(key);
        }

        for i in 0..self.tag_order.len() {
            match self.tag_order[i] {
                ComponentTag::Physics => self.sync_physics(),
                ComponentTag::Graphics => self.update_graphics(),
                ComponentTag::Audio => self.update_audio(),
            }
        }
    }

    /// Physics pass: read back body poses and push them into the paired
    /// graphics components. Graphics never reads physics state on its own.
    fn sync_physics(&mut self) {
        let Some(keys) = self.registry.get(&ComponentTag::Physics) else {
            return;
        };
        let mut pose = Transform::default();
        for &key in keys {
            let Some(entity) = self.entities.get_mut(key) else {
                continue;
            };
            let (physics, graphics) = entity.physics_graphics_mut();
            let Some(physics) = physics else { continue };
            if physics.sync_transform(&self.world, &mut pose)
                && let Some(graphics) = graphics
            {
                graphics.apply_transform(&mut self.graph, &pose);
            }
        }
    }

    fn update_graphics(&mut self) {
        let Some(keys) = self.registry.get(&ComponentTag::Graphics) else {
            return;
        };
        for &key in keys {
            if let Some(entity) = self.entities.get_mut(key)
                && let Some(graphics) = entity.graphics_mut()
            {
                graphics.update();
            }
        }
    }

    /// Audio pass: microphone components follow the camera and define the
    /// listener for every spatial source this frame.
    fn update_audio(&mut self) {
        let Some(keys) = self.registry.get(&ComponentTag::Audio) else {
            return;
        };
        let camera_position = self.camera.position;
        let mut listener = None;
        for &key in keys {
            if let Some(entity) = self.entities.get_mut(key)
                && let Some(audio) = entity.audio_mut()
                && audio.is_microphone()
            {
                audio.set_position(camera_position);
                listener = Some(camera_position);
            }
        }
        for &key in keys {
            if let Some(entity) = self.entities.get_mut(key)
                && let Some(audio) = entity.audio_mut()
            {
                audio.update(listener);
            }
        }
    }

    /// The scene became active; its input bindings go live
    pub fn prepare(&mut self) {
        self.input.prepare();
    }

    /// The scene became inactive; its input bindings are released
    pub fn dispose(&mut self) {
        self.input.dispose();
    }

    /// Orbit this scene's camera around `target`
    pub fn enable_orbital_control(&mut self, target: Vec3) {
        self.input.enable_orbital_control(target);
    }

    /// Free-tumble trackball camera for this scene
    pub fn enable_trackball_control(&mut self) {
        self.input.enable_trackball_control();
    }

    /// First-person camera following a shared player position
    pub fn enable_first_person_control(
        &mut self,
        player: SharedPosition,
        move_speed: f32,
        look_speed: f32,
    ) {
        self.input
            .enable_first_person_control(player, move_speed, look_speed);
    }

    /// Add a shadow-casting directional light
    pub fn add_directional_light(&mut self, position: Vec3, color: Vec3) {
        self.graph.add_light(Light::Directional {
            position,
            color,
            cast_shadow: true,
        });
    }

    /// Add uniform ambient light
    pub fn add_ambient_light(&mut self, color: Vec3) {
        self.graph.add_light(Light::Ambient { color });
    }

    /// Look up an entity
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Look up an entity, mutably
    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Number of entities owned by the scene
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entity keys in insertion order
    pub fn entities(&self) -> &[EntityKey] {
        &self.order
    }

    /// Registered entities for a tag, in registration order; empty for an
    /// unmanaged tag
    pub fn registered(&self, tag: ComponentTag) -> &[EntityKey] {
        self.registry.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The managed tags in update order
    pub fn tag_order(&self) -> &[ComponentTag] {
        &self.tag_order
    }

    /// The scene camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The scene camera, mutably
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The scene's input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// The scene's input manager, mutably
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// The renderable representation of this scene
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The renderable representation, mutably
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// The physics world owned by this scene
    pub fn physics(&self) -> &PhysicsWorld {
        &self.world
    }

    /// The physics world, mutably
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ID)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("entities", &self.entities.len())
            .field("tag_order", &self.tag_order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, ColliderShape, PhysicsComponent};
    use crate::render::{GraphicsComponent, RenderNode};
    use crate::scene::entity::Component;
    use glam::Quat;

    fn physics_box(position: Vec3, mass: f32) -> Component {
        Component::Physics(PhysicsComponent::new(
            ColliderShape::Cuboid {
                half_extents: Vec3::splat(0.5),
            },
            position,
            mass,
            Quat::IDENTITY,
        ))
    }

    fn graphics_box() -> Component {
        Component::Graphics(GraphicsComponent::new(RenderNode::cuboid(Vec3::ONE)))
    }

    #[test]
    fn add_registers_exactly_the_present_tags() {
        let mut scene = Scene::new("test");
        let entity = Entity::with_components([physics_box(Vec3::ZERO, 0.0), graphics_box()]);
        let key = scene.add(entity);

        assert_eq!(scene.registered(ComponentTag::Physics), &[key]);
        assert_eq!(scene.registered(ComponentTag::Graphics), &[key]);
        assert!(scene.registered(ComponentTag::Audio).is_empty());
        assert!(!scene.entity(key).unwrap().is_dirty());

        // Collaborator registration happened as part of add
        assert!(scene.entity(key).unwrap().physics().unwrap().body().is_some());
        assert!(scene.entity(key).unwrap().graphics().unwrap().node_key().is_some());
        assert_eq!(scene.graph().len(), 1);
        assert_eq!(scene.physics().body_count(), 1);
    }

    #[test]
    fn duplicate_component_type_is_rejected() {
        let mut scene = Scene::new("test");
        assert_eq!(scene.tag_order().len(), 3);

        scene.add_component_type(ComponentTag::Physics);

        assert_eq!(scene.tag_order().len(), 3);
        assert_eq!(
            scene.tag_order(),
            &[ComponentTag::Physics, ComponentTag::Graphics, ComponentTag::Audio]
        );
    }

    #[test]
    fn empty_scene_update_steps_physics_exactly_once() {
        let mut scene = Scene::new("empty");
        scene.update(0.016);
        assert_eq!(scene.physics().steps(), 1);
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn physics_pose_reaches_graphics_within_one_update() {
        let mut scene = Scene::new("sync");
        let start = Vec3::new(0.0, 10.0, 0.0);
        let entity = Entity::with_components([physics_box(start, 1.0), graphics_box()]);
        let key = scene.add(entity);

        for _ in 0..30 {
            scene.update(1.0 / 60.0);
        }

        let node_key = scene.entity(key).unwrap().graphics().unwrap().node_key().unwrap();
        let node = scene.graph().node(node_key).unwrap();
        let (body_position, _) = scene
            .physics()
            .body_pose(scene.entity(key).unwrap().physics().unwrap().body().unwrap())
            .unwrap();

        assert!(node.transform.position.y < start.y, "graphics did not follow the fall");
        assert_eq!(node.transform.position, body_position);
    }

    #[test]
    fn post_hoc_attach_is_tracked_but_not_collaborator_registered() {
        let mut scene = Scene::new("asym");
        let key = scene.add(Entity::with_components([physics_box(Vec3::ZERO, 0.0)]));

        scene.entity_mut(key).unwrap().attach(graphics_box());
        assert!(scene.entity(key).unwrap().is_dirty());

        scene.update(1.0 / 60.0);

        // Tracked in the registry...
        assert_eq!(scene.registered(ComponentTag::Graphics), &[key]);
        // ...but never handed to the scene graph
        assert!(scene.entity(key).unwrap().graphics().unwrap().node_key().is_none());
        assert_eq!(scene.graph().len(), 0);

        // The explicit registration step closes the gap
        scene.register_components(key);
        assert!(scene.entity(key).unwrap().graphics().unwrap().node_key().is_some());
        assert_eq!(scene.graph().len(), 1);
    }

    #[test]
    fn detach_drops_the_registry_entry_on_next_update(){
        let mut scene = Scene::new("detach");
        let key = scene.add(Entity::with_components([physics_box(Vec3::ZERO, 0.0), graphics_box()]));

        scene.entity_mut(key).unwrap().detach(ComponentTag::Graphics);
        scene.update(1.0 / 60.0);

        assert!(scene.registered(ComponentTag::Graphics).is_empty());
        assert_eq!(scene.registered(ComponentTag::Physics), &[key]);
        assert!(!scene.entity(key).unwrap().is_dirty());
    }

    #[test]
    fn entities_update_in_insertion_order() {
        let mut scene = Scene::new("order");
        let first = scene.add(Entity::with_components([graphics_box()]));
        let second = scene.add(Entity::with_components([graphics_box()]));

        assert_eq!(scene.entities(), &[first, second]);
        assert_eq!(scene.registered(ComponentTag::Graphics), &[first, second]);
    }

    #[test]
    fn update_entity_with_unknown_key_is_a_logged_noop() {
        let mut scene = Scene::new("stale");
        let key = scene.add(Entity::new());
        let mut other = Scene::new("other");
        let foreign = other.add(Entity::new());
        drop(other);

        // A key minted by another scene may or may not alias; either way the
        // scene must not panic or corrupt its registries
        scene.update_entity(foreign);
        scene.update_entity(key);
        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn lifecycle_gates_input() {
        let mut scene = Scene::new("lifecycle");
        assert!(!scene.input().is_active());
        scene.prepare();
        assert!(scene.input().is_active());
        scene.dispose();
        assert!(!scene.input().is_active());
    }
}
