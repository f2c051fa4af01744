//! Physics world built on rapier3d

use glam::{Quat, Vec3};
use nalgebra::UnitQuaternion;
use rapier3d::prelude::*;

/// Handle to a rigid body in a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub rapier3d::dynamics::RigidBodyHandle);

/// Collision shape of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Box with the given half extents
    Cuboid {
        /// Half extents on each axis
        half_extents: Vec3,
    },
    /// Sphere with the given radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Capsule aligned with the Y axis
    Capsule {
        /// Half the length of the cylindrical section
        half_height: f32,
        /// Capsule radius
        radius: f32,
    },
}

/// Everything needed to create a body.
///
/// A mass of zero makes the body fixed; any positive mass makes it dynamic
/// with sleeping disabled, so it keeps reporting poses while resting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// Initial position
    pub position: Vec3,
    /// Mass in kilograms; zero means fixed
    pub mass: f32,
    /// Initial rotation
    pub rotation: Quat,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::Cuboid {
                half_extents: Vec3::splat(0.5),
            },
            position: Vec3::ZERO,
            mass: 0.0,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Convert a glam quaternion to a rapier unit quaternion
fn quat_to_rapier(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}

/// Convert a rapier unit quaternion to a glam quaternion
fn rapier_to_quat(uq: &UnitQuaternion<f32>) -> Quat {
    let q = uq.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// The physics world owned by a scene.
///
/// One world per scene, never shared. Stepping uses a fixed sub-step policy
/// so large frame deltas do not destabilize the solver.
pub struct PhysicsWorld {
    gravity: Vec3,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    integration_parameters: IntegrationParameters,
    steps: u64,
}

impl PhysicsWorld {
    /// Target duration of one sub-step
    const FIXED_DT: f32 = 1.0 / 60.0;
    /// Upper bound on sub-steps per frame
    const MAX_SUBSTEPS: u32 = 10;

    /// Create a world with standard downward gravity
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.8, 0.0))
    }

    /// Create a world with custom gravity
    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
            steps: 0,
        }
    }

    /// Advance the simulation by `delta_time` seconds.
    ///
    /// The delta is split into up to [`Self::MAX_SUBSTEPS`] equal sub-steps
    /// no longer than [`Self::FIXED_DT`] each; a longer frame loses
    /// simulation time rather than exploding.
    pub fn step(&mut self, delta_time: f32) {
        self.steps += 1;
        if delta_time <= 0.0 {
            return;
        }

        let substeps = ((delta_time / Self::FIXED_DT).ceil() as u32).clamp(1, Self::MAX_SUBSTEPS);
        self.integration_parameters.dt =
            (delta_time / substeps as f32).min(Self::FIXED_DT);

        for _ in 0..substeps {
            self.pipeline.step(
                &vector![self.gravity.x, self.gravity.y, self.gravity.z],
                &self.integration_parameters,
                &mut self.island_manager,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(),
                &(),
            );
        }
    }

    /// Number of `step` calls so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Create a body and its collider from a description
    pub fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let isometry = Isometry::from_parts(
            nalgebra::Translation3::new(desc.position.x, desc.position.y, desc.position.z),
            quat_to_rapier(desc.rotation),
        );

        let builder = if desc.mass > 0.0 {
            RigidBodyBuilder::dynamic().can_sleep(false)
        } else {
            RigidBodyBuilder::fixed()
        };
        let handle = self.bodies.insert(builder.position(isometry).build());

        let collider = match desc.shape {
            ColliderShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ColliderShape::Sphere { radius } => ColliderBuilder::ball(radius),
            ColliderShape::Capsule {
                half_height,
                radius,
            } => ColliderBuilder::capsule_y(half_height, radius),
        };
        let collider = if desc.mass > 0.0 {
            collider.mass(desc.mass)
        } else {
            collider
        };
        self.colliders
            .insert_with_parent(collider.build(), handle, &mut self.bodies);

        BodyHandle(handle)
    }

    /// Remove a body and its colliders
    pub fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(
            body.0,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Whether a handle still refers to a live body
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains(body.0)
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Read a body's world-space pose
    pub fn body_pose(&self, body: BodyHandle) -> Option<(Vec3, Quat)> {
        self.bodies.get(body.0).map(|rb| {
            let translation = rb.translation();
            (
                Vec3::new(translation.x, translation.y, translation.z),
                rapier_to_quat(rb.rotation()),
            )
        })
    }

    /// Apply a force to a dynamic body, waking it if needed
    pub fn apply_force(&mut self, body: BodyHandle, force: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.add_force(vector![force.x, force.y, force.z], true);
        }
    }

    /// Apply an impulse to a dynamic body, waking it if needed
    pub fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.0) {
            rb.apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity)
            .field("bodies", &self.bodies.len())
            .field("steps", &self.steps)
            .finish()
    }
}
