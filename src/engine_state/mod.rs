//! # Engine State Module
//!
//! The core engine module that owns the voxel world and the body moving through it.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container, advanced once per frame by [`EngineState::tick`]
//! * `config` - Serde-backed configuration for every subsystem
//! * `interaction` - Breaking and placing blocks at the targeted voxel
//! * `physics` - Collision resolution and raycasting against the voxel grid
//! * `rendering` - Mesh extraction and the vertex format handed to a renderer
//! * `voxels` - Block registry, chunks, terrain generation and the streaming world
//!
//! ## Architecture
//!
//! Everything runs on one logical thread. Each tick streams chunks around the body, applies
//! gravity, resolves collisions and refreshes the targeted voxel. Physics and targeting may
//! load chunks synchronously when they read outside the loaded region.

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use log::{debug, info};

use config::{EngineConfig, PhysicsConfig};
use interaction::InteractionError;
use physics::{collide, raycast, BodyShape, RaycastHit};
use voxels::{block::block_type::BlockType, world::World};

pub mod config;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod voxels;

/// A moving box with the state physics carries between frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    /// Center of the bottom face.
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub shape: BodyShape,
    pub is_grounded: bool,
}

impl Body {
    pub fn new(position: Point3<f32>, shape: BodyShape) -> Self {
        Body {
            position,
            velocity: Vector3::zero(),
            shape,
            is_grounded: false,
        }
    }
}

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_world::{EngineConfig, EngineState};
///
/// let mut engine = EngineState::new(&EngineConfig::default());
/// engine.spawn_at_surface(0, 0);
/// for _ in 0..10 {
///     engine.tick(1.0 / 60.0);
/// }
/// assert!(engine.world().chunk_count() > 0);
/// ```
pub struct EngineState {
    world: World,
    body: Body,
    physics: PhysicsConfig,
    /// Normalized direction of the targeting ray.
    look_direction: Vector3<f32>,
    target: Option<RaycastHit>,
    ticks: u64,
}

impl EngineState {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_world(World::from_config(config), config.physics)
    }

    /// Creates an engine around an existing world, with the body at the origin.
    pub fn with_world(world: World, physics: PhysicsConfig) -> Self {
        let shape = BodyShape::new(physics.body_radius, physics.body_height);
        EngineState {
            world,
            body: Body::new(Point3::new(0.0, 0.0, 0.0), shape),
            physics,
            look_direction: Vector3::new(0.0, 0.0, -1.0),
            target: None,
            ticks: 0,
        }
    }

    /// Moves the body, at rest, on top of the column `(x, z)`.
    pub fn spawn_at_surface(&mut self, x: i32, z: i32) {
        let surface = self.world.highest_solid_block(x, z);
        self.body.position = Point3::new(x as f32 + 0.5, surface as f32, z as f32 + 0.5);
        self.body.velocity = Vector3::zero();
        self.body.is_grounded = false;
        info!("Spawned body at {:?}", self.body.position);
    }

    /// Advances the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.world.update(self.body.position);

        self.body.velocity.y -= self.physics.gravity * dt;
        let result = collide(
            &mut self.world,
            &self.body.shape,
            self.body.position,
            self.body.velocity,
            dt,
        );
        if result.is_grounded != self.body.is_grounded {
            debug!(
                "Body {} at {:?}",
                if result.is_grounded { "landed" } else { "left the ground" },
                result.position
            );
        }
        self.body.position = result.position;
        self.body.velocity = result.velocity;
        self.body.is_grounded = result.is_grounded;

        let eye = self.body.position + Vector3::new(0.0, self.physics.eye_height, 0.0);
        self.target = raycast(&mut self.world, eye, self.look_direction, self.physics.reach);
        self.ticks += 1;
    }

    /// Sets the targeting direction. Degenerate directions are ignored.
    pub fn set_look_direction(&mut self, direction: Vector3<f32>) {
        if direction.magnitude2() > f32::EPSILON {
            self.look_direction = direction.normalize();
        }
    }

    /// Sets the horizontal velocity, leaving vertical motion to gravity.
    pub fn set_horizontal_velocity(&mut self, x: f32, z: f32) {
        self.body.velocity.x = x;
        self.body.velocity.z = z;
    }

    /// Starts a jump if the body stands on the ground.
    pub fn jump(&mut self, speed: f32) -> bool {
        if !self.body.is_grounded {
            return false;
        }
        self.body.velocity.y = speed;
        self.body.is_grounded = false;
        true
    }

    /// Breaks the targeted block.
    pub fn break_target(&mut self) -> Result<BlockType, InteractionError> {
        let hit = self.target.ok_or(InteractionError::NoFace)?;
        let broken = interaction::break_block(&mut self.world, &hit)?;
        self.target = None;
        Ok(broken)
    }

    /// Places `block_type` against the targeted face.
    pub fn place_at_target(&mut self, block_type: BlockType) -> Result<Point3<i32>, InteractionError> {
        let hit = self.target.ok_or(InteractionError::NoFace)?;
        interaction::place_block(
            &mut self.world,
            &hit,
            block_type,
            &self.body.shape,
            self.body.position,
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// The voxel under the crosshair after the last tick.
    pub fn target(&self) -> Option<&RaycastHit> {
        self.target.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
