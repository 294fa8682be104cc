#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The world core of a block-based sandbox: chunked voxel storage, streamed chunk
//! loading and unloading, procedural terrain, surface mesh extraction with face culling and
//! ambient occlusion, axis-separated collision, and voxel raycasting.
//!
//! ## Key Modules
//!
//! * `engine_state::voxels` - Block registry, chunks, generators and the streaming `World`
//! * `engine_state::rendering` - Mesh extraction into GPU-ready vertex and index buffers
//! * `engine_state::physics` - Collision resolution and raycasting
//! * `engine_state::config` - JSON configuration
//!
//! ## Architecture
//!
//! The crate has no window or GPU dependency. A renderer consumes [`ChunkGeometry`] buffers
//! from loaded chunks; an input layer drives an [`EngineState`] one tick at a time. The
//! bundled binary is a headless driver that does exactly that and logs what happens.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{EngineConfig, World};
//!
//! let mut world = World::from_config(&EngineConfig::default());
//! for _ in 0..8 {
//!     world.update(Point3::new(0.0, 20.0, 0.0));
//! }
//! let surface = world.highest_solid_block(0, 0);
//! assert!(surface > 0);
//! ```

use std::env;

use log::info;
use web_time::Instant;

pub mod engine_state;

pub use engine_state::config::{ConfigError, EngineConfig};
pub use engine_state::physics::{collide, raycast, BodyShape, CollisionResult, RaycastHit};
pub use engine_state::rendering::{AtlasLayout, ChunkGeometry, MeshExtractor, Vertex};
pub use engine_state::voxels::block::{block_type::BlockType, lookup, BlockDefinition};
pub use engine_state::voxels::chunk::{Chunk, ChunkKey, CHUNK_DIMENSION};
pub use engine_state::voxels::generation::{ChunkGenerator, GenerationMethod};
pub use engine_state::voxels::{world::World, VoxelAccess};
pub use engine_state::EngineState;

/// Runs the headless driver.
///
/// The first command line argument, if any, names a JSON config file. The driver spawns a
/// body on the terrain surface at the origin, ticks the engine for the configured number of
/// frames and logs streaming statistics along the way.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    let mut engine = EngineState::new(&config);
    engine.spawn_at_surface(0, 0);

    let dt = 1.0 / config.driver.ticks_per_second as f32;
    let report_every = config.driver.ticks_per_second.max(1);
    let start = Instant::now();

    for tick in 1..=config.driver.ticks {
        engine.tick(dt);
        if tick % report_every == 0 {
            let world = engine.world();
            info!(
                "Tick {}: {} chunks loaded, {} queued, {} to mesh, body at {:?}",
                tick,
                world.chunk_count(),
                world.pending_loads(),
                world.pending_meshes(),
                engine.body().position
            );
        }
    }

    let world = engine.world();
    let (quads, bytes) = world.chunks().fold((0, 0), |(quads, bytes), chunk| {
        let geometry = chunk.geometry();
        (
            quads + geometry.quad_count(),
            bytes + geometry.vertex_bytes().len() + geometry.index_bytes().len(),
        )
    });
    info!(
        "Ran {} ticks in {:?}: {} chunks, {} quads, {} bytes of geometry, idle: {}",
        engine.ticks(),
        start.elapsed(),
        world.chunk_count(),
        quads,
        bytes,
        world.is_idle()
    );
    Ok(())
}
