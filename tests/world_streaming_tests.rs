use std::collections::HashSet;

use cgmath::Point3;
use voxel_world::engine_state::config::WorldConfig;
use voxel_world::engine_state::voxels::generation::{EmptyGenerator, TerrainGenerator};
use voxel_world::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn world(generator: Box<dyn ChunkGenerator>, render_distance: i32, render_distance_y: i32) -> World {
    let config = WorldConfig {
        render_distance,
        render_distance_y,
        ..WorldConfig::default()
    };
    World::new(config, generator, AtlasLayout::default())
}

fn required_box(center: ChunkKey, horizontal: i32, vertical: i32) -> HashSet<ChunkKey> {
    let mut keys = HashSet::new();
    for x in -horizontal..=horizontal {
        for y in -vertical..=vertical {
            for z in -horizontal..=horizontal {
                keys.insert(Point3::new(center.x + x, center.y + y, center.z + z));
            }
        }
    }
    keys
}

/// Updates until both queues drain, returning how many updates it took.
fn settle(world: &mut World, reference: Point3<f32>) -> usize {
    for updates in 1..=10_000 {
        world.update(reference);
        if world.is_idle() {
            return updates;
        }
    }
    panic!("world never became idle");
}

#[test]
fn stationary_reference_converges_to_the_required_box() {
    init_logging();
    let mut world = world(Box::new(TerrainGenerator::new(12)), 2, 1);
    let reference = Point3::new(8.0, 20.0, 8.0);

    settle(&mut world, reference);

    let loaded: HashSet<ChunkKey> = world.chunk_keys().collect();
    assert_eq!(loaded, required_box(Point3::new(0, 1, 0), 2, 1));

    // No further loads or unloads once converged.
    for _ in 0..10 {
        world.update(reference);
        assert!(world.is_idle());
        assert_eq!(world.chunk_keys().collect::<HashSet<_>>(), loaded);
    }
}

#[test]
fn converged_terrain_has_geometry() {
    init_logging();
    let mut world = world(Box::new(TerrainGenerator::new(3)), 1, 1);
    settle(&mut world, Point3::new(8.0, 8.0, 8.0));

    let surface_chunk = world.chunk(Point3::new(0, 0, 0)).expect("center chunk loaded");
    let geometry = surface_chunk.geometry();
    assert!(!geometry.is_empty());
    assert_eq!(geometry.indices.len() % 6, 0);
    assert!(geometry
        .indices
        .iter()
        .all(|&index| (index as usize) < geometry.vertices.len()));
    assert!(geometry
        .vertices
        .iter()
        .all(|vertex| (0.4..=1.0).contains(&vertex.shade())));
}

#[test]
fn loads_proceed_nearest_first() {
    init_logging();
    let mut world = world(Box::new(EmptyGenerator), 2, 0);
    let center = Point3::new(0, 0, 0);
    let mut previous = 0;

    for _ in 0..25 {
        let before: HashSet<ChunkKey> = world.chunk_keys().collect();
        world.update(Point3::new(8.0, 8.0, 8.0));
        let added: Vec<ChunkKey> = world
            .chunk_keys()
            .filter(|key| !before.contains(key))
            .collect();
        assert_eq!(added.len(), 1);

        let key = added[0];
        let distance = (key.x - center.x).pow(2) + (key.z - center.z).pow(2);
        assert!(distance >= previous);
        previous = distance;
    }
    assert_eq!(world.pending_loads(), 0);
}

#[test]
fn moving_reference_unloads_what_it_leaves_behind() {
    init_logging();
    let mut world = world(Box::new(EmptyGenerator), 1, 1);
    settle(&mut world, Point3::new(8.0, 8.0, 8.0));

    let far = Point3::new(8.0 + 16.0 * 5.0, 8.0, 8.0);
    settle(&mut world, far);

    let loaded: HashSet<ChunkKey> = world.chunk_keys().collect();
    assert_eq!(loaded, required_box(Point3::new(5, 0, 0), 1, 1));
}

#[test]
fn edits_round_trip_and_remesh() {
    init_logging();
    let mut world = world(Box::new(EmptyGenerator), 1, 1);
    settle(&mut world, Point3::new(8.0, 8.0, 8.0));

    assert!(world.set_voxel(-1, 7, 30, BlockType::BRICKS));
    assert_eq!(world.get_voxel(-1, 7, 30), BlockType::BRICKS);
    assert!(world.pending_meshes() > 0);

    settle(&mut world, Point3::new(8.0, 8.0, 8.0));
    let chunk = world.chunk(Point3::new(-1, 0, 1)).unwrap();
    assert_eq!(chunk.geometry().quad_count(), 6);
}

#[test]
fn regenerated_chunks_are_identical() {
    init_logging();
    let mut world = world(Box::new(TerrainGenerator::new(77)), 0, 0);
    world.update(Point3::new(8.0, 8.0, 8.0));
    let first = world.chunk(Point3::new(0, 0, 0)).unwrap().voxels().to_vec();

    // Walk away so the chunk unloads, then come back.
    settle(&mut world, Point3::new(8.0 + 16.0 * 3.0, 8.0, 8.0));
    assert!(!world.is_loaded(Point3::new(0, 0, 0)));
    settle(&mut world, Point3::new(8.0, 8.0, 8.0));

    let second = world.chunk(Point3::new(0, 0, 0)).unwrap().voxels().to_vec();
    assert_eq!(first, second);
}
