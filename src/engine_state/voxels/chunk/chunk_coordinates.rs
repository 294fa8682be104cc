//! # Chunk Coordinates
//!
//! Conversions between world voxel coordinates, chunk coordinates and chunk-local
//! coordinates. For any world coordinate `w`, `chunk_of(w) * CHUNK_DIMENSION + local_of(w) == w`
//! and `local_of(w)` lies in `0..CHUNK_DIMENSION`, including for negative `w`.

use cgmath::Point3;

use super::CHUNK_DIMENSION;

/// Canonical key of a chunk: its integer chunk coordinate.
pub type ChunkKey = Point3<i32>;

/// The chunk coordinate containing world coordinate `w` along one axis.
#[inline]
pub fn chunk_of(w: i32) -> i32 {
    w.div_euclid(CHUNK_DIMENSION)
}

/// The chunk-local coordinate of world coordinate `w` along one axis.
#[inline]
pub fn local_of(w: i32) -> i32 {
    w.rem_euclid(CHUNK_DIMENSION)
}

/// The key of the chunk holding world voxel `(x, y, z)`.
pub fn chunk_key_of(x: i32, y: i32, z: i32) -> ChunkKey {
    Point3::new(chunk_of(x), chunk_of(y), chunk_of(z))
}

/// The key of the chunk holding a continuous world-space point.
pub fn chunk_key_at(position: Point3<f32>) -> ChunkKey {
    chunk_key_of(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Splits a world voxel coordinate into its chunk key and in-chunk position.
pub fn split_world(x: i32, y: i32, z: i32) -> (ChunkKey, Point3<usize>) {
    (
        chunk_key_of(x, y, z),
        Point3::new(local_of(x) as usize, local_of(y) as usize, local_of(z) as usize),
    )
}

/// The world coordinate of a chunk's `(0, 0, 0)` voxel.
pub fn chunk_origin(key: ChunkKey) -> Point3<i32> {
    Point3::new(
        key.x * CHUNK_DIMENSION,
        key.y * CHUNK_DIMENSION,
        key.z * CHUNK_DIMENSION,
    )
}

/// The six face-adjacent chunk keys.
pub fn face_neighbors(key: ChunkKey) -> [ChunkKey; 6] {
    [
        Point3::new(key.x + 1, key.y, key.z),
        Point3::new(key.x - 1, key.y, key.z),
        Point3::new(key.x, key.y + 1, key.z),
        Point3::new(key.x, key.y - 1, key.z),
        Point3::new(key.x, key.y, key.z + 1),
        Point3::new(key.x, key.y, key.z - 1),
    ]
}

/// Squared Euclidean distance between two chunk keys.
pub fn distance_squared(a: ChunkKey, b: ChunkKey) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    let dz = (a.z - b.z) as i64;
    dx * dx + dy * dy + dz * dz
}
