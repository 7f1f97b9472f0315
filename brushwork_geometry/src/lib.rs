#![warn(clippy::all, clippy::pedantic)]
#![cfg_attr(test, allow(clippy::float_cmp))]

mod aabb;
mod brush_builder;
mod builder_utils;
mod collision;
mod level;
mod mesh;
pub mod units;
mod uv;

pub use aabb::Aabb;
pub use brush_builder::{
    build_brush, convert_brush, convert_brushes, par_convert_brushes, try_convert_brush,
    BrushError, BrushFace, BuiltBrush,
};
pub use builder_utils::GeometrySettings;
pub use collision::{
    raycast_aabb, resolve_aabb, slide_velocity, test_aabb, CollisionResult, RayHit,
    DEFAULT_RAY_DISTANCE,
};
pub use level::{Level, LevelError, LevelMesh, DEFAULT_SPAWN_POSITION, PLAYER_START};
pub use mesh::{Mesh, Vertex};
