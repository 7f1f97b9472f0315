use std::path::Path;

use glam::{const_vec3, Vec3};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug_span, info, warn};

use brushwork_map::{Brush, Entity, Map};

use crate::{
    aabb::Aabb, brush_builder::convert_brush, builder_utils::GeometrySettings, mesh::Mesh,
};

pub const PLAYER_START: &str = "info_player_start";

/// Used when the map has no player start.
pub const DEFAULT_SPAWN_POSITION: Vec3 = const_vec3!([0.0, 0.0, 32.0]);

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("map has no entities")]
    EmptyMap,
    #[error(transparent)]
    Io(#[from] brushwork_map::Error),
}

/// A worldspawn brush mesh and the texture of the brush.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMesh {
    pub texture: String,
    pub mesh: Mesh,
}

/// The static geometry of a map, along with its entities.
#[derive(Debug, Clone)]
pub struct Level {
    map: Map,
    meshes: Vec<LevelMesh>,
}

fn build_mesh(index: usize, brush: &Brush, settings: &GeometrySettings) -> Option<LevelMesh> {
    let _span = debug_span!("brush", index).entered();

    let mesh = convert_brush(brush, settings);
    if mesh.is_empty() {
        return None;
    }

    Some(LevelMesh {
        texture: brush.texture().unwrap_or_default().to_owned(),
        mesh,
    })
}

impl Level {
    /// Converts the worldspawn brushes of a map.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the map has no entities.
    pub fn build(map: Map, settings: &GeometrySettings) -> Result<Self, LevelError> {
        let worldspawn = map.worldspawn().ok_or(LevelError::EmptyMap)?;

        if !worldspawn.is_worldspawn() {
            warn!(
                "first entity is `{}`, building its brushes as the level geometry",
                worldspawn.class_name
            );
        }

        let brushes = &worldspawn.brushes;
        let meshes: Vec<_> = if settings.parallel {
            brushes
                .par_iter()
                .enumerate()
                .filter_map(|(i, brush)| build_mesh(i, brush, settings))
                .collect()
        } else {
            brushes
                .iter()
                .enumerate()
                .filter_map(|(i, brush)| build_mesh(i, brush, settings))
                .collect()
        };

        info!(
            "built {} of {} worldspawn brushes",
            meshes.len(),
            brushes.len()
        );

        Ok(Self { map, meshes })
    }

    /// Reads a map file and builds it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file can't be read or the map has no entities.
    pub fn load(path: impl AsRef<Path>, settings: &GeometrySettings) -> Result<Self, LevelError> {
        let map = Map::read(path)?;
        Self::build(map, settings)
    }

    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Meshes of the worldspawn brushes, in brush order. Brushes that failed to build are left out.
    #[must_use]
    pub fn meshes(&self) -> &[LevelMesh] {
        &self.meshes
    }

    fn player_start(&self) -> Option<&Entity> {
        self.map.find_entity_by_class(PLAYER_START)
    }

    /// Origin of the first player start.
    #[must_use]
    pub fn spawn_position(&self) -> Vec3 {
        if let Some(start) = self.player_start() {
            start.origin()
        } else {
            warn!(
                "no `{}` entity, spawning at {}",
                PLAYER_START, DEFAULT_SPAWN_POSITION
            );
            DEFAULT_SPAWN_POSITION
        }
    }

    /// Yaw of the first player start in degrees.
    #[must_use]
    pub fn spawn_angle(&self) -> f32 {
        self.player_start()
            .map_or(0.0, |start| start.float_property("angle", 0.0))
    }

    pub fn entities_by_class<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        self.map.find_entities_by_class(class_name)
    }

    /// Bounds of all level geometry, `None` if nothing was built.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        self.meshes
            .iter()
            .filter_map(|level_mesh| level_mesh.mesh.bounds())
            .reduce(Aabb::union)
    }
}
