use std::{collections::BTreeMap, fs, path::Path, str::FromStr};

use glam::Vec3;
use itertools::Itertools;

use crate::{
    de,
    error::{Error, Result},
    plane::Plane,
};

pub const WORLDSPAWN: &str = "worldspawn";

/// A parsed map. By convention the first entity is the worldspawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub entities: Vec<Entity>,
}

impl Map {
    /// Parses map text. Malformed planes are skipped with a warning, so this never fails.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        de::parse_map(input)
    }

    /// # Errors
    ///
    /// Returns `Err` if the file can't be read.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        // editors write Latin-1 into messages and comments
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The first entity, which holds the static level geometry.
    #[must_use]
    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities.first()
    }

    #[must_use]
    pub fn find_entity_by_class(&self, class_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.class_name == class_name)
    }

    pub fn find_entities_by_class<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities
            .iter()
            .filter(move |e| e.class_name == class_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub class_name: String,
    pub properties: BTreeMap<String, String>,
    /// Empty for point entities.
    pub brushes: Vec<Brush>,
}

impl Entity {
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn parse_property<P: FromStr>(&self, key: &str) -> Option<P> {
        self.property(key)?.trim().parse().ok()
    }

    /// Float-formatted values such as `"90.0"` are truncated toward zero.
    /// Returns `default` if the property is missing or not a number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn int_property(&self, key: &str, default: i32) -> i32 {
        self.parse_property(key)
            .or_else(|| {
                self.parse_property::<f32>(key)
                    .filter(|value| value.is_finite())
                    .map(|value| value as i32)
            })
            .unwrap_or(default)
    }

    /// Returns `default` if the property is missing or not a float.
    #[must_use]
    pub fn float_property(&self, key: &str, default: f32) -> f32 {
        self.parse_property(key).unwrap_or(default)
    }

    #[must_use]
    pub fn string_property<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.property(key).unwrap_or(default)
    }

    /// Parses a `"x y z"` property. Returns `default` if the property is missing
    /// or doesn't start with three floats.
    #[must_use]
    pub fn vector3_property(&self, key: &str, default: Vec3) -> Vec3 {
        let Some(value) = self.property(key) else {
            return default;
        };

        match value
            .split_ascii_whitespace()
            .map(str::parse::<f32>)
            .next_tuple()
        {
            Some((Ok(x), Ok(y), Ok(z))) => Vec3::new(x, y, z),
            _ => default,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.vector3_property("origin", Vec3::ZERO)
    }

    #[must_use]
    pub fn is_worldspawn(&self) -> bool {
        self.class_name == WORLDSPAWN
    }

    #[must_use]
    pub fn is_point_entity(&self) -> bool {
        self.brushes.is_empty()
    }
}

/// A convex solid, the intersection of the half-spaces behind its planes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Brush {
    pub planes: Vec<Plane>,
}

impl Brush {
    /// The texture of the first plane, used as the texture of the whole brush.
    #[must_use]
    pub fn texture(&self) -> Option<&str> {
        self.planes.first().map(|plane| plane.texture.as_str())
    }
}
