use std::fmt::{self, Display, Formatter};

use glam::Vec3;

use crate::{
    map::{Brush, Entity, Map},
    plane::Plane,
};

/// Writes a map back to text in the standard format.
/// Parsing the output gives back an equal map, as long as no value contains a double quote.
#[must_use]
pub fn to_string(map: &Map) -> String {
    map.to_string()
}

struct Point(Vec3);

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "( {} {} {} )", self.0.x, self.0.y, self.0.z)
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [p1, p2, p3] = self.points();
        let alignment = &self.alignment;
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            Point(p1),
            Point(p2),
            Point(p3),
            self.texture,
            alignment.offset.x,
            alignment.offset.y,
            alignment.rotation,
            alignment.scale.x,
            alignment.scale.y
        )
    }
}

impl Display for Brush {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for plane in &self.planes {
            writeln!(f, "{}", plane)?;
        }
        writeln!(f, "}}")
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "\"classname\" \"{}\"", self.class_name)?;
        for (key, value) in &self.properties {
            writeln!(f, "\"{}\" \"{}\"", key, value)?;
        }
        for (i, brush) in self.brushes.iter().enumerate() {
            writeln!(f, "// brush {}", i)?;
            write!(f, "{}", brush)?;
        }
        writeln!(f, "}}")
    }
}

impl Display for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, entity) in self.entities.iter().enumerate() {
            writeln!(f, "// entity {}", i)?;
            write!(f, "{}", entity)?;
        }
        Ok(())
    }
}
