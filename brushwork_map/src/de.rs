use std::path::Path;

use tracing::{error, info, warn};

use crate::{
    map::{Brush, Entity, Map, WORLDSPAWN},
    parsers::{split_blocks, strip_comments, take_nested_block, tokenize, unquote},
    plane::Plane,
};

/// Parses map text. See [`Map::parse`].
#[must_use]
pub fn from_str(input: &str) -> Map {
    Map::parse(input)
}

/// Loads a map file. A missing or unreadable file results in an empty map,
/// which the caller should treat as a failed load.
pub fn load_from_file(path: impl AsRef<Path>) -> Map {
    let path = path.as_ref();
    info!("loading map file `{}`", path.display());

    match Map::read(path) {
        Ok(map) => map,
        Err(err) => {
            error!("{}", err);
            Map::default()
        }
    }
}

pub(crate) fn parse_map(input: &str) -> Map {
    let content = strip_comments(input);
    let blocks = split_blocks(&content);

    info!("found {} entities", blocks.len());

    let map = Map {
        entities: blocks.into_iter().map(parse_entity).collect(),
    };

    if let Some(worldspawn) = map.worldspawn() {
        if worldspawn.class_name != WORLDSPAWN {
            warn!(
                "first entity is `{}`, expected `{}`",
                worldspawn.class_name, WORLDSPAWN
            );
        }
        info!("worldspawn has {} brushes", worldspawn.brushes.len());
    }

    map
}

fn parse_entity(block: &str) -> Entity {
    let mut entity = Entity::default();
    let mut lines = block.lines();

    while let Some(line) = lines.next() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix('{') {
            let brush_lines = take_nested_block(rest, &mut lines);
            entity.brushes.push(parse_brush(brush_lines));
        } else if line.starts_with('"') {
            parse_property(line, &mut entity);
        }
    }

    entity
}

fn parse_property(line: &str, entity: &mut Entity) {
    let tokens = tokenize(line);

    let [key, value, ..] = tokens.as_slice() else {
        warn!("ignoring property line without a value: {}", line);
        return;
    };

    let key = unquote(key);
    let value = unquote(value).to_owned();

    if key == "classname" {
        entity.class_name = value;
    } else {
        entity.properties.insert(key.to_owned(), value);
    }
}

fn parse_brush<'a>(lines: impl IntoIterator<Item = &'a str>) -> Brush {
    let mut planes = Vec::new();

    for line in lines {
        let line = line.trim();
        if !line.starts_with('(') {
            continue;
        }

        match line.parse::<Plane>() {
            Ok(plane) => planes.push(plane),
            Err(err) => warn!("skipping invalid plane `{}`: {}", line, err),
        }
    }

    Brush { planes }
}
