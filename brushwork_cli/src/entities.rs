use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;

use brushwork_map::Map;

/// List the entities of a map
#[derive(Parser)]
pub struct Entities {
    map_path: PathBuf,
    /// Only list entities of this class
    #[clap(short, long)]
    class: Option<String>,
}

pub fn entities(opts: &Entities) -> anyhow::Result<()> {
    let map = Map::read(&opts.map_path)
        .with_context(|| format!("could not load `{}`", opts.map_path.display()))?;

    for (i, entity) in map.entities.iter().enumerate() {
        if let Some(class) = &opts.class {
            if &entity.class_name != class {
                continue;
            }
        }

        println!(
            "{}: {} at {}, {} brushes",
            i,
            entity.class_name,
            entity.origin(),
            entity.brushes.len()
        );

        if !entity.properties.is_empty() {
            println!(
                "    {}",
                entity
                    .properties
                    .iter()
                    .map(|(key, value)| format!("{}=\"{}\"", key, value))
                    .join(" ")
            );
        }
    }

    Ok(())
}
