use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use brushwork_geometry::{units::meters, GeometrySettings, Level, Mesh};

/// Build the level geometry of a map and print statistics
#[derive(Parser)]
pub struct Build {
    map_path: PathBuf,
    /// Texture size in texels, used for UV projection
    #[clap(short, long, default_value_t = 64.0)]
    texture_size: f32,
    /// Distance tolerance for vertex merging and clipping, in map units
    #[clap(short, long)]
    epsilon: Option<f32>,
    /// Convert brushes on a single thread
    #[clap(short, long)]
    sequential: bool,
}

pub fn build(opts: &Build) -> anyhow::Result<()> {
    let mut settings = GeometrySettings::new();
    settings.texture_size(opts.texture_size, opts.texture_size);
    settings.parallel(!opts.sequential);
    if let Some(epsilon) = opts.epsilon {
        settings.epsilon(epsilon);
    }
    debug!("{:?}", settings);

    let level = Level::load(&opts.map_path, &settings)
        .with_context(|| format!("could not build `{}`", opts.map_path.display()))?;

    let mut by_texture: BTreeMap<&str, Mesh> = BTreeMap::new();
    for level_mesh in level.meshes() {
        by_texture
            .entry(&level_mesh.texture)
            .or_default()
            .append(&level_mesh.mesh);
    }

    for (texture, mesh) in &by_texture {
        println!(
            "{}: {} triangles, {} vertices",
            texture,
            mesh.triangle_count(),
            mesh.vertices.len()
        );
    }

    if let Some(bounds) = level.bounds() {
        let size = bounds.size();
        println!(
            "bounds: {} to {}, {:.2} x {:.2} x {:.2} m",
            bounds.min,
            bounds.max,
            meters(size.x),
            meters(size.y),
            meters(size.z)
        );
    } else {
        println!("no geometry");
    }

    println!(
        "spawn: {} facing {} degrees",
        level.spawn_position(),
        level.spawn_angle()
    );

    Ok(())
}
