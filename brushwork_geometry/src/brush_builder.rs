use glam::{Vec2, Vec3};
use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use brushwork_map::{Brush, Plane};

use crate::{
    aabb::Aabb,
    builder_utils::{sort_polygon, GeometrySettings, HalfSpace},
    mesh::{Mesh, Vertex},
    uv::TextureAxes,
};


/// Planes needed to bound a closed solid.
const MIN_PLANES: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrushError {
    #[error("brush has {planes} planes, at least 4 are needed")]
    TooFewPlanes { planes: usize },
    #[error("planes don't enclose any vertices")]
    NoVertices,
    #[error("no face has 3 or more vertices")]
    NoFaces,
}

/// A converted brush before triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltBrush {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<BrushFace>,
}

/// A convex face, with vertices in counter-clockwise order seen from outside the brush.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushFace {
    /// Index of the plane this face lies on, in the source brush.
    pub plane_index: usize,
    pub vertex_indices: Vec<usize>,
    /// One per vertex index.
    pub uvs: Vec<Vec2>,
    pub normal: Vec3,
}

impl BuiltBrush {
    /// Fan-triangulates the faces. Every triangle corner gets its own vertex.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::default();

        for face in &self.faces {
            for i in 1..face.vertex_indices.len().saturating_sub(1) {
                for corner in [0, i, i + 1] {
                    mesh.indices.push(mesh.vertices.len() as u32);
                    mesh.vertices.push(Vertex {
                        position: self.vertices[face.vertex_indices[corner]],
                        normal: face.normal,
                        tex_coord: face.uvs[corner],
                    });
                }
            }
        }

        mesh
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

#[derive(Debug, Clone)]
struct FaceBuilder<'a> {
    plane: &'a Plane,
    plane_index: usize,
    half_space: HalfSpace,
    vertex_indices: Vec<usize>,
    uvs: Vec<Vec2>,
}

impl<'a> FaceBuilder<'a> {
    fn new(plane_index: usize, plane: &'a Plane) -> Self {
        Self {
            plane,
            plane_index,
            half_space: HalfSpace::from_plane(plane),
            vertex_indices: Vec::new(),
            uvs: Vec::new(),
        }
    }

    fn collect_vertices(&mut self, vertices: &[Vec3], epsilon: f32) {
        self.vertex_indices = vertices
            .iter()
            .positions(|&v| self.half_space.distance_to_point(v).abs() < epsilon)
            .collect();
    }

    fn sort_vertices(&mut self, vertices: &[Vec3]) {
        sort_polygon(&mut self.vertex_indices, self.half_space.normal, |&i| {
            vertices[i]
        });
    }

    fn build_uvs(&mut self, vertices: &[Vec3], texture_size: Vec2) {
        let axes = TextureAxes::new(self.half_space.normal, &self.plane.alignment);

        self.uvs = self
            .vertex_indices
            .iter()
            .map(|&i| axes.uv(vertices[i], texture_size))
            .collect();
    }

    fn finish(self) -> BrushFace {
        BrushFace {
            plane_index: self.plane_index,
            vertex_indices: self.vertex_indices,
            uvs: self.uvs,
            normal: self.half_space.normal,
        }
    }
}

#[derive(Debug, Clone)]
struct BrushBuilder<'a> {
    faces: Vec<FaceBuilder<'a>>,
    vertices: Vec<Vec3>,
}

impl<'a> BrushBuilder<'a> {
    fn new(brush: &'a Brush) -> Result<Self, BrushError> {
        if brush.planes.len() < MIN_PLANES {
            return Err(BrushError::TooFewPlanes {
                planes: brush.planes.len(),
            });
        }

        Ok(Self {
            faces: brush
                .planes
                .iter()
                .enumerate()
                .map(|(i, plane)| FaceBuilder::new(i, plane))
                .collect(),
            vertices: Vec::new(),
        })
    }

    /// Solves every plane triple and keeps the points inside the brush.
    fn intersect_planes(&mut self, settings: &GeometrySettings) {
        for (i1, i2, i3) in (0..self.faces.len()).tuple_combinations() {
            let Some(point) = HalfSpace::intersect(
                &self.faces[i1].half_space,
                &self.faces[i2].half_space,
                &self.faces[i3].half_space,
                settings.determinant_epsilon,
            ) else {
                continue;
            };

            // check if the point is outside the brush
            if self
                .faces
                .iter()
                .any(|face| face.half_space.distance_to_point(point) > settings.cut_threshold)
            {
                continue;
            }

            if !self
                .vertices
                .iter()
                .any(|v| v.distance(point) < settings.merge_distance)
            {
                self.vertices.push(point);
            }
        }
    }

    fn collect_face_vertices(&mut self, epsilon: f32) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            face.collect_vertices(vertices, epsilon);
        }
    }

    fn remove_invalid_faces(&mut self) {
        self.faces.retain(|face| face.vertex_indices.len() >= 3);
    }

    fn sort_vertices(&mut self) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            face.sort_vertices(vertices);
        }
    }

    fn build_uvs(&mut self, texture_size: Vec2) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            face.build_uvs(vertices, texture_size);
        }
    }

    fn build(&mut self, settings: &GeometrySettings) -> Result<(), BrushError> {
        self.intersect_planes(settings);
        if self.vertices.is_empty() {
            return Err(BrushError::NoVertices);
        }

        self.collect_face_vertices(settings.face_epsilon);
        self.remove_invalid_faces();
        if self.faces.is_empty() {
            return Err(BrushError::NoFaces);
        }

        self.sort_vertices();
        self.build_uvs(settings.texture_size);

        Ok(())
    }

    fn finish(self) -> BuiltBrush {
        BuiltBrush {
            vertices: self.vertices,
            faces: self.faces.into_iter().map(FaceBuilder::finish).collect(),
        }
    }
}

/// Builds the vertices and sorted faces of a brush.
///
/// # Errors
///
/// Returns `Err` if the brush has fewer than 4 planes or its planes don't enclose a solid.
pub fn build_brush(brush: &Brush, settings: &GeometrySettings) -> Result<BuiltBrush, BrushError> {
    let mut builder = BrushBuilder::new(brush)?;
    builder.build(settings)?;
    Ok(builder.finish())
}

/// # Errors
///
/// Returns `Err` if the brush doesn't describe a solid, see [`build_brush`].
pub fn try_convert_brush(brush: &Brush, settings: &GeometrySettings) -> Result<Mesh, BrushError> {
    let built = build_brush(brush, settings)?;
    let mesh = built.to_mesh();

    debug!(
        "built brush with {} vertices and {} triangles",
        built.vertices.len(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Converts a brush into a triangle mesh.
/// A brush that doesn't describe a solid results in an empty mesh and a warning.
#[must_use]
pub fn convert_brush(brush: &Brush, settings: &GeometrySettings) -> Mesh {
    try_convert_brush(brush, settings).unwrap_or_else(|err| {
        warn!("skipping brush: {}", err);
        Mesh::default()
    })
}

/// Converts brushes in order, leaving out the ones that produce no triangles.
#[must_use]
pub fn convert_brushes(brushes: &[Brush], settings: &GeometrySettings) -> Vec<Mesh> {
    brushes
        .iter()
        .map(|brush| convert_brush(brush, settings))
        .filter(|mesh| !mesh.is_empty())
        .collect()
}

/// Same as [`convert_brushes`], converting on the rayon thread pool.
#[must_use]
pub fn par_convert_brushes(brushes: &[Brush], settings: &GeometrySettings) -> Vec<Mesh> {
    brushes
        .par_iter()
        .map(|brush| convert_brush(brush, settings))
        .filter(|mesh| !mesh.is_empty())
        .collect()
}
