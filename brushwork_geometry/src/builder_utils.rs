use glam::{Mat3, Vec2, Vec3};

use brushwork_map::Plane;

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct GeometrySettings {
    /// Plane triples whose normal matrix has a smaller determinant are treated as parallel.
    pub determinant_epsilon: f32,
    /// How far outside a plane a solved vertex may lie and still be kept.
    pub cut_threshold: f32,
    /// Vertices closer than this are merged.
    pub merge_distance: f32,
    /// How far from a plane a vertex may lie and still belong to its face.
    pub face_epsilon: f32,
    /// Texture size in texels used for UV projection.
    pub texture_size: Vec2,
    /// Convert brushes on the rayon thread pool.
    pub parallel: bool,
}

impl GeometrySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn determinant_epsilon(&mut self, epsilon: f32) {
        self.determinant_epsilon = epsilon;
    }

    pub fn cut_threshold(&mut self, cut_threshold: f32) {
        self.cut_threshold = cut_threshold;
    }

    pub fn merge_distance(&mut self, merge_distance: f32) {
        self.merge_distance = merge_distance;
    }

    pub fn face_epsilon(&mut self, face_epsilon: f32) {
        self.face_epsilon = face_epsilon;
    }

    /// Sets every distance tolerance at once.
    pub fn epsilon(&mut self, epsilon: f32) {
        self.cut_threshold = epsilon;
        self.merge_distance = epsilon;
        self.face_epsilon = epsilon;
    }

    pub fn texture_size(&mut self, width: f32, height: f32) {
        self.texture_size = Vec2::new(width, height);
    }

    pub fn parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            determinant_epsilon: 1e-4,
            cut_threshold: 0.01,
            merge_distance: 0.01,
            face_epsilon: 0.01,
            texture_size: Vec2::new(64.0, 64.0),
            parallel: true,
        }
    }
}

/// The solid side of a plane, `normal · x <= distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HalfSpace {
    pub normal: Vec3,
    pub distance: f32,
}

impl HalfSpace {
    pub fn from_plane(plane: &Plane) -> Self {
        Self {
            normal: plane.normal(),
            distance: plane.distance(),
        }
    }

    /// Positive in front of the plane, outside the solid.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// Solves the point shared by three planes.
    /// Returns `None` if the planes are (nearly) parallel or the solve isn't finite.
    pub fn intersect(a: &Self, b: &Self, c: &Self, epsilon: f32) -> Option<Vec3> {
        let normals = Mat3::from_cols(a.normal, b.normal, c.normal).transpose();

        if normals.determinant().abs() < epsilon {
            return None;
        }

        let point = normals.inverse() * Vec3::new(a.distance, b.distance, c.distance);
        point.is_finite().then(|| point)
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn polygon_center<I>(polygon: I) -> Vec3
where
    I: Iterator<Item = Vec3> + ExactSizeIterator,
{
    let len = polygon.len() as f32;
    polygon.fold(Vec3::ZERO, |a, b| a + b) / len
}

/// Two unit vectors spanning the plane of `normal`, forming a right handed basis with it.
pub(crate) fn plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    let seed = if normal.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let right = seed.cross(normal).normalize();
    let up = normal.cross(right);
    (right, up)
}

/// Sorts the vertices of a convex polygon counter-clockwise, seen from the side `normal` points to.
pub(crate) fn sort_polygon<T>(polygon: &mut [T], normal: Vec3, get_vert: impl Fn(&T) -> Vec3) {
    if polygon.len() < 3 {
        return;
    }

    let center = polygon_center(polygon.iter().map(&get_vert));
    let (right, up) = plane_basis(normal);
    let angle = |vert: &T| {
        let to_vert = get_vert(vert) - center;
        f32::atan2(to_vert.dot(up), to_vert.dot(right))
    };

    polygon.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
}

/// Signed area of a polygon projected on `normal`, positive for counter-clockwise winding.
#[cfg(test)]
pub(crate) fn polygon_area(polygon: &[Vec3], normal: Vec3) -> f32 {
    use itertools::Itertools;

    polygon
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.cross(*b).dot(normal))
        .sum::<f32>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn half_space(normal: Vec3, distance: f32) -> HalfSpace {
        HalfSpace {
            normal: normal.normalize(),
            distance,
        }
    }

    #[test]
    fn triple_intersection() {
        let point = HalfSpace::intersect(
            &half_space(Vec3::X, 16.0),
            &half_space(Vec3::Y, -8.0),
            &half_space(Vec3::Z, 64.0),
            1e-4,
        )
        .unwrap();

        assert_relative_eq!(point, Vec3::new(16.0, -8.0, 64.0), epsilon = 1e-4);
    }

    #[test]
    fn sloped_intersection_lies_on_planes() {
        let planes = [
            half_space(Vec3::new(1.0, 1.0, 0.0), 32.0),
            half_space(Vec3::new(0.0, 1.0, 1.0), -16.0),
            half_space(Vec3::new(1.0, -2.0, 3.0), 5.0),
        ];

        let point = HalfSpace::intersect(&planes[0], &planes[1], &planes[2], 1e-4).unwrap();

        for plane in &planes {
            assert_relative_eq!(plane.distance_to_point(point), 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn parallel_planes_dont_intersect() {
        assert_eq!(
            HalfSpace::intersect(
                &half_space(Vec3::X, 1.0),
                &half_space(Vec3::X, 2.0),
                &half_space(Vec3::Y, 0.0),
                1e-4,
            ),
            None
        );

        // three planes sharing a line
        assert_eq!(
            HalfSpace::intersect(
                &half_space(Vec3::X, 0.0),
                &half_space(Vec3::Y, 0.0),
                &half_space(Vec3::new(1.0, 1.0, 0.0), 0.0),
                1e-4,
            ),
            None
        );
    }

    #[test]
    fn basis_is_right_handed() {
        for normal in [
            Vec3::X,
            Vec3::Y,
            -Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 2.0, -3.0).normalize(),
        ] {
            let (right, up) = plane_basis(normal);
            assert_relative_eq!(right.length(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(up.length(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(right.cross(up), normal, epsilon = 1e-6);
        }
    }

    #[test]
    fn polygon_sorting() {
        let square = [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];

        for normal in [Vec3::Z, -Vec3::Z] {
            let mut polygon = square;
            sort_polygon(&mut polygon, normal, |&v| v);
            assert_relative_eq!(polygon_area(&polygon, normal), 4.0, epsilon = 1e-5);

            let sorted = polygon;
            sort_polygon(&mut polygon, normal, |&v| v);
            assert_eq!(polygon, sorted);
        }
    }

    #[test]
    fn center() {
        let points = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.0)];
        assert_relative_eq!(
            polygon_center(points.iter().copied()),
            Vec3::new(1.0, 1.0, 0.0)
        );
    }
}
