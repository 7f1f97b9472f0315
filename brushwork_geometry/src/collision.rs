use glam::Vec3;

use crate::aabb::Aabb;

/// Below this a ray direction component is treated as parallel to the slab.
const PARALLEL_EPSILON: f32 = 1e-6;

pub const DEFAULT_RAY_DISTANCE: f32 = 1000.0;

/// Minimum translation out of an overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Unit axis pointing from the static box towards the moving one.
    pub normal: Vec3,
    pub penetration: f32,
    /// Center of the overlap region.
    pub contact_point: Vec3,
}

impl CollisionResult {
    /// Translation that separates the moving box.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.normal * self.penetration
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray, zero if the origin is inside the box.
    pub distance: f32,
    pub point: Vec3,
    /// Normal of the box face closest to `point`.
    pub normal: Vec3,
}

#[must_use]
pub fn test_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Separates `moving` from `fixed` along the axis of least overlap.
/// Ties go to the later axis, so equal overlaps resolve vertically.
#[must_use]
pub fn resolve_aabb(moving: &Aabb, fixed: &Aabb) -> Option<CollisionResult> {
    if !moving.intersects(fixed) {
        return None;
    }

    let overlap_min = moving.min.max(fixed.min);
    let overlap_max = moving.max.min(fixed.max);
    let overlap = overlap_max - overlap_min;

    let axis = if overlap.x < overlap.y && overlap.x < overlap.z {
        0
    } else if overlap.y < overlap.z {
        1
    } else {
        2
    };

    let mut normal = Vec3::ZERO;
    normal[axis] = if moving.center()[axis] < fixed.center()[axis] {
        -1.0
    } else {
        1.0
    };

    Some(CollisionResult {
        normal,
        penetration: overlap[axis],
        contact_point: (overlap_min + overlap_max) / 2.0,
    })
}

/// Slab test of a ray against `aabb`. `direction` should be normalized for
/// `distance` to be in map units.
#[must_use]
pub fn raycast_aabb(
    origin: Vec3,
    direction: Vec3,
    aabb: &Aabb,
    max_distance: f32,
) -> Option<RayHit> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;

    for axis in 0..3 {
        if direction[axis].abs() < PARALLEL_EPSILON {
            if origin[axis] < aabb.min[axis] || origin[axis] > aabb.max[axis] {
                return None;
            }
            continue;
        }

        let inv_dir = direction[axis].recip();
        let t1 = (aabb.min[axis] - origin[axis]) * inv_dir;
        let t2 = (aabb.max[axis] - origin[axis]) * inv_dir;

        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));

        if t_min > t_max {
            return None;
        }
    }

    let point = origin + direction * t_min;
    Some(RayHit {
        distance: t_min,
        point,
        normal: closest_face_normal(aabb, point),
    })
}

fn closest_face_normal(aabb: &Aabb, point: Vec3) -> Vec3 {
    [
        ((point.x - aabb.min.x).abs(), -Vec3::X),
        ((point.x - aabb.max.x).abs(), Vec3::X),
        ((point.y - aabb.min.y).abs(), -Vec3::Y),
        ((point.y - aabb.max.y).abs(), Vec3::Y),
        ((point.z - aabb.min.z).abs(), -Vec3::Z),
        ((point.z - aabb.max.z).abs(), Vec3::Z),
    ]
    .into_iter()
    .min_by(|(a, _), (b, _)| a.total_cmp(b))
    .map_or(Vec3::ZERO, |(_, normal)| normal)
}

/// Removes the part of `velocity` along `normal`, leaving motion parallel to the surface.
#[must_use]
pub fn slide_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - normal * velocity.dot(normal)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn overlap_test() {
        let a = unit_box();
        assert!(test_aabb(&a, &Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0))));
        assert!(!test_aabb(&a, &Aabb::new(Vec3::splat(1.5), Vec3::splat(2.0))));
    }

    #[test]
    fn resolve_apart() {
        let moving = Aabb::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0));
        assert_eq!(resolve_aabb(&moving, &unit_box()), None);
    }

    #[test]
    fn resolve_smallest_axis() {
        // player box sinking 0.25 into a floor slab
        let floor = Aabb::new(Vec3::new(-64.0, -64.0, -16.0), Vec3::new(64.0, 64.0, 0.0));
        let player =
            Aabb::from_center_extents(Vec3::new(0.0, 0.0, 15.75), Vec3::splat(16.0));

        let result = resolve_aabb(&player, &floor).unwrap();
        assert_eq!(result.normal, Vec3::Z);
        assert_relative_eq!(result.penetration, 0.25);
        assert_relative_eq!(result.translation(), Vec3::new(0.0, 0.0, 0.25));
        assert_relative_eq!(result.contact_point, Vec3::new(0.0, 0.0, -0.125));

        // pushed into a wall from the positive side of x
        let wall = Aabb::new(Vec3::new(-8.0, -64.0, 0.0), Vec3::new(8.0, 64.0, 128.0));
        let player =
            Aabb::from_center_extents(Vec3::new(22.0, 0.0, 32.0), Vec3::new(16.0, 16.0, 32.0));

        let result = resolve_aabb(&player, &wall).unwrap();
        assert_eq!(result.normal, Vec3::X);
        assert_relative_eq!(result.penetration, 2.0);

        let shift = Vec3::X * 44.0;
        let moved = Aabb::new(player.min - shift, player.max - shift);
        let result = resolve_aabb(&moved, &wall).unwrap();
        assert_eq!(result.normal, -Vec3::X);
        assert_relative_eq!(result.penetration, 2.0);
    }

    #[test]
    fn resolve_ties_prefer_z() {
        let moving = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let result = resolve_aabb(&moving, &unit_box()).unwrap();
        assert_eq!(result.normal, Vec3::Z);
        assert_relative_eq!(result.penetration, 0.5);
    }

    #[test]
    fn ray_hit() {
        let aabb = Aabb::new(Vec3::new(10.0, -1.0, -1.0), Vec3::new(12.0, 1.0, 1.0));

        let hit = raycast_aabb(Vec3::ZERO, Vec3::X, &aabb, DEFAULT_RAY_DISTANCE).unwrap();
        assert_relative_eq!(hit.distance, 10.0);
        assert_relative_eq!(hit.point, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(hit.normal, -Vec3::X);

        let down = raycast_aabb(Vec3::new(11.0, 0.0, 5.0), -Vec3::Z, &aabb, 100.0)
            .unwrap();
        assert_relative_eq!(down.distance, 4.0);
        assert_eq!(down.normal, Vec3::Z);
    }

    #[test]
    fn ray_from_inside() {
        let hit = raycast_aabb(Vec3::splat(0.5), Vec3::Y, &unit_box(), 10.0).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.point, Vec3::splat(0.5));
    }

    #[test]
    fn ray_miss() {
        let aabb = Aabb::new(Vec3::new(10.0, -1.0, -1.0), Vec3::new(12.0, 1.0, 1.0));

        // wrong direction
        assert_eq!(raycast_aabb(Vec3::ZERO, -Vec3::X, &aabb, 100.0), None);
        // parallel and outside the y slab
        assert_eq!(
            raycast_aabb(Vec3::new(0.0, 5.0, 0.0), Vec3::X, &aabb, 100.0),
            None
        );
        // out of range
        assert_eq!(raycast_aabb(Vec3::ZERO, Vec3::X, &aabb, 5.0), None);
    }

    #[test]
    fn sliding() {
        let velocity = Vec3::new(3.0, 4.0, -2.0);

        assert_relative_eq!(
            slide_velocity(velocity, Vec3::Z),
            Vec3::new(3.0, 4.0, 0.0)
        );
        assert_relative_eq!(
            slide_velocity(velocity, -Vec3::X),
            Vec3::new(0.0, 4.0, -2.0)
        );

        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let slid = slide_velocity(Vec3::new(-1.0, 0.0, 0.0), normal);
        assert_relative_eq!(slid.dot(normal), 0.0, epsilon = 1e-6);
        assert_relative_eq!(slid, Vec3::new(-0.5, 0.5, 0.0), epsilon = 1e-6);
    }
}
