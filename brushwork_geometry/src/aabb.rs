use glam::Vec3;

/// Axis-aligned bounding box. Touching boxes count as intersecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        Some(points.fold(Self::new(first, first), |mut aabb, point| {
            aabb.expand(point);
            aabb
        }))
    }

    /// Grows the box to contain `point`.
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-4.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, 8.0),
        ])
        .unwrap();

        assert_eq!(aabb.min, Vec3::new(-4.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 5.0, 8.0));
        assert_eq!(aabb.size(), Vec3::new(5.0, 7.0, 8.0));
        assert_eq!(aabb.center(), Vec3::new(-1.5, 1.5, 4.0));

        assert_eq!(Aabb::from_points([]), None);
    }

    #[test]
    fn center_extents() {
        let aabb = Aabb::from_center_extents(Vec3::new(0.0, 0.0, 32.0), Vec3::new(16.0, 16.0, 32.0));
        assert_eq!(aabb.min, Vec3::new(-16.0, -16.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(16.0, 16.0, 64.0));
    }

    #[test]
    fn intersection() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let inside = Aabb::new(Vec3::splat(0.25), Vec3::splat(0.75));

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(a.intersects(&inside));
        assert!(inside.intersects(&a));
    }

    #[test]
    fn containment() {
        let mut aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(0.5, 0.5, 1.5)));

        aabb.expand(Vec3::new(0.5, 0.5, 1.5));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 1.5)));
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 1.5));

        let union = aabb.union(Aabb::new(-Vec3::ONE, Vec3::ZERO));
        assert_eq!(union, Aabb::new(-Vec3::ONE, Vec3::new(1.0, 1.0, 1.5)));
    }
}
