use std::str::FromStr;

use glam::{Vec2, Vec3};

use crate::{error::PlaneError, tokens::Tokens};

/// Fifteen fields: three parenthesized points, a texture name and five alignment numbers.
const PLANE_TOKENS: usize = 21;

/// Below this the cross product of the plane points is considered zero.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Texture alignment of a brush face, in the standard (non-Valve) format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureAlignment {
    /// Texture offset in texels.
    pub offset: Vec2,
    /// Texture rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for TextureAlignment {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// A brush face. The solid lies behind the plane, `normal · x <= distance`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    points: [Vec3; 3],
    normal: Vec3,
    distance: f32,
    pub texture: String,
    pub alignment: TextureAlignment,
}

impl Plane {
    /// Creates a plane from three points in the usual map winding.
    /// The normal is `(p3 - p1) × (p2 - p1)`, which points out of the brush.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the points are collinear.
    pub fn new(
        points: [Vec3; 3],
        texture: impl Into<String>,
        alignment: TextureAlignment,
    ) -> Result<Self, PlaneError> {
        let [p1, p2, p3] = points;
        let normal = (p3 - p1).cross(p2 - p1);

        if !normal.is_finite() || normal.length() < DEGENERATE_EPSILON {
            return Err(PlaneError::Degenerate);
        }

        let normal = normal.normalize();

        Ok(Self {
            points,
            normal,
            distance: normal.dot(p1),
            texture: texture.into(),
            alignment,
        })
    }

    #[must_use]
    pub fn points(&self) -> [Vec3; 3] {
        self.points
    }

    /// Unit normal pointing out of the brush.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance of the plane from the origin along the normal.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl FromStr for Plane {
    type Err = PlaneError;

    /// Parses `( x y z ) ( x y z ) ( x y z ) TEXTURE offX offY rotation scaleX scaleY`.
    /// Any tokens after the scale are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        tokens.require(PLANE_TOKENS)?;

        let points = [
            tokens.point("first point")?,
            tokens.point("second point")?,
            tokens.point("third point")?,
        ];
        let texture = tokens.word()?;
        let offset = Vec2::new(tokens.number("x offset")?, tokens.number("y offset")?);
        let rotation = tokens.number("rotation")?;
        let scale = Vec2::new(tokens.number("x scale")?, tokens.number("y scale")?);

        Self::new(
            points,
            texture,
            TextureAlignment {
                offset,
                rotation,
                scale,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plane_line() {
        let plane: Plane = "( -64 -64 64 ) ( -64 -63 64 ) ( -63 -64 64 ) base/floor 16 -8 90 0.5 2"
            .parse()
            .unwrap();

        assert_eq!(
            plane.points(),
            [
                Vec3::new(-64.0, -64.0, 64.0),
                Vec3::new(-64.0, -63.0, 64.0),
                Vec3::new(-63.0, -64.0, 64.0)
            ]
        );
        assert_eq!(plane.texture, "base/floor");
        assert_eq!(
            plane.alignment,
            TextureAlignment {
                offset: Vec2::new(16.0, -8.0),
                rotation: 90.0,
                scale: Vec2::new(0.5, 2.0),
            }
        );
        assert_relative_eq!(plane.normal(), Vec3::Z, epsilon = 1e-6);
        assert_relative_eq!(plane.distance(), 64.0, epsilon = 1e-4);
    }

    #[test]
    fn outward_normals() {
        let west: Plane = "( -64 -64 -64 ) ( -64 -63 -64 ) ( -64 -64 -63 ) a 0 0 0 1 1"
            .parse()
            .unwrap();
        assert_relative_eq!(west.normal(), -Vec3::X, epsilon = 1e-6);
        assert_relative_eq!(west.distance(), 64.0, epsilon = 1e-4);

        let north: Plane = "( 64 64 64 ) ( 65 64 64 ) ( 64 64 65 ) a 0 0 0 1 1"
            .parse()
            .unwrap();
        assert_relative_eq!(north.normal(), Vec3::Y, epsilon = 1e-6);
        assert_relative_eq!(north.distance(), 64.0, epsilon = 1e-4);
    }

    #[test]
    fn sloped_normal() {
        let plane = Plane::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            "slope",
            TextureAlignment::default(),
        )
        .unwrap();

        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert_relative_eq!(plane.normal(), expected, epsilon = 1e-6);
        assert_relative_eq!(plane.normal().length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(plane.distance(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn quake2_trailing_fields_ignored() {
        let plane: Plane = "( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) e1u1/floor 0 0 0 1 1 0 1 0"
            .parse()
            .unwrap();
        assert_eq!(plane.texture, "e1u1/floor");
    }

    #[test]
    fn too_few_tokens() {
        let result = "( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) tex 0 0".parse::<Plane>();
        assert_eq!(
            result,
            Err(PlaneError::TooFewTokens {
                expected: 21,
                found: 18
            })
        );
    }

    #[test]
    fn collinear_points() {
        let result = "( 0 0 0 ) ( 1 1 1 ) ( 2 2 2 ) tex 0 0 0 1 1".parse::<Plane>();
        assert_eq!(result, Err(PlaneError::Degenerate));
    }

    #[test]
    fn valve_format_rejected() {
        let result = "( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) tex [ 1 0 0 0 ] [ 0 -1 0 0 ] 0 1 1"
            .parse::<Plane>();
        assert!(matches!(
            result,
            Err(PlaneError::InvalidNumber {
                index: 16,
                field: "x offset",
                ..
            })
        ));
    }
}
