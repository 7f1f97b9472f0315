use glam::{Vec2, Vec3};

use brushwork_map::TextureAlignment;

/// Quake's base texture axes: face normal, u axis, v axis.
/// Floor, ceiling, west, east, south, north.
const BASE_AXES: [[[f32; 3]; 3]; 6] = [
    [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
];

/// The base axis pair of the table entry closest to `normal`. The first entry wins on ties.
fn base_axes(normal: Vec3) -> (Vec3, Vec3) {
    let mut best = BASE_AXES[0];
    let mut best_dot = normal.dot(Vec3::from(best[0]));

    for axes in &BASE_AXES[1..] {
        let dot = normal.dot(Vec3::from(axes[0]));
        if dot > best_dot {
            best = *axes;
            best_dot = dot;
        }
    }

    (Vec3::from(best[1]), Vec3::from(best[2]))
}

/// Sine and cosine of an angle in degrees, exact at multiples of 90.
#[allow(clippy::float_cmp)]
fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let degrees = degrees.rem_euclid(360.0);

    if degrees == 0.0 {
        (0.0, 1.0)
    } else if degrees == 90.0 {
        (1.0, 0.0)
    } else if degrees == 180.0 {
        (0.0, -1.0)
    } else if degrees == 270.0 {
        (-1.0, 0.0)
    } else {
        degrees.to_radians().sin_cos()
    }
}

/// Index of the first non-zero component.
fn major_component(axis: Vec3) -> usize {
    if axis.x != 0.0 {
        0
    } else if axis.y != 0.0 {
        1
    } else {
        2
    }
}

/// World space texture axes of a face, with rotation and scale applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TextureAxes {
    u_axis: Vec3,
    v_axis: Vec3,
    offset: Vec2,
}

impl TextureAxes {
    pub fn new(normal: Vec3, alignment: &TextureAlignment) -> Self {
        let (mut u_axis, mut v_axis) = base_axes(normal);

        let (sin, cos) = sin_cos_degrees(alignment.rotation);
        let s = major_component(u_axis);
        let t = major_component(v_axis);

        for axis in [&mut u_axis, &mut v_axis] {
            let rotated_s = cos * axis[s] - sin * axis[t];
            let rotated_t = sin * axis[s] + cos * axis[t];
            axis[s] = rotated_s;
            axis[t] = rotated_t;
        }

        let scale = |scale: f32| if scale == 0.0 { 1.0 } else { scale };

        Self {
            u_axis: u_axis / scale(alignment.scale.x),
            v_axis: v_axis / scale(alignment.scale.y),
            offset: alignment.offset,
        }
    }

    /// Texture coordinates of a point, in texture repeats.
    pub fn uv(&self, point: Vec3, texture_size: Vec2) -> Vec2 {
        Vec2::new(
            point.dot(self.u_axis) + self.offset.x,
            point.dot(self.v_axis) + self.offset.y,
        ) / texture_size
    }
}
