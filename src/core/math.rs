//=========================================================================
// Math Helpers
//=========================================================================
//
// Small geometry types shared by the collision, object and screen layers.
// Vectors are `nalgebra::Vector2<f32>`; rectangles are integer-aligned
// like the host engine's screen-space rectangles.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use nalgebra::Vector2;

//=== Public API ==========================================================

/// 2D vector used for positions, momentum, origins and vertices.
pub type Vec2 = Vector2<f32>;

/// Shorthand constructor for [`Vec2`].
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Wraps an angle in radians into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let two_pi = 2.0 * PI;
    let mut wrapped = (angle + PI).rem_euclid(two_pi) - PI;
    if wrapped <= -PI {
        wrapped += two_pi;
    }
    wrapped
}

/// Unit vector pointing along `angle`, with zero pointing down the Y axis.
pub fn angle_to_vector(angle: f32) -> Vec2 {
    vec2(-angle.sin(), angle.cos()).normalize()
}

//=== Rect ================================================================

/// Integer axis-aligned rectangle (top-left origin, Y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle from inclusive min and exclusive max corners.
    pub fn from_bounds(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the rectangles overlap with a non-empty area.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// True if the point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() as f32
            && point.x < self.right() as f32
            && point.y >= self.top() as f32
            && point.y < self.bottom() as f32
    }

    /// The four corners in clockwise order starting top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            vec2(self.left() as f32, self.top() as f32),
            vec2(self.right() as f32, self.top() as f32),
            vec2(self.right() as f32, self.bottom() as f32),
            vec2(self.left() as f32, self.bottom() as f32),
        ]
    }
}

//=========================================================================
// Tests
//=========================================================================
