//=========================================================================
// Path Follower
//=========================================================================
//
// Moves a point along a polyline at constant speed.
//
// Speed is in world units per millisecond. Reaching the last point stops
// the path there; it does not loop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec2;

//=== Path ================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vec2>,

    /// Units per millisecond.
    pub speed: f32,

    /// Added to every reported position.
    pub offset: Vec2,

    segment: usize,
    travelled: f32,
    position: Vec2,
    direction: Vec2,
    running: bool,
}

impl Path {
    pub fn new(points: Vec<Vec2>, speed: f32) -> Self {
        Self {
            points,
            speed,
            offset: Vec2::zeros(),
            segment: 0,
            travelled: 0.0,
            position: Vec2::zeros(),
            direction: Vec2::zeros(),
            running: false,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current interpolated position, offset applied.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unit direction of the segment being travelled.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// True once the last point has been reached.
    pub fn is_finished(&self) -> bool {
        !self.points.is_empty() && self.segment + 1 >= self.points.len()
    }

    //--- Control ----------------------------------------------------------

    /// Rewinds to the first point and starts moving.
    pub fn start(&mut self) {
        self.segment = 0;
        self.travelled = 0.0;
        if let Some(first) = self.points.first() {
            self.position = self.offset + first;
        }
        if let [a, b, ..] = self.points.as_slice() {
            self.direction = (b - a).try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros);
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advances by `elapsed_ms` worth of travel.
    pub fn update(&mut self, elapsed_ms: f32) {
        if !self.running || self.points.len() < 2 || self.is_finished() {
            return;
        }

        self.travelled += self.speed * elapsed_ms;

        let mut a = self.points[self.segment];
        let mut b = self.points[self.segment + 1];
        let mut length = (b - a).norm();

        while self.travelled > length {
            self.travelled -= length;
            self.segment += 1;

            if self.is_finished() {
                self.position = self.offset + self.points[self.segment];
                self.running = false;
                return;
            }

            a = self.points[self.segment];
            b = self.points[self.segment + 1];
            length = (b - a).norm();
        }

        let delta = b - a;
        let t = if length > 0.0 { self.travelled / length } else { 0.0 };
        self.position = self.offset + a + delta * t;
        self.direction = delta.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros);
    }
}

//=========================================================================
// Tests
//=========================================================================
