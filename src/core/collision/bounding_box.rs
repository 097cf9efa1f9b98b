//=========================================================================
// Bounding Box
//=========================================================================
//
// Oriented quad derived from a local rectangle, plus the axis-aligned
// "lo-fi" rectangle that covers it.
//
// Pipeline per refresh:
//   local rect → translate(-origin) → scale → rotate(angle) → translate(position)
//              → lo-fi rect (min/max of vertices, 1 unit margin per side)
//
// Refreshes are memoized on (angle, position, scale). Objects that have
// not moved since the last frame cost nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::Rotation2;

//=== Internal Dependencies ===============================================

use super::CollisionMode;
use crate::core::math::{wrap_angle, Rect, Vec2};
use crate::core::object::{Object2D, ObjectKind};

//=== Contact =============================================================

/// The first pair of boxes found overlapping between two objects.
///
/// Indices point into each object's `bounding_boxes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub source: usize,
    pub target: usize,
}

//=== BoundingBox =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    identifier: i32,
    rect: Rect,
    origin: Vec2,
    vertices: [Vec2; 4],
    radius: f32,
    lofi: Rect,

    /// Inputs of the last refresh, `None` until the first one.
    applied: Option<(f32, Vec2, f32)>,
}

impl BoundingBox {
    /// Creates a box from `rect` in object-local space (scale 1).
    ///
    /// `origin` is the local pivot for rotation; it should match the
    /// object's own origin so the box turns with the sprite.
    pub fn new(rect: Rect, origin: Vec2, identifier: i32) -> Self {
        let vertices = rect.corners();
        let radius = vertices
            .iter()
            .map(|v| (v - origin).norm())
            .fold(0.0_f32, f32::max);

        let mut bbox = Self {
            identifier,
            rect,
            origin,
            vertices,
            radius,
            lofi: Rect::default(),
            applied: None,
        };
        bbox.refresh_lofi();
        bbox
    }

    //--- Accessors --------------------------------------------------------

    /// Caller-chosen tag, used to tell boxes of one object apart in hit callbacks.
    pub fn identifier(&self) -> i32 {
        self.identifier
    }

    /// The untransformed local rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World-space vertices, clockwise from the local top-left corner.
    pub fn vertices(&self) -> &[Vec2; 4] {
        &self.vertices
    }

    /// Distance from the origin to the farthest unrotated corner.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Axis-aligned rectangle used by the broad phase.
    pub fn lofi_rect(&self) -> Rect {
        self.lofi
    }

    /// World position the box was last placed at.
    pub fn position(&self) -> Vec2 {
        self.applied.map(|(_, p, _)| p).unwrap_or_else(Vec2::zeros)
    }

    //--- Update -----------------------------------------------------------

    /// Places the box in world space. No-op if nothing changed.
    pub fn update(&mut self, angle: f32, position: Vec2, scale: f32) {
        if self.applied == Some((angle, position, scale)) {
            return;
        }
        self.applied = Some((angle, position, scale));

        let corners = self.rect.corners();
        let rotate = wrap_angle(angle) != 0.0;
        let rotation = Rotation2::new(angle);

        for (vertex, corner) in self.vertices.iter_mut().zip(corners) {
            let mut local = (corner - self.origin) * scale;
            if rotate {
                local = rotation * local;
            }
            *vertex = local + position;
        }

        self.refresh_lofi();
    }

    fn refresh_lofi(&mut self) {
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for v in &self.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        // Integer truncation can drop a sliver; pad a unit on every side.
        self.lofi = Rect::from_bounds(
            min_x as i32 - 1,
            min_y as i32 - 1,
            max_x as i32 + 1,
            max_y as i32 + 1,
        );
    }

    /// Unit edge directions `v1 - v0` and `v2 - v1`.
    fn axes(&self) -> [Vec2; 2] {
        let a = self.vertices[1] - self.vertices[0];
        let b = self.vertices[2] - self.vertices[1];
        [
            a.try_normalize(f32::EPSILON).unwrap_or(a),
            b.try_normalize(f32::EPSILON).unwrap_or(b),
        ]
    }

    //=====================================================================
    // Tests between boxes
    //=====================================================================

    /// Broad phase: the lo-fi rectangles overlap.
    pub fn test_broad(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.lofi.intersects(&b.lofi)
    }

    /// Narrow phase: Separating Axis Theorem over both boxes' edge axes.
    pub fn test_narrow(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.axes()
            .into_iter()
            .chain(b.axes())
            .all(|axis| projections_overlap(axis, &a.vertices, &b.vertices))
    }

    /// Broad phase first; SAT only when `lofi_only` is false.
    pub fn test(a: &BoundingBox, b: &BoundingBox, lofi_only: bool) -> bool {
        if !Self::test_broad(a, b) {
            return false;
        }
        lofi_only || Self::test_narrow(a, b)
    }

    /// True on the first colliding pair between two box lists.
    pub fn test_all(boxes_a: &[BoundingBox], boxes_b: &[BoundingBox], lofi_only: bool) -> bool {
        Self::first_hit(boxes_a, boxes_b, lofi_only).is_some()
    }

    fn first_hit(boxes_a: &[BoundingBox], boxes_b: &[BoundingBox], lofi_only: bool) -> Option<Contact> {
        boxes_a.iter().enumerate().find_map(|(source, a)| {
            boxes_b
                .iter()
                .position(|b| Self::test(a, b, lofi_only))
                .map(|target| Contact { source, target })
        })
    }

    //=====================================================================
    // Tests between objects
    //=====================================================================

    /// Tests two objects' box lists, choosing SAT only if both objects use
    /// [`CollisionMode::SatBox`].
    pub fn test_objects<K: ObjectKind>(a: &Object2D<K>, b: &Object2D<K>) -> bool {
        Self::test_with_info(a, b).is_some()
    }

    /// Like [`test_objects`](Self::test_objects), returning which boxes hit.
    pub fn test_with_info<K: ObjectKind>(a: &Object2D<K>, b: &Object2D<K>) -> Option<Contact> {
        let use_sat =
            a.collision_mode == CollisionMode::SatBox && b.collision_mode == CollisionMode::SatBox;
        Self::first_hit(&a.bounding_boxes, &b.bounding_boxes, !use_sat)
    }
}

//--- Projection Helpers --------------------------------------------------

fn project(axis: Vec2, vertices: &[Vec2; 4]) -> (f32, f32) {
    vertices.iter().fold((f32::MAX, f32::MIN), |(min, max), v| {
        let d = v.dot(&axis);
        (min.min(d), max.max(d))
    })
}

fn projections_overlap(axis: Vec2, a: &[Vec2; 4], b: &[Vec2; 4]) -> bool {
    let (min_a, max_a) = project(axis, a);
    let (min_b, max_b) = project(axis, b);
    !(min_b > max_a || max_b < min_a)
}

//=========================================================================
// Tests
//=========================================================================
