//=========================================================================
// Collision
//
// Two-phase collision detection between scene objects.
//
// Responsibilities:
// - Describe how an object takes part in collisions (`CollisionMode`)
// - Filter candidate pairs by category bitmask (`CollisionCategory`)
// - Test oriented boxes: axis-aligned broad phase, then SAT narrow phase
//
// Notes:
// Narrow-phase SAT only runs when BOTH objects ask for it. Any mismatch
// degrades the pair to the broad rectangle result.
//
//=========================================================================

//=== Submodules ==========================================================
mod bounding_box;

//=== Public Exports ======================================================
pub use bounding_box::{BoundingBox, Contact};

//=== External Dependencies ===============================================
use std::ops::{BitAnd, BitOr, BitOrAssign};

//=== CollisionMode =======================================================

/// How an object takes part in collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionMode {
    /// Never tested, bounding boxes are not refreshed.
    #[default]
    NoCollision,

    /// Box computed once and tested with its axis-aligned rectangle.
    FixedBox,

    /// Axis-aligned rectangle around the rotated box.
    BoundingBox,

    /// Exact oriented test. Both sides of a pair must request it.
    SatBox,
}

impl CollisionMode {
    /// Returns `true` unless the mode is [`CollisionMode::NoCollision`].
    pub fn collides(self) -> bool {
        self != Self::NoCollision
    }
}

//=== CollisionCategory ===================================================

/// Bitmask grouping objects that may collide with each other.
///
/// A pair is only tested if the two masks share at least one bit. The
/// reserved [`CollisionCategory::NOT_SELF`] flag additionally skips pairs
/// of the same object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionCategory(u32);

impl CollisionCategory {
    pub const NONE: Self = Self(0);

    /// Never collide with objects of the same kind.
    pub const NOT_SELF: Self = Self(1 << 31);

    /// Every user category bit.
    pub const ALL: Self = Self(!(1 << 31));

    /// User category number `index` (0..31).
    pub const fn bit(index: u32) -> Self {
        assert!(index < 31, "category bit 31 is reserved for NOT_SELF");
        Self(1 << index)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if the two masks share a user category bit.
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) & Self::ALL.0 != 0
    }

    pub const fn is_not_self(self) -> bool {
        self.0 & Self::NOT_SELF.0 != 0
    }
}

impl BitOr for CollisionCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionCategory {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionCategory {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_intersect_on_shared_bits_only() {
        let player = CollisionCategory::bit(0);
        let enemy = CollisionCategory::bit(1);

        assert!(!player.intersects(enemy));
        assert!((player | enemy).intersects(enemy));
    }

    #[test]
    fn not_self_flag_does_not_count_as_shared_category() {
        let a = CollisionCategory::bit(2) | CollisionCategory::NOT_SELF;
        let b = CollisionCategory::bit(3) | CollisionCategory::NOT_SELF;

        assert!(a.is_not_self());
        assert!(!a.intersects(b));
        assert!(a.contains(CollisionCategory::bit(2)));
    }

    #[test]
    fn default_mode_is_no_collision() {
        assert_eq!(CollisionMode::default(), CollisionMode::NoCollision);
        assert!(!CollisionMode::NoCollision.collides());
        assert!(CollisionMode::FixedBox.collides());
    }
}
