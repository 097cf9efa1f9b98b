//=========================================================================
// Scene Objects
//
// Live game entities, their pooled recycling and the per-screen manager
// that drives them each frame.
//
// Responsibilities:
// - Define the `GameObject` trait games implement for their entities
// - Hold shared per-instance state in `Object2D`
// - Recycle instances per kind through `ObjectPool`
// - Run add / update / delete / collide / draw in `ObjectManager`
//
// Notes:
// Objects are owned as `Box<dyn GameObject<K>>` by exactly one place at a
// time: the pool, a manager's pending queue, or its live list. Everything
// else refers to them by `ObjectId`.
//
//=========================================================================

//=== Submodules ==========================================================
mod manager;
mod object2d;
mod path;
mod pool;
mod state;

//=== Public Exports ======================================================
pub use manager::ObjectManager;
pub use object2d::{DrawListener, Object2D};
pub use path::Path;
pub use pool::ObjectPool;
pub use state::{State, StateFlow, StateId, StateMachine};

//=== External Dependencies ===============================================
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

//=== Internal Dependencies ===============================================
use crate::core::collision::Contact;
use crate::core::host::{ContentLoader, RenderSink};
use crate::core::math::Vec2;
use crate::core::time::FrameTime;
use crate::error::EngineResult;

//=== Object Kind Trait ===================================================

/// Marker trait for object kind tags.
///
/// The kind identifies the concrete entity type. It keys the object pool,
/// drives "find objects of kind" queries and the `NOT_SELF` collision
/// filter. Typically implemented by a game-specific enum.
pub trait ObjectKind: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== ObjectId ============================================================

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one physical object instance.
///
/// Ids are assigned at construction and survive pool recycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned, type-erased object as stored by pools and managers.
pub type BoxedObject<K> = Box<dyn GameObject<K>>;

//=== GameObject Trait ====================================================

/// Behaviour of a scene object.
///
/// Implementors embed an [`Object2D`] and expose it through
/// [`object`](Self::object) / [`object_mut`](Self::object_mut). Every other
/// method has a default that runs the base behaviour; overrides that add
/// gameplay logic should still call the base (for example
/// `self.object_mut().initialize()` inside a custom `initialize`).
///
/// # Example
///
/// ```rust
/// # use stratum_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Kind { Ship }
/// # impl ObjectKind for Kind {}
/// struct Ship {
///     base: Object2D<Kind>,
/// }
///
/// impl GameObject<Kind> for Ship {
///     fn object(&self) -> &Object2D<Kind> { &self.base }
///     fn object_mut(&mut self) -> &mut Object2D<Kind> { &mut self.base }
///
///     fn load_content(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
///         self.base.texture = Some(content.load_texture("ship")?);
///         load_base(self)
///     }
/// }
/// ```
pub trait GameObject<K: ObjectKind> {
    fn object(&self) -> &Object2D<K>;

    fn object_mut(&mut self) -> &mut Object2D<K>;

    /// Loads assets once per physical instance, then initializes.
    ///
    /// Do not reset gameplay fields here; pooled instances skip this call
    /// and only run [`initialize`](Self::initialize).
    fn load_content(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
        let _ = content;
        load_base(self)
    }

    /// Resets every mutable field for a new logical life.
    fn initialize(&mut self) {
        self.object_mut().initialize();
    }

    fn update(&mut self, time: &FrameTime) -> EngineResult<()> {
        self.object_mut().update(time)
    }

    fn draw(&mut self, sink: &mut dyn RenderSink, offset: Vec2, world_scale: f32) {
        self.object_mut().draw(sink, offset, world_scale);
    }

    /// Called on the first object of a colliding pair only.
    ///
    /// `other` has already been recorded in the colliding list.
    fn on_object_collision(&mut self, other: &Object2D<K>, contact: Contact) {
        let _ = (other, contact);
    }

    /// Called once the object joins a manager's live list.
    fn on_add_to_manager(&mut self) {}

    /// Called just before the object is returned to the pool.
    fn cleanup(&mut self) {
        self.object_mut().cleanup();
    }
}

//=== Base Content Loading ================================================

/// Base content step shared by every [`GameObject::load_content`].
///
/// Resolves size from the texture, runs `initialize`, synthesizes a
/// default bounding box for colliding objects without one and marks the
/// content as loaded.
pub fn load_base<K, T>(obj: &mut T) -> EngineResult<()>
where
    K: ObjectKind,
    T: GameObject<K> + ?Sized,
{
    obj.object_mut().prepare_content()?;
    obj.initialize();
    let base = obj.object_mut();
    base.ensure_bounding_box()?;
    base.content_loaded = true;
    trace!(target: "object", "Loaded content for {:?} {}", base.kind, base.id);
    Ok(())
}
