//=========================================================================
// Object Pool
//=========================================================================
//
// Kind-keyed free lists of retired objects.
//
// acquire(kind):
//   free instance? → reset initialized flag → initialize() → box → verify
//   otherwise      → construct → load_content() (initializes) → verify
//
// Pools never evict. They grow to the peak number of simultaneously
// live objects per kind.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{BoxedObject, ObjectKind};
use crate::core::host::ContentLoader;
use crate::error::{EngineError, EngineResult};

//=== ObjectPool ==========================================================

pub struct ObjectPool<K: ObjectKind> {
    free: HashMap<K, Vec<BoxedObject<K>>>,
}

impl<K: ObjectKind> ObjectPool<K> {
    pub fn new() -> Self {
        Self {
            free: HashMap::new(),
        }
    }

    /// Hands out an initialized object of `kind`.
    ///
    /// `make` is only called when no retired instance is available; it must
    /// build an object whose kind is `kind`.
    pub fn acquire<F>(
        &mut self,
        kind: K,
        make: F,
        content: &mut dyn ContentLoader,
    ) -> EngineResult<BoxedObject<K>>
    where
        F: FnOnce() -> BoxedObject<K>,
    {
        let recycled = self.free.get_mut(&kind).and_then(Vec::pop);

        let obj = match recycled {
            Some(mut obj) => {
                obj.object_mut().initialized = false;
                obj.initialize();
                obj.object_mut().ensure_bounding_box()?;
                trace!(target: "object", "Reusing pooled {:?} {}", kind, obj.object().id);
                obj
            }
            None => {
                let mut obj = make();
                debug_assert_eq!(obj.object().kind, kind, "factory built the wrong kind");
                obj.load_content(content)?;
                debug!(target: "object", "Created new {:?} {}", kind, obj.object().id);
                obj
            }
        };

        if !obj.object().is_initialized() {
            return Err(EngineError::NotInitialized {
                kind: format!("{:?}", kind),
            });
        }
        Ok(obj)
    }

    /// Retires `obj` until the next `acquire` of its kind.
    pub fn release(&mut self, obj: BoxedObject<K>) {
        let kind = obj.object().kind;
        trace!(target: "object", "Returning {:?} {} to pool", kind, obj.object().id);
        self.free.entry(kind).or_default().push(obj);
    }

    /// Number of retired instances of `kind`.
    pub fn free_count(&self, kind: K) -> usize {
        self.free.get(&kind).map_or(0, Vec::len)
    }

    /// Number of retired instances across all kinds.
    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: ObjectKind> Default for ObjectPool<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::host::testing::MockContent;
    use crate::core::object::{load_base, GameObject, Object2D};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Bullet,
        Broken,
    }

    impl ObjectKind for Kind {}

    //--- Test Objects -----------------------------------------------------

    /// Counts construction, content loads and initializations.
    struct Bullet {
        base: Object2D<Kind>,
        loads: Rc<Cell<u32>>,
        inits: Rc<Cell<u32>>,
        hits: u32,
    }

    impl GameObject<Kind> for Bullet {
        fn object(&self) -> &Object2D<Kind> {
            &self.base
        }

        fn object_mut(&mut self) -> &mut Object2D<Kind> {
            &mut self.base
        }

        fn load_content(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
            self.loads.set(self.loads.get() + 1);
            self.base.texture = Some(content.load_texture("bullet")?);
            load_base(self)
        }

        fn initialize(&mut self) {
            self.inits.set(self.inits.get() + 1);
            self.hits = 0;
            self.base.initialize();
        }
    }

    /// Forgets to call the base initialize.
    struct Broken {
        base: Object2D<Kind>,
    }

    impl GameObject<Kind> for Broken {
        fn object(&self) -> &Object2D<Kind> {
            &self.base
        }

        fn object_mut(&mut self) -> &mut Object2D<Kind> {
            &mut self.base
        }

        fn initialize(&mut self) {}
    }

    struct Counters {
        built: Rc<Cell<u32>>,
        loads: Rc<Cell<u32>>,
        inits: Rc<Cell<u32>>,
    }

    impl Counters {
        fn new() -> Self {
            Self {
                built: Rc::new(Cell::new(0)),
                loads: Rc::new(Cell::new(0)),
                inits: Rc::new(Cell::new(0)),
            }
        }

        fn factory(&self) -> impl FnOnce() -> BoxedObject<Kind> {
            let built = Rc::clone(&self.built);
            let loads = Rc::clone(&self.loads);
            let inits = Rc::clone(&self.inits);
            move || {
                built.set(built.get() + 1);
                Box::new(Bullet {
                    base: Object2D::new(Kind::Bullet),
                    loads,
                    inits,
                    hits: 0,
                })
            }
        }
    }

    fn content() -> MockContent {
        MockContent::default().with_texture("bullet", 4, 4)
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn empty_pool_constructs_and_loads_exactly_once() {
        let mut pool = ObjectPool::new();
        let counters = Counters::new();
        let mut content = content();

        let obj = pool
            .acquire(Kind::Bullet, counters.factory(), &mut content)
            .unwrap();

        assert_eq!(counters.built.get(), 1);
        assert_eq!(counters.loads.get(), 1);
        assert_eq!(counters.inits.get(), 1);
        assert!(obj.object().is_initialized());
        assert!(obj.object().is_content_loaded());
        assert_eq!(obj.object().width, 4);
    }

    #[test]
    fn released_object_is_reused_and_reinitialized() {
        let mut pool = ObjectPool::new();
        let counters = Counters::new();
        let mut content = content();

        let mut obj = pool
            .acquire(Kind::Bullet, counters.factory(), &mut content)
            .unwrap();
        let id = obj.object().id;
        obj.object_mut().mark_for_deletion = true;
        obj.object_mut().visible = false;
        pool.release(obj);
        assert_eq!(pool.free_count(Kind::Bullet), 1);

        let again = pool
            .acquire(Kind::Bullet, counters.factory(), &mut content)
            .unwrap();

        assert_eq!(again.object().id, id);
        assert_eq!(counters.built.get(), 1);
        assert_eq!(counters.loads.get(), 1);
        assert_eq!(counters.inits.get(), 2);
        assert!(again.object().is_initialized());
        assert!(!again.object().mark_for_deletion);
        assert!(again.object().visible);
        assert!(pool.is_empty());
    }

    #[test]
    fn pools_are_keyed_by_kind() {
        let mut pool = ObjectPool::new();
        let mut content = content();
        pool.release(Box::new(Broken {
            base: Object2D::new(Kind::Broken),
        }));

        let counters = Counters::new();
        pool.acquire(Kind::Bullet, counters.factory(), &mut content)
            .unwrap();

        assert_eq!(counters.built.get(), 1);
        assert_eq!(pool.free_count(Kind::Broken), 1);
    }

    #[test]
    fn reuse_without_base_initialize_is_rejected() {
        let mut pool = ObjectPool::new();
        let mut content = content();
        pool.release(Box::new(Broken {
            base: Object2D::new(Kind::Broken),
        }));

        let result = pool.acquire(
            Kind::Broken,
            || -> BoxedObject<Kind> {
                Box::new(Broken {
                    base: Object2D::new(Kind::Broken),
                })
            },
            &mut content,
        );

        assert!(matches!(result, Err(EngineError::NotInitialized { .. })));
    }

    #[test]
    fn missing_asset_propagates_from_load() {
        let mut pool = ObjectPool::new();
        let counters = Counters::new();
        let mut empty = MockContent::default();

        let result = pool.acquire(Kind::Bullet, counters.factory(), &mut empty);
        assert_eq!(
            result.err(),
            Some(EngineError::AssetNotFound {
                name: "bullet".to_string()
            })
        );
    }
}
