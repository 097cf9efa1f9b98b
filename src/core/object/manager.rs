//=========================================================================
// Object Manager
//=========================================================================
//
// Per-screen container and frame driver for scene objects.
//
// Update pipeline (once per frame number):
//   1. drain pending adds      (load content if needed, on_add hook)
//   2. update live objects     (marked ones are collected, not updated)
//   3. retire marked objects   (cleanup → pool)
//   4. refresh bounding boxes  (colliding objects only)
//   5. all-pairs collision     (category / NOT_SELF filters, A notified)
//
// Draw walks the live list in order, skipping marked objects.
//
// Mutations requested during a frame go through the pending queue or the
// deletion flag, so the live list is never reshaped mid-iteration.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{BoxedObject, GameObject, ObjectId, ObjectKind, ObjectPool};
use crate::core::collision::{BoundingBox, CollisionMode, Contact};
use crate::core::host::{Color, ContentLoader, RenderSink};
use crate::core::math::Vec2;
use crate::core::time::FrameTime;
use crate::error::EngineResult;

const DEFAULT_CAPACITY: usize = 500;
const OUTLINE_COLOR: Color = Color::WHITE.with_alpha(100);

//=== ObjectManager =======================================================

pub struct ObjectManager<K: ObjectKind> {
    live: Vec<BoxedObject<K>>,
    pending_add: Vec<BoxedObject<K>>,
    to_draw: Vec<ObjectId>,
    pool: ObjectPool<K>,

    handled_update_frame: Option<u64>,
    handled_draw_frame: Option<u64>,

    /// Outline every collision box after drawing its object.
    pub draw_bounding_boxes: bool,
}

impl<K: ObjectKind> ObjectManager<K> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a manager with room for `capacity` live objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(capacity),
            pending_add: Vec::new(),
            to_draw: Vec::with_capacity(capacity),
            pool: ObjectPool::new(),
            handled_update_frame: None,
            handled_draw_frame: None,
            draw_bounding_boxes: false,
        }
    }

    //--- Adding & Removing ------------------------------------------------

    /// Queues `obj`; it joins the live list on the next update.
    pub fn add_object(&mut self, obj: BoxedObject<K>) -> ObjectId {
        let id = obj.object().id;
        trace!(target: "object", "Queued {:?} {} for add", obj.object().kind, id);
        self.pending_add.push(obj);
        id
    }

    /// Takes an object of `kind` from the pool (building one with `make`
    /// if none is free) and queues it.
    pub fn spawn<F>(&mut self, kind: K, make: F, content: &mut dyn ContentLoader) -> EngineResult<ObjectId>
    where
        F: FnOnce() -> BoxedObject<K>,
    {
        let obj = self.pool.acquire(kind, make, content)?;
        Ok(self.add_object(obj))
    }

    /// Flags an object for deletion at the next update.
    ///
    /// Returns `false` if no live or pending object has this id.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let found = self
            .live
            .iter_mut()
            .chain(self.pending_add.iter_mut())
            .find(|obj| obj.object().id == id);

        match found {
            Some(obj) => {
                obj.object_mut().mark_for_deletion = true;
                true
            }
            None => {
                debug!(target: "object", "remove_object: no object {}", id);
                false
            }
        }
    }

    //--- Update -----------------------------------------------------------

    /// Runs the update pipeline once for `frame`. Repeated calls with the
    /// same or an older frame number do nothing.
    pub fn update(&mut self, frame: u64, time: &FrameTime, content: &mut dyn ContentLoader) -> EngineResult<()> {
        if self.handled_update_frame.is_some_and(|handled| frame <= handled) {
            return Ok(());
        }
        self.handled_update_frame = Some(frame);

        self.drain_pending(content)?;

        self.to_draw.clear();
        let mut doomed = Vec::new();
        for obj in &mut self.live {
            let id = obj.object().id;
            if obj.object().mark_for_deletion {
                doomed.push(id);
                continue;
            }
            if obj.object().enabled {
                obj.update(time)?;
            }
            self.to_draw.push(id);
        }

        self.retire(&doomed);
        self.refresh_bounding_boxes();
        self.detect_collisions();
        Ok(())
    }

    /// Moves queued objects into the live list. On a load error the failing
    /// object is dropped and everything queued behind it stays pending.
    fn drain_pending(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
        let mut queue = mem::take(&mut self.pending_add).into_iter();
        while let Some(mut obj) = queue.next() {
            let id = obj.object().id;
            if self.live.iter().any(|live| live.object().id == id) {
                warn!(target: "object", "Object {} is already live, add ignored", id);
                continue;
            }
            if !obj.object().is_content_loaded() {
                if let Err(err) = obj.load_content(content) {
                    warn!(target: "object", "Dropping {:?} {}: {}", obj.object().kind, id, err);
                    self.pending_add.extend(queue);
                    return Err(err);
                }
            }
            obj.on_add_to_manager();
            trace!(target: "object", "Added {:?} {}", obj.object().kind, id);
            self.live.push(obj);
        }
        Ok(())
    }

    fn retire(&mut self, doomed: &[ObjectId]) {
        if doomed.is_empty() {
            return;
        }

        let (dead, live): (Vec<_>, Vec<_>) = mem::take(&mut self.live)
            .into_iter()
            .partition(|obj| doomed.contains(&obj.object().id));
        self.live = live;

        for mut obj in dead {
            obj.cleanup();
            debug!(target: "object", "Removed {:?} {}", obj.object().kind, obj.object().id);
            self.pool.release(obj);
        }
    }

    fn refresh_bounding_boxes(&mut self) {
        for obj in &mut self.live {
            let base = obj.object_mut();
            if !base.collision_mode.collides() {
                continue;
            }

            // Fixed boxes keep their build-time orientation.
            let angle = match base.collision_mode {
                CollisionMode::FixedBox => 0.0,
                _ => base.angle,
            };
            let (position, scale) = (base.position, base.scale);
            for bbox in &mut base.bounding_boxes {
                bbox.update(angle, position, scale);
            }
        }
    }

    fn detect_collisions(&mut self) {
        let mut hits: Vec<(usize, usize, Contact)> = Vec::new();

        for (i, a) in self.live.iter().enumerate() {
            let a = a.object();
            if !a.collision_mode.collides() {
                continue;
            }

            for (j, b) in self.live.iter().enumerate() {
                let b = b.object();
                if i == j || !b.collision_mode.collides() {
                    continue;
                }
                if !a.collision_category.intersects(b.collision_category) {
                    continue;
                }
                if a.collision_category.is_not_self() && a.kind == b.kind {
                    continue;
                }
                if let Some(contact) = BoundingBox::test_with_info(a, b) {
                    hits.push((i, j, contact));
                }
            }
        }

        for (i, j, contact) in hits {
            let (a, b) = pair_mut(&mut self.live, i, j);
            let other = b.object();
            a.object_mut().record_collision(other.id);
            a.on_object_collision(other, contact);
        }
    }

    //--- Draw -------------------------------------------------------------

    /// Draws every visible object once for `frame`, shifted by `-offset`.
    pub fn draw(&mut self, frame: u64, sink: &mut dyn RenderSink, offset: Vec2, world_scale: f32) {
        if self.handled_draw_frame.is_some_and(|handled| frame <= handled) {
            return;
        }
        self.handled_draw_frame = Some(frame);

        let camera = -offset;
        for obj in &mut self.live {
            if obj.object().mark_for_deletion || !obj.object().visible {
                continue;
            }
            obj.draw(sink, camera, world_scale);

            if self.draw_bounding_boxes {
                let base = obj.object();
                let shift = if base.ignore_offset { Vec2::zeros() } else { camera };
                for bbox in &base.bounding_boxes {
                    let vertices = *bbox.vertices();
                    sink.draw_outline(&vertices.map(|v| v * world_scale + shift), OUTLINE_COLOR);
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Objects queued but not yet live.
    pub fn pending_count(&self) -> usize {
        self.pending_add.len()
    }

    /// Live objects in update order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn GameObject<K>> {
        self.live.iter().map(|obj| obj.as_ref())
    }

    /// Ids updated during the last update, in order.
    pub fn objects_to_draw(&self) -> &[ObjectId] {
        &self.to_draw
    }

    pub fn pool(&self) -> &ObjectPool<K> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ObjectPool<K> {
        &mut self.pool
    }

    pub fn find_by_id(&self, id: ObjectId) -> Option<&dyn GameObject<K>> {
        self.iter().find(|obj| obj.object().id == id)
    }

    pub fn find_by_id_mut(&mut self, id: ObjectId) -> Option<&mut (dyn GameObject<K> + 'static)> {
        self.live
            .iter_mut()
            .find(|obj| obj.object().id == id)
            .map(|obj| obj.as_mut())
    }

    /// First object of `kind` closer than `radius` to `position`, in live
    /// list order (not necessarily the nearest).
    pub fn find_first_of_kind(&self, kind: K, position: Vec2, radius: f32) -> Option<&dyn GameObject<K>> {
        self.iter()
            .find(|obj| within(obj.object().kind, kind, obj.object().position, position, radius))
    }

    /// Every object of `kind` closer than `radius` to `position`.
    pub fn find_all_of_kind(&self, kind: K, position: Vec2, radius: f32) -> Vec<&dyn GameObject<K>> {
        self.iter()
            .filter(|obj| within(obj.object().kind, kind, obj.object().position, position, radius))
            .collect()
    }
}

impl<K: ObjectKind> Default for ObjectManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

//--- Helpers -------------------------------------------------------------

fn within<K: ObjectKind>(kind: K, wanted: K, at: Vec2, position: Vec2, radius: f32) -> bool {
    kind == wanted && (at - position).norm() < radius
}

/// Mutable `i` alongside shared `j`, `i != j`.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::core::collision::CollisionCategory;
    use crate::core::host::testing::{DrawCall, MockContent, RecordingSink};
    use crate::core::host::Texture;
    use crate::core::math::vec2;
    use crate::core::object::{load_base, Object2D};
    use crate::error::EngineError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Ship,
        Asteroid,
    }

    impl ObjectKind for Kind {}

    type Log = Rc<RefCell<Vec<String>>>;

    //--- Test Object ------------------------------------------------------

    /// Moves one unit right per update and logs its hooks.
    struct Mover {
        base: Object2D<Kind>,
        log: Log,
    }

    impl Mover {
        fn boxed(kind: Kind, log: &Log) -> BoxedObject<Kind> {
            let mut base = Object2D::new(kind);
            base.momentum = vec2(1.0, 0.0);
            base.texture = Some(Texture { id: 1, width: 10, height: 10 });
            Box::new(Self {
                base,
                log: Rc::clone(log),
            })
        }

        fn colliding(kind: Kind, log: &Log, mode: CollisionMode, at: Vec2) -> BoxedObject<Kind> {
            let mut obj = Self::boxed(kind, log);
            let base = obj.object_mut();
            base.momentum = Vec2::zeros();
            base.position = at;
            base.collision_mode = mode;
            base.collision_category = CollisionCategory::bit(0);
            obj
        }

        fn note(&self, event: &str) {
            self.log
                .borrow_mut()
                .push(format!("{:?}{}:{}", self.base.kind, self.base.id.0, event));
        }
    }

    impl GameObject<Kind> for Mover {
        fn object(&self) -> &Object2D<Kind> {
            &self.base
        }

        fn object_mut(&mut self) -> &mut Object2D<Kind> {
            &mut self.base
        }

        fn on_object_collision(&mut self, other: &Object2D<Kind>, _contact: Contact) {
            self.note(&format!("hit{}", other.id.0));
        }

        fn on_add_to_manager(&mut self) {
            self.note("added");
        }

        fn cleanup(&mut self) {
            self.note("cleanup");
            self.base.cleanup();
        }
    }

    /// Loads a named texture and picks its collision mode in `initialize`.
    struct Textured {
        base: Object2D<Kind>,
        asset: &'static str,
        mode_on_init: CollisionMode,
    }

    impl GameObject<Kind> for Textured {
        fn object(&self) -> &Object2D<Kind> {
            &self.base
        }

        fn object_mut(&mut self) -> &mut Object2D<Kind> {
            &mut self.base
        }

        fn load_content(&mut self, content: &mut dyn ContentLoader) -> EngineResult<()> {
            self.base.texture = Some(content.load_texture(self.asset)?);
            load_base(self)
        }

        fn initialize(&mut self) {
            self.base.collision_mode = self.mode_on_init;
            self.base.collision_category = CollisionCategory::bit(0);
            self.base.initialize();
        }
    }

    fn time() -> FrameTime {
        FrameTime::new(1, Duration::from_millis(16), Duration::ZERO)
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn x_of(manager: &ObjectManager<Kind>, id: ObjectId) -> f32 {
        manager.find_by_id(id).map(|o| o.object().position.x).unwrap()
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn added_objects_go_live_on_next_update() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));
        assert!(manager.is_empty());
        assert_eq!(manager.pending_count(), 1);

        manager.update(1, &time(), &mut content).unwrap();
        assert_eq!(manager.len(), 1);
        assert!(manager.find_by_id(id).unwrap().object().is_content_loaded());
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].ends_with("added"));
        assert_eq!(manager.objects_to_draw(), &[id]);
    }

    #[test]
    fn update_runs_once_per_frame_number() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));

        manager.update(1, &time(), &mut content).unwrap();
        manager.update(1, &time(), &mut content).unwrap();
        manager.update(0, &time(), &mut content).unwrap();
        assert_eq!(x_of(&manager, id), 1.0);

        manager.update(2, &time(), &mut content).unwrap();
        assert_eq!(x_of(&manager, id), 2.0);
    }

    #[test]
    fn disabled_objects_are_not_updated_but_still_drawn() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));
        manager.update(1, &time(), &mut content).unwrap();

        manager.find_by_id_mut(id).unwrap().object_mut().enabled = false;
        manager.update(2, &time(), &mut content).unwrap();

        assert_eq!(x_of(&manager, id), 1.0);
        assert_eq!(manager.objects_to_draw(), &[id]);
    }

    #[test]
    fn removed_objects_are_cleaned_up_and_pooled() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));
        manager.update(1, &time(), &mut content).unwrap();

        assert!(manager.remove_object(id));
        assert!(!manager.remove_object(ObjectId(u64::MAX)));
        manager.update(2, &time(), &mut content).unwrap();

        assert!(manager.is_empty());
        assert!(manager.objects_to_draw().is_empty());
        assert_eq!(manager.pool().free_count(Kind::Ship), 1);
        assert!(log.borrow().last().unwrap().ends_with("cleanup"));
    }

    #[test]
    fn spawn_reuses_pooled_instance() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        let first = manager
            .spawn(Kind::Ship, || Mover::boxed(Kind::Ship, &log), &mut content)
            .unwrap();
        manager.update(1, &time(), &mut content).unwrap();
        manager.remove_object(first);
        manager.update(2, &time(), &mut content).unwrap();

        let second = manager
            .spawn(Kind::Ship, || panic!("pool should be used"), &mut content)
            .unwrap();
        assert_eq!(first, second);
        manager.update(3, &time(), &mut content).unwrap();
        assert!(!manager.find_by_id(second).unwrap().object().mark_for_deletion);
    }

    #[test]
    fn duplicate_ids_are_added_once() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));
        let mut twin = Mover::boxed(Kind::Ship, &log);
        twin.object_mut().id = id;
        manager.add_object(twin);

        manager.update(1, &time(), &mut content).unwrap();
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn load_error_keeps_the_rest_of_the_queue() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        manager.add_object(Box::new(Textured {
            base: Object2D::new(Kind::Ship),
            asset: "missing",
            mode_on_init: CollisionMode::NoCollision,
        }));
        let good = manager.add_object(Mover::boxed(Kind::Asteroid, &log));

        let err = manager.update(1, &time(), &mut content).unwrap_err();
        assert_eq!(err, EngineError::AssetNotFound { name: "missing".to_string() });
        assert!(manager.is_empty());
        assert_eq!(manager.pending_count(), 1);

        manager.update(2, &time(), &mut content).unwrap();
        assert_eq!(manager.len(), 1);
        assert!(manager.find_by_id(good).is_some());
    }

    //--- Collisions -------------------------------------------------------

    #[test]
    fn collision_mode_chosen_in_initialize_gets_default_box() {
        let mut content = MockContent::default().with_texture("ship", 10, 10);
        let mut manager = ObjectManager::new();
        let ship = |at: Vec2| -> BoxedObject<Kind> {
            let mut base = Object2D::new(Kind::Ship);
            base.position = at;
            Box::new(Textured {
                base,
                asset: "ship",
                mode_on_init: CollisionMode::BoundingBox,
            })
        };
        let a = manager.add_object(ship(Vec2::zeros()));
        let b = manager.add_object(ship(vec2(5.0, 5.0)));

        manager.update(1, &time(), &mut content).unwrap();

        let first = manager.find_by_id(a).unwrap().object();
        assert_eq!(first.collision_mode, CollisionMode::BoundingBox);
        assert_eq!(first.bounding_boxes.len(), 1);
        assert_eq!(first.colliding_objects(), &[b]);
    }

    #[test]
    fn recycled_object_gets_default_box_after_initialize() {
        let mut content = MockContent::default().with_texture("ship", 10, 10);
        let mut manager = ObjectManager::new();
        let make = || -> BoxedObject<Kind> {
            Box::new(Textured {
                base: Object2D::new(Kind::Ship),
                asset: "ship",
                mode_on_init: CollisionMode::SatBox,
            })
        };

        let id = manager.spawn(Kind::Ship, make, &mut content).unwrap();
        manager.update(1, &time(), &mut content).unwrap();
        manager.find_by_id_mut(id).unwrap().object_mut().bounding_boxes.clear();
        manager.remove_object(id);
        manager.update(2, &time(), &mut content).unwrap();

        manager.spawn(Kind::Ship, make, &mut content).unwrap();
        manager.update(3, &time(), &mut content).unwrap();
        assert_eq!(manager.find_by_id(id).unwrap().object().bounding_boxes.len(), 1);
    }

    #[test]
    fn overlapping_pair_notifies_each_side_once() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let a = manager.add_object(Mover::colliding(Kind::Ship, &log, CollisionMode::SatBox, Vec2::zeros()));
        let b = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::SatBox, vec2(5.0, 5.0)));

        manager.update(1, &time(), &mut content).unwrap();

        let ship = manager.find_by_id(a).unwrap().object();
        let rock = manager.find_by_id(b).unwrap().object();
        assert_eq!(ship.colliding_objects(), &[b]);
        assert_eq!(rock.colliding_objects(), &[a]);
        assert_eq!(log.borrow().iter().filter(|e| e.contains(":hit")).count(), 2);
    }

    #[test]
    fn not_self_skips_same_kind_for_the_flagged_side_only() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        let mut flagged = Mover::colliding(Kind::Asteroid, &log, CollisionMode::BoundingBox, Vec2::zeros());
        flagged.object_mut().collision_category |= CollisionCategory::NOT_SELF;
        let a = manager.add_object(flagged);
        let b = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::BoundingBox, vec2(2.0, 2.0)));

        manager.update(1, &time(), &mut content).unwrap();

        assert!(manager.find_by_id(a).unwrap().object().colliding_objects().is_empty());
        assert_eq!(manager.find_by_id(b).unwrap().object().colliding_objects(), &[a]);
    }

    #[test]
    fn disjoint_categories_and_no_collision_mode_are_skipped() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();

        let mut other_team = Mover::colliding(Kind::Ship, &log, CollisionMode::BoundingBox, Vec2::zeros());
        other_team.object_mut().collision_category = CollisionCategory::bit(1);
        let a = manager.add_object(other_team);
        let b = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::BoundingBox, Vec2::zeros()));
        let c = manager.add_object(Mover::boxed(Kind::Asteroid, &log));

        manager.update(1, &time(), &mut content).unwrap();

        for id in [a, b, c] {
            assert!(manager.find_by_id(id).unwrap().object().colliding_objects().is_empty());
        }
    }

    #[test]
    fn colliding_list_is_cleared_by_next_update() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let a = manager.add_object(Mover::colliding(Kind::Ship, &log, CollisionMode::SatBox, Vec2::zeros()));
        let b = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::SatBox, vec2(5.0, 5.0)));

        manager.update(1, &time(), &mut content).unwrap();
        manager.find_by_id_mut(b).unwrap().object_mut().position = vec2(500.0, 0.0);
        manager.update(2, &time(), &mut content).unwrap();

        assert!(manager.find_by_id(a).unwrap().object().colliding_objects().is_empty());
    }

    //--- Queries ----------------------------------------------------------

    #[test]
    fn find_by_kind_and_radius_uses_scan_order() {
        let log = log();
        let mut content = MockContent::default();
        let mut manager = ObjectManager::new();
        let far = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::NoCollision, vec2(9.0, 0.0)));
        let near = manager.add_object(Mover::colliding(Kind::Asteroid, &log, CollisionMode::NoCollision, vec2(1.0, 0.0)));
        manager.add_object(Mover::colliding(Kind::Ship, &log, CollisionMode::NoCollision, Vec2::zeros()));
        manager.update(1, &time(), &mut content).unwrap();

        let first = manager.find_first_of_kind(Kind::Asteroid, Vec2::zeros(), 10.0).unwrap();
        assert_eq!(first.object().id, far);

        let close = manager.find_first_of_kind(Kind::Asteroid, Vec2::zeros(), 5.0).unwrap();
        assert_eq!(close.object().id, near);

        assert_eq!(manager.find_all_of_kind(Kind::Asteroid, Vec2::zeros(), 10.0).len(), 2);
        assert!(manager.find_all_of_kind(Kind::Asteroid, Vec2::zeros(), 1.0).is_empty());
    }

    //--- Draw -------------------------------------------------------------

    #[test]
    fn draw_negates_offset_and_runs_once_per_frame() {
        let log = log();
        let mut content = MockContent::default();
        let mut sink = RecordingSink::new();
        let mut manager = ObjectManager::new();
        let id = manager.add_object(Mover::boxed(Kind::Ship, &log));
        let hidden = manager.add_object(Mover::boxed(Kind::Ship, &log));
        manager.update(1, &time(), &mut content).unwrap();
        manager.find_by_id_mut(hidden).unwrap().object_mut().visible = false;

        manager.draw(1, &mut sink, vec2(1.0, 0.0), 1.0);
        manager.draw(1, &mut sink, vec2(1.0, 0.0), 1.0);

        let sprites = sink.sprites();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].position, vec2(x_of(&manager, id) - 1.0, 0.0));
    }

    #[test]
    fn debug_outlines_follow_the_boxes() {
        let log = log();
        let mut content = MockContent::default();
        let mut sink = RecordingSink::new();
        let mut manager = ObjectManager::new();
        manager.draw_bounding_boxes = true;
        manager.add_object(Mover::colliding(Kind::Ship, &log, CollisionMode::BoundingBox, vec2(3.0, 4.0)));
        manager.update(1, &time(), &mut content).unwrap();

        manager.draw(1, &mut sink, Vec2::zeros(), 1.0);

        let outline = sink.calls.iter().find_map(|call| match call {
            DrawCall::Outline(vertices) => Some(*vertices),
            _ => None,
        });
        assert_eq!(outline.unwrap()[0], vec2(3.0, 4.0));
    }
}
