//=========================================================================
// Behavioural States
//=========================================================================
//
// Per-object state machine with lazily built, persistent state instances.
//
// Lifecycle of one state instance:
//   first request → factory() → initialize() → enter()/update()/exit()...
//
// Instances are created on first use and reused on later activations, so
// they keep their own fields (and accumulated duration) for as long as
// the registry lives. The registry is cleared when the owning object is
// returned to the pool.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Object2D, ObjectKind};
use crate::core::time::FrameTime;
use crate::error::{EngineError, EngineResult};

//=== StateId =============================================================

/// Name of a behavioural state, unique within one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub &'static str);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

//=== StateFlow ===========================================================

/// What a state asks for at the end of its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFlow {
    #[default]
    Stay,
    Change(StateId),
}

//=== State Trait =========================================================

/// Logic an object runs while in one behavioural state.
///
/// The owner's state machine is detached while a state runs, so states
/// request transitions through the returned [`StateFlow`] rather than by
/// calling `Object2D::change_state` on the owner.
pub trait State<K: ObjectKind> {
    /// Runs once, right after the instance is constructed.
    fn initialize(&mut self) {}

    fn enter(&mut self, owner: &mut Object2D<K>) {
        let _ = owner;
    }

    fn exit(&mut self, owner: &mut Object2D<K>) {
        let _ = owner;
    }

    fn update(&mut self, owner: &mut Object2D<K>, time: &FrameTime) -> StateFlow;
}

/// Builds a fresh state instance.
pub type StateFactory<K> = fn() -> Box<dyn State<K>>;

struct Slot<K: ObjectKind> {
    state: Box<dyn State<K>>,
    duration: Duration,
}

//=== StateMachine ========================================================

/// Registry of state factories and the instances built from them.
pub struct StateMachine<K: ObjectKind> {
    factories: HashMap<StateId, StateFactory<K>>,
    instances: HashMap<StateId, Slot<K>>,
    current: Option<StateId>,
}

impl<K: ObjectKind> StateMachine<K> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            instances: HashMap::new(),
            current: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers how to build the state named `id`.
    ///
    /// Registering again replaces the factory but keeps an already built
    /// instance.
    pub fn register(&mut self, id: StateId, factory: StateFactory<K>) {
        self.factories.insert(id, factory);
    }

    pub fn is_registered(&self, id: StateId) -> bool {
        self.factories.contains_key(&id)
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// True once the instance for `id` has been built.
    pub fn is_built(&self, id: StateId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Total time `id` has been updated while active.
    pub fn duration(&self, id: StateId) -> Duration {
        self.instances
            .get(&id)
            .map(|slot| slot.duration)
            .unwrap_or_default()
    }

    //--- Transitions ------------------------------------------------------

    /// Exits the current state and enters `id`, building it if needed.
    pub fn change(&mut self, owner: &mut Object2D<K>, id: StateId) -> EngineResult<()> {
        self.ensure_built(id)?;

        if let Some(old) = self.current.take() {
            if let Some(slot) = self.instances.get_mut(&old) {
                slot.state.exit(owner);
            }
        }

        trace!(target: "object", "Object {} enters state {}", owner.id, id);
        self.current = Some(id);
        if let Some(slot) = self.instances.get_mut(&id) {
            slot.state.enter(owner);
        }
        Ok(())
    }

    /// Exits the current state, leaving none active.
    pub fn clear_current(&mut self, owner: &mut Object2D<K>) {
        if let Some(old) = self.current.take() {
            if let Some(slot) = self.instances.get_mut(&old) {
                slot.state.exit(owner);
            }
        }
    }

    /// Updates the active state and follows any change it requests.
    pub fn update(&mut self, owner: &mut Object2D<K>, time: &FrameTime) -> EngineResult<()> {
        let Some(id) = self.current else {
            return Ok(());
        };

        let flow = match self.instances.get_mut(&id) {
            Some(slot) => {
                slot.duration += time.elapsed;
                slot.state.update(owner, time)
            }
            None => StateFlow::Stay,
        };

        match flow {
            StateFlow::Stay => Ok(()),
            StateFlow::Change(next) => self.change(owner, next),
        }
    }

    /// Drops every built instance and the active state, without exit calls.
    ///
    /// Factories stay registered.
    pub fn reset(&mut self) {
        self.instances.clear();
        self.current = None;
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_built(&mut self, id: StateId) -> EngineResult<()> {
        if self.instances.contains_key(&id) {
            return Ok(());
        }

        let factory = self
            .factories
            .get(&id)
            .ok_or(EngineError::UnknownState { state: id.0 })?;

        let mut state = factory();
        state.initialize();
        self.instances.insert(
            id,
            Slot {
                state,
                duration: Duration::ZERO,
            },
        );
        Ok(())
    }
}

impl<K: ObjectKind> Default for StateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
