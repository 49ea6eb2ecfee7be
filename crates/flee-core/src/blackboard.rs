use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

use crate::CellPath;

/// Typed key into a [`Scratch`] store.
///
/// Keys are plain ids; the type parameter only guides `get`/`set`. Two keys with the same id
/// but different types address the same slot, which [`Scratch`] reports as a
/// [`ScratchError::TypeMismatch`].
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for BbKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BbKey")
            .field("id", &self.id)
            .field("type", &type_name::<T>())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScratchError {
    #[error("scratch type mismatch for key id={id:#x}: stored {stored}, requested {requested}")]
    TypeMismatch {
        id: u64,
        stored: &'static str,
        requested: &'static str,
    },
}

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl Slot {
    fn check<T: 'static>(&self, id: u64) -> Result<(), ScratchError> {
        if self.value.is::<T>() {
            Ok(())
        } else {
            Err(ScratchError::TypeMismatch {
                id,
                stored: self.type_name,
                requested: type_name::<T>(),
            })
        }
    }
}

/// Typed key/value working state shared by the tasks of one agent.
#[derive(Default)]
pub struct Scratch {
    slots: BTreeMap<u64, Slot>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.slots.contains_key(&key.id)
    }

    /// Store `value`, replacing whatever the slot held (of any type).
    pub fn set<T: Send + 'static>(&mut self, key: BbKey<T>, value: T) {
        self.slots.insert(
            key.id,
            Slot {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        );
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Result<Option<&T>, ScratchError> {
        let Some(slot) = self.slots.get(&key.id) else {
            return Ok(None);
        };
        slot.check::<T>(key.id)?;
        Ok(slot.value.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Result<Option<&mut T>, ScratchError> {
        let Some(slot) = self.slots.get_mut(&key.id) else {
            return Ok(None);
        };
        slot.check::<T>(key.id)?;
        Ok(slot.value.downcast_mut::<T>())
    }

    /// Remove and return the value. A mismatched type leaves the slot in place.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Result<Option<T>, ScratchError> {
        let Some(slot) = self.slots.get(&key.id) else {
            return Ok(None);
        };
        slot.check::<T>(key.id)?;
        Ok(self
            .slots
            .remove(&key.id)
            .and_then(|slot| slot.value.downcast::<T>().ok())
            .map(|value| *value))
    }
}

impl fmt::Debug for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(id, slot)| (id, slot.type_name)))
            .finish()
    }
}

/// Per-agent planning state, passed explicitly into every task phase.
///
/// The grid is shared read-only between agents; everything else belongs to the one agent whose
/// decision cycle owns this blackboard.
pub struct Blackboard<G: ?Sized, A> {
    grid: Arc<G>,
    agent: A,
    path: Option<CellPath>,
    cycle: u64,
    scratch: Scratch,
}

impl<G: ?Sized, A> Blackboard<G, A> {
    pub fn new(grid: Arc<G>, agent: A) -> Self {
        Self {
            grid,
            agent,
            path: None,
            cycle: 0,
            scratch: Scratch::new(),
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn shared_grid(&self) -> Arc<G> {
        Arc::clone(&self.grid)
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// The last committed path, if any.
    pub fn path(&self) -> Option<&CellPath> {
        self.path.as_ref()
    }

    /// Commit a path, overwriting the previous one.
    pub fn set_path(&mut self, path: CellPath) {
        self.path = Some(path);
    }

    /// Hand the committed path to a downstream consumer, leaving the slot empty.
    pub fn take_path(&mut self) -> Option<CellPath> {
        self.path.take()
    }

    /// Decision cycle counter, advanced by whoever drives the agent's update loop.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn advance_cycle(&mut self) -> u64 {
        self.cycle = self.cycle.wrapping_add(1);
        self.cycle
    }

    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut Scratch {
        &mut self.scratch
    }
}
