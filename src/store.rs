//! Reducer-driven state container mirrored into key-value storage
//!
//! The store restores its state once at creation and writes a snapshot
//! after every committed state change. Actions are queued by `Dispatch`
//! handles and applied on the next `commit`, which plays the part of the
//! host's render cycle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::persistence::{self, PersistOptions};
use crate::platform::Storage;

/// Pure state transition: `(state, action) -> new state`
pub type Reducer<S, A> = Box<dyn Fn(&S, A) -> S>;

/// Cloneable handle that queues actions for the next commit
pub struct Dispatch<A> {
    queue: Rc<RefCell<VecDeque<A>>>,
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<A> Dispatch<A> {
    /// Queue an action. The resulting state is visible after the next commit.
    pub fn dispatch(&self, action: A) {
        self.queue.borrow_mut().push_back(action);
    }

    /// Number of actions waiting for a commit
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

/// State container whose state survives in a `Storage` slot
pub struct PersistentReducerStore<S, A, St> {
    reducer: Reducer<S, A>,
    state: S,
    key: String,
    options: PersistOptions,
    storage: St,
    queue: Rc<RefCell<VecDeque<A>>>,
    revision: u64,
}

impl<S, A, St> PersistentReducerStore<S, A, St>
where
    S: Serialize + DeserializeOwned + Clone + PartialEq,
    St: Storage,
{
    /// Create a store, restoring any snapshot under `key`.
    ///
    /// The restored (or initial) state is persisted once right away, the
    /// same as any later state change.
    pub fn new(
        reducer: impl Fn(&S, A) -> S + 'static,
        initial_state: S,
        key: impl Into<String>,
        options: PersistOptions,
        storage: St,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        let state = persistence::restore(&storage, &key, initial_state, &options)?;
        let store = Self {
            reducer: Box::new(reducer),
            state,
            key,
            options,
            storage,
            queue: Rc::new(RefCell::new(VecDeque::new())),
            revision: 0,
        };
        store.save()?;
        Ok(store)
    }

    /// Current committed state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// A new handle for queueing actions
    pub fn dispatcher(&self) -> Dispatch<A> {
        Dispatch {
            queue: Rc::clone(&self.queue),
        }
    }

    /// The `(state, dispatch)` pair
    pub fn pair(&self) -> (&S, Dispatch<A>) {
        (&self.state, self.dispatcher())
    }

    /// Queue an action on the store's own queue
    pub fn dispatch(&self, action: A) {
        self.queue.borrow_mut().push_back(action);
    }

    /// Apply queued actions in order and persist if the state changed.
    ///
    /// A reducer result equal to the previous state is a bail-out and does
    /// not count as a change. Returns whether the state changed. The new
    /// state is committed before the write, so a storage error leaves it in
    /// place.
    pub fn commit(&mut self) -> Result<bool> {
        let mut changed = false;
        let mut applied = 0usize;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(action) = next else { break };
            applied += 1;
            let next_state = (self.reducer)(&self.state, action);
            if next_state != self.state {
                self.state = next_state;
                changed = true;
            }
        }

        if !changed {
            if applied > 0 {
                log::debug!("'{}': {} action(s), no state change", self.key, applied);
            }
            return Ok(false);
        }

        self.revision += 1;
        log::debug!(
            "'{}': {} action(s) committed as revision {}",
            self.key,
            applied,
            self.revision
        );
        self.save()?;
        Ok(true)
    }

    /// Number of committed state changes since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Storage slot this store reads and writes
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Allow-list and policies the store was created with
    pub fn options(&self) -> &PersistOptions {
        &self.options
    }

    /// Backend the snapshot lives in
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Remove the stored snapshot. The live state is untouched.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        log::info!("Cleared snapshot '{}'", self.key);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        persistence::persist(&self.storage, &self.key, &self.state, &self.options)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl<S, A> PersistentReducerStore<S, A, crate::platform::LocalStorage>
where
    S: Serialize + DeserializeOwned + Clone + PartialEq,
{
    /// Create a store backed by the page's LocalStorage
    pub fn with_local_storage(
        reducer: impl Fn(&S, A) -> S + 'static,
        initial_state: S,
        key: impl Into<String>,
        options: PersistOptions,
    ) -> Result<Self> {
        let storage = crate::platform::LocalStorage::acquire()?;
        Self::new(reducer, initial_state, key, options, storage)
    }
}
