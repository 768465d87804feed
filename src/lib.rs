//! Persisted Reducer - a reducer-driven state container backed by LocalStorage
//!
//! Core modules:
//! - `store`: State container, dispatch queue and commit cycle
//! - `persistence`: Snapshot restore/merge and allow-listed saves
//! - `platform`: Storage backends (LocalStorage on web, file/memory natively)
//! - `settings`: Example preferences state used by the demo host
//! - `error`: Error types

pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod store;

pub use error::{Result, StoreError};
pub use persistence::{PersistOptions, RestorePolicy, WritePolicy};
pub use platform::{MemoryStorage, Storage};
pub use settings::{Settings, SettingsAction, Theme};
pub use store::{Dispatch, PersistentReducerStore, Reducer};

#[cfg(not(target_arch = "wasm32"))]
pub use platform::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use platform::LocalStorage;
