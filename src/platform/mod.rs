//! Platform abstraction layer
//!
//! Key-value storage backends behind one synchronous trait:
//! - `LocalStorage`: browser LocalStorage (WASM only)
//! - `FileStorage`: a JSON file on disk (native only)
//! - `MemoryStorage`: an in-process map (tests, headless hosts)

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

use crate::error::Result;

/// Synchronous key-value storage, shaped like the browser Storage API.
///
/// Each call is atomic for a single key and the last writer wins. Backends
/// are single-threaded and take `&self`, so a clone of a handle may be held
/// by several stores at once.
pub trait Storage {
    /// Read the string stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
