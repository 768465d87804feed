//! Restore/persist of store state
//!
//! Features:
//! - Restore by merging a JSON snapshot over the initial state
//! - Optional field allow-list projected at save time
//! - Selectable write gate and restore strictness

pub mod snapshot;

pub use snapshot::{is_empty_object, merge, project};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::platform::Storage;

/// When a computed snapshot is actually written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Write the snapshot after every state change
    #[default]
    Always,
    /// Write only when the snapshot is an empty object.
    ///
    /// Matches the legacy hook's gate, which never fires for a non-empty
    /// state. Kept for hosts that depend on that behavior.
    OnlyWhenEmpty,
}

impl WritePolicy {
    pub fn allows(&self, snapshot: &Value) -> bool {
        match self {
            WritePolicy::Always => true,
            WritePolicy::OnlyWhenEmpty => is_empty_object(snapshot),
        }
    }
}

/// Which snapshot fields take part in restoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePolicy {
    /// Every snapshot field is merged, even ones outside the allow-list
    #[default]
    Full,
    /// Project the snapshot through the allow-list before merging
    AllowListOnly,
}

/// Persistence configuration for a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistOptions {
    /// Field allow-list; `None` persists the whole state
    pub fields: Option<Vec<String>>,
    pub write_policy: WritePolicy,
    pub restore_policy: RestorePolicy,
}

impl PersistOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist only the named top-level fields
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let mut picked: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !picked.contains(&field) {
                picked.push(field);
            }
        }
        self.fields = Some(picked);
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }

    /// Compute what would be written for `state`
    pub fn state_to_save<S: Serialize>(&self, key: &str, state: &S) -> Result<Value> {
        let value = serde_json::to_value(state).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        Ok(match &self.fields {
            Some(fields) => project(&value, fields),
            None => value,
        })
    }
}

/// Read the snapshot under `key` and merge it over `initial`.
///
/// Performs exactly one storage read. A missing snapshot yields `initial`
/// unchanged; a malformed one is an error.
pub fn restore<S, St>(storage: &St, key: &str, initial: S, options: &PersistOptions) -> Result<S>
where
    S: Serialize + DeserializeOwned,
    St: Storage + ?Sized,
{
    let Some(text) = storage.get_item(key)? else {
        log::debug!("No snapshot under '{}', using initial state", key);
        return Ok(initial);
    };

    let mut saved: Value = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        key: key.to_string(),
        source,
    })?;

    if options.restore_policy == RestorePolicy::AllowListOnly
        && let Some(fields) = &options.fields
    {
        saved = project(&saved, fields);
    }

    let defaults = serde_json::to_value(&initial).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    let state = serde_json::from_value(merge(saved, defaults)).map_err(|source| {
        StoreError::Decode {
            key: key.to_string(),
            source,
        }
    })?;

    log::info!("Restored state from '{}'", key);
    Ok(state)
}

/// Write `state` (or its allow-listed projection) under `key`.
///
/// Returns whether a write happened; the write policy may skip it.
pub fn persist<S, St>(storage: &St, key: &str, state: &S, options: &PersistOptions) -> Result<bool>
where
    S: Serialize,
    St: Storage + ?Sized,
{
    let snapshot = options.state_to_save(key, state)?;
    if !options.write_policy.allows(&snapshot) {
        log::debug!("Write gate skipped save for '{}'", key);
        return Ok(false);
    }

    let json = serde_json::to_string(&snapshot).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &json)?;
    log::debug!("Saved '{}' ({} bytes)", key, json.len());
    Ok(true)
}
