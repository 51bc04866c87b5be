//! Single-slot memoized values shared across one run
//!
//! A [`Memo`] holds at most one value. [`Memo::get_or_load`] populates it on
//! first access and returns the stored value afterwards; [`Memo::refresh`]
//! always runs the loader and replaces the stored value.
//!
//! The slot is guarded by a mutex but the loader runs outside of it, so two
//! threads hitting an empty slot at once may both run the loader. The last
//! one to finish wins. Loaders are deterministic for a fixed filesystem, which
//! makes that race harmless.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::error::{Error, Result};

/// A named, single-valued cache slot
#[derive(Debug)]
pub struct Memo<T> {
    name: &'static str,
    slot: Arc<Mutex<Option<Arc<T>>>>,
}

impl<T> Memo<T> {
    /// Create an empty slot. `name` is only used for logging.
    pub fn new(name: &'static str) -> Self {
        debug!("Creating cache for \"{}\"", name);
        Self {
            name,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the cached value, running `loader` if the slot is empty
    pub fn get_or_load<F>(&self, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(cached) = self.peek()? {
            debug!("[{}] Retrieving value", self.name);
            return Ok(cached);
        }
        debug!("[{}] Initial load", self.name);
        self.refresh(loader)
    }

    /// Run `loader` and replace whatever the slot held
    ///
    /// On loader failure the previous value is left in place.
    pub fn refresh<F>(&self, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        debug!("[{}] Refreshing", self.name);
        let value = Arc::new(loader()?);
        let mut slot = self.lock()?;
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Current value without loading
    pub fn peek(&self) -> Result<Option<Arc<T>>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Arc<T>>>> {
        self.slot.lock().map_err(|_| Error::LockPoisoned {
            context: format!("cache slot \"{}\"", self.name),
        })
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: Arc::clone(&self.slot),
        }
    }
}
