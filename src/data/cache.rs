//! Session Cache Module
//! Write-once memoization of the load step for one process lifetime.

use std::sync::{Mutex, OnceLock};

use crate::data::loader::{LoadedTables, LoaderError};

/// Caches the result of a successful load for the rest of the process.
///
/// The source files are treated as immutable for the process's lifetime, so
/// there is no invalidation or TTL. Concurrent callers block on the init
/// guard instead of loading twice; a failed load leaves the cache empty so
/// a later call may retry.
pub struct SessionCache {
    tables: OnceLock<LoadedTables>,
    init: Mutex<()>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub const fn new() -> Self {
        Self {
            tables: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Return the cached tables, running `load` on the first call.
    pub fn get_or_load<F>(&self, load: F) -> Result<&LoadedTables, LoaderError>
    where
        F: FnOnce() -> Result<LoadedTables, LoaderError>,
    {
        if let Some(tables) = self.tables.get() {
            return Ok(tables);
        }

        let _guard = self.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(tables) = self.tables.get() {
            return Ok(tables);
        }

        let loaded = load()?;
        Ok(self.tables.get_or_init(|| loaded))
    }
}
