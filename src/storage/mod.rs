//! Key-value storage mediums for persisted preferences
//!
//! Provides the mediums a preference can live in:
//! - Cookie jar: primary, with expiry and transmission flags
//! - Local storage: SQLite-backed secondary mirror
//! - Memory: in-process map for tests and degraded startup
//!
//! [`StorageChain`] orders them: reads try each medium in turn,
//! writes go to the primary and best-effort to the rest.

mod cookie;
mod local;
mod memory;

pub use cookie::CookieJar;
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::core::{Result, StorageConfig};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Cookie same-site policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Accepted range for configured cookie lifetimes, in days
pub const COOKIE_AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;
const FALLBACK_COOKIE_AGE_DAYS: i64 = 365;

/// Options applied when writing a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Lifetime of the entry; `None` keeps it until removed
    pub max_age: Option<Duration>,
    pub same_site: SameSite,
    pub secure: bool,
}

impl SetOptions {
    /// Long-lived strict options used for preference cookies.
    ///
    /// A lifetime outside [`COOKIE_AGE_RANGE`] falls back to one year.
    pub fn persistent(config: &StorageConfig) -> Self {
        let days = if COOKIE_AGE_RANGE.contains(&config.cookie_max_age_days) {
            config.cookie_max_age_days
        } else {
            log::warn!(
                "cookie_max_age_days = {} is outside {:?}, using {}",
                config.cookie_max_age_days, COOKIE_AGE_RANGE, FALLBACK_COOKIE_AGE_DAYS
            );
            FALLBACK_COOKIE_AGE_DAYS
        };
        Self {
            max_age: Some(Duration::days(days)),
            same_site: config.same_site,
            secure: config.secure,
        }
    }
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            max_age: None,
            same_site: SameSite::Lax,
            secure: false,
        }
    }
}

/// Trait for key-value persistence mediums
pub trait StorageMedium {
    /// Name of this medium, for logs
    fn name(&self) -> &str;

    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value. Takes effect before returning.
    fn set(&mut self, key: &str, value: &str, options: &SetOptions) -> Result<()>;

    /// Delete a value. Deleting a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Ordered list of mediums, primary first
pub struct StorageChain {
    mediums: Vec<Box<dyn StorageMedium + Send>>,
}

impl StorageChain {
    /// Create a chain with its authoritative medium
    pub fn new(primary: impl StorageMedium + Send + 'static) -> Self {
        Self {
            mediums: vec![Box::new(primary)],
        }
    }

    /// Append a secondary medium
    pub fn with_fallback(mut self, medium: impl StorageMedium + Send + 'static) -> Self {
        self.mediums.push(Box::new(medium));
        self
    }

    /// Primary cookie jar plus local storage mirror in `dir`.
    ///
    /// A medium that cannot be opened is replaced by an in-memory one so
    /// the session still works without persistence.
    pub fn open_default(dir: &std::path::Path) -> Self {
        let primary: Box<dyn StorageMedium + Send> = match CookieJar::open(dir.join("cookies.json")) {
            Ok(jar) => Box::new(jar),
            Err(e) => {
                log::warn!("Failed to open cookie jar, preferences will not persist: {}", e);
                Box::new(MemoryStorage::new())
            }
        };
        let secondary: Box<dyn StorageMedium + Send> = match LocalStorage::open(&dir.join("local-storage.db")) {
            Ok(local) => Box::new(local),
            Err(e) => {
                log::warn!("Failed to open local storage: {}", e);
                Box::new(MemoryStorage::new())
            }
        };
        Self {
            mediums: vec![primary, secondary],
        }
    }

    /// Number of mediums in the chain
    pub fn len(&self) -> usize {
        self.mediums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mediums.is_empty()
    }

    /// Access a medium by position (0 is the primary)
    pub fn medium(&self, index: usize) -> Option<&(dyn StorageMedium + Send)> {
        self.mediums.get(index).map(|m| m.as_ref())
    }

    /// Walk the mediums in order and return the first value `accept` takes.
    ///
    /// The primary is read under `key`, the others under `backup_key`.
    /// Read errors count as absent.
    pub fn resolve<T>(
        &self,
        key: &str,
        backup_key: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Option<T> {
        for (index, medium) in self.mediums.iter().enumerate() {
            let lookup = if index == 0 { key } else { backup_key };
            match medium.get(lookup) {
                Ok(Some(raw)) => match accept(&raw) {
                    Some(value) => {
                        log::debug!("Resolved {} from {}", lookup, medium.name());
                        return Some(value);
                    }
                    None => log::debug!("Ignoring invalid value {:?} for {} in {}", raw, lookup, medium.name()),
                },
                Ok(None) => {}
                Err(e) => log::warn!("Failed to read {} from {}: {}", lookup, medium.name(), e),
            }
        }
        None
    }

    /// Write to the authoritative medium
    pub fn write_primary(&mut self, key: &str, value: &str, options: &SetOptions) -> Result<()> {
        match self.mediums.first_mut() {
            Some(primary) => primary.set(key, value, options),
            None => Ok(()),
        }
    }

    /// Best-effort copy to every secondary medium
    pub fn mirror(&mut self, backup_key: &str, value: &str) {
        for medium in self.mediums.iter_mut().skip(1) {
            if let Err(e) = medium.set(backup_key, value, &SetOptions::default()) {
                log::debug!("Mirror write to {} failed: {}", medium.name(), e);
            }
        }
    }

    /// Remove from every medium, reporting the first failure
    pub fn remove(&mut self, key: &str, backup_key: &str) -> Result<()> {
        let mut first_error = None;
        for (index, medium) in self.mediums.iter_mut().enumerate() {
            let lookup = if index == 0 { key } else { backup_key };
            if let Err(e) = medium.remove(lookup) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
