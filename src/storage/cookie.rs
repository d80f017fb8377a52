//! File-backed cookie jar, the authoritative preference medium

use crate::core::{Error, Result};
use crate::storage::{SameSite, SetOptions, StorageMedium};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// A stored cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieRecord {
    pub value: String,
    /// `None` for session-less cookies that never expire
    pub expires_at: Option<DateTime<Utc>>,
    pub same_site: SameSite,
    pub secure: bool,
}

impl CookieRecord {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Cookie store persisted as a JSON file.
///
/// Every call goes to disk, so several jars opened on the same file see
/// each other's writes the way tabs share one browser cookie store.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    /// Open the jar at `path`. A missing file is an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let jar = Self { path: path.into() };
        jar.load()?;
        Ok(jar)
    }

    /// Full record for a live cookie
    pub fn record(&self, name: &str) -> Result<Option<CookieRecord>> {
        let now = Utc::now();
        Ok(self.load()?.remove(name).filter(|c| !c.is_expired(now)))
    }

    fn load(&self) -> Result<BTreeMap<String, CookieRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, mut cookies: BTreeMap<String, CookieRecord>) -> Result<()> {
        let now = Utc::now();
        cookies.retain(|_, c| !c.is_expired(now));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&cookies)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageMedium for CookieJar {
    fn name(&self) -> &str {
        "cookies"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.record(key)?.map(|c| c.value))
    }

    fn set(&mut self, key: &str, value: &str, options: &SetOptions) -> Result<()> {
        let expires_at = match options.max_age {
            Some(age) => Some(Utc::now().checked_add_signed(age).ok_or_else(|| {
                Error::InvalidInput(format!("cookie lifetime {} is out of range", age))
            })?),
            None => None,
        };
        let record = CookieRecord {
            value: value.to_string(),
            expires_at,
            same_site: options.same_site,
            secure: options.secure,
        };
        let mut cookies = self.load()?;
        cookies.insert(key.to_string(), record);
        self.save(cookies)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut cookies = self.load()?;
        if cookies.remove(key).is_some() {
            self.save(cookies)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn strict_year() -> SetOptions {
        SetOptions {
            max_age: Some(Duration::days(365)),
            same_site: SameSite::Strict,
            secure: true,
        }
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = CookieJar::open(&path).unwrap();
        jar.set("rabwa-language", "en", &strict_year()).unwrap();

        let reopened = CookieJar::open(&path).unwrap();
        assert_eq!(reopened.get("rabwa-language").unwrap().as_deref(), Some("en"));

        let record = reopened.record("rabwa-language").unwrap().unwrap();
        assert_eq!(record.same_site, SameSite::Strict);
        assert!(record.secure);
        let expires = record.expires_at.unwrap();
        assert!(expires > Utc::now() + Duration::days(364));
    }

    #[test]
    fn test_expired_cookie_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut jar = CookieJar::open(dir.path().join("cookies.json")).unwrap();

        let expired = SetOptions {
            max_age: Some(Duration::seconds(-1)),
            ..strict_year()
        };
        jar.set("rabwa-theme", "dark", &expired).unwrap();
        assert_eq!(jar.get("rabwa-theme").unwrap(), None);
    }

    #[test]
    fn test_unrepresentable_expiry_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let mut jar = CookieJar::open(&path).unwrap();

        let forever = SetOptions {
            max_age: Some(Duration::days(1_000_000_000)),
            ..strict_year()
        };
        assert!(matches!(
            jar.set("rabwa-language", "en", &forever),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(jar.get("rabwa-language").unwrap(), None);
    }

    #[test]
    fn test_jars_on_same_file_share_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let mut language = CookieJar::open(&path).unwrap();
        let mut theme = CookieJar::open(&path).unwrap();

        language.set("rabwa-language", "en", &strict_year()).unwrap();
        theme.set("rabwa-theme", "dark", &strict_year()).unwrap();

        assert_eq!(language.get("rabwa-theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(theme.get("rabwa-language").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_missing_file_is_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = CookieJar::open(dir.path().join("nested").join("cookies.json")).unwrap();
        assert_eq!(jar.get("anything").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "{not json").unwrap();
        assert!(CookieJar::open(&path).is_err());
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let mut jar = CookieJar::open(&path).unwrap();
        jar.set("k", "v", &strict_year()).unwrap();
        jar.remove("k").unwrap();
        jar.remove("k").unwrap();

        assert_eq!(CookieJar::open(&path).unwrap().get("k").unwrap(), None);
    }
}
