//! Preference store: one owned value, its storage, and its document effect

use crate::core::{Direction, Language, Preference, StorageConfig};
use crate::i18n;
use crate::prefs::environment::{Apply, DocumentSink};
use crate::storage::{SetOptions, StorageChain};

/// Lifecycle of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState<P> {
    Uninitialized,
    Initialized(P),
}

/// Sole owner and writer of one preference
pub struct PreferenceStore<P: Apply> {
    state: StoreState<P>,
    fallback: P,
    storage: StorageChain,
    sink: Box<dyn DocumentSink>,
    options: SetOptions,
}

impl<P: Apply> PreferenceStore<P> {
    /// Create an uninitialized store
    pub fn new(storage: StorageChain, sink: impl DocumentSink + 'static) -> Self {
        Self {
            state: StoreState::Uninitialized,
            fallback: P::DEFAULT,
            storage,
            sink: Box::new(sink),
            options: SetOptions::persistent(&StorageConfig::default()),
        }
    }

    /// Value used when no medium holds a valid entry
    pub fn with_fallback(mut self, fallback: P) -> Self {
        self.fallback = fallback;
        self
    }

    /// Options used for primary writes
    pub fn with_options(mut self, options: SetOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> StoreState<P> {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, StoreState::Initialized(_))
    }

    /// Held value, `None` before initialization
    pub fn value(&self) -> Option<P> {
        match self.state {
            StoreState::Initialized(value) => Some(value),
            StoreState::Uninitialized => None,
        }
    }

    /// Held value, or the fallback before initialization
    pub fn active(&self) -> P {
        self.value().unwrap_or(self.fallback)
    }

    /// Resolve the stored value and apply it to the document.
    ///
    /// Runs once; later calls return the held value.
    pub fn initialize(&mut self) -> P {
        if let StoreState::Initialized(value) = self.state {
            return value;
        }

        let value = self.load().unwrap_or(self.fallback);
        self.state = StoreState::Initialized(value);
        value.apply_to(self.sink.as_mut());

        log::info!("{} initialized to {}", P::STORAGE_KEY, value.as_str());
        value
    }

    /// Held value, initializing first if needed
    pub fn current(&mut self) -> P {
        self.initialize()
    }

    /// Change the preference.
    ///
    /// The document is updated before anything is written. A failed
    /// primary write is logged and otherwise ignored; the session keeps
    /// the new value.
    pub fn set(&mut self, value: P) {
        self.state = StoreState::Initialized(value);
        value.apply_to(self.sink.as_mut());

        if let Err(e) = self.storage.write_primary(P::STORAGE_KEY, value.as_str(), &self.options) {
            log::warn!("Failed to persist {}={}: {}", P::STORAGE_KEY, value.as_str(), e);
        }
        self.storage.mirror(&P::backup_key(), value.as_str());

        log::debug!("{} set to {}", P::STORAGE_KEY, value.as_str());
    }

    /// Switch to the other value
    pub fn toggle(&mut self) -> P {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Re-read storage and adopt its value if it disagrees with the held
    /// one, then reapply to the document.
    ///
    /// Storage with no valid entry leaves the held value in place.
    pub fn revalidate(&mut self) -> P {
        let held = self.initialize();
        let value = match self.load() {
            Some(stored) if stored != held => {
                log::info!("{} changed in storage: {} -> {}", P::STORAGE_KEY, held.as_str(), stored.as_str());
                self.state = StoreState::Initialized(stored);
                stored
            }
            _ => held,
        };
        value.apply_to(self.sink.as_mut());
        value
    }

    /// Apply the held value to the document again
    pub fn reapply(&mut self) {
        let value = self.current();
        value.apply_to(self.sink.as_mut());
    }

    fn load(&self) -> Option<P> {
        self.storage.resolve(P::STORAGE_KEY, &P::backup_key(), P::parse)
    }
}

impl PreferenceStore<Language> {
    /// Text direction of the active language
    pub fn direction(&self) -> Direction {
        self.active().direction()
    }

    /// Translate a dotted key in the active language
    pub fn get_translation(&self, key: &str) -> String {
        i18n::resolve(i18n::table(self.active()), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Theme;
    use crate::prefs::environment::{DocumentEvent, NoopSink, RecordingSink};
    use crate::storage::{MemoryStorage, StorageMedium};

    fn mediums() -> (MemoryStorage, MemoryStorage) {
        (MemoryStorage::new(), MemoryStorage::new())
    }

    fn store<P: Apply>(primary: &MemoryStorage, backup: &MemoryStorage) -> PreferenceStore<P> {
        let chain = StorageChain::new(primary.clone()).with_fallback(backup.clone());
        PreferenceStore::new(chain, NoopSink)
    }

    #[test]
    fn test_starts_uninitialized() {
        let (primary, backup) = mediums();
        let store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.state(), StoreState::Uninitialized);
        assert_eq!(store.value(), None);
    }

    #[test]
    fn test_default_when_nothing_stored() {
        let (primary, backup) = mediums();
        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.initialize(), Language::Ar);
        assert_eq!(store.state(), StoreState::Initialized(Language::Ar));
    }

    #[test]
    fn test_configured_fallback() {
        let (primary, backup) = mediums();
        let mut store = store::<Theme>(&primary, &backup).with_fallback(Theme::Dark);
        assert_eq!(store.initialize(), Theme::Dark);
    }

    #[test]
    fn test_secondary_used_when_primary_missing() {
        let (primary, mut backup) = mediums();
        backup.set("rabwa-language-backup", "en", &SetOptions::default()).unwrap();

        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.initialize(), Language::En);
    }

    #[test]
    fn test_invalid_primary_skipped() {
        let (mut primary, mut backup) = mediums();
        primary.set("rabwa-language", "fr", &SetOptions::default()).unwrap();
        backup.set("rabwa-language-backup", "en", &SetOptions::default()).unwrap();

        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.initialize(), Language::En);
    }

    #[test]
    fn test_invalid_everywhere_gives_default() {
        let (mut primary, mut backup) = mediums();
        primary.set("rabwa-theme", "neon", &SetOptions::default()).unwrap();
        backup.set("rabwa-theme-backup", "", &SetOptions::default()).unwrap();

        let mut store: PreferenceStore<Theme> = store(&primary, &backup);
        assert_eq!(store.initialize(), Theme::Light);
    }

    #[test]
    fn test_primary_authoritative_over_secondary() {
        let (mut primary, mut backup) = mediums();
        primary.set("rabwa-language", "ar", &SetOptions::default()).unwrap();
        backup.set("rabwa-language-backup", "en", &SetOptions::default()).unwrap();

        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.initialize(), Language::Ar);
    }

    #[test]
    fn test_initialize_runs_once() {
        let (mut primary, backup) = mediums();
        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        assert_eq!(store.initialize(), Language::Ar);

        primary.set("rabwa-language", "en", &SetOptions::default()).unwrap();
        assert_eq!(store.initialize(), Language::Ar);
    }

    #[test]
    fn test_set_writes_both_mediums() {
        let (primary, backup) = mediums();
        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        store.initialize();
        store.set(Language::En);

        assert_eq!(store.value(), Some(Language::En));
        assert_eq!(primary.get("rabwa-language").unwrap().as_deref(), Some("en"));
        assert_eq!(backup.get("rabwa-language-backup").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_set_survives_reload() {
        let (primary, backup) = mediums();
        for lang in Language::all() {
            let mut first: PreferenceStore<Language> = store(&primary, &backup);
            first.initialize();
            first.set(*lang);

            let mut reloaded: PreferenceStore<Language> = store(&primary, &backup);
            assert_eq!(reloaded.initialize(), *lang);
        }
    }

    #[test]
    fn test_document_updated_before_and_despite_failed_write() {
        let sink = RecordingSink::new();
        let backup = MemoryStorage::new();
        let chain = StorageChain::new(MemoryStorage::failing()).with_fallback(backup.clone());
        let mut store: PreferenceStore<Language> = PreferenceStore::new(chain, sink.clone());

        store.initialize();
        store.set(Language::En);

        assert_eq!(store.value(), Some(Language::En));
        assert_eq!(store.direction(), Direction::Ltr);
        assert_eq!(
            sink.events(),
            vec![DocumentEvent::Language(Language::Ar), DocumentEvent::Language(Language::En)]
        );
        // The mirror still ran.
        assert_eq!(backup.get("rabwa-language-backup").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_failed_mirror_keeps_primary() {
        let primary = MemoryStorage::new();
        let chain = StorageChain::new(primary.clone()).with_fallback(MemoryStorage::failing());
        let mut store: PreferenceStore<Theme> = PreferenceStore::new(chain, NoopSink);

        store.set(Theme::Dark);
        assert_eq!(store.value(), Some(Theme::Dark));
        assert_eq!(primary.get("rabwa-theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle() {
        let (primary, backup) = mediums();
        let mut store: PreferenceStore<Theme> = store(&primary, &backup);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(primary.get("rabwa-theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_revalidate_adopts_storage_change() {
        let (mut primary, backup) = mediums();
        let sink = RecordingSink::new();
        let chain = StorageChain::new(primary.clone()).with_fallback(backup.clone());
        let mut store: PreferenceStore<Language> = PreferenceStore::new(chain, sink.clone());
        store.initialize();

        primary.set("rabwa-language", "en", &SetOptions::default()).unwrap();
        assert_eq!(store.revalidate(), Language::En);
        assert_eq!(sink.events().last(), Some(&DocumentEvent::Language(Language::En)));
    }

    #[test]
    fn test_revalidate_keeps_value_when_storage_empty() {
        let (mut primary, mut backup) = mediums();
        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        store.set(Language::En);
        primary.remove("rabwa-language").unwrap();
        backup.remove("rabwa-language-backup").unwrap();

        assert_eq!(store.revalidate(), Language::En);
    }

    #[test]
    fn test_translation_follows_language() {
        let (primary, backup) = mediums();
        let mut store: PreferenceStore<Language> = store(&primary, &backup);
        store.set(Language::En);
        assert_eq!(store.get_translation("nav.home"), "Home");
        assert_eq!(store.get_translation("nav.missing"), "nav.missing");
        store.set(Language::Ar);
        assert_ne!(store.get_translation("nav.home"), "Home");
        assert_eq!(store.direction(), Direction::Rtl);
    }
}
