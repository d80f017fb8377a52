//! Language and theme preferences
//!
//! - [`PreferenceStore`]: single owner of one preference and its persistence
//! - [`DocumentSink`]: where the document side effects go
//! - [`PreferenceProvider`]: loading/ready guard that hands out the stores

mod environment;
mod provider;
mod store;

pub use environment::{
    Apply, DocumentEvent, DocumentSink, DocumentState, NoopSink, RecordingSink, SharedDocument,
};
pub use provider::{PreferenceContext, PreferenceProvider, PreferenceSnapshot, ProviderState, ProviderView};
pub use store::{PreferenceStore, StoreState};

use crate::core::{Config, Result};
use crate::storage::{SetOptions, StorageChain};

/// Build the provider for the configured data directory.
///
/// Both stores share the same cookie file and local storage database.
pub fn open_provider(config: &Config, document: &SharedDocument) -> Result<PreferenceProvider> {
    let dir = config.data_dir()?;
    let options = SetOptions::persistent(&config.storage);

    let language = PreferenceStore::new(StorageChain::open_default(&dir), document.clone())
        .with_fallback(config.general.default_language)
        .with_options(options);
    let theme = PreferenceStore::new(StorageChain::open_default(&dir), document.clone())
        .with_fallback(config.general.default_theme)
        .with_options(options);

    Ok(PreferenceProvider::new(language, theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Language, Theme};

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn test_open_provider_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        {
            let doc = SharedDocument::new();
            let mut provider = open_provider(&config, &doc).unwrap();
            provider.mount();
            provider.set_language(Language::En).unwrap();
            provider.set_theme(Theme::Dark).unwrap();
        }

        let doc = SharedDocument::new();
        let mut provider = open_provider(&config, &doc).unwrap();
        let snapshot = provider.mount();
        assert_eq!(snapshot.language, Language::En);
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(doc.snapshot().dir, Some(Direction::Ltr));
        assert!(dir.path().join("cookies.json").exists());
        assert!(dir.path().join("local-storage.db").exists());
    }

    #[test]
    fn test_configured_defaults_apply_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.general.default_language = Language::En;

        let doc = SharedDocument::new();
        let snapshot = open_provider(&config, &doc).unwrap().mount();
        assert_eq!(snapshot.language, Language::En);
        assert_eq!(snapshot.theme, Theme::Light);
    }
}
