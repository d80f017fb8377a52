//! Preference persistence across simulated reloads

use rabwa_lib::core::{Config, Direction, Language, Preference, Theme};
use rabwa_lib::prefs::{open_provider, ProviderView, SharedDocument};
use rabwa_lib::storage::{CookieJar, LocalStorage, SetOptions, StorageMedium};
use std::path::Path;

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = Some(dir.to_path_buf());
    config
}

#[test]
fn fresh_install_uses_arabic_light() {
    let dir = tempfile::tempdir().unwrap();
    let document = SharedDocument::new();
    let mut provider = open_provider(&config_in(dir.path()), &document).unwrap();

    assert_eq!(provider.view(), ProviderView::Placeholder);
    let snapshot = provider.mount();

    assert_eq!(snapshot.language, Language::Ar);
    assert_eq!(snapshot.theme, Theme::Light);
    let doc = document.snapshot();
    assert_eq!(doc.dir, Some(Direction::Rtl));
    assert_eq!(doc.lang, Some(Language::Ar));
    assert!(!doc.dark);
}

#[test]
fn choices_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    {
        let document = SharedDocument::new();
        let mut provider = open_provider(&config, &document).unwrap();
        provider.mount();
        provider.set_language(Language::En).unwrap();
        provider.toggle_theme().unwrap();
    }

    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).unwrap();
    let snapshot = provider.mount();
    assert_eq!(snapshot.language, Language::En);
    assert_eq!(snapshot.theme, Theme::Dark);
    assert_eq!(document.snapshot().dir, Some(Direction::Ltr));
    assert!(document.snapshot().dark);
    assert_eq!(provider.translate("app.title").unwrap(), "Rabwa Toolbox");
}

#[test]
fn lost_cookie_falls_back_to_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    {
        let document = SharedDocument::new();
        let mut provider = open_provider(&config, &document).unwrap();
        provider.mount();
        provider.set_language(Language::En).unwrap();
    }

    // Cookies cleared by the user, local storage intact
    std::fs::remove_file(dir.path().join("cookies.json")).unwrap();

    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).unwrap();
    assert_eq!(provider.mount().language, Language::En);
}

#[test]
fn cookie_wins_over_disagreeing_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut jar = CookieJar::open(dir.path().join("cookies.json")).unwrap();
    jar.set(Language::STORAGE_KEY, "en", &SetOptions::persistent(&config.storage)).unwrap();
    let mut local = LocalStorage::open(&dir.path().join("local-storage.db")).unwrap();
    local.set(&Language::backup_key(), "ar", &SetOptions::default()).unwrap();

    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).unwrap();
    assert_eq!(provider.mount().language, Language::En);
}

#[test]
fn garbage_values_resolve_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut jar = CookieJar::open(dir.path().join("cookies.json")).unwrap();
    let options = SetOptions::persistent(&config.storage);
    jar.set(Language::STORAGE_KEY, "fr", &options).unwrap();
    jar.set(Theme::STORAGE_KEY, "sepia", &options).unwrap();

    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).unwrap();
    let snapshot = provider.mount();
    assert_eq!(snapshot.language, Language::Ar);
    assert_eq!(snapshot.theme, Theme::Light);
}

#[test]
fn operations_before_mount_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let document = SharedDocument::new();
    let mut provider = open_provider(&config_in(dir.path()), &document).unwrap();

    assert!(provider.set_language(Language::En).is_err());
    assert!(provider.context().is_err());
    assert_eq!(document.snapshot().lang, None);
}

#[test]
fn negative_cookie_lifetime_still_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.storage.cookie_max_age_days = -1;

    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).unwrap();
    provider.mount();
    provider.set_language(Language::En).unwrap();

    let jar = CookieJar::open(dir.path().join("cookies.json")).unwrap();
    assert_eq!(jar.get(Language::STORAGE_KEY).unwrap().as_deref(), Some("en"));
}
