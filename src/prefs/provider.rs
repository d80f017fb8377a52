//! Hydration guard around the preference stores
//!
//! The UI tree renders a placeholder until [`PreferenceProvider::mount`]
//! has initialized both stores and reapplied their document attributes.
//! Only then does it expose a [`PreferenceContext`] to consumers.

use crate::core::{Direction, Error, Language, Result, Theme};
use crate::prefs::store::PreferenceStore;
use serde::Serialize;

/// Whether preferences have been loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderState {
    Loading,
    Ready,
}

/// What the shell should render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "preferences", rename_all = "lowercase")]
pub enum ProviderView {
    Placeholder,
    Ready(PreferenceSnapshot),
}

/// Current preferences plus the derived root attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceSnapshot {
    pub language: Language,
    pub theme: Theme,
    pub direction: Direction,
}

/// Owns the language and theme stores for one UI tree
pub struct PreferenceProvider {
    state: ProviderState,
    language: PreferenceStore<Language>,
    theme: PreferenceStore<Theme>,
}

impl PreferenceProvider {
    pub fn new(language: PreferenceStore<Language>, theme: PreferenceStore<Theme>) -> Self {
        Self {
            state: ProviderState::Loading,
            language,
            theme,
        }
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    /// Load both preferences and switch to `Ready`. Runs once.
    pub fn mount(&mut self) -> PreferenceSnapshot {
        if self.state == ProviderState::Ready {
            return self.snapshot();
        }

        self.language.initialize();
        self.language.revalidate();
        self.theme.initialize();
        self.theme.reapply();

        self.state = ProviderState::Ready;
        let snapshot = self.snapshot();
        log::info!(
            "Preferences ready: language={} theme={} dir={}",
            snapshot.language,
            snapshot.theme,
            snapshot.direction.as_str()
        );
        snapshot
    }

    /// Placeholder until mounted, then the current preferences
    pub fn view(&self) -> ProviderView {
        match self.state {
            ProviderState::Loading => ProviderView::Placeholder,
            ProviderState::Ready => ProviderView::Ready(self.snapshot()),
        }
    }

    /// Access for consumers; fails before mount
    pub fn context(&mut self) -> Result<PreferenceContext<'_>> {
        match self.state {
            ProviderState::Loading => Err(Error::NotReady),
            ProviderState::Ready => Ok(PreferenceContext {
                language: &mut self.language,
                theme: &mut self.theme,
            }),
        }
    }

    pub fn set_language(&mut self, lang: Language) -> Result<PreferenceSnapshot> {
        self.context()?.set_language(lang);
        Ok(self.snapshot())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<PreferenceSnapshot> {
        self.context()?.set_theme(theme);
        Ok(self.snapshot())
    }

    pub fn toggle_language(&mut self) -> Result<PreferenceSnapshot> {
        self.context()?.toggle_language();
        Ok(self.snapshot())
    }

    pub fn toggle_theme(&mut self) -> Result<PreferenceSnapshot> {
        self.context()?.toggle_theme();
        Ok(self.snapshot())
    }

    pub fn translate(&mut self, key: &str) -> Result<String> {
        Ok(self.context()?.translate(key))
    }

    fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            language: self.language.active(),
            theme: self.theme.active(),
            direction: self.language.direction(),
        }
    }
}

/// Preferences and their operations, available once mounted
pub struct PreferenceContext<'a> {
    language: &'a mut PreferenceStore<Language>,
    theme: &'a mut PreferenceStore<Theme>,
}

impl PreferenceContext<'_> {
    pub fn language(&self) -> Language {
        self.language.active()
    }

    pub fn theme(&self) -> Theme {
        self.theme.active()
    }

    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    pub fn set_language(&mut self, lang: Language) {
        self.language.set(lang);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme.set(theme);
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language.toggle()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    pub fn translate(&self, key: &str) -> String {
        self.language.get_translation(key)
    }
}
