//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;

/// A small enumerated user setting that affects presentation only.
///
/// Implementors are closed sets of values with a canonical lowercase
/// string form, which is also what gets persisted.
pub trait Preference: Copy + Eq + fmt::Debug + Send + 'static {
    /// Key used on the primary storage medium.
    const STORAGE_KEY: &'static str;

    /// Built-in value used when no medium holds a valid entry.
    const DEFAULT: Self;

    /// Every valid value, in display order.
    fn all() -> &'static [Self];

    /// Canonical persisted form.
    fn as_str(&self) -> &'static str;

    /// The other value of a two-valued preference.
    fn toggled(self) -> Self;

    /// Parse a persisted value. Anything outside the valid set is `None`.
    fn parse(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == raw)
    }

    /// Key used on the secondary (backup) mediums.
    fn backup_key() -> String {
        format!("{}-backup", Self::STORAGE_KEY)
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    En,
}

impl Language {
    /// Text direction used by this language
    pub fn direction(self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::En => Direction::Ltr,
        }
    }

    /// Native display name
    pub fn label(self) -> &'static str {
        match self {
            Language::Ar => "\u{0627}\u{0644}\u{0639}\u{0631}\u{0628}\u{064A}\u{0629}",
            Language::En => "English",
        }
    }
}

impl Preference for Language {
    const STORAGE_KEY: &'static str = "rabwa-language";
    const DEFAULT: Self = Language::Ar;

    fn all() -> &'static [Self] {
        &[Language::Ar, Language::En]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Class toggled on the document root, if any
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

impl Preference for Theme {
    const STORAGE_KEY: &'static str = "rabwa-theme";
    const DEFAULT: Self = Theme::Light;

    fn all() -> &'static [Self] {
        &[Theme::Light, Theme::Dark]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text flow direction, derived from the language and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}
