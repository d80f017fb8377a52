//! Internationalization module
//!
//! Provides translations for Arabic (ar) and English (en).
//! Tables are nested JSON embedded in the binary and parsed once.
//! Lookups use dotted key paths; a missing key resolves to itself.

use crate::core::{Language, Preference};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static AR: LazyLock<Value> = LazyLock::new(|| parse_table(Language::Ar, include_str!("locales/ar.json")));
static EN: LazyLock<Value> = LazyLock::new(|| parse_table(Language::En, include_str!("locales/en.json")));

fn parse_table(lang: Language, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("Failed to parse {} translations: {}", lang, e);
        Value::Null
    })
}

/// Translation table for a language
pub fn table(lang: Language) -> &'static Value {
    match lang {
        Language::Ar => &*AR,
        Language::En => &*EN,
    }
}

/// Look up a dotted key in a table.
///
/// Returns the key itself when any segment is missing or the final node
/// is not a string.
pub fn resolve(table: &Value, key: &str) -> String {
    let mut node = table;
    for segment in key.split('.') {
        match node.get(segment) {
            Some(next) => node = next,
            None => return key.to_string(),
        }
    }
    node.as_str().map(str::to_string).unwrap_or_else(|| key.to_string())
}

/// Flatten a table into `dotted.key -> text` pairs
pub fn flatten(table: &Value) -> HashMap<String, String> {
    fn walk(node: &Value, prefix: &mut String, out: &mut HashMap<String, String>) {
        match node {
            Value::Object(map) => {
                for (segment, child) in map {
                    let len = prefix.len();
                    if !prefix.is_empty() {
                        prefix.push('.');
                    }
                    prefix.push_str(segment);
                    walk(child, prefix, out);
                    prefix.truncate(len);
                }
            }
            Value::String(text) => {
                out.insert(prefix.clone(), text.clone());
            }
            _ => {}
        }
    }

    let mut out = HashMap::new();
    walk(table, &mut String::new(), &mut out);
    out
}

/// Internationalization manager
pub struct I18n {
    current_lang: Language,
}

impl I18n {
    /// Create a new I18n instance with the specified language
    pub fn new(lang: Language) -> Self {
        Self { current_lang: lang }
    }

    /// Create from a language code, `"auto"` detecting the system language
    pub fn from_code(code: &str) -> Self {
        let lang = if code == "auto" {
            detect_system_language()
        } else {
            Language::parse(code).unwrap_or(Language::DEFAULT)
        };
        Self::new(lang)
    }

    /// Set the current language
    pub fn set_language(&mut self, lang: Language) {
        self.current_lang = lang;
        log::info!("Language set to: {}", self.current_lang);
    }

    /// Get a translated string by key
    pub fn get(&self, key: &str) -> String {
        resolve(table(self.current_lang), key)
    }

    /// Get all translations
    pub fn get_all(&self) -> HashMap<String, String> {
        flatten(table(self.current_lang))
    }

    /// Get the current language
    pub fn current_language(&self) -> Language {
        self.current_lang
    }

    /// Get available languages
    pub fn available_languages() -> Vec<(&'static str, &'static str)> {
        Language::all().iter().map(|l| (l.as_str(), l.label())).collect()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::from_code("auto")
    }
}

/// Detect system language
pub fn detect_system_language() -> Language {
    let lang_env = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default();

    language_from_locale(&lang_env)
}

/// Map a POSIX locale string (e.g. `ar_SA.UTF-8`) to a supported language
pub fn language_from_locale(locale: &str) -> Language {
    let code = locale
        .split(['_', '.', '-', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match code.as_str() {
        "ar" => Language::Ar,
        "en" => Language::En,
        _ => Language::DEFAULT,
    }
}
