//! Document side effects of preference changes
//!
//! Stores never touch the rendered document directly. They call a
//! [`DocumentSink`], which the shell forwards to the webview and tests
//! replace with [`NoopSink`] or [`RecordingSink`].

use crate::core::{Direction, Language, Preference, Theme};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Receiver for "apply preference to environment" calls
pub trait DocumentSink: Send {
    fn apply_language(&mut self, lang: Language);
    fn apply_theme(&mut self, theme: Theme);
}

/// A preference that has a visible effect on the document
pub trait Apply: Preference {
    fn apply_to(self, sink: &mut dyn DocumentSink);
}

impl Apply for Language {
    fn apply_to(self, sink: &mut dyn DocumentSink) {
        sink.apply_language(self);
    }
}

impl Apply for Theme {
    fn apply_to(self, sink: &mut dyn DocumentSink) {
        sink.apply_theme(self);
    }
}

/// Attributes the frontend must carry on `<html>` and `<body>`.
///
/// `None` means the attribute has not been set since load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    /// Root `dir` attribute
    pub dir: Option<Direction>,
    /// Root `lang` attribute
    pub lang: Option<Language>,
    /// Body inline `direction` style
    pub body_direction: Option<Direction>,
    /// Root `dark` class
    pub dark: bool,
}

impl DocumentState {
    /// Inline style string for the body element
    pub fn body_style(&self) -> Option<String> {
        self.body_direction.map(|d| format!("direction: {}", d.as_str()))
    }
}

impl DocumentSink for DocumentState {
    fn apply_language(&mut self, lang: Language) {
        let dir = lang.direction();
        self.dir = Some(dir);
        self.lang = Some(lang);
        self.body_direction = Some(dir);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.dark = theme.root_class().is_some();
    }
}

/// Document state shared between the stores and the shell
#[derive(Debug, Clone, Default)]
pub struct SharedDocument {
    inner: Arc<Mutex<DocumentState>>,
}

impl SharedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the currently applied attributes
    pub fn snapshot(&self) -> DocumentState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentSink for SharedDocument {
    fn apply_language(&mut self, lang: Language) {
        self.lock().apply_language(lang);
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.lock().apply_theme(theme);
    }
}

/// Discards every change
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DocumentSink for NoopSink {
    fn apply_language(&mut self, _lang: Language) {}
    fn apply_theme(&mut self, _theme: Theme) {}
}

/// One applied change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Language(Language),
    Theme(Theme),
}

/// Keeps every applied change in order, for tests and diagnostics
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<DocumentEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DocumentEvent> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    fn push(&self, event: DocumentEvent) {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(event);
    }
}

impl DocumentSink for RecordingSink {
    fn apply_language(&mut self, lang: Language) {
        self.push(DocumentEvent::Language(lang));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.push(DocumentEvent::Theme(theme));
    }
}
