//! Rabwa Toolbox library
//!
//! Preference persistence, translations and the tool calculators, shared
//! by the desktop shell and the demo binary.

pub mod core;
pub mod i18n;
pub mod prefs;
pub mod storage;
pub mod tools;
