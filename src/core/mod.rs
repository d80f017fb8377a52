//! Core module - configuration, errors, and preference types

mod config;
mod error;
mod types;

pub use config::{Config, CurrencyConfig, GeneralConfig, QrConfig, StorageConfig, TaxConfig, ZakatConfig};
pub use error::{Error, Result};
pub use types::{Direction, Language, Preference, Theme};
