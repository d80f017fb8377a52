//! Configuration management

use crate::core::{Error, Language, Preference, Result, Theme};
use crate::storage::SameSite;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "rabwa-toolbox";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub tax: TaxConfig,
    #[serde(default)]
    pub zakat: ZakatConfig,
    #[serde(default)]
    pub qr: QrConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join(APP_DIR);

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from disk, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding the cookie jar and local storage database
    pub fn data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?
                .join(APP_DIR),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language used when nothing is stored yet
    #[serde(default = "default_language")]
    pub default_language: Language,
    /// Theme used when nothing is stored yet
    #[serde(default = "default_theme")]
    pub default_theme: Theme,
}

fn default_language() -> Language { Language::DEFAULT }
fn default_theme() -> Theme { Theme::DEFAULT }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            default_theme: default_theme(),
        }
    }
}

/// Preference persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Lifetime of preference cookies in days
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
    #[serde(default = "default_same_site")]
    pub same_site: SameSite,
    #[serde(default = "default_true")]
    pub secure: bool,
    /// Override for the data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_true() -> bool { true }
fn default_cookie_max_age_days() -> i64 { 365 }
fn default_same_site() -> SameSite { SameSite::Strict }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cookie_max_age_days: default_cookie_max_age_days(),
            same_site: default_same_site(),
            secure: true,
            data_dir: None,
        }
    }
}

/// Exchange rates relative to USD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, f64>,
}

fn default_rates() -> BTreeMap<String, f64> {
    [
        ("USD", 1.0),
        ("SAR", 3.75),
        ("AED", 3.6725),
        ("QAR", 3.64),
        ("KWD", 0.307),
        ("BHD", 0.376),
        ("OMR", 0.385),
        ("EGP", 48.5),
        ("JOD", 0.709),
        ("EUR", 0.92),
        ("GBP", 0.79),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self { rates: default_rates() }
    }
}

/// Tax rates in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfig {
    #[serde(default = "default_corporate_rate")]
    pub corporate_rate: f64,
    /// Withholding rate per payment type
    #[serde(default = "default_withholding_rates")]
    pub withholding_rates: BTreeMap<String, f64>,
}

fn default_corporate_rate() -> f64 { 20.0 }

fn default_withholding_rates() -> BTreeMap<String, f64> {
    [
        ("dividends", 5.0),
        ("interest", 5.0),
        ("royalties", 15.0),
        ("technical_services", 5.0),
        ("management_fees", 20.0),
        ("rent", 5.0),
        ("air_tickets", 5.0),
        ("international_telecom", 5.0),
        ("other", 15.0),
    ]
    .into_iter()
    .map(|(kind, rate)| (kind.to_string(), rate))
    .collect()
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            corporate_rate: default_corporate_rate(),
            withholding_rates: default_withholding_rates(),
        }
    }
}

/// Zakat parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZakatConfig {
    /// Rate in percent
    #[serde(default = "default_zakat_rate")]
    pub rate: f64,
    /// Nisab threshold expressed in grams of gold
    #[serde(default = "default_nisab_gold_grams")]
    pub nisab_gold_grams: f64,
    /// Gold price per gram in the user's currency
    #[serde(default = "default_gold_price")]
    pub gold_price_per_gram: f64,
}

fn default_zakat_rate() -> f64 { 2.5 }
fn default_nisab_gold_grams() -> f64 { 85.0 }
fn default_gold_price() -> f64 { 250.0 }

impl Default for ZakatConfig {
    fn default() -> Self {
        Self {
            rate: default_zakat_rate(),
            nisab_gold_grams: default_nisab_gold_grams(),
            gold_price_per_gram: default_gold_price(),
        }
    }
}

/// QR image service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    #[serde(default = "default_qr_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_qr_size")]
    pub default_size: u32,
}

fn default_qr_endpoint() -> String { "https://api.qrserver.com/v1/create-qr-code/".to_string() }
fn default_qr_size() -> u32 { 200 }

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_qr_endpoint(),
            default_size: default_qr_size(),
        }
    }
}
