//! Rabwa Toolbox - Main entry point
//!
//! Desktop shell for the bilingual tools catalog. The webview renders a
//! placeholder until the preferences are mounted, then follows the
//! `document-sync` events for its `dir`, `lang` and theme attributes.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use rabwa_lib::core::Config;
use rabwa_lib::i18n;
use rabwa_lib::prefs::{
    open_provider, DocumentState, PreferenceProvider, PreferenceSnapshot, PreferenceStore, ProviderView,
    SharedDocument,
};
use rabwa_lib::storage::{MemoryStorage, StorageChain};
use rabwa_lib::tools::{
    age, bmi, color, currency::CurrencyTable, finance, input, password, percentage, qr, tax::TaxCalculator,
    text, units, zakat, CategoryGroup, Route,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tauri::{Emitter, Manager};
use tokio::sync::Mutex;

/// Application state shared across all Tauri commands
pub struct TauriState {
    pub config: Arc<Mutex<Config>>,
    pub provider: Arc<Mutex<PreferenceProvider>>,
    pub document: SharedDocument,
}

/// Push the current root attributes to every webview
fn sync_document(app: &tauri::AppHandle, document: &SharedDocument) {
    let snapshot: DocumentState = document.snapshot();
    if let Err(e) = app.emit("document-sync", snapshot) {
        log::warn!("Failed to emit document-sync: {}", e);
    }
}

// Preference commands

/// Placeholder before mount, preferences after
#[tauri::command]
async fn get_view(state: tauri::State<'_, TauriState>) -> Result<ProviderView, String> {
    let provider = state.provider.lock().await;
    Ok(provider.view())
}

/// Load persisted preferences and apply them to the document
#[tauri::command]
async fn mount_preferences(app: tauri::AppHandle, state: tauri::State<'_, TauriState>) -> Result<ProviderView, String> {
    let mut provider = state.provider.lock().await;
    provider.mount();
    sync_document(&app, &state.document);
    Ok(provider.view())
}

#[tauri::command]
async fn get_document(state: tauri::State<'_, TauriState>) -> Result<DocumentState, String> {
    Ok(state.document.snapshot())
}

#[tauri::command]
async fn toggle_language(app: tauri::AppHandle, state: tauri::State<'_, TauriState>) -> Result<PreferenceSnapshot, String> {
    let mut provider = state.provider.lock().await;
    let snapshot = provider.toggle_language().map_err(|e| e.to_string())?;
    sync_document(&app, &state.document);
    Ok(snapshot)
}

#[tauri::command]
async fn toggle_theme(app: tauri::AppHandle, state: tauri::State<'_, TauriState>) -> Result<PreferenceSnapshot, String> {
    let mut provider = state.provider.lock().await;
    let snapshot = provider.toggle_theme().map_err(|e| e.to_string())?;
    sync_document(&app, &state.document);
    Ok(snapshot)
}

/// Get all translations for current language
#[tauri::command]
async fn get_translations(state: tauri::State<'_, TauriState>) -> Result<HashMap<String, String>, String> {
    let mut provider = state.provider.lock().await;
    let lang = provider.context().map_err(|e| e.to_string())?.language();
    Ok(i18n::flatten(i18n::table(lang)))
}

/// Language codes with their native names, for the switcher
#[tauri::command]
fn get_languages() -> Vec<(&'static str, &'static str)> {
    i18n::I18n::available_languages()
}

// Navigation

#[tauri::command]
async fn get_catalog(state: tauri::State<'_, TauriState>) -> Result<Vec<CategoryGroup>, String> {
    let mut provider = state.provider.lock().await;
    let lang = provider.context().map_err(|e| e.to_string())?.language();
    Ok(rabwa_lib::tools::catalog(lang))
}

#[tauri::command]
fn resolve_route(path: String) -> Route {
    rabwa_lib::tools::resolve_route(&path)
}

// Tools. Form fields arrive as raw strings; unparsable input yields `null`.

#[tauri::command]
fn calculate_bmi(weight: String, height: String, system: bmi::UnitSystem) -> Option<bmi::BmiResult> {
    bmi::calculate(input::parse_positive(&weight)?, input::parse_positive(&height)?, system)
}

#[tauri::command]
fn calculate_compound_interest(
    principal: String,
    rate: String,
    years: String,
    compounding: finance::Compounding,
) -> Option<finance::CompoundResult> {
    finance::compound_interest(
        input::parse_positive(&principal)?,
        input::parse_non_negative(&rate)?,
        input::parse_positive(&years)?,
        compounding,
    )
}

#[tauri::command]
fn calculate_loan(principal: String, rate: String, years: String) -> Option<finance::LoanResult> {
    finance::loan(
        input::parse_positive(&principal)?,
        input::parse_non_negative(&rate)?,
        input::parse_positive(&years)?,
    )
}

#[tauri::command]
async fn currency_codes(state: tauri::State<'_, TauriState>) -> Result<Vec<String>, String> {
    let config = state.config.lock().await;
    let table = CurrencyTable::new(&config.currency);
    Ok(table.codes().into_iter().map(str::to_string).collect())
}

#[tauri::command]
async fn convert_currency(
    state: tauri::State<'_, TauriState>,
    amount: String,
    from: String,
    to: String,
) -> Result<Option<rabwa_lib::tools::currency::Conversion>, String> {
    let config = state.config.lock().await;
    let table = CurrencyTable::new(&config.currency);
    Ok(input::parse_positive(&amount).and_then(|amount| table.convert(amount, &from, &to)))
}

#[tauri::command]
async fn withholding_payment_types(state: tauri::State<'_, TauriState>) -> Result<Vec<String>, String> {
    let config = state.config.lock().await;
    let calc = TaxCalculator::new(&config.tax);
    Ok(calc.payment_types().into_iter().map(str::to_string).collect())
}

#[tauri::command]
async fn corporate_tax(
    state: tauri::State<'_, TauriState>,
    profit: String,
) -> Result<Option<rabwa_lib::tools::tax::CorporateTax>, String> {
    let config = state.config.lock().await;
    Ok(input::parse_positive(&profit).and_then(|p| TaxCalculator::new(&config.tax).corporate(p)))
}

#[tauri::command]
async fn withholding_tax(
    state: tauri::State<'_, TauriState>,
    amount: String,
    payment_type: String,
) -> Result<Option<rabwa_lib::tools::tax::WithholdingTax>, String> {
    let config = state.config.lock().await;
    Ok(input::parse_positive(&amount)
        .and_then(|a| TaxCalculator::new(&config.tax).withholding(a, &payment_type)))
}

#[tauri::command]
async fn calculate_zakat(
    state: tauri::State<'_, TauriState>,
    assets: zakat::ZakatAssets,
    liabilities: String,
) -> Result<Option<zakat::ZakatResult>, String> {
    let config = state.config.lock().await;
    let liabilities = if liabilities.trim().is_empty() {
        Some(0.0)
    } else {
        input::parse_non_negative(&liabilities)
    };
    Ok(liabilities.and_then(|l| zakat::calculate(&config.zakat, &assets, l)))
}

#[tauri::command]
fn calculate_percentage(mode: String, a: String, b: String) -> Option<f64> {
    let a = input::parse_number(&a)?;
    let b = input::parse_number(&b)?;
    let result = match mode.as_str() {
        "percent_of" => percentage::percent_of(a, b),
        "what_percent" => percentage::what_percent(a, b),
        "change" => percentage::percent_change(a, b),
        _ => None,
    }?;
    Some(input::round2(result))
}

#[tauri::command]
fn calculate_age(birth_date: String) -> Option<age::Age> {
    let today = chrono::Local::now().date_naive();
    age::calculate(age::parse_date(&birth_date)?, today)
}

#[tauri::command]
fn convert_units(value: String, from: String, to: String) -> Option<f64> {
    units::convert(input::parse_number(&value)?, &from, &to).map(|v| input::round_to(v, 6))
}

#[tauri::command]
fn list_units(quantity: units::Quantity) -> Vec<units::Unit> {
    units::units_of(quantity)
}

#[tauri::command]
fn inspect_color(hex: String) -> Option<color::ColorInfo> {
    color::inspect(&hex)
}

#[tauri::command]
fn color_from_hsl(h: f64, s: f64, l: f64) -> Option<color::ColorInfo> {
    color::hsl_to_rgb(color::Hsl { h, s, l }).map(color::ColorInfo::from)
}

#[tauri::command]
fn gradient_css(gradient: color::Gradient) -> Option<String> {
    gradient.css()
}

#[tauri::command]
fn export_gradient(gradient: color::Gradient) -> Result<PathBuf, String> {
    gradient.export_css().map_err(|e| e.to_string())
}

#[tauri::command]
fn text_stats(text: String) -> text::TextStats {
    text::stats(&text)
}

#[tauri::command]
fn convert_case(text: String, case: text::Case) -> String {
    text::convert_case(&text, case)
}

#[derive(serde::Serialize)]
struct GeneratedPassword {
    password: String,
    strength: password::Strength,
}

#[tauri::command]
fn generate_password(options: password::PasswordOptions) -> Option<GeneratedPassword> {
    let generated = password::generate(&options)?;
    Some(GeneratedPassword {
        strength: password::strength(&generated),
        password: generated,
    })
}

#[tauri::command]
fn random_number(min: String, max: String) -> Option<i64> {
    password::random_in_range(input::parse_integer(&min)?, input::parse_integer(&max)?)
}

#[tauri::command]
async fn qr_url(state: tauri::State<'_, TauriState>, data: String, size: u32) -> Result<Option<String>, String> {
    let config = state.config.lock().await;
    Ok(qr::image_url(&config.qr, &data, size).map(String::from))
}

#[tauri::command]
async fn download_qr(state: tauri::State<'_, TauriState>, data: String, size: u32) -> Result<PathBuf, String> {
    let qr_config = state.config.lock().await.qr.clone();
    let dir = dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| "No download directory".to_string())?;
    qr::download(&qr_config, &data, size, &dir).await.map_err(|e| e.to_string())
}

/// Provider backed by memory only, for when the data directory is unusable
fn session_only_provider(config: &Config, document: &SharedDocument) -> PreferenceProvider {
    let language = PreferenceStore::new(StorageChain::new(MemoryStorage::new()), document.clone())
        .with_fallback(config.general.default_language);
    let theme = PreferenceStore::new(StorageChain::new(MemoryStorage::new()), document.clone())
        .with_fallback(config.general.default_theme);
    PreferenceProvider::new(language, theme)
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Rabwa Toolbox v{}", env!("CARGO_PKG_VERSION"));

    // Load or create configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    // Preferences stay in Loading until the webview asks to mount
    let document = SharedDocument::new();
    let provider = open_provider(&config, &document).unwrap_or_else(|e| {
        log::warn!("Preferences will not persist this session: {}", e);
        session_only_provider(&config, &document)
    });

    let state = TauriState {
        config: Arc::new(Mutex::new(config)),
        provider: Arc::new(Mutex::new(provider)),
        document,
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_opener::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            get_view,
            mount_preferences,
            get_document,
            toggle_language,
            toggle_theme,
            get_translations,
            get_languages,
            get_catalog,
            resolve_route,
            calculate_bmi,
            calculate_compound_interest,
            calculate_loan,
            currency_codes,
            convert_currency,
            withholding_payment_types,
            corporate_tax,
            withholding_tax,
            calculate_zakat,
            calculate_percentage,
            calculate_age,
            convert_units,
            list_units,
            inspect_color,
            color_from_hsl,
            gradient_css,
            export_gradient,
            text_stats,
            convert_case,
            generate_password,
            random_number,
            qr_url,
            download_qr,
        ])
        .setup(|app| {
            if let Some(window) = app.get_webview_window("main") {
                log::info!("Main window ready: {}", window.label());
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
