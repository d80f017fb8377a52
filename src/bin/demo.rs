//! Rabwa Toolbox - Demo CLI
//!
//! Walks through the preference lifecycle (mount, change, reload) against
//! a scratch data directory, then runs a few tools in both languages.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use rabwa_lib::core::{Config, Language, Theme};
use rabwa_lib::i18n::I18n;
use rabwa_lib::prefs::{open_provider, ProviderView, SharedDocument};
use rabwa_lib::tools::{
    age, bmi, color, currency::CurrencyTable, finance, input, password, qr, resolve_route, text, zakat, Route,
};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   Rabwa Toolbox - Demo CLI");
    println!("==============================================\n");

    // Keep the user's real preferences out of it
    let scratch = std::env::temp_dir().join(format!("rabwa-demo-{}", std::process::id()));
    let mut config = Config::default();
    config.storage.data_dir = Some(scratch.clone());

    // 1. First launch
    println!("[1/4] First launch (no stored preferences)...");
    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document).context("opening preference storage")?;
    if provider.view() != ProviderView::Placeholder {
        bail!("provider rendered before mount");
    }
    println!("      Before mount: placeholder");
    let snapshot = provider.mount();
    println!(
        "      Mounted: language={} theme={} dir={}",
        snapshot.language,
        snapshot.theme,
        snapshot.direction.as_str()
    );
    println!("      Title: {}\n", provider.translate("app.title")?);

    // 2. Change preferences
    println!("[2/4] Switching to English and dark mode...");
    provider.set_language(Language::En)?;
    provider.set_theme(Theme::Dark)?;
    let doc = document.snapshot();
    println!(
        "      <html dir={:?} lang={:?} class={:?}>",
        doc.dir.map(|d| d.as_str()),
        doc.lang.map(|l| l.to_string()),
        if doc.dark { "dark" } else { "" }
    );
    println!("      Title: {}\n", provider.translate("app.title")?);
    drop(provider);

    // 3. Reload
    println!("[3/4] Reloading from {:?}...", scratch);
    let document = SharedDocument::new();
    let mut provider = open_provider(&config, &document)?;
    let snapshot = provider.mount();
    println!("      Restored: language={} theme={}\n", snapshot.language, snapshot.theme);
    if snapshot.language != Language::En || snapshot.theme != Theme::Dark {
        bail!("preferences did not survive the reload");
    }

    // 4. Tools
    println!("[4/4] Tools...");
    let ar = I18n::new(Language::Ar);
    let en = I18n::new(Language::En);

    if let Some(result) = bmi::calculate(70.0, 170.0, bmi::UnitSystem::Metric) {
        println!(
            "      BMI 70kg/170cm: {} ({} / {})",
            result.bmi,
            en.get(result.category.translation_key()),
            ar.get(result.category.translation_key())
        );
    }

    // Arabic-Indic digits are accepted in form fields
    let principal = input::parse_positive("١٠٠٠٠٠").context("parsing principal")?;
    if let Some(result) = finance::loan(principal, 6.0, 30.0) {
        println!(
            "      Loan {:.0} @ 6% / 30y: {:.2} per month, {:.2} interest",
            principal, result.monthly_payment, result.total_interest
        );
    }
    if let Some(result) = finance::compound_interest(1000.0, 10.0, 1.0, finance::Compounding::Annually) {
        println!("      1000 @ 10% for 1y: {:.2}", result.final_amount);
    }

    let rates = CurrencyTable::new(&config.currency);
    if let Some(c) = rates.convert(100.0, "USD", "SAR") {
        println!("      100 USD = {:.2} SAR", c.result);
    }

    let assets = zakat::ZakatAssets {
        cash: 50_000.0,
        gold: 10_000.0,
        ..Default::default()
    };
    if let Some(z) = zakat::calculate(&config.zakat, &assets, 5_000.0) {
        println!("      Zakat on {:.2} net: {:.2}", z.net_wealth, z.zakat_due);
    }

    let today = chrono::Local::now().date_naive();
    if let Some(a) = NaiveDate::from_ymd_opt(1990, 1, 1).and_then(|b| age::calculate(b, today)) {
        println!("      Born 1990-01-01: {}y {}m {}d", a.years, a.months, a.days);
    }

    if let Some(info) = color::inspect("#3b82f6") {
        println!("      #3b82f6 = {} = {}", info.css_rgb, info.css_hsl);
    }

    let stats = text::stats("مرحبا بك في ربوة. كيف حالك؟");
    println!("      Arabic text: {} words, {} sentences", stats.words, stats.sentences);

    if let Some(pw) = password::generate(&password::PasswordOptions::default()) {
        println!("      Password: {} ({:?})", pw, password::strength(&pw));
    }

    if let Some(url) = qr::image_url(&config.qr, "https://example.com", 200) {
        println!("      QR: {}", url);
    }

    match resolve_route("/tools/does-not-exist") {
        Route::NotFound(path) => println!("      Route {} -> {}", path, en.get("not_found.title")),
        other => println!("      Unexpected route: {:?}", other),
    }

    if let Err(e) = std::fs::remove_dir_all(&scratch) {
        log::warn!("Could not clean up {:?}: {}", scratch, e);
    }

    println!("\n==============================================");
    println!("   Demo complete");
    println!("==============================================");
    Ok(())
}
