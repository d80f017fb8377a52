//! Tool catalog and route resolution

use crate::core::Language;
use crate::i18n;
use serde::{Deserialize, Serialize};

/// Section of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Calculators,
    Finance,
    Color,
    Text,
    Generators,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Calculators,
        Category::Finance,
        Category::Color,
        Category::Text,
        Category::Generators,
    ];

    pub fn translation_key(self) -> &'static str {
        match self {
            Category::Calculators => "categories.calculators",
            Category::Finance => "categories.finance",
            Category::Color => "categories.color",
            Category::Text => "categories.text",
            Category::Generators => "categories.generators",
        }
    }
}

/// Every tool in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    Bmi,
    Percentage,
    Age,
    Units,
    CompoundInterest,
    Loan,
    Currency,
    Tax,
    Zakat,
    ColorConverter,
    Gradient,
    TextStats,
    CaseConverter,
    Password,
    RandomNumber,
    QrCode,
}

impl ToolId {
    pub const ALL: [ToolId; 16] = [
        ToolId::Bmi,
        ToolId::Percentage,
        ToolId::Age,
        ToolId::Units,
        ToolId::CompoundInterest,
        ToolId::Loan,
        ToolId::Currency,
        ToolId::Tax,
        ToolId::Zakat,
        ToolId::ColorConverter,
        ToolId::Gradient,
        ToolId::TextStats,
        ToolId::CaseConverter,
        ToolId::Password,
        ToolId::RandomNumber,
        ToolId::QrCode,
    ];

    /// URL path segment
    pub fn slug(self) -> &'static str {
        match self {
            ToolId::Bmi => "bmi-calculator",
            ToolId::Percentage => "percentage-calculator",
            ToolId::Age => "age-calculator",
            ToolId::Units => "unit-converter",
            ToolId::CompoundInterest => "compound-interest",
            ToolId::Loan => "loan-calculator",
            ToolId::Currency => "currency-converter",
            ToolId::Tax => "tax-calculator",
            ToolId::Zakat => "zakat-calculator",
            ToolId::ColorConverter => "color-converter",
            ToolId::Gradient => "gradient-generator",
            ToolId::TextStats => "word-counter",
            ToolId::CaseConverter => "case-converter",
            ToolId::Password => "password-generator",
            ToolId::RandomNumber => "random-number",
            ToolId::QrCode => "qr-code-generator",
        }
    }

    /// Segment under `tools.` in the translation tables
    pub fn key(self) -> &'static str {
        match self {
            ToolId::Bmi => "bmi",
            ToolId::Percentage => "percentage",
            ToolId::Age => "age",
            ToolId::Units => "units",
            ToolId::CompoundInterest => "compound_interest",
            ToolId::Loan => "loan",
            ToolId::Currency => "currency",
            ToolId::Tax => "tax",
            ToolId::Zakat => "zakat",
            ToolId::ColorConverter => "color_converter",
            ToolId::Gradient => "gradient",
            ToolId::TextStats => "text_stats",
            ToolId::CaseConverter => "case_converter",
            ToolId::Password => "password",
            ToolId::RandomNumber => "random_number",
            ToolId::QrCode => "qr_code",
        }
    }

    pub fn category(self) -> Category {
        match self {
            ToolId::Bmi | ToolId::Percentage | ToolId::Age | ToolId::Units => Category::Calculators,
            ToolId::CompoundInterest | ToolId::Loan | ToolId::Currency | ToolId::Tax | ToolId::Zakat => {
                Category::Finance
            }
            ToolId::ColorConverter | ToolId::Gradient => Category::Color,
            ToolId::TextStats | ToolId::CaseConverter => Category::Text,
            ToolId::Password | ToolId::RandomNumber | ToolId::QrCode => Category::Generators,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    pub fn path(self) -> String {
        format!("/tools/{}", self.slug())
    }
}

/// Where a path leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Route {
    Home,
    Tool(ToolId),
    NotFound(String),
}

/// Resolve a location path. Unknown paths are logged and map to
/// [`Route::NotFound`].
pub fn resolve_route(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        [] => Some(Route::Home),
        ["tools"] => Some(Route::Home),
        ["tools", slug] | [slug] => ToolId::from_slug(slug).map(Route::Tool),
        _ => None,
    };

    route.unwrap_or_else(|| {
        log::error!("404 Error: User attempted to access non-existent route: {}", path);
        Route::NotFound(path.to_string())
    })
}

/// A tool as listed on the home page
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: ToolId,
    pub path: String,
    pub name: String,
    pub description: String,
}

/// Tools of one category, translated
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub title: String,
    pub tools: Vec<CatalogEntry>,
}

/// The full catalog in `lang`
pub fn catalog(lang: Language) -> Vec<CategoryGroup> {
    let table = i18n::table(lang);
    Category::ALL
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            title: i18n::resolve(table, category.translation_key()),
            tools: ToolId::ALL
                .into_iter()
                .filter(|tool| tool.category() == category)
                .map(|tool| CatalogEntry {
                    id: tool,
                    path: tool.path(),
                    name: i18n::resolve(table, &format!("tools.{}.name", tool.key())),
                    description: i18n::resolve(table, &format!("tools.{}.description", tool.key())),
                })
                .collect(),
        })
        .collect()
}
