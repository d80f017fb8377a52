//! Tool widgets
//!
//! Every calculator is a pure function from parsed input to an optional
//! result. `None` means the input was invalid and nothing is shown.
//! Free-text form fields go through [`input`] first.

pub mod age;
pub mod bmi;
pub mod catalog;
pub mod color;
pub mod currency;
pub mod finance;
pub mod input;
pub mod password;
pub mod percentage;
pub mod qr;
pub mod tax;
pub mod text;
pub mod units;
pub mod zakat;

pub use catalog::{catalog, resolve_route, CatalogEntry, Category, CategoryGroup, Route, ToolId};
