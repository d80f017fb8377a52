//! Form input parsing shared by every tool
//!
//! Invalid input never becomes an error: the parsers return `None` and
//! the tool withholds its result.

/// Normalize Arabic-Indic digits and separators to ASCII
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
            '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
            '\u{066B}' => Some('.'),
            // Thousands separators
            ',' | '\u{066C}' | '_' | ' ' => None,
            other => Some(other),
        })
        .collect()
}

/// Any finite number
pub fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = normalize(raw).parse().ok()?;
    value.is_finite().then_some(value)
}

/// A finite number greater than zero
pub fn parse_positive(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

/// A finite number greater than or equal to zero
pub fn parse_non_negative(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= 0.0)
}

/// A whole number
pub fn parse_integer(raw: &str) -> Option<i64> {
    normalize(raw).parse().ok()
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a money amount to cents
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// A configured percentage rate, if it lies in `0..=100`
pub fn valid_rate(rate: f64) -> Option<f64> {
    (rate.is_finite() && (0.0..=100.0).contains(&rate)).then_some(rate)
}
