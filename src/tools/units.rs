//! Length, weight and temperature conversion

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Length,
    Weight,
    Temperature,
}

/// A unit with its factor to the quantity's base unit (meter, kilogram).
/// Temperature units have no factor and convert through Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    pub symbol: &'static str,
    pub quantity: Quantity,
    #[serde(skip)]
    factor: f64,
}

const fn unit(symbol: &'static str, quantity: Quantity, factor: f64) -> Unit {
    Unit { symbol, quantity, factor }
}

pub const UNITS: [Unit; 17] = [
    unit("mm", Quantity::Length, 0.001),
    unit("cm", Quantity::Length, 0.01),
    unit("m", Quantity::Length, 1.0),
    unit("km", Quantity::Length, 1000.0),
    unit("in", Quantity::Length, 0.0254),
    unit("ft", Quantity::Length, 0.3048),
    unit("yd", Quantity::Length, 0.9144),
    unit("mi", Quantity::Length, 1609.344),
    unit("mg", Quantity::Weight, 0.000_001),
    unit("g", Quantity::Weight, 0.001),
    unit("kg", Quantity::Weight, 1.0),
    unit("t", Quantity::Weight, 1000.0),
    unit("oz", Quantity::Weight, 0.028_349_523_125),
    unit("lb", Quantity::Weight, 0.453_592_37),
    unit("c", Quantity::Temperature, 0.0),
    unit("f", Quantity::Temperature, 0.0),
    unit("k", Quantity::Temperature, 0.0),
];

const ABSOLUTE_ZERO_C: f64 = -273.15;

pub fn find(symbol: &str) -> Option<Unit> {
    let symbol = symbol.trim().to_ascii_lowercase();
    UNITS.into_iter().find(|u| u.symbol == symbol)
}

/// Units of one quantity, in display order
pub fn units_of(quantity: Quantity) -> Vec<Unit> {
    UNITS.into_iter().filter(|u| u.quantity == quantity).collect()
}

/// Convert between two units of the same quantity.
///
/// Negative lengths/weights and temperatures below absolute zero are
/// rejected.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    let from = find(from)?;
    let to = find(to)?;
    if from.quantity != to.quantity || !value.is_finite() {
        return None;
    }

    match from.quantity {
        Quantity::Temperature => {
            let celsius = match from.symbol {
                "c" => value,
                "f" => (value - 32.0) * 5.0 / 9.0,
                _ => value + ABSOLUTE_ZERO_C,
            };
            if celsius < ABSOLUTE_ZERO_C - 1e-9 {
                return None;
            }
            Some(match to.symbol {
                "c" => celsius,
                "f" => celsius * 9.0 / 5.0 + 32.0,
                _ => celsius - ABSOLUTE_ZERO_C,
            })
        }
        Quantity::Length | Quantity::Weight => {
            if value < 0.0 {
                return None;
            }
            Some(value * from.factor / to.factor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_length() {
        assert!(close(convert(1.0, "km", "m").unwrap(), 1000.0));
        assert!(close(convert(12.0, "in", "ft").unwrap(), 1.0));
        assert!(close(convert(1.0, "mi", "km").unwrap(), 1.609344));
    }

    #[test]
    fn test_weight() {
        assert!(close(convert(1.0, "lb", "oz").unwrap(), 16.0));
        assert!(close(convert(2500.0, "g", "kg").unwrap(), 2.5));
    }

    #[test]
    fn test_temperature() {
        assert!(close(convert(100.0, "C", "F").unwrap(), 212.0));
        assert!(close(convert(32.0, "f", "c").unwrap(), 0.0));
        assert!(close(convert(0.0, "k", "c").unwrap(), -273.15));
        assert!(convert(-40.0, "c", "f").is_some());
    }

    #[test]
    fn test_rejections() {
        assert!(convert(1.0, "kg", "m").is_none());
        assert!(convert(1.0, "parsec", "m").is_none());
        assert!(convert(-1.0, "m", "cm").is_none());
        assert!(convert(-300.0, "c", "k").is_none());
        assert!(convert(f64::NAN, "m", "cm").is_none());
    }

    #[test]
    fn test_units_of() {
        assert_eq!(units_of(Quantity::Temperature).len(), 3);
        assert!(units_of(Quantity::Length).iter().all(|u| u.quantity == Quantity::Length));
    }
}
