//! Percentage calculations

/// `percent`% of `value`
pub fn percent_of(percent: f64, value: f64) -> Option<f64> {
    finite(percent * value / 100.0)
}

/// What percent `part` is of `whole`
pub fn what_percent(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    finite(part / whole * 100.0)
}

/// Relative change from `from` to `to`, in percent
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    finite((to - from) / from.abs() * 100.0)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(15.0, 200.0), Some(30.0));
    }

    #[test]
    fn test_what_percent() {
        assert_eq!(what_percent(50.0, 200.0), Some(25.0));
        assert_eq!(what_percent(1.0, 0.0), None);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(80.0, 100.0), Some(25.0));
        assert_eq!(percent_change(100.0, 80.0), Some(-20.0));
        assert_eq!(percent_change(-50.0, -25.0), Some(50.0));
        assert_eq!(percent_change(0.0, 10.0), None);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(percent_of(f64::NAN, 1.0), None);
        assert_eq!(percent_of(f64::MAX, f64::MAX), None);
    }
}
