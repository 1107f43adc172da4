//! EU number format handling.
//!
//! Valeo documents print amounts as `1.234,56`: dot as thousands separator,
//! comma as decimal separator.

/// Parse an EU-formatted decimal. Plain integers (`1234`) also parse.
#[must_use]
pub fn eu_to_float(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::eu_to_float;

    #[test]
    fn parses_eu_decimals() {
        assert_eq!(eu_to_float("12,50"), Some(12.5));
        assert_eq!(eu_to_float("1.234,56"), Some(1234.56));
        assert_eq!(eu_to_float("1234"), Some(1234.0));
        assert_eq!(eu_to_float(" 0,10 "), Some(0.1));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(eu_to_float(""), None);
        assert_eq!(eu_to_float("abc"), None);
        assert_eq!(eu_to_float("12,5x"), None);
    }
}
