// ---------------------------------------------------------------------------
// Metric formatting
// ---------------------------------------------------------------------------

/// Expected value with two decimals: `6.48`.
pub fn format_expected(value: f64) -> String {
    format!("{value:.2}")
}

/// Probability as a percentage with two decimals: `0.6342` → `63.42%`.
pub fn format_probability(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rounds_to_two_places() {
        assert_eq!(format_expected(6.4849), "6.48");
        assert_eq!(format_expected(1.0), "1.00");
    }

    #[test]
    fn probability_is_a_percentage() {
        assert_eq!(format_probability(0.6342), "63.42%");
        assert_eq!(format_probability(1.0), "100.00%");
        assert_eq!(format_probability(0.0), "0.00%");
        assert_eq!(format_probability(0.00004), "0.00%");
    }
}
