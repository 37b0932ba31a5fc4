/// Round to `figures` significant figures. Zero, non-finite values and a
/// request for zero figures come back unchanged.
pub fn round_to_significant(value: f64, figures: usize) -> f64 {
    if value == 0.0 || !value.is_finite() || figures == 0 {
        return value;
    }
    format!("{:.*e}", figures - 1, value).parse().unwrap_or(value)
}
