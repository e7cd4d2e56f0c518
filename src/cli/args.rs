/// Parse a percentage value, constrained to [0, 100]
pub fn parse_percentage(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=100.0).contains(&value) {
        return Err(format!("Percentage must be between 0 and 100, got {}", value));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percentage_bounds() {
        assert_eq!(parse_percentage("0"), Ok(0.0));
        assert_eq!(parse_percentage("42.5"), Ok(42.5));
        assert_eq!(parse_percentage("100"), Ok(100.0));
        assert!(parse_percentage("100.01").is_err());
        assert!(parse_percentage("-1").is_err());
        assert!(parse_percentage("abc").is_err());
    }
}
