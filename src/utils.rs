use num_traits::Float;

/// Relative tolerance used when comparing exponents and multipliers.
pub const FLOAT_TOLERANCE: f64 = 1e-10;

/// Compares two floats, scaling the tolerance by the larger magnitude.
pub fn float_equals<F: Float>(a: F, b: F) -> bool {
    if a == b {
        return true;
    }
    let tolerance = F::from(FLOAT_TOLERANCE).unwrap_or_else(F::epsilon);
    let magnitude = a.abs().max(b.abs()).max(F::one());
    (a - b).abs() <= tolerance * magnitude
}

/// Formats a number without unnecessary decimal places.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equals() {
        assert!(float_equals(1.0, 1.0));
        assert!(float_equals(0.1 + 0.2, 0.3));
        assert!(float_equals(1e12, 1e12 + 1e-3));
        assert!(!float_equals(1.0, 1.001));
        assert!(!float_equals(2.0, -2.0));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e-3), "0.001");
    }
}
