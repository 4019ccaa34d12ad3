//! # Numeric Helpers
//!
//! Small float helpers shared by the primitives.

#[inline]
pub fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

#[inline]
pub fn max3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b).max(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max3() {
        assert_eq!(min3(3.0, -1.0, 2.0), -1.0);
        assert_eq!(max3(3.0, -1.0, 2.0), 3.0);
    }
}
