//! Display rounding for numeric potentials.

/// Decimal places kept by default.
pub const DEFAULT_MAX_DECIMALS: u32 = 10;

/// Distance to an integer under which a value snaps to it.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Upper bound on `max_decimals`; `10^15` is still exact in an f64.
pub const MAX_DECIMALS_LIMIT: u32 = 15;

/// 2^50. Scaled values past this keep their decimals; below it
/// `round(n / scale) * scale` lands back on `n`.
const SCALED_LIMIT: f64 = 1_125_899_906_842_624.0;

/// Rounds away floating-point noise such as `0.30000000000000004`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounding {
    pub max_decimals: u32,
    pub epsilon: f64,
}

impl Default for Rounding {
    fn default() -> Self {
        Self {
            max_decimals: DEFAULT_MAX_DECIMALS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Rounding {
    pub fn new(max_decimals: u32, epsilon: f64) -> Self {
        Self {
            max_decimals: max_decimals.min(MAX_DECIMALS_LIMIT),
            epsilon: epsilon.abs(),
        }
    }

    /// Round `x`. Idempotent: `round(round(x)) == round(x)`.
    ///
    /// Non-finite values and values too large to carry decimals pass
    /// through unchanged.
    pub fn round(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return x;
        }
        if let Some(snapped) = self.snap(x) {
            return snapped;
        }

        let scale = 10f64.powi(self.max_decimals.min(MAX_DECIMALS_LIMIT) as i32);
        let scaled = x * scale;
        if scaled.abs() >= SCALED_LIMIT {
            return x;
        }
        let rounded = scaled.round() / scale;
        self.snap(rounded).unwrap_or(rounded)
    }

    fn snap(&self, x: f64) -> Option<f64> {
        let nearest = x.round();
        ((x - nearest).abs() < self.epsilon).then_some(nearest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorbs_noise() {
        let r = Rounding::default();
        assert_eq!(r.round(0.1 + 0.2), 0.3);
        assert_eq!(r.round(0.9999999999999), 1.0);
        assert_eq!(r.round(1.0 - 1e-15), 1.0);
    }

    #[test]
    fn test_keeps_ten_decimals() {
        let r = Rounding::default();
        assert_eq!(r.round(0.123456789012), 0.1234567890);
        assert_eq!(r.round(0.25), 0.25);
        assert_eq!(r.round(-0.33333333333333), -0.3333333333);
    }

    #[test]
    fn test_fewer_decimals() {
        let r = Rounding::new(2, DEFAULT_EPSILON);
        assert_eq!(r.round(0.125), 0.13);
        assert_eq!(r.round(2.0 / 3.0), 0.67);
    }

    #[test]
    fn test_passthrough() {
        let r = Rounding::default();
        assert!(r.round(f64::NAN).is_nan());
        assert_eq!(r.round(f64::INFINITY), f64::INFINITY);
        assert_eq!(r.round(1e300), 1e300);
    }

    #[test]
    fn test_decimals_clamped() {
        assert_eq!(Rounding::new(40, 1e-12).max_decimals, MAX_DECIMALS_LIMIT);
    }

    #[test]
    fn test_idempotent_samples() {
        let r = Rounding::default();
        for x in [0.1 + 0.2, 1.0 / 3.0, -2.0 / 7.0, 12345.678901234567, 0.99999999999] {
            let once = r.round(x);
            assert_eq!(r.round(once), once, "x = {x}");
        }
    }
}
