/// Largest `t` for which `exp(t)` is still a finite `f64`.
pub const EXP_OVERFLOW_LIMIT: f64 = 709.782_712_893_384;

/// Logistic activation, the only one the network uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// `1 / (1 + e^-x)`. Once `e^-x` would overflow the limit is exactly 0,
    /// which is returned without evaluating the exponential.
    pub fn function(&self, x: f64) -> f64 {
        if -x > EXP_OVERFLOW_LIMIT {
            return 0.0;
        }
        1.0 / (1.0 + (-x).exp())
    }

    /// `e^-x / (1 + e^-x)^2`, i.e. `σ(x)(1 - σ(x))`.
    ///
    /// Returns 0 in the same region as `function`, where `e^-x` would
    /// overflow. Dividing by `1 + e^-x` twice keeps every intermediate finite.
    pub fn derivative(&self, x: f64) -> f64 {
        if -x > EXP_OVERFLOW_LIMIT {
            return 0.0;
        }
        let t = (-x).exp();
        t / (1.0 + t) / (1.0 + t)
    }
}

pub fn sigmoid(x: f64) -> f64 {
    Sigmoid.function(x)
}

pub fn sigmoid_prime(x: f64) -> f64 {
    Sigmoid.derivative(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        for x in [-700.0, -30.0, -1.0, 1.0, 30.0] {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
        }
    }

    #[test]
    fn overflow_region_returns_exact_zero() {
        assert_eq!(sigmoid(-710.0), 0.0);
        assert_eq!(sigmoid(-1e300), 0.0);
        assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
        assert_eq!(sigmoid(1e300), 1.0);
        // Just inside the limit the formula is still tiny and non-negative.
        let edge = sigmoid(-EXP_OVERFLOW_LIMIT + 1.0);
        assert!(edge >= 0.0 && edge < 1e-300);
    }

    #[test]
    fn derivative_matches_sigma_times_one_minus_sigma() {
        for x in [-5.0, -0.3, 0.0, 0.7, 4.0] {
            let s = sigmoid(x);
            assert!((sigmoid_prime(x) - s * (1.0 - s)).abs() < 1e-12);
        }
        assert!((sigmoid_prime(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn derivative_vanishes_in_both_tails() {
        assert_eq!(sigmoid_prime(-710.0), 0.0);
        assert_eq!(sigmoid_prime(-1e6), 0.0);
        assert_eq!(sigmoid_prime(1e6), 0.0);
    }

    #[test]
    fn derivative_stays_accurate_deep_in_the_negative_tail() {
        // (1 + e^-x)^2 would overflow here, the derivative itself does not.
        for x in [-355.0, -400.0, -700.0, -EXP_OVERFLOW_LIMIT + 0.5] {
            let s = sigmoid(x);
            let d = sigmoid_prime(x);
            assert!(d > 0.0, "sigmoid_prime({x}) = {d}");
            assert!(((d - s * (1.0 - s)) / d).abs() < 1e-9, "sigmoid_prime({x}) = {d}");
        }
    }
}
