use std::fmt;
use std::sync::Arc;

/// Mapping of a data value to its fraction of the axis length
pub trait Normalizer: fmt::Debug + Send + Sync {
    /// Position of `x` in `[min, max]`, 0 at `min` and 1 at `max`
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64;

    /// Inverse of [`Normalizer::normalize`]
    fn denormalize(&self, min: f64, max: f64, f: f64) -> f64;
}

/// The scale of an axis
#[derive(Debug, Clone, Default)]
pub enum Scale {
    #[default]
    Linear,
    /// Logarithmic scale. Only defined for strictly positive ranges:
    /// non-positive values normalize to NaN or infinity.
    Log,
    /// Reverses the direction of the inner scale
    Inverted(Box<Scale>),
    Custom(Arc<dyn Normalizer>),
}

impl Scale {
    pub fn inverted(self) -> Scale {
        Scale::Inverted(Box::new(self))
    }

    pub fn is_log(&self) -> bool {
        match self {
            Scale::Log => true,
            Scale::Inverted(inner) => inner.is_log(),
            _ => false,
        }
    }
}

impl Normalizer for Scale {
    fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
        match self {
            Scale::Linear => (x - min) / (max - min),
            Scale::Log => {
                let lmin = min.ln();
                (x.ln() - lmin) / (max.ln() - lmin)
            }
            Scale::Inverted(inner) => 1.0 - inner.normalize(min, max, x),
            Scale::Custom(n) => n.normalize(min, max, x),
        }
    }

    fn denormalize(&self, min: f64, max: f64, f: f64) -> f64 {
        match self {
            Scale::Linear => min + f * (max - min),
            Scale::Log => {
                let lmin = min.ln();
                (lmin + f * (max.ln() - lmin)).exp()
            }
            Scale::Inverted(inner) => inner.denormalize(min, max, 1.0 - f),
            Scale::Custom(n) => n.denormalize(min, max, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[derive(Debug)]
    struct Sqrt;

    impl Normalizer for Sqrt {
        fn normalize(&self, min: f64, max: f64, x: f64) -> f64 {
            (x.sqrt() - min.sqrt()) / (max.sqrt() - min.sqrt())
        }

        fn denormalize(&self, min: f64, max: f64, f: f64) -> f64 {
            let s = min.sqrt() + f * (max.sqrt() - min.sqrt());
            s * s
        }
    }

    fn scales() -> Vec<Scale> {
        vec![
            Scale::Linear,
            Scale::Log,
            Scale::Linear.inverted(),
            Scale::Log.inverted(),
            Scale::Custom(Arc::new(Sqrt)),
        ]
    }

    #[test]
    fn end_points() {
        for s in scales() {
            let (lo, hi) = if matches!(s, Scale::Inverted(_)) {
                (1.0, 0.0)
            } else {
                (0.0, 1.0)
            };
            assert_near!(abs, s.normalize(2.0, 50.0, 2.0), lo);
            assert_near!(abs, s.normalize(2.0, 50.0, 50.0), hi);
        }
    }

    #[test]
    fn monotone() {
        for s in scales() {
            let sign = if matches!(s, Scale::Inverted(_)) { -1.0 } else { 1.0 };
            let mut prev = f64::NEG_INFINITY;
            for i in 0..=100 {
                let x = 2.0 + 48.0 * i as f64 / 100.0;
                let f = sign * s.normalize(2.0, 50.0, x);
                assert!(f >= prev);
                prev = f;
            }
        }
    }

    #[test]
    fn denormalize_inverts() {
        for s in scales() {
            for x in [2.0, 3.5, 10.0, 49.0] {
                let f = s.normalize(2.0, 50.0, x);
                assert_near!(rel, s.denormalize(2.0, 50.0, f), x, 1e-12);
            }
        }
    }

    #[test]
    fn log_midpoint() {
        assert_near!(abs, Scale::Log.normalize(1.0, 100.0, 10.0), 0.5);
    }
}
