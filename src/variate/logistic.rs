//! Logistic variate — heavier tails than normal, unit variance.
//!
//! The logistic distribution with scale `a` has CDF `F(x) = 1/(1 + e^{−x/a})`;
//! `a = √3/π` makes the variance 1. Substituting `u = F(x)` turns the moment
//! generating function into a beta integral:
//!
//! ```text
//! E[exp(sX)] = ∫₀¹ u^{as} (1 − u)^{−as} du = B(1 + as, 1 − as)
//! κ(s)       = lnΓ(1 + as) + lnΓ(1 − as)          (|as| < 1)
//! F_s(x)     = I_u(1 + as, 1 − as)                 (regularized incomplete beta)
//! ```
//!
//! Cumulant and CDF derivative orders beyond the closed forms carried here
//! return quiet NaN, per the variate contract. The same NaN convention applies
//! to tilts outside `|as| < 1`, where the moment generating function diverges.

use serde::{Deserialize, Serialize};
use statrs::function::beta::beta_reg;
use statrs::function::gamma::{digamma, ln_gamma};

use crate::variate::Variate;

/// Scale `a = √3/π`, chosen so the variance is 1.
const SCALE: f64 = 0.551_328_895_421_792_1;

/// Unit-variance logistic variate.
///
/// Works in `f64` only: the log-gamma, digamma, and incomplete-beta special
/// functions it needs (via `statrs`) are double precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logistic;

impl Logistic {
    /// Create the unit-variance logistic variate.
    pub fn new() -> Self {
        Self
    }

    /// Untilted density `f(x) = e^{−x/a} / (a·(1 + e^{−x/a})²)`.
    fn density(x: f64) -> f64 {
        let e = (-x / SCALE).exp();
        let d = 1.0 + e;
        e / (SCALE * d * d)
    }
}

impl Variate for Logistic {
    type Scalar = f64;

    fn cumulant(&self, s: f64, order: usize) -> f64 {
        let t = SCALE * s;
        if t.abs() >= 1.0 {
            return f64::NAN;
        }

        match order {
            0 => ln_gamma(1.0 + t) + ln_gamma(1.0 - t),
            1 => SCALE * (digamma(1.0 + t) - digamma(1.0 - t)),
            // No polygamma closed form carried.
            _ => f64::NAN,
        }
    }

    fn cdf(&self, x: f64, s: f64, order: usize) -> f64 {
        let t = SCALE * s;
        if t.abs() >= 1.0 {
            return f64::NAN;
        }

        match order {
            0 => {
                let u = 1.0 / (1.0 + (-x / SCALE).exp());
                if s == 0.0 {
                    u
                } else {
                    beta_reg(1.0 + t, 1.0 - t, u)
                }
            }
            1 => {
                if s == 0.0 {
                    Self::density(x)
                } else {
                    (s * x - self.cumulant(s, 0)).exp() * Self::density(x)
                }
            }
            _ => f64::NAN,
        }
    }
}
