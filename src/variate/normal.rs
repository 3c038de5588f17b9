//! Normal variate — the reference model and the Black special case.
//!
//! For `X ~ N(μ, σ²)` the cumulant is `κ(s) = μs + σ²s²/2` and the Esscher
//! tilt is again normal: with `z = (x − μ)/σ`,
//!
//! ```text
//! F_s(x) = Φ(z − s)
//! ```
//!
//! so tilting by `s` just shifts the standardized abscissa. Higher
//! x-derivatives follow from `φ⁽ⁿ⁾(x) = (−1)ⁿ·φ(x)·H_n(x)` with `H_n` the
//! probabilist Hermite polynomials (`H_0 = 1`, `H_1 = x`,
//! `H_{n+1}(x) = x·H_n(x) − n·H_{n−1}(x)`).
//!
//! With the standard normal (`μ = 0`, `σ = 1`) and `s = σ_B·√t`, the pricing
//! engine reproduces the Black model exactly; this module is the closed-form
//! reference the generic engine is validated against.

use serde::{Deserialize, Serialize};

use crate::error::EsscherError;
use crate::validate::validate_finite;
use crate::variate::{Real, Variate};

/// Normal variate with mean `μ` and standard deviation `σ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NormalRaw<F>", into = "NormalRaw<F>")]
pub struct Normal<F: Real> {
    mu: F,
    sigma: F,
}

#[derive(Serialize, Deserialize)]
struct NormalRaw<F> {
    mu: F,
    sigma: F,
}

impl<F: Real> TryFrom<NormalRaw<F>> for Normal<F> {
    type Error = EsscherError;

    fn try_from(raw: NormalRaw<F>) -> Result<Self, Self::Error> {
        Self::new(raw.mu, raw.sigma)
    }
}

impl<F: Real> From<Normal<F>> for NormalRaw<F> {
    fn from(n: Normal<F>) -> Self {
        Self {
            mu: n.mu,
            sigma: n.sigma,
        }
    }
}

impl<F: Real> Normal<F> {
    /// Create a normal variate.
    ///
    /// A `sigma` of exactly 0 is substituted by 1 (a zero-width normal cannot
    /// be tilted; the substitution keeps the degenerate-input convention of
    /// the variate contract without ever dividing by zero).
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if `mu` is not finite or
    /// `sigma` is negative or not finite.
    pub fn new(mu: F, sigma: F) -> crate::error::Result<Self> {
        validate_finite(mu, "mu")?;
        validate_finite(sigma, "sigma")?;
        if sigma < F::zero() {
            return Err(EsscherError::InvalidInput {
                message: format!("sigma must be non-negative, got {sigma}"),
            });
        }

        let sigma = if sigma == F::zero() { F::one() } else { sigma };

        Ok(Self { mu, sigma })
    }

    /// The standard normal, `N(0, 1)`.
    pub fn standard() -> Self {
        Self {
            mu: F::zero(),
            sigma: F::one(),
        }
    }

    /// Mean `μ`.
    pub fn mean(&self) -> F {
        self.mu
    }

    /// Standard deviation `σ`.
    pub fn std_dev(&self) -> F {
        self.sigma
    }

    /// Probabilist Hermite polynomial `H_order(x)` by the three-term
    /// recurrence. Iterative; stable for the small orders pricing needs.
    fn hermite(order: usize, x: F) -> F {
        if order == 0 {
            return F::one();
        }

        let mut h_prev = F::one();
        let mut h = x;
        for k in 1..order {
            let next = x * h - F::of(k as f64) * h_prev;
            h_prev = h;
            h = next;
        }
        h
    }
}

impl<F: Real> Default for Normal<F> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<F: Real> Variate for Normal<F> {
    type Scalar = F;

    /// `κ(s) = μs + σ²s²/2`; derivatives `μ + σ²s`, `σ²`, then 0.
    fn cumulant(&self, s: F, order: usize) -> F {
        let var = self.sigma * self.sigma;
        match order {
            0 => self.mu * s + var * s * s / F::of(2.0),
            1 => self.mu + var * s,
            2 => var,
            _ => F::zero(),
        }
    }

    fn cdf(&self, x: F, s: F, order: usize) -> F {
        let z = (x - self.mu) / self.sigma - s;

        if order == 0 {
            let sqrt_2 = F::of(std::f64::consts::SQRT_2);
            return (F::one() + (z / sqrt_2).erf()) / F::of(2.0);
        }

        let sqrt_2pi = F::of(SQRT_2PI);
        let phi = (-z * z / F::of(2.0)).exp() / (self.sigma * sqrt_2pi);

        phi * Self::hermite(order - 1, z) / (-self.sigma).powi(order as i32 - 1)
    }

    /// `∂F_s(x)/∂s = −φ(z − s) = −σ·cdf(x, s, 1)`.
    fn edf(&self, x: F, s: F) -> F {
        -(self.sigma * self.cdf(x, s, 1))
    }
}

/// `√(2π)`.
const SQRT_2PI: f64 = 2.5066282746310002;
