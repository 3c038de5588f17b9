//! Discrete variate — a finite set of weighted atoms.
//!
//! Useful for tree models and empirical distributions. The cumulant is a
//! log-sum-exp over the atoms and tilting reweights them:
//!
//! ```text
//! κ(s)   = log Σᵢ pᵢ·e^{s·xᵢ}
//! F_s(x) = Σ_{xᵢ ≤ x} pᵢ·e^{s·xᵢ − κ(s)}
//! ```
//!
//! A step function has no classical density, so CDF derivative orders ≥ 1
//! return quiet NaN; pair this model with digital payoffs or value-only
//! pricing rather than gamma/vega.

use serde::{Deserialize, Serialize};

use crate::error::EsscherError;
use crate::validate::{validate_finite, validate_non_negative};
use crate::variate::{Real, Variate};

/// Discrete variate on atoms `x₁ < x₂ < … < xₙ` with weights `pᵢ` summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DiscreteRaw<F>", into = "DiscreteRaw<F>")]
pub struct Discrete<F: Real> {
    x: Vec<F>,
    p: Vec<F>,
}

#[derive(Serialize, Deserialize)]
struct DiscreteRaw<F> {
    x: Vec<F>,
    p: Vec<F>,
}

impl<F: Real> TryFrom<DiscreteRaw<F>> for Discrete<F> {
    type Error = EsscherError;

    fn try_from(raw: DiscreteRaw<F>) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.p)
    }
}

impl<F: Real> From<Discrete<F>> for DiscreteRaw<F> {
    fn from(d: Discrete<F>) -> Self {
        Self { x: d.x, p: d.p }
    }
}

impl<F: Real> Discrete<F> {
    /// Create a discrete variate from parallel atom/weight slices.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the slices are empty or of
    /// different lengths, the atoms are not finite and strictly increasing,
    /// any weight is negative or non-finite, or the weights do not sum to 1
    /// (within `√ε`).
    pub fn new(x: Vec<F>, p: Vec<F>) -> crate::error::Result<Self> {
        if x.is_empty() || x.len() != p.len() {
            return Err(EsscherError::InvalidInput {
                message: format!(
                    "need equal, non-zero atom and weight counts, got {} and {}",
                    x.len(),
                    p.len()
                ),
            });
        }
        for (i, &xi) in x.iter().enumerate() {
            validate_finite(xi, "atom")?;
            if i > 0 && xi <= x[i - 1] {
                return Err(EsscherError::InvalidInput {
                    message: format!("atoms must be strictly increasing, got {} after {}", xi, x[i - 1]),
                });
            }
        }
        let mut total = F::zero();
        for &pi in &p {
            total = total + validate_non_negative(pi, "weight")?;
        }
        if (total - F::one()).abs() > F::epsilon().sqrt() {
            return Err(EsscherError::InvalidInput {
                message: format!("weights must sum to 1, got {total}"),
            });
        }

        Ok(Self { x, p })
    }

    /// Atoms.
    pub fn atoms(&self) -> &[F] {
        &self.x
    }

    /// Weights.
    pub fn weights(&self) -> &[F] {
        &self.p
    }

    /// Tilted weights `qᵢ = pᵢ·e^{s·xᵢ − κ(s)}` and the cumulant `κ(s)`,
    /// computed with a max-shift so large tilts do not overflow.
    fn tilted(&self, s: F) -> (Vec<F>, F) {
        let m = self
            .x
            .iter()
            .map(|&xi| s * xi)
            .fold(F::neg_infinity(), F::max);
        let w: Vec<F> = self
            .x
            .iter()
            .zip(&self.p)
            .map(|(&xi, &pi)| pi * (s * xi - m).exp())
            .collect();
        let z = w.iter().fold(F::zero(), |acc, &wi| acc + wi);
        let q = w.into_iter().map(|wi| wi / z).collect();

        (q, m + z.ln())
    }
}

impl<F: Real> Variate for Discrete<F> {
    type Scalar = F;

    fn cumulant(&self, s: F, order: usize) -> F {
        let (q, kappa) = self.tilted(s);

        match order {
            0 => kappa,
            1 => self
                .x
                .iter()
                .zip(&q)
                .fold(F::zero(), |acc, (&xi, &qi)| acc + xi * qi),
            2 => {
                let mean = self.cumulant(s, 1);
                self.x.iter().zip(&q).fold(F::zero(), |acc, (&xi, &qi)| {
                    acc + (xi - mean) * (xi - mean) * qi
                })
            }
            _ => F::nan(),
        }
    }

    fn cdf(&self, x: F, s: F, order: usize) -> F {
        if order > 0 {
            return F::nan();
        }

        let (q, _) = self.tilted(s);
        self.x
            .iter()
            .zip(&q)
            .take_while(|&(&xi, _)| xi <= x)
            .fold(F::zero(), |acc, (_, &qi)| acc + qi)
    }
}
