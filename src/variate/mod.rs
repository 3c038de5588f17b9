//! The variate contract: distribution models the pricing engine plugs into.
//!
//! A variate is a real random variable `X` described by two families of
//! functions:
//!
//! - its cumulant `κ(s) = log E[exp(sX)]` and the derivatives of `κ` in `s`;
//! - its Esscher-tilted distribution `F_s(x) = E[1(X≤x)·exp(sX − κ(s))]` and
//!   the derivatives of `F_s` in `x`.
//!
//! The tilt `dP_s/dP = exp(sX − κ(s))` is an exponential change of measure;
//! every option value and Greek in this crate is a combination of tilted
//! probabilities, so these two families are all the engine ever asks of a
//! model.
//!
//! ## Models
//!
//! - [`Normal`](crate::variate::Normal) — closed forms throughout; the Black
//!   model special case and the reference implementation.
//! - [`Logistic`](crate::variate::Logistic) — heavier tails, cumulant via
//!   log-gamma.
//! - [`Discrete`](crate::variate::Discrete) — finite atoms, e.g. trees or
//!   empirical distributions.
//! - [`Standardized`] — adapter rescaling any variate to mean 0, variance 1.

pub mod discrete;
pub mod logistic;
pub mod normal;

pub use discrete::Discrete;
pub use logistic::Logistic;
pub use normal::Normal;

use std::fmt;

use num_traits::{Float, One, Zero};

use crate::validate::{validate_finite, validate_positive};

/// Floating-point scalar the engine is generic over.
///
/// Extends [`num_traits::Float`] with the error function and an infallible
/// conversion for internal constants. Implemented for `f32` and `f64`; the
/// engine never silently narrows the caller's choice.
pub trait Real: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// The error function `erf(x)`.
    fn erf(self) -> Self;

    /// Convert a literal constant into this scalar type.
    fn of(x: f64) -> Self;
}

impl Real for f64 {
    fn erf(self) -> Self {
        libm::erf(self)
    }

    fn of(x: f64) -> Self {
        x
    }
}

impl Real for f32 {
    fn erf(self) -> Self {
        libm::erff(self)
    }

    fn of(x: f64) -> Self {
        x as f32
    }
}

/// A random variate exposing its cumulant and Esscher-tilted CDF.
///
/// # Conventions
/// - `cumulant(0, 0) == 0` for every valid model (`E[exp(0)] = 1`).
/// - `cdf(x, 0, 0)` is the ordinary CDF of `X`.
/// - A derivative order a model has no formula for returns quiet NaN rather
///   than a wrong number; the engine only needs `cumulant` order 0 and `cdf`
///   orders 0–1 (the [`Standardized`] adapter additionally reads `cumulant`
///   orders 1–2).
///
/// # Thread Safety
/// Implementations must be `Send + Sync`: pure value types with no interior
/// mutability, safe to share across pricing threads without synchronization.
pub trait Variate: Send + Sync {
    /// Scalar type of abscissae, tilts, and results.
    type Scalar: Real;

    /// `order`-th derivative in `s` of the cumulant `κ(s) = log E[exp(sX)]`.
    ///
    /// `order == 0` is the cumulant itself, `1` the tilted mean, `2` the
    /// tilted variance.
    fn cumulant(&self, s: Self::Scalar, order: usize) -> Self::Scalar;

    /// `order`-th derivative in `x` of the tilted CDF
    /// `F_s(x) = E[1(X≤x)·exp(sX − κ(s))]`.
    ///
    /// `order == 0` is the tilted CDF, `1` the tilted density.
    fn cdf(&self, x: Self::Scalar, s: Self::Scalar, order: usize) -> Self::Scalar;

    /// Tilted density, `cdf(x, s, 1)`.
    fn pdf(&self, x: Self::Scalar, s: Self::Scalar) -> Self::Scalar {
        self.cdf(x, s, 1)
    }

    /// Derivative of the tilted CDF with respect to the tilt `s`, at fixed `x`.
    ///
    /// The pricing engine's vega is `−f·edf(x, s)`. This derivative is not
    /// expressible through `cdf`'s x-derivatives for a general variate, so it
    /// is part of the contract; the default is a central finite difference
    /// with step `ε^(1/3)·(1 + |s|)`, accurate to `O(h²)`. Models with a
    /// closed form should override it.
    fn edf(&self, x: Self::Scalar, s: Self::Scalar) -> Self::Scalar {
        let third = Self::Scalar::of(1.0 / 3.0);
        let h = Self::Scalar::epsilon().powf(third) * (Self::Scalar::one() + s.abs());
        (self.cdf(x, s + h, 0) - self.cdf(x, s - h, 0)) / (h + h)
    }
}

/// Adapter rescaling a variate to mean 0 and variance 1.
///
/// If `X` has mean `μ = κ'(0)` and variance `σ² = κ''(0)`, then
/// `X' = (X − μ)/σ` is standardized and
///
/// ```text
/// κ_X'(s)  = κ_X(s/σ) − sμ/σ
/// F'_s(x)  = F_{s/σ}(μ + σx)
/// ```
///
/// The pricing model `F = f·exp(s·X − κ(s))` only has `E[F] = f` and
/// `Var(log F) = s²` for a standardized variate, so wrap non-standard models
/// in this adapter before handing them to the engine.
#[derive(Debug, Clone, Copy)]
pub struct Standardized<M: Variate> {
    inner: M,
    mu: M::Scalar,
    sigma: M::Scalar,
}

impl<M: Variate> Standardized<M> {
    /// Standardize `inner` using its own cumulant derivatives at 0.
    ///
    /// # Errors
    /// Returns [`crate::EsscherError::InvalidInput`] if the model's mean is not
    /// finite or its variance is not finite and positive (e.g. a model that
    /// reports NaN for cumulant order 2 cannot be standardized).
    pub fn new(inner: M) -> crate::error::Result<Self> {
        let zero = M::Scalar::zero();
        let mu = validate_finite(inner.cumulant(zero, 1), "mean (cumulant order 1)")?;
        let var = validate_positive(inner.cumulant(zero, 2), "variance (cumulant order 2)")?;

        Ok(Self {
            inner,
            mu,
            sigma: var.sqrt(),
        })
    }

    /// The wrapped model.
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Mean removed from the wrapped model.
    pub fn mean(&self) -> M::Scalar {
        self.mu
    }

    /// Standard deviation the wrapped model was scaled by.
    pub fn std_dev(&self) -> M::Scalar {
        self.sigma
    }
}

impl<M: Variate> Variate for Standardized<M> {
    type Scalar = M::Scalar;

    fn cumulant(&self, s: Self::Scalar, order: usize) -> Self::Scalar {
        let t = s / self.sigma;
        let base = self.inner.cumulant(t, order) / self.sigma.powi(order as i32);

        match order {
            0 => base - s * self.mu / self.sigma,
            1 => base - self.mu / self.sigma,
            _ => base,
        }
    }

    fn cdf(&self, x: Self::Scalar, s: Self::Scalar, order: usize) -> Self::Scalar {
        self.inner
            .cdf(self.mu + self.sigma * x, s / self.sigma, order)
            * self.sigma.powi(order as i32)
    }

    fn edf(&self, x: Self::Scalar, s: Self::Scalar) -> Self::Scalar {
        self.inner.edf(self.mu + self.sigma * x, s / self.sigma) / self.sigma
    }
}
