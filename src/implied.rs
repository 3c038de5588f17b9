//! Implied volatility: invert `value(f, s, k) = price` for `s`.
//!
//! A damped Newton–Raphson iteration on the total volatility, using the
//! engine's analytic vega as the derivative. Safeguards:
//!
//! - the target price is checked against the static arbitrage bounds
//!   (intrinsic value below, forward/strike above) before iterating, so the
//!   root actually exists;
//! - a step that would leave the domain (`s ≤ 0`) is damped to `s/2`, and one
//!   that would more than double `s` is clamped to `2s` — far from the root
//!   vega is tiny and a raw Newton step overshoots by orders of magnitude;
//! - an underflowed vega falls back to a doubling/halving step keyed off the
//!   sign of `value − price` instead of dividing by zero; a non-finite value
//!   or vega aborts with a numerical error;
//! - the iteration cap surfaces as [`EsscherError::NoConvergence`] carrying
//!   the last iterate — never a silently returned unconverged value.

use serde::{Deserialize, Serialize};

use num_traits::{Float, ToPrimitive, Zero};

use crate::error::EsscherError;
use crate::option::OptionPricer;
use crate::payoff::Payoff;
use crate::validate::{validate_non_negative, validate_positive};
use crate::variate::{Real, Variate};

/// Default Newton–Raphson iteration cap.
const DEFAULT_MAX_ITER: usize = 64;

/// `√(2π)`, the Brenner–Subrahmanyam at-the-money constant.
const SQRT_2PI: f64 = 2.5066282746310002;

/// Tuning knobs for the implied-volatility solver.
///
/// A zero field means "derive a sensible default": `s0 == 0` starts from the
/// at-the-money inversion `√(2π)·price/f`, `tol == 0` uses `√ε` for the
/// scalar in play, and `max_iter == 0` uses the built-in cap. Caller-supplied
/// tolerances are floored at `10ε` — asking Newton for more than machine
/// precision just burns the iteration budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpliedConfig<F> {
    /// Initial volatility guess; 0 derives one from the target price.
    pub s0: F,
    /// Convergence tolerance on the Newton step size; 0 means `√ε`.
    pub tol: F,
    /// Iteration cap; 0 means the default (64).
    pub max_iter: usize,
}

impl<F: Real> Default for ImpliedConfig<F> {
    fn default() -> Self {
        Self {
            s0: F::zero(),
            tol: F::zero(),
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl<'m, M: Variate> OptionPricer<'m, M> {
    /// Implied total volatility with default solver settings.
    ///
    /// The strike is signed: positive matches a call price, negative a put
    /// price on the magnitude (the crate-wide bare-strike convention).
    ///
    /// # Errors
    /// As [`implied_with`](Self::implied_with).
    pub fn implied(
        &self,
        forward: M::Scalar,
        price: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        self.implied_with(forward, price, strike, &ImpliedConfig::default())
    }

    /// Implied total volatility with explicit solver settings.
    ///
    /// # Errors
    /// - [`EsscherError::InvalidInput`] if `forward` or `price` is not
    ///   strictly positive, the strike magnitude is zero, the config fields
    ///   are negative or non-finite, or the price sits outside the static
    ///   arbitrage bounds (no volatility can reproduce it).
    /// - [`EsscherError::NumericalError`] if the value or vega turns
    ///   non-finite mid-iteration.
    /// - [`EsscherError::NoConvergence`] if the iteration cap is exhausted.
    pub fn implied_with(
        &self,
        forward: M::Scalar,
        price: M::Scalar,
        strike: M::Scalar,
        config: &ImpliedConfig<M::Scalar>,
    ) -> crate::error::Result<M::Scalar> {
        let zero = M::Scalar::zero();
        let two = M::Scalar::of(2.0);

        let f = validate_positive(forward, "forward")?;
        let price = validate_positive(price, "price")?;
        let payoff = Payoff::from_signed(strike)?;
        let k = validate_positive(payoff.strike(), "strike magnitude")?;
        validate_non_negative(config.s0, "s0")?;
        validate_non_negative(config.tol, "tol")?;

        // Static arbitrage bounds: intrinsic < price < (strike for a put,
        // forward for a call). Outside them no volatility reproduces the
        // price and Newton would wander off.
        let intrinsic = self.value(f, zero, &payoff)?;
        let upper = if payoff.is_put() { k } else { f };
        if price <= intrinsic || price >= upper {
            return Err(EsscherError::InvalidInput {
                message: format!(
                    "price {price} outside arbitrage bounds ({intrinsic}, {upper})"
                ),
            });
        }

        let eps = M::Scalar::epsilon();
        let tol = if config.tol == zero {
            eps.sqrt()
        } else {
            config.tol.max(M::Scalar::of(10.0) * eps)
        };
        let max_iter = if config.max_iter == 0 {
            DEFAULT_MAX_ITER
        } else {
            config.max_iter
        };
        let mut s = if config.s0 == zero {
            // Brenner–Subrahmanyam ATM inversion, kept away from 0 so the
            // first vega is meaningful even for deep out-of-the-money quotes.
            (M::Scalar::of(SQRT_2PI) * price / f).max(M::Scalar::of(1e-3))
        } else {
            config.s0
        };

        #[cfg(feature = "logging")]
        tracing::debug!(
            price = price.to_f64().unwrap_or(f64::NAN),
            s0 = s.to_f64().unwrap_or(f64::NAN),
            "implied vol solve started"
        );

        // Sentinel step guarantees the loop body runs at least once.
        let mut step = M::Scalar::infinity();
        let mut iterations = 0usize;

        while step.abs() > tol {
            if iterations == max_iter {
                return Err(EsscherError::NoConvergence {
                    iterations,
                    last_vol: s.to_f64().unwrap_or(f64::NAN),
                    last_step: step.abs().to_f64().unwrap_or(f64::NAN),
                });
            }

            let value = self.value(f, s, &payoff)?;
            let vega = self.vega(f, s, k)?;
            if !value.is_finite() || !vega.is_finite() {
                return Err(EsscherError::NumericalError {
                    message: format!("non-finite value/vega at vol {s}"),
                });
            }

            let mut next = if vega.abs() <= M::Scalar::min_positive_value() {
                // Deep out of the money the objective is flat to machine
                // precision; bracket toward the root instead of dividing.
                if value < price {
                    s * two
                } else {
                    s / two
                }
            } else {
                s - (value - price) / vega
            };
            if next <= zero {
                // Damp rather than leave the domain.
                next = s / two;
            } else if next > s * two {
                // Clamp the overshoot where vega is still tiny.
                next = s * two;
            }
            step = next - s;
            s = next;
            iterations += 1;
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            iterations,
            vol = s.to_f64().unwrap_or(f64::NAN),
            "implied vol converged"
        );

        Ok(s)
    }
}
