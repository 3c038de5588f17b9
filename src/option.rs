//! The option pricing engine: value, delta, gamma, vega.
//!
//! The underlying at expiration is `F = f·exp(s·X − κ(s))`, where `X` is
//! drawn from the bound variate, `f` is the forward, and `s` the total
//! volatility (σ√t for the Black model). For a standardized variate
//! (`E[X] = 0`, `E[X²] = 1`) this gives `E[F] = f` and `Var(log F) = s²`.
//!
//! Every formula reduces to tilted probabilities through the moneyness
//! `x = (ln(k/f) + κ(s))/s`, the threshold with `F ≤ k ⟺ X ≤ x`:
//!
//! ```text
//! put   = k·F₀(x) − f·F_s(x)
//! call  = put + f − k            (put–call parity, exact by construction)
//! delta = −F_s(x)  (put)          gamma = f_s(x)/(f·s)
//! vega  = −f·∂F_s(x)/∂s
//! ```
//!
//! Degenerate inputs (zero forward, zero volatility, zero strike) are valid
//! and take explicit closed-form branches, including the `+∞` gamma at the
//! money with zero volatility (a Dirac limit, deliberately representable).
//!
//! # Examples
//! ```
//! use esscher::{Normal, OptionPricer, Payoff};
//!
//! let normal = Normal::<f64>::standard();
//! let pricer = OptionPricer::new(&normal);
//! let put = Payoff::put(100.0)?;
//! let value = pricer.value(100.0, 0.1, &put)?;
//! assert!((value - 3.9877611676744920).abs() < 1e-12);
//! # Ok::<(), esscher::EsscherError>(())
//! ```

use num_traits::{Float, One, Zero};

use crate::payoff::Payoff;
use crate::validate::{validate_finite, validate_non_negative, validate_positive};
use crate::variate::Variate;

/// Prices European options against one borrowed variate.
///
/// Stateless beyond the borrow: every call is a pure function of its explicit
/// arguments, so one pricer (or one variate behind several pricers) can be
/// shared across threads freely.
#[derive(Debug, Clone, Copy)]
pub struct OptionPricer<'m, M: Variate> {
    variate: &'m M,
}

impl<'m, M: Variate> OptionPricer<'m, M> {
    /// Bind a pricer to a variate.
    pub fn new(variate: &'m M) -> Self {
        Self { variate }
    }

    /// The bound variate.
    pub fn variate(&self) -> &M {
        self.variate
    }

    /// Moneyness `x = (ln(k/f) + κ(s))/s`, the tilt-space threshold with
    /// `F ≤ k ⟺ X ≤ x`.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] unless `f`, `s`, and `k` are
    /// all strictly positive and finite. (The degenerate zeros are handled by
    /// the pricing functions, not here.)
    pub fn moneyness(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        let f = validate_positive(forward, "forward")?;
        let s = validate_positive(vol, "vol")?;
        let k = validate_positive(strike, "strike")?;

        Ok(((k / f).ln() + self.variate.cumulant(s, 0)) / s)
    }

    /// Option value `E[payoff(F)]`.
    ///
    /// Degenerate branches, in priority order: `f == 0` values every payoff
    /// at 0; `s == 0` gives the intrinsic value (indicator payment for
    /// digitals); `k == 0` makes a call the asset itself and a put worthless.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] for negative or non-finite
    /// `forward` / `vol`.
    pub fn value(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        payoff: &Payoff<M::Scalar>,
    ) -> crate::error::Result<M::Scalar> {
        let f = validate_non_negative(forward, "forward")?;
        let s = validate_non_negative(vol, "vol")?;
        let k = payoff.strike();
        let zero = M::Scalar::zero();
        let one = M::Scalar::one();

        if f == zero {
            return Ok(zero);
        }
        if s == zero {
            return Ok(match *payoff {
                Payoff::Call { .. } => (f - k).max(zero),
                Payoff::Put { .. } => (k - f).max(zero),
                Payoff::DigitalCall { .. } => {
                    if f > k {
                        one
                    } else {
                        zero
                    }
                }
                Payoff::DigitalPut { .. } => {
                    if f <= k {
                        one
                    } else {
                        zero
                    }
                }
            });
        }
        if k == zero {
            // Free asset: a call on a zero strike is the forward itself.
            return Ok(match *payoff {
                Payoff::Call { .. } => f,
                Payoff::DigitalCall { .. } => one,
                Payoff::Put { .. } | Payoff::DigitalPut { .. } => zero,
            });
        }

        let x = self.moneyness(f, s, k)?;
        let cdf0 = self.variate.cdf(x, zero, 0);

        Ok(match *payoff {
            Payoff::Call { .. } => {
                let cdfs = self.variate.cdf(x, s, 0);
                f * (one - cdfs) - k * (one - cdf0)
            }
            Payoff::Put { .. } => {
                let cdfs = self.variate.cdf(x, s, 0);
                k * cdf0 - f * cdfs
            }
            Payoff::DigitalCall { .. } => one - cdf0,
            Payoff::DigitalPut { .. } => cdf0,
        })
    }

    /// Signed-strike value: a non-negative `strike` prices a call, a negative
    /// one a put on the magnitude.
    ///
    /// # Errors
    /// As [`value`](Self::value); a non-finite strike is an
    /// [`EsscherError::InvalidInput`].
    pub fn value_signed(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        self.value(forward, vol, &Payoff::from_signed(strike)?)
    }

    /// Delta, `∂value/∂f`.
    ///
    /// At `s == 0` the linear deltas are pure 0/±1 moneyness indicators and
    /// the digital deltas are a Dirac limit (`±∞` at the money, else 0).
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] for negative or non-finite
    /// `forward` / `vol`.
    pub fn delta(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        payoff: &Payoff<M::Scalar>,
    ) -> crate::error::Result<M::Scalar> {
        let f = validate_non_negative(forward, "forward")?;
        let s = validate_non_negative(vol, "vol")?;
        let k = payoff.strike();
        let zero = M::Scalar::zero();
        let one = M::Scalar::one();

        if f == zero {
            return Ok(zero);
        }
        if s == zero {
            return Ok(match *payoff {
                Payoff::Call { .. } => {
                    if f > k {
                        one
                    } else {
                        zero
                    }
                }
                Payoff::Put { .. } => {
                    if f <= k {
                        -one
                    } else {
                        zero
                    }
                }
                Payoff::DigitalCall { .. } => {
                    if f == k {
                        M::Scalar::infinity()
                    } else {
                        zero
                    }
                }
                Payoff::DigitalPut { .. } => {
                    if f == k {
                        M::Scalar::neg_infinity()
                    } else {
                        zero
                    }
                }
            });
        }
        if k == zero {
            return Ok(match *payoff {
                Payoff::Call { .. } => one,
                _ => zero,
            });
        }

        let x = self.moneyness(f, s, k)?;

        Ok(match *payoff {
            Payoff::Call { .. } => one - self.variate.cdf(x, s, 0),
            Payoff::Put { .. } => -self.variate.cdf(x, s, 0),
            Payoff::DigitalCall { .. } => self.variate.cdf(x, zero, 1) / (f * s),
            Payoff::DigitalPut { .. } => -(self.variate.cdf(x, zero, 1) / (f * s)),
        })
    }

    /// Signed-strike delta, mirroring [`value_signed`](Self::value_signed).
    ///
    /// # Errors
    /// As [`delta`](Self::delta).
    pub fn delta_signed(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        self.delta(forward, vol, &Payoff::from_signed(strike)?)
    }

    /// Gamma, `∂²value/∂f²` — identical for put and call by parity, so this
    /// takes a bare strike whose sign is ignored.
    ///
    /// `gamma(f, 0, f)` is `+∞`: with no volatility all the curvature sits in
    /// a Dirac delta at the strike. A documented limit, not an error.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] for negative or non-finite
    /// `forward` / `vol`, or a non-finite strike.
    pub fn gamma(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        let f = validate_non_negative(forward, "forward")?;
        let s = validate_non_negative(vol, "vol")?;
        let k = validate_finite(strike, "strike")?.abs();
        let zero = M::Scalar::zero();

        if f == zero || k == zero {
            return Ok(zero);
        }
        if s == zero {
            return Ok(if f == k {
                M::Scalar::infinity()
            } else {
                zero
            });
        }

        let x = self.moneyness(f, s, k)?;

        Ok(self.variate.cdf(x, s, 1) / (f * s))
    }

    /// Vega, `∂value/∂s` — identical for put and call by parity; strike sign
    /// ignored.
    ///
    /// Differentiating `put = k·F₀(x) − f·F_s(x)` in `s`, the `dx/ds` terms
    /// cancel through the tilted-density identity `k·f₀(x) = f·f_s(x)`,
    /// leaving `−f·∂F_s(x)/∂s` — the variate's [`edf`](Variate::edf). At
    /// `s == 0` this is 0 away from the money and the finite one-sided limit
    /// `−f·edf(κ'(0), 0)` at it (`f·φ(0)` for the standard normal).
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] for negative or non-finite
    /// `forward` / `vol`, or a non-finite strike.
    pub fn vega(
        &self,
        forward: M::Scalar,
        vol: M::Scalar,
        strike: M::Scalar,
    ) -> crate::error::Result<M::Scalar> {
        let f = validate_non_negative(forward, "forward")?;
        let s = validate_non_negative(vol, "vol")?;
        let k = validate_finite(strike, "strike")?.abs();
        let zero = M::Scalar::zero();

        if f == zero || k == zero {
            return Ok(zero);
        }
        if s == zero {
            if f != k {
                return Ok(zero);
            }
            let x0 = self.variate.cumulant(zero, 1);
            return Ok(-(f * self.variate.edf(x0, zero)));
        }

        let x = self.moneyness(f, s, k)?;

        Ok(-(f * self.variate.edf(x, s)))
    }
}
