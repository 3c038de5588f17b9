//! # esscher
//!
//! European option values and Greeks under exponential-Lévy underlying
//! models, generic over the driving distribution.
//!
//! The underlying at expiration is `F = f·exp(s·X − κ(s))`: `f` the forward,
//! `s` the total volatility (σ√t), `X` a random variate with cumulant
//! `κ(s) = log E[exp(sX)]`. The Esscher tilt `dP_s/dP = exp(sX − κ(s))`
//! turns every option value and Greek into a pair of tilted probabilities,
//! so the whole engine runs on two callbacks any distribution model can
//! provide: the cumulant and the tilted CDF with derivatives.
//!
//! ## Architecture
//!
//! - **`variate`** — the distribution contract ([`Variate`]) and models:
//!   [`Normal`] (the Black special case), [`Logistic`], [`Discrete`], plus
//!   the [`Standardized`] mean-0/variance-1 adapter
//! - **`payoff`** — call/put/digital descriptors ([`Payoff`])
//! - **`option`** — the pricing engine ([`OptionPricer`]): moneyness, value,
//!   delta, gamma, vega
//! - **`implied`** — damped Newton–Raphson implied-volatility solver
//!   ([`ImpliedConfig`])
//!
//! ## Design
//!
//! - **Generic scalar.** Every formula is written against [`Real`]
//!   (`f32` or `f64`); the engine never narrows the caller's precision.
//! - **Static dispatch.** The variate is a compile-time type parameter —
//!   pricing formulas sit in the Newton loop's hot path and every call site
//!   knows its model.
//! - **No panics.** Every fallible operation returns [`Result`]. Library
//!   code never calls `unwrap()` or `expect()`.
//! - **Pure functions.** No interior mutability, no caching, no shared
//!   state; any number of threads may price against one variate.
//! - **Degenerate inputs are branches, not errors.** Zero forward, zero
//!   volatility, and zero strike all have documented closed-form limits,
//!   including the `+∞` at-the-money gamma at zero vol.
//! - **Serializable.** Payoffs, models, and solver config implement Serde
//!   with validation on deserialization where invariants exist.
//!
//! ## Example
//!
//! ```
//! use esscher::{Normal, OptionPricer, Payoff};
//!
//! let normal = Normal::<f64>::standard();
//! let pricer = OptionPricer::new(&normal);
//!
//! let call = Payoff::call(105.0)?;
//! let value = pricer.value(100.0, 0.2, &call)?;
//! let delta = pricer.delta(100.0, 0.2, &call)?;
//!
//! // Recover the volatility from the price (signed strike: positive = call).
//! let vol = pricer.implied(100.0, value, 105.0)?;
//! assert!((vol - 0.2).abs() < 1e-7);
//! # let _ = delta;
//! # Ok::<(), esscher::EsscherError>(())
//! ```

pub mod error;
pub mod implied;
pub mod option;
pub mod payoff;
mod validate;
pub mod variate;

#[doc(inline)]
pub use error::{EsscherError, Result};
#[doc(inline)]
pub use implied::ImpliedConfig;
#[doc(inline)]
pub use option::OptionPricer;
#[doc(inline)]
pub use payoff::Payoff;
#[doc(inline)]
pub use variate::{Discrete, Logistic, Normal, Real, Standardized, Variate};
