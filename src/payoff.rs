//! Payoff descriptors: strike-carrying tags the engine dispatches on.
//!
//! A payoff is pure data — variant plus strike — with no pricing logic of its
//! own. Linear payoffs (`Call`, `Put`) pay `max(±(F − K), 0)`; digital payoffs
//! pay a unit amount on the moneyness indicator instead.
//!
//! Strikes are non-negative: zero is the documented "free asset" degenerate
//! the engine prices in closed form, while put/call selection by *sign* is a
//! convention of the engine's bare-strike entry points
//! ([`Payoff::from_signed`]), never a stored negative strike.

use serde::{Deserialize, Serialize};

use crate::error::EsscherError;
use crate::validate::validate_non_negative;
use crate::variate::Real;

/// A European option payoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayoffRaw<F>", into = "PayoffRaw<F>")]
pub enum Payoff<F: Real> {
    /// Pays `max(F − K, 0)`.
    Call { strike: F },
    /// Pays `max(K − F, 0)`.
    Put { strike: F },
    /// Pays 1 if `F > K`.
    DigitalCall { strike: F },
    /// Pays 1 if `F ≤ K`.
    DigitalPut { strike: F },
}

#[derive(Serialize, Deserialize)]
enum PayoffRaw<F> {
    Call { strike: F },
    Put { strike: F },
    DigitalCall { strike: F },
    DigitalPut { strike: F },
}

impl<F: Real> TryFrom<PayoffRaw<F>> for Payoff<F> {
    type Error = EsscherError;

    fn try_from(raw: PayoffRaw<F>) -> Result<Self, Self::Error> {
        match raw {
            PayoffRaw::Call { strike } => Self::call(strike),
            PayoffRaw::Put { strike } => Self::put(strike),
            PayoffRaw::DigitalCall { strike } => Self::digital_call(strike),
            PayoffRaw::DigitalPut { strike } => Self::digital_put(strike),
        }
    }
}

impl<F: Real> From<Payoff<F>> for PayoffRaw<F> {
    fn from(p: Payoff<F>) -> Self {
        match p {
            Payoff::Call { strike } => Self::Call { strike },
            Payoff::Put { strike } => Self::Put { strike },
            Payoff::DigitalCall { strike } => Self::DigitalCall { strike },
            Payoff::DigitalPut { strike } => Self::DigitalPut { strike },
        }
    }
}

impl<F: Real> Payoff<F> {
    /// A call struck at `strike`.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the strike is negative or
    /// not finite.
    pub fn call(strike: F) -> crate::error::Result<Self> {
        Ok(Self::Call {
            strike: validate_non_negative(strike, "strike")?,
        })
    }

    /// A put struck at `strike`.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the strike is negative or
    /// not finite.
    pub fn put(strike: F) -> crate::error::Result<Self> {
        Ok(Self::Put {
            strike: validate_non_negative(strike, "strike")?,
        })
    }

    /// A digital call struck at `strike`.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the strike is negative or
    /// not finite.
    pub fn digital_call(strike: F) -> crate::error::Result<Self> {
        Ok(Self::DigitalCall {
            strike: validate_non_negative(strike, "strike")?,
        })
    }

    /// A digital put struck at `strike`.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the strike is negative or
    /// not finite.
    pub fn digital_put(strike: F) -> crate::error::Result<Self> {
        Ok(Self::DigitalPut {
            strike: validate_non_negative(strike, "strike")?,
        })
    }

    /// Signed-strike convention: non-negative selects a call, negative a put
    /// on the magnitude.
    ///
    /// # Errors
    /// Returns [`EsscherError::InvalidInput`] if the strike is not finite.
    pub fn from_signed(strike: F) -> crate::error::Result<Self> {
        if strike < F::zero() {
            Self::put(-strike)
        } else {
            Self::call(strike)
        }
    }

    /// The strike `K`.
    pub fn strike(&self) -> F {
        match *self {
            Self::Call { strike }
            | Self::Put { strike }
            | Self::DigitalCall { strike }
            | Self::DigitalPut { strike } => strike,
        }
    }

    /// Whether the payoff is put-style (benefits from `F` falling).
    pub fn is_put(&self) -> bool {
        matches!(self, Self::Put { .. } | Self::DigitalPut { .. })
    }

    /// Whether the payoff is digital (unit payment on the indicator).
    pub fn is_digital(&self) -> bool {
        matches!(self, Self::DigitalCall { .. } | Self::DigitalPut { .. })
    }
}
