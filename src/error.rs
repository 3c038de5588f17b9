//! Error types for the esscher library.
//!
//! All fallible operations return `Result<T, EsscherError>` rather than
//! panicking, providing meaningful diagnostics for invalid inputs, numerical
//! failures, and solver non-convergence. Degenerate-but-valid inputs (zero
//! forward, zero volatility, zero strike) are *not* errors — the pricing
//! engine handles them as explicit closed-form branches.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, EsscherError>;

/// Errors that can occur during option pricing and implied-vol extraction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EsscherError {
    /// Input violates a precondition (e.g., negative forward, invalid model
    /// parameters, non-positive target price for implied vol).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Numerical computation failed (e.g., NaN intermediate, vanishing vega).
    #[error("numerical error: {message}")]
    NumericalError { message: String },

    /// The implied-volatility solver exhausted its iteration cap.
    ///
    /// Carries the full iteration count, the last Newton iterate, and the size
    /// of the last step so the caller can distinguish "almost there" from a
    /// diverging search.
    #[error(
        "implied vol did not converge after {iterations} iterations \
         (last vol {last_vol}, last step {last_step})"
    )]
    NoConvergence {
        /// Iterations consumed (equals the configured cap).
        iterations: usize,
        /// Final (unconverged) volatility iterate.
        last_vol: f64,
        /// Magnitude of the final Newton step.
        last_step: f64,
    },
}
