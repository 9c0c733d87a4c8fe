//! Error types for solver operations.

use pn_core::PnError;
use thiserror::Error;

/// Errors that can occur during network solving.
///
/// Running out of iterations is not an error: it is reported through
/// [`crate::NewtonResult::converged`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Singular Jacobian at iteration {iteration}: {what}")]
    SingularJacobian { iteration: usize, what: String },

    #[error("Numeric error: {0}")]
    Core(#[from] PnError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn invalid_input(what: impl Into<String>) -> Self {
        Self::InvalidInput { what: what.into() }
    }
}
