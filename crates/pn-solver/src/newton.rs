//! Plain Newton-Raphson iteration on the network residual.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::jacobian;
use crate::network::{FlowVector, ResidualVector, ResistanceVector};
use crate::problem::NetworkProblem;
use crate::residual::residual;
use pn_core::ensure_finite;

/// Newton solver configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonConfig {
    /// Converged once the residual 2-norm drops below this
    pub tolerance: f64,
    /// Maximum Newton steps. Zero is allowed and takes no step.
    pub max_iterations: usize,
    /// Relative pivot threshold below which the Jacobian counts as singular
    pub pivot_tolerance: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 200,
            pivot_tolerance: 1e-12,
        }
    }
}

impl NewtonConfig {
    /// Reject settings that cannot drive a solve.
    pub fn validate(&self) -> SolverResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolverError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.pivot_tolerance.is_finite() && self.pivot_tolerance >= 0.0) {
            return Err(SolverError::invalid_input(format!(
                "pivot tolerance must be non-negative and finite, got {}",
                self.pivot_tolerance
            )));
        }
        Ok(())
    }
}

/// Newton iteration result.
#[derive(Clone, Debug, PartialEq)]
pub struct NewtonResult {
    /// Flow in each pipe at the last iterate
    pub flows: FlowVector,
    /// Converged flag
    pub converged: bool,
    /// Newton steps taken
    pub iterations: usize,
    /// Residual norm at `flows`
    pub residual_norm: f64,
}

/// Progress reported after every Newton step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationEvent {
    /// 0-based index of the step just taken
    pub iteration: usize,
    /// Residual norm before the step
    pub residual_norm: f64,
    /// Norm of the applied update
    pub step_norm: f64,
}

/// Newton solver without damping or line search.
///
/// Stops as soon as the residual norm is below `config.tolerance`. Exhausting
/// `config.max_iterations` returns `converged = false` with the last iterate.
/// A singular Jacobian aborts the solve.
pub fn newton_solve(
    problem: &NetworkProblem,
    config: &NewtonConfig,
    mut progress: Option<&mut dyn FnMut(IterationEvent)>,
) -> SolverResult<NewtonResult> {
    problem.validate()?;
    config.validate()?;

    let r = &problem.resistances;
    let mut q = problem.initial_flows;

    for iter in 0..config.max_iterations {
        let f = residual(&q, r);
        let f_norm = ensure_finite(f.norm(), "residual norm")?;

        // Check convergence
        if f_norm < config.tolerance {
            tracing::info!(iterations = iter, residual_norm = f_norm, "Newton converged");
            return Ok(NewtonResult {
                flows: q,
                converged: true,
                iterations: iter,
                residual_norm: f_norm,
            });
        }

        let dq = newton_step(&q, r, &f, config, iter)?;
        let step_norm = dq.norm();
        tracing::debug!(
            iteration = iter,
            residual_norm = f_norm,
            step_norm,
            "Newton step"
        );
        if let Some(cb) = progress.as_deref_mut() {
            cb(IterationEvent {
                iteration: iter,
                residual_norm: f_norm,
                step_norm,
            });
        }

        q = q + dq;
    }

    let residual_norm = residual(&q, r).norm();
    tracing::warn!(
        max_iterations = config.max_iterations,
        residual_norm,
        "Newton did not converge"
    );
    Ok(NewtonResult {
        flows: q,
        converged: false,
        iterations: config.max_iterations,
        residual_norm,
    })
}

/// Solve `J * dq = -f` at `q`.
///
/// Each row is scaled by its largest entry before factoring, so the pivot
/// test compares mass rows (entries near 1) and loop rows (entries near
/// `2·R·|Q|`) on the same footing.
fn newton_step(
    q: &FlowVector,
    r: &ResistanceVector,
    f: &ResidualVector,
    config: &NewtonConfig,
    iteration: usize,
) -> SolverResult<FlowVector> {
    let mut jac = jacobian(q, r);
    let mut rhs = -f;
    for i in 0..jac.nrows() {
        let scale = jac.row(i).amax();
        if scale == 0.0 {
            return Err(SolverError::SingularJacobian {
                iteration,
                what: format!("row {i} of the Jacobian is zero"),
            });
        }
        let mut row = jac.row_mut(i);
        row /= scale;
        rhs[i] /= scale;
    }

    let lu = jac.lu();
    let pivots = lu.u().diagonal().map(f64::abs);
    let smallest = pivots.min();
    let threshold = config.pivot_tolerance * pivots.max();
    if !lu.is_invertible() || smallest <= threshold {
        return Err(SolverError::SingularJacobian {
            iteration,
            what: format!("smallest pivot {smallest:e} at or below {threshold:e}"),
        });
    }

    let dq = lu
        .solve(&rhs)
        .ok_or_else(|| SolverError::SingularJacobian {
            iteration,
            what: "LU solve failed".to_string(),
        })?;

    if dq.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::SingularJacobian {
            iteration,
            what: "non-finite Newton step".to_string(),
        });
    }

    Ok(dq)
}
