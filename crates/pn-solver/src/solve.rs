//! High-level solver interface.

use crate::error::SolverResult;
use crate::newton::{IterationEvent, NewtonConfig, NewtonResult, newton_solve};
use crate::problem::NetworkProblem;
use pn_core::Real;

/// Solve the network for steady-state pipe flows.
///
/// Returns the last iterate together with the convergence flag and the
/// number of Newton steps. Only invalid input and a singular Jacobian are
/// errors; running out of iterations is reported by `converged = false`.
pub fn solve(problem: &NetworkProblem, config: &NewtonConfig) -> SolverResult<NewtonResult> {
    newton_solve(problem, config, None)
}

/// Same as [`solve`], calling `progress` after every Newton step.
pub fn solve_with_progress(
    problem: &NetworkProblem,
    config: &NewtonConfig,
    progress: &mut dyn FnMut(IterationEvent),
) -> SolverResult<NewtonResult> {
    newton_solve(problem, config, Some(progress))
}

/// Slice-based entry point for callers holding plain arrays.
///
/// # Arguments
/// * `initial_flows` - starting flow in each of the 8 pipes
/// * `resistances` - resistance of each of the 8 pipes
/// * `tolerance` - residual norm below which the solve has converged
/// * `max_iterations` - Newton step budget
pub fn solve_slices(
    initial_flows: &[Real],
    resistances: &[Real],
    tolerance: Real,
    max_iterations: usize,
) -> SolverResult<NewtonResult> {
    let problem = NetworkProblem::from_slices(initial_flows, resistances)?;
    let config = NewtonConfig {
        tolerance,
        max_iterations,
        ..NewtonConfig::default()
    };
    solve(&problem, &config)
}
