//! Steady-state flow solver for a fixed eight-pipe network.
//!
//! The unknowns are the flows in the eight pipes. Four node mass balances and
//! four loop energy balances (head loss `R·Q·|Q|`) form the residual, which a
//! plain Newton-Raphson iteration drives to zero.

pub mod error;
pub mod jacobian;
pub mod network;
pub mod newton;
pub mod problem;
pub mod residual;
pub mod solve;
pub mod sweep;

pub use error::{SolverError, SolverResult};
pub use jacobian::{central_difference_jacobian, jacobian, max_jacobian_deviation};
pub use network::{
    BASE_RESISTANCES, EQUATION_LABELS, FlowVector, JacobianMatrix, LOOP_COUNT, LoopBalance,
    NODE_COUNT, NODE_SUPPLY, NodeBalance, REFERENCE_OFFSET, ResidualVector, ResistanceVector,
    resistances_for_offset, unit_flows,
};
pub use newton::{IterationEvent, NewtonConfig, NewtonResult};
pub use problem::NetworkProblem;
pub use residual::{energy_residual, mass_residual, residual, residual_norm};
pub use solve::{solve, solve_slices, solve_with_progress};
pub use sweep::{SweepPoint, offsets, sweep};
