//! Fixed topology of the eight-pipe network.
//!
//! Four junction nodes carry a mass balance each and four loops carry an
//! energy (head loss) balance each. Pipe `i` (1-based) always sits at
//! vector index `i - 1`.

use nalgebra::{SMatrix, SVector};
use pn_core::{PIPE_COUNT, Real};

/// Number of junction nodes (mass balances).
pub const NODE_COUNT: usize = 4;

/// Number of loop equations (energy balances).
pub const LOOP_COUNT: usize = 4;

/// Volumetric flow in each pipe.
pub type FlowVector = SVector<Real, PIPE_COUNT>;

/// Hydraulic resistance of each pipe.
pub type ResistanceVector = SVector<Real, PIPE_COUNT>;

/// Conservation-law violations: rows 0..4 are nodes, rows 4..8 are loops.
pub type ResidualVector = SVector<Real, PIPE_COUNT>;

/// Mass-balance block of the residual, one entry per node.
pub type NodeBalance = SVector<Real, NODE_COUNT>;

/// Energy-balance block of the residual, one entry per loop.
pub type LoopBalance = SVector<Real, LOOP_COUNT>;

pub type JacobianMatrix = SMatrix<Real, PIPE_COUNT, PIPE_COUNT>;

/// External supply (positive) or demand at each node, subtracted from the
/// node's signed flow sum.
pub const NODE_SUPPLY: [Real; NODE_COUNT] = [5.0, 0.0, 3.0, 2.0];

/// Resistances before the offset `p` is applied.
pub const BASE_RESISTANCES: [Real; PIPE_COUNT] =
    [120.0, 200.0, 150.0, 300.0, 400.0, 400.0, 400.0, 400.0];

/// Offset used by the reference case.
pub const REFERENCE_OFFSET: Real = 40.0;

/// Build `BASE_RESISTANCES + p`.
pub fn resistances_for_offset(p: Real) -> ResistanceVector {
    ResistanceVector::from(BASE_RESISTANCES).add_scalar(p)
}

/// Initial guess used by the reference case: unit flow in every pipe.
pub fn unit_flows() -> FlowVector {
    FlowVector::repeat(1.0)
}

/// Human-readable equation labels in residual order.
pub const EQUATION_LABELS: [&str; PIPE_COUNT] = [
    "node 1", "node 2", "node 3", "node 4", "loop 1", "loop 2", "loop 3", "loop 4",
];
