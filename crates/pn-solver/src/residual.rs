//! Residual of the mass and energy balances.

use crate::network::{
    FlowVector, LoopBalance, NODE_COUNT, NODE_SUPPLY, NodeBalance, ResidualVector,
    ResistanceVector,
};
use pn_core::{Real, signed_square};

/// Mass balance at each node: signed sum of pipe flows minus the node supply.
///
/// Independent of the resistances.
pub fn mass_residual(q: &FlowVector) -> NodeBalance {
    NodeBalance::new(
        q[0] + q[1] + q[4] - NODE_SUPPLY[0],
        q[4] + q[6] - q[5] - q[7] - NODE_SUPPLY[1],
        q[2] + q[3] + q[5] - NODE_SUPPLY[2],
        q[1] + q[7] - q[2] - NODE_SUPPLY[3],
    )
}

/// Net head loss around each loop, with `R·Q·|Q|` per pipe.
pub fn energy_residual(q: &FlowVector, r: &ResistanceVector) -> LoopBalance {
    let h = |i: usize| -> Real { r[i] * signed_square(q[i]) };
    LoopBalance::new(
        h(0) - h(4) + h(6),
        h(3) - h(5) - h(6),
        h(4) - h(1) + h(7),
        h(5) - h(7) - h(2),
    )
}

/// Full residual: node balances followed by loop balances.
///
/// Defined for every real input; zero exactly at a steady state.
pub fn residual(q: &FlowVector, r: &ResistanceVector) -> ResidualVector {
    let mass = mass_residual(q);
    let energy = energy_residual(q, r);
    ResidualVector::from_fn(|i, _| {
        if i < NODE_COUNT {
            mass[i]
        } else {
            energy[i - NODE_COUNT]
        }
    })
}

/// Euclidean norm of the residual.
pub fn residual_norm(q: &FlowVector, r: &ResistanceVector) -> Real {
    residual(q, r).norm()
}
