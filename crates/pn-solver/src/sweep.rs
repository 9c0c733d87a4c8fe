//! Independent solves over a range of resistance offsets.

use crate::error::SolverResult;
use crate::network::{FlowVector, resistances_for_offset};
use crate::newton::{NewtonConfig, NewtonResult};
use crate::problem::NetworkProblem;
use crate::solve::solve;
use pn_core::Real;
use rayon::prelude::*;

/// Outcome of one sweep point.
#[derive(Clone, Debug)]
pub struct SweepPoint {
    pub offset: Real,
    pub result: SolverResult<NewtonResult>,
}

/// `steps` offsets evenly spaced over `[from, to]`, both ends included.
pub fn offsets(from: Real, to: Real, steps: usize) -> Vec<Real> {
    match steps {
        0 => Vec::new(),
        1 => vec![from],
        n => {
            let h = (to - from) / (n - 1) as Real;
            (0..n).map(|i| from + h * i as Real).collect()
        }
    }
}

/// Solve one problem per offset, in parallel, keeping input order.
///
/// Every point starts from the same `initial_flows`; a failure at one point
/// does not affect the others.
pub fn sweep(
    offsets: &[Real],
    initial_flows: &FlowVector,
    config: &NewtonConfig,
) -> Vec<SweepPoint> {
    offsets
        .par_iter()
        .map(|&offset| {
            let problem = NetworkProblem::new(*initial_flows, resistances_for_offset(offset));
            SweepPoint {
                offset,
                result: solve(&problem, config),
            }
        })
        .collect()
}
