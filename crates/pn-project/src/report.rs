//! Serializable summary of a finished solve.

use pn_core::PipeId;
use pn_solver::{NetworkProblem, NewtonResult, energy_residual, mass_residual};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolutionReport {
    pub case_name: String,
    pub converged: bool,
    pub iterations: usize,
    pub residual_norm: f64,
    pub mass_residual_norm: f64,
    pub energy_residual_norm: f64,
    pub pipes: Vec<PipeFlow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeFlow {
    /// 1-based pipe number
    pub pipe: usize,
    pub resistance: f64,
    pub flow: f64,
}

impl SolutionReport {
    pub fn new(case_name: &str, problem: &NetworkProblem, result: &NewtonResult) -> Self {
        let pipes = PipeId::all()
            .map(|id| PipeFlow {
                pipe: id.number(),
                resistance: problem.resistances[id.index()],
                flow: result.flows[id.index()],
            })
            .collect();

        Self {
            case_name: case_name.to_string(),
            converged: result.converged,
            iterations: result.iterations,
            residual_norm: result.residual_norm,
            mass_residual_norm: mass_residual(&result.flows).norm(),
            energy_residual_norm: energy_residual(&result.flows, &problem.resistances).norm(),
            pipes,
        }
    }
}
