//! Case file schema definitions.

use pn_solver::{BASE_RESISTANCES, NewtonConfig, REFERENCE_OFFSET};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// One network case: resistances, starting guess and solver settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub version: u32,
    pub name: String,
    pub resistances: ResistanceDef,
    #[serde(default = "default_initial_flows")]
    pub initial_flows: Vec<f64>,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ResistanceDef {
    /// Base resistances shifted by `p`.
    Offset { p: f64 },
    /// One value per pipe, pipe 1 first.
    Explicit { values: Vec<f64> },
}

impl ResistanceDef {
    pub fn values(&self) -> Vec<f64> {
        match self {
            ResistanceDef::Offset { p } => BASE_RESISTANCES.iter().map(|r| r + p).collect(),
            ResistanceDef::Explicit { values } => values.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl From<&SolverDef> for NewtonConfig {
    fn from(def: &SolverDef) -> Self {
        NewtonConfig {
            tolerance: def.tolerance,
            max_iterations: def.max_iterations,
            ..NewtonConfig::default()
        }
    }
}

impl Case {
    /// The documented reference network: p = 40 and unit initial flows.
    pub fn reference() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Reference network".to_string(),
            resistances: ResistanceDef::Offset {
                p: REFERENCE_OFFSET,
            },
            initial_flows: default_initial_flows(),
            solver: SolverDef::default(),
        }
    }
}

fn default_initial_flows() -> Vec<f64> {
    vec![1.0; pn_core::PIPE_COUNT]
}

fn default_tolerance() -> f64 {
    NewtonConfig::default().tolerance
}

fn default_max_iterations() -> usize {
    NewtonConfig::default().max_iterations
}
