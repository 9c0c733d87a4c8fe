//! pn-project: case file format, validation and solve reports.

pub mod report;
pub mod schema;
pub mod validate;

pub use report::{PipeFlow, SolutionReport};
pub use schema::*;
pub use validate::{ValidationError, validate_case};

use pn_solver::{NetworkProblem, NewtonConfig, SolverError};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Case {
    /// Network problem described by this case.
    pub fn to_problem(&self) -> ProjectResult<NetworkProblem> {
        validate_case(self)?;
        Ok(NetworkProblem::from_slices(
            &self.initial_flows,
            &self.resistances.values(),
        )?)
    }

    pub fn newton_config(&self) -> NewtonConfig {
        NewtonConfig::from(&self.solver)
    }
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let case: Case = serde_yaml::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &std::path::Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let case: Case = serde_json::from_str(&content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_json(path: &std::path::Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a case, choosing the format from the file extension (`.json` or YAML).
pub fn load_case(path: &std::path::Path) -> ProjectResult<Case> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_report_json(path: &std::path::Path, report: &SolutionReport) -> ProjectResult<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    Ok(())
}
