//! Case validation logic.

use crate::schema::{Case, LATEST_VERSION, ResistanceDef};
use pn_core::PIPE_COUNT;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Wrong length: {field} has {len} entries, expected {}", PIPE_COUNT)]
    WrongLength { field: String, len: usize },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    match &case.resistances {
        ResistanceDef::Offset { p } => check_finite("resistances.p", *p)?,
        ResistanceDef::Explicit { values } => check_pipe_values("resistances.values", values)?,
    }
    check_pipe_values("initial_flows", &case.initial_flows)?;

    let tol = case.solver.tolerance;
    if !(tol.is_finite() && tol > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: "solver.tolerance".to_string(),
            value: tol.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}

fn check_pipe_values(field: &str, values: &[f64]) -> Result<(), ValidationError> {
    if values.len() != PIPE_COUNT {
        return Err(ValidationError::WrongLength {
            field: field.to_string(),
            len: values.len(),
        });
    }
    for (i, v) in values.iter().enumerate() {
        check_finite(&format!("{field}[{i}]"), *v)?;
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
