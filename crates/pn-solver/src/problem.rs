//! Problem definition for the eight-pipe network.

use crate::error::{SolverError, SolverResult};
use crate::network::{FlowVector, ResistanceVector, resistances_for_offset, unit_flows};
use pn_core::{PIPE_COUNT, Real, ensure_all_finite};

/// One steady-state flow problem: resistances plus a starting guess.
///
/// Both vectors are indexed by pipe, pipe `i` at index `i - 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkProblem {
    /// Starting flow in each pipe
    pub initial_flows: FlowVector,

    /// Pipe resistances, fixed for the whole solve
    pub resistances: ResistanceVector,
}

impl NetworkProblem {
    pub fn new(initial_flows: FlowVector, resistances: ResistanceVector) -> Self {
        Self {
            initial_flows,
            resistances,
        }
    }

    /// Build a problem from caller-owned slices, checking their lengths.
    pub fn from_slices(initial_flows: &[Real], resistances: &[Real]) -> SolverResult<Self> {
        check_len("initial flows", initial_flows)?;
        check_len("resistances", resistances)?;
        Ok(Self::new(
            FlowVector::from_column_slice(initial_flows),
            ResistanceVector::from_column_slice(resistances),
        ))
    }

    /// Resistances `BASE_RESISTANCES + p` with unit initial flows.
    pub fn with_offset(p: Real) -> Self {
        Self::new(unit_flows(), resistances_for_offset(p))
    }

    /// Validate problem setup.
    pub fn validate(&self) -> SolverResult<()> {
        ensure_all_finite(self.initial_flows.as_slice(), "initial flow")?;
        ensure_all_finite(self.resistances.as_slice(), "resistance")?;
        Ok(())
    }
}

fn check_len(what: &str, values: &[Real]) -> SolverResult<()> {
    if values.len() != PIPE_COUNT {
        return Err(SolverError::InvalidInput {
            what: format!(
                "{what} length mismatch: {} != {PIPE_COUNT}",
                values.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_core::PnError;

    #[test]
    fn from_slices_keeps_pipe_order() {
        let q = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let r = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let problem = NetworkProblem::from_slices(&q, &r).unwrap();

        assert_eq!(problem.initial_flows[0], 1.0);
        assert_eq!(problem.initial_flows[7], 8.0);
        assert_eq!(problem.resistances[2], 30.0);
    }

    #[test]
    fn wrong_lengths_rejected() {
        let short = [1.0; 7];
        let long = [1.0; 9];
        let ok = [1.0; 8];

        for (q, r) in [(&short[..], &ok[..]), (&ok[..], &long[..]), (&[][..], &ok[..])] {
            let err = NetworkProblem::from_slices(q, r).unwrap_err();
            assert!(matches!(err, SolverError::InvalidInput { .. }), "{err}");
        }
    }

    #[test]
    fn non_finite_values_rejected() {
        let mut problem = NetworkProblem::with_offset(40.0);
        problem.resistances[3] = Real::NAN;
        let err = problem.validate().unwrap_err();
        assert!(matches!(
            err,
            SolverError::Core(PnError::NonFinite {
                what: "resistance",
                ..
            })
        ));

        let mut problem = NetworkProblem::with_offset(40.0);
        problem.initial_flows[0] = Real::INFINITY;
        assert!(problem.validate().is_err());
    }
}
