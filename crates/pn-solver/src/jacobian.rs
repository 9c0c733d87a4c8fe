//! Analytic Jacobian of the network residual, plus a finite difference
//! approximation used to check it.

use crate::error::SolverResult;
use crate::network::{FlowVector, JacobianMatrix, ResistanceVector};
use crate::residual::residual;
use pn_core::{PIPE_COUNT, Real, ensure_positive};

/// Derivative of `R·Q·|Q|` with respect to `Q`. Exactly zero at `Q = 0`.
#[inline]
fn head_loss_slope(r: Real, q: Real) -> Real {
    2.0 * r * q.abs()
}

/// Analytic Jacobian `J[(i, j)] = dF_i / dQ_j`.
///
/// Rows 0..4 are the constant mass-balance coefficients; rows 4..8 carry
/// `±2·R·|Q|` at the pipes of each loop.
pub fn jacobian(q: &FlowVector, r: &ResistanceVector) -> JacobianMatrix {
    let d = |i: usize| head_loss_slope(r[i], q[i]);

    #[rustfmt::skip]
    let entries = [
        1.0,  1.0,   0.0,   0.0,  1.0,   0.0,   0.0,   0.0,
        0.0,  0.0,   0.0,   0.0,  1.0,  -1.0,   1.0,  -1.0,
        0.0,  0.0,   1.0,   1.0,  0.0,   1.0,   0.0,   0.0,
        0.0,  1.0,  -1.0,   0.0,  0.0,   0.0,   0.0,   1.0,
        d(0), 0.0,   0.0,   0.0, -d(4),  0.0,   d(6),  0.0,
        0.0,  0.0,   0.0,   d(3), 0.0,  -d(5), -d(6),  0.0,
        0.0, -d(1),  0.0,   0.0,  d(4),  0.0,   0.0,   d(7),
        0.0,  0.0,  -d(2),  0.0,  0.0,   d(5),  0.0,  -d(7),
    ];

    JacobianMatrix::from_row_slice(&entries)
}

/// Compute Jacobian using central finite differences of the residual.
///
/// Column j uses the step `epsilon * max(|q[j]|, 1)`; `epsilon` must be
/// positive and finite.
pub fn central_difference_jacobian(
    q: &FlowVector,
    r: &ResistanceVector,
    epsilon: Real,
) -> SolverResult<JacobianMatrix> {
    let epsilon = ensure_positive(epsilon, "finite difference step")?;
    let mut jac = JacobianMatrix::zeros();

    for j in 0..PIPE_COUNT {
        let dq = epsilon * q[j].abs().max(1.0);

        let mut q_plus = *q;
        q_plus[j] += dq;
        let f_plus = residual(&q_plus, r);

        let mut q_minus = *q;
        q_minus[j] -= dq;
        let f_minus = residual(&q_minus, r);

        jac.set_column(j, &((f_plus - f_minus) / (2.0 * dq)));
    }

    Ok(jac)
}

/// Largest absolute entry-wise difference between the analytic Jacobian and
/// its central difference approximation at `q`.
pub fn max_jacobian_deviation(
    q: &FlowVector,
    r: &ResistanceVector,
    epsilon: Real,
) -> SolverResult<Real> {
    let analytic = jacobian(q, r);
    let approx = central_difference_jacobian(q, r, epsilon)?;
    Ok((analytic - approx).amax())
}
