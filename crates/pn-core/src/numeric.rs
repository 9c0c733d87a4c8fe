use crate::PnError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PnError::NonFinite { what, value: v })
    }
}

/// Accept only finite values strictly above zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PnError::InvalidArg { what })
    }
}

/// Check every entry of a slice, reporting the first offending value.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), PnError> {
    for &v in values {
        ensure_finite(v, what)?;
    }
    Ok(())
}

/// Signed square `q * |q|`, the head-loss shape of a turbulent pipe.
#[inline]
pub fn signed_square(q: Real) -> Real {
    q * q.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_all_finite_reports_first_bad_value() {
        let err = ensure_all_finite(&[1.0, Real::INFINITY, Real::NAN], "flows").unwrap_err();
        assert_eq!(
            err,
            PnError::NonFinite {
                what: "flows",
                value: Real::INFINITY
            }
        );
        assert!(ensure_all_finite(&[0.0, -3.5], "flows").is_ok());
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negatives() {
        assert_eq!(ensure_positive(1e-6, "step"), Ok(1e-6));
        assert_eq!(
            ensure_positive(0.0, "step"),
            Err(PnError::InvalidArg { what: "step" })
        );
        assert!(ensure_positive(-1.0, "step").is_err());
        assert!(matches!(
            ensure_positive(Real::NAN, "step"),
            Err(PnError::NonFinite { .. })
        ));
    }

    #[test]
    fn signed_square_keeps_sign() {
        assert_eq!(signed_square(3.0), 9.0);
        assert_eq!(signed_square(-3.0), -9.0);
        assert_eq!(signed_square(0.0), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn signed_square_is_odd(q in -1.0e3_f64..1.0e3_f64) {
            prop_assert_eq!(signed_square(-q), -signed_square(q));
            prop_assert!(signed_square(q).abs() >= 0.0);
        }

        #[test]
        fn nearly_equal_is_symmetric(a in -1.0e6_f64..1.0e6_f64, b in -1.0e6_f64..1.0e6_f64) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
