//! End-to-end checks of the Newton solver on the eight-pipe network.

use pn_core::{Tolerances, nearly_equal};
use pn_solver::{
    FlowVector, NetworkProblem, NewtonConfig, REFERENCE_OFFSET, ResistanceVector, SolverError,
    energy_residual, mass_residual, max_jacobian_deviation, resistances_for_offset, solve,
    solve_slices, unit_flows,
};
use proptest::prelude::*;

const TOL: f64 = 1e-6;

#[test]
fn reference_case_converges_to_known_flows() {
    // p = 40, all-ones initial guess
    let problem = NetworkProblem::with_offset(REFERENCE_OFFSET);
    let result = solve(&problem, &NewtonConfig::default()).unwrap();

    println!(
        "Reference case converged in {} iterations, residual {:e}",
        result.iterations, result.residual_norm
    );

    assert!(result.converged);
    assert_eq!(result.iterations, 4);
    assert!(result.residual_norm < TOL);

    let expected = [
        1.803_695, 1.978_440, 0.785_806, 1.255_818, 1.217_864, 0.958_375, 0.547_877, 0.807_366,
    ];
    for (i, want) in expected.iter().enumerate() {
        assert!(
            (result.flows[i] - want).abs() < 1e-5,
            "Q{}: got {}, expected {want}",
            i + 1,
            result.flows[i]
        );
    }
}

#[test]
fn converged_flows_satisfy_every_balance() {
    let problem = NetworkProblem::with_offset(REFERENCE_OFFSET);
    let result = solve(&problem, &NewtonConfig::default()).unwrap();
    assert!(result.converged);

    let mass = mass_residual(&result.flows);
    let energy = energy_residual(&result.flows, &problem.resistances);
    for i in 0..4 {
        assert!(mass[i].abs() < TOL, "node {} off by {}", i + 1, mass[i]);
        assert!(energy[i].abs() < TOL, "loop {} off by {}", i + 1, energy[i]);
    }
}

#[test]
fn scaling_resistances_leaves_flows_unchanged() {
    let base = NetworkProblem::with_offset(REFERENCE_OFFSET);
    let reference = solve(&base, &NewtonConfig::default()).unwrap();

    for k in [0.1, 10.0] {
        let scaled = NetworkProblem::new(unit_flows(), base.resistances * k);
        let result = solve(&scaled, &NewtonConfig::default()).unwrap();
        assert!(result.converged);

        let tol = Tolerances {
            abs: 1e-7,
            rel: 1e-7,
        };
        for i in 0..8 {
            assert!(
                nearly_equal(result.flows[i], reference.flows[i], tol),
                "k = {k}, Q{}: {} vs {}",
                i + 1,
                result.flows[i],
                reference.flows[i]
            );
        }
    }
}

#[test]
fn slice_entry_point_matches_vector_entry_point() {
    let q = [1.0; 8];
    let r = [160.0, 240.0, 190.0, 340.0, 440.0, 440.0, 440.0, 440.0];
    let from_slices = solve_slices(&q, &r, 1e-6, 200).unwrap();
    let from_problem = solve(
        &NetworkProblem::with_offset(REFERENCE_OFFSET),
        &NewtonConfig::default(),
    )
    .unwrap();

    assert_eq!(from_slices, from_problem);
}

#[test]
fn zero_iterations_takes_no_step() {
    let result = solve_slices(&[1.0; 8], resistances_for_offset(40.0).as_slice(), 1e-6, 0).unwrap();
    assert!(!result.converged);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.flows, unit_flows());
}

#[test]
fn zero_resistances_report_singular_jacobian() {
    let problem = NetworkProblem::new(unit_flows(), ResistanceVector::zeros());
    let err = solve(&problem, &NewtonConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::SingularJacobian { .. }), "{err}");
}

#[test]
fn singular_failure_is_not_nan() {
    let problem = NetworkProblem::new(FlowVector::zeros(), resistances_for_offset(40.0));
    match solve(&problem, &NewtonConfig::default()) {
        Err(SolverError::SingularJacobian { iteration, .. }) => assert_eq!(iteration, 0),
        other => panic!("expected singular Jacobian, got {other:?}"),
    }
}

#[test]
fn invalid_inputs_rejected_before_iterating() {
    let r = resistances_for_offset(40.0);
    assert!(matches!(
        solve_slices(&[1.0; 7], r.as_slice(), 1e-6, 200),
        Err(SolverError::InvalidInput { .. })
    ));
    assert!(matches!(
        solve_slices(&[1.0; 8], r.as_slice(), 0.0, 200),
        Err(SolverError::InvalidInput { .. })
    ));
    assert!(matches!(
        solve_slices(&[f64::NAN; 8], r.as_slice(), 1e-6, 200),
        Err(SolverError::Core(_))
    ));
}

fn flows() -> impl Strategy<Value = FlowVector> {
    prop::array::uniform8(-5.0_f64..5.0).prop_map(FlowVector::from)
}

fn resistances() -> impl Strategy<Value = ResistanceVector> {
    prop::array::uniform8(1.0_f64..1000.0).prop_map(ResistanceVector::from)
}

proptest! {
    #[test]
    fn analytic_jacobian_matches_central_differences(q in flows(), r in resistances()) {
        let deviation = max_jacobian_deviation(&q, &r, 1e-6).unwrap();
        prop_assert!(deviation < 1e-2, "deviation {}", deviation);
    }

    #[test]
    fn converged_solutions_conserve_mass_and_energy(p in 0.0_f64..1000.0) {
        let problem = NetworkProblem::with_offset(p);
        let result = solve(&problem, &NewtonConfig::default()).unwrap();
        prop_assert!(result.converged);

        let mass = mass_residual(&result.flows);
        let energy = energy_residual(&result.flows, &problem.resistances);
        for i in 0..4 {
            prop_assert!(mass[i].abs() < TOL);
            prop_assert!(energy[i].abs() < TOL);
        }
    }
}
