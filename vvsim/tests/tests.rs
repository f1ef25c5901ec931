use approx::assert_relative_eq;

use vvsim::benchmark::benchmark::bench_step_sweep;
use vvsim::simulation::diagnostics::{max_energy_drift, RunSummary};
use vvsim::visualization::plot::{format_tick, nice_step, panel_rects, AxisRange, PlotLayout, PlotSettings};
use vvsim::{simulate, verlet_step, InitialConditions, Parameters, Scenario, ScenarioConfig, SimError, Spring, State};

use std::path::PathBuf;

/// Unit spring and mass, dt = 0.01, 20 time units
pub fn unit_params() -> Parameters {
    Parameters {
        k: 1.0,
        m: 1.0,
        dt: 0.01,
        t_end: 20.0,
    }
}

/// Released from rest at x = 1
pub fn at_rest() -> InitialConditions {
    InitialConditions { x0: 1.0, v0: 0.0 }
}

pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

// ==================================================================================
// Setup tests
// ==================================================================================

#[test]
fn sequences_have_floor_length_and_shared_time() {
    let p = unit_params();
    let traj = simulate(&p, &at_rest()).unwrap();

    let n = (p.t_end / p.dt).floor() as usize;
    assert_eq!(n, 2000);
    assert_eq!(traj.len(), n);
    assert_eq!(traj.x().len(), n);
    assert_eq!(traj.v().len(), n);
    assert_eq!(traj.a().len(), n);
    assert_eq!(traj.energy().len(), n);

    for (i, &t) in traj.t().iter().enumerate() {
        assert_eq!(t, i as f64 * p.dt);
    }
}

#[test]
fn floor_truncation_leaves_last_sample_short_of_t_end() {
    let p = Parameters { t_end: 1.0, dt: 0.3, ..unit_params() };
    let traj = simulate(&p, &at_rest()).unwrap();

    assert_eq!(traj.len(), 3);
    assert!(traj.t()[2] < p.t_end);
}

#[test]
fn initial_conditions_are_set_at_index_zero() {
    let p = Parameters { k: 3.0, m: 2.0, ..unit_params() };
    let traj = simulate(&p, &at_rest()).unwrap();

    assert_eq!(traj.t()[0], 0.0);
    assert_eq!(traj.x()[0], 1.0);
    assert_eq!(traj.v()[0], 0.0);
    assert_relative_eq!(traj.a()[0], -3.0 / 2.0, epsilon = 1e-15);
    assert_relative_eq!(traj.energy()[0], 0.5 * 3.0, epsilon = 1e-15);
}

#[test]
fn non_positive_mass_or_step_is_invalid_parameter() {
    let bad = [
        Parameters { m: 0.0, ..unit_params() },
        Parameters { m: -1.0, ..unit_params() },
        Parameters { dt: 0.0, ..unit_params() },
        Parameters { dt: -0.01, ..unit_params() },
        Parameters { k: 0.0, ..unit_params() },
        Parameters { t_end: f64::NAN, ..unit_params() },
        Parameters { dt: f64::INFINITY, ..unit_params() },
    ];

    for p in bad {
        let err = simulate(&p, &at_rest()).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { .. }), "{p:?} gave {err:?}");
    }

    let err = simulate(&Parameters { m: 0.0, ..unit_params() }, &at_rest()).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { name: "m", .. }));
}

#[test]
fn non_finite_initial_condition_is_invalid_parameter() {
    let init = InitialConditions { x0: f64::NAN, v0: 0.0 };
    let err = simulate(&unit_params(), &init).unwrap_err();

    assert!(matches!(err, SimError::InvalidParameter { name: "x0", .. }));
}

#[test]
fn t_end_shorter_than_dt_is_setup_error() {
    let p = Parameters { t_end: 0.005, ..unit_params() };
    let err = simulate(&p, &at_rest()).unwrap_err();

    assert!(matches!(err, SimError::SetupError(_)), "got {err:?}");
    assert!(err.to_string().contains("setup failed"));
}

#[test]
fn t_end_equal_to_dt_gives_single_point() {
    let p = Parameters { t_end: 0.01, ..unit_params() };
    let traj = simulate(&p, &at_rest()).unwrap();

    assert_eq!(traj.len(), 1);
    assert_eq!(traj.state(0), Some(State { x: 1.0, v: 0.0, a: -1.0 }));
    assert_eq!(traj.state(1), None);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn every_step_satisfies_velocity_verlet_recurrence() {
    let p = Parameters { k: 2.5, m: 0.7, dt: 0.02, t_end: 5.0 };
    let traj = simulate(&p, &at_rest()).unwrap();
    let (x, v, a, e) = (traj.x(), traj.v(), traj.a(), traj.energy());
    let dt = p.dt;

    for i in 1..traj.len() {
        let x_i = x[i - 1] + v[i - 1] * dt + 0.5 * a[i - 1] * dt * dt;
        let a_new = -p.k * x_i / p.m;
        let v_i = v[i - 1] + 0.5 * (a[i - 1] + a_new) * dt;

        assert_relative_eq!(x[i], x_i, epsilon = 1e-14);
        assert_relative_eq!(a[i], a_new, epsilon = 1e-14);
        assert_relative_eq!(v[i], v_i, epsilon = 1e-14);
        assert_relative_eq!(e[i], 0.5 * p.m * v_i * v_i + 0.5 * p.k * x_i * x_i, epsilon = 1e-14);
    }
}

#[test]
fn single_step_from_rest_matches_hand_computation() {
    let spring = Spring::new(1.0, 1.0);
    let prev = State { x: 1.0, v: 0.0, a: -1.0 };
    let next = verlet_step(prev, &spring, 0.1);

    // x = 1 - 0.005, a = -x, v = 0.5 * (-1 - 0.995) * 0.1
    assert_relative_eq!(next.x, 0.995, epsilon = 1e-15);
    assert_relative_eq!(next.a, -0.995, epsilon = 1e-15);
    assert_relative_eq!(next.v, -0.09975, epsilon = 1e-15);
}

#[test]
fn energy_stays_within_one_percent() {
    let traj = simulate(&unit_params(), &at_rest()).unwrap();
    let e0 = traj.energy()[0];

    assert_relative_eq!(e0, 0.5, epsilon = 1e-15);
    for &e in traj.energy() {
        assert!((e - e0).abs() <= 0.01 * e0, "energy {e} drifted from {e0}");
    }
}

#[test]
fn position_tracks_cosine() {
    let traj = simulate(&unit_params(), &at_rest()).unwrap();

    for (&t, &x) in traj.t().iter().zip(traj.x()) {
        assert!((x - t.cos()).abs() < 1e-3, "x({t}) = {x}, cos = {}", t.cos());
    }
}

#[test]
fn runs_are_bit_identical() {
    let p = Parameters { k: 1.7, m: 0.3, dt: 0.003, t_end: 12.0 };
    let a = simulate(&p, &at_rest()).unwrap();
    let b = simulate(&p, &at_rest()).unwrap();

    assert_eq!(a, b);
}

// ==================================================================================
// Diagnostics tests
// ==================================================================================

#[test]
fn summary_of_default_scenario() {
    let scenario = Scenario::default();
    let (traj, summary) = scenario.run().unwrap();

    assert_eq!(summary.steps, 2000);
    assert_eq!(summary.t_last, traj.t()[1999]);
    assert_relative_eq!(summary.e0, 0.5);
    assert!(summary.max_energy_drift < 1e-4);
    assert!(summary.max_position_error < 1e-3);
}

#[test]
fn launched_through_origin_tracks_sine() {
    let p = Parameters { k: 4.0, m: 2.0, dt: 0.005, t_end: 15.0 };
    let init = InitialConditions { x0: 0.0, v0: 1.5 };
    let traj = simulate(&p, &init).unwrap();
    let summary = RunSummary::from_trajectory(&traj, &Spring::from_params(&p), &init);

    assert_relative_eq!(summary.e0, 0.5 * 2.0 * 1.5 * 1.5);
    assert!(summary.max_energy_drift < 1e-4);
    assert!(summary.max_position_error < 1e-3);
}

#[test]
fn energy_drift_of_zero_energy_run_is_absolute() {
    assert_eq!(max_energy_drift(&[0.0, 0.0, 0.0]), 0.0);
    assert_relative_eq!(max_energy_drift(&[0.0, 0.25, -0.5]), 0.5);
    assert_relative_eq!(max_energy_drift(&[2.0, 2.2, 1.9]), 0.1, epsilon = 1e-12);
    assert_eq!(max_energy_drift(&[]), 0.0);
}

#[test]
fn sweep_shows_second_order_convergence() {
    let p = Parameters { t_end: 10.0, ..unit_params() };
    let rows = bench_step_sweep(&p, &at_rest(), &[0.1, 0.05, 0.025]).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].steps, 100);
    for pair in rows.windows(2) {
        let ratio = pair[0].max_position_error / pair[1].max_position_error;
        assert!(ratio > 3.0 && ratio < 5.0, "error ratio {ratio}");
        assert!(pair[1].max_energy_drift < pair[0].max_energy_drift);
    }
}

#[test]
fn sweep_propagates_setup_errors() {
    let err = bench_step_sweep(&unit_params(), &at_rest(), &[0.1, 50.0]).unwrap_err();
    assert!(matches!(err, SimError::SetupError(_)));
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  dt: 0.05\ninitial:\n  v0: 2.0\n").unwrap();
    let scenario = Scenario::build_scenario(cfg);

    assert_eq!(scenario.parameters, Parameters { dt: 0.05, ..unit_params() });
    assert_eq!(scenario.initial, InitialConditions { x0: 1.0, v0: 2.0 });
    assert_eq!(scenario.plot, PlotSettings::default());
}

#[test]
fn empty_mapping_is_the_default_scenario() {
    let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
    assert_eq!(Scenario::build_scenario(cfg), Scenario::default());
}

#[test]
fn unknown_yaml_field_is_rejected() {
    assert!(ScenarioConfig::from_yaml_str("parameters:\n  spring: 2.0\n").is_err());
}

#[test]
fn bundled_scenarios_load() {
    let cfg = ScenarioConfig::from_yaml_file(&scenario_path("oscillator.yaml")).unwrap();
    assert_eq!(Scenario::build_scenario(cfg), Scenario::default());

    let cfg = ScenarioConfig::from_yaml_file(&scenario_path("stiff_spring.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg);
    assert_eq!(scenario.parameters, Parameters { k: 4.0, m: 2.0, dt: 0.005, t_end: 15.0 });
    assert!(scenario.run().is_ok());
}

#[test]
fn missing_scenario_file_is_an_error() {
    let err = ScenarioConfig::from_yaml_file(&scenario_path("no_such_file.yaml")).unwrap_err();
    assert!(err.to_string().contains("no_such_file.yaml"));
}

// ==================================================================================
// Plot layout tests
// ==================================================================================

#[test]
fn panels_stack_top_to_bottom_without_overlap() {
    let rects = panel_rects(1000.0, 600.0, 3);

    assert_eq!(rects.len(), 3);
    for pair in rects.windows(2) {
        assert!(pair[0].min.y > pair[1].max.y);
        assert_eq!(pair[0].min.x, pair[1].min.x);
        assert_eq!(pair[0].max.x, pair[1].max.x);
        assert_relative_eq!(pair[0].height(), pair[1].height(), epsilon = 1e-3);
    }
    assert!(rects[0].max.y <= 300.0);
    assert!(rects[2].min.y >= -300.0);
}

#[test]
fn layout_points_stay_inside_their_panels() {
    let traj = simulate(&unit_params(), &at_rest()).unwrap();
    let layout = PlotLayout::new(&traj, &PlotSettings::default());

    assert_eq!(layout.panels.len(), 3);
    let labels: Vec<_> = layout.panels.iter().map(|p| p.label).collect();
    assert_eq!(labels, ["x(t)", "v(t)", "E(t)"]);

    for panel in &layout.panels {
        assert_eq!(panel.points.len(), traj.len());
        for pt in &panel.points {
            assert!(pt.x >= panel.rect.min.x - 1e-3 && pt.x <= panel.rect.max.x + 1e-3);
            assert!(pt.y >= panel.rect.min.y - 1e-3 && pt.y <= panel.rect.max.y + 1e-3);
        }
    }

    // time axis starts at the left edge of every panel
    let first = layout.panels[0].points[0];
    assert_relative_eq!(first.x, layout.panels[0].rect.min.x, epsilon = 1e-3);
}

#[test]
fn flat_series_gets_a_non_degenerate_range() {
    let r = AxisRange::from_values(&[0.5; 10]);
    assert!(r.span() > 0.0);
    assert!(r.min < 0.5 && r.max > 0.5);

    let single = AxisRange::exact(&[0.0]);
    assert!(single.span() > 0.0);
}

#[test]
fn ticks_use_one_two_five_steps() {
    assert_relative_eq!(nice_step(0.44), 0.5, epsilon = 1e-12);
    assert_relative_eq!(nice_step(3.0), 5.0, epsilon = 1e-12);
    assert_relative_eq!(nice_step(0.0013), 0.002, epsilon = 1e-12);

    let r = AxisRange { min: -1.1, max: 1.1 };
    let ticks = r.ticks();
    assert_eq!(ticks.len(), 5);
    assert_relative_eq!(ticks[0], -1.0, epsilon = 1e-12);
    assert_relative_eq!(ticks[4], 1.0, epsilon = 1e-12);
    assert_eq!(r.tick_precision(), 1);
}

#[test]
fn tick_labels_drop_negative_zero() {
    assert_eq!(format_tick(-0.0001, 2), "0.00");
    assert_eq!(format_tick(0.5, 1), "0.5");
    assert_eq!(format_tick(-1.25, 2), "-1.25");
    assert_eq!(format_tick(20.0, 0), "20");
}
