//! Step-size sweep for the velocity Verlet run
//!
//! Repeats the same scenario for a range of `dt` values and records how the
//! energy drift, the error against the exact solution and the wall time
//! scale. Output is CSV so it can be pasted straight into a spreadsheet.

use std::time::Instant;

use tracing::debug;

use crate::simulation::diagnostics::RunSummary;
use crate::simulation::error::SimError;
use crate::simulation::forces::Spring;
use crate::simulation::integrator::simulate;
use crate::simulation::params::{InitialConditions, Parameters};

/// Step sizes used by `--sweep`, each half of the previous one
pub const SWEEP_DTS: [f64; 6] = [0.1, 0.05, 0.025, 0.0125, 0.00625, 0.003125];

/// One row of the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    pub dt: f64,
    pub steps: usize,
    pub max_energy_drift: f64,
    pub max_position_error: f64,
    pub ms: f64, // wall time of the run
}

impl SweepRow {
    pub const CSV_HEADER: &'static str = "dt,steps,max_energy_drift,max_position_error,ms";

    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{:.6e},{:.6e},{:.6}",
            self.dt, self.steps, self.max_energy_drift, self.max_position_error, self.ms
        )
    }
}

/// Run `simulate` once per entry of `dts`, keeping every other parameter of `base`
pub fn bench_step_sweep(
    base: &Parameters,
    init: &InitialConditions,
    dts: &[f64],
) -> Result<Vec<SweepRow>, SimError> {
    let spring = Spring::from_params(base);
    let mut rows = Vec::with_capacity(dts.len());

    for &dt in dts {
        let params = Parameters { dt, ..*base };

        let t0 = Instant::now();
        let traj = simulate(&params, init)?;
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        let summary = RunSummary::from_trajectory(&traj, &spring, init);
        debug!(dt, ms, "sweep point done");

        rows.push(SweepRow {
            dt,
            steps: summary.steps,
            max_energy_drift: summary.max_energy_drift,
            max_position_error: summary.max_position_error,
            ms,
        });
    }

    Ok(rows)
}
