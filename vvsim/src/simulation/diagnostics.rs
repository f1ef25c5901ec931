//! Post-run summary of a trajectory
//!
//! Measures how well the run conserved energy and how far it drifted from
//! the closed-form solution of the oscillator.

use std::fmt;

use super::forces::Spring;
use super::params::InitialConditions;
use super::states::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize, // number of samples
    pub t_last: f64, // time of the last sample
    pub e0: f64, // initial energy
    pub max_energy_drift: f64, // max |E_i - E_0| / E_0
    pub max_position_error: f64, // max |x_i - x(t_i)|
}

impl RunSummary {
    pub fn from_trajectory(traj: &Trajectory, spring: &Spring, init: &InitialConditions) -> Self {
        let e = traj.energy();
        let e0 = e.first().copied().unwrap_or(0.0);

        RunSummary {
            steps: traj.len(),
            t_last: traj.t().last().copied().unwrap_or(0.0),
            e0,
            max_energy_drift: max_energy_drift(e),
            max_position_error: max_position_error(traj, spring, init),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps = {}, t_last = {:.4}, E0 = {:.6}, max energy drift = {:.3e}, max position error = {:.3e}",
            self.steps, self.t_last, self.e0, self.max_energy_drift, self.max_position_error
        )
    }
}

/// Largest relative deviation of the energy from its first sample
/// Falls back to the absolute deviation when E_0 is zero (mass at rest at x = 0)
pub fn max_energy_drift(energy: &[f64]) -> f64 {
    let Some(&e0) = energy.first() else {
        return 0.0;
    };
    let scale = if e0.abs() > 0.0 { e0.abs() } else { 1.0 };

    energy
        .iter()
        .map(|e| (e - e0).abs() / scale)
        .fold(0.0, f64::max)
}

/// Largest absolute gap between the simulated and exact positions
pub fn max_position_error(traj: &Trajectory, spring: &Spring, init: &InitialConditions) -> f64 {
    traj.t()
        .iter()
        .zip(traj.x())
        .map(|(&t, &x)| (x - spring.analytic_position(init, t)).abs())
        .fold(0.0, f64::max)
}
