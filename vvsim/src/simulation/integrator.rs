//! Fixed-step velocity Verlet integration of the oscillator
//!
//! `verlet_step` advances a single `State` by `dt`; `simulate` validates the
//! parameters, allocates the `Trajectory` and applies the step N-1 times.

use tracing::{debug, info};

use super::error::SimError;
use super::forces::Spring;
use super::params::{InitialConditions, Parameters};
use super::states::{State, Trajectory};

/// Advance the oscillator by one velocity Verlet step
/// The new acceleration is evaluated at the updated position before the
/// velocity update is finished, which is what makes the scheme symplectic
pub fn verlet_step(prev: State, spring: &Spring, dt: f64) -> State {
    // x_n+1 = x_n + dt v_n + (1/2) dt^2 a_n
    let x = prev.x + prev.v * dt + 0.5 * prev.a * dt * dt;

    // a_n+1 from x_n+1
    let a_new = spring.acceleration(x);

    // v_n+1 = v_n + (dt/2) (a_n + a_n+1)
    let v = prev.v + 0.5 * (prev.a + a_new) * dt;

    State { x, v, a: a_new }
}

/// Run the whole simulation and return the filled time series
///
/// Fails before the loop starts with `InvalidParameter` for out of range
/// parameters, or `SetupError` when the step count is zero or the buffers
/// cannot be allocated.
pub fn simulate(params: &Parameters, init: &InitialConditions) -> Result<Trajectory, SimError> {
    params.validate()?;
    init.validate()?;
    let n = params.steps()?;

    info!(
        k = params.k,
        m = params.m,
        dt = params.dt,
        t_end = params.t_end,
        steps = n,
        "starting velocity Verlet run"
    );

    let spring = Spring::from_params(params);
    let dt = params.dt;
    let mut traj = Trajectory::with_capacity(n)?;

    // index 0: initial conditions, acceleration from Hooke's law
    let mut state = State {
        x: init.x0,
        v: init.v0,
        a: spring.acceleration(init.x0),
    };
    traj.push(0.0, state, spring.energy(state.x, state.v));

    for i in 1..n {
        state = verlet_step(state, &spring, dt);
        traj.push(i as f64 * dt, state, spring.energy(state.x, state.v));
    }

    debug!(samples = traj.len(), "run complete");

    Ok(traj)
}
