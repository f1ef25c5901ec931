//! Numerical and physical parameters for the oscillator
//!
//! `Parameters` holds the runtime settings:
//! - spring constant `k` and mass `m`,
//! - integration step size `dt` and end time `t_end`
//!
//! `InitialConditions` holds the starting displacement and velocity

use super::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub k: f64, // spring constant
    pub m: f64, // mass
    pub dt: f64, // step size
    pub t_end: f64, // total simulated time
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            k: 1.0,
            m: 1.0,
            dt: 0.01,
            t_end: 20.0,
        }
    }
}

impl Parameters {
    /// Check that every parameter is finite and strictly positive
    /// `m` and `dt` are divisors/step sizes, `k` and `t_end` must be positive for a bounded run
    pub fn validate(&self) -> Result<(), SimError> {
        let checks = [
            ("k", self.k),
            ("m", self.m),
            ("dt", self.dt),
            ("t_end", self.t_end),
        ];

        for (name, value) in checks {
            if !value.is_finite() {
                return Err(SimError::invalid(name, value, "must be finite"));
            }
            if value <= 0.0 {
                return Err(SimError::invalid(name, value, "must be greater than zero"));
            }
        }

        Ok(())
    }

    /// Number of samples N = floor(t_end / dt)
    /// The floor truncation is kept as is, the last sample can fall short of `t_end`
    pub fn steps(&self) -> Result<usize, SimError> {
        self.validate()?;

        let n = (self.t_end / self.dt).floor();
        if !n.is_finite() || n >= usize::MAX as f64 {
            return Err(SimError::SetupError(format!(
                "step count t_end/dt = {} / {} is not representable",
                self.t_end, self.dt
            )));
        }

        let n = n as usize;
        if n == 0 {
            return Err(SimError::SetupError(format!(
                "t_end = {} is shorter than one step dt = {}, no samples to produce",
                self.t_end, self.dt
            )));
        }

        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub x0: f64, // initial displacement
    pub v0: f64, // initial velocity
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self { x0: 1.0, v0: 0.0 }
    }
}

impl InitialConditions {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.x0.is_finite() {
            return Err(SimError::invalid("x0", self.x0, "must be finite"));
        }
        if !self.v0.is_finite() {
            return Err(SimError::invalid("v0", self.v0, "must be finite"));
        }
        Ok(())
    }
}
