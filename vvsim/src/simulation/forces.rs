//! Hooke's law spring acting on a single mass
//!
//! Force = -k x, acceleration = force / m. Also carries the energy terms and
//! the closed-form solution used for diagnostics.

use super::params::{InitialConditions, Parameters};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub k: f64, // spring constant
    pub m: f64, // attached mass
}

impl Spring {
    pub fn new(k: f64, m: f64) -> Self {
        Self { k, m }
    }

    pub fn from_params(p: &Parameters) -> Self {
        Self::new(p.k, p.m)
    }

    /// a = -k x / m
    pub fn acceleration(&self, x: f64) -> f64 {
        -self.k * x / self.m
    }

    /// 0.5 m v^2
    pub fn kinetic(&self, v: f64) -> f64 {
        0.5 * self.m * v * v
    }

    /// 0.5 k x^2
    pub fn potential(&self, x: f64) -> f64 {
        0.5 * self.k * x * x
    }

    /// Total mechanical energy E = K + V
    pub fn energy(&self, x: f64, v: f64) -> f64 {
        self.kinetic(v) + self.potential(x)
    }

    /// Exact position x(t) = x0 cos(wt) + (v0 / w) sin(wt)
    pub fn analytic_position(&self, init: &InitialConditions, t: f64) -> f64 {
        let w = (self.k / self.m).sqrt();
        init.x0 * (w * t).cos() + init.v0 / w * (w * t).sin()
    }
}
