//! Core state types for the oscillator run
//!
//! - `State` is the phase-space point at a single instant
//! - `Trajectory` holds the five lockstep time series produced by a run

use super::error::SimError;

/// Position, velocity and acceleration at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub x: f64, // position
    pub v: f64, // velocity
    pub a: f64, // acceleration
}

/// Time series of a finished run
///
/// All five sequences share the same length and index `i` always refers to
/// the same instant `t[i] = i * dt`. The buffers are allocated once and only
/// handed out as slices afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    t: Vec<f64>, // time
    x: Vec<f64>, // position
    v: Vec<f64>, // velocity
    a: Vec<f64>, // acceleration
    e: Vec<f64>, // total energy
}

impl Trajectory {
    /// Reserve exactly `n` slots in every sequence
    pub(crate) fn with_capacity(n: usize) -> Result<Self, SimError> {
        let alloc = |name: &str| -> Result<Vec<f64>, SimError> {
            let mut buf = Vec::new();
            buf.try_reserve_exact(n).map_err(|e| {
                SimError::SetupError(format!("cannot allocate {n} samples for `{name}`: {e}"))
            })?;
            Ok(buf)
        };

        Ok(Self {
            t: alloc("t")?,
            x: alloc("x")?,
            v: alloc("v")?,
            a: alloc("a")?,
            e: alloc("E")?,
        })
    }

    /// Append the sample for the next index
    pub(crate) fn push(&mut self, t: f64, state: State, energy: f64) {
        self.t.push(t);
        self.x.push(state.x);
        self.v.push(state.v);
        self.a.push(state.a);
        self.e.push(energy);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn energy(&self) -> &[f64] {
        &self.e
    }

    /// State at index `i`, if in range
    pub fn state(&self, i: usize) -> Option<State> {
        Some(State {
            x: *self.x.get(i)?,
            v: *self.v.get(i)?,
            a: *self.a.get(i)?,
        })
    }
}
