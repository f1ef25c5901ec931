//! Configuration types for loading oscillator scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – spring constant, mass, step size and end time
//! - [`InitialConfig`]    – initial displacement and velocity
//! - [`PlotConfig`]       – window title and size for the plot viewer
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section and every field is optional, missing values fall back to the
//! defaults below (k = m = 1, dt = 0.01, t_end = 20, x0 = 1, v0 = 0).
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   k: 1.0          # spring constant
//!   m: 1.0          # mass
//!   dt: 0.01        # fixed step size
//!   t_end: 20.0     # total simulation time
//!
//! initial:
//!   x0: 1.0         # initial displacement
//!   v0: 0.0         # initial velocity
//!
//! plot:
//!   title: "Velocity Verlet MD: Simple Harmonic Oscillator"
//!   width: 1000.0
//!   height: 600.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Velocity Verlet MD: Simple Harmonic Oscillator";

/// Physical and numerical parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub k: f64,     // spring constant
    pub m: f64,     // mass
    pub dt: f64,    // time step size
    pub t_end: f64, // total simulated time
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            k: 1.0,
            m: 1.0,
            dt: 0.01,
            t_end: 20.0,
        }
    }
}

/// Initial state of the mass
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConfig {
    pub x0: f64, // initial displacement
    pub v0: f64, // initial velocity, at rest by default
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self { x0: 1.0, v0: 0.0 }
    }
}

/// Plot window options
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub title: String, // combined title over the three panels
    pub width: f32,    // window width in logical pixels
    pub height: f32,   // window height in logical pixels
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1000.0,
            height: 600.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // oscillator parameters
    pub initial: InitialConfig,       // initial conditions
    pub plot: PlotConfig,             // viewer settings
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("failed to parse scenario YAML")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario file {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario file {}", path.display()))
    }
}
