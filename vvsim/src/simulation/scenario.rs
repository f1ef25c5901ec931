//! Build a runnable scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - numerical parameters (`Parameters`)
//! - initial conditions (`InitialConditions`)
//! - plot settings for the renderer (`PlotSettings`)

use tracing::info;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::diagnostics::RunSummary;
use crate::simulation::error::SimError;
use crate::simulation::forces::Spring;
use crate::simulation::integrator::simulate;
use crate::simulation::params::{InitialConditions, Parameters};
use crate::simulation::states::Trajectory;
use crate::visualization::plot::PlotSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub parameters: Parameters,
    pub initial: InitialConditions,
    pub plot: PlotSettings,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::build_scenario(ScenarioConfig::default())
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            k: p_cfg.k,
            m: p_cfg.m,
            dt: p_cfg.dt,
            t_end: p_cfg.t_end,
        };

        let initial = InitialConditions {
            x0: cfg.initial.x0,
            v0: cfg.initial.v0,
        };

        let plot = PlotSettings {
            title: cfg.plot.title,
            width: cfg.plot.width,
            height: cfg.plot.height,
        };

        Self {
            parameters,
            initial,
            plot,
        }
    }

    pub fn spring(&self) -> Spring {
        Spring::from_params(&self.parameters)
    }

    /// Integrate the scenario and log how well energy was conserved
    pub fn run(&self) -> Result<(Trajectory, RunSummary), SimError> {
        let traj = simulate(&self.parameters, &self.initial)?;
        let summary = RunSummary::from_trajectory(&traj, &self.spring(), &self.initial);

        info!(%summary, "run summary");

        Ok((traj, summary))
    }
}
