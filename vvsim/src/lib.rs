pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{State, Trajectory};
pub use simulation::params::{Parameters, InitialConditions};
pub use simulation::error::SimError;
pub use simulation::forces::Spring;
pub use simulation::integrator::{simulate, verlet_step};
pub use simulation::diagnostics::RunSummary;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ParametersConfig, InitialConfig, PlotConfig};

pub use visualization::plot::{run_plot, PlotLayout, PlotSettings};

pub use benchmark::benchmark::{bench_step_sweep, SweepRow, SWEEP_DTS};
