use vvsim::{ScenarioConfig, Scenario, SweepRow};
use vvsim::{bench_step_sweep, run_plot, SWEEP_DTS};

use anyhow::{bail, Context, Result};
use bevy::app::AppExit;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

/// Velocity Verlet simulation of a simple harmonic oscillator
#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML; bare names are looked up in the crate's `scenarios/` directory
    #[arg(short, long)]
    file: Option<String>,

    /// Log the run summary without opening the plot window
    #[arg(long)]
    headless: bool,

    /// Print a step-size sweep as CSV and exit
    #[arg(long, conflicts_with = "headless")]
    sweep: bool,
}

// load here to keep main clean
fn load_scenario(file: Option<&str>) -> Result<Scenario> {
    let Some(file_name) = file else {
        return Ok(Scenario::default());
    };

    let mut config_path = PathBuf::from(file_name);
    if !config_path.exists() {
        config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    }

    let cfg = ScenarioConfig::from_yaml_file(&config_path)?;
    info!(path = %config_path.display(), "loaded scenario");

    Ok(Scenario::build_scenario(cfg))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let scenario = load_scenario(args.file.as_deref())?;

    if args.sweep {
        let rows = bench_step_sweep(&scenario.parameters, &scenario.initial, &SWEEP_DTS)
            .context("step-size sweep failed")?;
        println!("{}", SweepRow::CSV_HEADER);
        for row in rows {
            println!("{}", row.to_csv());
        }
        return Ok(());
    }

    let (trajectory, summary) = scenario.run().context("simulation setup failed")?;

    if args.headless {
        println!("{summary}");
        return Ok(());
    }

    match run_plot(&trajectory, &scenario.plot) {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("plot viewer exited with code {code}"),
    }
}
