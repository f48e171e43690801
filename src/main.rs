use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use wakeflow::solver::diagnostics;
use wakeflow::{Config, Simulation};

/// Channel-flow solver driver: runs the simulation headless and logs
/// per-snapshot diagnostics. Rendering stays with external tooling.
#[derive(Parser)]
#[command(name = "wakeflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "2-D incompressible flow around an obstacle", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "wakeflow.yaml")]
    config: PathBuf,

    /// Override the configured outer step count
    #[arg(long)]
    steps: Option<usize>,

    /// Override the configured Reynolds number
    #[arg(long)]
    reynolds: Option<f64>,

    /// Override the obstacle shape (circle, square, ellipse, none)
    #[arg(long)]
    shape: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
        Config::default()
    };
    if let Some(steps) = cli.steps {
        config.run.outer_steps = steps;
    }
    if let Some(re) = cli.reynolds {
        config.physics.reynolds = re;
        config.physics.viscosity = None;
    }
    if let Some(shape) = cli.shape {
        config.obstacle.shape = shape;
    }

    let detect = config.run.detect_divergence;
    let mut sim = Simulation::new(&config)?;
    info!(
        nx = sim.grid().nx,
        ny = sim.grid().ny,
        nu = sim.params().nu,
        dt = sim.params().dt,
        inflow = sim.params().u_in,
        obstacle_cells = sim.mask().cells().len(),
        outer_steps = config.run.outer_steps,
        "starting simulation"
    );

    while !sim.is_done() {
        sim.outer_step();
        let state = sim.state();
        if detect && !diagnostics::all_finite(&[&state.u, &state.v, &state.p]) {
            anyhow::bail!("numerical divergence detected at outer step {}", sim.completed());
        }
        let (p_min, p_max) = diagnostics::pressure_range(&state.p);
        info!(
            step = sim.completed(),
            time = sim.time(),
            max_speed = diagnostics::max_speed(&state.u, &state.v),
            divergence = diagnostics::divergence_l1(&state.u, &state.v, sim.grid()),
            p_min,
            p_max,
            "outer step complete"
        );
    }

    info!(steps = sim.completed(), time = sim.time(), "simulation finished");
    Ok(())
}
