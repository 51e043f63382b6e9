//! Explicit-scheme sweep driver
//!
//! Reads `input_ex.txt` from the working directory and runs the geometric
//! time-step sweep with the FTCS stepper. The default invocation takes no
//! arguments; every flag only overrides a documented default.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use heat_sim_core::{
    create_stepper, run_sweep, CommandRenderer, NoopRenderer, Renderer, RunSummary, Scheme,
    SimulationParameters, SweepConfig,
};

/// Transient heat conduction, explicit forward-difference scheme
#[derive(Parser, Debug)]
#[command(name = "explicit-driver")]
#[command(about = "2D heat conduction sweep, explicit FTCS scheme", long_about = None)]
struct Args {
    /// Parameter file (one line: `L H alpha T_in T_init t_max dt num_dx num_dy`)
    #[arg(long, default_value = "input_ex.txt")]
    input: PathBuf,

    /// Root directory for run outputs
    #[arg(long, default_value = "Results")]
    results: PathBuf,

    /// Steps between snapshots (default: `num_steps / 100`, at least 1)
    #[arg(long)]
    snapshot_interval: Option<usize>,

    /// Rendering command run after each sweep iteration; omit to disable
    /// rendering (the params.txt handoff file is written either way)
    #[arg(long)]
    render_command: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("explicit-driver: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let params = SimulationParameters::from_file(&args.input)?;

    println!("=== Explicit Heat Conduction Sweep ===\n");
    println!(
        "Plate {}x{} m, alpha {} m^2/s, T_in {}, T_init {}",
        params.length, params.height, params.alpha, params.t_in, params.t_init
    );
    println!(
        "Grid {}x{}, t_max {} s, initial dt {} s",
        params.num_dx, params.num_dy, params.t_max, params.dt
    );
    println!(
        "Courant number at initial dt: {:.6}\n",
        params.stability_number(params.dt)
    );

    let renderer: Box<dyn Renderer> = match &args.render_command {
        Some(command) => Box::new(CommandRenderer::new(command.clone())),
        None => Box::new(NoopRenderer),
    };
    let config = SweepConfig {
        results_root: args.results.clone(),
        snapshot_interval: args.snapshot_interval,
        ..SweepConfig::default()
    };

    let stepper = create_stepper(Scheme::Explicit);
    let summaries = run_sweep(&params, stepper.as_ref(), renderer.as_ref(), &config)?;
    report(&summaries);
    Ok(())
}

fn report(summaries: &[RunSummary]) {
    println!("dt       | steps   | snapshots | elapsed(s)");
    println!("---------|---------|-----------|-----------");
    for run in summaries {
        println!(
            "{:<8} | {:7} | {:9} | {:10.4}",
            run.dt,
            run.num_steps,
            run.snapshots,
            run.elapsed.as_secs_f64()
        );
    }
    println!("\n=== Sweep Complete ===");
}
