//! Multi-resolution time-step sweep driver
//!
//! Runs a full simulation for each time step of a geometric sequence
//! (`dt`, `10 dt`, `100 dt`, ... while `dt <= 1`). Every iteration is
//! independent: a fresh field grown by one cell per axis, a fresh output
//! directory, and a fresh names log, all owned by a per-iteration
//! [`RunContext`] that is torn down before the step size scales up.
//!
//! Snapshots are written at a quantized checkpoint cadence (default once
//! every `num_steps / 100` steps, plus the initial state) and their paths
//! recorded in write order, so log order and simulated-time order agree
//! for downstream tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::output::{self, NamesLog, OutputError};
use crate::params::SimulationParameters;
use crate::render::{HandoffParams, RenderError, Renderer};
use crate::solver::{StepParams, Stepper};
use crate::TemperatureField;

/// Sweep-wide configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Root directory that per-run directories are created under
    pub results_root: PathBuf,
    /// Steps between snapshots; `None` selects `max(num_steps / 100, 1)`
    pub snapshot_interval: Option<usize>,
    /// Path of the renderer handoff file
    pub handoff_path: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("Results"),
            snapshot_interval: None,
            handoff_path: PathBuf::from("params.txt"),
        }
    }
}

/// Transient state of one sweep iteration
struct RunContext {
    dt: f64,
    num_steps: usize,
    output_dir: PathBuf,
    names_log: NamesLog,
}

impl RunContext {
    fn create(
        params: &SimulationParameters,
        dt: f64,
        results_root: &Path,
    ) -> Result<Self, SweepError> {
        let output_dir =
            results_root.join(output::run_directory_name(dt, params.num_dx, params.num_dy));
        fs::create_dir_all(&output_dir).map_err(|e| {
            SweepError::Output(OutputError::Create(format!(
                "{}: {e}",
                output_dir.display()
            )))
        })?;
        let names_log = NamesLog::open(&output_dir, dt)?;
        Ok(Self {
            dt,
            num_steps: params.num_steps(dt),
            output_dir,
            names_log,
        })
    }

    fn checkpoint(&mut self, field: &TemperatureField, step: usize) -> Result<(), SweepError> {
        let path = output::write_snapshot(&self.output_dir, self.dt, step, field)?;
        output::append_diagonal(&self.output_dir, self.dt, field)?;
        self.names_log.record(&path)?;
        debug!(
            "checkpoint step={step} time={} -> {}",
            output::format_number(self.dt * step as f64),
            path.display()
        );
        Ok(())
    }
}

/// Summary of one finished sweep iteration
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Time step of this iteration (s)
    pub dt: f64,
    /// Derived step count, `floor(t_max / dt) + 1`
    pub num_steps: usize,
    /// Number of snapshots written, initial state included
    pub snapshots: usize,
    /// Wall-clock time of the step loop
    pub elapsed: Duration,
    /// Directory the run's files were written to
    pub output_dir: PathBuf,
}

/// Run the full geometric sweep.
///
/// Returns one [`RunSummary`] per iteration, in execution order. An initial
/// `dt > 1` yields no iterations.
///
/// # Errors
/// Returns an error when any output file or directory cannot be created or
/// written, or when the renderer fails; both abort the sweep.
pub fn run_sweep(
    params: &SimulationParameters,
    stepper: &dyn Stepper,
    renderer: &dyn Renderer,
    config: &SweepConfig,
) -> Result<Vec<RunSummary>, SweepError> {
    fs::create_dir_all(&config.results_root).map_err(|e| {
        SweepError::Output(OutputError::Create(format!(
            "{}: {e}",
            config.results_root.display()
        )))
    })?;

    let mut summaries = Vec::new();
    let mut dt = params.dt;
    while dt <= 1.0 {
        summaries.push(run_once(params, dt, stepper, renderer, config)?);
        dt *= 10.0;
    }
    Ok(summaries)
}

fn run_once(
    params: &SimulationParameters,
    dt: f64,
    stepper: &dyn Stepper,
    renderer: &dyn Renderer,
    config: &SweepConfig,
) -> Result<RunSummary, SweepError> {
    let mut run = RunContext::create(params, dt, &config.results_root)?;
    let num_steps = run.num_steps;
    let interval = config
        .snapshot_interval
        .unwrap_or(num_steps / 100)
        .max(1);

    info!(
        "{} run: dt={} steps={} grid={}x{} stability={:.4}",
        stepper.name(),
        output::format_number(dt),
        num_steps,
        params.num_dx,
        params.num_dy,
        params.stability_number(dt)
    );

    // Fresh field with the boundary layer, one extra cell per axis
    let mut field = TemperatureField::new(params.num_dx + 1, params.num_dy + 1, params.t_init);
    field.initialize(params.t_init, params.t_in);

    let start = Instant::now();
    run.checkpoint(&field, 0)?;
    let mut snapshots = 1;

    let step_params = StepParams::new(params, dt);
    for step in 0..=num_steps {
        stepper.step(&mut field, &step_params);
        if step % interval == 0 && step != 0 {
            run.checkpoint(&field, step)?;
            snapshots += 1;
        }
    }
    let elapsed = start.elapsed();

    output::write_timing(
        &run.output_dir,
        params.t_max,
        dt,
        params.num_dy,
        elapsed.as_secs_f64(),
    )?;

    let output_dir = run.output_dir.clone();
    // Tear the run context down (closing the names log) before the handoff
    drop(run);

    let handoff = HandoffParams {
        dt,
        num_dx: params.num_dx,
        t_max: params.t_max,
    };
    handoff.write(&config.handoff_path)?;
    renderer.render(&handoff)?;

    info!(
        "{} run dt={} finished in {:.3}s, {snapshots} snapshots",
        stepper.name(),
        output::format_number(dt),
        elapsed.as_secs_f64()
    );

    Ok(RunSummary {
        dt,
        num_steps,
        snapshots,
        elapsed,
        output_dir,
    })
}

/// Errors that abort a sweep
#[derive(Debug)]
pub enum SweepError {
    /// An output file or directory failed
    Output(OutputError),
    /// The rendering collaborator failed
    Render(RenderError),
}

impl std::fmt::Display for SweepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepError::Output(e) => write!(f, "run output failed: {e}"),
            SweepError::Render(e) => write!(f, "run rendering failed: {e}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Output(e) => Some(e),
            SweepError::Render(e) => Some(e),
        }
    }
}

impl From<OutputError> for SweepError {
    fn from(e: OutputError) -> Self {
        SweepError::Output(e)
    }
}

impl From<RenderError> for SweepError {
    fn from(e: RenderError) -> Self {
        SweepError::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NoopRenderer;
    use crate::solver::ExplicitStepper;

    fn scenario() -> SimulationParameters {
        SimulationParameters {
            length: 10.0,
            height: 10.0,
            alpha: 1.0,
            t_in: 100.0,
            t_init: 20.0,
            t_max: 1.0,
            dt: 0.1,
            num_dx: 5,
            num_dy: 5,
        }
    }

    fn test_config(tag: &str) -> SweepConfig {
        let root = std::env::temp_dir().join(format!("heat_sweep_{tag}_{}", std::process::id()));
        SweepConfig {
            handoff_path: root.join("params.txt"),
            results_root: root,
            snapshot_interval: None,
        }
    }

    #[test]
    fn test_geometric_sweep_terminates_after_dt_one() {
        let params = scenario();
        let config = test_config("term");

        let summaries =
            run_sweep(&params, &ExplicitStepper, &NoopRenderer, &config).unwrap();

        // dt = 0.1 then 1.0; the next candidate 10 exceeds the bound
        assert_eq!(summaries.len(), 2, "sweep must run exactly twice");
        assert_eq!(summaries[0].dt, 0.1);
        assert_eq!(summaries[1].dt, 1.0);
        assert_eq!(summaries[0].num_steps, 11);
        assert_eq!(summaries[1].num_steps, 2);

        let _ = fs::remove_dir_all(&config.results_root);
    }

    #[test]
    fn test_run_outputs_present_and_ordered() {
        let params = scenario();
        let config = test_config("outputs");

        let summaries =
            run_sweep(&params, &ExplicitStepper, &NoopRenderer, &config).unwrap();
        let run = &summaries[0];

        assert!(
            run.output_dir.ends_with("time_step_0-1_num_elements_5_5"),
            "unexpected run directory {}",
            run.output_dir.display()
        );

        // Initial state plus one checkpoint per step at the min cadence
        assert_eq!(run.snapshots, 12);

        let names = fs::read_to_string(
            run.output_dir.join(output::names_log_filename(run.dt)),
        )
        .unwrap();
        let lines: Vec<&str> = names.lines().collect();
        assert_eq!(lines.len(), run.snapshots);
        assert!(lines[0].starts_with('"') && lines[0].ends_with('"'));
        // Log order equals simulated-time order
        assert!(lines[0].contains("_Time_0_"));
        assert!(lines[1].contains("_Time_0-1_"));

        let timing = fs::read_to_string(
            run.output_dir.join(output::timing_filename(1.0, 0.1, 5)),
        )
        .unwrap();
        assert!(
            timing.starts_with("Elapsed time: ") && timing.trim_end().ends_with(" seconds"),
            "unexpected timing record: {timing}"
        );

        // Handoff reflects the last finished iteration
        let handoff = fs::read_to_string(&config.handoff_path).unwrap();
        assert_eq!(handoff, "1\n5\n1\n");

        let _ = fs::remove_dir_all(&config.results_root);
    }

    #[test]
    fn test_initial_dt_above_one_runs_nothing() {
        let mut params = scenario();
        params.dt = 2.0;
        let config = test_config("empty");

        let summaries =
            run_sweep(&params, &ExplicitStepper, &NoopRenderer, &config).unwrap();
        assert!(summaries.is_empty());

        let _ = fs::remove_dir_all(&config.results_root);
    }

    #[test]
    fn test_explicit_snapshot_interval_respected() {
        let params = scenario();
        let config = SweepConfig {
            snapshot_interval: Some(5),
            ..test_config("interval")
        };

        let summaries =
            run_sweep(&params, &ExplicitStepper, &NoopRenderer, &config).unwrap();
        // dt = 0.1: steps 0..=11, checkpoints at 5 and 10 plus the initial
        assert_eq!(summaries[0].snapshots, 3);

        let _ = fs::remove_dir_all(&config.results_root);
    }
}
