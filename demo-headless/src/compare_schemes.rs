//! Snapshot comparator
//!
//! Walks a range of simulated times, pairs up two runs' snapshot files, and
//! writes element-wise difference files. Each side has its own results root,
//! time step, and label, so the tool covers both the explicit-vs-implicit
//! comparison at a shared time step and the same-scheme comparison across
//! two different time steps. A missing, empty, or mismatched pair is
//! reported and skipped; the walk continues with the next time.

use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use heat_sim_core::{compare, output};

/// Difference tool for snapshot files of two runs
#[derive(Parser, Debug)]
#[command(name = "compare-schemes")]
#[command(about = "Element-wise difference of two runs' snapshots", long_about = None)]
struct Args {
    /// Time step of the first run
    #[arg(long, default_value_t = 0.00001)]
    first_time_step: f64,

    /// Time step of the second run (default: same as the first)
    #[arg(long)]
    second_time_step: Option<f64>,

    /// Results root of the first run
    #[arg(long, default_value = "Explicit_scheme/Results")]
    first_root: PathBuf,

    /// Results root of the second run
    #[arg(long, default_value = "Implicit_scheme/Results")]
    second_root: PathBuf,

    /// Label of the first run in difference filenames
    #[arg(long, default_value = "explicit")]
    first_label: String,

    /// Label of the second run in difference filenames
    #[arg(long, default_value = "implicit")]
    second_label: String,

    /// Grid resolution of the compared runs (both axes)
    #[arg(long, default_value_t = 50)]
    num_elements: usize,

    /// First simulated time to compare
    #[arg(long, default_value_t = 0.0)]
    start_time: f64,

    /// Last simulated time to compare
    #[arg(long, default_value_t = 100.0)]
    end_time: f64,

    /// Increment between compared times
    #[arg(long, default_value_t = 10.0)]
    time_increment: f64,
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
        eprintln!("compare-schemes: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let first_dt = args.first_time_step;
    let second_dt = args.second_time_step.unwrap_or(first_dt);

    let first_run_dir =
        output::run_directory_name(first_dt, args.num_elements, args.num_elements);
    let second_run_dir =
        output::run_directory_name(second_dt, args.num_elements, args.num_elements);
    let output_dir = PathBuf::from(compare::comparison_directory_name(first_dt, second_dt));
    fs::create_dir_all(&output_dir)?;

    let log_path = output_dir.join("comparison_filenames.txt");
    let mut log = File::create(&log_path)?;

    let mut compared = 0_usize;
    let mut skipped = 0_usize;
    let mut time = args.start_time;
    while time <= args.end_time {
        let left = args
            .first_root
            .join(&first_run_dir)
            .join(output::snapshot_filename(first_dt, time, args.num_elements));
        let right = args
            .second_root
            .join(&second_run_dir)
            .join(output::snapshot_filename(second_dt, time, args.num_elements));
        let diff_path = output_dir.join(compare::difference_filename(
            &args.first_label,
            first_dt,
            &args.second_label,
            second_dt,
            time,
            args.num_elements,
        ));

        match compare::compare_snapshots(&left, &right, &diff_path) {
            Ok(()) => {
                writeln!(log, "{}", diff_path.display())?;
                compared += 1;
            }
            Err(e) => {
                // Non-fatal: report and move to the next time value
                eprintln!("skipping time {time}: {e}");
                skipped += 1;
            }
        }

        time += args.time_increment;
    }

    println!("Comparison completed: {compared} written, {skipped} skipped.");
    Ok(())
}
