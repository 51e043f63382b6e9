//! Implicit alternating-direction (ADI) stepper
//!
//! One step splits into two half-sweeps, each a set of independent 1D
//! implicit solves handled by the Thomas algorithm:
//!
//! 1. lines along the first axis, one tridiagonal system per `j`, written
//!    into an intermediate field
//! 2. lines along the second axis, one system per `i`, from the
//!    intermediate field into the next field
//!
//! Within a sweep the lines share nothing and run in parallel; between the
//! sweeps there is a full barrier (the first sweep's output is collected
//! before the second starts).
//!
//! Boundary policy: each line's two endpoint rows are replaced with
//! identity equations pinning them to their current values (`T_in` on the
//! heated end, the present far value on the other). Unlike the explicit
//! scheme there is no post-hoc zero-flux pass; the two policies are kept
//! deliberately distinct.

use rayon::prelude::*;

use super::{thomas, StepParams, Stepper};
use crate::TemperatureField;

/// ADI stepper with per-line Thomas solves
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitStepper;

/// Solve one implicit line with off-diagonal `-r` and diagonal `1 + 2r`.
///
/// The right-hand side is the line's current values; the endpoint rows are
/// identity equations, so `line[0]` and `line[n-1]` pass through unchanged.
fn solve_line(line: &[f64], r: f64) -> Vec<f64> {
    let n = line.len();
    let mut lower = vec![-r; n];
    let mut diag = vec![1.0 + 2.0 * r; n];
    let mut upper = vec![-r; n];
    diag[0] = 1.0;
    diag[n - 1] = 1.0;
    upper[0] = 0.0;
    lower[n - 1] = 0.0;
    thomas::solve(&lower, &diag, &upper, line)
}

impl Stepper for ImplicitStepper {
    fn name(&self) -> &'static str {
        "implicit"
    }

    fn step(&self, field: &mut TemperatureField, step: &StepParams) {
        let nx = field.nx();
        let ny = field.ny();
        let rx = step.alpha * step.dt / (step.dx * step.dx);
        let ry = step.alpha * step.dt / (step.dy * step.dy);

        // Sweep 1: one system per j, along the first axis. Lines along i are
        // strided in storage, so gather each into a local buffer first. The
        // collect is the barrier before sweep 2.
        let prev = field.values();
        let swept: Vec<Vec<f64>> = (0..ny)
            .into_par_iter()
            .map(|j| {
                let line: Vec<f64> = (0..nx).map(|i| prev[i * ny + j]).collect();
                solve_line(&line, rx)
            })
            .collect();

        let mut intermediate = vec![0.0; nx * ny];
        for (j, column) in swept.iter().enumerate() {
            for (i, v) in column.iter().enumerate() {
                intermediate[i * ny + j] = *v;
            }
        }

        // Sweep 2: one system per i, along the second axis. i-lines are
        // contiguous, solve straight into the next buffer.
        let mut next = vec![0.0; nx * ny];
        next.par_chunks_mut(ny).enumerate().for_each(|(i, out)| {
            let line = &intermediate[i * ny..(i + 1) * ny];
            out.copy_from_slice(&solve_line(line, ry));
        });

        field.swap_values(next);
    }
}
