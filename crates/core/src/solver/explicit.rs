//! Explicit forward-time central-space (FTCS) stepper
//!
//! Each step computes the interior stencil from a read-only snapshot of the
//! prior field into a fresh buffer, commits the buffer with a single swap,
//! then re-derives the far boundaries by zero-flux copy. The stencil never
//! writes to `i = 0` or `j = 0`, so the heated Dirichlet boundaries survive
//! from initialization untouched.
//!
//! Stability is the caller's responsibility: the update applies the stencil
//! as written and an `alpha * dt * (1/dx² + 1/dy²) > 0.5` configuration
//! silently diverges.

use rayon::prelude::*;

use super::{StepParams, Stepper};
use crate::TemperatureField;

/// Forward-difference stencil stepper
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitStepper;

impl Stepper for ExplicitStepper {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn step(&self, field: &mut TemperatureField, step: &StepParams) {
        let nx = field.nx();
        let ny = field.ny();
        let inv_dx2 = 1.0 / (step.dx * step.dx);
        let inv_dy2 = 1.0 / (step.dy * step.dy);
        let dt_alpha = step.dt * step.alpha;

        let mut next = field.values().to_vec();
        {
            let prev = field.values();

            // Every cell reads only the previous snapshot and writes its own
            // slot in the new buffer, so i-lines are independent.
            next.par_chunks_mut(ny).enumerate().for_each(|(i, line)| {
                if i == 0 || i == nx - 1 {
                    return;
                }
                let idx0 = i * ny;
                for j in 1..ny - 1 {
                    let idx = idx0 + j;
                    let t = prev[idx];
                    line[j] = t
                        + dt_alpha
                            * ((prev[idx - ny] - 2.0 * t + prev[idx + ny]) * inv_dx2
                                + (prev[idx - 1] - 2.0 * t + prev[idx + 1]) * inv_dy2);
                }
            });
        }

        field.swap_values(next);
        field.apply_zero_flux();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_field() -> (TemperatureField, StepParams) {
        // L = H = 10, alpha = 1, T_in = 100, T_init = 20, dt = 0.01,
        // configured 5x5 resolution grown to 6x6 with the boundary layer
        let mut field = TemperatureField::new(6, 6, 0.0);
        field.initialize(20.0, 100.0);
        let step = StepParams {
            dt: 0.01,
            dx: 2.5,
            dy: 2.5,
            alpha: 1.0,
        };
        (field, step)
    }

    #[test]
    fn test_first_interior_cell_matches_stencil_formula() {
        let (mut field, step) = make_field();
        let before = field.clone();
        ExplicitStepper.step(&mut field, &step);

        let dx2 = step.dx * step.dx;
        let dy2 = step.dy * step.dy;
        let expected = before.get(1, 1)
            + step.dt
                * step.alpha
                * ((before.get(0, 1) - 2.0 * before.get(1, 1) + before.get(2, 1)) / dx2
                    + (before.get(1, 0) - 2.0 * before.get(1, 1) + before.get(1, 2)) / dy2);

        assert_relative_eq!(field.get(1, 1), expected);
        // With T_in = 100 and T_init = 20 the neighbors above/left are hot
        assert!(
            field.get(1, 1) > 20.0,
            "cell next to the heated corner must warm up, got {}",
            field.get(1, 1)
        );
    }

    #[test]
    fn test_heated_boundaries_untouched() {
        let (mut field, step) = make_field();
        for _ in 0..25 {
            ExplicitStepper.step(&mut field, &step);
        }
        for i in 0..field.nx() {
            assert_eq!(field.get(i, 0), 100.0, "heated row at i={i}");
        }
        for j in 0..field.ny() {
            assert_eq!(field.get(0, j), 100.0, "heated column at j={j}");
        }
    }

    #[test]
    fn test_zero_flux_boundaries_after_step() {
        let (mut field, step) = make_field();
        for _ in 0..10 {
            ExplicitStepper.step(&mut field, &step);
        }
        let nx = field.nx();
        let ny = field.ny();
        for i in 0..nx {
            assert_eq!(
                field.get(i, ny - 1),
                field.get(i, ny - 2),
                "zero-flux law violated on the bottom row at i={i}"
            );
        }
        for j in 0..ny {
            assert_eq!(
                field.get(nx - 1, j),
                field.get(nx - 2, j),
                "zero-flux law violated on the right column at j={j}"
            );
        }
    }

    #[test]
    fn test_far_interior_cell_unchanged_after_one_step() {
        // Cell (3,3) has no heated neighbor, so one step leaves it at T_init
        let (mut field, step) = make_field();
        ExplicitStepper.step(&mut field, &step);
        assert_relative_eq!(field.get(3, 3), 20.0);
    }
}
