//! Time-stepping schemes for the heat equation
//!
//! Two alternatives advance the temperature field by one time step:
//!
//! - [`ExplicitStepper`] — forward-time central-space (FTCS) stencil,
//!   conditionally stable
//! - [`ImplicitStepper`] — alternating direction implicit (ADI) splitting,
//!   two tridiagonal half-sweeps per step, unconditionally stable
//!
//! Both sit behind the [`Stepper`] trait so the sweep driver is scheme
//! agnostic.

mod explicit;
mod implicit;
pub mod thomas;

pub use explicit::ExplicitStepper;
pub use implicit::ImplicitStepper;

use crate::params::SimulationParameters;

/// Per-step coefficients shared by both schemes.
///
/// `dx`/`dy` come from the configured resolution, not from the grown field
/// dimensions; the boundary layer does not change the spacing.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    /// Current time step (s)
    pub dt: f64,
    /// Grid spacing along the first axis (m)
    pub dx: f64,
    /// Grid spacing along the second axis (m)
    pub dy: f64,
    /// Thermal diffusivity (m²/s)
    pub alpha: f64,
}

impl StepParams {
    /// Build step coefficients for one sweep iteration running at `dt`
    pub fn new(params: &SimulationParameters, dt: f64) -> Self {
        Self {
            dt,
            dx: params.dx(),
            dy: params.dy(),
            alpha: params.alpha,
        }
    }
}

/// A scheme that advances the field by one time step.
///
/// Implementations must preserve the heated Dirichlet boundaries; how the
/// far boundaries are maintained is scheme specific and deliberately not
/// unified (the explicit scheme re-derives them by zero-flux copy, the
/// implicit scheme pins them per tridiagonal line).
pub trait Stepper: Send + Sync {
    /// Scheme name used in logs and reports
    fn name(&self) -> &'static str;

    /// Advance `field` from `t` to `t + dt`
    fn step(&self, field: &mut crate::TemperatureField, step: &StepParams);
}

/// Available time-integration schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Forward-time central-space stencil
    Explicit,
    /// Alternating direction implicit with Thomas solves
    Implicit,
}

/// Create the stepper for a scheme
pub fn create_stepper(scheme: Scheme) -> Box<dyn Stepper> {
    match scheme {
        Scheme::Explicit => Box::new(ExplicitStepper),
        Scheme::Implicit => Box::new(ImplicitStepper),
    }
}
