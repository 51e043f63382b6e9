//! Transient 2D heat conduction simulation core
//!
//! Simulates heat conduction on a rectangular plate with mixed boundary
//! conditions: two heated Dirichlet edges held at `T_in` and two far edges
//! carrying a zero-flux (Neumann) condition. Two time-integration schemes
//! share the grid model:
//!
//! - an explicit forward-time central-space (FTCS) stencil, conditionally
//!   stable
//! - an implicit alternating-direction (ADI) splitting solved with the
//!   Thomas algorithm, unconditionally stable
//!
//! The sweep driver runs each scheme over a geometric sequence of time
//! steps and persists periodic snapshots in the fixed on-disk conventions
//! that the comparison and rendering tools consume.

// Parameters and field state
pub mod grid;
pub mod params;

// Time-stepping schemes
pub mod solver;

// Sweep driver and external interfaces
pub mod compare;
pub mod output;
pub mod render;
pub mod sweep;

// Re-export core types
pub use grid::TemperatureField;
pub use params::{ConfigError, SimulationParameters};

// Re-export solver types
pub use solver::{create_stepper, ExplicitStepper, ImplicitStepper, Scheme, StepParams, Stepper};

// Re-export driver types
pub use render::{CommandRenderer, HandoffParams, NoopRenderer, Renderer};
pub use sweep::{run_sweep, RunSummary, SweepConfig, SweepError};
