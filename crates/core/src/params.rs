//! Simulation parameter loading
//!
//! Parameters come from a plain text file holding one whitespace-delimited
//! record:
//!
//! ```text
//! L H alpha T_in T_init t_max dt num_dx num_dy
//! ```
//!
//! Blank lines and lines starting with `#` are skipped; only the first data
//! line is consulted.

use std::fmt;
use std::fs;
use std::path::Path;

/// Physical and grid parameters for one simulation scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Plate length along the first axis (m)
    pub length: f64,
    /// Plate height along the second axis (m)
    pub height: f64,
    /// Thermal diffusivity (m²/s)
    pub alpha: f64,
    /// Heated-boundary (Dirichlet) temperature
    pub t_in: f64,
    /// Initial interior temperature
    pub t_init: f64,
    /// Simulation horizon (s)
    pub t_max: f64,
    /// Initial time step for the geometric sweep (s)
    pub dt: f64,
    /// Configured grid resolution along the first axis
    pub num_dx: usize,
    /// Configured grid resolution along the second axis
    pub num_dy: usize,
}

impl SimulationParameters {
    /// Read parameters from the first data line of `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, holds no data line,
    /// the record cannot be fully parsed, or a derived invariant fails
    /// (`num_dx, num_dy >= 2`, `dt > 0`, `L, H > 0`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Open(format!("{}: {e}", path.display())))?;

        let line = contents
            .lines()
            .find(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
            .ok_or_else(|| ConfigError::Parse(format!("{}: no data line found", path.display())))?;

        Self::parse_record(line)
    }

    /// Parse one whitespace-delimited 9-field record.
    ///
    /// Trailing fields beyond the ninth are ignored.
    ///
    /// # Errors
    /// Returns an error if fewer than 9 fields are present, a field is not
    /// numeric, or a parameter invariant fails.
    pub fn parse_record(line: &str) -> Result<Self, ConfigError> {
        let mut fields = line.split_whitespace();
        let mut next = |name: &str| -> Result<f64, ConfigError> {
            fields
                .next()
                .ok_or_else(|| ConfigError::Parse(format!("missing field `{name}`")))?
                .parse::<f64>()
                .map_err(|e| ConfigError::Parse(format!("field `{name}`: {e}")))
        };

        let params = Self {
            length: next("L")?,
            height: next("H")?,
            alpha: next("alpha")?,
            t_in: next("T_in")?,
            t_init: next("T_init")?,
            t_max: next("t_max")?,
            dt: next("dt")?,
            num_dx: next("num_dx")? as usize,
            num_dy: next("num_dy")? as usize,
        };

        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.num_dx < 2 || self.num_dy < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid resolution must be at least 2x2, got {}x{}",
                self.num_dx, self.num_dy
            )));
        }
        if self.dt <= 0.0 || self.dt.is_nan() {
            return Err(ConfigError::Invalid(format!(
                "time step must be positive, got {}",
                self.dt
            )));
        }
        if self.length <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "plate dimensions must be positive, got {}x{}",
                self.length, self.height
            )));
        }
        Ok(())
    }

    /// Grid spacing along the first axis, `L / (num_dx - 1)`
    pub fn dx(&self) -> f64 {
        self.length / (self.num_dx - 1) as f64
    }

    /// Grid spacing along the second axis, `H / (num_dy - 1)`
    pub fn dy(&self) -> f64 {
        self.height / (self.num_dy - 1) as f64
    }

    /// Number of steps for a given time step, `floor(t_max / dt) + 1`
    pub fn num_steps(&self, dt: f64) -> usize {
        (self.t_max / dt).floor() as usize + 1
    }

    /// Courant-like stability number for the explicit scheme,
    /// `alpha * dt * (1/dx² + 1/dy²)`.
    ///
    /// Values above 0.5 diverge under the FTCS stencil. The steppers do not
    /// check this; it is a documented operating constraint of the caller.
    pub fn stability_number(&self, dt: f64) -> f64 {
        let dx = self.dx();
        let dy = self.dy();
        self.alpha * dt * (1.0 / (dx * dx) + 1.0 / (dy * dy))
    }
}

/// Errors raised while loading simulation parameters
#[derive(Debug)]
pub enum ConfigError {
    /// Parameter file could not be opened
    Open(String),
    /// Record was missing or not fully numeric
    Parse(String),
    /// Parsed values violate a parameter invariant
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Open(msg) => write!(f, "unable to open parameter file: {msg}"),
            ConfigError::Parse(msg) => write!(f, "error reading parameters: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RECORD: &str = "10 10 1 100 20 1 0.01 5 5";

    #[test]
    fn test_parse_record() {
        let p = SimulationParameters::parse_record(RECORD).unwrap();
        assert_eq!(p.length, 10.0);
        assert_eq!(p.height, 10.0);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.t_in, 100.0);
        assert_eq!(p.t_init, 20.0);
        assert_eq!(p.t_max, 1.0);
        assert_eq!(p.dt, 0.01);
        assert_eq!(p.num_dx, 5);
        assert_eq!(p.num_dy, 5);
    }

    #[test]
    fn test_derived_quantities() {
        let p = SimulationParameters::parse_record(RECORD).unwrap();
        assert_relative_eq!(p.dx(), 2.5);
        assert_relative_eq!(p.dy(), 2.5);
        assert_eq!(p.num_steps(0.01), 101);
        assert_eq!(p.num_steps(1.0), 2);
        assert_relative_eq!(p.stability_number(0.01), 0.0032, max_relative = 1e-12);
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let contents = format!("# heat conduction scenario\n\n  \n{RECORD}\n1 1 1 1 1 1 1 3 3\n");
        let path = std::env::temp_dir().join(format!("heat_params_{}.txt", std::process::id()));
        std::fs::write(&path, contents).unwrap();

        let p = SimulationParameters::from_file(&path).unwrap();
        // Only the first data line counts
        assert_eq!(p.num_dx, 5);
        assert_eq!(p.t_in, 100.0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = SimulationParameters::from_file("does_not_exist_input.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Open(_)), "got {err:?}");
    }

    #[test]
    fn test_short_record_is_an_error() {
        let err = SimulationParameters::parse_record("10 10 1 100 20 1 0.01 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_non_numeric_field_is_an_error() {
        let err = SimulationParameters::parse_record("10 10 one 100 20 1 0.01 5 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_invariants_rejected() {
        for record in [
            "10 10 1 100 20 1 0.01 1 5",  // num_dx < 2
            "10 10 1 100 20 1 0 5 5",     // dt = 0
            "0 10 1 100 20 1 0.01 5 5",   // L = 0
            "10 -1 1 100 20 1 0.01 5 5",  // H < 0
        ] {
            let err = SimulationParameters::parse_record(record).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(_)),
                "record `{record}` should be rejected, got {err:?}"
            );
        }
    }
}
