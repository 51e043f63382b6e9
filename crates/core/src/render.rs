//! Rendering collaborator handoff
//!
//! After each sweep iteration the driver hands the run parameters to an
//! external rendering tool through a small `params.txt` file and a blocking
//! subprocess call. The collaborator is injected behind the [`Renderer`]
//! trait so the solver core can be exercised without spawning processes.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

/// Parameters handed to the rendering collaborator after each run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandoffParams {
    /// Time step of the finished run (s)
    pub dt: f64,
    /// Configured grid resolution along the first axis
    pub num_dx: usize,
    /// Simulation horizon (s)
    pub t_max: f64,
}

impl HandoffParams {
    /// Write the three-line handoff file (`dt`, `num_dx`, `t_max`).
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        let mut file = File::create(path)
            .map_err(|e| RenderError::Handoff(format!("{}: {e}", path.display())))?;
        writeln!(file, "{}\n{}\n{}", self.dt, self.num_dx, self.t_max)
            .map_err(|e| RenderError::Handoff(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}

/// External rendering collaborator invoked after each sweep iteration
pub trait Renderer {
    /// Render the finished run described by `handoff`.
    ///
    /// # Errors
    /// Returns an error if rendering fails; the sweep treats this as fatal
    /// for the run.
    fn render(&self, handoff: &HandoffParams) -> Result<(), RenderError>;
}

/// Renderer that does nothing, for tests and for runs without a rendering
/// script installed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&self, handoff: &HandoffParams) -> Result<(), RenderError> {
        debug!("rendering disabled, skipping run dt={}", handoff.dt);
        Ok(())
    }
}

/// Renderer that runs a whitespace-split command as a blocking subprocess.
///
/// Any non-zero exit status is an error.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    command: String,
}

impl CommandRenderer {
    /// Conventional rendering command expected next to the drivers
    pub const DEFAULT_COMMAND: &'static str = "python ./Images_and_gif_of_schemes.py";

    /// Wrap a command line, e.g. `python ./Images_and_gif_of_schemes.py`
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, handoff: &HandoffParams) -> Result<(), RenderError> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| RenderError::Spawn("empty render command".to_string()))?;

        info!("invoking renderer `{}` for dt={}", self.command, handoff.dt);
        let status = Command::new(program)
            .args(parts)
            .status()
            .map_err(|e| RenderError::Spawn(format!("{}: {e}", self.command)))?;

        if status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed {
                command: self.command.clone(),
                code: status.code(),
            })
        }
    }
}

/// Errors raised by the rendering handoff
#[derive(Debug)]
pub enum RenderError {
    /// The `params.txt` handoff file could not be written
    Handoff(String),
    /// The render subprocess could not be started
    Spawn(String),
    /// The render subprocess exited with a non-zero status
    Failed {
        /// Command line that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Handoff(msg) => write!(f, "unable to write handoff file: {msg}"),
            RenderError::Spawn(msg) => write!(f, "unable to start renderer: {msg}"),
            RenderError::Failed { command, code } => match code {
                Some(code) => write!(f, "renderer `{command}` exited with status {code}"),
                None => write!(f, "renderer `{command}` was terminated by a signal"),
            },
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_handoff_file_layout() {
        let path = std::env::temp_dir().join(format!("heat_handoff_{}.txt", std::process::id()));
        let handoff = HandoffParams {
            dt: 0.1,
            num_dx: 50,
            t_max: 1.0,
        };
        handoff.write(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0.1\n50\n1\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_command_renderer_reports_failure() {
        let renderer = CommandRenderer::new("false");
        let err = renderer
            .render(&HandoffParams {
                dt: 0.1,
                num_dx: 5,
                t_max: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::Failed { .. }), "got {err:?}");
    }

    #[test]
    fn test_command_renderer_missing_program() {
        let renderer = CommandRenderer::new("definitely-not-a-real-renderer-binary");
        let err = renderer
            .render(&HandoffParams {
                dt: 0.1,
                num_dx: 5,
                t_max: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::Spawn(_)), "got {err:?}");
    }
}
