//! Snapshot serialization and the on-disk naming grammar
//!
//! Downstream tools key off the exact file and directory names, so the
//! grammar lives here as pure, tested formatting functions rather than ad
//! hoc string surgery:
//!
//! - parameters are rendered with at most 6 decimals, trailing zeros
//!   stripped, and dots replaced by dashes (`0.00001` → `0-00001`)
//! - run directory: `time_step_<dt>_num_elements_<num_dx>_<num_dy>`
//! - snapshot: `time_step_<dt>_Time_<t>_num_elements_<num_dx>.txt`
//! - diagonal trace: `Diagonal_Elements_t-step_<dt>_num_elements_<num_dx>.txt`
//! - names log: `names_of_time_step_files_<dt>.txt`
//! - timing: `Time_of_calcul_<t_max>_<dt>_<num_dy>.txt`
//!
//! Snapshot bodies are fixed-precision (width 10, precision 8),
//! space-separated, one grid row per line, and exclude the outer boundary
//! layer.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::TemperatureField;

/// Field width of one serialized value
pub const VALUE_WIDTH: usize = 10;
/// Decimal precision of one serialized value
pub const VALUE_PRECISION: usize = 8;

/// Render a numeric parameter with at most 6 decimals and no trailing
/// zeros: `0.1` → `"0.1"`, `1.0` → `"1"`, `0.00001` → `"0.00001"`.
pub fn format_number(value: f64) -> String {
    let mut s = format!("{value:.6}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// [`format_number`] with dots replaced by dashes, the form used inside
/// file and directory names: `0.00001` → `"0-00001"`.
pub fn format_param(value: f64) -> String {
    format_number(value).replace('.', "-")
}

/// Directory name for one sweep iteration, relative to the results root.
///
/// Uses the configured resolution, not the grown field dimensions.
pub fn run_directory_name(dt: f64, num_dx: usize, num_dy: usize) -> String {
    format!(
        "time_step_{}_num_elements_{num_dx}_{num_dy}",
        format_param(dt)
    )
}

/// Snapshot filename for the state at simulated time `dt * step`
pub fn snapshot_filename(dt: f64, time: f64, num_dx: usize) -> String {
    format!(
        "time_step_{}_Time_{}_num_elements_{num_dx}.txt",
        format_param(dt),
        format_param(time)
    )
}

/// Filename of the per-run diagonal trace (append mode, one line per
/// checkpoint)
pub fn diagonal_filename(dt: f64, num_dx: usize) -> String {
    format!(
        "Diagonal_Elements_t-step_{}_num_elements_{num_dx}.txt",
        format_param(dt)
    )
}

/// Filename of the per-run snapshot names log
pub fn names_log_filename(dt: f64) -> String {
    format!("names_of_time_step_files_{}.txt", format_param(dt))
}

/// Filename of the per-run wall-clock timing record
pub fn timing_filename(t_max: f64, dt: f64, num_dy: usize) -> String {
    format!(
        "Time_of_calcul_{}_{}_{num_dy}.txt",
        format_param(t_max),
        format_param(dt)
    )
}

/// Write one field snapshot and return the path written.
///
/// The header line is `Time step <t>:`; the body covers the grid without
/// its outer boundary row/column, in fixed-width space-separated columns.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_snapshot(
    dir: &Path,
    dt: f64,
    step: usize,
    field: &TemperatureField,
) -> Result<PathBuf, OutputError> {
    let time = dt * step as f64;
    let path = dir.join(snapshot_filename(dt, time, field.nx() - 1));
    let file = File::create(&path)
        .map_err(|e| OutputError::Create(format!("{}: {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    let write = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(out, "Time step {}:", format_number(time))?;
        for j in 0..field.ny() - 1 {
            for i in 0..field.nx() - 1 {
                if i > 0 {
                    write!(out, " ")?;
                }
                write!(out, "{:>VALUE_WIDTH$.VALUE_PRECISION$}", field.get(i, j))?;
            }
            writeln!(out)?;
        }
        out.flush()
    };
    write(&mut out).map_err(|e| OutputError::Write(format!("{}: {e}", path.display())))?;
    Ok(path)
}

/// Append the field's diagonal entries as one line of the per-run trace.
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn append_diagonal(dir: &Path, dt: f64, field: &TemperatureField) -> Result<(), OutputError> {
    let path = dir.join(diagonal_filename(dt, field.nx() - 1));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| OutputError::Create(format!("{}: {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    let write = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        for (i, v) in field.diagonal().iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            write!(out, "{v:>VALUE_WIDTH$.VALUE_PRECISION$}")?;
        }
        writeln!(out)?;
        out.flush()
    };
    write(&mut out).map_err(|e| OutputError::Write(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Write the single-line wall-clock timing record for one run.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_timing(
    dir: &Path,
    t_max: f64,
    dt: f64,
    num_dy: usize,
    seconds: f64,
) -> Result<(), OutputError> {
    let path = dir.join(timing_filename(t_max, dt, num_dy));
    let mut file = File::create(&path)
        .map_err(|e| OutputError::Create(format!("{}: {e}", path.display())))?;
    writeln!(file, "Elapsed time: {seconds} seconds")
        .map_err(|e| OutputError::Write(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Per-run log of written snapshot paths, one quoted path per line, in
/// write order (which equals simulated-time order).
#[derive(Debug)]
pub struct NamesLog {
    out: BufWriter<File>,
    path: PathBuf,
}

impl NamesLog {
    /// Open the names log for one run directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn open(dir: &Path, dt: f64) -> Result<Self, OutputError> {
        let path = dir.join(names_log_filename(dt));
        let file = File::create(&path)
            .map_err(|e| OutputError::Create(format!("{}: {e}", path.display())))?;
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    /// Append one snapshot path.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    pub fn record(&mut self, snapshot: &Path) -> Result<(), OutputError> {
        writeln!(self.out, "\"{}\"", snapshot.display())
            .and_then(|()| self.out.flush())
            .map_err(|e| OutputError::Write(format!("{}: {e}", self.path.display())))
    }
}

/// Errors raised while writing run outputs
#[derive(Debug)]
pub enum OutputError {
    /// Output file or directory could not be created
    Create(String),
    /// Output file could not be written
    Write(String),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Create(msg) => write!(f, "unable to open output file: {msg}"),
            OutputError::Write(msg) => write!(f, "unable to write output file: {msg}"),
        }
    }
}

impl std::error::Error for OutputError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_number_grammar() {
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.00001), "0.00001");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_param_replaces_dots() {
        assert_eq!(format_param(0.00001), "0-00001");
        assert_eq!(format_param(0.1), "0-1");
        assert_eq!(format_param(1.0), "1");
    }

    #[test]
    fn test_run_directory_name() {
        assert_eq!(
            run_directory_name(0.01, 50, 50),
            "time_step_0-01_num_elements_50_50"
        );
    }

    #[test]
    fn test_snapshot_filename() {
        assert_eq!(
            snapshot_filename(0.00001, 10.0, 50),
            "time_step_0-00001_Time_10_num_elements_50.txt"
        );
    }

    #[test]
    fn test_timing_filename() {
        assert_eq!(timing_filename(1.0, 0.1, 50), "Time_of_calcul_1_0-1_50.txt");
    }

    #[test]
    fn test_snapshot_excludes_boundary_layer() {
        let dir = std::env::temp_dir().join(format!("heat_output_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut field = TemperatureField::new(6, 6, 0.0);
        field.initialize(20.0, 100.0);

        let path = write_snapshot(&dir, 0.01, 0, &field).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "Time step 0:");

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 5, "6x6 field must emit 5 rows");
        for row in &rows {
            assert_eq!(row.split_whitespace().count(), 5, "and 5 columns per row");
        }
        // First emitted row is the heated boundary
        for v in rows[0].split_whitespace() {
            assert_eq!(v.parse::<f64>().unwrap(), 100.0);
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_names_log_quotes_paths() {
        let dir = std::env::temp_dir().join(format!("heat_names_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut log = NamesLog::open(&dir, 0.1).unwrap();
        log.record(Path::new("Results/a.txt")).unwrap();
        log.record(Path::new("Results/b.txt")).unwrap();
        drop(log);

        let contents = fs::read_to_string(dir.join(names_log_filename(0.1))).unwrap();
        assert_eq!(contents, "\"Results/a.txt\"\n\"Results/b.txt\"\n");

        let _ = fs::remove_dir_all(&dir);
    }
}
