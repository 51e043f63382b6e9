//! Post-hoc snapshot comparison
//!
//! Takes two snapshot files produced by different runs (typically the
//! explicit and implicit schemes at the same simulated time), computes the
//! element-wise difference, and writes it back out in the same fixed-width
//! grid layout. The row length of the output grid is recovered from the
//! `_num_elements_<N>` token of the output filename.
//!
//! Comparison failures are per-pair: a missing, empty, or mismatched input
//! skips that pair and the surrounding loop over checkpoint times carries
//! on.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::output::{format_param, VALUE_PRECISION, VALUE_WIDTH};

/// Directory name for a comparison between runs at `first_dt` and
/// `second_dt`.
///
/// Equal time steps give `time_step_<ts>`, differing ones
/// `time_step_<ts1>_vs_<ts2>`.
pub fn comparison_directory_name(first_dt: f64, second_dt: f64) -> String {
    let first = format_param(first_dt);
    let second = format_param(second_dt);
    if first == second {
        format!("time_step_{first}")
    } else {
        format!("time_step_{first}_vs_{second}")
    }
}

/// Filename for a difference file between two runs.
///
/// When both runs share a time step the step appears once:
/// `comp_<l1>_vs_<l2>_time_step_<ts>_Time_<t>_num_elements_<n>.txt`.
/// Otherwise each side carries its own:
/// `comp_<l1>_time_step_<ts1>_vs_<l2>_time_step_<ts2>_Time_<t>_num_elements_<n>.txt`.
pub fn difference_filename(
    first_label: &str,
    first_dt: f64,
    second_label: &str,
    second_dt: f64,
    time: f64,
    num_elements: usize,
) -> String {
    let first = format_param(first_dt);
    let second = format_param(second_dt);
    let time = format_param(time);
    if first == second {
        format!(
            "comp_{first_label}_vs_{second_label}_time_step_{first}_Time_{time}_num_elements_{num_elements}.txt"
        )
    } else {
        format!(
            "comp_{first_label}_time_step_{first}_vs_{second_label}_time_step_{second}_Time_{time}_num_elements_{num_elements}.txt"
        )
    }
}

/// Read all values of a snapshot file, skipping the descriptive first line.
///
/// # Errors
/// Returns [`CompareError::MissingInput`] if the file does not exist,
/// [`CompareError::EmptyInput`] if it holds no values, and a parse error if
/// a token is not numeric.
pub fn read_snapshot_values(path: &Path) -> Result<Vec<f64>, CompareError> {
    if !path.exists() {
        return Err(CompareError::MissingInput(path.to_path_buf()));
    }
    let contents =
        fs::read_to_string(path).map_err(|e| CompareError::Io(format!("{}: {e}", path.display())))?;

    let mut values = Vec::new();
    for token in contents.lines().skip(1).flat_map(str::split_whitespace) {
        let value = token.parse::<f64>().map_err(|e| {
            CompareError::Parse(format!("{}: token `{token}`: {e}", path.display()))
        })?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(CompareError::EmptyInput(path.to_path_buf()));
    }
    Ok(values)
}

/// Recover the grid row length from the `_num_elements_<N>` token of a
/// filename, if present.
pub fn row_length_from_name(path: &Path) -> Option<usize> {
    const TOKEN: &str = "_num_elements_";
    let name = path.file_name()?.to_str()?;
    let start = name.find(TOKEN)? + TOKEN.len();
    let digits: String = name[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Write a value grid in the snapshot body layout (no header line).
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_difference(
    path: &Path,
    values: &[f64],
    row_length: usize,
) -> Result<(), CompareError> {
    let file =
        File::create(path).map_err(|e| CompareError::Io(format!("{}: {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    let write = |out: &mut BufWriter<File>| -> std::io::Result<()> {
        for (i, v) in values.iter().enumerate() {
            write!(out, "{v:>VALUE_WIDTH$.VALUE_PRECISION$}")?;
            if (i + 1) % row_length == 0 {
                writeln!(out)?;
            } else {
                write!(out, " ")?;
            }
        }
        out.flush()
    };
    write(&mut out).map_err(|e| CompareError::Io(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Compare two snapshot files and write their element-wise difference.
///
/// The output filename must carry a `_num_elements_<N>` token; `N` becomes
/// the row length of the written grid.
///
/// # Errors
/// Returns an error if either input is missing, empty, or unreadable, if
/// the inputs disagree in element count, or if the output cannot be
/// written. Callers treat all of these as a skip of this pair.
pub fn compare_snapshots(left: &Path, right: &Path, output: &Path) -> Result<(), CompareError> {
    let left_values = read_snapshot_values(left)?;
    let right_values = read_snapshot_values(right)?;

    if left_values.len() != right_values.len() {
        return Err(CompareError::ShapeMismatch {
            left: left_values.len(),
            right: right_values.len(),
        });
    }

    let row_length = row_length_from_name(output).ok_or_else(|| {
        CompareError::Parse(format!(
            "no _num_elements_ token in output name {}",
            output.display()
        ))
    })?;

    let diff: Vec<f64> = left_values
        .iter()
        .zip(&right_values)
        .map(|(a, b)| a - b)
        .collect();
    write_difference(output, &diff, row_length)
}

/// Errors raised while comparing snapshot files
#[derive(Debug)]
pub enum CompareError {
    /// An input file does not exist
    MissingInput(PathBuf),
    /// An input file holds no values
    EmptyInput(PathBuf),
    /// Inputs disagree in element count
    ShapeMismatch {
        /// Element count of the first input
        left: usize,
        /// Element count of the second input
        right: usize,
    },
    /// A token could not be parsed
    Parse(String),
    /// Reading or writing failed
    Io(String),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::MissingInput(path) => {
                write!(f, "input file does not exist: {}", path.display())
            }
            CompareError::EmptyInput(path) => {
                write!(f, "input file is empty or could not be read: {}", path.display())
            }
            CompareError::ShapeMismatch { left, right } => write!(
                f,
                "files have different number of values: {left} vs {right}"
            ),
            CompareError::Parse(msg) => write!(f, "unable to parse snapshot: {msg}"),
            CompareError::Io(msg) => write!(f, "snapshot comparison i/o failed: {msg}"),
        }
    }
}

impl std::error::Error for CompareError {}
