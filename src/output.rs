//! CSV serialization of a finished scan.
//!
//! One row per field value, one column per sweep, no header. Cells are
//! fixed-width `{:12.8}` and separated by `", "`.

use crate::error::IsingError;
use crate::scan::ScanResult;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `ising_1d_temp_{T:6.4}.csv`
pub fn output_filename(temperature: f64) -> String {
    format!("ising_1d_temp_{temperature:6.4}.csv")
}

pub fn output_path(dir: &Path, temperature: f64) -> PathBuf {
    dir.join(output_filename(temperature))
}

/// Fixed-point value with four decimals, a leading space in place of a plus
/// sign, right-aligned to width 6 (printf `% 6.4f`).
pub fn format_banner_value(value: f64) -> String {
    let body = format!("{value:.4}");
    let signed = if body.starts_with('-') {
        body
    } else {
        format!(" {body}")
    };
    format!("{signed:>6}")
}

fn format_cell(col: usize, value: f64) -> String {
    // The writer emits ',' so the following space completes the ", " separator.
    if col == 0 {
        format!("{value:12.8}")
    } else {
        format!(" {value:12.8}")
    }
}

/// Write the magnetization table to any sink. Ragged rows are an error.
///
/// A zero-sweep scan has no columns; each row is written as a bare newline.
pub fn write_scan<W: io::Write>(mut writer: W, result: &ScanResult) -> Result<(), IsingError> {
    let (_, cols) = result.shape();
    if let Some(row) = result.rows.iter().find(|r| r.magnetization.len() != cols) {
        return Err(IsingError::InvalidArgument(format!(
            "row at field {} has {} samples, expected {cols}",
            row.field,
            row.magnetization.len()
        )));
    }

    if cols == 0 {
        for _ in &result.rows {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        return Ok(());
    }

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    for row in &result.rows {
        wtr.write_record(
            row.magnetization
                .iter()
                .enumerate()
                .map(|(col, &m)| format_cell(col, m)),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create `dir` if needed and write the scan to its temperature-named file.
pub fn save_scan(dir: &Path, result: &ScanResult) -> Result<PathBuf, IsingError> {
    fs::create_dir_all(dir)?;
    let path = output_path(dir, result.temperature);
    let file = fs::File::create(&path)?;
    write_scan(io::BufWriter::new(file), result)?;
    Ok(path)
}
