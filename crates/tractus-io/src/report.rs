//! FRF report export.
//!
//! The final product of a measurement run: a CSV over the one-sided
//! frequency axis, consumed by external plotting scripts. Column names and
//! row precision are part of the format contract and must stay stable.

use crate::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tractus_dsp::TransferFunction;

/// Write the transfer-function estimate as a CSV report.
///
/// One row per one-sided bin: frequency, magnitude in dB (floor-clamped by
/// the estimator), the raw real and imaginary parts, and phase in radians.
pub fn write_frf_csv<P: AsRef<Path>>(path: P, tf: &TransferFunction) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);

    writeln!(
        writer,
        "Frequency_Hz,Magnitude_dB,Resistance_dB,Reactance_dB,Phase_Rad"
    )?;

    let freqs = tf.frequencies();
    let mags_db = tf.magnitude_db();
    let phases = tf.phase_rad();
    let bins = tf.bins();

    for k in 0..freqs.len() {
        writeln!(
            writer,
            "{:.2},{:.4},{:.4},{:.4},{:.4}",
            freqs[k], mags_db[k], bins[k].re, bins[k].im, phases[k]
        )?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex;
    use tempfile::NamedTempFile;

    fn unit_tf(n: usize, sample_rate: f32) -> TransferFunction {
        let bins = vec![Complex::new(1.0f32, 0.0); n];
        let epsilon = vec![0.0f32; n];
        TransferFunction::estimate(&bins, &bins, &epsilon, sample_rate)
    }

    #[test]
    fn header_and_row_count() {
        let tf = unit_tf(64, 8000.0);
        let file = NamedTempFile::new().unwrap();
        write_frf_csv(file.path(), &tf).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(
            lines[0],
            "Frequency_Hz,Magnitude_dB,Resistance_dB,Reactance_dB,Phase_Rad"
        );
        // One-sided: header plus n/2 rows.
        assert_eq!(lines.len(), 1 + 32);
    }

    #[test]
    fn unity_response_rows() {
        let tf = unit_tf(16, 16_000.0);
        let file = NamedTempFile::new().unwrap();
        write_frf_csv(file.path(), &tf).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        // Bin 1 of a unity response at 16 kHz / 16 bins.
        assert_eq!(lines[2], "1000.00,0.0000,1.0000,0.0000,0.0000");
    }
}
