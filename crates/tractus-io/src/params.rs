//! Calibration parameter sidecar.
//!
//! A measurement is only interpretable against the exact excitation used for
//! its calibration, so the chirp description is saved as a small plain-text
//! file next to the recordings:
//!
//! ```text
//! Chirp Duration: 2.00 seconds
//! Chirp Start Frequency: 100.00 Hz
//! Chirp End Frequency: 10000.00 Hz
//! Chirp Type: Linear
//! Chirp Amplitude: 0.50
//! ```
//!
//! The reader tolerates unknown lines and unit suffixes; gap and fade
//! durations are playback-side concerns and are not persisted (they come
//! back as zero, which is what the processing side needs).

use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tractus_dsp::{ChirpSpec, SweepKind};

/// Write the chirp description of a calibration run.
pub fn write_sidecar<P: AsRef<Path>>(path: P, spec: &ChirpSpec) -> Result<()> {
    let kind = match spec.sweep {
        SweepKind::Linear => "Linear",
        SweepKind::Exponential => "Exponential",
    };
    let contents = format!(
        "Chirp Duration: {:.2} seconds\n\
         Chirp Start Frequency: {:.2} Hz\n\
         Chirp End Frequency: {:.2} Hz\n\
         Chirp Type: {}\n\
         Chirp Amplitude: {:.2}\n",
        spec.duration_secs, spec.start_freq, spec.end_freq, kind, spec.amplitude
    );
    fs::write(path, contents)?;
    Ok(())
}

/// Read a chirp description back from a sidecar file.
pub fn read_sidecar<P: AsRef<Path>>(path: P) -> Result<ChirpSpec> {
    let contents = fs::read_to_string(path)?;

    let mut duration = None;
    let mut start_freq = None;
    let mut end_freq = None;
    let mut sweep = None;
    let mut amplitude = None;

    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Chirp Duration" => duration = Some(parse_value(value)?),
            "Chirp Start Frequency" => start_freq = Some(parse_value(value)?),
            "Chirp End Frequency" => end_freq = Some(parse_value(value)?),
            "Chirp Amplitude" => amplitude = Some(parse_value(value)?),
            "Chirp Type" => {
                sweep = Some(match value.trim() {
                    "Linear" => SweepKind::Linear,
                    "Exponential" => SweepKind::Exponential,
                    other => {
                        return Err(Error::MalformedSidecar(format!(
                            "unknown chirp type {other:?}"
                        )));
                    }
                });
            }
            _ => {}
        }
    }

    Ok(ChirpSpec {
        amplitude: require(amplitude, "Chirp Amplitude")?,
        start_freq: require(start_freq, "Chirp Start Frequency")?,
        end_freq: require(end_freq, "Chirp End Frequency")?,
        duration_secs: require(duration, "Chirp Duration")?,
        sweep: require(sweep, "Chirp Type")?,
        gap_secs: 0.0,
        fade_secs: 0.0,
    })
}

/// Numeric field value, ignoring a trailing unit like "seconds" or "Hz".
fn parse_value(value: &str) -> Result<f32> {
    let token = value.trim().split_whitespace().next().unwrap_or("");
    token
        .parse()
        .map_err(|_| Error::MalformedSidecar(format!("unparsable value {:?}", value.trim())))
}

fn require<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| Error::MalformedSidecar(format!("missing field {name:?}")))
}
