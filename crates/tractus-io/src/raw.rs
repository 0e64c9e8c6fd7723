//! Headerless raw signal files: little-endian f32 mono PCM.
//!
//! Recorded responses and generated excitations are stored as bare sample
//! streams with no header; the sample rate travels in the parameter sidecar
//! instead.

use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a raw little-endian f32 signal file.
pub fn read_raw<P: AsRef<Path>>(path: P) -> Result<Vec<f32>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(Error::TruncatedRaw {
            len: bytes.len() as u64,
        });
    }

    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    tracing::debug!(samples = samples.len(), "loaded raw signal");
    Ok(samples)
}

/// Write a signal as raw little-endian f32.
pub fn write_raw<P: AsRef<Path>>(path: P, samples: &[f32]) -> Result<()> {
    let mut writer = std::io::BufWriter::new(fs::File::create(path)?);
    for &sample in samples {
        writer.write_all(&sample.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn roundtrip_preserves_samples_exactly() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin()).collect();

        let file = NamedTempFile::new().unwrap();
        write_raw(file.path(), &samples).unwrap();
        let loaded = read_raw(file.path()).unwrap();

        assert_eq!(loaded, samples);
    }

    #[test]
    fn empty_file_is_an_empty_signal() {
        let file = NamedTempFile::new().unwrap();
        assert!(read_raw(file.path()).unwrap().is_empty());
    }

    #[test]
    fn partial_sample_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), [0u8; 10]).unwrap();

        assert!(matches!(
            read_raw(file.path()),
            Err(Error::TruncatedRaw { len: 10 })
        ));
    }
}
