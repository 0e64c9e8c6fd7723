//! Helpers shared across commands.

use std::path::Path;
use tractus_io::{read_raw, read_wav_mono, write_raw, write_wav_mono};

fn is_wav(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Load a mono signal; the container is chosen by file extension. Returns
/// the samples and, for WAV, the sample rate the file declares.
pub fn read_signal(path: &Path) -> anyhow::Result<(Vec<f32>, Option<u32>)> {
    if is_wav(path) {
        let (samples, rate) = read_wav_mono(path)?;
        Ok((samples, Some(rate)))
    } else {
        Ok((read_raw(path)?, None))
    }
}

/// Store a mono signal; raw f32 unless the path ends in `.wav`.
pub fn write_signal(path: &Path, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    if is_wav(path) {
        write_wav_mono(path, samples, sample_rate)?;
    } else {
        write_raw(path, samples)?;
    }
    Ok(())
}
