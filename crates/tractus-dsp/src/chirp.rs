//! Chirp synthesis: linear and exponential swept sines with silence padding
//! and raised-cosine edge fades.

use crate::{Error, Result};
use std::f64::consts::PI;

/// Frequency trajectory of a swept sine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKind {
    /// Instantaneous frequency rises linearly from start to end.
    Linear,
    /// Instantaneous frequency rises exponentially (constant octaves/second).
    Exponential,
}

/// Immutable specification of a chirp excitation.
///
/// The generated signal is `(duration + gap) * sample_rate` samples long:
/// the chirp sits in the middle with `gap/2` of silence on each side, and a
/// raised-cosine envelope of `fade_secs` is applied at both chirp edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChirpSpec {
    /// Peak amplitude. Zero is allowed and produces an all-zero signal.
    pub amplitude: f32,
    /// Sweep start frequency in Hz.
    pub start_freq: f32,
    /// Sweep end frequency in Hz.
    pub end_freq: f32,
    /// Sweep duration in seconds (excluding the silence gap).
    pub duration_secs: f32,
    /// Linear or exponential frequency trajectory.
    pub sweep: SweepKind,
    /// Total silence padding in seconds, split equally before and after.
    pub gap_secs: f32,
    /// Raised-cosine fade-in/fade-out duration in seconds.
    pub fade_secs: f32,
}

impl ChirpSpec {
    /// Check every parameter against the given sample rate.
    ///
    /// Runs before any buffer allocation; a failing spec computes nothing.
    pub fn validate(&self, sample_rate: f32) -> Result<()> {
        if self.duration_secs <= 0.0 {
            return Err(Error::InvalidDuration(self.duration_secs));
        }
        if self.amplitude < 0.0 {
            return Err(Error::InvalidAmplitude(self.amplitude));
        }
        let nyquist = sample_rate / 2.0;
        for freq in [self.start_freq, self.end_freq] {
            if freq <= 0.0 || freq >= nyquist {
                return Err(Error::FrequencyOutOfRange { freq, nyquist });
            }
        }
        if self.sweep == SweepKind::Exponential && self.start_freq == self.end_freq {
            return Err(Error::DegenerateExponentialSweep(self.start_freq));
        }
        if self.fade_secs > self.duration_secs / 2.0 {
            return Err(Error::FadeTooLong {
                fade: self.fade_secs,
                duration: self.duration_secs,
            });
        }
        if self.gap_secs < 0.0 {
            return Err(Error::InvalidGap(self.gap_secs));
        }
        Ok(())
    }

    /// Number of samples in the chirp itself (gap excluded).
    pub fn num_chirp_samples(&self, sample_rate: f32) -> usize {
        (self.duration_secs * sample_rate) as usize
    }

    /// Number of samples in the full padded signal.
    pub fn num_total_samples(&self, sample_rate: f32) -> usize {
        ((self.duration_secs + self.gap_secs) * sample_rate) as usize
    }

    /// Exponential sweep rate L, with `f0 * T / ln(f1/f0)` rounded up so the
    /// sweep ends on a whole cycle. Matches the playback-side convention; the
    /// analytic filter design uses a floor-based variant.
    pub(crate) fn exponential_rate(&self) -> f64 {
        let f0 = f64::from(self.start_freq);
        let f1 = f64::from(self.end_freq);
        let t = f64::from(self.duration_secs);
        (1.0 / f0) * (f0 * t / (f1 / f0).ln()).ceil()
    }

    /// Synthesize the padded, faded excitation signal.
    pub fn generate(&self, sample_rate: f32) -> Result<Vec<f32>> {
        self.validate(sample_rate)?;

        let n_total = self.num_total_samples(sample_rate);
        let n_chirp = self.num_chirp_samples(sample_rate);
        let n_gap_half = ((self.gap_secs / 2.0) * sample_rate) as usize;
        let n_fade = (self.fade_secs * sample_rate) as usize;

        let mut buffer = vec![0.0f32; n_total];
        let fs = f64::from(sample_rate);
        let amplitude = f64::from(self.amplitude);

        for idx in 0..n_chirp {
            let t = idx as f64 / fs;
            let sample = amplitude * self.phase_at(t).sin();

            let mut envelope = 1.0f64;
            if n_fade > 0 {
                // Fade-in at the chirp start
                if idx < n_fade {
                    let t_fade = idx as f64 / fs;
                    envelope *= 0.5 * (1.0 - (PI * t_fade / f64::from(self.fade_secs)).cos());
                }
                // Fade-out, mirrored at the chirp end
                let from_end = n_chirp - idx - 1;
                if from_end < n_fade {
                    let t_fade = from_end as f64 / fs;
                    envelope *= 0.5 * (1.0 - (PI * t_fade / f64::from(self.fade_secs)).cos());
                }
            }

            buffer[n_gap_half + idx] = (sample * envelope) as f32;
        }

        Ok(buffer)
    }

    /// Synthesize the bare chirp: no gap, no fade.
    ///
    /// The inverse-filter design inverts this exact signal so the filter's
    /// phase matches playback sample for sample.
    pub fn generate_bare(&self, sample_rate: f32) -> Result<Vec<f32>> {
        let bare = ChirpSpec {
            gap_secs: 0.0,
            fade_secs: 0.0,
            ..*self
        };
        bare.generate(sample_rate)
    }

    /// Instantaneous phase at time `t` seconds, in radians.
    fn phase_at(&self, t: f64) -> f64 {
        let f0 = f64::from(self.start_freq);
        let f1 = f64::from(self.end_freq);
        match self.sweep {
            SweepKind::Linear => {
                let duration = f64::from(self.duration_secs);
                PI * (2.0 * f0 * t + (f1 - f0) * t * t / duration)
            }
            SweepKind::Exponential => {
                let rate = self.exponential_rate();
                2.0 * PI * f0 * rate * (t / rate).exp()
            }
        }
    }
}
