//! Inverse-filter design for swept-sine deconvolution.
//!
//! The inverse filter H⁻¹ undoes the chirp's spectral shape: deconvolving the
//! ideal chirp's own spectrum by it yields an impulse at time zero. Two
//! derivations are supported:
//!
//! - [`FilterDesign::Numeric`] synthesizes the noiseless chirp, transforms it
//!   and inverts each in-band bin. Phase matches playback exactly, so this is
//!   the default.
//! - [`FilterDesign::Analytic`] evaluates the stationary-phase closed forms
//!   directly. Kept selectable for cross-checking against reference data.
//!
//! Either way the filter is strictly bandpass: bins outside `[f0, f1]` are
//! exactly zero, and bins above Nyquist are filled by Hermitian symmetry so
//! the filter inverse-transforms to a real signal.

use crate::chirp::{ChirpSpec, SweepKind};
use crate::fft::Fft;
use crate::{Error, Result};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Division-by-zero floor for bin inversion: bins whose squared magnitude
/// falls below this are zeroed instead of inverted.
const DIVISION_FLOOR: f64 = 1e-15;

/// Which derivation of the inverse filter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterDesign {
    /// Synthesize the chirp and invert its measured spectrum.
    #[default]
    Numeric,
    /// Evaluate the stationary-phase closed form.
    Analytic,
}

/// Design an inverse filter for the given chirp at FFT length `nfft`.
///
/// `nfft` must be a power of two at least as long as the bare chirp.
pub fn design_inverse_filter(
    spec: &ChirpSpec,
    sample_rate: f32,
    nfft: usize,
    design: FilterDesign,
) -> Result<Vec<Complex<f32>>> {
    spec.validate(sample_rate)?;
    assert!(
        nfft >= spec.num_chirp_samples(sample_rate),
        "nfft must cover the chirp length"
    );

    match design {
        FilterDesign::Numeric => design_numeric(spec, sample_rate, nfft),
        FilterDesign::Analytic => design_analytic(spec, sample_rate, nfft),
    }
}

/// Numeric design: forward-transform the bare chirp and invert in-band bins.
pub fn design_numeric(
    spec: &ChirpSpec,
    sample_rate: f32,
    nfft: usize,
) -> Result<Vec<Complex<f32>>> {
    let reference = spec.generate_bare(sample_rate)?;
    let fft = Fft::new(nfft);
    let chirp_spectrum = fft.forward_real(&reference);

    let (band_lo, band_hi) = band(spec);
    let mut filter = vec![Complex::new(0.0f32, 0.0); nfft];
    let mut floored = 0usize;

    for k in 0..=nfft / 2 {
        let f = bin_freq(k, sample_rate, nfft);
        if f >= band_lo && f <= band_hi {
            let (inv, was_floored) = invert_bin(chirp_spectrum[k]);
            filter[k] = inv;
            floored += usize::from(was_floored);
        }
    }

    if floored > 0 {
        tracing::debug!(floored, "zeroed near-singular bins during filter inversion");
    }

    mirror_hermitian(&mut filter);
    Ok(filter)
}

/// Analytic design: closed-form magnitude and phase from the sweep rate.
///
/// Assumes a unit-amplitude chirp; amplitude scaling is part of the measured
/// spectra, not the filter.
pub fn design_analytic(
    spec: &ChirpSpec,
    sample_rate: f32,
    nfft: usize,
) -> Result<Vec<Complex<f32>>> {
    let (band_lo, band_hi) = band(spec);
    let mut filter = vec![Complex::new(0.0f32, 0.0); nfft];

    match spec.sweep {
        SweepKind::Linear => {
            // Chirp rate in rad/s^2; the filter phase is the conjugate
            // quadratic -[(w - w0)^2 / (2 beta) + pi/4].
            let beta =
                2.0 * PI * f64::from(spec.end_freq - spec.start_freq)
                    / f64::from(spec.duration_secs);
            let beta = beta.abs().max(f64::EPSILON);
            let magnitude = 2.0 * (beta / (2.0 * PI)).sqrt();
            let omega0 = 2.0 * PI * f64::from(spec.start_freq.min(spec.end_freq));

            for k in 0..=nfft / 2 {
                let f = bin_freq(k, sample_rate, nfft);
                if f < band_lo || f > band_hi {
                    continue;
                }
                let omega = 2.0 * PI * f;
                let phase = -((omega - omega0).powi(2) / (2.0 * beta) + PI / 4.0);
                filter[k] = Complex::new(
                    (magnitude * phase.cos()) as f32,
                    (magnitude * phase.sin()) as f32,
                );
            }
        }
        SweepKind::Exponential => {
            // Floor-based rate variant used by the closed-form design.
            let f0 = f64::from(spec.start_freq);
            let f1 = f64::from(spec.end_freq);
            let t = f64::from(spec.duration_secs);
            let rate = (f0 * t / (f1 / f0).ln()).floor() / f0;

            for k in 0..=nfft / 2 {
                let f = bin_freq(k, sample_rate, nfft);
                if f < DIVISION_FLOOR || f < band_lo || f > band_hi {
                    continue;
                }
                // 2 * sqrt(j f / L) * exp(-2j pi f L (1 - ln(f / f0)))
                // sqrt(j x) = sqrt(x / 2) * (1 + j)
                let sqrt_mag = (f / rate / 2.0).sqrt();
                let sqrt_term = Complex::new(sqrt_mag, sqrt_mag);
                let exp_arg = -2.0 * PI * f * rate * (1.0 - (f / f0).ln());
                let rotated = sqrt_term * Complex::new(exp_arg.cos(), exp_arg.sin());
                filter[k] = Complex::new((2.0 * rotated.re) as f32, (2.0 * rotated.im) as f32);
            }
        }
    }

    mirror_hermitian(&mut filter);
    Ok(filter)
}

/// Invert a single spectrum bin with the division floor applied.
/// Returns the inverse and whether the floor fired.
fn invert_bin(z: Complex<f32>) -> (Complex<f32>, bool) {
    let re = f64::from(z.re);
    let im = f64::from(z.im);
    let denom = re * re + im * im;
    if denom < DIVISION_FLOOR {
        (Complex::new(0.0, 0.0), true)
    } else {
        (Complex::new((re / denom) as f32, (-im / denom) as f32), false)
    }
}

/// Fill bins `nfft/2+1 .. nfft` as the conjugate mirror of the lower half.
///
/// Assigned by direct copy so symmetry is bit-exact.
fn mirror_hermitian(filter: &mut [Complex<f32>]) {
    let nfft = filter.len();
    for k in nfft / 2 + 1..nfft {
        let sym = filter[nfft - k];
        filter[k] = Complex::new(sym.re, -sym.im);
    }
}

fn band(spec: &ChirpSpec) -> (f64, f64) {
    let f0 = f64::from(spec.start_freq);
    let f1 = f64::from(spec.end_freq);
    (f0.min(f1), f0.max(f1))
}

fn bin_freq(k: usize, sample_rate: f32, nfft: usize) -> f64 {
    k as f64 * f64::from(sample_rate) / nfft as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(f0: f32, f1: f32, sweep: SweepKind) -> ChirpSpec {
        ChirpSpec {
            amplitude: 1.0,
            start_freq: f0,
            end_freq: f1,
            duration_secs: 0.5,
            sweep,
            gap_secs: 0.0,
            fade_secs: 0.0,
        }
    }

    #[test]
    fn hermitian_symmetry_is_bit_exact() {
        let fs = 44_100.0;
        let nfft = 32_768;
        for design in [FilterDesign::Numeric, FilterDesign::Analytic] {
            let filter =
                design_inverse_filter(&spec(100.0, 5000.0, SweepKind::Linear), fs, nfft, design)
                    .unwrap();
            for k in nfft / 2 + 1..nfft {
                let mirror = filter[nfft - k];
                assert_eq!(filter[k].re, mirror.re, "re mismatch at bin {k}");
                assert_eq!(filter[k].im, -mirror.im, "im mismatch at bin {k}");
            }
        }
    }

    #[test]
    fn bandpass_is_exactly_zero_out_of_band() {
        let fs = 44_100.0;
        let nfft = 32_768;
        let bands = [(100.0f32, 5000.0f32), (50.0, 2000.0), (500.0, 12_000.0)];

        for (f0, f1) in bands {
            let filter =
                design_numeric(&spec(f0, f1, SweepKind::Linear), fs, nfft).unwrap();
            for k in 0..=nfft / 2 {
                let f = bin_freq(k, fs, nfft);
                if f < f64::from(f0) || f > f64::from(f1) {
                    assert_eq!(filter[k], Complex::new(0.0, 0.0), "bin {k} at {f} Hz");
                }
            }
        }
    }

    #[test]
    fn analytic_exponential_magnitude_grows_with_frequency() {
        let fs = 44_100.0;
        let nfft = 32_768;
        let filter =
            design_analytic(&spec(100.0, 10_000.0, SweepKind::Exponential), fs, nfft).unwrap();

        // |H^-1| ~ sqrt(f / L): compare a low and a high in-band bin.
        let low_bin = (500.0 / fs * nfft as f32) as usize;
        let high_bin = (8000.0 / fs * nfft as f32) as usize;
        assert!(filter[high_bin].norm() > filter[low_bin].norm() * 2.0);
    }

    #[test]
    fn numeric_design_inverts_in_band_bins() {
        let fs = 8192.0;
        let nfft = 8192;
        let s = spec(200.0, 3000.0, SweepKind::Linear);
        let filter = design_numeric(&s, fs, nfft).unwrap();

        let reference = s.generate_bare(fs).unwrap();
        let fft = Fft::new(nfft);
        let chirp_spectrum = fft.forward_real(&reference);

        // X * X^-1 should be ~1 inside the band (away from the edges).
        let lo = (400.0 / fs * nfft as f32) as usize;
        let hi = (2800.0 / fs * nfft as f32) as usize;
        for k in lo..hi {
            let product = chirp_spectrum[k] * filter[k];
            assert!(
                (product - Complex::new(1.0, 0.0)).norm() < 1e-2,
                "bin {k}: {product}"
            );
        }
    }
}
