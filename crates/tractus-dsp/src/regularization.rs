//! Regularization weight profiles for the transfer-function ratio.
//!
//! Inside the excited band `[f0, f1]` the measurement is trusted and the
//! weight is exactly zero. Outside it the weight rises through a tanh
//! transition window to an energy-derived plateau `We`, so the ratio
//! denominator stays away from zero where the excitation had no energy.

use rustfft::num_complex::Complex;

/// Default transition bandwidth in Hz between "no regularization" and the
/// full energy plateau.
pub const DEFAULT_TRANSITION_HZ: f64 = 50.0;

/// Smooth transition weight between `fa` (inside-band endpoint, weight 0)
/// and `fb` (outside-band endpoint, weight 1).
///
/// `T(f) = 0.5 * (1 + tanh(1/(fa - f) + 1/(f - fb)))` strictly between the
/// endpoints. The endpoint values are assigned directly: the tanh argument is
/// singular at `f == fa` and `f == fb`.
pub fn transition_weight(f: f64, fa: f64, fb: f64) -> f64 {
    let lo = fa.min(fb);
    let hi = fa.max(fb);
    if f <= lo || f >= hi {
        return if fa < fb {
            if f <= fa { 0.0 } else { 1.0 }
        } else if f >= fa {
            0.0
        } else {
            1.0
        };
    }

    let term_a = 1.0 / (fa - f);
    let term_b = 1.0 / (f - fb);
    0.5 * (1.0 + (term_a + term_b).tanh())
}

/// Total squared magnitude over bins `0 .. len/2` — the `We` energy scalar
/// the plateau saturates at.
pub fn band_energy(spectrum: &[Complex<f32>]) -> f32 {
    spectrum[..spectrum.len() / 2]
        .iter()
        .map(|c| c.norm_sqr())
        .sum()
}

/// Generate the per-bin regularization profile with the default 50 Hz
/// transition bandwidth.
pub fn generate_epsilon(f0: f32, f1: f32, we: f32, sample_rate: f32, nfft: usize) -> Vec<f32> {
    generate_epsilon_with_transition(f0, f1, we, sample_rate, nfft, DEFAULT_TRANSITION_HZ)
}

/// Generate the per-bin regularization profile.
///
/// Weight is 0 for bin frequencies in `[f0, f1]`, `we` beyond the transition
/// windows placed just below `f0` and just above `f1`, and the tanh
/// transition in between.
pub fn generate_epsilon_with_transition(
    f0: f32,
    f1: f32,
    we: f32,
    sample_rate: f32,
    nfft: usize,
    transition_hz: f64,
) -> Vec<f32> {
    let band_lo = f64::from(f0.min(f1));
    let band_hi = f64::from(f0.max(f1));
    let fs = f64::from(sample_rate);
    let we = f64::from(we);

    (0..nfft)
        .map(|k| {
            let f = k as f64 * fs / nfft as f64;
            let weight = if f < band_lo {
                transition_weight(f, band_lo, band_lo - transition_hz)
            } else if f > band_hi {
                transition_weight(f, band_hi, band_hi + transition_hz)
            } else {
                0.0
            };
            (weight * we) as f32
        })
        .collect()
}
