//! Linear impulse-response isolation.
//!
//! A nonlinear loudspeaker smears harmonic-distortion energy into the
//! deconvolved response, but a swept-sine excitation makes those distortion
//! impulses arrive at predictable delays away from the fundamental's linear
//! impulse. Windowing a short region around the linear impulse therefore
//! enforces a "linear system only" assumption.
//!
//! The deconvolved impulse sits at time zero with its anti-causal ripple
//! wrapped to the end of the buffer, so the extractor reassembles a compact
//! circular window (last `n_pre` samples, then first `n_post` samples),
//! applies an asymmetric Tukey-style fade, re-transforms at the compact
//! length and rotates the phase back so the impulse is referenced to time
//! zero again.

use crate::fft::TransformBackend;
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Asymmetric Tukey-style window of length `len`.
///
/// Cosine fade-in over the first `n_pre / 2` samples, unity through the
/// middle, cosine fade-out over the last `n_post / 2` samples of the
/// `n_pre + n_post` region, zero in any power-of-two padding beyond it.
pub fn asymmetric_tukey(n_pre: usize, n_post: usize, len: usize) -> Vec<f32> {
    let active = n_pre + n_post;
    debug_assert!(len >= active);

    let n_fade_in = n_pre / 2;
    let n_fade_out = n_post / 2;
    let mut window = vec![0.0f32; len];

    for i in 0..n_fade_in {
        window[i] = (0.5 * (1.0 - (PI * i as f64 / n_fade_in as f64).cos())) as f32;
    }
    for i in n_fade_in..active - n_fade_out {
        window[i] = 1.0;
    }
    for i in 0..n_fade_out {
        window[active - n_fade_out + i] =
            (0.5 * (1.0 + (PI * i as f64 / n_fade_out as f64).cos())) as f32;
    }

    window
}

/// Isolate the linear impulse response of a deconvolved spectrum.
///
/// `full` is the backend of the spectrum's own length (used inverse),
/// `compact` the backend of length `(n_pre + n_post).next_power_of_two()`
/// (used forward). Returns the re-extracted spectrum at the compact length;
/// only bins `0 ..= compact/2` are meaningful and the caller matches bins at
/// that resolution.
///
/// The per-bin rotation `exp(j 2 pi f n_pre / fs)` undoes the circular shift
/// so downstream phase and group delay stay referenced to the true impulse
/// location.
pub fn extract_linear_ir(
    spectrum: Vec<Complex<f32>>,
    full: &dyn TransformBackend,
    compact: &dyn TransformBackend,
    n_pre: usize,
    n_post: usize,
) -> Vec<Complex<f32>> {
    let nfft = spectrum.len();
    let compact_len = compact.size();
    debug_assert_eq!(full.size(), nfft);
    debug_assert_eq!(compact_len, (n_pre + n_post).next_power_of_two());
    debug_assert!(n_pre + n_post <= nfft);

    // 1. Back to the time domain (normalized by 1/nfft).
    let mut time_buf = spectrum;
    full.inverse(&mut time_buf);

    // 2. Circular reassembly: the impulse lands at index n_pre.
    let mut circ = vec![Complex::new(0.0f32, 0.0); compact_len];
    circ[..n_pre].copy_from_slice(&time_buf[nfft - n_pre..]);
    circ[n_pre..n_pre + n_post].copy_from_slice(&time_buf[..n_post]);

    // 3. Fade the edges; distortion impulses outside the window are dropped.
    let window = asymmetric_tukey(n_pre, n_post, compact_len);
    for (sample, &w) in circ.iter_mut().zip(window.iter()) {
        *sample *= w;
    }

    // 4. Forward transform at the compact length.
    compact.forward(&mut circ);

    // 5. Undo the circular shift in the phase.
    for (k, bin) in circ.iter_mut().enumerate() {
        let theta = 2.0 * PI * k as f64 * n_pre as f64 / compact_len as f64;
        let rotation = Complex::new(theta.cos() as f32, theta.sin() as f32);
        *bin *= rotation;
    }

    circ
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::Fft;

    #[test]
    fn window_shape() {
        let n_pre = 64;
        let n_post = 192;
        let len = 256;
        let w = asymmetric_tukey(n_pre, n_post, len);

        assert_eq!(w.len(), len);
        assert_eq!(w[0], 0.0);
        // Unity from the end of the fade-in to the start of the fade-out.
        for i in n_pre / 2..n_pre + n_post - n_post / 2 {
            assert_eq!(w[i], 1.0, "index {i}");
        }
        // Fade-out decreases monotonically.
        let fade_out = &w[n_pre + n_post - n_post / 2..n_pre + n_post];
        for pair in fade_out.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn window_zero_in_padding() {
        let w = asymmetric_tukey(100, 100, 256);
        assert!(w[200..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn ideal_impulse_survives_extraction() {
        // A flat spectrum is an impulse at t=0; extraction must return a
        // flat spectrum with zero phase after the rotation.
        let nfft = 4096;
        let spectrum = vec![Complex::new(1.0f32, 0.0); nfft];
        let full = Fft::new(nfft);
        let compact = Fft::new(512);

        let extracted = extract_linear_ir(spectrum, &full, &compact, 128, 384);

        for (k, bin) in extracted.iter().enumerate().take(257) {
            assert!(
                (bin - Complex::new(1.0, 0.0)).norm() < 1e-3,
                "bin {k}: {bin}"
            );
        }
    }

    #[test]
    fn late_energy_is_rejected() {
        // Spectrum of a delayed impulse at n0 samples, with n0 far beyond
        // n_post: the window must suppress it.
        let nfft = 4096;
        let n0 = 2000usize;
        let spectrum: Vec<Complex<f32>> = (0..nfft)
            .map(|k| {
                let theta = -2.0 * PI * k as f64 * n0 as f64 / nfft as f64;
                Complex::new(theta.cos() as f32, theta.sin() as f32)
            })
            .collect();
        let full = Fft::new(nfft);
        let compact = Fft::new(512);

        let extracted = extract_linear_ir(spectrum, &full, &compact, 128, 384);

        let energy: f32 = extracted.iter().map(|c| c.norm_sqr()).sum();
        assert!(energy < 1e-3, "late impulse should be windowed out: {energy}");
    }
}
