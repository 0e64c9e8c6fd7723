//! Transform backend abstraction over rustfft.
//!
//! The pipeline never assumes a specific FFT implementation: every stage that
//! transforms takes a [`TransformBackend`]. The provided [`Fft`] wraps rustfft
//! plans and is what the pipeline constructs by default.

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Forward/inverse complex discrete Fourier transform of a fixed
/// power-of-two length.
///
/// The inverse transform normalizes by `1/size`, so
/// `inverse(forward(x)) == x` up to rounding.
pub trait TransformBackend {
    /// Transform length in bins/samples.
    fn size(&self) -> usize;

    /// In-place forward transform.
    fn forward(&self, buffer: &mut [Complex<f32>]);

    /// In-place inverse transform, normalized by `1/size`.
    fn inverse(&self, buffer: &mut [Complex<f32>]);
}

/// rustfft-backed transform of a fixed power-of-two size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    ifft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Plan forward and inverse transforms for the given size.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a power of two. The pipeline only ever
    /// transforms power-of-two buffers.
    pub fn new(size: usize) -> Self {
        assert!(
            size.is_power_of_two(),
            "transform size must be a power of two, got {size}"
        );
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Forward-transform a real signal into a full `size`-bin spectrum.
    ///
    /// The input is zero-padded (or truncated) to the transform size. The
    /// returned spectrum carries both halves; the upper half is the conjugate
    /// mirror of the lower one since the input is real.
    pub fn forward_real(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));
        buffer.truncate(self.size);
        self.fft.process(&mut buffer);
        buffer
    }
}

impl TransformBackend for Fft {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&self, buffer: &mut [Complex<f32>]) {
        self.fft.process(buffer);
    }

    fn inverse(&self, buffer: &mut [Complex<f32>]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f32;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}
