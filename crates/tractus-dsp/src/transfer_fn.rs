//! Regularized transfer-function ratio and its derived views.

use rustfft::num_complex::Complex;

/// Linear magnitude floor applied before dB conversion (== -180 dB).
pub const MAGNITUDE_FLOOR: f32 = 1e-9;

/// Absolute floor for the ratio denominator, for bins where both the signal
/// and the regularization vanish.
const DENOMINATOR_FLOOR: f64 = 1e-12;

/// The estimated cavity transfer function.
///
/// Owns the complex bins; magnitude, dB, phase and frequency axes are
/// presentation projections computed on demand over the one-sided half
/// `0 .. len/2` (the upper half is redundant for a real system).
#[derive(Debug, Clone)]
pub struct TransferFunction {
    bins: Vec<Complex<f32>>,
    sample_rate: f32,
}

impl TransferFunction {
    /// Wiener-style regularized deconvolution ratio of two extracted spectra:
    ///
    /// `H(k) = p_open(k) * conj(p_closed(k)) / (|p_closed(k)|^2 + epsilon(k))`
    ///
    /// Inside the excited band (epsilon ~ 0) this reduces to a plain complex
    /// ratio; outside it the weight drives H toward zero. Near-zero
    /// denominators are floored and logged, never raised as errors.
    pub fn estimate(
        p_open: &[Complex<f32>],
        p_closed: &[Complex<f32>],
        epsilon: &[f32],
        sample_rate: f32,
    ) -> Self {
        let n = p_open.len().min(p_closed.len()).min(epsilon.len());
        let mut bins = Vec::with_capacity(n);
        let mut floored = 0usize;

        for k in 0..n {
            let open = to_f64(p_open[k]);
            let closed = to_f64(p_closed[k]);

            let numerator = open * closed.conj();
            let mut denominator = closed.norm_sqr() + f64::from(epsilon[k]);
            if denominator < DENOMINATOR_FLOOR {
                denominator = DENOMINATOR_FLOOR;
                floored += 1;
            }

            let h = numerator / denominator;
            bins.push(Complex::new(h.re as f32, h.im as f32));
        }

        if floored > 0 {
            tracing::debug!(floored, "floored near-zero ratio denominators");
        }

        Self { bins, sample_rate }
    }

    /// Number of complex bins (the full transform length).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the estimate holds no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The raw complex bins.
    pub fn bins(&self) -> &[Complex<f32>] {
        &self.bins
    }

    /// Sample rate the bin frequencies refer to, in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// One-sided frequency axis: `k * fs / len` for `k in 0 .. len/2`.
    pub fn frequencies(&self) -> Vec<f32> {
        let n = self.bins.len();
        (0..n / 2)
            .map(|k| k as f32 * self.sample_rate / n as f32)
            .collect()
    }

    /// One-sided linear magnitude.
    pub fn magnitude(&self) -> Vec<f32> {
        self.half().iter().map(|c| c.norm()).collect()
    }

    /// One-sided magnitude in dB, floor-clamped at -180 dB.
    pub fn magnitude_db(&self) -> Vec<f32> {
        self.half()
            .iter()
            .map(|c| 20.0 * c.norm().max(MAGNITUDE_FLOOR).log10())
            .collect()
    }

    /// One-sided phase in radians.
    pub fn phase_rad(&self) -> Vec<f32> {
        self.half().iter().map(|c| c.arg()).collect()
    }

    fn half(&self) -> &[Complex<f32>] {
        &self.bins[..self.bins.len() / 2]
    }
}

fn to_f64(z: Complex<f32>) -> Complex<f64> {
    Complex::new(f64::from(z.re), f64::from(z.im))
}
