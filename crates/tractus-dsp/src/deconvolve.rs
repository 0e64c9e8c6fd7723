//! Spectral deconvolution: bin-wise product of a measured spectrum with the
//! inverse filter.

use rustfft::num_complex::Complex;

/// Multiply `spectrum` in place by `inverse_filter`, bin by bin.
///
/// Pure and stateless. Lengths must match; this is a caller contract checked
/// only in debug builds.
pub fn deconvolve(spectrum: &mut [Complex<f32>], inverse_filter: &[Complex<f32>]) {
    debug_assert_eq!(spectrum.len(), inverse_filter.len());
    for (bin, inv) in spectrum.iter_mut().zip(inverse_filter.iter()) {
        *bin *= *inv;
    }
}
