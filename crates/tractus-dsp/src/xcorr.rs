//! Cross-correlation delay estimation and recording alignment.
//!
//! Capture hardware inserts an unknown round-trip latency between playback
//! and recording. The estimator finds the lag that maximizes
//! `sum(signal[i] * reference[i + lag])` over a +/- `max_lag` search window;
//! the alignment helper then shifts the recording so it lines up with the
//! reference excitation before the pipeline sees it.

/// Estimate the lag between `signal` and `reference` with the default search
/// window of half the signal length.
///
/// Returns the lag in samples maximizing the raw inner product. With this
/// convention a recording *delayed* by `d` samples relative to the reference
/// yields `-d`.
pub fn estimate_delay(signal: &[f32], reference: &[f32]) -> i32 {
    estimate_delay_with_max_lag(signal, reference, signal.len().max(reference.len()) / 2)
}

/// Estimate the lag between `signal` and `reference`, searching
/// `-max_lag ..= max_lag`.
///
/// Direct O(n * max_lag) evaluation; the offline pipeline runs this once per
/// capture, so the simple form is fast enough and exact.
pub fn estimate_delay_with_max_lag(signal: &[f32], reference: &[f32], max_lag: usize) -> i32 {
    let n = signal.len().max(reference.len());
    let mut best_lag = 0i32;
    let mut best_corr = f32::NEG_INFINITY;

    for lag in -(max_lag as i32)..=(max_lag as i32) {
        let mut corr = 0.0f32;
        for i in 0..n {
            let ref_idx = i as i32 + lag;
            if ref_idx >= 0 && (ref_idx as usize) < reference.len() && i < signal.len() {
                corr += signal[i] * reference[ref_idx as usize];
            }
        }
        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    best_lag
}

/// Shift `signal` in place so it aligns with `reference`, zero-filling the
/// vacated samples. Returns the applied shift in samples (positive means the
/// signal was moved earlier in time).
pub fn align_to_reference(signal: &mut [f32], reference: &[f32]) -> i32 {
    let shift = -estimate_delay(signal, reference);

    if shift > 0 {
        let shift = (shift as usize).min(signal.len());
        signal.copy_within(shift.., 0);
        let len = signal.len();
        signal[len - shift..].fill(0.0);
        shift as i32
    } else if shift < 0 {
        let back = ((-shift) as usize).min(signal.len());
        signal.copy_within(..signal.len() - back, back);
        signal[..back].fill(0.0);
        -(back as i32)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    /// A short swept tone with a decaying envelope: aperiodic, so its
    /// autocorrelation has a single unambiguous peak.
    fn chirp_like(n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                (2.0 * PI * (5.0 * t + 40.0 * t * t)).sin() * (1.0 - t)
            })
            .collect()
    }

    fn delayed(reference: &[f32], delay: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; reference.len()];
        out[delay..].copy_from_slice(&reference[..reference.len() - delay]);
        out
    }

    #[test]
    fn exact_delay_recovery() {
        let reference = chirp_like(512);
        let signal = delayed(&reference, 37);

        assert_eq!(estimate_delay(&signal, &reference), -37);
    }

    #[test]
    fn zero_delay_for_identical_signals() {
        let reference = chirp_like(256);
        assert_eq!(estimate_delay(&reference, &reference), 0);
    }

    #[test]
    fn align_shifts_recording_onto_reference() {
        let reference = chirp_like(512);
        let mut signal = delayed(&reference, 37);

        let shift = align_to_reference(&mut signal, &reference);

        assert_eq!(shift, 37);
        for (i, (a, b)) in signal.iter().zip(reference.iter()).enumerate().take(400) {
            assert!((a - b).abs() < 1e-6, "sample {i}: {a} vs {b}");
        }
        // The vacated tail is silence.
        assert!(signal[512 - 37..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn respects_max_lag_window() {
        let reference = chirp_like(256);
        let signal = delayed(&reference, 50);

        // Search window too small to see the true delay; result stays in range.
        let lag = estimate_delay_with_max_lag(&signal, &reference, 10);
        assert!((-10..=10).contains(&lag));
    }
}
