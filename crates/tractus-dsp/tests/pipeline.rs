//! End-to-end properties of the deconvolution pipeline.
//!
//! These tests exercise the public API with synthetic, noiseless signals
//! whose transfer functions are known in closed form.

use rustfft::num_complex::Complex;
use tractus_dsp::fft::{Fft, TransformBackend};
use tractus_dsp::pipeline::{PipelineConfig, run};
use tractus_dsp::{ChirpSpec, FilterDesign, SweepKind, deconvolve, design_inverse_filter};

fn wideband_chirp(f0: f32, f1: f32, duration: f32) -> ChirpSpec {
    ChirpSpec {
        amplitude: 1.0,
        start_freq: f0,
        end_freq: f1,
        duration_secs: duration,
        sweep: SweepKind::Linear,
        gap_secs: 0.0,
        fade_secs: 0.0,
    }
}

/// Deconvolving the chirp's own spectrum with its inverse filter must give an
/// impulse at time zero: unit peak, everything else far below it.
#[test]
fn filter_round_trip_peaks_at_time_zero() {
    let fs = 16_384.0;
    let nfft = 16_384;
    // Nearly the full Nyquist band, so the bandpass impulse approaches a
    // true delta with negligible sidelobes.
    let spec = wideband_chirp(30.0, 8150.0, 1.0);

    let chirp = spec.generate(fs).unwrap();
    let fft = Fft::new(nfft);
    let mut spectrum = fft.forward_real(&chirp);

    let filter = design_inverse_filter(&spec, fs, nfft, FilterDesign::Numeric).unwrap();
    deconvolve(&mut spectrum, &filter);
    fft.inverse(&mut spectrum);

    let (peak_idx, peak_val) = spectrum
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.norm()))
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .unwrap();

    assert!(
        peak_idx == 0 || peak_idx == 1 || peak_idx == nfft - 1,
        "impulse peak at index {peak_idx}, expected time zero"
    );
    assert!(
        (peak_val - 1.0).abs() < 0.05,
        "peak amplitude {peak_val}, expected ~1.0"
    );

    let floor = peak_val * 0.1; // -20 dB
    for (i, c) in spectrum.iter().enumerate() {
        if i != peak_idx {
            assert!(
                c.norm() < floor,
                "sample {i} at {} is above -20 dB of the peak",
                c.norm()
            );
        }
    }
}

/// A system that exactly doubles the excitation must measure 20*log10(2)
/// ~ 6.02 dB with zero phase at every interior in-band bin.
#[test]
fn gain_of_two_system_measures_six_db() {
    let fs = 16_384.0;
    let spec = wideband_chirp(100.0, 7000.0, 1.0);

    let closed = spec.generate(fs).unwrap();
    let open: Vec<f32> = closed.iter().map(|&x| 2.0 * x).collect();

    let config = PipelineConfig::new(spec, fs);
    let tf = run(&config, closed, open).unwrap();

    let freqs = tf.frequencies();
    let mags_db = tf.magnitude_db();
    let phases = tf.phase_rad();
    let expected_db = 20.0 * 2.0f32.log10();

    let mut checked = 0usize;
    for (k, &f) in freqs.iter().enumerate() {
        if f < 150.0 || f > 6950.0 {
            continue;
        }
        assert!(
            (mags_db[k] - expected_db).abs() < 0.1,
            "bin {k} at {f} Hz: {} dB, expected {expected_db} dB",
            mags_db[k]
        );
        assert!(
            phases[k].abs() < 0.01,
            "bin {k} at {f} Hz: phase {} rad",
            phases[k]
        );
        checked += 1;
    }
    assert!(checked > 1000, "only {checked} interior bins checked");
}

/// An identity system (open == closed) measures 0 dB in band and is driven
/// toward zero outside it by the regularization.
#[test]
fn identity_system_is_flat_in_band_and_suppressed_outside() {
    let fs = 16_384.0;
    let spec = wideband_chirp(200.0, 6000.0, 1.0);

    let closed = spec.generate(fs).unwrap();
    let open = closed.clone();

    let config = PipelineConfig::new(spec, fs);
    let tf = run(&config, closed, open).unwrap();

    let freqs = tf.frequencies();
    let mags = tf.magnitude();

    for (k, &f) in freqs.iter().enumerate() {
        if (300.0..=5900.0).contains(&f) {
            assert!(
                (mags[k] - 1.0).abs() < 0.02,
                "bin {k} at {f} Hz: |H| = {}",
                mags[k]
            );
        }
        // Beyond the transition band the plateau is the full deconvolved
        // energy, which dwarfs any residual bin power.
        if !(100.0..=6100.0).contains(&f) {
            assert!(
                mags[k] < 1e-2,
                "bin {k} at {f} Hz should be regularized away, |H| = {}",
                mags[k]
            );
        }
    }
}

/// The extracted spectra live at the compact window resolution; the report
/// axis must match it.
#[test]
fn output_resolution_matches_ir_window() {
    let fs = 16_384.0;
    let spec = wideband_chirp(100.0, 7000.0, 0.25);

    let closed = spec.generate(fs).unwrap();
    let open = closed.clone();

    let mut config = PipelineConfig::new(spec, fs);
    config.ir_pre = 256;
    config.ir_post = 1024;
    let tf = run(&config, closed, open).unwrap();

    let compact = (256usize + 1024).next_power_of_two();
    assert_eq!(tf.len(), compact);
    assert_eq!(tf.frequencies().len(), compact / 2);

    let freqs = tf.frequencies();
    let df = fs / compact as f32;
    assert!((freqs[1] - df).abs() < 1e-3);
}

/// The compact forward backend is caller-supplied; a plain flat spectrum
/// survives the extraction round trip through both backends.
#[test]
fn backends_compose_through_extraction() {
    use tractus_dsp::extract_linear_ir;

    let nfft = 2048;
    let full = Fft::new(nfft);
    let compact = Fft::new(256);
    assert_eq!(full.size(), nfft);

    let spectrum = vec![Complex::new(1.0f32, 0.0); nfft];
    let extracted = extract_linear_ir(spectrum, &full, &compact, 64, 192);

    assert_eq!(extracted.len(), 256);
    for bin in extracted.iter().take(129) {
        assert!((bin - Complex::new(1.0, 0.0)).norm() < 1e-3);
    }
}
