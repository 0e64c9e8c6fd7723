//! Tractus DSP - swept-sine deconvolution core for cavity transfer functions
//!
//! This crate turns two raw swept-sine recordings — one with the cavity
//! closed (calibration), one open (measurement) — into a regularized
//! frequency-response estimate:
//!
//! - [`chirp`] - linear/exponential chirp synthesis with gap padding and fades
//! - [`fft`] - transform backend abstraction over rustfft
//! - [`inverse_filter`] - phase-matched inverse filter design (numeric and analytic)
//! - [`deconvolve`] - spectral deconvolution (bin-wise product)
//! - [`regularization`] - out-of-band regularization weight profiles
//! - [`extract`] - linear impulse-response isolation via circular windowing
//! - [`transfer_fn`] - regularized transfer-function ratio and derived views
//! - [`xcorr`] - cross-correlation delay estimation and alignment
//! - [`pipeline`] - the single-pass offline processing run
//!
//! ## Example
//!
//! ```rust,ignore
//! use tractus_dsp::{ChirpSpec, SweepKind, pipeline::{PipelineConfig, run}};
//!
//! let chirp = ChirpSpec {
//!     amplitude: 0.5,
//!     start_freq: 100.0,
//!     end_freq: 10_000.0,
//!     duration_secs: 2.0,
//!     sweep: SweepKind::Linear,
//!     gap_secs: 0.0,
//!     fade_secs: 0.01,
//! };
//! let config = PipelineConfig::new(chirp, 44_100.0);
//! let tf = run(&config, closed_recording, open_recording)?;
//! println!("{} bins", tf.len());
//! ```
//!
//! The whole core is pure and offline: every function maps explicit input
//! buffers to output buffers, with ownership moving stage to stage. Division
//! guards (filter inversion, ratio denominators) clamp to floor constants and
//! log at debug level rather than failing; only parameter validation errors
//! abort a run.

pub mod chirp;
pub mod deconvolve;
pub mod extract;
pub mod fft;
pub mod inverse_filter;
pub mod pipeline;
pub mod regularization;
pub mod transfer_fn;
pub mod xcorr;

pub use chirp::{ChirpSpec, SweepKind};
pub use deconvolve::deconvolve;
pub use extract::extract_linear_ir;
pub use fft::{Fft, TransformBackend};
pub use inverse_filter::{FilterDesign, design_inverse_filter};
pub use regularization::{band_energy, generate_epsilon, transition_weight};
pub use transfer_fn::TransferFunction;
pub use xcorr::{align_to_reference, estimate_delay};

/// Parameter validation errors.
///
/// All variants are detected before any buffer is allocated; a failed
/// validation leaves nothing partially computed. Numeric near-zero clamps are
/// deliberately *not* represented here — they are floored and logged, not
/// raised.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Chirp duration must be strictly positive.
    #[error("chirp duration must be positive, got {0} s")]
    InvalidDuration(f32),

    /// Chirp amplitude must be non-negative (zero is allowed and yields silence).
    #[error("chirp amplitude must be non-negative, got {0}")]
    InvalidAmplitude(f32),

    /// A sweep frequency fell outside the open interval (0, Nyquist).
    #[error("sweep frequency {freq} Hz outside (0, {nyquist}) Hz")]
    FrequencyOutOfRange {
        /// The offending frequency in Hz.
        freq: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f32,
    },

    /// Exponential sweeps need distinct start/end frequencies to define a rate.
    #[error("exponential sweep requires distinct start/end frequencies, both are {0} Hz")]
    DegenerateExponentialSweep(f32),

    /// Fade-in/out may cover at most half the chirp each.
    #[error("fade duration {fade} s exceeds half the chirp duration ({duration} s)")]
    FadeTooLong {
        /// Requested fade duration in seconds.
        fade: f32,
        /// Chirp duration in seconds.
        duration: f32,
    },

    /// Silence gap padding must be non-negative.
    #[error("silence gap must be non-negative, got {0} s")]
    InvalidGap(f32),

    /// The impulse-response window must fit inside the FFT buffer.
    #[error("impulse window of {pre}+{post} samples does not fit an FFT of {nfft}")]
    WindowTooLong {
        /// Samples retained before the impulse.
        pre: usize,
        /// Samples retained after the impulse.
        post: usize,
        /// FFT length of the processing run.
        nfft: usize,
    },
}

/// Convenience result type for the DSP core.
pub type Result<T> = std::result::Result<T, Error>;
