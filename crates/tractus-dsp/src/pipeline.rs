//! The single-pass offline processing run.
//!
//! Both recorded signals (closed-cavity calibration, open-cavity measurement)
//! flow through the same five acyclic stages exactly once:
//!
//! ```text
//! signal -> FFT -> deconvolve -> extract linear IR \
//!                                                   > regularized ratio -> H(f)
//! signal -> FFT -> deconvolve -> extract linear IR /
//! ```
//!
//! Everything is pure over in-memory buffers; each stage owns its input and
//! hands the result on by move. File loading and capture live outside this
//! crate.

use crate::chirp::ChirpSpec;
use crate::deconvolve::deconvolve;
use crate::extract::extract_linear_ir;
use crate::fft::Fft;
use crate::inverse_filter::{FilterDesign, design_inverse_filter};
use crate::regularization::{
    DEFAULT_TRANSITION_HZ, band_energy, generate_epsilon_with_transition,
};
use crate::transfer_fn::TransferFunction;
use crate::{Error, Result};

/// Default samples retained before the linear impulse.
pub const DEFAULT_IR_PRE: usize = 1024;
/// Default samples retained after the linear impulse.
pub const DEFAULT_IR_POST: usize = 8192;

/// Parameters of one processing run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// The chirp both recordings were excited with.
    pub chirp: ChirpSpec,
    /// Sample rate of the recordings in Hz.
    pub sample_rate: f32,
    /// Samples retained before the impulse when isolating the linear IR.
    pub ir_pre: usize,
    /// Samples retained after the impulse when isolating the linear IR.
    pub ir_post: usize,
    /// Inverse-filter derivation to use.
    pub design: FilterDesign,
    /// Regularization transition bandwidth in Hz.
    pub transition_hz: f64,
}

impl PipelineConfig {
    /// Config with the default IR window, numeric filter design and 50 Hz
    /// regularization transition.
    pub fn new(chirp: ChirpSpec, sample_rate: f32) -> Self {
        Self {
            chirp,
            sample_rate,
            ir_pre: DEFAULT_IR_PRE,
            ir_post: DEFAULT_IR_POST,
            design: FilterDesign::Numeric,
            transition_hz: DEFAULT_TRANSITION_HZ,
        }
    }
}

/// Run the full pipeline over a calibration and a measurement recording.
///
/// The FFT length is the next power of two covering the longer recording.
/// The two branches are independent and stateless; they are processed
/// sequentially here since a run takes well under a second offline.
pub fn run(config: &PipelineConfig, closed: Vec<f32>, open: Vec<f32>) -> Result<TransferFunction> {
    config.chirp.validate(config.sample_rate)?;

    let n_chirp = config.chirp.num_chirp_samples(config.sample_rate);
    let nfft = closed
        .len()
        .max(open.len())
        .max(n_chirp)
        .max(1)
        .next_power_of_two();
    let compact_len = (config.ir_pre + config.ir_post).next_power_of_two();
    if config.ir_pre + config.ir_post > nfft || config.ir_pre == 0 || config.ir_post == 0 {
        return Err(Error::WindowTooLong {
            pre: config.ir_pre,
            post: config.ir_post,
            nfft,
        });
    }
    tracing::info!(nfft, compact_len, "processing run");

    let fft = Fft::new(nfft);
    let compact_fft = Fft::new(compact_len);

    let inverse_filter =
        design_inverse_filter(&config.chirp, config.sample_rate, nfft, config.design)?;

    // Calibration branch.
    let mut closed_spectrum = fft.forward_real(&closed);
    drop(closed);
    deconvolve(&mut closed_spectrum, &inverse_filter);

    // Measurement branch.
    let mut open_spectrum = fft.forward_real(&open);
    drop(open);
    deconvolve(&mut open_spectrum, &inverse_filter);

    // The regularization plateau scales with the deconvolved open energy.
    let we = band_energy(&open_spectrum);
    tracing::debug!(we, "estimated regularization energy");

    let closed_extracted = extract_linear_ir(
        closed_spectrum,
        &fft,
        &compact_fft,
        config.ir_pre,
        config.ir_post,
    );
    let open_extracted = extract_linear_ir(
        open_spectrum,
        &fft,
        &compact_fft,
        config.ir_pre,
        config.ir_post,
    );

    // Epsilon at the compact resolution the extracted spectra live at.
    let epsilon = generate_epsilon_with_transition(
        config.chirp.start_freq,
        config.chirp.end_freq,
        we,
        config.sample_rate,
        compact_len,
        config.transition_hz,
    );

    Ok(TransferFunction::estimate(
        &open_extracted,
        &closed_extracted,
        &epsilon,
        config.sample_rate,
    ))
}
