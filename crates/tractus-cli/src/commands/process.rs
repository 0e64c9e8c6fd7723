//! Offline processing command: recordings in, FRF report out.

use super::common::read_signal;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tractus_dsp::FilterDesign;
use tractus_dsp::pipeline::{DEFAULT_IR_POST, DEFAULT_IR_PRE, PipelineConfig, run as run_pipeline};
use tractus_io::{read_sidecar, write_frf_csv};

/// Inverse-filter derivations for the CLI.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliDesign {
    #[default]
    Numeric,
    Analytic,
}

impl From<CliDesign> for FilterDesign {
    fn from(design: CliDesign) -> Self {
        match design {
            CliDesign::Numeric => FilterDesign::Numeric,
            CliDesign::Analytic => FilterDesign::Analytic,
        }
    }
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Closed-cavity calibration recording (.wav or raw f32)
    #[arg(long)]
    closed: PathBuf,

    /// Open-cavity measurement recording (.wav or raw f32)
    #[arg(long)]
    open: PathBuf,

    /// Calibration parameter sidecar
    #[arg(long)]
    params: PathBuf,

    /// Output CSV report
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Sample rate in Hz for raw recordings (WAV files carry their own)
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Inverse-filter derivation
    #[arg(long, value_enum, default_value = "numeric")]
    design: CliDesign,

    /// Samples kept before the linear impulse
    #[arg(long, default_value_t = DEFAULT_IR_PRE)]
    ir_pre: usize,

    /// Samples kept after the linear impulse
    #[arg(long, default_value_t = DEFAULT_IR_POST)]
    ir_post: usize,

    /// Regularization transition bandwidth in Hz
    #[arg(long, default_value = "50.0")]
    transition: f64,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let chirp = read_sidecar(&args.params)?;

    let (closed, closed_rate) = read_signal(&args.closed)?;
    let (open, open_rate) = read_signal(&args.open)?;

    let sample_rate = match (closed_rate, open_rate) {
        (Some(a), Some(b)) if a != b => {
            anyhow::bail!("recordings disagree on sample rate: {a} Hz vs {b} Hz")
        }
        (Some(rate), _) | (None, Some(rate)) => rate,
        (None, None) => args.sample_rate,
    };

    println!("Processing measurement...");
    println!(
        "  {} + {} samples at {} Hz, chirp {:.2}s {} Hz to {} Hz",
        closed.len(),
        open.len(),
        sample_rate,
        chirp.duration_secs,
        chirp.start_freq,
        chirp.end_freq
    );
    tracing::info!(
        closed = %args.closed.display(),
        open = %args.open.display(),
        sample_rate,
        "processing run"
    );

    let mut config = PipelineConfig::new(chirp, sample_rate as f32);
    config.design = args.design.into();
    config.ir_pre = args.ir_pre;
    config.ir_post = args.ir_post;
    config.transition_hz = args.transition;

    let tf = run_pipeline(&config, closed, open)?;
    write_frf_csv(&args.output, &tf)?;
    println!(
        "Wrote {} frequency bins to {}",
        tf.len() / 2,
        args.output.display()
    );

    Ok(())
}
