//! Chirp excitation generation command.

use super::common::write_signal;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tractus_dsp::{ChirpSpec, SweepKind};
use tractus_io::write_sidecar;

/// Sweep trajectories for the CLI.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliSweep {
    #[default]
    Linear,
    Exponential,
}

impl From<CliSweep> for SweepKind {
    fn from(sweep: CliSweep) -> Self {
        match sweep {
            CliSweep::Linear => SweepKind::Linear,
            CliSweep::Exponential => SweepKind::Exponential,
        }
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output signal file (.wav, or raw f32 for anything else)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Where to write the parameter sidecar (default: next to the output)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Start frequency in Hz
    #[arg(long, default_value = "100.0")]
    start: f32,

    /// End frequency in Hz
    #[arg(long, default_value = "10000.0")]
    end: f32,

    /// Sweep duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Frequency trajectory
    #[arg(long, value_enum, default_value = "linear")]
    sweep: CliSweep,

    /// Peak amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Total silence padding in seconds, split around the chirp
    #[arg(long, default_value = "0.0")]
    gap: f32,

    /// Raised-cosine fade-in/out duration in seconds
    #[arg(long, default_value = "0.0")]
    fade: f32,

    /// Sample rate in Hz
    #[arg(long, default_value = "44100")]
    sample_rate: u32,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let spec = ChirpSpec {
        amplitude: args.amplitude,
        start_freq: args.start,
        end_freq: args.end,
        duration_secs: args.duration,
        sweep: args.sweep.into(),
        gap_secs: args.gap,
        fade_secs: args.fade,
    };

    println!("Generating chirp excitation...");
    println!(
        "  {} Hz to {} Hz over {:.2}s ({:?})",
        args.start,
        args.end,
        args.duration,
        SweepKind::from(args.sweep)
    );

    let samples = spec.generate(args.sample_rate as f32)?;
    write_signal(&args.output, &samples, args.sample_rate)?;
    println!(
        "Wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );

    let params_path = args
        .params
        .unwrap_or_else(|| args.output.with_extension("params.txt"));
    write_sidecar(&params_path, &spec)?;
    println!("Wrote parameter sidecar to {}", params_path.display());

    Ok(())
}
