//! Recording alignment command.
//!
//! Capture latency shifts a recording relative to the excitation that
//! produced it; processing assumes both start together. This command finds
//! the delay by cross-correlation and writes the shifted recording.

use super::common::{read_signal, write_signal};
use clap::Args;
use std::path::PathBuf;
use tractus_dsp::align_to_reference;

#[derive(Args)]
pub struct AlignArgs {
    /// Recording to align (.wav or raw f32)
    #[arg(value_name = "SIGNAL")]
    signal: PathBuf,

    /// Reference excitation to align against
    #[arg(long)]
    reference: PathBuf,

    /// Where to write the aligned recording
    #[arg(long)]
    output: PathBuf,

    /// Sample rate in Hz for raw files (WAV files carry their own)
    #[arg(long, default_value = "44100")]
    sample_rate: u32,
}

pub fn run(args: AlignArgs) -> anyhow::Result<()> {
    let (mut signal, signal_rate) = read_signal(&args.signal)?;
    let (reference, _) = read_signal(&args.reference)?;
    let sample_rate = signal_rate.unwrap_or(args.sample_rate);

    println!("Aligning recording to reference...");
    let shift = align_to_reference(&mut signal, &reference);
    println!(
        "  Applied shift: {} samples ({:.2} ms)",
        shift,
        shift as f64 * 1000.0 / sample_rate as f64
    );

    write_signal(&args.output, &signal, sample_rate)?;
    println!(
        "Wrote {} samples to {}",
        signal.len(),
        args.output.display()
    );

    Ok(())
}
