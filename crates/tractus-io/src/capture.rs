//! Full-duplex capture boundary.
//!
//! Live measurement plays the excitation through a loudspeaker while
//! recording the cavity microphone. That hardware loop sits behind a trait
//! so the rest of the tool stays testable without audio devices; a backend
//! implementation (cpal, JACK, a lab interface) plugs in from the outside.

use crate::Result;

/// A device that can play one signal while recording another, sample-locked
/// to a common clock.
pub trait DuplexCapture {
    /// Sample rate of both directions, in Hz.
    fn sample_rate(&self) -> u32;

    /// Play `excitation` to completion while recording; the returned buffer
    /// has the same length as the excitation.
    fn play_and_record(&mut self, excitation: &[f32]) -> Result<Vec<f32>>;
}
