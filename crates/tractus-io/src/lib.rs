//! Persisted-format boundary for the tractus measurement tool.
//!
//! Every format the pipeline reads or writes on disk lives here:
//!
//! - **Raw signals**: [`read_raw`] / [`write_raw`] for headerless f32 PCM,
//!   the native format of recorded responses
//! - **Parameter sidecar**: [`read_sidecar`] / [`write_sidecar`] for the
//!   plain-text chirp description saved next to a calibration
//! - **FRF report**: [`write_frf_csv`] for the final CSV a plotting script
//!   consumes
//! - **WAV convenience**: [`read_wav_mono`] / [`write_wav_mono`] so
//!   recordings made with ordinary audio tools work too
//! - **Capture boundary**: the [`DuplexCapture`] trait behind which a live
//!   full-duplex audio backend can be plugged
//!
//! The DSP core never touches a path; everything crosses this crate as
//! in-memory buffers.

mod capture;
mod params;
mod raw;
mod report;
mod wav;

pub use capture::DuplexCapture;
pub use params::{read_sidecar, write_sidecar};
pub use raw::{read_raw, write_raw};
pub use report::write_frf_csv;
pub use wav::{read_wav_mono, write_wav_mono};

/// Error types for file-format operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// A raw signal file whose length is not a whole number of f32 samples.
    #[error("raw signal file is {len} bytes, not a multiple of 4")]
    TruncatedRaw {
        /// File length in bytes.
        len: u64,
    },

    /// A parameter sidecar that is missing a field or holds an unparsable value.
    #[error("malformed parameter sidecar: {0}")]
    MalformedSidecar(String),

    /// A WAV file the measurement flow cannot use.
    #[error("unsupported WAV layout: {0}")]
    UnsupportedWav(String),
}

/// Convenience result type for file-format operations.
pub type Result<T> = std::result::Result<T, Error>;
