//! Error types for pipeline configuration and startup.
//!
//! All of these are fatal: the pipeline refuses to start rather than run
//! against an invalid configuration. Mid-stream transfer faults are not
//! errors in this sense; they are reported through
//! [`AudioPipeline::on_transfer_error`](crate::pipeline::AudioPipeline::on_transfer_error)
//! and handled best-effort.

use core::fmt;

/// Configuration rejected at pipeline construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Sample rate of zero.
    InvalidSampleRate,
    /// Echo delay of zero samples.
    InvalidDelay,
    /// Echo delay does not fit in the provided scratch memory.
    DelayExceedsScratch { delay: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate => write!(f, "sample rate must be nonzero"),
            ConfigError::InvalidDelay => write!(f, "echo delay must be nonzero"),
            ConfigError::DelayExceedsScratch { delay, capacity } => write!(
                f,
                "echo delay of {delay} samples exceeds scratch capacity of {capacity}"
            ),
        }
    }
}

/// Startup failure: either the configuration was invalid or the transport
/// collaborator could not begin the transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError<E> {
    Config(ConfigError),
    Transport(E),
}

impl<E> From<ConfigError> for StartError<E> {
    fn from(e: ConfigError) -> Self {
        StartError::Config(e)
    }
}

impl<E: fmt::Display> fmt::Display for StartError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::Config(e) => write!(f, "invalid configuration: {e}"),
            StartError::Transport(e) => write!(f, "transport failed to start: {e}"),
        }
    }
}
