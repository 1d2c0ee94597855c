//! Effect-specific error types.

use thiserror::Error;

/// Errors from the effect system.
///
/// These are the only hard failures a transform may report. Internal
/// algorithmic hiccups are handled by documented fallbacks instead and
/// surfaced through the degraded flag on the effect output.
#[derive(Error, Debug)]
pub enum EffectError {
    /// An empty or zero-sized buffer was passed to a transform.
    #[error("input buffer is empty")]
    EmptyInput,

    /// The requested effect is not registered in the catalog.
    #[error("unknown effect: {id}")]
    UnknownEffect { id: String },

    /// A raster kernel was given an unusable size.
    #[error("invalid kernel size: {size}")]
    BadKernel { size: u32 },
}
