use anyhow::Result;

use crate::pixel_buf::{Adjustments, PixelBuf};

/// A single step in the adjustment pipeline.
///
/// Stages consume and return the working buffer; a stage whose slider
/// sits at the no-op sentinel must return the input untouched.
pub trait PipelineStage: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf>;
}
