use anyhow::Result;

use crate::pipeline::module::PipelineStage;
use crate::pixel_buf::{Adjustments, PixelBuf};
use crate::raster;

pub struct Blur;

impl PipelineStage for Blur {
    fn name(&self) -> &str {
        "blur"
    }

    /// Gaussian blur whose kernel size is the slider value bumped to
    /// the next odd integer.
    fn apply(&self, input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf> {
        let v = adjustments.blur;
        if v <= 0.0 {
            return Ok(input);
        }

        let ksize = raster::force_odd(v as u32);
        Ok(raster::blur(&input, ksize)?)
    }
}
