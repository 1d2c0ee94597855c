use anyhow::Result;

use crate::pipeline::module::PipelineStage;
use crate::pixel_buf::{Adjustments, PixelBuf};
use crate::raster::correlate3;

pub struct Sharpness;

impl PipelineStage for Sharpness {
    fn name(&self) -> &str {
        "sharpness"
    }

    /// 3x3 sharpening kernel: all neighbors -1, center 9 + v/10.
    /// The kernel deliberately sums to slightly more than one, so
    /// detail regions gain a little energy as the slider rises.
    fn apply(&self, input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf> {
        let v = adjustments.sharpness;
        if v <= 0.0 {
            return Ok(input);
        }

        let center = 9.0 + v / 10.0;
        let kernel = [-1.0, -1.0, -1.0, -1.0, center, -1.0, -1.0, -1.0, -1.0];
        Ok(correlate3(&input, &kernel, 0.0))
    }
}
