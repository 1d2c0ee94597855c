use anyhow::Result;

use crate::pipeline::module::PipelineStage;
use crate::pixel_buf::{Adjustments, PixelBuf};

pub struct Brightness;

impl PipelineStage for Brightness {
    fn name(&self) -> &str {
        "brightness"
    }

    fn apply(&self, mut input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf> {
        if adjustments.brightness == 0.0 {
            return Ok(input);
        }

        // Slider range -100..100 maps onto the full 8-bit range.
        let offset = adjustments.brightness * 2.55;
        for v in &mut input.data {
            *v = (*v as f32 + offset).clamp(0.0, 255.0) as u8;
        }
        Ok(input)
    }
}
