use anyhow::Result;

use crate::color::{hsv_to_rgb, rgb_to_hsv};
use crate::pipeline::module::PipelineStage;
use crate::pixel_buf::{Adjustments, PixelBuf};

pub struct Saturation;

impl PipelineStage for Saturation {
    fn name(&self) -> &str {
        "saturation"
    }

    fn apply(&self, mut input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf> {
        let v = adjustments.saturation;
        if v == 0.0 {
            return Ok(input);
        }

        let scale = 1.0 + v / 100.0;
        for px in input.data.chunks_exact_mut(3) {
            let (h, s, val) = rgb_to_hsv(px[0], px[1], px[2]);
            let s = (s * scale).clamp(0.0, 255.0);
            let (r, g, b) = hsv_to_rgb(h, s, val);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_noop() {
        let buf = PixelBuf::from_pixel(2, 2, [180, 90, 45]);
        let expected = buf.data.clone();
        let out = Saturation.apply(buf, &Adjustments::default()).unwrap();
        assert_eq!(out.data, expected);
    }

    #[test]
    fn gray_pixels_stay_gray() {
        let buf = PixelBuf::from_pixel(2, 2, [128, 128, 128]);
        for v in [-100.0, -50.0, 50.0, 100.0] {
            let adj = Adjustments {
                saturation: v,
                ..Default::default()
            };
            let out = Saturation.apply(buf.clone(), &adj).unwrap();
            assert_eq!(out.data, buf.data, "gray must survive saturation {v}");
        }
    }

    #[test]
    fn minus_hundred_is_achromatic() {
        let buf = PixelBuf::from_pixel(1, 1, [220, 120, 40]);
        let adj = Adjustments {
            saturation: -100.0,
            ..Default::default()
        };
        let out = Saturation.apply(buf, &adj).unwrap();
        let px = out.pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        // HSV desaturation converges on value, not luma.
        assert_eq!(px[0], 220);
    }

    #[test]
    fn positive_widens_channel_spread() {
        let buf = PixelBuf::from_pixel(1, 1, [180, 120, 90]);
        let adj = Adjustments {
            saturation: 60.0,
            ..Default::default()
        };
        let out = Saturation.apply(buf, &adj).unwrap();
        let px = out.pixel(0, 0);
        assert!(px[0] as i32 - px[2] as i32 > 90);
        // Value channel (max) is untouched by saturation scaling.
        assert_eq!(px[0], 180);
    }

    #[test]
    fn negative_narrows_channel_spread() {
        let buf = PixelBuf::from_pixel(1, 1, [180, 120, 90]);
        let adj = Adjustments {
            saturation: -60.0,
            ..Default::default()
        };
        let out = Saturation.apply(buf, &adj).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] as i32 - px[2] as i32) < 90);
    }

    #[test]
    fn saturation_clamps_at_full() {
        // Already fully saturated red cannot go further.
        let buf = PixelBuf::from_pixel(1, 1, [255, 0, 0]);
        let adj = Adjustments {
            saturation: 100.0,
            ..Default::default()
        };
        let out = Saturation.apply(buf, &adj).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 0, 0]);
    }
}
