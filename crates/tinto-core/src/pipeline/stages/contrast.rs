use anyhow::Result;

use crate::pipeline::module::PipelineStage;
use crate::pixel_buf::{Adjustments, PixelBuf};

pub struct Contrast;

impl PipelineStage for Contrast {
    fn name(&self) -> &str {
        "contrast"
    }

    /// Mean-preserving contrast: per-channel values are scaled away
    /// from (or toward) the per-channel image mean. The positive side
    /// uses a 0.8 gain so +100 stays short of hard posterization.
    fn apply(&self, mut input: PixelBuf, adjustments: &Adjustments) -> Result<PixelBuf> {
        let v = adjustments.contrast;
        if v == 0.0 || input.is_empty() {
            return Ok(input);
        }

        let factor = if v > 0.0 {
            1.0 + 0.8 * (v / 100.0)
        } else {
            1.0 + v / 100.0
        };

        let means = channel_means(&input);
        for px in input.data.chunks_exact_mut(3) {
            for ch in 0..3 {
                let mu = means[ch];
                px[ch] = (mu + factor * (px[ch] as f32 - mu)).clamp(0.0, 255.0) as u8;
            }
        }
        Ok(input)
    }
}

fn channel_means(buf: &PixelBuf) -> [f32; 3] {
    let mut sums = [0u64; 3];
    for px in buf.data.chunks_exact(3) {
        sums[0] += px[0] as u64;
        sums[1] += px[1] as u64;
        sums[2] += px[2] as u64;
    }
    let n = buf.pixel_count() as f32;
    [
        sums[0] as f32 / n,
        sums[1] as f32 / n,
        sums[2] as f32 / n,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_noop() {
        let buf = PixelBuf::from_data(2, 1, vec![10, 20, 30, 200, 210, 220]).unwrap();
        let expected = buf.data.clone();
        let out = Contrast.apply(buf, &Adjustments::default()).unwrap();
        assert_eq!(out.data, expected);
    }

    #[test]
    fn uniform_image_is_a_fixed_point() {
        // Every pixel equals the mean, so scaling around it changes nothing.
        let buf = PixelBuf::from_pixel(3, 3, [90, 120, 150]);
        let adj = Adjustments {
            contrast: 80.0,
            ..Default::default()
        };
        let out = Contrast.apply(buf.clone(), &adj).unwrap();
        assert_eq!(out.data, buf.data);
    }

    #[test]
    fn positive_widens_spread_around_mean() {
        let buf = PixelBuf::from_data(2, 1, vec![100, 100, 100, 200, 200, 200]).unwrap();
        let adj = Adjustments {
            contrast: 50.0,
            ..Default::default()
        };
        // mean = 150, factor = 1.4: 100 -> 80, 200 -> 220.
        let out = Contrast.apply(buf, &adj).unwrap();
        assert_eq!(out.pixel(0, 0), [80, 80, 80]);
        assert_eq!(out.pixel(1, 0), [220, 220, 220]);
    }

    #[test]
    fn negative_pulls_toward_mean() {
        let buf = PixelBuf::from_data(2, 1, vec![100, 100, 100, 200, 200, 200]).unwrap();
        let adj = Adjustments {
            contrast: -50.0,
            ..Default::default()
        };
        // mean = 150, factor = 0.5: 100 -> 125, 200 -> 175.
        let out = Contrast.apply(buf, &adj).unwrap();
        assert_eq!(out.pixel(0, 0), [125, 125, 125]);
        assert_eq!(out.pixel(1, 0), [175, 175, 175]);
    }

    #[test]
    fn minus_hundred_collapses_to_mean() {
        let buf = PixelBuf::from_data(2, 1, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let adj = Adjustments {
            contrast: -100.0,
            ..Default::default()
        };
        let out = Contrast.apply(buf, &adj).unwrap();
        assert_eq!(out.pixel(0, 0), [127, 127, 127]);
        assert_eq!(out.pixel(1, 0), [127, 127, 127]);
    }

    #[test]
    fn output_clamps() {
        let buf = PixelBuf::from_data(2, 1, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let adj = Adjustments {
            contrast: 100.0,
            ..Default::default()
        };
        let out = Contrast.apply(buf, &adj).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [255, 255, 255]);
    }
}
