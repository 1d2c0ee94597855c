use crate::pixel_buf::PixelBuf;
use crate::raster::saturate;

/// Bilinear resample to the requested dimensions (center-aligned
/// sampling). Dimensions are floored at 1.
pub fn resize_bilinear(src: &PixelBuf, new_w: u32, new_h: u32) -> PixelBuf {
    let new_w = new_w.max(1);
    let new_h = new_h.max(1);
    if new_w == src.width && new_h == src.height {
        return src.clone();
    }

    let scale_x = src.width as f32 / new_w as f32;
    let scale_y = src.height as f32 / new_h as f32;
    let mut out = PixelBuf::new(new_w, new_h);

    for dy in 0..new_h {
        let sy = ((dy as f32 + 0.5) * scale_y - 0.5).max(0.0);
        let y0 = (sy as u32).min(src.height - 1);
        let y1 = (y0 + 1).min(src.height - 1);
        let fy = sy - y0 as f32;

        for dx in 0..new_w {
            let sx = ((dx as f32 + 0.5) * scale_x - 0.5).max(0.0);
            let x0 = (sx as u32).min(src.width - 1);
            let x1 = (x0 + 1).min(src.width - 1);
            let fx = sx - x0 as f32;

            let p00 = src.pixel(x0, y0);
            let p10 = src.pixel(x1, y0);
            let p01 = src.pixel(x0, y1);
            let p11 = src.pixel(x1, y1);

            let o = out.offset(dx, dy);
            for ch in 0..3 {
                let top = p00[ch] as f32 * (1.0 - fx) + p10[ch] as f32 * fx;
                let bottom = p01[ch] as f32 * (1.0 - fx) + p11[ch] as f32 * fx;
                out.data[o + ch] = saturate(top * (1.0 - fy) + bottom * fy);
            }
        }
    }

    out
}

/// Nearest-neighbor resample; hard block boundaries on the up-step.
pub fn resize_nearest(src: &PixelBuf, new_w: u32, new_h: u32) -> PixelBuf {
    let new_w = new_w.max(1);
    let new_h = new_h.max(1);
    let scale_x = src.width as f32 / new_w as f32;
    let scale_y = src.height as f32 / new_h as f32;
    let mut out = PixelBuf::new(new_w, new_h);

    for dy in 0..new_h {
        let sy = ((dy as f32 * scale_y) as u32).min(src.height - 1);
        for dx in 0..new_w {
            let sx = ((dx as f32 * scale_x) as u32).min(src.width - 1);
            let px = src.pixel(sx, sy);
            let o = out.offset(dx, dy);
            out.data[o..o + 3].copy_from_slice(&px);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_same_size_is_copy() {
        let src = PixelBuf::from_data(3, 2, (0..18).collect()).unwrap();
        let out = resize_bilinear(&src, 3, 2);
        assert_eq!(out.data, src.data);
    }

    #[test]
    fn bilinear_downsample_averages() {
        // 2x1 black/white downsampled to 1x1 lands mid-gray.
        let src = PixelBuf::from_data(2, 1, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let out = resize_bilinear(&src, 1, 1);
        let px = out.pixel(0, 0);
        assert!((px[0] as i32 - 128).abs() <= 1, "got {}", px[0]);
    }

    #[test]
    fn bilinear_uniform_stays_uniform() {
        let src = PixelBuf::from_pixel(8, 8, [33, 66, 99]);
        let out = resize_bilinear(&src, 3, 5);
        assert_eq!(out.dimensions(), (3, 5));
        for px in out.data.chunks_exact(3) {
            assert_eq!(px, [33, 66, 99]);
        }
    }

    #[test]
    fn nearest_upsample_makes_blocks() {
        let src = PixelBuf::from_data(2, 1, vec![10, 10, 10, 200, 200, 200]).unwrap();
        let out = resize_nearest(&src, 4, 2);
        assert_eq!(out.pixel(0, 0), [10, 10, 10]);
        assert_eq!(out.pixel(1, 1), [10, 10, 10]);
        assert_eq!(out.pixel(2, 0), [200, 200, 200]);
        assert_eq!(out.pixel(3, 1), [200, 200, 200]);
    }

    #[test]
    fn dimensions_floor_at_one() {
        let src = PixelBuf::from_pixel(4, 4, [1, 2, 3]);
        let out = resize_bilinear(&src, 0, 0);
        assert_eq!(out.dimensions(), (1, 1));
        let out = resize_nearest(&src, 0, 0);
        assert_eq!(out.dimensions(), (1, 1));
    }
}
