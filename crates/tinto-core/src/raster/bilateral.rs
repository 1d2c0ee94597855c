use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;
use crate::raster::{reflect, saturate};

/// Edge-preserving bilateral filter.
///
/// `d` is the pixel neighborhood diameter; `sigma_color` weighs
/// radiometric distance (Euclidean over RGB), `sigma_space` geometric
/// distance. Smooth regions get averaged while strong edges survive.
pub fn bilateral(
    src: &PixelBuf,
    d: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> Result<PixelBuf, EffectError> {
    if d == 0 {
        return Err(EffectError::BadKernel { size: d });
    }
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }

    let sigma_color = sigma_color.max(1.0);
    let sigma_space = sigma_space.max(1.0);
    let radius = (d / 2).max(1) as i64;
    let w = src.width as i64;
    let h = src.height as i64;

    // Geometric weights depend only on the offset; precompute once.
    let side = (2 * radius + 1) as usize;
    let mut space = vec![0.0f32; side * side];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist2 = (dy * dy + dx * dx) as f32;
            space[((dy + radius) as usize) * side + (dx + radius) as usize] =
                (-dist2 / (2.0 * sigma_space * sigma_space)).exp();
        }
    }

    let mut out = PixelBuf::new(src.width, src.height);
    let inv_color = -1.0 / (2.0 * sigma_color * sigma_color);

    for y in 0..h {
        for x in 0..w {
            let center = src.pixel(x as u32, y as u32);
            let mut acc = [0.0f32; 3];
            let mut norm = 0.0f32;

            for dy in -radius..=radius {
                let sy = reflect(y + dy, h);
                for dx in -radius..=radius {
                    let sx = reflect(x + dx, w);
                    let px = src.pixel(sx as u32, sy as u32);

                    let dr = px[0] as f32 - center[0] as f32;
                    let dg = px[1] as f32 - center[1] as f32;
                    let db = px[2] as f32 - center[2] as f32;
                    let color_w = ((dr * dr + dg * dg + db * db) * inv_color).exp();
                    let weight = color_w
                        * space[((dy + radius) as usize) * side + (dx + radius) as usize];

                    acc[0] += weight * px[0] as f32;
                    acc[1] += weight * px[1] as f32;
                    acc[2] += weight * px[2] as f32;
                    norm += weight;
                }
            }

            let o = out.offset(x as u32, y as u32);
            out.data[o] = saturate(acc[0] / norm);
            out.data[o + 1] = saturate(acc[1] / norm);
            out.data[o + 2] = saturate(acc[2] / norm);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_diameter_is_rejected() {
        let src = PixelBuf::from_pixel(3, 3, [5, 5, 5]);
        assert!(matches!(
            bilateral(&src, 0, 75.0, 75.0),
            Err(EffectError::BadKernel { size: 0 })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let src = PixelBuf::new(0, 0);
        assert!(matches!(
            bilateral(&src, 9, 75.0, 75.0),
            Err(EffectError::EmptyInput)
        ));
    }

    #[test]
    fn uniform_image_is_invariant() {
        let src = PixelBuf::from_pixel(6, 6, [120, 60, 30]);
        let out = bilateral(&src, 9, 75.0, 75.0).unwrap();
        assert_eq!(out.data, src.data);
    }

    #[test]
    fn smooths_small_variation() {
        let mut src = PixelBuf::from_pixel(5, 5, [100, 100, 100]);
        let center = src.offset(2, 2);
        src.data[center] = 110;
        let out = bilateral(&src, 5, 75.0, 75.0).unwrap();
        assert!(out.data[center] < 110);
    }

    #[test]
    fn preserves_a_hard_edge() {
        // Left half black, right half white; a strong edge should
        // survive nearly untouched.
        let mut src = PixelBuf::new(8, 4);
        for y in 0..4 {
            for x in 4..8 {
                let o = src.offset(x, y);
                src.data[o] = 255;
                src.data[o + 1] = 255;
                src.data[o + 2] = 255;
            }
        }
        let out = bilateral(&src, 5, 30.0, 30.0).unwrap();
        assert!(out.pixel(0, 1)[0] < 30);
        assert!(out.pixel(7, 1)[0] > 225);
    }
}
