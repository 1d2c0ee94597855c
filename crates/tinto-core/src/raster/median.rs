use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;
use crate::raster::reflect;

/// Per-channel median filter with an odd square window.
pub fn median(src: &PixelBuf, ksize: u32) -> Result<PixelBuf, EffectError> {
    let data = median_channels(&src.data, src.width, src.height, 3, ksize)?;
    Ok(PixelBuf {
        width: src.width,
        height: src.height,
        data,
    })
}

/// [`median`] over a single-channel plane.
pub fn median_plane(
    plane: &[u8],
    width: u32,
    height: u32,
    ksize: u32,
) -> Result<Vec<u8>, EffectError> {
    median_channels(plane, width, height, 1, ksize)
}

fn median_channels(
    data: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    ksize: u32,
) -> Result<Vec<u8>, EffectError> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(EffectError::BadKernel { size: ksize });
    }
    if ksize == 1 || data.is_empty() {
        return Ok(data.to_vec());
    }

    let w = width as i64;
    let h = height as i64;
    let c = channels as i64;
    let half = (ksize / 2) as i64;
    let mut out = vec![0u8; data.len()];
    let mut window = Vec::with_capacity((ksize * ksize) as usize);

    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                window.clear();
                for ky in -half..=half {
                    let sy = reflect(y + ky, h) as i64;
                    for kx in -half..=half {
                        let sx = reflect(x + kx, w) as i64;
                        window.push(data[((sy * w + sx) * c + ch) as usize]);
                    }
                }
                window.sort_unstable();
                out[((y * w + x) * c + ch) as usize] = window[window.len() / 2];
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_kernel_is_rejected() {
        let src = PixelBuf::from_pixel(3, 3, [1, 2, 3]);
        assert!(matches!(
            median(&src, 4),
            Err(EffectError::BadKernel { size: 4 })
        ));
    }

    #[test]
    fn uniform_image_is_invariant() {
        let src = PixelBuf::from_pixel(4, 4, [10, 20, 30]);
        let out = median(&src, 3).unwrap();
        assert_eq!(out.data, src.data);
    }

    #[test]
    fn removes_salt_noise() {
        let mut src = PixelBuf::from_pixel(5, 5, [50, 50, 50]);
        let center = src.offset(2, 2);
        src.data[center] = 255;
        let out = median(&src, 3).unwrap();
        assert_eq!(out.data[center], 50);
    }

    #[test]
    fn plane_median_sorted_window() {
        // 3x1 plane: median of each reflected window is the middle value.
        let plane = vec![0u8, 100, 200];
        let out = median_plane(&plane, 3, 1, 3).unwrap();
        assert_eq!(out, vec![100, 100, 100]);
    }

    #[test]
    fn size_one_is_a_copy() {
        let src = PixelBuf::from_data(2, 2, (0..12).collect()).unwrap();
        let out = median(&src, 1).unwrap();
        assert_eq!(out.data, src.data);
    }
}
