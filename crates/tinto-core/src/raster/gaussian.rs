use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;
use crate::raster::{reflect, saturate};

/// Bump an even kernel size up to the next odd integer.
#[inline]
pub fn force_odd(ksize: u32) -> u32 {
    if ksize % 2 == 0 { ksize + 1 } else { ksize }
}

/// Normalized 1-D Gaussian weights for a kernel of the given odd size,
/// with sigma derived from the size the way the classic filters do:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
fn weights(ksize: u32) -> Vec<f32> {
    let sigma = (0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8).max(0.1);
    let half = (ksize / 2) as i64;
    let mut w: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = w.iter().sum();
    for v in &mut w {
        *v /= sum;
    }
    w
}

/// Separable Gaussian blur over an interleaved buffer.
///
/// Even sizes are forced odd; size 1 (or a single-pixel image) is a
/// copy. Borders use reflect-101.
pub fn blur(src: &PixelBuf, ksize: u32) -> Result<PixelBuf, EffectError> {
    let data = blur_channels(&src.data, src.width, src.height, 3, ksize)?;
    Ok(PixelBuf {
        width: src.width,
        height: src.height,
        data,
    })
}

/// [`blur`] over a single-channel plane.
pub fn blur_plane(
    plane: &[u8],
    width: u32,
    height: u32,
    ksize: u32,
) -> Result<Vec<u8>, EffectError> {
    blur_channels(plane, width, height, 1, ksize)
}

fn blur_channels(
    data: &[u8],
    width: u32,
    height: u32,
    channels: u32,
    ksize: u32,
) -> Result<Vec<u8>, EffectError> {
    if ksize == 0 {
        return Err(EffectError::BadKernel { size: ksize });
    }
    let ksize = force_odd(ksize);
    if ksize == 1 || data.is_empty() {
        return Ok(data.to_vec());
    }

    let w = width as i64;
    let h = height as i64;
    let c = channels as i64;
    let half = (ksize / 2) as i64;
    let weights = weights(ksize);

    // Horizontal pass into f32, then vertical pass back to u8.
    let mut tmp = vec![0.0f32; data.len()];
    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                let mut acc = 0.0;
                for (k, weight) in weights.iter().enumerate() {
                    let sx = reflect(x + k as i64 - half, w) as i64;
                    acc += weight * data[((y * w + sx) * c + ch) as usize] as f32;
                }
                tmp[((y * w + x) * c + ch) as usize] = acc;
            }
        }
    }

    let mut out = vec![0u8; data.len()];
    for y in 0..h {
        for x in 0..w {
            for ch in 0..c {
                let mut acc = 0.0;
                for (k, weight) in weights.iter().enumerate() {
                    let sy = reflect(y + k as i64 - half, h) as i64;
                    acc += weight * tmp[((sy * w + x) * c + ch) as usize];
                }
                out[((y * w + x) * c + ch) as usize] = saturate(acc);
            }
        }
    }

    Ok(out)
}
