use crate::pixel_buf::PixelBuf;
use crate::raster::{reflect, saturate};

/// Correlate a 3x3 kernel over every channel, add `delta`, and
/// saturate to the 8-bit range.
///
/// The kernel is applied as-is (correlation, not convolution) with
/// reflect-101 border handling, row-major: `kernel[ky * 3 + kx]`.
pub fn correlate3(src: &PixelBuf, kernel: &[f32; 9], delta: f32) -> PixelBuf {
    let w = src.width as i64;
    let h = src.height as i64;
    let mut out = PixelBuf::new(src.width, src.height);

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for ky in 0..3i64 {
                let sy = reflect(y + ky - 1, h);
                for kx in 0..3i64 {
                    let sx = reflect(x + kx - 1, w);
                    let weight = kernel[(ky * 3 + kx) as usize];
                    let i = src.offset(sx as u32, sy as u32);
                    acc[0] += weight * src.data[i] as f32;
                    acc[1] += weight * src.data[i + 1] as f32;
                    acc[2] += weight * src.data[i + 2] as f32;
                }
            }
            let o = out.offset(x as u32, y as u32);
            out.data[o] = saturate(acc[0] + delta);
            out.data[o + 1] = saturate(acc[1] + delta);
            out.data[o + 2] = saturate(acc[2] + delta);
        }
    }

    out
}
