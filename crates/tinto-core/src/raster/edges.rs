use crate::error::EffectError;
use crate::raster::{blur_plane, force_odd, reflect};

/// L1 Sobel gradient magnitude of a luma plane.
pub fn sobel_magnitude(plane: &[u8], width: u32, height: u32) -> Vec<f32> {
    const GX: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
    const GY: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

    let w = width as i64;
    let h = height as i64;
    let mut out = vec![0.0f32; plane.len()];

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for ky in 0..3i64 {
                let sy = reflect(y + ky - 1, h) as i64;
                for kx in 0..3i64 {
                    let sx = reflect(x + kx - 1, w) as i64;
                    let v = plane[(sy * w + sx) as usize] as f32;
                    gx += GX[(ky * 3 + kx) as usize] * v;
                    gy += GY[(ky * 3 + kx) as usize] * v;
                }
            }
            out[(y * w + x) as usize] = gx.abs() + gy.abs();
        }
    }

    out
}

/// Binary edge mask (0/255) by gradient-magnitude thresholding with
/// hysteresis: pixels at or above `high` seed edges, pixels at or
/// above `low` join when 8-connected to a seed.
pub fn edge_mask(plane: &[u8], width: u32, height: u32, low: f32, high: f32) -> Vec<u8> {
    let mag = sobel_magnitude(plane, width, height);
    let w = width as i64;
    let h = height as i64;
    let mut mask = vec![0u8; plane.len()];

    let mut stack: Vec<(i64, i64)> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if mag[(y * w + x) as usize] >= high {
                mask[(y * w + x) as usize] = 255;
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let i = (ny * w + nx) as usize;
                if mask[i] == 0 && mag[i] >= low {
                    mask[i] = 255;
                    stack.push((nx, ny));
                }
            }
        }
    }

    mask
}

/// Grow a binary mask by a square structuring element of the given
/// side length.
pub fn dilate(mask: &[u8], width: u32, height: u32, ksize: u32) -> Vec<u8> {
    let w = width as i64;
    let h = height as i64;
    let half = (ksize.max(1) / 2) as i64;
    let reach = ksize.max(1) as i64 - 1 - half;
    let mut out = vec![0u8; mask.len()];

    for y in 0..h {
        for x in 0..w {
            'scan: for dy in -half..=reach {
                for dx in -half..=reach {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    if mask[(ny * w + nx) as usize] != 0 {
                        out[(y * w + x) as usize] = 255;
                        break 'scan;
                    }
                }
            }
        }
    }

    out
}

/// Binary threshold against the local box mean minus `c`:
/// `out = 255 if px > mean(block) - c else 0`.
pub fn adaptive_threshold_mean(
    plane: &[u8],
    width: u32,
    height: u32,
    block: u32,
    c: f32,
) -> Result<Vec<u8>, EffectError> {
    if block < 3 {
        return Err(EffectError::BadKernel { size: block });
    }
    let block = force_odd(block);
    let surface = box_mean(plane, width, height, block);
    Ok(threshold_against(plane, &surface, c))
}

/// Binary threshold against a Gaussian-weighted local mean minus `c`.
pub fn adaptive_threshold_gaussian(
    plane: &[u8],
    width: u32,
    height: u32,
    block: u32,
    c: f32,
) -> Result<Vec<u8>, EffectError> {
    if block < 3 {
        return Err(EffectError::BadKernel { size: block });
    }
    let block = force_odd(block);
    let surface: Vec<f32> = blur_plane(plane, width, height, block)?
        .into_iter()
        .map(|v| v as f32)
        .collect();
    Ok(threshold_against(plane, &surface, c))
}

fn threshold_against(plane: &[u8], surface: &[f32], c: f32) -> Vec<u8> {
    plane
        .iter()
        .zip(surface.iter())
        .map(|(&px, &t)| if px as f32 > t - c { 255 } else { 0 })
        .collect()
}

fn box_mean(plane: &[u8], width: u32, height: u32, ksize: u32) -> Vec<f32> {
    let w = width as i64;
    let h = height as i64;
    let half = (ksize / 2) as i64;
    let count = (ksize * ksize) as f32;
    let mut out = vec![0.0f32; plane.len()];

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            for dy in -half..=half {
                let sy = reflect(y + dy, h) as i64;
                for dx in -half..=half {
                    let sx = reflect(x + dx, w) as i64;
                    sum += plane[(sy * w + sx) as usize] as f32;
                }
            }
            out[(y * w + x) as usize] = sum / count;
        }
    }

    out
}
