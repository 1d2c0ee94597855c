//! Stylistic effects: vignette, edge, pixelate, glitch.

use tracing::warn;

use crate::color::gray_plane;
use crate::effects::schema::{ParamRole, ParamSchema, ParamSet, ParamSpec};
use crate::effects::{EffectCategory, EffectDef, EffectOutput};
use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;
use crate::raster;

const VIGNETTE_SCHEMA: ParamSchema = ParamSchema(&[ParamSpec {
    name: "intensity",
    label: "Intensity",
    default: 0.5,
    min: 0.1,
    max: 1.0,
    step: 0.01,
    role: ParamRole::Amount,
}]);

pub(super) fn vignette() -> EffectDef {
    EffectDef {
        id: "vignette",
        label: "Vignette",
        category: EffectCategory::Stylistic,
        schema: VIGNETTE_SCHEMA,
        transform: apply_vignette,
    }
}

const EDGE_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "threshold",
        label: "Sensitivity",
        default: 40.0,
        min: 10.0,
        max: 150.0,
        step: 1.0,
        role: ParamRole::Amount,
    },
    ParamSpec {
        name: "mode",
        label: "Color Mode",
        default: 0.0,
        min: 0.0,
        max: 3.0,
        step: 1.0,
        role: ParamRole::Mode,
    },
]);

pub(super) fn edge() -> EffectDef {
    EffectDef {
        id: "edge",
        label: "Edge Detection",
        category: EffectCategory::Stylistic,
        schema: EDGE_SCHEMA,
        transform: apply_edge,
    }
}

const PIXELATE_SCHEMA: ParamSchema = ParamSchema(&[ParamSpec {
    name: "block_size",
    label: "Pixel Size",
    default: 10.0,
    min: 2.0,
    max: 30.0,
    step: 1.0,
    role: ParamRole::Size,
}]);

pub(super) fn pixelate() -> EffectDef {
    EffectDef {
        id: "pixelate",
        label: "Pixelate",
        category: EffectCategory::Stylistic,
        schema: PIXELATE_SCHEMA,
        transform: apply_pixelate,
    }
}

const GLITCH_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "intensity",
        label: "Intensity",
        default: 0.5,
        min: 0.1,
        max: 1.0,
        step: 0.01,
        role: ParamRole::Amount,
    },
    ParamSpec {
        name: "seed",
        label: "Variation",
        default: 42.0,
        min: 0.0,
        max: 100.0,
        step: 1.0,
        role: ParamRole::Seed,
    },
]);

pub(super) fn glitch() -> EffectDef {
    EffectDef {
        id: "glitch",
        label: "Glitch",
        category: EffectCategory::Stylistic,
        schema: GLITCH_SCHEMA,
        transform: apply_glitch,
    }
}

/// Radial darkening mask over normalized [-1, 1] coordinates.
fn apply_vignette(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let intensity = params.get("intensity");
    let xs = normalized_axis(src.width);
    let ys = normalized_axis(src.height);

    let mut out = src.clone();
    for y in 0..src.height {
        let ny = ys[y as usize];
        for x in 0..src.width {
            let nx = xs[x as usize];
            let radius = (nx * nx + ny * ny).sqrt();
            let mask = 1.0 - (radius * intensity * 1.5).clamp(0.0, 1.0);
            let o = out.offset(x, y);
            for ch in 0..3 {
                out.data[o + ch] = (out.data[o + ch] as f32 * mask) as u8;
            }
        }
    }
    Ok(EffectOutput::full(out))
}

/// Evenly spaced samples across [-1, 1]; a single-sample axis sits at
/// the left end, matching linspace semantics.
fn normalized_axis(n: u32) -> Vec<f32> {
    if n == 1 {
        return vec![-1.0];
    }
    (0..n)
        .map(|i| -1.0 + 2.0 * i as f32 / (n - 1) as f32)
        .collect()
}

/// Gradient edges rendered in one of four color modes.
fn apply_edge(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let threshold = params.get("threshold");
    let mode = params.get_i32("mode");
    let gray = gray_plane(src);

    match staged_edges(&gray, src.width, src.height, threshold) {
        Ok(mask) => Ok(EffectOutput::full(render_mask(src, &mask, mode))),
        Err(err) => {
            warn!(%err, "edge extraction failed, falling back to plain threshold pass");
            let mask = raster::edge_mask(&gray, src.width, src.height, 100.0, 200.0);
            Ok(EffectOutput::degraded(render_mask(src, &mask, 0)))
        }
    }
}

fn staged_edges(
    gray: &[u8],
    width: u32,
    height: u32,
    threshold: f32,
) -> Result<Vec<u8>, EffectError> {
    let blurred = raster::blur_plane(gray, width, height, 5)?;
    Ok(raster::edge_mask(
        &blurred,
        width,
        height,
        threshold,
        threshold * 2.0,
    ))
}

fn render_mask(src: &PixelBuf, mask: &[u8], mode: i32) -> PixelBuf {
    let mut out = PixelBuf::new(src.width, src.height);
    match mode {
        // Black edges on a white canvas.
        1 => {
            out.data.fill(255);
            for (i, &m) in mask.iter().enumerate() {
                if m != 0 {
                    out.data[i * 3..i * 3 + 3].fill(0);
                }
            }
        }
        // Original colors where edges fire, black elsewhere.
        2 => {
            for (i, &m) in mask.iter().enumerate() {
                if m != 0 {
                    out.data[i * 3..i * 3 + 3].copy_from_slice(&src.data[i * 3..i * 3 + 3]);
                }
            }
        }
        // Solid accent edges on black.
        3 => {
            for (i, &m) in mask.iter().enumerate() {
                if m != 0 {
                    out.data[i * 3..i * 3 + 3].copy_from_slice(&[255, 255, 0]);
                }
            }
        }
        // White edges on black.
        _ => {
            for (i, &m) in mask.iter().enumerate() {
                if m != 0 {
                    out.data[i * 3..i * 3 + 3].fill(255);
                }
            }
        }
    }
    out
}

/// Downsample then nearest-neighbor upsample back to the original
/// size; the up-step produces the visible blocks.
fn apply_pixelate(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let block = params.get_u32("block_size").max(2);
    let small_w = (src.width / block).max(1);
    let small_h = (src.height / block).max(1);

    let small = raster::resize_bilinear(src, small_w, small_h);
    Ok(EffectOutput::full(raster::resize_nearest(
        &small, src.width, src.height,
    )))
}

/// Deterministic linear congruential generator. A fresh instance is
/// built from the seed parameter on every invocation so repeat calls
/// can never interfere with each other.
struct Lcg(u32);

impl Lcg {
    fn new(seed: u32) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.0
    }

    /// Uniform integer in [lo, hi]; collapses to `lo` on empty ranges.
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as u32;
        lo + (self.next_u32() % span) as i32
    }

    /// Uniform float in [0, 1).
    fn unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Digital corruption: channel shifts, block copy-shifts, and sparse
/// color noise, all driven by the seeded generator.
fn apply_glitch(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let intensity = params.get("intensity");
    let mut rng = Lcg::new(params.get_u32("seed"));

    let w = src.width as i32;
    let h = src.height as i32;
    let mut out = src.clone();
    let num_glitches = (10.0 * intensity) as i32;

    // Pass 1: shift single channels horizontally and vertically.
    let max_dx = (w as f32 * 0.05 * intensity) as i32;
    let max_dy = (h as f32 * 0.05 * intensity) as i32;
    for _ in 0..num_glitches / 2 {
        let ch = rng.range(0, 2) as usize;
        let shift_x = rng.range(-max_dx, max_dx);
        let shift_y = rng.range(-max_dy, max_dy);
        shift_channel_x(&mut out, ch, shift_x);
        shift_channel_y(&mut out, ch, shift_y);
    }

    // Pass 2: copy rectangular blocks sideways. Skipped outright on
    // images too small to host a block.
    if w > 50 && h > 20 {
        for _ in 0..num_glitches {
            let x1 = rng.range(0, w - 50);
            let y1 = rng.range(0, h - 20);
            let h_block = rng.range(1, (h as f32 * 0.1 * intensity) as i32);
            let w_block = rng.range((w as f32 * 0.05) as i32, (w as f32 * 0.3) as i32);
            let shift = rng.range((5.0 * intensity) as i32, (40.0 * intensity) as i32);

            if x1 + w_block < w && y1 + h_block < h && x1 + w_block + shift < w {
                for yy in y1..y1 + h_block {
                    for xx in 0..w_block {
                        let from = src.offset((x1 + xx) as u32, yy as u32);
                        let to = out.offset((x1 + shift + xx) as u32, yy as u32);
                        for ch in 0..3 {
                            out.data[to + ch] = src.data[from + ch];
                        }
                    }
                }
            }
        }
    }

    // Pass 3: sparse random-color noise behind a Bernoulli mask.
    if rng.unit() < intensity * 0.8 {
        let density = intensity * 0.1;
        for px in out.data.chunks_exact_mut(3) {
            if rng.unit() < density {
                px[0] = (rng.next_u32() % 255) as u8;
                px[1] = (rng.next_u32() % 255) as u8;
                px[2] = (rng.next_u32() % 255) as u8;
            }
        }
    }

    Ok(EffectOutput::full(out))
}

fn shift_channel_x(buf: &mut PixelBuf, ch: usize, shift: i32) {
    if shift == 0 {
        return;
    }
    let w = buf.width as i32;
    for y in 0..buf.height {
        let row: Vec<u8> = (0..buf.width)
            .map(|x| buf.data[buf.offset(x, y) + ch])
            .collect();
        if shift > 0 {
            for x in shift..w {
                let o = buf.offset(x as u32, y) + ch;
                buf.data[o] = row[(x - shift) as usize];
            }
        } else {
            let s = -shift;
            for x in 0..w - s {
                let o = buf.offset(x as u32, y) + ch;
                buf.data[o] = row[(x + s) as usize];
            }
        }
    }
}

fn shift_channel_y(buf: &mut PixelBuf, ch: usize, shift: i32) {
    if shift == 0 {
        return;
    }
    let h = buf.height as i32;
    for x in 0..buf.width {
        let col: Vec<u8> = (0..buf.height)
            .map(|y| buf.data[buf.offset(x, y) + ch])
            .collect();
        if shift > 0 {
            for y in shift..h {
                let o = buf.offset(x, y as u32) + ch;
                buf.data[o] = col[(y - shift) as usize];
            }
        } else {
            let s = -shift;
            for y in 0..h - s {
                let o = buf.offset(x, y as u32) + ch;
                buf.data[o] = col[(y + s) as usize];
            }
        }
    }
}
