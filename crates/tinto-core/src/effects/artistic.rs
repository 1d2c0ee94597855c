//! Painterly effects: cartoon, watercolor, oilpaint, emboss, hdr.
//!
//! These are composite transforms built from the raster kernels. Each
//! one catches internal failures and substitutes a documented simpler
//! fallback instead of propagating, flagging the output as degraded.

use tracing::warn;

use crate::color::{gray_plane, scale_saturation};
use crate::effects::schema::{ParamRole, ParamSchema, ParamSet, ParamSpec};
use crate::effects::{EffectCategory, EffectDef, EffectOutput};
use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;
use crate::raster;

const CARTOON_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "strength",
        label: "Strength",
        default: 7.0,
        min: 3.0,
        max: 15.0,
        step: 1.0,
        role: ParamRole::Amount,
    },
    ParamSpec {
        name: "style",
        label: "Style",
        default: 0.0,
        min: 0.0,
        max: 2.0,
        step: 1.0,
        role: ParamRole::Mode,
    },
]);

pub(super) fn cartoon() -> EffectDef {
    EffectDef {
        id: "cartoon",
        label: "Cartoon",
        category: EffectCategory::Artistic,
        schema: CARTOON_SCHEMA,
        transform: apply_cartoon,
    }
}

const WATERCOLOR_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "strength",
        label: "Strength",
        default: 50.0,
        min: 10.0,
        max: 500.0,
        step: 1.0,
        role: ParamRole::Amount,
    },
    ParamSpec {
        name: "saturation",
        label: "Saturation",
        default: 1.2,
        min: 0.8,
        max: 2.0,
        step: 0.05,
        role: ParamRole::Amount,
    },
]);

pub(super) fn watercolor() -> EffectDef {
    EffectDef {
        id: "watercolor",
        label: "Watercolor",
        category: EffectCategory::Artistic,
        schema: WATERCOLOR_SCHEMA,
        transform: apply_watercolor,
    }
}

const OILPAINT_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "radius",
        label: "Brush Size",
        default: 4.0,
        min: 1.0,
        max: 10.0,
        step: 1.0,
        role: ParamRole::Size,
    },
    ParamSpec {
        name: "intensity",
        label: "Intensity",
        default: 5.0,
        min: 1.0,
        max: 20.0,
        step: 1.0,
        role: ParamRole::Amount,
    },
]);

pub(super) fn oilpaint() -> EffectDef {
    EffectDef {
        id: "oilpaint",
        label: "Oil Paint",
        category: EffectCategory::Artistic,
        schema: OILPAINT_SCHEMA,
        transform: apply_oilpaint,
    }
}

pub(super) fn emboss() -> EffectDef {
    EffectDef {
        id: "emboss",
        label: "Emboss",
        category: EffectCategory::Artistic,
        schema: ParamSchema::EMPTY,
        transform: apply_emboss,
    }
}

const HDR_SCHEMA: ParamSchema = ParamSchema(&[
    ParamSpec {
        name: "strength",
        label: "Strength",
        default: 0.5,
        min: 0.1,
        max: 1.0,
        step: 0.01,
        role: ParamRole::Amount,
    },
    ParamSpec {
        name: "saturation",
        label: "Saturation",
        default: 0.5,
        min: 0.0,
        max: 1.0,
        step: 0.01,
        role: ParamRole::Amount,
    },
]);

pub(super) fn hdr() -> EffectDef {
    EffectDef {
        id: "hdr",
        label: "HDR",
        category: EffectCategory::Advanced,
        schema: HDR_SCHEMA,
        transform: apply_hdr,
    }
}

/// Directional relief kernel, offset into the mid-gray range.
fn apply_emboss(src: &PixelBuf, _params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    const KERNEL: [f32; 9] = [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0];
    Ok(EffectOutput::full(raster::correlate3(src, &KERNEL, 128.0)))
}

fn apply_cartoon(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let strength = raster::force_odd(params.get_u32("strength"));
    let style = params.get_i32("style");

    let styled = match style {
        0 => cartoon_standard(src, strength),
        1 => cartoon_simplified(src, strength),
        _ => cartoon_sketchy(src),
    };

    match styled {
        Ok(buffer) => Ok(EffectOutput::full(buffer)),
        Err(err) => {
            warn!(%err, style, "cartoon pipeline failed, using simple combine");
            Ok(EffectOutput::degraded(simple_cartoon(src)?))
        }
    }
}

/// Standard look: smoothed color masked by mean-threshold line work.
fn cartoon_standard(src: &PixelBuf, strength: u32) -> Result<PixelBuf, EffectError> {
    let color = raster::bilateral(src, 9, strength as f32 * 10.0, strength as f32)?;
    let gray = gray_plane(src);
    let gray = raster::median_plane(&gray, src.width, src.height, 5)?;
    let lines = raster::adaptive_threshold_mean(&gray, src.width, src.height, strength, 3.0)?;
    Ok(mask_combine(&color, &lines))
}

/// Flatter comic look: heavier smoothing, Gaussian-threshold lines,
/// saturation pushed ~1.4x.
fn cartoon_simplified(src: &PixelBuf, strength: u32) -> Result<PixelBuf, EffectError> {
    let color = raster::bilateral(src, 9, strength as f32 * 10.0, 15.0)?;
    let color = raster::bilateral(&color, 9, strength as f32 * 10.0, 15.0)?;

    let gray = gray_plane(src);
    let gray = raster::median_plane(&gray, src.width, src.height, strength)?;
    let lines = raster::adaptive_threshold_gaussian(
        &gray,
        src.width,
        src.height,
        strength * 2 + 1,
        strength as f32,
    )?;

    let combined = mask_combine(&color, &lines);
    Ok(scale_saturation(&combined, 1.4))
}

/// Sketchy look: detail-enhanced color blended with a divide-based
/// pencil layer.
fn cartoon_sketchy(src: &PixelBuf) -> Result<PixelBuf, EffectError> {
    let color = detail_enhance(src, 10.0, 0.15)?;

    let gray = gray_plane(src);
    let blurred = raster::blur_plane(&gray, src.width, src.height, 19)?;
    let sketch: Vec<u8> = gray
        .iter()
        .zip(blurred.iter())
        .map(|(&g, &b)| {
            if b == 0 {
                0
            } else {
                ((g as f32 * 256.0 / b as f32).min(255.0)) as u8
            }
        })
        .collect();

    let mut out = PixelBuf::new(src.width, src.height);
    for (i, &s) in sketch.iter().enumerate() {
        for ch in 0..3 {
            let c = color.data[i * 3 + ch] as f32;
            out.data[i * 3 + ch] = (c * 0.7 + s as f32 * 0.3).clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// Fallback cartoon: one bilateral pass plus mean-threshold lines.
fn simple_cartoon(src: &PixelBuf) -> Result<PixelBuf, EffectError> {
    let color = raster::bilateral(src, 9, 250.0, 250.0)?;
    let gray = gray_plane(src);
    let lines = raster::adaptive_threshold_mean(&gray, src.width, src.height, 9, 9.0)?;
    Ok(mask_combine(&color, &lines))
}

fn apply_watercolor(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let strength = params.get("strength");
    let saturation = params.get("saturation");

    // Median kernel derived from strength, capped and forced odd.
    let mut ksize = ((strength / 10.0) as u32) * 2 + 1;
    ksize = ksize.min(15);
    if ksize % 2 == 0 {
        ksize -= 1;
    }

    match watercolor_inner(src, ksize, saturation) {
        Ok(buffer) => Ok(EffectOutput::full(buffer)),
        Err(err) => {
            warn!(%err, "watercolor pipeline failed, returning input unchanged");
            Ok(EffectOutput::degraded(src.clone()))
        }
    }
}

fn watercolor_inner(
    src: &PixelBuf,
    ksize: u32,
    saturation: f32,
) -> Result<PixelBuf, EffectError> {
    let smoothed = raster::bilateral(src, 9, 75.0, 75.0)?;
    let washed = raster::median(&smoothed, ksize)?;

    let gray = gray_plane(&washed);
    let edges = raster::edge_mask(&gray, src.width, src.height, 50.0, 150.0);
    let edges = raster::dilate(&edges, src.width, src.height, 2);

    let mut out = scale_saturation(&washed, saturation);
    for (i, &e) in edges.iter().enumerate() {
        for ch in 0..3 {
            out.data[i * 3 + ch] = out.data[i * 3 + ch].saturating_sub(e);
        }
    }
    Ok(out)
}

fn apply_oilpaint(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let radius = params.get_u32("radius").max(1);
    let intensity = params.get_u32("intensity").max(1);

    match oilpaint_inner(src, radius, intensity) {
        Ok(buffer) => Ok(EffectOutput::full(buffer)),
        Err(err) => {
            warn!(%err, "oilpaint pipeline failed, using plain bilateral smoothing");
            Ok(EffectOutput::degraded(raster::bilateral(
                src, 9, 75.0, 75.0,
            )?))
        }
    }
}

fn oilpaint_inner(src: &PixelBuf, radius: u32, intensity: u32) -> Result<PixelBuf, EffectError> {
    let smoothed = raster::bilateral(
        src,
        radius * 2 + 1,
        intensity as f32 * 10.0,
        intensity as f32 * 5.0,
    )?;
    let texture = raster::median(&smoothed, radius * 2 + 1)?;

    const SHARPEN: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0];
    let strokes = raster::correlate3(&texture, &SHARPEN, 0.0);

    Ok(scale_saturation(&strokes, 1.3))
}

fn apply_hdr(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let strength = params.get("strength");
    let saturation = params.get("saturation");

    match hdr_inner(src, strength, saturation) {
        Ok(buffer) => Ok(EffectOutput::full(buffer)),
        Err(err) => {
            warn!(%err, "hdr pipeline failed, using plain detail enhancement");
            Ok(EffectOutput::degraded(detail_enhance(src, 10.0, 0.15)?))
        }
    }
}

fn hdr_inner(src: &PixelBuf, strength: f32, saturation: f32) -> Result<PixelBuf, EffectError> {
    // Blend under- and over-exposed variants; highlights compress
    // where the overexposed copy clips.
    let mut base = src.clone();
    for v in &mut base.data {
        let under = *v as f32 * 0.7;
        let over = (*v as f32 * 1.3).min(255.0);
        *v = ((under + over) * 0.5).clamp(0.0, 255.0) as u8;
    }

    let detailed = detail_enhance(&base, strength * 16.0, strength * 0.2)?;
    let toned = tonemap_reinhard(&detailed);
    let local = luminance_unsharp(&toned, 15, 0.5 * strength)?;

    if saturation > 0.0 {
        Ok(scale_saturation(&local, 1.0 + saturation))
    } else {
        Ok(local)
    }
}

/// Unsharp-style detail boost: smooth, then push the residual back in.
fn detail_enhance(src: &PixelBuf, sigma_s: f32, sigma_r: f32) -> Result<PixelBuf, EffectError> {
    let ksize = raster::force_odd((sigma_s as u32).max(3));
    let smooth = raster::blur(src, ksize)?;
    let amount = sigma_r * 10.0;

    let mut out = src.clone();
    for (o, (&s, &b)) in out.data.iter_mut().zip(src.data.iter().zip(smooth.data.iter())) {
        let boosted = s as f32 + (s as f32 - b as f32) * amount;
        *o = boosted.clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

/// Global Reinhard operator applied to luminance, chroma preserved.
fn tonemap_reinhard(src: &PixelBuf) -> PixelBuf {
    const WHITE: f32 = 0.9;
    let mut out = src.clone();
    for px in out.data.chunks_exact_mut(3) {
        let y = (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32) / 255.0;
        if y <= 0.0 {
            continue;
        }
        let yd = y * (1.0 + y / (WHITE * WHITE)) / (1.0 + y);
        let scale = yd / y;
        for ch in 0..3 {
            px[ch] = (px[ch] as f32 * scale).clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Local contrast: unsharp mask on the luminance plane, with the
/// per-pixel gain reapplied to all three channels.
fn luminance_unsharp(src: &PixelBuf, ksize: u32, amount: f32) -> Result<PixelBuf, EffectError> {
    let luma = gray_plane(src);
    let blurred = raster::blur_plane(&luma, src.width, src.height, ksize)?;

    let mut out = src.clone();
    for (i, px) in out.data.chunks_exact_mut(3).enumerate() {
        let l = luma[i] as f32;
        if l <= 0.0 {
            continue;
        }
        let boosted = (l + (l - blurred[i] as f32) * amount).clamp(0.0, 255.0);
        let scale = boosted / l;
        for ch in 0..3 {
            px[ch] = (px[ch] as f32 * scale).clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// Keep color where the line mask is on, black where it is off — the
/// bitwise-AND combine of a binary mask with a color image.
fn mask_combine(color: &PixelBuf, mask: &[u8]) -> PixelBuf {
    let mut out = PixelBuf::new(color.width, color.height);
    for (i, &m) in mask.iter().enumerate() {
        if m != 0 {
            out.data[i * 3..i * 3 + 3].copy_from_slice(&color.data[i * 3..i * 3 + 3]);
        }
    }
    out
}
