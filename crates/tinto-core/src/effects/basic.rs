//! Basic effects: grayscale, negative, posterize.

use crate::color::luma;
use crate::effects::schema::{ParamRole, ParamSchema, ParamSet, ParamSpec};
use crate::effects::{EffectCategory, EffectDef, EffectOutput};
use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;

pub(super) fn grayscale() -> EffectDef {
    EffectDef {
        id: "grayscale",
        label: "Grayscale",
        category: EffectCategory::Basic,
        schema: ParamSchema::EMPTY,
        transform: apply_grayscale,
    }
}

pub(super) fn negative() -> EffectDef {
    EffectDef {
        id: "negative",
        label: "Negative",
        category: EffectCategory::Basic,
        schema: ParamSchema::EMPTY,
        transform: apply_negative,
    }
}

const POSTERIZE_SCHEMA: ParamSchema = ParamSchema(&[ParamSpec {
    name: "levels",
    label: "Color Levels",
    default: 4.0,
    min: 2.0,
    max: 8.0,
    step: 1.0,
    role: ParamRole::Levels,
}]);

pub(super) fn posterize() -> EffectDef {
    EffectDef {
        id: "posterize",
        label: "Posterize",
        category: EffectCategory::Basic,
        schema: POSTERIZE_SCHEMA,
        transform: apply_posterize,
    }
}

/// Luminance conversion broadcast back to three identical channels.
fn apply_grayscale(src: &PixelBuf, _params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let mut out = src.clone();
    for px in out.data.chunks_exact_mut(3) {
        let y = luma(px[0], px[1], px[2]);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
    Ok(EffectOutput::full(out))
}

/// Per-channel inversion; the closed range needs no clamping.
fn apply_negative(src: &PixelBuf, _params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let mut out = src.clone();
    for v in &mut out.data {
        *v = 255 - *v;
    }
    Ok(EffectOutput::full(out))
}

/// Quantize every channel onto `levels` evenly spaced values.
fn apply_posterize(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let levels = params.get("levels").max(2.0);
    let step = 255.0 / (levels - 1.0);

    let mut out = src.clone();
    for v in &mut out.data {
        let quantized = (*v as f32 / step).round() * step;
        *v = quantized.clamp(0.0, 255.0) as u8;
    }
    Ok(EffectOutput::full(out))
}
