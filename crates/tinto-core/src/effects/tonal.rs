//! Color-cast effects: sepia, warm, cool.

use crate::effects::schema::{ParamRole, ParamSchema, ParamSet, ParamSpec};
use crate::effects::{EffectCategory, EffectDef, EffectOutput};
use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;

/// Classic sepia channel-mixing matrix, row-major.
const SEPIA: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

const SEPIA_SCHEMA: ParamSchema = ParamSchema(&[ParamSpec {
    name: "intensity",
    label: "Intensity",
    default: 0.7,
    min: 0.0,
    max: 1.0,
    step: 0.01,
    role: ParamRole::Amount,
}]);

pub(super) fn sepia() -> EffectDef {
    EffectDef {
        id: "sepia",
        label: "Sepia",
        category: EffectCategory::Color,
        schema: SEPIA_SCHEMA,
        transform: apply_sepia,
    }
}

const WARM_SCHEMA: ParamSchema = ParamSchema(&[ParamSpec {
    name: "intensity",
    label: "Intensity",
    default: 30.0,
    min: 10.0,
    max: 50.0,
    step: 1.0,
    role: ParamRole::Amount,
}]);

pub(super) fn warm() -> EffectDef {
    EffectDef {
        id: "warm",
        label: "Warm",
        category: EffectCategory::Color,
        schema: WARM_SCHEMA,
        transform: apply_warm,
    }
}

pub(super) fn cool() -> EffectDef {
    EffectDef {
        id: "cool",
        label: "Cool",
        category: EffectCategory::Color,
        schema: WARM_SCHEMA,
        transform: apply_cool,
    }
}

/// Blend between the identity matrix and the sepia mixing matrix, then
/// apply the blended matrix per pixel.
fn apply_sepia(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let t = params.get("intensity");

    let mut matrix = [[0.0f32; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let identity = if i == j { 1.0 } else { 0.0 };
            *cell = identity * (1.0 - t) + SEPIA[i][j] * t;
        }
    }

    let mut out = src.clone();
    for px in out.data.chunks_exact_mut(3) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        for (i, row) in matrix.iter().enumerate() {
            let mixed = row[0] * r + row[1] * g + row[2] * b;
            px[i] = mixed.clamp(0.0, 255.0) as u8;
        }
    }
    Ok(EffectOutput::full(out))
}

/// Push reds up and blues down by the same amount, clamping each
/// channel independently.
fn apply_warm(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    shift_temperature(src, params.get_i32("intensity"))
}

/// Mirror of warm: blues up, reds down.
fn apply_cool(src: &PixelBuf, params: &ParamSet) -> Result<EffectOutput, EffectError> {
    shift_temperature(src, -params.get_i32("intensity"))
}

fn shift_temperature(src: &PixelBuf, shift: i32) -> Result<EffectOutput, EffectError> {
    if src.is_empty() {
        return Err(EffectError::EmptyInput);
    }
    let mut out = src.clone();
    for px in out.data.chunks_exact_mut(3) {
        px[0] = (px[0] as i32 + shift).clamp(0, 255) as u8;
        px[2] = (px[2] as i32 - shift).clamp(0, 255) as u8;
    }
    Ok(EffectOutput::full(out))
}
