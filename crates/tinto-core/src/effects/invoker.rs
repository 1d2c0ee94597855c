use crate::effects::{EffectCatalog, EffectOutput};
use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;

/// Look up `id` in the catalog, resolve `raw` against its schema, and
/// apply the transform to `current`.
///
/// Effects compose: they operate on the current buffer, not the
/// canonical source, so applying the same effect twice stacks. An
/// unknown id leaves the caller's buffer untouched and is reported as
/// an error.
pub fn invoke(
    catalog: &EffectCatalog,
    id: &str,
    current: &PixelBuf,
    raw: &[(String, f32)],
) -> Result<EffectOutput, EffectError> {
    let def = catalog
        .get(id)
        .ok_or_else(|| EffectError::UnknownEffect { id: id.to_string() })?;
    let params = def.schema.resolve(raw);
    (def.transform)(current, &params)
}
