//! File I/O boundary: decode any supported format into a [`PixelBuf`]
//! and encode the current buffer back out. The on-disk formats
//! (PNG/JPEG/BMP) are opaque to the rest of the engine.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::pixel_buf::PixelBuf;

/// Decode an image file into an RGB8 buffer.
pub fn load_buffer(path: &Path) -> Result<PixelBuf> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    debug!(?path, width, height, "loaded image");
    PixelBuf::from_data(width, height, rgb.into_raw())
}

/// Encode a buffer to `path`; the format follows the file extension.
pub fn save_buffer(path: &Path, buf: &PixelBuf) -> Result<()> {
    image::save_buffer(
        path,
        &buf.data,
        buf.width,
        buf.height,
        image::ExtendedColorType::Rgb8,
    )
    .with_context(|| format!("failed to save image: {}", path.display()))?;

    debug!(?path, "saved image");
    Ok(())
}
