use serde::{Deserialize, Serialize};

/// Interleaved 8-bit RGB image buffer.
///
/// Pixel data is stored as RGBRGBRGB... in row-major order. The same
/// channel order is used end-to-end: decode, pipeline, effects, encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuf {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data: [R, G, B, R, G, B, ...].
    pub data: Vec<u8>,
}

impl PixelBuf {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 3) as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = (width * height * 3) as usize;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} bytes for {width}x{height} RGB, got {}",
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer filled with a single color.
    pub fn from_pixel(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (width, height) for external fit-to-view math.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 3) as usize
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// The five continuous slider values.
///
/// A value of 0 disables the stage entirely — the pipeline skips it
/// rather than applying an identity transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    /// Brightness offset (-100 to 100).
    pub brightness: f32,
    /// Contrast (-100 to 100).
    pub contrast: f32,
    /// Saturation (-100 to 100).
    pub saturation: f32,
    /// Sharpening amount (0 to 100).
    pub sharpness: f32,
    /// Gaussian blur kernel size (0 to 30).
    pub blur: f32,
}

impl Adjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every slider sits at its no-op sentinel.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buf_dimensions() {
        let buf = PixelBuf::new(100, 50);
        assert_eq!(buf.data.len(), 100 * 50 * 3);
        assert_eq!(buf.pixel_count(), 5000);
        assert_eq!(buf.dimensions(), (100, 50));
    }

    #[test]
    fn from_data_validates_length() {
        let ok = PixelBuf::from_data(2, 2, vec![0; 12]);
        assert!(ok.is_ok());

        let bad = PixelBuf::from_data(2, 2, vec![0; 10]);
        assert!(bad.is_err());
    }

    #[test]
    fn from_data_zero_dimensions() {
        let buf = PixelBuf::from_data(0, 0, vec![]);
        assert!(buf.is_ok());
        let buf = buf.unwrap();
        assert_eq!(buf.pixel_count(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn from_pixel_fills_color() {
        let buf = PixelBuf::from_pixel(2, 3, [10, 20, 30]);
        assert_eq!(buf.data.len(), 18);
        for px in buf.data.chunks_exact(3) {
            assert_eq!(px, [10, 20, 30]);
        }
    }

    #[test]
    fn pixel_accessor() {
        let buf = PixelBuf::from_data(2, 2, (0..12).collect()).unwrap();
        assert_eq!(buf.pixel(0, 0), [0, 1, 2]);
        assert_eq!(buf.pixel(1, 0), [3, 4, 5]);
        assert_eq!(buf.pixel(0, 1), [6, 7, 8]);
        assert_eq!(buf.pixel(1, 1), [9, 10, 11]);
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = PixelBuf::new(10, 10);
        assert!(buf.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn adjustments_default_is_noop_sentinel() {
        let adj = Adjustments::new();
        assert!(adj.is_default());
        assert_eq!(adj.brightness, 0.0);
        assert_eq!(adj.blur, 0.0);

        let adj = Adjustments {
            contrast: 10.0,
            ..Default::default()
        };
        assert!(!adj.is_default());
    }

    #[test]
    fn adjustments_serialization_roundtrip() {
        let adj = Adjustments {
            brightness: 20.0,
            contrast: -35.0,
            saturation: 50.0,
            sharpness: 10.0,
            blur: 4.0,
        };
        let json = serde_json::to_string(&adj).unwrap();
        let back: Adjustments = serde_json::from_str(&json).unwrap();
        assert_eq!(back, adj);
    }
}
