use crate::pixel_buf::PixelBuf;

/// Rec.601 luma, rounded to the nearest integer.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Flatten a color buffer to a single-channel luma plane.
pub fn gray_plane(buf: &PixelBuf) -> Vec<u8> {
    buf.data
        .chunks_exact(3)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGB to HSV.
///
/// Returns (h, s, v) with hue in degrees [0, 360) and saturation and
/// value on the 0..=255 scale, so saturation math written against
/// 8-bit channel ranges applies directly.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = r as f32;
    let gf = g as f32;
    let bf = b as f32;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max * 255.0 };

    (h, s, max)
}

/// Inverse of [`rgb_to_hsv`]; hue in degrees, s and v on 0..=255.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let s = (s / 255.0).clamp(0.0, 1.0);
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = v - c;
    (
        (r1 + m).round().clamp(0.0, 255.0) as u8,
        (g1 + m).round().clamp(0.0, 255.0) as u8,
        (b1 + m).round().clamp(0.0, 255.0) as u8,
    )
}

/// Scale the HSV saturation channel of every pixel by `factor`,
/// clamping to the 8-bit range.
pub fn scale_saturation(buf: &PixelBuf, factor: f32) -> PixelBuf {
    let mut out = buf.clone();
    for px in out.data.chunks_exact_mut(3) {
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        let s = (s * factor).clamp(0.0, 255.0);
        let (r, g, b) = hsv_to_rgb(h, s, v);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_white_black() {
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 0), 0);
    }

    #[test]
    fn luma_mid_gray() {
        assert_eq!(luma(128, 128, 128), 128);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0.0, 255.0, 255.0));
        assert_eq!(rgb_to_hsv(0, 255, 0), (120.0, 255.0, 255.0));
        assert_eq!(rgb_to_hsv(0, 0, 255), (240.0, 255.0, 255.0));
    }

    #[test]
    fn hsv_gray_has_zero_saturation() {
        let (_, s, v) = rgb_to_hsv(77, 77, 77);
        assert_eq!(s, 0.0);
        assert_eq!(v, 77.0);
    }

    #[test]
    fn hsv_roundtrip_exact_for_primaries() {
        for rgb in [
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 0),
            (0, 255, 255),
            (255, 0, 255),
            (0, 0, 0),
            (255, 255, 255),
        ] {
            let (h, s, v) = rgb_to_hsv(rgb.0, rgb.1, rgb.2);
            assert_eq!(hsv_to_rgb(h, s, v), rgb);
        }
    }

    #[test]
    fn hsv_roundtrip_close_for_arbitrary_colors() {
        for (r, g, b) in [(13, 200, 77), (250, 1, 128), (90, 90, 91), (17, 33, 49)] {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r2, g2, b2) = hsv_to_rgb(h, s, v);
            assert!((r as i32 - r2 as i32).abs() <= 1, "{r} vs {r2}");
            assert!((g as i32 - g2 as i32).abs() <= 1, "{g} vs {g2}");
            assert!((b as i32 - b2 as i32).abs() <= 1, "{b} vs {b2}");
        }
    }

    #[test]
    fn scale_saturation_identity_at_one() {
        let buf = PixelBuf::from_pixel(2, 2, [200, 100, 50]);
        let out = scale_saturation(&buf, 1.0);
        for (a, b) in buf.data.iter().zip(out.data.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn scale_saturation_to_zero_is_achromatic() {
        let buf = PixelBuf::from_pixel(1, 1, [200, 100, 50]);
        let out = scale_saturation(&buf, 0.0);
        let px = out.pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn scale_saturation_boost_spreads_channels() {
        let buf = PixelBuf::from_pixel(1, 1, [180, 120, 90]);
        let out = scale_saturation(&buf, 1.4);
        let px = out.pixel(0, 0);
        let spread_before = 180 - 90;
        let spread_after = px[0] as i32 - px[2] as i32;
        assert!(spread_after > spread_before);
    }

    #[test]
    fn gray_plane_matches_luma() {
        let buf = PixelBuf::from_data(2, 1, vec![255, 0, 0, 10, 20, 30]).unwrap();
        let plane = gray_plane(&buf);
        assert_eq!(plane, vec![luma(255, 0, 0), luma(10, 20, 30)]);
    }
}
