//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    /// Fully transparent black.
    pub const BLANK: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Decodes a `0xRRGGBBAA` style value.
    pub fn from_u32(v: u32) -> Self { color((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8) }

    /// Encodes the color as a `0xRRGGBBAA` style value.
    pub fn to_u32(self) -> u32 { ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32 }

    /// Scales the alpha channel by `alpha` (clamped to `[0, 1]`).
    pub fn fade(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self { a: (self.a as f32 * alpha) as u8, ..self }
    }

    /// Returns the HSV representation of the RGB channels.
    pub fn to_hsv(self) -> Hsv { rgb_to_hsv(self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0) }

    /// Builds a color from HSV and an explicit alpha.
    pub fn from_hsv(hsv: Hsv, a: u8) -> Self {
        let (r, g, b) = hsv_to_rgb(hsv);
        color(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), a)
    }
}

fn unit_to_u8(v: f32) -> u8 { (v.clamp(0.0, 1.0) * 255.0).round() as u8 }

#[derive(Default, Copy, Clone, Debug, PartialEq)]
/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
pub struct Hsv {
    /// Hue, in degrees.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Value.
    pub v: f32,
}

impl Hsv {
    /// Creates a new HSV triple.
    pub fn new(h: f32, s: f32, v: f32) -> Self { Self { h, s, v } }
}

/// Converts normalized RGB channels to HSV.
///
/// Grays (no chroma) and black report a hue and saturation of zero.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let delta = max - min;
    let v = max;

    if delta < 0.00001 || max <= 0.0 {
        return Hsv::new(0.0, 0.0, v);
    }

    let s = delta / max;
    let sector = if r >= max {
        (g - b) / delta
    } else if g >= max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }
    Hsv::new(h, s, v)
}

/// Converts HSV back to normalized RGB channels.
pub fn hsv_to_rgb(hsv: Hsv) -> (f32, f32, f32) {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        return (v, v, v);
    }

    let mut hh = h;
    if !(0.0..360.0).contains(&hh) {
        hh = 0.0;
    }
    hh /= 60.0;
    let i = hh as i32;
    let ff = hh - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * ff);
    let t = v * (1.0 - s * (1.0 - ff));

    match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-4 }

    #[test]
    fn hsv_round_trip_keeps_components() {
        let (r, g, b) = hsv_to_rgb(Hsv::new(200.0, 0.5, 0.8));
        let hsv = rgb_to_hsv(r, g, b);
        assert!(close(hsv.h, 200.0), "hue {}", hsv.h);
        assert!(close(hsv.s, 0.5), "saturation {}", hsv.s);
        assert!(close(hsv.v, 0.8), "value {}", hsv.v);
    }

    #[test]
    fn degenerate_colors_have_zero_hue_and_saturation() {
        let black = rgb_to_hsv(0.0, 0.0, 0.0);
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));

        let gray = rgb_to_hsv(0.5, 0.5, 0.5);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!(close(gray.v, 0.5));
    }

    #[test]
    fn primaries_map_to_sector_boundaries() {
        assert!(close(rgb_to_hsv(1.0, 0.0, 0.0).h, 0.0));
        assert!(close(rgb_to_hsv(0.0, 1.0, 0.0).h, 120.0));
        assert!(close(rgb_to_hsv(0.0, 0.0, 1.0).h, 240.0));
        assert!(close(rgb_to_hsv(1.0, 0.0, 1.0).h, 300.0));
    }

    #[test]
    fn packed_color_round_trip() {
        let c = Color::from_u32(0x5bb2d9ff);
        assert_eq!(c, color(0x5b, 0xb2, 0xd9, 0xff));
        assert_eq!(c.to_u32(), 0x5bb2d9ff);
    }

    #[test]
    fn fade_scales_alpha_only() {
        let c = color(10, 20, 30, 200).fade(0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (10, 20, 30, 100));
        assert_eq!(color(1, 2, 3, 255).fade(4.0).a, 255);
    }

    #[test]
    fn color_hsv_conversion_restores_rgb() {
        let c = color(0x36, 0x8b, 0xaf, 0xff);
        assert_eq!(Color::from_hsv(c.to_hsv(), c.a), c);
    }
}
