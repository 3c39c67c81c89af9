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
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::rc::Rc;

use super::*;

#[derive(Debug, Clone, Copy)]
/// Metrics and atlas coordinates for a glyph.
pub struct GlyphInfo {
    /// Codepoint this glyph renders.
    pub value: u32,
    /// Pixel offset of the bitmap relative to the pen position at the top of the line.
    pub offset: Vec2i,
    /// Horizontal advance, `0` means "use the source rectangle width".
    pub advance_x: i32,
    /// Rectangle inside the atlas texture.
    pub rect: Recti, // coordinates in the atlas
}

impl GlyphInfo {
    /// Advance at the atlas base size.
    pub fn advance(&self) -> i32 {
        if self.advance_x != 0 { self.advance_x } else { self.rect.width }
    }
}

#[derive(Clone)]
/// Glyph table plus the single channel texture it indexes.
pub struct FontAtlas {
    base_size: i32,
    glyphs: HashMap<u32, GlyphInfo>,
    fallback: GlyphInfo,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    white_rect: Recti,
}

impl Debug for FontAtlas {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "FontAtlas {{ base_size: {}, glyphs: {}, texture: {}x{} }}",
            self.base_size,
            self.glyphs.len(),
            self.width,
            self.height
        ))
    }
}

impl FontAtlas {
    /// Builds an atlas from an explicit glyph table.
    ///
    /// Lookups of missing codepoints fall back to `?`, then to an empty glyph half the base size wide.
    pub fn from_glyphs(base_size: i32, glyphs: Vec<GlyphInfo>, width: usize, height: usize, pixels: Vec<u8>, white_rect: Recti) -> Self {
        let glyphs: HashMap<u32, GlyphInfo> = glyphs.into_iter().map(|g| (g.value, g)).collect();
        let fallback = glyphs.get(&('?' as u32)).copied().unwrap_or(GlyphInfo {
            value: '?' as u32,
            offset: Vec2i::new(0, 0),
            advance_x: (base_size / 2).max(1),
            rect: Recti::new(0, 0, 0, 0),
        });
        Self { base_size, glyphs, fallback, width, height, pixels, white_rect }
    }

    /// Builds a monospace atlas covering printable ASCII where every glyph is `advance` wide.
    ///
    /// The texture is a grid of solid cells, glyph `i` occupying cell `i - 32`.
    pub fn fixed_width(base_size: i32, advance: i32) -> Self {
        let cols = 16usize;
        let cell_w = advance.max(1) as usize;
        let cell_h = base_size.max(1) as usize;
        let rows = (95 + cols - 1) / cols;
        let width = cols * cell_w;
        let height = rows * cell_h + 1;

        let glyphs = (32u32..127)
            .map(|cp| {
                let i = (cp - 32) as usize;
                GlyphInfo {
                    value: cp,
                    offset: Vec2i::new(0, 0),
                    advance_x: advance,
                    rect: Recti::new(((i % cols) * cell_w) as i32, (1 + (i / cols) * cell_h) as i32, cell_w as i32, cell_h as i32),
                }
            })
            .collect();

        // the first texel row is left white for untextured quads
        let mut pixels = vec![0xFFu8; width * height];
        for (i, p) in pixels.iter_mut().enumerate().skip(width) {
            if (i % width) % cell_w == 0 {
                *p = 0;
            }
        }
        Self::from_glyphs(base_size, glyphs, width, height, pixels, Recti::new(0, 0, 1, 1))
    }

    /// Pixel size the glyphs were rasterized at.
    pub fn base_size(&self) -> i32 { self.base_size }

    /// Number of glyphs stored in the table.
    pub fn glyph_count(&self) -> usize { self.glyphs.len() }

    /// Returns the glyph for `cp`, or the fallback glyph.
    pub fn glyph(&self, cp: u32) -> GlyphInfo { self.glyphs.get(&cp).copied().unwrap_or(self.fallback) }

    /// Returns `true` when `cp` has its own entry.
    pub fn has_glyph(&self, cp: u32) -> bool { self.glyphs.contains_key(&cp) }

    /// Advance of `cp` at the atlas base size.
    pub fn glyph_advance(&self, cp: u32) -> i32 { self.glyph(cp).advance() }

    /// Texture dimensions.
    pub fn texture_dimension(&self) -> Dimensioni { Dimensioni::new(self.width as i32, self.height as i32) }

    /// Raw single channel texture, row major.
    pub fn pixels(&self) -> &[u8] { &self.pixels }

    /// Rectangle of a fully opaque area used for untextured quads.
    pub fn white_rect(&self) -> Recti { self.white_rect }
}

#[derive(Clone)]
/// Shared, cheaply clonable handle to a [`FontAtlas`].
pub struct AtlasHandle(Rc<FontAtlas>);

impl AtlasHandle {
    /// Wraps an atlas.
    pub fn new(atlas: FontAtlas) -> Self { Self(Rc::new(atlas)) }

    /// Returns `true` when both handles point at the same atlas.
    pub fn ptr_eq(&self, other: &AtlasHandle) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl Deref for AtlasHandle {
    type Target = FontAtlas;
    fn deref(&self) -> &FontAtlas { &self.0 }
}

impl Debug for AtlasHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

#[cfg(feature = "builder")]
/// Helpers for baking TrueType fonts into a [`FontAtlas`].
pub mod builder {
    use super::*;
    use fontdue::FontSettings;
    use log::debug;

    /// Parameters for [`bake_font`].
    #[derive(Clone, Debug)]
    pub struct Config {
        /// Width of the atlas texture in pixels.
        pub texture_width: usize,
        /// Height of the atlas texture in pixels.
        pub texture_height: usize,
        /// Pixel size to rasterize at.
        pub size: usize,
        /// Characters to bake; `?` is always added.
        pub charset: Vec<char>,
    }

    impl Default for Config {
        fn default() -> Self {
            Self { texture_width: 512, texture_height: 512, size: 10, charset: (32u8..127).map(|c| c as char).collect() }
        }
    }

    struct Shelf {
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        row_height: usize,
    }

    impl Shelf {
        fn new(width: usize, height: usize) -> Self { Self { width, height, x: 0, y: 0, row_height: 0 } }

        fn pack(&mut self, w: usize, h: usize) -> Option<(usize, usize)> {
            let (w, h) = (w + 1, h + 1);
            if self.x + w > self.width {
                self.x = 0;
                self.y += self.row_height;
                self.row_height = 0;
            }
            if w > self.width || self.y + h > self.height {
                return None;
            }
            let at = (self.x, self.y);
            self.x += w;
            self.row_height = self.row_height.max(h);
            Some(at)
        }
    }

    /// Rasterizes `font_data` (TTF/OTF bytes) into a new atlas.
    pub fn bake_font(font_data: &[u8], config: &Config) -> Result<FontAtlas, FontError> {
        let font = fontdue::Font::from_bytes(font_data, FontSettings::default()).map_err(|e| FontError::Parse(e.to_string()))?;
        let size = config.size as f32;
        let ascent = font.horizontal_line_metrics(size).map(|m| m.ascent.round() as i32).unwrap_or(config.size as i32);

        let (width, height) = (config.texture_width, config.texture_height);
        let mut pixels = vec![0u8; width * height];
        let mut shelf = Shelf::new(width, height);

        // 2x2 opaque block for untextured quads
        let (wx, wy) = shelf.pack(2, 2).ok_or(FontError::AtlasFull { width, height })?;
        for y in 0..2 {
            for x in 0..2 {
                pixels[wx + x + (wy + y) * width] = 0xFF;
            }
        }
        let white_rect = Recti::new(wx as i32, wy as i32, 2, 2);

        let mut charset = config.charset.clone();
        if !charset.contains(&'?') {
            charset.push('?');
        }

        let mut glyphs = Vec::with_capacity(charset.len());
        for ch in charset {
            let (metrics, bitmap) = font.rasterize(ch, size);
            let (x, y) = if metrics.width == 0 || metrics.height == 0 {
                (0, 0)
            } else {
                let (x, y) = shelf.pack(metrics.width, metrics.height).ok_or(FontError::AtlasFull { width, height })?;
                for row in 0..metrics.height {
                    let dst = x + (y + row) * width;
                    pixels[dst..dst + metrics.width].copy_from_slice(&bitmap[row * metrics.width..(row + 1) * metrics.width]);
                }
                (x, y)
            };
            glyphs.push(GlyphInfo {
                value: ch as u32,
                offset: Vec2i::new(metrics.xmin, ascent - metrics.ymin - metrics.height as i32),
                advance_x: metrics.advance_width.round() as i32,
                rect: Recti::new(x as i32, y as i32, metrics.width as i32, metrics.height as i32),
            });
        }

        debug!("baked {} glyphs at {}px into a {}x{} atlas", glyphs.len(), config.size, width, height);
        Ok(FontAtlas::from_glyphs(config.size as i32, glyphs, width, height, pixels, white_rect))
    }

}
