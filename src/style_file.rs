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
use crate::*;
use log::warn;

/// Signature of a binary style asset.
pub const STYLE_SIGNATURE: &[u8; 4] = b"rGS ";
/// Signature of a binary icon asset.
pub const ICONS_SIGNATURE: &[u8; 4] = b"rGI ";

const SUPPORTED_STYLE_VERSION: u16 = 400;
const SUPPORTED_ICONS_VERSION: u16 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// One `(control, property, value)` record of a style asset.
pub struct StyleRecord {
    /// Control kind index.
    pub control: u16,
    /// Property slot index.
    pub property: u16,
    /// Raw property value.
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Custom font named by a text style asset. Loading it is left to the host.
pub struct FontRequest {
    /// Base size to bake the font at.
    pub size: i32,
    /// Charset file name.
    pub charset: String,
    /// Font file name.
    pub font: String,
}

#[derive(Clone, Debug)]
/// Font atlas embedded in a binary style asset.
pub struct EmbeddedFont {
    /// Size the glyphs were baked at.
    pub base_size: i32,
    /// Font type tag as stored.
    pub font_type: i32,
    /// Solid white area of the atlas image.
    pub white_rect: Recti,
    /// Atlas image width.
    pub image_width: i32,
    /// Atlas image height.
    pub image_height: i32,
    /// Pixel format tag as stored.
    pub image_format: i32,
    /// Size of the image once decompressed.
    pub uncompressed_size: usize,
    /// `true` when `payload` is DEFLATE compressed.
    pub compressed: bool,
    /// Image bytes as stored in the asset.
    pub payload: Vec<u8>,
    /// Glyph table; source rectangles point into the atlas image.
    pub glyphs: Vec<GlyphInfo>,
}

impl EmbeddedFont {
    /// Image bytes when the payload is stored uncompressed.
    pub fn raw_pixels(&self) -> Option<&[u8]> { if self.compressed { None } else { Some(&self.payload) } }

    /// Builds a [`FontAtlas`] from the glyph table and the decoded single channel `pixels`.
    pub fn to_atlas(&self, pixels: Vec<u8>) -> FontAtlas {
        FontAtlas::from_glyphs(
            self.base_size,
            self.glyphs.clone(),
            self.image_width.max(0) as usize,
            self.image_height.max(0) as usize,
            pixels,
            self.white_rect,
        )
    }
}

#[derive(Clone, Debug, Default)]
/// Decoded style asset.
pub struct StyleAsset {
    /// Property records in file order.
    pub records: Vec<StyleRecord>,
    /// Font line of a text asset.
    pub font_request: Option<FontRequest>,
    /// Font block of a binary asset.
    pub embedded_font: Option<EmbeddedFont>,
}

/// Decodes a style asset, binary when it starts with the `rGS ` signature, text otherwise.
pub fn parse_style(data: &[u8]) -> Result<StyleAsset> {
    if data.starts_with(STYLE_SIGNATURE) {
        return parse_style_binary(data);
    }
    let text = std::str::from_utf8(data).map_err(|e| AssetError::Malformed { line: 0, reason: e.to_string() })?;
    parse_style_text(text)
}

fn malformed(line: usize, reason: impl Into<String>) -> AssetError { AssetError::Malformed { line, reason: reason.into() } }

fn parse_number<T: std::str::FromStr>(line: usize, token: Option<&str>, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| malformed(line, format!("missing {}", what)))?;
    token.parse::<T>().map_err(|_| malformed(line, format!("bad {} `{}`", what, token)))
}

/// Decodes the text style format.
///
/// ```text
/// # comment
/// f 16 charset.txt font.ttf
/// p 00 00 0x2f7486ff    DEFAULT_BORDER_COLOR_NORMAL
/// ```
///
/// Lines starting with any other character are ignored.
pub fn parse_style_text(text: &str) -> Result<StyleAsset> {
    let mut asset = StyleAsset::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut tokens = raw.split_whitespace();
        match tokens.next() {
            Some("p") => {
                let control = parse_number::<u16>(line, tokens.next(), "control")?;
                let property = parse_number::<u16>(line, tokens.next(), "property")?;
                let hex = tokens.next().ok_or_else(|| malformed(line, "missing value"))?;
                let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")).unwrap_or(hex);
                let value = u32::from_str_radix(digits, 16).map_err(|_| malformed(line, format!("bad value `{}`", hex)))?;
                asset.records.push(StyleRecord { control, property, value });
            }
            Some("f") => {
                let size = parse_number::<i32>(line, tokens.next(), "font size")?;
                let charset = tokens.next().ok_or_else(|| malformed(line, "missing charset file"))?.to_string();
                let font = tokens.next().ok_or_else(|| malformed(line, "missing font file"))?.to_string();
                asset.font_request = Some(FontRequest { size, charset, font });
            }
            _ => (),
        }
    }
    Ok(asset)
}

/// Little endian cursor over an asset buffer.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self { Self { data, pos: 0 } }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.data.len() - self.pos < n {
            return Err(AssetError::Truncated { offset: self.pos, needed: n });
        }
        let s = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut a = [0u8; N];
        a.copy_from_slice(self.take(N)?);
        Ok(a)
    }

    fn u16(&mut self) -> Result<u16> { Ok(u16::from_le_bytes(self.array()?)) }
    fn i16(&mut self) -> Result<i16> { Ok(i16::from_le_bytes(self.array()?)) }
    fn u32(&mut self) -> Result<u32> { Ok(u32::from_le_bytes(self.array()?)) }
    fn i32(&mut self) -> Result<i32> { Ok(i32::from_le_bytes(self.array()?)) }
    fn f32(&mut self) -> Result<f32> { Ok(f32::from_le_bytes(self.array()?)) }

    fn rect(&mut self) -> Result<Recti> {
        let x = self.f32()?;
        let y = self.f32()?;
        let w = self.f32()?;
        let h = self.f32()?;
        Ok(rect(x as i32, y as i32, w as i32, h as i32))
    }

    /// Fails unless `count` records of `len` bytes each are still left.
    fn ensure(&self, count: usize, len: usize) -> Result<()> {
        let needed = count.saturating_mul(len);
        if self.data.len() - self.pos < needed {
            return Err(AssetError::Truncated { offset: self.pos, needed });
        }
        Ok(())
    }

    /// Count field read as i32; negative counts are rejected.
    fn count(&mut self, what: &str) -> Result<usize> {
        let offset = self.pos;
        let n = self.i32()?;
        usize::try_from(n).map_err(|_| malformed(offset, format!("negative {} {}", what, n)))
    }

    fn signature(&mut self, expected: &'static [u8; 4]) -> Result<()> {
        let sig = self.take(4).map_err(|_| AssetError::BadSignature { expected: sig_str(expected) })?;
        if sig != &expected[..] {
            warn!("asset rejected: signature {:?} is not {:?}", String::from_utf8_lossy(sig), sig_str(expected));
            return Err(AssetError::BadSignature { expected: sig_str(expected) });
        }
        Ok(())
    }
}

fn sig_str(sig: &'static [u8; 4]) -> &'static str { if sig == STYLE_SIGNATURE { "rGS " } else { "rGI " } }

/// Decodes the binary style format (`rGS `).
pub fn parse_style_binary(data: &[u8]) -> Result<StyleAsset> {
    let mut r = Reader::new(data);
    r.signature(STYLE_SIGNATURE)?;
    let version = r.u16()?;
    if version > SUPPORTED_STYLE_VERSION {
        warn!("style asset rejected: version {}", version);
        return Err(AssetError::UnsupportedVersion(version));
    }
    let _reserved = r.u16()?;
    let count = r.count("property count")?;

    let mut asset = StyleAsset::default();
    for _ in 0..count {
        let control = r.i16()? as u16;
        let property = r.i16()? as u16;
        let value = r.u32()?;
        asset.records.push(StyleRecord { control, property, value });
    }

    // the font block is optional: older assets end right after the records
    if r.pos == data.len() {
        return Ok(asset);
    }
    let font_size = r.i32()?;
    if font_size > 0 {
        asset.embedded_font = Some(read_embedded_font(&mut r)?);
    }
    Ok(asset)
}

fn read_embedded_font(r: &mut Reader) -> Result<EmbeddedFont> {
    let base_size = r.i32()?;
    let glyph_count = r.count("glyph count")?;
    let font_type = r.i32()?;
    let white_rect = r.rect()?;
    let uncompressed_size = r.count("image size")?;
    let compressed_size = r.count("compressed image size")?;
    let image_width = r.i32()?;
    let image_height = r.i32()?;
    let image_format = r.i32()?;

    let compressed = compressed_size != 0 && compressed_size != uncompressed_size;
    if compressed && compressed_size > uncompressed_size {
        warn!("embedded font payload is larger compressed ({}) than raw ({})", compressed_size, uncompressed_size);
    }
    let payload = r.take(if compressed { compressed_size } else { uncompressed_size })?.to_vec();

    // a rectangle plus a glyph record per glyph
    r.ensure(glyph_count, 32)?;
    let mut rects = Vec::with_capacity(glyph_count);
    for _ in 0..glyph_count {
        rects.push(r.rect()?);
    }
    let mut glyphs = Vec::with_capacity(glyph_count);
    for rect in rects {
        let value = r.i32()? as u32;
        let offset_x = r.i32()?;
        let offset_y = r.i32()?;
        let advance_x = r.i32()?;
        glyphs.push(GlyphInfo { value, offset: Vec2i::new(offset_x, offset_y), advance_x, rect });
    }

    Ok(EmbeddedFont {
        base_size,
        font_type,
        white_rect,
        image_width,
        image_height,
        image_format,
        uncompressed_size,
        compressed,
        payload,
        glyphs,
    })
}

/// Decodes the binary icon format (`rGI `).
pub fn parse_icons_binary(data: &[u8]) -> Result<IconSet> {
    let mut r = Reader::new(data);
    r.signature(ICONS_SIGNATURE)?;
    let version = r.u16()?;
    if version > SUPPORTED_ICONS_VERSION {
        warn!("icon asset rejected: version {}", version);
        return Err(AssetError::UnsupportedVersion(version));
    }
    let _reserved = r.u16()?;
    let count = r.i16()?.max(0) as usize;
    let size = r.i16()? as i32;
    if size <= 0 {
        return Err(malformed(r.pos, format!("icon size {}", size)));
    }

    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        let raw = r.take(ICON_NAME_LEN)?;
        let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
        names.push(String::from_utf8_lossy(&raw[..end]).into_owned());
    }

    let words = IconSet::words_for(size);
    let mut icons = Vec::with_capacity(count);
    for name in names {
        let mut bits = Vec::with_capacity(words);
        for _ in 0..words {
            bits.push(r.u32()?);
        }
        icons.push(Icon { name, bits });
    }
    Ok(IconSet::new(size, icons))
}
