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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Style and session inputs of a text layout.
pub struct TextParams {
    /// Rendered text size in pixels.
    pub text_size: i32,
    /// Extra spacing between two glyphs.
    pub spacing: i32,
    /// Distance between the tops of two rows.
    pub line_spacing: i32,
    /// Horizontal alignment of every row.
    pub align: TextAlignment,
    /// Vertical alignment of the whole block.
    pub valign: VerticalAlignment,
    /// Wrap policy.
    pub wrap: WrapMode,
    /// Icon pixel scale.
    pub icon_scale: i32,
    /// Icon cell side, in icon pixels.
    pub icon_size: i32,
    /// Gap between an icon and its text.
    pub icon_gap: i32,
    /// Maximum number of `\n` separated lines.
    pub max_lines: usize,
}

impl TextParams {
    /// Collects the global text properties and the alignment of `kind`.
    pub fn from_style(style: &mut StyleStore, kind: ControlKind, settings: &Settings, icon_scale: i32) -> Self {
        Self {
            text_size: style.global(Property::TEXT_SIZE),
            spacing: style.global(Property::TEXT_SPACING),
            line_spacing: style.global(Property::TEXT_LINE_SPACING),
            align: TextAlignment::from_u32(style.value(kind, Property::TEXT_ALIGNMENT) as u32),
            valign: VerticalAlignment::from_u32(style.global(Property::TEXT_ALIGNMENT_VERTICAL) as u32),
            wrap: WrapMode::from_u32(style.global(Property::TEXT_WRAP_MODE) as u32),
            icon_scale: icon_scale.max(1),
            icon_size: settings.icon_size,
            icon_gap: settings.icon_text_gap,
            max_lines: settings.max_text_lines,
        }
    }

    /// Side of a rendered icon, in pixels.
    pub fn icon_extent(&self) -> i32 { self.icon_size * self.icon_scale }
}

/// Width of `cp` rendered at `text_size`, excluding spacing.
pub fn glyph_width(atlas: &FontAtlas, cp: u32, text_size: i32) -> i32 {
    let base = atlas.base_size().max(1);
    atlas.glyph_advance(cp) * text_size / base
}

/// Width of a single line of text (no icon parsing, no wrapping).
pub fn text_width(atlas: &FontAtlas, text: &[u8], text_size: i32, spacing: i32) -> i32 {
    let mut width = 0;
    let mut count = 0;
    for (_, cp, _) in Codepoints::new(text) {
        if cp == '\n' as u32 {
            break;
        }
        width += glyph_width(atlas, cp, text_size);
        count += 1;
    }
    if count > 1 { width + spacing * (count - 1) } else { width }
}

/// Splits a leading `#<1-3 digits>#` icon marker off a line.
///
/// Returns the icon id and the byte offset where the text starts.
pub fn parse_icon_marker(line: &[u8]) -> (Option<u16>, usize) {
    if line.first() != Some(&b'#') {
        return (None, 0);
    }
    let digits = line[1..].iter().take(3).take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || line.get(1 + digits) != Some(&b'#') {
        return (None, 0);
    }
    let id = line[1..1 + digits].iter().fold(0u16, |acc, d| acc * 10 + (d - b'0') as u16);
    (Some(id), digits + 2)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// One rendered row: a whole line, or a wrapped part of one.
pub struct LayoutRow {
    /// Byte offset of the first codepoint of the row.
    pub start: usize,
    /// Byte offset one past the last codepoint of the row.
    pub end: usize,
    /// Left edge of the row.
    pub x: i32,
    /// Top edge of the row.
    pub y: i32,
    /// Measured width, icon included.
    pub width: i32,
    /// Rows pushed below the bounds by wrapping draw nothing.
    pub visible: bool,
}

#[derive(Copy, Clone, Debug)]
/// A glyph that must be drawn.
pub struct PlacedGlyph {
    /// Byte offset in the source text.
    pub byte: usize,
    /// Decoded codepoint, replacement codepoint for malformed input.
    pub codepoint: u32,
    /// Pen position, top of the row.
    pub pos: Vec2i,
    /// Rendered width, excluding spacing.
    pub width: i32,
}

#[derive(Copy, Clone, Debug)]
/// An icon that must be drawn.
pub struct PlacedIcon {
    /// Icon index.
    pub id: u16,
    /// Top-left corner.
    pub pos: Vec2i,
    /// Pixel scale.
    pub scale: i32,
}

impl PartialEq for PlacedGlyph {
    fn eq(&self, other: &Self) -> bool {
        self.byte == other.byte && self.codepoint == other.codepoint && self.pos.x == other.pos.x && self.pos.y == other.pos.y && self.width == other.width
    }
}

impl Eq for PlacedGlyph {}

impl PartialEq for PlacedIcon {
    fn eq(&self, other: &Self) -> bool { self.id == other.id && self.pos.x == other.pos.x && self.pos.y == other.pos.y && self.scale == other.scale }
}

impl Eq for PlacedIcon {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Result of laying a text out inside a rectangle.
pub struct TextLayout {
    /// Rows in top to bottom order.
    pub rows: Vec<LayoutRow>,
    /// Glyphs to draw; spaces, tabs and truncated glyphs are absent.
    pub glyphs: Vec<PlacedGlyph>,
    /// Icons to draw.
    pub icons: Vec<PlacedIcon>,
    /// Height of the stacked rows.
    pub total_height: i32,
}

struct Item {
    byte: usize,
    cp: u32,
    x: i32,
    width: i32,
}

struct RowDraft {
    icon: Option<u16>,
    start: usize,
    end: usize,
    items: Vec<Item>,
    width: i32,
}

impl RowDraft {
    fn new(icon: Option<u16>, start: usize) -> Self { Self { icon, start, end: start, items: Vec::new(), width: 0 } }
}

fn is_blank(cp: u32) -> bool { cp == ' ' as u32 || cp == '\t' as u32 }

/// Width of the word starting at `body[from..]`, up to the next space or the end of the line.
fn word_width(atlas: &FontAtlas, body: &[u8], from: usize, p: &TextParams) -> i32 {
    let mut width = 0;
    let mut count = 0;
    for (_, cp, _) in Codepoints::new(&body[from..]) {
        if is_blank(cp) {
            break;
        }
        width += glyph_width(atlas, cp, p.text_size);
        count += 1;
    }
    if count > 1 { width + p.spacing * (count - 1) } else { width }
}

fn break_line(atlas: &FontAtlas, line: &[u8], line_start: usize, avail: i32, p: &TextParams, rows: &mut Vec<RowDraft>) {
    let (icon, body_offset) = parse_icon_marker(line);
    let body = &line[body_offset..];
    let body_start = line_start + body_offset;

    let mut row = RowDraft::new(icon, body_start);
    let mut x = 0;
    if icon.is_some() {
        x = p.icon_extent() + if body.is_empty() { 0 } else { p.icon_gap };
        row.width = p.icon_extent();
    }

    let mut prev_blank = true;
    let mut long_word = false;
    for (off, cp, size) in Codepoints::new(body) {
        let w = glyph_width(atlas, cp, p.text_size);
        let blank = is_blank(cp);
        let mut wrap = false;
        let mut consume = false;

        match p.wrap {
            WrapMode::None => (),
            WrapMode::Char => wrap = x > 0 && x + w > avail,
            WrapMode::Word => {
                if blank {
                    long_word = false;
                    // a space never starts a wrapped row
                    if x > 0 && x + w > avail {
                        wrap = true;
                        consume = true;
                    }
                } else {
                    if prev_blank {
                        let ww = word_width(atlas, body, off, p);
                        long_word = ww > avail;
                        wrap = !long_word && x > 0 && x + ww > avail;
                    }
                    if long_word && x > 0 && x + w > avail {
                        wrap = true;
                    }
                }
            }
        }

        if wrap {
            let next = body_start + off + if consume { size } else { 0 };
            if consume {
                row.end = body_start + off + size;
            }
            rows.push(std::mem::replace(&mut row, RowDraft::new(None, next)));
            x = 0;
            if consume {
                prev_blank = true;
                continue;
            }
        }

        row.items.push(Item { byte: body_start + off, cp, x, width: w });
        row.width = row.width.max(x + w);
        row.end = body_start + off + size;
        x += w + p.spacing;
        prev_blank = blank;
    }
    rows.push(row);
}

/// Lays a possibly malformed UTF-8 byte string out inside `bounds`.
pub fn layout_bytes(atlas: &FontAtlas, text: &[u8], bounds: Recti, p: &TextParams) -> TextLayout {
    let mut layout = TextLayout::default();
    if text.is_empty() {
        return layout;
    }

    let mut drafts = Vec::new();
    let mut line_start = 0;
    for line in text.split(|b| *b == b'\n').take(p.max_lines.max(1)) {
        break_line(atlas, line, line_start, bounds.width, p, &mut drafts);
        line_start += line.len() + 1;
    }

    let row_count = drafts.len() as i32;
    layout.total_height = (row_count - 1) * p.line_spacing + p.text_size;
    let top = match p.valign {
        VerticalAlignment::Top => bounds.y,
        VerticalAlignment::Middle => bounds.y + bounds.height / 2 - layout.total_height / 2,
        VerticalAlignment::Bottom => bounds.y + bounds.height - layout.total_height,
    };
    let bottom_limit = bounds.y + bounds.height - p.text_size;

    for (i, draft) in drafts.into_iter().enumerate() {
        let y = top + i as i32 * p.line_spacing;
        let mut x = match p.align {
            TextAlignment::Left => bounds.x,
            TextAlignment::Center => bounds.x + (bounds.width - draft.width) / 2,
            TextAlignment::Right => bounds.x + bounds.width - draft.width,
        };
        if draft.width > bounds.width {
            x = bounds.x;
        }
        let visible = p.wrap == WrapMode::None || y <= bottom_limit;

        if visible {
            if let Some(id) = draft.icon {
                let extent = p.icon_extent();
                layout.icons.push(PlacedIcon { id, pos: vec2(x, y + p.text_size / 2 - extent / 2), scale: p.icon_scale });
            }
            for item in draft.items.iter().filter(|it| !is_blank(it.cp)) {
                if p.wrap == WrapMode::None && item.x + item.width > bounds.width {
                    continue;
                }
                layout.glyphs.push(PlacedGlyph { byte: item.byte, codepoint: item.cp, pos: vec2(x + item.x, y), width: item.width });
            }
        }

        layout.rows.push(LayoutRow { start: draft.start, end: draft.end, x, y, width: draft.width, visible });
    }
    layout
}

/// Lays `text` out inside `bounds`.
pub fn layout_text(atlas: &FontAtlas, text: &str, bounds: Recti, p: &TextParams) -> TextLayout { layout_bytes(atlas, text.as_bytes(), bounds, p) }

/// Size of the unwrapped block: widest line (icons included) by stacked height.
pub fn measure_text(atlas: &FontAtlas, text: &str, p: &TextParams) -> Dimensioni {
    if text.is_empty() {
        return Dimensioni::new(0, 0);
    }
    let mut width = 0;
    let mut lines = 0;
    for line in text.as_bytes().split(|b| *b == b'\n').take(p.max_lines.max(1)) {
        let (icon, off) = parse_icon_marker(line);
        let body = &line[off..];
        let mut w = text_width(atlas, body, p.text_size, p.spacing);
        if icon.is_some() {
            w += p.icon_extent() + if body.is_empty() { 0 } else { p.icon_gap };
        }
        width = width.max(w);
        lines += 1;
    }
    Dimensioni::new(width, (lines - 1) * p.line_spacing + p.text_size)
}

/// Inner text rectangle of a control: border and padding removed horizontally, border vertically.
pub fn text_bounds(style: &mut StyleStore, kind: ControlKind, bounds: Recti) -> Recti {
    let border = style.value(kind, Property::BORDER_WIDTH);
    let padding = style.value(kind, Property::TEXT_PADDING);
    rect(
        bounds.x + border + padding,
        bounds.y + border,
        (bounds.width - 2 * border - 2 * padding).max(0),
        (bounds.height - 2 * border).max(0),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_atlas() -> FontAtlas { FontAtlas::fixed_width(10, 8) }

    pub(crate) fn params(align: TextAlignment, wrap: WrapMode) -> TextParams {
        TextParams {
            text_size: 10,
            spacing: 1,
            line_spacing: 15,
            align,
            valign: VerticalAlignment::Top,
            wrap,
            icon_scale: 1,
            icon_size: 16,
            icon_gap: 4,
            max_lines: 128,
        }
    }

    fn row_text<'a>(text: &'a str, row: &LayoutRow) -> &'a str { &text[row.start..row.end] }

    #[test]
    fn empty_text_lays_out_nothing() {
        let l = layout_text(&test_atlas(), "", rect(0, 0, 100, 20), &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(l, TextLayout::default());
    }

    #[test]
    fn horizontal_alignment_uses_row_width() {
        let atlas = test_atlas();
        let b = rect(10, 0, 100, 20);
        // 3 glyphs of 8 plus 2 spacings
        let left = layout_text(&atlas, "abc", b, &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(left.rows[0].width, 26);
        assert_eq!(left.rows[0].x, 10);
        let center = layout_text(&atlas, "abc", b, &params(TextAlignment::Center, WrapMode::None));
        assert_eq!(center.rows[0].x, 10 + 37);
        let right = layout_text(&atlas, "abc", b, &params(TextAlignment::Right, WrapMode::None));
        assert_eq!(right.rows[0].x, 10 + 74);
        assert_eq!(right.glyphs[2].pos.x, 10 + 74 + 18);
    }

    #[test]
    fn oversized_row_falls_back_to_left() {
        let l = layout_text(&test_atlas(), "abcdef", rect(0, 0, 20, 20), &params(TextAlignment::Right, WrapMode::None));
        assert_eq!(l.rows[0].x, 0);
    }

    #[test]
    fn no_wrap_truncates_silently() {
        let l = layout_text(&test_atlas(), "abcd", rect(0, 0, 20, 20), &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(l.rows.len(), 1);
        assert_eq!(l.rows[0].width, 35);
        let xs: Vec<i32> = l.glyphs.iter().map(|g| g.pos.x).collect();
        assert_eq!(xs, vec![0, 9]);
    }

    #[test]
    fn char_wrap_breaks_anywhere() {
        let text = "abcd";
        let l = layout_text(&test_atlas(), text, rect(0, 0, 20, 100), &params(TextAlignment::Left, WrapMode::Char));
        let rows: Vec<&str> = l.rows.iter().map(|r| row_text(text, r)).collect();
        assert_eq!(rows, vec!["ab", "cd"]);
        assert_eq!((l.glyphs[2].pos.x, l.glyphs[2].pos.y), (0, 15));
    }

    #[test]
    fn word_wrap_breaks_before_words() {
        let text = "ab cd ef";
        let l = layout_text(&test_atlas(), text, rect(0, 0, 40, 100), &params(TextAlignment::Left, WrapMode::Word));
        let rows: Vec<&str> = l.rows.iter().map(|r| row_text(text, r)).collect();
        assert_eq!(rows, vec!["ab ", "cd ", "ef"]);
        assert_eq!(l.glyphs.len(), 6);
    }

    #[test]
    fn word_wrap_splits_words_longer_than_the_row() {
        let text = "abcdef";
        let l = layout_text(&test_atlas(), text, rect(0, 0, 20, 100), &params(TextAlignment::Left, WrapMode::Word));
        let rows: Vec<&str> = l.rows.iter().map(|r| row_text(text, r)).collect();
        assert_eq!(rows, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn overflowing_space_is_consumed_at_the_break() {
        let text = "abcd efgh";
        let l = layout_text(&test_atlas(), text, rect(0, 0, 40, 100), &params(TextAlignment::Left, WrapMode::Word));
        let rows: Vec<&str> = l.rows.iter().map(|r| row_text(text, r)).collect();
        assert_eq!(rows, vec!["abcd ", "efgh"]);
        assert_eq!((l.glyphs[4].pos.x, l.glyphs[4].pos.y), (0, 15));
    }

    #[test]
    fn vertical_alignment_uses_total_block_height() {
        let mut p = params(TextAlignment::Left, WrapMode::None);
        p.valign = VerticalAlignment::Middle;
        let l = layout_text(&test_atlas(), "a\nb\nc", rect(0, 0, 100, 100), &p);
        assert_eq!(l.total_height, 40);
        let ys: Vec<i32> = l.rows.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![30, 45, 60]);

        p.valign = VerticalAlignment::Bottom;
        let l = layout_text(&test_atlas(), "a\nb", rect(0, 0, 100, 100), &p);
        assert_eq!(l.rows[0].y, 75);
    }

    #[test]
    fn wrap_is_idempotent() {
        let atlas = test_atlas();
        let text = "the quick brown fox jumps over the lazy dog\nsecond line";
        for wrap in [WrapMode::None, WrapMode::Char, WrapMode::Word] {
            let p = params(TextAlignment::Center, wrap);
            let a = layout_text(&atlas, text, rect(5, 5, 70, 200), &p);
            let b = layout_text(&atlas, text, rect(5, 5, 70, 200), &p);
            assert_eq!(a, b);
            assert_eq!(a.total_height, b.total_height);
        }
    }

    #[test]
    fn icon_marker_shifts_text() {
        let l = layout_text(&test_atlas(), "#3#ab", rect(0, 0, 100, 20), &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(l.icons.len(), 1);
        assert_eq!(l.icons[0].id, 3);
        assert_eq!(l.glyphs[0].pos.x, 20);
        assert_eq!(l.glyphs[0].byte, 3);
    }

    #[test]
    fn icon_only_line_has_no_gap() {
        let l = layout_text(&test_atlas(), "#12#", rect(0, 0, 100, 20), &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(l.icons.len(), 1);
        assert!(l.glyphs.is_empty());
        assert_eq!(l.rows[0].width, 16);
    }

    #[test]
    fn icon_marker_requires_digits_and_terminator() {
        assert_eq!(parse_icon_marker(b"#ab"), (None, 0));
        assert_eq!(parse_icon_marker(b"#1234#"), (None, 0));
        assert_eq!(parse_icon_marker(b"#007#x"), (Some(7), 5));
        assert_eq!(parse_icon_marker(b"##"), (None, 0));
    }

    #[test]
    fn malformed_utf8_renders_replacement() {
        let l = layout_bytes(&test_atlas(), b"a\xffb", rect(0, 0, 100, 20), &params(TextAlignment::Left, WrapMode::None));
        let cps: Vec<u32> = l.glyphs.iter().map(|g| g.codepoint).collect();
        assert_eq!(cps, vec!['a' as u32, REPLACEMENT_CODEPOINT, 'b' as u32]);
    }

    #[test]
    fn spaces_advance_but_draw_nothing() {
        let l = layout_text(&test_atlas(), "a b", rect(0, 0, 100, 20), &params(TextAlignment::Left, WrapMode::None));
        assert_eq!(l.glyphs.len(), 2);
        assert_eq!(l.glyphs[1].pos.x, 18);
    }

    #[test]
    fn line_count_is_capped() {
        let mut p = params(TextAlignment::Left, WrapMode::None);
        p.max_lines = 2;
        let l = layout_text(&test_atlas(), "a\nb\nc", rect(0, 0, 100, 100), &p);
        assert_eq!(l.rows.len(), 2);
    }

    #[test]
    fn wrapped_rows_below_the_bounds_are_hidden() {
        let l = layout_text(&test_atlas(), "abcdef", rect(0, 0, 20, 20), &params(TextAlignment::Left, WrapMode::Char));
        let visible: Vec<bool> = l.rows.iter().map(|r| r.visible).collect();
        assert_eq!(visible, vec![true, false, false]);
        assert_eq!(l.glyphs.len(), 2);
    }

    #[test]
    fn measure_includes_icons_and_lines() {
        let p = params(TextAlignment::Left, WrapMode::None);
        let d = measure_text(&test_atlas(), "#1#ab\nabcd", &p);
        assert_eq!((d.width, d.height), (16 + 4 + 17, 25));
    }

    #[test]
    fn text_bounds_removes_border_and_padding() {
        let mut style = StyleStore::new();
        let r = text_bounds(&mut style, ControlKind::TextBox, rect(0, 0, 100, 30));
        assert_eq!((r.x, r.y, r.width, r.height), (5, 1, 90, 28));
    }
}
