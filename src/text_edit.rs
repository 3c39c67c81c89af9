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
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Opaque identity of an edit session, minted when a control takes edit focus.
pub struct EditHandle(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Key families with independent auto-repeat counters.
pub enum RepeatFamily {
    /// Cursor left.
    Left = 0,
    /// Cursor right.
    Right = 1,
    /// Forward delete.
    Delete = 2,
    /// Backward delete.
    Backspace = 3,
}

impl RepeatFamily {
    /// Every family, in counter order.
    pub const ALL: [RepeatFamily; 4] = [RepeatFamily::Left, RepeatFamily::Right, RepeatFamily::Delete, RepeatFamily::Backspace];

    pub(crate) fn key(self) -> Key {
        match self {
            RepeatFamily::Left => Key::LEFT,
            RepeatFamily::Right => Key::RIGHT,
            RepeatFamily::Delete => Key::DELETE,
            RepeatFamily::Backspace => Key::BACKSPACE,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Held-key counters of the repeatable key families.
pub struct KeyRepeat {
    held: [u32; 4],
    delay: [u32; 4],
}

impl KeyRepeat {
    /// Advances the counters of `family` by one frame and returns whether its action fires.
    ///
    /// A press fires immediately. Holding the key fires again once it has been held for more
    /// than `cooldown` frames, then every `delay` frames.
    pub fn fire(&mut self, family: RepeatFamily, down: bool, pressed: bool, cooldown: u32, delay: u32) -> bool {
        let i = family as usize;
        if pressed {
            self.held[i] = 1;
            self.delay[i] = 0;
            return true;
        }
        if !down {
            self.held[i] = 0;
            self.delay[i] = 0;
            return false;
        }
        self.held[i] += 1;
        if self.held[i] <= cooldown {
            return false;
        }
        self.delay[i] += 1;
        self.delay[i] % delay.max(1) == 0
    }

    /// Number of frames `family` has been held.
    pub fn held_frames(&self, family: RepeatFamily) -> u32 { self.held[family as usize] }
}

#[derive(Clone, Debug)]
/// State of the single text edit session of a context.
pub struct EditSession {
    handle: EditHandle,
    pub(crate) cursor: usize,
    pub(crate) repeat: KeyRepeat,
}

impl EditSession {
    /// Handle of the control owning the session.
    pub fn handle(&self) -> EditHandle { self.handle }

    /// Cursor byte offset.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Auto-repeat counters.
    pub fn repeat(&self) -> &KeyRepeat { &self.repeat }
}

#[derive(Default)]
pub(crate) struct EditTracker {
    next_id: u64,
    session: Option<EditSession>,
}

impl EditTracker {
    pub(crate) fn begin(&mut self, start_cursor: usize) -> EditHandle {
        if let Some(prev) = self.session.take() {
            debug!("edit focus moves away from session {}", prev.handle.0);
        }
        self.next_id += 1;
        let handle = EditHandle(self.next_id);
        self.session = Some(EditSession { handle, cursor: start_cursor, repeat: KeyRepeat::default() });
        debug!("edit session {} started at {}", handle.0, start_cursor);
        handle
    }

    pub(crate) fn end(&mut self, handle: EditHandle) -> bool {
        if self.is_current(handle) {
            self.session = None;
            debug!("edit session {} ended", handle.0);
            true
        } else {
            false
        }
    }

    pub(crate) fn is_current(&self, handle: EditHandle) -> bool { self.session.as_ref().map(|s| s.handle) == Some(handle) }

    pub(crate) fn session(&self, handle: EditHandle) -> Option<&EditSession> { self.session.as_ref().filter(|s| s.handle == handle) }

    pub(crate) fn session_mut(&mut self, handle: EditHandle) -> Option<&mut EditSession> { self.session.as_mut().filter(|s| s.handle == handle) }

    pub(crate) fn current(&self) -> Option<&EditSession> { self.session.as_ref() }
}

/// Snaps `cursor` into `[0, len]` and back onto a codepoint boundary.
pub(crate) fn clamp_cursor(buf: &str, cursor: usize) -> usize {
    let mut c = cursor.min(buf.len());
    while c > 0 && !buf.is_char_boundary(c) {
        c -= 1;
    }
    c
}

/// Inserts `ch` at the cursor if the encoded text still fits `capacity` bytes plus a terminator.
pub(crate) fn insert_char(buf: &mut String, cursor: &mut usize, ch: char, capacity: usize) -> bool {
    if buf.len() + ch.len_utf8() >= capacity {
        return false;
    }
    let at = clamp_cursor(buf, *cursor);
    buf.insert(at, ch);
    *cursor = at + ch.len_utf8();
    true
}

pub(crate) fn delete_prev(buf: &mut String, cursor: &mut usize) -> bool {
    let end = clamp_cursor(buf, *cursor);
    if end == 0 {
        return false;
    }
    let start = move_left(buf, end);
    buf.replace_range(start..end, "");
    *cursor = start;
    true
}

pub(crate) fn delete_next(buf: &mut String, cursor: usize) -> bool {
    let start = clamp_cursor(buf, cursor);
    if start >= buf.len() {
        return false;
    }
    let end = move_right(buf, start);
    buf.replace_range(start..end, "");
    true
}

pub(crate) fn move_left(buf: &str, cursor: usize) -> usize {
    let cursor = clamp_cursor(buf, cursor);
    if cursor == 0 {
        return 0;
    }
    let mut new_cursor = cursor - 1;
    while new_cursor > 0 && !buf.is_char_boundary(new_cursor) {
        new_cursor -= 1;
    }
    new_cursor
}

pub(crate) fn move_right(buf: &str, cursor: usize) -> usize {
    if cursor >= buf.len() {
        return buf.len();
    }
    let mut new_cursor = cursor + 1;
    while new_cursor < buf.len() && !buf.is_char_boundary(new_cursor) {
        new_cursor += 1;
    }
    new_cursor
}

/// First byte offset to render so that the cursor stays inside `avail` pixels.
///
/// Leading codepoints are dropped one at a time while the text between the start and the
/// cursor does not fit.
pub(crate) fn visible_start(atlas: &FontAtlas, buf: &str, cursor: usize, avail: i32, text_size: i32, spacing: i32) -> usize {
    let cursor = clamp_cursor(buf, cursor);
    let mut start = 0;
    while start < cursor && text_width(atlas, &buf.as_bytes()[start..cursor], text_size, spacing) + spacing >= avail {
        start = move_right(buf, start);
    }
    start
}

/// Byte offset the pointer at `x` points to, scanning from `start` drawn at `origin_x`.
///
/// The cursor snaps before the first glyph whose center the pointer has not passed; past the
/// last glyph it lands at the end of the text.
pub(crate) fn cursor_from_x(atlas: &FontAtlas, buf: &str, start: usize, origin_x: i32, x: i32, text_size: i32, spacing: i32) -> usize {
    let start = clamp_cursor(buf, start);
    let mut pen = origin_x;
    for (idx, ch) in buf[start..].char_indices() {
        let w = glyph_width(atlas, ch as u32, text_size);
        if x < pen + w / 2 {
            return start + idx;
        }
        pen += w + spacing;
    }
    buf.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_layout::tests::test_atlas;

    #[test]
    fn insert_at_capacity_is_rejected() {
        let mut buf = String::from("abc");
        let mut cursor = 3;
        assert!(!insert_char(&mut buf, &mut cursor, 'd', 4));
        assert_eq!(buf, "abc");
        assert_eq!(cursor, 3);
        assert!(insert_char(&mut buf, &mut cursor, 'd', 5));
        assert_eq!(buf, "abcd");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn multibyte_insert_advances_by_encoded_size() {
        let mut buf = String::from("ab");
        let mut cursor = 1;
        assert!(insert_char(&mut buf, &mut cursor, 'é', 32));
        assert_eq!(buf, "aéb");
        assert_eq!(cursor, 3);
        assert!(insert_char(&mut buf, &mut cursor, '😀', 32));
        assert_eq!(cursor, 7);
    }

    #[test]
    fn deletes_remove_whole_codepoints() {
        let mut buf = String::from("aé😀b");
        let mut cursor = 7;
        assert!(delete_prev(&mut buf, &mut cursor));
        assert_eq!(buf, "aéb");
        assert_eq!(cursor, 3);
        assert!(delete_next(&mut buf, 1));
        assert_eq!(buf, "ab");
        assert!(!delete_next(&mut buf, 2));
        let mut zero = 0;
        assert!(!delete_prev(&mut buf, &mut zero));
    }

    #[test]
    fn cursor_stays_on_boundaries_through_random_edits() {
        let mut buf = String::new();
        let mut cursor = 0usize;
        let alphabet = ['a', 'é', 'Ж', '😀', ' '];
        let mut seed = 0x2545_f491u32;
        for step in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            match seed % 6 {
                0 | 1 => {
                    insert_char(&mut buf, &mut cursor, alphabet[(seed as usize / 7) % alphabet.len()], 24);
                }
                2 => {
                    delete_prev(&mut buf, &mut cursor);
                }
                3 => {
                    delete_next(&mut buf, cursor);
                }
                4 => cursor = move_left(&buf, cursor),
                _ => cursor = move_right(&buf, cursor),
            }
            assert!(cursor <= buf.len(), "step {}", step);
            assert!(buf.is_char_boundary(cursor), "step {}", step);
            assert!(buf.len() < 24);
        }
    }

    #[test]
    fn clamp_cursor_snaps_back_to_boundary() {
        let buf = "a😀";
        assert_eq!(clamp_cursor(buf, 3), 1);
        assert_eq!(clamp_cursor(buf, 99), 5);
    }

    #[test]
    fn key_repeat_waits_for_cooldown() {
        let mut r = KeyRepeat::default();
        assert!(r.fire(RepeatFamily::Left, true, true, 40, 1));
        let mut fired = Vec::new();
        for frame in 2..=45 {
            if r.fire(RepeatFamily::Left, true, false, 40, 1) {
                fired.push(frame);
            }
        }
        assert_eq!(fired, vec![41, 42, 43, 44, 45]);
        // other families are untouched
        assert_eq!(r.held_frames(RepeatFamily::Right), 0);
        assert!(!r.fire(RepeatFamily::Left, false, false, 40, 1));
        assert_eq!(r.held_frames(RepeatFamily::Left), 0);
    }

    #[test]
    fn key_repeat_honors_delay() {
        let mut r = KeyRepeat::default();
        r.fire(RepeatFamily::Delete, true, true, 2, 3);
        let fired: Vec<bool> = (0..8).map(|_| r.fire(RepeatFamily::Delete, true, false, 2, 3)).collect();
        // held: 2, 3 (delay 1), 4 (2), 5 (3), 6 (4), 7 (5), 8 (6), 9 (7)
        assert_eq!(fired, vec![false, false, false, true, false, false, true, false]);
    }

    #[test]
    fn mouse_maps_to_nearest_glyph_edge() {
        let atlas = test_atlas();
        // glyphs at 0, 9, 18 (8 wide, spacing 1)
        assert_eq!(cursor_from_x(&atlas, "abc", 0, 0, 3, 10, 1), 0);
        assert_eq!(cursor_from_x(&atlas, "abc", 0, 0, 4, 10, 1), 1);
        assert_eq!(cursor_from_x(&atlas, "abc", 0, 0, 12, 10, 1), 1);
        assert_eq!(cursor_from_x(&atlas, "abc", 0, 0, 13, 10, 1), 2);
        assert_eq!(cursor_from_x(&atlas, "abc", 0, 0, 100, 10, 1), 3);
        assert_eq!(cursor_from_x(&atlas, "abc", 1, 0, 0, 10, 1), 1);
    }

    #[test]
    fn scroll_keeps_cursor_in_view() {
        let atlas = test_atlas();
        let text = "abcdefghij";
        assert_eq!(visible_start(&atlas, text, 2, 40, 10, 1), 0);
        // 10 glyphs span 98px; only 4 fit within 40
        let start = visible_start(&atlas, text, 10, 40, 10, 1);
        assert_eq!(start, 6);
        assert!(text_width(&atlas, &text.as_bytes()[start..10], 10, 1) < 40);
    }

    #[test]
    fn edit_focus_transfers_explicitly() {
        let mut edit = EditTracker::default();
        let a = edit.begin(0);
        let b = edit.begin(5);
        assert!(!edit.is_current(a));
        assert_eq!(edit.session(b).map(|s| s.cursor()), Some(5));
        assert!(!edit.end(a));
        assert!(edit.end(b));
        assert!(edit.current().is_none());
    }
}
