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
use crate::text_edit::{clamp_cursor, cursor_from_x, delete_next, delete_prev, insert_char, move_left, move_right, visible_start};
use crate::*;
use std::num::{IntErrorKind, ParseIntError};

#[derive(Clone, Debug)]
/// Persistent state for single line text boxes.
pub struct TextBox {
    /// Edited text.
    pub text: String,
    /// Buffer capacity in bytes, terminator included: the text never grows past `capacity - 1` bytes.
    pub capacity: usize,
    edit: Option<EditHandle>,
}

impl TextBox {
    /// Creates a text box over `text`.
    pub fn new(text: impl Into<String>, capacity: usize) -> Self { Self { text: text.into(), capacity, edit: None } }

    /// Edit session held by this box, as of its last call.
    pub fn edit(&self) -> Option<EditHandle> { self.edit }

    /// Returns `true` if the box was editing at its last call.
    pub fn is_editing(&self) -> bool { self.edit.is_some() }
}

#[derive(Clone, Debug)]
/// Persistent state for integer value boxes.
pub struct ValueBox {
    /// Current value.
    pub value: i32,
    /// Lower bound, applied when not editing.
    pub min: i32,
    /// Upper bound, applied when not editing.
    pub max: i32,
    text: String,
    edit: Option<EditHandle>,
}

impl ValueBox {
    /// Creates a value box over `[min, max]`.
    pub fn new(value: i32, min: i32, max: i32) -> Self { Self { value, min, max, text: value.to_string(), edit: None } }

    /// Digits typed so far.
    pub fn text(&self) -> &str { &self.text }

    /// Returns `true` if the box was editing at its last call.
    pub fn is_editing(&self) -> bool { self.edit.is_some() }

    fn clamp(&mut self) -> bool {
        let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        let v = self.value.clamp(lo, hi);
        let changed = v != self.value;
        self.value = v;
        changed
    }
}

fn any_char(_: &str, _: usize, _: char) -> bool { true }

fn digit_char(text: &str, cursor: usize, ch: char) -> bool { ch.is_ascii_digit() || (ch == '-' && cursor == 0 && !text.starts_with('-')) }

/// Typed digits as a value. Too many digits pin it to the `i32` end they run past.
fn parse_saturating(text: &str) -> i32 {
    text.parse().unwrap_or_else(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => i32::MAX,
        IntErrorKind::NegOverflow => i32::MIN,
        _ => 0,
    })
}

impl Context {
    /// Drops a stale handle once another control took the edit focus. The session ended
    /// without this control seeing it, so it reports `ACTIVATE | SUBMIT` now.
    fn refresh_edit(&self, edit: &mut Option<EditHandle>) -> Outcome {
        match *edit {
            Some(h) if !self.edit.is_current(h) => {
                *edit = None;
                Outcome::ACTIVATE | Outcome::SUBMIT
            }
            _ => Outcome::NONE,
        }
    }

    /// One frame of keyboard and pointer editing for the session `h`.
    ///
    /// Returns `SUBMIT` once Enter or a press outside `bounds` ends the session.
    fn edit_text(&mut self, h: EditHandle, kind: ControlKind, bounds: Recti, text: &mut String, capacity: usize, accept: fn(&str, usize, char) -> bool) -> Outcome {
        if !self.input_live(None) {
            return Outcome::NONE;
        }
        let pointer = self.pointer(bounds);
        if self.input.borrow().is_key_pressed(Key::ENTER) || (pointer.pressed && !pointer.inside) {
            self.end_edit(h);
            return Outcome::ACTIVATE | Outcome::SUBMIT;
        }

        let atlas = self.atlas();
        let params = self.text_params(kind);
        let inner = self.text_bounds(kind, bounds);
        let (cooldown, delay) = (self.settings().repeat_cooldown, self.settings().repeat_delay);
        let mut res = Outcome::NONE;
        let mut input = self.input.borrow_mut();
        let session = match self.edit.session_mut(h) {
            Some(s) => s,
            None => return res,
        };

        let mut cursor = clamp_cursor(text, session.cursor);
        if let Some(ch) = input.pop_char() {
            if !ch.is_control() && accept(text, cursor, ch) && insert_char(text, &mut cursor, ch, capacity) {
                res |= Outcome::CHANGE;
            }
        }
        if input.is_key_pressed(Key::HOME) {
            cursor = 0;
        }
        if input.is_key_pressed(Key::END) {
            cursor = text.len();
        }
        for family in RepeatFamily::ALL {
            let key = family.key();
            if !session.repeat.fire(family, input.is_key_down(key), input.is_key_pressed(key), cooldown, delay) {
                continue;
            }
            match family {
                RepeatFamily::Left => cursor = move_left(text, cursor),
                RepeatFamily::Right => cursor = move_right(text, cursor),
                RepeatFamily::Delete => {
                    if delete_next(text, cursor) {
                        res |= Outcome::CHANGE;
                    }
                }
                RepeatFamily::Backspace => {
                    if delete_prev(text, &mut cursor) {
                        res |= Outcome::CHANGE;
                    }
                }
            }
        }
        if pointer.pressed {
            let start = visible_start(&atlas, text, cursor, inner.width, params.text_size, params.spacing);
            cursor = cursor_from_x(&atlas, text, start, inner.x, input.mouse_pos().x, params.text_size, params.spacing);
        }
        session.cursor = cursor;
        res
    }

    /// Frame, text and, while editing, the cursor bar. The text scrolls to keep the cursor visible.
    fn draw_edit_box(&mut self, kind: ControlKind, bounds: Recti, text: &str, state: ControlState, edit: Option<EditHandle>) {
        self.draw_control_frame(kind, bounds, state);
        let cursor = match edit.and_then(|h| self.edit_session(h)).map(|s| s.cursor()) {
            Some(c) => c,
            None => {
                self.draw_control_text(kind, text, bounds, state);
                return;
            }
        };

        let atlas = self.atlas();
        let mut params = self.text_params(kind);
        params.align = TextAlignment::Left;
        params.wrap = WrapMode::None;
        let inner = self.text_bounds(kind, bounds);
        let cursor = clamp_cursor(text, cursor);
        let start = visible_start(&atlas, text, cursor, inner.width, params.text_size, params.spacing);
        let color = self.style_color(kind, Property::text_color(state));
        self.draw_text_with(&text[start..], inner, &params, color);

        let mut x = inner.x + text_width(&atlas, &text.as_bytes()[start..cursor], params.text_size, params.spacing);
        if cursor > start {
            x += params.spacing;
        }
        let cursor_color = self.style_color(kind, Property::BORDER_COLOR_PRESSED);
        let h = params.text_size + 2;
        self.draw_rect(rect(x, inner.y + inner.height / 2 - h / 2, 2, h), cursor_color);
    }

    /// Single line text editor.
    ///
    /// A press inside starts editing (`ACTIVATE`). Enter or a press outside ends it
    /// (`ACTIVATE | SUBMIT`). Text changes report `CHANGE`. Typed characters that do not fit
    /// the capacity are dropped.
    pub fn text_box(&mut self, bounds: Recti, tb: &mut TextBox) -> Outcome {
        let mut res = self.refresh_edit(&mut tb.edit);
        let read_only = self.style_value(ControlKind::TextBox, Property::TEXT_READONLY) != 0;
        let state = match tb.edit {
            Some(h) => {
                res |= self.edit_text(h, ControlKind::TextBox, bounds, &mut tb.text, tb.capacity, any_char);
                if res.is_submitted() {
                    tb.edit = None;
                }
                if self.state() == ControlState::Disabled { ControlState::Disabled } else { ControlState::Pressed }
            }
            None => {
                let it = self.interact(bounds, None);
                let p = self.pointer(bounds);
                if it.live && !read_only && p.pressed && p.inside {
                    tb.edit = Some(self.begin_edit(tb.text.len()));
                    res |= Outcome::ACTIVATE;
                    ControlState::Pressed
                } else {
                    it.state
                }
            }
        };
        self.draw_edit_box(ControlKind::TextBox, bounds, &tb.text, state, tb.edit);
        if tb.edit.is_none() {
            self.draw_tooltip(bounds, state);
        }
        res
    }

    /// Integer editor accepting digits and a leading minus sign.
    ///
    /// The value follows the typed text while editing and is clamped into `[min, max]` on
    /// every call outside of an edit session. `label` is drawn left of the box.
    pub fn value_box(&mut self, bounds: Recti, label: &str, vb: &mut ValueBox) -> Outcome {
        let mut res = self.refresh_edit(&mut vb.edit);
        let state = match vb.edit {
            Some(h) => {
                let capacity = self.settings().value_box_max_chars + 1;
                res |= self.edit_text(h, ControlKind::ValueBox, bounds, &mut vb.text, capacity, digit_char);
                if res.is_changed() {
                    vb.value = parse_saturating(&vb.text);
                }
                if res.is_submitted() {
                    vb.edit = None;
                }
                if self.state() == ControlState::Disabled { ControlState::Disabled } else { ControlState::Pressed }
            }
            None => {
                let it = self.interact(bounds, None);
                let p = self.pointer(bounds);
                if it.live && p.pressed && p.inside {
                    vb.text = vb.value.to_string();
                    vb.edit = Some(self.begin_edit(vb.text.len()));
                    res |= Outcome::ACTIVATE;
                    ControlState::Pressed
                } else {
                    it.state
                }
            }
        };
        if vb.edit.is_none() {
            if vb.clamp() {
                res |= Outcome::CHANGE;
            }
            vb.text = vb.value.to_string();
        }
        self.draw_edit_box(ControlKind::ValueBox, bounds, &vb.text, state, vb.edit);
        self.draw_side_texts(ControlKind::ValueBox, bounds, label, "", state);
        if vb.edit.is_none() {
            self.draw_tooltip(bounds, state);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::context;

    const BOX: Recti = Recti { x: 0, y: 0, width: 100, height: 20 };

    fn press(ctx: &mut Context, x: i32, y: i32, tb: &mut TextBox) -> Outcome {
        ctx.input.borrow_mut().mousedown(x, y, MouseButton::LEFT);
        ctx.input.borrow_mut().mousemove(x, y);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| res = ctx.text_box(BOX, tb));
        ctx.input.borrow_mut().mouseup(x, y, MouseButton::LEFT);
        res
    }

    fn key(ctx: &mut Context, key: Key, tb: &mut TextBox) -> Outcome {
        ctx.input.borrow_mut().keydown(key);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| res = ctx.text_box(BOX, tb));
        ctx.input.borrow_mut().keyup(key);
        res
    }

    fn typed(ctx: &mut Context, text: &str, tb: &mut TextBox) -> Outcome {
        ctx.input.borrow_mut().text(text);
        let mut res = Outcome::NONE;
        for _ in text.chars() {
            ctx.frame(|ctx| res |= ctx.text_box(BOX, tb));
        }
        res
    }

    fn cursor(ctx: &Context) -> usize { ctx.current_edit().map(|s| s.cursor()).unwrap_or(usize::MAX) }

    #[test]
    fn full_buffer_rejects_insert() {
        let mut ctx = context();
        let mut tb = TextBox::new("abc", 4);
        assert!(press(&mut ctx, 10, 10, &mut tb).is_activated());
        assert!(tb.is_editing());
        let res = typed(&mut ctx, "d", &mut tb);
        assert!(!res.is_changed());
        assert_eq!(tb.text, "abc");
        assert_eq!(cursor(&ctx), 3);
    }

    #[test]
    fn typing_moving_and_deleting() {
        let mut ctx = context();
        let mut tb = TextBox::new("", 32);
        press(&mut ctx, 10, 10, &mut tb);
        assert!(typed(&mut ctx, "hé!", &mut tb).is_changed());
        assert_eq!(tb.text, "hé!");
        assert_eq!(cursor(&ctx), 4);

        key(&mut ctx, Key::LEFT, &mut tb);
        assert_eq!(cursor(&ctx), 3);
        assert!(key(&mut ctx, Key::BACKSPACE, &mut tb).is_changed());
        assert_eq!(tb.text, "h!");
        assert_eq!(cursor(&ctx), 1);
        key(&mut ctx, Key::HOME, &mut tb);
        assert!(key(&mut ctx, Key::DELETE, &mut tb).is_changed());
        assert_eq!(tb.text, "!");
        key(&mut ctx, Key::END, &mut tb);
        assert_eq!(cursor(&ctx), 1);

        let res = key(&mut ctx, Key::ENTER, &mut tb);
        assert!(res.is_submitted());
        assert!(!tb.is_editing());
        assert!(ctx.current_edit().is_none());
    }

    #[test]
    fn click_places_cursor_between_glyphs() {
        let mut ctx = context();
        let mut tb = TextBox::new("abcd", 32);
        press(&mut ctx, 90, 10, &mut tb);
        assert_eq!(cursor(&ctx), 4);
        // glyphs start 5px in and are 9px apart, the second one centered at 18
        press(&mut ctx, 15, 10, &mut tb);
        assert_eq!(cursor(&ctx), 1);
        press(&mut ctx, 95, 10, &mut tb);
        assert_eq!(cursor(&ctx), 4);
    }

    #[test]
    fn held_key_repeats_after_cooldown() {
        let mut ctx = context();
        ctx.settings_mut().repeat_cooldown = 2;
        ctx.settings_mut().repeat_delay = 1;
        let mut tb = TextBox::new("abcdef", 32);
        press(&mut ctx, 10, 10, &mut tb);
        ctx.input.borrow_mut().keydown(Key::LEFT);
        // the press moves at once, the next frame sits in the cooldown, then one move per frame
        for _ in 0..5 {
            ctx.frame(|ctx| {
                ctx.text_box(BOX, &mut tb);
            });
        }
        assert_eq!(cursor(&ctx), 2);
    }

    #[test]
    fn press_outside_ends_editing_and_moves_focus() {
        let mut ctx = context();
        let mut a = TextBox::new("a", 32);
        let mut b = TextBox::new("b", 32);
        let rb = rect(0, 30, 100, 20);
        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        ctx.frame(|ctx| {
            ctx.text_box(BOX, &mut a);
            ctx.text_box(rb, &mut b);
        });
        ctx.input.borrow_mut().mouseup(10, 10, MouseButton::LEFT);
        assert!(a.is_editing());

        ctx.input.borrow_mut().mousedown(10, 40, MouseButton::LEFT);
        let (mut ra, mut rb_res) = (Outcome::NONE, Outcome::NONE);
        ctx.frame(|ctx| {
            ra = ctx.text_box(BOX, &mut a);
            rb_res = ctx.text_box(rb, &mut b);
        });
        assert!(ra.is_submitted());
        assert!(rb_res.is_activated());
        assert!(!a.is_editing());
        assert_eq!(ctx.current_edit().map(|s| s.handle()), b.edit());

        // an explicit focus transfer leaves the former owner viewing
        let _ = ctx.begin_edit(0);
        ctx.frame(|ctx| {
            ctx.text_box(rb, &mut b);
        });
        assert!(!b.is_editing());
    }

    #[test]
    fn read_only_box_does_not_edit() {
        let mut ctx = context();
        ctx.set_style(ControlKind::TextBox, Property::TEXT_READONLY, 1).unwrap();
        let mut tb = TextBox::new("x", 32);
        assert!(press(&mut ctx, 10, 10, &mut tb).is_none());
        assert!(ctx.current_edit().is_none());
    }

    #[test]
    fn value_box_clamps_when_viewing() {
        let mut ctx = context();
        let mut vb = ValueBox::new(50, 0, 10);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| res = ctx.value_box(BOX, "v", &mut vb));
        assert_eq!(vb.value, 10);
        assert!(res.is_changed());
        assert_eq!(vb.text(), "10");
    }

    #[test]
    fn value_box_accepts_digits_only() {
        let mut ctx = context();
        let mut vb = ValueBox::new(5, 0, 100);
        let run = |ctx: &mut Context, vb: &mut ValueBox| {
            let mut res = Outcome::NONE;
            ctx.frame(|ctx| res = ctx.value_box(BOX, "", vb));
            res
        };
        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        assert!(run(&mut ctx, &mut vb).is_activated());
        ctx.input.borrow_mut().mouseup(10, 10, MouseButton::LEFT);

        ctx.input.borrow_mut().text("x7");
        run(&mut ctx, &mut vb);
        run(&mut ctx, &mut vb);
        assert_eq!(vb.text(), "57");
        assert_eq!(vb.value, 57);

        ctx.input.borrow_mut().text("9");
        run(&mut ctx, &mut vb);
        assert_eq!(vb.value, 579);

        ctx.input.borrow_mut().keydown(Key::ENTER);
        let res = run(&mut ctx, &mut vb);
        assert!(res.is_submitted());
        assert_eq!(vb.value, 100);
    }

    #[test]
    fn focus_taken_by_an_earlier_box_still_submits() {
        let mut ctx = context();
        let mut a = TextBox::new("a", 32);
        let mut b = TextBox::new("b", 32);
        let rb = rect(0, 30, 100, 20);
        press(&mut ctx, 10, 10, &mut a);
        assert!(a.is_editing());

        // b is called before a in the frame that moves the focus
        ctx.input.borrow_mut().mousedown(10, 40, MouseButton::LEFT);
        let (mut ra, mut rb_res) = (Outcome::NONE, Outcome::NONE);
        ctx.frame(|ctx| {
            rb_res = ctx.text_box(rb, &mut b);
            ra = ctx.text_box(BOX, &mut a);
        });
        assert!(rb_res.is_activated());
        assert!(ra.is_activated() && ra.is_submitted());
        assert!(!a.is_editing());
        assert!(b.is_editing());
    }

    #[test]
    fn value_box_losing_focus_clamps() {
        let mut ctx = context();
        let mut vb = ValueBox::new(5, 0, 100);
        let mut tb = TextBox::new("", 32);
        let rv = rect(0, 30, 100, 20);
        ctx.input.borrow_mut().mousedown(10, 40, MouseButton::LEFT);
        ctx.frame(|ctx| {
            ctx.value_box(rv, "", &mut vb);
        });
        ctx.input.borrow_mut().mouseup(10, 40, MouseButton::LEFT);
        ctx.input.borrow_mut().text("00");
        for _ in 0..2 {
            ctx.frame(|ctx| {
                ctx.value_box(rv, "", &mut vb);
            });
        }
        assert_eq!(vb.value, 500);

        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| {
            ctx.text_box(BOX, &mut tb);
            res = ctx.value_box(rv, "", &mut vb);
        });
        assert!(res.is_submitted());
        assert!(!vb.is_editing());
        assert_eq!(vb.value, 100);
        assert_eq!(vb.text(), "100");
    }

    #[test]
    fn value_box_saturates_long_input() {
        let mut ctx = context();
        let mut vb = ValueBox::new(0, -50, 100);
        let run = |ctx: &mut Context, vb: &mut ValueBox| {
            let mut res = Outcome::NONE;
            ctx.frame(|ctx| res = ctx.value_box(BOX, "", vb));
            res
        };
        ctx.input.borrow_mut().mousedown(10, 10, MouseButton::LEFT);
        run(&mut ctx, &mut vb);
        ctx.input.borrow_mut().mouseup(10, 10, MouseButton::LEFT);

        ctx.input.borrow_mut().text("99999999999");
        for _ in 0..11 {
            run(&mut ctx, &mut vb);
        }
        assert_eq!(vb.text(), "099999999999");
        assert_eq!(vb.value, i32::MAX);

        ctx.input.borrow_mut().keydown(Key::HOME);
        run(&mut ctx, &mut vb);
        ctx.input.borrow_mut().keyup(Key::HOME);
        ctx.input.borrow_mut().text("-");
        run(&mut ctx, &mut vb);
        assert_eq!(vb.value, i32::MIN);

        ctx.input.borrow_mut().keydown(Key::ENTER);
        assert!(run(&mut ctx, &mut vb).is_submitted());
        assert_eq!(vb.value, -50);
    }
}
