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

pub(crate) fn union_rect(a: Recti, b: Recti) -> Recti {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let r = (a.x + a.width).max(b.x + b.width);
    let bottom = (a.y + a.height).max(b.y + b.height);
    rect(x, y, r - x, bottom - y)
}

impl Context {
    /// Draws `text` inside `bounds`. Labels never react to the pointer.
    pub fn label(&mut self, bounds: Recti, text: &str) -> Outcome {
        let state = self.passive_state();
        self.draw_control_text(ControlKind::Label, text, bounds, state);
        Outcome::NONE
    }

    /// Push button; activated when the pointer is released over it.
    pub fn button(&mut self, bounds: Recti, text: &str) -> Outcome {
        let it = self.interact(bounds, None);
        self.draw_control_frame(ControlKind::Button, bounds, it.state);
        self.draw_control_text(ControlKind::Button, text, bounds, it.state);
        self.draw_tooltip(bounds, it.state);
        if it.activated { Outcome::ACTIVATE } else { Outcome::NONE }
    }

    /// Button keeping an on/off state in `active`.
    pub fn toggle(&mut self, bounds: Recti, text: &str, active: &mut bool) -> Outcome {
        let it = self.interact(bounds, None);
        let mut res = Outcome::NONE;
        if it.activated {
            *active = !*active;
            res |= Outcome::ACTIVATE | Outcome::CHANGE;
        }
        let state = if *active && it.state == ControlState::Normal { ControlState::Pressed } else { it.state };
        self.draw_control_frame(ControlKind::Toggle, bounds, state);
        self.draw_control_text(ControlKind::Toggle, text, bounds, state);
        self.draw_tooltip(bounds, it.state);
        res
    }

    /// Square box flipping `checked`; `text` sits beside the box and is clickable too.
    pub fn check_box(&mut self, bounds: Recti, text: &str, checked: &mut bool) -> Outcome {
        let mut params = self.text_params(ControlKind::CheckBox);
        let align = params.align;
        params.align = TextAlignment::Left;
        params.valign = VerticalAlignment::Middle;
        let size = measure_text(&self.atlas(), text, &params);
        let padding = self.style_value(ControlKind::CheckBox, Property::TEXT_PADDING);
        let text_x = if align == TextAlignment::Left { bounds.x - size.width - padding } else { bounds.x + bounds.width + padding };
        let text_rect = rect(text_x, bounds.y + bounds.height / 2 - size.height / 2, size.width, size.height);
        let hit = if text.is_empty() { bounds } else { union_rect(bounds, text_rect) };

        let it = self.interact(hit, None);
        let mut res = Outcome::NONE;
        if it.activated {
            *checked = !*checked;
            res |= Outcome::ACTIVATE | Outcome::CHANGE;
        }

        let border_width = self.style_value(ControlKind::CheckBox, Property::BORDER_WIDTH);
        let border = self.style_color(ControlKind::CheckBox, Property::border_color(it.state));
        self.draw.draw_border(bounds, border_width, border);
        if *checked {
            let inset = border_width + self.style_value(ControlKind::CheckBox, Property::CHECK_PADDING);
            let fill = self.style_color(ControlKind::CheckBox, Property::text_color(it.state));
            self.draw_rect(expand_rect(bounds, -inset), fill);
        }
        let color = self.style_color(ControlKind::CheckBox, Property::text_color(it.state));
        self.draw_text_with(text, text_rect, &params, color);
        self.draw_tooltip(hit, it.state);
        res
    }

    /// Framed text strip, normally at the bottom of a window.
    pub fn status_bar(&mut self, bounds: Recti, text: &str) -> Outcome {
        let state = self.passive_state();
        self.draw_control_frame(ControlKind::StatusBar, bounds, state);
        self.draw_control_text(ControlKind::StatusBar, text, bounds, state);
        Outcome::NONE
    }

    /// Horizontal bar filled in proportion to `value` in `[min, max]`.
    ///
    /// `value` is clamped into the range. The side texts are drawn outside the bar.
    pub fn progress_bar(&mut self, bounds: Recti, text_left: &str, text_right: &str, value: &mut f32, min: f32, max: f32) -> Outcome {
        let state = self.passive_state();
        *value = if min <= max { value.clamp(min, max) } else { value.clamp(max, min) };

        let border_width = self.style_value(ControlKind::ProgressBar, Property::BORDER_WIDTH);
        let inset = border_width + self.style_value(ControlKind::ProgressBar, Property::PROGRESS_PADDING);
        let border = self.style_color(ControlKind::ProgressBar, Property::border_color(state));
        self.draw.draw_border(bounds, border_width, border);

        let range = max - min;
        let fraction = if range != 0.0 { (*value - min) / range } else { 0.0 };
        let track = expand_rect(bounds, -inset);
        let fill_state = if state == ControlState::Disabled { ControlState::Disabled } else { ControlState::Pressed };
        let fill = self.style_color(ControlKind::ProgressBar, Property::base_color(fill_state));
        self.draw_rect(rect(track.x, track.y, (track.width as f32 * fraction) as i32, track.height), fill);

        self.draw_side_texts(ControlKind::ProgressBar, bounds, text_left, text_right, state);
        Outcome::NONE
    }

    /// Texts drawn left and right of a bar, outside its bounds.
    pub(crate) fn draw_side_texts(&mut self, kind: ControlKind, bounds: Recti, text_left: &str, text_right: &str, state: ControlState) {
        let mut params = self.text_params(kind);
        params.valign = VerticalAlignment::Middle;
        let padding = self.style_value(kind, Property::TEXT_PADDING);
        let color = self.style_color(kind, Property::text_color(state));
        let atlas = self.atlas();
        if !text_left.is_empty() {
            params.align = TextAlignment::Right;
            let w = measure_text(&atlas, text_left, &params).width;
            self.draw_text_with(text_left, rect(bounds.x - w - padding, bounds.y, w, bounds.height), &params, color);
        }
        if !text_right.is_empty() {
            params.align = TextAlignment::Left;
            let w = measure_text(&atlas, text_right, &params).width;
            self.draw_text_with(text_right, rect(bounds.x + bounds.width + padding, bounds.y, w, bounds.height), &params, color);
        }
    }

    /// State of a control that draws but does not take input.
    pub(crate) fn passive_state(&self) -> ControlState {
        if self.state() == ControlState::Disabled { ControlState::Disabled } else { ControlState::Normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::context;

    fn click(ctx: &mut Context, x: i32, y: i32, f: &mut dyn FnMut(&mut Context) -> Outcome) -> Outcome {
        ctx.input.borrow_mut().mousemove(x, y);
        ctx.input.borrow_mut().mousedown(x, y, MouseButton::LEFT);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| res = f(ctx));
        assert!(res.is_none());
        ctx.input.borrow_mut().mouseup(x, y, MouseButton::LEFT);
        ctx.frame(|ctx| res = f(ctx));
        res
    }

    #[test]
    fn button_activates_on_release_inside() {
        let mut ctx = context();
        let b = rect(10, 10, 60, 20);
        let res = click(&mut ctx, 20, 15, &mut |ctx: &mut Context| ctx.button(b, "ok"));
        assert!(res.is_activated());
        assert_eq!(res.code(), 1);
        let miss = click(&mut ctx, 200, 200, &mut |ctx: &mut Context| ctx.button(b, "ok"));
        assert!(miss.is_none());
    }

    #[test]
    fn disabled_or_locked_button_ignores_clicks() {
        let mut ctx = context();
        let b = rect(10, 10, 60, 20);
        ctx.disable();
        assert!(click(&mut ctx, 20, 15, &mut |ctx: &mut Context| ctx.button(b, "ok")).is_none());
        ctx.enable();
        ctx.lock();
        assert!(click(&mut ctx, 20, 15, &mut |ctx: &mut Context| ctx.button(b, "ok")).is_none());
        ctx.unlock();
        assert!(click(&mut ctx, 20, 15, &mut |ctx: &mut Context| ctx.button(b, "ok")).is_activated());
    }

    #[test]
    fn toggle_and_check_box_flip() {
        let mut ctx = context();
        let mut on = false;
        let res = click(&mut ctx, 15, 15, &mut |ctx: &mut Context| ctx.toggle(rect(10, 10, 40, 20), "t", &mut on));
        assert!(res.is_changed());
        assert!(on);

        let mut checked = false;
        // the label right of the box is part of the hit area
        let res = click(&mut ctx, 40, 55, &mut |ctx: &mut Context| ctx.check_box(rect(10, 50, 12, 12), "check", &mut checked));
        assert!(res.is_activated());
        assert!(checked);
    }

    #[test]
    fn progress_bar_clamps_and_fills() {
        let mut ctx = context();
        let mut v = 3.0;
        ctx.frame(|ctx| {
            ctx.progress_bar(rect(0, 0, 104, 20), "", "", &mut v, 0.0, 1.0);
        });
        assert_eq!(v, 1.0);
        let fill = ctx.style_color(ControlKind::ProgressBar, Property::BASE_COLOR_PRESSED);
        let filled = ctx.commands().iter().any(|c| matches!(c, Command::Rect { rect, color } if *color == fill && rect.width == 100));
        assert!(filled);
    }

    #[test]
    fn label_draws_its_glyphs() {
        let mut ctx = context();
        ctx.frame(|ctx| {
            ctx.label(rect(0, 0, 100, 20), "abc");
        });
        let glyphs = ctx.commands().iter().filter(|c| matches!(c, Command::Glyph { .. })).count();
        assert_eq!(glyphs, 3);
    }
}
