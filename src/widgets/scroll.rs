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
use crate::scrollbar::{scrollbar_max_scroll, thumb_rect};
use crate::widgets::slider::DragStep;
use crate::*;

#[derive(Clone, Debug)]
/// Persistent state for a standalone scroll bar.
pub struct ScrollBar {
    /// Current position.
    pub value: i32,
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
    drag: Option<DragHandle>,
}

impl ScrollBar {
    /// Creates a bar over `[min, max]`.
    pub fn new(value: i32, min: i32, max: i32) -> Self { Self { value, min, max, drag: None } }

    /// Drag held by the thumb, if any.
    pub fn drag(&self) -> Option<DragHandle> { self.drag }
}

#[derive(Clone, Debug, Default)]
/// Persistent state for a scroll panel.
pub struct ScrollPanel {
    /// Content offset, `0` is the top-left of the content.
    pub scroll: Vec2i,
    view: Recti,
    vertical: Option<DragHandle>,
    horizontal: Option<DragHandle>,
}

impl ScrollPanel {
    /// Creates a panel scrolled to the origin.
    pub fn new() -> Self { Self::default() }

    /// Visible part of the panel computed by the last call.
    pub fn view(&self) -> Recti { self.view }
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum ThumbSize {
    Fixed(i32),
    Proportional { view: i32, content: i32, floor: i32 },
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct BarConfig {
    pub(crate) thumb: ThumbSize,
    pub(crate) wheel: bool,
    pub(crate) arrows: bool,
}

impl Context {
    /// Scroll bar; vertical when `bounds` is at least as tall as wide.
    ///
    /// The thumb is `SCROLL_SLIDER_SIZE` long. The wheel over the bar and the arrow buttons
    /// step by `(max - min) / SCROLL_SPEED`.
    pub fn scroll_bar(&mut self, bounds: Recti, bar: &mut ScrollBar) -> Outcome {
        let thumb = self.style_value(ControlKind::ScrollBar, Property::SCROLL_SLIDER_SIZE);
        let arrows = self.style_value(ControlKind::ScrollBar, Property::ARROWS_VISIBLE) != 0;
        let config = BarConfig { thumb: ThumbSize::Fixed(thumb), wheel: true, arrows };
        self.scroll_bar_with(bounds, &mut bar.value, bar.min, bar.max, &mut bar.drag, config)
    }

    pub(crate) fn scroll_bar_with(&mut self, bounds: Recti, value: &mut i32, min: i32, max: i32, drag: &mut Option<DragHandle>, config: BarConfig) -> Outcome {
        let axis = ScrollAxis::of(bounds);
        let border = self.style_value(ControlKind::ScrollBar, Property::BORDER_WIDTH);
        let pad = self.style_value(ControlKind::ScrollBar, Property::SCROLL_PADDING);
        let spinner = if config.arrows {
            match axis {
                ScrollAxis::Vertical => bounds.width - 2 * border,
                ScrollAxis::Horizontal => bounds.height - 2 * border,
            }
        } else {
            0
        };
        let (arrow_back, arrow_fwd, track) = match axis {
            ScrollAxis::Vertical => (
                rect(bounds.x + border, bounds.y + border, spinner, spinner),
                rect(bounds.x + border, bounds.y + bounds.height - spinner - border, spinner, spinner),
                rect(bounds.x + border + pad, bounds.y + border + spinner, bounds.width - 2 * (border + pad), bounds.height - 2 * (border + spinner)),
            ),
            ScrollAxis::Horizontal => (
                rect(bounds.x + border, bounds.y + border, spinner, spinner),
                rect(bounds.x + bounds.width - spinner - border, bounds.y + border, spinner, spinner),
                rect(bounds.x + border + spinner, bounds.y + border + pad, bounds.width - 2 * (border + spinner), bounds.height - 2 * (border + pad)),
            ),
        };
        let track_len = axis.len(track).max(0);
        let thumb_len = match config.thumb {
            ThumbSize::Fixed(n) => n.min(track_len).max(0),
            ThumbSize::Proportional { view, content, floor } => scroll_thumb_length(track_len, view, content, floor),
        };

        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let old = *value;
        *value = (*value).clamp(lo, hi);
        // widened so full i32 ranges neither overflow nor wrap
        let speed = self.style_value(ControlKind::ScrollBar, Property::SCROLL_SPEED).max(1) as i64;
        let step = ((hi as i64 - lo as i64) / speed).max(self.settings().min_wheel_speed as i64);
        let mut moved = 0i64;

        let input = self.drag_input();
        let mut res = Outcome::NONE;
        let mut state = self.passive_state();
        match self.drag_step(drag, bounds, point_in_rect(input.pos, track)) {
            DragStep::Dragging => {
                state = ControlState::Pressed;
                let v = value_from_pointer(axis.coord(input.pos), axis.start(track), track_len, thumb_len, lo as f32, hi as f32);
                *value = v.round() as i32;
            }
            DragStep::Hover => state = ControlState::Focused,
            DragStep::Released => res |= Outcome::SUBMIT,
            DragStep::Idle => (),
        }

        if state != ControlState::Pressed && self.input_live(*drag) && point_in_rect(input.pos, bounds) {
            state = ControlState::Focused;
            if config.wheel {
                let wheel = self.input.borrow().wheel_move();
                moved = moved.saturating_sub((wheel as i64).saturating_mul(step));
            }
            if input.pressed && config.arrows {
                if point_in_rect(input.pos, arrow_back) {
                    moved = moved.saturating_sub(step);
                } else if point_in_rect(input.pos, arrow_fwd) {
                    moved = moved.saturating_add(step);
                }
            }
        }
        *value = (*value as i64).saturating_add(moved).clamp(lo as i64, hi as i64) as i32;
        if *value != old {
            res |= Outcome::CHANGE;
        }

        let border_color = self.style_color(ControlKind::ScrollBar, Property::border_color(state));
        let base = self.style_color(ControlKind::Default, Property::BORDER_COLOR_DISABLED);
        self.draw.draw_frame(bounds, border, border_color, base);

        let slider_pad = self.style_value(ControlKind::ScrollBar, Property::SCROLL_SLIDER_PADDING);
        let mut thumb = thumb_rect(axis, track, thumb_len, *value, lo, hi);
        match axis {
            ScrollAxis::Vertical => {
                thumb.x += slider_pad;
                thumb.width -= 2 * slider_pad;
            }
            ScrollAxis::Horizontal => {
                thumb.y += slider_pad;
                thumb.height -= 2 * slider_pad;
            }
        }
        let thumb_color = self.style_color(ControlKind::Slider, Property::border_color(state));
        self.draw_rect(thumb, thumb_color);

        if config.arrows {
            let (back, fwd) = match axis {
                ScrollAxis::Vertical => (ICON_ARROW_UP, ICON_ARROW_DOWN),
                ScrollAxis::Horizontal => (ICON_ARROW_LEFT, ICON_ARROW_RIGHT),
            };
            let color = self.style_color(ControlKind::ScrollBar, Property::text_color(state));
            let size = self.icons().size();
            for (id, r) in [(back, arrow_back), (fwd, arrow_fwd)] {
                self.draw_icon(id, vec2(r.x + (r.width - size) / 2, r.y + (r.height - size) / 2), 1, color);
            }
        }
        res
    }

    /// Clipped view over `content`, with scroll bars appearing when the content overflows.
    ///
    /// `f` draws the content; it receives the view rectangle and the on-screen origin of
    /// the content. Drawing is clipped to the view.
    pub fn scroll_panel<F: FnOnce(&mut Context, Recti, Vec2i)>(&mut self, bounds: Recti, content: Dimensioni, panel: &mut ScrollPanel, f: F) -> Outcome {
        let border = self.style_value(ControlKind::Default, Property::BORDER_WIDTH);
        let bar_width = self.style_value(ControlKind::ListView, Property::SCROLLBAR_WIDTH);
        let left_side = self.style_value(ControlKind::ListView, Property::SCROLLBAR_SIDE) == 0;

        let mut has_h = content.width > bounds.width - 2 * border;
        let mut has_v = content.height > bounds.height - 2 * border;
        // one bar eats space from the other axis and may make it overflow too
        if !has_h {
            has_h = has_v && content.width > bounds.width - 2 * border - bar_width;
        }
        if !has_v {
            has_v = has_h && content.height > bounds.height - 2 * border - bar_width;
        }
        let h_width = if has_h { bar_width } else { 0 };
        let v_width = if has_v { bar_width } else { 0 };

        let inner_x = if left_side { bounds.x + border + v_width } else { bounds.x + border };
        let view = rect(inner_x, bounds.y + border, bounds.width - 2 * border - v_width, bounds.height - 2 * border - h_width);
        let h_bar = rect(inner_x, bounds.y + bounds.height - border - h_width, view.width, h_width);
        let v_bar = rect(if left_side { bounds.x + border } else { bounds.x + bounds.width - border - v_width }, bounds.y + border, v_width, view.height);
        let max_x = scrollbar_max_scroll(content.width, view.width);
        let max_y = scrollbar_max_scroll(content.height, view.height);

        let old = panel.scroll;
        let input = self.drag_input();
        let hovered = point_in_rect(input.pos, bounds);
        let mut state = self.passive_state();
        if self.active_drag().is_none() && self.input_live(None) && hovered {
            state = ControlState::Focused;
            let (wheel, shift) = {
                let i = self.input.borrow();
                (i.wheel(), i.is_key_down(Key::SHIFT))
            };
            let min_speed = self.settings().min_wheel_speed;
            let speed_x = (content.width / bounds.width.max(1)).max(min_speed);
            let speed_y = (content.height / bounds.height.max(1)).max(min_speed);
            if has_h {
                panel.scroll.x = panel.scroll.x.saturating_sub((if shift { wheel.y } else { wheel.x }).saturating_mul(speed_x));
            }
            if has_v && !shift {
                panel.scroll.y = panel.scroll.y.saturating_sub(wheel.y.saturating_mul(speed_y));
            }
        }
        panel.scroll.x = panel.scroll.x.clamp(0, max_x);
        panel.scroll.y = panel.scroll.y.clamp(0, max_y);

        let background = self.style_color(ControlKind::Default, Property::BACKGROUND_COLOR);
        self.draw_rect(view, background);
        panel.view = view;
        self.draw.push_clip_rect(view);
        f(self, view, vec2(view.x - panel.scroll.x, view.y - panel.scroll.y));
        self.draw.pop_clip_rect();

        let floor = self.settings().min_panel_thumb;
        let min_len = self.settings().min_scrollbar_length;
        if has_h {
            let config = BarConfig {
                thumb: ThumbSize::Proportional { view: view.width, content: content.width, floor },
                wheel: false,
                arrows: h_bar.width >= min_len && self.style_value(ControlKind::ScrollBar, Property::ARROWS_VISIBLE) != 0,
            };
            self.scroll_bar_with(h_bar, &mut panel.scroll.x, 0, max_x, &mut panel.horizontal, config);
        }
        if has_v {
            let config = BarConfig {
                thumb: ThumbSize::Proportional { view: view.height, content: content.height, floor },
                wheel: false,
                arrows: v_bar.height >= min_len && self.style_value(ControlKind::ScrollBar, Property::ARROWS_VISIBLE) != 0,
            };
            self.scroll_bar_with(v_bar, &mut panel.scroll.y, 0, max_y, &mut panel.vertical, config);
        }
        if has_h && has_v {
            let corner = rect(v_bar.x, h_bar.y, v_width, h_width);
            let color = self.style_color(ControlKind::Default, Property::BASE_COLOR_NORMAL);
            self.draw_rect(corner, color);
        }

        let border_color = self.style_color(ControlKind::ListView, Property::border_color(state));
        self.draw.draw_border(bounds, border, border_color);

        if panel.scroll.x != old.x || panel.scroll.y != old.y { Outcome::CHANGE } else { Outcome::NONE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::context;

    #[test]
    fn panel_thumb_keeps_a_minimum_size() {
        let mut ctx = context();
        let mut panel = ScrollPanel::new();
        ctx.frame(|ctx| {
            ctx.scroll_panel(rect(0, 0, 100, 40), Dimensioni::new(80, 100_000), &mut panel, |_, _, _| {});
        });
        // vertical bar at x 87, 12 wide: track of 36 inside its 1px border
        let thumb = ctx.style_color(ControlKind::Slider, Property::BORDER_COLOR_NORMAL);
        let found = ctx.commands().iter().any(|c| match c {
            Command::Rect { rect, color } => *color == thumb && rect.x == 88 && rect.width == 10 && rect.height == 16,
            _ => false,
        });
        assert!(found);
    }

    #[test]
    fn wheel_scrolls_and_clamps() {
        let mut ctx = context();
        let mut panel = ScrollPanel::new();
        let bounds = rect(0, 0, 100, 100);
        let content = Dimensioni::new(80, 400);
        let mut origin = vec2(0, 0);
        ctx.input.borrow_mut().mousemove(50, 50);
        ctx.input.borrow_mut().scroll(0, -3);
        let mut res = Outcome::NONE;
        ctx.frame(|ctx| res = ctx.scroll_panel(bounds, content, &mut panel, |_, _, o| origin = o));
        assert!(res.is_changed());
        assert_eq!(panel.scroll.y, 12);
        assert_eq!((origin.x, origin.y), (1, 1 - 12));
        let v = panel.view();
        assert_eq!((v.x, v.y, v.width, v.height), (1, 1, 86, 98));

        ctx.input.borrow_mut().scroll(0, -1000);
        ctx.frame(|ctx| res = ctx.scroll_panel(bounds, content, &mut panel, |_, _, _| {}));
        assert_eq!(panel.scroll.y, 302);
        assert_eq!(panel.scroll.x, 0);
    }

    #[test]
    fn overflow_on_one_axis_can_force_the_other() {
        let mut ctx = context();
        let mut panel = ScrollPanel::new();
        // 90 fits in 98, but not next to a 12px vertical bar
        ctx.frame(|ctx| {
            ctx.scroll_panel(rect(0, 0, 100, 100), Dimensioni::new(90, 400), &mut panel, |_, _, _| {});
        });
        let v = panel.view();
        assert_eq!((v.x, v.y, v.width, v.height), (1, 1, 86, 86));
    }

    #[test]
    fn content_is_clipped_to_the_view() {
        let mut ctx = context();
        let mut panel = ScrollPanel::new();
        ctx.frame(|ctx| {
            ctx.scroll_panel(rect(0, 0, 100, 100), Dimensioni::new(80, 400), &mut panel, |ctx, _, o| {
                ctx.draw_rect(rect(o.x, o.y + 90, 80, 40), Color::BLACK);
            });
        });
        let clipped = ctx.commands().iter().any(|c| matches!(c, Command::Rect { rect, color } if *color == Color::BLACK && rect.y == 91 && rect.height == 8));
        assert!(clipped);
    }

    #[test]
    fn scroll_bar_wheel_and_drag() {
        let mut ctx = context();
        let mut bar = ScrollBar::new(50, 0, 120);
        let bounds = rect(0, 0, 12, 100);
        ctx.input.borrow_mut().mousemove(6, 50);
        ctx.input.borrow_mut().scroll(0, 1);
        ctx.frame(|ctx| {
            ctx.scroll_bar(bounds, &mut bar);
        });
        // 120 / SCROLL_SPEED 12 = 10 per notch
        assert_eq!(bar.value, 40);

        ctx.input.borrow_mut().mousedown(6, 98, MouseButton::LEFT);
        ctx.frame(|ctx| {
            ctx.scroll_bar(bounds, &mut bar);
        });
        assert_eq!(bar.value, 120);
        assert!(bar.drag().is_some());
    }

    #[test]
    fn panel_thumb_floor_ignores_the_scroll_bar_slider_size() {
        let mut ctx = context();
        ctx.set_style(ControlKind::ScrollBar, Property::SCROLL_SLIDER_SIZE, 30).unwrap();
        let mut panel = ScrollPanel::new();
        ctx.frame(|ctx| {
            ctx.scroll_panel(rect(0, 0, 100, 40), Dimensioni::new(80, 100_000), &mut panel, |_, _, _| {});
        });
        let thumb = ctx.style_color(ControlKind::Slider, Property::BORDER_COLOR_NORMAL);
        let heights: Vec<i32> = ctx
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::Rect { rect, color } if *color == thumb && rect.x == 88 => Some(rect.height),
                _ => None,
            })
            .collect();
        assert_eq!(heights, vec![16]);
    }

    #[test]
    fn arrow_buttons_step_and_clamp() {
        let mut ctx = context();
        ctx.set_style(ControlKind::ScrollBar, Property::ARROWS_VISIBLE, 1).unwrap();
        let mut bar = ScrollBar::new(50, 0, 120);
        fn click(ctx: &mut Context, bar: &mut ScrollBar, x: i32, y: i32) -> Outcome {
            // 12 wide with a 1px border: arrows are 10px squares at y 1 and y 89
            let bounds = rect(0, 0, 12, 100);
            let mut res = Outcome::NONE;
            ctx.input.borrow_mut().mousedown(x, y, MouseButton::LEFT);
            ctx.frame(|ctx| res = ctx.scroll_bar(bounds, bar));
            ctx.input.borrow_mut().mouseup(x, y, MouseButton::LEFT);
            ctx.frame(|ctx| {
                ctx.scroll_bar(bounds, bar);
            });
            res
        }

        assert!(click(&mut ctx, &mut bar, 6, 5).is_changed());
        assert_eq!(bar.value, 40);
        click(&mut ctx, &mut bar, 6, 95);
        assert_eq!(bar.value, 50);
        assert!(bar.drag().is_none());

        bar.value = 4;
        click(&mut ctx, &mut bar, 6, 5);
        assert_eq!(bar.value, 0);
        assert!(!click(&mut ctx, &mut bar, 6, 5).is_changed());

        bar.value = 115;
        click(&mut ctx, &mut bar, 6, 95);
        assert_eq!(bar.value, 120);
    }

    #[test]
    fn full_i32_range_does_not_overflow() {
        let mut ctx = context();
        let mut bar = ScrollBar::new(0, i32::MIN, i32::MAX);
        let bounds = rect(0, 0, 12, 100);
        ctx.input.borrow_mut().mousemove(6, 50);
        ctx.input.borrow_mut().scroll(0, 1);
        ctx.frame(|ctx| {
            ctx.scroll_bar(bounds, &mut bar);
        });
        // u32::MAX / SCROLL_SPEED 12 per notch
        assert_eq!(bar.value, -357_913_941);

        ctx.input.borrow_mut().scroll(0, -i32::MAX);
        ctx.frame(|ctx| {
            ctx.scroll_bar(bounds, &mut bar);
        });
        assert_eq!(bar.value, i32::MAX);
    }
}
