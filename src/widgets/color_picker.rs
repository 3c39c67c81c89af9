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
use crate::widgets::slider::DragStep;
use crate::*;

/// Side of one checkerboard square behind the alpha bar.
const ALPHA_CHECKED_SIZE: i32 = 10;

#[derive(Clone, Debug, Default)]
/// Persistent state for the saturation/value panel.
pub struct ColorPanel {
    /// Edited color. The hue is kept even when saturation or value reach zero.
    pub hsv: Hsv,
    drag: Option<DragHandle>,
}

impl ColorPanel {
    /// Creates a panel over `hsv`.
    pub fn new(hsv: Hsv) -> Self { Self { hsv, drag: None } }
}

#[derive(Clone, Debug, Default)]
/// Persistent state for the hue and alpha bars.
pub struct ColorBar {
    /// Hue in degrees for a hue bar, alpha in `[0, 1]` for an alpha bar.
    pub value: f32,
    drag: Option<DragHandle>,
}

impl ColorBar {
    /// Creates a bar holding `value`.
    pub fn new(value: f32) -> Self { Self { value, drag: None } }
}

#[derive(Clone, Debug, Default)]
struct PickerDrags {
    panel: Option<DragHandle>,
    hue: Option<DragHandle>,
}

#[derive(Clone, Debug, Default)]
/// Persistent state for the HSV-native picker.
pub struct ColorPickerHsv {
    /// Edited color.
    pub hsv: Hsv,
    drags: PickerDrags,
}

impl ColorPickerHsv {
    /// Creates a picker over `hsv`.
    pub fn new(hsv: Hsv) -> Self { Self { hsv, drags: PickerDrags::default() } }
}

#[derive(Clone, Debug, Default)]
/// Persistent state for the RGB-native picker.
///
/// The color is converted to HSV on every call, so the hue of a gray cannot be kept.
/// Use [`ColorPickerHsv`] when it matters.
pub struct ColorPicker {
    /// Edited color. Alpha passes through untouched.
    pub color: Color,
    drags: PickerDrags,
}

impl ColorPicker {
    /// Creates a picker over `color`.
    pub fn new(color: Color) -> Self { Self { color, drags: PickerDrags::default() } }
}

fn hue_color(hue: f32) -> Color { Color::from_hsv(Hsv::new(hue, 1.0, 1.0), 255) }

fn white() -> Color { color(255, 255, 255, 255) }

fn black() -> Color { color(0, 0, 0, 255) }

impl Context {
    fn color_panel_pro(&mut self, bounds: Recti, hsv: &mut Hsv, drag: &mut Option<DragHandle>) -> Outcome {
        let old = *hsv;
        let pos = self.drag_input().pos;
        let mut res = Outcome::NONE;
        let mut state = self.passive_state();
        match self.drag_step(drag, bounds, point_in_rect(pos, bounds)) {
            DragStep::Dragging => {
                state = ControlState::Pressed;
                hsv.s = value_from_pointer(pos.x, bounds.x, bounds.width, 0, 0.0, 1.0);
                hsv.v = 1.0 - value_from_pointer(pos.y, bounds.y, bounds.height, 0, 0.0, 1.0);
            }
            DragStep::Hover => state = ControlState::Focused,
            DragStep::Released => res |= Outcome::SUBMIT,
            DragStep::Idle => (),
        }
        if *hsv != old {
            res |= Outcome::CHANGE;
        }

        self.draw_gradient(bounds, GradientCorners::horizontal(white(), hue_color(hsv.h)));
        self.draw_gradient(bounds, GradientCorners::vertical(color(0, 0, 0, 0), black()));

        let size = self.style_value(ControlKind::ColorPicker, Property::COLOR_SELECTOR_SIZE);
        let cx = bounds.x + (hsv.s * bounds.width as f32) as i32;
        let cy = bounds.y + ((1.0 - hsv.v) * bounds.height as f32) as i32;
        let selector = self.style_color(ControlKind::ColorPicker, Property::text_color(state));
        self.draw_rect(rect(cx - size / 2, cy - size / 2, size, size), selector);

        let border_width = self.style_value(ControlKind::ColorPicker, Property::BORDER_WIDTH);
        let border = self.style_color(ControlKind::ColorPicker, Property::border_color(state));
        self.draw.draw_border(bounds, border_width, border);
        self.draw_tooltip(bounds, state);
        res
    }

    /// Bar mapping the pointer to `value` in `[0, max]` top to bottom, or left to
    /// right for a horizontal one. Returns the outcome and the state to draw with.
    fn color_bar_pro(&mut self, bounds: Recti, hit: Recti, value: &mut f32, max: f32, vertical: bool, drag: &mut Option<DragHandle>) -> (Outcome, ControlState) {
        let old = *value;
        let pos = self.drag_input().pos;
        let mut res = Outcome::NONE;
        let mut state = self.passive_state();
        match self.drag_step(drag, bounds, point_in_rect(pos, hit)) {
            DragStep::Dragging => {
                state = ControlState::Pressed;
                *value = if vertical {
                    value_from_pointer(pos.y, bounds.y, bounds.height, 0, 0.0, max)
                } else {
                    value_from_pointer(pos.x, bounds.x, bounds.width, 0, 0.0, max)
                };
            }
            DragStep::Hover => state = ControlState::Focused,
            DragStep::Released => res |= Outcome::SUBMIT,
            DragStep::Idle => (),
        }
        if *value != old {
            res |= Outcome::CHANGE;
        }
        (res, state)
    }

    fn hue_bar_pro(&mut self, bounds: Recti, hue: &mut f32, drag: &mut Option<DragHandle>) -> Outcome {
        let overflow = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_OVERFLOW);
        let sel_h = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_HEIGHT);
        *hue = hue.clamp(0.0, 359.0);
        let selector = |hue: f32| rect(bounds.x - overflow, bounds.y + (hue / 360.0 * bounds.height as f32) as i32 - sel_h / 2, bounds.width + 2 * overflow, sel_h);
        let hit = crate::widgets::basic::union_rect(bounds, selector(*hue));
        let (res, state) = self.color_bar_pro(bounds, hit, hue, 359.0, true, drag);

        // six hue sectors, each a vertical gradient between two primaries
        let seg = bounds.height / 6;
        for i in 0..6 {
            let y = bounds.y + i * seg;
            let h = if i == 5 { bounds.height - 5 * seg } else { seg };
            let top = hue_color(i as f32 * 60.0);
            let bottom = hue_color(((i + 1) % 6) as f32 * 60.0);
            self.draw_gradient(rect(bounds.x, y, bounds.width, h), GradientCorners::vertical(top, bottom));
        }
        let border_width = self.style_value(ControlKind::ColorPicker, Property::BORDER_WIDTH);
        let border = self.style_color(ControlKind::ColorPicker, Property::border_color(state));
        self.draw.draw_border(bounds, border_width, border);

        let base = self.style_color(ControlKind::ColorPicker, Property::base_color(state));
        self.draw.draw_frame(selector(*hue), border_width, border, base);
        self.draw_tooltip(bounds, state);
        res
    }

    /// Saturation/value square for the hue of `panel.hsv`.
    pub fn color_panel_hsv(&mut self, bounds: Recti, panel: &mut ColorPanel) -> Outcome { self.color_panel_pro(bounds, &mut panel.hsv, &mut panel.drag) }

    /// Vertical hue bar, `bar.value` in degrees `[0, 359]`.
    pub fn color_bar_hue(&mut self, bounds: Recti, bar: &mut ColorBar) -> Outcome { self.hue_bar_pro(bounds, &mut bar.value, &mut bar.drag) }

    /// Horizontal alpha bar over a checkerboard, `bar.value` in `[0, 1]`.
    pub fn color_bar_alpha(&mut self, bounds: Recti, bar: &mut ColorBar) -> Outcome {
        bar.value = bar.value.clamp(0.0, 1.0);
        let (res, state) = self.color_bar_pro(bounds, bounds, &mut bar.value, 1.0, false, &mut bar.drag);

        let light = self.style_color(ControlKind::Default, Property::BASE_COLOR_NORMAL);
        let dark = self.style_color(ControlKind::Default, Property::BORDER_COLOR_NORMAL);
        let cols = (bounds.width + ALPHA_CHECKED_SIZE - 1) / ALPHA_CHECKED_SIZE;
        let rows = (bounds.height + ALPHA_CHECKED_SIZE - 1) / ALPHA_CHECKED_SIZE;
        self.draw.push_clip_rect(bounds);
        for j in 0..rows {
            for i in 0..cols {
                let c = if (i + j) % 2 == 0 { light } else { dark };
                self.draw_rect(rect(bounds.x + i * ALPHA_CHECKED_SIZE, bounds.y + j * ALPHA_CHECKED_SIZE, ALPHA_CHECKED_SIZE, ALPHA_CHECKED_SIZE), c);
            }
        }
        self.draw.pop_clip_rect();
        self.draw_gradient(bounds, GradientCorners::horizontal(color(255, 255, 255, 0), black()));

        let border_width = self.style_value(ControlKind::ColorPicker, Property::BORDER_WIDTH);
        let border = self.style_color(ControlKind::ColorPicker, Property::border_color(state));
        self.draw.draw_border(bounds, border_width, border);

        let overflow = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_OVERFLOW);
        let sel_w = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_HEIGHT);
        let x = bounds.x + (bar.value * bounds.width as f32) as i32 - sel_w / 2;
        let base = self.style_color(ControlKind::ColorPicker, Property::base_color(state));
        self.draw.draw_frame(rect(x, bounds.y - overflow, sel_w, bounds.height + 2 * overflow), border_width, border, base);
        self.draw_tooltip(bounds, state);
        res
    }

    fn picker_pro(&mut self, bounds: Recti, hsv: &mut Hsv, drags: &mut PickerDrags) -> Outcome {
        let padding = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_PADDING);
        let width = self.style_value(ControlKind::ColorPicker, Property::HUEBAR_WIDTH);
        let bar = rect(bounds.x + bounds.width + padding, bounds.y, width, bounds.height);
        let mut res = self.hue_bar_pro(bar, &mut hsv.h, &mut drags.hue);
        res |= self.color_panel_pro(bounds, hsv, &mut drags.panel);
        res
    }

    /// Saturation/value panel with the hue bar on its right, editing HSV directly.
    pub fn color_picker_hsv(&mut self, bounds: Recti, picker: &mut ColorPickerHsv) -> Outcome { self.picker_pro(bounds, &mut picker.hsv, &mut picker.drags) }

    /// Same layout as [`Context::color_picker_hsv`] over an RGB color.
    pub fn color_picker(&mut self, bounds: Recti, picker: &mut ColorPicker) -> Outcome {
        let mut hsv = picker.color.to_hsv();
        let res = self.picker_pro(bounds, &mut hsv, &mut picker.drags);
        if res.is_changed() {
            picker.color = Color::from_hsv(hsv, picker.color.a);
        }
        res
    }
}
