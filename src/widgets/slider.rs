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

#[derive(Clone, Debug)]
/// Persistent state for slider widgets.
pub struct Slider {
    /// Current slider value.
    pub value: f32,
    /// Lower bound of the slider range.
    pub min: f32,
    /// Upper bound of the slider range.
    pub max: f32,
    drag: Option<DragHandle>,
}

impl Slider {
    /// Creates a slider over `[min, max]`.
    pub fn new(value: f32, min: f32, max: f32) -> Self { Self { value, min, max, drag: None } }

    /// Drag held by this slider, if any.
    pub fn drag(&self) -> Option<DragHandle> { self.drag }
}

pub(crate) fn clamp_to_range(v: f32, min: f32, max: f32) -> f32 { if min <= max { v.clamp(min, max) } else { v.clamp(max, min) } }

pub(crate) fn fraction_of(v: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range != 0.0 { ((v - min) / range).clamp(0.0, 1.0) } else { 0.0 }
}

/// Pointer sample used by drag-driven controls.
pub(crate) struct DragInput {
    pub(crate) pos: Vec2i,
    pub(crate) down: bool,
    pub(crate) pressed: bool,
}

/// Result of advancing a drag session by one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DragStep {
    /// Input is not processed for this control.
    Idle,
    /// The pointer is over the hit area, nothing is held.
    Hover,
    /// The drag runs; the pointer position drives the value.
    Dragging,
    /// The button went up this frame.
    Released,
}

impl Context {
    pub(crate) fn drag_input(&self) -> DragInput {
        let input = self.input.borrow();
        DragInput { pos: input.mouse_pos, down: input.mouse_down.is_left(), pressed: input.mouse_pressed.is_left() }
    }

    /// Shared drag protocol: a press on the hit area captures, the capture follows the pointer
    /// anywhere until the button goes up.
    pub(crate) fn drag_step(&mut self, drag: &mut Option<DragHandle>, bounds: Recti, hit: bool) -> DragStep {
        if !self.input_live(*drag) {
            return DragStep::Idle;
        }
        let input = self.drag_input();
        if let Some(h) = *drag {
            if self.is_dragging(h) {
                if input.down {
                    return DragStep::Dragging;
                }
                self.release_drag(h);
                *drag = None;
                return DragStep::Released;
            }
            // the capture was dropped behind our back
            *drag = None;
        }
        if !hit {
            return DragStep::Idle;
        }
        if input.pressed {
            if let Some(h) = self.begin_drag(bounds) {
                *drag = Some(h);
                return DragStep::Dragging;
            }
        }
        DragStep::Hover
    }

    /// Slider with a selector of `SLIDER_WIDTH` pixels.
    pub fn slider(&mut self, bounds: Recti, text_left: &str, text_right: &str, slider: &mut Slider) -> Outcome {
        let selector = self.style_value(ControlKind::Slider, Property::SLIDER_WIDTH);
        self.slider_pro(bounds, text_left, text_right, slider, selector)
    }

    /// Slider drawn as a bar filled up to the value.
    pub fn slider_bar(&mut self, bounds: Recti, text_left: &str, text_right: &str, slider: &mut Slider) -> Outcome {
        self.slider_pro(bounds, text_left, text_right, slider, 0)
    }

    fn slider_selector(&mut self, bounds: Recti, slider: &Slider, selector: i32) -> Recti {
        let border = self.style_value(ControlKind::Slider, Property::BORDER_WIDTH);
        let padding = self.style_value(ControlKind::Slider, Property::SLIDER_PADDING);
        let t = fraction_of(slider.value, slider.min, slider.max);
        let y = bounds.y + border + padding;
        let h = (bounds.height - 2 * (border + padding)).max(0);
        if selector > 0 {
            let travel = (bounds.width - 2 * border - selector).max(0);
            rect(bounds.x + border + (t * travel as f32) as i32, y, selector, h)
        } else {
            rect(bounds.x + border, y, (t * (bounds.width - 2 * border).max(0) as f32) as i32, h)
        }
    }

    fn slider_pro(&mut self, bounds: Recti, text_left: &str, text_right: &str, slider: &mut Slider, selector: i32) -> Outcome {
        let old = slider.value;
        slider.value = clamp_to_range(slider.value, slider.min, slider.max);
        let sel = self.slider_selector(bounds, slider, selector);
        let pos = self.drag_input().pos;
        let hit = point_in_rect(pos, bounds) || point_in_rect(pos, sel);

        let mut res = Outcome::NONE;
        let mut state = self.passive_state();
        match self.drag_step(&mut slider.drag, bounds, hit) {
            DragStep::Dragging => {
                state = ControlState::Pressed;
                slider.value = value_from_pointer(pos.x, bounds.x, bounds.width, selector, slider.min, slider.max);
            }
            DragStep::Hover => state = ControlState::Focused,
            DragStep::Released => res |= Outcome::SUBMIT,
            DragStep::Idle => (),
        }
        if slider.value != old {
            res |= Outcome::CHANGE;
        }

        let border_width = self.style_value(ControlKind::Slider, Property::BORDER_WIDTH);
        let border = self.style_color(ControlKind::Slider, Property::border_color(state));
        let base_state = if state == ControlState::Disabled { ControlState::Disabled } else { ControlState::Normal };
        let base = self.style_color(ControlKind::Slider, Property::base_color(base_state));
        self.draw.draw_frame(bounds, border_width, border, base);

        let sel = self.slider_selector(bounds, slider, selector);
        let fill = match state {
            ControlState::Normal => self.style_color(ControlKind::Slider, Property::BASE_COLOR_PRESSED),
            ControlState::Disabled => self.style_color(ControlKind::Slider, Property::BASE_COLOR_DISABLED),
            s => self.style_color(ControlKind::Slider, Property::text_color(s)),
        };
        self.draw_rect(sel, fill);
        self.draw_side_texts(ControlKind::Slider, bounds, text_left, text_right, state);
        self.draw_tooltip(bounds, state);
        res
    }
}
