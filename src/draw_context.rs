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

/// Rectangle large enough to never clip anything.
pub(crate) const UNCLIPPED_RECT: Recti = Recti { x: 0, y: 0, width: 0x1000000, height: 0x1000000 };

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Corner colors of a gradient rectangle.
pub struct GradientCorners {
    /// Top-left corner.
    pub top_left: Color,
    /// Bottom-left corner.
    pub bottom_left: Color,
    /// Bottom-right corner.
    pub bottom_right: Color,
    /// Top-right corner.
    pub top_right: Color,
}

impl GradientCorners {
    /// Left to right gradient.
    pub fn horizontal(left: Color, right: Color) -> Self { Self { top_left: left, bottom_left: left, bottom_right: right, top_right: right } }

    /// Top to bottom gradient.
    pub fn vertical(top: Color, bottom: Color) -> Self { Self { top_left: top, bottom_left: bottom, bottom_right: bottom, top_right: top } }
}

#[derive(Clone, Debug)]
/// Draw command recorded by the controls and replayed by [`Context::render`].
pub enum Command {
    /// Sets the scissor rectangle for the commands that follow.
    Clip {
        /// Scissor rectangle.
        rect: Recti,
    },
    /// Filled rectangle.
    Rect {
        /// Target rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Rectangle with per-corner colors.
    Gradient {
        /// Target rectangle.
        rect: Recti,
        /// Corner colors.
        corners: GradientCorners,
    },
    /// Glyph copied from the font atlas.
    Glyph {
        /// Codepoint drawn.
        codepoint: u32,
        /// Source rectangle inside the atlas.
        src: Recti,
        /// Target rectangle.
        dst: Recti,
        /// Tint.
        color: Color,
    },
}

/// Drawing capability surface consumed by [`Context::render`].
pub trait Renderer {
    /// Restricts the following draws to `rect`.
    fn set_clip(&mut self, rect: Recti);
    /// Fills a rectangle.
    fn draw_rect(&mut self, rect: Recti, color: Color);
    /// Fills a rectangle with interpolated corner colors.
    fn draw_gradient(&mut self, rect: Recti, corners: GradientCorners);
    /// Copies `src` from the atlas texture into `dst`, tinted with `color`.
    fn draw_glyph(&mut self, atlas: &FontAtlas, src: Recti, dst: Recti, color: Color);
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub(crate) enum Clip {
    None,
    Part,
    All,
}

#[derive(Default)]
pub(crate) struct DrawList {
    commands: Vec<Command>,
    clip_stack: Vec<Recti>,
}

impl DrawList {
    pub(crate) fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    pub(crate) fn commands(&self) -> &[Command] { &self.commands }

    pub(crate) fn take_commands(&mut self) -> Vec<Command> { std::mem::take(&mut self.commands) }

    pub(crate) fn current_clip_rect(&self) -> Recti { self.clip_stack.last().copied().unwrap_or(UNCLIPPED_RECT) }

    pub(crate) fn push_clip_rect(&mut self, rect: Recti) {
        let last = self.current_clip_rect();
        self.clip_stack.push(rect.intersect(&last).unwrap_or_default());
    }

    pub(crate) fn pop_clip_rect(&mut self) { self.clip_stack.pop(); }

    fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    fn set_clip(&mut self, rect: Recti) { self.push_command(Command::Clip { rect }); }

    pub(crate) fn check_clip(&self, r: Recti) -> Clip {
        let cr = self.current_clip_rect();
        if r.x > cr.x + cr.width || r.x + r.width < cr.x || r.y > cr.y + cr.height || r.y + r.height < cr.y {
            return Clip::All;
        }
        if r.x >= cr.x && r.x + r.width <= cr.x + cr.width && r.y >= cr.y && r.y + r.height <= cr.y + cr.height {
            return Clip::None;
        }
        Clip::Part
    }

    pub(crate) fn draw_rect(&mut self, rect: Recti, color: Color) {
        if color.a == 0 {
            return;
        }
        let rect = rect.intersect(&self.current_clip_rect()).unwrap_or_default();
        if rect.width > 0 && rect.height > 0 {
            self.push_command(Command::Rect { rect, color });
        }
    }

    /// Border of `width` pixels drawn inside `r`.
    pub(crate) fn draw_border(&mut self, r: Recti, width: i32, color: Color) {
        if width <= 0 {
            return;
        }
        self.draw_rect(rect(r.x, r.y, r.width, width), color);
        self.draw_rect(rect(r.x, r.y + r.height - width, r.width, width), color);
        self.draw_rect(rect(r.x, r.y + width, width, r.height - 2 * width), color);
        self.draw_rect(rect(r.x + r.width - width, r.y + width, width, r.height - 2 * width), color);
    }

    /// Filled rectangle with a border, the fill covering only the inside of the border.
    pub(crate) fn draw_frame(&mut self, r: Recti, border_width: i32, border: Color, base: Color) {
        self.draw_rect(expand_rect(r, -border_width.max(0)), base);
        self.draw_border(r, border_width, border);
    }

    fn clipped<F: FnOnce(&mut Self)>(&mut self, r: Recti, f: F) {
        let clipped = self.check_clip(r);
        match clipped {
            Clip::All => return,
            Clip::Part => {
                let clip = self.current_clip_rect();
                self.set_clip(clip)
            }
            _ => (),
        }
        f(self);
        if clipped != Clip::None {
            self.set_clip(UNCLIPPED_RECT);
        }
    }

    pub(crate) fn draw_gradient(&mut self, rect: Recti, corners: GradientCorners) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        self.clipped(rect, |d| d.push_command(Command::Gradient { rect, corners }));
    }

    pub(crate) fn draw_glyph(&mut self, codepoint: u32, src: Recti, dst: Recti, color: Color) {
        if dst.width <= 0 || dst.height <= 0 || color.a == 0 {
            return;
        }
        self.clipped(dst, |d| d.push_command(Command::Glyph { codepoint, src, dst, color }));
    }

    /// Replays the recorded commands into `renderer` and empties the list.
    pub(crate) fn render<R: Renderer>(&mut self, atlas: &FontAtlas, renderer: &mut R) {
        for cmd in self.take_commands() {
            match cmd {
                Command::Clip { rect } => renderer.set_clip(rect),
                Command::Rect { rect, color } => renderer.draw_rect(rect, color),
                Command::Gradient { rect, corners } => renderer.draw_gradient(rect, corners),
                Command::Glyph { src, dst, color, .. } => renderer.draw_glyph(atlas, src, dst, color),
            }
        }
    }
}
