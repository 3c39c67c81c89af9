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
/// Engine constants that are not part of the style table.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Maximum number of `\n` separated lines laid out per text call.
    pub max_text_lines: usize,
    /// Frames a repeatable key has to be held before auto-repeat kicks in.
    pub repeat_cooldown: u32,
    /// Frames between two auto-repeated actions once the cooldown elapsed.
    pub repeat_delay: u32,
    /// Side of an icon cell, in icon pixels.
    pub icon_size: i32,
    /// Gap between an icon and the text that follows it.
    pub icon_text_gap: i32,
    /// Distance between a control and its tooltip.
    pub tooltip_margin: i32,
    /// Maximum number of characters typed into a value box.
    pub value_box_max_chars: usize,
    /// Minimum length of a scroll panel scrollbar.
    pub min_scrollbar_length: i32,
    /// Shortest thumb a scroll panel scrollbar shrinks to.
    pub min_panel_thumb: i32,
    /// Minimum number of units a wheel notch moves.
    pub min_wheel_speed: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_text_lines: 128,
            repeat_cooldown: 40,
            repeat_delay: 1,
            icon_size: 16,
            icon_text_gap: 4,
            tooltip_margin: 4,
            value_box_max_chars: 32,
            min_scrollbar_length: 40,
            min_panel_thumb: 16,
            min_wheel_speed: 1,
        }
    }
}
