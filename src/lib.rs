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
#![deny(missing_docs)]
//! `rgui-redux` is the interaction and text core of an immediate-mode GUI.
//! Every frame the host calls one method per visible control, passing its bounds and the
//! caller-owned state it edits. The engine derives the interaction state from the input
//! snapshot, mutates the bound state in place, records draw commands for a pluggable
//! [`Renderer`] and reports what happened through an [`Outcome`].
//!
//! There is no retained widget tree: the only state kept between frames is the style table,
//! the single active drag capture and the single text edit session, all owned by [`Context`].

use std::collections::VecDeque;

mod atlas;
mod color;
mod context;
mod drag;
mod draw_context;
mod error;
mod icons;
mod scrollbar;
mod settings;
mod state;
mod style;
mod style_file;
mod text_edit;
mod text_layout;
mod utf8;
mod widgets;

pub use atlas::*;
pub use color::*;
pub use context::Context;
pub use drag::{DragHandle, value_from_pointer};
pub use draw_context::{Command, GradientCorners, Renderer};
pub use error::*;
pub use icons::*;
pub use rs_math3d::*;
pub use scrollbar::{ScrollAxis, scroll_thumb_length};
pub use settings::Settings;
pub use state::*;
pub use style::*;
pub use style_file::*;
pub use text_edit::{EditHandle, EditSession, KeyRepeat, RepeatFamily};
pub use text_layout::*;
pub use utf8::*;
pub use widgets::*;

use bitflags::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Result bits returned by every control call.
    pub struct Outcome : u32 {
        /// The control submitted its content (editing finished with Enter or a click outside).
        const SUBMIT = 4;
        /// The bound value changed during this call.
        const CHANGE = 2;
        /// The activation edge of the control fired this call (click, toggle, edit toggle).
        const ACTIVATE = 1;
        /// Nothing happened.
        const NONE = 0;
    }
}

impl Outcome {
    /// Returns `true` if the activation edge fired.
    pub fn is_activated(&self) -> bool { self.intersects(Self::ACTIVATE) }
    /// Returns `true` if the bound value changed.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the control submitted.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if no bit is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Integer activation code: `1` when the control activated this call, `0` otherwise.
    pub fn code(&self) -> i32 {
        if self.is_activated() { 1 } else { 0 }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse button is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Keys the controls react to.
    pub struct Key : u32 {
        /// Control modifier.
        const CTRL = 1024;
        /// Shift modifier.
        const SHIFT = 512;
        /// Return/Enter key.
        const ENTER = 256;
        /// Backspace key.
        const BACKSPACE = 128;
        /// Delete key.
        const DELETE = 64;
        /// End key.
        const END = 32;
        /// Home key.
        const HOME = 16;
        /// Right arrow key.
        const RIGHT = 8;
        /// Left arrow key.
        const LEFT = 4;
        /// Down arrow key.
        const DOWN = 2;
        /// Up arrow key.
        const UP = 1;
        /// No key.
        const NONE = 0;
    }
}

impl Key {
    /// Returns `true` if no key is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

/// Typed characters kept between frames; text controls consume one per call.
pub const MAX_QUEUED_CHARS: usize = 16;

#[derive(Clone, Debug)]
/// Aggregates raw input collected during the current frame.
///
/// Transition edges (pressed/released, wheel) are cleared when the frame ends; typed characters stay queued until consumed.
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    scroll_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
    mouse_released: MouseButton,
    key_down: Key,
    key_pressed: Key,
    chars: VecDeque<char>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            mouse_released: MouseButton::NONE,
            key_down: Key::NONE,
            key_pressed: Key::NONE,
            chars: VecDeque::new(),
        }
    }
}

impl Input {
    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
        self.mouse_released |= btn;
    }

    /// Accumulates scroll wheel movement, in notches.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Records that a key was pressed.
    pub fn keydown(&mut self, key: Key) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    /// Records that a key was released.
    pub fn keyup(&mut self, key: Key) { self.key_down &= !key; }

    /// Queues a typed character. Characters beyond the queue capacity are dropped.
    pub fn char_input(&mut self, ch: char) {
        if self.chars.len() < MAX_QUEUED_CHARS {
            self.chars.push_back(ch);
        }
    }

    /// Queues every character of a UTF-8 string.
    pub fn text(&mut self, text: &str) {
        for ch in text.chars() {
            self.char_input(ch);
        }
    }

    /// Returns the current pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// Returns the currently held mouse buttons.
    pub fn mouse_down(&self) -> MouseButton { self.mouse_down }

    /// Returns the buttons pressed this frame.
    pub fn mouse_pressed(&self) -> MouseButton { self.mouse_pressed }

    /// Returns the buttons released this frame.
    pub fn mouse_released(&self) -> MouseButton { self.mouse_released }

    /// Returns the keys currently held.
    pub fn key_down(&self) -> Key { self.key_down }

    /// Returns the keys pressed this frame.
    pub fn key_pressed(&self) -> Key { self.key_pressed }

    /// Returns `true` if every key in `key` is held.
    pub fn is_key_down(&self, key: Key) -> bool { self.key_down.contains(key) }

    /// Returns `true` if any key in `key` was pressed this frame.
    pub fn is_key_pressed(&self, key: Key) -> bool { self.key_pressed.intersects(key) }

    /// Returns the 2-axis wheel movement accumulated this frame.
    pub fn wheel(&self) -> Vec2i { self.scroll_delta }

    /// Returns the dominant wheel axis movement (vertical unless horizontal is larger).
    pub fn wheel_move(&self) -> i32 {
        if self.scroll_delta.x.abs() > self.scroll_delta.y.abs() { self.scroll_delta.x } else { self.scroll_delta.y }
    }

    /// Returns the number of characters still queued this frame.
    pub fn pending_chars(&self) -> usize { self.chars.len() }

    pub(crate) fn pop_char(&mut self) -> Option<char> { self.chars.pop_front() }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_pressed = Key::NONE;
        self.mouse_pressed = MouseButton::NONE;
        self.mouse_released = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Returns `true` when `p` lies inside `r` (left/top edges inclusive, right/bottom exclusive).
pub fn point_in_rect(p: Vec2i, r: Recti) -> bool { p.x >= r.x && p.x < r.x + r.width && p.y >= r.y && p.y < r.y + r.height }
