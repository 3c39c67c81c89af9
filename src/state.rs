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
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
/// Visual state of a control, recomputed on every call.
pub enum ControlState {
    #[default]
    /// Idle.
    Normal = 0,
    /// Pointer over the control.
    Focused = 1,
    /// Pointer over the control with the button held.
    Pressed = 2,
    /// Drawn with the disabled palette, ignores input.
    Disabled = 3,
}

#[derive(Copy, Clone, Debug, Default)]
/// Pointer facts a control samples against its own hit area.
pub struct PointerSample {
    /// The pointer lies inside the hit area.
    pub inside: bool,
    /// The left button is held.
    pub down: bool,
    /// The left button went down this frame.
    pub pressed: bool,
    /// The left button went up this frame.
    pub released: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Result of resolving a control's state for the current call.
pub struct Interaction {
    /// State used to pick the palette.
    pub state: ControlState,
    /// Input is processed by the control this call.
    pub live: bool,
    /// The activation edge fired (release inside the hit area).
    pub activated: bool,
}

/// Resolves a control state.
///
/// Disabled wins over everything. A locked session, or a drag owned by another control,
/// keeps the session state and processes no input. Otherwise the pointer decides between
/// focused and pressed.
pub fn derive_interaction(session: ControlState, locked: bool, foreign_drag: bool, pointer: PointerSample) -> Interaction {
    if session == ControlState::Disabled {
        return Interaction { state: ControlState::Disabled, live: false, activated: false };
    }
    if locked || foreign_drag {
        return Interaction { state: session, live: false, activated: false };
    }
    if !pointer.inside {
        return Interaction { state: session, live: true, activated: false };
    }
    let state = if pointer.down { ControlState::Pressed } else { ControlState::Focused };
    Interaction { state, live: true, activated: pointer.released }
}

#[derive(Clone, Debug)]
/// Global session flags shared by every control of a context.
pub struct Session {
    pub(crate) state: ControlState,
    pub(crate) locked: bool,
    pub(crate) alpha: f32,
    pub(crate) icon_scale: i32,
    pub(crate) tooltip_enabled: bool,
    pub(crate) tooltip: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: ControlState::Normal,
            locked: false,
            alpha: 1.0,
            icon_scale: 1,
            tooltip_enabled: false,
            tooltip: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(down: bool, released: bool) -> PointerSample { PointerSample { inside: true, down, pressed: false, released } }

    #[test]
    fn disabled_session_ignores_pointer() {
        let r = derive_interaction(ControlState::Disabled, false, false, inside(true, false));
        assert_eq!(r.state, ControlState::Disabled);
        assert!(!r.live);
    }

    #[test]
    fn lock_and_foreign_drag_suppress_input() {
        let locked = derive_interaction(ControlState::Normal, true, false, inside(false, true));
        assert_eq!(locked, Interaction { state: ControlState::Normal, live: false, activated: false });
        let dragged = derive_interaction(ControlState::Normal, false, true, inside(true, false));
        assert_eq!(dragged.state, ControlState::Normal);
        assert!(!dragged.live);
    }

    #[test]
    fn hover_press_release() {
        assert_eq!(derive_interaction(ControlState::Normal, false, false, inside(false, false)).state, ControlState::Focused);
        assert_eq!(derive_interaction(ControlState::Normal, false, false, inside(true, false)).state, ControlState::Pressed);
        assert!(derive_interaction(ControlState::Normal, false, false, inside(false, true)).activated);
        let outside = PointerSample { inside: false, down: false, pressed: false, released: true };
        assert!(!derive_interaction(ControlState::Normal, false, false, outside).activated);
    }
}
