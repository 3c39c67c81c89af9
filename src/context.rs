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
use std::{cell::RefCell, rc::Rc};

use log::{debug, warn};

use crate::draw_context::DrawList;
use crate::drag::DragTracker;
use crate::text_edit::EditTracker;
use crate::*;

/// Primary entry point: owns the style table, the session flags, the drag and edit
/// sessions and the command list the controls draw into.
pub struct Context {
    style: StyleStore,
    settings: Settings,
    session: Session,
    atlas: AtlasHandle,
    icons: IconSet,
    pub(crate) drag: DragTracker,
    pub(crate) edit: EditTracker,
    pub(crate) draw: DrawList,
    viewport: Dimensioni,
    frame: usize,

    /// Shared pointer to the input state driving this context.
    pub input: Rc<RefCell<Input>>,
}

impl Context {
    /// Creates a context drawing with `atlas` on a surface of `viewport` pixels.
    pub fn new(atlas: AtlasHandle, viewport: Dimensioni) -> Self {
        Self {
            style: StyleStore::new(),
            settings: Settings::default(),
            session: Session::default(),
            atlas,
            icons: IconSet::builtin(),
            drag: DragTracker::default(),
            edit: EditTracker::default(),
            draw: DrawList::default(),
            viewport,
            frame: 0,

            input: Rc::new(RefCell::new(Input::default())),
        }
    }

    #[inline(never)]
    fn frame_begin(&mut self) {
        self.input.borrow_mut().prelude();
        self.draw.clear();
        self.frame += 1;
    }

    #[inline(never)]
    fn frame_end(&mut self) {
        let button_down = !self.input.borrow().mouse_down.is_none();
        self.drag.clear_orphan(button_down);
        self.input.borrow_mut().epilogue();
    }

    /// Runs the controls of a single frame between the input bookkeeping.
    /// The recorded commands stay available until [`Context::render`] or the next frame.
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.frame_begin();

        // execute the frame function
        f(self);

        self.frame_end();
    }

    /// Number of frames run so far.
    pub fn frame_index(&self) -> usize { self.frame }

    /// Size of the drawing surface.
    pub fn viewport(&self) -> Dimensioni { self.viewport }

    /// Resizes the drawing surface.
    pub fn set_viewport(&mut self, viewport: Dimensioni) { self.viewport = viewport; }

    /// Commands recorded by the last frame.
    pub fn commands(&self) -> &[Command] { self.draw.commands() }

    /// Moves the recorded commands out, for hosts replaying them without a [`Renderer`].
    pub fn take_commands(&mut self) -> Vec<Command> { self.draw.take_commands() }

    /// Replays the recorded commands into `renderer` and drains them.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) {
        let atlas = self.atlas.clone();
        self.draw.render(&atlas, renderer);
    }

    /// Engine constants.
    pub fn settings(&self) -> &Settings { &self.settings }

    /// Mutable engine constants.
    pub fn settings_mut(&mut self) -> &mut Settings { &mut self.settings }

    /// Style property table; reads load the default style on first use.
    pub fn style_mut(&mut self) -> &mut StyleStore { &mut self.style }

    /// Writes a style property, see [`StyleStore::set`].
    pub fn set_style(&mut self, kind: ControlKind, property: Property, value: u32) -> Result<(), StyleError> { self.style.set(kind, property, value) }

    /// Reads a style property, see [`StyleStore::get`].
    pub fn get_style(&mut self, kind: ControlKind, property: Property) -> Result<u32, StyleError> { self.style.get(kind, property) }

    /// Loads a style asset, text or binary, and applies its records.
    ///
    /// On error the style table is left untouched. An embedded font is handed back to the host.
    pub fn load_style(&mut self, data: &[u8]) -> Result<Option<EmbeddedFont>> {
        let asset = parse_style(data).map_err(|e| {
            warn!("style asset rejected: {}", e);
            e
        })?;
        self.apply_style_records(&asset.records)?;
        Ok(asset.embedded_font)
    }

    /// Loads a text style asset. A custom font line is handed back to the host.
    pub fn load_style_text(&mut self, text: &str) -> Result<Option<FontRequest>> {
        let asset = parse_style_text(text).map_err(|e| {
            warn!("style asset rejected: {}", e);
            e
        })?;
        self.apply_style_records(&asset.records)?;
        Ok(asset.font_request)
    }

    fn apply_style_records(&mut self, records: &[StyleRecord]) -> Result<()> {
        if let Err(e) = self.style.apply_records(records) {
            warn!("style asset rejected: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Replaces the icon set with a binary icon asset. On error the current set is kept.
    pub fn load_icons(&mut self, data: &[u8]) -> Result<()> {
        match parse_icons_binary(data) {
            Ok(icons) => {
                debug!("loaded {} icons of {}px", icons.len(), icons.size());
                self.icons = icons;
                Ok(())
            }
            Err(e) => {
                warn!("icon asset rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Current icon set.
    pub fn icons(&self) -> &IconSet { &self.icons }

    /// Replaces the icon set.
    pub fn set_icons(&mut self, icons: IconSet) { self.icons = icons; }

    /// Enables every control.
    pub fn enable(&mut self) { self.session.state = ControlState::Normal; }

    /// Disables every control: they draw with the disabled palette and ignore input.
    pub fn disable(&mut self) { self.session.state = ControlState::Disabled; }

    /// Forces the global control state.
    pub fn set_state(&mut self, state: ControlState) { self.session.state = state; }

    /// Global control state.
    pub fn state(&self) -> ControlState { self.session.state }

    /// Suspends input handling; controls keep drawing.
    pub fn lock(&mut self) { self.session.locked = true; }

    /// Resumes input handling.
    pub fn unlock(&mut self) { self.session.locked = false; }

    /// Returns `true` while input handling is suspended.
    pub fn is_locked(&self) -> bool { self.session.locked }

    /// Sets the alpha every drawn color is multiplied with, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) { self.session.alpha = alpha.clamp(0.0, 1.0); }

    /// Global alpha.
    pub fn alpha(&self) -> f32 { self.session.alpha }

    /// Switches the active font; the global text size follows its base size.
    pub fn set_font(&mut self, atlas: AtlasHandle) {
        let base = atlas.base_size().max(0) as u32;
        self.atlas = atlas;
        // the property exists for every kind, so this cannot fail
        let _ = self.style.set(ControlKind::Default, Property::TEXT_SIZE, base);
    }

    /// Active font.
    pub fn font(&self) -> &AtlasHandle { &self.atlas }

    /// Sets the pixel scale icons are drawn with.
    pub fn set_icon_scale(&mut self, scale: i32) { self.session.icon_scale = scale.max(1); }

    /// Icon pixel scale.
    pub fn icon_scale(&self) -> i32 { self.session.icon_scale }

    /// Shows the pending tooltip under focused controls.
    pub fn enable_tooltip(&mut self) { self.session.tooltip_enabled = true; }

    /// Hides tooltips.
    pub fn disable_tooltip(&mut self) { self.session.tooltip_enabled = false; }

    /// Sets the text shown by the next focused control, `None` clears it.
    pub fn set_tooltip(&mut self, text: Option<&str>) { self.session.tooltip = text.map(str::to_string); }

    /// Starts a drag capture on `bounds`. Fails while another drag is running.
    pub fn begin_drag(&mut self, bounds: Recti) -> Option<DragHandle> { self.drag.begin(bounds) }

    /// Ends the drag owned by `handle`. Returns `false` when it was not the active drag.
    pub fn release_drag(&mut self, handle: DragHandle) -> bool { self.drag.release(handle) }

    /// Handle of the running drag.
    pub fn active_drag(&self) -> Option<DragHandle> { self.drag.active() }

    /// Bounds the active drag was started from.
    pub fn active_drag_bounds(&self) -> Option<Recti> { self.drag.active_bounds() }

    /// Returns `true` when `handle` owns the running drag.
    pub fn is_dragging(&self, handle: DragHandle) -> bool { self.drag.is_dragging(handle) }

    /// Moves the edit focus to a new session with the cursor at `start_cursor`.
    /// The previous session, if any, ends.
    pub fn begin_edit(&mut self, start_cursor: usize) -> EditHandle { self.edit.begin(start_cursor) }

    /// Ends the session of `handle`. Returns `false` when it did not hold the focus.
    pub fn end_edit(&mut self, handle: EditHandle) -> bool { self.edit.end(handle) }

    /// Session of `handle` while it holds the edit focus.
    pub fn edit_session(&self, handle: EditHandle) -> Option<&EditSession> { self.edit.session(handle) }

    /// Session holding the edit focus.
    pub fn current_edit(&self) -> Option<&EditSession> { self.edit.current() }

    pub(crate) fn atlas(&self) -> AtlasHandle { self.atlas.clone() }

    pub(crate) fn pointer(&self, bounds: Recti) -> PointerSample {
        let input = self.input.borrow();
        PointerSample {
            inside: point_in_rect(input.mouse_pos, bounds),
            down: input.mouse_down.is_left(),
            pressed: input.mouse_pressed.is_left(),
            released: input.mouse_released.is_left(),
        }
    }

    /// State of a control at `bounds`; `owned` is the drag the control holds, if any.
    pub(crate) fn interact(&self, bounds: Recti, owned: Option<DragHandle>) -> Interaction {
        let pointer = self.pointer(bounds);
        derive_interaction(self.session.state, self.session.locked, self.drag.is_foreign(owned), pointer)
    }

    /// Input is processed: not disabled, not locked, no drag held by someone else.
    pub(crate) fn input_live(&self, owned: Option<DragHandle>) -> bool {
        self.session.state != ControlState::Disabled && !self.session.locked && !self.drag.is_foreign(owned)
    }

    pub(crate) fn style_value(&mut self, kind: ControlKind, property: Property) -> i32 { self.style.value(kind, property) }

    pub(crate) fn style_color(&mut self, kind: ControlKind, property: Property) -> Color {
        let c = self.style.color(kind, property);
        c.fade(self.session.alpha)
    }

    pub(crate) fn text_params(&mut self, kind: ControlKind) -> TextParams {
        TextParams::from_style(&mut self.style, kind, &self.settings, self.session.icon_scale)
    }

    pub(crate) fn text_bounds(&mut self, kind: ControlKind, bounds: Recti) -> Recti { text_bounds(&mut self.style, kind, bounds) }

    pub(crate) fn draw_rect(&mut self, r: Recti, color: Color) { self.draw.draw_rect(r, color); }

    pub(crate) fn draw_gradient(&mut self, r: Recti, corners: GradientCorners) {
        let a = self.session.alpha;
        let corners = GradientCorners {
            top_left: corners.top_left.fade(a),
            bottom_left: corners.bottom_left.fade(a),
            bottom_right: corners.bottom_right.fade(a),
            top_right: corners.top_right.fade(a),
        };
        self.draw.draw_gradient(r, corners);
    }

    /// Border and base fill of `kind` in `state`.
    pub(crate) fn draw_control_frame(&mut self, kind: ControlKind, bounds: Recti, state: ControlState) {
        let border_width = self.style_value(kind, Property::BORDER_WIDTH);
        let border = self.style_color(kind, Property::border_color(state));
        let base = self.style_color(kind, Property::base_color(state));
        self.draw.draw_frame(bounds, border_width, border, base);
    }

    /// Lays `text` out in `bounds` with the text properties of `kind` and draws it.
    pub(crate) fn draw_text(&mut self, kind: ControlKind, text: &str, bounds: Recti, color: Color) -> TextLayout {
        let params = self.text_params(kind);
        self.draw_text_with(text, bounds, &params, color)
    }

    pub(crate) fn draw_text_with(&mut self, text: &str, bounds: Recti, params: &TextParams, color: Color) -> TextLayout {
        if text.is_empty() {
            return TextLayout::default();
        }
        let atlas = self.atlas.clone();
        let layout = layout_text(&atlas, text, bounds, params);
        let base = atlas.base_size().max(1);
        for g in &layout.glyphs {
            let info = atlas.glyph(g.codepoint);
            let dst = rect(
                g.pos.x + info.offset.x * params.text_size / base,
                g.pos.y + info.offset.y * params.text_size / base,
                info.rect.width * params.text_size / base,
                info.rect.height * params.text_size / base,
            );
            self.draw.draw_glyph(g.codepoint, info.rect, dst, color);
        }
        for icon in &layout.icons {
            self.draw_icon(icon.id, icon.pos, icon.scale, color);
        }
        layout
    }

    /// Text of a control, colored for `state`, inside the padded bounds.
    pub(crate) fn draw_control_text(&mut self, kind: ControlKind, text: &str, bounds: Recti, state: ControlState) -> TextLayout {
        let inner = self.text_bounds(kind, bounds);
        let color = self.style_color(kind, Property::text_color(state));
        self.draw_text(kind, text, inner, color)
    }

    /// One filled square per set icon pixel.
    pub(crate) fn draw_icon(&mut self, id: u16, pos: Vec2i, scale: i32, color: Color) {
        let draw = &mut self.draw;
        self.icons.for_each_pixel(id, |x, y| draw.draw_rect(rect(pos.x + x * scale, pos.y + y * scale, scale, scale), color));
    }

    /// Draws the pending tooltip below `bounds` when the control is focused.
    pub(crate) fn draw_tooltip(&mut self, bounds: Recti, state: ControlState) {
        if !self.session.tooltip_enabled || self.session.locked || state != ControlState::Focused || self.drag.active().is_some() {
            return;
        }
        let text = match &self.session.tooltip {
            Some(t) if !t.is_empty() => t.clone(),
            _ => return,
        };
        let mut params = self.text_params(ControlKind::Default);
        params.align = TextAlignment::Center;
        params.valign = VerticalAlignment::Middle;
        params.wrap = WrapMode::None;
        let atlas = self.atlas.clone();
        let size = measure_text(&atlas, &text, &params);
        let margin = self.settings.tooltip_margin;
        let mut tip = rect(bounds.x, bounds.y + bounds.height + margin, size.width + 4 * margin, size.height + 2 * margin);
        let overflow = tip.x + tip.width - self.viewport.width;
        if overflow > 0 {
            tip.x = (tip.x - overflow).max(0);
        }
        self.draw_control_frame(ControlKind::Default, tip, ControlState::Normal);
        let color = self.style_color(ControlKind::Default, Property::text_color(ControlState::Normal));
        self.draw_text_with(&text, tip, &params, color);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn context() -> Context { Context::new(AtlasHandle::new(FontAtlas::fixed_width(10, 8)), Dimensioni::new(320, 240)) }

    #[test]
    fn session_setters() {
        let mut ctx = context();
        ctx.set_alpha(3.0);
        assert_eq!(ctx.alpha(), 1.0);
        ctx.set_alpha(-1.0);
        assert_eq!(ctx.alpha(), 0.0);
        ctx.disable();
        assert_eq!(ctx.state(), ControlState::Disabled);
        ctx.enable();
        assert_eq!(ctx.state(), ControlState::Normal);
        ctx.lock();
        assert!(ctx.is_locked());
        ctx.unlock();
        assert!(!ctx.is_locked());
        ctx.set_icon_scale(0);
        assert_eq!(ctx.icon_scale(), 1);
    }

    #[test]
    fn set_font_updates_text_size() {
        let mut ctx = context();
        let big = AtlasHandle::new(FontAtlas::fixed_width(20, 12));
        ctx.set_font(big.clone());
        assert!(ctx.font().ptr_eq(&big));
        assert_eq!(ctx.get_style(ControlKind::Default, Property::TEXT_SIZE), Ok(20));
    }

    #[test]
    fn bad_style_asset_keeps_the_table() {
        let mut ctx = context();
        let before = ctx.get_style(ControlKind::Button, Property::BORDER_WIDTH).unwrap();
        assert!(ctx.load_style(b"rGS \xff\xff").is_err());
        assert!(ctx.load_style_text("p 0 12 0x5\np 99 0 0x1\n").is_err());
        assert_eq!(ctx.get_style(ControlKind::Button, Property::BORDER_WIDTH), Ok(before));
        assert!(ctx.load_icons(b"nope").is_err());
        assert_eq!(ctx.icons().size(), 16);
    }

    #[test]
    fn style_asset_is_applied() {
        let mut ctx = context();
        let bytes = crate::style_file::tests::style_bytes(&[(0, 12, 5), (2, 12, 1)]);
        assert!(ctx.load_style(&bytes).unwrap().is_none());
        assert_eq!(ctx.get_style(ControlKind::Label, Property::BORDER_WIDTH), Ok(5));
        assert_eq!(ctx.get_style(ControlKind::Button, Property::BORDER_WIDTH), Ok(1));
    }

    #[test]
    fn oversized_font_block_leaves_the_style_untouched() {
        let mut ctx = context();
        let before = ctx.get_style(ControlKind::Button, Property::BORDER_WIDTH);
        let mut bytes = crate::style_file::tests::style_bytes(&[(2, 12, 9)]);
        bytes.extend_from_slice(&crate::style_file::tests::font_header(i32::MAX));
        assert!(matches!(ctx.load_style(&bytes), Err(AssetError::Truncated { .. })));
        assert_eq!(ctx.get_style(ControlKind::Button, Property::BORDER_WIDTH), before);
    }

    #[test]
    fn orphaned_drag_is_cleared_at_frame_end() {
        let mut ctx = context();
        ctx.input.borrow_mut().mousedown(5, 5, MouseButton::LEFT);
        ctx.frame(|ctx| {
            assert!(ctx.begin_drag(rect(0, 0, 10, 10)).is_some());
        });
        assert!(ctx.active_drag().is_some());
        ctx.input.borrow_mut().mouseup(5, 5, MouseButton::LEFT);
        ctx.frame(|_| {});
        assert!(ctx.active_drag().is_none());
    }

    #[test]
    fn edit_focus_moves_between_sessions() {
        let mut ctx = context();
        let a = ctx.begin_edit(0);
        let b = ctx.begin_edit(3);
        assert!(ctx.edit_session(a).is_none());
        assert_eq!(ctx.edit_session(b).map(|s| s.cursor()), Some(3));
        assert!(!ctx.end_edit(a));
        assert!(ctx.end_edit(b));
        assert!(ctx.current_edit().is_none());
    }

    #[test]
    fn tooltip_shows_under_focused_control_only() {
        let mut ctx = context();
        ctx.enable_tooltip();
        ctx.set_tooltip(Some("tip"));
        ctx.frame(|ctx| ctx.draw_tooltip(rect(0, 0, 40, 20), ControlState::Normal));
        assert!(ctx.commands().is_empty());
        ctx.frame(|ctx| ctx.draw_tooltip(rect(300, 0, 40, 20), ControlState::Focused));
        let glyphs = ctx.commands().iter().filter(|c| matches!(c, Command::Glyph { .. })).count();
        assert_eq!(glyphs, 3);
        for c in ctx.commands() {
            if let Command::Rect { rect, .. } = c {
                assert!(rect.x + rect.width <= 320);
            }
        }
    }

    #[test]
    fn alpha_fades_drawn_colors() {
        let mut ctx = context();
        ctx.set_alpha(0.5);
        ctx.frame(|ctx| ctx.draw_control_frame(ControlKind::Button, rect(0, 0, 20, 20), ControlState::Normal));
        for c in ctx.commands() {
            if let Command::Rect { color, .. } = c {
                assert!(color.a <= 128);
            }
        }
    }
}
