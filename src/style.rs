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
use log::debug;

/// Number of control kinds in the style table.
pub const CONTROL_KINDS: usize = 16;
/// Number of property slots per control kind.
pub const PROPERTY_SLOTS: usize = 24;
/// Slots below this index are the base properties propagated from [`ControlKind::Default`].
pub const BASE_PROPERTIES: u16 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
/// Widget category used to index the style table.
pub enum ControlKind {
    /// Shared defaults, also the owner of the global text properties.
    Default = 0,
    /// Static text.
    Label,
    /// Push button.
    Button,
    /// Toggle button.
    Toggle,
    /// Slider and slider bar.
    Slider,
    /// Progress bar.
    ProgressBar,
    /// Check box.
    CheckBox,
    /// Combo box.
    ComboBox,
    /// Drop-down box.
    DropDownBox,
    /// Single line text box.
    TextBox,
    /// Numeric value box.
    ValueBox,
    /// Spinner.
    Spinner,
    /// List view.
    ListView,
    /// Color picker family.
    ColorPicker,
    /// Scroll bar.
    ScrollBar,
    /// Status bar.
    StatusBar,
}

impl ControlKind {
    /// Every control kind in table order.
    pub const ALL: [ControlKind; CONTROL_KINDS] = [
        ControlKind::Default,
        ControlKind::Label,
        ControlKind::Button,
        ControlKind::Toggle,
        ControlKind::Slider,
        ControlKind::ProgressBar,
        ControlKind::CheckBox,
        ControlKind::ComboBox,
        ControlKind::DropDownBox,
        ControlKind::TextBox,
        ControlKind::ValueBox,
        ControlKind::Spinner,
        ControlKind::ListView,
        ControlKind::ColorPicker,
        ControlKind::ScrollBar,
        ControlKind::StatusBar,
    ];

    /// Maps a raw table index back to a kind.
    pub fn from_index(index: u16) -> Option<Self> { Self::ALL.get(index as usize).copied() }

    /// Returns the table index of this kind.
    pub fn index(self) -> u16 { self as u16 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Slot index inside a control kind's row of the style table.
///
/// Slots `0..16` are base properties shared by every kind. Slots `16..23` of
/// [`ControlKind::Default`] hold the global text properties; the same slots of the other
/// kinds are private to that kind.
pub struct Property(pub u16);

impl Property {
    /// Border color, normal state.
    pub const BORDER_COLOR_NORMAL: Property = Property(0);
    /// Base color, normal state.
    pub const BASE_COLOR_NORMAL: Property = Property(1);
    /// Text color, normal state.
    pub const TEXT_COLOR_NORMAL: Property = Property(2);
    /// Border color, focused state.
    pub const BORDER_COLOR_FOCUSED: Property = Property(3);
    /// Base color, focused state.
    pub const BASE_COLOR_FOCUSED: Property = Property(4);
    /// Text color, focused state.
    pub const TEXT_COLOR_FOCUSED: Property = Property(5);
    /// Border color, pressed state.
    pub const BORDER_COLOR_PRESSED: Property = Property(6);
    /// Base color, pressed state.
    pub const BASE_COLOR_PRESSED: Property = Property(7);
    /// Text color, pressed state.
    pub const TEXT_COLOR_PRESSED: Property = Property(8);
    /// Border color, disabled state.
    pub const BORDER_COLOR_DISABLED: Property = Property(9);
    /// Base color, disabled state.
    pub const BASE_COLOR_DISABLED: Property = Property(10);
    /// Text color, disabled state.
    pub const TEXT_COLOR_DISABLED: Property = Property(11);
    /// Border width in pixels.
    pub const BORDER_WIDTH: Property = Property(12);
    /// Inner text padding in pixels.
    pub const TEXT_PADDING: Property = Property(13);
    /// Horizontal text alignment, see [`TextAlignment`].
    pub const TEXT_ALIGNMENT: Property = Property(14);

    /// Text size in pixels (global).
    pub const TEXT_SIZE: Property = Property(16);
    /// Extra spacing between glyphs (global).
    pub const TEXT_SPACING: Property = Property(17);
    /// Line color (global).
    pub const LINE_COLOR: Property = Property(18);
    /// Background color (global).
    pub const BACKGROUND_COLOR: Property = Property(19);
    /// Distance between two text lines (global).
    pub const TEXT_LINE_SPACING: Property = Property(20);
    /// Vertical text alignment, see [`VerticalAlignment`] (global).
    pub const TEXT_ALIGNMENT_VERTICAL: Property = Property(21);
    /// Text wrap mode, see [`WrapMode`] (global).
    pub const TEXT_WRAP_MODE: Property = Property(22);

    /// Toggle group padding.
    pub const GROUP_PADDING: Property = Property(16);
    /// Slider selector width.
    pub const SLIDER_WIDTH: Property = Property(16);
    /// Slider selector inner padding.
    pub const SLIDER_PADDING: Property = Property(17);
    /// Progress bar inner padding.
    pub const PROGRESS_PADDING: Property = Property(16);
    /// Scroll bar arrow button size.
    pub const ARROWS_SIZE: Property = Property(16);
    /// Non-zero when the scroll bar draws arrow buttons.
    pub const ARROWS_VISIBLE: Property = Property(17);
    /// Scroll bar thumb inner padding.
    pub const SCROLL_SLIDER_PADDING: Property = Property(18);
    /// Scroll bar thumb size.
    pub const SCROLL_SLIDER_SIZE: Property = Property(19);
    /// Scroll bar track padding.
    pub const SCROLL_PADDING: Property = Property(20);
    /// Scroll bar speed divider for wheel and arrow steps.
    pub const SCROLL_SPEED: Property = Property(21);
    /// Check box inner padding.
    pub const CHECK_PADDING: Property = Property(16);
    /// Combo box button width.
    pub const COMBO_BUTTON_WIDTH: Property = Property(16);
    /// Combo box button spacing.
    pub const COMBO_BUTTON_SPACING: Property = Property(17);
    /// Drop-down arrow padding.
    pub const ARROW_PADDING: Property = Property(16);
    /// Drop-down item spacing.
    pub const DROPDOWN_ITEMS_SPACING: Property = Property(17);
    /// Non-zero when the text box is read only.
    pub const TEXT_READONLY: Property = Property(16);
    /// Spinner button width.
    pub const SPIN_BUTTON_WIDTH: Property = Property(16);
    /// Spinner button spacing.
    pub const SPIN_BUTTON_SPACING: Property = Property(17);
    /// List view item height.
    pub const LIST_ITEMS_HEIGHT: Property = Property(16);
    /// List view item spacing.
    pub const LIST_ITEMS_SPACING: Property = Property(17);
    /// Width of the list view (and scroll panel) scroll bars.
    pub const SCROLLBAR_WIDTH: Property = Property(18);
    /// Scroll bar side, 0 for left, 1 for right.
    pub const SCROLLBAR_SIDE: Property = Property(19);
    /// Color panel selector size.
    pub const COLOR_SELECTOR_SIZE: Property = Property(16);
    /// Hue bar width.
    pub const HUEBAR_WIDTH: Property = Property(17);
    /// Hue bar padding from the panel.
    pub const HUEBAR_PADDING: Property = Property(18);
    /// Hue bar selector height.
    pub const HUEBAR_SELECTOR_HEIGHT: Property = Property(19);
    /// Hue bar selector overflow on each side.
    pub const HUEBAR_SELECTOR_OVERFLOW: Property = Property(20);

    /// Border color slot for a control state.
    pub fn border_color(state: ControlState) -> Property { Property(state as u16 * 3) }
    /// Base color slot for a control state.
    pub fn base_color(state: ControlState) -> Property { Property(state as u16 * 3 + 1) }
    /// Text color slot for a control state.
    pub fn text_color(state: ControlState) -> Property { Property(state as u16 * 3 + 2) }

    /// Returns `true` for the base slots propagated from the default kind.
    pub fn is_base(self) -> bool { self.0 < BASE_PROPERTIES }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Horizontal text alignment.
pub enum TextAlignment {
    /// Align to the left edge.
    Left = 0,
    /// Center horizontally.
    Center = 1,
    /// Align to the right edge.
    Right = 2,
}

impl TextAlignment {
    /// Decodes a style value, falling back to [`TextAlignment::Left`].
    pub fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Center,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Vertical text alignment.
pub enum VerticalAlignment {
    /// Align to the top edge.
    Top = 0,
    /// Center vertically.
    Middle = 1,
    /// Align to the bottom edge.
    Bottom = 2,
}

impl VerticalAlignment {
    /// Decodes a style value, falling back to [`VerticalAlignment::Top`].
    pub fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Middle,
            2 => Self::Bottom,
            _ => Self::Top,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Text wrapping policy.
pub enum WrapMode {
    /// Overflowing glyphs are measured but not drawn.
    None = 0,
    /// Break anywhere.
    Char = 1,
    /// Break at spaces, falling back to character breaks for long words.
    Word = 2,
}

impl WrapMode {
    /// Decodes a style value, falling back to [`WrapMode::None`].
    pub fn from_u32(v: u32) -> Self {
        match v {
            1 => Self::Char,
            2 => Self::Word,
            _ => Self::None,
        }
    }
}

#[derive(Clone)]
/// Flat `(kind, property) -> u32` style table.
///
/// The table is zero until the first read or write, which loads the default palette.
pub struct StyleStore {
    props: [[u32; PROPERTY_SLOTS]; CONTROL_KINDS],
    loaded: bool,
}

impl Default for StyleStore {
    fn default() -> Self { Self::new() }
}

impl StyleStore {
    /// Creates an empty, not yet loaded, table.
    pub fn new() -> Self { Self { props: [[0; PROPERTY_SLOTS]; CONTROL_KINDS], loaded: false } }

    /// Returns `true` once defaults (or an asset) populated the table.
    pub fn is_loaded(&self) -> bool { self.loaded }

    fn ensure_loaded(&mut self) {
        if !self.loaded {
            self.load_default();
        }
    }

    fn check(control: u16, property: u16) -> Result<(usize, usize), StyleError> {
        if control as usize >= CONTROL_KINDS {
            return Err(StyleError::InvalidControl(control));
        }
        if property as usize >= PROPERTY_SLOTS {
            return Err(StyleError::InvalidProperty { control, property });
        }
        Ok((control as usize, property as usize))
    }

    /// Writes a slot by raw indices.
    ///
    /// Writing a base property of the default kind writes the same value into every other kind.
    pub fn set_raw(&mut self, control: u16, property: u16, value: u32) -> Result<(), StyleError> {
        let (c, p) = Self::check(control, property)?;
        self.ensure_loaded();
        self.props[c][p] = value;
        if c == 0 && property < BASE_PROPERTIES {
            for row in self.props.iter_mut().skip(1) {
                row[p] = value;
            }
        }
        Ok(())
    }

    /// Reads a slot by raw indices.
    pub fn get_raw(&mut self, control: u16, property: u16) -> Result<u32, StyleError> {
        let (c, p) = Self::check(control, property)?;
        self.ensure_loaded();
        Ok(self.props[c][p])
    }

    /// Writes a property of a control kind.
    pub fn set(&mut self, kind: ControlKind, property: Property, value: u32) -> Result<(), StyleError> { self.set_raw(kind.index(), property.0, value) }

    /// Reads a property of a control kind.
    pub fn get(&mut self, kind: ControlKind, property: Property) -> Result<u32, StyleError> { self.get_raw(kind.index(), property.0) }

    /// Reads a property as a signed value, `0` for slots that do not exist.
    pub fn value(&mut self, kind: ControlKind, property: Property) -> i32 { self.get(kind, property).unwrap_or(0) as i32 }

    /// Reads a property as a packed color.
    pub fn color(&mut self, kind: ControlKind, property: Property) -> Color { Color::from_u32(self.get(kind, property).unwrap_or(0)) }

    /// Reads a global text property from the default kind.
    pub fn global(&mut self, property: Property) -> i32 { self.value(ControlKind::Default, property) }

    /// Clears the table and loads the built-in palette.
    pub fn load_default(&mut self) {
        self.props = [[0; PROPERTY_SLOTS]; CONTROL_KINDS];
        self.loaded = true;

        let defaults: &[(Property, u32)] = &[
            (Property::BORDER_COLOR_NORMAL, 0x838383ff),
            (Property::BASE_COLOR_NORMAL, 0xc9c9c9ff),
            (Property::TEXT_COLOR_NORMAL, 0x686868ff),
            (Property::BORDER_COLOR_FOCUSED, 0x5bb2d9ff),
            (Property::BASE_COLOR_FOCUSED, 0xc9effeff),
            (Property::TEXT_COLOR_FOCUSED, 0x6c9bbcff),
            (Property::BORDER_COLOR_PRESSED, 0x0492c7ff),
            (Property::BASE_COLOR_PRESSED, 0x97e8ffff),
            (Property::TEXT_COLOR_PRESSED, 0x368bafff),
            (Property::BORDER_COLOR_DISABLED, 0xb5c1c2ff),
            (Property::BASE_COLOR_DISABLED, 0xe6e9e9ff),
            (Property::TEXT_COLOR_DISABLED, 0xaeb7b8ff),
            (Property::BORDER_WIDTH, 1),
            (Property::TEXT_PADDING, 0),
            (Property::TEXT_ALIGNMENT, TextAlignment::Center as u32),
        ];

        // slots are statically valid, the results can be ignored
        for &(p, v) in defaults {
            let _ = self.set(ControlKind::Default, p, v);
        }

        let overrides: &[(ControlKind, Property, u32)] = &[
            (ControlKind::Label, Property::TEXT_ALIGNMENT, TextAlignment::Left as u32),
            (ControlKind::Button, Property::BORDER_WIDTH, 2),
            (ControlKind::Slider, Property::TEXT_PADDING, 4),
            (ControlKind::ProgressBar, Property::TEXT_PADDING, 4),
            (ControlKind::CheckBox, Property::TEXT_PADDING, 4),
            (ControlKind::CheckBox, Property::TEXT_ALIGNMENT, TextAlignment::Right as u32),
            (ControlKind::DropDownBox, Property::TEXT_PADDING, 0),
            (ControlKind::DropDownBox, Property::TEXT_ALIGNMENT, TextAlignment::Center as u32),
            (ControlKind::TextBox, Property::TEXT_PADDING, 4),
            (ControlKind::TextBox, Property::TEXT_ALIGNMENT, TextAlignment::Left as u32),
            (ControlKind::ValueBox, Property::TEXT_PADDING, 0),
            (ControlKind::ValueBox, Property::TEXT_ALIGNMENT, TextAlignment::Left as u32),
            (ControlKind::Spinner, Property::TEXT_PADDING, 0),
            (ControlKind::Spinner, Property::TEXT_ALIGNMENT, TextAlignment::Left as u32),
            (ControlKind::StatusBar, Property::TEXT_PADDING, 8),
            (ControlKind::StatusBar, Property::TEXT_ALIGNMENT, TextAlignment::Left as u32),
            (ControlKind::Default, Property::TEXT_SIZE, 10),
            (ControlKind::Default, Property::TEXT_SPACING, 1),
            (ControlKind::Default, Property::LINE_COLOR, 0x90abb5ff),
            (ControlKind::Default, Property::BACKGROUND_COLOR, 0xf5f5f5ff),
            (ControlKind::Default, Property::TEXT_LINE_SPACING, 15),
            (ControlKind::Default, Property::TEXT_ALIGNMENT_VERTICAL, VerticalAlignment::Middle as u32),
            (ControlKind::Toggle, Property::GROUP_PADDING, 2),
            (ControlKind::Slider, Property::SLIDER_WIDTH, 16),
            (ControlKind::Slider, Property::SLIDER_PADDING, 1),
            (ControlKind::ProgressBar, Property::PROGRESS_PADDING, 1),
            (ControlKind::CheckBox, Property::CHECK_PADDING, 1),
            (ControlKind::ComboBox, Property::COMBO_BUTTON_WIDTH, 32),
            (ControlKind::ComboBox, Property::COMBO_BUTTON_SPACING, 2),
            (ControlKind::DropDownBox, Property::ARROW_PADDING, 16),
            (ControlKind::DropDownBox, Property::DROPDOWN_ITEMS_SPACING, 2),
            (ControlKind::ScrollBar, Property::ARROWS_SIZE, 6),
            (ControlKind::ScrollBar, Property::ARROWS_VISIBLE, 0),
            (ControlKind::ScrollBar, Property::SCROLL_SLIDER_PADDING, 0),
            (ControlKind::ScrollBar, Property::SCROLL_SLIDER_SIZE, 16),
            (ControlKind::ScrollBar, Property::SCROLL_PADDING, 0),
            (ControlKind::ScrollBar, Property::SCROLL_SPEED, 12),
            (ControlKind::Spinner, Property::SPIN_BUTTON_WIDTH, 24),
            (ControlKind::Spinner, Property::SPIN_BUTTON_SPACING, 2),
            (ControlKind::ListView, Property::LIST_ITEMS_HEIGHT, 28),
            (ControlKind::ListView, Property::LIST_ITEMS_SPACING, 2),
            (ControlKind::ListView, Property::SCROLLBAR_WIDTH, 12),
            (ControlKind::ListView, Property::SCROLLBAR_SIDE, 1),
            (ControlKind::ColorPicker, Property::COLOR_SELECTOR_SIZE, 8),
            (ControlKind::ColorPicker, Property::HUEBAR_WIDTH, 16),
            (ControlKind::ColorPicker, Property::HUEBAR_PADDING, 8),
            (ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_HEIGHT, 8),
            (ControlKind::ColorPicker, Property::HUEBAR_SELECTOR_OVERFLOW, 2),
            (ControlKind::Default, Property::TEXT_WRAP_MODE, WrapMode::None as u32),
        ];

        for &(k, p, v) in overrides {
            let _ = self.set(k, p, v);
        }
        debug!("default style loaded");
    }

    /// Applies `records` in order on top of the current table.
    ///
    /// Records are validated first, an invalid record leaves the table untouched.
    pub fn apply_records(&mut self, records: &[StyleRecord]) -> Result<(), StyleError> {
        for r in records {
            Self::check(r.control, r.property)?;
        }
        self.ensure_loaded();
        for r in records {
            self.set_raw(r.control, r.property, r.value)?;
        }
        debug!("applied {} style records", records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_read_loads_defaults() {
        let mut style = StyleStore::new();
        assert!(!style.is_loaded());
        assert_eq!(style.get(ControlKind::Button, Property::BORDER_WIDTH), Ok(2));
        assert!(style.is_loaded());
        assert_eq!(style.get(ControlKind::Default, Property::TEXT_SIZE), Ok(10));
        assert_eq!(style.get(ControlKind::ScrollBar, Property::SCROLL_SLIDER_SIZE), Ok(16));
    }

    #[test]
    fn default_base_properties_propagate_to_every_kind() {
        for p in 0..BASE_PROPERTIES {
            let mut style = StyleStore::new();
            let v = 0x1234_0000 + p as u32;
            style.set(ControlKind::Default, Property(p), v).unwrap();
            for kind in ControlKind::ALL {
                assert_eq!(style.get(kind, Property(p)), Ok(v), "kind {:?} property {}", kind, p);
            }
        }
    }

    #[test]
    fn customizing_after_propagation_wins() {
        let mut style = StyleStore::new();
        style.set(ControlKind::Default, Property::BASE_COLOR_NORMAL, 0x112233ff).unwrap();
        style.set(ControlKind::Button, Property::BASE_COLOR_NORMAL, 0xaabbccff).unwrap();
        assert_eq!(style.get(ControlKind::Button, Property::BASE_COLOR_NORMAL), Ok(0xaabbccff));
        assert_eq!(style.get(ControlKind::Label, Property::BASE_COLOR_NORMAL), Ok(0x112233ff));

        // a later default write overrides the customization again
        style.set(ControlKind::Default, Property::BASE_COLOR_NORMAL, 0x445566ff).unwrap();
        assert_eq!(style.get(ControlKind::Button, Property::BASE_COLOR_NORMAL), Ok(0x445566ff));
    }

    #[test]
    fn extended_default_slots_do_not_propagate() {
        let mut style = StyleStore::new();
        style.set(ControlKind::Default, Property::TEXT_SIZE, 20).unwrap();
        assert_eq!(style.get(ControlKind::Slider, Property::SLIDER_WIDTH), Ok(16));
        assert_eq!(style.global(Property::TEXT_SIZE), 20);
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let mut style = StyleStore::new();
        assert_eq!(style.set_raw(16, 0, 1), Err(StyleError::InvalidControl(16)));
        assert_eq!(
            style.get_raw(2, PROPERTY_SLOTS as u16),
            Err(StyleError::InvalidProperty { control: 2, property: PROPERTY_SLOTS as u16 })
        );
    }

    #[test]
    fn invalid_record_batch_leaves_table_untouched() {
        let mut style = StyleStore::new();
        let records = [StyleRecord { control: 2, property: 12, value: 7 }, StyleRecord { control: 99, property: 0, value: 1 }];
        assert!(style.apply_records(&records).is_err());
        assert_eq!(style.get(ControlKind::Button, Property::BORDER_WIDTH), Ok(2));
    }

    #[test]
    fn state_color_slots_follow_table_layout() {
        assert_eq!(Property::border_color(ControlState::Normal), Property::BORDER_COLOR_NORMAL);
        assert_eq!(Property::base_color(ControlState::Pressed), Property::BASE_COLOR_PRESSED);
        assert_eq!(Property::text_color(ControlState::Disabled), Property::TEXT_COLOR_DISABLED);
    }
}
