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
/// Maximum length of an icon name in the icon asset.
pub const ICON_NAME_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Single 1 bit per pixel icon.
pub struct Icon {
    /// Name from the asset name table, empty for built-in icons.
    pub name: String,
    /// Row major bitmap, bit `y * size + x` of the word sequence, least significant bit first.
    pub bits: Vec<u32>,
}

#[derive(Clone, Debug)]
/// Table of square monochrome icons addressed by index.
pub struct IconSet {
    size: i32,
    icons: Vec<Icon>,
}

/// Index of the empty icon in [`IconSet::builtin`].
pub const ICON_NONE: u16 = 0;
/// Index of the outlined box icon in [`IconSet::builtin`].
pub const ICON_BOX: u16 = 1;
/// Index of the filled box icon in [`IconSet::builtin`].
pub const ICON_BOX_FILLED: u16 = 2;
/// Index of the left arrow in [`IconSet::builtin`].
pub const ICON_ARROW_LEFT: u16 = 3;
/// Index of the right arrow in [`IconSet::builtin`].
pub const ICON_ARROW_RIGHT: u16 = 4;
/// Index of the up arrow in [`IconSet::builtin`].
pub const ICON_ARROW_UP: u16 = 5;
/// Index of the down arrow in [`IconSet::builtin`].
pub const ICON_ARROW_DOWN: u16 = 6;

impl IconSet {
    /// Builds a set of `size` x `size` icons. Bitmaps shorter than `size * size / 32` words are padded.
    pub fn new(size: i32, icons: Vec<Icon>) -> Self {
        let words = Self::words_for(size);
        let icons = icons
            .into_iter()
            .map(|mut i| {
                i.bits.resize(words, 0);
                i
            })
            .collect();
        Self { size, icons }
    }

    /// Number of `u32` words one icon bitmap takes.
    pub fn words_for(size: i32) -> usize { (size.max(0) as usize * size.max(0) as usize).div_ceil(32) }

    /// Small procedural set used until an icon asset is loaded.
    pub fn builtin() -> Self {
        const S: i32 = 16;
        let make = |f: &dyn Fn(i32, i32) -> bool| {
            let mut bits = vec![0u32; Self::words_for(S)];
            for y in 0..S {
                for x in 0..S {
                    if f(x, y) {
                        let idx = (y * S + x) as usize;
                        bits[idx / 32] |= 1 << (idx % 32);
                    }
                }
            }
            Icon { name: String::new(), bits }
        };
        let in_box = |x: i32, y: i32| (2..14).contains(&x) && (2..14).contains(&y);
        let icons = vec![
            make(&|_, _| false),
            make(&|x, y| in_box(x, y) && (x == 2 || x == 13 || y == 2 || y == 13)),
            make(&|x, y| in_box(x, y)),
            make(&|x, y| (4..12).contains(&x) && (y - 7).abs() <= (x - 4) / 2 && (y - 8).abs() <= (x - 4) / 2 + 1),
            make(&|x, y| (4..12).contains(&x) && (y - 7).abs() <= (11 - x) / 2 && (y - 8).abs() <= (11 - x) / 2 + 1),
            make(&|x, y| (4..12).contains(&y) && (x - 7).abs() <= (y - 4) / 2 && (x - 8).abs() <= (y - 4) / 2 + 1),
            make(&|x, y| (4..12).contains(&y) && (x - 7).abs() <= (11 - y) / 2 && (x - 8).abs() <= (11 - y) / 2 + 1),
        ];
        Self { size: S, icons }
    }

    /// Side of every icon, in icon pixels.
    pub fn size(&self) -> i32 { self.size }

    /// Number of icons.
    pub fn len(&self) -> usize { self.icons.len() }

    /// Returns `true` when the set holds no icon.
    pub fn is_empty(&self) -> bool { self.icons.is_empty() }

    /// Returns the icon at `id`.
    pub fn get(&self, id: u16) -> Option<&Icon> { self.icons.get(id as usize) }

    /// Looks an icon up by its asset name.
    pub fn find(&self, name: &str) -> Option<u16> { self.icons.iter().position(|i| i.name == name).map(|p| p as u16) }

    /// Returns `true` when pixel `(x, y)` of icon `id` is set.
    pub fn is_set(&self, id: u16, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return false;
        }
        let idx = (y * self.size + x) as usize;
        self.get(id).and_then(|i| i.bits.get(idx / 32)).map(|w| w & (1 << (idx % 32)) != 0).unwrap_or(false)
    }

    /// Calls `f` with the coordinates of every set pixel of icon `id`.
    pub fn for_each_pixel<F: FnMut(i32, i32)>(&self, id: u16, mut f: F) {
        for y in 0..self.size {
            for x in 0..self.size {
                if self.is_set(id, x, y) {
                    f(x, y);
                }
            }
        }
    }
}

impl Default for IconSet {
    fn default() -> Self { Self::builtin() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_box_has_outline_only() {
        let icons = IconSet::builtin();
        assert_eq!(icons.size(), 16);
        assert!(icons.is_set(ICON_BOX, 2, 2));
        assert!(icons.is_set(ICON_BOX, 13, 8));
        assert!(!icons.is_set(ICON_BOX, 7, 7));
        assert!(icons.is_set(ICON_BOX_FILLED, 7, 7));
        let mut count = 0;
        icons.for_each_pixel(ICON_NONE, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn bit_layout_is_row_major_lsb_first() {
        let mut bits = vec![0u32; 8];
        bits[0] = 1 << 17; // x = 1, y = 1
        let icons = IconSet::new(16, vec![Icon { name: "dot".into(), bits }]);
        assert!(icons.is_set(0, 1, 1));
        assert!(!icons.is_set(0, 0, 1));
        assert_eq!(icons.find("dot"), Some(0));
        assert!(!icons.is_set(7, 1, 1));
    }

    #[test]
    fn short_bitmaps_are_padded() {
        let icons = IconSet::new(16, vec![Icon { name: String::new(), bits: vec![u32::MAX] }]);
        assert_eq!(icons.get(0).map(|i| i.bits.len()), Some(8));
        assert!(!icons.is_set(0, 0, 15));
    }
}
