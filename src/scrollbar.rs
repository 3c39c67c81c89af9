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
use crate::{Recti, Vec2i};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Direction a scroll bar moves along.
pub enum ScrollAxis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

impl ScrollAxis {
    /// Picks the axis from the bar shape: taller than wide is vertical.
    pub fn of(bounds: Recti) -> Self {
        if bounds.width > bounds.height { ScrollAxis::Horizontal } else { ScrollAxis::Vertical }
    }

    pub(crate) fn len(self, r: Recti) -> i32 {
        match self {
            ScrollAxis::Vertical => r.height,
            ScrollAxis::Horizontal => r.width,
        }
    }

    pub(crate) fn start(self, r: Recti) -> i32 {
        match self {
            ScrollAxis::Vertical => r.y,
            ScrollAxis::Horizontal => r.x,
        }
    }

    pub(crate) fn coord(self, p: Vec2i) -> i32 {
        match self {
            ScrollAxis::Vertical => p.y,
            ScrollAxis::Horizontal => p.x,
        }
    }
}

pub(crate) fn scrollbar_max_scroll(content_len: i32, view_len: i32) -> i32 { content_len.saturating_sub(view_len).max(0) }

/// Thumb length for a view of `view_len` over `content_len` on a track of `track_len`.
///
/// The proportional length never drops below `min_thumb`, and never exceeds the track.
pub fn scroll_thumb_length(track_len: i32, view_len: i32, content_len: i32, min_thumb: i32) -> i32 {
    if track_len <= 0 {
        return 0;
    }
    let proportional = if content_len <= 0 || view_len >= content_len {
        track_len
    } else {
        (track_len as i64 * view_len.max(0) as i64 / content_len as i64) as i32
    };
    proportional.max(min_thumb).min(track_len)
}

/// Places a thumb of `thumb_len` on `track` for `value` in `[min, max]`.
pub(crate) fn thumb_rect(axis: ScrollAxis, track: Recti, thumb_len: i32, value: i32, min: i32, max: i32) -> Recti {
    let mut thumb = track;
    let track_len = axis.len(track);
    let range = max as i64 - min as i64;
    let travel = (track_len - thumb_len).max(0) as i64;
    let offset = if range > 0 { ((value as i64 - min as i64).clamp(0, range) * travel / range) as i32 } else { 0 };
    match axis {
        ScrollAxis::Vertical => {
            thumb.y += offset;
            thumb.height = thumb_len;
        }
        ScrollAxis::Horizontal => {
            thumb.x += offset;
            thumb.width = thumb_len;
        }
    }
    thumb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect;

    #[test]
    fn thumb_never_drops_below_the_floor() {
        // content 100000 inside a 40px view: the proportional size is sub-pixel
        let len = scroll_thumb_length(38, 40, 100_000, 16);
        assert_eq!(len, 16);
    }

    #[test]
    fn thumb_is_capped_to_the_track() {
        assert_eq!(scroll_thumb_length(10, 40, 100_000, 16), 10);
        assert_eq!(scroll_thumb_length(100, 100, 50, 16), 100);
        assert_eq!(scroll_thumb_length(100, 50, 200, 16), 25);
    }

    #[test]
    fn thumb_travels_over_the_remaining_track() {
        let track = rect(0, 10, 12, 100);
        let top = thumb_rect(ScrollAxis::Vertical, track, 20, 0, 0, 50);
        assert_eq!((top.y, top.height), (10, 20));
        let bottom = thumb_rect(ScrollAxis::Vertical, track, 20, 50, 0, 50);
        assert_eq!(bottom.y, 90);
        let mid = thumb_rect(ScrollAxis::Horizontal, rect(0, 0, 100, 12), 20, 25, 0, 50);
        assert_eq!((mid.x, mid.width), (40, 20));
    }

    #[test]
    fn max_scroll_never_negative() {
        assert_eq!(scrollbar_max_scroll(10, 40), 0);
        assert_eq!(scrollbar_max_scroll(140, 40), 100);
        assert_eq!(ScrollAxis::of(rect(0, 0, 100, 10)), ScrollAxis::Horizontal);
    }
}
