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

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Opaque identity of a drag capture, minted when the drag starts.
pub struct DragHandle(u64);

#[derive(Default)]
pub(crate) struct DragTracker {
    next_id: u64,
    active: Option<(DragHandle, Recti)>,
}

impl DragTracker {
    pub(crate) fn begin(&mut self, bounds: Recti) -> Option<DragHandle> {
        if self.active.is_some() {
            return None;
        }
        self.next_id += 1;
        let handle = DragHandle(self.next_id);
        self.active = Some((handle, bounds));
        debug!("drag {} captured at {},{} {}x{}", handle.0, bounds.x, bounds.y, bounds.width, bounds.height);
        Some(handle)
    }

    pub(crate) fn release(&mut self, handle: DragHandle) -> bool {
        match self.active {
            Some((h, _)) if h == handle => {
                self.active = None;
                debug!("drag {} released", handle.0);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn active(&self) -> Option<DragHandle> { self.active.map(|(h, _)| h) }

    pub(crate) fn active_bounds(&self) -> Option<Recti> { self.active.map(|(_, r)| r) }

    pub(crate) fn is_dragging(&self, handle: DragHandle) -> bool { self.active() == Some(handle) }

    /// A drag is running and `owned` is not it.
    pub(crate) fn is_foreign(&self, owned: Option<DragHandle>) -> bool {
        match (self.active(), owned) {
            (None, _) => false,
            (Some(a), Some(o)) => a != o,
            (Some(_), None) => true,
        }
    }

    /// Drops a capture whose owner stopped being called before it saw the release.
    pub(crate) fn clear_orphan(&mut self, button_down: bool) {
        if !button_down {
            if let Some((h, _)) = self.active.take() {
                debug!("orphaned drag {} cleared", h.0);
            }
        }
    }
}

/// Maps a pointer coordinate on a track to a value.
///
/// `[track_start + selector / 2, track_start + track_len - selector / 2]` maps linearly onto
/// `[min, max]`; the result is clamped to the range.
pub fn value_from_pointer(pointer: i32, track_start: i32, track_len: i32, selector: i32, min: f32, max: f32) -> f32 {
    let span = track_len - selector;
    if span <= 0 {
        return min;
    }
    let t = (pointer - track_start) as f32 - selector as f32 / 2.0;
    let v = min + (max - min) * t / span as f32;
    if min <= max { v.clamp(min, max) } else { v.clamp(max, min) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_capture_at_a_time() {
        let mut drag = DragTracker::default();
        let a = drag.begin(rect(0, 0, 10, 10));
        assert!(a.is_some());
        assert_eq!(drag.begin(rect(20, 0, 10, 10)), None);
        assert!(drag.is_foreign(None));
        assert!(!drag.is_foreign(a));
        assert_eq!(drag.active_bounds().map(|r| r.x), Some(0));
    }

    #[test]
    fn handles_of_coincident_bounds_differ() {
        let mut drag = DragTracker::default();
        let r = rect(0, 0, 10, 10);
        let a = drag.begin(r).unwrap();
        assert!(drag.release(a));
        let b = drag.begin(r).unwrap();
        assert_ne!(a, b);
        assert!(!drag.release(a));
        assert!(drag.is_dragging(b));
    }

    #[test]
    fn orphan_cleared_only_when_button_is_up() {
        let mut drag = DragTracker::default();
        drag.begin(rect(0, 0, 10, 10));
        drag.clear_orphan(true);
        assert!(drag.active().is_some());
        drag.clear_orphan(false);
        assert!(drag.active().is_none());
    }

    #[test]
    fn pointer_maps_linearly_and_clamps() {
        // track 0..116 with a 16px selector: centers span 8..108
        assert_eq!(value_from_pointer(8, 0, 116, 16, 0.0, 100.0), 0.0);
        assert_eq!(value_from_pointer(58, 0, 116, 16, 0.0, 100.0), 50.0);
        assert_eq!(value_from_pointer(108, 0, 116, 16, 0.0, 100.0), 100.0);
        assert_eq!(value_from_pointer(-50, 0, 116, 16, 0.0, 100.0), 0.0);
        assert_eq!(value_from_pointer(500, 0, 116, 16, 0.0, 100.0), 100.0);
        assert_eq!(value_from_pointer(5, 0, 10, 16, 3.0, 7.0), 3.0);
    }
}
