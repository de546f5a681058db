/*
drag.rs

Copyright 2025 Hervé Quatremain

This file is part of Jigswap.

Jigswap is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Jigswap is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Jigswap. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Turn pointer gestures into clicks and swaps.
//!
//! A gesture that stays within [`DRAG_THRESHOLD`] pixels of its starting point is a click.
//! Beyond that, it is a drag, and releasing it over another tile swaps the two tiles.

/// Distance, in pixels, that the pointer must exceed for the gesture to become a drag.
pub const DRAG_THRESHOLD: f64 = 6.0;

/// What a finished gesture means for the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The pointer barely moved: handle as a click on the origin slot.
    Click(usize),

    /// Swap the origin and destination slots.
    Swap { from: usize, to: usize },

    /// Nothing to do: cancelled, or dropped outside any other tile.
    Nothing,
}

/// Gesture in progress.
#[derive(Debug, Clone)]
pub struct DragGesture {
    origin: usize,
    start: (f64, f64),
    moved: bool,
}

impl DragGesture {
    /// Start a gesture on the tile in slot `origin`, at pointer position (`x`, `y`).
    pub fn begin(origin: usize, x: f64, y: f64) -> Self {
        Self {
            origin,
            start: (x, y),
            moved: false,
        }
    }

    /// Whether the gesture has become a drag.
    pub fn is_drag(&self) -> bool {
        self.moved
    }

    /// Follow the pointer. Once the threshold is exceeded, the gesture stays a drag.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let distance: f64 = (x - self.start.0).hypot(y - self.start.1);
        if distance > DRAG_THRESHOLD {
            self.moved = true;
        }
    }

    /// Release the pointer over `target`, the slot under the pointer if any.
    pub fn release(self, target: Option<usize>) -> DragOutcome {
        if !self.moved {
            return DragOutcome::Click(self.origin);
        }
        match target {
            Some(to) if to != self.origin => DragOutcome::Swap {
                from: self.origin,
                to,
            },
            _ => DragOutcome::Nothing,
        }
    }

    /// The pointer was lost.
    pub fn cancel(self) -> DragOutcome {
        DragOutcome::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_gesture_is_a_click() {
        let mut gesture = DragGesture::begin(4, 100.0, 100.0);
        gesture.move_to(103.0, 104.0);
        assert!(!gesture.is_drag());
        assert_eq!(gesture.release(Some(5)), DragOutcome::Click(4));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut gesture = DragGesture::begin(0, 0.0, 0.0);
        gesture.move_to(6.0, 0.0);
        assert!(!gesture.is_drag());
        gesture.move_to(6.5, 0.0);
        assert!(gesture.is_drag());
    }

    #[test]
    fn drag_over_other_tile_swaps() {
        let mut gesture = DragGesture::begin(2, 10.0, 10.0);
        gesture.move_to(80.0, 10.0);
        // Coming back near the start does not turn it into a click
        gesture.move_to(12.0, 10.0);
        assert_eq!(gesture.release(Some(5)), DragOutcome::Swap { from: 2, to: 5 });
    }

    #[test]
    fn drag_back_onto_origin_does_nothing() {
        let mut gesture = DragGesture::begin(2, 10.0, 10.0);
        gesture.move_to(40.0, 40.0);
        assert_eq!(gesture.clone().release(Some(2)), DragOutcome::Nothing);
        assert_eq!(gesture.release(None), DragOutcome::Nothing);
    }

    #[test]
    fn cancelled_gesture_does_nothing() {
        let gesture = DragGesture::begin(1, 0.0, 0.0);
        assert_eq!(gesture.cancel(), DragOutcome::Nothing);
    }
}
