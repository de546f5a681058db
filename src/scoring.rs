/*
scoring.rs

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

//! Star rating from the time it took to complete a level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Under this many seconds, the player gets three stars.
const THREE_STARS_UNDER_SEC: u64 = 10;

/// From this many seconds, the player gets a single star.
const ONE_STAR_FROM_SEC: u64 = 30;

/// Delay between the last move and the completion report.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Star rating.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stars {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Stars {
    /// Number of stars.
    pub fn count(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let filled: usize = self.count() as usize;
        write!(f, "{}{}", "*".repeat(filled), ".".repeat(3 - filled))
    }
}

/// Return the rating for a level completed in `seconds` whole seconds.
pub fn stars_for(seconds: u64) -> Stars {
    if seconds < THREE_STARS_UNDER_SEC {
        Stars::Three
    } else if seconds >= ONE_STAR_FROM_SEC {
        Stars::One
    } else {
        Stars::Two
    }
}

/// Format an elapsed time as `m:ss`.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
