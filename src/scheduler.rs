/*
scheduler.rs

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

//! Delayed actions and time source.
//!
//! The session never spawns timers. It asks its [`Scheduler`] to remember an action with a
//! deadline, and the actions whose deadline has passed are collected on each tick.
//! Cancelling is just forgetting, and dropping the scheduler drops every pending action with it.

use log::debug;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
///
/// Used to replay a game deterministically.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a [`ManualClock`] object.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Action that the session runs when its deadline is reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Remove the hint highlight.
    HintExpiry,

    /// Report the end of the session once the last move has settled.
    CompletionSettle,
}

/// Handle on a scheduled action, used to cancel it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending {
    id: TimerId,
    deadline: Instant,
    action: TimerAction,
}

/// Pending delayed actions.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    /// Create a [`Scheduler`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + delay,
            action,
        });
        debug!("Scheduled {action:?} in {delay:?} ({id:?})");
        id
    }

    /// Cancel a pending action. Return whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before: usize = self.pending.len();
        self.pending.retain(|p| p.id != id);
        let cancelled: bool = self.pending.len() != before;
        if cancelled {
            debug!("Cancelled {id:?}");
        }
        cancelled
    }

    /// Cancel every pending action.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            debug!("Cancelled {} pending actions", self.pending.len());
        }
        self.pending.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the actions whose deadline is reached, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerId, TimerAction)> {
        let mut due: Vec<Pending> = Vec::new();
        let mut i: usize = 0;
        while i < self.pending.len() {
            if self.pending[i].deadline <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| p.deadline);
        due.into_iter().map(|p| (p.id, p.action)).collect()
    }
}
