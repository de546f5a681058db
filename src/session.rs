/*
session.rs

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

//! Manage the game in progress.
//!
//! A [`PuzzleSession`] owns the puzzles of one level and reacts to the player input: clicks,
//! drags, shuffles, and hint requests. Every operation runs to completion before returning.
//! Time-based behavior (elapsed time, hint expiry, completion report) happens in
//! [`PuzzleSession::tick`], which the front end calls periodically.

use log::debug;
use rand::rngs::StdRng;
use std::time::Instant;

use crate::drag::{DragGesture, DragOutcome};
use crate::hint::{self, HINT_DURATION, HintState};
use crate::orchestrator::{PuzzleSets, Transition};
use crate::scheduler::{Clock, Scheduler, TimerAction, TimerId};
use crate::scoring::{self, SETTLE_DELAY, Stars};
use crate::settings::Settings;
use crate::tile_set::TileSet;
use crate::view::{SessionView, TileView};

/// Result of an accepted swap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SwapReport {
    pub from: usize,
    pub to: usize,

    /// What the swap did to the puzzle sequence.
    pub transition: Transition,
}

impl SwapReport {
    /// Whether the swap completed the active puzzle.
    pub fn set_completed(&self) -> bool {
        self.transition != Transition::Stay
    }
}

/// How the session reacted to a click or a drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// The input was not allowed (solved tile, same slot, out of range, game over).
    Ignored,

    /// The tile in the slot is now selected.
    Selected(usize),

    /// The selection was cleared.
    Deselected,

    /// Two tiles were swapped.
    Swapped(SwapReport),
}

/// Final result of a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Level number, None for a random game.
    pub level: Option<u32>,

    pub stars: Stars,

    /// Time to complete all the puzzles, in whole seconds.
    pub elapsed_secs: u64,

    /// Number of accepted swaps.
    pub moves: u32,

    /// Whether the result counts for the level progress.
    pub tracked: bool,
}

/// Events produced by [`PuzzleSession::tick`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The hint went away without the player doing anything.
    HintExpired,

    /// The last move has settled: the session is over.
    Finished(Outcome),
}

/// The game in progress.
pub struct PuzzleSession {
    /// Level number, None for a random game.
    level: Option<u32>,

    /// Settings read when the session started.
    settings: Settings,

    /// Puzzles.
    sets: PuzzleSets,

    /// Slot of the selected tile in the active puzzle.
    selected: Option<usize>,

    /// Hint in progress.
    hint: Option<HintState>,

    /// Number of accepted swaps.
    moves: u32,

    /// Elapsed time, in whole seconds. Frozen when the session is complete.
    elapsed_secs: u64,

    /// Whether all the puzzles are solved.
    complete: bool,

    /// Pending completion report.
    settle: Option<TimerId>,

    clock: Box<dyn Clock>,
    start: Instant,
    scheduler: Scheduler,
    rng: StdRng,
}

impl PuzzleSession {
    /// Create a [`PuzzleSession`] object from solved tile sets, and shuffle every set.
    ///
    /// Return None if `sets` is empty.
    pub fn new(
        level: Option<u32>,
        settings: Settings,
        sets: Vec<TileSet>,
        clock: Box<dyn Clock>,
        mut rng: StdRng,
    ) -> Option<Self> {
        let shuffled: Vec<TileSet> = sets.iter().map(|s| s.shuffled(&mut rng)).collect();
        Self::arranged(level, settings, shuffled, clock, rng)
    }

    /// Create a [`PuzzleSession`] object from tile sets used as they are.
    pub fn arranged(
        level: Option<u32>,
        settings: Settings,
        sets: Vec<TileSet>,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Option<Self> {
        let sets = PuzzleSets::new(sets)?;
        let start: Instant = clock.now();
        let mut session = Self {
            level,
            settings,
            sets,
            selected: None,
            hint: None,
            moves: 0,
            elapsed_secs: 0,
            complete: false,
            settle: None,
            clock,
            start,
            scheduler: Scheduler::new(),
            rng,
        };
        debug!(
            "New session: level {:?}, {} puzzle(s) of {} tiles",
            session.level,
            session.sets.len(),
            session.sets.active().len()
        );
        // A shuffle may give back the solved arrangement
        let transition: Transition = session.sets.settle();
        session.apply_transition(transition);
        Some(session)
    }

    pub fn level(&self) -> Option<u32> {
        self.level
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The puzzle that receives the moves.
    pub fn active_set(&self) -> &TileSet {
        self.sets.active()
    }

    pub fn active_index(&self) -> usize {
        self.sets.active_index()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn sets(&self) -> &[TileSet] {
        self.sets.sets()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Identifier of the hinted tile in the active puzzle.
    pub fn hinted_tile(&self) -> Option<usize> {
        self.hint.map(|h| h.tile_id)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Whether all the puzzles are solved.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Elapsed time for display.
    pub fn time_label(&self) -> String {
        if self.settings.play_with_time {
            scoring::format_time(self.elapsed_secs)
        } else {
            "--:--".to_string()
        }
    }

    /// Handle a click on the tile in `slot`.
    ///
    /// The first click selects the tile, a second click on the same tile deselects it, and a
    /// click on another tile swaps the two. Clicks on solved tiles are ignored.
    pub fn select_or_swap(&mut self, slot: usize) -> Reaction {
        if self.complete || !self.sets.active().is_movable(slot) {
            return Reaction::Ignored;
        }
        self.clear_hint();
        match self.selected {
            None => {
                self.selected = Some(slot);
                Reaction::Selected(slot)
            }
            Some(s) if s == slot => {
                self.selected = None;
                Reaction::Deselected
            }
            Some(s) => {
                self.selected = None;
                self.swap(s, slot)
            }
        }
    }

    /// Swap the tiles in slots `from` and `to`, as the result of a drag.
    pub fn drag_swap(&mut self, from: usize, to: usize) -> Reaction {
        let active: &TileSet = self.sets.active();
        if self.complete || from == to || !active.is_movable(from) || !active.is_movable(to) {
            return Reaction::Ignored;
        }
        self.selected = None;
        self.clear_hint();
        self.swap(from, to)
    }

    /// Start a pointer gesture on the tile in `slot`. Solved tiles cannot be dragged.
    pub fn begin_drag(&self, slot: usize, x: f64, y: f64) -> Option<DragGesture> {
        if self.complete || !self.sets.active().is_movable(slot) {
            return None;
        }
        Some(DragGesture::begin(slot, x, y))
    }

    /// Apply a finished pointer gesture.
    pub fn finish_drag(&mut self, outcome: DragOutcome) -> Reaction {
        match outcome {
            DragOutcome::Click(slot) => self.select_or_swap(slot),
            DragOutcome::Swap { from, to } => self.drag_swap(from, to),
            DragOutcome::Nothing => Reaction::Ignored,
        }
    }

    /// Shuffle all the tiles of the active puzzle again, solved tiles included.
    ///
    /// Moves are not counted. Return None if the session is over.
    pub fn shuffle(&mut self) -> Option<Transition> {
        if self.complete {
            return None;
        }
        self.selected = None;
        self.clear_hint();
        let next: TileSet = self.sets.active().shuffled(&mut self.rng);
        let transition: Transition = self.sets.replace_active(next);
        self.apply_transition(transition);
        Some(transition)
    }

    /// Select and highlight the first misplaced tile of the active puzzle for a short time.
    ///
    /// Return the slot of the hinted tile, or None if hints are disabled or nothing is misplaced.
    pub fn request_hint(&mut self) -> Option<usize> {
        if self.complete || !self.settings.show_hints {
            return None;
        }
        let (slot, tile_id) = hint::pick(self.sets.active())?;
        self.clear_hint();
        let expiry: TimerId =
            self.scheduler
                .schedule(self.clock.now(), HINT_DURATION, TimerAction::HintExpiry);
        self.selected = Some(slot);
        self.hint = Some(HintState {
            slot,
            tile_id,
            expiry,
        });
        debug!("Hint on slot {slot} (tile {tile_id})");
        Some(slot)
    }

    /// Update the elapsed time and run the delayed actions that are due.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let now: Instant = self.clock.now();
        if !self.complete {
            self.elapsed_secs = now.saturating_duration_since(self.start).as_secs();
        }

        let mut events: Vec<SessionEvent> = Vec::new();
        for (id, action) in self.scheduler.take_due(now) {
            match action {
                TimerAction::HintExpiry => {
                    if self.hint.is_some_and(|h| h.expiry == id) {
                        debug!("Hint expired");
                        self.hint = None;
                        self.selected = None;
                        events.push(SessionEvent::HintExpired);
                    }
                }
                TimerAction::CompletionSettle => {
                    if self.settle == Some(id) {
                        self.settle = None;
                        events.push(SessionEvent::Finished(self.outcome()));
                    }
                }
            }
        }
        events
    }

    /// Result of the session, as reported when it is finished.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            level: self.level,
            stars: scoring::stars_for(self.elapsed_secs),
            elapsed_secs: self.elapsed_secs,
            moves: self.moves,
            tracked: self.level.is_some() && self.settings.play_with_time,
        }
    }

    /// Snapshot of the session for the presentation layer.
    pub fn view(&self) -> SessionView {
        let active: &TileSet = self.sets.active();
        let merges = active.merge_map();
        let tiles: Vec<TileView> = active
            .tiles()
            .iter()
            .zip(merges)
            .map(|(tile, merge)| TileView {
                id: tile.id,
                slot: tile.current_pos,
                correct_pos: tile.correct_pos,
                label: tile.image.label.clone(),
                solved: tile.is_solved(),
                selected: self.selected == Some(tile.current_pos),
                hinted: self.hint.is_some_and(|h| h.slot == tile.current_pos),
                merge,
            })
            .collect();
        SessionView {
            level: self.level,
            image_name: active.source().name.clone(),
            grid: active.grid(),
            tiles,
            selected: self.selected,
            hinted_tile: self.hinted_tile(),
            moves: self.moves,
            elapsed_secs: self.elapsed_secs,
            time_label: self.time_label(),
            progress: self.sets.progress(),
            complete: self.complete,
            active_set: self.sets.active_index(),
            set_count: self.sets.len(),
        }
    }

    /// Cancel every pending delayed action.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.hint = None;
        self.settle = None;
    }

    /// Swap two tiles of the active puzzle and count the move if accepted.
    fn swap(&mut self, from: usize, to: usize) -> Reaction {
        let Some(next) = self.sets.active().swapped(from, to) else {
            return Reaction::Ignored;
        };
        self.moves += 1;
        let transition: Transition = self.sets.replace_active(next);
        self.apply_transition(transition);
        Reaction::Swapped(SwapReport {
            from,
            to,
            transition,
        })
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => (),
            Transition::Advanced { .. } => {
                self.selected = None;
                self.clear_hint();
            }
            Transition::Finished => self.finish(),
        }
    }

    /// All the puzzles are solved: freeze the time and schedule the completion report.
    fn finish(&mut self) {
        let now: Instant = self.clock.now();
        self.complete = true;
        self.elapsed_secs = now.saturating_duration_since(self.start).as_secs();
        self.selected = None;
        self.clear_hint();
        self.settle = Some(
            self.scheduler
                .schedule(now, SETTLE_DELAY, TimerAction::CompletionSettle),
        );
        debug!(
            "Session complete in {}s and {} moves",
            self.elapsed_secs, self.moves
        );
    }

    fn clear_hint(&mut self) {
        if let Some(h) = self.hint.take() {
            self.scheduler.cancel(h.expiry);
        }
    }
}

impl Drop for PuzzleSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
