/*
scenario.rs

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

//! Full games played through the public API.

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use jigswap::grid::GridSize;
use jigswap::orchestrator::Transition;
use jigswap::scheduler::ManualClock;
use jigswap::scoring::{SETTLE_DELAY, Stars};
use jigswap::session::{PuzzleSession, Reaction, SessionEvent};
use jigswap::settings::Settings;
use jigswap::tile::TileImage;
use jigswap::tile_set::{SourceImage, TileSet};

fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::max())
        .is_test(true)
        .try_init();
}

fn solved_set(index: usize, grid: GridSize) -> TileSet {
    let images: Vec<TileImage> = (0..grid.len())
        .map(|i| TileImage::new(format!("Lake #{}", i + 1), RgbaImage::new(4, 4)))
        .collect();
    let source = SourceImage {
        name: format!("Lake {index}"),
        location: format!("lake-{index}.png"),
    };
    TileSet::new(index, grid, source, images).expect("one image per slot")
}

/// Number of swaps that sorts the active puzzle: tiles minus permutation cycles.
fn minimal_swaps(set: &TileSet) -> usize {
    let mut seen: Vec<bool> = vec![false; set.len()];
    let mut cycles: usize = 0;
    for start in 0..set.len() {
        if seen[start] {
            continue;
        }
        cycles += 1;
        let mut slot: usize = start;
        while !seen[slot] {
            seen[slot] = true;
            slot = set.tiles()[slot].correct_pos;
        }
    }
    set.len() - cycles
}

/// Put the right tile in each slot, in slot order. Return the reactions.
fn sort_active(session: &mut PuzzleSession) -> Vec<Reaction> {
    let mut reactions: Vec<Reaction> = Vec::new();
    let active_index: usize = session.active_index();
    for slot in 0..session.active_set().len() {
        if session.active_index() != active_index
            || session.active_set().tiles()[slot].is_solved()
        {
            continue;
        }
        let from: usize = session
            .active_set()
            .tiles()
            .iter()
            .position(|t| t.correct_pos == slot)
            .expect("every slot has a tile");
        reactions.push(session.drag_swap(from, slot));
    }
    reactions
}

#[test]
fn normal_level_completes_on_the_last_swap() {
    init_logger();
    let clock = ManualClock::new();
    let mut session = PuzzleSession::new(
        Some(4),
        Settings::default(),
        vec![solved_set(0, GridSize::square(3))],
        Box::new(clock.clone()),
        StdRng::seed_from_u64(2024),
    )
    .expect("one puzzle");
    assert!(!session.is_complete());
    let expected_swaps: usize = minimal_swaps(session.active_set());

    clock.advance(Duration::from_secs(12));
    let reactions: Vec<Reaction> = sort_active(&mut session);
    assert_eq!(reactions.len(), expected_swaps);
    let (last, before) = reactions.split_last().expect("at least one swap");
    assert!(before.iter().all(|r| matches!(r, Reaction::Swapped(s) if !s.set_completed())));
    assert!(matches!(last, Reaction::Swapped(s) if s.transition == Transition::Finished));
    assert!(session.is_complete());
    assert_eq!(session.moves() as usize, expected_swaps);

    // Nothing is reported before the settle delay
    assert!(session.tick().is_empty());
    clock.advance(SETTLE_DELAY);
    let events: Vec<SessionEvent> = session.tick();
    match events.as_slice() {
        [SessionEvent::Finished(outcome)] => {
            assert_eq!(outcome.level, Some(4));
            assert_eq!(outcome.elapsed_secs, 12);
            assert_eq!(outcome.stars, Stars::Two);
            assert_eq!(outcome.moves as usize, expected_swaps);
            assert!(outcome.tracked);
        }
        other => panic!("unexpected events {other:?}"),
    }
    clock.advance(Duration::from_secs(60));
    assert!(session.tick().is_empty());
    assert_eq!(session.elapsed_secs(), 12);
}

#[test]
fn hard_level_walks_through_three_puzzles() {
    init_logger();
    let clock = ManualClock::new();
    let grid = GridSize::square(3);
    let mut session = PuzzleSession::new(
        Some(5),
        Settings::default(),
        (0..3).map(|i| solved_set(i, grid)).collect(),
        Box::new(clock.clone()),
        StdRng::seed_from_u64(7),
    )
    .expect("three puzzles");
    assert_eq!(session.set_count(), 3);
    assert!(session.view().is_hard());

    for index in 0..3 {
        assert_eq!(session.active_index(), index);
        assert_eq!(session.active_set().source().name, format!("Lake {index}"));
        let reactions: Vec<Reaction> = sort_active(&mut session);
        let expected: Transition = if index < 2 {
            Transition::Advanced {
                from: index,
                to: index + 1,
            }
        } else {
            Transition::Finished
        };
        assert!(matches!(reactions.last(), Some(Reaction::Swapped(s)) if s.transition == expected));
        assert!(session.selected().is_none());
    }
    assert!(session.is_complete());
    assert_eq!(session.view().progress, 100.0);

    clock.advance(SETTLE_DELAY);
    assert!(matches!(
        session.tick().as_slice(),
        [SessionEvent::Finished(outcome)] if outcome.stars == Stars::Three
    ));
}
