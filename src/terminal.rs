/*
terminal.rs

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

//! Play in the terminal.
//!
//! The board shows, for each slot, the number of the slot the tile belongs to. The goal is to
//! sort the numbers. Solved tiles are shown as `[n]` and cannot be moved anymore, the selected
//! tile as `<n>`, and the hinted tile as `*n*`.
//!
//! The player input is read from stdin in a separate thread, so that the session keeps ticking
//! (elapsed time, hint expiry, completion report) while the player thinks.

use async_channel::TryRecvError;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use jigswap::catalog::ManifestFile;
use jigswap::launcher::{GameEvent, LaunchState, Launcher};
use jigswap::scheduler::SystemClock;
use jigswap::session::{PuzzleSession, Reaction};
use jigswap::splitter::ImageSplitter;
use jigswap::view::SessionView;

use crate::cli_options::PlayOptions;

/// Interval between two session updates.
const TICK: Duration = Duration::from_millis(100);

/// Distance of the simulated pointer moves for the drag command, in pixels.
const DRAG_DISTANCE: f64 = 40.0;

const HELP: &str = "\
Commands:
  N        select the tile in slot N, or swap it with the selected tile
  N M      drag the tile in slot N onto slot M
  s        shuffle the tiles
  h        show a hint
  n        new game
  next     play the next level
  r        retry after a loading error
  ?        this help
  q        quit";

/// Player command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Input {
    Click(usize),
    Drag { from: usize, to: usize },
    Shuffle,
    Hint,
    NewGame,
    NextLevel,
    Retry,
    Help,
    Quit,
}

impl Input {
    /// Parse a command line. Slot numbers start at 1.
    fn parse(line: &str) -> Option<Input> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let slot = |w: &str| -> Option<usize> { w.parse::<usize>().ok()?.checked_sub(1) };
        match words.as_slice() {
            ["s"] => Some(Input::Shuffle),
            ["h"] => Some(Input::Hint),
            ["n"] => Some(Input::NewGame),
            ["next"] => Some(Input::NextLevel),
            ["r"] => Some(Input::Retry),
            ["?"] => Some(Input::Help),
            ["q"] => Some(Input::Quit),
            [n] => Some(Input::Click(slot(n)?)),
            [from, to] => Some(Input::Drag {
                from: slot(from)?,
                to: slot(to)?,
            }),
            _ => None,
        }
    }
}

/// Start the game and process the player commands until they quit.
pub fn run(options: PlayOptions) -> u8 {
    let mut launcher: Launcher<SystemClock> = Launcher::new(
        Box::new(ManifestFile::new(options.images)),
        Arc::new(ImageSplitter),
        options.settings,
        options.progress,
        options.grid,
        SystemClock,
        StdRng::from_os_rng(),
    );

    println!("{HELP}");
    launcher.start(options.choice);
    show(&launcher);

    let input: async_channel::Receiver<String> = spawn_input();
    loop {
        match input.try_recv() {
            Ok(line) => {
                let Some(command) = Input::parse(&line) else {
                    if !line.trim().is_empty() {
                        println!("Unknown command {:?}. Type ? for help.", line.trim());
                    }
                    continue;
                };
                debug!("Command {command:?}");
                if command == Input::Quit {
                    return 0;
                }
                apply(&mut launcher, command);
                show(&launcher);
            }
            Err(TryRecvError::Empty) => thread::sleep(TICK),
            Err(TryRecvError::Closed) => return 0,
        }

        for event in launcher.tick() {
            report(&launcher, &event);
        }
    }
}

/// Read stdin lines in a separate thread.
fn spawn_input() -> async_channel::Receiver<String> {
    let (sender, receiver) = async_channel::unbounded::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send_blocking(line).is_err() {
                break;
            }
        }
    });
    receiver
}

fn apply(launcher: &mut Launcher<SystemClock>, command: Input) {
    match command {
        Input::NewGame => {
            launcher.new_game();
        }
        Input::NextLevel => {
            if !launcher.next_level() {
                println!("There is no next level");
            }
        }
        Input::Retry => {
            launcher.retry();
        }
        Input::Help => println!("{HELP}"),
        Input::Quit => (),
        Input::Click(_) | Input::Drag { .. } | Input::Shuffle | Input::Hint => {
            let Some(session) = launcher.session_mut() else {
                println!("No game in progress. Type r to retry.");
                return;
            };
            play(session, command);
        }
    }
}

/// Apply a board command to the session.
fn play(session: &mut PuzzleSession, command: Input) {
    let reaction: Reaction = match command {
        Input::Click(slot) => session.select_or_swap(slot),
        Input::Drag { from, to } => {
            // Replay the gesture as a pointer would produce it
            let Some(mut gesture) = session.begin_drag(from, 0.0, 0.0) else {
                println!("That tile cannot move");
                return;
            };
            gesture.move_to(DRAG_DISTANCE, DRAG_DISTANCE);
            session.finish_drag(gesture.release(Some(to)))
        }
        Input::Shuffle => {
            if session.shuffle().is_none() {
                println!("The game is over");
            }
            return;
        }
        Input::Hint => {
            if session.request_hint().is_none() {
                println!("No hint available");
            }
            return;
        }
        _ => return,
    };
    match reaction {
        Reaction::Ignored => println!("Not allowed"),
        Reaction::Swapped(report) if report.set_completed() => println!("Puzzle complete!"),
        _ => (),
    }
}

fn report(launcher: &Launcher<SystemClock>, event: &GameEvent) {
    match event {
        GameEvent::HintExpired => show(launcher),
        GameEvent::Completed { outcome, record } => {
            let muted: bool = launcher.session().is_none_or(|s| s.settings().muted);
            if !muted {
                print!("\x07");
            }
            println!(
                "Solved in {} moves, {}s: {}",
                outcome.moves, outcome.elapsed_secs, outcome.stars
            );
            if let Some(record) = record {
                println!(
                    "Level {} best: {}s {}",
                    record.level, record.best_time, record.stars
                );
            }
            println!("Type n for a new game or next for the next level.");
            let _ = io::stdout().flush();
        }
    }
}

fn show(launcher: &Launcher<SystemClock>) {
    match launcher.state() {
        LaunchState::Idle => (),
        LaunchState::Failed(error) => {
            println!("Cannot load the game: {error}");
            println!("Type r to retry.");
        }
        LaunchState::Playing(session) => println!("{}", render(&session.view())),
    }
    let _ = io::stdout().flush();
}

/// Text rendering of the board, with the slot numbers on the right.
fn render(view: &SessionView) -> String {
    let level: String = match view.level {
        Some(l) => format!("Level {l}"),
        None => "Random".to_string(),
    };
    let mut ret: String = format!(
        "{level}  {}  ({}/{})  moves {}  {}  {:.0}%\n",
        view.image_name,
        view.active_set + 1,
        view.set_count,
        view.moves,
        view.time_label,
        view.progress
    );
    for row in view.tiles.chunks(view.grid.cols.max(1)) {
        let cells: Vec<String> = row
            .iter()
            .map(|t| {
                let n: usize = t.correct_pos + 1;
                if t.solved {
                    format!("[{n:>2}]")
                } else if t.hinted {
                    format!("*{n:>2}*")
                } else if t.selected {
                    format!("<{n:>2}>")
                } else {
                    format!(" {n:>2} ")
                }
            })
            .collect();
        let slots: Vec<String> = row.iter().map(|t| format!("{:>3}", t.slot + 1)).collect();
        ret.push_str(&format!("{}      {}\n", cells.join(" "), slots.join("")));
    }
    if view.complete {
        ret.push_str("Complete!\n");
    }
    ret
}
