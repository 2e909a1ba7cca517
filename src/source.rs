//! The event-source interface and a reference replay over structured plays.
//!
//! Accumulators never step the source themselves. The driver owns the
//! cursor; accumulators see the live state through [`GameState`], which
//! always describes the situation *before* the current event is applied.

use crate::error::{Error, Result};
use crate::event::{Destination, GameEvent, PlayEvent, Side, Substitution};
use crate::game::Game;
use crate::position::Position;
use std::collections::HashMap;

/// Read-only queries against the live state of a game in progress.
pub trait GameState {
    /// The player occupying lineup `slot` (0..=9) for `side`.
    fn player_at(&self, side: Side, slot: u8) -> Option<&str>;

    /// The position `player` currently holds for `side`.
    fn position_of(&self, side: Side, player: &str) -> Option<Position>;

    /// The runner on `base` (1..=3).
    fn runner(&self, base: usize) -> Option<&str>;

    /// The pitcher charged with the runner on `base` (1..=3).
    fn responsible_pitcher(&self, base: usize) -> Option<&str>;

    /// The player fielding `position` for `side`.
    fn fielder(&self, side: Side, position: Position) -> Option<&str>;

    fn score(&self, side: Side) -> u32;
    fn hits(&self, side: Side) -> u32;
    fn errors(&self, side: Side) -> u32;
    fn left_on_base(&self, side: Side) -> u32;

    /// Completed plate appearances for `side`.
    fn batters(&self, side: Side) -> u32;

    fn inning(&self) -> u8;

    /// The batting side, `Visitor` in the top half.
    fn half(&self) -> Side;

    fn outs(&self) -> u8;

    /// True once the result can no longer change.
    fn is_game_over(&self) -> bool;

    /// The lineup slot (1..=9) due up for the batting side.
    fn batting_slot(&self) -> u8 {
        (self.batters(self.half()) % 9 + 1) as u8
    }

    /// The player due up for the batting side.
    fn batter(&self) -> Option<&str> {
        self.player_at(self.half(), self.batting_slot())
    }
}

/// A cursor over one game's events, exposing the state as it evolves.
pub trait EventSource: GameState {
    /// Rewind to the first event with the starting lineups in place.
    fn reset(&mut self);

    /// Apply the current event and move past it. Returns `false` once every
    /// event has been applied.
    fn step(&mut self) -> Result<bool>;

    /// The event about to be applied, or `None` at the end.
    fn current(&self) -> Option<&GameEvent>;

    /// Apply all remaining events.
    fn seek_to_end(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Runner {
    player: String,
    pitcher: String,
}

#[derive(Debug, Clone, Default)]
struct TeamState {
    lineup: [Option<String>; 10],
    positions: HashMap<String, Position>,
    fielders: [Option<String>; 13],
    score: u32,
    hits: u32,
    errors: u32,
    left_on_base: u32,
    batters: u32,
}

impl TeamState {
    fn seat(&mut self, player: &str, position: Position) {
        if let Some(old) = self.positions.insert(player.to_string(), position) {
            let held = &mut self.fielders[old.code() as usize];
            if held.as_deref() == Some(player) {
                *held = None;
            }
        }
        if position.is_fielding() || position == Position::DesignatedHitter {
            self.fielders[position.code() as usize] = Some(player.to_string());
        }
    }

    fn unseat(&mut self, player: &str) {
        self.positions.remove(player);
        for held in self.fielders.iter_mut() {
            if held.as_deref() == Some(player) {
                *held = None;
            }
        }
    }
}

/// Replays a [`Game`]'s structured events, tracking bases, outs, lineups,
/// fielders and the score.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use scorefold::{EventKind, EventSource, Game, GameState, PlayEvent, Position, Replay, Side, Starter};
///
/// let mut game = Game::new("G1", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), "VIS", "HOM");
/// for side in Side::BOTH {
///     for (slot, pos) in Position::FIELD.iter().enumerate() {
///         let player = format!("{side:?}{slot}");
///         game = game.with_starter(side, Starter::new(player, slot as u8 + 1, *pos));
///     }
/// }
/// let game = game.with_event(PlayEvent::new(EventKind::Single));
///
/// let mut replay = Replay::new(&game);
/// assert_eq!(replay.batter(), Some("Visitor0"));
/// replay.seek_to_end().unwrap();
/// assert_eq!(replay.runner(1), Some("Visitor0"));
/// assert_eq!(replay.responsible_pitcher(1), Some("Home0"));
/// assert_eq!(replay.hits(Side::Visitor), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    game: &'a Game,
    cursor: usize,
    inning: u8,
    half: Side,
    outs: u8,
    bases: [Option<Runner>; 4],
    teams: [TeamState; 2],
}

impl<'a> Replay<'a> {
    /// A replay positioned before the first event of `game`.
    pub fn new(game: &'a Game) -> Self {
        let mut replay = Replay {
            game,
            cursor: 0,
            inning: 1,
            half: Side::Visitor,
            outs: 0,
            bases: Default::default(),
            teams: Default::default(),
        };
        replay.reset();
        replay
    }

    /// The game being replayed.
    pub fn game(&self) -> &'a Game {
        self.game
    }

    fn team(&self, side: Side) -> &TeamState {
        &self.teams[side.index()]
    }

    fn missing(&self, role: &str) -> Error {
        Error::MissingOccupant {
            game: self.game.id.clone(),
            role: role.to_string(),
        }
    }

    fn apply_play(&mut self, play: &PlayEvent) -> Result<()> {
        let was_over = self.is_game_over();
        let batting = self.half;
        let fielding = batting.opponent();
        let pitcher = self
            .fielder(fielding, Position::Pitcher)
            .ok_or_else(|| self.missing("pitcher"))?
            .to_string();

        let mut bases: [Option<Runner>; 4] = Default::default();
        let mut runs = 0;
        for base in (1..=3).rev() {
            if let Some(runner) = self.bases[base].take() {
                match play.advance[base] {
                    dest if dest.is_run() => runs += 1,
                    Destination::Out => {}
                    dest => {
                        if let Some(to) = dest.base() {
                            bases[to] = Some(runner);
                        }
                    }
                }
            }
        }

        if play.batter_event {
            let batter = self
                .batter()
                .ok_or_else(|| self.missing("batter"))?
                .to_string();
            match play.advance[0] {
                dest if dest.is_run() => runs += 1,
                dest => {
                    if let Some(to) = dest.base() {
                        bases[to] = Some(Runner {
                            player: batter,
                            pitcher,
                        });
                    }
                }
            }
            self.teams[batting.index()].batters += 1;
        }

        let offense = &mut self.teams[batting.index()];
        offense.score += runs;
        if play.kind.is_hit() {
            offense.hits += 1;
        }
        self.teams[fielding.index()].errors += play.errors.len() as u32;

        self.bases = bases;
        self.outs += play.outs;
        let stranded = self.bases.iter().flatten().count() as u32;
        if self.outs >= 3 {
            self.teams[batting.index()].left_on_base += stranded;
            self.end_half();
        } else if !was_over && self.is_game_over() {
            // Walk-off: the half ends with runners still aboard.
            self.teams[batting.index()].left_on_base += stranded;
        }
        Ok(())
    }

    fn apply_substitution(&mut self, sub: &Substitution) {
        let team = &mut self.teams[sub.side.index()];
        let previous = match team.lineup.get_mut(sub.slot as usize) {
            Some(seat) => seat.replace(sub.player.clone()),
            None => None,
        };
        if let Some(previous) = previous.filter(|p| *p != sub.player) {
            team.unseat(&previous);
            if sub.position == Position::PinchRunner {
                for runner in self.bases.iter_mut().flatten() {
                    if runner.player == previous {
                        runner.player = sub.player.clone();
                    }
                }
            }
        }
        self.teams[sub.side.index()].seat(&sub.player, sub.position);
    }

    fn end_half(&mut self) {
        self.outs = 0;
        self.bases = Default::default();
        self.half = match self.half {
            Side::Visitor => Side::Home,
            Side::Home => {
                self.inning += 1;
                Side::Visitor
            }
        };
    }
}

impl GameState for Replay<'_> {
    fn player_at(&self, side: Side, slot: u8) -> Option<&str> {
        self.team(side).lineup.get(slot as usize)?.as_deref()
    }

    fn position_of(&self, side: Side, player: &str) -> Option<Position> {
        self.team(side).positions.get(player).copied()
    }

    fn runner(&self, base: usize) -> Option<&str> {
        self.bases.get(base)?.as_ref().map(|r| r.player.as_str())
    }

    fn responsible_pitcher(&self, base: usize) -> Option<&str> {
        self.bases.get(base)?.as_ref().map(|r| r.pitcher.as_str())
    }

    fn fielder(&self, side: Side, position: Position) -> Option<&str> {
        self.team(side).fielders[position.code() as usize].as_deref()
    }

    fn score(&self, side: Side) -> u32 {
        self.team(side).score
    }

    fn hits(&self, side: Side) -> u32 {
        self.team(side).hits
    }

    fn errors(&self, side: Side) -> u32 {
        self.team(side).errors
    }

    fn left_on_base(&self, side: Side) -> u32 {
        self.team(side).left_on_base
    }

    fn batters(&self, side: Side) -> u32 {
        self.team(side).batters
    }

    fn inning(&self) -> u8 {
        self.inning
    }

    fn half(&self) -> Side {
        self.half
    }

    fn outs(&self) -> u8 {
        self.outs
    }

    fn is_game_over(&self) -> bool {
        let visitor = self.score(Side::Visitor);
        let home = self.score(Side::Home);
        match self.half {
            // Bottom half of the ninth or later: over as soon as the home team leads.
            Side::Home => self.inning >= 9 && home > visitor,
            // Top of the tenth or later, nothing played yet: the previous
            // inning was completed.
            Side::Visitor => {
                self.inning >= 10
                    && self.outs == 0
                    && self.bases.iter().all(Option::is_none)
                    && home != visitor
            }
        }
    }
}

impl EventSource for Replay<'_> {
    fn reset(&mut self) {
        self.cursor = 0;
        self.inning = 1;
        self.half = Side::Visitor;
        self.outs = 0;
        self.bases = Default::default();
        self.teams = Default::default();
        for side in Side::BOTH {
            let team = &mut self.teams[side.index()];
            for starter in self.game.starters(side) {
                if let Some(seat) = team.lineup.get_mut(starter.slot as usize) {
                    *seat = Some(starter.player.clone());
                }
                team.seat(&starter.player, starter.position);
            }
        }
    }

    fn step(&mut self) -> Result<bool> {
        let game = self.game;
        let Some(event) = game.events.get(self.cursor) else {
            return Ok(false);
        };
        match event {
            GameEvent::Play(play) => self.apply_play(play)?,
            GameEvent::NoPlay(subs) => subs.iter().for_each(|sub| self.apply_substitution(sub)),
        }
        self.cursor += 1;
        Ok(true)
    }

    fn current(&self) -> Option<&GameEvent> {
        self.game.events.get(self.cursor)
    }
}
