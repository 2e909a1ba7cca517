//! Per-game statistic accumulation.
//!
//! [`BoxScoreAccumulator`] consumes one game's events in order and builds a
//! [`BoxScore`]: batting stints by lineup slot, pitchers in order of
//! appearance, fielding lines, runs by inning and team totals. It is itself a
//! [`Report`], and the season registers each embed one to get per-game lines
//! before folding them into season totals.

mod text;

pub use text::BoxScoreDisplay;

use crate::error::{Error, Result};
use crate::event::{EventKind, PlayEvent, Side, Substitution};
use crate::game::{Decisions, Game};
use crate::position::Position;
use crate::scorebook::Scorebook;
use crate::season::{scan_game, Report};
use crate::source::GameState;
use crate::stats::{BattingLine, FieldingLine, PitchingLine, TeamFielding};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One player's turn in a lineup slot.
///
/// A player who leaves and re-enters at another position keeps a single
/// stint; the new position is appended to `positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stint {
    pub line: BattingLine,
    pub positions: Vec<Position>,
}

/// One team's half of a box score.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamBox {
    pub team: String,
    /// Stints by lineup slot. Slot 0 holds pitchers who do not bat.
    pub slots: [Vec<Stint>; 10],
    /// Pitchers in order of appearance.
    pub pitchers: Vec<PitchingLine>,
    /// Fielding lines in order of appearance, one per player and position.
    pub fielders: Vec<FieldingLine>,
    pub fielding: TeamFielding,
    /// Runs scored in each inning this team batted.
    pub linescore: Vec<u32>,
    /// Official at-bats, counted independently of the player lines.
    pub at_bats: u32,
    /// Earned runs charged to the team, excluding team-unearned runs.
    pub earned_runs: u32,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
    pub left_on_base: u32,
    current_pitcher: usize,
}

impl TeamBox {
    fn new(team: &str, game_id: &str) -> Self {
        let mut fielding = TeamFielding::new(team);
        fielding.games.insert(game_id.to_string());
        TeamBox {
            team: team.to_string(),
            slots: Default::default(),
            pitchers: Vec::new(),
            fielders: Vec::new(),
            fielding,
            linescore: Vec::new(),
            at_bats: 0,
            earned_runs: 0,
            runs: 0,
            hits: 0,
            errors: 0,
            left_on_base: 0,
            current_pitcher: 0,
        }
    }

    /// Every stint, slot by slot.
    pub fn stints(&self) -> impl Iterator<Item = &Stint> {
        self.slots.iter().flatten()
    }

    /// Batting lines for every stint, slot by slot.
    pub fn batting_lines(&self) -> impl Iterator<Item = &BattingLine> {
        self.stints().map(|stint| &stint.line)
    }

    /// The pitcher who started the game.
    pub fn starting_pitcher(&self) -> Option<&PitchingLine> {
        self.pitchers.first()
    }

    /// The pitcher on the mound at the current point of the game.
    pub fn current_pitcher(&self) -> Option<&PitchingLine> {
        self.pitchers.get(self.current_pitcher)
    }

    /// Double and triple plays turned, as shown in the linescore DP column.
    pub fn double_plays(&self) -> u32 {
        self.fielding.dp + self.fielding.tp
    }

    fn stint_mut(&mut self, player: &str) -> Option<&mut Stint> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|stint| stint.line.player == player)
    }

    fn pitching_mut(&mut self, player: &str) -> Option<&mut PitchingLine> {
        self.pitchers.iter_mut().find(|line| line.player == player)
    }

    fn fielding_mut(&mut self, player: &str, position: Position) -> Option<&mut FieldingLine> {
        self.fielders
            .iter_mut()
            .find(|line| line.player == player && line.position == position)
    }

    fn enter(&mut self, game_id: &str, player: &str, slot: u8, position: Position) -> Result<()> {
        if slot as usize >= self.slots.len() {
            return Err(Error::InvalidSlot {
                game: game_id.to_string(),
                player: player.to_string(),
                slot,
            });
        }
        match self.stint_mut(player) {
            Some(stint) => {
                if !stint.positions.contains(&position) {
                    stint.positions.push(position);
                }
            }
            None => {
                let mut line = BattingLine::new(player, self.team.as_str());
                line.games.insert(game_id.to_string());
                self.slots[slot as usize].push(Stint {
                    line,
                    positions: vec![position],
                });
            }
        }

        if position.is_fielding() && self.fielding_mut(player, position).is_none() {
            let mut line = FieldingLine::new(player, self.team.as_str(), position);
            line.games.insert(game_id.to_string());
            self.fielders.push(line);
        }

        if position == Position::Pitcher {
            match self.pitchers.iter().position(|line| line.player == player) {
                Some(index) => self.current_pitcher = index,
                None => {
                    let mut line = PitchingLine::new(player, self.team.as_str());
                    line.games.insert(game_id.to_string());
                    self.pitchers.push(line);
                    self.current_pitcher = self.pitchers.len() - 1;
                }
            }
        }
        Ok(())
    }

    fn runs_in(&mut self, inning: u8) -> &mut u32 {
        let index = (inning.max(1) - 1) as usize;
        if self.linescore.len() <= index {
            self.linescore.resize(index + 1, 0);
        }
        &mut self.linescore[index]
    }
}

/// A complete or in-progress box score.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub game_id: String,
    pub date: NaiveDate,
    pub number: u8,
    pub decisions: Decisions,
    /// Indexed by [`Side::index`].
    pub teams: [TeamBox; 2],
    /// True when the final state satisfied the game-over rule.
    pub complete: bool,
}

impl BoxScore {
    /// Replay `game` from its first event and return the finished box score.
    ///
    /// # Errors
    ///
    /// Fails if an event references a player who never entered the game.
    pub fn from_game(game: &Game) -> Result<BoxScore> {
        let mut acc = BoxScoreAccumulator::new();
        let reports: &mut [&mut dyn Report] = &mut [&mut acc];
        scan_game(game, reports)?;
        acc.box_scores
            .pop()
            .ok_or_else(|| missing(game, "box score"))
    }

    /// The box score half for `side`.
    pub fn team(&self, side: Side) -> &TeamBox {
        &self.teams[side.index()]
    }

    /// Innings played: the longer of the two linescores.
    pub fn innings(&self) -> usize {
        self.teams
            .iter()
            .map(|team| team.linescore.len())
            .max()
            .unwrap_or(0)
    }

    /// Text rendering using the scorebook's team and player names.
    pub fn display<'a>(&'a self, book: &'a Scorebook) -> BoxScoreDisplay<'a> {
        BoxScoreDisplay::new(self, book)
    }

    /// Batting lines for both teams, visitors first.
    pub fn batting_lines(&self) -> impl Iterator<Item = &BattingLine> {
        self.teams.iter().flat_map(TeamBox::batting_lines)
    }

    /// Pitching lines for both teams, visitors first.
    pub fn pitching_lines(&self) -> impl Iterator<Item = &PitchingLine> {
        self.teams.iter().flat_map(|team| team.pitchers.iter())
    }

    /// Fielding lines for both teams, visitors first.
    pub fn fielding_lines(&self) -> impl Iterator<Item = &FieldingLine> {
        self.teams.iter().flat_map(|team| team.fielders.iter())
    }

    fn new(game: &Game) -> Self {
        BoxScore {
            game_id: game.id.clone(),
            date: game.date,
            number: game.number,
            decisions: game.decisions.clone(),
            teams: [
                TeamBox::new(&game.visitor, &game.id),
                TeamBox::new(&game.home, &game.id),
            ],
            complete: false,
        }
    }

    fn split(&mut self, batting: Side) -> (&mut TeamBox, &mut TeamBox) {
        let [visitor, home] = &mut self.teams;
        match batting {
            Side::Visitor => (visitor, home),
            Side::Home => (home, visitor),
        }
    }
}

/// Builds box scores from the event stream.
///
/// As a [`Report`] it keeps every finished game; season reports instead call
/// [`end_game`](BoxScoreAccumulator::end_game) and fold the returned box
/// score into their own totals.
#[derive(Debug, Default)]
pub struct BoxScoreAccumulator {
    current: Option<BoxScore>,
    box_scores: Vec<BoxScore>,
}

impl BoxScoreAccumulator {
    /// An accumulator with no games.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished box scores, in scan order.
    pub fn box_scores(&self) -> &[BoxScore] {
        &self.box_scores
    }

    /// The game being accumulated, if any.
    pub fn in_progress(&self) -> Option<&BoxScore> {
        self.current.as_ref()
    }

    /// Seed a line for every starter.
    pub fn begin_game(&mut self, game: &Game) -> Result<()> {
        let mut score = BoxScore::new(game);
        for side in Side::BOTH {
            let team = &mut score.teams[side.index()];
            for starter in game.starters(side) {
                team.enter(&game.id, &starter.player, starter.slot, starter.position)?;
                if let Some(line) = team.fielding_mut(&starter.player, starter.position) {
                    line.gs += 1;
                }
            }
            match team.pitchers.first_mut() {
                Some(line) => line.gs += 1,
                None => return Err(missing(game, "starting pitcher")),
            }
            team.current_pitcher = 0;
        }
        self.current = Some(score);
        Ok(())
    }

    /// Apply the substitutions of one no-play event.
    pub fn substitute(&mut self, game: &Game, subs: &[Substitution]) -> Result<()> {
        let score = self.current_mut(game)?;
        for sub in subs {
            score.teams[sub.side.index()].enter(&game.id, &sub.player, sub.slot, sub.position)?;
        }
        Ok(())
    }

    /// Credit one play, reading the situation before the play from `state`.
    pub fn play(&mut self, game: &Game, play: &PlayEvent, state: &dyn GameState) -> Result<()> {
        let batting = state.half();
        let fielding = batting.opponent();
        let inning = state.inning();
        let score = self.current_mut(game)?;
        let (offense, defense) = score.split(batting);
        offense.runs_in(inning);

        let batter = if play.batter_event || play.at_bat {
            Some(state.batter().ok_or_else(|| missing(game, "batter"))?)
        } else {
            None
        };

        if let Some(batter) = batter {
            if play.at_bat {
                offense.at_bats += 1;
            }
            credit_batter(batting_line(game, offense, batter)?, play);
        }

        let pitcher = defense
            .current_pitcher()
            .map(|line| line.player.clone())
            .ok_or_else(|| missing(game, "pitcher"))?;
        credit_pitcher(pitching_line(game, defense, &pitcher)?, play);

        credit_fielders(game, defense, fielding, play, state)?;

        for base in 0..=3 {
            let runner = match base {
                0 => batter.filter(|_| play.batter_event),
                _ => state.runner(base),
            };
            let Some(runner) = runner else {
                continue;
            };
            let dest = play.advance[base];
            if dest.is_run() {
                *offense.runs_in(inning) += 1;
                batting_line(game, offense, runner)?.r += 1;
                let charged = match base {
                    0 => pitcher.as_str(),
                    _ => state
                        .responsible_pitcher(base)
                        .ok_or_else(|| missing(game, "responsible pitcher"))?,
                };
                let line = pitching_line(game, defense, charged)?;
                line.r += 1;
                if dest.is_earned_to_pitcher() {
                    line.er += 1;
                }
                if dest.is_earned_to_team() {
                    defense.earned_runs += 1;
                }
            }
            if base > 0 && play.stolen_base[base] {
                batting_line(game, offense, runner)?.sb += 1;
            }
            if base > 0 && play.caught_stealing[base] {
                batting_line(game, offense, runner)?.cs += 1;
            }
        }
        Ok(())
    }

    /// Close the current game: copy the final totals from `state`, assign
    /// decisions and complete-game credit, and return the box score.
    pub fn end_game(&mut self, game: &Game, state: &dyn GameState) -> Result<BoxScore> {
        let mut score = self
            .current
            .take()
            .ok_or_else(|| missing(game, "game in progress"))?;

        for side in Side::BOTH {
            let team = &mut score.teams[side.index()];
            team.runs = state.score(side);
            team.hits = state.hits(side);
            team.errors = state.errors(side);
            team.left_on_base = state.left_on_base(side);
        }

        let decisions: [(&Option<String>, fn(&mut PitchingLine)); 3] = [
            (&game.decisions.winner, |line| line.w += 1),
            (&game.decisions.loser, |line| line.l += 1),
            (&game.decisions.save, |line| line.sv += 1),
        ];
        for (pitcher, credit) in decisions {
            let Some(pitcher) = pitcher else {
                continue;
            };
            let line = score
                .teams
                .iter_mut()
                .find_map(|team| team.pitching_mut(pitcher))
                .ok_or_else(|| unknown(game, pitcher))?;
            credit(line);
        }

        for side in Side::BOTH {
            let allowed = score.team(side.opponent()).runs;
            let team = &mut score.teams[side.index()];
            let finisher = team.current_pitcher;
            if finisher == 0 {
                if let Some(line) = team.pitchers.first_mut() {
                    line.cg += 1;
                    if allowed == 0 {
                        line.sho += 1;
                    }
                }
            } else if let Some(line) = team.pitchers.get_mut(finisher) {
                line.gf += 1;
            }
        }

        score.complete = state.is_game_over();
        Ok(score)
    }

    fn current_mut(&mut self, game: &Game) -> Result<&mut BoxScore> {
        self.current
            .as_mut()
            .ok_or_else(|| missing(game, "game in progress"))
    }
}

impl Report for BoxScoreAccumulator {
    fn on_begin_game(&mut self, game: &Game, _state: &dyn GameState) -> Result<()> {
        self.begin_game(game)
    }

    fn on_event(&mut self, game: &Game, play: &PlayEvent, state: &dyn GameState) -> Result<()> {
        self.play(game, play, state)
    }

    fn on_substitution(
        &mut self,
        game: &Game,
        subs: &[Substitution],
        _state: &dyn GameState,
    ) -> Result<()> {
        self.substitute(game, subs)
    }

    fn on_end_game(&mut self, game: &Game, state: &dyn GameState) -> Result<()> {
        let score = self.end_game(game, state)?;
        self.box_scores.push(score);
        Ok(())
    }
}

fn credit_batter(line: &mut BattingLine, play: &PlayEvent) {
    if play.batter_event {
        line.pa += 1;
    }
    if play.at_bat {
        line.ab += 1;
    }
    match play.kind {
        EventKind::Single => line.h += 1,
        EventKind::Double => {
            line.h += 1;
            line.b2 += 1;
        }
        EventKind::Triple => {
            line.h += 1;
            line.b3 += 1;
        }
        EventKind::HomeRun => {
            line.h += 1;
            line.hr += 1;
        }
        EventKind::Walk => line.bb += 1,
        EventKind::IntentionalWalk => {
            line.bb += 1;
            line.ibb += 1;
        }
        EventKind::Strikeout => line.so += 1,
        EventKind::HitByPitch => line.hbp += 1,
        _ => {}
    }
    line.rbi += play.rbi as u32;
    line.sh += u32::from(play.sh);
    line.sf += u32::from(play.sf);
    line.gdp += u32::from(play.gdp);
}

fn credit_pitcher(line: &mut PitchingLine, play: &PlayEvent) {
    line.outs += play.outs as u32;
    if play.batter_event {
        line.bf += 1;
    }
    match play.kind {
        EventKind::Single => line.h += 1,
        EventKind::Double => {
            line.h += 1;
            line.b2 += 1;
        }
        EventKind::Triple => {
            line.h += 1;
            line.b3 += 1;
        }
        EventKind::HomeRun => {
            line.h += 1;
            line.hr += 1;
        }
        EventKind::Walk => line.bb += 1,
        EventKind::IntentionalWalk => {
            line.bb += 1;
            line.ibb += 1;
        }
        EventKind::Strikeout => line.so += 1,
        EventKind::HitByPitch => line.hb += 1,
        EventKind::Balk => line.bk += 1,
        _ => {}
    }
    line.wp += u32::from(play.wild_pitch);
    line.sh += u32::from(play.sh);
    line.sf += u32::from(play.sf);
}

fn credit_fielders(
    game: &Game,
    defense: &mut TeamBox,
    side: Side,
    play: &PlayEvent,
    state: &dyn GameState,
) -> Result<()> {
    let outs = play.outs as u32;
    defense.fielding.outs += outs;
    defense.fielding.po += play.putouts.len() as u32;
    defense.fielding.a += play.assists.len() as u32;
    defense.fielding.e += play.errors.len() as u32;

    if outs > 0 {
        for position in Position::FIELD {
            if let Some(player) = state.fielder(side, position) {
                fielding_line(game, defense, player, position)?.outs += outs;
            }
        }
    }

    let mut credit = |position: Position, apply: fn(&mut FieldingLine)| -> Result<()> {
        let player = state
            .fielder(side, position)
            .ok_or_else(|| missing(game, position.abbrev()))?;
        apply(fielding_line(game, defense, player, position)?);
        Ok(())
    };

    for &position in &play.putouts {
        credit(position, |line| line.po += 1)?;
    }
    for &position in &play.assists {
        credit(position, |line| line.a += 1)?;
    }
    for &position in &play.errors {
        credit(position, |line| line.e += 1)?;
    }
    if play.passed_ball {
        credit(Position::Catcher, |line| line.pb += 1)?;
    }
    if let Some(position) = play.fielded_by.filter(|_| outs > 0) {
        credit(position, |line| line.fielded_outs += 1)?;
    }

    if play.double_play || play.triple_play {
        let involved: BTreeSet<Position> = play
            .putouts
            .iter()
            .chain(play.assists.iter())
            .copied()
            .collect();
        for position in involved {
            if play.triple_play {
                credit(position, |line| line.tp += 1)?;
            } else {
                credit(position, |line| line.dp += 1)?;
            }
        }
    }

    if play.passed_ball {
        defense.fielding.pb += 1;
    }
    if play.triple_play {
        defense.fielding.tp += 1;
    } else if play.double_play {
        defense.fielding.dp += 1;
    }
    Ok(())
}

fn batting_line<'t>(game: &Game, team: &'t mut TeamBox, player: &str) -> Result<&'t mut BattingLine> {
    team.stint_mut(player)
        .map(|stint| &mut stint.line)
        .ok_or_else(|| unknown(game, player))
}

fn pitching_line<'t>(game: &Game, team: &'t mut TeamBox, player: &str) -> Result<&'t mut PitchingLine> {
    team.pitching_mut(player).ok_or_else(|| unknown(game, player))
}

fn fielding_line<'t>(
    game: &Game,
    team: &'t mut TeamBox,
    player: &str,
    position: Position,
) -> Result<&'t mut FieldingLine> {
    team.fielding_mut(player, position)
        .ok_or_else(|| unknown(game, player))
}

fn unknown(game: &Game, player: &str) -> Error {
    Error::UnknownPlayer {
        game: game.id.clone(),
        player: player.to_string(),
    }
}

fn missing(game: &Game, role: &str) -> Error {
    Error::MissingOccupant {
        game: game.id.clone(),
        role: role.to_string(),
    }
}
