use super::{BoxScoreReport, BoxScoreSink, RegisterLine};
use crate::boxscore::BoxScore;
use crate::error::Result;
use crate::event::Side;
use crate::game::Game;
use crate::scorebook::Scorebook;
use crate::stats::{BattingLine, PitchingLine, TeamRecord};
use crate::table::{Align, Table};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Result of one game for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    fn of(runs_for: u32, runs_against: u32) -> Outcome {
        match runs_for.cmp(&runs_against) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// "W", "L" or "T".
    pub fn letter(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Tie => "T",
        }
    }
}

/// One game from one team's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLogRow {
    pub team: String,
    pub game_id: String,
    pub date: NaiveDate,
    pub number: u8,
    pub opponent: String,
    pub home: bool,
    pub runs_for: u32,
    pub runs_against: u32,
    pub outcome: Outcome,
    /// Wins, losses and ties after this game.
    pub record: (u32, u32, u32),
    pub innings: usize,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub save: Option<String>,
}

/// Every team's games in scan order, with the running record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamGameLog {
    rows: Vec<GameLogRow>,
    records: BTreeMap<String, TeamRecord>,
}

pub type TeamGameLogReport = BoxScoreReport<TeamGameLog>;

impl TeamGameLog {
    /// Rows for every team, in game order.
    pub fn rows(&self) -> &[GameLogRow] {
        &self.rows
    }

    /// One team's rows, in date order (doubleheader games by number).
    pub fn for_team(&self, team: &str) -> Vec<&GameLogRow> {
        let mut rows: Vec<&GameLogRow> = self.rows.iter().filter(|row| row.team == team).collect();
        rows.sort_by_key(|row| (row.date, row.number));
        rows
    }

    /// One team's game log.
    pub fn table(&self, book: &Scorebook, team: &str) -> Table {
        let mut table = Table::new(format!("{} game log", book.team_name(team)))
            .column("Date", 12, Align::Left)
            .column("", 2, Align::Left)
            .column("Opp", 24, Align::Left)
            .column("", 1, Align::Left)
            .column("R", 3, Align::Right)
            .column("RA", 3, Align::Right)
            .column("Inn", 3, Align::Right)
            .column("Rec", 8, Align::Right)
            .column("Win", 20, Align::Left)
            .column("Loss", 20, Align::Left)
            .column("Save", 20, Align::Left);
        let name = |id: &Option<String>| {
            id.as_deref()
                .map(|id| book.full_name(id))
                .unwrap_or_default()
        };
        for row in self.for_team(team) {
            let (w, l, t) = row.record;
            let record = if t > 0 {
                format!("{w}-{l}-{t}")
            } else {
                format!("{w}-{l}")
            };
            table.push(vec![
                dated(row.date, row.number),
                if row.home { "vs" } else { "at" }.to_string(),
                book.team_name(&row.opponent),
                row.outcome.letter().to_string(),
                row.runs_for.to_string(),
                row.runs_against.to_string(),
                row.innings.to_string(),
                record,
                name(&row.winner),
                name(&row.loser),
                name(&row.save),
            ]);
        }
        table
    }
}

impl BoxScoreSink for TeamGameLog {
    fn fold(&mut self, game: &Game, score: &BoxScore) -> Result<()> {
        let innings = score.innings();
        for side in Side::BOTH {
            let team = score.team(side);
            let opponent = score.team(side.opponent());
            let record = self
                .records
                .entry(team.team.clone())
                .or_insert_with(|| TeamRecord::new(team.team.as_str()));
            record.record(side, team.runs, opponent.runs, innings);
            self.rows.push(GameLogRow {
                team: team.team.clone(),
                game_id: game.id.clone(),
                date: game.date,
                number: game.number,
                opponent: opponent.team.clone(),
                home: side == Side::Home,
                runs_for: team.runs,
                runs_against: opponent.runs,
                outcome: Outcome::of(team.runs, opponent.runs),
                record: (record.wins(), record.losses(), record.ties()),
                innings,
                winner: game.decisions.winner.clone(),
                loser: game.decisions.loser.clone(),
                save: game.decisions.save.clone(),
            });
        }
        Ok(())
    }
}

/// A single player's line from a single game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLine<L> {
    pub game_id: String,
    pub date: NaiveDate,
    pub number: u8,
    pub line: L,
}

type LinePredicate<L> = Box<dyn Fn(&L) -> bool>;

/// Per-game player lines, optionally restricted to those matching a
/// predicate.
///
/// With no predicate this is a daily log; with one it is a log of notable
/// performances, such as multi-homer games.
pub struct GameLines<L> {
    keep: Option<LinePredicate<L>>,
    rows: Vec<GameLine<L>>,
}

pub type BattingDailies = BoxScoreReport<GameLines<BattingLine>>;
pub type PitchingDailies = BoxScoreReport<GameLines<PitchingLine>>;
pub type PerformanceLog<L> = BoxScoreReport<GameLines<L>>;

impl<L> Default for GameLines<L> {
    fn default() -> Self {
        GameLines {
            keep: None,
            rows: Vec::new(),
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for GameLines<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLines")
            .field("filtered", &self.keep.is_some())
            .field("rows", &self.rows)
            .finish()
    }
}

impl<L: RegisterLine> GameLines<L> {
    /// Keep every line.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only lines for which `keep` returns true.
    pub fn matching(keep: impl Fn(&L) -> bool + 'static) -> Self {
        GameLines {
            keep: Some(Box::new(keep)),
            rows: Vec::new(),
        }
    }

    /// Rows in scan order.
    pub fn rows(&self) -> &[GameLine<L>] {
        &self.rows
    }

    /// Lines for one player, in game order.
    pub fn for_player<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a GameLine<L>> {
        self.rows.iter().filter(move |row| row.line.player() == player)
    }

    /// Number of lines kept.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no line was kept.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<L: RegisterLine> BoxScoreSink for GameLines<L> {
    fn fold(&mut self, game: &Game, score: &BoxScore) -> Result<()> {
        for line in L::from_box_score(score) {
            if self.keep.as_ref().is_none_or(|keep| keep(line)) {
                self.rows.push(GameLine {
                    game_id: game.id.clone(),
                    date: game.date,
                    number: game.number,
                    line: line.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `2024-07-04`, or `2024-07-04 (2)` for the second game of a
/// doubleheader.
fn dated(date: NaiveDate, number: u8) -> String {
    match number {
        0 => date.format("%Y-%m-%d").to_string(),
        n => format!("{} ({n})", date.format("%Y-%m-%d")),
    }
}

impl GameLines<BattingLine> {
    /// One row per batting game line.
    pub fn table(&self, book: &Scorebook, title: &str) -> Table {
        let mut table = Table::new(title)
            .column("Date", 14, Align::Left)
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left);
        for header in ["AB", "R", "H", "2B", "3B", "HR", "RBI", "BB", "SO", "SB"] {
            table = table.column(header, 4, Align::Right);
        }
        for row in &self.rows {
            let line = &row.line;
            let mut cells = vec![dated(row.date, row.number), book.full_name(&line.player), line.team.clone()];
            cells.extend(
                [
                    line.ab, line.r, line.h, line.b2, line.b3, line.hr, line.rbi, line.bb,
                    line.so, line.sb,
                ]
                .iter()
                .map(u32::to_string),
            );
            table.push(cells);
        }
        table
    }
}

impl GameLines<PitchingLine> {
    /// One row per pitching game line.
    pub fn table(&self, book: &Scorebook, title: &str) -> Table {
        let mut table = Table::new(title)
            .column("Date", 14, Align::Left)
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left)
            .column("Dec", 3, Align::Left)
            .column("IP", 5, Align::Right);
        for header in ["H", "R", "ER", "BB", "SO", "HR"] {
            table = table.column(header, 4, Align::Right);
        }
        for row in &self.rows {
            let line = &row.line;
            let decision = if line.w > 0 {
                "W"
            } else if line.l > 0 {
                "L"
            } else if line.sv > 0 {
                "S"
            } else {
                ""
            };
            let mut cells = vec![
                dated(row.date, row.number),
                book.full_name(&line.player),
                line.team.clone(),
                decision.to_string(),
                line.ip(),
            ];
            cells.extend(
                [line.h, line.r, line.er, line.bb, line.so, line.hr]
                    .iter()
                    .map(u32::to_string),
            );
            table.push(cells);
        }
        table
    }
}
