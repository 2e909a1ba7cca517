use super::{BoxScoreReport, BoxScoreSink};
use crate::boxscore::BoxScore;
use crate::error::Result;
use crate::game::Game;
use crate::position::Position;
use crate::scorebook::Scorebook;
use crate::stats::{BattingLine, FieldingLine, Merge, PitchingLine};
use crate::table::{Align, Table};
use std::collections::BTreeMap;
use std::fmt;

/// A stat line that can be collected into a [`Register`].
pub trait RegisterLine: Merge + Clone + fmt::Debug + PartialEq + 'static {
    type Key: Ord + Clone + fmt::Debug + 'static;

    fn key(&self) -> Self::Key;
    fn player(&self) -> &str;
    fn team(&self) -> &str;

    /// The lines of this kind in a finished box score.
    fn from_box_score(score: &BoxScore) -> impl Iterator<Item = &Self>;
}

impl RegisterLine for BattingLine {
    type Key = (String, String);

    fn key(&self) -> Self::Key {
        (self.player.clone(), self.team.clone())
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn from_box_score(score: &BoxScore) -> impl Iterator<Item = &Self> {
        score.batting_lines()
    }
}

impl RegisterLine for PitchingLine {
    type Key = (String, String);

    fn key(&self) -> Self::Key {
        (self.player.clone(), self.team.clone())
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn from_box_score(score: &BoxScore) -> impl Iterator<Item = &Self> {
        score.pitching_lines()
    }
}

impl RegisterLine for FieldingLine {
    type Key = (String, String, Position);

    fn key(&self) -> Self::Key {
        (self.player.clone(), self.team.clone(), self.position)
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn from_box_score(score: &BoxScore) -> impl Iterator<Item = &Self> {
        score.fielding_lines()
    }
}

/// Season lines keyed by player and team (and position, for fielding).
///
/// Each game's lines are merged in as the game ends; afterwards the register
/// is read-only except through [`Register::filtered`], which copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Register<L: RegisterLine> {
    lines: BTreeMap<L::Key, L>,
}

impl<L: RegisterLine> Default for Register<L> {
    fn default() -> Self {
        Register {
            lines: BTreeMap::new(),
        }
    }
}

impl<L: RegisterLine> Register<L> {
    /// An empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new register holding copies of the lines of `base` that match
    /// `keep`.
    pub fn filtered(base: &Register<L>, keep: impl Fn(&L) -> bool) -> Self {
        Register {
            lines: base
                .lines
                .iter()
                .filter(|(_, line)| keep(line))
                .map(|(key, line)| (key.clone(), line.clone()))
                .collect(),
        }
    }

    /// Merge `line` into the entry with the same key, creating it if needed.
    pub fn add(&mut self, line: &L) {
        match self.lines.get_mut(&line.key()) {
            Some(existing) => existing.merge(line),
            None => {
                self.lines.insert(line.key(), line.clone());
            }
        }
    }

    /// The line for `key`.
    pub fn get(&self, key: &L::Key) -> Option<&L> {
        self.lines.get(key)
    }

    /// Lines in key order.
    pub fn lines(&self) -> impl Iterator<Item = &L> {
        self.lines.values()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the register has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in register order: alphabetical by player name, then team.
    pub fn sorted(&self, book: &Scorebook) -> Vec<&L> {
        let mut lines: Vec<(String, &L)> = self
            .lines
            .values()
            .map(|line| (book.sort_name(line.player()), line))
            .collect();
        lines.sort_by(|(a_name, a), (b_name, b)| {
            a_name
                .cmp(b_name)
                .then_with(|| a.player().cmp(b.player()))
                .then_with(|| a.team().cmp(b.team()))
        });
        lines.into_iter().map(|(_, line)| line).collect()
    }
}

impl<L: RegisterLine> BoxScoreSink for Register<L> {
    fn fold(&mut self, _game: &Game, score: &BoxScore) -> Result<()> {
        for line in L::from_box_score(score) {
            self.add(line);
        }
        Ok(())
    }
}

pub type BattingRegister = BoxScoreReport<Register<BattingLine>>;
pub type PitchingRegister = BoxScoreReport<Register<PitchingLine>>;
pub type FieldingRegister = BoxScoreReport<Register<FieldingLine>>;

impl Register<BattingLine> {
    /// One row per batting line, in register order.
    pub fn table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Batting register")
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left);
        for header in [
            "G", "AB", "R", "H", "2B", "3B", "HR", "RBI", "BB", "IBB", "SO", "HBP", "SH", "SF",
            "SB", "CS", "GDP",
        ] {
            table = table.column(header, 4, Align::Right);
        }
        for header in ["AVG", "OBP", "SLG"] {
            table = table.column(header, 5, Align::Right);
        }
        for line in self.sorted(book) {
            let counts = [
                line.g() as u32,
                line.ab,
                line.r,
                line.h,
                line.b2,
                line.b3,
                line.hr,
                line.rbi,
                line.bb,
                line.ibb,
                line.so,
                line.hbp,
                line.sh,
                line.sf,
                line.sb,
                line.cs,
                line.gdp,
            ];
            let mut row = vec![book.sort_name(&line.player), line.team.clone()];
            row.extend(counts.iter().map(u32::to_string));
            row.extend([line.avg(), line.obp(), line.slg()].map(|rate| rate.to_string()));
            table.push(row);
        }
        table
    }
}

impl Register<PitchingLine> {
    /// One row per pitching line, in register order.
    pub fn table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Pitching register")
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left);
        for header in ["G", "GS", "CG", "SHO", "GF", "W", "L", "SV"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table.column("IP", 6, Align::Right);
        for header in ["BF", "H", "HR", "R", "ER", "BB", "IBB", "SO", "HB", "WP", "BK"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table
            .column("PCT", 5, Align::Right)
            .column("ERA", 6, Align::Right);
        for line in self.sorted(book) {
            let mut row = vec![book.sort_name(&line.player), line.team.clone()];
            row.extend(
                [
                    line.g() as u32,
                    line.gs,
                    line.cg,
                    line.sho,
                    line.gf,
                    line.w,
                    line.l,
                    line.sv,
                ]
                .iter()
                .map(u32::to_string),
            );
            row.push(line.ip());
            row.extend(
                [
                    line.bf, line.h, line.hr, line.r, line.er, line.bb, line.ibb, line.so,
                    line.hb, line.wp, line.bk,
                ]
                .iter()
                .map(u32::to_string),
            );
            row.push(line.win_pct().to_string());
            row.push(format!("{:.2}", line.era()));
            table.push(row);
        }
        table
    }
}

impl Register<FieldingLine> {
    /// Lines at one position, as a new register.
    pub fn at_position(&self, position: Position) -> Self {
        Register::filtered(self, |line| line.position == position)
    }

    /// One row per fielding line, in register order.
    pub fn table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Fielding register")
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left)
            .column("Pos", 4, Align::Left);
        for header in ["G", "GS"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table.column("INN", 6, Align::Right);
        for header in ["PO", "A", "E", "DP", "TP", "PB"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table
            .column("PCT", 5, Align::Right)
            .column("RF", 5, Align::Right);
        for line in self.sorted(book) {
            let mut row = vec![
                book.sort_name(&line.player),
                line.team.clone(),
                line.position.abbrev().to_string(),
                line.g().to_string(),
                line.gs.to_string(),
                format!("{}.{}", line.outs / 3, line.outs % 3),
            ];
            row.extend(
                [line.po, line.a, line.e, line.dp, line.tp, line.pb]
                    .iter()
                    .map(u32::to_string),
            );
            row.push(line.pct().to_string());
            row.push(format!("{:.2}", line.range()));
            table.push(row);
        }
        table
    }
}
