use super::{BoxScoreReport, BoxScoreSink};
use crate::boxscore::BoxScore;
use crate::error::Result;
use crate::game::Game;
use crate::scorebook::Scorebook;
use crate::stats::{BattingLine, Merge, PitchingLine, TeamFielding};
use crate::table::{Align, Table};
use std::collections::BTreeMap;

/// Team batting, pitching and fielding totals.
///
/// Team lines carry the team id and an empty player id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTotals {
    batting: BTreeMap<String, BattingLine>,
    pitching: BTreeMap<String, PitchingLine>,
    fielding: BTreeMap<String, TeamFielding>,
}

pub type TeamTotalsReport = BoxScoreReport<TeamTotals>;

impl TeamTotals {
    /// Batting totals for `team`.
    pub fn batting(&self, team: &str) -> Option<&BattingLine> {
        self.batting.get(team)
    }

    /// Pitching totals for `team`.
    pub fn pitching(&self, team: &str) -> Option<&PitchingLine> {
        self.pitching.get(team)
    }

    /// Fielding totals for `team`.
    pub fn fielding(&self, team: &str) -> Option<&TeamFielding> {
        self.fielding.get(team)
    }

    /// Team identifiers, sorted.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.batting.keys().map(String::as_str)
    }

    /// League-wide batting: every team's line merged.
    pub fn league_batting(&self) -> BattingLine {
        self.batting
            .values()
            .fold(BattingLine::new("", ""), |total, line| total.merged(line))
    }

    /// Pitching totals for all teams.
    pub fn league_pitching(&self) -> PitchingLine {
        self.pitching
            .values()
            .fold(PitchingLine::new("", ""), |total, line| total.merged(line))
    }

    /// One batting row per team.
    pub fn batting_table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Team batting").column("Team", 24, Align::Left);
        for header in ["G", "AB", "R", "H", "2B", "3B", "HR", "RBI", "BB", "SO", "SB", "CS"] {
            table = table.column(header, 5, Align::Right);
        }
        for header in ["AVG", "OBP", "SLG"] {
            table = table.column(header, 5, Align::Right);
        }
        for line in self.batting.values() {
            let mut row = vec![book.team_name(&line.team)];
            row.extend(
                [
                    line.g() as u32,
                    line.ab,
                    line.r,
                    line.h,
                    line.b2,
                    line.b3,
                    line.hr,
                    line.rbi,
                    line.bb,
                    line.so,
                    line.sb,
                    line.cs,
                ]
                .iter()
                .map(u32::to_string),
            );
            row.extend([line.avg(), line.obp(), line.slg()].map(|rate| rate.to_string()));
            table.push(row);
        }
        table
    }

    /// One pitching row per team.
    pub fn pitching_table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Team pitching").column("Team", 24, Align::Left);
        for header in ["G", "CG", "SHO", "SV"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table.column("IP", 7, Align::Right);
        for header in ["H", "R", "ER", "HR", "BB", "SO"] {
            table = table.column(header, 5, Align::Right);
        }
        table = table.column("ERA", 6, Align::Right);
        for line in self.pitching.values() {
            let mut row = vec![book.team_name(&line.team)];
            row.extend(
                [line.g() as u32, line.cg, line.sho, line.sv]
                    .iter()
                    .map(u32::to_string),
            );
            row.push(line.ip());
            row.extend(
                [line.h, line.r, line.er, line.hr, line.bb, line.so]
                    .iter()
                    .map(u32::to_string),
            );
            row.push(format!("{:.2}", line.era()));
            table.push(row);
        }
        table
    }

    /// One fielding row per team.
    pub fn fielding_table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Team fielding").column("Team", 24, Align::Left);
        for header in ["G", "PO", "A", "E", "DP", "TP", "PB"] {
            table = table.column(header, 5, Align::Right);
        }
        table = table.column("PCT", 5, Align::Right);
        for line in self.fielding.values() {
            let mut row = vec![book.team_name(&line.team)];
            row.extend(
                [line.g() as u32, line.po, line.a, line.e, line.dp, line.tp, line.pb]
                    .iter()
                    .map(u32::to_string),
            );
            row.push(line.pct().to_string());
            table.push(row);
        }
        table
    }
}

impl BoxScoreSink for TeamTotals {
    fn fold(&mut self, _game: &Game, score: &BoxScore) -> Result<()> {
        for team in &score.teams {
            let id = team.team.as_str();
            let batting = self
                .batting
                .entry(id.to_string())
                .or_insert_with(|| BattingLine::new("", id));
            for line in team.batting_lines() {
                batting.merge(line);
            }
            let pitching = self
                .pitching
                .entry(id.to_string())
                .or_insert_with(|| PitchingLine::new("", id));
            for line in &team.pitchers {
                pitching.merge(line);
            }
            self.fielding
                .entry(id.to_string())
                .or_insert_with(|| TeamFielding::new(id))
                .merge(&team.fielding);
        }
        Ok(())
    }
}
