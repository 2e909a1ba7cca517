use super::{union_games, Merge, Rate};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fielding counters for one player at one position on one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingLine {
    pub player: String,
    pub team: String,
    pub position: Position,
    pub games: BTreeSet<String>,
    pub gs: u32,
    /// Outs recorded by the defense while this player was at the position.
    pub outs: u32,
    /// Balls in play this fielder turned into outs.
    pub fielded_outs: u32,
    pub po: u32,
    pub a: u32,
    pub e: u32,
    pub dp: u32,
    pub tp: u32,
    pub pb: u32,
}

impl FieldingLine {
    /// An empty line.
    pub fn new(player: impl Into<String>, team: impl Into<String>, position: Position) -> Self {
        FieldingLine {
            player: player.into(),
            team: team.into(),
            position,
            games: BTreeSet::new(),
            gs: 0,
            outs: 0,
            fielded_outs: 0,
            po: 0,
            a: 0,
            e: 0,
            dp: 0,
            tp: 0,
            pb: 0,
        }
    }

    /// Games played at the position.
    pub fn g(&self) -> usize {
        self.games.len()
    }

    /// Fielding percentage.
    pub fn pct(&self) -> Rate {
        let chances = self.po + self.a;
        Rate::new(chances as f64, (chances + self.e) as f64)
    }

    /// Balls fielded into outs per nine innings at the position.
    pub fn range(&self) -> Rate {
        Rate::new(27.0 * self.fielded_outs as f64, self.outs as f64)
    }
}

impl Merge for FieldingLine {
    fn merge(&mut self, other: &Self) {
        union_games(&mut self.games, &other.games);
        self.gs += other.gs;
        self.outs += other.outs;
        self.fielded_outs += other.fielded_outs;
        self.po += other.po;
        self.a += other.a;
        self.e += other.e;
        self.dp += other.dp;
        self.tp += other.tp;
        self.pb += other.pb;
    }
}

/// Fielding totals for a whole team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFielding {
    pub team: String,
    pub games: BTreeSet<String>,
    pub outs: u32,
    pub po: u32,
    pub a: u32,
    pub e: u32,
    pub dp: u32,
    pub tp: u32,
    pub pb: u32,
}

impl TeamFielding {
    /// Empty totals.
    pub fn new(team: impl Into<String>) -> Self {
        TeamFielding {
            team: team.into(),
            ..Default::default()
        }
    }

    /// Games played.
    pub fn g(&self) -> usize {
        self.games.len()
    }

    /// Fielding percentage.
    pub fn pct(&self) -> Rate {
        let chances = self.po + self.a;
        Rate::new(chances as f64, (chances + self.e) as f64)
    }
}

impl Merge for TeamFielding {
    fn merge(&mut self, other: &Self) {
        union_games(&mut self.games, &other.games);
        self.outs += other.outs;
        self.po += other.po;
        self.a += other.a;
        self.e += other.e;
        self.dp += other.dp;
        self.tp += other.tp;
        self.pb += other.pb;
    }
}
