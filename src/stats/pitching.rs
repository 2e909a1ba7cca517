use super::{union_games, Merge, Rate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Pitching counters for one pitcher on one team over some scope.
///
/// Innings are kept as recorded outs; [`ip`](PitchingLine::ip) renders them
/// in the conventional `innings.thirds` notation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub player: String,
    pub team: String,
    pub games: BTreeSet<String>,
    pub gs: u32,
    pub cg: u32,
    pub sho: u32,
    pub gf: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub outs: u32,
    pub bf: u32,
    pub h: u32,
    pub b2: u32,
    pub b3: u32,
    pub hr: u32,
    pub r: u32,
    pub er: u32,
    pub bb: u32,
    pub ibb: u32,
    pub so: u32,
    pub hb: u32,
    pub wp: u32,
    pub bk: u32,
    pub sh: u32,
    pub sf: u32,
}

impl PitchingLine {
    /// An empty line.
    pub fn new(player: impl Into<String>, team: impl Into<String>) -> Self {
        PitchingLine {
            player: player.into(),
            team: team.into(),
            ..Default::default()
        }
    }

    /// Games pitched.
    pub fn g(&self) -> usize {
        self.games.len()
    }

    /// Innings pitched as `outs/3 "." outs%3`, e.g. `6.2`.
    pub fn ip(&self) -> String {
        format!("{}.{}", self.outs / 3, self.outs % 3)
    }

    /// Earned run average per nine innings.
    pub fn era(&self) -> Rate {
        Rate::new(27.0 * self.er as f64, self.outs as f64)
    }

    /// Winning percentage.
    pub fn win_pct(&self) -> Rate {
        Rate::new(self.w as f64, (self.w + self.l) as f64)
    }

    /// Walks plus hits per inning.
    pub fn whip(&self) -> Rate {
        Rate::new(3.0 * (self.bb + self.h) as f64, self.outs as f64)
    }
}

impl Merge for PitchingLine {
    fn merge(&mut self, other: &Self) {
        union_games(&mut self.games, &other.games);
        self.gs += other.gs;
        self.cg += other.cg;
        self.sho += other.sho;
        self.gf += other.gf;
        self.w += other.w;
        self.l += other.l;
        self.sv += other.sv;
        self.outs += other.outs;
        self.bf += other.bf;
        self.h += other.h;
        self.b2 += other.b2;
        self.b3 += other.b3;
        self.hr += other.hr;
        self.r += other.r;
        self.er += other.er;
        self.bb += other.bb;
        self.ibb += other.ibb;
        self.so += other.so;
        self.hb += other.hb;
        self.wp += other.wp;
        self.bk += other.bk;
        self.sh += other.sh;
        self.sf += other.sf;
    }
}
