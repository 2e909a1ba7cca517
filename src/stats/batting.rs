use super::{union_games, Merge, Rate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Batting counters for one player on one team over some scope.
///
/// # Examples
///
/// ```
/// use scorefold::{BattingLine, Merge};
///
/// let mut a = BattingLine::new("smitj001", "BOS");
/// a.ab = 3;
/// a.h = 1;
/// let mut b = BattingLine::new("smitj001", "BOS");
/// b.ab = 2;
/// b.h = 1;
///
/// a.merge(&b);
/// assert_eq!((a.ab, a.h), (5, 2));
/// assert_eq!(a.avg().value(), Some(0.4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub player: String,
    pub team: String,
    pub games: BTreeSet<String>,
    pub pa: u32,
    pub ab: u32,
    pub r: u32,
    pub h: u32,
    pub b2: u32,
    pub b3: u32,
    pub hr: u32,
    pub rbi: u32,
    pub bb: u32,
    pub ibb: u32,
    pub so: u32,
    pub hbp: u32,
    pub sh: u32,
    pub sf: u32,
    pub sb: u32,
    pub cs: u32,
    pub gdp: u32,
}

impl BattingLine {
    /// An empty line.
    pub fn new(player: impl Into<String>, team: impl Into<String>) -> Self {
        BattingLine {
            player: player.into(),
            team: team.into(),
            ..Default::default()
        }
    }

    /// Games played.
    pub fn g(&self) -> usize {
        self.games.len()
    }

    /// Total bases.
    pub fn tb(&self) -> u32 {
        self.h + self.b2 + 2 * self.b3 + 3 * self.hr
    }

    /// Batting average.
    pub fn avg(&self) -> Rate {
        Rate::new(self.h as f64, self.ab as f64)
    }

    /// Slugging percentage.
    pub fn slg(&self) -> Rate {
        Rate::new(self.tb() as f64, self.ab as f64)
    }

    /// On-base percentage.
    pub fn obp(&self) -> Rate {
        Rate::new(
            (self.h + self.bb + self.hbp) as f64,
            (self.ab + self.bb + self.hbp + self.sf) as f64,
        )
    }

    /// On-base plus slugging; undefined when either part is.
    pub fn ops(&self) -> Rate {
        match (self.obp().value(), self.slg().value()) {
            (Some(obp), Some(slg)) => Rate::new(obp + slg, 1.0),
            _ => Rate::UNDEFINED,
        }
    }
}

impl Merge for BattingLine {
    fn merge(&mut self, other: &Self) {
        union_games(&mut self.games, &other.games);
        self.pa += other.pa;
        self.ab += other.ab;
        self.r += other.r;
        self.h += other.h;
        self.b2 += other.b2;
        self.b3 += other.b3;
        self.hr += other.hr;
        self.rbi += other.rbi;
        self.bb += other.bb;
        self.ibb += other.ibb;
        self.so += other.so;
        self.hbp += other.hbp;
        self.sh += other.sh;
        self.sf += other.sf;
        self.sb += other.sb;
        self.cs += other.cs;
        self.gdp += other.gdp;
    }
}
