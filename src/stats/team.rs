use super::{Merge, Rate};
use crate::event::Side;
use serde::{Deserialize, Serialize};

/// Won-lost record for one team, split by site, one-run games and extra
/// innings.
///
/// Games played is always `wins + losses + ties`; it is derived, not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: String,
    pub hw: u32,
    pub hl: u32,
    pub ht: u32,
    pub rw: u32,
    pub rl: u32,
    pub rt: u32,
    /// One-run wins and losses.
    pub ow: u32,
    pub ol: u32,
    /// Extra-inning wins and losses.
    pub xw: u32,
    pub xl: u32,
    pub rs: u32,
    pub ra: u32,
}

impl TeamRecord {
    /// An empty record.
    pub fn new(team: impl Into<String>) -> Self {
        TeamRecord {
            team: team.into(),
            ..Default::default()
        }
    }

    /// Fold in one game from this team's point of view.
    pub fn record(&mut self, side: Side, runs_for: u32, runs_against: u32, innings: usize) {
        self.rs += runs_for;
        self.ra += runs_against;
        let one_run = runs_for.abs_diff(runs_against) == 1;
        let extra = innings > 9;
        match runs_for.cmp(&runs_against) {
            std::cmp::Ordering::Greater => {
                match side {
                    Side::Home => self.hw += 1,
                    Side::Visitor => self.rw += 1,
                }
                self.ow += u32::from(one_run);
                self.xw += u32::from(extra);
            }
            std::cmp::Ordering::Less => {
                match side {
                    Side::Home => self.hl += 1,
                    Side::Visitor => self.rl += 1,
                }
                self.ol += u32::from(one_run);
                self.xl += u32::from(extra);
            }
            std::cmp::Ordering::Equal => match side {
                Side::Home => self.ht += 1,
                Side::Visitor => self.rt += 1,
            },
        }
    }

    /// Wins at home and on the road.
    pub fn wins(&self) -> u32 {
        self.hw + self.rw
    }

    /// Losses at home and on the road.
    pub fn losses(&self) -> u32 {
        self.hl + self.rl
    }

    /// Ties at home and on the road.
    pub fn ties(&self) -> u32 {
        self.ht + self.rt
    }

    /// Games played.
    pub fn games(&self) -> u32 {
        self.wins() + self.losses() + self.ties()
    }

    /// Winning percentage, ties excluded.
    pub fn pct(&self) -> Rate {
        Rate::new(self.wins() as f64, (self.wins() + self.losses()) as f64)
    }

    /// Winning percentage for ordering standings: a team without a decision
    /// sorts as exactly .500.
    pub fn sort_pct(&self) -> f64 {
        self.pct().value().unwrap_or(0.5)
    }
}

impl Merge for TeamRecord {
    fn merge(&mut self, other: &Self) {
        self.hw += other.hw;
        self.hl += other.hl;
        self.ht += other.ht;
        self.rw += other.rw;
        self.rl += other.rl;
        self.rt += other.rt;
        self.ow += other.ow;
        self.ol += other.ol;
        self.xw += other.xw;
        self.xl += other.xl;
        self.rs += other.rs;
        self.ra += other.ra;
    }
}
