use super::Report;
use crate::error::{Error, Result};
use crate::event::{EventKind, PlayEvent, Side};
use crate::game::Game;
use crate::position::Position;
use crate::scorebook::Scorebook;
use crate::source::GameState;
use crate::table::{Align, Table};
use chrono::NaiveDate;

/// One home run and the situation it was hit in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRun {
    pub game_id: String,
    pub date: NaiveDate,
    pub batter: String,
    pub team: String,
    pub pitcher: String,
    pub opponent: String,
    pub inning: u8,
    pub half: Side,
    /// Runners on base when the ball was hit, 0..=3.
    pub runners_on: u8,
    pub outs: u8,
}

impl HomeRun {
    /// Four runs on one swing.
    pub fn is_grand_slam(&self) -> bool {
        self.runners_on == 3
    }
}

/// Every home run of the scan, read directly from the event stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeRunLog {
    home_runs: Vec<HomeRun>,
}

impl HomeRunLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new log holding copies of the entries of `base` that match `keep`.
    ///
    /// ```
    /// use scorefold::HomeRunLog;
    ///
    /// let season = HomeRunLog::new();
    /// let slams = HomeRunLog::filtered(&season, |hr| hr.is_grand_slam());
    /// assert!(slams.is_empty());
    /// ```
    pub fn filtered(base: &HomeRunLog, keep: impl Fn(&HomeRun) -> bool) -> Self {
        HomeRunLog {
            home_runs: base.home_runs.iter().filter(|hr| keep(hr)).cloned().collect(),
        }
    }

    /// Home runs in the order they were hit.
    pub fn home_runs(&self) -> &[HomeRun] {
        &self.home_runs
    }

    /// Number of home runs logged.
    pub fn len(&self) -> usize {
        self.home_runs.len()
    }

    /// True when no home run was logged.
    pub fn is_empty(&self) -> bool {
        self.home_runs.is_empty()
    }

    /// One row per home run.
    pub fn table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Home runs")
            .column("Date", 10, Align::Left)
            .column("Batter", 24, Align::Left)
            .column("Tm", 4, Align::Left)
            .column("Pitcher", 24, Align::Left)
            .column("Opp", 4, Align::Left)
            .column("Inn", 5, Align::Right)
            .column("On", 3, Align::Right)
            .column("Out", 3, Align::Right);
        for hr in &self.home_runs {
            let half = match hr.half {
                Side::Visitor => "T",
                Side::Home => "B",
            };
            table.push(vec![
                hr.date.format("%Y-%m-%d").to_string(),
                book.full_name(&hr.batter),
                hr.team.clone(),
                book.full_name(&hr.pitcher),
                hr.opponent.clone(),
                format!("{half}{}", hr.inning),
                hr.runners_on.to_string(),
                hr.outs.to_string(),
            ]);
        }
        table
    }
}

impl Report for HomeRunLog {
    fn on_event(&mut self, game: &Game, play: &PlayEvent, state: &dyn GameState) -> Result<()> {
        if play.kind != EventKind::HomeRun {
            return Ok(());
        }
        let half = state.half();
        let role = |role: &str| Error::MissingOccupant {
            game: game.id.clone(),
            role: role.to_string(),
        };
        let batter = state.batter().ok_or_else(|| role("batter"))?;
        let pitcher = state
            .fielder(half.opponent(), Position::Pitcher)
            .ok_or_else(|| role("pitcher"))?;
        let runners_on = (1..=3).filter(|&base| state.runner(base).is_some()).count() as u8;
        self.home_runs.push(HomeRun {
            game_id: game.id.clone(),
            date: game.date,
            batter: batter.to_string(),
            team: game.team(half).to_string(),
            pitcher: pitcher.to_string(),
            opponent: game.team(half.opponent()).to_string(),
            inning: state.inning(),
            half,
            runners_on,
            outs: state.outs(),
        });
        Ok(())
    }
}
