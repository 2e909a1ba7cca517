//! Single-pass season scans feeding many independent reports.
//!
//! Every registered [`Report`] receives the same four callbacks, in the same
//! order, for every game that passes the season's filter. Reports never share
//! lines: each builds its own from the events it is shown.

mod eventlog;
mod gamelog;
mod leaders;
mod register;
mod standings;
mod totals;

pub use eventlog::{HomeRun, HomeRunLog};
pub use gamelog::{
    BattingDailies, GameLine, GameLines, GameLogRow, Outcome, PerformanceLog, PitchingDailies,
    TeamGameLog, TeamGameLogReport,
};
pub use leaders::{batting_metric, pitching_metric, Leader, Leaderboard, Metric};
pub use register::{
    BattingRegister, FieldingRegister, PitchingRegister, Register, RegisterLine,
};
pub use standings::{Standings, StandingsReport, StandingsRow};
pub use totals::{TeamTotals, TeamTotalsReport};

use crate::boxscore::{BoxScore, BoxScoreAccumulator};
use crate::error::{Error, Result};
use crate::event::{GameEvent, PlayEvent, Substitution};
use crate::game::Game;
use crate::scorebook::Scorebook;
use crate::source::{EventSource, GameState, Replay};
use log::{debug, info, warn};
use std::any::Any;
use std::ops::Deref;

/// A visitor fed one ordered event stream.
///
/// For each game the driver calls `on_begin_game` once, then `on_event` for
/// each play or `on_substitution` for each no-play entry in order, then
/// `on_end_game` once. `state` describes the game *before* the event; at
/// `on_end_game` it is the final state.
pub trait Report: Any {
    fn on_begin_game(&mut self, _game: &Game, _state: &dyn GameState) -> Result<()> {
        Ok(())
    }

    fn on_event(&mut self, _game: &Game, _play: &PlayEvent, _state: &dyn GameState) -> Result<()> {
        Ok(())
    }

    fn on_substitution(
        &mut self,
        _game: &Game,
        _subs: &[Substitution],
        _state: &dyn GameState,
    ) -> Result<()> {
        Ok(())
    }

    fn on_end_game(&mut self, _game: &Game, _state: &dyn GameState) -> Result<()> {
        Ok(())
    }
}

/// Replay one game through [`Replay`] and feed it to every report.
pub fn scan_game(game: &Game, reports: &mut [&mut dyn Report]) -> Result<()> {
    let mut source = Replay::new(game);
    scan_game_with(game, &mut source, reports)
}

/// Feed one game to every report, stepping the given event source.
///
/// The source must be positioned at the start of `game`.
pub fn scan_game_with<S: EventSource>(
    game: &Game,
    source: &mut S,
    reports: &mut [&mut dyn Report],
) -> Result<()> {
    for report in reports.iter_mut() {
        report.on_begin_game(game, &*source)?;
    }
    for event in &game.events {
        match event {
            GameEvent::Play(play) => {
                for report in reports.iter_mut() {
                    report.on_event(game, play, &*source)?;
                }
            }
            GameEvent::NoPlay(subs) => {
                for report in reports.iter_mut() {
                    report.on_substitution(game, subs, &*source)?;
                }
            }
        }
        source.step()?;
    }
    for report in reports.iter_mut() {
        report.on_end_game(game, &*source)?;
    }
    Ok(())
}

/// Reports that only need each game's finished box score.
pub trait BoxScoreSink: 'static {
    fn fold(&mut self, game: &Game, score: &BoxScore) -> Result<()>;
}

/// Adapts a [`BoxScoreSink`] into a [`Report`] by running a private
/// [`BoxScoreAccumulator`] and folding each finished game.
///
/// Dereferences to the sink, so `register.lines()` works on the report.
#[derive(Debug, Default)]
pub struct BoxScoreReport<T> {
    games: BoxScoreAccumulator,
    sink: T,
}

impl<T> BoxScoreReport<T> {
    /// Wrap `sink` with a fresh box score accumulator.
    pub fn new(sink: T) -> Self {
        BoxScoreReport {
            games: BoxScoreAccumulator::new(),
            sink,
        }
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> T {
        self.sink
    }
}

impl<T> Deref for BoxScoreReport<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.sink
    }
}

impl<T: BoxScoreSink> Report for BoxScoreReport<T> {
    fn on_begin_game(&mut self, game: &Game, _state: &dyn GameState) -> Result<()> {
        self.games.begin_game(game)
    }

    fn on_event(&mut self, game: &Game, play: &PlayEvent, state: &dyn GameState) -> Result<()> {
        self.games.play(game, play, state)
    }

    fn on_substitution(
        &mut self,
        game: &Game,
        subs: &[Substitution],
        _state: &dyn GameState,
    ) -> Result<()> {
        self.games.substitute(game, subs)
    }

    fn on_end_game(&mut self, game: &Game, state: &dyn GameState) -> Result<()> {
        let score = self.games.end_game(game, state)?;
        self.sink.fold(game, &score)
    }
}

/// Polled between games; returning `false` cancels the scan.
pub trait Monitor {
    fn progress(&mut self, completed: usize, total: usize, next: &Game) -> bool;
}

impl<F> Monitor for F
where
    F: FnMut(usize, usize, &Game) -> bool,
{
    fn progress(&mut self, completed: usize, total: usize, next: &Game) -> bool {
        self(completed, total, next)
    }
}

/// How a scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every selected game was processed.
    Complete { games: usize },
    /// The monitor cancelled the scan after `games` of `total` games.
    Incomplete { games: usize, total: usize },
}

impl ScanOutcome {
    /// True when every selected game was scanned.
    pub fn is_complete(&self) -> bool {
        matches!(self, ScanOutcome::Complete { .. })
    }

    /// Number of games scanned.
    pub fn games(&self) -> usize {
        match *self {
            ScanOutcome::Complete { games } | ScanOutcome::Incomplete { games, .. } => games,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-erased access to a registered report.
///
/// This trait is sealed and implemented for every [`Report`].
pub trait ReportOps: sealed::Sealed {
    fn as_report_mut(&mut self) -> &mut dyn Report;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<R: Report> sealed::Sealed for R {}

impl<R: Report> ReportOps for R {
    fn as_report_mut(&mut self) -> &mut dyn Report {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

type GameFilter = Box<dyn Fn(&Game) -> bool>;

/// Builder for a [`Season`]: named reports, an optional game filter and an
/// optional progress monitor.
///
/// # Examples
///
/// ```
/// use scorefold::{BattingRegister, Scorebook, Season, Standings, StandingsReport};
///
/// let book = Scorebook::new(2024);
/// let mut season = Season::builder()
///     .report("batting", BattingRegister::default())
///     .report("standings", StandingsReport::new(Standings::default()))
///     .filter(|game| game.number == 0)
///     .build();
///
/// let outcome = season.scan(&book).unwrap();
/// assert!(outcome.is_complete());
/// assert_eq!(outcome.games(), 0);
/// let batting: &BattingRegister = season.report("batting").unwrap();
/// assert!(batting.is_empty());
/// ```
#[derive(Default)]
pub struct SeasonBuilder {
    reports: Vec<(String, Box<dyn ReportOps>)>,
    filter: Option<GameFilter>,
    monitor: Option<Box<dyn Monitor>>,
}

impl SeasonBuilder {
    /// Register a report under `name`. A later registration with the same
    /// name replaces the earlier one.
    pub fn report<R: Report>(mut self, name: &str, report: R) -> Self {
        self.reports.retain(|(existing, _)| existing != name);
        self.reports.push((name.to_string(), Box::new(report)));
        self
    }

    /// Only scan games for which `filter` returns true.
    pub fn filter(mut self, filter: impl Fn(&Game) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Poll `monitor` between games.
    pub fn monitor(mut self, monitor: impl Monitor + 'static) -> Self {
        self.monitor = Some(Box::new(monitor));
        self
    }

    /// Finish building the season.
    pub fn build(self) -> Season {
        Season {
            reports: self.reports,
            filter: self.filter,
            monitor: self.monitor,
        }
    }
}

/// Drives a scorebook's games through a set of reports in one pass.
pub struct Season {
    reports: Vec<(String, Box<dyn ReportOps>)>,
    filter: Option<GameFilter>,
    monitor: Option<Box<dyn Monitor>>,
}

impl std::fmt::Debug for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Season")
            .field(
                "reports",
                &self.reports.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("filtered", &self.filter.is_some())
            .field("monitored", &self.monitor.is_some())
            .finish()
    }
}

impl Season {
    /// Start registering reports.
    pub fn builder() -> SeasonBuilder {
        SeasonBuilder::default()
    }

    /// Scan every selected game of `book` in order.
    ///
    /// The monitor is polled before each game. If it returns false the scan
    /// stops cleanly and reports [`ScanOutcome::Incomplete`]; reports hold the
    /// games processed so far.
    ///
    /// # Errors
    ///
    /// Stops at the first error any report raises. Reports then hold partial
    /// results and should be discarded.
    pub fn scan(&mut self, book: &Scorebook) -> Result<ScanOutcome> {
        let selected: Vec<&Game> = book
            .games
            .iter()
            .filter(|game| self.filter.as_ref().is_none_or(|keep| keep(game)))
            .collect();
        let total = selected.len();
        let mut reports: Vec<&mut dyn Report> = self
            .reports
            .iter_mut()
            .map(|(_, report)| report.as_report_mut())
            .collect();

        for (done, game) in selected.into_iter().enumerate() {
            if let Some(monitor) = self.monitor.as_mut() {
                if !monitor.progress(done, total, game) {
                    warn!("season scan cancelled after {done} of {total} games");
                    return Ok(ScanOutcome::Incomplete { games: done, total });
                }
            }
            debug!("scanning game {} ({} events)", game.id, game.events.len());
            scan_game(game, &mut reports)?;
        }

        info!(
            "season scan complete: {total} games, {} reports",
            reports.len()
        );
        Ok(ScanOutcome::Complete { games: total })
    }

    /// Names of the registered reports, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reports.iter().map(|(name, _)| name.as_str())
    }

    /// Borrow the report registered as `name`.
    ///
    /// # Errors
    ///
    /// [`Error::ReportNotFound`] if nothing is registered under `name`;
    /// [`Error::ReportTypeMismatch`] if it is not an `R`.
    pub fn report<R: Report>(&self, name: &str) -> Result<&R> {
        let (_, report) = self
            .reports
            .iter()
            .find(|(existing, _)| existing == name)
            .ok_or_else(|| Error::ReportNotFound(name.to_string()))?;
        report
            .as_any()
            .downcast_ref::<R>()
            .ok_or_else(|| Error::ReportTypeMismatch(name.to_string()))
    }

    /// Remove and return the report registered as `name`.
    pub fn take_report<R: Report>(&mut self, name: &str) -> Result<R> {
        let index = self
            .reports
            .iter()
            .position(|(existing, _)| existing == name)
            .ok_or_else(|| Error::ReportNotFound(name.to_string()))?;
        if !self.reports[index].1.as_any().is::<R>() {
            return Err(Error::ReportTypeMismatch(name.to_string()));
        }
        let (_, report) = self.reports.remove(index);
        report
            .into_any()
            .downcast::<R>()
            .map(|report| *report)
            .map_err(|_| Error::ReportTypeMismatch(name.to_string()))
    }
}
