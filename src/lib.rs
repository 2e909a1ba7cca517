mod boxscore;
mod diff;
mod error;
mod event;
mod game;
mod position;
mod scorebook;
pub mod season;
mod source;
pub mod stats;
mod table;

pub use boxscore::{BoxScore, BoxScoreAccumulator, BoxScoreDisplay, Stint, TeamBox};
pub use diff::{
    ConditionalIgnore, DiffBlock, DiffConfig, DiffEngine, DiffReport, DiffRow, MultisetGroup,
};
pub use error::{Error, Result};
pub use event::{Destination, EventKind, GameEvent, PlayEvent, Side, Substitution};
pub use game::{Decisions, Game, Starter};
pub use position::Position;
pub use scorebook::{Player, Scorebook, Team};
pub use season::{
    batting_metric, pitching_metric, scan_game, scan_game_with, BattingDailies,
    BattingRegister, BoxScoreReport, BoxScoreSink, FieldingRegister, HomeRun, HomeRunLog,
    Leader, Leaderboard, Metric, Monitor, PerformanceLog, PitchingDailies, PitchingRegister,
    Register, Report, ScanOutcome, Season, SeasonBuilder, Standings, StandingsReport,
    TeamGameLog, TeamGameLogReport, TeamTotals, TeamTotalsReport,
};
pub use source::{EventSource, GameState, Replay};
pub use stats::{
    BattingLine, FieldingLine, Merge, PitchingLine, Rate, TeamFielding, TeamRecord,
    UNDEFINED_PLACEHOLDER,
};
pub use table::{Align, Column, Table};
