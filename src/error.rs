use thiserror::Error;

/// Errors raised while replaying games, building reports, or diffing tables.
///
/// Undefined rate statistics are not errors (see [`Rate`](crate::Rate)), and
/// neither is a cancelled season scan (see
/// [`ScanOutcome`](crate::ScanOutcome)).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A player was referenced by an event before appearing as a starter or
    /// substitute. The event source owes this guarantee, so it is never
    /// defaulted.
    #[error("game {game}: player '{player}' was never entered in the lineup")]
    UnknownPlayer { game: String, player: String },

    /// An event needed an occupant (batter, pitcher, fielder, runner) that the
    /// event source could not supply.
    #[error("game {game}: no {role} in the current game state")]
    MissingOccupant { game: String, role: String },

    /// A starter or substitute was placed outside batting-order slots 0..=9.
    #[error("game {game}: player '{player}' entered in invalid lineup slot {slot}")]
    InvalidSlot { game: String, player: String, slot: u8 },

    #[error("game {game}: team '{team}' is not in the scorebook")]
    UnresolvedTeam { game: String, team: String },

    #[error("game {game}: player '{player}' is not in the scorebook")]
    UnresolvedPlayer { game: String, player: String },

    #[error("invalid fielding position code {0}")]
    InvalidPosition(u8),

    #[error("invalid advance destination code {0}")]
    InvalidDestination(u8),

    #[error("no report registered as '{0}'")]
    ReportNotFound(String),

    #[error("report '{0}' has a different type")]
    ReportTypeMismatch(String),

    #[error("tables differ in shape: {0}")]
    ShapeMismatch(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
