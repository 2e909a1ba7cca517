use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fielding position code.
///
/// The numeric values are the conventional scorer's numbers (1 = pitcher
/// through 9 = right field), extended with 10 for the designated hitter and
/// 11/12 for the pinch-hitter and pinch-runner roles that only appear in
/// substitutions. Output formats depend on these exact numbers.
///
/// # Examples
///
/// ```
/// use scorefold::Position;
///
/// let pos = Position::try_from(6).unwrap();
/// assert_eq!(pos, Position::Shortstop);
/// assert_eq!(pos.code(), 6);
/// assert_eq!(pos.abbrev(), "ss");
/// assert!(Position::try_from(13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Position {
    Pitcher = 1,
    Catcher = 2,
    FirstBase = 3,
    SecondBase = 4,
    ThirdBase = 5,
    Shortstop = 6,
    LeftField = 7,
    CenterField = 8,
    RightField = 9,
    DesignatedHitter = 10,
    PinchHitter = 11,
    PinchRunner = 12,
}

impl Position {
    /// The nine positions on the field, in scorer's order.
    pub const FIELD: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// The scorer's position code, 1..=12.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for positions 1..=9, the ones that record putouts and assists.
    pub fn is_fielding(self) -> bool {
        self.code() <= 9
    }

    /// Lowercase abbreviation used in box scores.
    pub fn abbrev(self) -> &'static str {
        match self {
            Position::Pitcher => "p",
            Position::Catcher => "c",
            Position::FirstBase => "1b",
            Position::SecondBase => "2b",
            Position::ThirdBase => "3b",
            Position::Shortstop => "ss",
            Position::LeftField => "lf",
            Position::CenterField => "cf",
            Position::RightField => "rf",
            Position::DesignatedHitter => "dh",
            Position::PinchHitter => "ph",
            Position::PinchRunner => "pr",
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        Ok(match code {
            1 => Position::Pitcher,
            2 => Position::Catcher,
            3 => Position::FirstBase,
            4 => Position::SecondBase,
            5 => Position::ThirdBase,
            6 => Position::Shortstop,
            7 => Position::LeftField,
            8 => Position::CenterField,
            9 => Position::RightField,
            10 => Position::DesignatedHitter,
            11 => Position::PinchHitter,
            12 => Position::PinchRunner,
            other => return Err(Error::InvalidPosition(other)),
        })
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> u8 {
        pos.code()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}
