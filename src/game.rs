use crate::event::{GameEvent, Side, Substitution};
use crate::position::Position;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A player in a starting lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starter {
    pub player: String,
    /// Batting-order slot 1..=9, or 0 for a pitcher who does not bat.
    pub slot: u8,
    pub position: Position,
}

impl Starter {
    /// A starter batting in `slot` and playing `position`.
    pub fn new(player: impl Into<String>, slot: u8, position: Position) -> Self {
        Starter {
            player: player.into(),
            slot,
            position,
        }
    }
}

/// Pitchers of record, as entered by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decisions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<String>,
}

/// One game: starting lineups, the ordered event list, and decisions.
///
/// The game owns its events; reports only ever borrow them during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    /// 0 for a single game, 1 or 2 for the games of a doubleheader.
    #[serde(default)]
    pub number: u8,
    pub visitor: String,
    pub home: String,
    /// Starters indexed by [`Side::index`]: nine entries, or ten when a
    /// designated hitter is used.
    pub starters: [Vec<Starter>; 2],
    pub events: Vec<GameEvent>,
    #[serde(default)]
    pub decisions: Decisions,
}

impl Game {
    /// A game with no starters, events or decisions.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        visitor: impl Into<String>,
        home: impl Into<String>,
    ) -> Self {
        Game {
            id: id.into(),
            date,
            number: 0,
            visitor: visitor.into(),
            home: home.into(),
            starters: [Vec::new(), Vec::new()],
            events: Vec::new(),
            decisions: Decisions::default(),
        }
    }

    /// The team identifier on `side`.
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Visitor => &self.visitor,
            Side::Home => &self.home,
        }
    }

    /// The side `team` played on, if it played in this game.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.visitor == team {
            Some(Side::Visitor)
        } else if self.home == team {
            Some(Side::Home)
        } else {
            None
        }
    }

    /// Starting lineup for `side`.
    pub fn starters(&self, side: Side) -> &[Starter] {
        &self.starters[side.index()]
    }

    /// The starting pitcher for `side`.
    pub fn starting_pitcher(&self, side: Side) -> Option<&str> {
        self.starters(side)
            .iter()
            .find(|s| s.position == Position::Pitcher)
            .map(|s| s.player.as_str())
    }

    /// True when the lineup for `side` includes a non-batting pitcher.
    pub fn uses_dh(&self, side: Side) -> bool {
        self.starters(side).iter().any(|s| s.slot == 0)
    }

    /// Every player identifier appearing in the lineups or substitutions.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        let starters = self
            .starters
            .iter()
            .flatten()
            .map(|s| s.player.as_str());
        let subs = self
            .events
            .iter()
            .flat_map(|e| e.substitutions())
            .map(|s: &Substitution| s.player.as_str());
        starters.chain(subs)
    }

    /// Add a starter to `side`'s lineup.
    pub fn with_starter(mut self, side: Side, starter: Starter) -> Self {
        self.starters[side.index()].push(starter);
        self
    }

    /// Append an event.
    pub fn with_event(mut self, event: impl Into<GameEvent>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Set the pitchers of record.
    pub fn with_decisions(mut self, decisions: Decisions) -> Self {
        self.decisions = decisions;
        self
    }

    /// Set the doubleheader game number.
    pub fn with_number(mut self, number: u8) -> Self {
        self.number = number;
        self
    }
}

/// Heading suffix distinguishing the games of a doubleheader.
pub(crate) fn number_suffix(number: u8) -> &'static str {
    match number {
        1 => " (game 1)",
        2 => " (game 2)",
        _ => "",
    }
}
