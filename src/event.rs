use crate::error::Error;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Which team a record belongs to. The visitor bats in the top half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Visitor,
    Home,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Visitor, Side::Home];

    /// Index into per-side arrays: 0 visitor, 1 home.
    pub fn index(self) -> usize {
        match self {
            Side::Visitor => 0,
            Side::Home => 1,
        }
    }

    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Visitor => Side::Home,
            Side::Home => Side::Visitor,
        }
    }
}

/// The basic classification of a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    GenericOut,
    Strikeout,
    StolenBase,
    DefensiveIndifference,
    CaughtStealing,
    Pickoff,
    WildPitch,
    PassedBall,
    Balk,
    OtherAdvance,
    FoulError,
    Walk,
    IntentionalWalk,
    HitByPitch,
    Interference,
    Error,
    FieldersChoice,
    Single,
    Double,
    Triple,
    HomeRun,
    Other,
}

impl EventKind {
    /// Bases awarded by a hit, or 0 for anything that is not a hit.
    pub fn hit_bases(self) -> u8 {
        match self {
            EventKind::Single => 1,
            EventKind::Double => 2,
            EventKind::Triple => 3,
            EventKind::HomeRun => 4,
            _ => 0,
        }
    }

    /// Single, double, triple or home run.
    pub fn is_hit(self) -> bool {
        self.hit_bases() > 0
    }

    /// Walk or intentional walk.
    pub fn is_walk(self) -> bool {
        matches!(self, EventKind::Walk | EventKind::IntentionalWalk)
    }

    /// Whether the play ends the batter's plate appearance.
    pub fn ends_plate_appearance(self) -> bool {
        matches!(
            self,
            EventKind::GenericOut
                | EventKind::Strikeout
                | EventKind::Walk
                | EventKind::IntentionalWalk
                | EventKind::HitByPitch
                | EventKind::Interference
                | EventKind::Error
                | EventKind::FieldersChoice
                | EventKind::Single
                | EventKind::Double
                | EventKind::Triple
                | EventKind::HomeRun
        )
    }

    /// Whether a plate appearance ending this way counts as an official at-bat
    /// (before any sacrifice adjustment).
    pub fn is_official_at_bat(self) -> bool {
        matches!(
            self,
            EventKind::GenericOut
                | EventKind::Strikeout
                | EventKind::Error
                | EventKind::FieldersChoice
                | EventKind::Single
                | EventKind::Double
                | EventKind::Triple
                | EventKind::HomeRun
        )
    }
}

/// Where a batter or runner ended up after a play.
///
/// Serialized as the numeric advance code: 0 out, 1-3 the base reached or
/// held, 4 scored (earned), 5 scored unearned, 6 scored unearned to the team
/// but earned to the pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Destination {
    Out = 0,
    First = 1,
    Second = 2,
    Third = 3,
    Scored = 4,
    ScoredUnearned = 5,
    ScoredTeamUnearned = 6,
}

impl Destination {
    /// The numeric destination code, 0..=6.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The base number for codes 1..=3.
    pub fn base(self) -> Option<usize> {
        match self {
            Destination::First => Some(1),
            Destination::Second => Some(2),
            Destination::Third => Some(3),
            _ => None,
        }
    }

    /// True for the three scored codes.
    pub fn is_run(self) -> bool {
        self.code() >= 4
    }

    /// Charged as an earned run to the responsible pitcher.
    pub fn is_earned_to_pitcher(self) -> bool {
        matches!(self, Destination::Scored | Destination::ScoredTeamUnearned)
    }

    /// Charged as an earned run to the team.
    pub fn is_earned_to_team(self) -> bool {
        self == Destination::Scored
    }
}

impl TryFrom<u8> for Destination {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        Ok(match code {
            0 => Destination::Out,
            1 => Destination::First,
            2 => Destination::Second,
            3 => Destination::Third,
            4 => Destination::Scored,
            5 => Destination::ScoredUnearned,
            6 => Destination::ScoredTeamUnearned,
            other => return Err(Error::InvalidDestination(other)),
        })
    }
}

impl From<Destination> for u8 {
    fn from(dest: Destination) -> u8 {
        dest.code()
    }
}

/// One structured play, as supplied by the event source.
///
/// `advance` is indexed by starting base: 0 is the batter, 1-3 the runners.
/// Entries for empty bases are ignored. The per-base `stolen_base` and
/// `caught_stealing` flags use the same indexing (entry 0 is unused).
///
/// [`PlayEvent::new`] fills in the conventional defaults for the kind: runners
/// hold, the batter is out or reaches the base the hit awards, and `outs`,
/// `rbi` and `at_bat` follow from those. The builder methods adjust them.
///
/// # Examples
///
/// ```
/// use scorefold::{Destination, EventKind, PlayEvent};
///
/// // Two-run homer with a runner on first.
/// let play = PlayEvent::new(EventKind::HomeRun).advance(1, Destination::Scored);
/// assert_eq!(play.runs(), 2);
/// assert_eq!(play.rbi, 2);
/// assert_eq!(play.outs, 0);
/// assert!(play.at_bat);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PlayEvent {
    pub kind: EventKind,

    /// Scorer's notation for the play, used only for display.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    pub advance: [Destination; 4],
    pub outs: u8,
    pub rbi: u8,
    pub at_bat: bool,
    pub batter_event: bool,

    #[serde(default)]
    pub sh: bool,
    #[serde(default)]
    pub sf: bool,
    #[serde(default)]
    pub gdp: bool,
    #[serde(default)]
    pub double_play: bool,
    #[serde(default)]
    pub triple_play: bool,
    #[serde(default)]
    pub wild_pitch: bool,
    #[serde(default)]
    pub passed_ball: bool,
    #[serde(default)]
    pub stolen_base: [bool; 4],
    #[serde(default)]
    pub caught_stealing: [bool; 4],

    /// One entry per error charged on the play.
    #[serde(default)]
    pub errors: Vec<Position>,
    /// One entry per putout, in the order the scorer credited them.
    #[serde(default)]
    pub putouts: Vec<Position>,
    #[serde(default)]
    pub assists: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielded_by: Option<Position>,
}

impl PlayEvent {
    /// Create a play of the given kind with conventional defaults.
    pub fn new(kind: EventKind) -> Self {
        let batter = match kind {
            EventKind::Single
            | EventKind::Walk
            | EventKind::IntentionalWalk
            | EventKind::HitByPitch
            | EventKind::Interference
            | EventKind::Error
            | EventKind::FieldersChoice => Destination::First,
            EventKind::Double => Destination::Second,
            EventKind::Triple => Destination::Third,
            EventKind::HomeRun => Destination::Scored,
            _ => Destination::Out,
        };
        let mut play = PlayEvent {
            kind,
            text: String::new(),
            advance: [
                batter,
                Destination::First,
                Destination::Second,
                Destination::Third,
            ],
            outs: 0,
            rbi: 0,
            at_bat: kind.is_official_at_bat(),
            batter_event: kind.ends_plate_appearance(),
            sh: false,
            sf: false,
            gdp: false,
            double_play: false,
            triple_play: false,
            wild_pitch: kind == EventKind::WildPitch,
            passed_ball: kind == EventKind::PassedBall,
            stolen_base: [false; 4],
            caught_stealing: [false; 4],
            errors: Vec::new(),
            putouts: Vec::new(),
            assists: Vec::new(),
            fielded_by: None,
        };
        play.recount();
        play
    }

    /// Set where the batter (`base == 0`) or a runner ends up.
    ///
    /// Recomputes `outs` and `rbi`; call [`with_outs`](Self::with_outs) or
    /// [`with_rbi`](Self::with_rbi) afterwards to override them.
    ///
    /// # Panics
    ///
    /// Panics if `base` is greater than 3.
    pub fn advance(mut self, base: usize, dest: Destination) -> Self {
        self.advance[base] = dest;
        self.recount();
        self
    }

    /// Attach the scorer's notation.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Override the number of outs recorded on the play.
    pub fn with_outs(mut self, outs: u8) -> Self {
        self.outs = outs;
        self
    }

    /// Override the RBI credited to the batter.
    pub fn with_rbi(mut self, rbi: u8) -> Self {
        self.rbi = rbi;
        self
    }

    /// Mark the play a sacrifice hit; the batter is not charged an at-bat.
    pub fn sacrifice_hit(mut self) -> Self {
        self.sh = true;
        self.at_bat = false;
        self
    }

    /// Mark the play a sacrifice fly; the batter is not charged an at-bat.
    pub fn sacrifice_fly(mut self) -> Self {
        self.sf = true;
        self.at_bat = false;
        self
    }

    /// Mark a ground-ball double play. Also sets the double-play flag and
    /// clears the RBI the default count would have credited.
    pub fn grounded_into_double_play(mut self) -> Self {
        self.gdp = true;
        self.double_play = true;
        self.rbi = 0;
        self
    }

    /// Flag a double play that is not a ground-ball double play.
    pub fn double_play(mut self) -> Self {
        self.double_play = true;
        self
    }

    /// Flag a triple play.
    pub fn triple_play(mut self) -> Self {
        self.triple_play = true;
        self
    }

    /// Flag a wild pitch.
    pub fn wild_pitch(mut self) -> Self {
        self.wild_pitch = true;
        self
    }

    /// Flag a passed ball.
    pub fn passed_ball(mut self) -> Self {
        self.passed_ball = true;
        self
    }

    /// Flag a stolen base by the runner who started on `base`.
    ///
    /// # Panics
    ///
    /// Panics if `base` is greater than 3.
    pub fn stolen_base(mut self, base: usize) -> Self {
        self.stolen_base[base] = true;
        self
    }

    /// Flag the runner who started on `base` as caught stealing.
    ///
    /// # Panics
    ///
    /// Panics if `base` is greater than 3.
    pub fn caught_stealing(mut self, base: usize) -> Self {
        self.caught_stealing[base] = true;
        self
    }

    /// Charge an error to the fielder at `pos`.
    pub fn error(mut self, pos: Position) -> Self {
        self.errors.push(pos);
        self
    }

    /// Credit a putout to the fielder at `pos`.
    pub fn putout(mut self, pos: Position) -> Self {
        self.putouts.push(pos);
        self
    }

    /// Credit an assist to the fielder at `pos`.
    pub fn assist(mut self, pos: Position) -> Self {
        self.assists.push(pos);
        self
    }

    /// Record the fielder who handled the ball.
    pub fn fielded_by(mut self, pos: Position) -> Self {
        self.fielded_by = Some(pos);
        self
    }

    /// Runs scored on the play, counting entries for empty bases too; the
    /// event source only reads entries for occupied bases.
    pub fn runs(&self) -> u8 {
        self.advance
            .iter()
            .enumerate()
            .filter(|(base, dest)| (*base > 0 || self.batter_event) && dest.is_run())
            .count() as u8
    }

    fn recount(&mut self) {
        let batter_out = self.batter_event && self.advance[0] == Destination::Out;
        let runners_out = self.advance[1..]
            .iter()
            .filter(|dest| **dest == Destination::Out)
            .count();
        self.outs = runners_out as u8 + u8::from(batter_out);
        self.rbi = if self.batter_event && self.kind != EventKind::Error && !self.gdp {
            self.runs()
        } else {
            0
        };
    }
}

/// A lineup change: `player` takes lineup `slot` for `side`, playing
/// `position`. Slot 0 is the non-batting pitcher in a designated-hitter game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub player: String,
    pub side: Side,
    pub slot: u8,
    pub position: Position,
}

impl Substitution {
    /// A substitution of `player` into `slot` at `position`.
    pub fn new(player: impl Into<String>, side: Side, slot: u8, position: Position) -> Self {
        Substitution {
            player: player.into(),
            side,
            slot,
            position,
        }
    }
}

/// An entry in a game's ordered event list.
///
/// A no-play entry carries only substitutions and changes no score, out, or
/// base state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    Play(PlayEvent),
    NoPlay(Vec<Substitution>),
}

impl GameEvent {
    /// The play, or `None` for a no-play event.
    pub fn as_play(&self) -> Option<&PlayEvent> {
        match self {
            GameEvent::Play(play) => Some(play),
            GameEvent::NoPlay(_) => None,
        }
    }

    /// Substitutions carried by a no-play event; empty for a play.
    pub fn substitutions(&self) -> &[Substitution] {
        match self {
            GameEvent::Play(_) => &[],
            GameEvent::NoPlay(subs) => subs,
        }
    }
}

impl From<PlayEvent> for GameEvent {
    fn from(play: PlayEvent) -> Self {
        GameEvent::Play(play)
    }
}
