#![allow(dead_code)]

use chrono::NaiveDate;
use scorefold::{
    Decisions, EventKind, Game, PlayEvent, Player, Position, Scorebook, Side, Starter, Team,
};

/// Fielding position of each batting-order slot, 1..=9.
pub const LINEUP: [Position; 9] = [
    Position::Shortstop,
    Position::SecondBase,
    Position::CenterField,
    Position::FirstBase,
    Position::LeftField,
    Position::RightField,
    Position::ThirdBase,
    Position::Catcher,
    Position::Pitcher,
];

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
}

/// Player id for `slot` on `team`: `VIS3`, `HOM9` and so on. Slot 9 is the
/// starting pitcher.
pub fn player(team: &str, slot: u8) -> String {
    format!("{team}{slot}")
}

/// A game with full starting lineups and no events.
pub fn empty_game(id: &str, day: u32, visitor: &str, home: &str) -> Game {
    let mut game = Game::new(id, date(day), visitor, home);
    for (side, team) in [(Side::Visitor, visitor), (Side::Home, home)] {
        for (i, &position) in LINEUP.iter().enumerate() {
            let slot = i as u8 + 1;
            game = game.with_starter(side, Starter::new(player(team, slot), slot, position));
        }
    }
    game
}

pub fn strikeout() -> PlayEvent {
    PlayEvent::new(EventKind::Strikeout).putout(Position::Catcher)
}

pub fn ground_out() -> PlayEvent {
    PlayEvent::new(EventKind::GenericOut)
        .assist(Position::Shortstop)
        .putout(Position::FirstBase)
        .fielded_by(Position::Shortstop)
}

pub fn home_run() -> PlayEvent {
    PlayEvent::new(EventKind::HomeRun)
}

/// Append one half inning: `runs` solo home runs, then three strikeouts.
pub fn half_inning(mut game: Game, runs: u32) -> Game {
    for _ in 0..runs {
        game = game.with_event(home_run());
    }
    for _ in 0..3 {
        game = game.with_event(strikeout());
    }
    game
}

/// A game whose innings go exactly as the linescores say. The home line may
/// be one inning shorter when the home team did not bat in the last inning.
/// The starting pitchers take the decision.
pub fn scripted_game(id: &str, day: u32, visitor: &str, home: &str, v: &[u32], h: &[u32]) -> Game {
    let mut game = empty_game(id, day, visitor, home);
    for inning in 0..v.len() {
        game = half_inning(game, v[inning]);
        if let Some(&runs) = h.get(inning) {
            game = half_inning(game, runs);
        }
    }
    let (vr, hr): (u32, u32) = (v.iter().sum(), h.iter().sum());
    let (winner, loser) = if vr > hr {
        (visitor, home)
    } else {
        (home, visitor)
    };
    if vr != hr {
        game = game.with_decisions(Decisions {
            winner: Some(player(winner, 9)),
            loser: Some(player(loser, 9)),
            save: None,
        });
    }
    game
}

pub fn add_roster(book: &mut Scorebook, team: &str, bench: u8) {
    for slot in 1..=9 + bench {
        book.add_player(Player::new(
            player(team, slot),
            format!("First{slot}"),
            format!("{team}-Last{slot}"),
        ));
    }
}

/// A scorebook with four teams in two leagues and ten-man benches.
pub fn scorebook() -> Scorebook {
    let mut book = Scorebook::new(2024);
    for (id, city, league) in [
        ("VIS", "Visitor City", "AL"),
        ("HOM", "Home Town", "AL"),
        ("NTH", "North", "NL"),
        ("STH", "South", "NL"),
    ] {
        book.add_team(Team::new(id, city, "Nine").with_league(league));
        add_roster(&mut book, id, 10);
    }
    book
}
