mod common;

use common::{empty_game, ground_out, home_run, scripted_game, strikeout};
use scorefold::{
    Destination, EventKind, EventSource, GameEvent, GameState, PlayEvent, Position, Replay, Side,
    Substitution,
};

fn single() -> PlayEvent {
    PlayEvent::new(EventKind::Single)
}

#[test]
fn test_starting_state() {
    let game = empty_game("G1", 1, "VIS", "HOM");
    let replay = Replay::new(&game);
    assert_eq!((replay.inning(), replay.half(), replay.outs()), (1, Side::Visitor, 0));
    assert_eq!(replay.batter(), Some("VIS1"));
    assert_eq!(replay.fielder(Side::Home, Position::Pitcher), Some("HOM9"));
    assert_eq!(replay.position_of(Side::Visitor, "VIS8"), Some(Position::Catcher));
    assert!(replay.current().is_none());
    assert!(!replay.is_game_over());
}

#[test]
fn test_outs_end_the_half_and_strand_runners() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(single())
        .with_event(strikeout())
        .with_event(single().advance(1, Destination::Second))
        .with_event(strikeout())
        .with_event(ground_out());
    let mut replay = Replay::new(&game);

    replay.step().unwrap();
    assert_eq!(replay.runner(1), Some("VIS1"));
    assert_eq!(replay.responsible_pitcher(1), Some("HOM9"));
    replay.step().unwrap();
    replay.step().unwrap();
    assert_eq!(replay.runner(2), Some("VIS1"));
    assert_eq!(replay.runner(1), Some("VIS3"));
    assert_eq!(replay.outs(), 1);

    replay.seek_to_end().unwrap();
    assert_eq!(replay.left_on_base(Side::Visitor), 2);
    assert_eq!(replay.hits(Side::Visitor), 2);
    assert_eq!((replay.half(), replay.outs()), (Side::Home, 0));
    assert!(replay.runner(1).is_none());
    assert_eq!(replay.batters(Side::Visitor), 5);
    assert_eq!(replay.batter(), Some("HOM1"));
}

#[test]
fn test_step_reports_end() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_event(strikeout());
    let mut replay = Replay::new(&game);
    assert!(matches!(replay.current(), Some(GameEvent::Play(_))));
    assert!(replay.step().unwrap());
    assert!(!replay.step().unwrap());
    assert!(replay.current().is_none());
}

#[test]
fn test_reset_replays_identically() {
    let game = scripted_game("G1", 1, "VIS", "HOM", &[2, 0, 1], &[0, 3, 0]);
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    let first = (
        replay.score(Side::Visitor),
        replay.score(Side::Home),
        replay.inning(),
        replay.half(),
    );
    assert_eq!(first, (3, 3, 4, Side::Visitor));

    replay.reset();
    assert_eq!(replay.score(Side::Home), 0);
    assert_eq!(replay.batter(), Some("VIS1"));
    replay.seek_to_end().unwrap();
    assert_eq!(
        (
            replay.score(Side::Visitor),
            replay.score(Side::Home),
            replay.inning(),
            replay.half(),
        ),
        first
    );
}

#[test]
fn test_pinch_runner_takes_over_the_base() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(single())
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "VIS10",
            Side::Visitor,
            1,
            Position::PinchRunner,
        )]))
        .with_event(home_run().advance(1, Destination::Scored));
    let mut replay = Replay::new(&game);
    replay.step().unwrap();
    replay.step().unwrap();

    assert_eq!(replay.runner(1), Some("VIS10"));
    // Still charged to the pitcher who allowed the original runner.
    assert_eq!(replay.responsible_pitcher(1), Some("HOM9"));
    assert_eq!(replay.player_at(Side::Visitor, 1), Some("VIS10"));
    assert_eq!(replay.position_of(Side::Visitor, "VIS10"), Some(Position::PinchRunner));
    assert!(replay.position_of(Side::Visitor, "VIS1").is_none());

    replay.step().unwrap();
    assert_eq!(replay.score(Side::Visitor), 2);
}

#[test]
fn test_defensive_change_moves_fielders() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_event(GameEvent::NoPlay(vec![
        Substitution::new("HOM10", Side::Home, 9, Position::Pitcher),
        Substitution::new("HOM8", Side::Home, 8, Position::FirstBase),
        Substitution::new("HOM11", Side::Home, 4, Position::Catcher),
    ]));
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();

    assert_eq!(replay.fielder(Side::Home, Position::Pitcher), Some("HOM10"));
    assert_eq!(replay.fielder(Side::Home, Position::FirstBase), Some("HOM8"));
    assert_eq!(replay.fielder(Side::Home, Position::Catcher), Some("HOM11"));
    assert!(replay.position_of(Side::Home, "HOM9").is_none());
    assert!(replay.position_of(Side::Home, "HOM4").is_none());
}

#[test]
fn test_missing_pitcher_is_an_error() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "HOM10",
            Side::Home,
            9,
            Position::PinchHitter,
        )]))
        .with_event(strikeout());
    let mut replay = Replay::new(&game);
    replay.step().unwrap();
    assert!(matches!(
        replay.step(),
        Err(scorefold::Error::MissingOccupant { role, .. }) if role == "pitcher"
    ));
}

#[test]
fn test_game_over_rules() {
    // Home team leads after the top of the ninth.
    let game = scripted_game("G1", 1, "VIS", "HOM", &[0; 9], &[1, 0, 0, 0, 0, 0, 0, 0]);
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert_eq!((replay.inning(), replay.half()), (9, Side::Home));
    assert!(replay.is_game_over());

    // Tied after nine goes on.
    let game = scripted_game("G2", 1, "VIS", "HOM", &[0; 9], &[0; 9]);
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert_eq!((replay.inning(), replay.half()), (10, Side::Visitor));
    assert!(!replay.is_game_over());

    // Visitor leads after nine full innings.
    let game = scripted_game("G3", 1, "VIS", "HOM", &[0, 0, 0, 0, 0, 0, 0, 0, 1], &[0; 9]);
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert!(replay.is_game_over());

    // Visitor leads before the home team bats in the ninth.
    let game = scripted_game("G4", 1, "VIS", "HOM", &[1, 0, 0, 0, 0, 0, 0, 0, 0], &[0; 8]);
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert!(!replay.is_game_over());
}

#[test]
fn test_walk_off_ends_mid_inning() {
    let game = scripted_game("G1", 1, "VIS", "HOM", &[0; 9], &[0; 8])
        .with_event(home_run());
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert_eq!(replay.outs(), 0);
    assert_eq!(replay.score(Side::Home), 1);
    assert!(replay.is_game_over());
    assert_eq!(replay.left_on_base(Side::Home), 0);
}

#[test]
fn test_walk_off_strands_runners_aboard() {
    let game = scripted_game("G1", 1, "VIS", "HOM", &[0; 9], &[0; 8])
        .with_event(PlayEvent::new(EventKind::Walk))
        .with_event(PlayEvent::new(EventKind::Walk).advance(1, Destination::Second))
        .with_event(
            single()
                .advance(2, Destination::Scored)
                .advance(1, Destination::Second),
        );
    let mut replay = Replay::new(&game);
    replay.seek_to_end().unwrap();
    assert!(replay.is_game_over());
    assert_eq!((replay.inning(), replay.half(), replay.outs()), (9, Side::Home, 0));
    assert_eq!(replay.runner(1), Some("HOM9"));
    assert_eq!(replay.runner(2), Some("HOM8"));
    assert_eq!(replay.left_on_base(Side::Home), 2);

    let score = scorefold::BoxScore::from_game(&game).unwrap();
    assert!(score.complete);
    assert_eq!(score.team(Side::Home).left_on_base, 2);
}
