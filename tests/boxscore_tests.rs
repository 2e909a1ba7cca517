mod common;

use common::{empty_game, ground_out, home_run, player, scorebook, scripted_game, strikeout};
use scorefold::{
    BoxScore, Decisions, Destination, Error, EventKind, GameEvent, PlayEvent, Position, Side,
    Substitution,
};

fn batting<'a>(score: &'a BoxScore, side: Side, id: &str) -> &'a scorefold::BattingLine {
    score
        .team(side)
        .batting_lines()
        .find(|line| line.player == id)
        .unwrap()
}

fn pitching<'a>(score: &'a BoxScore, side: Side, id: &str) -> &'a scorefold::PitchingLine {
    score
        .team(side)
        .pitchers
        .iter()
        .find(|line| line.player == id)
        .unwrap()
}

fn fielding<'a>(
    score: &'a BoxScore,
    side: Side,
    id: &str,
    position: Position,
) -> &'a scorefold::FieldingLine {
    score
        .team(side)
        .fielders
        .iter()
        .find(|line| line.player == id && line.position == position)
        .unwrap()
}

#[test]
fn test_home_run_credits_batter_and_pitcher() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(home_run())
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout());
    let score = BoxScore::from_game(&game).unwrap();

    let batter = batting(&score, Side::Visitor, "VIS1");
    assert_eq!(
        (batter.pa, batter.ab, batter.h, batter.hr, batter.r, batter.rbi),
        (1, 1, 1, 1, 1, 1)
    );
    assert_eq!(batter.g(), 1);

    let pitcher = pitching(&score, Side::Home, "HOM9");
    assert_eq!((pitcher.h, pitcher.hr, pitcher.r, pitcher.er), (1, 1, 1, 1));
    assert_eq!((pitcher.bf, pitcher.outs, pitcher.so), (4, 3, 3));
    assert_eq!(pitcher.gs, 1);

    let visitor = score.team(Side::Visitor);
    assert_eq!(visitor.linescore, vec![1]);
    assert_eq!((visitor.runs, visitor.hits, visitor.at_bats), (1, 1, 4));
    assert_eq!(score.team(Side::Home).earned_runs, 1);

    // Every fielder on the field is credited with the three outs.
    assert_eq!(fielding(&score, Side::Home, "HOM8", Position::Catcher).po, 3);
    assert_eq!(fielding(&score, Side::Home, "HOM3", Position::CenterField).outs, 3);
}

#[test]
fn test_team_at_bats_match_player_sum() {
    let game = scripted_game("G1", 1, "VIS", "HOM", &[0, 2, 0, 0, 1, 0, 0, 0, 0], &[1, 0, 0, 0, 0, 0, 0, 0, 0]);
    let score = BoxScore::from_game(&game).unwrap();
    for side in Side::BOTH {
        let team = score.team(side);
        let sum: u32 = team.batting_lines().map(|line| line.ab).sum();
        assert_eq!(team.at_bats, sum);
    }
    assert_eq!(score.team(Side::Visitor).runs, 3);
    assert_eq!(score.team(Side::Home).runs, 1);
}

#[test]
fn test_fresh_accumulators_agree() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Single))
        .with_event(home_run().advance(1, Destination::Scored))
        .with_event(strikeout());
    let first = BoxScore::from_game(&game).unwrap();
    let second = BoxScore::from_game(&game).unwrap();
    assert_eq!(first, second);
    assert_eq!(batting(&first, Side::Visitor, "VIS2").rbi, 2);
    assert_eq!(first.team(Side::Visitor).linescore, vec![2]);
}

#[test]
fn test_double_play_credits() {
    let dp = PlayEvent::new(EventKind::GenericOut)
        .advance(1, Destination::Out)
        .grounded_into_double_play()
        .assist(Position::Shortstop)
        .putout(Position::SecondBase)
        .assist(Position::SecondBase)
        .putout(Position::FirstBase)
        .fielded_by(Position::Shortstop);
    assert_eq!(dp.outs, 2);

    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Single))
        .with_event(dp)
        .with_event(strikeout());
    let score = BoxScore::from_game(&game).unwrap();

    assert_eq!(batting(&score, Side::Visitor, "VIS2").gdp, 1);
    assert_eq!(batting(&score, Side::Visitor, "VIS2").ab, 1);
    assert_eq!(score.team(Side::Home).double_plays(), 1);
    assert_eq!(score.team(Side::Visitor).left_on_base, 0);

    let ss = fielding(&score, Side::Home, "HOM1", Position::Shortstop);
    assert_eq!((ss.a, ss.dp, ss.fielded_outs), (1, 1, 1));
    let second = fielding(&score, Side::Home, "HOM2", Position::SecondBase);
    assert_eq!((second.po, second.a, second.dp), (1, 1, 1));
    let first = fielding(&score, Side::Home, "HOM4", Position::FirstBase);
    assert_eq!((first.po, first.dp), (1, 1));
    let team = &score.team(Side::Home).fielding;
    assert_eq!((team.po, team.a, team.outs), (3, 2, 3));
}

#[test]
fn test_ground_out_credits_fielded_out() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_event(ground_out());
    let score = BoxScore::from_game(&game).unwrap();
    let ss = fielding(&score, Side::Home, "HOM1", Position::Shortstop);
    assert_eq!((ss.a, ss.fielded_outs, ss.outs), (1, 1, 1));
    assert_eq!(fielding(&score, Side::Home, "HOM4", Position::FirstBase).po, 1);
}

#[test]
fn test_unearned_run_codes() {
    let cases = [
        (Destination::Scored, 1, 1),
        (Destination::ScoredUnearned, 0, 0),
        (Destination::ScoredTeamUnearned, 1, 0),
    ];
    for (dest, pitcher_er, team_er) in cases {
        let game = empty_game("G1", 1, "VIS", "HOM")
            .with_event(PlayEvent::new(EventKind::Single))
            .with_event(PlayEvent::new(EventKind::Double).advance(1, dest));
        let score = BoxScore::from_game(&game).unwrap();
        let pitcher = pitching(&score, Side::Home, "HOM9");
        assert_eq!(pitcher.r, 1, "{dest:?}");
        assert_eq!(pitcher.er, pitcher_er, "{dest:?}");
        assert_eq!(score.team(Side::Home).earned_runs, team_er, "{dest:?}");
        assert_eq!(batting(&score, Side::Visitor, "VIS1").r, 1);
        assert_eq!(batting(&score, Side::Visitor, "VIS2").rbi, 1);
    }
}

#[test]
fn test_inherited_runner_charged_to_responsible_pitcher() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Walk))
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "HOM10",
            Side::Home,
            9,
            Position::Pitcher,
        )]))
        .with_event(home_run().advance(1, Destination::Scored))
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout());
    let score = BoxScore::from_game(&game).unwrap();

    let starter = pitching(&score, Side::Home, "HOM9");
    assert_eq!((starter.bb, starter.bf, starter.r, starter.er, starter.outs), (1, 1, 1, 1, 0));
    let reliever = pitching(&score, Side::Home, "HOM10");
    assert_eq!((reliever.h, reliever.hr, reliever.r, reliever.er), (1, 1, 1, 1));
    assert_eq!((reliever.gs, reliever.gf, reliever.outs), (0, 1, 3));
    assert_eq!(starter.cg, 0);

    // The visiting starter went all the way without allowing a run.
    let visitor = pitching(&score, Side::Visitor, "VIS9");
    assert_eq!((visitor.cg, visitor.sho, visitor.gf), (1, 1, 0));

    assert_eq!(batting(&score, Side::Visitor, "VIS2").rbi, 2);
    assert_eq!(batting(&score, Side::Visitor, "VIS1").ab, 0);
}

#[test]
fn test_substitution_re_entry_extends_positions() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "VIS10",
            Side::Visitor,
            1,
            Position::PinchHitter,
        )]))
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "VIS10",
            Side::Visitor,
            1,
            Position::Shortstop,
        )]))
        .with_event(ground_out());
    let score = BoxScore::from_game(&game).unwrap();

    let slot = &score.team(Side::Visitor).slots[1];
    assert_eq!(slot.len(), 2);
    assert_eq!(slot[0].line.player, "VIS1");
    assert_eq!(slot[0].positions, vec![Position::Shortstop]);
    assert_eq!(slot[1].line.player, "VIS10");
    assert_eq!(
        slot[1].positions,
        vec![Position::PinchHitter, Position::Shortstop]
    );
    assert_eq!(slot[1].line.so, 1);

    let ss = fielding(&score, Side::Visitor, "VIS10", Position::Shortstop);
    assert_eq!((ss.gs, ss.a, ss.fielded_outs), (0, 1, 1));
    assert_eq!(fielding(&score, Side::Visitor, "VIS1", Position::Shortstop).gs, 1);
}

#[test]
fn test_passed_ball_charged_to_catcher() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Walk))
        .with_event(PlayEvent::new(EventKind::PassedBall).advance(1, Destination::Second));
    let score = BoxScore::from_game(&game).unwrap();
    assert_eq!(fielding(&score, Side::Home, "HOM8", Position::Catcher).pb, 1);
    assert_eq!(score.team(Side::Home).fielding.pb, 1);
    assert_eq!(batting(&score, Side::Visitor, "VIS1").bb, 1);
}

#[test]
fn test_stolen_base_and_caught_stealing() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Single))
        .with_event(
            PlayEvent::new(EventKind::StolenBase)
                .advance(1, Destination::Second)
                .stolen_base(1),
        )
        .with_event(
            PlayEvent::new(EventKind::CaughtStealing)
                .advance(2, Destination::Out)
                .caught_stealing(2)
                .assist(Position::Catcher)
                .putout(Position::ThirdBase),
        );
    let score = BoxScore::from_game(&game).unwrap();
    let runner = batting(&score, Side::Visitor, "VIS1");
    assert_eq!((runner.sb, runner.cs), (1, 1));
    assert_eq!(pitching(&score, Side::Home, "HOM9").outs, 1);
    assert_eq!(fielding(&score, Side::Home, "HOM7", Position::ThirdBase).po, 1);
}

#[test]
fn test_decisions_and_shutout() {
    let game = scripted_game(
        "G1",
        1,
        "VIS",
        "HOM",
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 2, 0, 0, 0, 0, 0],
    );
    let score = BoxScore::from_game(&game).unwrap();
    assert!(score.complete);
    assert_eq!(score.innings(), 9);

    let winner = pitching(&score, Side::Home, "HOM9");
    assert_eq!((winner.w, winner.l, winner.cg, winner.sho), (1, 0, 1, 1));
    assert_eq!(winner.ip(), "9.0");
    let loser = pitching(&score, Side::Visitor, "VIS9");
    assert_eq!((loser.w, loser.l, loser.cg, loser.sho), (0, 1, 1, 0));
    assert_eq!(loser.ip(), "8.0");
    assert_eq!(loser.era().value(), Some(27.0 * 2.0 / 24.0));
}

#[test]
fn test_walk_off_completes_game() {
    let game = scripted_game(
        "G1",
        1,
        "VIS",
        "HOM",
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    )
    .with_event(home_run());
    let score = BoxScore::from_game(&game).unwrap();
    assert!(score.complete);
    assert_eq!(score.team(Side::Home).linescore.len(), 9);
    assert_eq!(score.team(Side::Home).runs, 1);
}

#[test]
fn test_unfinished_game_is_not_complete() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_event(home_run());
    let score = BoxScore::from_game(&game).unwrap();
    assert!(!score.complete);
}

#[test]
fn test_unknown_decision_pitcher_fails() {
    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(strikeout())
        .with_decisions(Decisions {
            winner: Some("nobody".to_string()),
            ..Decisions::default()
        });
    let err = BoxScore::from_game(&game).unwrap_err();
    assert!(matches!(err, Error::UnknownPlayer { player, .. } if player == "nobody"));
}

#[test]
fn test_missing_starting_pitcher_fails() {
    let game = scorefold::Game::new("G1", common::date(1), "VIS", "HOM");
    let err = BoxScore::from_game(&game).unwrap_err();
    assert!(matches!(err, Error::MissingOccupant { .. }));
}

#[test]
fn test_display_renders_sections() {
    let book = scorebook();
    let game = scripted_game(
        "G1",
        1,
        "VIS",
        "HOM",
        &[0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 2, 0, 0, 0, 0, 0],
    )
    .with_number(2);
    let score = BoxScore::from_game(&game).unwrap();
    let text = score.display(&book).to_string();

    assert!(text.starts_with("Visitor City Nine at Home Town Nine, Monday, April 1, 2024 (game 2)\n"));
    assert!(text.contains("  0  0  2  0  0  0  0  0  x    2  2  0   0  0"));
    assert!(text.contains("HR: First7 HOM-Last7, First8 HOM-Last8."));
    assert!(text.contains(&format!("{} (W)", book.full_name(&player("HOM", 9)))));
    assert!(text.contains(&format!("{} (L)", book.full_name(&player("VIS", 9)))));
    assert!(text.contains("1 First1 VIS-Last1, ss"));
    assert!(text.lines().any(|line| line.starts_with("Totals")));
}

#[test]
fn test_designated_hitter_lineup() {
    let mut game = scorefold::Game::new("G1", common::date(1), "VIS", "HOM");
    for (i, &position) in common::LINEUP[..8].iter().enumerate() {
        let slot = i as u8 + 1;
        game = game.with_starter(Side::Visitor, scorefold::Starter::new(player("VIS", slot), slot, position));
    }
    game = game
        .with_starter(Side::Visitor, scorefold::Starter::new("VIS9", 9, Position::DesignatedHitter))
        .with_starter(Side::Visitor, scorefold::Starter::new("VIS10", 0, Position::Pitcher));
    for (i, &position) in common::LINEUP.iter().enumerate() {
        let slot = i as u8 + 1;
        game = game.with_starter(Side::Home, scorefold::Starter::new(player("HOM", slot), slot, position));
    }
    let game = common::half_inning(game, 0)
        .with_event(home_run())
        .with_event(GameEvent::NoPlay(vec![Substitution::new(
            "VIS11",
            Side::Visitor,
            0,
            Position::Pitcher,
        )]))
        .with_event(strikeout())
        .with_event(strikeout())
        .with_event(strikeout());

    assert!(game.uses_dh(Side::Visitor));
    assert!(!game.uses_dh(Side::Home));
    assert_eq!(game.starting_pitcher(Side::Visitor), Some("VIS10"));
    assert_eq!(game.side_of("HOM"), Some(Side::Home));
    assert_eq!(game.side_of("XXX"), None);
    assert!(game.events[3].as_play().is_some());
    assert!(game.events[4].as_play().is_none());

    let score = BoxScore::from_game(&game).unwrap();
    let visitor = score.team(Side::Visitor);
    assert_eq!(visitor.slots[0].len(), 2);
    assert_eq!(visitor.starting_pitcher().unwrap().player, "VIS10");
    assert_eq!(visitor.current_pitcher().unwrap().player, "VIS11");

    let starter = pitching(&score, Side::Visitor, "VIS10");
    assert_eq!((starter.r, starter.er, starter.outs, starter.cg), (1, 1, 0, 0));
    let reliever = pitching(&score, Side::Visitor, "VIS11");
    assert_eq!((reliever.outs, reliever.so, reliever.gf), (3, 3, 1));

    // The designated hitter bats but never fields.
    assert_eq!(batting(&score, Side::Visitor, "VIS9").g(), 1);
    assert!(visitor.fielders.iter().all(|line| line.player != "VIS9"));
}

#[test]
fn test_triple_play_counts_in_dp_column() {
    let tp = PlayEvent::new(EventKind::GenericOut)
        .advance(1, Destination::Out)
        .advance(2, Destination::Out)
        .triple_play()
        .putout(Position::ThirdBase)
        .assist(Position::ThirdBase)
        .putout(Position::SecondBase)
        .assist(Position::SecondBase)
        .putout(Position::FirstBase);
    assert_eq!(tp.outs, 3);

    let game = empty_game("G1", 1, "VIS", "HOM")
        .with_event(PlayEvent::new(EventKind::Single))
        .with_event(PlayEvent::new(EventKind::Single).advance(1, Destination::Second))
        .with_event(tp);
    let score = BoxScore::from_game(&game).unwrap();

    let home = score.team(Side::Home);
    assert_eq!((home.fielding.dp, home.fielding.tp), (0, 1));
    assert_eq!(home.double_plays(), 1);
    assert_eq!(fielding(&score, Side::Home, "HOM7", Position::ThirdBase).tp, 1);
    assert_eq!(score.team(Side::Visitor).left_on_base, 0);

    let text = score.display(&scorebook()).to_string();
    let row = text.lines().find(|line| line.starts_with("Home Town Nine")).unwrap();
    assert!(row.ends_with("  0  0  0   0  1"), "{row}");
}

#[test]
fn test_starter_in_invalid_slot_fails() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_starter(
        Side::Home,
        scorefold::Starter::new("HOM10", 10, Position::DesignatedHitter),
    );
    let err = BoxScore::from_game(&game).unwrap_err();
    assert!(matches!(err, Error::InvalidSlot { ref player, slot: 10, .. } if player == "HOM10"));
}

#[test]
fn test_substitution_in_invalid_slot_fails() {
    let game = empty_game("G1", 1, "VIS", "HOM").with_event(GameEvent::NoPlay(vec![
        Substitution::new("VIS10", Side::Visitor, 12, Position::PinchHitter),
    ]));
    let err = BoxScore::from_game(&game).unwrap_err();
    assert!(matches!(err, Error::InvalidSlot { slot: 12, .. }));
}

#[test]
#[should_panic]
fn test_advance_past_third_panics() {
    let _ = PlayEvent::new(EventKind::Single).advance(4, Destination::Scored);
}
