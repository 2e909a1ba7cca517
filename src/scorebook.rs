//! Teams, players and games for one season.

use crate::error::{Error, Result};
use crate::game::Game;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub city: String,
    pub nickname: String,
    #[serde(default)]
    pub league: String,
}

impl Team {
    /// A team in no league.
    pub fn new(id: impl Into<String>, city: impl Into<String>, nickname: impl Into<String>) -> Self {
        Team {
            id: id.into(),
            city: city.into(),
            nickname: nickname.into(),
            league: String::new(),
        }
    }

    /// Assign the team to a league.
    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = league.into();
        self
    }

    /// "City Nickname".
    pub fn name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Player {
    /// A player with a first and last name.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Player {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "Last, First", the form registers sort and print.
    pub fn sort_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// "First Last", used in box scores.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A season's worth of games together with the teams and players they
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scorebook {
    pub year: i32,
    pub teams: BTreeMap<String, Team>,
    pub players: BTreeMap<String, Player>,
    pub games: Vec<Game>,
}

impl Scorebook {
    /// An empty scorebook for `year`.
    pub fn new(year: i32) -> Self {
        Scorebook {
            year,
            ..Default::default()
        }
    }

    /// Add or replace a team.
    pub fn add_team(&mut self, team: Team) {
        self.teams.insert(team.id.clone(), team);
    }

    /// Add or replace a player.
    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id.clone(), player);
    }

    /// Add a game after checking that its identifiers resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedTeam`] or [`Error::UnresolvedPlayer`] if the
    /// game mentions a team or player that is not in the scorebook.
    pub fn add_game(&mut self, game: Game) -> Result<()> {
        self.check_game(&game)?;
        self.games.push(game);
        Ok(())
    }

    /// Check every game's team and player identifiers.
    pub fn validate(&self) -> Result<()> {
        self.games.iter().try_for_each(|game| self.check_game(game))
    }

    /// The team with identifier `id`.
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    /// The player with identifier `id`.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// The player's sort name, falling back to the identifier.
    pub fn sort_name(&self, id: &str) -> String {
        self.player(id)
            .map(Player::sort_name)
            .unwrap_or_else(|| id.to_string())
    }

    /// The player's display name, falling back to the identifier.
    pub fn full_name(&self, id: &str) -> String {
        self.player(id)
            .map(Player::full_name)
            .unwrap_or_else(|| id.to_string())
    }

    /// The team's display name, falling back to the identifier.
    pub fn team_name(&self, id: &str) -> String {
        self.team(id).map(Team::name).unwrap_or_else(|| id.to_string())
    }

    fn check_game(&self, game: &Game) -> Result<()> {
        for team in [&game.visitor, &game.home] {
            if !self.teams.contains_key(team) {
                return Err(Error::UnresolvedTeam {
                    game: game.id.clone(),
                    team: team.clone(),
                });
            }
        }
        let mut players = game.player_ids().chain(
            [&game.decisions.winner, &game.decisions.loser, &game.decisions.save]
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        match players.find(|id| !self.players.contains_key(*id)) {
            Some(player) => Err(Error::UnresolvedPlayer {
                game: game.id.clone(),
                player: player.to_string(),
            }),
            None => Ok(()),
        }
    }
}
