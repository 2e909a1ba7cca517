use super::{BoxScoreReport, BoxScoreSink};
use crate::boxscore::BoxScore;
use crate::error::Result;
use crate::event::Side;
use crate::game::Game;
use crate::scorebook::Scorebook;
use crate::stats::TeamRecord;
use crate::table::{Align, Table};
use std::collections::BTreeMap;

/// One line of the standings.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow<'a> {
    pub record: &'a TeamRecord,
    /// Games behind the team at the top of the same ordering.
    pub games_behind: f64,
}

/// Won-lost records for every team seen, or seeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    records: BTreeMap<String, TeamRecord>,
}

pub type StandingsReport = BoxScoreReport<Standings>;

impl Standings {
    /// Standings that list `teams` even if they play no games.
    pub fn for_teams<'a>(teams: impl IntoIterator<Item = &'a str>) -> Self {
        Standings {
            records: teams
                .into_iter()
                .map(|team| (team.to_string(), TeamRecord::new(team)))
                .collect(),
        }
    }

    /// A copy holding only the records that match `keep`, e.g. one league.
    pub fn filtered(base: &Standings, keep: impl Fn(&TeamRecord) -> bool) -> Self {
        Standings {
            records: base
                .records
                .iter()
                .filter(|(_, record)| keep(record))
                .map(|(team, record)| (team.clone(), record.clone()))
                .collect(),
        }
    }

    /// One standings per league, keyed by league name. Teams the scorebook
    /// does not place in a league are grouped under the empty name.
    pub fn by_league(&self, book: &Scorebook) -> BTreeMap<String, Standings> {
        let mut leagues: BTreeMap<String, Standings> = BTreeMap::new();
        for (team, record) in &self.records {
            let league = book
                .team(team)
                .map(|team| team.league.clone())
                .unwrap_or_default();
            leagues
                .entry(league)
                .or_default()
                .records
                .insert(team.clone(), record.clone());
        }
        leagues
    }

    /// The record for `team`.
    pub fn record(&self, team: &str) -> Option<&TeamRecord> {
        self.records.get(team)
    }

    /// Records ordered by winning percentage, best first, with games behind
    /// the leader. Teams with no decisions sort as .500; ties keep team id
    /// order.
    pub fn rows(&self) -> Vec<StandingsRow<'_>> {
        let mut records: Vec<&TeamRecord> = self.records.values().collect();
        records.sort_by(|a, b| b.sort_pct().total_cmp(&a.sort_pct()));
        let Some(leader) = records.first().copied() else {
            return Vec::new();
        };
        records
            .into_iter()
            .map(|record| StandingsRow {
                record,
                games_behind: games_behind(leader, record),
            })
            .collect()
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no team is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One table per league, each ordered by [`rows`](Standings::rows).
    pub fn tables(&self, book: &Scorebook) -> Vec<Table> {
        self.by_league(book)
            .into_iter()
            .map(|(league, standings)| {
                let mut table = standings.table(book);
                if !league.is_empty() {
                    table.title = format!("{league} standings");
                }
                table
            })
            .collect()
    }

    /// All teams in one table, ordered by [`rows`](Standings::rows).
    pub fn table(&self, book: &Scorebook) -> Table {
        let mut table = Table::new("Standings").column("Team", 24, Align::Left);
        for header in ["W", "L", "T"] {
            table = table.column(header, 4, Align::Right);
        }
        table = table
            .column("PCT", 5, Align::Right)
            .column("GB", 5, Align::Right);
        for header in ["HOME", "ROAD", "1-RUN", "XTRA"] {
            table = table.column(header, 7, Align::Right);
        }
        table = table
            .column("RS", 5, Align::Right)
            .column("RA", 5, Align::Right);
        for row in self.rows() {
            let r = row.record;
            let gb = if row.games_behind == 0.0 {
                "-".to_string()
            } else {
                format!("{:.1}", row.games_behind)
            };
            table.push(vec![
                book.team_name(&r.team),
                r.wins().to_string(),
                r.losses().to_string(),
                r.ties().to_string(),
                r.pct().to_string(),
                gb,
                format!("{}-{}", r.hw, r.hl),
                format!("{}-{}", r.rw, r.rl),
                format!("{}-{}", r.ow, r.ol),
                format!("{}-{}", r.xw, r.xl),
                r.rs.to_string(),
                r.ra.to_string(),
            ]);
        }
        table
    }
}

/// `((leader wins - wins) - (leader losses - losses)) / 2`.
pub(crate) fn games_behind(leader: &TeamRecord, team: &TeamRecord) -> f64 {
    let wins = leader.wins() as f64 - team.wins() as f64;
    let losses = leader.losses() as f64 - team.losses() as f64;
    (wins - losses) / 2.0
}

impl BoxScoreSink for Standings {
    fn fold(&mut self, _game: &Game, score: &BoxScore) -> Result<()> {
        let innings = score.innings();
        for side in Side::BOTH {
            let team = score.team(side);
            let against = score.team(side.opponent()).runs;
            self.records
                .entry(team.team.clone())
                .or_insert_with(|| TeamRecord::new(team.team.as_str()))
                .record(side, team.runs, against, innings);
        }
        Ok(())
    }
}
