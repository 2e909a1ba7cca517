use super::{BoxScore, TeamBox};
use crate::event::Side;
use crate::game::number_suffix;
use crate::scorebook::Scorebook;
use crate::stats::{BattingLine, Merge};
use std::fmt;

const NAME_WIDTH: usize = 28;

/// Plain-text box score, named through a [`Scorebook`].
///
/// Renders the heading, the linescore with R/H/E/LOB/DP, each team's batting
/// with caption lines for the counting categories, and each team's pitching.
pub struct BoxScoreDisplay<'a> {
    score: &'a BoxScore,
    book: &'a Scorebook,
}

impl<'a> BoxScoreDisplay<'a> {
    /// Render `score` with names from `book`.
    pub fn new(score: &'a BoxScore, book: &'a Scorebook) -> Self {
        BoxScoreDisplay { score, book }
    }

    fn heading(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self.score;
        writeln!(
            f,
            "{} at {}, {}{}",
            self.book.team_name(&score.team(Side::Visitor).team),
            self.book.team_name(&score.team(Side::Home).team),
            score.date.format("%A, %B %-d, %Y"),
            number_suffix(score.number),
        )
    }

    fn linescore(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self.score;
        let innings = score.innings();
        write!(f, "{:<NAME_WIDTH$}", "")?;
        for inning in 1..=innings {
            write!(f, "{inning:>3}")?;
        }
        writeln!(f, "  {:>3}{:>3}{:>3}{:>4}{:>3}", "R", "H", "E", "LOB", "DP")?;
        for side in Side::BOTH {
            let team = score.team(side);
            write!(f, "{:<NAME_WIDTH$}", self.book.team_name(&team.team))?;
            for inning in 0..innings {
                match team.linescore.get(inning) {
                    Some(runs) => write!(f, "{runs:>3}")?,
                    None if side == Side::Home && score.complete => write!(f, "{:>3}", "x")?,
                    None => write!(f, "{:>3}", "")?,
                }
            }
            writeln!(
                f,
                "  {:>3}{:>3}{:>3}{:>4}{:>3}",
                team.runs,
                team.hits,
                team.errors,
                team.left_on_base,
                team.double_plays()
            )?;
        }
        Ok(())
    }

    fn batting(&self, f: &mut fmt::Formatter<'_>, team: &TeamBox) -> fmt::Result {
        writeln!(
            f,
            "{:<NAME_WIDTH$}{:>4}{:>4}{:>4}{:>4}{:>4}{:>4}",
            self.book.team_name(&team.team),
            "AB",
            "R",
            "H",
            "RBI",
            "BB",
            "SO"
        )?;
        for (slot, stints) in team.slots.iter().enumerate().skip(1) {
            for (turn, stint) in stints.iter().enumerate() {
                let positions: Vec<&str> = stint.positions.iter().map(|p| p.abbrev()).collect();
                let who = format!(
                    "{}, {}",
                    self.book.full_name(&stint.line.player),
                    positions.join("-")
                );
                let label = if turn == 0 {
                    format!("{slot} {who}")
                } else {
                    format!("  {who}")
                };
                batting_row(f, &label, &stint.line)?;
            }
        }
        let mut totals = BattingLine::new("", team.team.as_str());
        for line in team.batting_lines() {
            totals.merge(line);
        }
        totals.ab = team.at_bats;
        batting_row(f, "Totals", &totals)?;

        let categories: [(&str, fn(&BattingLine) -> u32); 9] = [
            ("2B", |line| line.b2),
            ("3B", |line| line.b3),
            ("HR", |line| line.hr),
            ("SH", |line| line.sh),
            ("SF", |line| line.sf),
            ("HBP", |line| line.hbp),
            ("GDP", |line| line.gdp),
            ("SB", |line| line.sb),
            ("CS", |line| line.cs),
        ];
        let mut captions = Vec::new();
        for (label, count) in categories {
            let counts = team
                .batting_lines()
                .map(|line| (line.player.as_str(), count(line)));
            if let Some(caption) = self.caption(label, counts) {
                captions.push(caption);
            }
        }
        let errors = team.fielders.iter().map(|line| (line.player.as_str(), line.e));
        if let Some(caption) = self.caption("E", errors) {
            captions.push(caption);
        }
        if !captions.is_empty() {
            writeln!(f)?;
            for caption in captions {
                writeln!(f, "{caption}")?;
            }
        }
        Ok(())
    }

    /// `HR: Smith 2, Jones.` for the players with a nonzero count, summed
    /// per player in order of first appearance.
    fn caption<'p>(&self, label: &str, counts: impl Iterator<Item = (&'p str, u32)>) -> Option<String> {
        let mut players: Vec<(&str, u32)> = Vec::new();
        for (player, n) in counts.filter(|&(_, n)| n > 0) {
            match players.iter_mut().find(|(existing, _)| *existing == player) {
                Some((_, total)) => *total += n,
                None => players.push((player, n)),
            }
        }
        if players.is_empty() {
            return None;
        }
        let names: Vec<String> = players
            .into_iter()
            .map(|(player, n)| {
                let name = self.book.full_name(player);
                if n > 1 { format!("{name} {n}") } else { name }
            })
            .collect();
        Some(format!("{label}: {}.", names.join(", ")))
    }

    fn pitching(&self, f: &mut fmt::Formatter<'_>, team: &TeamBox) -> fmt::Result {
        writeln!(
            f,
            "{:<NAME_WIDTH$}{:>5}{:>4}{:>4}{:>4}{:>4}{:>4}",
            self.book.team_name(&team.team),
            "IP",
            "H",
            "R",
            "ER",
            "BB",
            "SO"
        )?;
        let decisions = &self.score.decisions;
        for line in &team.pitchers {
            let mut name = self.book.full_name(&line.player);
            for (pitcher, letter) in [
                (&decisions.winner, "W"),
                (&decisions.loser, "L"),
                (&decisions.save, "S"),
            ] {
                if pitcher.as_deref() == Some(line.player.as_str()) {
                    name.push_str(&format!(" ({letter})"));
                }
            }
            writeln!(
                f,
                "{name:<NAME_WIDTH$}{:>5}{:>4}{:>4}{:>4}{:>4}{:>4}",
                line.ip(),
                line.h,
                line.r,
                line.er,
                line.bb,
                line.so
            )?;
        }
        Ok(())
    }
}

fn batting_row(f: &mut fmt::Formatter<'_>, label: &str, line: &BattingLine) -> fmt::Result {
    writeln!(
        f,
        "{label:<NAME_WIDTH$}{:>4}{:>4}{:>4}{:>4}{:>4}{:>4}",
        line.ab, line.r, line.h, line.rbi, line.bb, line.so
    )
}

impl fmt::Display for BoxScoreDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.heading(f)?;
        writeln!(f)?;
        self.linescore(f)?;
        for side in Side::BOTH {
            writeln!(f)?;
            self.batting(f, self.score.team(side))?;
        }
        for side in Side::BOTH {
            writeln!(f)?;
            self.pitching(f, self.score.team(side))?;
        }
        Ok(())
    }
}
