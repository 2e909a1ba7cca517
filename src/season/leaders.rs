use super::RegisterLine;
use crate::scorebook::Scorebook;
use crate::stats::{BattingLine, PitchingLine, Rate};
use crate::table::{Align, Table};
use std::cmp::Ordering;
use std::fmt;

/// A named statistic that lines can be ranked by.
pub struct Metric<L> {
    pub name: &'static str,
    /// `None` when the statistic is undefined for the line; such lines are
    /// never ranked.
    pub value: fn(&L) -> Option<f64>,
    pub fewer_is_better: bool,
    /// Digits after the decimal point when rendered.
    pub decimals: usize,
}

impl<L> Clone for Metric<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Metric<L> {}

impl<L> fmt::Debug for Metric<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("name", &self.name)
            .field("fewer_is_better", &self.fewer_is_better)
            .finish()
    }
}

impl<L> Metric<L> {
    /// A counting or rate statistic where more is better.
    pub const fn new(name: &'static str, value: fn(&L) -> Option<f64>, decimals: usize) -> Self {
        Metric {
            name,
            value,
            fewer_is_better: false,
            decimals,
        }
    }

    /// A statistic where less is better, such as ERA.
    pub const fn fewer(name: &'static str, value: fn(&L) -> Option<f64>, decimals: usize) -> Self {
        Metric {
            name,
            value,
            fewer_is_better: true,
            decimals,
        }
    }

    fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, Rate::new(value, 1.0))
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        if self.fewer_is_better {
            a.total_cmp(&b)
        } else {
            b.total_cmp(&a)
        }
    }
}

fn count(n: u32) -> Option<f64> {
    Some(n as f64)
}

/// Look up a batting leaderboard statistic by its column name.
///
/// ```
/// use scorefold::batting_metric;
///
/// assert_eq!(batting_metric("HR").map(|m| m.name), Some("HR"));
/// assert!(batting_metric("ERA").is_none());
/// ```
pub fn batting_metric(name: &str) -> Option<Metric<BattingLine>> {
    type M = Metric<BattingLine>;
    let metric = match name {
        "AVG" => M::new("AVG", |l| l.avg().value(), 3),
        "OBP" => M::new("OBP", |l| l.obp().value(), 3),
        "SLG" => M::new("SLG", |l| l.slg().value(), 3),
        "OPS" => M::new("OPS", |l| l.ops().value(), 3),
        "G" => M::new("G", |l| Some(l.g() as f64), 0),
        "AB" => M::new("AB", |l| count(l.ab), 0),
        "R" => M::new("R", |l| count(l.r), 0),
        "H" => M::new("H", |l| count(l.h), 0),
        "2B" => M::new("2B", |l| count(l.b2), 0),
        "3B" => M::new("3B", |l| count(l.b3), 0),
        "HR" => M::new("HR", |l| count(l.hr), 0),
        "TB" => M::new("TB", |l| count(l.tb()), 0),
        "RBI" => M::new("RBI", |l| count(l.rbi), 0),
        "BB" => M::new("BB", |l| count(l.bb), 0),
        "SO" => M::new("SO", |l| count(l.so), 0),
        "SB" => M::new("SB", |l| count(l.sb), 0),
        _ => return None,
    };
    Some(metric)
}

/// Look up a pitching leaderboard statistic by its column name.
pub fn pitching_metric(name: &str) -> Option<Metric<PitchingLine>> {
    type M = Metric<PitchingLine>;
    let metric = match name {
        "ERA" => M::fewer("ERA", |l| l.era().value(), 2),
        "WHIP" => M::fewer("WHIP", |l| l.whip().value(), 2),
        "PCT" => M::new("PCT", |l| l.win_pct().value(), 3),
        "G" => M::new("G", |l| Some(l.g() as f64), 0),
        "GS" => M::new("GS", |l| count(l.gs), 0),
        "CG" => M::new("CG", |l| count(l.cg), 0),
        "SHO" => M::new("SHO", |l| count(l.sho), 0),
        "W" => M::new("W", |l| count(l.w), 0),
        "L" => M::new("L", |l| count(l.l), 0),
        "SV" => M::new("SV", |l| count(l.sv), 0),
        "SO" => M::new("SO", |l| count(l.so), 0),
        "BB" => M::new("BB", |l| count(l.bb), 0),
        _ => return None,
    };
    Some(metric)
}

/// One ranked line.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader<'a, L> {
    /// Competition rank: one more than the number of lines strictly ahead.
    pub rank: usize,
    /// Another ranked line has the same value.
    pub tied: bool,
    pub value: f64,
    pub line: &'a L,
}

type Qualifier<L> = Box<dyn Fn(&L) -> bool>;

/// Ranks lines by a [`Metric`].
///
/// The board holds `limit` lines, extended by every line tied with the
/// value at the cutoff rank.
///
/// # Examples
///
/// ```
/// use scorefold::{batting_metric, BattingLine, Leaderboard};
///
/// let lines: Vec<BattingLine> = [5, 5, 4, 4, 3]
///     .iter()
///     .enumerate()
///     .map(|(i, &hr)| {
///         let mut line = BattingLine::new(format!("p{i}"), "TM");
///         line.hr = hr;
///         line
///     })
///     .collect();
///
/// let board = Leaderboard::new(batting_metric("HR").unwrap()).limit(3);
/// let leaders = board.rank(&lines);
/// assert_eq!(leaders.len(), 4);
/// assert_eq!(leaders.iter().map(|l| l.rank).collect::<Vec<_>>(), [1, 1, 3, 3]);
/// ```
pub struct Leaderboard<L> {
    metric: Metric<L>,
    limit: usize,
    qualify: Option<Qualifier<L>>,
}

impl<L> fmt::Debug for Leaderboard<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaderboard")
            .field("metric", &self.metric)
            .field("limit", &self.limit)
            .field("qualified", &self.qualify.is_some())
            .finish()
    }
}

impl<L: RegisterLine> Leaderboard<L> {
    /// A board of ten.
    pub fn new(metric: Metric<L>) -> Self {
        Leaderboard {
            metric,
            limit: 10,
            qualify: None,
        }
    }

    /// Keep at most `limit` lines plus ties at the cutoff.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Only rank lines for which `qualify` returns true, e.g. a minimum
    /// number of plate appearances for rate statistics.
    pub fn qualify(mut self, qualify: impl Fn(&L) -> bool + 'static) -> Self {
        self.qualify = Some(Box::new(qualify));
        self
    }

    /// The metric this board ranks by.
    pub fn metric(&self) -> &Metric<L> {
        &self.metric
    }

    /// Rank `lines`, best first. Equal values are ordered by line key.
    pub fn rank<'a>(&self, lines: impl IntoIterator<Item = &'a L>) -> Vec<Leader<'a, L>> {
        let mut ranked: Vec<(f64, &'a L)> = lines
            .into_iter()
            .filter(|&line| self.qualify.as_ref().is_none_or(|keep| keep(line)))
            .filter_map(|line| (self.metric.value)(line).map(|value| (value, line)))
            .collect();
        ranked.sort_by(|(a, a_line), (b, b_line)| {
            self.metric
                .compare(*a, *b)
                .then_with(|| a_line.key().cmp(&b_line.key()))
        });

        if self.limit == 0 {
            return Vec::new();
        }
        if let Some(&(cutoff, _)) = ranked.get(self.limit - 1) {
            let keep = self.limit
                + ranked[self.limit..]
                    .iter()
                    .take_while(|(value, _)| *value == cutoff)
                    .count();
            ranked.truncate(keep);
        }

        let mut leaders: Vec<Leader<'a, L>> = Vec::with_capacity(ranked.len());
        for (index, &(value, line)) in ranked.iter().enumerate() {
            let rank = match leaders.last() {
                Some(previous) if previous.value == value => previous.rank,
                _ => index + 1,
            };
            let tied = ranked
                .get(index + 1)
                .is_some_and(|(next, _)| *next == value)
                || leaders.last().is_some_and(|previous| previous.value == value);
            leaders.push(Leader {
                rank,
                tied,
                value,
                line,
            });
        }
        leaders
    }

    /// Rank `lines` and render the board.
    pub fn table<'a>(&self, book: &Scorebook, lines: impl IntoIterator<Item = &'a L>) -> Table {
        let mut table = Table::new(self.metric.name)
            .column("Rk", 4, Align::Right)
            .column("Player", 24, Align::Left)
            .column("Tm", 4, Align::Left)
            .column(self.metric.name, 6, Align::Right);
        for leader in self.rank(lines) {
            let rank = if leader.tied {
                format!("T{}", leader.rank)
            } else {
                leader.rank.to_string()
            };
            table.push(vec![
                rank,
                book.full_name(leader.line.player()),
                leader.line.team().to_string(),
                self.metric.format(leader.value),
            ]);
        }
        table
    }
}
