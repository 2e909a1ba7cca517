//! Regression comparison of two tabular event derivations.
//!
//! Both inputs are CSV tables with a header row, the same columns and the
//! same row order. Every cell pair that disagrees is reported, after two
//! equivalence rules:
//!
//! - ignored columns (pinch-runner markers, and a base's responsible-pitcher
//!   column when no runner occupies that base) are never compared;
//! - columns in a multiset group (putouts, assists) are compared as an
//!   unordered multiset of their non-empty values, since two valid scorings
//!   may list the same fielders in a different order.

use crate::error::{Error, Result};
use csv::StringRecord;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::path::Path;

/// A column that is ignored whenever `unless` is empty in both rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalIgnore {
    pub column: String,
    pub unless: String,
}

/// Columns compared together as an unordered multiset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisetGroup {
    /// Block name used when the group disagrees.
    pub name: String,
    pub columns: Vec<String>,
}

/// Column roles for a comparison.
///
/// The default names the columns of a standard per-event CSV extract.
///
/// # Examples
///
/// ```
/// use scorefold::DiffConfig;
///
/// let config = DiffConfig::default();
/// assert!(config.ignore.contains(&"PR_RUN1_FL".to_string()));
/// assert_eq!(config.multisets.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Name of the tool that produced the first table.
    pub left_label: String,
    /// Name of the tool that produced the second table.
    pub right_label: String,
    pub ignore: Vec<String>,
    pub ignore_unless: Vec<ConditionalIgnore>,
    pub multisets: Vec<MultisetGroup>,
    /// Columns shown with each disagreeing row.
    pub context: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        let numbered = |prefix: &str, suffix: &str, n: usize| -> Vec<String> {
            (1..=n).map(|i| format!("{prefix}{i}{suffix}")).collect()
        };
        DiffConfig {
            left_label: "reference".to_string(),
            right_label: "candidate".to_string(),
            ignore: numbered("PR_RUN", "_FL", 3),
            ignore_unless: (1..=3)
                .map(|base| ConditionalIgnore {
                    column: format!("RUN{base}_RESP_PIT_ID"),
                    unless: format!("BASE{base}_RUN_ID"),
                })
                .collect(),
            multisets: vec![
                MultisetGroup {
                    name: "PO_FLD_CD".to_string(),
                    columns: numbered("PO", "_FLD_CD", 3),
                },
                MultisetGroup {
                    name: "ASS_FLD_CD".to_string(),
                    columns: numbered("ASS", "_FLD_CD", 5),
                },
            ],
            context: ["GAME_ID", "INN_CT", "BAT_ID", "EVENT_TX"]
                .iter()
                .map(|column| column.to_string())
                .collect(),
        }
    }
}

/// One disagreeing row within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    /// Zero-based data row index.
    pub row: usize,
    pub context: String,
    pub left: String,
    pub right: String,
}

/// Every disagreeing row for one column or multiset group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub column: String,
    pub rows: Vec<DiffRow>,
}

/// The outcome of a comparison. Blocks are sorted by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub left_label: String,
    pub right_label: String,
    pub rows_compared: usize,
    pub blocks: Vec<DiffBlock>,
}

impl DiffReport {
    /// No column disagreed.
    pub fn is_clean(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block for `column`, if any rows disagree there.
    pub fn block(&self, column: &str) -> Option<&DiffBlock> {
        self.blocks.iter().find(|block| block.column == column)
    }

    /// Total disagreeing cells across all blocks.
    pub fn differences(&self) -> usize {
        self.blocks.iter().map(|block| block.rows.len()).sum()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "no differences in {} rows", self.rows_compared);
        }
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{} ({} rows)", block.column, block.rows.len())?;
            for row in &block.rows {
                writeln!(
                    f,
                    "  {}: {} '{}' / {} '{}'",
                    row.context, self.left_label, row.left, self.right_label, row.right
                )?;
            }
        }
        Ok(())
    }
}

/// Compares two CSV tables under a [`DiffConfig`].
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// An engine comparing tables as `config` describes.
    pub fn new(config: DiffConfig) -> Self {
        DiffEngine { config }
    }

    /// The configuration this engine compares with.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two CSV files.
    pub fn compare_paths(&self, left: impl AsRef<Path>, right: impl AsRef<Path>) -> Result<DiffReport> {
        let left = csv::Reader::from_path(left)?;
        let right = csv::Reader::from_path(right)?;
        self.compare(left, right)
    }

    /// Compare two CSV streams.
    pub fn compare_readers<L: io::Read, R: io::Read>(&self, left: L, right: R) -> Result<DiffReport> {
        self.compare(csv::Reader::from_reader(left), csv::Reader::from_reader(right))
    }

    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if the header rows or row counts differ;
    /// [`Error::Csv`] for malformed input.
    fn compare<L: io::Read, R: io::Read>(
        &self,
        mut left: csv::Reader<L>,
        mut right: csv::Reader<R>,
    ) -> Result<DiffReport> {
        let headers = left.headers()?.clone();
        if &headers != right.headers()? {
            return Err(Error::ShapeMismatch("header rows differ".to_string()));
        }
        let left_rows = left.records().collect::<std::result::Result<Vec<_>, _>>()?;
        let right_rows = right.records().collect::<std::result::Result<Vec<_>, _>>()?;
        if left_rows.len() != right_rows.len() {
            warn!(
                "cannot align {} rows with {} rows",
                left_rows.len(),
                right_rows.len()
            );
            return Err(Error::ShapeMismatch(format!(
                "{} has {} rows, {} has {}",
                self.config.left_label,
                left_rows.len(),
                self.config.right_label,
                right_rows.len()
            )));
        }

        let layout = Layout::new(&self.config, &headers);
        let mut blocks: BTreeMap<String, Vec<DiffRow>> = BTreeMap::new();
        for (row, (l, r)) in left_rows.iter().zip(&right_rows).enumerate() {
            for &index in &layout.plain {
                let (a, b) = (field(l, index), field(r, index));
                if a == b || layout.ignored_here(index, l, r) {
                    continue;
                }
                blocks.entry(headers[index].to_string()).or_default().push(DiffRow {
                    row,
                    context: layout.context(l),
                    left: a.to_string(),
                    right: b.to_string(),
                });
            }
            for (name, columns) in &layout.multisets {
                let (a, b) = (multiset(l, columns), multiset(r, columns));
                if a == b {
                    continue;
                }
                blocks.entry(name.clone()).or_default().push(DiffRow {
                    row,
                    context: layout.context(l),
                    left: joined(l, columns),
                    right: joined(r, columns),
                });
            }
        }

        for (column, rows) in &blocks {
            debug!("column {column}: {} differing rows", rows.len());
        }
        info!(
            "compared {} rows: {} columns differ",
            left_rows.len(),
            blocks.len()
        );
        Ok(DiffReport {
            left_label: self.config.left_label.clone(),
            right_label: self.config.right_label.clone(),
            rows_compared: left_rows.len(),
            blocks: blocks
                .into_iter()
                .map(|(column, rows)| DiffBlock { column, rows })
                .collect(),
        })
    }
}

/// Column indices resolved against one header row. Configured columns that
/// the header lacks are skipped.
struct Layout {
    plain: Vec<usize>,
    /// Column index to the index of the runner column that governs it.
    conditional: HashMap<usize, usize>,
    multisets: Vec<(String, Vec<usize>)>,
    context: Vec<usize>,
}

impl Layout {
    fn new(config: &DiffConfig, headers: &StringRecord) -> Layout {
        let index_of = |name: &str| headers.iter().position(|header| header == name);
        let multisets: Vec<(String, Vec<usize>)> = config
            .multisets
            .iter()
            .map(|group| {
                let columns = group.columns.iter().filter_map(|c| index_of(c)).collect();
                (group.name.clone(), columns)
            })
            .collect();
        let grouped = |index: usize| multisets.iter().any(|(_, columns)| columns.contains(&index));
        let plain = (0..headers.len())
            .filter(|&index| !grouped(index))
            .filter(|&index| !config.ignore.iter().any(|name| name == &headers[index]))
            .collect();
        let conditional = config
            .ignore_unless
            .iter()
            .filter_map(|rule| Some((index_of(&rule.column)?, index_of(&rule.unless)?)))
            .collect();
        let context = config.context.iter().filter_map(|c| index_of(c)).collect();
        Layout {
            plain,
            conditional,
            multisets,
            context,
        }
    }

    fn ignored_here(&self, index: usize, left: &StringRecord, right: &StringRecord) -> bool {
        self.conditional.get(&index).is_some_and(|&runner| {
            field(left, runner).is_empty() && field(right, runner).is_empty()
        })
    }

    fn context(&self, record: &StringRecord) -> String {
        self.context
            .iter()
            .map(|&index| field(record, index))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// Non-empty values of `columns` with their counts. `0` is a blank
/// fielder code.
fn multiset<'r>(record: &'r StringRecord, columns: &[usize]) -> BTreeMap<&'r str, usize> {
    let mut counts = BTreeMap::new();
    for &index in columns {
        let value = field(record, index);
        if !value.is_empty() && value != "0" {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}

fn joined(record: &StringRecord, columns: &[usize]) -> String {
    columns
        .iter()
        .map(|&index| field(record, index))
        .collect::<Vec<_>>()
        .join(",")
}
