//! Fixed-width text and HTML rendering of report tables.

use html_escape::encode_text;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

/// A titled table of preformatted cells.
///
/// Cells wider than their column are not truncated; the column widens for
/// that row only.
///
/// # Examples
///
/// ```
/// use scorefold::{Align, Table};
///
/// let mut table = Table::new("Leaders")
///     .column("Player", 8, Align::Left)
///     .column("AVG", 5, Align::Right);
/// table.push(vec!["Smith".to_string(), ".312".to_string()]);
///
/// assert_eq!(table.to_text(), "Leaders\n\nPlayer     AVG\nSmith     .312\n");
/// assert!(table.to_html().contains("<td class=\"right\">.312</td>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// An empty table.
    pub fn new(title: impl Into<String>) -> Self {
        Table {
            title: title.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append a column.
    pub fn column(mut self, header: &str, width: usize, align: Align) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            width,
            align,
        });
        self
    }

    /// Append a row of formatted cells, one per column.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with one space between columns and no trailing blanks.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n\n", self.title);
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        out.push_str(&self.text_row(&headers));
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push_str(&self.text_row(&cells));
        }
        out
    }

    /// Render as an HTML table with alignment classes.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<table>");
        let _ = writeln!(out, "<caption>{}</caption>", encode_text(&self.title));
        out.push_str("<tr>");
        for column in &self.columns {
            let _ = write!(
                out,
                "<th class=\"{}\">{}</th>",
                class(column.align),
                encode_text(&column.header)
            );
        }
        out.push_str("</tr>\n");
        for row in &self.rows {
            out.push_str("<tr>");
            for (cell, column) in row.iter().zip(&self.columns) {
                let _ = write!(
                    out,
                    "<td class=\"{}\">{}</td>",
                    class(column.align),
                    encode_text(cell)
                );
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>\n");
        out
    }

    fn text_row(&self, cells: &[&str]) -> String {
        let mut line = String::new();
        for (i, (cell, column)) in cells.iter().zip(&self.columns).enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let width = column.width;
            match column.align {
                Align::Left => {
                    let _ = write!(line, "{cell:<width$}");
                }
                Align::Right => {
                    let _ = write!(line, "{cell:>width$}");
                }
            }
        }
        let mut line = line.trim_end().to_string();
        line.push('\n');
        line
    }
}

fn class(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Right => "right",
    }
}
