use std::sync::OnceLock;

use regex::Regex;

/// Column alignment taken from the delimiter row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// `:x:` is center, `x:` is right, anything else is left.
    pub fn from_marker(cell: &str) -> Self {
        if cell.starts_with(':') && cell.ends_with(':') {
            Alignment::Center
        } else if cell.ends_with(':') {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTable {
    #[error("table needs a header row and a delimiter row, found {found} row(s)")]
    TooFewRows { found: usize },

    #[error("delimiter row has {alignments} cell(s) for {headers} header(s)")]
    AlignmentRowTooShort { headers: usize, alignments: usize },
}

/// A parsed pipe table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    /// Body rows, rendered with whatever cells they have; no padding.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses raw `|` rows: header, delimiter, then body rows.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Table, MalformedTable> {
        let rows = split_rows(lines);
        if rows.len() < 2 {
            return Err(MalformedTable::TooFewRows { found: rows.len() });
        }
        if rows[1].len() < rows[0].len() {
            return Err(MalformedTable::AlignmentRowTooShort {
                headers: rows[0].len(),
                alignments: rows[1].len(),
            });
        }
        Ok(Self::assemble(rows))
    }

    /// Like [`Table::parse`], but recovers what it can.
    ///
    /// A short delimiter row is padded with `Left`. Fewer than two rows is
    /// still an error.
    pub fn parse_padded<S: AsRef<str>>(lines: &[S]) -> Result<Table, MalformedTable> {
        let rows = split_rows(lines);
        if rows.len() < 2 {
            return Err(MalformedTable::TooFewRows { found: rows.len() });
        }
        Ok(Self::assemble(rows))
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Alignment of column `i`, `Left` past the end of the delimiter row.
    pub fn alignment(&self, i: usize) -> Alignment {
        self.alignments.get(i).copied().unwrap_or_default()
    }

    /// Row 0 is the header and row 1 the alignment row, whatever it holds.
    fn assemble(mut rows: Vec<Vec<String>>) -> Table {
        let body = rows.split_off(2);
        let delimiter = rows.pop().unwrap_or_default();
        let headers = rows.pop().unwrap_or_default();

        if !is_delimiter_row(&delimiter) {
            log::debug!("table alignment row {delimiter:?} has non-marker cells");
        }
        let mut alignments: Vec<Alignment> =
            delimiter.iter().map(|c| Alignment::from_marker(c)).collect();
        if alignments.len() < headers.len() {
            alignments.resize(headers.len(), Alignment::Left);
        }

        Table {
            headers,
            alignments,
            rows: body,
        }
    }
}

/// Splits one `|` row into trimmed cells.
///
/// Empty cells produced by the leading and trailing delimiters are dropped;
/// empty cells between two delimiters are kept so columns do not shift.
pub fn split_row(row: &str) -> Vec<String> {
    let mut cells: Vec<&str> = row.split('|').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

fn split_rows<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<String>> {
    lines.iter().map(|l| split_row(l.as_ref())).collect()
}

fn is_delimiter_row(cells: &[String]) -> bool {
    // One cell of a delimiter row: `---`, `:--`, `--:`, `:-:`
    static DELIMITER_CELL: OnceLock<Regex> = OnceLock::new();
    let cell_regex =
        DELIMITER_CELL.get_or_init(|| Regex::new(r"^:?-+:?$").expect("Invalid delimiter regex"));

    !cells.is_empty() && cells.iter().all(|c| cell_regex.is_match(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| A | B |", vec!["A", "B"])]
    #[case("|A|B|", vec!["A", "B"])]
    #[case("A | B", vec!["A", "B"])]
    #[case("  | A |  ", vec!["A"])]
    #[case("| a |  | c |", vec!["a", "", "c"])]
    #[case("|", vec![])]
    fn splits_rows(#[case] row: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_row(row), expected);
    }

    #[rstest]
    #[case("---", Alignment::Left)]
    #[case(":---", Alignment::Left)]
    #[case("---:", Alignment::Right)]
    #[case(":---:", Alignment::Center)]
    #[case(":", Alignment::Center)]
    fn alignment_markers(#[case] cell: &str, #[case] expected: Alignment) {
        assert_eq!(Alignment::from_marker(cell), expected);
    }

    #[test]
    fn parses_header_delimiter_and_body() {
        let table = Table::parse(&["| A | B | C |", "|:--|:-:|--:|", "| 1 | 2 | 3 |", "| 4 | 5 | 6 |"])
            .unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(
            table.alignments,
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
        assert_eq!(table.rows, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
    }

    #[test]
    fn header_and_delimiter_only() {
        let table = Table::parse(&["| A |", "|---|"]).unwrap();
        assert_eq!(table.headers, vec!["A"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn ragged_body_rows_are_kept_as_is() {
        let table = Table::parse(&["| A | B |", "|---|---|", "| 1 |", "| 1 | 2 | 3 |"]).unwrap();
        assert_eq!(table.rows, vec![vec!["1"], vec!["1", "2", "3"]]);
        assert_eq!(table.alignment(2), Alignment::Left);
    }

    #[test]
    fn single_row_is_too_few() {
        assert_eq!(
            Table::parse(&["| A | B |"]),
            Err(MalformedTable::TooFewRows { found: 1 })
        );
        assert_eq!(
            Table::parse_padded(&["| A | B |"]),
            Err(MalformedTable::TooFewRows { found: 1 })
        );
    }

    #[test]
    fn short_delimiter_row_is_rejected_then_padded() {
        let lines = ["| A | B | C |", "|:-:|", "| 1 | 2 | 3 |"];
        assert_eq!(
            Table::parse(&lines),
            Err(MalformedTable::AlignmentRowTooShort {
                headers: 3,
                alignments: 1
            })
        );
        let table = Table::parse_padded(&lines).unwrap();
        assert_eq!(
            table.alignments,
            vec![Alignment::Center, Alignment::Left, Alignment::Left]
        );
        assert_eq!(table.rows, vec![vec!["1", "2", "3"]]);
    }

    #[test]
    fn second_row_is_always_the_alignment_row() {
        let table = Table::parse(&["| x | y |", "| 1 | 2 |"]).unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Left]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn non_marker_alignment_cells_still_read_colons() {
        let table = Table::parse(&["| A | B |", "| a: | :b: |", "| 1 | 2 |"]).unwrap();
        assert_eq!(table.alignments, vec![Alignment::Right, Alignment::Center]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[rstest]
    #[case(&["---", ":-:"], true)]
    #[case(&["---", "1"], false)]
    #[case(&[], false)]
    fn recognises_delimiter_rows(#[case] cells: &[&str], #[case] expected: bool) {
        let cells: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        assert_eq!(is_delimiter_row(&cells), expected);
    }
}
