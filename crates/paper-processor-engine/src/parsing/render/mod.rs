//! # Block Rendering
//!
//! Turns one block's raw text into typed [`DisplayNode`]s. Rendering is a
//! pure function of the block string: no state survives between calls.

pub mod table;

pub use table::{Alignment, MalformedTable, Table, split_row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Heading markers, longest first. A line must be tested against `###`
    /// before `##` and `#`.
    const MARKERS: [(&'static str, HeadingLevel); 3] = [
        ("###", HeadingLevel::H3),
        ("##", HeadingLevel::H2),
        ("#", HeadingLevel::H1),
    ];
}

/// One typed unit of renderable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    Heading { level: HeadingLevel, text: String },
    Paragraph { text: String },
    Table(Table),
}

/// Renders a block's text into display nodes.
///
/// Consecutive lines starting with `|` are gathered into one table. Every
/// other line is a heading (`###`, `##`, `#`, matched in that order) or a
/// paragraph holding the raw line.
pub fn render(block_text: &str) -> Vec<DisplayNode> {
    let mut out = Vec::new();
    let mut pending_rows: Vec<&str> = Vec::new();
    let mut collecting_table = false;

    for line in block_text.lines() {
        if line.starts_with('|') {
            if !collecting_table {
                collecting_table = true;
                pending_rows.clear();
            }
            pending_rows.push(line);
            continue;
        }

        if collecting_table {
            finalize_table(&pending_rows, &mut out);
            collecting_table = false;
            pending_rows.clear();
        }
        out.push(classify_text_line(line));
    }

    if collecting_table {
        finalize_table(&pending_rows, &mut out);
    }

    out
}

fn classify_text_line(line: &str) -> DisplayNode {
    for (marker, level) in HeadingLevel::MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return DisplayNode::Heading {
                level,
                text: rest.trim_start().to_string(),
            };
        }
    }
    DisplayNode::Paragraph {
        text: line.to_string(),
    }
}

/// Appends the table for `rows`, degrading when the rows are malformed.
fn finalize_table(rows: &[&str], out: &mut Vec<DisplayNode>) {
    let parsed = Table::parse(rows).or_else(|err| {
        log::warn!("malformed table ({err}), rendering best effort");
        Table::parse_padded(rows)
    });

    match parsed {
        Ok(table) => out.push(DisplayNode::Table(table)),
        Err(err) => {
            log::debug!("table degraded to paragraphs: {err}");
            out.extend(rows.iter().map(|row| DisplayNode::Paragraph {
                text: row.to_string(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn heading(level: HeadingLevel, text: &str) -> DisplayNode {
        DisplayNode::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn paragraph(text: &str) -> DisplayNode {
        DisplayNode::Paragraph {
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("# Title", HeadingLevel::H1, "Title")]
    #[case("## Methods", HeadingLevel::H2, "Methods")]
    #[case("### 3.1 Setup", HeadingLevel::H3, "3.1 Setup")]
    #[case("#NoSpace", HeadingLevel::H1, "NoSpace")]
    #[case("###   Spaced", HeadingLevel::H3, "Spaced")]
    #[case("#### Deep", HeadingLevel::H3, "# Deep")]
    fn headings(#[case] line: &str, #[case] level: HeadingLevel, #[case] text: &str) {
        assert_eq!(render(line), vec![heading(level, text)]);
    }

    #[test]
    fn level_three_never_matches_shorter_markers() {
        let nodes = render("### Title");
        assert!(matches!(
            nodes.as_slice(),
            [DisplayNode::Heading {
                level: HeadingLevel::H3,
                ..
            }]
        ));
    }

    #[test]
    fn plain_lines_are_paragraphs() {
        assert_eq!(
            render("First sentence.\nSecond sentence."),
            vec![paragraph("First sentence."), paragraph("Second sentence.")]
        );
    }

    #[test]
    fn renders_scenario_table() {
        let nodes = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            nodes,
            vec![DisplayNode::Table(Table {
                headers: vec!["A".into(), "B".into()],
                alignments: vec![Alignment::Left, Alignment::Left],
                rows: vec![vec!["1".into(), "2".into()]],
            })]
        );
    }

    #[test]
    fn heading_then_table_then_text() {
        let nodes = render("## Results\n| A |\n|--:|\n| 9 |\nnote");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], heading(HeadingLevel::H2, "Results"));
        match &nodes[1] {
            DisplayNode::Table(t) => {
                assert_eq!(t.alignments, vec![Alignment::Right]);
                assert_eq!(t.rows, vec![vec!["9"]]);
            }
            other => panic!("expected table, got {other:?}"),
        }
        assert_eq!(nodes[2], paragraph("note"));
    }

    #[test]
    fn two_tables_split_by_text() {
        let nodes = render("| A |\n|---|\ncaption\n| B |\n|---|");
        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[0], DisplayNode::Table(_)));
        assert!(matches!(nodes[2], DisplayNode::Table(_)));
    }

    #[test]
    fn single_row_table_degrades_to_paragraph() {
        assert_eq!(render("| A | B |"), vec![paragraph("| A | B |")]);
    }

    #[test]
    fn short_delimiter_row_is_padded() {
        let nodes = render("| A | B |\n|:-:|\n| 1 | 2 |");
        let DisplayNode::Table(table) = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(table.alignments, vec![Alignment::Center, Alignment::Left]);
    }

    #[test]
    fn second_row_is_consumed_even_without_markers() {
        let nodes = render("| x | y |\n| 1 | 2 |");
        assert_eq!(
            nodes,
            vec![DisplayNode::Table(Table {
                headers: vec!["x".into(), "y".into()],
                alignments: vec![Alignment::Left, Alignment::Left],
                rows: vec![],
            })]
        );
    }

    #[test]
    fn indented_row_inside_block_is_a_paragraph() {
        assert_eq!(render("  | A |"), vec![paragraph("  | A |")]);
    }

    #[test]
    fn rendering_is_pure() {
        let block = "# T\n| A |\n|---|\n| 1 |\ntext";
        assert_eq!(render(block), render(block));
    }

    #[test]
    fn empty_block_renders_nothing() {
        assert!(render("").is_empty());
    }
}
