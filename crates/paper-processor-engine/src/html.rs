//! HTML output for display nodes.
//!
//! One element per node, newline separated. Table cells carry an inline
//! `text-align` taken from their column's alignment.

use std::fmt::Write;

use html_escape::encode_text;

use crate::parsing::render::{DisplayNode, Table, render};

pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            DisplayNode::Heading { level, text } => {
                let n = level.as_u8();
                let _ = writeln!(out, "<h{n}>{}</h{n}>", encode_text(text));
            }
            DisplayNode::Paragraph { text } => {
                let _ = writeln!(out, "<p>{}</p>", encode_text(text));
            }
            DisplayNode::Table(table) => write_table(&mut out, table),
        }
    }
    out
}

/// Renders a raw block straight to HTML.
pub fn render_block_html(block_text: &str) -> String {
    to_html(&render(block_text))
}

fn write_table(out: &mut String, table: &Table) {
    out.push_str("<table>\n<thead>\n");
    write_row(out, "th", &table.headers, table);
    out.push_str("</thead>\n<tbody>\n");
    for row in &table.rows {
        write_row(out, "td", row, table);
    }
    out.push_str("</tbody>\n</table>\n");
}

fn write_row(out: &mut String, tag: &str, cells: &[String], table: &Table) {
    out.push_str("<tr>");
    for (i, cell) in cells.iter().enumerate() {
        let _ = write!(
            out,
            "<{tag} style=\"text-align: {}\">{}</{tag}>",
            table.alignment(i).as_css(),
            encode_text(cell)
        );
    }
    out.push_str("</tr>\n");
}
