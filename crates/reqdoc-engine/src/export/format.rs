use std::fmt::Write;

use crate::export::style::EMPTY_SENTINEL;
use crate::export::{DocNode, Paragraph, Table, TableCell};

/// Format assembled nodes as an indented outline, for snapshot tests and debugging.
///
/// The empty-text sentinel is printed as `\u{200B}` so it stays visible.
pub fn format_nodes(nodes: &[DocNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            DocNode::Paragraph(paragraph) => format_paragraph(&mut out, paragraph, 0),
            DocNode::Table(table) => format_table(&mut out, table),
        }
    }
    out
}

fn format_table(out: &mut String, table: &Table) {
    let _ = writeln!(
        out,
        "Table {:?} width={}% columns={:?}",
        table.layout, table.width_percent, table.columns
    );
    for row in &table.rows {
        let _ = writeln!(out, "  Row");
        for cell in &row.cells {
            format_cell(out, cell);
        }
    }
}

fn format_cell(out: &mut String, cell: &TableCell) {
    let margins = match cell.margins {
        Some(m) => format!("{},{},{},{}", m.top, m.right, m.bottom, m.left),
        None => "-".to_string(),
    };
    let _ = writeln!(
        out,
        "    Cell span={} fill={} valign={:?} margins={}",
        cell.column_span,
        cell.shading.as_deref().unwrap_or("-"),
        cell.vertical_align,
        margins
    );
    for paragraph in &cell.children {
        format_paragraph(out, paragraph, 3);
    }
}

fn format_paragraph(out: &mut String, paragraph: &Paragraph, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{indent}Paragraph {:?} before={} after={}",
        paragraph.alignment, paragraph.spacing.before, paragraph.spacing.after
    );
    for run in &paragraph.runs {
        let _ = writeln!(
            out,
            "{indent}  {}\"{}\" {} {}{}",
            if run.break_before { "break " } else { "" },
            run.text.replace(EMPTY_SENTINEL, "\\u{200B}"),
            run.font,
            run.size,
            if run.bold { " bold" } else { "" }
        );
    }
}
