use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, Run, RunFonts, Shading, TableLayoutType,
    VAlignType, WidthType,
};
use reqdoc_engine::export::{
    Alignment, DocNode, DocumentSerializer, DocumentTree, Paragraph, SerializeError, Table,
    TableCell, TableLayout, TextRun, VerticalAlign,
};

/// OOXML expresses percentage widths in fiftieths of a percent
const PCT_UNIT: usize = 50;

/// Writes a `DocumentTree` as a `.docx` archive.
///
/// Each node maps to exactly one docx element, in order. Sections after the first start
/// on a new page.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, document: &DocumentTree) -> Docx {
        let mut docx = Docx::new();
        for (i, section) in document.sections.iter().enumerate() {
            if i > 0 {
                docx = docx.add_paragraph(
                    docx_rs::Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
                );
            }
            for node in &section.children {
                docx = match node {
                    DocNode::Paragraph(paragraph) => {
                        docx.add_paragraph(paragraph_to_docx(paragraph))
                    }
                    DocNode::Table(table) => docx.add_table(table_to_docx(table)),
                };
            }
        }
        docx
    }
}

impl DocumentSerializer for DocxWriter {
    fn serialize(&self, document: &DocumentTree) -> Result<Vec<u8>, SerializeError> {
        if document.sections.is_empty() {
            return Err(SerializeError::EmptyDocument);
        }

        let mut buffer = Cursor::new(Vec::new());
        self.build(document)
            .build()
            .pack(&mut buffer)
            .map_err(|e| SerializeError::Pack(e.to_string()))?;

        let bytes = buffer.into_inner();
        log::debug!(
            "Packed {} nodes into {} bytes of docx",
            document.nodes().count(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn paragraph_to_docx(paragraph: &Paragraph) -> docx_rs::Paragraph {
    let spacing = LineSpacing::new()
        .before(paragraph.spacing.before)
        .after(paragraph.spacing.after);
    paragraph.runs.iter().fold(
        docx_rs::Paragraph::new()
            .align(alignment(paragraph.alignment))
            .line_spacing(spacing),
        |p, run| p.add_run(run_to_docx(run)),
    )
}

fn run_to_docx(run: &TextRun) -> Run {
    let fonts = RunFonts::new()
        .ascii(&run.font)
        .hi_ansi(&run.font)
        .cs(&run.font);
    let mut out = Run::new().fonts(fonts).size(run.size as usize);
    if run.bold {
        out = out.bold();
    }
    if run.break_before {
        out = out.add_break(BreakType::TextWrapping);
    }
    out.add_text(&run.text)
}

fn table_to_docx(table: &Table) -> docx_rs::Table {
    let rows = table
        .rows
        .iter()
        .map(|row| docx_rs::TableRow::new(row.cells.iter().map(cell_to_docx).collect()))
        .collect();

    let layout = match table.layout {
        TableLayout::Fixed => TableLayoutType::Fixed,
        TableLayout::Autofit => TableLayoutType::Autofit,
    };

    docx_rs::Table::new(rows)
        .set_grid(table.columns.iter().map(|&w| w as usize).collect())
        .layout(layout)
        .width(table.width_percent as usize * PCT_UNIT, WidthType::Pct)
}

fn cell_to_docx(cell: &TableCell) -> docx_rs::TableCell {
    let mut out = cell
        .children
        .iter()
        .fold(docx_rs::TableCell::new(), |c, p| {
            c.add_paragraph(paragraph_to_docx(p))
        })
        .vertical_align(vertical_align(cell.vertical_align));
    if cell.column_span > 1 {
        out = out.grid_span(cell.column_span as usize);
    }
    if let Some(fill) = &cell.shading {
        out = out.shading(Shading::new().fill(fill.as_str()));
    }
    if let Some(margins) = cell.margins {
        out.property = out
            .property
            .margin_top(twips(margins.top), WidthType::Dxa)
            .margin_right(twips(margins.right), WidthType::Dxa)
            .margin_bottom(twips(margins.bottom), WidthType::Dxa)
            .margin_left(twips(margins.left), WidthType::Dxa);
    }
    out
}

/// OOXML cell margins are unsigned
fn twips(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justified => AlignmentType::Both,
    }
}

fn vertical_align(align: VerticalAlign) -> VAlignType {
    match align {
        VerticalAlign::Top => VAlignType::Top,
        VerticalAlign::Center => VAlignType::Center,
        VerticalAlign::Bottom => VAlignType::Bottom,
    }
}
