use crate::export::style::{
    CELL_MARGINS, CELL_SPACING, HEADER_FILL, LABEL_FILL, TABLE_SIZE, runs,
};
use crate::export::{
    Alignment, DocNode, Paragraph, Table, TableCell, TableLayout, TableRow, VerticalAlign,
};
use crate::models::{BlockContent, UseCase, UseCaseField};
use crate::plugins::BlockPlugin;

/// Column widths in twips: ID, title, module
const COLUMNS: [u32; 3] = [1800, 5200, 2000];

/// Use-case block ("CDU") exported as a fixed-layout three-column table.
///
/// Layout:
/// - header row: `ID | Título | Módulo`
/// - value row: visual id, title, module
/// - one row per detail field: shaded label, value spanning the last two columns
pub struct UseCasePlugin;

impl UseCasePlugin {
    pub const TYPE: &'static str = "cdu";
    pub const CODE: &'static str = "CDU";
}

impl BlockPlugin for UseCasePlugin {
    fn block_type(&self) -> &str {
        Self::TYPE
    }

    fn label(&self) -> &str {
        "+ Tabela CDU"
    }

    fn default_content(&self) -> BlockContent {
        BlockContent::UseCase(UseCase::default())
    }

    fn visual_code(&self) -> Option<&str> {
        Some(Self::CODE)
    }

    fn export(&self, content: &BlockContent, visual_id: Option<&str>) -> Vec<DocNode> {
        let Some(use_case) = content.as_use_case() else {
            log::warn!(
                "Use case plugin received {} content, nothing exported",
                content.kind()
            );
            return Vec::new();
        };
        vec![use_case_table(use_case, visual_id.unwrap_or_default()).into()]
    }
}

fn use_case_table(use_case: &UseCase, visual_id: &str) -> Table {
    let mut rows = Vec::with_capacity(2 + UseCaseField::DETAIL.len());

    rows.push(TableRow::new(vec![
        cell("ID", true, Alignment::Center).shading(HEADER_FILL),
        cell(UseCaseField::Title.label(), true, Alignment::Center).shading(HEADER_FILL),
        cell(UseCaseField::Module.label(), true, Alignment::Center).shading(HEADER_FILL),
    ]));
    rows.push(TableRow::new(vec![
        cell(visual_id, true, Alignment::Center),
        cell(&use_case.title, false, Alignment::Left),
        cell(&use_case.module, true, Alignment::Center),
    ]));
    rows.extend(
        UseCaseField::DETAIL
            .iter()
            .map(|field| detail_row(field.label(), use_case.field(*field))),
    );

    Table::new(rows)
        .columns(COLUMNS.to_vec())
        .width_percent(100)
        .layout(TableLayout::Fixed)
}

fn detail_row(label: &str, value: &str) -> TableRow {
    TableRow::new(vec![
        cell(label, true, Alignment::Center).shading(LABEL_FILL),
        cell(value, false, Alignment::Left).column_span(2),
    ])
}

fn cell(text: &str, bold: bool, alignment: Alignment) -> TableCell {
    let paragraph = Paragraph::new()
        .align(alignment)
        .spacing(CELL_SPACING)
        .add_runs(runs(text, TABLE_SIZE, bold));
    TableCell::new()
        .vertical_align(VerticalAlign::Center)
        .margins(CELL_MARGINS)
        .add_paragraph(paragraph)
}
