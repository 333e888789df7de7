//! Abstract document nodes handed to a `DocumentSerializer`.
//!
//! Sizes follow OOXML units: font sizes in half-points, spacing and column widths in
//! twentieths of a point (twips), table width in percent.

/// Horizontal paragraph alignment
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justified,
}

/// Vertical alignment of content within a table cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Table layout algorithm
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableLayout {
    /// Column widths are taken as given regardless of content
    Fixed,
    Autofit,
}

/// Space before and after a paragraph, in twips
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }
}

/// Inner padding of a table cell, in twips. Negative values are clamped to zero by
/// writers that cannot express them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellMargins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl CellMargins {
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A run of uniformly formatted text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    /// Half-points: 22 = 11pt
    pub size: u32,
    pub bold: bool,
    /// Start this run on a new line within the same paragraph
    pub break_before: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: String::new(),
            size: 0,
            bold: false,
            break_before: false,
        }
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn break_before(mut self) -> Self {
        self.break_before = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub spacing: Spacing,
    pub runs: Vec<TextRun>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            spacing: Spacing::default(),
            runs: Vec::new(),
        }
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn add_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn add_runs(mut self, runs: impl IntoIterator<Item = TextRun>) -> Self {
        self.runs.extend(runs);
        self
    }

    /// Concatenated run text, line breaks rendered as `\n`
    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            if run.break_before {
                out.push('\n');
            }
            out.push_str(&run.text);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableCell {
    pub children: Vec<Paragraph>,
    pub column_span: u32,
    /// Background fill as an RGB hex string, e.g. `F2F2F2`
    pub shading: Option<String>,
    pub vertical_align: VerticalAlign,
    /// `None` leaves the renderer's default padding
    pub margins: Option<CellMargins>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            column_span: 1,
            shading: None,
            vertical_align: VerticalAlign::Top,
            margins: None,
        }
    }
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.children.push(paragraph);
        self
    }

    pub fn column_span(mut self, span: u32) -> Self {
        self.column_span = span;
        self
    }

    pub fn shading(mut self, fill: impl Into<String>) -> Self {
        self.shading = Some(fill.into());
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    pub fn margins(mut self, margins: CellMargins) -> Self {
        self.margins = Some(margins);
        self
    }

    pub fn text(&self) -> String {
        self.children
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    /// Column widths in twips; relative proportions are what matter
    pub columns: Vec<u32>,
    pub width_percent: u32,
    pub layout: TableLayout,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            columns: Vec::new(),
            width_percent: 100,
            layout: TableLayout::Autofit,
            rows,
        }
    }

    pub fn columns(mut self, columns: Vec<u32>) -> Self {
        self.columns = columns;
        self
    }

    pub fn width_percent(mut self, percent: u32) -> Self {
        self.width_percent = percent;
        self
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Top-level node of an assembled document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocNode {
    Paragraph(Paragraph),
    Table(Table),
}

impl From<Paragraph> for DocNode {
    fn from(paragraph: Paragraph) -> Self {
        DocNode::Paragraph(paragraph)
    }
}

impl From<Table> for DocNode {
    fn from(table: Table) -> Self {
        DocNode::Table(table)
    }
}
