//! Formatting policy shared by every plugin exporting into the same document.

use crate::export::nodes::{Alignment, CellMargins, Paragraph, Spacing, TextRun};

/// Invisible placeholder rendered in place of empty text.
///
/// Some renderers collapse table cells with no characters to zero height, so blank
/// fields export as this sentinel. It is not content: export is one-directional and
/// nothing reads it back.
pub const EMPTY_SENTINEL: &str = "\u{200B}";

pub const FONT_FAMILY: &str = "Arial";

/// Font sizes in half-points
pub const TITLE_SIZE: u32 = 32;
pub const BODY_SIZE: u32 = 22;
pub const TABLE_SIZE: u32 = 20;

pub const TITLE_SPACING: Spacing = Spacing::new(0, 400);
pub const BODY_SPACING: Spacing = Spacing::new(0, 200);
pub const CELL_SPACING: Spacing = Spacing::new(40, 40);

/// Tight vertical padding, a little horizontal room
pub const CELL_MARGINS: CellMargins = CellMargins::new(-10, 50, -10, 50);

/// Cell fills
pub const HEADER_FILL: &str = "FFFFFF";
pub const LABEL_FILL: &str = "F2F2F2";

/// Returns `text`, or the sentinel when it is empty or whitespace only
pub fn renderable(text: &str) -> &str {
    if text.trim().is_empty() {
        EMPTY_SENTINEL
    } else {
        text
    }
}

/// Builds runs for `text` in the shared font, one run per line.
///
/// Blank text yields a single sentinel run, so the result is never empty. A trailing
/// newline keeps its empty last line.
pub fn runs(text: &str, size: u32, bold: bool) -> Vec<TextRun> {
    renderable(text)
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(i, line)| {
            let run = TextRun::new(line)
                .font(FONT_FAMILY)
                .size(size)
                .bold(bold);
            if i == 0 { run } else { run.break_before() }
        })
        .collect()
}

/// The fixed heading placed before the first block
pub fn title(text: &str) -> Paragraph {
    Paragraph::new()
        .align(Alignment::Center)
        .spacing(TITLE_SPACING)
        .add_runs(runs(text, TITLE_SIZE, true))
}
