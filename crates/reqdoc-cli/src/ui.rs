use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use reqdoc_engine::{BlockContent, UseCaseField};

use crate::app::{App, Draft, Mode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    render_blocks(f, app, columns[0]);
    render_detail(f, app, columns[1]);
    render_footer(f, app, rows[1]);
}

fn render_blocks(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let visual_ids = app.visual_ids();
    let registry = app.model.registry().clone();

    let items: Vec<ListItem> = app
        .model
        .blocks()
        .iter()
        .zip(visual_ids)
        .enumerate()
        .map(|(i, (block, visual_id))| {
            let kind = match registry.resolve(block.block_type()) {
                Some(plugin) => plugin.label().trim_start_matches("+ ").to_string(),
                None => format!("? {}", block.block_type()),
            };
            let mut spans = vec![Span::raw(format!("{:>2}. ", i + 1))];
            if let Some(id) = visual_id {
                spans.push(Span::styled(
                    format!("{id} "),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(
                format!("[{kind}] "),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw(block.content().summary()));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = match app.config.title() {
        Some(title) => format!("Blocks: {title}"),
        None => "Blocks".to_string(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let (title, lines) = match &app.mode {
        Mode::Edit(draft) => ("Editing", draft_lines(draft)),
        Mode::Browse => match app.selected().map(|i| &app.model.blocks()[i]) {
            Some(block) => ("Content", content_lines(block.content(), None)),
            None => ("Content", vec![Line::from("No block selected")]),
        },
    };

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

fn draft_lines(draft: &Draft) -> Vec<Line<'static>> {
    content_lines(&draft.content, draft.field())
}

fn content_lines(content: &BlockContent, active: Option<UseCaseField>) -> Vec<Line<'static>> {
    match content {
        BlockContent::Text(text) => text.split('\n').map(|l| Line::from(l.to_string())).collect(),
        BlockContent::Opaque(value) => vec![Line::from(value.to_string())],
        BlockContent::UseCase(use_case) => {
            let mut lines = Vec::new();
            for field in UseCaseField::ALL {
                let style = if Some(field) == active {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled(format!("{}:", field.label()), style)));
                lines.extend(
                    use_case
                        .field(field)
                        .lines()
                        .map(|l| Line::from(format!("  {l}"))),
                );
            }
            lines
        }
    }
}

fn render_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let keys = match app.mode {
        Mode::Browse => {
            "q: Quit | ↑/k ↓/j: Select | K/J: Move | 1-9: Add | d: Delete | Enter: Edit | e: Export | s: Save blocks"
        }
        Mode::Edit(_) => "Esc: Save | Tab/Shift-Tab: Field | Enter: New line",
    };
    let footer = Paragraph::new(vec![
        Line::from(keys),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Green),
        )),
    ]);
    f.render_widget(footer, area);
}
