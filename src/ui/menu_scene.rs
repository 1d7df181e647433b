//! Game selection menu.

use crate::build_info;
use crate::games::GameKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_menu(frame: &mut Frame, area: Rect, selected: GameKind) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GameKind::ALL.len() as u16), // Game list
            Constraint::Length(1),                          // Spacer
            Constraint::Min(0),                             // Description
            Constraint::Length(1),                          // Help
        ])
        .split(inner);

    let items: Vec<ListItem> = GameKind::ALL
        .iter()
        .map(|&kind| {
            let is_selected = kind == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{}", prefix, kind.name())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), chunks[0]);

    let mut lines = vec![Line::from(Span::styled(
        selected.description(),
        Style::default().fg(Color::White),
    ))];
    lines.push(Line::from(""));
    for (key, action) in selected.controls() {
        lines.push(Line::from(vec![
            Span::styled(*key, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
        ]));
    }
    let details = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[2]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "[↑/↓] Navigate  [Enter] Play  [q] Quit",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {}", build_info::version_line()),
            Style::default().fg(Color::Rgb(80, 80, 80)),
        ),
    ]));
    frame.render_widget(help, chunks[3]);
}
