//! In-game screen: the replayed frame, a status bar and an info panel.

use super::canvas_view::render_canvas;
use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use crate::engine::Lifecycle;
use crate::games::GameKind;
use crate::surface::{DrawCommand, Surface};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the game screen needs from the session.
pub struct GameView<'a> {
    pub kind: GameKind,
    pub lifecycle: Lifecycle,
    pub score: u32,
    pub frame: &'a [DrawCommand],
    pub surface: &'a dyn Surface,
}

fn border_color(kind: GameKind) -> Color {
    match kind {
        GameKind::Snake => Color::LightGreen,
        GameKind::FlappyBird => Color::LightCyan,
    }
}

pub fn render_game_scene(frame: &mut Frame, area: Rect, view: &GameView) {
    let title = format!(" {} ", view.kind.name());
    let layout = create_game_layout(frame, area, &title, border_color(view.kind), 20);

    render_canvas(
        frame,
        layout.content,
        view.frame,
        view.surface.width(),
        view.surface.height(),
    );

    let (status, color) = match view.lifecycle {
        Lifecycle::Idle => ("Ready", Color::Yellow),
        Lifecycle::Running => ("Playing", Color::Green),
        Lifecycle::Stopped => ("Game over", Color::Red),
    };
    render_status_bar(frame, layout.status_bar, status, color, view.kind.controls());

    render_info_panel(frame, layout.info_panel, view);
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &GameView) {
    let inner = render_info_panel_frame(frame, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Surface: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}x{}", view.surface.width(), view.surface.height()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
