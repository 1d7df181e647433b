pub mod canvas_view;
pub mod game_common;
pub mod game_scene;
pub mod menu_scene;

use crate::engine::Lifecycle;
use crate::session::{Screen, Session};
use game_common::render_game_over_overlay;
use game_scene::{render_game_scene, GameView};
use menu_scene::render_menu;
use ratatui::Frame;

/// Draw whatever the session is currently showing.
pub fn draw_ui(frame: &mut Frame, session: &Session) {
    let area = frame.size();
    match session.screen() {
        Screen::Menu => render_menu(frame, area, session.selected()),
        Screen::Playing(kind) => {
            let surface = session.surface();
            let lifecycle = session
                .engine()
                .map(|engine| engine.lifecycle())
                .unwrap_or(Lifecycle::Stopped);
            let view = GameView {
                kind,
                lifecycle,
                score: session.score(),
                frame: surface.last_frame(),
                surface: &*surface,
            };
            render_game_scene(frame, area, &view);
        }
        Screen::GameOver(notice) => render_game_over_overlay(frame, area, &notice),
    }
}
