//! Integration test: host session flow from menu to game over and back
//!
//! Keys go in as crossterm key codes, the way the terminal loop feeds them.

use arcade::engine::Lifecycle;
use arcade::games::GameKind;
use arcade::input::Key;
use arcade::session::{Screen, Session, SessionAction};
use crossterm::event::KeyCode;
use std::time::Duration;

fn press(session: &mut Session, code: KeyCode) -> SessionAction {
    session.handle_key(Key::from(code)).unwrap()
}

fn run_for(session: &mut Session, total: Duration) {
    let frame = Duration::from_millis(16);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        session.advance(frame);
        elapsed += frame;
    }
}

#[test]
fn test_snake_round_trip() {
    let mut session = Session::new(Some(2024));
    assert_eq!(session.screen(), Screen::Menu);

    press(&mut session, KeyCode::Enter);
    assert_eq!(session.screen(), Screen::Playing(GameKind::Snake));

    press(&mut session, KeyCode::Left);
    // Ten cells to the left wall, 110 ms per cell, plus the notice delay
    run_for(&mut session, Duration::from_millis(110 * 11 + 100 + 32));

    let Screen::GameOver(notice) = session.screen() else {
        panic!("expected game over, got {:?}", session.screen());
    };
    assert_eq!(notice.game, GameKind::Snake);
    assert_eq!(notice.score, session.score());

    press(&mut session, KeyCode::Char('z'));
    assert_eq!(session.screen(), Screen::Menu);
    assert_eq!(press(&mut session, KeyCode::Char('q')), SessionAction::Quit);
}

#[test]
fn test_switching_games_replaces_engine() {
    let mut session = Session::new(Some(1));
    press(&mut session, KeyCode::Enter);
    run_for(&mut session, Duration::from_millis(300));
    press(&mut session, KeyCode::Esc);
    assert_eq!(session.screen(), Screen::Menu);

    press(&mut session, KeyCode::Down);
    press(&mut session, KeyCode::Enter);
    assert_eq!(session.screen(), Screen::Playing(GameKind::FlappyBird));
    assert_eq!(session.score(), 0);

    let engine = session.engine().unwrap();
    assert_eq!(engine.kind(), GameKind::FlappyBird);
    assert_eq!(engine.lifecycle(), Lifecycle::Running);
}

#[test]
fn test_space_flap_keeps_bird_up() {
    let mut session = Session::new(Some(5));
    press(&mut session, KeyCode::Down);
    press(&mut session, KeyCode::Enter);

    // A flap every ~39 ticks holds the bird roughly level. Two rounds end
    // before the first pipe reaches the bird.
    for _ in 0..2 {
        press(&mut session, KeyCode::Char(' '));
        run_for(&mut session, Duration::from_millis(640));
    }
    assert_eq!(session.screen(), Screen::Playing(GameKind::FlappyBird));
}
