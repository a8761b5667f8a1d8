//! Input pipeline tests: raw bytes through the queue and the translator.

use std::io::Cursor;
use std::time::{Duration, Instant};

use blockfall::core::GameState;
use blockfall::input::{InputCommand, InputQueue, InputTranslator, KeyBindings};
use blockfall::types::GameAction;

fn drain(queue: &InputQueue, expected: usize) -> Vec<u8> {
    let mut got = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    while got.len() < expected && Instant::now() < deadline {
        if let Some(b) = queue.pop_timeout(Duration::from_millis(20)) {
            got.push(b);
        }
    }
    got
}

#[test]
fn test_keystrokes_drive_the_game() {
    let queue = InputQueue::spawn(Cursor::new(b"aad ".to_vec())).unwrap();
    let translator = InputTranslator::default();
    let mut game = GameState::new(10, 20, 3);

    for byte in drain(&queue, 4) {
        if let Some(InputCommand::Action(action)) = translator.translate(byte) {
            game.apply_action(action);
        }
    }
    assert_eq!(game.pieces_locked(), 1);
}

#[test]
fn test_quit_byte_stops_before_later_input() {
    let queue = InputQueue::spawn(Cursor::new(vec![b'a', 3, b' '])).unwrap();
    let translator = InputTranslator::default();

    let mut seen = Vec::new();
    for byte in drain(&queue, 3) {
        match translator.translate(byte) {
            Some(InputCommand::Quit) => break,
            Some(InputCommand::Action(action)) => seen.push(action),
            None => {}
        }
    }
    assert_eq!(seen, vec![GameAction::MoveLeft]);
}

#[test]
fn test_bindings_file_changes_translation() {
    let bindings = KeyBindings::from_json(r#"{ "moveLeft": "j", "moveRight": "l", "hardDrop": 13 }"#).unwrap();
    let translator = InputTranslator::new(&bindings).unwrap();

    assert_eq!(translator.translate(b'j'), Some(InputCommand::Action(GameAction::MoveLeft)));
    assert_eq!(translator.translate(13), Some(InputCommand::Action(GameAction::HardDrop)));
    assert_eq!(translator.translate(b' '), None);
    assert_eq!(translator.translate(3), Some(InputCommand::Quit));
}

#[test]
fn test_empty_queue_does_not_block() {
    let (_tx, queue) = InputQueue::channel();
    let start = Instant::now();
    assert_eq!(queue.try_pop(), None);
    assert!(start.elapsed() < Duration::from_secs(1));
}
