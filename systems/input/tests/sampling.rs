use glam::Vec2;
use migration_core::{Direction, Intent};
use migration_system_input::{InputManager, Key};

#[test]
fn idle_input_samples_empty_intent() {
    let mut input = InputManager::default();
    assert_eq!(input.sample(), Intent::default());
}

#[test]
fn latest_held_direction_wins() {
    let mut input = InputManager::default();
    input.press(Key::Up);
    input.press(Key::Right);
    assert_eq!(input.sample().direction, Some(Direction::East));

    input.release(Key::Right);
    assert_eq!(input.sample().direction, Some(Direction::North));

    input.release(Key::Up);
    assert_eq!(input.sample().direction, None);
}

#[test]
fn directions_are_level_triggered() {
    let mut input = InputManager::default();
    input.press(Key::Left);
    for _ in 0..5 {
        assert_eq!(input.sample().direction, Some(Direction::West));
    }
}

#[test]
fn actions_fire_once_per_press() {
    let mut input = InputManager::default();
    input.press(Key::TailSlap);
    input.press(Key::TailSlap);
    assert!(input.sample().tail_slap);
    assert!(!input.sample().tail_slap);

    input.press(Key::TailSlap);
    assert!(!input.sample().tail_slap, "held key must not re-latch");

    input.release(Key::TailSlap);
    input.press(Key::TailSlap);
    assert!(input.sample().tail_slap);
}

#[test]
fn actions_are_independent() {
    let mut input = InputManager::default();
    input.press(Key::Echolocate);
    input.press(Key::Pause);
    let intent = input.sample();
    assert!(intent.echolocate);
    assert!(intent.pause);
    assert!(!intent.tail_slap);
}

#[test]
fn press_between_samples_is_not_lost() {
    let mut input = InputManager::default();
    input.press(Key::Echolocate);
    input.release(Key::Echolocate);
    assert!(input.sample().echolocate);
}

#[test]
fn drags_steer_past_the_deadzone() {
    let mut input = InputManager::new(20.0);
    input.touch_start(Vec2::new(100.0, 100.0));
    input.touch_move(Vec2::new(110.0, 104.0));
    assert_eq!(input.sample().direction, None);

    input.touch_move(Vec2::new(100.0, 60.0));
    assert_eq!(input.sample().direction, Some(Direction::North));

    input.press(Key::Down);
    assert_eq!(input.sample().direction, Some(Direction::South));
}

#[test]
fn taps_latch_a_tail_slap() {
    let mut input = InputManager::default();
    input.touch_start(Vec2::new(10.0, 10.0));
    input.touch_end();
    let intent = input.sample();
    assert!(intent.tail_slap);
    assert_eq!(intent.direction, None);

    input.touch_start(Vec2::new(10.0, 10.0));
    input.touch_move(Vec2::new(200.0, 10.0));
    input.touch_end();
    assert!(!input.sample().tail_slap);
}

#[test]
fn clear_drops_everything() {
    let mut input = InputManager::default();
    input.press(Key::Up);
    input.register_echolocate();
    input.register_pause();
    input.touch_start(Vec2::ZERO);
    input.clear();
    assert_eq!(input.sample(), Intent::default());
}
