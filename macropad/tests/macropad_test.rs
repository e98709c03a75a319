mod common;

use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use heapless::Vec;
use macropad::boot::{Bootloader, bootloader_gate};
use macropad::config::StorageConfig;
use macropad::storage::TABLE_SIZE;
use macropad::storage::mem_storage::MemStorage;
use macropad::types::action::KeyAction;
use macropad::types::modifier::CTRL;
use macropad::{ConfigStore, Feedback, KeyTable};
use smart_leds::RGB8;

pub(crate) use crate::common::*;

const P: bool = true;
const R: bool = false;

/// Key1: Ctrl+A(65), Key2: volume up, Key3: macro, switch: play/pause
fn stored_table() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    table[0..3].copy_from_slice(&[0, 1, 65]);
    table[12..15].copy_from_slice(&[1, 0xE9, 0x00]);
    table[24..28].copy_from_slice(&[2, 2, 0x04, 0x05]);
    table[36..39].copy_from_slice(&[1, 0xCD, 0x00]);
    table[48..51].copy_from_slice(&[1, 0xE9, 0x00]);
    table[60..63].copy_from_slice(&[1, 0xEA, 0x00]);
    table
}

fn load_keymap() -> KeyTable {
    let mut store = ConfigStore::new(MemStorage::<TABLE_SIZE>::from_bytes(stored_table()), &StorageConfig::default());
    KeyTable::load_or_inert(&mut store)
}

#[test]
fn test_keymap_from_storage() {
    let keymap = load_keymap();
    assert_eq!(
        keymap,
        KeyTable::new([
            KeyAction::Keyboard { modifier: CTRL, code: 65 },
            KeyAction::Consumer(0xE9),
            KeyAction::Macro(Vec::from_slice(&[0x04, 0x05]).unwrap()),
            KeyAction::Consumer(0xCD),
            KeyAction::Consumer(0xE9),
            KeyAction::Consumer(0xEA),
        ])
    );
}

#[test]
fn test_key1_press_and_release() {
    let log = new_log();
    let mut pins = TestPins::new(&[[P, R, R, R], [R, R, R, R]]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    macropad.tick();
    macropad.tick();

    assert_eq!(reports(&log), [kb(KC_LCTRL, 65), kb_empty()]);
    pins.done();
}

#[test]
fn test_hold_over_ticks() {
    let log = new_log();
    let mut pins = TestPins::new(&[[R, P, R, R], [R, P, R, R], [R, P, R, R], [R, P, R, R], [R, P, R, R], [R, R, R, R]]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    for _ in 0..6 {
        macropad.tick();
    }

    assert_eq!(reports(&log), [media(0xE9), media(0)]);
    pins.done();
}

#[test]
fn test_macro_key_over_ticks() {
    let log = new_log();
    let mut pins = TestPins::new(&[[R, R, P, R], [R, R, R, R], [R, R, P, R]]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    macropad.tick();
    macropad.tick();
    macropad.tick();

    assert_eq!(
        *log.borrow(),
        [
            // Press
            kb(NONE, 0x04),
            ms(5),
            kb_empty(),
            ms(5),
            kb(NONE, 0x05),
            ms(5),
            kb_empty(),
            ms(5),
            ms(5),
            // Release
            ms(50),
            ms(5),
            // Press again
            kb(NONE, 0x04),
            ms(5),
            kb_empty(),
            ms(5),
            kb(NONE, 0x05),
            ms(5),
            kb_empty(),
            ms(5),
            ms(5),
        ]
    );
    pins.done();
}

#[test]
fn test_keys_scanned_in_order() {
    let log = new_log();
    let mut pins = TestPins::new(&[[P, P, R, P], [R, R, R, R]]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    macropad.tick();
    macropad.tick();

    assert_eq!(
        reports(&log),
        [kb(KC_LCTRL, 65), media(0xE9), media(0xCD), kb_empty(), media(0), media(0)]
    );
    pins.done();
}

#[test]
fn test_inert_table_emits_nothing() {
    let log = new_log();
    let mut erased = ConfigStore::new(MemStorage::<TABLE_SIZE>::new(), &StorageConfig::default());
    let keymap = KeyTable::load_or_inert(&mut erased);
    let mut pins = TestPins::new(&[[P, P, P, P], [P, P, P, P], [R, R, R, R]]);
    let mut macropad = create_test_macropad(keymap, &pins, &log);

    for _ in 0..3 {
        macropad.tick();
    }

    assert!(reports(&log).is_empty());
    pins.done();
}

#[test]
fn test_feedback_flash_and_decay() {
    let log = new_log();
    let mut pins = TestPins::new(&[
        [P, R, R, R],
        [P, R, R, R],
        [R, R, R, R],
        [R, R, R, R],
        [R, R, R, R],
    ]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    // Levels are pushed before they decay
    macropad.tick();
    assert_eq!(macropad.feedback().levels(), [9, 0, 0]);
    macropad.tick();
    assert_eq!(macropad.feedback().levels(), [9, 0, 0]);
    macropad.tick();
    assert_eq!(macropad.feedback().levels(), [8, 0, 0]);
    macropad.tick();
    macropad.tick();
    assert_eq!(macropad.feedback().levels(), [6, 0, 0]);

    let frames = &macropad.feedback().leds().frames;
    assert_eq!(frames.len(), 5);
    // Red channel at full brightness on press, then fading
    assert_eq!(frames[0][0], RGB8::new(10, 0, 0));
    assert_eq!(frames[1][0], RGB8::new(10, 0, 0));
    assert_eq!(frames[2][0], RGB8::new(9, 0, 0));
    assert_eq!(frames[0][1], RGB8::default());
    pins.done();
}

#[test]
fn test_encoder_switch_has_no_led() {
    let log = new_log();
    let mut pins = TestPins::new(&[[R, R, R, P], [R, R, R, R]]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    macropad.tick();
    macropad.tick();

    assert_eq!(macropad.feedback().levels(), [0, 0, 0]);
    assert_eq!(reports(&log), [media(0xCD), media(0)]);
    pins.done();
}

#[test]
fn test_watchdog_fed_every_tick() {
    let log = new_log();
    let mut pins = TestPins::new(&[[R, R, R, R]; 4]);
    let mut macropad = create_test_macropad(load_keymap(), &pins, &log);

    for n in 1..=4 {
        macropad.tick();
        assert_eq!(macropad.watchdog().feeds, n);
    }
    // Each iteration waits the scan interval
    assert_eq!(*log.borrow(), [ms(5); 4]);
    pins.done();
}

#[derive(Default)]
struct MockBootloader {
    jumped: bool,
}

impl Bootloader for MockBootloader {
    fn jump_to_bootloader(&mut self) {
        self.jumped = true;
    }
}

#[test]
fn test_bootloader_gate() {
    let mut key1 = PinMock::new(&[PinTransaction::get(State::Low)]);
    let mut feedback = Feedback::new(MockLeds::default(), feedback_config());
    let mut bootloader = MockBootloader::default();

    assert!(bootloader_gate(&mut key1.clone(), true, &mut feedback, &mut bootloader));
    assert!(bootloader.jumped);
    assert_eq!(feedback.leds().frames, [vec![RGB8::new(10, 10, 10); 3]]);
    key1.done();
}

#[test]
fn test_bootloader_gate_released() {
    let mut key1 = PinMock::new(&[PinTransaction::get(State::High)]);
    let mut feedback = Feedback::new(MockLeds::default(), feedback_config());
    let mut bootloader = MockBootloader::default();

    assert!(!bootloader_gate(&mut key1.clone(), true, &mut feedback, &mut bootloader));
    assert!(!bootloader.jumped);
    assert!(feedback.leds().frames.is_empty());
    key1.done();
}
