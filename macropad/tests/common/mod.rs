#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use macropad::boot::Watchdog;
use macropad::config::{BehaviorConfig, FeedbackConfig};
use macropad::hid::{HidError, HidReporter, Report};
use macropad::{ActionDispatcher, DirectPinKeys, Feedback, KeyTable, Knob, MacroPad};
use smart_leds::{RGB8, SmartLedsWrite};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const NONE: u8 = 0;
pub const KC_LCTRL: u8 = 1 << 0;
pub const KC_LSHIFT: u8 = 1 << 1;
pub const KC_LALT: u8 = 1 << 2;

/// Everything the engine did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Keyboard report: modifier, keycodes
    Keyboard(u8, [u8; 6]),
    /// Media report: usage id
    Media(u16),
    /// Delay in ns
    Delay(u64),
}

pub type Log = Rc<RefCell<Vec<Record>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Keyboard report with a single key
pub fn kb(modifier: u8, code: u8) -> Record {
    Record::Keyboard(modifier, [code, 0, 0, 0, 0, 0])
}

/// Empty keyboard report
pub fn kb_empty() -> Record {
    Record::Keyboard(0, [0; 6])
}

pub fn media(usage_id: u16) -> Record {
    Record::Media(usage_id)
}

pub fn ms(ms: u64) -> Record {
    Record::Delay(ms * 1_000_000)
}

pub fn us(us: u64) -> Record {
    Record::Delay(us * 1_000)
}

/// All records except delays
pub fn reports(log: &Log) -> Vec<Record> {
    log.borrow().iter().copied().filter(|r| !matches!(r, Record::Delay(_))).collect()
}

/// Sum of all delays in ns
pub fn elapsed_ns(records: &[Record]) -> u64 {
    records
        .iter()
        .map(|r| match r {
            Record::Delay(ns) => *ns,
            _ => 0,
        })
        .sum()
}

pub struct RecordingReporter {
    log: Log,
}

impl HidReporter for RecordingReporter {
    fn write_report(&mut self, report: Report) -> Result<usize, HidError> {
        let record = match report {
            Report::KeyboardReport(r) => Record::Keyboard(r.modifier, r.keycodes),
            Report::MediaKeyboardReport(r) => Record::Media(r.usage_id),
        };
        self.log.borrow_mut().push(record);
        Ok(8)
    }
}

pub struct RecordingDelay {
    log: Log,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Record::Delay(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Record::Delay(us as u64 * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Record::Delay(ms as u64 * 1_000_000));
    }
}

pub type TestDispatcher = ActionDispatcher<RecordingReporter, RecordingDelay>;

pub fn create_dispatcher(log: &Log) -> TestDispatcher {
    ActionDispatcher::new(
        RecordingReporter { log: log.clone() },
        RecordingDelay { log: log.clone() },
        BehaviorConfig::default(),
    )
}

#[derive(Default)]
pub struct MockLeds {
    pub frames: Vec<Vec<RGB8>>,
}

impl SmartLedsWrite for MockLeds {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: Iterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.frames.push(iterator.map(Into::into).collect());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockWatchdog {
    pub feeds: usize,
}

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

/// Brightness 10, floor 0, all LEDs off at power-on
pub fn feedback_config() -> FeedbackConfig {
    FeedbackConfig {
        max_brightness: 10,
        floor: 0,
        initial_levels: [0; 3],
        ..Default::default()
    }
}

fn level(active: bool) -> State {
    // Inputs are low active
    if active { State::Low } else { State::High }
}

/// Pin expectations of a whole macropad run.
///
/// `ticks` is the pressed state of Key1, Key2, Key3 and the encoder switch per
/// iteration. The encoder stays at rest.
pub struct TestPins {
    pub keys: [PinMock; 4],
    pub enc_a: PinMock,
    pub enc_b: PinMock,
}

impl TestPins {
    pub fn new(ticks: &[[bool; 4]]) -> Self {
        let keys = core::array::from_fn(|i| {
            let expectations: Vec<PinTransaction> =
                ticks.iter().map(|t| PinTransaction::get(level(t[i]))).collect();
            PinMock::new(&expectations)
        });
        let enc_a: Vec<PinTransaction> = ticks.iter().map(|_| PinTransaction::get(State::High)).collect();
        Self {
            keys,
            enc_a: PinMock::new(&enc_a),
            enc_b: PinMock::new(&[]),
        }
    }

    pub fn done(&mut self) {
        for key in self.keys.iter_mut() {
            key.done();
        }
        self.enc_a.done();
        self.enc_b.done();
    }
}

pub type TestMacroPad =
    MacroPad<PinMock, PinMock, PinMock, RecordingReporter, RecordingDelay, MockLeds, MockWatchdog>;

pub fn create_test_macropad(keymap: KeyTable, pins: &TestPins, log: &Log) -> TestMacroPad {
    MacroPad::new(
        keymap,
        DirectPinKeys::new(pins.keys.clone(), true),
        Knob::new(pins.enc_a.clone(), pins.enc_b.clone(), true),
        create_dispatcher(log),
        Feedback::new(MockLeds::default(), feedback_config()),
        MockWatchdog::default(),
    )
}
