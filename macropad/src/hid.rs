//! HID reports and the transport they are written to.
use heapless::Vec;
use macropad_types::modifier::{HidModifiers, ModifierCombination};
use usbd_hid::descriptor::{KeyboardReport, MediaKeyboardReport};

pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Media keyboard report
    MediaKeyboardReport(MediaKeyboardReport),
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    BufferOverflow,
    Disabled,
    Other,
}

/// HidReporter trait is used for reporting HID messages to the host, eg. via the USB endpoint.
///
/// Reports written in sequence must be delivered in the same order.
pub trait HidReporter {
    /// Write report to the host, return the number of bytes written if success.
    fn write_report(&mut self, report: Report) -> Result<usize, HidError>;
}

impl<R: HidReporter> HidReporter for &mut R {
    fn write_report(&mut self, report: Report) -> Result<usize, HidError> {
        (**self).write_report(report)
    }
}

/// Number of keys in a boot keyboard report
const KEYBOARD_REPORT_KEYS: usize = 6;

/// Max number of keyboard actions held at the same time
const MAX_HELD_KEYS: usize = 8;

/// A keyboard action between its key down and key up
#[derive(Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    modifier: ModifierCombination,
    code: u8,
}

/// Keeps the held keyboard actions and writes a report on every change.
///
/// The report is rebuilt from all held actions, so a modifier stays set as long
/// as any held action carries it, and a code held by two actions stays until both
/// are released. Codes beyond the 6 report keys are held but not reported.
///
/// Write errors are logged and dropped, the key engine has no way to recover from them.
pub struct ReportWriter<R: HidReporter> {
    reporter: R,
    held: Vec<HeldKey, MAX_HELD_KEYS>,
}

impl<R: HidReporter> ReportWriter<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            held: Vec::new(),
        }
    }

    /// Press a keyboard key together with its modifiers
    pub fn key_down(&mut self, modifier: ModifierCombination, code: u8) {
        if self.held.push(HeldKey { modifier, code }).is_err() {
            warn!("Too many keys held, key {:#x} dropped", code);
        }
        self.send_keyboard_report();
    }

    /// Release a keyboard key together with its modifiers
    pub fn key_up(&mut self, modifier: ModifierCombination, code: u8) {
        let released = HeldKey { modifier, code };
        if let Some(pos) = self.held.iter().position(|k| *k == released) {
            self.held.remove(pos);
        }
        self.send_keyboard_report();
    }

    /// Press a key in the consumer page
    pub fn consumer_down(&mut self, code: u16) {
        self.send_report(Report::MediaKeyboardReport(MediaKeyboardReport { usage_id: code }));
    }

    /// Release the pressed consumer key
    pub fn consumer_up(&mut self, _code: u16) {
        self.send_report(Report::MediaKeyboardReport(MediaKeyboardReport { usage_id: 0 }));
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    fn send_keyboard_report(&mut self) {
        let mut modifiers = HidModifiers::new();
        let mut keycodes = [0u8; KEYBOARD_REPORT_KEYS];
        for key in self.held.iter() {
            modifiers |= key.modifier.to_hid_modifiers();
            if key.code == 0 || keycodes.contains(&key.code) {
                continue;
            }
            match keycodes.iter_mut().find(|k| **k == 0) {
                Some(slot) => *slot = key.code,
                None => debug!("Keyboard report is full, key {:#x} not reported", key.code),
            }
        }
        let report = KeyboardReport {
            modifier: modifiers.into_bits(),
            reserved: 0,
            leds: 0,
            keycodes,
        };
        self.send_report(Report::KeyboardReport(report));
    }

    fn send_report(&mut self, report: Report) {
        if let Err(e) = self.reporter.write_report(report) {
            warn!("Failed to send hid report: {:?}", e);
        }
    }
}
