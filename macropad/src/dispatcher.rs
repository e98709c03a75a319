use embedded_hal::delay::DelayNs;
use macropad_types::action::KeyAction;
use macropad_types::modifier::ModifierCombination;

use crate::config::BehaviorConfig;
use crate::hid::{HidReporter, ReportWriter};

/// Event which drives an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionEvent {
    /// The input became active
    Press,
    /// The input became inactive
    Release,
    /// Press immediately followed by release, for inputs without a natural release such as a detent
    Trigger,
}

/// Turns actions into HID reports.
///
/// The dispatcher keeps no state about actions, it owns the HID writer and the
/// delay provider used by every blocking wait of the engine.
pub struct ActionDispatcher<R: HidReporter, D: DelayNs> {
    writer: ReportWriter<R>,
    delay: D,
    behavior: BehaviorConfig,
}

impl<R: HidReporter, D: DelayNs> ActionDispatcher<R, D> {
    pub fn new(reporter: R, delay: D, behavior: BehaviorConfig) -> Self {
        Self {
            writer: ReportWriter::new(reporter),
            delay,
            behavior,
        }
    }

    pub fn behavior(&self) -> &BehaviorConfig {
        &self.behavior
    }

    /// Emit the reports of `action` for `event`.
    ///
    /// A macro plays all of its steps before returning.
    pub fn dispatch(&mut self, action: &KeyAction, event: ActionEvent) {
        debug!("Dispatch {:?} on {:?}", action, event);
        match action {
            KeyAction::Keyboard { modifier, code } => match event {
                ActionEvent::Press => self.writer.key_down(*modifier, *code),
                ActionEvent::Release => self.writer.key_up(*modifier, *code),
                ActionEvent::Trigger => {
                    self.writer.key_down(*modifier, *code);
                    self.writer.key_up(*modifier, *code);
                }
            },
            KeyAction::Consumer(code) => match event {
                ActionEvent::Press => self.writer.consumer_down(*code),
                ActionEvent::Release => self.writer.consumer_up(*code),
                ActionEvent::Trigger => {
                    self.writer.consumer_down(*code);
                    self.writer.consumer_up(*code);
                }
            },
            KeyAction::Macro(steps) => match event {
                ActionEvent::Press | ActionEvent::Trigger => self.play_macro(steps),
                // Macros fire on press only
                ActionEvent::Release => (),
            },
        }
    }

    fn play_macro(&mut self, steps: &[u8]) {
        let step_delay = self.behavior.macro_step_delay_ms;
        for code in steps {
            self.writer.key_down(ModifierCombination::new(), *code);
            self.delay.delay_ms(step_delay);
            self.writer.key_up(ModifierCombination::new(), *code);
            self.delay.delay_ms(step_delay);
        }
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
