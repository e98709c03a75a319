//! Edge detection of the button-like slots.
use embedded_hal::delay::DelayNs;

use crate::dispatcher::{ActionDispatcher, ActionEvent};
use crate::hid::HidReporter;
use crate::keymap::KeyDescriptor;

/// Raised by a key when its LED should be at full brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackSignal {
    Activate,
}

impl KeyDescriptor {
    /// Process one debounced sample of the input of this slot.
    ///
    /// The action is dispatched once per edge: holding the input never repeats it.
    /// Returns [`FeedbackSignal::Activate`] on press and on every sample while held,
    /// the caller drops it for slots without a LED.
    ///
    /// Releasing a macro slot blocks for the macro cooldown before returning.
    pub fn on_sample<R: HidReporter, D: DelayNs>(
        &mut self,
        pressed: bool,
        dispatcher: &mut ActionDispatcher<R, D>,
    ) -> Option<FeedbackSignal> {
        if pressed != self.pressed {
            self.pressed = pressed;
            if pressed {
                dispatcher.dispatch(self.action(), ActionEvent::Press);
                Some(FeedbackSignal::Activate)
            } else {
                dispatcher.dispatch(self.action(), ActionEvent::Release);
                if self.action().is_macro() {
                    let cooldown = dispatcher.behavior().macro_cooldown_ms;
                    dispatcher.delay_ms(cooldown);
                }
                None
            }
        } else if self.pressed {
            Some(FeedbackSignal::Activate)
        } else {
            None
        }
    }
}
