//! Rotary encoder of the macropad.
//!
//! A detent starts when phase A becomes active. Phase B is sampled once at that
//! moment to get the direction, then the action of the direction slot is
//! triggered and the knob waits until phase A is inactive again.
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use macropad_types::slot::Slot;

use crate::dispatcher::{ActionDispatcher, ActionEvent};
use crate::hid::HidReporter;
use crate::input::is_active;
use crate::keymap::KeyTable;

/// The encoder direction is either `Clockwise` or `CounterClockwise`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// A clockwise turn
    Clockwise,
    /// A counterclockwise turn
    CounterClockwise,
}

impl Direction {
    /// The slot whose action is triggered for this direction
    pub fn slot(self) -> Slot {
        match self {
            Direction::Clockwise => Slot::EncoderCw,
            Direction::CounterClockwise => Slot::EncoderCcw,
        }
    }
}

/// Holds both phase pins of the encoder
pub struct Knob<A: InputPin, B: InputPin> {
    pin_a: A,
    pin_b: B,
    /// Active level of phase A
    low_active: bool,
}

impl<A: InputPin, B: InputPin> Knob<A, B> {
    pub fn new(pin_a: A, pin_b: B, low_active: bool) -> Self {
        Self {
            pin_a,
            pin_b,
            low_active,
        }
    }

    /// Check for a detent and handle it.
    ///
    /// Returns the direction of the handled detent, `None` if phase A is inactive.
    /// When a detent is found this blocks until phase A is inactive, polling it every
    /// `detent_poll_us`, so a detent triggers exactly one action however long it lasts.
    pub fn poll<R: HidReporter, D: DelayNs>(
        &mut self,
        keymap: &KeyTable,
        dispatcher: &mut ActionDispatcher<R, D>,
    ) -> Option<Direction> {
        if !is_active(&mut self.pin_a, self.low_active) {
            return None;
        }

        // Phase B reads high on a clockwise turn
        let direction = if self.pin_b.is_high().ok().unwrap_or_default() {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        debug!("Knob turned: {:?}", direction);

        dispatcher.dispatch(keymap.action(direction.slot()), ActionEvent::Trigger);

        let behavior = *dispatcher.behavior();
        dispatcher.delay_ms(behavior.knob_settle_ms);
        while is_active(&mut self.pin_a, self.low_active) {
            dispatcher.delay_us(behavior.detent_poll_us);
        }

        Some(direction)
    }
}
