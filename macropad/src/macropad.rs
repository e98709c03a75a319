use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use macropad_types::slot::Slot;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::boot::Watchdog;
use crate::dispatcher::ActionDispatcher;
use crate::feedback::Feedback;
use crate::hid::HidReporter;
use crate::input::DirectPinKeys;
use crate::keymap::KeyTable;
use crate::knob::Knob;

/// Number of button-like inputs: three keys and the encoder switch
pub const NUM_BUTTONS: usize = Slot::BUTTONS.len();

/// The macropad main loop.
///
/// Owns the key table and every collaborator. Each iteration scans Key1, Key2,
/// Key3 and the encoder switch in this order, then the knob, then updates the
/// LEDs, waits the scan interval and feeds the watchdog.
pub struct MacroPad<In, A, B, R, D, L, W>
where
    In: InputPin,
    A: InputPin,
    B: InputPin,
    R: HidReporter,
    D: DelayNs,
    L: SmartLedsWrite<Color = RGB8>,
    W: Watchdog,
{
    keymap: KeyTable,
    keys: DirectPinKeys<In, NUM_BUTTONS>,
    knob: Knob<A, B>,
    dispatcher: ActionDispatcher<R, D>,
    feedback: Feedback<L>,
    watchdog: W,
}

impl<In, A, B, R, D, L, W> MacroPad<In, A, B, R, D, L, W>
where
    In: InputPin,
    A: InputPin,
    B: InputPin,
    R: HidReporter,
    D: DelayNs,
    L: SmartLedsWrite<Color = RGB8>,
    W: Watchdog,
{
    pub fn new(
        keymap: KeyTable,
        keys: DirectPinKeys<In, NUM_BUTTONS>,
        knob: Knob<A, B>,
        dispatcher: ActionDispatcher<R, D>,
        feedback: Feedback<L>,
        watchdog: W,
    ) -> Self {
        Self {
            keymap,
            keys,
            knob,
            dispatcher,
            feedback,
            watchdog,
        }
    }

    /// Run one iteration of the main loop.
    ///
    /// Macros, the macro cooldown and detents block inside the iteration, so a
    /// long macro delays the scan of the following inputs and the watchdog feed.
    pub fn tick(&mut self) {
        for (idx, slot) in Slot::BUTTONS.iter().enumerate() {
            // Each input is sampled right before it's handled
            let pressed = self.keys.is_pressed(idx);
            let signal = self.keymap.get_mut(*slot).on_sample(pressed, &mut self.dispatcher);
            if let (Some(signal), Some(channel)) = (signal, slot.feedback_channel()) {
                self.feedback.signal(channel, signal);
            }
        }

        self.knob.poll(&self.keymap, &mut self.dispatcher);

        self.feedback.update();
        let scan_interval = self.dispatcher.behavior().scan_interval_ms;
        self.dispatcher.delay_ms(scan_interval);
        self.watchdog.feed();
    }

    /// Run the main loop forever
    pub fn run(&mut self) -> ! {
        info!("Macropad main loop started");
        loop {
            self.tick();
        }
    }

    pub fn keymap(&self) -> &KeyTable {
        &self.keymap
    }

    pub fn feedback(&self) -> &Feedback<L> {
        &self.feedback
    }

    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }
}
