use core::iter::once;

use macropad_types::slot::NUM_FEEDBACK_CHANNELS;
use smart_leds::{RGB8, SmartLedsWrite, brightness};

use crate::config::FeedbackConfig;
use crate::key::FeedbackSignal;

/// Per key LED feedback: flash on press, stay lit while held, fade after release.
///
/// Decay is one brightness step per call of [`Feedback::update`], which runs once
/// per main loop iteration. The fade-out time therefore depends on the iteration
/// time, including any macro or detent wait inside that iteration.
pub struct Feedback<L: SmartLedsWrite<Color = RGB8>> {
    leds: L,
    levels: [u8; NUM_FEEDBACK_CHANNELS],
    config: FeedbackConfig,
}

impl<L: SmartLedsWrite<Color = RGB8>> Feedback<L> {
    pub fn new(leds: L, config: FeedbackConfig) -> Self {
        Self {
            leds,
            levels: config.initial_levels,
            config,
        }
    }

    /// Apply a signal raised by the key of `channel`
    pub fn signal(&mut self, channel: usize, signal: FeedbackSignal) {
        match signal {
            FeedbackSignal::Activate => {
                if let Some(level) = self.levels.get_mut(channel) {
                    *level = self.config.max_brightness;
                }
            }
        }
    }

    /// Push current levels to the LEDs, then decay every channel by one towards the floor
    pub fn update(&mut self) {
        self.push();
        let floor = self.config.floor;
        for level in self.levels.iter_mut() {
            if *level > floor {
                *level -= 1;
            }
        }
    }

    pub fn levels(&self) -> [u8; NUM_FEEDBACK_CHANNELS] {
        self.levels
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    /// Light all pixels white at full brightness, used while the bootloader is entered
    pub fn all_on(&mut self) {
        let max = self.config.max_brightness;
        let white = RGB8::new(max, max, max);
        if self.leds.write([white; NUM_FEEDBACK_CHANNELS].iter().copied()).is_err() {
            warn!("Failed to write LEDs");
        }
    }

    fn push(&mut self) {
        let pixels = self
            .config
            .colors
            .iter()
            .zip(self.levels.iter())
            .flat_map(|(color, level)| brightness(once(*color), *level));
        if self.leds.write(pixels).is_err() {
            warn!("Failed to write LEDs");
        }
    }
}
