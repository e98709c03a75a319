use macropad_types::slot::NUM_FEEDBACK_CHANNELS;
use smart_leds::RGB8;

/// The config struct for the macropad.
///
/// All values are fixed at build time. Only the key table itself is read from
/// storage at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroPadConfig {
    pub storage_config: StorageConfig,
    pub behavior_config: BehaviorConfig,
    pub feedback_config: FeedbackConfig,
    pub pin_config: PinConfig,
}

/// Config for storage
#[derive(Clone, Copy, Debug, Default)]
pub struct StorageConfig {
    /// Address of the first record of the key table in the storage device.
    pub start_addr: u32,
}

/// Timing of actions and of the main loop
#[derive(Clone, Copy, Debug)]
pub struct BehaviorConfig {
    /// Wait in ms after each key down and each key up of a macro step
    pub macro_step_delay_ms: u32,
    /// Wait in ms after a macro slot is released, so the macro can't re-trigger from chatter
    pub macro_cooldown_ms: u32,
    /// Wait in ms after a knob dispatch, before waiting for the detent to clear
    pub knob_settle_ms: u32,
    /// Poll step in us while waiting for the detent to clear
    pub detent_poll_us: u32,
    /// Wait in ms at the end of every main loop iteration, for latching and debouncing
    pub scan_interval_ms: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            macro_step_delay_ms: 5,
            macro_cooldown_ms: 50,
            knob_settle_ms: 10,
            detent_poll_us: 100,
            scan_interval_ms: 5,
        }
    }
}

/// Config for the per key LED feedback.
///
/// Decay runs once per main loop iteration, so the fade-out time is
/// `(max_brightness - floor) * iteration time`, not a wall clock duration.
#[derive(Clone, Copy, Debug)]
pub struct FeedbackConfig {
    /// Brightness set on press and kept while held
    pub max_brightness: u8,
    /// Brightness never decays below this value
    pub floor: u8,
    /// Brightness of each channel at power-on
    pub initial_levels: [u8; NUM_FEEDBACK_CHANNELS],
    /// Color of each channel at full brightness
    pub colors: [RGB8; NUM_FEEDBACK_CHANNELS],
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_brightness: 127,
            floor: 0,
            initial_levels: [0, 127, 0],
            colors: [RGB8::new(255, 0, 0), RGB8::new(0, 255, 0), RGB8::new(0, 0, 255)],
        }
    }
}

/// Config for input pins
#[derive(Clone, Copy, Debug)]
pub struct PinConfig {
    /// Inputs read low when active, eg. switches to ground with pull-ups
    pub low_active: bool,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self { low_active: true }
    }
}
