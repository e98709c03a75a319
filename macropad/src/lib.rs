//! # Macropad
//!
//! Key configuration and input event engine of a small macropad with three
//! keys and a rotary encoder with a push switch.
//!
//! The key table is read once from storage at startup, see [`storage`]. Every
//! main loop iteration samples the inputs, dispatches the configured action on
//! each edge, triggers the encoder actions once per detent and drives the per
//! key LED feedback. USB, pin, LED, delay, watchdog and bootloader drivers are
//! provided by the board through `embedded-hal`, `smart-leds` and the traits in
//! [`hid`] and [`boot`].
//!
//! A board wires it up like this:
//!
//! ```ignore
//! let config = MacroPadConfig::default();
//! let mut feedback = Feedback::new(ws2812, config.feedback_config);
//! bootloader_gate(&mut key1, config.pin_config.low_active, &mut feedback, &mut bootloader);
//!
//! let mut store = ConfigStore::new(data_flash, &config.storage_config);
//! let keymap = KeyTable::load_or_inert(&mut store);
//! let keys = DirectPinKeys::new([key1, key2, key3, enc_sw], config.pin_config.low_active);
//! let knob = Knob::new(enc_a, enc_b, config.pin_config.low_active);
//! let dispatcher = ActionDispatcher::new(usb_hid, delay, config.behavior_config);
//! MacroPad::new(keymap, keys, knob, dispatcher, feedback, watchdog).run();
//! ```

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod boot;
pub mod config;
pub mod dispatcher;
pub mod feedback;
pub mod hid;
pub mod input;
pub mod key;
pub mod keymap;
pub mod knob;
pub mod macropad;
pub mod storage;

pub use boot::{Bootloader, Watchdog, bootloader_gate};
pub use config::MacroPadConfig;
pub use dispatcher::{ActionDispatcher, ActionEvent};
pub use feedback::Feedback;
pub use input::DirectPinKeys;
pub use keymap::{KeyDescriptor, KeyTable};
pub use knob::{Direction, Knob};
pub use macropad::MacroPad;
pub use macropad_types as types;
pub use storage::ConfigStore;
