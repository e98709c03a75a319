use embedded_hal::digital::InputPin;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::feedback::Feedback;
use crate::input::is_active;

/// Jump into the USB bootloader of the chip
pub trait Bootloader {
    fn jump_to_bootloader(&mut self);
}

/// Watchdog supervising the main loop, fed once per completed iteration
pub trait Watchdog {
    fn feed(&mut self);
}

/// Jump to the RP2040 ROM USB bootloader
#[cfg(feature = "rp2040_bl")]
pub struct Rp2040Bootloader;

#[cfg(feature = "rp2040_bl")]
impl Bootloader for Rp2040Bootloader {
    fn jump_to_bootloader(&mut self) {
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }
}

/// Enter the bootloader if Key1 is held at power-on.
///
/// Must run before any other initialization. All LEDs are lit white while
/// the bootloader is entered. Returns false if Key1 isn't pressed.
pub fn bootloader_gate<P, L, B>(key1: &mut P, low_active: bool, feedback: &mut Feedback<L>, bootloader: &mut B) -> bool
where
    P: InputPin,
    L: SmartLedsWrite<Color = RGB8>,
    B: Bootloader,
{
    if !is_active(key1, low_active) {
        return false;
    }
    warn!("Key1 held at power-on, entering bootloader");
    feedback.all_on();
    bootloader.jump_to_bootloader();
    true
}
