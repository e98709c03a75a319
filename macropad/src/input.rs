use embedded_hal::digital::InputPin;

/// Read the logical state of a pin, a failed read counts as inactive.
pub(crate) fn is_active<P: InputPin>(pin: &mut P, low_active: bool) -> bool {
    if low_active {
        pin.is_low().ok().unwrap_or_default()
    } else {
        pin.is_high().ok().unwrap_or_default()
    }
}

/// Button inputs wired directly to pins, one pin per slot.
///
/// The pins are expected to be debounced by the scan interval of the main loop.
pub struct DirectPinKeys<In: InputPin, const N: usize> {
    pins: [In; N],
    /// Pin active level
    low_active: bool,
}

impl<In: InputPin, const N: usize> DirectPinKeys<In, N> {
    pub fn new(pins: [In; N], low_active: bool) -> Self {
        Self { pins, low_active }
    }

    /// Sample a single pin
    pub fn is_pressed(&mut self, idx: usize) -> bool {
        let low_active = self.low_active;
        self.pins.get_mut(idx).map(|pin| is_active(pin, low_active)).unwrap_or_default()
    }
}
