use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Number of configurable slots.
pub const NUM_SLOTS: usize = 6;

/// Number of LED feedback channels, one per plain key.
pub const NUM_FEEDBACK_CHANNELS: usize = 3;

/// Physical input positions addressed by the configuration table.
///
/// The discriminant is both the index into the descriptor table and the
/// record number in storage.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    Key1 = 0,
    Key2 = 1,
    Key3 = 2,
    EncoderSwitch = 3,
    EncoderCw = 4,
    EncoderCcw = 5,
}

impl Slot {
    /// All slots in record order.
    pub const ALL: [Slot; NUM_SLOTS] = [
        Slot::Key1,
        Slot::Key2,
        Slot::Key3,
        Slot::EncoderSwitch,
        Slot::EncoderCw,
        Slot::EncoderCcw,
    ];

    /// Slots which are sampled as buttons, in scan order.
    pub const BUTTONS: [Slot; 4] = [Slot::Key1, Slot::Key2, Slot::Key3, Slot::EncoderSwitch];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// LED feedback channel of this slot, only the three plain keys have one.
    pub const fn feedback_channel(self) -> Option<usize> {
        match self {
            Slot::Key1 => Some(0),
            Slot::Key2 => Some(1),
            Slot::Key3 => Some(2),
            _ => None,
        }
    }
}
