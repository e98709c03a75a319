//! Key actions stored in the configuration table.
//!
//! Every physical input slot carries exactly one [`KeyAction`]. The stored
//! record starts with an [`ActionKind`] tag which selects the payload shape,
//! so a keyboard action can never be read as a consumer code or a macro.

use heapless::Vec;
use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::ModifierCombination;

/// Max number of steps of a macro.
pub const MACRO_MAX_LEN: usize = 10;

/// Key codes of a macro, played in order.
pub type MacroSequence = Vec<u8, MACRO_MAX_LEN>;

/// Type tag of a stored record
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionKind {
    Keyboard = 0,
    Consumer = 1,
    Macro = 2,
}

/// The action bound to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// A keyboard/keypad key with optional modifiers, held as long as the input is held.
    Keyboard { modifier: ModifierCombination, code: u8 },
    /// A key in the hid consumer page, such as media keys.
    Consumer(u16),
    /// A sequence of unmodified taps, played once per press.
    Macro(MacroSequence),
}

impl KeyAction {
    /// A macro without steps, which never emits anything.
    pub const fn inert() -> Self {
        KeyAction::Macro(Vec::new())
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            KeyAction::Keyboard { .. } => ActionKind::Keyboard,
            KeyAction::Consumer(_) => ActionKind::Consumer,
            KeyAction::Macro(_) => ActionKind::Macro,
        }
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, KeyAction::Macro(_))
    }
}
