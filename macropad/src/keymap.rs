use embedded_storage::ReadStorage;
use macropad_types::action::KeyAction;
use macropad_types::slot::{NUM_SLOTS, Slot};

use crate::storage::{ConfigDecodeError, ConfigStore, StorageError, decode_table};

/// Action of a slot, together with the last observed state of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyDescriptor {
    action: KeyAction,
    /// Last observed logical state, true when pressed.
    /// Only written by the key state machine of this slot.
    pub(crate) pressed: bool,
}

impl KeyDescriptor {
    pub fn new(action: KeyAction) -> Self {
        Self { action, pressed: false }
    }

    pub fn action(&self) -> &KeyAction {
        &self.action
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Descriptors of all slots, indexed by [`Slot`].
///
/// Built once at startup and never reloaded, the actions are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    descriptors: [KeyDescriptor; NUM_SLOTS],
}

impl KeyTable {
    pub fn new(actions: [KeyAction; NUM_SLOTS]) -> Self {
        Self {
            descriptors: actions.map(KeyDescriptor::new),
        }
    }

    /// A table that never emits anything
    pub fn inert() -> Self {
        Self::new(core::array::from_fn(|_| KeyAction::inert()))
    }

    /// Decode the table from a byte reader, addresses are relative to the start of the table
    pub fn decode(read: impl FnMut(u32) -> u8) -> Result<Self, ConfigDecodeError> {
        decode_table(read).map(Self::new)
    }

    pub fn load<F: ReadStorage>(store: &mut ConfigStore<F>) -> Result<Self, StorageError<F::Error>> {
        store.load().map(Self::new)
    }

    /// Load the table, falling back to the inert table if the stored one is unreadable or invalid.
    ///
    /// An invalid table is never used partially.
    pub fn load_or_inert<F: ReadStorage>(store: &mut ConfigStore<F>) -> Self {
        match Self::load(store) {
            Ok(table) => {
                info!("Key table loaded");
                table
            }
            Err(StorageError::Read(_)) => {
                error!("Failed to read key table from storage");
                warn!("Using inert key table");
                Self::inert()
            }
            Err(StorageError::AddressOverflow) => {
                error!("Key table address overflows");
                warn!("Using inert key table");
                Self::inert()
            }
            Err(StorageError::Decode(e)) => {
                error!("Invalid key table: {:?}", e);
                warn!("Using inert key table");
                Self::inert()
            }
        }
    }

    pub fn get(&self, slot: Slot) -> &KeyDescriptor {
        &self.descriptors[slot.index()]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut KeyDescriptor {
        &mut self.descriptors[slot.index()]
    }

    pub fn action(&self, slot: Slot) -> &KeyAction {
        self.get(slot).action()
    }
}
