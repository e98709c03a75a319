//! Persisted key table.
//!
//! The table is a fixed block of [`NUM_SLOTS`] records, [`RECORD_SIZE`] bytes
//! each, record `i` at `start_addr + i * RECORD_SIZE`:
//!
//! | offset | keyboard (tag 0) | consumer (tag 1) | macro (tag 2) |
//! | --- | --- | --- | --- |
//! | 0 | 0 | 1 | 2 |
//! | 1 | modifier | consumer code, low byte | macro length |
//! | 2 | key code | unused | step 0 code |
//! | 3..=11 | unused | unused | step 1..=9 codes |
//!
//! Unused bytes are never read back.
pub mod mem_storage;

use core::fmt::{self, Debug, Display};

use embedded_storage::ReadStorage;
use heapless::Vec;
use macropad_types::action::{ActionKind, KeyAction, MACRO_MAX_LEN};
use macropad_types::modifier::ModifierCombination;
use macropad_types::slot::{NUM_SLOTS, Slot};

use crate::config::StorageConfig;

/// Size of a single record
pub const RECORD_SIZE: usize = 12;

/// Size of the whole key table
pub const TABLE_SIZE: usize = RECORD_SIZE * NUM_SLOTS;

/// A stored record which can't be turned into a [`KeyAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigDecodeError {
    /// The type tag is none of keyboard, consumer or macro
    UnknownKind { slot: Slot, tag: u8 },
    /// The macro has more steps than a record can hold
    MacroTooLong { slot: Slot, len: u8 },
}

impl Display for ConfigDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigDecodeError::UnknownKind { slot, tag } => {
                write!(f, "unknown action kind {:#04x} in record {}", tag, slot.index())
            }
            ConfigDecodeError::MacroTooLong { slot, len } => write!(
                f,
                "macro length {} in record {} exceeds {}",
                len,
                slot.index(),
                MACRO_MAX_LEN
            ),
        }
    }
}

/// Error of loading the key table from a storage device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError<E> {
    Read(E),
    /// The table doesn't fit in the 32-bit address space after `start_addr`
    AddressOverflow,
    Decode(ConfigDecodeError),
}

impl<E> From<ConfigDecodeError> for StorageError<E> {
    fn from(e: ConfigDecodeError) -> Self {
        StorageError::Decode(e)
    }
}

impl<E: Debug> Display for StorageError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read(e) => write!(f, "storage read failed: {:?}", e),
            StorageError::AddressOverflow => write!(f, "key table address overflows"),
            StorageError::Decode(e) => write!(f, "invalid key table: {}", e),
        }
    }
}

/// Decode the record of `slot`.
///
/// `read` gets the offset within the record and returns the stored byte.
pub fn decode_record(slot: Slot, mut read: impl FnMut(usize) -> u8) -> Result<KeyAction, ConfigDecodeError> {
    let tag = read(0);
    let kind = ActionKind::from_repr(tag).ok_or(ConfigDecodeError::UnknownKind { slot, tag })?;
    let action = match kind {
        ActionKind::Keyboard => {
            let stored = read(1);
            let modifier = ModifierCombination::from_stored(stored);
            if modifier.into_bits() != stored {
                warn!("Unsupported modifier bits {:#x} in record {} are ignored", stored, slot.index());
            }
            KeyAction::Keyboard { modifier, code: read(2) }
        }
        // Only the low byte of a consumer code is stored
        ActionKind::Consumer => KeyAction::Consumer(read(1) as u16),
        ActionKind::Macro => {
            let len = read(1);
            if len as usize > MACRO_MAX_LEN {
                return Err(ConfigDecodeError::MacroTooLong { slot, len });
            }
            let mut steps = Vec::new();
            for i in 0..len as usize {
                // Can't overflow, the length is checked above
                let _ = steps.push(read(2 + i));
            }
            KeyAction::Macro(steps)
        }
    };
    debug!("Record {}: {:?}", slot.index(), action);
    Ok(action)
}

/// Decode the whole table. Any invalid record rejects the table.
///
/// `read` gets the address relative to the start of the table.
pub fn decode_table(mut read: impl FnMut(u32) -> u8) -> Result<[KeyAction; NUM_SLOTS], ConfigDecodeError> {
    let mut actions: [KeyAction; NUM_SLOTS] = core::array::from_fn(|_| KeyAction::inert());
    for slot in Slot::ALL {
        let base = (slot.index() * RECORD_SIZE) as u32;
        actions[slot.index()] = decode_record(slot, |offset| read(base + offset as u32))?;
    }
    Ok(actions)
}

/// Encode an action to its stored record.
///
/// Unused bytes are zero. A consumer code keeps only its low byte.
pub fn encode_record(action: &KeyAction) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    record[0] = action.kind() as u8;
    match action {
        KeyAction::Keyboard { modifier, code } => {
            record[1] = modifier.into_bits();
            record[2] = *code;
        }
        KeyAction::Consumer(code) => record[1] = *code as u8,
        KeyAction::Macro(steps) => {
            record[1] = steps.len() as u8;
            record[2..2 + steps.len()].copy_from_slice(steps);
        }
    }
    record
}

/// Encode all actions into a table image, eg. for provisioning a device.
pub fn encode_table(actions: &[KeyAction; NUM_SLOTS]) -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    for (record, action) in table.chunks_exact_mut(RECORD_SIZE).zip(actions.iter()) {
        record.copy_from_slice(&encode_record(action));
    }
    table
}

/// Key table stored in any storage device which implements `embedded-storage::ReadStorage`,
/// usually the data flash or an eeprom.
pub struct ConfigStore<F: ReadStorage> {
    storage: F,
    start_addr: u32,
}

impl<F: ReadStorage> ConfigStore<F> {
    pub fn new(storage: F, config: &StorageConfig) -> Self {
        Self {
            storage,
            start_addr: config.start_addr,
        }
    }

    /// Read a single byte at `addr`, relative to the start of the table
    pub fn read_byte(&mut self, addr: u32) -> Result<u8, StorageError<F::Error>> {
        let mut buf = [0u8; 1];
        self.read_at(addr, &mut buf)?;
        Ok(buf[0])
    }

    /// Read the raw table image
    pub fn read_table(&mut self) -> Result<[u8; TABLE_SIZE], StorageError<F::Error>> {
        let mut table = [0u8; TABLE_SIZE];
        self.read_at(0, &mut table)?;
        Ok(table)
    }

    /// Read and decode the key table
    pub fn load(&mut self) -> Result<[KeyAction; NUM_SLOTS], StorageError<F::Error>> {
        let table = self.read_table()?;
        Ok(decode_table(|addr| table[addr as usize])?)
    }

    fn read_at(&mut self, addr: u32, buf: &mut [u8]) -> Result<(), StorageError<F::Error>> {
        let start = self.start_addr.checked_add(addr).ok_or(StorageError::AddressOverflow)?;
        // The last byte must be addressable too
        start
            .checked_add(buf.len().saturating_sub(1) as u32)
            .ok_or(StorageError::AddressOverflow)?;
        self.storage.read(start, buf).map_err(StorageError::Read)
    }

    pub fn into_inner(self) -> F {
        self.storage
    }
}
