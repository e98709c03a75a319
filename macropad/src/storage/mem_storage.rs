use embedded_storage::{ReadStorage, Storage};

/// Access outside of the storage range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds;

/// A RAM backed implementation of `Storage`.
///
/// Useful when the table is compiled into the firmware image, and for
/// building a table image on the host.
pub struct MemStorage<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> Default for MemStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemStorage<N> {
    /// Create an erased storage, all bytes are `0xFF`
    pub fn new() -> Self {
        Self { data: [0xFF; N] }
    }

    pub fn from_bytes(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Copy `bytes` into the storage at `offset`, truncated at the end of the storage
    pub fn program(&mut self, offset: usize, bytes: &[u8]) {
        let end = offset.saturating_add(bytes.len()).min(N);
        if offset < end {
            self.data[offset..end].copy_from_slice(&bytes[..end - offset]);
        }
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.data
    }

    fn range(offset: u32, len: usize) -> Result<core::ops::Range<usize>, OutOfBounds> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(OutOfBounds)?;
        if end > N { Err(OutOfBounds) } else { Ok(start..end) }
    }
}

impl<const N: usize> ReadStorage for MemStorage<N> {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let range = Self::range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.data[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Storage for MemStorage<N> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let range = Self::range(offset, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }
}
