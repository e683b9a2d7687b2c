use crate::error::Fault;
use crate::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE};

/// Flat, fixed-size memory image.
///
/// Every access is checked against the configured length; the 16-bit address
/// space is only fully backed when the image is 64 KiB.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new(size: usize) -> Result<Self, Fault> {
        if size == 0 || size > MAX_MEMORY_SIZE {
            return Err(Fault::InvalidMemorySize(size));
        }
        Ok(Self {
            bytes: vec![0; size].into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    fn index(&self, addr: u16) -> Result<usize, Fault> {
        let index = addr as usize;
        if index < self.bytes.len() {
            Ok(index)
        } else {
            Err(Fault::AddressOutOfRange {
                addr,
                len: self.bytes.len(),
            })
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> Result<u8, Fault> {
        let index = self.index(addr)?;
        Ok(self.bytes[index])
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), Fault> {
        let index = self.index(addr)?;
        self.bytes[index] = value;
        Ok(())
    }

    /// Read a little-endian word. The second byte wraps at 0xFFFF.
    pub fn read_word(&self, addr: u16) -> Result<u16, Fault> {
        let low = self.read(addr)?;
        let high = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a little-endian word. The second byte wraps at 0xFFFF.
    pub fn write_word(&mut self, addr: u16, value: u16) -> Result<(), Fault> {
        let [low, high] = value.to_le_bytes();
        self.write(addr, low)?;
        self.write(addr.wrapping_add(1), high)
    }

    /// Copy a program image into memory starting at `offset`.
    pub fn load(&mut self, offset: u16, program: &[u8]) -> Result<(), Fault> {
        let start = offset as usize;
        let end = start + program.len();
        if end > self.bytes.len() {
            return Err(Fault::ProgramTooLarge {
                offset,
                len: program.len(),
                capacity: self.bytes.len(),
            });
        }
        self.bytes[start..end].copy_from_slice(program);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            bytes: vec![0; DEFAULT_MEMORY_SIZE].into_boxed_slice(),
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.bytes.len()).finish()
    }
}
