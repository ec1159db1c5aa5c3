/*!
RAM module: a flat 64 KiB memory implementing `MemoryBus`.

Address map:
- $0000-$FFFF: plain RAM, one byte per address, no mirroring.

This is the simplest bus the CPU can run against. Vectors live at the top of
the array like on real hardware, so a host or test loads a program, points
the RESET vector at it, and constructs the CPU.
*/

use crate::bus::MemoryBus;

/// Size of the flat address space (in bytes).
pub const RAM_SIZE: usize = 0x1_0000;

/// Flat 64 KiB RAM, zero-filled on construction.
#[derive(Clone)]
pub struct FlatRam {
    data: Box<[u8]>,
}

impl Default for FlatRam {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatRam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatRam")
            .field("size", &self.data.len())
            .finish()
    }
}

impl FlatRam {
    /// Create a new RAM instance initialized to 0.
    pub fn new() -> Self {
        Self {
            data: vec![0; RAM_SIZE].into_boxed_slice(),
        }
    }

    /// Clear RAM contents to 0.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy `bytes` into memory starting at `origin`, wrapping past $FFFF.
    pub fn load(&mut self, origin: u16, bytes: &[u8]) {
        let mut addr = origin;
        for &b in bytes {
            self.data[addr as usize] = b;
            addr = addr.wrapping_add(1);
        }
    }

    /// Store `target` little-endian at `vector` (e.g. $FFFC for RESET).
    pub fn set_vector(&mut self, vector: u16, target: u16) {
        self.load(vector, &target.to_le_bytes());
    }

    /// Read a byte without going through the bus trait (no `&mut` needed).
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Expose the backing store (read-only). Useful for diagnostics or hashing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl MemoryBus for FlatRam {
    #[inline]
    fn read(&mut self, address: u16) -> u8 {
        self.data[address as usize]
    }

    #[inline]
    fn write(&mut self, address: u16, value: u8) {
        self.data[address as usize] = value;
    }
}
