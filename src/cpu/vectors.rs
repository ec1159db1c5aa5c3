//! Fixed interrupt / reset vector addresses (little-endian word at each).

/// Non-maskable interrupt vector ($FFFA/$FFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector ($FFFC/$FFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector ($FFFE/$FFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;
