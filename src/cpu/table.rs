/*!
table.rs - The 256-entry opcode table.

Purpose
=======
Maps every opcode byte to an `Operation` descriptor: mnemonic, addressing
mode, base cycle count, and whether an indexed page cross adds a cycle. The
dispatcher matches on `Mnemonic` (exhaustive at compile time), so there are no
function pointers in the table and it can be a plain `static`.

Design
------
- `OPCODE_TABLE` is built by a `const fn` at compile time. It is immutable and
  `Sync`; every engine instance shares it.
- The 151 documented opcodes bind to the 56 NMOS mnemonics.
- The remaining 105 opcodes map to `Mnemonic::Illegal`. Each carries the
  addressing mode whose operand width matches the real undocumented
  instruction at that byte, so an inert NOP keeps the instruction stream
  aligned. Their cost is the flat `ILLEGAL_NOP_CYCLES`, a policy choice rather
  than hardware timing.

Cycle policy
------------
`cycles` excludes conditional penalties. `page_cross_penalty` is set only on
read instructions with AbsoluteX / AbsoluteY / IndirectY operands. Indexed
stores and read-modify-write instructions already include their fixed extra
cycle in `cycles`. Branch penalties are applied by the branch handler.
*/

use std::fmt;

use crate::cpu::addressing::AddressingMode;
use crate::cpu::cycles::ILLEGAL_NOP_CYCLES;

/// Instruction mnemonic. `Illegal` tags every undocumented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    Illegal,
}

impl Mnemonic {
    /// Every documented mnemonic, in alphabetical order.
    pub const LEGAL: [Mnemonic; 56] = [
        Mnemonic::Adc,
        Mnemonic::And,
        Mnemonic::Asl,
        Mnemonic::Bcc,
        Mnemonic::Bcs,
        Mnemonic::Beq,
        Mnemonic::Bit,
        Mnemonic::Bmi,
        Mnemonic::Bne,
        Mnemonic::Bpl,
        Mnemonic::Brk,
        Mnemonic::Bvc,
        Mnemonic::Bvs,
        Mnemonic::Clc,
        Mnemonic::Cld,
        Mnemonic::Cli,
        Mnemonic::Clv,
        Mnemonic::Cmp,
        Mnemonic::Cpx,
        Mnemonic::Cpy,
        Mnemonic::Dec,
        Mnemonic::Dex,
        Mnemonic::Dey,
        Mnemonic::Eor,
        Mnemonic::Inc,
        Mnemonic::Inx,
        Mnemonic::Iny,
        Mnemonic::Jmp,
        Mnemonic::Jsr,
        Mnemonic::Lda,
        Mnemonic::Ldx,
        Mnemonic::Ldy,
        Mnemonic::Lsr,
        Mnemonic::Nop,
        Mnemonic::Ora,
        Mnemonic::Pha,
        Mnemonic::Php,
        Mnemonic::Pla,
        Mnemonic::Plp,
        Mnemonic::Rol,
        Mnemonic::Ror,
        Mnemonic::Rti,
        Mnemonic::Rts,
        Mnemonic::Sbc,
        Mnemonic::Sec,
        Mnemonic::Sed,
        Mnemonic::Sei,
        Mnemonic::Sta,
        Mnemonic::Stx,
        Mnemonic::Sty,
        Mnemonic::Tax,
        Mnemonic::Tay,
        Mnemonic::Tsx,
        Mnemonic::Txa,
        Mnemonic::Txs,
        Mnemonic::Tya,
    ];

    #[inline]
    pub const fn is_legal(self) -> bool {
        !matches!(self, Mnemonic::Illegal)
    }

    /// Upper-case assembler name (`"???"` for undocumented opcodes).
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
            Mnemonic::Illegal => "???",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable opcode descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycles, excluding page-cross and branch penalties.
    pub cycles: u8,
    /// Add one cycle when the indexed address crosses a page.
    pub page_cross_penalty: bool,
}

impl Operation {
    const fn new(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Self {
        Self {
            mnemonic,
            mode,
            cycles,
            page_cross_penalty: false,
        }
    }

    const fn with_penalty(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Self {
        Self {
            mnemonic,
            mode,
            cycles,
            page_cross_penalty: true,
        }
    }

    /// Instruction length in bytes (opcode + operand).
    #[inline]
    pub const fn size(&self) -> u16 {
        1 + self.mode.operand_width()
    }

    #[inline]
    pub const fn is_legal(&self) -> bool {
        self.mnemonic.is_legal()
    }
}

/// The opcode table, indexed by opcode byte.
pub static OPCODE_TABLE: [Operation; 256] = build_table();

/// Descriptor for `opcode`.
#[inline]
pub fn lookup(opcode: u8) -> Operation {
    OPCODE_TABLE[opcode as usize]
}

/// Number of opcodes bound to a documented mnemonic.
pub fn legal_opcode_count() -> usize {
    OPCODE_TABLE.iter().filter(|op| op.is_legal()).count()
}

const fn build_table() -> [Operation; 256] {
    let mut table = [Operation::new(Mnemonic::Illegal, AddressingMode::Implicit, 0); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Operation {
    Operation::new(mnemonic, mode, cycles)
}

// Read with a page-cross penalty.
const fn rd(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Operation {
    Operation::with_penalty(mnemonic, mode, cycles)
}

const fn decode(opcode: u8) -> Operation {
    use AddressingMode::*;
    use Mnemonic::*;

    match opcode {
        // ADC
        0x69 => op(Adc, Immediate, 2),
        0x65 => op(Adc, ZeroPage, 3),
        0x75 => op(Adc, ZeroPageX, 4),
        0x6D => op(Adc, Absolute, 4),
        0x7D => rd(Adc, AbsoluteX, 4),
        0x79 => rd(Adc, AbsoluteY, 4),
        0x61 => op(Adc, IndirectX, 6),
        0x71 => rd(Adc, IndirectY, 5),
        // AND
        0x29 => op(And, Immediate, 2),
        0x25 => op(And, ZeroPage, 3),
        0x35 => op(And, ZeroPageX, 4),
        0x2D => op(And, Absolute, 4),
        0x3D => rd(And, AbsoluteX, 4),
        0x39 => rd(And, AbsoluteY, 4),
        0x21 => op(And, IndirectX, 6),
        0x31 => rd(And, IndirectY, 5),
        // ORA
        0x09 => op(Ora, Immediate, 2),
        0x05 => op(Ora, ZeroPage, 3),
        0x15 => op(Ora, ZeroPageX, 4),
        0x0D => op(Ora, Absolute, 4),
        0x1D => rd(Ora, AbsoluteX, 4),
        0x19 => rd(Ora, AbsoluteY, 4),
        0x01 => op(Ora, IndirectX, 6),
        0x11 => rd(Ora, IndirectY, 5),
        // EOR
        0x49 => op(Eor, Immediate, 2),
        0x45 => op(Eor, ZeroPage, 3),
        0x55 => op(Eor, ZeroPageX, 4),
        0x4D => op(Eor, Absolute, 4),
        0x5D => rd(Eor, AbsoluteX, 4),
        0x59 => rd(Eor, AbsoluteY, 4),
        0x41 => op(Eor, IndirectX, 6),
        0x51 => rd(Eor, IndirectY, 5),
        // CMP
        0xC9 => op(Cmp, Immediate, 2),
        0xC5 => op(Cmp, ZeroPage, 3),
        0xD5 => op(Cmp, ZeroPageX, 4),
        0xCD => op(Cmp, Absolute, 4),
        0xDD => rd(Cmp, AbsoluteX, 4),
        0xD9 => rd(Cmp, AbsoluteY, 4),
        0xC1 => op(Cmp, IndirectX, 6),
        0xD1 => rd(Cmp, IndirectY, 5),
        // SBC
        0xE9 => op(Sbc, Immediate, 2),
        0xE5 => op(Sbc, ZeroPage, 3),
        0xF5 => op(Sbc, ZeroPageX, 4),
        0xED => op(Sbc, Absolute, 4),
        0xFD => rd(Sbc, AbsoluteX, 4),
        0xF9 => rd(Sbc, AbsoluteY, 4),
        0xE1 => op(Sbc, IndirectX, 6),
        0xF1 => rd(Sbc, IndirectY, 5),
        // LDA
        0xA9 => op(Lda, Immediate, 2),
        0xA5 => op(Lda, ZeroPage, 3),
        0xB5 => op(Lda, ZeroPageX, 4),
        0xAD => op(Lda, Absolute, 4),
        0xBD => rd(Lda, AbsoluteX, 4),
        0xB9 => rd(Lda, AbsoluteY, 4),
        0xA1 => op(Lda, IndirectX, 6),
        0xB1 => rd(Lda, IndirectY, 5),
        // STA (indexed forms always pay the extra cycle)
        0x85 => op(Sta, ZeroPage, 3),
        0x95 => op(Sta, ZeroPageX, 4),
        0x8D => op(Sta, Absolute, 4),
        0x9D => op(Sta, AbsoluteX, 5),
        0x99 => op(Sta, AbsoluteY, 5),
        0x81 => op(Sta, IndirectX, 6),
        0x91 => op(Sta, IndirectY, 6),
        // LDX / LDY
        0xA2 => op(Ldx, Immediate, 2),
        0xA6 => op(Ldx, ZeroPage, 3),
        0xB6 => op(Ldx, ZeroPageY, 4),
        0xAE => op(Ldx, Absolute, 4),
        0xBE => rd(Ldx, AbsoluteY, 4),
        0xA0 => op(Ldy, Immediate, 2),
        0xA4 => op(Ldy, ZeroPage, 3),
        0xB4 => op(Ldy, ZeroPageX, 4),
        0xAC => op(Ldy, Absolute, 4),
        0xBC => rd(Ldy, AbsoluteX, 4),
        // STX / STY
        0x86 => op(Stx, ZeroPage, 3),
        0x96 => op(Stx, ZeroPageY, 4),
        0x8E => op(Stx, Absolute, 4),
        0x84 => op(Sty, ZeroPage, 3),
        0x94 => op(Sty, ZeroPageX, 4),
        0x8C => op(Sty, Absolute, 4),
        // CPX / CPY
        0xE0 => op(Cpx, Immediate, 2),
        0xE4 => op(Cpx, ZeroPage, 3),
        0xEC => op(Cpx, Absolute, 4),
        0xC0 => op(Cpy, Immediate, 2),
        0xC4 => op(Cpy, ZeroPage, 3),
        0xCC => op(Cpy, Absolute, 4),
        // BIT
        0x24 => op(Bit, ZeroPage, 3),
        0x2C => op(Bit, Absolute, 4),
        // Shifts / rotates
        0x0A => op(Asl, Accumulator, 2),
        0x06 => op(Asl, ZeroPage, 5),
        0x16 => op(Asl, ZeroPageX, 6),
        0x0E => op(Asl, Absolute, 6),
        0x1E => op(Asl, AbsoluteX, 7),
        0x4A => op(Lsr, Accumulator, 2),
        0x46 => op(Lsr, ZeroPage, 5),
        0x56 => op(Lsr, ZeroPageX, 6),
        0x4E => op(Lsr, Absolute, 6),
        0x5E => op(Lsr, AbsoluteX, 7),
        0x2A => op(Rol, Accumulator, 2),
        0x26 => op(Rol, ZeroPage, 5),
        0x36 => op(Rol, ZeroPageX, 6),
        0x2E => op(Rol, Absolute, 6),
        0x3E => op(Rol, AbsoluteX, 7),
        0x6A => op(Ror, Accumulator, 2),
        0x66 => op(Ror, ZeroPage, 5),
        0x76 => op(Ror, ZeroPageX, 6),
        0x6E => op(Ror, Absolute, 6),
        0x7E => op(Ror, AbsoluteX, 7),
        // INC / DEC memory
        0xE6 => op(Inc, ZeroPage, 5),
        0xF6 => op(Inc, ZeroPageX, 6),
        0xEE => op(Inc, Absolute, 6),
        0xFE => op(Inc, AbsoluteX, 7),
        0xC6 => op(Dec, ZeroPage, 5),
        0xD6 => op(Dec, ZeroPageX, 6),
        0xCE => op(Dec, Absolute, 6),
        0xDE => op(Dec, AbsoluteX, 7),
        // Branches
        0x10 => op(Bpl, Relative, 2),
        0x30 => op(Bmi, Relative, 2),
        0x50 => op(Bvc, Relative, 2),
        0x70 => op(Bvs, Relative, 2),
        0x90 => op(Bcc, Relative, 2),
        0xB0 => op(Bcs, Relative, 2),
        0xD0 => op(Bne, Relative, 2),
        0xF0 => op(Beq, Relative, 2),
        // Control flow
        0x4C => op(Jmp, Absolute, 3),
        0x6C => op(Jmp, Indirect, 5),
        0x20 => op(Jsr, Absolute, 6),
        0x60 => op(Rts, Implicit, 6),
        0x40 => op(Rti, Implicit, 6),
        0x00 => op(Brk, Implicit, 7),
        // Stack
        0x48 => op(Pha, Implicit, 3),
        0x08 => op(Php, Implicit, 3),
        0x68 => op(Pla, Implicit, 4),
        0x28 => op(Plp, Implicit, 4),
        // Flags
        0x18 => op(Clc, Implicit, 2),
        0x38 => op(Sec, Implicit, 2),
        0x58 => op(Cli, Implicit, 2),
        0x78 => op(Sei, Implicit, 2),
        0xB8 => op(Clv, Implicit, 2),
        0xD8 => op(Cld, Implicit, 2),
        0xF8 => op(Sed, Implicit, 2),
        // Transfers
        0xAA => op(Tax, Implicit, 2),
        0xA8 => op(Tay, Implicit, 2),
        0x8A => op(Txa, Implicit, 2),
        0x98 => op(Tya, Implicit, 2),
        0xBA => op(Tsx, Implicit, 2),
        0x9A => op(Txs, Implicit, 2),
        // Register increment / decrement
        0xE8 => op(Inx, Implicit, 2),
        0xC8 => op(Iny, Implicit, 2),
        0xCA => op(Dex, Implicit, 2),
        0x88 => op(Dey, Implicit, 2),
        0xEA => op(Nop, Implicit, 2),
        _ => op(Illegal, illegal_mode(opcode), ILLEGAL_NOP_CYCLES as u8),
    }
}

/// Operand shape of the undocumented instruction at `opcode`.
///
/// Only called for opcodes outside the documented set. Grouped by low nibble;
/// "odd" rows are those with an odd high nibble.
const fn illegal_mode(opcode: u8) -> AddressingMode {
    use AddressingMode::*;

    let odd_row = (opcode >> 4) & 1 == 1;
    match opcode & 0x0F {
        // $80 DOP #imm
        0x0 => Immediate,
        // KIL everywhere except the three DOP #imm
        0x2 => match opcode {
            0x82 | 0xC2 | 0xE2 => Immediate,
            _ => Implicit,
        },
        // SLO/RLA/SRE/RRA/SAX/LAX/DCP/ISC
        0x3 => {
            if odd_row {
                IndirectY
            } else {
                IndirectX
            }
        }
        // DOP zp / zp,X
        0x4 => {
            if odd_row {
                ZeroPageX
            } else {
                ZeroPage
            }
        }
        0x7 => match opcode {
            0x97 | 0xB7 => ZeroPageY,
            _ if odd_row => ZeroPageX,
            _ => ZeroPage,
        },
        // $89 DOP #imm
        0x9 => Immediate,
        // single-byte NOPs
        0xA => Implicit,
        0xB => {
            if odd_row {
                AbsoluteY
            } else {
                Immediate
            }
        }
        // $0C TOP abs, odd rows TOP abs,X / SHY abs,X
        0xC => {
            if odd_row {
                AbsoluteX
            } else {
                Absolute
            }
        }
        // $9E SHX abs,Y
        0xE => AbsoluteY,
        0xF => match opcode {
            0x9F | 0xBF => AbsoluteY,
            _ if odd_row => AbsoluteX,
            _ => Absolute,
        },
        _ => Implicit,
    }
}
