//! The 256-entry opcode table.
//!
//! Every opcode maps to its operand size, nominal state counts and the
//! routine that executes it. The table is built once on first use; decoding
//! an instruction at run time is a single index.

use lazy_static::lazy_static;

use super::Cpu8080;
use crate::error::Fault;
use crate::flags::Condition;
use crate::io::IoBus;
use crate::registers::{Operand8, Pair};

/// Bytes that follow the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Implied,
    Byte,
    /// Little-endian 16-bit immediate or address.
    Word,
}

/// How execution continued after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fell through to the next instruction.
    Next,
    /// Took a branch, or a conditional instruction's condition held.
    Taken,
}

/// Decoded opcode byte plus its immediate data (0 when there is none).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Operands {
    pub opcode: u8,
    pub data: u16,
}

impl Operands {
    /// Destination register field, bits 3-5.
    #[inline]
    pub fn dst(self) -> Operand8 {
        Operand8::decode(self.opcode >> 3)
    }

    /// Source register field, bits 0-2.
    #[inline]
    pub fn src(self) -> Operand8 {
        Operand8::decode(self.opcode)
    }

    /// Register pair field, bits 4-5.
    #[inline]
    pub fn pair(self) -> Pair {
        Pair::decode(self.opcode >> 4)
    }

    #[inline]
    pub fn condition(self) -> Condition {
        Condition::decode(self.opcode >> 3)
    }

    /// ALU operation field of 0x80..=0xBF and the immediate group, bits 3-5.
    #[inline]
    pub fn alu_op(self) -> u8 {
        (self.opcode >> 3) & 0x07
    }

    #[inline]
    pub fn byte(self) -> u8 {
        self.data as u8
    }

    #[inline]
    pub fn word(self) -> u16 {
        self.data
    }
}

pub(crate) type Exec = fn(&mut Cpu8080, &mut dyn IoBus, Operands) -> Result<Flow, Fault>;

/// One entry of the opcode table.
#[derive(Clone, Copy)]
pub struct Opcode {
    /// Mnemonic without operands, e.g. `MOV` or `JNZ`.
    pub mnemonic: &'static str,
    pub operand: OperandKind,
    /// Nominal states when the instruction falls through.
    pub states: u32,
    /// Nominal states when a branch is taken. Equal to `states` for
    /// everything that is not a conditional RET/CALL.
    pub states_taken: u32,
    /// False for the 12 opcodes Intel never assigned.
    pub documented: bool,
    pub(crate) exec: Exec,
}

impl Opcode {
    /// Instruction length in bytes, opcode included.
    pub fn length(&self) -> u16 {
        match self.operand {
            OperandKind::Implied => 1,
            OperandKind::Byte => 2,
            OperandKind::Word => 3,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opcode")
            .field("mnemonic", &self.mnemonic)
            .field("operand", &self.operand)
            .field("states", &self.states)
            .field("states_taken", &self.states_taken)
            .field("documented", &self.documented)
            .finish()
    }
}

lazy_static! {
    pub(crate) static ref OPCODES: [Opcode; 256] = std::array::from_fn(|i| decode(i as u8));
}

/// Table entry for `opcode`.
pub fn opcode(opcode: u8) -> &'static Opcode {
    &OPCODES[opcode as usize]
}

const ALU_NAMES: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];
const ALU_IMMEDIATE_NAMES: [&str; 8] = ["ADI", "ACI", "SUI", "SBI", "ANI", "XRI", "ORI", "CPI"];
const JUMP_NAMES: [&str; 8] = ["JNZ", "JZ", "JNC", "JC", "JPO", "JPE", "JP", "JM"];
const CALL_NAMES: [&str; 8] = ["CNZ", "CZ", "CNC", "CC", "CPO", "CPE", "CP", "CM"];
const RETURN_NAMES: [&str; 8] = ["RNZ", "RZ", "RNC", "RC", "RPO", "RPE", "RP", "RM"];

fn entry(mnemonic: &'static str, operand: OperandKind, states: u32, exec: Exec) -> Opcode {
    Opcode {
        mnemonic,
        operand,
        states,
        states_taken: states,
        documented: true,
        exec,
    }
}

fn conditional(
    mnemonic: &'static str,
    operand: OperandKind,
    states: u32,
    states_taken: u32,
    exec: Exec,
) -> Opcode {
    Opcode {
        states_taken,
        ..entry(mnemonic, operand, states, exec)
    }
}

/// Undefined opcode that the silicon executes as `of`.
fn alias(of: u8) -> Opcode {
    Opcode {
        documented: false,
        ..decode(of)
    }
}

fn decode(op: u8) -> Opcode {
    use OperandKind::{Byte, Implied, Word};

    let field = ((op >> 3) & 0x07) as usize;
    let uses_memory = |code: u8| Operand8::decode(code) == Operand8::Memory;

    match op {
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => alias(0x00),
        0xCB => alias(0xC3),
        0xD9 => alias(0xC9),
        0xDD | 0xED | 0xFD => alias(0xCD),

        0x00 => entry("NOP", Implied, 4, Cpu8080::exec_nop),
        0x76 => entry("HLT", Implied, 7, Cpu8080::exec_hlt),

        0x40..=0x7F => {
            let states = if uses_memory(op >> 3) || uses_memory(op) { 7 } else { 5 };
            entry("MOV", Implied, states, Cpu8080::exec_mov)
        }
        0x80..=0xBF => {
            let states = if uses_memory(op) { 7 } else { 4 };
            entry(ALU_NAMES[field], Implied, states, Cpu8080::exec_alu)
        }

        _ if op & 0xC7 == 0x04 => {
            let states = if uses_memory(op >> 3) { 10 } else { 5 };
            entry("INR", Implied, states, Cpu8080::exec_inr)
        }
        _ if op & 0xC7 == 0x05 => {
            let states = if uses_memory(op >> 3) { 10 } else { 5 };
            entry("DCR", Implied, states, Cpu8080::exec_dcr)
        }
        _ if op & 0xC7 == 0x06 => {
            let states = if uses_memory(op >> 3) { 10 } else { 7 };
            entry("MVI", Byte, states, Cpu8080::exec_mvi)
        }
        _ if op & 0xCF == 0x01 => entry("LXI", Word, 10, Cpu8080::exec_lxi),
        _ if op & 0xCF == 0x03 => entry("INX", Implied, 5, Cpu8080::exec_inx),
        _ if op & 0xCF == 0x0B => entry("DCX", Implied, 5, Cpu8080::exec_dcx),
        _ if op & 0xCF == 0x09 => entry("DAD", Implied, 10, Cpu8080::exec_dad),

        0x02 | 0x12 => entry("STAX", Implied, 7, Cpu8080::exec_stax),
        0x0A | 0x1A => entry("LDAX", Implied, 7, Cpu8080::exec_ldax),
        0x22 => entry("SHLD", Word, 16, Cpu8080::exec_shld),
        0x2A => entry("LHLD", Word, 16, Cpu8080::exec_lhld),
        0x32 => entry("STA", Word, 13, Cpu8080::exec_sta),
        0x3A => entry("LDA", Word, 13, Cpu8080::exec_lda),

        0x07 => entry("RLC", Implied, 4, Cpu8080::exec_rotate),
        0x0F => entry("RRC", Implied, 4, Cpu8080::exec_rotate),
        0x17 => entry("RAL", Implied, 4, Cpu8080::exec_rotate),
        0x1F => entry("RAR", Implied, 4, Cpu8080::exec_rotate),
        0x27 => entry("DAA", Implied, 4, Cpu8080::exec_daa),
        0x2F => entry("CMA", Implied, 4, Cpu8080::exec_cma),
        0x37 => entry("STC", Implied, 4, Cpu8080::exec_stc),
        0x3F => entry("CMC", Implied, 4, Cpu8080::exec_cmc),

        _ if op & 0xC7 == 0xC0 => {
            conditional(RETURN_NAMES[field], Implied, 5, 11, Cpu8080::exec_rcc)
        }
        _ if op & 0xC7 == 0xC2 => conditional(JUMP_NAMES[field], Word, 10, 10, Cpu8080::exec_jcc),
        _ if op & 0xC7 == 0xC4 => conditional(CALL_NAMES[field], Word, 11, 17, Cpu8080::exec_ccc),
        _ if op & 0xC7 == 0xC6 => {
            entry(ALU_IMMEDIATE_NAMES[field], Byte, 7, Cpu8080::exec_alu)
        }
        _ if op & 0xC7 == 0xC7 => entry("RST", Implied, 11, Cpu8080::exec_rst),
        _ if op & 0xCF == 0xC1 => entry("POP", Implied, 10, Cpu8080::exec_pop),
        _ if op & 0xCF == 0xC5 => entry("PUSH", Implied, 11, Cpu8080::exec_push),

        0xC3 => entry("JMP", Word, 10, Cpu8080::exec_jmp),
        0xC9 => entry("RET", Implied, 10, Cpu8080::exec_ret),
        0xCD => entry("CALL", Word, 17, Cpu8080::exec_call),
        0xD3 => entry("OUT", Byte, 10, Cpu8080::exec_out),
        0xDB => entry("IN", Byte, 10, Cpu8080::exec_in),
        0xE3 => entry("XTHL", Implied, 18, Cpu8080::exec_xthl),
        0xE9 => entry("PCHL", Implied, 5, Cpu8080::exec_pchl),
        0xEB => entry("XCHG", Implied, 4, Cpu8080::exec_xchg),
        0xF3 => entry("DI", Implied, 4, Cpu8080::exec_di),
        0xF9 => entry("SPHL", Implied, 5, Cpu8080::exec_sphl),
        0xFB => entry("EI", Implied, 4, Cpu8080::exec_ei),

        _ => unreachable!("opcode 0x{op:02X} missing from the 8080 table"),
    }
}
