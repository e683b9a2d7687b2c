use thiserror::Error;

use crate::registers::Pair;

/// Fatal conditions raised by the 8080 core.
///
/// The emulated machine has no fault-handling hardware, so none of these are
/// recoverable from the program's point of view. Once `Cpu8080::step` returns
/// a fault the CPU stays latched in that state until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("address 0x{addr:04X} is outside memory of {len} bytes")]
    AddressOutOfRange { addr: u16, len: usize },
    #[error("register pair {0:?} cannot be used as a PUSH/POP operand")]
    InvalidStackOperand(Pair),
    #[error("undefined opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    UndefinedOpcode { opcode: u8, pc: u16 },
    #[error("interrupt opcode 0x{0:02X} needs operand bytes the interrupt cannot supply")]
    MultiByteInterrupt(u8),
    #[error(
        "program of {len} bytes at offset 0x{offset:04X} does not fit in {capacity} bytes of memory"
    )]
    ProgramTooLarge {
        offset: u16,
        len: usize,
        capacity: usize,
    },
    #[error("memory size {0} is outside 1..=65536")]
    InvalidMemorySize(usize),
}
