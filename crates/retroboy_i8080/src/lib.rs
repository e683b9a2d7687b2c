pub mod alu;
pub mod config;
pub mod cpu;
pub mod error;
pub mod flags;
pub mod io;
pub mod memory;
pub mod registers;
pub mod signal;

pub use config::{CpuConfig, InterruptPolicy, UndefinedOpcodePolicy};
pub use cpu::{opcode, Cpu8080, Opcode, OperandKind, RunOutcome, StopReason};
pub use error::Fault;
pub use flags::{Condition, Flags, StatusWord};
pub use io::{IoBus, NullBus};
pub use memory::Memory;
pub use registers::{Operand8, Pair, Reg, RegisterPair, Registers};
pub use signal::{Signal, SignalReceiver, SignalSender};

/// Default memory image size (16 KiB), matching the machines this core was
/// first written for.
pub const DEFAULT_MEMORY_SIZE: usize = 0x4000;
/// Largest memory image the 16-bit address bus can reach.
pub const MAX_MEMORY_SIZE: usize = 0x10000;
