//! Instruction routines referenced from the opcode table.
//!
//! By the time a routine runs, PC already points past the instruction and any
//! immediate data sits in `Operands`. Routines that transfer control
//! overwrite PC themselves.

mod arith;
mod branch;
mod stack;
mod system;
mod transfer;
