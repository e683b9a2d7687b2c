mod dispatch;
mod exec;
mod interrupts;
mod run;
mod stack;


use crate::config::{CpuConfig, UndefinedOpcodePolicy};
use crate::error::Fault;
use crate::flags::Flags;
use crate::io::IoBus;
use crate::memory::Memory;
use crate::registers::{Operand8, Registers};

use dispatch::{Flow, Operands, OPCODES};

pub use dispatch::{opcode, Opcode, OperandKind};
pub use run::{RunOutcome, StopReason};

/// Intel 8080 interpreter.
///
/// The CPU owns its register file, flags and memory image. Only the I/O
/// ports are reached through a caller-supplied [`IoBus`].
#[derive(Debug)]
pub struct Cpu8080 {
    pub regs: Registers,
    pub flags: Flags,
    pub memory: Memory,
    pub interrupts_enabled: bool,
    pub halted: bool,
    /// Last value placed on the address bus by `IN`/`OUT`: the port number
    /// in both bytes.
    pub address_bus: u16,
    /// Last byte transferred by `IN`/`OUT`.
    pub data_bus: u8,
    /// Set by EI under `delayed_ei`; interrupts are held off until the next
    /// instruction has run.
    ei_inhibit: bool,
    /// Latched fault and the address of the instruction that raised it.
    fault: Option<(Fault, u16)>,
    config: CpuConfig,
}

impl Default for Cpu8080 {
    fn default() -> Self {
        let config = CpuConfig::default();
        Self {
            regs: Registers::default(),
            flags: Flags::default(),
            memory: Memory::default(),
            interrupts_enabled: config.interrupts_enabled,
            halted: false,
            address_bus: 0,
            data_bus: 0,
            ei_inhibit: false,
            fault: None,
            config,
        }
    }
}

impl Cpu8080 {
    /// Create a CPU in reset state with zeroed memory of `config.memory_size`
    /// bytes.
    pub fn new(config: CpuConfig) -> Result<Self, Fault> {
        Ok(Self {
            memory: Memory::new(config.memory_size)?,
            interrupts_enabled: config.interrupts_enabled,
            config,
            ..Self::default()
        })
    }

    /// Fault the CPU is latched on, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.fault.map(|(fault, _)| fault)
    }

    /// Start address of the instruction (or PC at the interrupt) that raised
    /// the latched fault.
    pub fn fault_pc(&self) -> Option<u16> {
        self.fault.map(|(_, pc)| pc)
    }

    /// Reset registers, flags and latches to their power-on values. Memory is
    /// left untouched.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.flags = Flags::default();
        self.interrupts_enabled = self.config.interrupts_enabled;
        self.halted = false;
        self.address_bus = 0;
        self.data_bus = 0;
        self.ei_inhibit = false;
        self.fault = None;
    }

    /// Copy `program` into memory at `offset` and point PC at it.
    pub fn load(&mut self, program: &[u8], offset: u16) -> Result<(), Fault> {
        self.memory.load(offset, program)?;
        self.regs.pc = offset;
        log::info!("Loaded {} bytes at 0x{:04X}", program.len(), offset);
        Ok(())
    }

    /// Execute one instruction and return its nominal state count.
    ///
    /// A halted CPU does nothing and returns 0. Once a fault has been
    /// returned, every later call returns the same fault until `reset`.
    pub fn step<B: IoBus>(&mut self, io: &mut B) -> Result<u32, Fault> {
        if let Some(fault) = self.fault() {
            return Err(fault);
        }
        if self.halted {
            return Ok(0);
        }
        let pc = self.regs.pc;
        let result = self.fetch_and_execute(io, pc);
        self.latch(pc, result)
    }

    fn fetch_and_execute(&mut self, io: &mut dyn IoBus, pc: u16) -> Result<u32, Fault> {
        let opcode = self.memory.read(pc)?;
        let entry = &OPCODES[opcode as usize];
        self.check_documented(entry, opcode, pc)?;

        let data = match entry.operand {
            OperandKind::Implied => 0,
            OperandKind::Byte => self.memory.read(pc.wrapping_add(1))? as u16,
            OperandKind::Word => {
                let word = self.memory.read_word(pc.wrapping_add(1))?;
                self.regs.wz.set(word);
                word
            }
        };

        log::trace!(
            "PC=0x{:04X} op=0x{:02X} {} data=0x{:04X} A=0x{:02X} F=0x{:02X} SP=0x{:04X}",
            pc,
            opcode,
            entry.mnemonic,
            data,
            self.regs.a,
            self.flags.to_u8(),
            self.regs.sp.get()
        );

        self.regs.pc = pc.wrapping_add(entry.length());
        self.ei_inhibit = false;
        self.execute(io, entry, Operands { opcode, data })
    }

    fn execute(
        &mut self,
        io: &mut dyn IoBus,
        entry: &Opcode,
        operands: Operands,
    ) -> Result<u32, Fault> {
        match (entry.exec)(self, io, operands)? {
            Flow::Next => Ok(entry.states),
            Flow::Taken => Ok(entry.states_taken),
        }
    }

    fn check_documented(&self, entry: &Opcode, opcode: u8, pc: u16) -> Result<(), Fault> {
        if entry.documented {
            return Ok(());
        }
        match self.config.undefined_opcodes {
            UndefinedOpcodePolicy::Fault => Err(Fault::UndefinedOpcode { opcode, pc }),
            UndefinedOpcodePolicy::Alias => {
                log::warn!(
                    "Undefined opcode 0x{:02X} at PC=0x{:04X} executed as {}",
                    opcode,
                    pc,
                    entry.mnemonic
                );
                Ok(())
            }
        }
    }

    fn latch<T>(&mut self, pc: u16, result: Result<T, Fault>) -> Result<T, Fault> {
        if let Err(fault) = result {
            log::error!("CPU fault at PC=0x{:04X}: {}", pc, fault);
            self.fault = Some((fault, pc));
        }
        result
    }

    /// Value of a decoded 8-bit operand; `M` reads the byte at HL.
    pub(crate) fn read_operand(&self, operand: Operand8) -> Result<u8, Fault> {
        match operand {
            Operand8::Register(reg) => Ok(self.regs.get(reg)),
            Operand8::Memory => self.memory.read(self.regs.hl.get()),
        }
    }

    pub(crate) fn write_operand(&mut self, operand: Operand8, value: u8) -> Result<(), Fault> {
        match operand {
            Operand8::Register(reg) => {
                self.regs.set(reg, value);
                Ok(())
            }
            Operand8::Memory => self.memory.write(self.regs.hl.get(), value),
        }
    }

    /// Apply `op` to a decoded operand in place, register or memory.
    pub(crate) fn modify_operand(
        &mut self,
        operand: Operand8,
        op: fn(&mut u8, &mut Flags),
    ) -> Result<(), Fault> {
        match operand {
            Operand8::Register(reg) => {
                op(self.regs.reg_mut(reg), &mut self.flags);
                Ok(())
            }
            Operand8::Memory => {
                let addr = self.regs.hl.get();
                let mut value = self.memory.read(addr)?;
                op(&mut value, &mut self.flags);
                self.memory.write(addr, value)
            }
        }
    }
}
