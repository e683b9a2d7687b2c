use super::dispatch::{Operands, OperandKind, OPCODES};
use super::Cpu8080;
use crate::config::InterruptPolicy;
use crate::error::Fault;
use crate::io::IoBus;

impl Cpu8080 {
    /// True when an interrupt would be taken at this instruction boundary.
    pub fn accepts_interrupts(&self) -> bool {
        self.interrupts_enabled && !self.ei_inhibit && self.fault.is_none()
    }

    /// Offer an interrupt carrying `opcode`.
    ///
    /// Returns `Ok(None)` when interrupts are not being accepted. Otherwise
    /// interrupts are disabled, a halted CPU wakes, and `opcode` executes in
    /// place of a fetch with PC left as it was, so an `RST` pushes the address
    /// of the instruction that would have run next. Only single-byte opcodes
    /// can be delivered.
    pub fn interrupt<B: IoBus>(&mut self, io: &mut B, opcode: u8) -> Result<Option<u32>, Fault> {
        if let Some(fault) = self.fault() {
            return Err(fault);
        }
        if !self.accepts_interrupts() {
            return Ok(None);
        }
        let pc = self.regs.pc;
        let result = self.service_interrupt(io, opcode);
        self.latch(pc, result).map(Some)
    }

    fn service_interrupt(&mut self, io: &mut dyn IoBus, opcode: u8) -> Result<u32, Fault> {
        let entry = &OPCODES[opcode as usize];
        if entry.operand != OperandKind::Implied {
            return Err(Fault::MultiByteInterrupt(opcode));
        }
        self.check_documented(entry, opcode, self.regs.pc)?;

        log::debug!(
            "Interrupt 0x{:02X} ({}) at PC=0x{:04X}",
            opcode,
            entry.mnemonic,
            self.regs.pc
        );
        self.interrupts_enabled = false;
        self.halted = false;

        let states = self.execute(io, entry, Operands { opcode, data: 0 })?;
        if self.config.interrupt_policy == InterruptPolicy::AutoReenable {
            self.interrupts_enabled = true;
        }
        Ok(states)
    }

    /// EI. Interrupts are accepted from the next boundary on, or one
    /// instruction later with `delayed_ei`.
    pub(in crate::cpu) fn enable_interrupts(&mut self) {
        log::debug!("EI");
        self.interrupts_enabled = true;
        self.ei_inhibit = self.config.delayed_ei;
    }

    /// DI takes effect immediately.
    pub(in crate::cpu) fn disable_interrupts(&mut self) {
        log::debug!("DI");
        self.interrupts_enabled = false;
        self.ei_inhibit = false;
    }
}
