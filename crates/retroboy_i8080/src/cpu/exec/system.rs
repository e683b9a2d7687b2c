use crate::cpu::dispatch::{Flow, Operands};
use crate::cpu::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;

impl Cpu8080 {
    pub(in crate::cpu) fn exec_nop(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_hlt(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        log::debug!("HLT at PC=0x{:04X}", self.regs.pc.wrapping_sub(1));
        self.halted = true;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_ei(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.enable_interrupts();
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_di(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.disable_interrupts();
        Ok(Flow::Next)
    }

    /// IN port: the port number goes out on both address bus bytes and the
    /// byte read is latched on the data bus before reaching A.
    pub(in crate::cpu) fn exec_in(
        &mut self,
        io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let port = ops.byte();
        self.address_bus = u16::from_be_bytes([port, port]);
        self.data_bus = io.io_read(port);
        self.regs.a = self.data_bus;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_out(
        &mut self,
        io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let port = ops.byte();
        self.address_bus = u16::from_be_bytes([port, port]);
        self.data_bus = self.regs.a;
        io.io_write(port, self.data_bus);
        Ok(Flow::Next)
    }
}
