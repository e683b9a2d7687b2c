use crate::cpu::dispatch::{Flow, Operands};
use crate::cpu::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;

impl Cpu8080 {
    pub(in crate::cpu) fn exec_jmp(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.pc = self.regs.wz.get();
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_jcc(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        if !self.flags.test(ops.condition()) {
            return Ok(Flow::Next);
        }
        self.regs.pc = self.regs.wz.get();
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_call(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.call(self.regs.wz.get())?;
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_ccc(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        if !self.flags.test(ops.condition()) {
            return Ok(Flow::Next);
        }
        self.call(self.regs.wz.get())?;
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_ret(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.ret()?;
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_rcc(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        if !self.flags.test(ops.condition()) {
            return Ok(Flow::Next);
        }
        self.ret()?;
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_rst(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.restart((ops.opcode >> 3) & 0x07)?;
        Ok(Flow::Taken)
    }

    pub(in crate::cpu) fn exec_pchl(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.pc = self.regs.hl.get();
        Ok(Flow::Taken)
    }
}
