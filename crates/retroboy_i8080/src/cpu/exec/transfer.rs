use crate::cpu::dispatch::{Flow, Operands};
use crate::cpu::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;

impl Cpu8080 {
    pub(in crate::cpu) fn exec_mov(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let value = self.read_operand(ops.src())?;
        self.write_operand(ops.dst(), value)?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_mvi(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.write_operand(ops.dst(), ops.byte())?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_lxi(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.set_pair(ops.pair(), ops.word());
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_lda(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.a = self.memory.read(ops.word())?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_sta(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.memory.write(ops.word(), self.regs.a)?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_lhld(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let value = self.memory.read_word(ops.word())?;
        self.regs.hl.set(value);
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_shld(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.memory.write_word(ops.word(), self.regs.hl.get())?;
        Ok(Flow::Next)
    }

    /// LDAX B/D. Only BC and DE are encodable.
    pub(in crate::cpu) fn exec_ldax(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let addr = self.regs.pair(ops.pair());
        self.regs.a = self.memory.read(addr)?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_stax(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let addr = self.regs.pair(ops.pair());
        self.memory.write(addr, self.regs.a)?;
        Ok(Flow::Next)
    }

    /// XCHG: swap HL and DE through WZ.
    pub(in crate::cpu) fn exec_xchg(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.wz = self.regs.hl;
        self.regs.hl = self.regs.de;
        self.regs.de = self.regs.wz;
        Ok(Flow::Next)
    }
}
