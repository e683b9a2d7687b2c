use crate::cpu::dispatch::{Flow, Operands};
use crate::cpu::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;
use crate::registers::Pair;

impl Cpu8080 {
    /// PUSH B/D/H/PSW. The SP encoding selects PSW.
    pub(in crate::cpu) fn exec_push(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        match ops.pair() {
            Pair::SP => self.push_status_word()?,
            pair => self.push_pair(pair)?,
        }
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_pop(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        match ops.pair() {
            Pair::SP => self.pop_status_word()?,
            pair => self.pop_pair(pair)?,
        }
        Ok(Flow::Next)
    }

    /// XTHL: exchange HL with the word on top of the stack, through WZ.
    pub(in crate::cpu) fn exec_xthl(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        let sp = self.regs.sp.get();
        self.regs.wz.set(self.memory.read_word(sp)?);
        self.memory.write_word(sp, self.regs.hl.get())?;
        self.regs.hl = self.regs.wz;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_sphl(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.regs.sp = self.regs.hl;
        Ok(Flow::Next)
    }
}
