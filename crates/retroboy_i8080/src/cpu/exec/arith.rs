use crate::alu;
use crate::cpu::dispatch::{Flow, Operands};
use crate::cpu::Cpu8080;
use crate::error::Fault;
use crate::io::IoBus;

impl Cpu8080 {
    /// Register/memory group 0x80..=0xBF and the immediate group
    /// ADI..CPI. Bits 3-5 select the operation in both.
    pub(in crate::cpu) fn exec_alu(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let value = if ops.opcode & 0xC0 == 0x80 {
            self.read_operand(ops.src())?
        } else {
            ops.byte()
        };

        let a = &mut self.regs.a;
        let flags = &mut self.flags;
        match ops.alu_op() {
            0 => alu::add(a, value, flags),
            1 => alu::add_with_carry(a, value, flags),
            2 => alu::sub(a, value, flags),
            3 => alu::sub_with_borrow(a, value, flags),
            4 => alu::and(a, value, flags),
            5 => alu::xor(a, value, flags),
            6 => alu::or(a, value, flags),
            _ => alu::compare(*a, value, flags),
        }
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_inr(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.modify_operand(ops.dst(), alu::increment)?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_dcr(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        self.modify_operand(ops.dst(), alu::decrement)?;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_inx(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let pair = ops.pair();
        let value = alu::increment_double(self.regs.pair(pair));
        self.regs.set_pair(pair, value);
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_dcx(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let pair = ops.pair();
        let value = alu::decrement_double(self.regs.pair(pair));
        self.regs.set_pair(pair, value);
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_dad(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let value = alu::double_add(
            self.regs.hl.get(),
            self.regs.pair(ops.pair()),
            &mut self.flags,
        );
        self.regs.hl.set(value);
        Ok(Flow::Next)
    }

    /// RLC, RRC, RAL, RAR.
    pub(in crate::cpu) fn exec_rotate(
        &mut self,
        _io: &mut dyn IoBus,
        ops: Operands,
    ) -> Result<Flow, Fault> {
        let a = &mut self.regs.a;
        let flags = &mut self.flags;
        match ops.opcode {
            0x07 => alu::rotate_left(a, flags),
            0x0F => alu::rotate_right(a, flags),
            0x17 => alu::rotate_left_through_carry(a, flags),
            _ => alu::rotate_right_through_carry(a, flags),
        }
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_daa(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        alu::decimal_adjust(&mut self.regs.a, &mut self.flags);
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_cma(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        alu::complement(&mut self.regs.a);
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_stc(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.flags.cy = true;
        Ok(Flow::Next)
    }

    pub(in crate::cpu) fn exec_cmc(
        &mut self,
        _io: &mut dyn IoBus,
        _ops: Operands,
    ) -> Result<Flow, Fault> {
        self.flags.cy = !self.flags.cy;
        Ok(Flow::Next)
    }
}
