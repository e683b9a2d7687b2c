use super::Cpu8080;
use crate::error::Fault;
use crate::registers::Pair;

impl Cpu8080 {
    /// Push a word: high byte to SP-1, low byte to SP-2, then SP -= 2.
    fn push_word(&mut self, value: u16) -> Result<(), Fault> {
        let sp = self.regs.sp.get();
        let [high, low] = value.to_be_bytes();
        self.memory.write(sp.wrapping_sub(1), high)?;
        self.memory.write(sp.wrapping_sub(2), low)?;
        self.regs.sp.set(sp.wrapping_sub(2));
        Ok(())
    }

    /// Pop a word: low byte from SP, high byte from SP+1, then SP += 2.
    fn pop_word(&mut self) -> Result<u16, Fault> {
        let sp = self.regs.sp.get();
        let low = self.memory.read(sp)?;
        let high = self.memory.read(sp.wrapping_add(1))?;
        self.regs.sp.set(sp.wrapping_add(2));
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Push PC and continue at `target`.
    pub fn call(&mut self, target: u16) -> Result<(), Fault> {
        self.push_word(self.regs.pc)?;
        self.regs.pc = target;
        Ok(())
    }

    /// Push PC and continue at `8 * n`.
    pub fn restart(&mut self, n: u8) -> Result<(), Fault> {
        self.call(u16::from(n & 0x07) * 8)
    }

    /// Pop PC.
    pub fn ret(&mut self) -> Result<(), Fault> {
        self.regs.pc = self.pop_word()?;
        Ok(())
    }

    /// PUSH rp. SP is not a valid operand.
    pub fn push_pair(&mut self, pair: Pair) -> Result<(), Fault> {
        if pair == Pair::SP {
            return Err(Fault::InvalidStackOperand(pair));
        }
        self.push_word(self.regs.pair(pair))
    }

    /// POP rp. SP is not a valid operand.
    pub fn pop_pair(&mut self, pair: Pair) -> Result<(), Fault> {
        if pair == Pair::SP {
            return Err(Fault::InvalidStackOperand(pair));
        }
        let value = self.pop_word()?;
        self.regs.set_pair(pair, value);
        Ok(())
    }

    /// PUSH PSW: A is the high byte, the status word the low byte.
    pub fn push_status_word(&mut self) -> Result<(), Fault> {
        let value = u16::from_be_bytes([self.regs.a, self.flags.to_u8()]);
        self.push_word(value)
    }

    pub fn pop_status_word(&mut self) -> Result<(), Fault> {
        let [a, status] = self.pop_word()?.to_be_bytes();
        self.regs.a = a;
        self.flags.apply_status_word(status);
        Ok(())
    }
}
