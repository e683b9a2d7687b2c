/// Two byte registers read together as one 16-bit value, `high` first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair {
    pub high: u8,
    pub low: u8,
}

impl RegisterPair {
    #[inline]
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    #[inline]
    pub const fn from_u16(value: u16) -> Self {
        Self {
            high: (value >> 8) as u8,
            low: value as u8,
        }
    }

    #[inline]
    pub fn get(self) -> u16 {
        u16::from_be_bytes([self.high, self.low])
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.high = high;
        self.low = low;
    }
}

/// Byte registers addressable from an opcode register field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    B,
    C,
    D,
    E,
    H,
    L,
    A,
}

/// Result of decoding a 3-bit register field.
///
/// Code 6 does not name a register: it selects the memory byte addressed by
/// HL, and every consumer has to handle it separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand8 {
    Register(Reg),
    Memory,
}

impl Operand8 {
    const TABLE: [Operand8; 8] = [
        Operand8::Register(Reg::B),
        Operand8::Register(Reg::C),
        Operand8::Register(Reg::D),
        Operand8::Register(Reg::E),
        Operand8::Register(Reg::H),
        Operand8::Register(Reg::L),
        Operand8::Memory,
        Operand8::Register(Reg::A),
    ];

    /// Resolve a register field (only the low three bits are used).
    #[inline]
    pub fn decode(code: u8) -> Self {
        Self::TABLE[(code & 0x07) as usize]
    }
}

/// Register pairs addressable from bits 4–5 of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pair {
    BC,
    DE,
    HL,
    SP,
}

impl Pair {
    const TABLE: [Pair; 4] = [Pair::BC, Pair::DE, Pair::HL, Pair::SP];

    #[inline]
    pub fn decode(code: u8) -> Self {
        Self::TABLE[(code & 0x03) as usize]
    }
}

/// Register file for the Intel 8080.
///
/// Pairs are plain values, so copying or moving the file never leaves a
/// dangling view into it. Lookups go through `Reg`/`Pair` and borrow only for
/// the duration of the call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: RegisterPair,
    /// Internal scratch pair. Holds the operand of 3-byte instructions.
    pub wz: RegisterPair,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn get(&self, reg: Reg) -> u8 {
        match reg {
            Reg::B => self.bc.high,
            Reg::C => self.bc.low,
            Reg::D => self.de.high,
            Reg::E => self.de.low,
            Reg::H => self.hl.high,
            Reg::L => self.hl.low,
            Reg::A => self.a,
        }
    }

    #[inline]
    pub fn reg_mut(&mut self, reg: Reg) -> &mut u8 {
        match reg {
            Reg::B => &mut self.bc.high,
            Reg::C => &mut self.bc.low,
            Reg::D => &mut self.de.high,
            Reg::E => &mut self.de.low,
            Reg::H => &mut self.hl.high,
            Reg::L => &mut self.hl.low,
            Reg::A => &mut self.a,
        }
    }

    #[inline]
    pub fn set(&mut self, reg: Reg, value: u8) {
        *self.reg_mut(reg) = value;
    }

    #[inline]
    pub fn pair_mut(&mut self, pair: Pair) -> &mut RegisterPair {
        match pair {
            Pair::BC => &mut self.bc,
            Pair::DE => &mut self.de,
            Pair::HL => &mut self.hl,
            Pair::SP => &mut self.sp,
        }
    }

    #[inline]
    pub fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::BC => self.bc.get(),
            Pair::DE => self.de.get(),
            Pair::HL => self.hl.get(),
            Pair::SP => self.sp.get(),
        }
    }

    #[inline]
    pub fn set_pair(&mut self, pair: Pair, value: u16) {
        self.pair_mut(pair).set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_reads_high_byte_first() {
        let pair = RegisterPair::new(0x12, 0x34);
        assert_eq!(pair.get(), 0x1234);

        let mut pair = RegisterPair::default();
        pair.set(0xBEEF);
        assert_eq!(pair.high, 0xBE);
        assert_eq!(pair.low, 0xEF);
        assert_eq!(RegisterPair::from_u16(0xBEEF), pair);
    }

    #[test]
    fn register_field_table() {
        let expected = [
            Operand8::Register(Reg::B),
            Operand8::Register(Reg::C),
            Operand8::Register(Reg::D),
            Operand8::Register(Reg::E),
            Operand8::Register(Reg::H),
            Operand8::Register(Reg::L),
            Operand8::Memory,
            Operand8::Register(Reg::A),
        ];
        for (code, want) in expected.iter().enumerate() {
            assert_eq!(Operand8::decode(code as u8), *want);
        }
        // Only the low three bits matter.
        assert_eq!(Operand8::decode(0x0F), Operand8::Register(Reg::A));
    }

    #[test]
    fn pair_field_table() {
        assert_eq!(Pair::decode(0), Pair::BC);
        assert_eq!(Pair::decode(1), Pair::DE);
        assert_eq!(Pair::decode(2), Pair::HL);
        assert_eq!(Pair::decode(3), Pair::SP);
    }

    #[test]
    fn byte_registers_alias_their_pairs() {
        let mut regs = Registers::default();
        regs.set(Reg::H, 0xAB);
        regs.set(Reg::L, 0xCD);
        assert_eq!(regs.pair(Pair::HL), 0xABCD);

        regs.set_pair(Pair::DE, 0x1122);
        assert_eq!(regs.get(Reg::D), 0x11);
        assert_eq!(regs.get(Reg::E), 0x22);

        *regs.reg_mut(Reg::C) = 0x7F;
        assert_eq!(regs.bc.get(), 0x007F);
    }

    #[test]
    fn copies_are_independent() {
        let mut regs = Registers::default();
        regs.set_pair(Pair::BC, 0x0102);
        let snapshot = regs;
        regs.set(Reg::B, 0xFF);
        assert_eq!(snapshot.pair(Pair::BC), 0x0102);
        assert_eq!(regs.pair(Pair::BC), 0xFF02);
    }
}
