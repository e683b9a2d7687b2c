use bitflags::bitflags;

bitflags! {
    /// Bit layout of the processor status word pushed by `PUSH PSW`.
    ///
    /// ```text
    ///   7   6   5    4   3   2   1    0
    /// | S | Z | 0 | AC | 0 | P | 1 | CY |
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StatusWord: u8 {
        const CARRY = 0x01;
        /// Bit 1 always reads as one.
        const ALWAYS_ONE = 0x02;
        const PARITY = 0x04;
        const AUX_CARRY = 0x10;
        const ZERO = 0x40;
        const SIGN = 0x80;
    }
}

/// CPU flags for Intel 8080.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity
    pub cy: bool, // carry
    pub ac: bool, // auxiliary carry
}

impl Flags {
    /// Pack the flags into a status word. Bit 1 is always set; bits 3 and 5
    /// are always clear.
    pub fn status_word(self) -> StatusWord {
        let mut word = StatusWord::ALWAYS_ONE;
        word.set(StatusWord::SIGN, self.s);
        word.set(StatusWord::ZERO, self.z);
        word.set(StatusWord::AUX_CARRY, self.ac);
        word.set(StatusWord::PARITY, self.p);
        word.set(StatusWord::CARRY, self.cy);
        word
    }

    pub fn to_u8(self) -> u8 {
        self.status_word().bits()
    }

    /// Restore all five flags from a status word byte. The fixed bits are
    /// ignored.
    pub fn apply_status_word(&mut self, value: u8) {
        let word = StatusWord::from_bits_truncate(value);
        self.s = word.contains(StatusWord::SIGN);
        self.z = word.contains(StatusWord::ZERO);
        self.ac = word.contains(StatusWord::AUX_CARRY);
        self.p = word.contains(StatusWord::PARITY);
        self.cy = word.contains(StatusWord::CARRY);
    }

    /// Update Zero, Sign and Parity from an 8-bit result.
    #[inline]
    pub fn set_szp(&mut self, value: u8) {
        self.z = value == 0;
        self.s = (value & 0x80) != 0;
        self.p = parity(value);
    }

    /// Evaluate a branch condition against the current flags.
    pub fn test(self, condition: Condition) -> bool {
        match condition {
            Condition::NotZero => !self.z,
            Condition::Zero => self.z,
            Condition::NoCarry => !self.cy,
            Condition::Carry => self.cy,
            Condition::ParityOdd => !self.p,
            Condition::ParityEven => self.p,
            Condition::Plus => !self.s,
            Condition::Minus => self.s,
        }
    }
}

/// True when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

/// Branch conditions encoded in bits 3–5 of Jcc/Ccc/Rcc opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const TABLE: [Condition; 8] = [
        Condition::NotZero,
        Condition::Zero,
        Condition::NoCarry,
        Condition::Carry,
        Condition::ParityOdd,
        Condition::ParityEven,
        Condition::Plus,
        Condition::Minus,
    ];

    /// Resolve the 3-bit condition field of an opcode.
    #[inline]
    pub fn decode(code: u8) -> Self {
        Self::TABLE[(code & 0x07) as usize]
    }
}
