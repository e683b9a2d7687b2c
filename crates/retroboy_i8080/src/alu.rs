//! Arithmetic and logic operations of the 8080.
//!
//! Every operation takes the register it works on and the flags by mutable
//! reference for the duration of the call; nothing here holds on to CPU
//! state. Each function lists the flags it touches.

use crate::flags::Flags;

/// 8-bit sum with carry-in. Returns the masked result, the carry out of
/// bit 7 and the carry out of bit 3.
#[inline]
fn sum(lhs: u8, rhs: u8, carry_in: bool) -> (u8, bool, bool) {
    let carry = carry_in as u8;
    let full = lhs as u16 + rhs as u16 + carry as u16;
    let half = (lhs & 0x0F) + (rhs & 0x0F) + carry;
    (full as u8, full > 0xFF, half > 0x0F)
}

/// `lhs - rhs - borrow_in` computed as `lhs + !rhs + !borrow_in`.
///
/// The carries out of the two's-complement addition are inverted, so the
/// returned flags mean "a borrow occurred" (from bit 8 and from bit 4).
#[inline]
fn difference(lhs: u8, rhs: u8, borrow_in: bool) -> (u8, bool, bool) {
    let (result, carry, aux) = sum(lhs, !rhs, !borrow_in);
    (result, !carry, !aux)
}

#[inline]
fn store(a: &mut u8, flags: &mut Flags, (result, carry, aux): (u8, bool, bool)) {
    flags.set_szp(result);
    flags.cy = carry;
    flags.ac = aux;
    *a = result;
}

/// ADD: `A + value`. Affects Z, S, P, CY, AC.
pub fn add(a: &mut u8, value: u8, flags: &mut Flags) {
    store(a, flags, sum(*a, value, false));
}

/// ADC: `A + value + CY`. Affects Z, S, P, CY, AC.
pub fn add_with_carry(a: &mut u8, value: u8, flags: &mut Flags) {
    let carry = flags.cy;
    store(a, flags, sum(*a, value, carry));
}

/// SUB: `A - value`. CY set on borrow. Affects Z, S, P, CY, AC.
pub fn sub(a: &mut u8, value: u8, flags: &mut Flags) {
    store(a, flags, difference(*a, value, false));
}

/// SBB: `A - value - CY`. CY set on borrow. Affects Z, S, P, CY, AC.
pub fn sub_with_borrow(a: &mut u8, value: u8, flags: &mut Flags) {
    let borrow = flags.cy;
    store(a, flags, difference(*a, value, borrow));
}

/// CMP: flags of `A - value`, A is left alone. Affects Z, S, P, CY, AC.
pub fn compare(a: u8, value: u8, flags: &mut Flags) {
    let mut scratch = a;
    store(&mut scratch, flags, difference(a, value, false));
}

/// DAD: 16-bit sum. Affects CY only.
pub fn double_add(lhs: u16, rhs: u16, flags: &mut Flags) -> u16 {
    let full = lhs as u32 + rhs as u32;
    flags.cy = full > 0xFFFF;
    full as u16
}

/// INR. Affects Z, S, P, AC. Carry flag is not affected.
pub fn increment(value: &mut u8, flags: &mut Flags) {
    let (result, _, aux) = sum(*value, 1, false);
    flags.set_szp(result);
    flags.ac = aux;
    *value = result;
}

/// DCR. Affects Z, S, P, AC. Carry flag is not affected.
pub fn decrement(value: &mut u8, flags: &mut Flags) {
    let (result, _, aux) = difference(*value, 1, false);
    flags.set_szp(result);
    flags.ac = aux;
    *value = result;
}

/// INX. No flags.
#[inline]
pub fn increment_double(value: u16) -> u16 {
    value.wrapping_add(1)
}

/// DCX. No flags.
#[inline]
pub fn decrement_double(value: u16) -> u16 {
    value.wrapping_sub(1)
}

/// RLC: bit 7 goes to both CY and bit 0.
pub fn rotate_left(a: &mut u8, flags: &mut Flags) {
    flags.cy = (*a & 0x80) != 0;
    *a = a.rotate_left(1);
}

/// RRC: bit 0 goes to both CY and bit 7.
pub fn rotate_right(a: &mut u8, flags: &mut Flags) {
    flags.cy = (*a & 0x01) != 0;
    *a = a.rotate_right(1);
}

/// RAL: old CY enters bit 0, bit 7 becomes CY.
pub fn rotate_left_through_carry(a: &mut u8, flags: &mut Flags) {
    let bit7 = (*a & 0x80) != 0;
    *a = (*a << 1) | flags.cy as u8;
    flags.cy = bit7;
}

/// RAR: old CY enters bit 7, bit 0 becomes CY.
pub fn rotate_right_through_carry(a: &mut u8, flags: &mut Flags) {
    let bit0 = (*a & 0x01) != 0;
    *a = (*a >> 1) | if flags.cy { 0x80 } else { 0 };
    flags.cy = bit0;
}

/// ANA. Clears CY; AC takes bit 3 of `A | value` as the 8080 does.
pub fn and(a: &mut u8, value: u8, flags: &mut Flags) {
    let result = *a & value;
    flags.ac = ((*a | value) & 0x08) != 0;
    flags.cy = false;
    flags.set_szp(result);
    *a = result;
}

/// ORA. Clears CY and AC.
pub fn or(a: &mut u8, value: u8, flags: &mut Flags) {
    let result = *a | value;
    flags.ac = false;
    flags.cy = false;
    flags.set_szp(result);
    *a = result;
}

/// XRA. Clears CY and AC.
pub fn xor(a: &mut u8, value: u8, flags: &mut Flags) {
    let result = *a ^ value;
    flags.ac = false;
    flags.cy = false;
    flags.set_szp(result);
    *a = result;
}

/// DAA: turn the accumulator into two BCD digits.
///
/// 1. If the low nibble is above 9 or AC is set, add 6. AC becomes the carry
///    out of bit 3 from that addition.
/// 2. If the high nibble is now above 9 or CY is set, add 6 to the high
///    nibble. CY stays set if it was, and is set if this overflows.
///
/// Z, S and P follow the final value.
pub fn decimal_adjust(a: &mut u8, flags: &mut Flags) {
    let mut value = *a as u16;
    let mut aux = false;

    if (value & 0x0F) > 9 || flags.ac {
        aux = (value & 0x0F) + 6 > 0x0F;
        value += 0x06;
    }

    if (value >> 4) > 9 || flags.cy {
        value += 0x60;
    }

    let result = value as u8;
    flags.cy = flags.cy || value > 0xFF;
    flags.ac = aux;
    flags.set_szp(result);
    *a = result;
}

/// CMA. No flags.
#[inline]
pub fn complement(a: &mut u8) {
    *a = !*a;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_after<F: FnOnce(&mut u8, &mut Flags)>(a: u8, seed: Flags, op: F) -> (u8, Flags) {
        let mut a = a;
        let mut flags = seed;
        op(&mut a, &mut flags);
        (a, flags)
    }

    #[test]
    fn add_flags_hold_for_every_operand_pair() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (result, flags) = flags_after(a, Flags::default(), |acc, f| add(acc, b, f));
                let wide = a as u16 + b as u16;
                assert_eq!(result, wide as u8);
                assert_eq!(flags.z, wide & 0xFF == 0, "{a:02X}+{b:02X}");
                assert_eq!(flags.cy, wide > 0xFF, "{a:02X}+{b:02X}");
                assert_eq!(flags.s, (wide & 0x80) != 0, "{a:02X}+{b:02X}");
                assert_eq!(flags.p, (wide as u8).count_ones() % 2 == 0);
                assert_eq!(flags.ac, (a & 0x0F) + (b & 0x0F) > 0x0F);
            }
        }
    }

    #[test]
    fn add_sign_bit_overflow_sets_zero_and_carry() {
        let (a, flags) = flags_after(0x80, Flags::default(), |acc, f| add(acc, 0x80, f));
        assert_eq!(a, 0x00);
        assert!(flags.z);
        assert!(flags.cy);
        assert!(!flags.s);
        assert!(flags.p);
        assert!(!flags.ac);
    }

    #[test]
    fn add_aux_carry_from_low_nibble() {
        let (a, flags) = flags_after(0x2E, Flags::default(), |acc, f| add(acc, 0x74, f));
        assert_eq!(a, 0xA2);
        assert!(flags.ac);
        assert!(flags.s);
        assert!(!flags.cy);
        assert!(!flags.p);
    }

    #[test]
    fn adc_uses_incoming_carry() {
        let seed = Flags {
            cy: true,
            ..Flags::default()
        };
        let (a, flags) = flags_after(0x3D, seed, |acc, f| add_with_carry(acc, 0x42, f));
        assert_eq!(a, 0x80);
        assert!(!flags.cy);
        assert!(flags.s);
        assert!(flags.ac);

        let (a, flags) = flags_after(0xFF, seed, |acc, f| add_with_carry(acc, 0x00, f));
        assert_eq!(a, 0x00);
        assert!(flags.cy);
        assert!(flags.z);
    }

    #[test]
    fn sub_sets_borrow_for_every_operand_pair() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (result, flags) = flags_after(a, Flags::default(), |acc, f| sub(acc, b, f));
                assert_eq!(result, a.wrapping_sub(b));
                assert_eq!(flags.cy, a < b, "{a:02X}-{b:02X}");
                assert_eq!(flags.z, a == b);
                assert_eq!(flags.ac, (a & 0x0F) < (b & 0x0F), "{a:02X}-{b:02X}");
            }
        }
    }

    #[test]
    fn sub_self_clears_accumulator() {
        let (a, flags) = flags_after(0x3E, Flags::default(), |acc, f| sub(acc, 0x3E, f));
        assert_eq!(a, 0);
        assert!(flags.z);
        assert!(!flags.cy);
        assert!(flags.p);
        assert!(!flags.ac);
    }

    #[test]
    fn sbb_subtracts_incoming_borrow() {
        let seed = Flags {
            cy: true,
            ..Flags::default()
        };
        let (a, flags) = flags_after(0x04, seed, |acc, f| sub_with_borrow(acc, 0x02, f));
        assert_eq!(a, 0x01);
        assert!(!flags.cy);

        let (a, flags) = flags_after(0x02, seed, |acc, f| sub_with_borrow(acc, 0x02, f));
        assert_eq!(a, 0xFF);
        assert!(flags.cy);
        assert!(flags.s);
        assert!(flags.ac);

        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (result, flags) = flags_after(a, seed, |acc, f| sub_with_borrow(acc, b, f));
                assert_eq!(result, a.wrapping_sub(b).wrapping_sub(1));
                assert_eq!(flags.cy, (a as u16) < b as u16 + 1);
            }
        }
    }

    #[test]
    fn compare_leaves_accumulator() {
        let mut flags = Flags::default();
        compare(0x05, 0x05, &mut flags);
        assert!(flags.z);
        assert!(!flags.cy);

        compare(0x02, 0x05, &mut flags);
        assert!(!flags.z);
        assert!(flags.cy);

        compare(0x0A, 0x05, &mut flags);
        assert!(!flags.z);
        assert!(!flags.cy);
    }

    #[test]
    fn double_add_only_touches_carry() {
        let seed = Flags {
            z: true,
            s: true,
            p: true,
            ac: true,
            cy: false,
        };
        let mut flags = seed;
        assert_eq!(double_add(0xFFFF, 0x0001, &mut flags), 0x0000);
        assert!(flags.cy);
        assert!(flags.z && flags.s && flags.p && flags.ac);

        assert_eq!(double_add(0x339F, 0xA17B, &mut flags), 0xD51A);
        assert!(!flags.cy);
    }

    #[test]
    fn increment_and_decrement_never_touch_carry() {
        for seed_carry in [false, true] {
            for x in 0..=255u8 {
                let seed = Flags {
                    cy: seed_carry,
                    ..Flags::default()
                };
                let (up, flags) = flags_after(x, seed, increment);
                assert_eq!(up, x.wrapping_add(1));
                assert_eq!(flags.cy, seed_carry);
                assert_eq!(flags.z, up == 0);
                assert_eq!(flags.ac, x & 0x0F == 0x0F);

                let (down, flags) = flags_after(x, seed, decrement);
                assert_eq!(down, x.wrapping_sub(1));
                assert_eq!(flags.cy, seed_carry);
                assert_eq!(flags.z, down == 0);
                assert_eq!(flags.ac, x & 0x0F == 0x00);
            }
        }
    }

    #[test]
    fn double_increments_wrap() {
        assert_eq!(increment_double(0xFFFF), 0x0000);
        assert_eq!(increment_double(0x00FF), 0x0100);
        assert_eq!(decrement_double(0x0000), 0xFFFF);
        assert_eq!(decrement_double(0x0100), 0x00FF);
    }

    #[test]
    fn rotates_fill_from_shifted_bit() {
        let (a, flags) = flags_after(0xF2, Flags::default(), rotate_left);
        assert_eq!(a, 0xE5);
        assert!(flags.cy);

        let (a, flags) = flags_after(0xF2, Flags::default(), rotate_right);
        assert_eq!(a, 0x79);
        assert!(!flags.cy);

        let (a, flags) = flags_after(0x01, Flags::default(), rotate_right);
        assert_eq!(a, 0x80);
        assert!(flags.cy);
    }

    #[test]
    fn rotates_through_carry_use_previous_carry() {
        let (a, flags) = flags_after(0xB5, Flags::default(), rotate_left_through_carry);
        assert_eq!(a, 0x6A);
        assert!(flags.cy);

        let seed = Flags {
            cy: true,
            ..Flags::default()
        };
        let (a, flags) = flags_after(0x6A, seed, rotate_right_through_carry);
        assert_eq!(a, 0xB5);
        assert!(!flags.cy);

        let (a, flags) = flags_after(0x00, seed, rotate_left_through_carry);
        assert_eq!(a, 0x01);
        assert!(!flags.cy);
    }

    #[test]
    fn rotates_leave_other_flags() {
        let seed = Flags {
            z: true,
            s: true,
            p: true,
            ac: true,
            cy: false,
        };
        let (_, flags) = flags_after(0x80, seed, rotate_left);
        assert!(flags.z && flags.s && flags.p && flags.ac);
    }

    #[test]
    fn logic_ops_clear_carry() {
        let seed = Flags {
            cy: true,
            ac: true,
            ..Flags::default()
        };

        let (a, flags) = flags_after(0xFC, seed, |acc, f| and(acc, 0x0F, f));
        assert_eq!(a, 0x0C);
        assert!(!flags.cy);
        assert!(flags.ac);
        assert!(flags.p);

        let (a, flags) = flags_after(0x33, seed, |acc, f| or(acc, 0x0F, f));
        assert_eq!(a, 0x3F);
        assert!(!flags.cy);
        assert!(!flags.ac);

        let (a, flags) = flags_after(0x5C, seed, |acc, f| xor(acc, 0x5C, f));
        assert_eq!(a, 0x00);
        assert!(flags.z);
        assert!(!flags.cy);
        assert!(!flags.ac);

        let (_, flags) = flags_after(0x30, seed, |acc, f| and(acc, 0x40, f));
        assert!(!flags.ac);
    }

    #[test]
    fn daa_adjusts_low_nibble_once() {
        let seed = Flags {
            ac: true,
            ..Flags::default()
        };
        let (a, flags) = flags_after(0x11, seed, decimal_adjust);
        assert_eq!(a, 0x17);
        assert!(!flags.cy);
        assert!(!flags.ac);
    }

    #[test]
    fn daa_after_bcd_addition() {
        // 0x38 + 0x45 = 0x7D, adjusted to 83.
        let mut a = 0x38u8;
        let mut flags = Flags::default();
        add(&mut a, 0x45, &mut flags);
        decimal_adjust(&mut a, &mut flags);
        assert_eq!(a, 0x83);
        assert!(!flags.cy);

        // 0x99 + 0x01 = 100 in BCD: 0x00 with carry.
        let mut a = 0x99u8;
        let mut flags = Flags::default();
        add(&mut a, 0x01, &mut flags);
        decimal_adjust(&mut a, &mut flags);
        assert_eq!(a, 0x00);
        assert!(flags.cy);
        assert!(flags.z);
    }

    #[test]
    fn daa_manual_example() {
        // Example from the 8080 programming manual.
        let (a, flags) = flags_after(0x9B, Flags::default(), decimal_adjust);
        assert_eq!(a, 0x01);
        assert!(flags.cy);
        assert!(flags.ac);
    }

    #[test]
    fn daa_keeps_existing_carry() {
        let seed = Flags {
            cy: true,
            ..Flags::default()
        };
        let (a, flags) = flags_after(0x00, seed, decimal_adjust);
        assert_eq!(a, 0x60);
        assert!(flags.cy);
    }

    #[test]
    fn complement_flips_bits_only() {
        let mut a = 0x51u8;
        complement(&mut a);
        assert_eq!(a, 0xAE);
    }
}
