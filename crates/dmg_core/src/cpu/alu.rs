//! Flag arithmetic.
//!
//! Every helper is a pure function of its inputs and returns the result
//! together with the complete new flag set; the caller decides where the
//! result goes. Helpers that preserve a flag take the current flags as
//! input and carry the preserved bit through.

use super::opcodes::ShiftOp;
use super::regs::Flags;

#[inline]
fn zero(value: u8) -> Flags {
    if value == 0 {
        Flags::Z
    } else {
        Flags::empty()
    }
}

/// 8-bit ADD/ADC.
pub fn add8(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let c = u8::from(carry_in);
    let half = (a & 0x0F) + (b & 0x0F) + c;
    let full = u16::from(a) + u16::from(b) + u16::from(c);
    let result = full as u8;

    let mut flags = zero(result);
    flags.set(Flags::H, half > 0x0F);
    flags.set(Flags::C, full > 0xFF);
    (result, flags)
}

/// 8-bit SUB/SBC. CP uses this and drops the result.
pub fn sub8(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let c = i16::from(carry_in);
    let half = i16::from(a & 0x0F) - i16::from(b & 0x0F) - c;
    let full = i16::from(a) - i16::from(b) - c;
    let result = full as u8;

    let mut flags = zero(result) | Flags::N;
    flags.set(Flags::H, half < 0);
    flags.set(Flags::C, full < 0);
    (result, flags)
}

#[inline]
pub fn and8(a: u8, b: u8) -> (u8, Flags) {
    let result = a & b;
    (result, zero(result) | Flags::H)
}

#[inline]
pub fn or8(a: u8, b: u8) -> (u8, Flags) {
    let result = a | b;
    (result, zero(result))
}

#[inline]
pub fn xor8(a: u8, b: u8) -> (u8, Flags) {
    let result = a ^ b;
    (result, zero(result))
}

/// INC r / INC (HL). C is carried over from `flags`.
#[inline]
pub fn inc8(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut out = zero(result) | (flags & Flags::C);
    out.set(Flags::H, (value & 0x0F) == 0x0F);
    (result, out)
}

/// DEC r / DEC (HL). C is carried over from `flags`.
#[inline]
pub fn dec8(value: u8, flags: Flags) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut out = zero(result) | Flags::N | (flags & Flags::C);
    out.set(Flags::H, (value & 0x0F) == 0x00);
    (result, out)
}

/// ADD HL,rr: Z preserved, N cleared, H from bit 11, C from bit 15.
pub fn add16(hl: u16, value: u16, flags: Flags) -> (u16, Flags) {
    let (result, carry) = hl.overflowing_add(value);
    let mut out = flags & Flags::Z;
    out.set(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    out.set(Flags::C, carry);
    (result, out)
}

/// SP plus a signed displacement, shared by ADD SP,e8 and LD HL,SP+e8.
///
/// H and C come from the unsigned addition of the low byte; Z and N are
/// always cleared.
pub fn add_sp_e8(sp: u16, e8: u8) -> (u16, Flags) {
    let offset = e8 as i8 as i16 as u16;
    let mut flags = Flags::empty();
    flags.set(Flags::H, (sp & 0x000F) + (offset & 0x000F) > 0x000F);
    flags.set(Flags::C, (sp & 0x00FF) + (offset & 0x00FF) > 0x00FF);
    (sp.wrapping_add(offset), flags)
}

/// Decimal adjust after a BCD add or subtract. N is preserved.
pub fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let mut adjust: u8 = if flags.contains(Flags::C) { 0x60 } else { 0x00 };
    if flags.contains(Flags::H) {
        adjust |= 0x06;
    }

    let result = if !flags.contains(Flags::N) {
        if (a & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if a > 0x99 {
            adjust |= 0x60;
        }
        a.wrapping_add(adjust)
    } else {
        a.wrapping_sub(adjust)
    };

    let mut out = zero(result) | (flags & Flags::N);
    out.set(Flags::C, adjust >= 0x60);
    (result, out)
}

/// CB-prefixed rotate/shift family. Z reflects the result.
///
/// The unprefixed accumulator rotates reuse this and then clear Z.
pub fn shift(op: ShiftOp, value: u8, flags: Flags) -> (u8, Flags) {
    let carry_in = flags.contains(Flags::C);
    let (result, carry_out) = match op {
        ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        ShiftOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
        ShiftOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
        ShiftOp::Sla => (value << 1, value & 0x80 != 0),
        ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        ShiftOp::Swap => (value.rotate_left(4), false),
        ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
    };

    let mut out = zero(result);
    out.set(Flags::C, carry_out);
    (result, out)
}

/// BIT b,r: Z from the tested bit, H set, N cleared, C preserved.
#[inline]
pub fn bit(index: u8, value: u8, flags: Flags) -> Flags {
    let mut out = Flags::H | (flags & Flags::C);
    out.set(Flags::Z, value & (1 << index) == 0);
    out
}
