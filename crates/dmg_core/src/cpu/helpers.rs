use super::opcodes::Cond;
use super::regs::{Flags, R16Stack, R8, R16};
use super::{Bus, Cpu};

impl Cpu {
    /// Read an 8-bit register or (HL).
    #[inline]
    pub(super) fn read_r8<B: Bus>(&self, bus: &B, r: R8) -> u8 {
        match r {
            R8::B => self.regs.b(),
            R8::C => self.regs.c(),
            R8::D => self.regs.d(),
            R8::E => self.regs.e(),
            R8::H => self.regs.h(),
            R8::L => self.regs.l(),
            R8::HlInd => bus.read8(self.regs.hl()),
            R8::A => self.regs.a(),
        }
    }

    /// Write an 8-bit register or (HL).
    #[inline]
    pub(super) fn write_r8<B: Bus>(&mut self, bus: &mut B, r: R8, value: u8) {
        match r {
            R8::B => self.regs.set_b(value),
            R8::C => self.regs.set_c(value),
            R8::D => self.regs.set_d(value),
            R8::E => self.regs.set_e(value),
            R8::H => self.regs.set_h(value),
            R8::L => self.regs.set_l(value),
            R8::HlInd => bus.write8(self.regs.hl(), value),
            R8::A => self.regs.set_a(value),
        }
    }

    #[inline]
    pub(super) fn read_r16(&self, rr: R16) -> u16 {
        match rr {
            R16::BC => self.regs.bc(),
            R16::DE => self.regs.de(),
            R16::HL => self.regs.hl(),
            R16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_r16(&mut self, rr: R16, value: u16) {
        match rr {
            R16::BC => self.regs.set_bc(value),
            R16::DE => self.regs.set_de(value),
            R16::HL => self.regs.set_hl(value),
            R16::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn read_r16_stack(&self, rr: R16Stack) -> u16 {
        match rr {
            R16Stack::BC => self.regs.bc(),
            R16Stack::DE => self.regs.de(),
            R16Stack::HL => self.regs.hl(),
            R16Stack::AF => self.regs.af(),
        }
    }

    #[inline]
    pub(super) fn write_r16_stack(&mut self, rr: R16Stack, value: u16) {
        match rr {
            R16Stack::BC => self.regs.set_bc(value),
            R16Stack::DE => self.regs.set_de(value),
            R16Stack::HL => self.regs.set_hl(value),
            R16Stack::AF => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Option<Cond>) -> bool {
        let flags = self.regs.f();
        match cond {
            None => true,
            Some(Cond::NZ) => !flags.contains(Flags::Z),
            Some(Cond::Z) => flags.contains(Flags::Z),
            Some(Cond::NC) => !flags.contains(Flags::C),
            Some(Cond::C) => flags.contains(Flags::C),
        }
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // memory[SP+1] = high, memory[SP] = low after the push.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}
