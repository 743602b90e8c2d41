use super::alu;
use super::opcodes::Op;
use super::{Bus, Cpu};

impl Cpu {
    /// CB-prefixed instructions: rotates/shifts, BIT, RES and SET.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Shift(shift, r) => {
                let value = self.read_r8(bus, r);
                let (result, flags) = alu::shift(shift, value, self.regs.f());
                self.write_r8(bus, r, result);
                self.regs.set_f(flags);
            }
            Op::Bit(index, r) => {
                let value = self.read_r8(bus, r);
                let flags = alu::bit(index, value, self.regs.f());
                self.regs.set_f(flags);
            }
            Op::Res(index, r) => {
                let value = self.read_r8(bus, r) & !(1 << index);
                self.write_r8(bus, r, value);
            }
            Op::Set(index, r) => {
                let value = self.read_r8(bus, r) | (1 << index);
                self.write_r8(bus, r, value);
            }
            _ => {}
        }
    }
}
