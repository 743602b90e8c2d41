use crate::cpu::alu;
use crate::cpu::regs::{R8, R16};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let (result, flags) = alu::inc8(value, self.regs.f());
        self.write_r8(bus, r, result);
        self.regs.set_f(flags);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, r: R8) {
        let value = self.read_r8(bus, r);
        let (result, flags) = alu::dec8(value, self.regs.f());
        self.write_r8(bus, r, result);
        self.regs.set_f(flags);
    }

    pub(super) fn exec_add_hl(&mut self, rr: R16) {
        let value = self.read_r16(rr);
        let (result, flags) = alu::add16(self.regs.hl(), value, self.regs.f());
        self.regs.set_hl(result);
        self.regs.set_f(flags);
    }
}
