use crate::cpu::alu;
use crate::cpu::opcodes::Indirect;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Resolve `(BC)`, `(DE)`, `(HL+)` or `(HL-)`, applying the post
    /// increment/decrement to HL.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HLInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HLDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a());
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(super) fn exec_ld_hl_sp_e8(&mut self, e8: u8) {
        let (result, flags) = alu::add_sp_e8(self.regs.sp, e8);
        self.regs.set_hl(result);
        self.regs.set_f(flags);
    }
}
