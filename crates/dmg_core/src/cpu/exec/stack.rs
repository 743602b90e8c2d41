use crate::cpu::opcodes::Cond;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>, addr: u16) -> bool {
        if !self.condition(cond) {
            return false;
        }
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = addr;
        true
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) -> bool {
        if !self.condition(cond) {
            return false;
        }
        self.regs.pc = self.pop_u16(bus);
        true
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        self.ime_delay = 0;
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = u16::from(vector);
    }
}
