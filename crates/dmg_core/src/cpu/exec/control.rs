use crate::cpu::opcodes::Cond;
use crate::cpu::Cpu;

impl Cpu {
    /// JR / JR cc. The displacement is relative to the address after the
    /// operand, which is where PC already points.
    pub(super) fn exec_jr(&mut self, cond: Option<Cond>, e8: u8) -> bool {
        if !self.condition(cond) {
            return false;
        }
        let offset = e8 as i8 as i16 as u16;
        self.regs.pc = self.regs.pc.wrapping_add(offset);
        true
    }

    pub(super) fn exec_jp(&mut self, cond: Option<Cond>, addr: u16) -> bool {
        if !self.condition(cond) {
            return false;
        }
        self.regs.pc = addr;
        true
    }
}
