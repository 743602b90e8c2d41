mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::opcodes::Op;
use super::{Bus, Cpu};

impl Cpu {
    /// Apply the effect of one decoded operation.
    ///
    /// PC already points past the instruction and `imm` holds its
    /// immediate operand (zero-extended for 8-bit forms). Returns `false`
    /// only when a conditional branch is not taken.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op, imm: u16) -> bool {
        let imm8 = imm as u8;
        match op {
            Op::Nop | Op::Prefix | Op::Undefined => {}
            Op::Stop => self.exec_stop(),
            Op::Halt => self.exec_halt(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Ld { dst, src } => {
                let value = self.read_r8(bus, src);
                self.write_r8(bus, dst, value);
            }
            Op::LdImm(dst) => self.write_r8(bus, dst, imm8),
            Op::LdR16Imm(rr) => self.write_r16(rr, imm),
            Op::LdIndA(ind) => self.exec_ld_indirect_a(bus, ind),
            Op::LdAInd(ind) => self.exec_ld_a_indirect(bus, ind),
            Op::LdImm16Sp => bus.write16(imm, self.regs.sp),
            Op::LdhImmA => bus.write8(0xFF00 | u16::from(imm8), self.regs.a()),
            Op::LdhAImm => {
                let value = bus.read8(0xFF00 | u16::from(imm8));
                self.regs.set_a(value);
            }
            Op::LdhCA => bus.write8(0xFF00 | u16::from(self.regs.c()), self.regs.a()),
            Op::LdhAC => {
                let value = bus.read8(0xFF00 | u16::from(self.regs.c()));
                self.regs.set_a(value);
            }
            Op::LdImm16A => bus.write8(imm, self.regs.a()),
            Op::LdAImm16 => {
                let value = bus.read8(imm);
                self.regs.set_a(value);
            }
            Op::LdSpHl => self.regs.sp = self.regs.hl(),
            Op::LdHlSpImm => self.exec_ld_hl_sp_e8(imm8),
            Op::AddSpImm => self.exec_add_sp_e8(imm8),

            Op::Inc(r) => self.exec_inc8(bus, r),
            Op::Dec(r) => self.exec_dec8(bus, r),
            Op::Inc16(rr) => self.write_r16(rr, self.read_r16(rr).wrapping_add(1)),
            Op::Dec16(rr) => self.write_r16(rr, self.read_r16(rr).wrapping_sub(1)),
            Op::AddHl(rr) => self.exec_add_hl(rr),
            Op::Alu(alu_op, r) => {
                let value = self.read_r8(bus, r);
                self.exec_alu(alu_op, value);
            }
            Op::AluImm(alu_op) => self.exec_alu(alu_op, imm8),

            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => self.exec_rotate_a(op),
            Op::Daa => self.exec_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr(cond) => return self.exec_jr(cond, imm8),
            Op::Jp(cond) => return self.exec_jp(cond, imm),
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Call(cond) => return self.exec_call(bus, cond, imm),
            Op::Ret(cond) => return self.exec_ret(bus, cond),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(rr) => {
                let value = self.read_r16_stack(rr);
                self.push_u16(bus, value);
            }
            Op::Pop(rr) => {
                let value = self.pop_u16(bus);
                self.write_r16_stack(rr, value);
            }

            Op::Shift(..) | Op::Bit(..) | Op::Res(..) | Op::Set(..) => self.exec_cb(bus, op),
        }
        true
    }
}
