use crate::cpu::alu;
use crate::cpu::opcodes::{AluOp, Op, ShiftOp};
use crate::cpu::regs::Flags;
use crate::cpu::Cpu;

impl Cpu {
    /// Eight-way accumulator ALU shared by `op A,r` and `op A,d8`.
    pub(super) fn exec_alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a();
        let carry = self.regs.flag(Flags::C);
        let (result, flags) = match op {
            AluOp::Add => alu::add8(a, value, false),
            AluOp::Adc => alu::add8(a, value, carry),
            AluOp::Sub => alu::sub8(a, value, false),
            AluOp::Sbc => alu::sub8(a, value, carry),
            AluOp::And => alu::and8(a, value),
            AluOp::Xor => alu::xor8(a, value),
            AluOp::Or => alu::or8(a, value),
            AluOp::Cp => {
                let (_, flags) = alu::sub8(a, value, false);
                (a, flags)
            }
        };
        self.regs.set_a(result);
        self.regs.set_f(flags);
    }

    /// RLCA/RRCA/RLA/RRA: same bit movement as the CB forms, but Z is
    /// always cleared.
    pub(super) fn exec_rotate_a(&mut self, op: Op) {
        let shift = match op {
            Op::Rlca => ShiftOp::Rlc,
            Op::Rrca => ShiftOp::Rrc,
            Op::Rla => ShiftOp::Rl,
            _ => ShiftOp::Rr,
        };
        let (result, flags) = alu::shift(shift, self.regs.a(), self.regs.f());
        self.regs.set_a(result);
        self.regs.set_f(flags - Flags::Z);
    }

    pub(super) fn exec_daa(&mut self) {
        let (result, flags) = alu::daa(self.regs.a(), self.regs.f());
        self.regs.set_a(result);
        self.regs.set_f(flags);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.set_a(!self.regs.a());
        self.regs.set_flag(Flags::N, true);
        self.regs.set_flag(Flags::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        let z = self.regs.f() & Flags::Z;
        self.regs.set_f(z | Flags::C);
    }

    pub(super) fn exec_ccf(&mut self) {
        let flags = self.regs.f();
        let mut out = flags & Flags::Z;
        out.set(Flags::C, !flags.contains(Flags::C));
        self.regs.set_f(out);
    }

    pub(super) fn exec_add_sp_e8(&mut self, e8: u8) {
        let (result, flags) = alu::add_sp_e8(self.regs.sp, e8);
        self.regs.sp = result;
        self.regs.set_f(flags);
    }
}
