//! Read-only views of the CPU for debuggers and trace output.

use std::fmt;

use super::opcodes::{self, Instruction};
use super::{Bus, Cpu};

/// Immediate operand of a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Imm8(u8),
    Imm16(u16),
}

impl Operand {
    /// Width in bytes.
    pub const fn width(self) -> u8 {
        match self {
            Operand::None => 0,
            Operand::Imm8(_) => 1,
            Operand::Imm16(_) => 2,
        }
    }
}

/// One instruction decoded from memory without executing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub addr: u16,
    pub opcode: u8,
    pub prefixed: bool,
    /// Mnemonic with operand placeholders (`d8`, `d16`, `a8`, `a16`, `r8`).
    pub mnemonic: &'static str,
    pub length: u8,
    pub operand: Operand,
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}: ", self.addr)?;
        let m = self.mnemonic;
        match self.operand {
            Operand::None => f.write_str(m),
            Operand::Imm8(value) => {
                let text = if m.contains("+r8") {
                    m.replace("+r8", &format!("{:+}", value as i8))
                } else if m.contains("r8") {
                    m.replace("r8", &format!("{:+}", value as i8))
                } else if m.contains("a8") {
                    m.replace("a8", &format!("$FF{:02X}", value))
                } else {
                    m.replace("d8", &format!("${:02X}", value))
                };
                f.write_str(&text)
            }
            Operand::Imm16(value) => {
                let text = m
                    .replace("d16", &format!("${:04X}", value))
                    .replace("a16", &format!("${:04X}", value));
                f.write_str(&text)
            }
        }
    }
}

/// Copy of the register file plus execution state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub ime: bool,
    pub halted: bool,
    pub stopped: bool,
    pub locked: bool,
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X}",
            self.a, self.f, self.b, self.c, self.d, self.e, self.h, self.l, self.sp, self.pc
        )
    }
}

impl Cpu {
    /// Decode the instruction at `addr` without side effects.
    pub fn decode_at<B: Bus + ?Sized>(bus: &B, addr: u16) -> DecodedInstruction {
        let opcode = bus.read8(addr);
        let next = addr.wrapping_add(1);
        let instr: &'static Instruction = if opcode == 0xCB {
            opcodes::cb(bus.read8(next))
        } else {
            opcodes::base(opcode)
        };
        let operand = match (instr.prefixed, instr.op.operand_width()) {
            (false, 1) => Operand::Imm8(bus.read8(next)),
            (false, 2) => Operand::Imm16(bus.read16(next)),
            _ => Operand::None,
        };
        DecodedInstruction {
            addr,
            opcode: instr.opcode,
            prefixed: instr.prefixed,
            mnemonic: instr.mnemonic.as_str(),
            length: instr.length,
            operand,
        }
    }

    /// Decode the instruction PC points at.
    pub fn current_instruction<B: Bus + ?Sized>(&self, bus: &B) -> DecodedInstruction {
        Self::decode_at(bus, self.regs.pc)
    }

    pub fn snapshot(&self) -> RegisterSnapshot {
        let r = &self.regs;
        RegisterSnapshot {
            a: r.a(),
            f: r.f().bits(),
            b: r.b(),
            c: r.c(),
            d: r.d(),
            e: r.e(),
            h: r.h(),
            l: r.l(),
            sp: r.sp,
            pc: r.pc,
            ime: self.ime,
            halted: self.halted,
            stopped: self.stopped,
            locked: self.locked.is_some(),
        }
    }
}
