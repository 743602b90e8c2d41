//! Instruction descriptor tables.
//!
//! Two 256-entry tables are built once on first use: the base table and
//! the CB-prefixed table. Each entry carries the byte length, the base
//! cycle cost, the not-taken cost for conditional control flow and the
//! decoded operation the executor dispatches on.

use std::fmt;

use lazy_static::lazy_static;

use super::regs::{R16Stack, R8, R16};

/// Branch condition for JR/JP/CALL/RET.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    const fn from_index(index: u8) -> Cond {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        }
    }
}

/// Memory operand for `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    HLInc,
    HLDec,
}

impl Indirect {
    const fn from_index(index: u8) -> Indirect {
        match index & 0x03 {
            0 => Indirect::BC,
            1 => Indirect::DE,
            2 => Indirect::HLInc,
            _ => Indirect::HLDec,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HLInc => "(HL+)",
            Indirect::HLDec => "(HL-)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> AluOp {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    /// Mnemonic prefix including the implicit `A,` operand where the
    /// canonical syntax spells it out.
    const fn prefix(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const fn from_index(index: u8) -> ShiftOp {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        }
    }
}

/// Decoded operation. Operands that come from the instruction stream are
/// not stored here; the executor receives them separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// 0xCB: selects the second table, no effect of its own.
    Prefix,
    Undefined,

    Ld { dst: R8, src: R8 },
    LdImm(R8),
    LdR16Imm(R16),
    LdIndA(Indirect),
    LdAInd(Indirect),
    LdImm16Sp,
    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdImm16A,
    LdAImm16,
    LdSpHl,
    LdHlSpImm,
    AddSpImm,

    Inc(R8),
    Dec(R8),
    Inc16(R16),
    Dec16(R16),
    AddHl(R16),
    Alu(AluOp, R8),
    AluImm(AluOp),

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr(Option<Cond>),
    Jp(Option<Cond>),
    JpHl,
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u8),
    Push(R16Stack),
    Pop(R16Stack),

    Shift(ShiftOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

impl Op {
    /// Number of immediate bytes following the opcode (0, 1 or 2).
    pub const fn operand_width(self) -> u8 {
        match self {
            Op::Stop
            | Op::LdImm(_)
            | Op::LdhImmA
            | Op::LdhAImm
            | Op::LdHlSpImm
            | Op::AddSpImm
            | Op::AluImm(_)
            | Op::Jr(_) => 1,
            Op::LdR16Imm(_)
            | Op::LdImm16Sp
            | Op::LdImm16A
            | Op::LdAImm16
            | Op::Jp(_)
            | Op::Call(_) => 2,
            _ => 0,
        }
    }

    /// `(cycles, not_taken_cycles)` in clock cycles.
    ///
    /// The second value differs from the first only for the conditional
    /// forms of JR/JP/CALL/RET.
    const fn timing(self) -> (u32, u32) {
        match self {
            Op::Nop
            | Op::Stop
            | Op::Halt
            | Op::Di
            | Op::Ei
            | Op::Prefix
            | Op::Undefined
            | Op::Rlca
            | Op::Rrca
            | Op::Rla
            | Op::Rra
            | Op::Daa
            | Op::Cpl
            | Op::Scf
            | Op::Ccf
            | Op::JpHl => (4, 4),

            Op::Ld { dst: R8::HlInd, .. } | Op::Ld { src: R8::HlInd, .. } => (8, 8),
            Op::Ld { .. } => (4, 4),
            Op::LdImm(R8::HlInd) => (12, 12),
            Op::LdImm(_) => (8, 8),
            Op::LdR16Imm(_) => (12, 12),
            Op::LdIndA(_) | Op::LdAInd(_) | Op::LdhCA | Op::LdhAC | Op::LdSpHl => (8, 8),
            Op::LdImm16Sp => (20, 20),
            Op::LdhImmA | Op::LdhAImm | Op::LdHlSpImm => (12, 12),
            Op::LdImm16A | Op::LdAImm16 => (16, 16),
            Op::AddSpImm => (16, 16),

            Op::Inc(R8::HlInd) | Op::Dec(R8::HlInd) => (12, 12),
            Op::Inc(_) | Op::Dec(_) => (4, 4),
            Op::Inc16(_) | Op::Dec16(_) | Op::AddHl(_) => (8, 8),
            Op::Alu(_, R8::HlInd) => (8, 8),
            Op::Alu(..) => (4, 4),
            Op::AluImm(_) => (8, 8),

            Op::Jr(None) => (12, 12),
            Op::Jr(Some(_)) => (12, 8),
            Op::Jp(None) => (16, 16),
            Op::Jp(Some(_)) => (16, 12),
            Op::Call(None) => (24, 24),
            Op::Call(Some(_)) => (24, 12),
            Op::Ret(None) | Op::Reti => (16, 16),
            Op::Ret(Some(_)) => (20, 8),
            Op::Rst(_) | Op::Push(_) => (16, 16),
            Op::Pop(_) => (12, 12),

            // CB-prefixed costs include the prefix fetch.
            Op::Bit(_, R8::HlInd) => (12, 12),
            Op::Shift(_, R8::HlInd) | Op::Res(_, R8::HlInd) | Op::Set(_, R8::HlInd) => (16, 16),
            Op::Shift(..) | Op::Bit(..) | Op::Res(..) | Op::Set(..) => (8, 8),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cond = |c: &Option<Cond>| match c {
            Some(c) => format!("{},", c.name()),
            None => String::new(),
        };
        match self {
            Op::Nop => f.write_str("NOP"),
            Op::Stop => f.write_str("STOP d8"),
            Op::Halt => f.write_str("HALT"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::Prefix => f.write_str("PREFIX CB"),
            Op::Undefined => f.write_str("UNDEFINED"),

            Op::Ld { dst, src } => write!(f, "LD {},{}", dst.name(), src.name()),
            Op::LdImm(r) => write!(f, "LD {},d8", r.name()),
            Op::LdR16Imm(rr) => write!(f, "LD {},d16", rr.name()),
            Op::LdIndA(ind) => write!(f, "LD {},A", ind.name()),
            Op::LdAInd(ind) => write!(f, "LD A,{}", ind.name()),
            Op::LdImm16Sp => f.write_str("LD (a16),SP"),
            Op::LdhImmA => f.write_str("LDH (a8),A"),
            Op::LdhAImm => f.write_str("LDH A,(a8)"),
            Op::LdhCA => f.write_str("LD (C),A"),
            Op::LdhAC => f.write_str("LD A,(C)"),
            Op::LdImm16A => f.write_str("LD (a16),A"),
            Op::LdAImm16 => f.write_str("LD A,(a16)"),
            Op::LdSpHl => f.write_str("LD SP,HL"),
            Op::LdHlSpImm => f.write_str("LD HL,SP+r8"),
            Op::AddSpImm => f.write_str("ADD SP,r8"),

            Op::Inc(r) => write!(f, "INC {}", r.name()),
            Op::Dec(r) => write!(f, "DEC {}", r.name()),
            Op::Inc16(rr) => write!(f, "INC {}", rr.name()),
            Op::Dec16(rr) => write!(f, "DEC {}", rr.name()),
            Op::AddHl(rr) => write!(f, "ADD HL,{}", rr.name()),
            Op::Alu(op, r) => write!(f, "{}{}", op.prefix(), r.name()),
            Op::AluImm(op) => write!(f, "{}d8", op.prefix()),

            Op::Rlca => f.write_str("RLCA"),
            Op::Rrca => f.write_str("RRCA"),
            Op::Rla => f.write_str("RLA"),
            Op::Rra => f.write_str("RRA"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),

            Op::Jr(c) => write!(f, "JR {}r8", cond(c)),
            Op::Jp(c) => write!(f, "JP {}a16", cond(c)),
            Op::JpHl => f.write_str("JP HL"),
            Op::Call(c) => write!(f, "CALL {}a16", cond(c)),
            Op::Ret(Some(c)) => write!(f, "RET {}", c.name()),
            Op::Ret(None) => f.write_str("RET"),
            Op::Reti => f.write_str("RETI"),
            Op::Rst(vector) => write!(f, "RST {:02X}H", vector),
            Op::Push(rr) => write!(f, "PUSH {}", rr.name()),
            Op::Pop(rr) => write!(f, "POP {}", rr.name()),

            Op::Shift(op, r) => write!(f, "{} {}", op.name(), r.name()),
            Op::Bit(b, r) => write!(f, "BIT {},{}", b, r.name()),
            Op::Res(b, r) => write!(f, "RES {},{}", b, r.name()),
            Op::Set(b, r) => write!(f, "SET {},{}", b, r.name()),
        }
    }
}

/// One entry of a dispatch table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: u8,
    pub prefixed: bool,
    pub mnemonic: String,
    /// Total byte length including the opcode (and the 0xCB prefix for
    /// the CB table).
    pub length: u8,
    pub cycles: u32,
    /// Cost when a conditional branch is not taken; equal to `cycles`
    /// for everything else.
    pub alt_cycles: u32,
    pub op: Op,
}

impl Instruction {
    fn new(opcode: u8, prefixed: bool, op: Op) -> Self {
        let (cycles, alt_cycles) = op.timing();
        let length = if prefixed {
            2
        } else {
            1 + op.operand_width()
        };
        Self {
            opcode,
            prefixed,
            mnemonic: op.to_string(),
            length,
            cycles,
            alt_cycles,
            op,
        }
    }

    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.cycles != self.alt_cycles
    }
}

/// Decode a base-table opcode by its x/y/z/p/q bit fields.
fn decode_base(opcode: u8) -> Op {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    match (x, z) {
        (0, 0) => match y {
            0 => Op::Nop,
            1 => Op::LdImm16Sp,
            2 => Op::Stop,
            3 => Op::Jr(None),
            _ => Op::Jr(Some(Cond::from_index(y - 4))),
        },
        (0, 1) if q == 0 => Op::LdR16Imm(R16::from_index(p)),
        (0, 1) => Op::AddHl(R16::from_index(p)),
        (0, 2) if q == 0 => Op::LdIndA(Indirect::from_index(p)),
        (0, 2) => Op::LdAInd(Indirect::from_index(p)),
        (0, 3) if q == 0 => Op::Inc16(R16::from_index(p)),
        (0, 3) => Op::Dec16(R16::from_index(p)),
        (0, 4) => Op::Inc(R8::from_index(y)),
        (0, 5) => Op::Dec(R8::from_index(y)),
        (0, 6) => Op::LdImm(R8::from_index(y)),
        (0, _) => match y {
            0 => Op::Rlca,
            1 => Op::Rrca,
            2 => Op::Rla,
            3 => Op::Rra,
            4 => Op::Daa,
            5 => Op::Cpl,
            6 => Op::Scf,
            _ => Op::Ccf,
        },

        (1, 6) if y == 6 => Op::Halt,
        (1, _) => Op::Ld {
            dst: R8::from_index(y),
            src: R8::from_index(z),
        },

        (2, _) => Op::Alu(AluOp::from_index(y), R8::from_index(z)),

        (_, 0) => match y {
            0..=3 => Op::Ret(Some(Cond::from_index(y))),
            4 => Op::LdhImmA,
            5 => Op::AddSpImm,
            6 => Op::LdhAImm,
            _ => Op::LdHlSpImm,
        },
        (_, 1) if q == 0 => Op::Pop(R16Stack::from_index(p)),
        (_, 1) => match p {
            0 => Op::Ret(None),
            1 => Op::Reti,
            2 => Op::JpHl,
            _ => Op::LdSpHl,
        },
        (_, 2) => match y {
            0..=3 => Op::Jp(Some(Cond::from_index(y))),
            4 => Op::LdhCA,
            5 => Op::LdImm16A,
            6 => Op::LdhAC,
            _ => Op::LdAImm16,
        },
        (_, 3) => match y {
            0 => Op::Jp(None),
            1 => Op::Prefix,
            6 => Op::Di,
            7 => Op::Ei,
            _ => Op::Undefined,
        },
        (_, 4) => match y {
            0..=3 => Op::Call(Some(Cond::from_index(y))),
            _ => Op::Undefined,
        },
        (_, 5) if q == 0 => Op::Push(R16Stack::from_index(p)),
        (_, 5) if p == 0 => Op::Call(None),
        (_, 5) => Op::Undefined,
        (_, 6) => Op::AluImm(AluOp::from_index(y)),
        (_, _) => Op::Rst(y * 8),
    }
}

fn decode_cb(opcode: u8) -> Op {
    let y = (opcode >> 3) & 0x07;
    let r = R8::from_index(opcode);
    match opcode >> 6 {
        0 => Op::Shift(ShiftOp::from_index(y), r),
        1 => Op::Bit(y, r),
        2 => Op::Res(y, r),
        _ => Op::Set(y, r),
    }
}

lazy_static! {
    static ref BASE_TABLE: [Instruction; 256] =
        std::array::from_fn(|i| Instruction::new(i as u8, false, decode_base(i as u8)));
    static ref CB_TABLE: [Instruction; 256] =
        std::array::from_fn(|i| Instruction::new(i as u8, true, decode_cb(i as u8)));
}

/// Descriptor for an unprefixed opcode.
#[inline]
pub fn base(opcode: u8) -> &'static Instruction {
    &BASE_TABLE[usize::from(opcode)]
}

/// Descriptor for the byte following a 0xCB prefix.
#[inline]
pub fn cb(opcode: u8) -> &'static Instruction {
    &CB_TABLE[usize::from(opcode)]
}
