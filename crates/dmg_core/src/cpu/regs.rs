use bitflags::bitflags;

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0-3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 1 << 7;
        const N = 1 << 6;
        const H = 1 << 5;
        const C = 1 << 4;
    }
}

/// A 16-bit register that can also be addressed as two 8-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | (u16::from(value) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | u16::from(value);
    }
}

/// Registers for the Game Boy CPU (SM83).
///
/// AF, BC, DE and HL are stored as pairs; the 8-bit registers are views
/// onto their halves. F only ever holds the four flag bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    bc: RegisterPair,
    de: RegisterPair,
    hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

macro_rules! half_accessors {
    ($pair:ident, $hi:ident, $set_hi:ident, $lo:ident, $set_lo:ident) => {
        #[inline]
        pub fn $hi(&self) -> u8 {
            self.$pair.hi()
        }

        #[inline]
        pub fn $set_hi(&mut self, value: u8) {
            self.$pair.set_hi(value);
        }

        #[inline]
        pub fn $lo(&self) -> u8 {
            self.$pair.lo()
        }

        #[inline]
        pub fn $set_lo(&mut self, value: u8) {
            self.$pair.set_lo(value);
        }
    };
}

impl Registers {
    half_accessors!(bc, b, set_b, c, set_c);
    half_accessors!(de, d, set_d, e, set_e);
    half_accessors!(hl, h, set_h, l, set_l);

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn f(&self) -> Flags {
        Flags::from_bits_truncate(self.af.lo())
    }

    #[inline]
    pub fn set_f(&mut self, flags: Flags) {
        self.af.set_lo(flags.bits());
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.f().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.f();
        flags.set(flag, value);
        self.set_f(flags);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        // Lower 4 bits of F are always zero.
        self.af.set(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }
}

/// 8-bit operand encoding used by the opcode tables:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlInd,
    A,
}

impl R8 {
    pub(crate) const fn from_index(index: u8) -> R8 {
        match index & 0x07 {
            0 => R8::B,
            1 => R8::C,
            2 => R8::D,
            3 => R8::E,
            4 => R8::H,
            5 => R8::L,
            6 => R8::HlInd,
            _ => R8::A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        }
    }
}

/// 16-bit operand for loads and arithmetic: 0=BC, 1=DE, 2=HL, 3=SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16 {
    BC,
    DE,
    HL,
    SP,
}

impl R16 {
    pub(crate) const fn from_index(index: u8) -> R16 {
        match index & 0x03 {
            0 => R16::BC,
            1 => R16::DE,
            2 => R16::HL,
            _ => R16::SP,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            R16::BC => "BC",
            R16::DE => "DE",
            R16::HL => "HL",
            R16::SP => "SP",
        }
    }
}

/// 16-bit operand for PUSH/POP: 0=BC, 1=DE, 2=HL, 3=AF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl R16Stack {
    pub(crate) const fn from_index(index: u8) -> R16Stack {
        match index & 0x03 {
            0 => R16Stack::BC,
            1 => R16Stack::DE,
            2 => R16Stack::HL,
            _ => R16Stack::AF,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            R16Stack::BC => "BC",
            R16Stack::DE => "DE",
            R16Stack::HL => "HL",
            R16Stack::AF => "AF",
        }
    }
}
