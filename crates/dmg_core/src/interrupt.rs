//! Interrupt sources and the two bus-resident registers that gate them.
//!
//! There is no controller object: IE (0xFFFF) and IF (0xFF0F) live on the
//! bus, components that detect a condition set bits in IF through
//! [`request`], and only the CPU clears them when it services a source.

use bitflags::bitflags;

use crate::cpu::Bus;

/// Interrupt flag register (pending mask).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (enable mask).
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// Bit layout shared by IE and IF. Bits 7-5 are not connected.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const STAT   = 1 << 1;
        const TIMER  = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// One of the five interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    Stat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Fixed service routine address: 0x40, 0x48, 0x50, 0x58 or 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    #[inline]
    pub const fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << self as u8)
    }

    /// Lowest-numbered source in `pending`, which is the one hardware
    /// services first.
    pub fn highest_priority(pending: InterruptFlags) -> Option<Interrupt> {
        let index = pending.bits().trailing_zeros() as usize;
        Self::ALL.get(index).copied()
    }
}

/// Read IE & IF as seen by the CPU.
#[inline]
pub fn pending<B: Bus + ?Sized>(bus: &B) -> InterruptFlags {
    let enabled = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
    let requested = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
    enabled & requested
}

/// Set the pending bit for `source`.
#[inline]
pub fn request<B: Bus + ?Sized>(bus: &mut B, source: Interrupt) {
    let requested = bus.read8(IF_ADDR) | source.flag().bits();
    bus.write8(IF_ADDR, requested);
}

/// Clear the pending bit for `source`.
#[inline]
pub fn acknowledge<B: Bus + ?Sized>(bus: &mut B, source: Interrupt) {
    let requested = bus.read8(IF_ADDR) & !source.flag().bits();
    bus.write8(IF_ADDR, requested);
}
