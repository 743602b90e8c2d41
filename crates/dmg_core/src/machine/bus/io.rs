//! I/O register addresses and read-back masks.

pub const P1: u16 = 0xFF00;
pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;
pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;
pub const IF: u16 = 0xFF0F;

pub const NR10: u16 = 0xFF10;
pub const NR52: u16 = 0xFF26;
pub const WAVE_RAM: u16 = 0xFF30;

pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const DMA: u16 = 0xFF46;
pub const BGP: u16 = 0xFF47;
pub const OBP0: u16 = 0xFF48;
pub const OBP1: u16 = 0xFF49;
pub const WY: u16 = 0xFF4A;
pub const WX: u16 = 0xFF4B;
/// Boot overlay disable. Any non-zero write unmaps the boot image.
pub const BOOT: u16 = 0xFF50;

#[inline]
pub(crate) const fn index(addr: u16) -> usize {
    (addr & 0x7F) as usize
}

/// Bits that always read back as 1, per register. Addresses without a
/// register are all ones, so they read 0xFF whatever was written.
pub(crate) const READ_MASK: [u8; 0x80] = build_read_mask();

const fn build_read_mask() -> [u8; 0x80] {
    let mut mask = [0xFFu8; 0x80];

    mask[index(P1)] = 0xCF;
    mask[index(SB)] = 0x00;
    mask[index(SC)] = 0x7E;
    mask[index(DIV)] = 0x00;
    mask[index(TIMA)] = 0x00;
    mask[index(TMA)] = 0x00;
    mask[index(TAC)] = 0xF8;
    mask[index(IF)] = 0xE0;

    // NR10..NR52. 0xFF15 and 0xFF1F have no register.
    const SOUND: [u8; 0x17] = [
        0x80, 0x3F, 0x00, 0xFF, 0xBF, // NR10-NR14
        0xFF, 0x3F, 0x00, 0xFF, 0xBF, // ----, NR21-NR24
        0x7F, 0xFF, 0x9F, 0xFF, 0xBF, // NR30-NR34
        0xFF, 0xFF, 0x00, 0x00, 0xBF, // ----, NR41-NR44
        0x00, 0x00, 0x70, // NR50-NR52
    ];
    let mut i = 0;
    while i < SOUND.len() {
        mask[index(NR10) + i] = SOUND[i];
        i += 1;
    }

    let mut i = 0;
    while i < 16 {
        mask[index(WAVE_RAM) + i] = 0x00;
        i += 1;
    }

    mask[index(LCDC)] = 0x00;
    mask[index(STAT)] = 0x80;
    let mut addr = SCY;
    while addr <= WX {
        mask[index(addr)] = 0x00;
        addr += 1;
    }

    mask
}
