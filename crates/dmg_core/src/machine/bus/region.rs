/// Backing region for an address.
///
/// Every 16-bit address belongs to exactly one region; [`Region::of`] is
/// the single routing table for both reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// 0x0000-0x00FF: boot image while the overlay is active, ROM after.
    BootOverlay,
    /// 0x0100-0x7FFF.
    Rom,
    /// 0x8000-0x9FFF: tile data and both tile maps.
    Vram,
    /// 0xA000-0xBFFF.
    ExternalRam,
    /// 0xC000-0xDFFF.
    WorkRam,
    /// 0xE000-0xFDFF: mirror of 0xC000-0xDDFF.
    Echo,
    /// 0xFE00-0xFE9F: 40 sprite entries of 4 bytes.
    Oam,
    /// 0xFEA0-0xFEFF: reads 0xFF, writes ignored.
    Unusable,
    /// 0xFF00-0xFF7F.
    Io,
    /// 0xFF80-0xFFFE.
    HighRam,
    /// 0xFFFF.
    InterruptEnable,
}

impl Region {
    pub const fn of(addr: u16) -> Region {
        match addr {
            0x0000..=0x00FF => Region::BootOverlay,
            0x0100..=0x7FFF => Region::Rom,
            0x8000..=0x9FFF => Region::Vram,
            0xA000..=0xBFFF => Region::ExternalRam,
            0xC000..=0xDFFF => Region::WorkRam,
            0xE000..=0xFDFF => Region::Echo,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::HighRam,
            0xFFFF => Region::InterruptEnable,
        }
    }

    /// First address of the region.
    pub const fn base(self) -> u16 {
        match self {
            Region::BootOverlay => 0x0000,
            Region::Rom => 0x0100,
            Region::Vram => 0x8000,
            Region::ExternalRam => 0xA000,
            Region::WorkRam => 0xC000,
            Region::Echo => 0xE000,
            Region::Oam => 0xFE00,
            Region::Unusable => 0xFEA0,
            Region::Io => 0xFF00,
            Region::HighRam => 0xFF80,
            Region::InterruptEnable => 0xFFFF,
        }
    }
}
