use super::{io, SystemBus, OAM_SIZE, VRAM_SIZE};

/// Direct access for the PPU. These bypass the CPU-side write rules (LY
/// and the low STAT bits are read-only to software, not to the PPU).
impl SystemBus {
    /// Raw stored value of an I/O register, without read masks.
    #[inline]
    pub(crate) fn io_reg(&self, addr: u16) -> u8 {
        self.io[io::index(addr)]
    }

    #[inline]
    pub(crate) fn set_ly(&mut self, line: u8) {
        self.io[io::index(io::LY)] = line;
    }

    #[inline]
    pub(crate) fn set_stat_mode(&mut self, mode: u8) {
        let stat = &mut self.io[io::index(io::STAT)];
        *stat = (*stat & !0x03) | (mode & 0x03);
    }

    #[inline]
    pub(crate) fn set_coincidence(&mut self, equal: bool) {
        let stat = &mut self.io[io::index(io::STAT)];
        if equal {
            *stat |= 0x04;
        } else {
            *stat &= !0x04;
        }
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.io_reg(io::LCDC) & 0x80 != 0
    }

    /// Video RAM, indexed from 0x8000.
    #[inline]
    pub fn vram(&self) -> &[u8; VRAM_SIZE] {
        &self.vram
    }

    /// Object attribute memory, indexed from 0xFE00.
    #[inline]
    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    /// Report and clear whether OAM changed since the last call.
    #[inline]
    pub(crate) fn take_oam_dirty(&mut self) -> bool {
        std::mem::take(&mut self.oam_dirty)
    }
}
