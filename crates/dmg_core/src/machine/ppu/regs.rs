use bitflags::bitflags;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const LCD_ENABLE      = 1 << 7;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP      = 1 << 6;
        const WINDOW_ENABLE   = 1 << 5;
        /// Unsigned tile addressing from 0x8000 instead of signed from 0x9000.
        const TILE_DATA       = 1 << 4;
        /// Background tile map at 0x9C00 instead of 0x9800.
        const BG_MAP          = 1 << 3;
        const OBJ_SIZE        = 1 << 2;
        const OBJ_ENABLE      = 1 << 1;
        const BG_ENABLE       = 1 << 0;
    }
}

bitflags! {
    /// STAT (0xFF41) interrupt-source selects and coincidence flag. The
    /// mode lives in bits 1-0 and is not a flag.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Stat: u8 {
        const LYC_INT     = 1 << 6;
        const OAM_INT     = 1 << 5;
        const VBLANK_INT  = 1 << 4;
        const HBLANK_INT  = 1 << 3;
        const COINCIDENCE = 1 << 2;
    }
}

impl Lcdc {
    pub(super) fn bg_map_base(self) -> u16 {
        if self.contains(Lcdc::BG_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    pub(super) fn window_map_base(self) -> u16 {
        if self.contains(Lcdc::WINDOW_MAP) {
            0x9C00
        } else {
            0x9800
        }
    }

    /// Address of the first byte of background/window tile `index`.
    ///
    /// Unsigned mode indexes 0-255 from 0x8000. Signed mode treats the
    /// index as -128..127 relative to 0x9000, so 0x80-0xFF reach the
    /// shared block at 0x8800.
    pub(super) fn tile_addr(self, index: u8) -> u16 {
        if self.contains(Lcdc::TILE_DATA) {
            0x8000 + u16::from(index) * 16
        } else {
            0x9000u16.wrapping_add((index as i8 as i16 * 16) as u16)
        }
    }

    pub(super) fn sprite_height(self) -> u8 {
        if self.contains(Lcdc::OBJ_SIZE) {
            16
        } else {
            8
        }
    }
}

/// BGP/OBP0/OBP1: four 2-bit shade selectors packed into one byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette(pub u8);

impl Palette {
    /// Shade (0 lightest to 3 darkest) for colour index 0-3.
    #[inline]
    pub fn shade(self, color: u8) -> u8 {
        (self.0 >> ((color & 0x03) * 2)) & 0x03
    }
}
