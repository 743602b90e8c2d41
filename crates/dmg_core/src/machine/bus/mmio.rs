use super::{io, Region, SystemBus};

impl SystemBus {
    pub(super) fn read_mapped(&self, addr: u16) -> u8 {
        let region = Region::of(addr);
        let offset = usize::from(addr - region.base());
        match region {
            Region::BootOverlay => match &self.boot_rom {
                Some(boot) if self.boot_active => boot[offset],
                _ => self.rom[usize::from(addr)],
            },
            Region::Rom => self.rom[usize::from(addr)],
            Region::Vram => self.vram[offset],
            Region::ExternalRam => self.eram[offset],
            // Echo offsets line up with work RAM offsets.
            Region::WorkRam | Region::Echo => self.wram[offset],
            Region::Oam => self.oam[offset],
            Region::Unusable => 0xFF,
            Region::Io => self.read_io(addr),
            Region::HighRam => self.hram[offset],
            Region::InterruptEnable => self.ie,
        }
    }

    pub(super) fn write_mapped(&mut self, addr: u16, value: u8) {
        let region = Region::of(addr);
        let offset = usize::from(addr - region.base());
        match region {
            // Cartridge ROM is read-only and there is no mapper to receive
            // bank-select writes.
            Region::BootOverlay | Region::Rom | Region::Unusable => {}
            Region::Vram => self.vram[offset] = value,
            Region::ExternalRam => self.eram[offset] = value,
            Region::WorkRam | Region::Echo => self.wram[offset] = value,
            Region::Oam => {
                self.oam[offset] = value;
                self.oam_dirty = true;
            }
            Region::Io => self.write_io(addr, value),
            Region::HighRam => self.hram[offset] = value,
            Region::InterruptEnable => self.ie = value,
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        let i = io::index(addr);
        self.io[i] | io::READ_MASK[i]
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        let i = io::index(addr);
        match addr {
            // Only the group-select bits are writable.
            io::P1 => self.io[i] = value & 0x30,
            io::IF => self.io[i] = value & 0x1F,
            // Writing DIV resets it.
            io::DIV => self.io[i] = 0,
            // Only the master enable is writable; channel status bits are
            // read-only and stay as latched.
            io::NR52 => self.io[i] = (value & 0x80) | (self.io[i] & 0x0F),
            io::LCDC => self.write_lcdc(value),
            // Mode and coincidence bits belong to the PPU.
            io::STAT => self.io[i] = (self.io[i] & 0x07) | (value & 0x78),
            // LY is driven by the PPU only.
            io::LY => {}
            io::DMA => self.do_oam_dma(value),
            io::BOOT => {
                if value != 0 && self.boot_active {
                    self.boot_active = false;
                    log::debug!("GB boot overlay disabled");
                }
            }
            _ => self.io[i] = value,
        }
    }

    fn write_lcdc(&mut self, value: u8) {
        let i = io::index(io::LCDC);
        let was_on = self.io[i] & 0x80 != 0;
        let now_on = value & 0x80 != 0;
        self.io[i] = value;

        if was_on && !now_on {
            // LY reads 0 and STAT reports H-blank while the LCD is off.
            self.io[io::index(io::LY)] = 0;
            self.io[io::index(io::STAT)] &= !0x03;
            log::debug!("GB LCD off");
        } else if !was_on && now_on {
            log::debug!("GB LCD on");
        }
    }
}
