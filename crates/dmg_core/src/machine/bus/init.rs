use super::io;
use super::SystemBus;

impl SystemBus {
    /// I/O registers as the DMG boot program leaves them at 0x0100.
    ///
    /// Values follow the post-boot table in Pan Docs. Stored values only
    /// hold writable bits; the read masks supply the rest.
    pub(super) fn apply_dmg_post_boot_io(&mut self) {
        self.io = [0; 0x80];

        // Joypad: both groups deselected reads 0xCF.
        self.set_io(io::P1, 0x00);
        self.set_io(io::SC, 0x00);
        self.set_io(io::DIV, 0xAB);

        // VBlank was requested during the boot animation.
        self.set_io(io::IF, 0x01);

        // Sound registers are latched only.
        const SOUND: [(u16, u8); 20] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
        ];
        for (addr, value) in SOUND {
            self.set_io(addr, value);
        }
        self.set_io(io::NR52, 0xF1);

        // PPU registers.
        self.set_io(io::LCDC, 0x91);
        self.set_io(io::STAT, 0x85);
        self.set_io(io::DMA, 0xFF);
        self.set_io(io::BGP, 0xFC);

        self.ie = 0x00;
        self.boot_active = false;
    }

    /// I/O registers at power-on, before any boot image has run.
    pub(super) fn apply_power_on_io(&mut self) {
        self.io = [0; 0x80];
        self.ie = 0x00;
        self.boot_active = self.boot_rom.is_some();
    }

    #[inline]
    fn set_io(&mut self, addr: u16, value: u8) {
        self.io[io::index(addr)] = value;
    }
}
