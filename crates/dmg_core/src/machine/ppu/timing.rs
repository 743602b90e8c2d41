use super::{
    Mode, Ppu, Stat, DOTS_PER_LINE, LINES_PER_FRAME, OAM_SCAN_DOTS, PIXEL_TRANSFER_DOTS,
    VISIBLE_LINES,
};
use crate::interrupt::{self, Interrupt};
use crate::machine::bus::{io, SystemBus};

impl Ppu {
    /// Advance by `cycles` dots.
    ///
    /// Phase boundaries are handled one at a time, so a large cycle count
    /// walks through every intermediate mode and line exactly as a run of
    /// small ticks would.
    pub fn tick(&mut self, bus: &mut SystemBus, cycles: u32) {
        if !bus.lcd_enabled() {
            if self.enabled {
                self.disable(bus);
            }
            return;
        }
        if !self.enabled {
            self.enable(bus);
        }

        let mut remaining = cycles;
        while remaining > 0 {
            let boundary = self.mode_end();
            let step = (boundary - self.dots).min(remaining);
            self.dots += step;
            remaining -= step;
            if self.dots == boundary {
                self.advance(bus);
            }
        }
    }

    /// Dot at which the current mode ends.
    fn mode_end(&self) -> u32 {
        match self.mode {
            Mode::OamScan => OAM_SCAN_DOTS,
            Mode::PixelTransfer => OAM_SCAN_DOTS + PIXEL_TRANSFER_DOTS,
            Mode::HBlank | Mode::VBlank => DOTS_PER_LINE,
        }
    }

    fn advance(&mut self, bus: &mut SystemBus) {
        match self.mode {
            Mode::OamScan => self.enter_mode(bus, Mode::PixelTransfer),
            Mode::PixelTransfer => self.enter_mode(bus, Mode::HBlank),
            Mode::HBlank => {
                self.render_line(bus);
                self.next_line(bus);
                if self.line == VISIBLE_LINES {
                    self.enter_vblank(bus);
                } else {
                    self.enter_mode(bus, Mode::OamScan);
                }
            }
            Mode::VBlank => {
                self.next_line(bus);
                if self.line == 0 {
                    self.window_line = 0;
                    self.enter_mode(bus, Mode::OamScan);
                }
            }
        }
    }

    fn next_line(&mut self, bus: &mut SystemBus) {
        self.dots = 0;
        self.line += 1;
        if self.line == LINES_PER_FRAME {
            self.line = 0;
        }
        bus.set_ly(self.line);
        self.compare_lyc(bus);
    }

    fn enter_vblank(&mut self, bus: &mut SystemBus) {
        self.enter_mode(bus, Mode::VBlank);
        interrupt::request(bus, Interrupt::VBlank);
        self.frame_ready = true;
        self.frames += 1;
        log::debug!("GB PPU vblank: frame={}", self.frames);
    }

    /// Switch modes, publish the mode in STAT and raise the mode's STAT
    /// source if software selected it.
    pub(super) fn enter_mode(&mut self, bus: &mut SystemBus, mode: Mode) {
        self.mode = mode;
        bus.set_stat_mode(mode as u8);

        let select = match mode {
            Mode::HBlank => Stat::HBLANK_INT,
            Mode::VBlank => Stat::VBLANK_INT,
            Mode::OamScan => Stat::OAM_INT,
            Mode::PixelTransfer => return,
        };
        if Self::stat(bus).contains(select) {
            interrupt::request(bus, Interrupt::Stat);
        }
    }

    pub(super) fn compare_lyc(&mut self, bus: &mut SystemBus) {
        let equal = bus.io_reg(io::LYC) == self.line;
        bus.set_coincidence(equal);
        if equal && Self::stat(bus).contains(Stat::LYC_INT) {
            interrupt::request(bus, Interrupt::Stat);
        }
    }

    #[inline]
    fn stat(bus: &SystemBus) -> Stat {
        Stat::from_bits_truncate(bus.io_reg(io::STAT))
    }
}
