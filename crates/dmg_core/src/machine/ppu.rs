//! Picture processing unit.
//!
//! A four-mode scanline timer driven by the cycle counts the CPU returns.
//! It reads tile, map and OAM data straight out of the bus and writes
//! 2-bit shade indices into a 160x144 framebuffer one line at a time.

mod regs;
mod render;
mod sprites;
mod timing;

pub use regs::{Lcdc, Palette, Stat};
pub use sprites::{Sprite, SpriteAttrs};

use super::bus::{io, SystemBus};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const OAM_SCAN_DOTS: u32 = 80;
pub const PIXEL_TRANSFER_DOTS: u32 = 172;
pub const HBLANK_DOTS: u32 = 204;
pub const DOTS_PER_LINE: u32 = OAM_SCAN_DOTS + PIXEL_TRANSFER_DOTS + HBLANK_DOTS;
pub const VISIBLE_LINES: u8 = 144;
pub const LINES_PER_FRAME: u8 = 154;
pub const DOTS_PER_FRAME: u32 = DOTS_PER_LINE * LINES_PER_FRAME as u32;

/// PPU mode as reported in STAT bits 1-0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    PixelTransfer = 3,
}

#[derive(Clone, Debug)]
pub struct Ppu {
    mode: Mode,
    /// Dot within the current line, 0..456.
    dots: u32,
    line: u8,
    /// Whether the PPU saw the LCD enabled on its last tick.
    enabled: bool,
    /// Internal window line counter; only advances on lines that drew
    /// window pixels.
    window_line: u8,
    framebuffer: Vec<u8>,
    /// All 40 OAM entries sorted by x (stable, so ties keep OAM order).
    sprites: Vec<Sprite>,
    frame_ready: bool,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            mode: Mode::HBlank,
            dots: 0,
            line: 0,
            enabled: false,
            window_line: 0,
            framebuffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            sprites: Vec::with_capacity(40),
            frame_ready: false,
            frames: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current line, 0-153 (144-153 are V-blank).
    #[inline]
    pub fn line(&self) -> u8 {
        self.line
    }

    /// Dot counter within the current line.
    #[inline]
    pub fn dots(&self) -> u32 {
        self.dots
    }

    /// 160x144 shade indices (0 lightest to 3 darkest), row-major.
    #[inline]
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// Shade index at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.framebuffer[y * SCREEN_WIDTH + x]
    }

    /// Number of times the PPU has entered V-blank.
    #[inline]
    pub fn frames_completed(&self) -> u64 {
        self.frames
    }

    /// True once a frame has completed and until [`Ppu::take_frame_ready`].
    #[inline]
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    #[inline]
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    /// Turn on: restart at line 0 in OAM scan.
    fn enable(&mut self, bus: &mut SystemBus) {
        self.enabled = true;
        self.line = 0;
        self.dots = 0;
        self.window_line = 0;
        bus.set_ly(0);
        self.enter_mode(bus, Mode::OamScan);
        self.compare_lyc(bus);
    }

    /// Turn off: LY reads 0, STAT reports H-blank, timing stops.
    fn disable(&mut self, bus: &mut SystemBus) {
        self.enabled = false;
        self.line = 0;
        self.dots = 0;
        self.mode = Mode::HBlank;
        bus.set_ly(0);
        bus.set_stat_mode(Mode::HBlank as u8);
    }

    #[inline]
    fn lcdc(bus: &SystemBus) -> Lcdc {
        Lcdc::from_bits_retain(bus.io_reg(io::LCDC))
    }
}
