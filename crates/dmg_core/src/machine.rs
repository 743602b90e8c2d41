mod bus;
mod gameboy;
mod ppu;

pub use bus::{io, Region, SystemBus};
pub use gameboy::GameBoy;
pub use ppu::{
    Lcdc, Mode, Palette, Ppu, Sprite, SpriteAttrs, Stat, DOTS_PER_FRAME, DOTS_PER_LINE,
    LINES_PER_FRAME, OAM_SCAN_DOTS, PIXEL_TRANSFER_DOTS, VISIBLE_LINES,
};

/// Cartridge ROM mapped without a mapper (two 16 KiB banks).
pub const ROM_SIZE: usize = 0x8000;
/// Size of the optional boot overlay.
pub const BOOT_ROM_SIZE: usize = 0x100;
/// Smallest image that still contains the cartridge header and entry point.
pub const MIN_ROM_SIZE: usize = 0x150;
