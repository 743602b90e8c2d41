use super::{Lcdc, Palette, Ppu, VISIBLE_LINES};
use crate::machine::bus::{io, SystemBus};
use crate::SCREEN_WIDTH;

/// Window X is stored plus 7; values above this put the window off-screen.
const WX_MAX: u8 = 166;

impl Ppu {
    /// Rasterize the current line into the framebuffer.
    pub(super) fn render_line(&mut self, bus: &mut SystemBus) {
        if self.line >= VISIBLE_LINES {
            return;
        }
        let lcdc = Self::lcdc(bus);
        // Colour indices before palette mapping; sprites need them for
        // BG-over-OBJ priority.
        let mut bg_index = [0u8; SCREEN_WIDTH];
        self.render_background(bus, lcdc, &mut bg_index);
        if lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(bus, lcdc, &bg_index);
        }
    }

    fn render_background(
        &mut self,
        bus: &SystemBus,
        lcdc: Lcdc,
        bg_index: &mut [u8; SCREEN_WIDTH],
    ) {
        let row = usize::from(self.line) * SCREEN_WIDTH;
        if !lcdc.contains(Lcdc::BG_ENABLE) {
            // Background and window both blank to white.
            self.framebuffer[row..row + SCREEN_WIDTH].fill(0);
            return;
        }

        let vram = bus.vram();
        let bgp = Palette(bus.io_reg(io::BGP));
        let scx = bus.io_reg(io::SCX);
        let scy = bus.io_reg(io::SCY);
        let wy = bus.io_reg(io::WY);
        let wx = usize::from(bus.io_reg(io::WX));
        let window = lcdc.contains(Lcdc::WINDOW_ENABLE)
            && self.line >= wy
            && wx <= usize::from(WX_MAX);

        let mut drew_window = false;
        for (x, index) in bg_index.iter_mut().enumerate() {
            let color = if window && x + 7 >= wx {
                drew_window = true;
                let wx_px = (x + 7 - wx) as u8;
                map_pixel(vram, lcdc, lcdc.window_map_base(), wx_px, self.window_line)
            } else {
                let bg_x = scx.wrapping_add(x as u8);
                let bg_y = scy.wrapping_add(self.line);
                map_pixel(vram, lcdc, lcdc.bg_map_base(), bg_x, bg_y)
            };
            *index = color;
            self.framebuffer[row + x] = bgp.shade(color);
        }

        if drew_window {
            self.window_line = self.window_line.wrapping_add(1);
        }
    }
}

/// Colour index of pixel `(x, y)` in the 256x256 plane described by the
/// tile map at `map_base`.
fn map_pixel(vram: &[u8], lcdc: Lcdc, map_base: u16, x: u8, y: u8) -> u8 {
    let map_addr = map_base + u16::from(y / 8) * 32 + u16::from(x / 8);
    let tile = vram[vram_offset(map_addr)];
    let row_addr = lcdc.tile_addr(tile) + u16::from(y % 8) * 2;
    let lo = vram[vram_offset(row_addr)];
    let hi = vram[vram_offset(row_addr + 1)];
    tile_color(lo, hi, 7 - (x % 8))
}

#[inline]
pub(super) fn vram_offset(addr: u16) -> usize {
    usize::from(addr - 0x8000)
}

/// Combine the two bitplanes of a tile row at `bit` (7 is the leftmost
/// pixel) into a 2-bit colour index.
#[inline]
pub(super) fn tile_color(lo: u8, hi: u8, bit: u8) -> u8 {
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}
