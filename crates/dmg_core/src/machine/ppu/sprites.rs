use bitflags::bitflags;

use super::render::{tile_color, vram_offset};
use super::{Lcdc, Palette, Ppu};
use crate::machine::bus::{io, SystemBus};
use crate::SCREEN_WIDTH;

const MAX_SPRITES_PER_LINE: u32 = 10;

bitflags! {
    /// Byte 3 of an OAM entry. The low nibble is CGB-only.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpriteAttrs: u8 {
        /// Background colours 1-3 draw over this sprite.
        const PRIORITY = 1 << 7;
        const Y_FLIP   = 1 << 6;
        const X_FLIP   = 1 << 5;
        /// OBP1 instead of OBP0.
        const PALETTE  = 1 << 4;
    }
}

/// One decoded OAM entry. `y` and `x` are the raw stored values (screen
/// position plus 16 and plus 8).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub y: u8,
    pub x: u8,
    pub tile: u8,
    pub attrs: SpriteAttrs,
    pub oam_index: u8,
}

impl Sprite {
    fn from_oam(index: usize, entry: &[u8]) -> Self {
        Self {
            y: entry[0],
            x: entry[1],
            tile: entry[2],
            attrs: SpriteAttrs::from_bits_truncate(entry[3]),
            oam_index: index as u8,
        }
    }

    #[inline]
    fn top(self) -> i16 {
        i16::from(self.y) - 16
    }

    #[inline]
    fn left(self) -> i16 {
        i16::from(self.x) - 8
    }

    #[inline]
    fn covers(self, line: i16, height: i16) -> bool {
        (self.top()..self.top() + height).contains(&line)
    }
}

impl Ppu {
    /// Sprite cache, sorted by x with OAM order kept among equal x.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    fn refresh_sprites(&mut self, bus: &mut SystemBus) {
        if !bus.take_oam_dirty() {
            return;
        }
        self.sprites.clear();
        self.sprites.extend(
            bus.oam()
                .chunks_exact(4)
                .enumerate()
                .map(|(i, entry)| Sprite::from_oam(i, entry)),
        );
        self.sprites.sort_by_key(|sprite| sprite.x);
    }

    pub(super) fn render_sprites(
        &mut self,
        bus: &mut SystemBus,
        lcdc: Lcdc,
        bg_index: &[u8; SCREEN_WIDTH],
    ) {
        self.refresh_sprites(bus);

        let line = i16::from(self.line);
        let height = i16::from(lcdc.sprite_height());

        let mut candidates = 0u64;
        for sprite in &self.sprites {
            if sprite.covers(line, height) {
                candidates |= 1u64 << sprite.oam_index;
            }
        }
        // The line buffer holds the first ten hits in OAM order.
        let mut selected = 0u64;
        for _ in 0..MAX_SPRITES_PER_LINE {
            if candidates == 0 {
                break;
            }
            let lowest = candidates & candidates.wrapping_neg();
            selected |= lowest;
            candidates &= !lowest;
        }

        let vram = bus.vram();
        let palettes = [Palette(bus.io_reg(io::OBP0)), Palette(bus.io_reg(io::OBP1))];
        let row = usize::from(self.line) * SCREEN_WIDTH;
        // Columns already claimed by a higher-priority opaque sprite pixel.
        let mut owned = [false; SCREEN_WIDTH];

        for sprite in self
            .sprites
            .iter()
            .filter(|sprite| selected & (1u64 << sprite.oam_index) != 0)
        {
            let mut tile_row = line - sprite.top();
            if sprite.attrs.contains(SpriteAttrs::Y_FLIP) {
                tile_row = height - 1 - tile_row;
            }
            let tile = if height == 16 {
                sprite.tile & 0xFE
            } else {
                sprite.tile
            };
            // Rows 8-15 of a tall sprite run on into the odd tile.
            let addr = 0x8000 + u16::from(tile) * 16 + tile_row as u16 * 2;
            let lo = vram[vram_offset(addr)];
            let hi = vram[vram_offset(addr + 1)];
            let palette = palettes[usize::from(sprite.attrs.contains(SpriteAttrs::PALETTE))];

            for col in 0..8u8 {
                let x = sprite.left() + i16::from(col);
                if !(0..SCREEN_WIDTH as i16).contains(&x) {
                    continue;
                }
                let x = x as usize;
                if owned[x] {
                    continue;
                }
                let bit = if sprite.attrs.contains(SpriteAttrs::X_FLIP) {
                    col
                } else {
                    7 - col
                };
                let color = tile_color(lo, hi, bit);
                if color == 0 {
                    continue;
                }
                owned[x] = true;
                if sprite.attrs.contains(SpriteAttrs::PRIORITY) && bg_index[x] != 0 {
                    continue;
                }
                self.framebuffer[row + x] = palette.shade(color);
            }
        }
    }
}
