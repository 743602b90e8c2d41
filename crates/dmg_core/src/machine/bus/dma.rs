use crate::cpu::Bus;

use super::{io, SystemBus, OAM_SIZE};

impl SystemBus {
    /// OAM DMA: copy 160 bytes from XX00..XX9F to FE00..FE9F.
    ///
    /// The transfer happens immediately; the 160 machine-cycle duration and
    /// the bus conflicts it causes on hardware are not modelled. Sources
    /// above 0xDF fold onto work RAM the way the echo region does.
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        let page = if value >= 0xE0 { value - 0x20 } else { value };
        let base = u16::from(page) << 8;
        for i in 0..OAM_SIZE {
            self.oam[i] = self.read8(base.wrapping_add(i as u16));
        }
        self.io[io::index(io::DMA)] = value;
        self.oam_dirty = true;
    }
}
