use crate::cpu::Bus;

use super::SystemBus;

impl Bus for SystemBus {
    #[inline]
    fn read8(&self, addr: u16) -> u8 {
        self.read_mapped(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write_mapped(addr, value)
    }
}
