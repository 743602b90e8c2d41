/// Abstraction over the 16-bit address space seen by the CPU.
///
/// Reads never have side effects on the DMG core, so `read8` borrows the
/// bus immutably; this also lets disassembly and interrupt polling run
/// against a shared reference.
pub trait Bus {
    fn read8(&self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read composed from two 8-bit reads.
    #[inline]
    fn read16(&self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write composed from two 8-bit writes, low byte
    /// first.
    #[inline]
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}
