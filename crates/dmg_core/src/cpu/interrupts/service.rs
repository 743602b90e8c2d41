use super::super::{Bus, Cpu};
use crate::interrupt::{self, Interrupt, IE_ADDR, IF_ADDR};

/// Clock cycles consumed by an interrupt dispatch (5 machine cycles).
const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Dispatch the highest-priority pending interrupt if IME is set.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken, or `None` otherwise.
    pub(in crate::cpu) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime {
            return None;
        }
        let source = Interrupt::highest_priority(interrupt::pending(&*bus))?;

        self.ime = false;
        self.ime_delay = 0;
        self.halted = false;

        // EI immediately before a HALT that hit the halt bug: the handler
        // returns to the HALT itself.
        let pc = if std::mem::take(&mut self.halt_bug) {
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push_u16(bus, pc);
        interrupt::acknowledge(bus, source);
        self.regs.pc = source.vector();

        log::debug!(
            "GB CPU interrupt: source={:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            source,
            source.vector(),
            pc,
            self.regs.sp,
            bus.read8(IF_ADDR) & 0x1F,
            bus.read8(IE_ADDR),
        );

        Some(DISPATCH_CYCLES)
    }
}
