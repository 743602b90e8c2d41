use crate::cpu::{Bus, Cpu};
use crate::interrupt;

impl Cpu {
    /// STOP enters the low-power state; the padding byte was already
    /// skipped by the descriptor length.
    pub(super) fn exec_stop(&mut self) {
        self.stopped = true;
        self.halted = false;
    }

    /// HALT with IME clear and an interrupt already pending does not halt;
    /// instead the next opcode byte is fetched without advancing PC.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime && !interrupt::pending(&*bus).is_empty() {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_delay = 0;
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_delay = 2;
    }
}
