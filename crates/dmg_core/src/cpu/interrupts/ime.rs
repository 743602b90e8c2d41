use super::super::Cpu;

impl Cpu {
    /// Advance the EI countdown after an instruction retires.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        match self.ime_delay {
            0 => {}
            1 => {
                self.ime = true;
                self.ime_delay = 0;
            }
            _ => self.ime_delay -= 1,
        }
    }
}
