//! SM83 CPU core.
//!
//! The CPU owns only its register file and execution state; everything
//! else is reached through the [`Bus`] trait. One call to [`Cpu::step`]
//! services an interrupt or retires one instruction and reports the clock
//! cycles it took.

pub mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod interrupts;
pub mod opcodes;
mod regs;
mod step;
mod trace;

#[cfg(test)]
mod tests;

pub use bus::Bus;
pub use opcodes::{AluOp, Cond, Indirect, Instruction, Op, ShiftOp};
pub use regs::{Flags, RegisterPair, Registers, R16Stack, R8, R16};
pub use trace::{DecodedInstruction, Operand, RegisterSnapshot};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state, left when any enabled interrupt is pending.
    stopped: bool,
    /// Countdown armed by EI: 2 when EI retires, IME is set when it
    /// reaches zero at the end of the following instruction.
    ime_delay: u8,
    /// Set when HALT ran with IME clear and an interrupt already pending:
    /// the next fetch does not advance PC past the opcode byte.
    halt_bug: bool,
    /// Opcode and address of the undefined instruction that locked the
    /// core, if any.
    locked: Option<(u8, u16)>,
    instructions: u64,
    trace: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot program leaves it in when it jumps
    /// to the cartridge entry point at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::power_on();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// CPU as it comes out of reset, ready to run a boot image from
    /// 0x0000.
    pub fn power_on() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            ime_delay: 0,
            halt_bug: false,
            locked: None,
            instructions: 0,
            trace: false,
        }
    }

    /// Registers after the boot program (values from Pan Docs, DMG).
    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }

    /// Enable or disable per-instruction `log::trace!` output.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Opcode and address that locked the CPU, if it is locked.
    #[inline]
    pub fn locked(&self) -> Option<(u8, u16)> {
        self.locked
    }

    /// True while an EI is waiting for its following instruction.
    #[inline]
    pub fn ime_pending(&self) -> bool {
        self.ime_delay != 0
    }

    /// Number of instructions retired since construction. Interrupt
    /// dispatch is not counted.
    #[inline]
    pub fn instructions_executed(&self) -> u64 {
        self.instructions
    }
}
