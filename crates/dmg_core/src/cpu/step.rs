use super::opcodes::{self, Op};
use super::{Bus, Cpu};
use crate::error::{Error, Result};
use crate::interrupt;

/// Cost reported for a step spent idling in HALT or STOP.
const IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Run one step and return the number of clock cycles (dots) it took.
    ///
    /// A step is one of: an idle cycle while halted or stopped, an
    /// interrupt dispatch, or one retired instruction.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some((opcode, addr)) = self.locked {
            return Err(Error::CpuLocked { opcode, addr });
        }

        if self.stopped {
            if interrupt::pending(&*bus).is_empty() {
                return Ok(IDLE_CYCLES);
            }
            self.stopped = false;
        }

        if let Some(cycles) = self.service_interrupt(bus) {
            return Ok(cycles);
        }

        if self.halted {
            if interrupt::pending(&*bus).is_empty() {
                return Ok(IDLE_CYCLES);
            }
            // Woken with IME clear: resume without dispatching.
            self.halted = false;
        }

        self.execute_next(bus)
    }

    /// Fetch, decode and execute the instruction at PC.
    fn execute_next<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let addr = self.regs.pc;
        let opcode = bus.read8(addr);

        // After the HALT bug the byte following the opcode is read from
        // the opcode's own address, and PC ends up one byte short.
        let halt_bug = std::mem::take(&mut self.halt_bug);
        let next = if halt_bug { addr } else { addr.wrapping_add(1) };

        let instr = if opcode == 0xCB {
            opcodes::cb(bus.read8(next))
        } else {
            opcodes::base(opcode)
        };

        if instr.op == Op::Undefined {
            return Err(self.lock(opcode, addr));
        }

        if self.trace && log::log_enabled!(log::Level::Trace) {
            log::trace!("{} | {}", Self::decode_at(&*bus, addr), self.snapshot());
        }

        let imm = match (instr.prefixed, instr.op.operand_width()) {
            (false, 1) => u16::from(bus.read8(next)),
            (false, 2) => bus.read16(next),
            _ => 0,
        };
        let length = if halt_bug {
            instr.length - 1
        } else {
            instr.length
        };
        self.regs.pc = addr.wrapping_add(u16::from(length));

        let taken = self.execute(bus, instr.op, imm);

        self.apply_ime_delay();
        self.instructions += 1;

        Ok(if taken { instr.cycles } else { instr.alt_cycles })
    }

    /// Hardware hangs on an undefined opcode; only a reset recovers.
    fn lock(&mut self, opcode: u8, addr: u16) -> Error {
        self.locked = Some((opcode, addr));
        self.halted = false;
        self.ime = false;
        log::error!(
            "GB CPU locked: undefined opcode 0x{:02X} at 0x{:04X} [{}]",
            opcode,
            addr,
            self.snapshot()
        );
        Error::UndefinedOpcode { opcode, addr }
    }
}
