use thiserror::Error;

/// Failures the core surfaces to its driver.
///
/// Malformed program bytes are not errors: they execute as data, exactly as
/// they would on hardware. The only run-time failure is the lock-up caused
/// by one of the undefined opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The CPU fetched one of the opcode holes (D3, DB, DD, E3, E4, EB, EC,
    /// ED, F4, FC, FD). Real hardware hangs until power-off.
    #[error("undefined opcode 0x{opcode:02X} at 0x{addr:04X}")]
    UndefinedOpcode { opcode: u8, addr: u16 },

    /// `step` was called again after an undefined opcode locked the CPU.
    #[error("CPU locked by undefined opcode 0x{opcode:02X} at 0x{addr:04X}")]
    CpuLocked { opcode: u8, addr: u16 },

    #[error("boot ROM must be exactly 256 bytes, got {0}")]
    BootRomSize(usize),

    #[error("ROM image of {0} bytes does not reach the cartridge entry point")]
    RomTooSmall(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
