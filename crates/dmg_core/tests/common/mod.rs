#![allow(dead_code)]

use dmg_core::{GameBoy, MachineConfig};

/// Hand-assembled 32 KiB cartridge image.
pub struct RomBuilder {
    image: Vec<u8>,
}

impl Default for RomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RomBuilder {
    pub fn new() -> Self {
        Self {
            image: vec![0; 0x8000],
        }
    }

    /// Place `bytes` at `addr`.
    pub fn at(mut self, addr: u16, bytes: &[u8]) -> Self {
        let start = usize::from(addr);
        self.image[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Place `bytes` at the cartridge entry point 0x0100.
    pub fn entry(self, bytes: &[u8]) -> Self {
        self.at(0x0100, bytes)
    }

    pub fn build(self) -> Vec<u8> {
        self.image
    }
}

/// Machine in the post-boot state running `rom`.
pub fn machine(rom: Vec<u8>) -> GameBoy {
    let config = MachineConfig::builder().rom(rom).build();
    GameBoy::new(config).expect("valid ROM image")
}

/// Run `gb` one instruction at a time until `done` holds, giving up after
/// `limit` steps.
pub fn step_until(gb: &mut GameBoy, limit: usize, mut done: impl FnMut(&GameBoy) -> bool) -> bool {
    for _ in 0..limit {
        if done(gb) {
            return true;
        }
        gb.step().expect("step");
    }
    done(gb)
}
