use crate::config::MachineConfig;
use crate::cpu::Cpu;
use crate::error::Result;

use super::ppu::{Ppu, DOTS_PER_FRAME};
use super::SystemBus;

/// High-level DMG machine.
///
/// Owns the CPU, the bus and the PPU and alternates `cpu.step` with
/// `ppu.tick`. This is the entry point for drivers and tooling.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: SystemBus,
    pub ppu: Ppu,
    config: MachineConfig,
}

impl GameBoy {
    pub fn new(config: MachineConfig) -> Result<Self> {
        SystemBus::validate(&config.rom, config.boot_rom.as_deref())?;
        let bus = SystemBus::from_images(&config.rom, config.boot_rom.as_deref());
        let cpu = Self::initial_cpu(&config);
        Ok(Self {
            cpu,
            bus,
            ppu: Ppu::new(),
            config,
        })
    }

    fn initial_cpu(config: &MachineConfig) -> Cpu {
        let mut cpu = if config.boot_rom.is_some() {
            Cpu::power_on()
        } else {
            Cpu::new()
        };
        cpu.set_trace(config.trace);
        cpu
    }

    /// Return to the state right after [`GameBoy::new`]. Clears a CPU
    /// lock-up.
    pub fn reset(&mut self) {
        self.bus = SystemBus::from_images(&self.config.rom, self.config.boot_rom.as_deref());
        self.cpu = Self::initial_cpu(&self.config);
        self.ppu = Ppu::new();
    }

    #[inline]
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Execute one instruction (or interrupt dispatch, or idle HALT/STOP
    /// step) and feed its cycles to the PPU.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.ppu.tick(&mut self.bus, cycles);
        Ok(cycles)
    }

    /// Run until the PPU completes the next frame.
    ///
    /// With the LCD off no frame ever completes, so the loop gives up after
    /// one frame's worth of cycles.
    pub fn step_frame(&mut self) -> Result<()> {
        let start = self.ppu.frames_completed();
        let mut elapsed = 0u32;
        while self.ppu.frames_completed() == start {
            elapsed = elapsed.saturating_add(self.step()?);
            if !self.bus.lcd_enabled() && elapsed >= DOTS_PER_FRAME {
                break;
            }
        }
        self.ppu.take_frame_ready();
        Ok(())
    }

    pub fn run_frames(&mut self, frames: usize) -> Result<()> {
        for _ in 0..frames {
            self.step_frame()?;
        }
        Ok(())
    }

    /// 160x144 shade indices, 0 lightest to 3 darkest.
    #[inline]
    pub fn framebuffer(&self) -> &[u8] {
        self.ppu.framebuffer()
    }

    /// Framebuffer mapped through the configured luminance table.
    pub fn render_luminance(&self) -> Vec<u8> {
        let shades = self.config.shades;
        self.framebuffer()
            .iter()
            .map(|&shade| shades[usize::from(shade & 0x03)])
            .collect()
    }

    /// Write the frame as packed grey RGB24 into `buffer` (160*144*3 bytes).
    pub fn render_rgb24(&self, buffer: &mut [u8]) {
        let shades = self.config.shades;
        for (pixel, &shade) in buffer.chunks_exact_mut(3).zip(self.framebuffer()) {
            pixel.fill(shades[usize::from(shade & 0x03)]);
        }
    }
}
