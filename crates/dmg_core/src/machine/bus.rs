use super::{BOOT_ROM_SIZE, MIN_ROM_SIZE, ROM_SIZE};
use crate::error::{Error, Result};

mod dma;
mod init;
pub mod io;
mod mmio;
mod region;
mod traits;
mod video;

pub use region::Region;

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;
const RAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

/// The 64 KiB address space shared by the CPU and the PPU.
///
/// Each region has its own backing store; [`Region::of`] decides which
/// one an access lands in.
#[derive(Clone)]
pub struct SystemBus {
    rom: Box<[u8; ROM_SIZE]>,
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    boot_active: bool,
    vram: Box<[u8; VRAM_SIZE]>,
    eram: Box<[u8; RAM_SIZE]>,
    wram: Box<[u8; RAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    io: [u8; 0x80],
    hram: [u8; HRAM_SIZE],
    ie: u8,
    /// Set by OAM writes and DMA; the PPU clears it when it rebuilds its
    /// sprite cache.
    oam_dirty: bool,
}

impl SystemBus {
    /// Validate the images and build a bus.
    ///
    /// With a boot image the overlay is active and I/O starts in its
    /// power-on state; without one, I/O holds the post-boot values.
    pub fn new(rom: &[u8], boot_rom: Option<&[u8]>) -> Result<Self> {
        Self::validate(rom, boot_rom)?;
        Ok(Self::from_images(rom, boot_rom))
    }

    pub(crate) fn validate(rom: &[u8], boot_rom: Option<&[u8]>) -> Result<()> {
        if let Some(boot) = boot_rom {
            if boot.len() != BOOT_ROM_SIZE {
                return Err(Error::BootRomSize(boot.len()));
            }
        }
        if rom.len() < MIN_ROM_SIZE {
            return Err(Error::RomTooSmall(rom.len()));
        }
        if rom.len() > ROM_SIZE {
            log::warn!(
                "ROM is {} bytes; only the first {} bytes are mapped (no MBC)",
                rom.len(),
                ROM_SIZE
            );
        }
        Ok(())
    }

    /// Build a bus from images that already passed [`SystemBus::validate`].
    /// Short images are padded with 0xFF, long ones truncated.
    pub(crate) fn from_images(rom: &[u8], boot_rom: Option<&[u8]>) -> Self {
        let mut rom_bank = Box::new([0xFFu8; ROM_SIZE]);
        let len = rom.len().min(ROM_SIZE);
        rom_bank[..len].copy_from_slice(&rom[..len]);

        let boot_rom = boot_rom.and_then(|boot| {
            let image: [u8; BOOT_ROM_SIZE] = boot.try_into().ok()?;
            Some(Box::new(image))
        });

        let mut bus = Self {
            rom: rom_bank,
            boot_rom,
            boot_active: false,
            vram: Box::new([0; VRAM_SIZE]),
            eram: Box::new([0; RAM_SIZE]),
            wram: Box::new([0; RAM_SIZE]),
            oam: [0; OAM_SIZE],
            io: [0; 0x80],
            hram: [0; HRAM_SIZE],
            ie: 0,
            oam_dirty: true,
        };
        if bus.boot_rom.is_some() {
            bus.apply_power_on_io();
        } else {
            bus.apply_dmg_post_boot_io();
        }
        bus
    }

    /// True while reads of 0x0000-0x00FF come from the boot image.
    #[inline]
    pub fn boot_active(&self) -> bool {
        self.boot_active
    }
}
