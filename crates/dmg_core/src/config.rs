use typed_builder::TypedBuilder;

/// Default luminance bytes for shade indices 0 (lightest) to 3 (darkest).
pub const DEFAULT_SHADES: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

/// Everything the core needs from its environment at reset.
///
/// ```
/// use dmg_core::MachineConfig;
///
/// let config = MachineConfig::builder().rom(vec![0; 0x8000]).build();
/// assert!(config.boot_rom.is_none());
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    /// Cartridge image. Only the first 32 KiB are mapped.
    pub rom: Vec<u8>,
    /// Optional 256-byte boot overlay. When present the CPU starts at
    /// 0x0000 with zeroed registers instead of the post-boot state.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Log every executed instruction at `trace` level.
    #[builder(default = false)]
    pub trace: bool,
    /// Luminance bytes used by `GameBoy::render_luminance` and
    /// `GameBoy::render_rgb24`.
    #[builder(default = DEFAULT_SHADES)]
    pub shades: [u8; 4],
}
