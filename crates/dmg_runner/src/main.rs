use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dmg_core::{GameBoy, MachineConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: dmg_runner <rom_path> <out.pgm> [frames] [--boot <path>] [--trace]";

struct Args {
    rom: PathBuf,
    out: PathBuf,
    frames: usize,
    boot: Option<PathBuf>,
    trace: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut boot = None;
    let mut trace = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--boot" => {
                let path = args.next().context("--boot needs a path")?;
                boot = Some(PathBuf::from(path));
            }
            "--trace" => trace = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(rom), Some(out)) = (positional.next(), positional.next()) else {
        bail!("{USAGE}");
    };
    let frames = match positional.next() {
        Some(n) => n
            .parse()
            .with_context(|| format!("invalid frame count '{n}'"))?,
        None => 60,
    };

    Ok(Args {
        rom: rom.into(),
        out: out.into(),
        frames,
        boot,
        trace,
    })
}

/// Binary greymap: header then one luminance byte per pixel.
fn write_pgm(path: &Path, pixels: &[u8]) -> Result<()> {
    let mut image = format!("P5\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n").into_bytes();
    image.extend_from_slice(pixels);
    std::fs::write(path, image).with_context(|| format!("failed to write '{}'", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read ROM '{}'", args.rom.display()))?;
    let config = match &args.boot {
        Some(path) => {
            let boot_rom = std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
            MachineConfig::builder()
                .rom(rom)
                .boot_rom(boot_rom)
                .trace(args.trace)
                .build()
        }
        None => MachineConfig::builder().rom(rom).trace(args.trace).build(),
    };

    let mut gb = GameBoy::new(config).context("failed to initialise machine")?;
    log::info!(
        "Running {} for {} frames",
        args.rom.display(),
        args.frames
    );

    if let Err(err) = gb.run_frames(args.frames) {
        // A locked CPU still leaves a meaningful picture behind.
        log::warn!("Stopped early: {err}");
    }

    write_pgm(&args.out, &gb.render_luminance())?;
    println!(
        "Wrote {}x{} frame after {} instructions to '{}'",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        gb.cpu.instructions_executed(),
        args.out.display()
    );
    Ok(())
}
