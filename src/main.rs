use chip8::{consts, Chip8Error, Processor, ProcessorConfig, Rom, StepStatus};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Headless runner: executes a ROM for a fixed number of instructions and
/// prints the final frame.
#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a CHIP-8 ROM without a window.")]
struct Args {
    /// ROM image to load at 0x200.
    rom: PathBuf,

    /// Number of instructions to execute before exiting.
    #[arg(long, default_value_t = 3_000)]
    cycles: u64,

    /// Instructions executed per 60 Hz timer tick.
    #[arg(long, default_value_t = 10)]
    cycles_per_tick: u64,

    /// Seed for the random number generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Step over unknown opcodes instead of halting.
    #[arg(long, default_value_t = false)]
    skip_unknown: bool,

    /// Hex keys held down for the whole run, e.g. "5a".
    #[arg(long, default_value = "")]
    keys: String,
}

fn run(args: &Args) -> Result<Processor, Box<dyn std::error::Error>> {
    let mut config = ProcessorConfig::default();
    if args.skip_unknown {
        config = config.skipping_unknown();
    }
    if let Some(seed) = args.seed {
        config = config.seeded(seed);
    }

    let rom = Rom::new(&args.rom)?;
    let mut chip8 = Processor::with_config(config);
    chip8.load_rom(&rom)?;
    info!("Loaded ROM [path: {}, size: {}]", args.rom.display(), rom.len());

    for c in args.keys.chars() {
        let key = c
            .to_digit(16)
            .ok_or_else(|| format!("not a hex key: {:?}", c))?;
        chip8.keyboard_buffer.press(key as usize)?;
    }

    let per_tick = args.cycles_per_tick.max(1);
    info!(
        "Timers at {} Hz, {} instructions per tick",
        consts::TIMER_HZ,
        per_tick
    );
    let mut waiting = 0u64;
    for cycle in 0..args.cycles {
        match chip8.step() {
            Ok(StepStatus::Waiting) => waiting += 1,
            Ok(_) => {}
            Err(e @ Chip8Error::UnknownOpcode { .. }) => {
                error!("halted after {} instructions: {}", cycle, e);
                break;
            }
            Err(e) => return Err(e.into()),
        }
        if (cycle + 1) % per_tick == 0 {
            chip8.tick_timers();
            if chip8.beep_pending() {
                info!("BEEP [cycle: {}]", cycle);
            }
        }
    }
    if waiting > 0 {
        info!("Spent {} steps waiting for a key", waiting);
    }
    Ok(chip8)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut chip8 = run(&args)?;
    chip8.display_buffer.clear_dirty();
    print!("{}", chip8.display_buffer);
    Ok(())
}
