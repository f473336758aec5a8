use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use chip8::config::{
    DEFAULT_INSTRUCTIONS_PER_SECOND, DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR, DEFAULT_SCALE,
    DEFAULT_TONE_FREQUENCY,
};
use chip8::{
    consts, instructions, CycleStatus, KeyboardState, Memory, Processor, Rgb, Rom, Settings,
    Waveform,
};
use clap::Parser;

mod external;
use crate::external::audio::ToneDriver;
use crate::external::input::{InputAction, KeyboardDriver};
use crate::external::output::DisplayDriver;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a CHIP-8 program", long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom_path: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, help = "Instructions per second")]
    ips: u32,

    #[arg(short, long, default_value_t = DEFAULT_SCALE, help = "Window pixels per display cell")]
    scale: u32,

    #[arg(short, long, default_value_t = DEFAULT_TONE_FREQUENCY, help = "Tone frequency in Hz")]
    frequency: f32,

    #[arg(short, long, value_enum, default_value_t = Waveform::Sine, help = "Tone waveform")]
    waveform: Waveform,

    #[arg(long, default_value_t = DEFAULT_ON_COLOR, help = "Colour of lit pixels, as RRGGBB")]
    on_color: Rgb,

    #[arg(long, default_value_t = DEFAULT_OFF_COLOR, help = "Colour of unlit pixels, as RRGGBB")]
    off_color: Rgb,

    #[arg(long, help = "File of NAME: text lines describing how to play each ROM")]
    instructions: Option<PathBuf>,

    #[arg(long, default_value_t = consts::RAM_BYTES, help = "Memory size in bytes")]
    memory_size: usize,

    #[arg(long, default_value_t = consts::PROG_OFFSET as u16, help = "Address the ROM is loaded at")]
    load_offset: u16,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            rom_path: args.rom_path,
            instructions_per_second: args.ips,
            scale: args.scale,
            tone_frequency: args.frequency,
            waveform: args.waveform,
            on_color: args.on_color,
            off_color: args.off_color,
            memory_size: args.memory_size,
            load_offset: args.load_offset,
            instructions_path: args.instructions,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::from(Args::parse());

    let rom = Rom::new(&settings.rom_path, settings.max_rom_size())
        .with_context(|| format!("Failed to load {}", settings.rom_path.display()))?;
    let keyboard = Arc::new(KeyboardState::default());
    let mut processor = Processor::new(Memory::new(settings.memory_size)?, Arc::clone(&keyboard));
    processor.load_program(&rom, settings.load_offset)?;

    let context = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = DisplayDriver::new(
        &context,
        settings.scale,
        settings.on_color,
        settings.off_color,
    ).map_err(anyhow::Error::msg)?;
    let mut input = KeyboardDriver::new(&context, keyboard).map_err(anyhow::Error::msg)?;
    let tone = match ToneDriver::new(&context, settings.waveform, settings.tone_frequency) {
        Ok(t) => Some(t),
        Err(e) => {
            eprintln!("Warning: {}, running without sound", e);
            None
        }
    };

    println!("{}", KeyboardState::layout());
    print_instructions(&settings);

    let result = run(&settings, &mut processor, &mut display, &mut input, tone.as_ref());
    if let Some(t) = &tone {
        t.stop();
    }
    result
}

fn print_instructions(settings: &Settings) {
    let Some(path) = &settings.instructions_path else {
        return;
    };
    let name = instructions::rom_name(&settings.rom_path);
    let found = File::open(path)
        .map_err(chip8::Chip8Error::from)
        .and_then(|file| instructions::find_instructions(BufReader::new(file), &name));
    match found {
        Ok(Some(text)) => println!("{}", instructions::format_instructions(&name, &text)),
        Ok(None) => eprintln!("Warning: no instructions found for {}", name),
        Err(e) => eprintln!("Warning: can't read {}: {}", path.display(), e),
    }
}

fn run(
    settings: &Settings,
    processor: &mut Processor,
    display: &mut DisplayDriver,
    input: &mut KeyboardDriver,
    tone: Option<&ToneDriver>,
) -> anyhow::Result<()> {
    let frame = Duration::from_secs(1) / consts::TIMER_HZ;
    let cycles = settings.cycles_per_tick();

    loop {
        let started = Instant::now();

        if input.poll() == InputAction::Quit {
            return Ok(());
        }

        for _ in 0..cycles {
            match processor.step()? {
                CycleStatus::Unknown(opcode) => eprintln!(
                    "Warning: unknown opcode {} at {:#05X}",
                    opcode,
                    processor.pc().wrapping_sub(consts::OP_CODE_BYTES)
                ),
                // Nothing changes until the next input poll
                CycleStatus::Waiting => break,
                CycleStatus::Continue | CycleStatus::RedrawScreen => {}
            }
        }

        if processor.redraw_requested() {
            display
                .draw(processor.frame_buffer())
                .map_err(anyhow::Error::msg)?;
            processor.clear_redraw();
        }

        if let (Some(event), Some(t)) = (processor.tick_timers(), tone) {
            t.handle(event);
        }

        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}
