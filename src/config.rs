use std::f32::consts::PI;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::consts;

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 500;
pub const DEFAULT_SCALE: u32 = 12;
pub const DEFAULT_TONE_FREQUENCY: f32 = 300.0;
pub const DEFAULT_ON_COLOR: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const DEFAULT_OFF_COLOR: Rgb = Rgb(0x00, 0x00, 0x00);

/// Shape of the tone played while the sound timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    /// Amplitude in `[-1.0, 1.0]` at `phase`, a fraction of one period in `[0.0, 1.0)`.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (phase - (phase + 0.5).floor()),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid colour {0:?}: expected six hex digits such as 00FF00")]
pub struct ParseColorError(String);

/// A display colour, written on the command line as `RRGGBB` (an optional
/// leading `#` is accepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Runtime knobs for a session, filled in from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rom_path: PathBuf,
    pub instructions_per_second: u32,
    /// Side length in window pixels of one display cell.
    pub scale: u32,
    pub tone_frequency: f32,
    pub waveform: Waveform,
    pub on_color: Rgb,
    pub off_color: Rgb,
    pub memory_size: usize,
    pub load_offset: u16,
    /// Text file of `NAME: how to play` lines, looked up by ROM file name.
    pub instructions_path: Option<PathBuf>,
}

impl Settings {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Settings {
            rom_path: rom_path.into(),
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            scale: DEFAULT_SCALE,
            tone_frequency: DEFAULT_TONE_FREQUENCY,
            waveform: Waveform::default(),
            on_color: DEFAULT_ON_COLOR,
            off_color: DEFAULT_OFF_COLOR,
            memory_size: consts::RAM_BYTES,
            load_offset: consts::PROG_OFFSET as u16,
            instructions_path: None,
        }
    }

    /// Instructions to run between two 60 Hz timer ticks.
    pub fn cycles_per_tick(&self) -> u32 {
        (self.instructions_per_second as f64 / consts::TIMER_HZ as f64).round() as u32
    }

    /// Largest program that fits between the load offset and the end of memory.
    pub fn max_rom_size(&self) -> usize {
        self.memory_size.saturating_sub(self.load_offset as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new("roms/pong.ch8");
        assert_eq!(settings.rom_path, PathBuf::from("roms/pong.ch8"));
        assert_eq!(settings.instructions_per_second, 500);
        assert_eq!(settings.memory_size, 4096);
        assert_eq!(settings.load_offset, 0x200);
        assert_eq!(settings.max_rom_size(), 3584);
        assert_eq!(settings.waveform, Waveform::Sine);
        assert_eq!(settings.on_color, Rgb(255, 255, 255));
        assert_eq!(settings.off_color, Rgb(0, 0, 0));
        assert_eq!(settings.instructions_path, None);
    }

    #[test]
    fn test_cycles_per_tick_rounds() {
        let mut settings = Settings::new("rom.ch8");
        assert_eq!(settings.cycles_per_tick(), 8);
        settings.instructions_per_second = 600;
        assert_eq!(settings.cycles_per_tick(), 10);
        settings.instructions_per_second = 700;
        assert_eq!(settings.cycles_per_tick(), 12);
        settings.instructions_per_second = 0;
        assert_eq!(settings.cycles_per_tick(), 0);
    }

    #[test]
    fn test_offset_past_memory_leaves_no_room() {
        let mut settings = Settings::new("rom.ch8");
        settings.memory_size = 0x100;
        assert_eq!(settings.max_rom_size(), 0);
    }

    #[test]
    fn test_waveform_samples() {
        assert!(Waveform::Sine.sample(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-6);
        assert!((Waveform::Sine.sample(0.75) + 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(0.1), 1.0);
        assert_eq!(Waveform::Square.sample(0.6), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.0), 0.0);
        assert_eq!(Waveform::Sawtooth.sample(0.25), 0.5);
        assert_eq!(Waveform::Sawtooth.sample(0.5), -1.0);
        assert_eq!(Waveform::Sawtooth.sample(0.75), -0.5);
    }

    #[test]
    fn test_waveform_stays_in_range() {
        for waveform in [Waveform::Sine, Waveform::Square, Waveform::Sawtooth] {
            for step in 0..100 {
                let amplitude = waveform.sample(step as f32 / 100.0);
                assert!((-1.0..=1.0).contains(&amplitude));
            }
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("00FF00".parse::<Rgb>(), Ok(Rgb(0, 255, 0)));
        assert_eq!("#1a2B3c".parse::<Rgb>(), Ok(Rgb(0x1A, 0x2B, 0x3C)));
        assert_eq!(Rgb(0x1A, 0x2B, 0x3C).to_string(), "1A2B3C");
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!("green".parse::<Rgb>().is_err());
        assert!("FFF".parse::<Rgb>().is_err());
        assert!("12345G".parse::<Rgb>().is_err());
        assert_eq!(
            "+1+2+3".parse::<Rgb>(),
            Err(ParseColorError("+1+2+3".to_string()))
        );
    }
}
