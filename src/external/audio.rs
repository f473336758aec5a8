use chip8::{ToneEvent, Waveform};
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const VOLUME: f32 = 0.25;

struct Tone {
    waveform: Waveform,
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for Tone {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.waveform.sample(self.phase) * self.volume;
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A tone of the chosen waveform, paused until the sound timer starts it.
pub struct ToneDriver {
    device: AudioDevice<Tone>,
}

impl ToneDriver {
    pub fn new(
        context: &sdl2::Sdl,
        waveform: Waveform,
        frequency: f32,
    ) -> Result<Self, &'static str> {
        let audio_subsystem = match context.audio() {
            Ok(a) => a,
            Err(_) => return Err("Could not obtain audio context"),
        };
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = match audio_subsystem.open_playback(None, &desired, |spec| Tone {
            waveform,
            phase_inc: frequency / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        }) {
            Ok(d) => d,
            Err(_) => return Err("Could not open audio device"),
        };
        Ok(ToneDriver { device })
    }

    pub fn handle(&self, event: ToneEvent) {
        match event {
            ToneEvent::Start => self.device.resume(),
            ToneEvent::Stop => self.device.pause(),
        }
    }

    pub fn stop(&self) {
        self.device.pause();
    }
}
