use std::sync::Arc;

use chip8::KeyboardState;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Continue,
    Quit,
}

/// Translates SDL key events into presses on the shared keypad state.
pub struct KeyboardDriver {
    events: sdl2::EventPump,
    keyboard_buffer: Arc<KeyboardState>,
}

impl KeyboardDriver {
    pub fn new(
        context: &sdl2::Sdl,
        keyboard_buffer: Arc<KeyboardState>,
    ) -> Result<Self, &'static str> {
        Ok(KeyboardDriver {
            events: match context.event_pump() {
                Ok(t) => t,
                Err(_) => return Err("Could not obtain event context"),
            },
            keyboard_buffer,
        })
    }

    pub fn poll(&mut self) -> InputAction {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return InputAction::Quit,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(code) = key_char(key) {
                        self.keyboard_buffer.key_down(code);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(code) = key_char(key) {
                        self.keyboard_buffer.key_up(code);
                    }
                }
                _ => continue,
            }
        }
        InputAction::Continue
    }
}

// Keys with a single-character name ("Q", "4", ...)
fn key_char(key: Keycode) -> Option<char> {
    let name = key.name();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
