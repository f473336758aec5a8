use chip8::consts;
use chip8::{FrameBuffer, Rgb};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

fn to_color(rgb: Rgb) -> Color {
    Color {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
        a: 255,
    }
}

pub struct DisplayDriver {
    screen: Canvas<Window>,
    scale: u32,
    on_color: Color,
    off_color: Color,
}

impl DisplayDriver {
    pub fn new(
        context: &sdl2::Sdl,
        scale: u32,
        on_color: Rgb,
        off_color: Rgb,
    ) -> Result<Self, &'static str> {
        let video_subsystem = match context.video() {
            Ok(v) => v,
            Err(_) => return Err("Could not obtain video context"),
        };
        let window = match video_subsystem
            .window(
                "CHIP-8",
                consts::DISPL_WIDTH as u32 * scale,
                consts::DISPL_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
        {
            Ok(w) => w,
            Err(_) => return Err("Could not create window"),
        };
        let mut canvas = match window.into_canvas().build() {
            Ok(c) => c,
            Err(_) => return Err("Could not create canvas"),
        };

        let off_color = to_color(off_color);
        canvas.set_draw_color(off_color);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            scale,
            on_color: to_color(on_color),
            off_color,
        })
    }

    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<(), &'static str> {
        for (y, row) in frame.rows().enumerate() {
            for (x, &col) in row.iter().enumerate() {
                let i = x as u32 * self.scale;
                let j = y as u32 * self.scale;

                self.screen.set_draw_color(if col == 1 {
                    self.on_color
                } else {
                    self.off_color
                });
                if self
                    .screen
                    .fill_rect(Rect::new(i as i32, j as i32, self.scale, self.scale))
                    .is_err()
                {
                    return Err("Could not draw pixel");
                }
            }
        }
        self.screen.present();
        Ok(())
    }
}
