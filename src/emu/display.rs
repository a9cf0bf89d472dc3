use std::convert::Infallible;

use super::{DISPLAY_X, DISPLAY_Y, Display};

/// The screen the CPU draws on.
///
/// The engine only ever clears it and XOR-draws sprites; `present` is called by
/// the host once per frame to flush the pixels to whatever is visible.
pub trait DisplaySurface {
    type Error;

    /// Turns every pixel off.
    fn clear(&mut self);

    /// XOR-draws `rows` as an 8 pixel wide sprite with its top-left corner at (x, y),
    /// wrapping around both edges. Returns true if any pixel was turned off.
    fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool;

    fn present(&mut self) -> Result<(), Self::Error>;
}

/// In-memory 64x32 monochrome frame buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Display<bool>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_X]; DISPLAY_Y],
        }
    }

    /// Get the state of a pixel (true = on, false = off).
    pub fn pixel(&self, y: usize, x: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&on| on).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for FrameBuffer {
    type Error = Infallible;

    fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_X]; DISPLAY_Y];
    }

    fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut any_erased = false;

        for (row, sprite_byte) in rows.iter().enumerate() {
            let y_pos = (y as usize + row) % DISPLAY_Y;

            for col in 0..8 {
                // If current sprite bit is non-zero
                if (sprite_byte & (0x80 >> col)) != 0 {
                    let x_pos = (x as usize + col) % DISPLAY_X;
                    let pixel = &mut self.pixels[y_pos][x_pos];

                    // Flip the pixel
                    *pixel ^= true;

                    if !*pixel {
                        any_erased = true;
                    }
                }
            }
        }

        any_erased
    }

    fn present(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_msb_first() {
        let mut fb = FrameBuffer::new();
        let collided = fb.draw_sprite(0, 0, &[0b1000_0001]);

        assert!(!collided);
        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(0, 1));
        assert!(fb.pixel(0, 7));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn second_draw_erases_and_collides() {
        let mut fb = FrameBuffer::new();
        let sprite = [0xF0, 0x90, 0x90, 0x90, 0xF0];

        assert!(!fb.draw_sprite(10, 5, &sprite));
        assert_eq!(fb.lit_count(), 14);
        assert!(fb.draw_sprite(10, 5, &sprite));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn wraps_both_axes() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(62, 31, &[0xFF, 0xFF]);

        // Columns 62, 63, 0..6 on rows 31 and 0
        for y in [31, 0] {
            assert!(fb.pixel(y, 62));
            assert!(fb.pixel(y, 63));
            assert!(fb.pixel(y, 0));
            assert!(fb.pixel(y, 5));
            assert!(!fb.pixel(y, 6));
        }
        assert_eq!(fb.lit_count(), 16);
    }

    #[test]
    fn wraps_coordinates_beyond_surface() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(64 + 3, 32 + 2, &[0x80]);
        assert!(fb.pixel(2, 3));
    }

    #[test]
    fn partial_overlap_collides() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0b1100_0000]);
        assert!(fb.draw_sprite(1, 0, &[0b1000_0000]));
        assert!(fb.pixel(0, 0));
        assert!(!fb.pixel(0, 1));
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0xFF; 15]);
        fb.clear();
        assert_eq!(fb, FrameBuffer::new());
    }
}
