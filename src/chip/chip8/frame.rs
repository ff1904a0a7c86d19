use crate::chip::chip8::constants::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH};

use crossbeam_channel::{bounded, Receiver, Sender};

/// A rendered display: one line per pixel row, every pixel rendered as two
/// characters.
pub type Frame = String;

const PIXEL_ON: &str = "██";
const PIXEL_OFF: &str = "  ";

/// Renders the 64x32 pixel grid (row-major) into a `Frame`.
pub fn render_frame(pixels: &[bool]) -> Frame {
    debug_assert_eq!(pixels.len(), CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT);

    let mut frame = String::with_capacity(pixels.len() * PIXEL_ON.len() + CHIP8_DISPLAY_HEIGHT);
    for (i, row) in pixels.chunks(CHIP8_DISPLAY_WIDTH).enumerate() {
        if i != 0 {
            frame.push('\n');
        }
        for &pixel in row {
            frame.push_str(if pixel { PIXEL_ON } else { PIXEL_OFF });
        }
    }
    frame
}

/// Creates the channel frames are handed over on. The channel has no capacity,
/// so every send blocks until the consumer takes the frame.
pub fn frame_channel() -> (Sender<Frame>, Receiver<Frame>) {
    bounded(0)
}

#[cfg(test)]
mod tests {
    use super::render_frame;
    use crate::chip::chip8::constants::{CHIP8_DISPLAY_HEIGHT, CHIP8_DISPLAY_WIDTH};

    #[test]
    fn test_blank_frame() {
        let frame = render_frame(&[false; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT]);
        let rows: Vec<&str> = frame.split('\n').collect();

        assert_eq!(rows.len(), CHIP8_DISPLAY_HEIGHT);
        for row in rows {
            assert_eq!(row, " ".repeat(2 * CHIP8_DISPLAY_WIDTH));
        }
    }

    #[test]
    fn test_lit_pixels_render_as_blocks() {
        let mut pixels = [false; CHIP8_DISPLAY_WIDTH * CHIP8_DISPLAY_HEIGHT];
        pixels[0] = true;
        pixels[CHIP8_DISPLAY_WIDTH + 63] = true;

        let frame = render_frame(&pixels);
        let rows: Vec<&str> = frame.split('\n').collect();

        assert!(rows[0].starts_with("██  "));
        assert_eq!(rows[0].chars().count(), 2 * CHIP8_DISPLAY_WIDTH);
        assert!(rows[1].ends_with("  ██"));
        assert!(!frame.ends_with('\n'));
    }
}
