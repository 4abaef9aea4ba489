//! Piano window: mirrored camera view on top, status strip below.
//!
//! Software-rendered through `minifb`, like the viewer. Text uses a tiny
//! 3×5 bitmap font, enough for the status line and the key legend.

use anyhow::{anyhow, Result};
use minifb::{Key, Window, WindowOptions};

use hand_stream::Frame;

/// Height of the status strip under the video area.
pub const STATUS_H: usize = 36;

const STRIP_BG: u32 = 0xFF10223C;
const STATUS_COLOR: u32 = 0xFFEEEEEE;
const LEGEND_COLOR: u32 = 0xFF8899AA;
const TEXT_SCALE: usize = 2;

pub struct Viewer {
    window: Window,
    buf: Vec<u32>,
    frame_w: usize,
    frame_h: usize,
}

impl Viewer {
    /// Open the window sized for `frame_w`×`frame_h` video plus the strip.
    pub fn new(frame_w: usize, frame_h: usize) -> Result<Self> {
        let mut window = Window::new(
            "Hand Notes - seven-note air piano",
            frame_w,
            frame_h + STATUS_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("cannot open window: {}", e))?;
        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Viewer {
            window,
            buf: vec![STRIP_BG; frame_w * (frame_h + STATUS_H)],
            frame_w,
            frame_h,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// True once the user closed the window or pressed Escape.
    pub fn should_quit(&self) -> bool {
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }

    /// Blit the (already mirrored) frame and redraw the status strip.
    pub fn render(&mut self, frame: &Frame, status: &str) -> Result<()> {
        let w = self.frame_w.min(frame.width);
        for y in 0..self.frame_h.min(frame.height) {
            let src = &frame.pixels[y * frame.width..y * frame.width + w];
            self.buf[y * self.frame_w..y * self.frame_w + w].copy_from_slice(src);
        }

        let strip_top = self.frame_h;
        for px in &mut self.buf[strip_top * self.frame_w..] {
            *px = STRIP_BG;
        }
        self.draw_text(status, 8, strip_top + 6, STATUS_COLOR);
        let legend = if cfg!(feature = "camera") {
            "ESC QUIT"
        } else {
            "A/S/D + J/K/L CURL FINGERS  H/N TOGGLE HANDS  ESC QUIT"
        };
        self.draw_text(legend, 8, strip_top + STATUS_H - 14, LEGEND_COLOR);

        self.window
            .update_with_buffer(&self.buf, self.frame_w, self.frame_h + STATUS_H)
            .map_err(|e| anyhow!("{}", e))
    }

    fn draw_text(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let total_w = self.frame_w;
        let total_h = self.frame_h + STATUS_H;
        let mut cx = x;
        for ch in text.chars() {
            let bits = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if bits >> (14 - (row * 3 + col)) & 1 == 1 {
                        for sy in 0..TEXT_SCALE {
                            for sx in 0..TEXT_SCALE {
                                let px = cx + col * TEXT_SCALE + sx;
                                let py = y + row * TEXT_SCALE + sy;
                                if px < total_w && py < total_h {
                                    self.buf[py * total_w + px] = color;
                                }
                            }
                        }
                    }
                }
            }
            cx += 4 * TEXT_SCALE;
            if cx + 4 * TEXT_SCALE > total_w {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font, rows packed top-to-bottom into the low 15 bits
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_011_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_010_010_010,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_010,
        'K' => 0b101_110_100_110_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_110_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_111_111_101,
        'X' => 0b101_101_010_101_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        '/' => 0b001_001_010_100_100,
        '(' => 0b001_010_010_010_001,
        ')' => 0b100_010_010_010_100,
        '*' => 0b000_101_010_101_000,
        '-' => 0b000_000_111_000_000,
        ':' => 0b000_010_000_010_000,
        '.' => 0b000_000_000_000_010,
        '+' => 0b000_010_111_010_000,
        ' ' => 0,
        _ => 0b000_000_010_000_000, // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_glyphs_are_nonempty() {
        for c in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ/()*-:+".chars() {
            assert_ne!(glyph(c), 0, "glyph for {:?} is blank", c);
        }
        assert_eq!(glyph(' '), 0);
    }

    #[test]
    fn lowercase_maps_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn glyphs_fit_fifteen_bits() {
        for c in ('!'..='~').chain(['\u{263A}']) {
            assert!(glyph(c) < 1 << 15, "glyph for {:?} overflows", c);
        }
    }
}
