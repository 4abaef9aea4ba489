//! Software annotation: hand skeleton, fingertip marker, and the mirror
//! flip applied before display.
//!
//! Drawing happens in source (un-mirrored) coordinates; callers mirror the
//! whole frame afterwards, matching the original annotate→flip→show order.

use crate::landmark::{index, HandObservation, HAND_CONNECTIONS, LANDMARK_COUNT};
use crate::source::Frame;

/// Skeleton connection color.
pub const BONE_COLOR: u32 = 0xFF3CC8FF;
/// Joint dot color.
pub const JOINT_COLOR: u32 = 0xFFFF5050;
/// Index-fingertip marker color (the original's green circle).
pub const MARKER_COLOR: u32 = 0xFF00FF00;
/// Index-fingertip marker radius in pixels.
pub const MARKER_RADIUS: i32 = 5;

const JOINT_RADIUS: i32 = 2;

/// Draw the full connection skeleton plus a dot at every landmark.
pub fn draw_skeleton(frame: &mut Frame, hand: &HandObservation) {
    for &(a, b) in &HAND_CONNECTIONS {
        let (x0, y0) = hand.pixel(a, frame.width, frame.height);
        let (x1, y1) = hand.pixel(b, frame.width, frame.height);
        draw_line(frame, x0, y0, x1, y1, BONE_COLOR);
    }
    for idx in 0..LANDMARK_COUNT {
        let (x, y) = hand.pixel(idx, frame.width, frame.height);
        fill_circle(frame, x, y, JOINT_RADIUS, JOINT_COLOR);
    }
}

/// Draw the fixed-radius filled marker at the index fingertip.
pub fn draw_tip_marker(frame: &mut Frame, hand: &HandObservation) {
    let (x, y) = hand.pixel(index::INDEX_FINGER_TIP, frame.width, frame.height);
    fill_circle(frame, x, y, MARKER_RADIUS, MARKER_COLOR);
}

/// Flip the frame horizontally in place for the mirror view.
pub fn mirror(frame: &mut Frame) {
    for row in frame.pixels.chunks_mut(frame.width) {
        row.reverse();
    }
}

/// Filled circle, clipped at the frame edges.
pub fn fill_circle(frame: &mut Frame, cx: i32, cy: i32, r: i32, color: u32) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                frame.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham line, clipped at the frame edges.
pub fn draw_line(frame: &mut Frame, mut x0: i32, mut y0: i32, x1: i32, y1: i32, color: u32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        frame.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    const BG: u32 = 0xFF101010;

    fn hand_with_tip_at(x: f32, y: f32) -> HandObservation {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[index::INDEX_FINGER_TIP] = Landmark::new(x, y);
        HandObservation::new(points)
    }

    #[test]
    fn tip_marker_lands_on_projected_pixel() {
        let mut frame = Frame::filled(100, 100, BG);
        let hand = hand_with_tip_at(0.5, 0.5);
        draw_tip_marker(&mut frame, &hand);
        assert_eq!(frame.pixel(50, 50), MARKER_COLOR);
        // Radius 5: edge of the disc is painted, just beyond it is not.
        assert_eq!(frame.pixel(55, 50), MARKER_COLOR);
        assert_eq!(frame.pixel(57, 50), BG);
    }

    #[test]
    fn marker_clips_at_frame_border() {
        let mut frame = Frame::filled(40, 40, BG);
        let hand = hand_with_tip_at(0.0, 0.0);
        draw_tip_marker(&mut frame, &hand);
        assert_eq!(frame.pixel(0, 0), MARKER_COLOR);
    }

    #[test]
    fn mirror_reflects_columns() {
        let mut frame = Frame::filled(4, 1, BG);
        frame.set_pixel(0, 0, 0xFFFFFFFF);
        mirror(&mut frame);
        assert_eq!(frame.pixel(3, 0), 0xFFFFFFFF);
        assert_eq!(frame.pixel(0, 0), BG);
    }

    #[test]
    fn mirror_twice_is_identity() {
        let mut frame = Frame::filled(5, 3, BG);
        frame.set_pixel(1, 2, 0xFF00FF00);
        let original = frame.clone();
        mirror(&mut frame);
        mirror(&mut frame);
        assert_eq!(frame, original);
    }

    #[test]
    fn line_paints_both_endpoints() {
        let mut frame = Frame::filled(10, 10, BG);
        draw_line(&mut frame, 1, 1, 8, 6, 0xFFFFFFFF);
        assert_eq!(frame.pixel(1, 1), 0xFFFFFFFF);
        assert_eq!(frame.pixel(8, 6), 0xFFFFFFFF);
    }

    #[test]
    fn skeleton_draws_something() {
        let mut frame = Frame::filled(64, 64, BG);
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Landmark::new(0.2 + 0.02 * i as f32, 0.3 + 0.01 * i as f32);
        }
        draw_skeleton(&mut frame, &HandObservation::new(points));
        assert!(frame.pixels.iter().any(|&p| p == BONE_COLOR));
        assert!(frame.pixels.iter().any(|&p| p == JOINT_COLOR));
    }
}
