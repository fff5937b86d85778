//! Board geometry derived from the window size and disk count.
//!
//! All coordinates are logical points with the origin at the top-left and
//! y growing downward. The base is grounded for the tallest possible pole,
//! so only pole height (and with it the lift ceiling) depends on disk count.

use glam::Vec2;

use super::disk::DISK_HEIGHT;
use super::tower::Peg;

pub const MIN_POLE_HEIGHT: f32 = 100.0;
pub const MAX_POLE_HEIGHT: f32 = 480.0;
/// Disk count at which the pole reaches `MAX_POLE_HEIGHT`.
pub const POLE_HEIGHT_SPAN: u32 = 15;
pub const POLE_WIDTH: f32 = 20.0;
const BASE_HEIGHT: f32 = POLE_WIDTH + 6.0;
const BASE_MARGIN: f32 = 50.0;
/// Horizontal spread applied to the outer towers.
const OUTER_TOWER_OFFSET: f32 = 15.0;
/// Clearance between a lifted disk and the top of the poles.
const LIFT_MARGIN: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Pole height grows linearly with disk count, clamped to the allowed range.
pub fn pole_height(disk_count: u32) -> f32 {
    let t = disk_count as f32 / POLE_HEIGHT_SPAN as f32;
    (MIN_POLE_HEIGHT + (MAX_POLE_HEIGHT - MIN_POLE_HEIGHT) * t).clamp(MIN_POLE_HEIGHT, MAX_POLE_HEIGHT)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub disk_count: u32,
    pub pole_height: f32,
    /// Grounding point of each tower, indexed by `Peg::index`.
    pub anchors: [Vec2; 3],
    pub base: Rect,
    pub labels: [Vec2; 3],
    /// Top-left y a disk travels at between towers.
    pub lift_y: f32,
}

impl Layout {
    pub fn compute(width: f32, height: f32, disk_count: u32) -> Self {
        let ground_y = height - (height - MAX_POLE_HEIGHT) / 2.0;
        let anchors = [
            Vec2::new(width / 4.0 - OUTER_TOWER_OFFSET, ground_y),
            Vec2::new(width / 2.0, ground_y),
            Vec2::new(3.0 * width / 4.0 + OUTER_TOWER_OFFSET, ground_y),
        ];
        let labels = anchors.map(|a| Vec2::new(a.x - 5.0, a.y + 4.0));
        let base = Rect::new(
            Vec2::new(BASE_MARGIN, ground_y),
            Vec2::new(width - 2.0 * BASE_MARGIN, BASE_HEIGHT),
        );
        let pole_height = pole_height(disk_count);
        let lift_y = ground_y - pole_height - DISK_HEIGHT - LIFT_MARGIN;

        Self {
            width,
            height,
            disk_count,
            pole_height,
            anchors,
            base,
            labels,
            lift_y,
        }
    }

    pub fn anchor(&self, peg: Peg) -> Vec2 {
        self.anchors[peg.index()]
    }

    pub fn label(&self, peg: Peg) -> Vec2 {
        self.labels[peg.index()]
    }

    pub fn pole(&self, peg: Peg) -> Rect {
        let anchor = self.anchor(peg);
        Rect::new(
            Vec2::new(anchor.x - POLE_WIDTH / 2.0, anchor.y - self.pole_height),
            Vec2::new(POLE_WIDTH, self.pole_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_height_clamped() {
        assert_eq!(pole_height(0), MIN_POLE_HEIGHT);
        assert_eq!(pole_height(15), MAX_POLE_HEIGHT);
        assert_eq!(pole_height(40), MAX_POLE_HEIGHT);
        assert!((pole_height(3) - 176.0).abs() < 1e-3);
    }

    #[test]
    fn test_pole_height_monotonic() {
        for n in 0..15 {
            assert!(pole_height(n + 1) > pole_height(n));
        }
    }

    #[test]
    fn test_default_window_layout() {
        let layout = Layout::compute(900.0, 600.0, 3);
        assert_eq!(layout.anchor(Peg::A), Vec2::new(210.0, 540.0));
        assert_eq!(layout.anchor(Peg::B), Vec2::new(450.0, 540.0));
        assert_eq!(layout.anchor(Peg::C), Vec2::new(690.0, 540.0));
        assert_eq!(layout.base, Rect::new(Vec2::new(50.0, 540.0), Vec2::new(800.0, 26.0)));
        assert_eq!(layout.label(Peg::B), Vec2::new(445.0, 544.0));
    }

    #[test]
    fn test_stack_fits_under_pole_and_ceiling() {
        for n in 1..=15 {
            let layout = Layout::compute(900.0, 600.0, n);
            let stack = n as f32 * DISK_HEIGHT;
            assert!(stack < layout.pole_height, "n={n}");
            let pole_top = layout.pole(Peg::A).min.y;
            assert!(layout.lift_y + DISK_HEIGHT < pole_top, "n={n}");
            assert!(layout.lift_y >= 0.0, "n={n}");
        }
    }

    #[test]
    fn test_pole_rect_sits_on_anchor() {
        let layout = Layout::compute(900.0, 600.0, 15);
        let pole = layout.pole(Peg::C);
        assert_eq!(pole.max().y, layout.anchor(Peg::C).y);
        assert_eq!(pole.min.x + POLE_WIDTH / 2.0, layout.anchor(Peg::C).x);
    }
}
