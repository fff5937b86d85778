use glam::Vec2;

/// Every disk has the same height, in logical points.
pub const DISK_HEIGHT: f32 = 30.0;

/// Width of the smallest disk the sizing formula converges to.
const MIN_DISK_WIDTH: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const MAGENTA: Self = Self::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black on bright fills, white on dark ones.
    pub fn legible_text_color(self) -> Self {
        let luma = self.r as f32 * 0.299 + self.g as f32 * 0.7 + self.b as f32 * 0.114;
        if luma > 150.0 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

/// Disk colors, assigned cyclically by index.
pub const PALETTE: [Rgb; 5] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW, Rgb::MAGENTA];

pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Width of disk `index` in a set of `count`. Index 0 is the widest
/// (a quarter of the window), each following disk shrinks by the same step.
pub fn disk_width(index: usize, count: u32, window_width: f32) -> f32 {
    let widest = window_width / 4.0;
    if count == 0 {
        return widest;
    }
    let step = ((widest - 20.0) - MIN_DISK_WIDTH) / count as f32;
    widest - index as f32 * step
}

/// A puzzle piece. Identity, size and color never change after creation;
/// `position` is the top-left corner on screen and is only meaningful for
/// drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Disk {
    index: usize,
    size: Vec2,
    color: Rgb,
    pub position: Vec2,
}

impl Disk {
    pub fn new(index: usize, width: f32, color: Rgb) -> Self {
        Self {
            index,
            size: Vec2::new(width, DISK_HEIGHT),
            color,
            position: Vec2::ZERO,
        }
    }

    /// Disk `index` of a `count`-disk set, sized for `window_width`.
    pub fn for_set(index: usize, count: u32, window_width: f32) -> Self {
        Self::new(index, disk_width(index, count, window_width), palette_color(index))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widest_disk_is_quarter_window() {
        assert_eq!(disk_width(0, 3, 900.0), 225.0);
    }

    #[test]
    fn test_widths_strictly_decrease() {
        for count in 1..=15 {
            let widths: Vec<f32> = (0..count as usize).map(|i| disk_width(i, count, 900.0)).collect();
            assert!(widths.windows(2).all(|w| w[0] > w[1]), "count {count}: {widths:?}");
            assert!(*widths.last().unwrap() > MIN_DISK_WIDTH);
        }
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), Rgb::RED);
        assert_eq!(palette_color(4), Rgb::MAGENTA);
        assert_eq!(palette_color(5), Rgb::RED);
        assert_eq!(palette_color(7), Rgb::BLUE);
    }

    #[test]
    fn test_legible_text_color() {
        assert_eq!(Rgb::YELLOW.legible_text_color(), Rgb::BLACK);
        assert_eq!(Rgb::GREEN.legible_text_color(), Rgb::BLACK);
        assert_eq!(Rgb::RED.legible_text_color(), Rgb::WHITE);
        assert_eq!(Rgb::BLUE.legible_text_color(), Rgb::WHITE);
        assert_eq!(Rgb::MAGENTA.legible_text_color(), Rgb::WHITE);
    }

    #[test]
    fn test_disk_for_set() {
        let disk = Disk::for_set(1, 3, 900.0);
        assert_eq!(disk.index(), 1);
        assert_eq!(disk.size(), Vec2::new(disk_width(1, 3, 900.0), DISK_HEIGHT));
        assert_eq!(disk.color(), Rgb::GREEN);
    }
}
